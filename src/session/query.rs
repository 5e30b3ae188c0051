//! Query-scope filter session

use crate::query::{apply_query, suggest, suggestion_candidates, QueryError, QueryEvaluator};
use crate::text::{EditCommand, LineEditor};
use serde_json::Value;
use tracing::{debug, info, warn};

/// One evaluation to run, tagged with the token that identifies it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    /// Monotonically increasing per session
    pub token: u64,
    /// Expression to evaluate
    pub expression: String,
    /// Raw response body
    pub body: String,
}

/// What [`QueryFilterSession::finish_apply`] did with a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A newer request was issued; the result was discarded
    Stale,
    /// Pretty-printed output to display
    Applied(String),
    /// Error to display in place of the output
    Failed(QueryError),
}

/// jq-style filter over the opened response body
#[derive(Debug, Clone, Default)]
pub struct QueryFilterSession {
    active: bool,
    editor: LineEditor,
    last_persisted: String,
    raw_body: String,
    body: Option<Value>,
    suggestions: Vec<String>,
    selected: usize,
    navigated: bool,
    applied_query: Option<String>,
    last_token: u64,
    pending: Option<String>,
}

impl QueryFilterSession {
    /// Create an inactive session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate over `raw_body` with the persisted input
    ///
    /// A body that is not JSON still starts the session; suggestions then
    /// come from the static vocabulary only.
    pub fn start(&mut self, raw_body: &str) {
        self.active = true;
        self.editor.set_text(self.last_persisted.clone());

        if self.raw_body != raw_body || self.body.is_none() {
            self.raw_body = raw_body.to_string();
            self.body = serde_json::from_str(raw_body).ok();
        }
        self.refresh_suggestions();
        debug!(
            text = self.editor.text(),
            suggestions = self.suggestions.len(),
            "query filter started"
        );
    }

    /// Deactivate, persisting the text
    pub fn exit(&mut self) {
        self.last_persisted = self.editor.text().to_string();
        self.active = false;
        debug!(persisted = %self.last_persisted, "query filter exited");
    }

    /// Apply an editing command; suggestions follow text changes
    ///
    /// Returns `true` if the text changed.
    pub fn edit(&mut self, command: EditCommand) -> bool {
        if !self.active || !self.editor.apply(command) {
            return false;
        }
        self.refresh_suggestions();
        true
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = suggest(self.editor.text(), self.body.as_ref());
        self.selected = 0;
        self.navigated = false;
    }

    /// Move the selection up, wrapping to the last entry
    pub fn suggestion_up(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.suggestions.len() - 1
        } else {
            self.selected - 1
        };
        self.navigated = true;
    }

    /// Move the selection down, wrapping to the first entry
    pub fn suggestion_down(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.suggestions.len();
        self.navigated = true;
    }

    /// Replace the input with the selected suggestion (Tab)
    ///
    /// Returns `false` when there is nothing to accept.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(choice) = self.selected_suggestion().map(str::to_string) else {
            return false;
        };
        self.editor.set_text(choice);
        self.refresh_suggestions();
        true
    }

    /// Commit the input (Enter)
    ///
    /// Takes the selected suggestion if there is one, issues an apply request
    /// for the resulting text and closes the session. Input that is already a
    /// complete candidate (such as `.`) is kept unless the selection was moved.
    pub fn submit(&mut self) -> ApplyRequest {
        if !self.input_is_complete()
            && let Some(choice) = self.selected_suggestion().map(str::to_string)
        {
            self.editor.set_text(choice);
        }
        let request = self.begin_apply();
        self.exit();
        request
    }

    fn input_is_complete(&self) -> bool {
        let text = self.editor.text();
        !self.navigated
            && !text.is_empty()
            && suggestion_candidates(self.body.as_ref()).iter().any(|c| c == text)
    }

    /// Issue a request for the current input under a fresh token
    pub fn begin_apply(&mut self) -> ApplyRequest {
        self.last_token += 1;
        let expression = self.editor.text().to_string();
        self.pending = Some(expression.clone());
        info!(token = self.last_token, expression = %expression, "applying query");

        ApplyRequest {
            token: self.last_token,
            expression,
            body: self.raw_body.clone(),
        }
    }

    /// Accept the result of a dispatched request
    ///
    /// Results for any token other than the latest are discarded. A failure
    /// re-opens the session on the failed expression so it can be corrected.
    pub fn finish_apply(&mut self, token: u64, result: Result<String, QueryError>) -> ApplyOutcome {
        if token != self.last_token {
            debug!(token, latest = self.last_token, "discarding stale query result");
            return ApplyOutcome::Stale;
        }
        let expression = self.pending.take().unwrap_or_default();

        match result {
            Ok(output) => {
                self.applied_query = Some(expression);
                ApplyOutcome::Applied(output)
            }
            Err(err) => {
                warn!(error = %err, expression = %expression, "query failed");
                self.active = true;
                self.editor.set_text(expression);
                self.refresh_suggestions();
                ApplyOutcome::Failed(err)
            }
        }
    }

    /// Evaluate the current input synchronously
    ///
    /// The session state (active or not) is left as is.
    ///
    /// # Errors
    ///
    /// Returns the evaluator's `QueryError`; the applied query is unchanged.
    pub fn apply(&mut self, evaluator: &dyn QueryEvaluator) -> Result<String, QueryError> {
        let request = self.begin_apply();
        let output = apply_query(evaluator, &request.expression, &request.body);
        self.pending = None;

        if output.is_ok() {
            self.applied_query = Some(request.expression);
        }
        output
    }

    /// Invalidate the request in flight, if any
    ///
    /// Its result is reported as [`ApplyOutcome::Stale`] when it arrives.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.last_token += 1;
            debug!(token = self.last_token, "pending query cancelled");
        }
    }

    /// Forget the applied query (the unfiltered body is shown again)
    pub fn clear_applied(&mut self) {
        self.applied_query = None;
    }

    /// Whether the session is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current input text
    #[must_use]
    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    /// Current suggestion list
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Index of the highlighted suggestion
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Highlighted suggestion, if the list is non-empty
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&str> {
        self.suggestions.get(self.selected).map(String::as_str)
    }

    /// Expression of the last successful application
    #[must_use]
    pub fn applied_query(&self) -> Option<&str> {
        self.applied_query.as_deref()
    }

    /// Text that the next [`Self::start`] restores
    #[must_use]
    pub fn persisted_input(&self) -> &str {
        &self.last_persisted
    }

    /// Whether the body the session was started on parsed as JSON
    #[must_use]
    pub const fn has_json_body(&self) -> bool {
        self.body.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{JaqEvaluator, STATIC_SUGGESTIONS};
    use crate::testing::sample_body;
    use pretty_assertions::assert_eq;

    fn started() -> QueryFilterSession {
        let mut session = QueryFilterSession::new();
        session.start(&sample_body().to_string());
        session
    }

    fn type_text(session: &mut QueryFilterSession, text: &str) {
        for c in text.chars() {
            session.edit(EditCommand::Insert(c));
        }
    }

    #[test]
    fn test_start_lists_all_candidates() {
        let session = started();
        assert!(session.is_active());
        assert!(session.has_json_body());
        assert_eq!(session.selected_index(), 0);
        assert_eq!(session.suggestions()[0], ".");
        assert!(session.suggestions().len() > STATIC_SUGGESTIONS.len());
    }

    #[test]
    fn test_start_with_non_json_body() {
        let mut session = QueryFilterSession::new();
        session.start("<html></html>");
        assert!(session.is_active());
        assert!(!session.has_json_body());
        assert_eq!(session.suggestions().len(), STATIC_SUGGESTIONS.len());
    }

    #[test]
    fn test_typing_refreshes_suggestions() {
        let mut session = started();
        type_text(&mut session, ".users[0].");
        assert_eq!(
            session.suggestions(),
            [".users[0].address", ".users[0].id", ".users[0].name"]
        );
    }

    #[test]
    fn test_suggestion_wraparound() {
        let mut session = started();
        type_text(&mut session, ".users[0].");

        session.suggestion_up();
        assert_eq!(session.selected_index(), 2);
        session.suggestion_down();
        assert_eq!(session.selected_index(), 0);
        session.suggestion_down();
        session.suggestion_down();
        session.suggestion_down();
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn test_wraparound_on_empty_list() {
        let mut session = started();
        type_text(&mut session, "zzz");
        assert!(session.suggestions().is_empty());
        session.suggestion_up();
        session.suggestion_down();
        assert_eq!(session.selected_index(), 0);
        assert!(!session.accept_suggestion());
    }

    #[test]
    fn test_tab_accepts_selection() {
        let mut session = started();
        type_text(&mut session, ".users[0].");
        session.suggestion_down();
        session.suggestion_down();

        assert!(session.accept_suggestion());
        assert_eq!(session.text(), ".users[0].name");
        assert_eq!(session.cursor(), ".users[0].name".len());
        assert_eq!(session.selected_index(), 0);
        assert!(session.is_active());
    }

    #[test]
    fn test_enter_submits_selection_and_exits() {
        let mut session = started();
        type_text(&mut session, "len");

        let request = session.submit();
        assert_eq!(request.expression, "length");
        assert_eq!(request.token, 1);
        assert!(!session.is_active());
        assert_eq!(session.persisted_input(), "length");

        let outcome = session.finish_apply(request.token, Ok("2".to_string()));
        assert_eq!(outcome, ApplyOutcome::Applied("2".to_string()));
        assert_eq!(session.applied_query(), Some("length"));
    }

    #[test]
    fn test_enter_keeps_complete_input() {
        let mut session = started();
        type_text(&mut session, ".");
        assert_eq!(session.selected_suggestion(), Some(".total"));

        let request = session.submit();
        assert_eq!(request.expression, ".");
    }

    #[test]
    fn test_enter_after_navigation_takes_selection() {
        let mut session = started();
        type_text(&mut session, ".users");
        session.suggestion_down();
        let choice = session.selected_suggestion().unwrap().to_string();
        assert_ne!(choice, ".users");

        let request = session.submit();
        assert_eq!(request.expression, choice);
    }

    #[test]
    fn test_enter_without_suggestions_uses_raw_input() {
        let mut session = started();
        type_text(&mut session, ".total | . + 1");
        assert!(session.suggestions().is_empty());

        let request = session.submit();
        assert_eq!(request.expression, ".total | . + 1");
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = started();
        type_text(&mut session, ".total");
        let first = session.begin_apply();
        session.edit(EditCommand::Backspace);
        let second = session.begin_apply();
        assert!(second.token > first.token);

        let outcome = session.finish_apply(first.token, Ok("old".to_string()));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(session.applied_query(), None);

        let outcome = session.finish_apply(second.token, Ok("new".to_string()));
        assert_eq!(outcome, ApplyOutcome::Applied("new".to_string()));
        assert_eq!(session.applied_query(), Some(".tota"));
    }

    #[test]
    fn test_cancelled_request_is_stale() {
        let mut session = started();
        type_text(&mut session, ".total");
        let request = session.submit();

        session.cancel_pending();
        let outcome = session.finish_apply(request.token, Ok("2".to_string()));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(session.applied_query(), None);

        let next = session.begin_apply();
        assert!(next.token > request.token);
    }

    #[test]
    fn test_failure_reopens_session() {
        let mut session = started();
        type_text(&mut session, "bad{{");
        let request = session.submit();
        assert!(!session.is_active());

        let err = QueryError::Parse("unexpected".to_string());
        let outcome = session.finish_apply(request.token, Err(err.clone()));

        assert_eq!(outcome, ApplyOutcome::Failed(err));
        assert!(session.is_active());
        assert_eq!(session.text(), "bad{{");
        assert_eq!(session.applied_query(), None);
    }

    #[test]
    fn test_sync_apply() {
        let mut session = started();
        type_text(&mut session, ".users | length");

        let output = session.apply(&JaqEvaluator).unwrap();
        assert_eq!(output, "2");
        assert_eq!(session.applied_query(), Some(".users | length"));
        assert!(session.is_active());
    }

    #[test]
    fn test_sync_apply_error_keeps_applied_query() {
        let mut session = started();
        type_text(&mut session, ".total");
        session.apply(&JaqEvaluator).unwrap();

        session.edit(EditCommand::End);
        type_text(&mut session, "{{");
        let result = session.apply(&JaqEvaluator);

        assert!(matches!(result, Err(QueryError::Parse(_))));
        assert_eq!(session.applied_query(), Some(".total"));
        assert!(session.is_active());
    }

    #[test]
    fn test_restart_restores_persisted_input() {
        let mut session = started();
        type_text(&mut session, ".users");
        session.exit();

        session.start(&sample_body().to_string());
        assert_eq!(session.text(), ".users");
        assert_eq!(session.cursor(), 6);
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn test_word_delete_in_query() {
        let mut session = started();
        type_text(&mut session, ".users[0].name");
        session.edit(EditCommand::DeleteWordBack);
        assert_eq!(session.text(), ".users[0].");
    }
}

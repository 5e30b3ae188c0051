//! Application state for the ratatui TUI
//!
//! Owns the live node sequence, both filter sessions and the response view.
//! Key handlers in `events` only call the methods defined here.

use crate::collection::{
    toggle_expanded, visible_indices, CollectionNode, RequestRecord, RequestRef, RequestStore,
};
use crate::query::QueryResult;
use crate::session::{ApplyOutcome, ApplyRequest, FilterSessions};
use crate::text::EditCommand;
use crate::ui::output::MessageLevel;
use std::time::{Duration, Instant};
use tracing::debug;

/// Current mode of the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Tree navigation
    #[default]
    Normal,
    /// Typing into the tree filter
    TreeFilter,
    /// Query filter modal is open
    QueryFilter,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level (success, error, warning, info)
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// What the response pane shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseView {
    /// Saved body as captured
    #[default]
    Raw,
    /// Output of the applied query
    Filtered(String),
    /// Failure of the last query application
    Error(String),
}

/// Application state for the collection browser
#[derive(Debug)]
pub struct AppState {
    /// Live node sequence (filtered while a tree filter is applied)
    pub nodes: Vec<CollectionNode>,
    /// Request records behind the leaves
    pub store: RequestStore,
    /// Tree and query filter sessions
    pub sessions: FilterSessions,
    /// Cursor position among visible nodes
    pub cursor: usize,
    /// Scroll offset for the tree
    pub scroll_offset: usize,
    /// Height of the tree area (set during render)
    pub visible_height: usize,
    /// Request shown in the right-hand pane
    pub opened: Option<RequestRef>,
    /// Response pane content selector
    pub response_view: ResponseView,
    /// Scroll offset for the response pane
    pub response_scroll: usize,
    /// A query evaluation is in flight
    pub query_pending: bool,
    /// Current UI mode
    pub mode: Mode,
    /// Status messages
    pub messages: Vec<StatusMessage>,
    /// Message TTL for auto-expiry
    pub message_ttl: Duration,
    /// Whether the application should exit
    pub should_exit: bool,
}

impl AppState {
    /// Create state over a freshly loaded collection
    #[must_use]
    pub fn new(nodes: Vec<CollectionNode>, store: RequestStore) -> Self {
        Self {
            nodes,
            store,
            sessions: FilterSessions::new(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20, // Default, updated during render
            opened: None,
            response_view: ResponseView::Raw,
            response_scroll: 0,
            query_pending: false,
            mode: Mode::Normal,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            should_exit: false,
        }
    }

    /// Builder-style message TTL
    #[must_use]
    pub const fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }

    /// Indices of visible nodes in display order
    #[must_use]
    pub fn visible(&self) -> Vec<usize> {
        visible_indices(&self.nodes)
    }

    /// Index (into `nodes`) of the node under the cursor
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.visible().get(self.cursor).copied()
    }

    /// Node under the cursor
    #[must_use]
    pub fn current_node(&self) -> Option<&CollectionNode> {
        self.current_index().map(|idx| &self.nodes[idx])
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible().len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Jump to first node
    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last visible node
    pub fn jump_to_end(&mut self) {
        self.cursor = self.visible().len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Record the tree area height and keep the cursor in view
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.adjust_scroll();
    }

    /// Adjust scroll offset to keep cursor visible
    const fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.visible_height > 0 && self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor.saturating_sub(self.visible_height - 1);
        }
    }

    fn set_nodes(&mut self, nodes: Vec<CollectionNode>) {
        self.nodes = nodes;
        self.clamp_cursor();
    }

    /// Keep the cursor on a visible row after the node sequence changed
    fn clamp_cursor(&mut self) {
        let count = self.visible().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        self.adjust_scroll();
    }

    /// Enter/Space on the node under the cursor
    ///
    /// Containers toggle (refused while a tree filter is applied), leaves
    /// open their request.
    pub fn activate(&mut self) {
        let Some(idx) = self.current_index() else {
            return;
        };

        if let Some(request) = self.nodes[idx].request {
            self.open_request(request);
            return;
        }

        if self.sessions.tree().is_applied() {
            self.add_message(
                MessageLevel::Warning,
                "Clear the filter (Esc) before expanding or collapsing".to_string(),
            );
            return;
        }
        toggle_expanded(&mut self.nodes, idx);
        self.clamp_cursor();
    }

    /// Show `request` in the right-hand pane
    pub fn open_request(&mut self, request: RequestRef) {
        if self.opened != Some(request) {
            let query = self.sessions.query_mut();
            query.clear_applied();
            query.cancel_pending();
            self.query_pending = false;
        }
        self.opened = Some(request);
        self.response_view = ResponseView::Raw;
        self.response_scroll = 0;
        debug!(request = request.index(), "opened request");
    }

    /// Record of the opened request
    #[must_use]
    pub fn opened_record(&self) -> Option<&RequestRecord> {
        self.opened.and_then(|request| self.store.get(request))
    }

    /// Start the tree filter, re-applying the persisted text
    pub fn start_tree_filter(&mut self) {
        self.mode = Mode::TreeFilter;
        if let Some(nodes) = self.sessions.tree_mut().start(&self.nodes) {
            self.cursor = 0;
            self.set_nodes(nodes);
        }
    }

    /// Edit the tree filter text, re-filtering live
    pub fn tree_filter_edit(&mut self, command: EditCommand) {
        if let Some(nodes) = self.sessions.tree_mut().edit(command, &self.nodes) {
            self.cursor = 0;
            self.set_nodes(nodes);
        }
    }

    /// Enter in the tree filter: keep the result and focus the tree
    pub fn tree_filter_commit(&mut self) {
        if self.sessions.tree().text().is_empty() {
            self.tree_filter_exit();
        } else {
            self.mode = Mode::Normal;
        }
    }

    /// Leave the tree filter and restore the original tree
    pub fn tree_filter_exit(&mut self) {
        if let Some(original) = self.sessions.tree_mut().exit() {
            self.cursor = 0;
            self.set_nodes(original);
        }
        self.mode = Mode::Normal;
    }

    /// Open the query filter over the opened response
    pub fn start_query_filter(&mut self) {
        let body = match self.opened_record().and_then(|record| record.response.as_ref()) {
            Some(response) if response.is_json() => response.body.clone(),
            Some(_) => {
                self.add_message(MessageLevel::Warning, "Response is not JSON".to_string());
                return;
            }
            None => {
                self.add_message(MessageLevel::Warning, "Open a request with a saved response first".to_string());
                return;
            }
        };
        self.sessions.query_mut().start(&body);
        self.mode = Mode::QueryFilter;
    }

    /// Enter in the query filter: close it and hand back the request to run
    pub fn query_filter_submit(&mut self) -> ApplyRequest {
        let request = self.sessions.query_mut().submit();
        self.mode = Mode::Normal;
        self.query_pending = true;
        request
    }

    /// Esc in the query filter
    pub fn query_filter_exit(&mut self) {
        self.sessions.query_mut().exit();
        self.mode = Mode::Normal;
    }

    /// Apply a result delivered by the worker
    pub fn finish_query(&mut self, result: QueryResult) {
        match self.sessions.query_mut().finish_apply(result.token, result.result) {
            ApplyOutcome::Stale => {}
            ApplyOutcome::Applied(output) => {
                self.query_pending = false;
                self.response_view = ResponseView::Filtered(output);
                self.response_scroll = 0;
                let expression = self.sessions.query().applied_query().unwrap_or(".").to_string();
                self.add_message(MessageLevel::Success, format!("Applied {expression}"));
            }
            ApplyOutcome::Failed(err) => {
                self.query_pending = false;
                self.response_view = ResponseView::Error(err.to_string());
                self.response_scroll = 0;
                self.mode = Mode::QueryFilter;
                self.add_message(MessageLevel::Error, err.to_string());
            }
        }
    }

    /// Esc in normal mode: drop the tree filter first, then the query output
    pub fn clear_filters(&mut self) {
        if self.sessions.tree().is_applied() {
            self.tree_filter_exit();
        } else if self.response_view != ResponseView::Raw {
            self.response_view = ResponseView::Raw;
            self.response_scroll = 0;
            self.sessions.query_mut().clear_applied();
        }
    }

    /// Scroll the response pane
    pub const fn scroll_response(&mut self, delta: isize) {
        self.response_scroll = self.response_scroll.saturating_add_signed(delta);
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }

    /// Mark the application to exit
    pub const fn quit(&mut self) {
        self.should_exit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryError;
    use crate::testing::SAMPLE_COLLECTION;

    fn make_state() -> AppState {
        let (nodes, store) = RequestStore::from_json_str(SAMPLE_COLLECTION).unwrap();
        AppState::new(nodes, store)
    }

    fn visible_names(state: &AppState) -> Vec<String> {
        state
            .visible()
            .into_iter()
            .map(|i| state.nodes[i].name.clone())
            .collect()
    }

    fn type_filter(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.tree_filter_edit(EditCommand::Insert(c));
        }
    }

    #[test]
    fn test_cursor_navigation() {
        let mut state = make_state();
        assert_eq!(visible_names(&state), vec!["public", "Users", "Orders"]);

        state.cursor_down();
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.cursor, 2);

        state.cursor_up();
        assert_eq!(state.current_node().unwrap().name, "Users");

        state.jump_to_start();
        assert_eq!(state.cursor, 0);
        state.jump_to_end();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_activate_toggles_and_opens() {
        let mut state = make_state();
        state.cursor = 1;
        state.activate();
        assert_eq!(
            visible_names(&state),
            vec!["public", "Users", "List Users", "admin", "Orders"]
        );

        state.cursor_down();
        state.activate();
        assert_eq!(state.opened_record().unwrap().name, "List Users");
        assert_eq!(state.response_view, ResponseView::Raw);
    }

    #[test]
    fn test_tree_filter_roundtrip() {
        let mut state = make_state();
        state.start_tree_filter();
        assert_eq!(state.mode, Mode::TreeFilter);

        type_filter(&mut state, "order");
        assert_eq!(visible_names(&state), vec!["Orders", "checkout", "Create Order"]);

        state.tree_filter_commit();
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.sessions.tree().is_applied());

        state.clear_filters();
        assert_eq!(visible_names(&state), vec!["public", "Users", "Orders"]);
        assert!(!state.sessions.tree().is_applied());
    }

    #[test]
    fn test_reopening_filter_keeps_committed_text() {
        let mut state = make_state();
        state.start_tree_filter();
        type_filter(&mut state, "order");
        state.tree_filter_commit();

        state.start_tree_filter();
        assert_eq!(state.mode, Mode::TreeFilter);
        assert_eq!(state.sessions.tree().text(), "order");
        assert_eq!(visible_names(&state), vec!["Orders", "checkout", "Create Order"]);

        state.tree_filter_edit(EditCommand::Backspace);
        assert_eq!(state.sessions.tree().text(), "orde");
        assert_eq!(visible_names(&state), vec!["Orders", "checkout", "Create Order"]);
    }

    #[test]
    fn test_toggle_refused_while_filtered() {
        let mut state = make_state();
        state.start_tree_filter();
        type_filter(&mut state, "user");
        state.tree_filter_commit();

        state.jump_to_start();
        let before = state.nodes.clone();
        state.activate();
        assert_eq!(state.nodes, before);
        assert_eq!(state.active_messages().last().unwrap().level, MessageLevel::Warning);
    }

    #[test]
    fn test_commit_with_empty_text_exits() {
        let mut state = make_state();
        state.start_tree_filter();
        type_filter(&mut state, "x");
        state.tree_filter_edit(EditCommand::Backspace);
        state.tree_filter_commit();

        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.sessions.tree().is_active());
        assert!(!state.sessions.tree().is_applied());
    }

    #[test]
    fn test_query_filter_requires_json_response() {
        let mut state = make_state();
        state.start_query_filter();
        assert_eq!(state.mode, Mode::Normal);

        state.open_request(RequestRef(0));
        state.start_query_filter();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.active_messages().last().unwrap().text, "Response is not JSON");

        state.open_request(RequestRef(1));
        state.start_query_filter();
        assert_eq!(state.mode, Mode::QueryFilter);
    }

    #[test]
    fn test_query_results_update_view() {
        let mut state = make_state();
        state.open_request(RequestRef(1));
        state.start_query_filter();

        let request = state.query_filter_submit();
        assert!(state.query_pending);
        state.finish_query(QueryResult {
            token: request.token,
            result: Ok("2".to_string()),
        });
        assert_eq!(state.response_view, ResponseView::Filtered("2".to_string()));
        assert!(!state.query_pending);

        state.clear_filters();
        assert_eq!(state.response_view, ResponseView::Raw);
        assert_eq!(state.sessions.query().applied_query(), None);
    }

    #[test]
    fn test_query_failure_reopens_filter() {
        let mut state = make_state();
        state.open_request(RequestRef(1));
        state.start_query_filter();
        let request = state.query_filter_submit();

        state.finish_query(QueryResult {
            token: request.token,
            result: Err(QueryError::Eval("boom".to_string())),
        });
        assert_eq!(state.mode, Mode::QueryFilter);
        assert!(matches!(state.response_view, ResponseView::Error(_)));
    }

    #[test]
    fn test_stale_query_result_ignored() {
        let mut state = make_state();
        state.open_request(RequestRef(1));
        state.start_query_filter();
        let first = state.query_filter_submit();
        state.start_query_filter();
        let second = state.query_filter_submit();

        state.finish_query(QueryResult {
            token: first.token,
            result: Ok("old".to_string()),
        });
        assert_eq!(state.response_view, ResponseView::Raw);

        state.finish_query(QueryResult {
            token: second.token,
            result: Ok("new".to_string()),
        });
        assert_eq!(state.response_view, ResponseView::Filtered("new".to_string()));
    }

    #[test]
    fn test_query_result_dropped_after_switching_request() {
        let mut state = make_state();
        state.open_request(RequestRef(1));
        state.start_query_filter();
        let request = state.query_filter_submit();

        state.open_request(RequestRef(0));
        assert!(!state.query_pending);
        state.finish_query(QueryResult {
            token: request.token,
            result: Ok("2".to_string()),
        });

        assert_eq!(state.opened_record().unwrap().name, "Health Check");
        assert_eq!(state.response_view, ResponseView::Raw);
        assert_eq!(state.sessions.query().applied_query(), None);
    }

    #[test]
    fn test_activate_after_collapse_keeps_cursor_visible() {
        let mut state = make_state();
        state.cursor = 1;
        state.activate();
        state.jump_to_end();
        assert_eq!(state.cursor, 4);

        state.cursor = 1;
        state.activate();
        assert_eq!(visible_names(&state), vec!["public", "Users", "Orders"]);
        state.jump_to_end();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_response_scroll_saturates() {
        let mut state = make_state();
        state.scroll_response(-3);
        assert_eq!(state.response_scroll, 0);
        state.scroll_response(10);
        assert_eq!(state.response_scroll, 10);
    }
}

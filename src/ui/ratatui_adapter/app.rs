//! Terminal setup, rendering and the event loop

use super::events::{poll_and_handle, EventResult};
use super::state::{AppState, Mode};
use super::theme::Theme;
use super::widgets::{
    CollectionTree, FilterBar, HelpBar, QueryInputModal, RequestSummary, ResponsePane, StatusBar,
};
use crate::collection::{CollectionNode, RequestStore};
use crate::config::UiConfig;
use crate::query::QueryWorker;
use crate::ui::error::{Result, UiError};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Interactive collection browser
pub struct App {
    theme: Theme,
    tick_rate: Duration,
    message_ttl: Duration,
}

impl App {
    /// Create an app from the `[ui]` settings
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidConfig` if the tick rate is zero.
    pub fn new(config: &UiConfig) -> Result<Self> {
        if config.tick_rate_ms == 0 {
            return Err(UiError::InvalidConfig("tick_rate_ms must be positive".to_string()));
        }
        Ok(Self {
            theme: Theme::default(),
            tick_rate: config.tick_rate(),
            message_ttl: config.message_ttl(),
        })
    }

    /// Set custom theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Browse `nodes` until the user quits
    ///
    /// The worker is shut down on return.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, drawn or polled.
    pub fn run(&self, nodes: Vec<CollectionNode>, store: RequestStore, worker: QueryWorker) -> Result<()> {
        info!(
            collection = store.name(),
            requests = store.len(),
            evaluator = worker.evaluator_name(),
            "starting browser"
        );
        let state = AppState::new(nodes, store).with_message_ttl(self.message_ttl);

        let mut terminal = Self::setup_terminal()?;
        let mut worker = worker;
        let result = self.run_loop(&mut terminal, state, &mut worker);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            warn!("terminal cleanup failed: {e}");
        }
        worker.shutdown();

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        mut state: AppState,
        worker: &mut QueryWorker,
    ) -> Result<()> {
        let indicator = format!("[{}]", worker.evaluator_name());

        loop {
            while let Some(result) = worker.try_next() {
                debug!(token = result.token, "query result received");
                state.finish_query(result);
            }

            terminal.draw(|frame| self.render(frame, &mut state, &indicator))?;

            match poll_and_handle(&mut state, self.tick_rate)? {
                EventResult::Quit => break,
                EventResult::Dispatch(request) => {
                    debug!(token = request.token, expression = %request.expression, "dispatching query");
                    worker.dispatch(request);
                }
                EventResult::Continue | EventResult::Ignored => {}
            }

            if state.should_exit {
                break;
            }

            state.cleanup_messages();
        }

        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame, state: &mut AppState, indicator: &str) {
        let theme = &self.theme;

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter bar
                Constraint::Min(5),    // Tree + request/response
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let tree_session = state.sessions.tree();
        let filter_bar = FilterBar::new(
            tree_session.text(),
            tree_session.cursor(),
            state.store.name(),
            theme,
        )
        .focused(state.mode == Mode::TreeFilter);
        frame.render_widget(filter_bar, main_layout[0]);

        self.render_content(frame, state, main_layout[1]);

        let messages = state.active_messages();
        let status_bar = StatusBar::new(&messages, theme).indicator(Some(indicator));
        frame.render_widget(status_bar, main_layout[2]);

        let hints = HelpBar::hints_for(state.mode);
        frame.render_widget(HelpBar::new(&hints, theme), main_layout[3]);

        if state.mode == Mode::QueryFilter {
            frame.render_widget(QueryInputModal::new(state.sessions.query(), theme), frame.area());
        }
    }

    /// Render tree (left) and request/response (right)
    fn render_content(&self, frame: &mut Frame, state: &mut AppState, area: Rect) {
        let theme = &self.theme;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        state.set_visible_height(columns[0].height.saturating_sub(2) as usize);

        let title_style = if state.mode == Mode::Normal {
            theme.cursor_style()
        } else {
            theme.dimmed_style()
        };
        let visible = state.visible();
        let tree = CollectionTree::new(&state.nodes, &visible, &state.store, theme)
            .selected(state.cursor)
            .scroll(state.scroll_offset)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(Span::styled(" Requests ", title_style)),
            );
        frame.render_widget(tree, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)])
            .split(columns[1]);

        let record = state.opened_record();
        frame.render_widget(RequestSummary::new(record, theme), right[0]);

        let response = ResponsePane::new(record, &state.response_view, theme)
            .applied_query(state.sessions.query().applied_query())
            .pending(state.query_pending)
            .scroll(state.response_scroll);
        frame.render_widget(response, right[1]);
    }
}

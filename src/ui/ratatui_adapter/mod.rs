//! Ratatui-based collection browser
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     App                      │
//! │        (terminal setup, render, loop)        │
//! └──────┬───────────────┬───────────────┬───────┘
//!        ▼               ▼               ▼
//! ┌────────────┐  ┌─────────────┐  ┌─────────────┐
//! │  AppState  │  │   events    │  │ QueryWorker │
//! │ (sessions) │  │ (key → op)  │  │  (tokio)    │
//! └────────────┘  └─────────────┘  └─────────────┘
//! ```
//!
//! Key handlers mutate [`AppState`] and may return a query to evaluate. The
//! loop hands it to the worker and drains finished results every tick;
//! results that arrive for a superseded request are dropped by token.

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::App;
pub use events::{edit_command, EventResult};
pub use state::{AppState, Mode, ResponseView, StatusMessage};
pub use theme::Theme;

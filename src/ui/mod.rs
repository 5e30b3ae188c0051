//! User-facing output
//!
//! - [`output`]: colored stdout/stderr writer used by the subcommands
//! - [`ratatui_adapter`]: the interactive collection browser
//!
//! # Output Messages
//!
//! ```
//! use reqtui::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::quiet(true);
//! output.write("[1, 2]");
//! output.info("not shown in quiet mode");
//! ```

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter};
pub use ratatui_adapter::App;

//! # wxbench-cli
//!
//! Console report lines, suite summaries, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use presenter::{CLIResultPresenter, ConsoleReportSink, ResultFormat};

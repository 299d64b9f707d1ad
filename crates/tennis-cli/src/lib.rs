//! tennis-cli
//!
//! Front end for the flight solver: flag parsing, config resolution, the
//! text report, and trajectory export.

pub mod args;
pub mod config;
pub mod export;
pub mod report;

pub use args::Cli;
pub use config::RunConfig;
pub use export::{export, ExportError, ExportFormat};
pub use report::{CandidateSummary, ShotReport};

//! pqrunner - a subprocess bridge for the PrimusQuery database executable.
//!
//! Renders query records into the executable's line-oriented file format,
//! invokes the executable under per-call deadlines, and parses its textual
//! output for status codes. Temp query files are securely deleted on every
//! path.

pub mod cli;
pub mod config;
pub mod error;
pub mod fsio;
pub mod logging;
pub mod output;
pub mod query;
pub mod runner;

pub use config::Config;
pub use error::{PqError, Result};
pub use query::PrimusQuery;
pub use runner::{ImportOutcome, ImportRequest, Runner};

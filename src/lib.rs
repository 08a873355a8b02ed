#![forbid(unsafe_code)]

//! # qgen - Trivia-Question Dataset Builder
//!
//! Validates, normalizes, deduplicates and partitions a tab-separated
//! question table into production / debug / rejected JSON sets, plus a
//! build report and a browser-based review checklist.
//!
//! ## Pipeline
//!
//! Raw rows → validation (stateful duplicate tracking) → weight →
//! classification → natural-order sort → field projection → JSON files +
//! report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use qgen::{build, read_tsv};
//!
//! fn main() -> qgen::Result<()> {
//!     let rows = read_tsv("questions_edit.tsv")?;
//!     let output = build(&rows);
//!     println!("prod: {}", output.prod.len());
//!     Ok(())
//! }
//! ```

pub mod build;
pub mod checklist;
pub mod commands;
pub mod config;
pub mod error;
pub mod normalize;
pub mod question;
pub mod report;
pub mod tsv;
pub mod validator;
pub mod weight;

// Re-exports
pub use build::{build, natural_cmp, BuildOutput, Partition};
pub use config::Config;
pub use error::{QgenError, Result};
pub use normalize::normalize;
pub use question::{ErrorCode, OutputQuestion, Question, RawRow, Status};
pub use report::Report;
pub use tsv::read_tsv;
pub use validator::{Validation, Validator};
pub use weight::compute_weight;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

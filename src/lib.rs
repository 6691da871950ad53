//! grade-report: join a grade sheet with teacher assignments and split it
//! into one CSV report per (teacher, grade-level, subject).
//!
//! # Module Organization
//!
//! - `types` - Grade and teacher records, report and index keys
//! - `input` - CSV loading and decoding
//! - `index` - Teacher lookup by (subject, grade-level, class)
//! - `matcher` - Grade-to-teacher matching and grouping
//! - `report` - Row ordering, CSV export, summaries
//! - `distribute` - Report files per teacher email
//! - `mail` - Mail transports and delivery
//! - `settings` - Mail settings file
//! - `pipeline` - The end-to-end run

pub mod cli;
pub mod distribute;
pub mod error;
pub mod index;
pub mod input;
pub mod mail;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod settings;
pub mod types;
pub mod ui;

pub use error::{ReportError, Result};

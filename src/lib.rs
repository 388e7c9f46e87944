//! # Issuewatch
//!
//! A small CLI tool that incrementally polls GitHub issue search for newly
//! created bug reports and aggregates the distinct set of reporting users.
//!
//! ## Usage
//!
//! ```bash
//! issuewatch --config-file watch.yml [--token-file PERSONAL_ACCESS_TOKEN.txt]
//! ```
//!
//! ## Modules
//!
//! - `checkpoint` - Query-window bookkeeping and crash-safe YAML persistence
//! - `error` - Crate-wide error taxonomy
//! - `poll` - Single-run orchestration: window, paginate, aggregate
//! - `search` - Search query model, HTTP transport and bounded retries

pub mod checkpoint;
pub mod error;
pub mod poll;
pub mod search;

pub use error::{Error, Result};

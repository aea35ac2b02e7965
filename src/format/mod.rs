//! Output formatting for `saveit`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`IndexedIssue`] - Issue with its one-based position (list/find/show)
//! - [`IssueListing`] - Listing with the current directory (list)
//! - [`CommandReport`] - What a mutating command did

mod output;
mod text;

pub use output::{CommandReport, IndexedIssue, IssueListing, OutputContext};
pub use text::{
    STATEMENT_WIDTH, format_issue_details, format_issue_line, format_outcome,
    format_solution_line, format_tags, truncate_to_width,
};

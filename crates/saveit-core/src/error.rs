//! Error types for `saveit-core`.
//!
//! The first group of variants is the document taxonomy surfaced to command
//! collaborators; the rest cover value-object validation and the JSONL codec.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which kind of position an out-of-range index referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Issue,
    Solution,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => f.write_str("issue"),
            Self::Solution => f.write_str("solution"),
        }
    }
}

/// Primary error type for saveit-core operations.
#[derive(Error, Debug)]
pub enum SaveItError {
    // === Document Errors ===
    /// An add/replace would leave two issues with the same statement and description.
    #[error("This issue already exists in the list")]
    DuplicateIssue,

    /// The issue to replace or remove is not in the list.
    #[error("Issue not found in the list")]
    IssueNotFound,

    /// An issue or solution index is outside the current bounds.
    ///
    /// `index` is zero-based; the message shows it one-based.
    #[error("The {kind} index {} is out of range (have {len})", .index + 1)]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    /// The command needs a target that neither an index nor the current
    /// directory provides.
    #[error("No {what} selected: give an index or select one first")]
    NoTarget { what: IndexKind },

    // === History Errors ===
    /// The history cursor is at the oldest state.
    #[error("No more commands to undo")]
    NothingToUndo,

    /// The history cursor is at the newest state.
    #[error("No more commands to redo")]
    NothingToRedo,

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The request had no effect to apply.
    #[error("Nothing to do: {reason}")]
    NothingToDo { reason: String },

    // === JSONL Errors ===
    /// Failed to parse a line in the JSONL file.
    #[error("JSONL parse error at line {line}: {reason}")]
    JsonlParse { line: usize, reason: String },

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SaveItError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn nothing_to_do(reason: impl Into<String>) -> Self {
        Self::NothingToDo {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn issue_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Issue,
            index,
            len,
        }
    }

    #[must_use]
    pub const fn solution_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Solution,
            index,
            len,
        }
    }
}

/// Result type using `SaveItError`.
pub type Result<T> = std::result::Result<T, SaveItError>;

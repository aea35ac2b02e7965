//! `saveit-core`: in-memory versioned issue/solution document store.
//!
//! Holds every issue, keeps them free of duplicates, addresses into an
//! issue's solutions through a [`Directory`], and records each committed
//! change as an immutable snapshot for undo/redo.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use saveit_core::{Command, Description, Issue, IssueStatement, VersionedDocument, jsonl};
//!
//! let path = std::path::Path::new(".saveit/issues.jsonl");
//! let mut document = VersionedDocument::new(jsonl::load_document(path).unwrap());
//! let changes = document.subscribe();
//!
//! let issue = Issue::new(
//!     IssueStatement::new("cargo build hangs").unwrap(),
//!     Description::new("stuck at 'Blocking waiting for file lock'").unwrap(),
//!     Vec::new(),
//!     BTreeSet::new(),
//! );
//! Command::AddIssue(issue).execute(&mut document).unwrap();
//! Command::Undo.execute(&mut document).unwrap();
//!
//! for change in changes.try_iter() {
//!     jsonl::save(path, change.snapshot.issues()).unwrap();
//! }
//! ```

pub mod command;
pub mod directory;
pub mod document;
pub mod error;
pub mod index;
pub mod jsonl;
pub mod model;
pub mod query;
pub mod unique_list;
pub mod value;
pub mod versioned;

pub use command::{Command, Outcome};
pub use directory::{Directory, DirectoryLevel};
pub use document::Document;
pub use error::{IndexKind, Result, SaveItError};
pub use index::Index;
pub use model::{Issue, Solution};
pub use query::{IssueFilter, IssueUpdate, SolutionUpdate, SortKey};
pub use unique_list::UniqueIssueList;
pub use value::{Description, IssueStatement, Remark, SolutionLink, Tag};
pub use versioned::{ChangeKind, DocumentChanged, Snapshot, VersionedDocument};

/// Version of the core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

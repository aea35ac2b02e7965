//! Command dispatch: the one entry point collaborators use to change a
//! [`VersionedDocument`].
//!
//! A command runs against the live document. If it changed anything it is
//! committed; if it failed, the live document is put back as it was just
//! before the command, so neither the document nor its history changes.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::directory::Directory;
use crate::document::Document;
use crate::error::Result;
use crate::index::Index;
use crate::model::{Issue, Solution};
use crate::query::{IssueUpdate, SolutionUpdate, SortKey};
use crate::value::Tag;
use crate::versioned::VersionedDocument;

/// A validated request from the command layer.
///
/// Issue and solution indices are optional where the current directory can
/// supply them.
#[derive(Debug, Clone)]
pub enum Command {
    AddIssue(Issue),
    EditIssue {
        issue: Option<Index>,
        update: IssueUpdate,
    },
    DeleteIssue {
        issue: Option<Index>,
    },
    AddSolution {
        issue: Option<Index>,
        solution: Solution,
    },
    EditSolution {
        issue: Option<Index>,
        solution: Option<Index>,
        update: SolutionUpdate,
    },
    DeleteSolution {
        issue: Option<Index>,
        solution: Option<Index>,
    },
    SetPrimarySolution {
        issue: Option<Index>,
        solution: Option<Index>,
    },
    AddTags {
        issue: Option<Index>,
        tags: BTreeSet<Tag>,
    },
    /// Rename `old` to `new` everywhere; `None` removes `old`.
    RefactorTag {
        old: Tag,
        new: Option<Tag>,
    },
    Sort(SortKey),
    /// Enter an issue (counting the visit) or one of its solutions.
    Select {
        issue: Index,
        solution: Option<Index>,
    },
    Home,
    Clear,
    Undo,
    Redo,
}

/// What a successful command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document changed and was committed as this history version.
    Committed { version: usize },
    /// The command succeeded without changing anything.
    Unchanged,
    /// Only the directory moved; nothing was committed.
    Navigated(Directory),
    Undone { version: usize },
    Redone { version: usize },
}

impl Command {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddIssue(_) => "add",
            Self::EditIssue { .. } => "edit",
            Self::DeleteIssue { .. } => "delete",
            Self::AddSolution { .. } => "solve",
            Self::EditSolution { .. } => "edit-solution",
            Self::DeleteSolution { .. } => "delete-solution",
            Self::SetPrimarySolution { .. } => "primary",
            Self::AddTags { .. } => "tag",
            Self::RefactorTag { .. } => "refactor-tag",
            Self::Sort(_) => "sort",
            Self::Select { .. } => "select",
            Self::Home => "home",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Run the command and commit it if it changed the document.
    ///
    /// # Errors
    ///
    /// Returns the document error that stopped the command. The document and
    /// its history are unchanged in that case.
    pub fn execute(self, document: &mut VersionedDocument) -> Result<Outcome> {
        let name = self.name();
        debug!(command = name, "executing");

        let before = document.live().clone();
        let outcome = match self.apply(document) {
            Ok(Applied::Changed) => {
                document.commit();
                Outcome::Committed {
                    version: document.cursor(),
                }
            }
            Ok(Applied::Unchanged) => Outcome::Unchanged,
            Ok(Applied::Navigated(directory)) => Outcome::Navigated(directory),
            Ok(Applied::Undone) => Outcome::Undone {
                version: document.cursor(),
            },
            Ok(Applied::Redone) => Outcome::Redone {
                version: document.cursor(),
            },
            Err(err) => {
                warn!(command = name, error = %err, "command failed");
                *document.live_mut() = before;
                return Err(err);
            }
        };
        Ok(outcome)
    }

    fn apply(self, document: &mut VersionedDocument) -> Result<Applied> {
        match self {
            Self::Undo => {
                document.undo()?;
                Ok(Applied::Undone)
            }
            Self::Redo => {
                document.redo()?;
                Ok(Applied::Redone)
            }
            Self::AddIssue(issue) => {
                document.live_mut().add_issue(issue)?;
                Ok(Applied::Changed)
            }
            Self::EditIssue { issue, update } => {
                let doc = document.live_mut();
                let index = doc.resolve_issue(issue)?;
                doc.edit_issue(index, &update)?;
                Ok(Applied::Changed)
            }
            Self::DeleteIssue { issue } => {
                let doc = document.live_mut();
                let index = doc.resolve_issue(issue)?;
                doc.remove_issue_at(index)?;
                Ok(Applied::Changed)
            }
            Self::AddSolution { issue, solution } => {
                let doc = document.live_mut();
                let index = doc.resolve_issue(issue)?;
                doc.add_solution(index, solution)?;
                Ok(Applied::Changed)
            }
            Self::EditSolution {
                issue,
                solution,
                update,
            } => {
                let doc = document.live_mut();
                let issue = doc.resolve_issue(issue)?;
                let solution = doc.resolve_solution(issue, solution)?;
                doc.edit_solution(issue, solution, &update)?;
                Ok(Applied::Changed)
            }
            Self::DeleteSolution { issue, solution } => {
                let doc = document.live_mut();
                let issue = doc.resolve_issue(issue)?;
                let solution = doc.resolve_solution(issue, solution)?;
                doc.remove_solution(issue, solution)?;
                Ok(Applied::Changed)
            }
            Self::SetPrimarySolution { issue, solution } => {
                let doc = document.live_mut();
                let issue = doc.resolve_issue(issue)?;
                let solution = doc.resolve_solution(issue, solution)?;
                doc.set_primary_solution(issue, solution)?;
                Ok(Applied::Changed)
            }
            Self::AddTags { issue, tags } => {
                let doc = document.live_mut();
                let index = doc.resolve_issue(issue)?;
                Ok(Applied::changed_if(doc.add_tags(index, tags)?))
            }
            Self::RefactorTag { old, new } => {
                let changed = document.live_mut().refactor_tag(&old, new.as_ref())?;
                Ok(Applied::changed_if(changed))
            }
            Self::Sort(key) => {
                document.live_mut().sort_issues(key);
                Ok(Applied::Changed)
            }
            Self::Select { issue, solution } => {
                let directory = match solution {
                    Some(solution) => {
                        Directory::at_solution(issue.zero_based(), solution.zero_based())
                    }
                    None => Directory::at_issue(issue.zero_based()),
                };
                let doc = document.live_mut();
                doc.set_current_directory(directory)?;
                doc.record_selection(issue.zero_based())?;
                Ok(Applied::Changed)
            }
            Self::Home => {
                document.live_mut().set_current_directory(Directory::Root)?;
                Ok(Applied::Navigated(Directory::Root))
            }
            Self::Clear => {
                document.live_mut().reset_data(Document::new());
                Ok(Applied::Changed)
            }
        }
    }
}

/// Result of running a command, before committing.
enum Applied {
    Changed,
    Unchanged,
    Navigated(Directory),
    Undone,
    Redone,
}

impl Applied {
    const fn changed_if(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IndexKind, SaveItError};
    use crate::model::test_support::{issue, solution, tag};

    fn one(n: usize) -> Index {
        Index::from_one_based(n).unwrap()
    }

    fn seeded() -> VersionedDocument {
        let mut doc = VersionedDocument::default();
        Command::AddIssue(issue("A", "a")).execute(&mut doc).unwrap();
        Command::AddIssue(issue("B", "b")).execute(&mut doc).unwrap();
        doc
    }

    #[test]
    fn successful_mutation_commits() {
        let mut doc = VersionedDocument::default();
        let outcome = Command::AddIssue(issue("A", "a")).execute(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Committed { version: 1 });
        assert_eq!(doc.history_len(), 2);
    }

    #[test]
    fn failed_command_leaves_history_alone() {
        let mut doc = seeded();
        let before = doc.current_snapshot();
        let err = Command::AddIssue(issue("A", "a")).execute(&mut doc).unwrap_err();
        assert!(matches!(err, SaveItError::DuplicateIssue));
        assert_eq!(doc.history_len(), 3);
        assert_eq!(doc.issues(), before.issues());
    }

    #[test]
    fn select_failure_rolls_back_directory() {
        let mut doc = seeded();
        let err = Command::Select {
            issue: one(1),
            solution: Some(one(1)),
        }
        .execute(&mut doc)
        .unwrap_err();
        assert!(matches!(
            err,
            SaveItError::IndexOutOfRange {
                kind: IndexKind::Solution,
                ..
            }
        ));
        assert!(doc.current_directory().is_root());
        assert_eq!(doc.issues()[0].search_frequency(), 0);
    }

    #[test]
    fn failure_after_home_stays_at_root() {
        let mut doc = seeded();
        Command::Select {
            issue: one(1),
            solution: None,
        }
        .execute(&mut doc)
        .unwrap();
        let outcome = Command::Home.execute(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Navigated(Directory::Root));
        let before = doc.live().clone();

        let err = Command::AddIssue(issue("A", "a")).execute(&mut doc).unwrap_err();
        assert!(matches!(err, SaveItError::DuplicateIssue));
        assert!(doc.current_directory().is_root());
        assert_eq!(doc.live(), &before);
    }

    #[test]
    fn solve_uses_selected_issue() {
        let mut doc = seeded();
        Command::Select {
            issue: one(2),
            solution: None,
        }
        .execute(&mut doc)
        .unwrap();
        assert_eq!(doc.issues()[1].search_frequency(), 1);

        Command::AddSolution {
            issue: None,
            solution: solution("https://b.com", "fix"),
        }
        .execute(&mut doc)
        .unwrap();
        assert_eq!(doc.issues()[1].solutions().len(), 1);
    }

    #[test]
    fn solve_at_root_needs_an_index() {
        let mut doc = seeded();
        let err = Command::AddSolution {
            issue: None,
            solution: solution("https://b.com", "fix"),
        }
        .execute(&mut doc)
        .unwrap_err();
        assert!(matches!(err, SaveItError::NoTarget { .. }));
    }

    #[test]
    fn no_op_tagging_is_not_committed() {
        let mut doc = seeded();
        let tags = BTreeSet::from([tag("bug")]);
        Command::AddTags {
            issue: Some(one(1)),
            tags: tags.clone(),
        }
        .execute(&mut doc)
        .unwrap();
        let len = doc.history_len();

        let outcome = Command::AddTags {
            issue: Some(one(1)),
            tags,
        }
        .execute(&mut doc)
        .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(doc.history_len(), len);
    }

    #[test]
    fn home_navigates_without_commit() {
        let mut doc = seeded();
        Command::Select {
            issue: one(1),
            solution: None,
        }
        .execute(&mut doc)
        .unwrap();
        let len = doc.history_len();

        let outcome = Command::Home.execute(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Navigated(Directory::Root));
        assert_eq!(doc.history_len(), len);
    }

    #[test]
    fn clear_is_undoable() {
        let mut doc = seeded();
        Command::Clear.execute(&mut doc).unwrap();
        assert!(doc.issues().is_empty());

        let outcome = Command::Undo.execute(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Undone { version: 2 });
        assert_eq!(doc.issues().len(), 2);

        let outcome = Command::Redo.execute(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Redone { version: 3 });
        assert!(doc.issues().is_empty());
    }

    #[test]
    fn delete_from_inside_issue() {
        let mut doc = seeded();
        Command::Select {
            issue: one(1),
            solution: None,
        }
        .execute(&mut doc)
        .unwrap();
        Command::DeleteIssue { issue: None }.execute(&mut doc).unwrap();

        assert_eq!(doc.issues().len(), 1);
        assert_eq!(doc.issues()[0].statement().as_str(), "B");
        assert!(doc.current_directory().is_root());
    }
}

//! The mutable SaveIt aggregate.
//!
//! Every operation either applies completely or returns an error with the
//! document untouched. Multi-step edits build their result off to the side and
//! swap it in as the last step.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::debug;

use crate::directory::Directory;
use crate::error::{IndexKind, Result, SaveItError};
use crate::index::Index;
use crate::model::{Issue, Solution};
use crate::query::{IssueFilter, IssueUpdate, SolutionUpdate, SortKey};
use crate::unique_list::UniqueIssueList;
use crate::value::Tag;

/// All issues plus the current navigation context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    issues: UniqueIssueList,
    current_directory: Directory,
}

impl Document {
    /// Create an empty document at the root directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from loaded issues.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if two of the issues are the same issue.
    pub fn from_issues(issues: Vec<Issue>) -> Result<Self> {
        Ok(Self {
            issues: UniqueIssueList::from_issues(issues)?,
            current_directory: Directory::Root,
        })
    }

    pub(crate) const fn from_parts(issues: UniqueIssueList, current_directory: Directory) -> Self {
        Self {
            issues,
            current_directory,
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.issues.as_slice()
    }

    #[must_use]
    pub const fn issue_list(&self) -> &UniqueIssueList {
        &self.issues
    }

    #[must_use]
    pub const fn current_directory(&self) -> Directory {
        self.current_directory
    }

    #[must_use]
    pub fn has_issue(&self, issue: &Issue) -> bool {
        self.issues.contains(issue)
    }

    /// Issue at a zero-based position.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no such issue.
    pub fn issue(&self, index: usize) -> Result<&Issue> {
        self.issues
            .get(index)
            .ok_or_else(|| SaveItError::issue_out_of_range(index, self.issues.len()))
    }

    /// Solution `solution` of issue `issue`, both zero-based.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is out of bounds.
    pub fn solution(&self, issue: usize, solution: usize) -> Result<&Solution> {
        let owner = self.issue(issue)?;
        owner
            .solution(solution)
            .ok_or_else(|| SaveItError::solution_out_of_range(solution, owner.solutions().len()))
    }

    /// Issues matching `filter`, with their positions.
    #[must_use]
    pub fn find(&self, filter: &IssueFilter) -> Vec<(Index, &Issue)> {
        self.issues
            .iter()
            .enumerate()
            .filter(|(_, issue)| filter.matches(issue))
            .map(|(i, issue)| (Index::from_zero_based(i), issue))
            .collect()
    }

    /// Resolve an explicit issue index, or fall back to the directory's issue.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for a bad explicit index, or `NoTarget` when no
    /// index is given and the directory is at the root.
    pub fn resolve_issue(&self, index: Option<Index>) -> Result<usize> {
        match index {
            Some(index) => {
                self.issue(index.zero_based())?;
                Ok(index.zero_based())
            }
            None => self.current_directory.issue_index().ok_or(SaveItError::NoTarget {
                what: IndexKind::Issue,
            }),
        }
    }

    /// Resolve a solution of `issue`, falling back to the directory's solution
    /// when the directory is inside that same issue.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for a bad explicit index, or `NoTarget` when
    /// the directory does not point at a solution of `issue`.
    pub fn resolve_solution(&self, issue: usize, index: Option<Index>) -> Result<usize> {
        match index {
            Some(index) => {
                self.solution(issue, index.zero_based())?;
                Ok(index.zero_based())
            }
            None => match self.current_directory {
                Directory::Solution {
                    issue: current,
                    solution,
                } if current == issue => Ok(solution),
                _ => Err(SaveItError::NoTarget {
                    what: IndexKind::Solution,
                }),
            },
        }
    }

    // ========================================================================
    // Issue mutations
    // ========================================================================

    /// Append a new issue.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if the same issue is already present.
    pub fn add_issue(&mut self, issue: Issue) -> Result<()> {
        debug!(statement = %issue.statement(), "adding issue");
        self.issues.add(issue)
    }

    /// Replace `target` with `replacement`, stamping its modification time.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `DuplicateIssue` as for
    /// [`UniqueIssueList::replace`].
    pub fn update_issue(&mut self, target: &Issue, replacement: Issue) -> Result<()> {
        debug!(statement = %target.statement(), "updating issue");
        self.issues.replace(target, replacement.touched(Utc::now()))
    }

    /// Remove the issue strongly equal to `issue`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if there is no exact match.
    pub fn remove_issue(&mut self, issue: &Issue) -> Result<Issue> {
        let position = self.issues.position(issue).ok_or(SaveItError::IssueNotFound)?;
        let removed = self.issues.remove(issue)?;
        debug!(statement = %removed.statement(), position, "removed issue");
        self.shift_directory_after_issue_removal(position);
        Ok(removed)
    }

    /// Remove the issue at a zero-based position.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no such issue.
    pub fn remove_issue_at(&mut self, index: usize) -> Result<Issue> {
        let target = self.issue(index)?.clone();
        self.remove_issue(&target)
    }

    /// Apply an edit descriptor to the issue at `index`.
    ///
    /// # Errors
    ///
    /// Returns `NothingToDo` for an empty descriptor, `IndexOutOfRange` for a
    /// bad index, or `DuplicateIssue` if the edit collides with another issue.
    pub fn edit_issue(&mut self, index: usize, update: &IssueUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(SaveItError::nothing_to_do(
                "at least one field to edit must be provided",
            ));
        }
        let target = self.issue(index)?.clone();
        let edited = update.apply(&target);
        self.update_issue(&target, edited)
    }

    /// Union `tags` into the issue's tag set. Returns whether anything was added.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no such issue.
    pub fn add_tags(&mut self, index: usize, tags: impl IntoIterator<Item = Tag>) -> Result<bool> {
        let target = self.issue(index)?.clone();
        let mut merged = target.tags().clone();
        let before = merged.len();
        merged.extend(tags);
        if merged.len() == before {
            debug!(index, "tags already present");
            return Ok(false);
        }
        self.update_issue(&target, target.with_tags(merged))?;
        Ok(true)
    }

    /// Rename `old` to `new` on every issue carrying it, or drop it when `new`
    /// is `None`. Returns whether any issue changed.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if the rebuilt list fails validation; no issue
    /// is modified in that case.
    pub fn refactor_tag(&mut self, old: &Tag, new: Option<&Tag>) -> Result<bool> {
        if new == Some(old) {
            return Ok(false);
        }

        let now = Utc::now();
        let mut changed = 0_usize;
        let refactored: Vec<Issue> = self
            .issues
            .iter()
            .map(|issue| {
                if !issue.has_tag(old) {
                    return issue.clone();
                }
                changed += 1;
                let mut tags: BTreeSet<Tag> = issue.tags().clone();
                tags.remove(old);
                if let Some(new) = new {
                    tags.insert(new.clone());
                }
                issue.with_tags(tags).touched(now)
            })
            .collect();

        if changed == 0 {
            return Ok(false);
        }
        self.issues.replace_all(refactored)?;
        debug!(%old, new = ?new.map(Tag::as_str), changed, "refactored tag");
        Ok(true)
    }

    /// Count one more selection of the issue at `index`.
    ///
    /// Selection is not an edit, so the modification time is left alone.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no such issue.
    pub fn record_selection(&mut self, index: usize) -> Result<()> {
        let target = self.issue(index)?.clone();
        self.issues.replace(&target, target.with_search_recorded())
    }

    /// Reorder the issues. The directory returns to the root because its
    /// indices no longer name the same issues.
    pub fn sort_issues(&mut self, key: SortKey) {
        self.issues.sort_by(key);
        self.current_directory = Directory::Root;
        debug!(%key, "sorted issues");
    }

    /// Replace issues and directory wholesale.
    pub fn reset_data(&mut self, data: Self) {
        debug!(issues = data.issues.len(), directory = %data.current_directory, "resetting data");
        *self = data;
    }

    // ========================================================================
    // Solution mutations
    // ========================================================================

    /// Append `solution` to the issue at `index`. A primary solution takes the
    /// flag from whichever solution held it.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no such issue.
    pub fn add_solution(&mut self, index: usize, solution: Solution) -> Result<()> {
        let target = self.issue(index)?.clone();
        debug!(index, link = %solution.link(), primary = solution.is_primary(), "adding solution");
        let mut solutions: Vec<Solution> = if solution.is_primary() {
            target
                .solutions()
                .iter()
                .map(|s| s.with_primary(false))
                .collect()
        } else {
            target.solutions().to_vec()
        };
        solutions.push(solution);
        self.update_issue(&target, target.with_solutions(solutions))
    }

    /// Apply an edit descriptor to one solution.
    ///
    /// # Errors
    ///
    /// Returns `NothingToDo` for an empty descriptor or `IndexOutOfRange` for a
    /// bad index.
    pub fn edit_solution(
        &mut self,
        issue: usize,
        solution: usize,
        update: &SolutionUpdate,
    ) -> Result<()> {
        if update.is_empty() {
            return Err(SaveItError::nothing_to_do(
                "at least one field to edit must be provided",
            ));
        }
        let edited = update.apply(self.solution(issue, solution)?);
        let target = self.issue(issue)?.clone();
        let mut solutions = target.solutions().to_vec();
        solutions[solution] = edited;
        self.update_issue(&target, target.with_solutions(solutions))
    }

    /// Remove one solution from an issue.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for a bad index.
    pub fn remove_solution(&mut self, issue: usize, solution: usize) -> Result<Solution> {
        self.solution(issue, solution)?;
        let target = self.issue(issue)?.clone();
        let mut solutions = target.solutions().to_vec();
        let removed = solutions.remove(solution);
        self.update_issue(&target, target.with_solutions(solutions))?;
        self.shift_directory_after_solution_removal(issue, solution);
        Ok(removed)
    }

    /// Mark one solution as the issue's primary solution and clear the flag
    /// on the others.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for a bad index.
    pub fn set_primary_solution(&mut self, issue: usize, solution: usize) -> Result<()> {
        self.solution(issue, solution)?;
        let target = self.issue(issue)?.clone();
        let solutions = target
            .solutions()
            .iter()
            .enumerate()
            .map(|(i, s)| s.with_primary(i == solution))
            .collect();
        self.update_issue(&target, target.with_solutions(solutions))
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Check that every index in `directory` exists right now.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` naming the first index that does not.
    pub fn validate_directory(&self, directory: Directory) -> Result<()> {
        match directory {
            Directory::Root => Ok(()),
            Directory::Issue { issue } => self.issue(issue).map(|_| ()),
            Directory::Solution { issue, solution } => {
                self.solution(issue, solution).map(|_| ())
            }
        }
    }

    /// Move to `directory` if it is in bounds.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` and keeps the previous directory if it is not.
    pub fn set_current_directory(&mut self, directory: Directory) -> Result<()> {
        self.validate_directory(directory)?;
        debug!(from = %self.current_directory, to = %directory, "changing directory");
        self.current_directory = directory;
        Ok(())
    }

    fn shift_directory_after_issue_removal(&mut self, removed: usize) {
        self.current_directory = match self.current_directory {
            Directory::Issue { issue } if issue == removed => Directory::Root,
            Directory::Solution { issue, .. } if issue == removed => Directory::Root,
            Directory::Issue { issue } if issue > removed => Directory::Issue { issue: issue - 1 },
            Directory::Solution { issue, solution } if issue > removed => Directory::Solution {
                issue: issue - 1,
                solution,
            },
            unchanged => unchanged,
        };
    }

    fn shift_directory_after_solution_removal(&mut self, owner: usize, removed: usize) {
        if let Directory::Solution { issue, solution } = self.current_directory {
            if issue != owner {
                return;
            }
            self.current_directory = match solution.cmp(&removed) {
                std::cmp::Ordering::Equal => Directory::Issue { issue },
                std::cmp::Ordering::Greater => Directory::Solution {
                    issue,
                    solution: solution - 1,
                },
                std::cmp::Ordering::Less => self.current_directory,
            };
        }
    }
}

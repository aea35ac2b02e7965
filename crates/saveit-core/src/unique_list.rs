//! Ordered issue list that never holds two versions of the same issue.

use crate::error::{Result, SaveItError};
use crate::model::Issue;
use crate::query::SortKey;

/// An ordered sequence of issues in which no two are [`Issue::is_same_issue`].
///
/// Lookups for replacement and removal use strong equality, so a caller must
/// hand back the exact issue it read. Duplicate checks are linear scans, which
/// is fine for the hundreds of issues a tracker holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueIssueList {
    issues: Vec<Issue>,
}

impl UniqueIssueList {
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Build a list from `issues`, rejecting duplicates.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if two of the issues are the same issue.
    pub fn from_issues(issues: Vec<Issue>) -> Result<Self> {
        let mut list = Self::new();
        list.replace_all(issues)?;
        Ok(list)
    }

    /// Wrap issues already known to be free of duplicates.
    pub(crate) const fn from_unique(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// True if an issue with the same statement and description is present.
    #[must_use]
    pub fn contains(&self, issue: &Issue) -> bool {
        self.issues.iter().any(|existing| existing.is_same_issue(issue))
    }

    /// Position of the element strongly equal to `issue`.
    #[must_use]
    pub fn position(&self, issue: &Issue) -> Option<usize> {
        self.issues.iter().position(|existing| existing == issue)
    }

    /// Append an issue.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if the same issue is already present.
    pub fn add(&mut self, issue: Issue) -> Result<()> {
        if self.contains(&issue) {
            return Err(SaveItError::DuplicateIssue);
        }
        self.issues.push(issue);
        Ok(())
    }

    /// Swap `target` for `replacement`, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if `target` is not present, or `DuplicateIssue`
    /// if `replacement` is the same issue as some other element.
    pub fn replace(&mut self, target: &Issue, replacement: Issue) -> Result<()> {
        let position = self.position(target).ok_or(SaveItError::IssueNotFound)?;
        if !target.is_same_issue(&replacement) && self.contains(&replacement) {
            return Err(SaveItError::DuplicateIssue);
        }
        self.issues[position] = replacement;
        Ok(())
    }

    /// Remove the element strongly equal to `issue`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if there is no exact match.
    pub fn remove(&mut self, issue: &Issue) -> Result<Issue> {
        let position = self.position(issue).ok_or(SaveItError::IssueNotFound)?;
        Ok(self.issues.remove(position))
    }

    /// Replace the whole backing sequence at once.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssue` if `issues` contains two versions of the same
    /// issue; the list is unchanged in that case.
    pub fn replace_all(&mut self, issues: Vec<Issue>) -> Result<()> {
        if !are_unique(&issues) {
            return Err(SaveItError::DuplicateIssue);
        }
        self.issues = issues;
        Ok(())
    }

    /// Stable sort by `key`.
    pub fn sort_by(&mut self, key: SortKey) {
        self.issues.sort_by(|a, b| key.compare(a, b));
    }

    /// Read-only, order-preserving view.
    #[must_use]
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> IntoIterator for &'a UniqueIssueList {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn are_unique(issues: &[Issue]) -> bool {
    issues
        .iter()
        .enumerate()
        .all(|(i, a)| issues[i + 1..].iter().all(|b| !a.is_same_issue(b)))
}

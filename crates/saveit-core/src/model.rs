//! Core data types for saveit-core.
//!
//! `Issue` and `Solution` have no setters. Every edit builds a new value that
//! replaces the old one in its owning list.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::{Description, IssueStatement, Remark, SolutionLink, Tag};

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(b: &bool) -> bool {
    !*b
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// A candidate fix for an issue.
///
/// Two solutions are equal when they point at the same link, whatever their
/// remarks say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    link: SolutionLink,
    remark: Remark,
    #[serde(default, rename = "primary", skip_serializing_if = "is_false")]
    is_primary: bool,
}

impl Solution {
    #[must_use]
    pub const fn new(link: SolutionLink, remark: Remark) -> Self {
        Self {
            link,
            remark,
            is_primary: false,
        }
    }

    #[must_use]
    pub const fn link(&self) -> &SolutionLink {
        &self.link
    }

    #[must_use]
    pub const fn remark(&self) -> &Remark {
        &self.remark
    }

    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.is_primary
    }

    #[must_use]
    pub fn with_link(&self, link: SolutionLink) -> Self {
        Self {
            link,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_remark(&self, remark: Remark) -> Self {
        Self {
            remark,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_primary(&self, is_primary: bool) -> Self {
        Self {
            is_primary,
            ..self.clone()
        }
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl Eq for Solution {}

impl Hash for Solution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.link.hash(state);
    }
}

/// A tracked problem together with the solutions found for it.
///
/// `PartialEq` is strong equality: every field must match. Use
/// [`Issue::is_same_issue`] for the weaker identity used to reject duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    statement: IssueStatement,
    description: Description,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    solutions: Vec<Solution>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<Tag>,
    #[serde(default, skip_serializing_if = "is_zero")]
    search_frequency: u32,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl Issue {
    /// Create a fresh issue stamped with the current time.
    #[must_use]
    pub fn new(
        statement: IssueStatement,
        description: Description,
        solutions: Vec<Solution>,
        tags: BTreeSet<Tag>,
    ) -> Self {
        let now = Utc::now();
        Self {
            statement,
            description,
            solutions,
            tags,
            search_frequency: 0,
            created_at: now,
            last_modified_at: now,
        }
    }

    /// Rebuild an issue with every field given, as storage does on load.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_parts(
        statement: IssueStatement,
        description: Description,
        solutions: Vec<Solution>,
        tags: BTreeSet<Tag>,
        search_frequency: u32,
        created_at: DateTime<Utc>,
        last_modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            statement,
            description,
            solutions,
            tags,
            search_frequency,
            created_at,
            last_modified_at,
        }
    }

    /// Weak equality: same statement and description.
    #[must_use]
    pub fn is_same_issue(&self, other: &Self) -> bool {
        self.statement == other.statement && self.description == other.description
    }

    #[must_use]
    pub const fn statement(&self) -> &IssueStatement {
        &self.statement
    }

    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    #[must_use]
    pub fn solution(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub const fn search_frequency(&self) -> u32 {
        self.search_frequency
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    #[must_use]
    pub fn with_statement(&self, statement: IssueStatement) -> Self {
        Self {
            statement,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_description(&self, description: Description) -> Self {
        Self {
            description,
            ..self.clone()
        }
    }

    /// Copy with `solution` appended after the existing ones.
    #[must_use]
    pub fn with_solution(&self, solution: Solution) -> Self {
        let mut solutions = self.solutions.clone();
        solutions.push(solution);
        self.with_solutions(solutions)
    }

    #[must_use]
    pub fn with_solutions(&self, solutions: Vec<Solution>) -> Self {
        Self {
            solutions,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_tags(&self, tags: BTreeSet<Tag>) -> Self {
        Self {
            tags,
            ..self.clone()
        }
    }

    /// Copy with the search frequency bumped by one (saturating).
    #[must_use]
    pub fn with_search_recorded(&self) -> Self {
        Self {
            search_frequency: self.search_frequency.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy with `last_modified_at` moved to `at`.
    #[must_use]
    pub fn touched(self, at: DateTime<Utc>) -> Self {
        Self {
            last_modified_at: at,
            ..self
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{issue, solution, tag};
    use super::*;

    #[test]
    fn same_issue_ignores_solutions_tags_and_metadata() {
        let a = issue("Build fails", "cargo build exits 101");
        let b = a
            .with_solution(solution("https://docs.rs/x", "pin the version"))
            .with_tags(BTreeSet::from([tag("ci")]))
            .with_search_recorded();

        assert!(a.is_same_issue(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn different_statement_is_a_different_issue() {
        let a = issue("Build fails", "cargo build exits 101");
        let b = issue("Tests fail", "cargo build exits 101");
        assert!(!a.is_same_issue(&b));
    }

    #[test]
    fn solutions_compare_by_link_only() {
        let a = solution("https://example.com/fix", "first try");
        let b = solution("https://example.com/fix", "second try");
        let c = solution("https://example.com/other", "first try");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn with_solution_keeps_insertion_order() {
        let base = issue("Slow query", "takes 3s");
        let updated = base
            .with_solution(solution("https://a.com", "index"))
            .with_solution(solution("https://b.com", "cache"));

        assert!(base.solutions().is_empty());
        let links: Vec<&str> = updated.solutions().iter().map(|s| s.link().as_str()).collect();
        assert_eq!(links, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn touched_only_moves_last_modified() {
        let base = issue("Slow query", "takes 3s");
        let later = base.created_at() + chrono::Duration::seconds(5);
        let touched = base.clone().touched(later);
        assert_eq!(touched.created_at(), base.created_at());
        assert_eq!(touched.last_modified_at(), later);
    }

    #[test]
    fn serde_round_trip_keeps_every_field() {
        let original = issue("Panic in parser", "index out of bounds")
            .with_solution(solution("https://github.com/a/b/pull/1", "bounds check").with_primary(true))
            .with_tags(BTreeSet::from([tag("parser"), tag("panic")]))
            .with_search_recorded();

        let json = serde_json::to_string(&original).unwrap();
        let loaded: Issue = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.solutions()[0].remark().as_str(), "bounds check");
        assert!(loaded.solutions()[0].is_primary());
        assert_eq!(loaded.search_frequency(), 1);
    }

    #[test]
    fn deserialize_rejects_invalid_statement() {
        let json = r#"{"statement":"","description":"d","created_at":"2024-01-01T00:00:00Z","last_modified_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Issue>(json).is_err());
    }
}

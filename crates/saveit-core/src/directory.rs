//! Navigation context used to resolve implicit command targets.
//!
//! A `Directory` is a plain value: constructing one never checks bounds. The
//! [`Document`](crate::document::Document) validates it when it is applied.

use std::fmt;

/// How deep a directory points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryLevel {
    Root,
    Issue,
    Solution,
}

/// Root, an issue, or one solution of an issue. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Directory {
    #[default]
    Root,
    Issue {
        issue: usize,
    },
    Solution {
        issue: usize,
        solution: usize,
    },
}

impl Directory {
    #[must_use]
    pub const fn root() -> Self {
        Self::Root
    }

    #[must_use]
    pub const fn at_issue(issue: usize) -> Self {
        Self::Issue { issue }
    }

    #[must_use]
    pub const fn at_solution(issue: usize, solution: usize) -> Self {
        Self::Solution { issue, solution }
    }

    #[must_use]
    pub const fn level(&self) -> DirectoryLevel {
        match self {
            Self::Root => DirectoryLevel::Root,
            Self::Issue { .. } => DirectoryLevel::Issue,
            Self::Solution { .. } => DirectoryLevel::Solution,
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// The issue this directory is inside, if any.
    #[must_use]
    pub const fn issue_index(&self) -> Option<usize> {
        match self {
            Self::Root => None,
            Self::Issue { issue } | Self::Solution { issue, .. } => Some(*issue),
        }
    }

    #[must_use]
    pub const fn solution_index(&self) -> Option<usize> {
        match self {
            Self::Solution { solution, .. } => Some(*solution),
            _ => None,
        }
    }

    /// One level down: Root enters an issue, an issue enters a solution.
    /// A solution has nothing below it.
    #[must_use]
    pub const fn enter(&self, index: usize) -> Option<Self> {
        match self {
            Self::Root => Some(Self::Issue { issue: index }),
            Self::Issue { issue } => Some(Self::Solution {
                issue: *issue,
                solution: index,
            }),
            Self::Solution { .. } => None,
        }
    }

    /// One level up. Root is its own parent.
    #[must_use]
    pub const fn parent(&self) -> Self {
        match self {
            Self::Root | Self::Issue { .. } => Self::Root,
            Self::Solution { issue, .. } => Self::Issue { issue: *issue },
        }
    }
}

impl fmt::Display for Directory {
    /// One-based path: `/`, `/3`, `/3/2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Issue { issue } => write!(f, "/{}", issue + 1),
            Self::Solution { issue, solution } => write!(f, "/{}/{}", issue + 1, solution + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_walks_down_and_up() {
        let root = Directory::root();
        let issue = root.enter(2).unwrap();
        assert_eq!(issue, Directory::at_issue(2));
        let solution = issue.enter(0).unwrap();
        assert_eq!(solution, Directory::at_solution(2, 0));
        assert!(solution.enter(1).is_none());

        assert_eq!(solution.parent(), issue);
        assert_eq!(issue.parent(), root);
        assert_eq!(root.parent(), root);
    }

    #[test]
    fn accessors_by_level() {
        assert_eq!(Directory::root().level(), DirectoryLevel::Root);
        assert_eq!(Directory::root().issue_index(), None);

        let d = Directory::at_solution(4, 1);
        assert_eq!(d.level(), DirectoryLevel::Solution);
        assert_eq!(d.issue_index(), Some(4));
        assert_eq!(d.solution_index(), Some(1));
        assert_eq!(Directory::at_issue(4).solution_index(), None);
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(Directory::root().to_string(), "/");
        assert_eq!(Directory::at_issue(2).to_string(), "/3");
        assert_eq!(Directory::at_solution(2, 1).to_string(), "/3/2");
    }
}

//! Edit descriptors, search filters and sort keys.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::SaveItError;
use crate::model::{Issue, Solution};
use crate::value::{Description, IssueStatement, Remark, SolutionLink, Tag};

/// Fields to override on an issue. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub statement: Option<IssueStatement>,
    pub description: Option<Description>,
    /// Replaces the whole tag set.
    pub tags: Option<BTreeSet<Tag>>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.statement.is_none() && self.description.is_none() && self.tags.is_none()
    }

    /// Build the edited copy of `issue`. The original is left alone.
    #[must_use]
    pub fn apply(&self, issue: &Issue) -> Issue {
        let mut edited = issue.clone();
        if let Some(ref statement) = self.statement {
            edited = edited.with_statement(statement.clone());
        }
        if let Some(ref description) = self.description {
            edited = edited.with_description(description.clone());
        }
        if let Some(ref tags) = self.tags {
            edited = edited.with_tags(tags.clone());
        }
        edited
    }
}

/// Fields to override on a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionUpdate {
    pub link: Option<SolutionLink>,
    pub remark: Option<Remark>,
}

impl SolutionUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.link.is_none() && self.remark.is_none()
    }

    #[must_use]
    pub fn apply(&self, solution: &Solution) -> Solution {
        let mut edited = solution.clone();
        if let Some(ref link) = self.link {
            edited = edited.with_link(link.clone());
        }
        if let Some(ref remark) = self.remark {
            edited = edited.with_remark(remark.clone());
        }
        edited
    }
}

/// Search criteria for `find`.
///
/// An issue matches when any keyword occurs (case-insensitively) in its
/// statement, description or tags, and it carries every listed tag. An empty
/// keyword list matches on tags alone.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub keywords: Vec<String>,
    pub tags: Vec<Tag>,
}

impl IssueFilter {
    #[must_use]
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.tags.iter().all(|tag| issue.has_tag(tag)) {
            return false;
        }
        if self.keywords.is_empty() {
            return true;
        }

        let statement = issue.statement().as_str().to_lowercase();
        let description = issue.description().as_str().to_lowercase();
        self.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            statement.contains(&keyword)
                || description.contains(&keyword)
                || issue
                    .tags()
                    .iter()
                    .any(|tag| tag.as_str().to_lowercase() == keyword)
        })
    }
}

/// Orderings available to `sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical by statement, case-insensitive.
    Statement,
    /// Most searched first.
    Frequency,
    /// Oldest first.
    Chronological,
    /// Most recently modified first.
    LastModified,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Frequency => "frequency",
            Self::Chronological => "chronological",
            Self::LastModified => "modified",
        }
    }

    /// Total order between two issues under this key.
    #[must_use]
    pub fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Statement => a
                .statement()
                .as_str()
                .to_lowercase()
                .cmp(&b.statement().as_str().to_lowercase()),
            Self::Frequency => b.search_frequency().cmp(&a.search_frequency()),
            Self::Chronological => a.created_at().cmp(&b.created_at()),
            Self::LastModified => b.last_modified_at().cmp(&a.last_modified_at()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SaveItError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "statement" | "alpha" => Ok(Self::Statement),
            "frequency" | "freq" => Ok(Self::Frequency),
            "chronological" | "created" | "time" => Ok(Self::Chronological),
            "modified" | "last_modified" | "recent" => Ok(Self::LastModified),
            other => Err(SaveItError::validation(
                "sort",
                format!("unknown sort key '{other}'"),
            )),
        }
    }
}

use saveit_core::{Directory, Index, Issue, Outcome};
use serde::Serialize;

/// Where and how results are printed.
///
/// JSON goes to stdout as one document per command; text goes to stdout
/// line by line. Diagnostics never pass through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputContext {
    json: bool,
    quiet: bool,
}

impl OutputContext {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a serializable value as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a line of text unless in quiet mode.
    pub fn text(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }

    /// Print a result line even in quiet mode.
    pub fn result(&self, line: &str) {
        println!("{line}");
    }
}

/// Issue with its one-based position, for list/find/show views.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedIssue<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub issue: &'a Issue,
}

impl<'a> IndexedIssue<'a> {
    #[must_use]
    pub const fn new(index: Index, issue: &'a Issue) -> Self {
        Self {
            index: index.one_based(),
            issue,
        }
    }
}

/// Result of a mutating or navigating command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<usize>,
    pub directory: String,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl CommandReport {
    #[must_use]
    pub fn new(
        command: &'static str,
        outcome: &Outcome,
        directory: Directory,
        can_undo: bool,
        can_redo: bool,
    ) -> Self {
        let (outcome, version) = match *outcome {
            Outcome::Committed { version } => ("committed", Some(version)),
            Outcome::Unchanged => ("unchanged", None),
            Outcome::Navigated(_) => ("navigated", None),
            Outcome::Undone { version } => ("undone", Some(version)),
            Outcome::Redone { version } => ("redone", Some(version)),
        };
        Self {
            command,
            outcome,
            version,
            directory: directory.to_string(),
            can_undo,
            can_redo,
        }
    }
}

/// Body of `saveit list --json`.
#[derive(Debug, Clone, Serialize)]
pub struct IssueListing<'a> {
    pub directory: String,
    pub issues: Vec<IndexedIssue<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use saveit_core::{Description, IssueStatement};
    use std::collections::BTreeSet;

    #[test]
    fn test_indexed_issue_flattens_fields() {
        let issue = Issue::new(
            IssueStatement::new("Crash").unwrap(),
            Description::new("on start").unwrap(),
            Vec::new(),
            BTreeSet::new(),
        );
        let value = serde_json::to_value(IndexedIssue::new(Index::from_zero_based(1), &issue))
            .unwrap();
        assert_eq!(value["index"], 2);
        assert_eq!(value["statement"], "Crash");
        assert_eq!(value["description"], "on start");
    }

    #[test]
    fn test_command_report_versions() {
        let report = CommandReport::new(
            "undo",
            &Outcome::Undone { version: 0 },
            Directory::Root,
            false,
            true,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome"], "undone");
        assert_eq!(value["version"], 0);
        assert_eq!(value["directory"], "/");

        let report = CommandReport::new(
            "tag",
            &Outcome::Unchanged,
            Directory::at_issue(0),
            true,
            false,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("version").is_none());
        assert_eq!(value["directory"], "/1");
    }
}

//! Text formatting functions for `saveit`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Primary solution marker (★)
//! - Tag badges ([bug] [ui])
//! - Issue and solution lines, with statements clipped to a display width

use std::fmt::Write as _;

use saveit_core::{Directory, Index, Issue, Outcome, Solution};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest statement shown on a one-line summary.
pub const STATEMENT_WIDTH: usize = 60;

/// Marker characters.
pub mod icons {
    /// Primary solution.
    pub const PRIMARY: &str = "★";
    /// Any other solution.
    pub const SOLUTION: &str = "·";
}

/// Clip `text` to `width` terminal columns, ending with `…` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a tag set as bracketed badges, or an empty string.
#[must_use]
pub fn format_tags(issue: &Issue) -> String {
    issue
        .tags()
        .iter()
        .map(|tag| format!("[{tag}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single-line issue summary.
///
/// Format: `{index}. {statement} {tags} ({n} solutions)`
#[must_use]
pub fn format_issue_line(index: Index, issue: &Issue) -> String {
    let mut line = format!(
        "{index}. {}",
        truncate_to_width(issue.statement().as_str(), STATEMENT_WIDTH)
    );
    let tags = format_tags(issue);
    if !tags.is_empty() {
        let _ = write!(line, " {tags}");
    }
    match issue.solutions().len() {
        0 => {}
        1 => line.push_str(" (1 solution)"),
        n => {
            let _ = write!(line, " ({n} solutions)");
        }
    }
    line
}

/// Format a solution line: `{marker} {index}. {link} - {remark}`.
#[must_use]
pub fn format_solution_line(index: Index, solution: &Solution) -> String {
    let marker = if solution.is_primary() {
        icons::PRIMARY
    } else {
        icons::SOLUTION
    };
    format!("{marker} {index}. {} - {}", solution.link(), solution.remark())
}

/// Multi-line view of one issue with its solutions.
#[must_use]
pub fn format_issue_details(index: Index, issue: &Issue) -> String {
    let mut out = format!("{index}. {}\n", issue.statement());
    let _ = writeln!(out, "   {}", issue.description());
    let tags = format_tags(issue);
    if !tags.is_empty() {
        let _ = writeln!(out, "   Tags: {tags}");
    }
    let _ = writeln!(
        out,
        "   Searched {} time(s); created {}; modified {}",
        issue.search_frequency(),
        issue.created_at().format("%Y-%m-%d %H:%M"),
        issue.last_modified_at().format("%Y-%m-%d %H:%M"),
    );
    if issue.solutions().is_empty() {
        out.push_str("   No solutions yet.\n");
    } else {
        for (i, solution) in issue.solutions().iter().enumerate() {
            let _ = writeln!(
                out,
                "   {}",
                format_solution_line(Index::from_zero_based(i), solution)
            );
        }
    }
    out
}

/// Human summary of what a command did.
#[must_use]
pub fn format_outcome(command: &str, outcome: &Outcome, directory: Directory) -> String {
    match outcome {
        Outcome::Committed { version } => format!("{command}: done (version {version})"),
        Outcome::Unchanged => format!("{command}: nothing changed"),
        Outcome::Navigated(dir) => format!("Now at {dir}"),
        Outcome::Undone { version } => format!("Undone to version {version} (at {directory})"),
        Outcome::Redone { version } => format!("Redone to version {version} (at {directory})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saveit_core::{Description, IssueStatement, Remark, SolutionLink, Tag};
    use std::collections::BTreeSet;

    fn make_issue(statement: &str) -> Issue {
        Issue::new(
            IssueStatement::new(statement).unwrap(),
            Description::new("Some description").unwrap(),
            Vec::new(),
            BTreeSet::new(),
        )
    }

    fn make_solution(link: &str, primary: bool) -> Solution {
        Solution::new(
            SolutionLink::new(link).unwrap(),
            Remark::new("works").unwrap(),
        )
        .with_primary(primary)
    }

    fn first() -> Index {
        Index::from_zero_based(0)
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn test_truncate_counts_columns_not_bytes() {
        // Each CJK character is two columns wide.
        let clipped = truncate_to_width("漢字漢字漢字", 7);
        assert_eq!(clipped, "漢字漢…");
        assert!(clipped.width() <= 7);
    }

    #[test]
    fn test_format_issue_line_plain() {
        let issue = make_issue("Build hangs");
        assert_eq!(format_issue_line(first(), &issue), "1. Build hangs");
    }

    #[test]
    fn test_format_issue_line_with_tags_and_solutions() {
        let issue = make_issue("Build hangs")
            .with_tags(BTreeSet::from([
                Tag::new("ci").unwrap(),
                Tag::new("cargo").unwrap(),
            ]))
            .with_solution(make_solution("https://a.com", false))
            .with_solution(make_solution("https://b.com", true));
        let line = format_issue_line(Index::from_zero_based(2), &issue);
        assert_eq!(line, "3. Build hangs [cargo] [ci] (2 solutions)");
    }

    #[test]
    fn test_format_issue_line_clips_long_statement() {
        let issue = make_issue(&"x".repeat(100));
        let line = format_issue_line(first(), &issue);
        assert!(line.ends_with('…'));
        assert_eq!(line.width(), "1. ".len() + STATEMENT_WIDTH);
    }

    #[test]
    fn test_format_solution_line_marks_primary() {
        let primary = format_solution_line(first(), &make_solution("https://a.com", true));
        assert_eq!(primary, "★ 1. https://a.com - works");
        let other = format_solution_line(first(), &make_solution("https://a.com", false));
        assert!(other.starts_with('·'));
    }

    #[test]
    fn test_format_issue_details_lists_solutions() {
        let issue = make_issue("Build hangs").with_solution(make_solution("https://a.com", true));
        let details = format_issue_details(first(), &issue);
        assert!(details.starts_with("1. Build hangs\n   Some description\n"));
        assert!(details.contains("★ 1. https://a.com - works"));
        assert!(details.contains("Searched 0 time(s)"));
    }

    #[test]
    fn test_format_outcome_messages() {
        let dir = Directory::at_issue(0);
        assert_eq!(
            format_outcome("add", &Outcome::Committed { version: 3 }, dir),
            "add: done (version 3)"
        );
        assert_eq!(
            format_outcome("tag", &Outcome::Unchanged, dir),
            "tag: nothing changed"
        );
        assert_eq!(
            format_outcome("home", &Outcome::Navigated(Directory::Root), Directory::Root),
            "Now at /"
        );
        assert_eq!(
            format_outcome("undo", &Outcome::Undone { version: 1 }, dir),
            "Undone to version 1 (at /1)"
        );
    }
}

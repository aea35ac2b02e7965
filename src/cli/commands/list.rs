//! List command implementation.

use anyhow::Result;
use saveit_core::{Index, Issue, SortKey, Tag};

use crate::cli::ListArgs;
use crate::config::Config;
use crate::format::{IndexedIssue, IssueListing, OutputContext, format_issue_line};
use crate::storage::Workspace;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(
    args: &ListArgs,
    workspace: &Workspace,
    config: &Config,
    ctx: &OutputContext,
) -> Result<()> {
    let document = workspace.document();
    let rows = select_rows(
        document.issues(),
        &args.tags,
        args.sort.or(config.default_sort),
    );

    if ctx.is_json() {
        ctx.json(&IssueListing {
            directory: document.current_directory().to_string(),
            issues: rows
                .iter()
                .map(|&(index, issue)| IndexedIssue::new(index, issue))
                .collect(),
        })?;
        return Ok(());
    }

    print_rows(&rows, ctx);
    Ok(())
}

/// Keep issues carrying every tag in `tags`, in stored or `sort` order.
///
/// Indices always refer to the stored order so they can be fed back into
/// other commands.
pub(crate) fn select_rows<'a>(
    issues: &'a [Issue],
    tags: &[Tag],
    sort: Option<SortKey>,
) -> Vec<(Index, &'a Issue)> {
    let mut rows: Vec<(Index, &Issue)> = issues
        .iter()
        .enumerate()
        .filter(|(_, issue)| tags.iter().all(|tag| issue.has_tag(tag)))
        .map(|(i, issue)| (Index::from_zero_based(i), issue))
        .collect();
    if let Some(key) = sort {
        rows.sort_by(|(_, a), (_, b)| key.compare(a, b));
    }
    rows
}

pub(crate) fn print_rows(rows: &[(Index, &Issue)], ctx: &OutputContext) {
    if rows.is_empty() {
        ctx.text("No issues found.");
        return;
    }
    for &(index, issue) in rows {
        ctx.result(&format_issue_line(index, issue));
    }
    ctx.text(&format!("\n{} issue(s)", rows.len()));
}

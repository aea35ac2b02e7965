//! Find command implementation.

use anyhow::Result;
use saveit_core::IssueFilter;

use crate::cli::FindArgs;
use crate::cli::commands::list::print_rows;
use crate::format::{IndexedIssue, OutputContext};
use crate::storage::Workspace;

/// Execute the find command.
///
/// Finding does not count as a search hit; only `select` does.
///
/// # Errors
///
/// Returns an error if no criteria are given or JSON serialization fails.
pub fn execute(args: &FindArgs, workspace: &Workspace, ctx: &OutputContext) -> Result<()> {
    if args.keywords.is_empty() && args.tags.is_empty() {
        anyhow::bail!("Give at least one keyword or --tag");
    }
    let filter = IssueFilter {
        keywords: args.keywords.clone(),
        tags: args.tags.clone(),
    };
    let rows = workspace.document().live().find(&filter);

    if ctx.is_json() {
        let issues: Vec<IndexedIssue<'_>> = rows
            .iter()
            .map(|&(index, issue)| IndexedIssue::new(index, issue))
            .collect();
        ctx.json(&issues)?;
    } else {
        print_rows(&rows, ctx);
    }
    Ok(())
}

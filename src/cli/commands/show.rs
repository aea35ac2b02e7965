//! Show command implementation.

use anyhow::Result;
use saveit_core::Index;

use crate::cli::IssueTarget;
use crate::format::{IndexedIssue, OutputContext, format_issue_details};
use crate::storage::Workspace;

/// Execute the show command.
///
/// Without an index, shows the selected issue.
///
/// # Errors
///
/// Returns an error if no issue is selected, the index is out of range, or
/// JSON serialization fails.
pub fn execute(target: &IssueTarget, workspace: &Workspace, ctx: &OutputContext) -> Result<()> {
    let document = workspace.document().live();
    let position = document.resolve_issue(target.issue)?;
    let issue = document.issue(position)?;
    let index = Index::from_zero_based(position);

    if ctx.is_json() {
        ctx.json(&IndexedIssue::new(index, issue))?;
    } else {
        ctx.result(format_issue_details(index, issue).trim_end());
    }
    Ok(())
}

//! Execution of document-changing commands.

use anyhow::Result;
use saveit_core::Command;
use tracing::debug;

use crate::format::{CommandReport, OutputContext, format_outcome};
use crate::storage::Workspace;

/// Run `command` against the workspace and report what happened.
///
/// # Errors
///
/// Returns the document error if the command was rejected. Nothing is
/// committed or saved in that case.
pub fn execute(
    name: &'static str,
    command: Command,
    workspace: &mut Workspace,
    ctx: &OutputContext,
) -> Result<()> {
    let outcome = workspace.execute(command)?;
    let document = workspace.document();
    debug!(command = name, ?outcome, directory = %document.current_directory(), "command finished");

    if ctx.is_json() {
        ctx.json(&CommandReport::new(
            name,
            &outcome,
            document.current_directory(),
            document.can_undo(),
            document.can_redo(),
        ))?;
    } else {
        ctx.text(&format_outcome(name, &outcome, document.current_directory()));
    }
    Ok(())
}

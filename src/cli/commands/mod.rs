//! Command handlers.
//!
//! Mutating and navigating commands all go through [`mutate`]; the read-only
//! views each have their own module.

pub mod find;
pub mod list;
pub mod mutate;
pub mod shell;
pub mod show;
pub mod version;

use anyhow::Result;

use crate::cli::Commands;
use crate::config::Config;
use crate::format::OutputContext;
use crate::storage::Workspace;

/// Route one parsed command to its handler.
///
/// # Errors
///
/// Returns the handler's error.
pub fn dispatch(
    command: &Commands,
    workspace: &mut Workspace,
    config: &Config,
    ctx: &OutputContext,
) -> Result<()> {
    match command {
        Commands::List(args) => list::execute(args, workspace, config, ctx),
        Commands::Find(args) => find::execute(args, workspace, ctx),
        Commands::Show(target) => show::execute(target, workspace, ctx),
        Commands::Version => version::execute(ctx),
        Commands::Shell => anyhow::bail!("Already in a shell"),
        other => match other.to_document_command() {
            Some(document_command) => {
                mutate::execute(other.name(), document_command, workspace, ctx)
            }
            None => anyhow::bail!("{} cannot change the document", other.name()),
        },
    }
}

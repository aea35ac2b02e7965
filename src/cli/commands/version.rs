//! Version command implementation.

use anyhow::Result;
use serde::Serialize;

use crate::format::OutputContext;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    core: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &OutputContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.is_json() {
        ctx.json(&VersionOutput {
            version,
            core: saveit_core::VERSION,
            build,
        })?;
        return Ok(());
    }

    ctx.result(&format!("saveit version {version} ({build})"));
    Ok(())
}

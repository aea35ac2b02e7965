//! Shell command implementation.
//!
//! Reads one command per line and runs it against a single live document, so
//! the selected issue and the undo/redo history carry over between lines.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cli::Commands;
use crate::cli::commands::dispatch;
use crate::config::Config;
use crate::format::OutputContext;
use crate::storage::Workspace;

/// A double-quoted word (with `\"` and `\\` escapes), a single-quoted word,
/// or a run of non-space characters.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|'([^']*)'|(\S+)"#)
        .expect("token pattern is a valid regex")
});

/// One line of shell input, parsed with the top-level command grammar.
#[derive(Parser, Debug)]
#[command(name = "saveit", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Split a line into words, honoring quotes.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|caps| {
            if let Some(quoted) = caps.get(1) {
                Some(unescape(quoted.as_str()))
            } else {
                caps.get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string())
            }
        })
        .collect()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Execute the shell command, reading until `exit`, `quit` or end of input.
///
/// A failing line prints its error and the shell carries on.
///
/// # Errors
///
/// Returns an error if reading input fails.
pub fn execute(
    workspace: &mut Workspace,
    config: &Config,
    ctx: &OutputContext,
    input: impl BufRead,
) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut failures = 0_usize;
    let mut lines = input.lines();

    loop {
        if interactive {
            print!("{}> ", workspace.document().current_directory());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }

        let words = tokenize(trimmed);
        debug!(?words, "shell line");
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                if report_parse_error(&e) {
                    failures += 1;
                }
                continue;
            }
        };

        if let Err(e) = dispatch(&parsed.command, workspace, config, ctx) {
            failures += 1;
            eprintln!("Error: {e}");
        }
    }

    info!(failures, "shell finished");
    Ok(())
}

/// Print a clap error for one line. Returns `false` for help output, which
/// is not a failure.
fn report_parse_error(e: &clap::Error) -> bool {
    if let Err(print_err) = e.print() {
        warn!(error = %print_err, "could not print parse error");
    }
    e.use_stderr()
}

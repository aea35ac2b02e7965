//! Command-line interface for `saveit`.
//!
//! This module provides the CLI parsing and command routing using clap. The
//! same [`Commands`] grammar is used for one-shot invocations and for each
//! line typed into `saveit shell`.

pub mod commands;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use saveit_core::{
    Command, Description, Index, Issue, IssueStatement, IssueUpdate, Remark, Solution,
    SolutionLink, SolutionUpdate, SortKey, Tag,
};

use crate::config::{CliOverrides, Config};
use crate::format::OutputContext;
use crate::logging;
use crate::storage::Workspace;

/// saveit - Issue and solution tracker with undo/redo.
#[derive(Parser, Debug)]
#[command(name = "saveit")]
#[command(
    author,
    version,
    about = "Issue and solution tracker with undo/redo (JSONL storage)",
    long_about = None,
    after_help = "Indices are one-based. Use `saveit shell` to keep undo history and the selected issue across commands."
)]
pub struct Cli {
    /// Data file (overrides config and SAVEIT_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new issue
    Add(AddArgs),

    /// Edit an issue's statement, description or tags
    Edit(EditArgs),

    /// Delete an issue
    #[command(alias = "rm")]
    Delete(IssueTarget),

    /// Add a solution to an issue
    Solve(SolveArgs),

    /// Edit a solution's link or remark
    EditSolution(EditSolutionArgs),

    /// Delete a solution
    DeleteSolution(SolutionTarget),

    /// Mark a solution as the issue's primary one
    Primary(SolutionTarget),

    /// Add tags to an issue
    Tag(TagArgs),

    /// Rename a tag on every issue, or remove it when no new name is given
    RefactorTag(RefactorTagArgs),

    /// Reorder the stored issues
    Sort(SortArgs),

    /// Enter an issue, or one of its solutions
    #[command(alias = "cd")]
    Select(SelectArgs),

    /// Return to the issue list
    Home,

    /// Remove every issue
    Clear,

    /// Undo the last change
    Undo,

    /// Redo the last undone change
    Redo,

    /// List issues
    #[command(alias = "ls")]
    List(ListArgs),

    /// Search issues by keyword and tag
    #[command(alias = "search")]
    Find(FindArgs),

    /// Show an issue with its solutions
    Show(IssueTarget),

    /// Read commands from stdin against one live document
    Shell,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// One-line problem statement
    pub statement: IssueStatement,

    /// Longer description
    pub description: Description,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<Tag>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Issue index (defaults to the selected issue)
    pub issue: Option<Index>,

    /// New statement
    #[arg(short, long)]
    pub statement: Option<IssueStatement>,

    /// New description
    #[arg(short, long)]
    pub description: Option<Description>,

    /// Replace the tag set (repeatable)
    #[arg(short, long = "tag", value_name = "TAG", conflicts_with = "clear_tags")]
    pub tags: Vec<Tag>,

    /// Remove every tag
    #[arg(long)]
    pub clear_tags: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IssueTarget {
    /// Issue index (defaults to the selected issue)
    pub issue: Option<Index>,
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Link to the solution
    pub link: SolutionLink,

    /// What the solution does
    pub remark: Remark,

    /// Issue index (defaults to the selected issue)
    #[arg(short, long)]
    pub issue: Option<Index>,

    /// Mark as the primary solution
    #[arg(long)]
    pub primary: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SolutionTarget {
    /// Solution index (defaults to the selected solution)
    pub solution: Option<Index>,

    /// Issue index (defaults to the selected issue)
    #[arg(short, long)]
    pub issue: Option<Index>,
}

#[derive(Args, Debug, Clone)]
pub struct EditSolutionArgs {
    #[command(flatten)]
    pub target: SolutionTarget,

    /// New link
    #[arg(short, long)]
    pub link: Option<SolutionLink>,

    /// New remark
    #[arg(short, long)]
    pub remark: Option<Remark>,
}

#[derive(Args, Debug, Clone)]
pub struct TagArgs {
    /// Tags to add
    #[arg(required = true)]
    pub tags: Vec<Tag>,

    /// Issue index (defaults to the selected issue)
    #[arg(short, long)]
    pub issue: Option<Index>,
}

#[derive(Args, Debug, Clone)]
pub struct RefactorTagArgs {
    /// Tag to replace
    pub old: Tag,

    /// Replacement tag; omit to remove `old`
    pub new: Option<Tag>,
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// statement, frequency, chronological or modified
    pub key: SortKey,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Issue index
    pub issue: Index,

    /// Solution index within the issue
    pub solution: Option<Index>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Display order (does not change the stored order)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Only issues carrying this tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<Tag>,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Keywords matched against statement, description and tags
    pub keywords: Vec<String>,

    /// Required tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<Tag>,
}

impl Commands {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
            Self::Solve(_) => "solve",
            Self::EditSolution(_) => "edit-solution",
            Self::DeleteSolution(_) => "delete-solution",
            Self::Primary(_) => "primary",
            Self::Tag(_) => "tag",
            Self::RefactorTag(_) => "refactor-tag",
            Self::Sort(_) => "sort",
            Self::Select(_) => "select",
            Self::Home => "home",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::List(_) => "list",
            Self::Find(_) => "find",
            Self::Show(_) => "show",
            Self::Shell => "shell",
            Self::Version => "version",
        }
    }

    /// The document command this CLI command stands for, if it changes or
    /// navigates the document.
    #[must_use]
    pub fn to_document_command(&self) -> Option<Command> {
        let command = match self.clone() {
            Self::Add(args) => Command::AddIssue(Issue::new(
                args.statement,
                args.description,
                Vec::new(),
                args.tags.into_iter().collect(),
            )),
            Self::Edit(args) => {
                let tags = if args.clear_tags {
                    Some(BTreeSet::new())
                } else if args.tags.is_empty() {
                    None
                } else {
                    Some(args.tags.into_iter().collect())
                };
                Command::EditIssue {
                    issue: args.issue,
                    update: IssueUpdate {
                        statement: args.statement,
                        description: args.description,
                        tags,
                    },
                }
            }
            Self::Delete(target) => Command::DeleteIssue {
                issue: target.issue,
            },
            Self::Solve(args) => Command::AddSolution {
                issue: args.issue,
                solution: Solution::new(args.link, args.remark).with_primary(args.primary),
            },
            Self::EditSolution(args) => Command::EditSolution {
                issue: args.target.issue,
                solution: args.target.solution,
                update: SolutionUpdate {
                    link: args.link,
                    remark: args.remark,
                },
            },
            Self::DeleteSolution(target) => Command::DeleteSolution {
                issue: target.issue,
                solution: target.solution,
            },
            Self::Primary(target) => Command::SetPrimarySolution {
                issue: target.issue,
                solution: target.solution,
            },
            Self::Tag(args) => Command::AddTags {
                issue: args.issue,
                tags: args.tags.into_iter().collect(),
            },
            Self::RefactorTag(args) => Command::RefactorTag {
                old: args.old,
                new: args.new,
            },
            Self::Sort(args) => Command::Sort(args.key),
            Self::Select(args) => Command::Select {
                issue: args.issue,
                solution: args.solution,
            },
            Self::Home => Command::Home,
            Self::Clear => Command::Clear,
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
            Self::List(_) | Self::Find(_) | Self::Show(_) | Self::Shell | Self::Version => {
                return None;
            }
        };
        Some(command)
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the data file cannot
/// be opened, or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, Some(cli.json))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = OutputContext::new(cli.json, cli.quiet);
    let Some(command) = cli.command else {
        ctx.text("saveit - issue and solution tracker. Use --help for usage.");
        return Ok(());
    };
    if matches!(command, Commands::Version) {
        return commands::version::execute(&ctx);
    }

    let root = std::env::current_dir().context("Failed to read the working directory")?;
    let config = Config::load(&root, &CliOverrides { data_file: cli.data })?;
    let mut workspace = Workspace::open(&config)
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?;

    if matches!(command, Commands::Shell) {
        let stdin = std::io::stdin();
        return commands::shell::execute(&mut workspace, &config, &ctx, stdin.lock());
    }
    commands::dispatch(&command, &mut workspace, &config, &ctx)
}

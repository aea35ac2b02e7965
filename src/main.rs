//! `saveit` - Issue and solution tracker
//!
//! Issues, their solutions and tags live in one JSONL file. Every change is
//! a snapshot that can be undone within a `saveit shell` session.

use saveit::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

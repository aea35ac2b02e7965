//! JSONL file I/O for SaveIt issues.
//!
//! Each line in the file is one complete `Issue` with its solutions and tags
//! embedded. The navigation directory is not persisted.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::document::Document;
use crate::error::{Result, SaveItError};
use crate::model::Issue;

/// Load issues from a JSONL file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file does not exist, `Io` if it cannot be
/// read, `JsonlParse` if any line is invalid, or `DuplicateIssue` if two lines
/// hold the same issue.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SaveItError::FileNotFound(path.to_path_buf())
        } else {
            SaveItError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut issues = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let issue: Issue = serde_json::from_str(trimmed).map_err(|e| SaveItError::JsonlParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        issues.push(issue);
    }

    debug!(path = %path.display(), issues = issues.len(), "loaded issues");
    Ok(issues)
}

/// Load a document, treating a missing file as an empty one.
///
/// # Errors
///
/// Returns any error from [`load`] other than `FileNotFound`, or
/// `DuplicateIssue` if the file holds the same issue twice.
pub fn load_document(path: &Path) -> Result<Document> {
    match load(path) {
        Ok(issues) => Document::from_issues(issues),
        Err(SaveItError::FileNotFound(_)) => {
            debug!(path = %path.display(), "no data file yet, starting empty");
            Ok(Document::new())
        }
        Err(e) => Err(e),
    }
}

/// Save issues to a JSONL file with atomic write.
///
/// Writes to a sibling temp file and renames it over `path`.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Json` if an issue fails to
/// serialize.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("jsonl.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    for issue in issues {
        let json = serde_json::to_string(issue)?;
        writeln!(file, "{json}")?;
    }
    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    debug!(path = %path.display(), issues = issues.len(), "saved issues");
    Ok(())
}

//! JSONL persistence for `saveit`.
//!
//! A [`Workspace`] owns the [`VersionedDocument`] for one data file. It
//! subscribes to change notifications and writes the latest snapshot after
//! each command when autosave is on. Save failures are logged and never undo
//! the commit that produced them.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use saveit_core::{Command, DocumentChanged, Outcome, VersionedDocument, jsonl};
use tracing::{debug, info, warn};

use crate::config::Config;

pub struct Workspace {
    document: VersionedDocument,
    data_file: PathBuf,
    autosave: bool,
    changes: Receiver<DocumentChanged>,
}

impl Workspace {
    /// Load the data file named by `config`. A missing file starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, holds an
    /// invalid line, or holds the same issue twice.
    pub fn open(config: &Config) -> saveit_core::Result<Self> {
        let initial = jsonl::load_document(&config.data_file)?;
        info!(
            path = %config.data_file.display(),
            issues = initial.issues().len(),
            "opened workspace"
        );
        let mut document = VersionedDocument::new(initial);
        let changes = document.subscribe();
        Ok(Self {
            document,
            data_file: config.data_file.clone(),
            autosave: config.autosave,
            changes,
        })
    }

    #[must_use]
    pub const fn document(&self) -> &VersionedDocument {
        &self.document
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Run `command` and persist whatever it committed.
    ///
    /// # Errors
    ///
    /// Returns the error from the command itself. Persistence errors are only
    /// logged.
    pub fn execute(&mut self, command: Command) -> saveit_core::Result<Outcome> {
        let result = command.execute(&mut self.document);
        self.flush();
        result
    }

    /// Drain pending notifications and save the newest snapshot.
    ///
    /// Returns true if a file was written.
    pub fn flush(&mut self) -> bool {
        let Some(latest) = self.changes.try_iter().last() else {
            return false;
        };
        if !self.autosave {
            debug!(version = latest.version, "autosave off, skipping save");
            return false;
        }

        match jsonl::save(&self.data_file, latest.snapshot.issues()) {
            Ok(()) => {
                debug!(
                    kind = ?latest.kind,
                    version = latest.version,
                    path = %self.data_file.display(),
                    "persisted snapshot"
                );
                true
            }
            Err(e) => {
                warn!(
                    path = %self.data_file.display(),
                    error = %e,
                    "failed to save issues; change is kept in memory"
                );
                false
            }
        }
    }

    /// Write the current state regardless of autosave.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> saveit_core::Result<()> {
        jsonl::save(&self.data_file, self.document.issues())
    }
}

//! Linear undo/redo history over full-document snapshots.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info};

use crate::directory::Directory;
use crate::document::Document;
use crate::error::{Result, SaveItError};
use crate::model::Issue;
use crate::unique_list::UniqueIssueList;

/// An immutable copy of a document taken at a commit point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    issues: Vec<Issue>,
    directory: Directory,
}

impl Snapshot {
    fn capture(document: &Document) -> Self {
        Self {
            issues: document.issues().to_vec(),
            directory: document.current_directory(),
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub const fn directory(&self) -> Directory {
        self.directory
    }

    /// A fresh, independently owned document with this snapshot's contents.
    #[must_use]
    pub fn to_document(&self) -> Document {
        // Captured from a document, so already free of duplicates.
        let issues = UniqueIssueList::from_unique(self.issues.clone());
        Document::from_parts(issues, self.directory)
    }
}

/// What moved the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Commit,
    Undo,
    Redo,
}

/// Sent to subscribers after every history move.
#[derive(Debug, Clone)]
pub struct DocumentChanged {
    pub kind: ChangeKind,
    /// History cursor after the move.
    pub version: usize,
    pub snapshot: Arc<Snapshot>,
}

/// A live [`Document`] plus the snapshots it has been committed as.
///
/// `history` is never empty and `history[cursor]` is the state of `live` as of
/// the most recent commit, undo or redo.
#[derive(Debug)]
pub struct VersionedDocument {
    live: Document,
    history: Vec<Arc<Snapshot>>,
    cursor: usize,
    subscribers: Vec<Sender<DocumentChanged>>,
}

impl VersionedDocument {
    /// Start a history whose only state is `initial`.
    #[must_use]
    pub fn new(initial: Document) -> Self {
        let seed = Arc::new(Snapshot::capture(&initial));
        Self {
            live: initial,
            history: vec![seed],
            cursor: 0,
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn live(&self) -> &Document {
        &self.live
    }

    /// Mutable access for commands. Changes stay uncommitted until
    /// [`commit`](Self::commit).
    pub fn live_mut(&mut self) -> &mut Document {
        &mut self.live
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.live.issues()
    }

    #[must_use]
    pub const fn current_directory(&self) -> Directory {
        self.live.current_directory()
    }

    /// The snapshot the cursor points at.
    #[must_use]
    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.history[self.cursor])
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Record the live document as the newest state. Any redoable states past
    /// the cursor are dropped for good.
    pub fn commit(&mut self) {
        let dropped = self.history.len() - (self.cursor + 1);
        self.history.truncate(self.cursor + 1);
        self.history.push(Arc::new(Snapshot::capture(&self.live)));
        self.cursor += 1;
        info!(
            version = self.cursor,
            issues = self.live.issues().len(),
            dropped,
            "committed"
        );
        self.notify(ChangeKind::Commit);
    }

    /// Step back one state.
    ///
    /// # Errors
    ///
    /// Returns `NothingToUndo` at the oldest state.
    pub fn undo(&mut self) -> Result<()> {
        if !self.can_undo() {
            return Err(SaveItError::NothingToUndo);
        }
        self.cursor -= 1;
        self.restore();
        debug!(version = self.cursor, "undo");
        self.notify(ChangeKind::Undo);
        Ok(())
    }

    /// Step forward one state.
    ///
    /// # Errors
    ///
    /// Returns `NothingToRedo` at the newest state.
    pub fn redo(&mut self) -> Result<()> {
        if !self.can_redo() {
            return Err(SaveItError::NothingToRedo);
        }
        self.cursor += 1;
        self.restore();
        debug!(version = self.cursor, "redo");
        self.notify(ChangeKind::Redo);
        Ok(())
    }

    /// Throw away uncommitted changes to the live document.
    pub fn discard_uncommitted(&mut self) {
        if *self.history[self.cursor] != Snapshot::capture(&self.live) {
            debug!(version = self.cursor, "discarding uncommitted changes");
            self.restore();
        }
    }

    /// Receive a [`DocumentChanged`] after every commit, undo and redo.
    pub fn subscribe(&mut self) -> Receiver<DocumentChanged> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn restore(&mut self) {
        let snapshot = Arc::clone(&self.history[self.cursor]);
        self.live.reset_data(snapshot.to_document());
    }

    fn notify(&mut self, kind: ChangeKind) {
        if self.subscribers.is_empty() {
            return;
        }
        let event = DocumentChanged {
            kind,
            version: self.cursor,
            snapshot: self.current_snapshot(),
        };
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

impl Default for VersionedDocument {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{issue, solution};

    fn names(doc: &VersionedDocument) -> Vec<&str> {
        doc.issues().iter().map(|i| i.statement().as_str()).collect()
    }

    #[test]
    fn fresh_history_has_nothing_to_undo_or_redo() {
        let mut doc = VersionedDocument::default();
        assert_eq!(doc.history_len(), 1);
        assert!(!doc.can_undo());
        assert!(!doc.can_redo());
        assert!(matches!(doc.undo(), Err(SaveItError::NothingToUndo)));
        assert!(matches!(doc.redo(), Err(SaveItError::NothingToRedo)));
    }

    #[test]
    fn branch_scenario() {
        let mut doc = VersionedDocument::default();
        doc.live_mut().add_issue(issue("X", "x")).unwrap();
        doc.commit();
        doc.live_mut().add_issue(issue("Y", "y")).unwrap();
        doc.commit();

        doc.undo().unwrap();
        assert_eq!(names(&doc), vec!["X"]);
        assert!(doc.can_redo());

        doc.live_mut().add_issue(issue("Z", "z")).unwrap();
        doc.commit();
        assert_eq!(names(&doc), vec!["X", "Z"]);
        assert_eq!(doc.history_len(), 3);
        assert!(matches!(doc.redo(), Err(SaveItError::NothingToRedo)));
    }

    #[test]
    fn undo_redo_walks_history() {
        let mut doc = VersionedDocument::default();
        for name in ["A", "B", "C"] {
            doc.live_mut().add_issue(issue(name, "d")).unwrap();
            doc.commit();
        }
        let final_issues = doc.issues().to_vec();

        for _ in 0..3 {
            doc.undo().unwrap();
        }
        assert!(doc.issues().is_empty());
        for _ in 0..3 {
            doc.redo().unwrap();
        }
        assert_eq!(doc.issues(), final_issues.as_slice());
    }

    #[test]
    fn committed_snapshot_is_independent_of_live() {
        let mut doc = VersionedDocument::default();
        doc.live_mut().add_issue(issue("A", "a")).unwrap();
        doc.commit();
        let committed = doc.current_snapshot();
        let before = committed.issues().to_vec();

        doc.live_mut()
            .add_solution(0, solution("https://a.com", "fix"))
            .unwrap();
        doc.live_mut().add_issue(issue("B", "b")).unwrap();

        assert_eq!(committed.issues(), before.as_slice());
        assert!(committed.issues()[0].solutions().is_empty());
        assert_eq!(doc.current_snapshot().issues().len(), 1);
    }

    #[test]
    fn undo_restores_directory() {
        let mut doc = VersionedDocument::default();
        doc.live_mut().add_issue(issue("A", "a")).unwrap();
        doc.commit();
        doc.live_mut()
            .set_current_directory(Directory::at_issue(0))
            .unwrap();
        doc.live_mut()
            .add_solution(0, solution("https://a.com", "fix"))
            .unwrap();
        doc.commit();

        doc.undo().unwrap();
        assert!(doc.current_directory().is_root());
        doc.redo().unwrap();
        assert_eq!(doc.current_directory(), Directory::at_issue(0));
    }

    #[test]
    fn discard_uncommitted_rolls_back_live() {
        let mut doc = VersionedDocument::default();
        doc.live_mut().add_issue(issue("A", "a")).unwrap();
        doc.discard_uncommitted();
        assert!(doc.issues().is_empty());
        assert_eq!(doc.history_len(), 1);
    }

    #[test]
    fn subscribers_see_every_move() {
        let mut doc = VersionedDocument::default();
        let rx = doc.subscribe();

        doc.live_mut().add_issue(issue("A", "a")).unwrap();
        doc.commit();
        doc.undo().unwrap();
        doc.redo().unwrap();

        let events: Vec<DocumentChanged> = rx.try_iter().collect();
        let kinds: Vec<ChangeKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Commit, ChangeKind::Undo, ChangeKind::Redo]);
        assert_eq!(events[0].version, 1);
        assert_eq!(events[1].snapshot.issues().len(), 0);
        assert_eq!(events[2].snapshot.issues().len(), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut doc = VersionedDocument::default();
        drop(doc.subscribe());
        doc.commit();
        assert!(doc.subscribers.is_empty());
    }
}

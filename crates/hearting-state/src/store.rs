use crate::{FlagFile, MessageState, PersistedFlags};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle to the shared UI state. Every effective update publishes
/// a new snapshot to subscribers; updates that change nothing stay silent.
#[derive(Debug, Clone)]
pub struct MessageStateStore {
    tx: Arc<watch::Sender<MessageState>>,
    persistence: Option<FlagFile>,
}

impl MessageStateStore {
    pub fn new() -> Self {
        Self::from_state(MessageState::default(), None)
    }

    /// Restores the persisted flags from `path` and keeps writing them back on change.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Self {
        let file = FlagFile::new(path);
        let flags = match file.load() {
            Ok(flags) => flags,
            Err(err) => {
                tracing::warn!(
                    path = %file.path().display(),
                    "ignoring unreadable persisted ui state: {err}"
                );
                PersistedFlags::default()
            }
        };
        Self::from_state(flags.into_state(), Some(file))
    }

    fn from_state(state: MessageState, persistence: Option<FlagFile>) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            tx: Arc::new(tx),
            persistence,
        }
    }

    pub fn snapshot(&self) -> MessageState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MessageState> {
        self.tx.subscribe()
    }

    /// Applies `transition` to the current snapshot and returns the resulting one.
    ///
    /// Changed flags are written while the channel is still locked, so the
    /// file always holds the flags of the newest snapshot.
    pub fn update<F>(&self, transition: F) -> MessageState
    where
        F: FnOnce(&MessageState) -> MessageState,
    {
        let mut applied = None;
        self.tx.send_if_modified(|current| {
            let next = transition(current);
            if next.same_contents(current) {
                applied = Some(current.clone());
                return false;
            }

            let before = PersistedFlags::from(&*current);
            let rev = current.rev + 1;
            *current = MessageState { rev, ..next };
            let after = PersistedFlags::from(&*current);
            if before != after {
                self.persist(&after);
            }
            applied = Some(current.clone());
            true
        });

        applied.unwrap_or_else(|| self.snapshot())
    }

    fn persist(&self, flags: &PersistedFlags) {
        let Some(file) = &self.persistence else {
            return;
        };
        if let Err(err) = file.save(flags) {
            tracing::warn!(path = %file.path().display(), "failed to persist ui state: {err}");
        }
    }
}

impl Default for MessageStateStore {
    fn default() -> Self {
        Self::new()
    }
}

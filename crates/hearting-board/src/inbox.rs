use crate::BoardError;
use hearting_api::HeartApi;
use hearting_core::{InboxItem, MessageId};
use hearting_state::{MessageState, MessageStateStore};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Keeps the inbox listing in step with the backend. The whole list is
/// fetched again each time the read flag flips.
pub struct InboxListController {
    api: Arc<dyn HeartApi>,
    store: MessageStateStore,
    items: RwLock<Vec<InboxItem>>,
    last_read_flag: Mutex<Option<bool>>,
}

impl InboxListController {
    pub fn new(api: Arc<dyn HeartApi>, store: MessageStateStore) -> Self {
        Self {
            api,
            store,
            items: RwLock::new(Vec::new()),
            last_read_flag: Mutex::new(None),
        }
    }

    /// Replaces the listing on success; a failed fetch keeps the previous one.
    pub async fn load_inbox(&self) -> Result<usize, BoardError> {
        match self.api.inbox().await {
            Ok(items) => {
                let count = items.len();
                *self.items.write().await = items;
                tracing::debug!(count, "inbox refreshed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("inbox fetch failed, keeping previous listing: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn items(&self) -> Vec<InboxItem> {
        self.items.read().await.clone()
    }

    /// List click.
    pub fn open_message(&self, message_id: MessageId) -> MessageState {
        tracing::info!(%message_id, "opening message");
        self.store.update(|state| state.open_message(message_id))
    }

    /// Fetches once for the first observation and once per change of the read
    /// flag since the previous call. Returns whether a fetch was issued.
    pub async fn refresh_if_read_flipped(&self) -> Result<bool, BoardError> {
        let read_message = self.store.snapshot().read_message;
        {
            let mut last = self.last_read_flag.lock().await;
            if *last == Some(read_message) {
                return Ok(false);
            }
            *last = Some(read_message);
        }

        self.load_inbox().await?;
        Ok(true)
    }

    /// Follows the store for as long as the task runs. Flips that happen
    /// between two wake-ups coalesce into whatever the flag ends up as.
    pub async fn watch(self: Arc<Self>) {
        let mut changes = self.store.subscribe();
        loop {
            if let Err(err) = self.refresh_if_read_flipped().await {
                tracing::warn!("inbox refresh failed: {err}");
            }
            if changes.changed().await.is_err() {
                tracing::debug!("state store dropped, inbox watcher exiting");
                break;
            }
        }
    }
}

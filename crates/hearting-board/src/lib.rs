mod detail;
mod error;
mod inbox;
mod notice;
#[cfg(test)]
mod testing;

pub use detail::{
    DetailLoad, DetailView, MessageDetailController, ModalPhase, ReportFailure, ReportOutcome,
};
pub use error::BoardError;
pub use inbox::InboxListController;
pub use notice::{Notice, Prompter};

use hearting_api::HeartApi;
use hearting_state::MessageStateStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The inbox list and the read modal wired to one shared state store.
pub struct HeartBoard {
    pub store: MessageStateStore,
    pub inbox: Arc<InboxListController>,
    pub detail: Arc<MessageDetailController>,
}

impl HeartBoard {
    pub fn new(
        api: Arc<dyn HeartApi>,
        prompter: Arc<dyn Prompter>,
        store: MessageStateStore,
    ) -> Self {
        Self {
            inbox: Arc::new(InboxListController::new(api.clone(), store.clone())),
            detail: Arc::new(MessageDetailController::new(api, prompter, store.clone())),
            store,
        }
    }

    /// Starts the background task that re-lists the inbox whenever the read
    /// flag flips. It runs until the store goes away or the handle is aborted.
    pub fn spawn_inbox_watcher(&self) -> JoinHandle<()> {
        tokio::spawn(self.inbox.clone().watch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{detail, id, wait_for, FakeApi, RecordingPrompter};
    use hearting_core::{InboxItem, ViewMode};

    #[tokio::test]
    async fn inbox_follows_modal_open_and_close() {
        let api = Arc::new(FakeApi::default());
        *api.inbox.lock().unwrap() = Some(vec![InboxItem {
            message_id: id(1),
            heart_id: 1,
            context: "hello".to_string(),
            emoji_id: 0,
        }]);
        api.received
            .lock()
            .unwrap()
            .insert(id(1), detail("hello", None));
        let board = HeartBoard::new(
            api.clone(),
            Arc::new(RecordingPrompter::answering(true)),
            MessageStateStore::new(),
        );

        let watcher = board.spawn_inbox_watcher();
        wait_for(|| api.count("inbox") == 1).await;

        board.inbox.open_message(id(1));
        board.detail.load_selected(ViewMode::Received).await.unwrap();
        wait_for(|| api.count("inbox") == 2).await;

        board.detail.close_modal().await;
        wait_for(|| api.count("inbox") == 3).await;
        assert_eq!(board.inbox.items().await.len(), 1);

        watcher.abort();
    }
}

use crate::{BoardError, Notice, Prompter};
use chrono::{DateTime, TimeZone};
use hearting_api::{ApiError, HeartApi};
use hearting_core::{
    compute_expiry, EmojiReaction, ExpiryStatus, HeartResponse, MessageDetail, MessageId, ViewMode,
};
use hearting_state::{MessageState, MessageStateStore};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Loading,
    Viewing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLoad {
    /// No message selected, nothing was fetched.
    Skipped,
    Loaded(MessageDetail),
    /// A newer load or a close happened while this one was in flight.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFailure {
    AlreadyReported,
    Unauthorized,
    Other,
}

impl ReportFailure {
    pub fn from_api_error(err: &ApiError) -> Self {
        match err.http_status() {
            Some(400) => Self::AlreadyReported,
            Some(401) => Self::Unauthorized,
            _ => Self::Other,
        }
    }

    pub fn notice(self) -> Notice {
        match self {
            Self::AlreadyReported => Notice::AlreadyReported,
            Self::Unauthorized => Notice::ReportUnauthorized,
            Self::Other => Notice::ReportFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Reported { deleted: bool },
    Failed(ReportFailure),
}

/// What the read modal renders for the loaded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub message_id: MessageId,
    pub mode: ViewMode,
    pub detail: MessageDetail,
    pub expiry: ExpiryStatus,
    pub selected_emoji_url: String,
    pub is_open_emoji_list: bool,
}

#[derive(Debug, Clone)]
struct LoadedDetail {
    message_id: MessageId,
    mode: ViewMode,
    detail: MessageDetail,
}

/// Bumped under the slot lock on every enter and leave, so a response only
/// commits while its generation is still the newest.
#[derive(Debug, Default)]
struct ModalSlot {
    active: Option<(MessageId, ViewMode)>,
    loaded: Option<LoadedDetail>,
    generation: u64,
}

/// Drives the read modal: fetches the selected heart, judges its expiry and
/// runs the react, report and delete actions against the backend.
pub struct MessageDetailController {
    api: Arc<dyn HeartApi>,
    prompter: Arc<dyn Prompter>,
    store: MessageStateStore,
    slot: RwLock<ModalSlot>,
}

impl MessageDetailController {
    pub fn new(
        api: Arc<dyn HeartApi>,
        prompter: Arc<dyn Prompter>,
        store: MessageStateStore,
    ) -> Self {
        Self {
            api,
            prompter,
            store,
            slot: RwLock::new(ModalSlot::default()),
        }
    }

    pub fn store(&self) -> &MessageStateStore {
        &self.store
    }

    /// Loads whatever the store currently has selected. The response is
    /// dropped if the selection moves on while it is in flight.
    pub async fn load_selected(&self, mode: ViewMode) -> Result<DetailLoad, BoardError> {
        let selected = self.store.snapshot().selected_message_id;
        self.load(selected, mode, true).await
    }

    pub async fn load_detail(
        &self,
        message_id: Option<MessageId>,
        mode: ViewMode,
    ) -> Result<DetailLoad, BoardError> {
        self.load(message_id, mode, false).await
    }

    async fn load(
        &self,
        message_id: Option<MessageId>,
        mode: ViewMode,
        follow_selection: bool,
    ) -> Result<DetailLoad, BoardError> {
        let Some(message_id) = message_id else {
            tracing::debug!("no message selected, skipping detail fetch");
            return Ok(DetailLoad::Skipped);
        };

        let generation = self.enter(message_id, mode).await;

        let result = if mode.uses_sent_endpoint() {
            self.api.sent_message_detail(message_id).await
        } else {
            self.api.message_detail(message_id).await
        };

        let mut slot = self.slot.write().await;
        let deselected = follow_selection
            && self.store.snapshot().selected_message_id != Some(message_id);
        if slot.generation != generation || deselected {
            tracing::debug!(%message_id, %mode, "dropping superseded detail response");
            return Ok(DetailLoad::Superseded);
        }

        match result {
            Ok(detail) => {
                let emoji_url = detail.emoji_url.clone().unwrap_or_default();
                slot.loaded = Some(LoadedDetail {
                    message_id,
                    mode,
                    detail: detail.clone(),
                });
                self.store.update(|state| state.with_emoji_url(emoji_url));
                drop(slot);
                tracing::info!(%message_id, %mode, "message detail loaded");
                Ok(DetailLoad::Loaded(detail))
            }
            Err(err) => {
                drop(slot);
                tracing::warn!(%message_id, %mode, "message detail fetch failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Starts a new load generation. Switching to another message or mode
    /// discards everything the previous one left behind.
    async fn enter(&self, message_id: MessageId, mode: ViewMode) -> u64 {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        if slot.active != Some((message_id, mode)) {
            slot.active = Some((message_id, mode));
            slot.loaded = None;
            self.store.update(MessageState::teardown_modal);
        }
        slot.generation
    }

    async fn leave(&self) {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.active = None;
        slot.loaded = None;
    }

    pub async fn detail(&self) -> Option<MessageDetail> {
        self.slot
            .read()
            .await
            .loaded
            .as_ref()
            .map(|loaded| loaded.detail.clone())
    }

    pub async fn phase(&self) -> ModalPhase {
        let state = self.store.snapshot();
        if !state.read_message {
            return ModalPhase::Closed;
        }
        let slot = self.slot.read().await;
        match &slot.loaded {
            Some(loaded) if state.selected_message_id == Some(loaded.message_id) => {
                ModalPhase::Viewing
            }
            _ => ModalPhase::Loading,
        }
    }

    /// `None` while nothing is loaded for the current selection; the modal
    /// renders an empty placeholder then.
    pub async fn view<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Option<DetailView>, BoardError> {
        let Some(loaded) = self.slot.read().await.loaded.clone() else {
            return Ok(None);
        };
        let state = self.store.snapshot();
        if state.selected_message_id != Some(loaded.message_id) {
            return Ok(None);
        }
        let expiry = compute_expiry(&loaded.detail, now)?;

        Ok(Some(DetailView {
            message_id: loaded.message_id,
            mode: loaded.mode,
            detail: loaded.detail,
            expiry,
            selected_emoji_url: state.selected_emoji_url,
            is_open_emoji_list: state.is_open_emoji_list,
        }))
    }

    pub async fn react_with_emoji(
        &self,
        message_id: MessageId,
        emoji_id: u32,
    ) -> Result<EmojiReaction, BoardError> {
        let request = HeartResponse {
            message_id,
            emoji_id,
        };
        match self.api.respond_heart(&request).await {
            Ok(reaction) => {
                let url = reaction.emoji_url.clone();
                self.store.update(|state| state.with_emoji_url(url));
                tracing::info!(%message_id, emoji_id, "emoji reaction saved");
                Ok(reaction)
            }
            Err(err) => {
                tracing::warn!(%message_id, emoji_id, "emoji reaction failed: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn report_message(&self, message_id: MessageId, content: &str) -> ReportOutcome {
        let outcome = match self.api.report_message(message_id, content).await {
            Ok(()) => {
                tracing::info!(%message_id, "message reported");
                let mut deleted = false;
                if self.prompter.confirm(Notice::ReportAcceptedConfirmDelete) {
                    deleted = self.delete_message(message_id).await.is_ok();
                }
                ReportOutcome::Reported { deleted }
            }
            Err(err) => {
                let failure = ReportFailure::from_api_error(&err);
                tracing::warn!(%message_id, ?failure, "report failed: {err}");
                self.prompter.alert(failure.notice());
                ReportOutcome::Failed(failure)
            }
        };

        self.store.update(MessageState::close_reporting);
        outcome
    }

    pub async fn delete_message(&self, message_id: MessageId) -> Result<(), BoardError> {
        if let Err(err) = self.api.delete_temporary_message(message_id).await {
            tracing::warn!(%message_id, "delete failed: {err}");
            return Err(err.into());
        }

        tracing::info!(%message_id, "message deleted");
        self.prompter.alert(Notice::MessageDeleted);
        self.leave().await;
        self.store
            .update(|state| state.with_read(false).teardown_modal());
        Ok(())
    }

    pub async fn close_modal(&self) -> MessageState {
        self.leave().await;
        self.store
            .update(|state| state.close_modal().teardown_modal())
    }

    pub fn toggle_emoji_list(&self) -> MessageState {
        self.store.update(MessageState::toggle_emoji_list)
    }

    pub fn select_emoji(&self, emoji_id: u32) -> MessageState {
        self.store.update(|state| state.select_emoji(emoji_id))
    }

    pub fn open_reporting(&self) -> MessageState {
        self.store.update(MessageState::open_reporting)
    }
}

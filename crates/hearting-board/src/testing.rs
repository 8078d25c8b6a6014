use crate::{Notice, Prompter};
use async_trait::async_trait;
use hearting_api::{ApiError, HeartApi};
use hearting_core::{EmojiReaction, HeartResponse, InboxItem, MessageDetail, MessageId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend. Unknown ids answer with a non-success envelope.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub received: Mutex<HashMap<MessageId, MessageDetail>>,
    pub sent: Mutex<HashMap<MessageId, MessageDetail>>,
    pub delays: Mutex<HashMap<MessageId, Duration>>,
    /// `None` rejects the reaction.
    pub reaction_url: Mutex<Option<String>>,
    /// `None` accepts the report, `Some(code)` fails with that http status.
    pub report_status: Mutex<Option<u16>>,
    pub delete_rejected: Mutex<bool>,
    /// `None` rejects the listing.
    pub inbox: Mutex<Option<Vec<InboxItem>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    async fn lookup(
        &self,
        table: &Mutex<HashMap<MessageId, MessageDetail>>,
        id: MessageId,
    ) -> Result<MessageDetail, ApiError> {
        let delay = self.delays.lock().unwrap().get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let found = table.lock().unwrap().get(&id).cloned();
        found.ok_or_else(|| ApiError::Rejected {
            status: "fail".to_string(),
        })
    }
}

#[async_trait]
impl HeartApi for FakeApi {
    async fn message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError> {
        self.record(format!("detail:{id}"));
        self.lookup(&self.received, id).await
    }

    async fn sent_message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError> {
        self.record(format!("sent:{id}"));
        self.lookup(&self.sent, id).await
    }

    async fn respond_heart(&self, response: &HeartResponse) -> Result<EmojiReaction, ApiError> {
        self.record(format!("emoji:{}:{}", response.message_id, response.emoji_id));
        let url = self.reaction_url.lock().unwrap().clone();
        url.map(|emoji_url| EmojiReaction { emoji_url })
            .ok_or_else(|| ApiError::Rejected {
                status: "fail".to_string(),
            })
    }

    async fn report_message(&self, id: MessageId, content: &str) -> Result<(), ApiError> {
        self.record(format!("report:{id}:{content}"));
        match *self.report_status.lock().unwrap() {
            None => Ok(()),
            Some(code) => Err(ApiError::Status {
                code,
                body: String::new(),
            }),
        }
    }

    async fn delete_temporary_message(&self, id: MessageId) -> Result<(), ApiError> {
        self.record(format!("delete:{id}"));
        if *self.delete_rejected.lock().unwrap() {
            return Err(ApiError::Rejected {
                status: "fail".to_string(),
            });
        }
        Ok(())
    }

    async fn inbox(&self) -> Result<Vec<InboxItem>, ApiError> {
        self.record("inbox".to_string());
        let listing = self.inbox.lock().unwrap().clone();
        listing.ok_or_else(|| ApiError::Rejected {
            status: "fail".to_string(),
        })
    }
}

pub(crate) struct RecordingPrompter {
    pub answer: bool,
    pub alerts: Mutex<Vec<Notice>>,
    pub confirms: Mutex<Vec<Notice>>,
}

impl RecordingPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<Notice> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<Notice> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn alert(&self, notice: Notice) {
        self.alerts.lock().unwrap().push(notice);
    }

    fn confirm(&self, notice: Notice) -> bool {
        self.confirms.lock().unwrap().push(notice);
        self.answer
    }
}

pub(crate) fn id(raw: i64) -> MessageId {
    MessageId::from_raw(raw).unwrap()
}

pub(crate) fn detail(title: &str, emoji_url: Option<&str>) -> MessageDetail {
    MessageDetail {
        title: title.to_string(),
        content: format!("{title} content"),
        created_date: "2024-03-09T12:00:00".to_string(),
        expired_date: "2024-03-10T12:00:00".to_string(),
        heart_id: 1,
        heart_url: "https://cdn.example/heart/1.png".to_string(),
        heart_name: "plain".to_string(),
        short_description: "a plain heart".to_string(),
        emoji_id: if emoji_url.is_some() { 2 } else { 0 },
        emoji_url: emoji_url.map(str::to_string),
        is_stored: false,
    }
}

pub(crate) async fn wait_for(condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend identifier of a single heart message. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Returns `None` for the "no selection" values the UI carries around (`0`, negatives).
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Lenient parse used for persisted and typed-in ids; empty input means no selection.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().and_then(Self::from_raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Received,
    Sent,
    #[serde(alias = "save")]
    Saved,
}

impl ViewMode {
    pub fn uses_sent_endpoint(self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Sent => "sent",
            Self::Saved => "saved",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode `{0}`")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "received" => Ok(Self::Received),
            "sent" => Ok(Self::Sent),
            "saved" | "save" => Ok(Self::Saved),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// Full content of one heart as shown in the read modal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    pub title: String,
    pub content: String,
    pub created_date: String,
    pub expired_date: String,
    pub heart_id: i64,
    pub heart_url: String,
    pub heart_name: String,
    pub short_description: String,
    /// `0` when the receiver has not reacted yet.
    #[serde(default)]
    pub emoji_id: u32,
    #[serde(default)]
    pub emoji_url: Option<String>,
    #[serde(default)]
    pub is_stored: bool,
}

/// One row of the inbox list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InboxItem {
    pub message_id: MessageId,
    pub heart_id: i64,
    pub context: String,
    #[serde(default)]
    pub emoji_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeartResponse {
    pub message_id: MessageId,
    pub emoji_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmojiReaction {
    #[serde(default)]
    pub emoji_url: String,
}

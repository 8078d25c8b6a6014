use crate::{MessageState, StateError};
use hearting_core::MessageId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The three flags that survive a restart. The empty selection is stored as
/// `""`, the same shape the web client keeps in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFlags {
    #[serde(default)]
    pub read_message: bool,
    #[serde(default, with = "selection")]
    pub selected_message_id: Option<MessageId>,
    #[serde(default)]
    pub is_my_board: bool,
}

impl From<&MessageState> for PersistedFlags {
    fn from(state: &MessageState) -> Self {
        Self {
            read_message: state.read_message,
            selected_message_id: state.selected_message_id,
            is_my_board: state.is_my_board,
        }
    }
}

impl PersistedFlags {
    pub fn into_state(self) -> MessageState {
        MessageState {
            read_message: self.read_message,
            selected_message_id: self.selected_message_id,
            is_my_board: self.is_my_board,
            ..MessageState::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlagFile {
    path: PathBuf,
}

impl FlagFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a first run, not an error.
    pub fn load(&self) -> Result<PersistedFlags, StateError> {
        if !self.path.exists() {
            return Ok(PersistedFlags::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, flags: &PersistedFlags) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(flags)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

mod selection {
    use hearting_core::MessageId;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<MessageId>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.serialize_i64(id.get()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<MessageId>, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(raw)) => MessageId::from_raw(raw),
            Some(Raw::Text(raw)) => MessageId::parse(&raw),
            None => None,
        })
    }
}

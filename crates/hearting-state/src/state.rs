use hearting_core::MessageId;

/// One immutable snapshot of the UI state shared by the inbox list and the
/// read modal. Transitions never validate; callers keep combinations coherent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageState {
    /// The read modal is open.
    pub read_message: bool,
    pub selected_message_id: Option<MessageId>,
    pub is_my_board: bool,
    pub is_open_emoji_list: bool,
    /// `0` means nothing picked.
    pub selected_emoji_id: u32,
    pub selected_emoji_url: String,
    pub is_open_reporting: bool,
    /// Bumped by the store on every effective change.
    pub rev: u64,
}

impl MessageState {
    /// List click: select the message and open the read modal.
    pub fn open_message(&self, id: MessageId) -> Self {
        Self {
            read_message: true,
            selected_message_id: Some(id),
            ..self.clone()
        }
    }

    pub fn with_read(&self, read_message: bool) -> Self {
        Self {
            read_message,
            ..self.clone()
        }
    }

    pub fn with_selected(&self, selected_message_id: Option<MessageId>) -> Self {
        Self {
            selected_message_id,
            ..self.clone()
        }
    }

    pub fn with_my_board(&self, is_my_board: bool) -> Self {
        Self {
            is_my_board,
            ..self.clone()
        }
    }

    pub fn close_modal(&self) -> Self {
        Self {
            read_message: false,
            is_open_emoji_list: false,
            ..self.clone()
        }
    }

    /// Clears everything scoped to one opened message.
    pub fn teardown_modal(&self) -> Self {
        Self {
            is_open_emoji_list: false,
            selected_emoji_id: 0,
            selected_emoji_url: String::new(),
            ..self.clone()
        }
    }

    pub fn toggle_emoji_list(&self) -> Self {
        self.with_emoji_list(!self.is_open_emoji_list)
    }

    pub fn with_emoji_list(&self, is_open_emoji_list: bool) -> Self {
        Self {
            is_open_emoji_list,
            ..self.clone()
        }
    }

    pub fn select_emoji(&self, selected_emoji_id: u32) -> Self {
        Self {
            selected_emoji_id,
            ..self.clone()
        }
    }

    pub fn with_emoji_url(&self, url: impl Into<String>) -> Self {
        Self {
            selected_emoji_url: url.into(),
            ..self.clone()
        }
    }

    pub fn open_reporting(&self) -> Self {
        Self {
            is_open_reporting: true,
            ..self.clone()
        }
    }

    pub fn close_reporting(&self) -> Self {
        Self {
            is_open_reporting: false,
            ..self.clone()
        }
    }

    /// Equality that ignores the revision counter.
    pub fn same_contents(&self, other: &Self) -> bool {
        Self {
            rev: other.rev,
            ..self.clone()
        } == *other
    }
}

//! Outbound reply command and its one-shot keyboard.

use serde::{Deserialize, Serialize};

use super::ConversationId;

/// What pressing a keyboard button sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonKind {
    /// Sends the label as text.
    Text,
    /// Asks the client to share the user's location.
    RequestLocation,
}

/// One keyboard option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub label: String,
    pub kind: ButtonKind,
}

/// Ordered list of selectable options, shown once and then hidden by the client.
///
/// Holds at most one [`ButtonKind::RequestLocation`] button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keyboard {
    buttons: Vec<KeyboardButton>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard with one text button per label, in order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels.into_iter().fold(Self::new(), |kb, l| kb.button(l))
    }

    /// Appends a text button.
    pub fn button(mut self, label: impl Into<String>) -> Self {
        self.buttons.push(KeyboardButton {
            label: label.into(),
            kind: ButtonKind::Text,
        });
        self
    }

    /// Appends the location-request button, dropping any earlier one.
    pub fn location_button(mut self, label: impl Into<String>) -> Self {
        self.buttons
            .retain(|b| b.kind != ButtonKind::RequestLocation);
        self.buttons.push(KeyboardButton {
            label: label.into(),
            kind: ButtonKind::RequestLocation,
        });
        self
    }

    pub fn buttons(&self) -> &[KeyboardButton] {
        &self.buttons
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// Instruction to send `text` (and optionally a keyboard) to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyCommand {
    pub conversation_id: ConversationId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl ReplyCommand {
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

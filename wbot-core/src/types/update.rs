//! Inbound update, its id and the conversation it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Payload;

/// Source-assigned update id. Strictly increasing in delivery order; gaps are normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UpdateId(pub i64);

impl UpdateId {
    /// The id right after this one; the cursor value once this update has been taken. Saturates at
    /// `i64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable id of a conversation (a Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an update carries. Only `Message` reaches the conversation state machine; `Other` exists so
/// the cursor still moves past updates the bot does not handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdateKind {
    Message {
        conversation_id: ConversationId,
        payload: Payload,
    },
    Other,
}

/// A single inbound event from the update source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub id: UpdateId,
    pub kind: UpdateKind,
}

impl Update {
    /// A chat message update.
    pub fn message(id: i64, conversation_id: i64, payload: Payload) -> Self {
        Self {
            id: UpdateId(id),
            kind: UpdateKind::Message {
                conversation_id: ConversationId(conversation_id),
                payload,
            },
        }
    }

    /// An update the bot does not handle (only advances the cursor).
    pub fn other(id: i64) -> Self {
        Self {
            id: UpdateId(id),
            kind: UpdateKind::Other,
        }
    }

    /// Conversation id for message updates.
    pub fn conversation_id(&self) -> Option<ConversationId> {
        match &self.kind {
            UpdateKind::Message {
                conversation_id, ..
            } => Some(*conversation_id),
            UpdateKind::Other => None,
        }
    }
}

/// Converts a transport-specific update into a core [`Update`].
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Update;
}

//! Core types: updates, payloads, reply commands and keyboards.
//!
//! One file per main type, like the rest of the workspace.

mod payload;
mod reply;
mod update;

pub use payload::{Coordinates, Payload};
pub use reply::{ButtonKind, Keyboard, KeyboardButton, ReplyCommand};
pub use update::{ConversationId, ToCoreUpdate, Update, UpdateId, UpdateKind};

//! Adapters between teloxide types and wbot_core types.
//! Depends only on teloxide and wbot_core type definitions.

use teloxide::types::{
    ButtonRequest, KeyboardButton as TgKeyboardButton, KeyboardMarkup, Message as TgMessage,
    Update as TgUpdate, UpdateKind as TgUpdateKind,
};
use wbot_core::{ButtonKind, Keyboard, Payload, ToCoreUpdate, Update};

/// Wraps a teloxide Update for conversion to core [`Update`].
pub struct TelegramUpdateWrapper<'a>(pub &'a TgUpdate);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Update {
        let id = i64::from(self.0.id.0);
        match &self.0.kind {
            TgUpdateKind::Message(msg) => Update::message(id, msg.chat.id.0, payload_of(msg)),
            _ => Update::other(id),
        }
    }
}

/// Text wins over location; anything else is unsupported.
fn payload_of(msg: &TgMessage) -> Payload {
    if let Some(text) = msg.text() {
        return Payload::text(text);
    }
    if let Some(location) = msg.location() {
        return Payload::location(location.latitude, location.longitude);
    }
    Payload::Unsupported
}

/// One button per row, hidden after one use.
pub fn to_reply_markup(keyboard: &Keyboard) -> KeyboardMarkup {
    let rows: Vec<Vec<TgKeyboardButton>> = keyboard
        .buttons()
        .iter()
        .map(|b| {
            let button = TgKeyboardButton::new(b.label.clone());
            let button = match b.kind {
                ButtonKind::Text => button,
                ButtonKind::RequestLocation => button.request(ButtonRequest::Location),
            };
            vec![button]
        })
        .collect();
    KeyboardMarkup::new(rows).one_time_keyboard()
}

//! # wbot-telegram
//!
//! Telegram transport layer: adapters from teloxide updates to core types, reply keyboard markup, a
//! [`wbot_core::UpdateSource`] implementation over `getUpdates`/`sendMessage`, and minimal config.
//! No conversation logic lives here.

mod adapters;
mod config;
mod update_source;

pub use adapters::{to_reply_markup, TelegramUpdateWrapper};
pub use config::{TelegramConfig, CLIENT_TIMEOUT_SECS};
pub use update_source::TelegramUpdateSource;

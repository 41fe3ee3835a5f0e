//! # wbot-core
//!
//! Core types and traits for the weather bot: [`UpdateSource`], [`WeatherLookup`], updates, payloads,
//! reply commands and keyboards, error types and tracing initialization. Transport-agnostic; used by
//! wbot-telegram, weather-client and weather-bot.

pub mod error;
pub mod logger;
pub mod source;
pub mod types;
pub mod weather;

pub use error::{LookupError, Result, WbotError};
pub use logger::init_tracing;
pub use source::UpdateSource;
pub use types::{
    ButtonKind, ConversationId, Coordinates, Keyboard, KeyboardButton, Payload, ReplyCommand,
    ToCoreUpdate, Update, UpdateId, UpdateKind,
};
pub use weather::{Place, WeatherLookup, WeatherSummary};

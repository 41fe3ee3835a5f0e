//! # Weather bot
//!
//! Polls Telegram for updates and walks each chat through a small dialog: `/start`, `/weather`, pick a
//! city or share a location, get the current weather, repeat or `/end`.
//!
//! [`PollLoop`] owns the update cursor and drives the [`Dispatcher`], which keeps per-chat
//! [`ConversationState`] in a bounded [`ConversationStore`] and runs the [`ConversationMachine`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod dispatcher;
pub mod poll_loop;
pub mod runner;
pub mod store;

pub use catalog::CityCatalog;
pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig, ConversationConfig, PollingConfig, WeatherConfig};
pub use conversation::{ConversationMachine, ConversationState, Input, Transition};
pub use dispatcher::{DispatchReport, Dispatcher};
pub use poll_loop::{Cursor, PollLoop};
pub use runner::{build_poll_loop, build_weather_client, cancel_on_ctrl_c, run_bot, telegram_config};
pub use store::ConversationStore;

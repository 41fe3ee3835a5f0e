//! Per-conversation dialog: states, input classification, and the transition function.
//!
//! ```text
//! Idle --/start--> Started --/weather--> AwaitingCitySelection --city|location--> (lookup, stay)
//!   ^                 |                          |
//!   +------/end-------+-------------/end---------+
//! ```
//!
//! `/start` restarts the dialog from any state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use wbot_core::{
    ConversationId, Coordinates, Keyboard, LookupError, Payload, Place, ReplyCommand,
    WeatherLookup,
};

use crate::catalog::CityCatalog;

pub const CMD_START: &str = "/start";
pub const CMD_WEATHER: &str = "/weather";
pub const CMD_END: &str = "/end";
/// Commands start with this marker.
pub const COMMAND_MARKER: char = '/';
pub const SHARE_LOCATION_LABEL: &str = "Share Location";

pub const GREETING: &str = "Read the instructions carefully";
pub const INVALID_COMMAND: &str = "Invalid command";
pub const SELECT_CITY: &str = "Select a city";
pub const ANOTHER_CITY: &str = "Do you wish to know the weather in another city?";
pub const RESTART_HINT: &str = "Please, enter /start if you wish to know the weather";
pub const ASK_ABOUT_WEATHER: &str = "You can ask me about the weather";
pub const FALLBACK: &str = "Sorry, I could not get the weather. Please select an option";

/// Dialog state of one conversation. Absent conversations are `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    Started,
    AwaitingCitySelection,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationState::Idle => "idle",
            ConversationState::Started => "started",
            ConversationState::AwaitingCitySelection => "awaiting_city_selection",
        };
        f.write_str(s)
    }
}

/// Input category after matching the payload against commands and the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    Start,
    Weather,
    End,
    City(&'a str),
    Location(Coordinates),
    UnknownCommand(&'a str),
    /// Free text that is neither a command nor a catalog city.
    Text(&'a str),
    /// Neither text nor coordinates.
    Unsupported,
}

impl<'a> Input<'a> {
    pub fn classify(payload: &'a Payload, catalog: &CityCatalog) -> Self {
        match payload {
            Payload::Text(text) => match text.as_str() {
                CMD_START => Input::Start,
                CMD_WEATHER => Input::Weather,
                CMD_END => Input::End,
                t if catalog.contains(t) => Input::City(t),
                t if t.starts_with(COMMAND_MARKER) => Input::UnknownCommand(t),
                t => Input::Text(t),
            },
            Payload::Location(c) => Input::Location(*c),
            Payload::Unsupported => Input::Unsupported,
        }
    }
}

/// Result of one step: the state to store and the replies to send, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: ConversationState,
    pub replies: Vec<ReplyCommand>,
}

impl Transition {
    fn to(next: ConversationState, replies: Vec<ReplyCommand>) -> Self {
        Self { next, replies }
    }
}

/// The conversation state machine. Stateless itself; the caller owns each conversation's state.
pub struct ConversationMachine {
    catalog: CityCatalog,
    lookup: Arc<dyn WeatherLookup>,
    lookup_timeout: Duration,
}

impl ConversationMachine {
    pub fn new(
        catalog: CityCatalog,
        lookup: Arc<dyn WeatherLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            lookup,
            lookup_timeout,
        }
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Keyboard offered after `/start` and on the default reply.
    pub fn weather_keyboard(&self) -> Keyboard {
        Keyboard::from_labels([CMD_WEATHER])
    }

    /// Catalog cities, the location request, then `/end`.
    pub fn city_keyboard(&self) -> Keyboard {
        Keyboard::from_labels(self.catalog.iter())
            .location_button(SHARE_LOCATION_LABEL)
            .button(CMD_END)
    }

    /// Runs one transition. A failed lookup is returned as an error and leaves the caller's state as is.
    pub async fn step(
        &self,
        conversation_id: ConversationId,
        state: ConversationState,
        payload: &Payload,
    ) -> Result<Transition, LookupError> {
        use self::ConversationState::*;

        let input = Input::classify(payload, &self.catalog);
        debug!(
            chat_id = %conversation_id,
            state = %state,
            input = ?input,
            "Conversation step"
        );
        let reply = |text: String| ReplyCommand::text(conversation_id, text);

        let transition = match (state, input) {
            (_, Input::Start) => Transition::to(
                Started,
                vec![reply(GREETING.to_string()).with_keyboard(self.weather_keyboard())],
            ),
            (Idle, _) => {
                let text = match payload.as_text() {
                    Some(t) => format!("{} {}", INVALID_COMMAND, t),
                    None => INVALID_COMMAND.to_string(),
                };
                Transition::to(Idle, vec![reply(text)])
            }
            (Started | AwaitingCitySelection, Input::End) => {
                Transition::to(Idle, vec![reply(RESTART_HINT.to_string())])
            }
            (AwaitingCitySelection, Input::City(city)) => {
                let place = Place::Name(city.to_string());
                self.answer(conversation_id, &place).await?
            }
            (AwaitingCitySelection, Input::Location(c)) => {
                self.answer(conversation_id, &Place::Coordinates(c)).await?
            }
            (Started, input) => self.started_reply(conversation_id, input),
            (AwaitingCitySelection, input) => Transition::to(
                AwaitingCitySelection,
                self.started_reply(conversation_id, input).replies,
            ),
        };
        Ok(transition)
    }

    /// Started-state behaviour for everything except `/start` and `/end`.
    fn started_reply(&self, conversation_id: ConversationId, input: Input<'_>) -> Transition {
        match input {
            Input::Weather => Transition::to(
                ConversationState::AwaitingCitySelection,
                vec![ReplyCommand::text(conversation_id, SELECT_CITY)
                    .with_keyboard(self.city_keyboard())],
            ),
            Input::UnknownCommand(cmd) => Transition::to(
                ConversationState::Started,
                vec![ReplyCommand::text(
                    conversation_id,
                    format!("Unknown command {}, use {} or {}", cmd, CMD_WEATHER, CMD_END),
                )],
            ),
            _ => Transition::to(
                ConversationState::Started,
                vec![ReplyCommand::text(conversation_id, ASK_ABOUT_WEATHER)
                    .with_keyboard(self.weather_keyboard())],
            ),
        }
    }

    /// Looks the weather up and loops back to city selection.
    async fn answer(
        &self,
        conversation_id: ConversationId,
        place: &Place,
    ) -> Result<Transition, LookupError> {
        info!(chat_id = %conversation_id, place = %place, "Weather requested");
        let summary = tokio::time::timeout(self.lookup_timeout, self.lookup.resolve(place))
            .await
            .map_err(|_| LookupError::Timeout(self.lookup_timeout))??;
        Ok(Transition::to(
            ConversationState::AwaitingCitySelection,
            vec![
                ReplyCommand::text(conversation_id, summary.to_string()),
                ReplyCommand::text(conversation_id, ANOTHER_CITY)
                    .with_keyboard(self.city_keyboard()),
            ],
        ))
    }

    /// Reply sent when a step fails; offers the keyboard that fits the unchanged state.
    pub fn fallback(
        &self,
        conversation_id: ConversationId,
        state: ConversationState,
    ) -> ReplyCommand {
        let reply = ReplyCommand::text(conversation_id, FALLBACK);
        match state {
            ConversationState::Idle => reply,
            ConversationState::Started => reply.with_keyboard(self.weather_keyboard()),
            ConversationState::AwaitingCitySelection => reply.with_keyboard(self.city_keyboard()),
        }
    }
}

//! Shared fakes for weather-bot integration tests.
//!
//! [`MockSource`] serves scripted batches, honours the cursor like Telegram does (never returns ids
//! below it), and records every fetch cursor and sent reply. [`MockLookup`] answers from a fixed
//! table and fails for unknown places.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wbot_core::{
    ConversationId, LookupError, Place, ReplyCommand, Result, Update, UpdateId, UpdateSource,
    WbotError, WeatherLookup, WeatherSummary,
};

/// One scripted answer to `fetch`.
pub enum FetchStep {
    Batch(Vec<Update>),
    Fail(String),
}

#[derive(Default)]
struct SourceState {
    script: VecDeque<FetchStep>,
    cursors: Vec<Option<UpdateId>>,
    sent: Vec<ReplyCommand>,
    /// Sends to this chat fail.
    failing_chat: Option<ConversationId>,
}

#[derive(Default)]
pub struct MockSource {
    state: Mutex<SourceState>,
}

impl MockSource {
    pub fn new(script: Vec<FetchStep>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SourceState {
                script: script.into(),
                ..Default::default()
            }),
        })
    }

    pub fn fail_sends_to(&self, chat: i64) {
        self.state.lock().unwrap().failing_chat = Some(ConversationId(chat));
    }

    pub fn cursors(&self) -> Vec<Option<UpdateId>> {
        self.state.lock().unwrap().cursors.clone()
    }

    pub fn sent(&self) -> Vec<ReplyCommand> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_texts(&self, chat: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|r| r.conversation_id == ConversationId(chat))
            .map(|r| r.text)
            .collect()
    }
}

#[async_trait]
impl UpdateSource for MockSource {
    async fn fetch(&self, cursor: Option<UpdateId>) -> Result<Vec<Update>> {
        let mut state = self.state.lock().unwrap();
        state.cursors.push(cursor);
        match state.script.pop_front() {
            Some(FetchStep::Batch(batch)) => Ok(batch
                .into_iter()
                .filter(|u| cursor.map_or(true, |c| u.id >= c))
                .collect()),
            Some(FetchStep::Fail(msg)) => Err(WbotError::Transport(msg)),
            None => Ok(Vec::new()),
        }
    }

    async fn send(&self, reply: &ReplyCommand) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.failing_chat == Some(reply.conversation_id) {
            return Err(WbotError::Transport("chat not found".to_string()));
        }
        state.sent.push(reply.clone());
        Ok(())
    }
}

/// Lookup answering for London, Kazan and coordinates; everything else is NotFound.
#[derive(Default)]
pub struct MockLookup {
    calls: Mutex<Vec<Place>>,
}

impl MockLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Place> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherLookup for MockLookup {
    async fn resolve(&self, place: &Place) -> std::result::Result<WeatherSummary, LookupError> {
        self.calls.lock().unwrap().push(place.clone());
        let summary = |t: f64, status: &str, name: &str| WeatherSummary {
            temperature_c: t,
            status: status.to_string(),
            place: name.to_string(),
        };
        match place {
            Place::Name(n) if n == "London" => Ok(summary(11.47, "light rain", "London")),
            Place::Name(n) if n == "Kazan" => Ok(summary(-3.0, "snow", "Kazan")),
            Place::Name(n) => Err(LookupError::NotFound(n.clone())),
            Place::Coordinates(_) => Ok(summary(28.04, "few clouds", "Hong Kong")),
        }
    }
}

/// Config for tests: default catalog, 50 ms cadence, no env access.
pub fn test_config() -> weather_bot::BotConfig {
    use weather_bot::{
        BaseConfig, BotConfig, CityCatalog, ConversationConfig, PollingConfig, WeatherConfig,
    };

    BotConfig {
        base: BaseConfig {
            bot_token: "test_bot_token_12345".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
        },
        polling: PollingConfig {
            interval_ms: 50,
            telegram_timeout_secs: 0,
        },
        weather: WeatherConfig {
            api_key: "test_owm_key_0123456789".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            lookup_timeout_secs: 5,
        },
        conversation: ConversationConfig {
            cities: CityCatalog::default(),
            capacity: 100,
        },
    }
}

/// Dispatcher over the default catalog.
pub fn dispatcher(
    source: Arc<MockSource>,
    lookup: Arc<MockLookup>,
) -> weather_bot::Dispatcher {
    use std::time::Duration;
    use weather_bot::{CityCatalog, ConversationMachine, ConversationStore, Dispatcher};

    let machine = ConversationMachine::new(CityCatalog::default(), lookup, Duration::from_secs(5));
    Dispatcher::new(machine, ConversationStore::new(100), source)
}

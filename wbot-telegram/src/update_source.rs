//! [`TelegramUpdateSource`]: getUpdates with an explicit offset, sendMessage with an optional
//! one-time reply keyboard. Implements [`wbot_core::UpdateSource`].

use async_trait::async_trait;
use teloxide::payloads::{GetUpdatesSetters, SendMessageSetters};
use teloxide::requests::Requester;
use teloxide::types::ChatId;
use tracing::{debug, instrument};
use wbot_core::{ReplyCommand, Result, ToCoreUpdate, Update, UpdateId, UpdateSource, WbotError};

use crate::adapters::{to_reply_markup, TelegramUpdateWrapper};

/// Telegram Bot API as an update source.
pub struct TelegramUpdateSource {
    bot: teloxide::Bot,
    poll_timeout_secs: u32,
}

impl TelegramUpdateSource {
    /// Creates a source from an existing teloxide Bot. `poll_timeout_secs` must stay below the bot
    /// client's HTTP timeout ([`crate::CLIENT_TIMEOUT_SECS`] for `Bot::new`).
    pub fn new(bot: teloxide::Bot, poll_timeout_secs: u32) -> Self {
        Self {
            bot,
            poll_timeout_secs,
        }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn offset_of(cursor: UpdateId) -> Result<i32> {
    i32::try_from(cursor.0)
        .map_err(|_| WbotError::Transport(format!("update cursor out of range: {}", cursor)))
}

#[async_trait]
impl UpdateSource for TelegramUpdateSource {
    #[instrument(skip(self))]
    async fn fetch(&self, cursor: Option<UpdateId>) -> Result<Vec<Update>> {
        let mut request = self.bot.get_updates().timeout(self.poll_timeout_secs);
        if let Some(cursor) = cursor {
            request = request.offset(offset_of(cursor)?);
        }
        let raw = request
            .await
            .map_err(|e| WbotError::Transport(e.to_string()))?;

        let mut updates: Vec<Update> = raw
            .iter()
            .map(|u| TelegramUpdateWrapper(u).to_core())
            .collect();
        updates.sort_by_key(|u| u.id);
        debug!(count = updates.len(), "Fetched updates");
        Ok(updates)
    }

    async fn send(&self, reply: &ReplyCommand) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(reply.conversation_id.0), reply.text.clone());
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(to_reply_markup(keyboard));
        }
        request
            .await
            .map_err(|e| WbotError::Transport(e.to_string()))?;
        Ok(())
    }
}

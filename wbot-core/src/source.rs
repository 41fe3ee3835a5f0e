//! Update source abstraction: fetch batches after a cursor and send replies.
//!
//! [`UpdateSource`] is transport-agnostic; wbot-telegram implements it with teloxide, tests use
//! in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ReplyCommand, Update, UpdateId};

/// Inbound batches plus the outbound reply channel of one messaging platform.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Returns updates with id >= `cursor` (all available when `None`), in ascending id order.
    /// Acknowledgment is implicit: the next call passes a larger cursor.
    async fn fetch(&self, cursor: Option<UpdateId>) -> Result<Vec<Update>>;

    /// Sends one reply. Best-effort; callers log failures and move on.
    async fn send(&self, reply: &ReplyCommand) -> Result<()>;
}

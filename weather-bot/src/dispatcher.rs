//! Dispatcher: runs each update of a batch through the conversation state machine, in id order.
//!
//! One failing update never stops the batch. A failed step leaves the conversation's state untouched
//! and sends the fallback reply; failed sends are logged and skipped.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use wbot_core::{ConversationId, Payload, ReplyCommand, Update, UpdateKind, UpdateSource};

use crate::conversation::ConversationMachine;
use crate::store::ConversationStore;

/// Counters for one dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Message updates whose transition succeeded.
    pub handled: usize,
    /// Message updates that fell back after a failed step.
    pub failed: usize,
    /// Non-message updates.
    pub skipped: usize,
    /// Replies the outbound channel rejected.
    pub send_errors: usize,
}

/// Owns the conversation store and sends replies through the update source.
pub struct Dispatcher {
    machine: ConversationMachine,
    store: ConversationStore,
    outbound: Arc<dyn UpdateSource>,
}

impl Dispatcher {
    pub fn new(
        machine: ConversationMachine,
        store: ConversationStore,
        outbound: Arc<dyn UpdateSource>,
    ) -> Self {
        Self {
            machine,
            store,
            outbound,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    /// Processes `batch` in ascending id order (stable for equal ids).
    #[instrument(skip(self, batch), fields(batch_len = batch.len()))]
    pub async fn dispatch(&mut self, mut batch: Vec<Update>) -> DispatchReport {
        batch.sort_by_key(|u| u.id);
        let mut report = DispatchReport::default();

        for update in batch {
            match update.kind {
                UpdateKind::Message {
                    conversation_id,
                    payload,
                } => {
                    info!(
                        update_id = %update.id,
                        chat_id = %conversation_id,
                        payload = payload.kind(),
                        "step: handling update"
                    );
                    self.handle_message(conversation_id, &payload, &mut report)
                        .await;
                }
                UpdateKind::Other => {
                    debug!(update_id = %update.id, "Skipping non-message update");
                    report.skipped += 1;
                }
            }
        }

        info!(
            handled = report.handled,
            failed = report.failed,
            skipped = report.skipped,
            send_errors = report.send_errors,
            "step: batch dispatched"
        );
        report
    }

    async fn handle_message(
        &mut self,
        conversation_id: ConversationId,
        payload: &Payload,
        report: &mut DispatchReport,
    ) {
        let state = self.store.get(conversation_id);
        match self.machine.step(conversation_id, state, payload).await {
            Ok(transition) => {
                if transition.next != state {
                    info!(
                        chat_id = %conversation_id,
                        from = %state,
                        to = %transition.next,
                        "Conversation state changed"
                    );
                }
                self.store.set(conversation_id, transition.next);
                report.handled += 1;
                self.send_all(&transition.replies, report).await;
            }
            Err(e) => {
                warn!(
                    chat_id = %conversation_id,
                    state = %state,
                    error = %e,
                    "Conversation step failed, sending fallback"
                );
                report.failed += 1;
                let fallback = self.machine.fallback(conversation_id, state);
                self.send_all(std::slice::from_ref(&fallback), report).await;
            }
        }
    }

    async fn send_all(&self, replies: &[ReplyCommand], report: &mut DispatchReport) {
        for reply in replies {
            if let Err(e) = self.outbound.send(reply).await {
                error!(
                    chat_id = %reply.conversation_id,
                    error = %e,
                    "Failed to send reply"
                );
                report.send_errors += 1;
            }
        }
    }
}

//! Poll loop: fetch → advance cursor → dispatch → sleep, until cancelled.
//!
//! The cursor moves past a batch before the batch is dispatched, so a batch is handed to the
//! dispatcher at most once. Updates of a batch interrupted by a crash are lost.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use wbot_core::{Result, Update, UpdateId, UpdateSource};

use crate::dispatcher::{DispatchReport, Dispatcher};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Smallest update id not yet taken. `None` until the first non-empty batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(Option<UpdateId>);

impl Cursor {
    pub fn position(&self) -> Option<UpdateId> {
        self.0
    }

    /// True if `id` was already taken.
    pub fn covers(&self, id: UpdateId) -> bool {
        self.0.is_some_and(|c| id < c)
    }

    /// Moves to `max(batch ids) + 1`. Never moves backwards; returns whether it moved.
    pub fn advance_past(&mut self, batch: &[Update]) -> bool {
        let Some(next) = batch.iter().map(|u| u.id).max().map(UpdateId::next) else {
            return false;
        };
        if self.0.is_some_and(|c| next <= c) {
            return false;
        }
        self.0 = Some(next);
        true
    }
}

/// Drives an [`UpdateSource`] and a [`Dispatcher`] on a fixed cadence.
pub struct PollLoop {
    source: Arc<dyn UpdateSource>,
    dispatcher: Dispatcher,
    cursor: Cursor,
    interval: Duration,
}

impl PollLoop {
    pub fn new(source: Arc<dyn UpdateSource>, dispatcher: Dispatcher, interval: Duration) -> Self {
        Self {
            source,
            dispatcher,
            cursor: Cursor::default(),
            interval,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// One cycle without the sleep. Fetch errors are returned and leave the cursor unchanged.
    #[instrument(skip(self))]
    pub async fn poll_once(&mut self) -> Result<DispatchReport> {
        let fetched = self.source.fetch(self.cursor.position()).await?;
        Ok(self.take(fetched).await)
    }

    /// Drops ids behind the cursor, advances it past the rest, then dispatches them.
    async fn take(&mut self, fetched: Vec<Update>) -> DispatchReport {
        let total = fetched.len();
        let batch: Vec<Update> = fetched
            .into_iter()
            .filter(|u| !self.cursor.covers(u.id))
            .collect();
        if batch.len() < total {
            warn!(
                dropped = total - batch.len(),
                "Source returned updates behind the cursor; dropped"
            );
        }
        if batch.is_empty() {
            debug!("No new updates");
            return DispatchReport::default();
        }

        self.cursor.advance_past(&batch);
        debug!(cursor = ?self.cursor.position(), "Cursor advanced");
        self.dispatcher.dispatch(batch).await
    }

    /// Runs until `cancel` fires. An in-flight fetch is abandoned on cancellation (the cursor has not
    /// moved yet); a batch being dispatched always completes.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(interval_ms = self.interval.as_millis() as u64, "Poll loop started");
        loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                fetched = self.source.fetch(self.cursor.position()) => fetched,
            };
            match fetched {
                Ok(batch) => {
                    self.take(batch).await;
                }
                Err(e) => error!(error = %e, "Failed to fetch updates"),
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!(cursor = ?self.cursor.position(), "Poll loop stopped");
    }
}

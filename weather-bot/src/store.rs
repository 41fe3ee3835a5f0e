//! In-memory conversation store, bounded with least-recently-used eviction.
//!
//! Idle conversations are not kept at all: a missing entry already reads as `Idle`, so `/end` frees
//! the slot. When more than `capacity` conversations are active the least recently touched one is
//! evicted and simply starts over from `Idle` on its next message.

use std::collections::HashMap;

use tracing::debug;
use wbot_core::ConversationId;

use crate::conversation::ConversationState;

pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug)]
struct Entry {
    state: ConversationState,
    last_used: u64,
}

/// Conversation id → dialog state. Owned by the dispatcher; no interior locking.
#[derive(Debug)]
pub struct ConversationStore {
    entries: HashMap<ConversationId, Entry>,
    capacity: usize,
    clock: u64,
}

impl ConversationStore {
    /// Creates a store that keeps at most `capacity` non-idle conversations (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Current state (default `Idle`); marks the conversation as recently used.
    pub fn get(&mut self, id: ConversationId) -> ConversationState {
        let now = self.tick();
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.last_used = now;
                entry.state
            }
            None => ConversationState::Idle,
        }
    }

    /// Stores `state`; `Idle` removes the entry.
    pub fn set(&mut self, id: ConversationId, state: ConversationState) {
        if state == ConversationState::Idle {
            self.entries.remove(&id);
            return;
        }
        let now = self.tick();
        self.entries.insert(
            id,
            Entry {
                state,
                last_used: now,
            },
        );
        if self.entries.len() > self.capacity {
            self.evict_least_recent();
        }
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(id, _)| *id);
        if let Some(id) = oldest {
            self.entries.remove(&id);
            debug!(chat_id = %id, capacity = self.capacity, "Evicted least recently used conversation");
        }
    }

    /// Number of non-idle conversations held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

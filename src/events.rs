use std::collections::VecDeque;

use crate::sound::SoundId;

/// Manager-level lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundEvent {
    /// A sound was created and appended to the registry.
    Added { id: SoundId, key: String },
    /// A sound was removed from the registry and its resources released.
    Removed { id: SoundId, key: String },
    PauseAll,
    ResumeAll,
    StopAll,
    /// The manager was destroyed; no further events follow.
    Destroyed,
}

/// FIFO event channel owned by the manager, independent of the host's own
/// event system. The host drains it, typically once per frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<SoundEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: SoundEvent) {
        self.queue.push_back(event);
    }

    /// Pop the oldest pending event.
    pub fn poll(&mut self) -> Option<SoundEvent> {
        self.queue.pop_front()
    }

    /// Drain all pending events in emission order.
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, SoundEvent> {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

//! Bounded event queue between input callbacks and the main loop
//!
//! Producers run in interrupt or USB callback context, the single consumer is
//! the report arbiter on the main loop. The ring indices are only touched
//! inside a critical section, and only for the duration of the index update.

use core::cell::RefCell;
use critical_section::Mutex;
use heapless::spsc::Queue;

use crate::types::Event;

/// Ring slots. One slot stays free to tell full from empty.
pub const QUEUE_SLOTS: usize = 10;

/// Interrupt-safe FIFO of [`Event`]s with drop-on-full policy
pub struct EventQueue {
    ring: Mutex<RefCell<Queue<Event, QUEUE_SLOTS>>>,
}

impl EventQueue {
    /// Create an empty queue, usable in a `static`
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(Queue::new())),
        }
    }

    /// Append an event. Returns false and discards the event if the queue is full.
    pub fn push(&self, event: Event) -> bool {
        let accepted =
            critical_section::with(|cs| self.ring.borrow_ref_mut(cs).enqueue(event).is_ok());

        #[cfg(feature = "defmt")]
        if !accepted {
            defmt::warn!("Event queue full, dropped {:?}", event);
        }

        accepted
    }

    /// Take the oldest event, or [`Event::None`] if the queue is empty
    pub fn pop(&self) -> Event {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).dequeue())
            .unwrap_or(Event::None)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.ring.borrow_ref(cs).is_empty())
    }

    pub fn is_full(&self) -> bool {
        critical_section::with(|cs| self.ring.borrow_ref(cs).is_full())
    }

    /// Usable capacity (`QUEUE_SLOTS - 1`)
    pub const fn capacity(&self) -> usize {
        QUEUE_SLOTS - 1
    }

    /// Drop everything queued
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            while ring.dequeue().is_some() {}
        });
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

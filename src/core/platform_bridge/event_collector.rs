//=========================================================================
// Event Collector
//=========================================================================
//
// Drains queued input events into the router with a per-pump bound.
//
// Architecture:
//   Receiver<InputEvent> → pump() → InputRouter::dispatch() → PumpControl
//
// Bounded draining keeps one pump from starving the host's frame when a
// backend floods the channel; the remainder is picked up next pump.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, InputRouter};

//=== PumpControl =========================================================

/// Result of one pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpControl {
    /// Channel still open; call again next frame.
    Continue,

    /// Every sender is gone and the queue is empty.
    Disconnected,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<InputEvent>,
    max_events: usize,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<InputEvent>, max_events: usize) -> Self {
        Self {
            receiver,
            max_events: max_events.max(1),
        }
    }

    /// Dispatches up to `max_events` pending events to `router`.
    pub(crate) fn pump(&mut self, router: &mut InputRouter) -> PumpControl {
        let mut drained = 0;

        while drained < self.max_events {
            match self.receiver.try_recv() {
                Ok(event) => {
                    router.dispatch(event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!(target: "input", "event channel disconnected");
                    return PumpControl::Disconnected;
                }
            }
        }

        if drained >= self.max_events && !self.receiver.is_empty() {
            warn!(
                target: "input",
                "event queue backlog: drained {} events, {} still queued",
                drained,
                self.receiver.len()
            );
        }

        PumpControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

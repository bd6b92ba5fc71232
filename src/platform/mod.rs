//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit window events into the engine's input channel.
//
// Architecture:
// ```text
//  Host event loop (winit)              Engine (same thread)
//  ┌──────────────────────────┐        ┌──────────────────────┐
//  │  WindowEvent             │        │  Engine::pump()      │
//  │   ↓                      │        │   ↓                  │
//  │  EventTranslator         │        │  InputRouter         │
//  │   ├─ W3C key names       │        │   ↓                  │
//  │   └─ cursor tracking     │        │  user callbacks      │
//  │   ↓                      │        └──────────────────────┘
//  │  PlatformBridge ─────────┼── crossbeam channel ──┘
//  └──────────────────────────┘
// ```
//
// The host owns the window and its event loop; the bridge only forwards.
// A disconnected channel is logged and the event dropped so the host can
// keep running and close its window normally.
//
//=========================================================================

//=== Module Declarations =================================================

mod event_mapper;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::warn;
use winit::event::WindowEvent;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== Public API ==========================================================

pub use input_processor::EventTranslator;

//=== PlatformBridge ======================================================

/// Forwards translated winit events into the engine's event channel.
#[derive(Debug)]
pub struct PlatformBridge {
    translator: EventTranslator,
    sender: Sender<InputEvent>,
}

impl PlatformBridge {
    pub fn new(sender: Sender<InputEvent>) -> Self {
        Self {
            translator: EventTranslator::new(),
            sender,
        }
    }

    /// Translates and forwards a window event. Returns `true` if an event
    /// was queued.
    pub fn forward(&mut self, event: &WindowEvent) -> bool {
        match self.translator.translate(event) {
            Some(input) => self.send(input),
            None => false,
        }
    }

    /// Queues an already translated event.
    ///
    /// Never blocks: a full queue drops the event with a warning.
    pub fn send(&self, input: InputEvent) -> bool {
        match self.sender.try_send(input) {
            Ok(()) => true,
            Err(TrySendError::Full(input)) => {
                warn!(target: "platform", "event queue full, dropping {:?}", input);
                false
            }
            Err(TrySendError::Disconnected(input)) => {
                warn!(target: "platform", "event channel disconnected, dropping {:?}", input);
                false
            }
        }
    }

    pub fn translator(&self) -> &EventTranslator {
        &self.translator
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn forward_queues_translated_events() {
        let (tx, rx) = unbounded();
        let mut bridge = PlatformBridge::new(tx);

        assert!(bridge.forward(&cursor_moved(3.0, 5.0)));
        assert!(!bridge.forward(&WindowEvent::Focused(false)));

        assert_eq!(rx.try_recv(), Ok(InputEvent::MouseMove { x: 3.0, y: 5.0 }));
        assert!(rx.try_recv().is_err());
        assert_eq!(bridge.translator().cursor(), (3.0, 5.0));
    }

    #[test]
    fn full_queue_drops_event() {
        let (tx, rx) = bounded(1);
        let bridge = PlatformBridge::new(tx);

        assert!(bridge.send(InputEvent::key_down("a")));
        assert!(!bridge.send(InputEvent::key_down("b")));
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn disconnected_channel_does_not_panic() {
        let (tx, rx) = unbounded();
        let bridge = PlatformBridge::new(tx);
        drop(rx);

        assert!(!bridge.send(InputEvent::key_down("a")));
    }
}

//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine `InputEvent`s.
//
// Architecture:
//   WindowEvent → EventTranslator → Option<InputEvent> → PlatformBridge
//
// Stateful cursor tracking: winit reports button presses without a
// position, so the last `CursorMoved` position is cached and attached to
// every button event.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::Key;

//=== Internal Dependencies ===============================================

use super::event_mapper::key_name;
use crate::core::input::InputEvent;

//=== EventTranslator =====================================================

/// Converts winit events to engine input events.
#[derive(Debug, Default)]
pub struct EventTranslator {
    cursor: (f32, f32),
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position reported by winit.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Translates one window event; events the router has no use for
    /// yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.key(&event.logical_key, event.state),
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, .. } => Some(self.mouse_button(*state)),
            _ => None,
        }
    }

    //--- Event Processing -------------------------------------------------

    pub fn key(&self, key: &Key, state: ElementState) -> Option<InputEvent> {
        let Some(name) = key_name(key) else {
            trace!(target: "platform", "unnamed key ignored: {:?}", key);
            return None;
        };

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key: name },
            ElementState::Released => InputEvent::KeyUp { key: name },
        })
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> InputEvent {
        self.cursor = (x, y);
        InputEvent::MouseMove { x, y }
    }

    /// Button event at the cached cursor position. Every button counts.
    pub fn mouse_button(&self, state: ElementState) -> InputEvent {
        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => InputEvent::MouseDown { x, y },
            ElementState::Released => InputEvent::MouseUp { x, y },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;
    use winit::keyboard::{NamedKey, SmolStr};

    #[test]
    fn keys_map_by_state() {
        let translator = EventTranslator::new();

        assert_eq!(
            translator.key(&Key::Character(SmolStr::new("w")), ElementState::Pressed),
            Some(InputEvent::key_down("w"))
        );
        assert_eq!(
            translator.key(&Key::Named(NamedKey::ArrowLeft), ElementState::Released),
            Some(InputEvent::key_up("ArrowLeft"))
        );
        assert_eq!(translator.key(&Key::Dead(None), ElementState::Pressed), None);
    }

    #[test]
    fn buttons_use_last_cursor_position() {
        let mut translator = EventTranslator::new();
        assert_eq!(
            translator.mouse_button(ElementState::Pressed),
            InputEvent::MouseDown { x: 0.0, y: 0.0 }
        );

        translator.cursor_moved(12.0, 30.0);
        assert_eq!(
            translator.mouse_button(ElementState::Released),
            InputEvent::MouseUp { x: 12.0, y: 30.0 }
        );
    }

    #[test]
    fn translate_cursor_moved() {
        let mut translator = EventTranslator::new();
        let event = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(4.0, 9.0),
        };

        assert_eq!(
            translator.translate(&event),
            Some(InputEvent::MouseMove { x: 4.0, y: 9.0 })
        );
        assert_eq!(translator.cursor(), (4.0, 9.0));
        assert_eq!(translator.translate(&WindowEvent::Focused(true)), None);
    }
}

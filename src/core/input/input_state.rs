//=========================================================================
// Input State
//=========================================================================
//
// Observable pointer and key state, written only by the input router and
// read by host UI code.
//
// Notes:
// `InputContext` is a cheap, cloneable handle. Readers take a `snapshot()`
// so they never hold a borrow across router calls.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Vec2;

//=== InputState ==========================================================

#[derive(Clone, Default, PartialEq)]
pub struct InputState {
    /// Last pointer position, surface relative.
    pub last_pointer: Vec2,

    pub pointer_held: bool,
    pub key_held: bool,

    /// Last key pressed, `None` until the first key press.
    pub last_key: Option<String>,

    /// Surface-relative position of the last click.
    pub last_click: Option<Vec2>,
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputState")
            .field("pointer", &(self.last_pointer.x, self.last_pointer.y))
            .field("pointer_held", &self.pointer_held)
            .field("key_held", &self.key_held)
            .field("last_key", &self.last_key)
            .field("last_click", &self.last_click.map(|c| (c.x, c.y)))
            .finish()
    }
}

//=== InputContext ========================================================

/// Shared handle to the router's [`InputState`].
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    state: Rc<RefCell<InputState>>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> InputState {
        self.state.borrow().clone()
    }

    pub fn pointer(&self) -> Vec2 {
        self.state.borrow().last_pointer
    }

    pub fn is_pointer_held(&self) -> bool {
        self.state.borrow().pointer_held
    }

    pub fn is_key_held(&self) -> bool {
        self.state.borrow().key_held
    }

    pub fn last_key(&self) -> Option<String> {
        self.state.borrow().last_key.clone()
    }

    pub fn last_click(&self) -> Option<Vec2> {
        self.state.borrow().last_click
    }

    pub(super) fn update(&self, f: impl FnOnce(&mut InputState)) {
        f(&mut self.state.borrow_mut());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let context = InputContext::new();
        assert_eq!(context.snapshot(), InputState::default());
        assert!(context.last_key().is_none());
        assert!(!context.is_pointer_held());
    }

    #[test]
    fn clones_share_state() {
        let writer = InputContext::new();
        let reader = writer.clone();

        writer.update(|state| {
            state.key_held = true;
            state.last_key = Some("w".into());
        });

        assert!(reader.is_key_held());
        assert_eq!(reader.last_key().as_deref(), Some("w"));
    }
}

//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of the key and pointer events the router
// consumes, plus key selectors for bindings.
//
// Event Flow:
// ```text
// Platform Layer (winit) / host code
//         ↓
//    InputEvent (this module)
//         ↓  crossbeam channel
//    EventCollector → InputRouter → user callbacks
// ```
//
// Keys are W3C `KeyboardEvent.key` strings ("w", "ArrowUp", " ", ...)
// so that bindings read the same regardless of the backend.
//
//=========================================================================

//=== InputEvent ==========================================================

/// Raw input delivered to the router. Pointer coordinates are in page
/// space; the router subtracts the surface offset.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    MouseMove { x: f32, y: f32 },
    MouseDown { x: f32, y: f32 },

    /// Button released; this is the click.
    MouseUp { x: f32, y: f32 },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        InputEvent::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        InputEvent::KeyUp { key: key.into() }
    }
}

//=== KeySelector =========================================================

/// What a key binding listens to.
///
/// `All` fires on every key press after any exact match; `Nums` fires
/// after that for single digit keys `"0"` to `"9"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySelector {
    Key(String),
    All,
    Nums,
}

impl KeySelector {
    /// Legacy identifier for [`KeySelector::All`].
    pub const ALL_ID: &'static str = "~~";

    /// Legacy identifier for [`KeySelector::Nums`].
    pub const NUMS_ID: &'static str = "~-";
}

impl From<&str> for KeySelector {
    fn from(id: &str) -> Self {
        match id {
            Self::ALL_ID => KeySelector::All,
            Self::NUMS_ID => KeySelector::Nums,
            key => KeySelector::Key(key.to_owned()),
        }
    }
}

impl From<String> for KeySelector {
    fn from(id: String) -> Self {
        KeySelector::from(id.as_str())
    }
}

/// Returns `true` when `key` is a single ASCII digit.
pub fn is_numeric_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

//=== Key Names ===========================================================

/// Names of common non-character keys.
pub mod keys {
    pub const UP: &str = "ArrowUp";
    pub const DOWN: &str = "ArrowDown";
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const PAGE_UP: &str = "PageUp";
    pub const PAGE_DOWN: &str = "PageDown";
    pub const CAPS: &str = "CapsLock";
    pub const NUM: &str = "NumLock";
    pub const SCROLL: &str = "ScrollLock";
    pub const BACK: &str = "Backspace";
    pub const ESC: &str = "Escape";
    pub const CTRL: &str = "Control";
    pub const CONTEXT_MENU: &str = "ContextMenu";
    pub const ENTER: &str = "Enter";
    pub const SPACE: &str = " ";
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_ids_parse_to_wildcards() {
        assert_eq!(KeySelector::from("~~"), KeySelector::All);
        assert_eq!(KeySelector::from("~-"), KeySelector::Nums);
        assert_eq!(KeySelector::from("w"), KeySelector::Key("w".into()));
        assert_eq!(
            KeySelector::from(String::from(keys::UP)),
            KeySelector::Key("ArrowUp".into())
        );
    }

    #[test]
    fn numeric_keys_are_single_digits() {
        for digit in ["0", "5", "9"] {
            assert!(is_numeric_key(digit), "{digit}");
        }
        for other in ["", "a", "10", "Digit1", "½", " "] {
            assert!(!is_numeric_key(other), "{other:?}");
        }
    }

    #[test]
    fn key_helpers_build_key_events() {
        assert_eq!(InputEvent::key_down("w"), InputEvent::KeyDown { key: "w".into() });
        assert_eq!(InputEvent::key_up("w"), InputEvent::KeyUp { key: "w".into() });
    }
}

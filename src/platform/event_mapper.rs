//=========================================================================
// Platform Event Mapper
//=========================================================================
//
// Converts winit logical keys into the W3C key strings bindings use.
//
// Notes:
// - Character keys keep the text winit reports ("w", "W", "7").
// - Named keys use their W3C name ("ArrowUp", "Escape"); Space is " ".
// - Dead and unidentified keys have no name and are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::keyboard::{Key, NamedKey};

//=== Internal Dependencies ===============================================

use crate::core::input::keys;

//=== Key Conversion ======================================================

/// W3C name of a winit logical key, `None` when the key has no name.
pub(crate) fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.as_str().to_owned()),
        Key::Named(named) => Some(named_key(*named)),
        Key::Unidentified(_) | Key::Dead(_) => None,
    }
}

fn named_key(named: NamedKey) -> String {
    let name = match named {
        //--- Navigation -----------------------------------------------------
        NamedKey::ArrowUp => keys::UP,
        NamedKey::ArrowDown => keys::DOWN,
        NamedKey::ArrowLeft => keys::LEFT,
        NamedKey::ArrowRight => keys::RIGHT,
        NamedKey::PageUp => keys::PAGE_UP,
        NamedKey::PageDown => keys::PAGE_DOWN,

        //--- Locks ----------------------------------------------------------
        NamedKey::CapsLock => keys::CAPS,
        NamedKey::NumLock => keys::NUM,
        NamedKey::ScrollLock => keys::SCROLL,

        //--- Editing & Control ----------------------------------------------
        NamedKey::Backspace => keys::BACK,
        NamedKey::Escape => keys::ESC,
        NamedKey::Control => keys::CTRL,
        NamedKey::ContextMenu => keys::CONTEXT_MENU,
        NamedKey::Enter => keys::ENTER,
        NamedKey::Space => keys::SPACE,
        NamedKey::Super => "Meta",

        //--- Fallback -------------------------------------------------------
        // winit names follow the W3C list, so the variant name is the key.
        other => return format!("{:?}", other),
    };
    name.to_owned()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{NativeKey, SmolStr};

    #[test]
    fn character_keys_keep_text() {
        assert_eq!(key_name(&Key::Character(SmolStr::new("w"))).as_deref(), Some("w"));
        assert_eq!(key_name(&Key::Character(SmolStr::new("7"))).as_deref(), Some("7"));
    }

    #[test]
    fn named_keys_use_w3c_names() {
        assert_eq!(key_name(&Key::Named(NamedKey::ArrowUp)).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)).as_deref(), Some("Escape"));
        assert_eq!(key_name(&Key::Named(NamedKey::Space)).as_deref(), Some(" "));
        assert_eq!(key_name(&Key::Named(NamedKey::F1)).as_deref(), Some("F1"));
        assert_eq!(key_name(&Key::Named(NamedKey::Tab)).as_deref(), Some("Tab"));
    }

    #[test]
    fn unnamed_keys_are_dropped() {
        assert!(key_name(&Key::Dead(None)).is_none());
        assert!(key_name(&Key::Unidentified(NativeKey::Unidentified)).is_none());
    }
}

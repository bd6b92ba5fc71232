//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use scenic_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Scenes & entities
pub use crate::core::entity::{Collider, Entity, EntityId, LabelOptions, VisualOptions};
pub use crate::core::scene::{EntityRef, SceneConfig, SceneHandle};

// Images & drawing
pub use crate::core::images::{Bitmap, ImageRegistry};
pub use crate::core::surface::{CommandRecorder, DrawCommand, Font, Surface};

// Input & movement
pub use crate::core::input::{keys, InputEvent, KeySelector};
pub use crate::core::movement::{make_default_move, make_move, Direction};
pub use crate::core::platform_bridge::PumpControl;

// Errors
pub use crate::core::error::{EntityError, SceneError};

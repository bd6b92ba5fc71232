//=========================================================================
// Core Systems
//=========================================================================
//
// Backend-independent engine systems.
//
// Architecture:
//   images ──> entity ──> scene ──render()──> overlap + surface
//                ▲           ▲
//             movement     input ◄── platform_bridge (channel)
//
// Everything here runs on the host's single UI thread. Shared state uses
// `Rc<RefCell<_>>` handles; nothing blocks.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod debug_console;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod images;
pub mod input;
pub mod movement;
pub mod overlap;
pub mod platform_bridge;
pub mod scene;
pub mod surface;

//=== Public API ==========================================================

pub use debug_console::{Command, DebugConsole};
pub use entity::{Collider, Entity, EntityId, EntityKind, Label, LabelOptions, Visual, VisualOptions};
pub use error::{CommandError, EntityError, ImageError, SceneError};
pub use geometry::{Aabb, Vec2};
pub use images::{Bitmap, ImageRegistry};
pub use input::{keys, InputContext, InputEvent, InputRouter, InputState, KeySelector};
pub use movement::{make_default_move, make_move, Direction, MoveTarget};
pub use platform_bridge::PumpControl;
pub use scene::{EntityRef, Scene, SceneConfig, SceneHandle};
pub use surface::{Canvas, CommandLog, CommandRecorder, DrawCommand, Font, SharedCanvas, Surface};

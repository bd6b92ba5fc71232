//=========================================================================
// Error Types
//=========================================================================
//
// Every failure is logged where it is detected and also returned, so a
// caller that ignores the result still leaves a trace in the log.
// Nothing here is fatal: the render loop keeps running.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityId;

//=== SceneError ==========================================================

/// Failures reported by scene operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Registration refused because the scene is full.
    #[error("cannot load more entities, maximum number reached: {capacity}")]
    CapacityReached { capacity: usize },

    /// The scene is already borrowed (e.g. a collision callback tried to
    /// re-enter its own scene during a render pass).
    #[error("scene is busy and cannot be re-entered")]
    Busy,
}

//=== EntityError =========================================================

/// Failures reported by entity operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The entity has been pruned, or its scene has been dropped.
    #[error("entity {0:?} is no longer in its scene")]
    Stale(EntityId),

    /// Operation only applies to visual entities.
    #[error("entity {0:?} is not a visual entity")]
    NotVisual(EntityId),

    /// A click callback was set on an entity with `clickable == false`.
    #[error("on_click will not be called, entity {0:?} is not clickable")]
    NotClickable(EntityId),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

//=== ImageError ==========================================================

/// Failures reported when resolving bitmaps by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("the image: {0} does not exist")]
    Unresolved(String),
}

//=== CommandError ========================================================

/// Failures reported by the debug console parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("commands are disabled")]
    Disabled,

    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} requires a scene argument")]
    MissingScene { command: &'static str },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

//=========================================================================
// Unit Tests
//=========================================================================

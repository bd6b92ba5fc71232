//=========================================================================
// Movement Factory
//=========================================================================
//
// Builds reusable directional-move operations for scenes and entities.
//
// Architecture:
//   make_move(direction, target, pixels) → impl FnMut()
//     ├─ Scene target  → origin += offset → render
//     └─ Entity target → position += offset, knockback = -offset → render
//
// Knockback contract: a visual entity moved by an operation from this
// module carries the inverse of that move as its knockback, so the next
// collision response pushes it back to where it came from. Labels never
// collide and keep no knockback. Every move is a no-op while the target's
// scene is hidden.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::EntityError;
use crate::core::geometry::Vec2;
use crate::core::scene::{EntityRef, SceneHandle};

//=== Constants ===========================================================

/// Pixels moved per operation when no step is given.
pub const DEFAULT_STEP: f32 = 10.0;

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Displacement for one move of `pixels` (y grows downwards).
    pub fn offset(self, pixels: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -pixels),
            Direction::Down => Vec2::new(0.0, pixels),
            Direction::Left => Vec2::new(-pixels, 0.0),
            Direction::Right => Vec2::new(pixels, 0.0),
        }
    }
}

//=== MoveTarget ==========================================================

/// What a move operation displaces.
#[derive(Debug, Clone)]
pub enum MoveTarget {
    Scene(SceneHandle),
    Entity(EntityRef),
}

impl From<SceneHandle> for MoveTarget {
    fn from(scene: SceneHandle) -> Self {
        MoveTarget::Scene(scene)
    }
}

impl From<EntityRef> for MoveTarget {
    fn from(entity: EntityRef) -> Self {
        MoveTarget::Entity(entity)
    }
}

impl MoveTarget {
    /// Applies one move and re-renders the affected scene.
    ///
    /// Returns `Ok(false)` when the scene is hidden and nothing moved.
    pub fn step(&self, direction: Direction, pixels: f32) -> Result<bool, EntityError> {
        let offset = direction.offset(pixels);

        match self {
            MoveTarget::Scene(scene) => Ok(scene.with_mut(|scene| {
                if scene.is_hidden() {
                    return false;
                }
                scene.origin += offset;
                scene.render();
                true
            })?),

            MoveTarget::Entity(entity) => entity.with_scene_mut(|scene, id| -> Result<bool, EntityError> {
                if scene.is_hidden() {
                    return Ok(false);
                }
                let moved = scene.entity_mut(id).ok_or(EntityError::Stale(id))?;
                moved.position += offset;
                if let Some(visual) = moved.visual_mut() {
                    visual.knockback = -offset;
                }
                scene.render();
                Ok(true)
            })?,
        }
    }
}

//=== Factory =============================================================

/// Returns a zero-argument operation moving `target` by `pixels` in
/// `direction` each time it is called.
pub fn make_move(
    direction: Direction,
    target: impl Into<MoveTarget>,
    pixels: f32,
) -> impl FnMut() + 'static {
    let target = target.into();
    move || match target.step(direction, pixels) {
        Ok(true) => trace!(target: "movement", "moved {:?} by {}", direction, pixels),
        Ok(false) => trace!(target: "movement", "scene hidden, move {:?} skipped", direction),
        Err(err) => warn!(target: "movement", "move {:?} failed: {}", direction, err),
    }
}

/// [`make_move`] with the default step of [`DEFAULT_STEP`] pixels.
pub fn make_default_move(direction: Direction, target: impl Into<MoveTarget>) -> impl FnMut() + 'static {
    make_move(direction, target, DEFAULT_STEP)
}

//=========================================================================
// Unit Tests
//=========================================================================

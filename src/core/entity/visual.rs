//=========================================================================
// Visual Entity
//=========================================================================
//
// Image-backed entity data: scale, shared bitmap, collision and click
// participation, and the knockback contract.
//
// Knockback contract:
//   Movement factory sets `knockback` to the inverse of the last move.
//   The render pass adds it to the position the frame a collision
//   response fires (entity/entity or entity/surface boundary).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::Entity;
use crate::core::geometry::Vec2;
use crate::core::images::Bitmap;

//=== Callbacks ===========================================================

/// What a visual entity collided with.
pub enum Collider<'a> {
    /// Another visual entity in the same scene.
    ///
    /// Passed mutably so the callback can, for example, mark it for
    /// removal by clearing `exists`.
    Entity(&'a mut Entity),

    /// The surface boundary.
    Surface { width: f32, height: f32 },
}

impl Collider<'_> {
    pub fn is_surface(&self) -> bool {
        matches!(self, Collider::Surface { .. })
    }

    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Collider::Entity(other) => Some(&**other),
            Collider::Surface { .. } => None,
        }
    }
}

impl fmt::Debug for Collider<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collider::Entity(other) => f.debug_tuple("Entity").field(&other.id()).finish(),
            Collider::Surface { width, height } => f
                .debug_struct("Surface")
                .field("width", width)
                .field("height", height)
                .finish(),
        }
    }
}

/// Invoked with the entity itself and what it collided with.
///
/// Runs inside the render pass while the scene is borrowed: use the two
/// arguments, not the scene handle.
pub type CollisionCallback = Box<dyn FnMut(&mut Entity, Collider<'_>)>;

/// Invoked with the surface-relative click position.
pub type ClickCallback = Box<dyn FnMut(f32, f32)>;

//=== VisualOptions =======================================================

/// Construction options for a visual entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualOptions {
    pub position: Vec2,
    pub scale: f32,
    pub clip: bool,
    pub clickable: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            position: Vec2::new(50.0, 50.0),
            scale: 1.0,
            clip: true,
            clickable: true,
        }
    }
}

impl VisualOptions {
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }
}

//=== Visual ==============================================================

/// Image-backed payload of an [`Entity`].
pub struct Visual {
    /// Positive scale applied to the bitmap.
    pub scale: f32,

    /// Participates in overlap detection.
    pub clip: bool,

    /// Participates in pointer hit testing.
    pub clickable: bool,

    /// Displacement applied when a collision response fires.
    pub knockback: Vec2,

    pub(crate) bitmap: Option<Rc<Bitmap>>,
    pub(crate) collided: bool,
    on_collision: Option<CollisionCallback>,
    on_click: Option<ClickCallback>,
}

impl Visual {
    pub(crate) fn new(bitmap: Option<Rc<Bitmap>>, options: &VisualOptions) -> Self {
        Self {
            scale: options.scale,
            clip: options.clip,
            clickable: options.clickable,
            knockback: Vec2::ZERO,
            bitmap,
            collided: false,
            on_collision: None,
            on_click: None,
        }
    }

    /// The shared bitmap, or `None` if the image name never resolved.
    pub fn bitmap(&self) -> Option<&Rc<Bitmap>> {
        self.bitmap.as_ref()
    }

    pub fn set_bitmap(&mut self, bitmap: Rc<Bitmap>) {
        self.bitmap = Some(bitmap);
    }

    /// Whether a collision response already fired this render pass.
    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn set_on_collision(&mut self, callback: CollisionCallback) {
        self.on_collision = Some(callback);
    }

    pub(crate) fn set_on_click(&mut self, callback: ClickCallback) {
        self.on_click = Some(callback);
    }

    //--- Callback Borrowing -----------------------------------------------
    //
    // Callbacks are moved out while they run so they can receive the
    // entity that owns them, then moved back unless replaced meanwhile.
    //

    pub(crate) fn take_on_collision(&mut self) -> Option<CollisionCallback> {
        self.on_collision.take()
    }

    pub(crate) fn restore_on_collision(&mut self, callback: CollisionCallback) {
        if self.on_collision.is_none() {
            self.on_collision = Some(callback);
        }
    }

    pub(crate) fn take_on_click(&mut self) -> Option<ClickCallback> {
        self.on_click.take()
    }

    pub(crate) fn restore_on_click(&mut self, callback: ClickCallback) {
        if self.on_click.is_none() {
            self.on_click = Some(callback);
        }
    }
}

impl fmt::Debug for Visual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visual")
            .field("scale", &self.scale)
            .field("clip", &self.clip)
            .field("clickable", &self.clickable)
            .field("knockback", &self.knockback)
            .field("bitmap", &self.bitmap.as_ref().map(|b| (b.width(), b.height())))
            .field("collided", &self.collided)
            .field("on_collision", &self.on_collision.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

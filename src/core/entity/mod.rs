//=========================================================================
// Entity
//=========================================================================
//
// Positioned, drawable units owned by a scene.
//
// Architecture:
//   Entity { id, position, exists, kind }
//     └─ kind: EntityKind
//          ├─ Visual (image-backed, collidable, clickable)
//          └─ Label  (text-backed, never collides)
//
// Entities are plain data. Drawing and collision behaviour is dispatched
// by the scene over the `EntityKind` tag.
//
// Lifecycle:
//   constructed → Scene::register_entity() (id assigned)
//   → exists = false → pruned on the next render pass
//
//=========================================================================

//=== Module Declarations =================================================

mod label;
mod visual;

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{error, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::EntityError;
use crate::core::geometry::Vec2;
use crate::core::images::{Bitmap, ImageRegistry};
use crate::core::overlap;

//=== Public API ==========================================================

pub use label::{Label, LabelOptions};
pub use visual::{ClickCallback, Collider, CollisionCallback, Visual, VisualOptions};

//=== EntityId ============================================================

/// Scene-local entity identifier, assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Id carried by an entity that has not been registered yet.
    pub const UNASSIGNED: EntityId = EntityId(0);
}

//=== EntityKind ==========================================================

/// Variant tag selecting how an entity draws and collides.
#[derive(Debug)]
pub enum EntityKind {
    Visual(Visual),
    Label(Label),
}

//=== Entity ==============================================================

#[derive(Debug)]
pub struct Entity {
    id: EntityId,

    /// Surface coordinates (before the scene origin is added).
    pub position: Vec2,

    /// Cleared to request removal; the scene prunes on its next render.
    pub exists: bool,

    pub kind: EntityKind,
}

impl Entity {
    //--- Construction -----------------------------------------------------

    /// Creates a visual entity whose bitmap is looked up by name.
    ///
    /// An unresolved name is logged and leaves the bitmap unset; the entity
    /// then draws nothing until an image is assigned.
    pub fn from_registry(images: &ImageRegistry, image: &str, options: VisualOptions) -> Self {
        let bitmap = match images.require(image) {
            Ok(bitmap) => Some(bitmap),
            Err(err) => {
                error!(target: "images", "{}", err);
                None
            }
        };
        Self::visual_with_bitmap(bitmap, options)
    }

    /// Creates a visual entity from an already resolved bitmap.
    pub fn visual_with_bitmap(bitmap: Option<Rc<Bitmap>>, options: VisualOptions) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            position: options.position,
            exists: true,
            kind: EntityKind::Visual(Visual::new(bitmap, &options)),
        }
    }

    pub fn label(text: impl Into<String>, options: LabelOptions) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            position: options.position,
            exists: true,
            kind: EntityKind::Label(Label {
                text: text.into(),
                font: options.font,
            }),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EntityKind::Visual(_) => "visual",
            EntityKind::Label(_) => "label",
        }
    }

    pub fn is_visual(&self) -> bool {
        matches!(self.kind, EntityKind::Visual(_))
    }

    pub fn visual(&self) -> Option<&Visual> {
        match &self.kind {
            EntityKind::Visual(visual) => Some(visual),
            EntityKind::Label(_) => None,
        }
    }

    pub fn visual_mut(&mut self) -> Option<&mut Visual> {
        match &mut self.kind {
            EntityKind::Visual(visual) => Some(visual),
            EntityKind::Label(_) => None,
        }
    }

    pub fn label_ref(&self) -> Option<&Label> {
        match &self.kind {
            EntityKind::Label(label) => Some(label),
            EntityKind::Visual(_) => None,
        }
    }

    /// Scaled `(width, height)` of a visual's box, or `(0, 0)` for labels
    /// and visuals without a bitmap.
    pub fn dims(&self) -> (f32, f32) {
        overlap::bounding_box(self)
            .map(|b| (b.w, b.h))
            .unwrap_or((0.0, 0.0))
    }

    //--- Mutation ---------------------------------------------------------

    /// Marks the entity for removal on the next render pass.
    pub fn delete(&mut self) {
        self.exists = false;
    }

    pub fn set_on_collision<F>(&mut self, callback: F) -> Result<(), EntityError>
    where
        F: FnMut(&mut Entity, Collider<'_>) + 'static,
    {
        let id = self.id;
        match self.visual_mut() {
            Some(visual) => {
                visual.set_on_collision(Box::new(callback));
                Ok(())
            }
            None => {
                error!(target: "scene", "cannot set collision callback on label {:?}", id);
                Err(EntityError::NotVisual(id))
            }
        }
    }

    /// Sets the click callback. Refused with a warning when the entity is
    /// not clickable, in which case no callback is stored.
    pub fn set_on_click<F>(&mut self, callback: F) -> Result<(), EntityError>
    where
        F: FnMut(f32, f32) + 'static,
    {
        let id = self.id;
        match self.visual_mut() {
            Some(visual) if visual.clickable => {
                visual.set_on_click(Box::new(callback));
                Ok(())
            }
            Some(_) => {
                let err = EntityError::NotClickable(id);
                warn!(target: "scene", "{}", err);
                Err(err)
            }
            None => {
                error!(target: "scene", "cannot set click callback on label {:?}", id);
                Err(EntityError::NotVisual(id))
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

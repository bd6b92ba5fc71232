//=========================================================================
// Scene System
//=========================================================================
//
// Ordered, capacity-bounded owner of entities; runs the render pass.
//
// Architecture:
//   SceneHandle (Rc<RefCell<Scene>>)
//     └─ Scene
//          ├─ entities: Vec<Entity>   (insertion order = z-order)
//          └─ canvas: SharedCanvas    (one surface for every scene)
//
// Render pass (one state per call: Idle → Rendering → Idle):
//   clear → [hidden? stop] → compute_pairs() → reset `collided`
//   → pair responses → prune `exists == false` → boundary + draw
//
//=========================================================================

//=== Module Declarations =================================================

mod handle;

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::entity::{
    Collider, Entity, EntityId, EntityKind, LabelOptions, VisualOptions,
};
use crate::core::error::SceneError;
use crate::core::geometry::Vec2;
use crate::core::images::ImageRegistry;
use crate::core::overlap;
use crate::core::surface::{Canvas, SharedCanvas};

//=== Public API ==========================================================

pub use handle::{EntityRef, SceneHandle};

//=== SceneConfig =========================================================

/// Construction settings for a [`Scene`].
///
/// # Default Values
///
/// - **capacity**: 400 entities
/// - **origin**: (0, 0)
/// - **hidden**: false
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub capacity: usize,
    pub origin: Vec2,
    pub hidden: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            capacity: 400,
            origin: Vec2::ZERO,
            hidden: false,
        }
    }
}

impl SceneConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

//=== Scene ===============================================================

/// A logical screen: an ordered set of entities drawn onto the shared
/// canvas, offset by `origin`.
pub struct Scene {
    entities: Vec<Entity>,
    hidden: bool,

    /// Offset added to every entity's drawn position.
    pub origin: Vec2,

    capacity: usize,
    next_id: u64,
    canvas: SharedCanvas,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    pub fn new(canvas: SharedCanvas, config: SceneConfig) -> Self {
        info!(target: "scene", "scene created (capacity {})", config.capacity);
        Self {
            entities: Vec::new(),
            hidden: config.hidden,
            origin: config.origin,
            capacity: config.capacity,
            next_id: 0,
            canvas,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Appends an entity and assigns its id.
    ///
    /// Rejected (and logged) when the scene already holds `capacity`
    /// entities; a rejected entity is dropped without a near-capacity
    /// warning.
    pub fn register_entity(&mut self, mut entity: Entity) -> Result<EntityId, SceneError> {
        let count = self.entities.len();

        if count >= self.capacity {
            let err = SceneError::CapacityReached {
                capacity: self.capacity,
            };
            error!(target: "scene", "{}", err);
            return Err(err);
        }

        if count > warning_threshold(self.capacity) {
            warn!(target: "scene", "Nearing max entity number: {}", self.capacity);
        }

        self.next_id += 1;
        let id = EntityId(self.next_id);
        entity.assign_id(id);

        info!(target: "scene", "Loaded: {} entity {:?}", entity.kind_name(), id);
        self.entities.push(entity);
        Ok(id)
    }

    /// Builds a visual entity from a registry image and registers it.
    pub fn spawn_visual(
        &mut self,
        images: &ImageRegistry,
        image: &str,
        options: VisualOptions,
    ) -> Result<EntityId, SceneError> {
        self.register_entity(Entity::from_registry(images, image, options))
    }

    pub fn spawn_label(
        &mut self,
        text: impl Into<String>,
        options: LabelOptions,
    ) -> Result<EntityId, SceneError> {
        self.register_entity(Entity::label(text, options))
    }

    //--- Queries ----------------------------------------------------------

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    /// Ids of clickable visual entities whose box contains `(x, y)`, in
    /// insertion order. Empty while the scene is hidden.
    pub fn clickable_at(&self, x: f32, y: f32) -> Vec<EntityId> {
        if self.hidden {
            return Vec::new();
        }
        self.entities
            .iter()
            .filter(|e| e.visual().is_some_and(|v| v.clickable))
            .filter(|e| overlap::hit_test(e, x, y))
            .map(Entity::id)
            .collect()
    }

    //--- Visibility -------------------------------------------------------

    /// Shows (and renders) or hides (and clears) the scene.
    ///
    /// Hiding leaves the entity sequence untouched.
    pub fn set_visibility(&mut self, visible: bool) {
        self.hidden = !visible;
        if visible {
            self.render();
        } else {
            self.clear();
        }
    }

    //--- Maintenance ------------------------------------------------------

    /// Removes every entity immediately, bypassing the render pass.
    pub fn clear_entities(&mut self) {
        debug!(target: "scene", "clearing {} entities", self.entities.len());
        self.entities.clear();
    }

    /// Wipes the surface without touching entities.
    pub fn clear(&self) {
        self.with_canvas(|canvas| canvas.surface_mut().clear_region());
    }

    //--- Render Pass ------------------------------------------------------

    /// Runs one frame: collisions, pruning and drawing.
    ///
    /// A hidden scene only clears the surface. Entities whose `exists` flag
    /// was cleared are still present for every collision callback fired
    /// before the prune step, and are gone from the next pass on.
    pub fn render(&mut self) {
        self.clear();
        if self.hidden {
            return;
        }

        //--- Step 1: Pairwise collisions ----------------------------------
        let pairs = overlap::compute_pairs(&self.entities, self.hidden);

        for entity in &mut self.entities {
            if let Some(visual) = entity.visual_mut() {
                visual.collided = false;
            }
        }

        for &(a, b) in &pairs {
            respond_once(&mut self.entities, a, b);
            respond_once(&mut self.entities, b, a);
        }

        //--- Step 2: Prune ------------------------------------------------
        self.entities.retain(|entity| {
            if !entity.exists {
                debug!(
                    target: "scene",
                    "pruned {} entity {:?}",
                    entity.kind_name(),
                    entity.id()
                );
            }
            entity.exists
        });

        //--- Step 3: Boundary + draw --------------------------------------
        let Some((width, height)) = self.surface_size() else {
            return;
        };
        let origin = self.origin;

        for index in 0..self.entities.len() {
            let entity = &mut self.entities[index];

            if entity.is_visual() && overlap::out_of_bounds(entity, width, height) {
                trace!(target: "scene", "entity {:?} left the surface", entity.id());
                apply_collision(entity, Collider::Surface { width, height });
            }

            let entity = &self.entities[index];
            self.with_canvas(|canvas| draw_entity(canvas, entity, origin));
        }

        trace!(target: "scene", "rendered {} entities", self.entities.len());
    }

    //--- Internal Helpers -------------------------------------------------

    fn surface_size(&self) -> Option<(f32, f32)> {
        match self.canvas.try_borrow() {
            Ok(canvas) => Some((canvas.width(), canvas.height())),
            Err(_) => {
                error!(target: "scene", "canvas is busy, skipping draw");
                None
            }
        }
    }

    fn with_canvas(&self, f: impl FnOnce(&mut Canvas)) {
        match self.canvas.try_borrow_mut() {
            Ok(mut canvas) => f(&mut canvas),
            Err(_) => error!(target: "scene", "canvas is busy, skipping draw call"),
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.entities.len())
            .field("capacity", &self.capacity)
            .field("hidden", &self.hidden)
            .field("origin", &self.origin)
            .finish()
    }
}

//=== Render Helpers ======================================================

/// Entity count above which registration warns.
fn warning_threshold(capacity: usize) -> usize {
    (capacity as f64 * 0.75).round() as usize
}

/// Fires the collision response of `this` against `other`, unless `this`
/// already responded during the current pass.
fn respond_once(entities: &mut [Entity], this: usize, other: usize) {
    let (me, them) = pair_mut(entities, this, other);

    let already = me.visual().map_or(true, |v| v.collided);
    if already {
        return;
    }

    apply_collision(me, Collider::Entity(them));
    if let Some(visual) = me.visual_mut() {
        visual.collided = true;
    }
}

/// Runs the collision callback, then applies knockback.
fn apply_collision(me: &mut Entity, other: Collider<'_>) {
    let callback = match me.visual_mut() {
        Some(visual) => visual.take_on_collision(),
        None => return,
    };

    if let Some(mut callback) = callback {
        callback(me, other);
        if let Some(visual) = me.visual_mut() {
            visual.restore_on_collision(callback);
        }
    }

    if let Some(knockback) = me.visual().map(|v| v.knockback) {
        me.position += knockback;
    }
}

/// Two distinct mutable entries of one slice.
fn pair_mut(items: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    debug_assert_ne!(a, b, "an entity cannot collide with itself");
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

fn draw_entity(canvas: &mut Canvas, entity: &Entity, origin: Vec2) {
    let at = entity.position + origin;

    match &entity.kind {
        EntityKind::Label(label) => {
            canvas
                .surface_mut()
                .draw_text(&label.text, at.x, at.y, &label.font);
        }
        EntityKind::Visual(visual) => {
            let (Some(bitmap), Some(bounds)) = (visual.bitmap(), overlap::bounding_box(entity))
            else {
                return;
            };
            let show_boxes = canvas.show_collision_boxes();
            let surface = canvas.surface_mut();
            surface.draw_bitmap(bitmap, at.x, at.y, bounds.w, bounds.h);
            if show_boxes {
                surface.stroke_rect(at.x, at.y, bounds.w, bounds.h);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Scene & Entity Handles
//=========================================================================
//
// Shared, single-threaded handles used by application code, input
// callbacks and the movement factory.
//
// Architecture:
//   SceneHandle ──Rc──> RefCell<Scene> <──Weak── EntityRef { id }
//
// `EntityRef` is the entity's non-owning back-reference: it can request a
// redraw of its scene but never keeps the scene alive. Borrow failures
// (re-entering a scene from inside its own render pass) are logged and
// returned as `SceneError::Busy` instead of panicking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{error, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::entity::{Collider, Entity, EntityId, LabelOptions, Visual, VisualOptions};
use crate::core::error::{EntityError, SceneError};
use crate::core::geometry::Vec2;
use crate::core::images::ImageRegistry;

//=== SceneHandle =========================================================

/// Shared handle to a [`Scene`].
#[derive(Clone)]
pub struct SceneHandle {
    inner: Rc<RefCell<Scene>>,
}

impl SceneHandle {
    //--- Construction -----------------------------------------------------

    pub fn new(scene: Scene) -> Self {
        Self {
            inner: Rc::new(RefCell::new(scene)),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<Scene>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_rc(inner: Rc<RefCell<Scene>>) -> Self {
        Self { inner }
    }

    pub fn ptr_eq(&self, other: &SceneHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    //--- Borrowing --------------------------------------------------------

    /// Runs `f` with shared access to the scene.
    pub fn with<R>(&self, f: impl FnOnce(&Scene) -> R) -> Result<R, SceneError> {
        match self.inner.try_borrow() {
            Ok(scene) => Ok(f(&*scene)),
            Err(_) => Err(busy()),
        }
    }

    /// Runs `f` with exclusive access to the scene.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> Result<R, SceneError> {
        match self.inner.try_borrow_mut() {
            Ok(mut scene) => Ok(f(&mut *scene)),
            Err(_) => Err(busy()),
        }
    }

    //--- Scene Operations -------------------------------------------------

    pub fn render(&self) -> Result<(), SceneError> {
        self.with_mut(Scene::render)
    }

    pub fn set_visibility(&self, visible: bool) -> Result<(), SceneError> {
        self.with_mut(|scene| scene.set_visibility(visible))
    }

    /// Returns a reusable operation that shows or hides the scene.
    pub fn visibility_op(&self, visible: bool) -> impl FnMut() + 'static {
        let scene = self.clone();
        move || {
            if let Err(err) = scene.set_visibility(visible) {
                warn!(target: "scene", "set visibility to {} failed: {}", visible, err);
            }
        }
    }

    /// Moves the scene origin and re-renders.
    pub fn goto(&self, x: f32, y: f32) -> Result<(), SceneError> {
        self.with_mut(|scene| {
            scene.origin = Vec2::new(x, y);
            scene.render();
        })
    }

    pub fn clear_entities(&self) -> Result<(), SceneError> {
        self.with_mut(Scene::clear_entities)
    }

    //--- Registration -----------------------------------------------------

    pub fn register(&self, entity: Entity) -> Result<EntityRef, SceneError> {
        let id = self.with_mut(|scene| scene.register_entity(entity))??;
        Ok(self.entity(id))
    }

    pub fn spawn_visual(
        &self,
        images: &ImageRegistry,
        image: &str,
        options: VisualOptions,
    ) -> Result<EntityRef, SceneError> {
        self.register(Entity::from_registry(images, image, options))
    }

    pub fn spawn_label(
        &self,
        text: impl Into<String>,
        options: LabelOptions,
    ) -> Result<EntityRef, SceneError> {
        self.register(Entity::label(text, options))
    }

    /// Handle to an entity of this scene by id (not checked until used).
    pub fn entity(&self, id: EntityId) -> EntityRef {
        EntityRef {
            scene: self.downgrade(),
            id,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Entity count, or 0 while the scene is busy.
    pub fn len(&self) -> usize {
        self.with(Scene::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.with(Scene::capacity).unwrap_or(0)
    }

    pub fn is_hidden(&self) -> bool {
        self.with(Scene::is_hidden).unwrap_or(true)
    }
}

impl std::fmt::Debug for SceneHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(scene) => std::fmt::Debug::fmt(&*scene, f),
            Err(_) => f.write_str("Scene { <busy> }"),
        }
    }
}

fn busy() -> SceneError {
    error!(target: "scene", "{}", SceneError::Busy);
    SceneError::Busy
}

//=== EntityRef ===========================================================

/// Non-owning reference to an entity inside a scene.
#[derive(Debug, Clone)]
pub struct EntityRef {
    scene: Weak<RefCell<Scene>>,
    id: EntityId,
}

impl EntityRef {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The owning scene, if it still exists.
    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene.upgrade().map(SceneHandle::from_rc)
    }

    /// `true` while the scene exists and still holds the entity.
    pub fn is_alive(&self) -> bool {
        self.with(|_| ()).is_ok()
    }

    //--- Borrowing --------------------------------------------------------

    pub fn with<R>(&self, f: impl FnOnce(&Entity) -> R) -> Result<R, EntityError> {
        let scene = self.upgrade()?;
        let scene = scene.try_borrow().map_err(|_| busy())?;
        scene.entity(self.id).map(f).ok_or_else(|| self.stale())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Entity) -> R) -> Result<R, EntityError> {
        self.with_scene_mut(|scene, id| scene.entity_mut(id).map(f))?
            .ok_or_else(|| self.stale())
    }

    /// Runs `f` with the owning scene borrowed mutably.
    pub(crate) fn with_scene_mut<R>(
        &self,
        f: impl FnOnce(&mut Scene, EntityId) -> R,
    ) -> Result<R, EntityError> {
        let scene = self.upgrade()?;
        let mut scene = scene.try_borrow_mut().map_err(|_| busy())?;
        Ok(f(&mut *scene, self.id))
    }

    fn upgrade(&self) -> Result<Rc<RefCell<Scene>>, EntityError> {
        self.scene.upgrade().ok_or_else(|| self.stale())
    }

    fn stale(&self) -> EntityError {
        let err = EntityError::Stale(self.id);
        warn!(target: "scene", "{}", err);
        err
    }

    //--- Entity Operations ------------------------------------------------

    /// Moves the entity and re-renders its scene.
    pub fn goto(&self, x: f32, y: f32) -> Result<(), EntityError> {
        self.with_scene_mut(|scene, id| {
            let entity = scene.entity_mut(id)?;
            entity.position = Vec2::new(x, y);
            scene.render();
            Some(())
        })?
        .ok_or_else(|| self.stale())
    }

    /// Swaps the bitmap of a visual entity. An unresolved name leaves the
    /// current bitmap in place.
    pub fn change_image(&self, images: &ImageRegistry, image: &str) -> Result<(), EntityError> {
        let bitmap = images.require(image).map_err(|err| {
            error!(target: "images", "{}", err);
            err
        })?;

        self.with_mut(|entity| match entity.visual_mut() {
            Some(visual) => {
                visual.set_bitmap(bitmap);
                Ok(())
            }
            None => Err(EntityError::NotVisual(entity.id())),
        })?
    }

    /// Scaled box size, `(0, 0)` for labels, blank visuals and stale refs.
    pub fn dims(&self) -> (f32, f32) {
        self.with(Entity::dims).unwrap_or((0.0, 0.0))
    }

    pub fn set_on_collision<F>(&self, callback: F) -> Result<(), EntityError>
    where
        F: FnMut(&mut Entity, Collider<'_>) + 'static,
    {
        self.with_mut(|entity| entity.set_on_collision(callback))?
    }

    pub fn set_on_click<F>(&self, callback: F) -> Result<(), EntityError>
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.with_mut(|entity| entity.set_on_click(callback))?
    }

    /// Marks the entity for removal, optionally re-rendering right away.
    pub fn delete(&self, redraw: bool) -> Result<(), EntityError> {
        self.with_scene_mut(|scene, id| {
            scene.entity_mut(id)?.delete();
            if redraw {
                scene.render();
            }
            Some(())
        })?
        .ok_or_else(|| self.stale())
    }

    /// Returns a reusable operation that deletes the entity.
    pub fn delete_op(&self, redraw: bool) -> impl FnMut() + 'static {
        let entity = self.clone();
        move || {
            if let Err(err) = entity.delete(redraw) {
                warn!(target: "scene", "delete {:?} failed: {}", entity.id(), err);
            }
        }
    }

    /// Runs the click callback outside of any scene borrow so it may freely
    /// use scene handles. Returns whether a callback ran.
    pub(crate) fn invoke_click(&self, x: f32, y: f32) -> Result<bool, EntityError> {
        let callback = self.with_mut(|entity| entity.visual_mut().and_then(Visual::take_on_click))?;

        let Some(mut callback) = callback else {
            return Ok(false);
        };
        callback(x, y);

        // The entity may have been cleared by its own callback.
        if let Some(scene) = self.scene.upgrade() {
            if let Ok(mut scene) = scene.try_borrow_mut() {
                if let Some(visual) = scene.entity_mut(self.id).and_then(Entity::visual_mut) {
                    visual.restore_on_click(callback);
                }
            }
        }
        Ok(true)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

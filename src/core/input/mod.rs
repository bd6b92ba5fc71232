//=========================================================================
// Input Router
//=========================================================================
//
// Maps key and pointer events to user callbacks and hit-tests clicks
// against clickable visual entities.
//
// Architecture:
//   InputEvent → InputRouter::dispatch()
//     ├─ KeyDown   → state → exact binding → All → Nums (digits)
//     ├─ KeyUp     → state (key_held = false)
//     ├─ MouseMove → surface-relative → state → move callback
//     ├─ MouseDown → state (pointer_held = true)
//     └─ MouseUp   → surface-relative → click callback → state
//                    → scan tracked scenes → batched entity callbacks
//
// Notes:
// Entity click callbacks are collected during the scan and run only
// after it completes, outside any scene borrow, so a callback may add,
// delete or move entities freely.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod input_state;

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Vec2;
use crate::core::scene::{EntityRef, Scene, SceneHandle};

//=== Public API ==========================================================

pub use event::{is_numeric_key, keys, InputEvent, KeySelector};
pub use input_state::{InputContext, InputState};

//=== Callback Types ======================================================

/// Key callback, receives the pressed key.
pub type KeyCallback = Box<dyn FnMut(&str)>;

/// Pointer callback, receives surface-relative coordinates.
pub type PointerCallback = Box<dyn FnMut(f32, f32)>;

//=== InputRouter =========================================================

/// Routes input events to key bindings, pointer callbacks and entities.
pub struct InputRouter {
    bindings: HashMap<KeySelector, KeyCallback>,
    on_move: Option<PointerCallback>,
    on_click: Option<PointerCallback>,
    scenes: Vec<Weak<RefCell<Scene>>>,
    surface_offset: Vec2,
    context: InputContext,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            on_move: None,
            on_click: None,
            scenes: Vec::new(),
            surface_offset: Vec2::ZERO,
            context: InputContext::new(),
        }
    }

    /// Shared handle to the observable pointer and key state.
    pub fn context(&self) -> InputContext {
        self.context.clone()
    }

    /// Offset of the drawing surface in page space, subtracted from every
    /// pointer event.
    pub fn set_surface_offset(&mut self, x: f32, y: f32) {
        self.surface_offset = Vec2::new(x, y);
    }

    pub fn surface_offset(&self) -> Vec2 {
        self.surface_offset
    }

    /// Includes the scene's entities in click hit testing.
    pub fn track_scene(&mut self, scene: &SceneHandle) {
        let weak = scene.downgrade();
        if !self.scenes.iter().any(|s| s.ptr_eq(&weak)) {
            self.scenes.push(weak);
        }
    }

    //--- Bindings ---------------------------------------------------------

    /// Binds a callback to a key or wildcard. An existing binding for the
    /// same selector is replaced with a warning.
    pub fn bind_key<F>(&mut self, selector: impl Into<KeySelector>, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        let selector = selector.into();
        if self.bindings.contains_key(&selector) {
            warn!(target: "input", "key {:?} is already bound, replacing", selector);
        }
        debug!(target: "input", "bound key {:?}", selector);
        self.bindings.insert(selector, Box::new(callback));
    }

    /// Binds a zero-argument operation, e.g. one built by the movement
    /// factory.
    pub fn bind_key_op<F>(&mut self, selector: impl Into<KeySelector>, mut op: F)
    where
        F: FnMut() + 'static,
    {
        self.bind_key(selector, move |_: &str| op());
    }

    pub fn unbind_key(&mut self, selector: impl Into<KeySelector>) -> bool {
        self.bindings.remove(&selector.into()).is_some()
    }

    pub fn is_bound(&self, selector: impl Into<KeySelector>) -> bool {
        self.bindings.contains_key(&selector.into())
    }

    /// Replaces the pointer move callback.
    pub fn set_move_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.on_move = Some(Box::new(callback));
    }

    /// Replaces the surface click callback, which runs before any entity
    /// click callback.
    pub fn set_click_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.on_click = Some(Box::new(callback));
    }

    //--- Dispatch ---------------------------------------------------------

    pub fn dispatch(&mut self, event: InputEvent) {
        trace!(target: "input", "dispatch {:?}", event);
        match event {
            InputEvent::KeyDown { key } => self.on_key_down(&key),
            InputEvent::KeyUp { key } => self.on_key_up(&key),
            InputEvent::MouseMove { x, y } => self.on_mouse_move(x, y),
            InputEvent::MouseDown { x, y } => self.on_mouse_down(x, y),
            InputEvent::MouseUp { x, y } => {
                self.on_mouse_up(x, y);
            }
        }
    }

    pub fn on_key_down(&mut self, key: &str) {
        self.context.update(|state| {
            state.last_key = Some(key.to_owned());
            state.key_held = true;
        });

        if let Some(callback) = self.bindings.get_mut(&KeySelector::Key(key.to_owned())) {
            callback(key);
        }
        if let Some(callback) = self.bindings.get_mut(&KeySelector::All) {
            callback(key);
        }
        if is_numeric_key(key) {
            if let Some(callback) = self.bindings.get_mut(&KeySelector::Nums) {
                callback(key);
            }
        }
    }

    pub fn on_key_up(&mut self, _key: &str) {
        self.context.update(|state| state.key_held = false);
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        let at = self.relative(x, y);
        self.context.update(|state| state.last_pointer = at);

        if let Some(callback) = self.on_move.as_mut() {
            callback(at.x, at.y);
        }
    }

    pub fn on_mouse_down(&mut self, _x: f32, _y: f32) {
        self.context.update(|state| state.pointer_held = true);
    }

    /// Handles a click. Returns the number of entity callbacks that ran.
    pub fn on_mouse_up(&mut self, x: f32, y: f32) -> usize {
        let at = self.relative(x, y);

        if let Some(callback) = self.on_click.as_mut() {
            callback(at.x, at.y);
        }

        self.context.update(|state| {
            state.pointer_held = false;
            state.last_click = Some(at);
        });

        //--- Step 1: Scan --------------------------------------------------
        let batch = self.clicked_entities(at);

        //--- Step 2: Run batch ---------------------------------------------
        let mut fired = 0;
        for entity in &batch {
            match entity.invoke_click(at.x, at.y) {
                Ok(true) => fired += 1,
                Ok(false) => {}
                Err(err) => debug!(target: "input", "click skipped: {}", err),
            }
        }

        if fired > 0 {
            debug!(target: "input", "click at ({}, {}) hit {} entities", at.x, at.y, fired);
        }
        fired
    }

    //--- Internal Helpers -------------------------------------------------

    fn relative(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) - self.surface_offset
    }

    fn clicked_entities(&mut self, at: Vec2) -> Vec<EntityRef> {
        self.scenes.retain(|scene| scene.strong_count() > 0);

        let mut batch = Vec::new();
        for weak in &self.scenes {
            let Some(scene) = weak.upgrade() else { continue };
            let scene = SceneHandle::from_rc(scene);
            match scene.with(|s| s.clickable_at(at.x, at.y)) {
                Ok(ids) => batch.extend(ids.into_iter().map(|id| scene.entity(id))),
                Err(err) => warn!(target: "input", "click scan skipped a scene: {}", err),
            }
        }
        batch
    }
}

impl std::fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bound: Vec<_> = self.bindings.keys().collect();
        bound.sort_by_key(|s| format!("{:?}", s));
        f.debug_struct("InputRouter")
            .field("bindings", &bound)
            .field("scenes", &self.scenes.len())
            .field("surface_offset", &self.surface_offset)
            .field("state", &self.context.snapshot())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::VisualOptions;
    use crate::core::images::{Bitmap, ImageRegistry};
    use crate::core::scene::SceneConfig;
    use crate::core::surface::{Canvas, CommandRecorder};
    use std::cell::Cell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn journal() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn scene() -> (SceneHandle, ImageRegistry) {
        let canvas = Canvas::shared(CommandRecorder::new(200.0, 200.0));
        let scene = SceneHandle::new(Scene::new(canvas, SceneConfig::default()));
        let mut images = ImageRegistry::new();
        images.insert("box", Bitmap::blank(20, 20));
        (scene, images)
    }

    //=====================================================================
    // Keys
    //=====================================================================

    #[test]
    fn exact_binding_runs_before_all() {
        let mut router = InputRouter::new();
        let log = journal();

        let exact = Rc::clone(&log);
        router.bind_key("w", move |key: &str| exact.borrow_mut().push(format!("w:{key}")));
        let all = Rc::clone(&log);
        router.bind_key(KeySelector::All, move |key: &str| all.borrow_mut().push(format!("all:{key}")));

        router.on_key_down("w");
        assert_eq!(*log.borrow(), vec!["w:w", "all:w"]);
    }

    #[test]
    fn nums_fires_only_for_digits() {
        let mut router = InputRouter::new();
        let log = journal();
        let nums = Rc::clone(&log);
        router.bind_key("~-", move |key: &str| nums.borrow_mut().push(key.to_owned()));

        router.on_key_down("7");
        router.on_key_down("a");
        router.on_key_down("F1");
        assert_eq!(*log.borrow(), vec!["7"]);
    }

    #[test]
    fn duplicate_binding_replaces_previous() {
        let mut router = InputRouter::new();
        let log = journal();

        let first = Rc::clone(&log);
        router.bind_key("a", move |_: &str| first.borrow_mut().push("first".into()));
        let second = Rc::clone(&log);
        router.bind_key("a", move |_: &str| second.borrow_mut().push("second".into()));

        router.on_key_down("a");
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut router = InputRouter::new();
        let context = router.context();

        router.dispatch(InputEvent::key_down(keys::UP));
        assert!(context.is_key_held());
        assert_eq!(context.last_key().as_deref(), Some("ArrowUp"));

        router.dispatch(InputEvent::key_up(keys::UP));
        assert!(!context.is_key_held());
        assert_eq!(context.last_key().as_deref(), Some("ArrowUp"));
    }

    #[test]
    fn bound_op_runs_without_key() {
        let mut router = InputRouter::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        router.bind_key_op(keys::SPACE, move || counter.set(counter.get() + 1));

        router.on_key_down(" ");
        router.on_key_down(" ");
        assert_eq!(count.get(), 2);
        assert!(router.unbind_key(" "));
        assert!(!router.is_bound(" "));
    }

    //=====================================================================
    // Pointer
    //=====================================================================

    #[test]
    fn move_is_surface_relative() {
        let mut router = InputRouter::new();
        router.set_surface_offset(8.0, 16.0);
        let seen = Rc::new(Cell::new((0.0, 0.0)));
        let sink = Rc::clone(&seen);
        router.set_move_callback(move |x, y| sink.set((x, y)));

        router.dispatch(InputEvent::MouseMove { x: 20.0, y: 20.0 });

        assert_eq!(seen.get(), (12.0, 4.0));
        assert_eq!(router.context().pointer(), Vec2::new(12.0, 4.0));
    }

    #[test]
    fn press_and_release_toggle_held_flag() {
        let mut router = InputRouter::new();
        let context = router.context();

        router.dispatch(InputEvent::MouseDown { x: 1.0, y: 1.0 });
        assert!(context.is_pointer_held());

        router.dispatch(InputEvent::MouseUp { x: 3.0, y: 4.0 });
        assert!(!context.is_pointer_held());
        assert_eq!(context.last_click(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn click_hits_only_clickable_entity() {
        let (scene, images) = scene();
        let mut router = InputRouter::new();
        router.track_scene(&scene);

        let target = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(10.0, 10.0))
            .unwrap();
        scene
            .spawn_visual(
                &images,
                "box",
                VisualOptions::default().at(10.0, 10.0).with_clickable(false),
            )
            .unwrap();

        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        target
            .set_on_click(move |x, y| sink.borrow_mut().push((x, y)))
            .unwrap();

        assert_eq!(router.on_mouse_up(12.0, 12.0), 1);
        assert_eq!(*hits.borrow(), vec![(12.0, 12.0)]);
    }

    #[test]
    fn dispatched_mouse_up_reaches_entity() {
        let (scene, images) = scene();
        let mut router = InputRouter::new();
        router.track_scene(&scene);

        let target = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(0.0, 0.0))
            .unwrap();
        let clicked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&clicked);
        target.set_on_click(move |_, _| flag.set(true)).unwrap();

        router.dispatch(InputEvent::MouseUp { x: 5.0, y: 5.0 });
        assert!(clicked.get());
    }

    #[test]
    fn surface_click_runs_before_entities() {
        let (scene, images) = scene();
        let mut router = InputRouter::new();
        router.track_scene(&scene);
        let entity = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(0.0, 0.0))
            .unwrap();

        let log = journal();
        let surface = Rc::clone(&log);
        router.set_click_callback(move |_, _| surface.borrow_mut().push("surface".into()));
        let sprite = Rc::clone(&log);
        entity
            .set_on_click(move |_, _| sprite.borrow_mut().push("entity".into()))
            .unwrap();

        router.on_mouse_up(5.0, 5.0);
        assert_eq!(*log.borrow(), vec!["surface", "entity"]);
    }

    #[test]
    fn hidden_scene_is_not_hit() {
        let (scene, images) = scene();
        let mut router = InputRouter::new();
        router.track_scene(&scene);
        let entity = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(0.0, 0.0))
            .unwrap();
        entity.set_on_click(|_, _| {}).unwrap();

        scene.set_visibility(false).unwrap();
        assert_eq!(router.on_mouse_up(5.0, 5.0), 0);
    }

    #[test]
    fn click_callbacks_may_mutate_scene() {
        let (scene, images) = scene();
        let mut router = InputRouter::new();
        router.track_scene(&scene);

        let first = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(0.0, 0.0))
            .unwrap();
        let second = scene
            .spawn_visual(&images, "box", VisualOptions::default().at(0.0, 0.0).with_clip(false))
            .unwrap();

        let mut delete_second = second.delete_op(true);
        first.set_on_click(move |_, _| delete_second()).unwrap();
        second.set_on_click(|_, _| {}).unwrap();

        // Both were collected by the scan; the second is gone when its turn comes.
        assert_eq!(router.on_mouse_up(1.0, 1.0), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn dropped_scene_is_forgotten() {
        let mut router = InputRouter::new();
        {
            let (scene, _) = scene();
            router.track_scene(&scene);
            router.track_scene(&scene);
            assert_eq!(router.scenes.len(), 1);
        }
        assert_eq!(router.on_mouse_up(0.0, 0.0), 0);
        assert!(router.scenes.is_empty());
    }
}

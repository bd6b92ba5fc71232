//=========================================================================
// Scenic Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(surface)──>  Engine
//         │                                 ├─ SharedCanvas (one surface)
//         ├─ with_channel_capacity()        ├─ ImageRegistry
//         ├─ with_max_events_per_pump()     ├─ InputRouter ◄── pump() ◄── channel
//         ├─ with_surface_offset()          ├─ DebugConsole
//         └─ with_collision_boxes()         └─ scenes: Vec<SceneHandle>
// ```
//
// The host drives the engine from its own loop: forward input into the
// channel, call `pump()` once per frame, render scenes as needed.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::debug_console::DebugConsole;
use crate::core::entity::VisualOptions;
use crate::core::error::SceneError;
use crate::core::geometry::Vec2;
use crate::core::images::{Bitmap, ImageRegistry};
use crate::core::input::{InputContext, InputEvent, InputRouter};
use crate::core::platform_bridge::{EventCollector, PumpControl};
use crate::core::scene::{EntityRef, Scene, SceneConfig, SceneHandle};
use crate::core::surface::{Canvas, SharedCanvas, Surface};
use crate::platform::PlatformBridge;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Channel capacity**: 128 events
/// - **Max events per pump**: 100
/// - **Surface offset**: (0, 0)
/// - **Collision boxes**: off
/// - **Debug commands**: enabled
///
/// # Examples
///
/// ```
/// use scenic_engine::core::surface::CommandRecorder;
/// use scenic_engine::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_channel_capacity(256)
///     .with_ancestor_offsets([(8.0, 8.0), (0.0, 40.0)])
///     .build(CommandRecorder::new(480.0, 360.0));
///
/// assert_eq!(engine.router().surface_offset().y, 48.0);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    channel_capacity: usize,
    max_events_per_pump: usize,
    surface_offset: Vec2,
    collision_boxes: bool,
    commands_enabled: bool,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            channel_capacity: 128,
            max_events_per_pump: 100,
            surface_offset: Vec2::ZERO,
            collision_boxes: false,
            commands_enabled: true,
        }
    }

    /// Sets the capacity of the input event channel.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Caps how many queued events one [`Engine::pump`] dispatches.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_events_per_pump(mut self, max: usize) -> Self {
        assert!(max > 0, "Max events per pump must be positive");
        self.max_events_per_pump = max;
        self
    }

    /// Position of the drawing surface in page space.
    pub fn with_surface_offset(mut self, x: f32, y: f32) -> Self {
        self.surface_offset = Vec2::new(x, y);
        self
    }

    /// Sets the surface offset to the sum of each ancestor element's
    /// offset, innermost first.
    pub fn with_ancestor_offsets<I>(mut self, offsets: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        self.surface_offset = offsets
            .into_iter()
            .fold(Vec2::ZERO, |sum, offset| sum + Vec2::from(offset));
        self
    }

    /// Draws every visual's box outline.
    ///
    /// Default: false
    pub fn with_collision_boxes(mut self, show: bool) -> Self {
        self.collision_boxes = show;
        self
    }

    /// Default: true
    pub fn with_commands_enabled(mut self, enabled: bool) -> Self {
        self.commands_enabled = enabled;
        self
    }

    /// Builds the engine around the given drawing surface.
    pub fn build(self, surface: impl Surface + 'static) -> Engine {
        info!(
            "Building engine (channel: {}, pump: {}, offset: ({}, {}))",
            self.channel_capacity, self.max_events_per_pump, self.surface_offset.x, self.surface_offset.y
        );

        let canvas = Canvas::shared(surface);
        if let Ok(mut canvas) = canvas.try_borrow_mut() {
            canvas.set_show_collision_boxes(self.collision_boxes);
        }

        let (sender, receiver) = bounded(self.channel_capacity);

        let mut router = InputRouter::new();
        router.set_surface_offset(self.surface_offset.x, self.surface_offset.y);

        Engine {
            console: DebugConsole::new(canvas.clone(), self.commands_enabled),
            canvas,
            images: ImageRegistry::new(),
            router,
            collector: EventCollector::new(receiver, self.max_events_per_pump),
            sender: Some(sender),
            scenes: Vec::new(),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Scenic engine runtime.
///
/// # Examples
///
/// ```
/// use scenic_engine::prelude::*;
///
/// let mut engine = Engine::new(CommandRecorder::new(200.0, 200.0));
/// engine.load_image("player", Bitmap::blank(16, 16));
///
/// let scene = engine.new_scene(SceneConfig::default());
/// let player = engine.spawn_visual(&scene, "player", VisualOptions::default()).unwrap();
///
/// engine.router_mut().bind_key_op(keys::RIGHT, make_default_move(Direction::Right, player.clone()));
/// engine.dispatch(InputEvent::key_down(keys::RIGHT));
///
/// assert_eq!(player.with(|e| e.position.x).unwrap(), 60.0);
/// ```
pub struct Engine {
    canvas: SharedCanvas,
    images: ImageRegistry,
    router: InputRouter,
    collector: EventCollector,
    sender: Option<Sender<InputEvent>>,
    console: DebugConsole,
    scenes: Vec<SceneHandle>,
}

impl Engine {
    //--- Construction -----------------------------------------------------

    /// Engine with default settings.
    pub fn new(surface: impl Surface + 'static) -> Self {
        EngineBuilder::new().build(surface)
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    //--- Resources --------------------------------------------------------

    pub fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageRegistry {
        &mut self.images
    }

    /// Registers a decoded bitmap under `name`.
    pub fn load_image(&mut self, name: impl Into<String>, bitmap: Bitmap) {
        self.images.insert(name, bitmap);
    }

    //--- Scenes -----------------------------------------------------------

    /// Creates a scene drawing on the engine's surface. The scene lives as
    /// long as the engine and takes part in click hit testing.
    pub fn new_scene(&mut self, config: SceneConfig) -> SceneHandle {
        let scene = SceneHandle::new(Scene::new(self.canvas.clone(), config));
        self.router.track_scene(&scene);
        self.scenes.push(scene.clone());
        scene
    }

    pub fn scenes(&self) -> &[SceneHandle] {
        &self.scenes
    }

    /// Spawns a visual whose bitmap is resolved from the engine's images.
    pub fn spawn_visual(
        &self,
        scene: &SceneHandle,
        image: &str,
        options: VisualOptions,
    ) -> Result<EntityRef, SceneError> {
        scene.spawn_visual(&self.images, image, options)
    }

    //--- Input ------------------------------------------------------------

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// Observable pointer and key state.
    pub fn input(&self) -> InputContext {
        self.router.context()
    }

    /// Sender for the engine's event channel, `None` once closed.
    pub fn event_sender(&self) -> Option<Sender<InputEvent>> {
        self.sender.clone()
    }

    /// Bridge forwarding winit window events into this engine.
    pub fn platform_bridge(&self) -> Option<PlatformBridge> {
        self.event_sender().map(PlatformBridge::new)
    }

    /// Drops the engine's own sender so [`Engine::pump`] reports
    /// [`PumpControl::Disconnected`] once every outside sender is gone.
    pub fn close_event_channel(&mut self) {
        self.sender = None;
    }

    /// Routes one event immediately, bypassing the channel.
    pub fn dispatch(&mut self, event: InputEvent) {
        self.router.dispatch(event);
    }

    /// Routes queued events; call once per host frame.
    pub fn pump(&mut self) -> PumpControl {
        self.collector.pump(&mut self.router)
    }

    //--- Debug ------------------------------------------------------------

    pub fn console(&mut self) -> &mut DebugConsole {
        &mut self.console
    }

    /// Runs a debug command and returns its status line.
    pub fn run_command(&mut self, line: &str, scene: Option<&SceneHandle>) -> String {
        self.console.run(line, scene)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("images", &self.images.len())
            .field("scenes", &self.scenes.len())
            .field("router", &self.router)
            .field("channel_open", &self.sender.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

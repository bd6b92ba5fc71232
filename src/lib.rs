//=========================================================================
// Scenic Engine — Library Root
//
// This crate defines the public API surface of the Scenic Engine, a
// minimal 2D scene-graph and input-dispatch engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems (scenes, entities, overlap, input, movement)
// - Bridge winit window events into the engine's input channel
//
// Typical usage:
// ```no_run
// use scenic_engine::prelude::*;
//
// let mut engine = Engine::new(CommandRecorder::new(480.0, 360.0));
// let scene = engine.new_scene(SceneConfig::default());
// scene.render().ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all engine systems and logic. Normal application code
// will mostly use the `Engine` facade and the `prelude`.
//
pub mod core;
pub mod prelude;

//--- Platform & Engine ---------------------------------------------------
//
// `platform` translates winit window events; the host owns the window and
// its event loop.
//
// `engine` defines the main engine entry point and builder.
//
pub mod platform;
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};

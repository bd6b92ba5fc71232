//=========================================================================
// Platform Bridge
//=========================================================================
//
// Core-side end of the event channel between a platform backend (the
// winit translator, or host code) and the input router.
//
// Components:
// - `event_collector`: bounded draining of the channel into the router
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;

//=== Public API ==========================================================

pub use event_collector::PumpControl;
pub(crate) use event_collector::EventCollector;

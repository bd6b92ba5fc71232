//=========================================================================
// Drawing Surface
//=========================================================================
//
// The single raster surface every scene draws onto.
//
// Architecture:
//   Scene::render() → Canvas (shared) → Box<dyn Surface> (host backend)
//
// Backends implement `Surface`; the engine wraps the backend in a
// `Canvas`, which adds the collision-box overlay flag, and shares it
// between scenes as `SharedCanvas`.
//
//=========================================================================

//=== Module Declarations =================================================

mod recorder;

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::images::Bitmap;

//=== Public API ==========================================================

pub use recorder::{CommandLog, CommandRecorder, DrawCommand};

//=== Font ================================================================

/// Font used to draw label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Size in pixels.
    pub size: u32,
    pub family: String,
}

impl Font {
    pub fn new(size: u32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(30, "Arial")
    }
}

/// Formats as a CSS font shorthand, e.g. `30px Arial`.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

//=== Surface Trait =======================================================

/// Raster drawing backend.
///
/// Implemented by the host (a window framebuffer, a test recorder, ...).
/// All coordinates are surface pixels, top-left origin.
pub trait Surface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Wipes the whole surface.
    fn clear_region(&mut self);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &Font);

    /// Draws `bitmap` stretched into the given rectangle.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32, width: f32, height: f32);

    /// Outlines a rectangle. Only used by the collision-box overlay.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

//=== Canvas ==============================================================

/// The engine-side wrapper around the host surface.
pub struct Canvas {
    surface: Box<dyn Surface>,
    show_collision_boxes: bool,
}

/// Canvas shared by every scene drawing onto the same surface.
pub type SharedCanvas = Rc<RefCell<Canvas>>;

impl Canvas {
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            surface,
            show_collision_boxes: false,
        }
    }

    /// Wraps a backend and returns the shared handle scenes hold on to.
    pub fn shared(surface: impl Surface + 'static) -> SharedCanvas {
        Rc::new(RefCell::new(Self::new(Box::new(surface))))
    }

    pub fn width(&self) -> f32 {
        self.surface.width()
    }

    pub fn height(&self) -> f32 {
        self.surface.height()
    }

    pub fn show_collision_boxes(&self) -> bool {
        self.show_collision_boxes
    }

    pub fn set_show_collision_boxes(&mut self, show: bool) {
        self.show_collision_boxes = show;
    }

    pub(crate) fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("show_collision_boxes", &self.show_collision_boxes)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_formats_as_css_shorthand() {
        assert_eq!(Font::default().to_string(), "30px Arial");
        assert_eq!(Font::new(10, "Courier").to_string(), "10px Courier");
    }

    #[test]
    fn canvas_reports_backend_size() {
        let canvas = Canvas::shared(CommandRecorder::new(640.0, 480.0));
        let canvas = canvas.borrow();
        assert_eq!((canvas.width(), canvas.height()), (640.0, 480.0));
        assert!(!canvas.show_collision_boxes());
    }

    #[test]
    fn canvas_forwards_draw_calls() {
        let recorder = CommandRecorder::new(100.0, 100.0);
        let log = recorder.log();
        let canvas = Canvas::shared(recorder);

        canvas.borrow_mut().surface_mut().clear_region();
        canvas.borrow_mut().surface_mut().stroke_rect(1.0, 2.0, 3.0, 4.0);

        assert_eq!(
            log.take(),
            vec![
                DrawCommand::Clear,
                DrawCommand::StrokeRect {
                    x: 1.0,
                    y: 2.0,
                    width: 3.0,
                    height: 4.0
                },
            ]
        );
    }
}

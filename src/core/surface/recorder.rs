//=========================================================================
// Command Recorder
//=========================================================================
//
// Headless `Surface` that records every draw call instead of rasterizing.
//
// The recorder is moved into the canvas; the `CommandLog` handle stays
// with the caller so the recorded frame can be inspected afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{Font, Surface};
use crate::core::images::Bitmap;

//=== DrawCommand =========================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Text {
        text: String,
        x: f32,
        y: f32,
        font: Font,
    },
    Bitmap {
        /// Size of the source bitmap, for identification in assertions.
        source: (u32, u32),
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

//=== CommandLog ==========================================================

/// Shared view of the commands recorded by a [`CommandRecorder`].
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
}

impl CommandLog {
    /// Returns all recorded commands and empties the log.
    pub fn take(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    /// Returns a copy of the recorded commands.
    pub fn snapshot(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    fn push(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

//=== CommandRecorder =====================================================

/// A fixed-size surface that records draw calls into a [`CommandLog`].
#[derive(Debug)]
pub struct CommandRecorder {
    width: f32,
    height: f32,
    log: CommandLog,
}

impl CommandRecorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            log: CommandLog::default(),
        }
    }

    /// Returns a handle to the recorded commands.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl Surface for CommandRecorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_region(&mut self) {
        self.log.push(DrawCommand::Clear);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &Font) {
        self.log.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            font: font.clone(),
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32, width: f32, height: f32) {
        self.log.push(DrawCommand::Bitmap {
            source: (bitmap.width(), bitmap.height()),
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.log.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

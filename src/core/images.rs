//=========================================================================
// Image Registry
//=========================================================================
//
// Read-only name → bitmap lookup consumed by visual entities.
//
// Loading and decoding happen elsewhere; the registry only stores
// already-decoded bitmaps. Entities hold an `Rc<Bitmap>` into the
// registry, so many entities can share one bitmap without copying it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::ImageError;

//=== Bitmap ==============================================================

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps decoded RGBA8 pixel data.
    ///
    /// `pixels` is expected to hold `width * height * 4` bytes; shorter
    /// buffers are padded with transparent pixels, longer ones truncated.
    pub fn new(width: u32, height: u32, mut pixels: Vec<u8>) -> Self {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            warn!(
                target: "images",
                "Bitmap {}x{} expects {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            );
            pixels.resize(expected, 0);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A fully transparent bitmap of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

//=== ImageRegistry =======================================================

/// Maps image names to shared, decoded bitmaps.
///
/// Populated by the host before scene setup; read by entity constructors
/// and [`EntityRef::change_image`](crate::core::scene::EntityRef::change_image).
#[derive(Debug, Default)]
pub struct ImageRegistry {
    images: HashMap<String, Rc<Bitmap>>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a bitmap under `name`, replacing (with a warning) any
    /// bitmap already registered under the same name.
    pub fn insert(&mut self, name: impl Into<String>, bitmap: Bitmap) -> Rc<Bitmap> {
        let name = name.into();
        let bitmap = Rc::new(bitmap);
        if self.images.insert(name.clone(), Rc::clone(&bitmap)).is_some() {
            warn!(target: "images", "the image: {} already exists", name);
        }
        info!(target: "images", "the image: {} is loaded", name);
        bitmap
    }

    /// Looks up a bitmap by name.
    pub fn resolve(&self, name: &str) -> Option<Rc<Bitmap>> {
        self.images.get(name).cloned()
    }

    /// Like [`resolve`](Self::resolve) but reports a missing name as an
    /// [`ImageError`].
    pub(crate) fn require(&self, name: &str) -> Result<Rc<Bitmap>, ImageError> {
        self.resolve(name)
            .ok_or_else(|| ImageError::Unresolved(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

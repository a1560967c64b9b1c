//! The photo entity
//!
//! A photo owns its source bytes, original pixel dimensions, normalized
//! crop, color adjustments, and caption text. Dimensions are read once at
//! import; the initial crop is a centered cover fit for the target ratio.

use crate::{RenderError, Result};
use photocard_layout::{Crop, auto_fit_crop};
use std::io::Cursor;
use std::path::Path;

/// Brightness/contrast/saturation percentages; 100 = identity.
///
/// Values are clamped to [0, 200] on construction and compose
/// multiplicatively, so the result does not depend on the crop box and the
/// filter can run over the full frame before cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
        }
    }
}

impl Adjustments {
    pub fn new(brightness: f32, contrast: f32, saturation: f32) -> Self {
        Self {
            brightness: brightness.clamp(0.0, 200.0),
            contrast: contrast.clamp(0.0, 200.0),
            saturation: saturation.clamp(0.0, 200.0),
        }
    }

    /// True when applying these adjustments would change nothing
    pub fn is_identity(&self) -> bool {
        self.brightness == 100.0 && self.contrast == 100.0 && self.saturation == 100.0
    }
}

/// One photo in the collection, in import order
#[derive(Debug, Clone)]
pub struct Photo {
    /// Encoded source bytes (PNG/JPEG/...)
    pub source: Vec<u8>,
    /// Original pixel width, read at import
    pub width: u32,
    /// Original pixel height, read at import
    pub height: u32,
    pub crop: Crop,
    pub adjustments: Adjustments,
    pub caption: String,
}

impl Photo {
    /// Create a photo from encoded bytes: reads the dimensions and computes
    /// the initial cover-fit crop for `target_ratio`.
    pub fn from_bytes(source: Vec<u8>, target_ratio: f64) -> Result<Self> {
        let (width, height) = image::ImageReader::new(Cursor::new(&source))
            .with_guessed_format()?
            .into_dimensions()?;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSource(format!(
                "zero dimension ({width}x{height})"
            )));
        }
        let crop = auto_fit_crop(width, height, target_ratio);
        Ok(Self {
            source,
            width,
            height,
            crop,
            adjustments: Adjustments::default(),
            caption: String::new(),
        })
    }

    /// Load a photo from disk; the decode runs on a blocking task and is
    /// awaited before the next photo is touched.
    pub async fn load(path: impl AsRef<Path>, target_ratio: f64) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        tokio::task::spawn_blocking(move || Photo::from_bytes(bytes, target_ratio)).await?
    }

    /// Original pixel aspect ratio (width / height)
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Recompute every photo's crop for a new target aspect ratio.
///
/// This is an unconditional reset: manual crop edits made under the
/// previous ratio are discarded, since keeping them would leave those
/// photos violating the new ratio.
pub fn reapply_aspect_ratio(photos: &mut [Photo], new_ratio: f64) {
    for photo in photos.iter_mut() {
        photo.crop = auto_fit_crop(photo.width, photo.height, new_ratio);
    }
}

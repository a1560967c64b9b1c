//! Normalized crop calculus
//!
//! A crop box selects the visible region of a source photo as a rectangle
//! in [0,1]×[0,1], relative to the photo's original, unrotated pixel
//! dimensions. All operations here are pure and keep the crop invariants:
//! width > 0, height > 0, x + width ≤ 1, y + height ≤ 1.

use crate::constants::{MIN_CROP_WIDTH, RATIO_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Normalized crop rectangle over a photo's original pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Crop {
    /// The full frame
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Check the crop invariants (with a small float tolerance on the upper
    /// bounds)
    pub fn is_valid(&self) -> bool {
        const EPS: f64 = 1e-9;
        self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= 1.0 + EPS
            && self.y + self.height <= 1.0 + EPS
    }
}

/// Compute a centered "cover" crop: the largest region of the image whose
/// aspect ratio equals `target_ratio`.
///
/// Images already within [`RATIO_TOLERANCE`] of the target keep the full
/// frame. A relatively wider image keeps full height and trims the sides; a
/// relatively taller image keeps full width and trims top/bottom. Pure:
/// identical inputs always yield identical output.
pub fn auto_fit_crop(img_w: u32, img_h: u32, target_ratio: f64) -> Crop {
    let img_ratio = img_w as f64 / img_h as f64;
    if (img_ratio - target_ratio).abs() < RATIO_TOLERANCE {
        return Crop::full();
    }

    if img_ratio > target_ratio {
        let width = target_ratio / img_ratio;
        Crop {
            x: (1.0 - width) / 2.0,
            y: 0.0,
            width,
            height: 1.0,
        }
    } else {
        let height = img_ratio / target_ratio;
        Crop {
            x: 0.0,
            y: (1.0 - height) / 2.0,
            width: 1.0,
            height,
        }
    }
}

/// Translate a crop by normalized deltas, saturating at the image bounds.
///
/// Size is never changed; a zero delta is the identity. Any delta magnitude
/// is safe: the position clamps to [0, 1−size] rather than wrapping.
pub fn apply_drag(crop: Crop, delta_x: f64, delta_y: f64) -> Crop {
    Crop {
        x: (crop.x + delta_x).clamp(0.0, 1.0 - crop.width),
        y: (crop.y + delta_y).clamp(0.0, 1.0 - crop.height),
        ..crop
    }
}

/// Grow or shrink a crop from its fixed top-left anchor.
///
/// Height is derived from width as width · (img_aspect / target_ratio):
/// crop space is normalized by raw pixel counts, not square pixels, so the
/// image aspect corrects the scale between the two axes. Width is floored
/// at [`MIN_CROP_WIDTH`], then the box is clamped against the right edge
/// (recomputing height) and the bottom edge (recomputing width from
/// height). The (x, y) position never moves.
pub fn apply_resize(crop: Crop, delta_width: f64, target_ratio: f64, img_aspect: f64) -> Crop {
    let height_per_width = img_aspect / target_ratio;

    let mut width = (crop.width + delta_width).max(MIN_CROP_WIDTH);
    let mut height = width * height_per_width;

    if crop.x + width > 1.0 {
        width = 1.0 - crop.x;
        height = width * height_per_width;
    }
    if crop.y + height > 1.0 {
        height = 1.0 - crop.y;
        width = height / height_per_width;
    }

    Crop {
        width,
        height,
        ..crop
    }
}

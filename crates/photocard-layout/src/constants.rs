//! Shared constants for card layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout and export process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Crop Calculus
// =============================================================================

/// Aspect-ratio tolerance below which a photo is treated as already matching
/// the target ratio and the full frame is kept. Avoids degenerate near-zero
/// crops from float error.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Minimum normalized crop width; resizing never shrinks a crop below this.
pub const MIN_CROP_WIDTH: f64 = 0.1;

// =============================================================================
// Cell Styles
// =============================================================================

/// Side margin of the bordered-caption ("polaroid") style, as a fraction of
/// cell width.
pub const POLAROID_MARGIN_RATIO: f64 = 0.05;

/// Inset of the thin-border ("minimal") style on all sides (mm).
pub const THIN_BORDER_INSET_MM: f64 = 3.0;

/// Caption band height used when the settings leave it unset (mm).
pub const DEFAULT_CAPTION_SPACE_MM: f64 = 12.0;

/// Horizontal margin kept between caption text and the band edges (mm).
pub const CAPTION_TEXT_MARGIN_MM: f64 = 2.0;

// =============================================================================
// Text Measuring
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f64 = 0.5;

//! Image compositing: filter, crop sample, scale
//!
//! Runs per photo at render time: adjustments over the full frame first
//! (so they are WYSIWYG regardless of the crop box), then the crop region
//! is sampled in source pixels and scaled to the exact placement size. A
//! photo that fails to decode yields `None` and a logged warning; the rest
//! of the batch is unaffected.

use crate::photo::{Adjustments, Photo};
use image::imageops::{self, FilterType};
use image::RgbImage;
use log::warn;
use photocard_layout::Crop;

// Rec. 709 luma weights
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Apply brightness/contrast/saturation to the whole image.
///
/// Per channel, in normalized [0,1] space: mix toward luma by the
/// saturation factor, scale around 0.5 by the contrast factor, multiply by
/// the brightness factor, clamp. Identity adjustments return the image
/// untouched.
pub fn apply_adjustments(mut img: RgbImage, adjustments: &Adjustments) -> RgbImage {
    if adjustments.is_identity() {
        return img;
    }

    let b = adjustments.brightness / 100.0;
    let c = adjustments.contrast / 100.0;
    let s = adjustments.saturation / 100.0;

    for pixel in img.pixels_mut() {
        let [r, g, bl] = pixel.0;
        let mut r = r as f32 / 255.0;
        let mut g = g as f32 / 255.0;
        let mut bl = bl as f32 / 255.0;

        let luma = LUMA_R * r + LUMA_G * g + LUMA_B * bl;
        r = luma + (r - luma) * s;
        g = luma + (g - luma) * s;
        bl = luma + (bl - luma) * s;

        r = 0.5 + (r - 0.5) * c;
        g = 0.5 + (g - 0.5) * c;
        bl = 0.5 + (bl - 0.5) * c;

        r *= b;
        g *= b;
        bl *= b;

        pixel.0 = [
            (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (bl.clamp(0.0, 1.0) * 255.0).round() as u8,
        ];
    }
    img
}

/// Sample the normalized crop region in source pixel coordinates.
///
/// sx = crop.x · w, sw = crop.width · w (and analogous for y), clamped to
/// the image bounds with a 1px floor so a degenerate crop still yields a
/// sample.
pub fn sample_crop(img: &RgbImage, crop: &Crop) -> RgbImage {
    let (w, h) = img.dimensions();
    let sx = ((crop.x * w as f64).round() as u32).min(w.saturating_sub(1));
    let sy = ((crop.y * h as f64).round() as u32).min(h.saturating_sub(1));
    let sw = ((crop.width * w as f64).round() as u32).clamp(1, w - sx);
    let sh = ((crop.height * h as f64).round() as u32).clamp(1, h - sy);
    imageops::crop_imm(img, sx, sy, sw, sh).to_image()
}

/// Render one photo into a `target_w_px` × `target_h_px` pixel buffer.
///
/// Returns `None` (blank cell) when the source fails to decode, has a zero
/// dimension, or the placement is degenerate. Never aborts the batch.
pub fn composite(photo: &Photo, target_w_px: u32, target_h_px: u32) -> Option<RgbImage> {
    if target_w_px == 0 || target_h_px == 0 {
        return None;
    }

    let decoded = match image::load_from_memory(&photo.source) {
        Ok(img) => img.to_rgb8(),
        Err(err) => {
            warn!("skipping photo: failed to decode source image: {err}");
            return None;
        }
    };
    if decoded.width() == 0 || decoded.height() == 0 {
        warn!("skipping photo: source image has zero dimensions");
        return None;
    }

    let adjusted = apply_adjustments(decoded, &photo.adjustments);
    let cropped = sample_crop(&adjusted, &photo.crop);
    Some(imageops::resize(
        &cropped,
        target_w_px,
        target_h_px,
        FilterType::Lanczos3,
    ))
}

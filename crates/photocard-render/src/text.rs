//! Raster caption text: font discovery and glyph drawing

use image::{Rgba, RgbaImage};
use log::{info, warn};
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};

// Common system locations tried when no font file is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn try_load(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        warn!("failed to parse font file: {}", path.display());
    }
    font
}

/// Find a TrueType font for raster captions.
///
/// The configured file wins; otherwise common system font locations are
/// tried in order. `None` means raster captions are skipped for the run
/// (PDF captions are unaffected, they use built-in fonts).
pub fn load_caption_font(configured: Option<&PathBuf>) -> Option<Font<'static>> {
    if let Some(path) = configured {
        match try_load(path) {
            Some(font) => {
                info!("loaded caption font: {}", path.display());
                return Some(font);
            }
            None => warn!(
                "configured caption font unusable, trying system fonts: {}",
                path.display()
            ),
        }
    }
    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            if let Some(font) = try_load(path) {
                info!("loaded caption font: {candidate}");
                return Some(font);
            }
        }
    }
    warn!("no caption font found, raster captions will be skipped");
    None
}

fn blend_pixel(base: &mut Rgba<u8>, overlay: Rgba<u8>) {
    let alpha = overlay[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let inv = 1.0 - alpha;
    for idx in 0..3 {
        base[idx] = (overlay[idx] as f32 * alpha + base[idx] as f32 * inv)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    base[3] = base[3].max(overlay[3]);
}

/// Draw one line of text with its left edge at `x` and its baseline at
/// `baseline_y`, in canvas pixels. Glyph coverage is alpha-blended so text
/// reads cleanly over any background.
pub fn draw_text(
    canvas: &mut RgbaImage,
    text: &str,
    font: &Font,
    scale: Scale,
    x: f32,
    baseline_y: f32,
    color: [u8; 3],
) {
    let glyphs = font.layout(text, scale, point(x, baseline_y));
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
                    return;
                }
                let alpha = (coverage * 255.0).round() as u8;
                let overlay = Rgba([color[0], color[1], color[2], alpha]);
                blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), overlay);
            });
        }
    }
}

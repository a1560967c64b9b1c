//! Drawing-surface abstraction
//!
//! Every render target supplies only its own primitives; the whole per-cell
//! drawing sequence (background, border, photo, caption) lives in
//! [`render_page`] and runs identically for the PDF and raster paths. All
//! coordinates are page millimeters with a top-left origin; implementations
//! convert to their own device space.

use crate::compositor::composite;
use crate::photo::Photo;
use image::RgbImage;
use photocard_layout::constants::{
    CAPTION_TEXT_MARGIN_MM, HELVETICA_CHAR_WIDTH_RATIO, mm_to_pt, pt_to_mm,
};
use photocard_layout::{BackgroundColor, PagePlan, Rect, Settings};

/// Light gray used for the contrast border on white backgrounds
pub const BORDER_GRAY: [u8; 3] = [217, 217, 217];
/// Fixed dark gray for caption text
pub const CAPTION_GRAY: [u8; 3] = [64, 64, 64];
/// Contrast border stroke width: 1pt, expressed in mm
pub const BORDER_STROKE_MM: f64 = 25.4 / 72.0;

/// Drawing primitives one exporter provides for a single page
pub trait PageSurface {
    /// Fill a rectangle with an opaque color
    fn fill_rect(&mut self, rect: Rect, color: [u8; 3]);
    /// Stroke a rectangle outline
    fn stroke_rect(&mut self, rect: Rect, color: [u8; 3], stroke_mm: f64);
    /// Place a composited image so it exactly fills `rect`
    fn draw_photo(&mut self, image: &RgbImage, rect: Rect);
    /// Draw a single line of caption text with its left edge at `x_mm` and
    /// its baseline at `baseline_y_mm`
    fn draw_caption(
        &mut self,
        text: &str,
        x_mm: f64,
        baseline_y_mm: f64,
        font_size_pt: f64,
        color: [u8; 3],
    );
}

/// Estimated width of caption text in mm, shared by both render paths so
/// centering and truncation agree exactly.
fn caption_width_mm(text: &str, font_size_pt: f64) -> f64 {
    text.chars().count() as f64 * pt_to_mm(font_size_pt * HELVETICA_CHAR_WIDTH_RATIO)
}

/// Truncate caption text so it fits the band width minus a small margin,
/// appending an ellipsis when anything was cut.
pub fn fit_caption(text: &str, band_width_mm: f64, font_size_pt: f64) -> String {
    let char_w_mm = pt_to_mm(font_size_pt * HELVETICA_CHAR_WIDTH_RATIO);
    let usable = (band_width_mm - 2.0 * CAPTION_TEXT_MARGIN_MM).max(0.0);
    let max_chars = (usable / char_w_mm).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Render one planned page onto a surface.
///
/// Per cell, in order: background fill (skipped entirely for the
/// transparent sentinel), a light-gray contrast border when the style has a
/// border and the background is pure white, the composited photo (skipped
/// with a blank cell when the source fails to decode), and the caption
/// (bordered-caption style with captions enabled and non-empty text only).
/// Photos are composited strictly one at a time; `pixels_per_mm` sets the
/// export pixel density independently of any screen resolution.
pub fn render_page(
    page: &PagePlan,
    photos: &[Photo],
    settings: &Settings,
    pixels_per_mm: f64,
    surface: &mut dyn PageSurface,
) {
    for cell_plan in &page.cells {
        let photo = &photos[cell_plan.photo_index];

        if let BackgroundColor::Rgb { r, g, b } = settings.background {
            surface.fill_rect(cell_plan.cell, [r, g, b]);
        }

        if settings.style.has_border() && settings.background.is_white() {
            surface.stroke_rect(cell_plan.cell, BORDER_GRAY, BORDER_STROKE_MM);
        }

        let target_w = (cell_plan.image_rect.width * pixels_per_mm).round() as u32;
        let target_h = (cell_plan.image_rect.height * pixels_per_mm).round() as u32;
        if let Some(image) = composite(photo, target_w, target_h) {
            surface.draw_photo(&image, cell_plan.image_rect);
        }

        if let Some(band) = cell_plan.caption_band {
            if settings.show_captions && !photo.caption.is_empty() {
                let text = fit_caption(&photo.caption, band.width, settings.caption_font_size_pt);
                if !text.is_empty() {
                    let text_w = caption_width_mm(&text, settings.caption_font_size_pt);
                    let x = band.center_x() - text_w / 2.0;
                    // Baseline slightly below the band center so the glyph
                    // body sits visually centered.
                    let baseline =
                        band.center_y() + pt_to_mm(settings.caption_font_size_pt) * 0.35;
                    surface.draw_caption(
                        &text,
                        x,
                        baseline,
                        settings.caption_font_size_pt,
                        CAPTION_GRAY,
                    );
                }
            }
        }
    }
}

/// Map a font family name to a built-in PDF font; unknown names fall back
/// to Helvetica.
pub(crate) fn builtin_font(family: &str) -> printpdf::BuiltinFont {
    use printpdf::BuiltinFont;
    match family.to_ascii_lowercase().as_str() {
        "times" | "times-roman" => BuiltinFont::TimesRoman,
        "courier" => BuiltinFont::Courier,
        _ => BuiltinFont::Helvetica,
    }
}

// Keep mm→pt available to both surface implementations through one path.
pub(crate) fn mm_to_pt_f32(mm: f64) -> f32 {
    mm_to_pt(mm) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_caption_keeps_short_text() {
        assert_eq!(fit_caption("hello", 80.0, 10.0), "hello");
    }

    #[test]
    fn fit_caption_truncates_with_ellipsis() {
        let long = "a caption that is far too long for a narrow band";
        let fitted = fit_caption(long, 20.0, 10.0);
        assert!(fitted.ends_with('…'));
        assert!(fitted.chars().count() < long.chars().count());
        assert!(caption_width_mm(&fitted, 10.0) <= 20.0 - 2.0 * CAPTION_TEXT_MARGIN_MM + 1e-9);
    }

    #[test]
    fn fit_caption_degenerate_band() {
        assert_eq!(fit_caption("abc", 0.0, 10.0), "…");
    }
}

//! Raster export: one RGBA image per layout page
//!
//! Drives the same per-cell sequence as the PDF exporter through a pixel
//! canvas. The transparent background sentinel keeps true alpha in the
//! output; everything else sits on an opaque white page.

use crate::photo::Photo;
use crate::surface::{PageSurface, render_page};
use crate::text::{draw_text, load_caption_font};
use crate::Result;
use image::{Rgba, RgbaImage, RgbImage};
use log::debug;
use photocard_layout::constants::pt_to_mm;
use photocard_layout::{BackgroundColor, LayoutPlan, Rect, Settings};
use rusttype::{Font, Scale};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Pixel density of raster exports
pub const RASTER_PIXELS_PER_MM: f64 = 8.0;

struct RasterSurface<'a> {
    canvas: RgbaImage,
    pixels_per_mm: f64,
    font: Option<&'a Font<'static>>,
}

impl RasterSurface<'_> {
    fn px(&self, mm: f64) -> i64 {
        (mm * self.pixels_per_mm).round() as i64
    }

    /// Rect in canvas pixels, clamped to the canvas bounds
    fn px_rect(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let (cw, ch) = (self.canvas.width() as i64, self.canvas.height() as i64);
        let x0 = self.px(rect.x).clamp(0, cw);
        let y0 = self.px(rect.y).clamp(0, ch);
        let x1 = self.px(rect.right()).clamp(0, cw);
        let y1 = self.px(rect.bottom()).clamp(0, ch);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

impl PageSurface for RasterSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: [u8; 3]) {
        let Some((x, y, w, h)) = self.px_rect(rect) else {
            return;
        };
        let pixel = Rgba([color[0], color[1], color[2], 255]);
        for dy in 0..h {
            for dx in 0..w {
                self.canvas.put_pixel(x + dx, y + dy, pixel);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: [u8; 3], stroke_mm: f64) {
        let Some((x, y, w, h)) = self.px_rect(rect) else {
            return;
        };
        let thickness = (self.px(stroke_mm).max(1) as u32).min(w / 2).max(1);
        let pixel = Rgba([color[0], color[1], color[2], 255]);
        for t in 0..thickness {
            if 2 * t >= w || 2 * t >= h {
                break;
            }
            let (left, right) = (x + t, x + w - 1 - t);
            let (top, bottom) = (y + t, y + h - 1 - t);
            for cx in left..=right {
                self.canvas.put_pixel(cx, top, pixel);
                self.canvas.put_pixel(cx, bottom, pixel);
            }
            for cy in top..=bottom {
                self.canvas.put_pixel(left, cy, pixel);
                self.canvas.put_pixel(right, cy, pixel);
            }
        }
    }

    fn draw_photo(&mut self, image: &RgbImage, rect: Rect) {
        let x0 = self.px(rect.x);
        let y0 = self.px(rect.y);
        let (cw, ch) = (self.canvas.width() as i64, self.canvas.height() as i64);
        for (dx, dy, pixel) in image.enumerate_pixels() {
            let px = x0 + dx as i64;
            let py = y0 + dy as i64;
            if px < 0 || py < 0 || px >= cw || py >= ch {
                continue;
            }
            let [r, g, b] = pixel.0;
            self.canvas.put_pixel(px as u32, py as u32, Rgba([r, g, b, 255]));
        }
    }

    fn draw_caption(
        &mut self,
        text: &str,
        x_mm: f64,
        baseline_y_mm: f64,
        font_size_pt: f64,
        color: [u8; 3],
    ) {
        let Some(font) = self.font else {
            return;
        };
        let size_px = (pt_to_mm(font_size_pt) * self.pixels_per_mm) as f32;
        draw_text(
            &mut self.canvas,
            text,
            font,
            Scale::uniform(size_px),
            (x_mm * self.pixels_per_mm) as f32,
            (baseline_y_mm * self.pixels_per_mm) as f32,
            color,
        );
    }
}

fn base_pixel(settings: &Settings) -> Rgba<u8> {
    match settings.background {
        BackgroundColor::Transparent => Rgba([0, 0, 0, 0]),
        BackgroundColor::Rgb { .. } => Rgba([255, 255, 255, 255]),
    }
}

/// Render every layout page to an RGBA canvas at [`RASTER_PIXELS_PER_MM`]
pub fn export_pages(plan: &LayoutPlan, photos: &[Photo], settings: &Settings) -> Vec<RgbaImage> {
    let font = if settings.show_captions {
        load_caption_font(settings.caption_font_file.as_ref())
    } else {
        None
    };

    let width = (plan.page_width_mm * RASTER_PIXELS_PER_MM).round() as u32;
    let height = (plan.page_height_mm * RASTER_PIXELS_PER_MM).round() as u32;
    let base = base_pixel(settings);

    plan.pages
        .iter()
        .map(|page| {
            let mut surface = RasterSurface {
                canvas: RgbaImage::from_pixel(width, height, base),
                pixels_per_mm: RASTER_PIXELS_PER_MM,
                font: font.as_ref(),
            };
            render_page(page, photos, settings, RASTER_PIXELS_PER_MM, &mut surface);
            debug!("rendered raster page {} at {width}x{height}", page.index + 1);
            surface.canvas
        })
        .collect()
}

/// Render every page and write one PNG per page next to `base_path`.
///
/// `photos.png` becomes `photos-page-1.png`, `photos-page-2.png`, ... in
/// plan order. Returns the written paths.
pub async fn export_png_files(
    plan: &LayoutPlan,
    photos: &[Photo],
    settings: &Settings,
    base_path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let base_path = base_path.as_ref().to_owned();
    let plan_owned = plan.clone();
    let photos_owned = photos.to_vec();
    let settings_owned = settings.clone();

    let encoded: Result<Vec<Vec<u8>>> = tokio::task::spawn_blocking(move || {
        export_pages(&plan_owned, &photos_owned, &settings_owned)
            .into_iter()
            .map(|page| {
                let mut bytes = Vec::new();
                image::DynamicImage::ImageRgba8(page)
                    .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
                Ok(bytes)
            })
            .collect()
    })
    .await?;

    let stem = base_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let parent = base_path.parent().unwrap_or_else(|| Path::new("."));

    let mut written = Vec::new();
    for (index, bytes) in encoded?.into_iter().enumerate() {
        let path = parent.join(format!("{stem}-page-{}.png", index + 1));
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }
    Ok(written)
}

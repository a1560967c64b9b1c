//! PDF export
//!
//! One PDF page per layout page, vector rectangles for backgrounds and
//! borders, photos embedded as PNG xobjects, captions in built-in fonts.
//! Page geometry comes straight from the plan; only the y axis is flipped
//! into PDF's bottom-left coordinate space here.

use crate::photo::Photo;
use crate::surface::{PageSurface, builtin_font, mm_to_pt_f32, render_page};
use crate::{RenderError, Result};
use image::RgbImage;
use log::{debug, warn};
use photocard_layout::constants::mm_to_pt;
use photocard_layout::{LayoutPlan, Rect, Settings};
use printpdf::{
    BuiltinFont, Color, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, Point,
    Polygon, PolygonRing, Pt, RawImage, Rgb, TextItem, TextMatrix, WindingOrder, XObjectTransform,
};
use std::io::Cursor;
use std::path::Path;

/// Pixel density photos are composited at for PDF embedding
pub const PDF_PIXELS_PER_MM: f64 = 12.0;

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0] as f32 / 255.0,
        g: color[1] as f32 / 255.0,
        b: color[2] as f32 / 255.0,
        icc_profile: None,
    })
}

struct PdfSurface<'a> {
    doc: &'a mut PdfDocument,
    ops: Vec<Op>,
    page_height_mm: f64,
    font: BuiltinFont,
}

impl PdfSurface<'_> {
    /// Rect corners in PDF points, y flipped to bottom-left origin
    fn corners(&self, rect: Rect) -> Vec<LinePoint> {
        let x0 = mm_to_pt_f32(rect.x);
        let x1 = mm_to_pt_f32(rect.right());
        let y0 = mm_to_pt_f32(self.page_height_mm - rect.bottom());
        let y1 = mm_to_pt_f32(self.page_height_mm - rect.y);
        [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
            .into_iter()
            .map(|(x, y)| LinePoint {
                p: Point { x: Pt(x), y: Pt(y) },
                bezier: false,
            })
            .collect()
    }

    fn polygon(&self, rect: Rect, mode: PaintMode) -> Op {
        Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: self.corners(rect),
                }],
                mode,
                winding_order: WindingOrder::NonZero,
            },
        }
    }
}

impl PageSurface for PdfSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: [u8; 3]) {
        self.ops.push(Op::SetFillColor { col: rgb(color) });
        self.ops.push(self.polygon(rect, PaintMode::Fill));
    }

    fn stroke_rect(&mut self, rect: Rect, color: [u8; 3], stroke_mm: f64) {
        self.ops.push(Op::SetOutlineColor { col: rgb(color) });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(mm_to_pt_f32(stroke_mm)),
        });
        self.ops.push(self.polygon(rect, PaintMode::Stroke));
    }

    fn draw_photo(&mut self, image: &RgbImage, rect: Rect) {
        let mut png = Vec::new();
        if let Err(err) = image::DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        {
            warn!("skipping photo: failed to encode for embedding: {err}");
            return;
        }
        let mut warnings = Vec::new();
        let raw = match RawImage::decode_from_bytes(&png, &mut warnings) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("skipping photo: failed to embed: {err}");
                return;
            }
        };
        let id = self.doc.add_image(&raw);

        // At 72 dpi one image pixel is one point, so the scale factors map
        // the pixel buffer onto the placement exactly.
        let scale_x = mm_to_pt(rect.width) / image.width() as f64;
        let scale_y = mm_to_pt(rect.height) / image.height() as f64;
        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(mm_to_pt_f32(rect.x))),
                translate_y: Some(Pt(mm_to_pt_f32(self.page_height_mm - rect.bottom()))),
                rotate: None,
                scale_x: Some(scale_x as f32),
                scale_y: Some(scale_y as f32),
                dpi: Some(72.0),
            },
        });
    }

    fn draw_caption(
        &mut self,
        text: &str,
        x_mm: f64,
        baseline_y_mm: f64,
        font_size_pt: f64,
        color: [u8; 3],
    ) {
        self.ops.push(Op::SetFillColor { col: rgb(color) });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size_pt as f32),
            font: self.font,
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(
                Pt(mm_to_pt_f32(x_mm)),
                Pt(mm_to_pt_f32(self.page_height_mm - baseline_y_mm)),
            ),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: self.font,
        });
        self.ops.push(Op::EndTextSection);
    }
}

/// Render the whole plan into PDF bytes
pub fn export_pdf(plan: &LayoutPlan, photos: &[Photo], settings: &Settings) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new("Photo Layout");
    let font = builtin_font(&settings.caption_font);

    let mut pages = Vec::with_capacity(plan.pages.len());
    for page in &plan.pages {
        let mut surface = PdfSurface {
            doc: &mut doc,
            ops: Vec::new(),
            page_height_mm: plan.page_height_mm,
            font,
        };
        render_page(page, photos, settings, PDF_PIXELS_PER_MM, &mut surface);
        let ops = surface.ops;
        debug!("rendered pdf page {} ({} ops)", page.index + 1, ops.len());
        pages.push(PdfPage::new(
            Mm(plan.page_width_mm as f32),
            Mm(plan.page_height_mm as f32),
            ops,
        ));
    }
    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if bytes.is_empty() {
        return Err(RenderError::Pdf("PDF serialization produced no output".to_string()));
    }
    Ok(bytes)
}

/// Render the plan and write the PDF to disk; the CPU-bound work runs on a
/// blocking task.
pub async fn export_pdf_to_file(
    plan: &LayoutPlan,
    photos: &[Photo],
    settings: &Settings,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let plan = plan.clone();
    let photos = photos.to_vec();
    let settings = settings.clone();
    let output_path = output_path.as_ref().to_owned();

    let bytes =
        tokio::task::spawn_blocking(move || export_pdf(&plan, &photos, &settings)).await??;
    tokio::fs::write(&output_path, bytes).await?;
    Ok(())
}

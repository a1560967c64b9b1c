use image::RgbImage;
use photocard_layout::{BackgroundColor, CellStyle, LayoutPlan, Rect, Settings};
use photocard_render::{
    Adjustments, PageSurface, Photo, RASTER_PIXELS_PER_MM, export_pages, export_pdf,
    export_png_files, render_page,
};
use std::io::Cursor;

fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn photo(rgb: [u8; 3], ratio: f64) -> Photo {
    Photo::from_bytes(png_bytes(400, 300, rgb), ratio).unwrap()
}

fn broken_photo() -> Photo {
    Photo {
        source: vec![0xba, 0xad, 0xf0, 0x0d],
        width: 400,
        height: 300,
        crop: photocard_layout::Crop::full(),
        adjustments: Adjustments::default(),
        caption: String::new(),
    }
}

/// Records every primitive call so the per-cell drawing sequence can be
/// asserted without a real output target.
#[derive(Default)]
struct RecordingSurface {
    fills: Vec<(Rect, [u8; 3])>,
    strokes: Vec<(Rect, [u8; 3])>,
    photos: Vec<Rect>,
    captions: Vec<String>,
}

impl PageSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: [u8; 3]) {
        self.fills.push((rect, color));
    }
    fn stroke_rect(&mut self, rect: Rect, color: [u8; 3], _stroke_mm: f64) {
        self.strokes.push((rect, color));
    }
    fn draw_photo(&mut self, _image: &RgbImage, rect: Rect) {
        self.photos.push(rect);
    }
    fn draw_caption(
        &mut self,
        text: &str,
        _x_mm: f64,
        _baseline_y_mm: f64,
        _font_size_pt: f64,
        _color: [u8; 3],
    ) {
        self.captions.push(text.to_string());
    }
}

fn render_first_page(settings: &Settings, photos: &[Photo]) -> RecordingSurface {
    let plan = LayoutPlan::build(settings, photos.len()).unwrap();
    let mut surface = RecordingSurface::default();
    render_page(&plan.pages[0], photos, settings, 1.0, &mut surface);
    surface
}

#[test]
fn white_bordered_cell_gets_fill_and_contrast_border() {
    let settings = Settings::default();
    let photos = vec![photo([120, 10, 10], settings.target_ratio)];
    let surface = render_first_page(&settings, &photos);

    assert_eq!(surface.fills.len(), 1);
    assert_eq!(surface.fills[0].1, [255, 255, 255]);
    assert_eq!(surface.strokes.len(), 1);
    assert_eq!(surface.photos.len(), 1);
    // Border sits on the cell itself, the photo strictly inside it.
    let (cell, _) = surface.fills[0];
    let image_rect = surface.photos[0];
    assert!(cell.contains(&image_rect));
}

#[test]
fn transparent_background_draws_no_fill_or_border() {
    let settings = Settings {
        background: BackgroundColor::Transparent,
        ..Default::default()
    };
    let photos = vec![photo([10, 120, 10], settings.target_ratio)];
    let surface = render_first_page(&settings, &photos);

    assert!(surface.fills.is_empty());
    assert!(surface.strokes.is_empty());
    assert_eq!(surface.photos.len(), 1);
}

#[test]
fn non_white_background_fills_without_border() {
    let settings = Settings {
        background: BackgroundColor::Rgb {
            r: 250,
            g: 250,
            b: 250,
        },
        ..Default::default()
    };
    let photos = vec![photo([10, 10, 120], settings.target_ratio)];
    let surface = render_first_page(&settings, &photos);

    assert_eq!(surface.fills.len(), 1);
    assert!(surface.strokes.is_empty());
}

#[test]
fn broken_photo_leaves_cell_blank_but_keeps_chrome_and_caption() {
    let settings = Settings::default();
    let mut bad = broken_photo();
    bad.caption = "still here".to_string();
    let surface = render_first_page(&settings, &[bad]);

    assert_eq!(surface.fills.len(), 1);
    assert_eq!(surface.strokes.len(), 1);
    assert!(surface.photos.is_empty());
    assert_eq!(surface.captions, vec!["still here".to_string()]);
}

#[test]
fn captions_skipped_when_disabled_or_empty() {
    let mut settings = Settings::default();
    let mut with_caption = photo([50, 50, 50], settings.target_ratio);
    with_caption.caption = "hello".to_string();
    let without_caption = photo([60, 60, 60], settings.target_ratio);

    let surface = render_first_page(&settings, &[with_caption.clone(), without_caption]);
    assert_eq!(surface.captions, vec!["hello".to_string()]);

    settings.show_captions = false;
    let surface = render_first_page(&settings, &[with_caption]);
    assert!(surface.captions.is_empty());
}

#[test]
fn borderless_style_never_draws_captions() {
    let settings = Settings {
        style: CellStyle::Borderless,
        ..Default::default()
    };
    let mut p = photo([50, 50, 50], settings.target_ratio);
    p.caption = "hidden".to_string();
    let surface = render_first_page(&settings, &[p]);

    assert!(surface.captions.is_empty());
    assert!(surface.strokes.is_empty());
}

#[test]
fn raster_export_paginates_and_sizes_pages() {
    let settings = Settings::default();
    let photos: Vec<Photo> = (0..7)
        .map(|i| photo([i as u8 * 30, 80, 80], settings.target_ratio))
        .collect();
    let plan = LayoutPlan::build(&settings, photos.len()).unwrap();

    let pages = export_pages(&plan, &photos, &settings);
    assert_eq!(pages.len(), 2);

    let expected_w = (210.0 * RASTER_PIXELS_PER_MM).round() as u32;
    let expected_h = (297.0 * RASTER_PIXELS_PER_MM).round() as u32;
    for page in &pages {
        assert_eq!(page.dimensions(), (expected_w, expected_h));
    }
}

#[test]
fn transparent_raster_page_keeps_alpha_at_corners() {
    let settings = Settings {
        background: BackgroundColor::Transparent,
        ..Default::default()
    };
    let photos = vec![photo([200, 100, 0], settings.target_ratio)];
    let plan = LayoutPlan::build(&settings, photos.len()).unwrap();

    let pages = export_pages(&plan, &photos, &settings);
    // Page padding means the corner is outside every cell.
    assert_eq!(pages[0].get_pixel(0, 0).0[3], 0);

    let opaque = export_pages(&plan, &photos, &Settings::default());
    assert_eq!(opaque[0].get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn pdf_export_produces_a_document_per_plan() {
    let settings = Settings::default();
    let photos: Vec<Photo> = (0..7)
        .map(|i| photo([80, i as u8 * 30, 80], settings.target_ratio))
        .collect();
    let plan = LayoutPlan::build(&settings, photos.len()).unwrap();

    let bytes = export_pdf(&plan, &photos, &settings).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_export_survives_broken_photos() {
    let settings = Settings::default();
    let photos = vec![broken_photo(), photo([1, 2, 3], settings.target_ratio)];
    let plan = LayoutPlan::build(&settings, photos.len()).unwrap();

    let bytes = export_pdf(&plan, &photos, &settings).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn png_export_writes_one_file_per_page() {
    let settings = Settings::default();
    let photos: Vec<Photo> = (0..7)
        .map(|i| photo([90, 90, i as u8 * 30], settings.target_ratio))
        .collect();
    let plan = LayoutPlan::build(&settings, photos.len()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("grid.png");
    let written = export_png_files(&plan, &photos, &settings, &base)
        .await
        .unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], dir.path().join("grid-page-1.png"));
    assert_eq!(written[1], dir.path().join("grid-page-2.png"));
    for path in &written {
        let decoded = image::open(path).unwrap();
        assert!(decoded.width() > 0);
    }
}

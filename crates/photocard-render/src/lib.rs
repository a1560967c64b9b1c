//! Photo compositing and page export.
//!
//! Consumes the resolved [`photocard_layout::LayoutPlan`] and renders it to
//! the two output targets: a paginated PDF document and one raster image
//! per page. Both exporters drive the same per-cell sequence through the
//! [`PageSurface`] abstraction, so their geometry is identical by
//! construction.

mod caption;
mod compositor;
mod pdf;
mod photo;
mod raster;
mod surface;
mod text;

pub use caption::{CaptionSuggester, HttpCaptionSuggester};
pub use compositor::{apply_adjustments, composite, sample_crop};
pub use pdf::{export_pdf, export_pdf_to_file};
pub use photo::{Adjustments, Photo, reapply_aspect_ratio};
pub use raster::{RASTER_PIXELS_PER_MM, export_pages, export_png_files};
pub use surface::{PageSurface, fit_caption, render_page};
pub use text::load_caption_font;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] photocard_layout::LayoutError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unusable source image: {0}")]
    InvalidSource(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

//! Fully resolved layout plan
//!
//! The plan is the single shared geometry contract: every render path
//! (interactive preview, PDF exporter, raster exporter) consumes the same
//! resolved rectangles, so what-you-see-is-what-you-get holds by
//! construction rather than by parallel re-derivation.

use crate::cell::{fit_aspect_box, place_image};
use crate::geometry::PageGeometry;
use crate::settings::Settings;
use crate::types::{Rect, Result};

/// One photo's resolved geometry within its page
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlan {
    /// Flat index into the photo collection
    pub photo_index: usize,
    pub row: usize,
    pub col: usize,
    /// The grid cell
    pub cell: Rect,
    /// Cell minus style insets and caption reservation
    pub image_box: Rect,
    /// Final image rectangle: target ratio, contain-fit inside the image box
    pub image_rect: Rect,
    /// Reserved caption band, for styles that have one
    pub caption_band: Option<Rect>,
}

/// One output page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub index: usize,
    pub cells: Vec<CellPlan>,
}

/// Resolved geometry for a whole export
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub pages: Vec<PagePlan>,
}

impl LayoutPlan {
    /// Resolve every page and cell for `photo_count` photos.
    ///
    /// Configuration errors surface here, before any drawing begins. An
    /// empty collection still yields one (empty) page.
    pub fn build(settings: &Settings, photo_count: usize) -> Result<LayoutPlan> {
        let geo = PageGeometry::new(settings)?;
        let page_count = geo.page_count(photo_count);

        let mut pages: Vec<PagePlan> = (0..page_count)
            .map(|index| PagePlan {
                index,
                cells: Vec::new(),
            })
            .collect();

        for photo_index in 0..photo_count {
            let pos = geo.position(photo_index);
            let cell = geo.cell_rect(pos.row, pos.col);
            let placement = place_image(cell, settings.style, settings.caption_space_mm);
            let image_rect = fit_aspect_box(placement.image_box, settings.target_ratio);
            pages[pos.page].cells.push(CellPlan {
                photo_index,
                row: pos.row,
                col: pos.col,
                cell,
                image_box: placement.image_box,
                image_rect,
                caption_band: placement.caption_band,
            });
        }

        Ok(LayoutPlan {
            page_width_mm: geo.page_width_mm,
            page_height_mm: geo.page_height_mm,
            pages,
        })
    }
}

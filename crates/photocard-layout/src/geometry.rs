//! Page and grid geometry
//!
//! Resolves the paper size and grid configuration into physical page
//! dimensions and per-cell rectangles, and assigns photos to pages by flat
//! index.

use crate::settings::Settings;
use crate::types::{LayoutError, Rect, Result};

/// Position of a photo within the paginated grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Page index (0-based)
    pub page: usize,
    /// Row index within the page (0 = top row)
    pub row: usize,
    /// Column index within the page (0 = leftmost column)
    pub col: usize,
}

/// Resolved physical page dimensions and cell grid for one Settings value.
///
/// All dimensions are millimeters; rectangles use a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub rows: usize,
    pub cols: usize,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    gap_mm: f64,
    padding_h_mm: f64,
    padding_v_mm: f64,
}

impl PageGeometry {
    /// Resolve settings into page dimensions and cell size.
    ///
    /// available width = pageW − 2·paddingH − gap·(cols−1), cell width =
    /// available / cols (height analogous). A combination yielding
    /// non-positive cells is a configuration error surfaced here, before
    /// any drawing begins.
    pub fn new(settings: &Settings) -> Result<Self> {
        if settings.rows < 1 || settings.cols < 1 {
            return Err(LayoutError::Config(format!(
                "Grid must have at least one row and column (got {}x{})",
                settings.rows, settings.cols
            )));
        }
        if settings.target_ratio <= 0.0 {
            return Err(LayoutError::Config(format!(
                "Target aspect ratio must be positive (got {})",
                settings.target_ratio
            )));
        }

        let (page_width_mm, page_height_mm) = settings
            .paper_size
            .dimensions_with_orientation(settings.orientation);
        if page_width_mm <= 0.0 || page_height_mm <= 0.0 {
            return Err(LayoutError::Config(format!(
                "Page dimensions must be positive (got {page_width_mm}x{page_height_mm}mm)"
            )));
        }

        let cols = settings.cols;
        let rows = settings.rows;
        let available_w =
            page_width_mm - 2.0 * settings.padding_h_mm - settings.gap_mm * (cols - 1) as f64;
        let available_h =
            page_height_mm - 2.0 * settings.padding_v_mm - settings.gap_mm * (rows - 1) as f64;
        let cell_width_mm = available_w / cols as f64;
        let cell_height_mm = available_h / rows as f64;

        if cell_width_mm <= 0.0 || cell_height_mm <= 0.0 {
            return Err(LayoutError::Config(format!(
                "Grid configuration yields non-positive cells \
                 ({cell_width_mm:.2}x{cell_height_mm:.2}mm)"
            )));
        }

        Ok(Self {
            page_width_mm,
            page_height_mm,
            rows,
            cols,
            cell_width_mm,
            cell_height_mm,
            gap_mm: settings.gap_mm,
            padding_h_mm: settings.padding_h_mm,
            padding_v_mm: settings.padding_v_mm,
        })
    }

    /// Photos per page
    pub fn per_page(&self) -> usize {
        self.rows * self.cols
    }

    /// Total pages for a photo count; at least one page even when empty so
    /// an empty grid can still be previewed.
    pub fn page_count(&self, photo_count: usize) -> usize {
        if photo_count == 0 {
            1
        } else {
            photo_count.div_ceil(self.per_page())
        }
    }

    /// Page/row/col for a flat photo index
    pub fn position(&self, index: usize) -> GridPosition {
        let per_page = self.per_page();
        let cell_index = index % per_page;
        GridPosition {
            page: index / per_page,
            row: cell_index / self.cols,
            col: cell_index % self.cols,
        }
    }

    /// Rectangle of the cell at (row, col), identical on every page
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.padding_h_mm + col as f64 * (self.cell_width_mm + self.gap_mm),
            self.padding_v_mm + row as f64 * (self.cell_height_mm + self.gap_mm),
            self.cell_width_mm,
            self.cell_height_mm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, PaperSize};

    fn a4_3x2() -> Settings {
        Settings {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            rows: 3,
            cols: 2,
            gap_mm: 10.0,
            padding_h_mm: 15.0,
            padding_v_mm: 15.0,
            ..Default::default()
        }
    }

    #[test]
    fn a4_portrait_3x2_cell_size() {
        let geo = PageGeometry::new(&a4_3x2()).unwrap();
        // cellWidth = (210 − 30 − 10) / 2 = 85mm
        // cellHeight = (297 − 30 − 20) / 3 = 82.33mm
        assert!((geo.cell_width_mm - 85.0).abs() < 1e-9);
        assert!((geo.cell_height_mm - 247.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn cells_and_gaps_sum_to_page_width() {
        let geo = PageGeometry::new(&a4_3x2()).unwrap();
        let total = geo.cols as f64 * geo.cell_width_mm
            + (geo.cols - 1) as f64 * 10.0
            + 2.0 * 15.0;
        assert!((total - geo.page_width_mm).abs() < 1e-9);

        // No drift across columns: each cell starts exactly where the
        // previous one ends plus the gap.
        for col in 1..geo.cols {
            let prev = geo.cell_rect(0, col - 1);
            let cur = geo.cell_rect(0, col);
            assert!((cur.x - (prev.right() + 10.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn flat_index_pagination() {
        let geo = PageGeometry::new(&a4_3x2()).unwrap();
        assert_eq!(geo.per_page(), 6);

        // 7 photos on a 3x2 grid: 2 pages, photo 6 at page 1, row 0, col 0
        assert_eq!(geo.page_count(7), 2);
        let pos = geo.position(6);
        assert_eq!(
            pos,
            GridPosition {
                page: 1,
                row: 0,
                col: 0
            }
        );

        let pos = geo.position(5);
        assert_eq!(
            pos,
            GridPosition {
                page: 0,
                row: 2,
                col: 1
            }
        );
    }

    #[test]
    fn empty_grid_still_has_one_page() {
        let geo = PageGeometry::new(&a4_3x2()).unwrap();
        assert_eq!(geo.page_count(0), 1);
        assert_eq!(geo.page_count(6), 1);
        assert_eq!(geo.page_count(13), 3);
    }

    #[test]
    fn cell_rect_positions() {
        let geo = PageGeometry::new(&a4_3x2()).unwrap();
        let first = geo.cell_rect(0, 0);
        assert_eq!(first, Rect::new(15.0, 15.0, 85.0, 247.0 / 3.0));

        let second = geo.cell_rect(0, 1);
        assert!((second.x - (15.0 + 85.0 + 10.0)).abs() < 1e-9);
        assert!((second.y - 15.0).abs() < 1e-9);

        let below = geo.cell_rect(1, 0);
        assert!((below.y - (15.0 + 247.0 / 3.0 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let settings = Settings {
            orientation: Orientation::Landscape,
            ..a4_3x2()
        };
        let geo = PageGeometry::new(&settings).unwrap();
        assert_eq!(geo.page_width_mm, 297.0);
        assert_eq!(geo.page_height_mm, 210.0);
    }

    #[test]
    fn single_cell_grid() {
        let settings = Settings {
            rows: 1,
            cols: 1,
            gap_mm: 0.0,
            padding_h_mm: 0.0,
            padding_v_mm: 0.0,
            ..a4_3x2()
        };
        let geo = PageGeometry::new(&settings).unwrap();
        assert_eq!(geo.cell_rect(0, 0), Rect::new(0.0, 0.0, 210.0, 297.0));
    }
}

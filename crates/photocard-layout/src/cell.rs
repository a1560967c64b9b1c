//! Per-cell image placement
//!
//! Given a cell rectangle and a style, computes where the image and the
//! optional caption band sit inside it. Shared by the preview and by each
//! exporter so their geometry can never drift apart.

use crate::constants::{DEFAULT_CAPTION_SPACE_MM, POLAROID_MARGIN_RATIO, THIN_BORDER_INSET_MM};
use crate::types::{CellStyle, Rect};

/// Inner placement of a cell: the image box and the caption band, if the
/// style reserves one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub image_box: Rect,
    pub caption_band: Option<Rect>,
}

/// Compute the inner image box (and caption band) for a cell.
///
/// - `BorderedCaption`: side margin = 5% of cell width on left/right/top,
///   margin + caption band on the bottom; the band spans the inner width.
/// - `ThinBorder`: fixed 3mm inset on all sides.
/// - `Borderless`: the full cell.
pub fn place_image(cell: Rect, style: CellStyle, caption_space_mm: Option<f64>) -> CellPlacement {
    match style {
        CellStyle::BorderedCaption => {
            let margin = cell.width * POLAROID_MARGIN_RATIO;
            let band = caption_space_mm.unwrap_or(DEFAULT_CAPTION_SPACE_MM);
            let image_box = Rect::new(
                cell.x + margin,
                cell.y + margin,
                cell.width - 2.0 * margin,
                cell.height - 2.0 * margin - band,
            );
            let caption_band = Rect::new(
                cell.x + margin,
                cell.bottom() - margin - band,
                cell.width - 2.0 * margin,
                band,
            );
            CellPlacement {
                image_box,
                caption_band: Some(caption_band),
            }
        }
        CellStyle::ThinBorder => CellPlacement {
            image_box: Rect::new(
                cell.x + THIN_BORDER_INSET_MM,
                cell.y + THIN_BORDER_INSET_MM,
                cell.width - 2.0 * THIN_BORDER_INSET_MM,
                cell.height - 2.0 * THIN_BORDER_INSET_MM,
            ),
            caption_band: None,
        },
        CellStyle::Borderless => CellPlacement {
            image_box: cell,
            caption_band: None,
        },
    }
}

/// Fit a fixed-ratio box inside an arbitrary area: strict contain/letterbox.
///
/// The result always has exactly `target_ratio` and lies fully inside
/// `image_box`, centered on the off axis. Never crops or distorts the
/// target ratio.
pub fn fit_aspect_box(image_box: Rect, target_ratio: f64) -> Rect {
    let box_ratio = image_box.width / image_box.height;
    if box_ratio > target_ratio {
        // Box relatively wider than target: pin height, center horizontally
        let height = image_box.height;
        let width = height * target_ratio;
        Rect::new(
            image_box.x + (image_box.width - width) / 2.0,
            image_box.y,
            width,
            height,
        )
    } else {
        let width = image_box.width;
        let height = width / target_ratio;
        Rect::new(
            image_box.x,
            image_box.y + (image_box.height - height) / 2.0,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_caption_reserves_band() {
        let cell = Rect::new(10.0, 20.0, 80.0, 100.0);
        let placement = place_image(cell, CellStyle::BorderedCaption, Some(15.0));

        let margin = 80.0 * 0.05; // 4mm
        assert_eq!(placement.image_box.x, 10.0 + margin);
        assert_eq!(placement.image_box.y, 20.0 + margin);
        assert_eq!(placement.image_box.width, 80.0 - 2.0 * margin);
        assert_eq!(placement.image_box.height, 100.0 - 2.0 * margin - 15.0);

        let band = placement.caption_band.unwrap();
        assert_eq!(band.height, 15.0);
        assert_eq!(band.bottom(), cell.bottom() - margin);
        assert_eq!(band.width, placement.image_box.width);
        // Image box ends exactly where the band begins.
        assert!((placement.image_box.bottom() - band.y).abs() < 1e-12);
    }

    #[test]
    fn bordered_caption_default_band() {
        let cell = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placement = place_image(cell, CellStyle::BorderedCaption, None);
        assert_eq!(
            placement.caption_band.unwrap().height,
            crate::constants::DEFAULT_CAPTION_SPACE_MM
        );
    }

    #[test]
    fn thin_border_insets_3mm() {
        let cell = Rect::new(5.0, 5.0, 50.0, 60.0);
        let placement = place_image(cell, CellStyle::ThinBorder, Some(99.0));
        assert_eq!(placement.image_box, Rect::new(8.0, 8.0, 44.0, 54.0));
        assert!(placement.caption_band.is_none());
    }

    #[test]
    fn borderless_uses_full_cell() {
        let cell = Rect::new(1.0, 2.0, 3.0, 4.0);
        let placement = place_image(cell, CellStyle::Borderless, None);
        assert_eq!(placement.image_box, cell);
        assert!(placement.caption_band.is_none());
    }

    #[test]
    fn fit_wide_box_centers_horizontally() {
        let area = Rect::new(0.0, 0.0, 100.0, 50.0);
        let fitted = fit_aspect_box(area, 1.0);
        assert_eq!(fitted, Rect::new(25.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn fit_tall_box_centers_vertically() {
        let area = Rect::new(10.0, 10.0, 40.0, 100.0);
        let fitted = fit_aspect_box(area, 2.0);
        assert_eq!(fitted, Rect::new(10.0, 50.0, 40.0, 20.0));
    }

    #[test]
    fn fit_is_contained_and_exact() {
        let areas = [
            Rect::new(0.0, 0.0, 85.0, 66.33),
            Rect::new(3.0, 7.0, 13.0, 91.0),
            Rect::new(0.0, 0.0, 1.0, 1.0),
        ];
        for area in areas {
            for ratio in [0.5, 1.0, 4.0 / 5.0, 16.0 / 9.0] {
                let fitted = fit_aspect_box(area, ratio);
                assert!(area.contains(&fitted), "{fitted:?} not inside {area:?}");
                assert!(
                    (fitted.width / fitted.height - ratio).abs() < 1e-9,
                    "ratio mismatch for {area:?} @ {ratio}"
                );
            }
        }
    }
}

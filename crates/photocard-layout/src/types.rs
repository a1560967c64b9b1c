use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait: height ≥ width
    #[default]
    Portrait,
    /// Landscape: width ≥ height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
    #[serde(rename = "4x6")]
    Photo4x6,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Resolve a named paper size key. `Custom` is constructed directly and
    /// has no key; anything unrecognized is a configuration error.
    pub fn from_key(key: &str) -> Result<Self> {
        match key.to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            "4x6" => Ok(PaperSize::Photo4x6),
            other => Err(LayoutError::Config(format!(
                "Unknown paper size: {other}"
            ))),
        }
    }

    /// Get base dimensions as entered (not yet orientation-normalized)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Photo4x6 => (101.6, 152.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied.
    ///
    /// Normalizes first (d1 = min, d2 = max) so the result is independent of
    /// the order width/height were entered: portrait always yields
    /// width ≤ height, landscape always width ≥ height.
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        let (d1, d2) = (w.min(h), w.max(h));
        match orientation {
            Orientation::Portrait => (d1, d2),
            Orientation::Landscape => (d2, d1),
        }
    }
}

/// Visual style of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellStyle {
    /// "Polaroid": wide border with a caption band at the bottom
    #[default]
    BorderedCaption,
    /// "Minimal": fixed thin inset on all sides, no caption band
    ThinBorder,
    /// Image fills the entire cell
    Borderless,
}

impl CellStyle {
    /// Whether this style reserves space for a caption
    pub fn has_caption_band(self) -> bool {
        matches!(self, CellStyle::BorderedCaption)
    }

    /// Whether this style draws a card border at all
    pub fn has_border(self) -> bool {
        !matches!(self, CellStyle::Borderless)
    }
}

/// A rectangular area in page millimeters, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether `other` lies fully inside this rect (within float tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x + EPS >= self.x
            && other.y + EPS >= self.y
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

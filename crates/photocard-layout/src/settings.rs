use crate::geometry::PageGeometry;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cell background color, with a transparent sentinel.
///
/// `Transparent` means no fill is drawn behind any cell and the raster
/// export keeps true alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundColor {
    Transparent,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Default for BackgroundColor {
    fn default() -> Self {
        BackgroundColor::Rgb {
            r: 255,
            g: 255,
            b: 255,
        }
    }
}

impl BackgroundColor {
    /// Parse `"transparent"` or a `#rrggbb` / `rrggbb` hex string
    pub fn from_hex(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("transparent") {
            return Ok(BackgroundColor::Transparent);
        }
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LayoutError::Config(format!(
                "Invalid background color: {value}"
            )));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(BackgroundColor::Rgb {
            r: channel(0),
            g: channel(2),
            b: channel(4),
        })
    }

    /// Pure white gets a contrast border when a style carries a border
    pub fn is_white(&self) -> bool {
        matches!(
            self,
            BackgroundColor::Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        )
    }
}

/// Single source of truth for layout and export configuration, shared by the
/// preview path and both exporters. Persistence (presets, stored settings)
/// lives outside this crate; a complete, valid value is expected at call
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub rows: usize,
    pub cols: usize,
    /// Gap between cells (mm)
    pub gap_mm: f64,
    /// Horizontal page padding, applied on both sides (mm)
    pub padding_h_mm: f64,
    /// Vertical page padding, applied top and bottom (mm)
    pub padding_v_mm: f64,
    pub style: CellStyle,
    /// Target aspect ratio (width / height) every crop and cell image box
    /// conforms to
    pub target_ratio: f64,
    pub show_captions: bool,
    /// Caption font family; maps to a built-in PDF font
    pub caption_font: String,
    pub caption_font_size_pt: f64,
    /// Caption band height (mm); falls back to a default when unset
    pub caption_space_mm: Option<f64>,
    /// Font file used for raster captions; system fonts are searched when
    /// unset
    pub caption_font_file: Option<PathBuf>,
    pub background: BackgroundColor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            rows: 3,
            cols: 2,
            gap_mm: 10.0,
            padding_h_mm: 15.0,
            padding_v_mm: 15.0,
            style: CellStyle::BorderedCaption,
            target_ratio: 1.0,
            show_captions: true,
            caption_font: "helvetica".to_string(),
            caption_font_size_pt: 10.0,
            caption_space_mm: None,
            caption_font_file: None,
            background: BackgroundColor::default(),
        }
    }
}

impl Settings {
    /// Validate the settings.
    ///
    /// Raised before any drawing begins: zero rows/cols, a non-positive
    /// target ratio, or a paper/grid combination that yields non-positive
    /// cell dimensions are configuration errors, not runtime fallbacks.
    pub fn validate(&self) -> Result<()> {
        PageGeometry::new(self).map(|_| ())
    }

    /// Load settings from a JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let settings: Settings = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize settings: {e}")))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_hex_parsing() {
        assert_eq!(
            BackgroundColor::from_hex("#ffffff").unwrap(),
            BackgroundColor::Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(
            BackgroundColor::from_hex("1a2B3c").unwrap(),
            BackgroundColor::Rgb {
                r: 0x1a,
                g: 0x2b,
                b: 0x3c
            }
        );
        assert_eq!(
            BackgroundColor::from_hex("TRANSPARENT").unwrap(),
            BackgroundColor::Transparent
        );
        assert!(BackgroundColor::from_hex("#fff").is_err());
        assert!(BackgroundColor::from_hex("not-a-color").is_err());
    }

    #[test]
    fn white_detection() {
        assert!(BackgroundColor::default().is_white());
        assert!(!BackgroundColor::Transparent.is_white());
        assert!(
            !BackgroundColor::Rgb {
                r: 250,
                g: 255,
                b: 255
            }
            .is_white()
        );
    }

    #[test]
    fn default_settings_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn zero_rows_is_config_error() {
        let settings = Settings {
            rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(LayoutError::Config(_))
        ));
    }

    #[test]
    fn oversized_padding_is_config_error() {
        // Padding eats the whole page: computed cell width goes negative.
        let settings = Settings {
            padding_h_mm: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(LayoutError::Config(_))
        ));
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use photocard_layout::{BackgroundColor, CellStyle, LayoutPlan, Orientation, PaperSize, Settings};
use photocard_render::{
    CaptionSuggester, HttpCaptionSuggester, Photo, export_pdf_to_file, export_png_files,
};
use std::collections::HashMap;
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "photocard", about = "Photo grid layout and export", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out photos on a grid and export PDF or PNG pages
    Export {
        /// Input image file(s), placed in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file (.pdf, or a .png base name for per-page files)
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "pdf", value_enum)]
        format: FormatArg,

        /// Settings JSON to start from
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective settings to this JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Page orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Cell style
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Grid rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns per page
        #[arg(long)]
        cols: Option<usize>,

        /// Gap between cells in mm
        #[arg(long)]
        gap: Option<f64>,

        /// Horizontal page padding in mm
        #[arg(long)]
        padding_h: Option<f64>,

        /// Vertical page padding in mm
        #[arg(long)]
        padding_v: Option<f64>,

        /// Photo aspect ratio, as W:H or a decimal (e.g. 3:2 or 1.5)
        #[arg(long, value_parser = parse_ratio)]
        ratio: Option<f64>,

        /// Cell background: a #rrggbb hex color or "transparent"
        #[arg(long)]
        background: Option<String>,

        /// Hide captions even where the style has a caption band
        #[arg(long)]
        no_captions: bool,

        /// JSON file mapping input file names to caption text
        #[arg(long)]
        captions_file: Option<PathBuf>,

        /// Ask the configured captioning service for missing captions
        #[arg(long)]
        suggest_captions: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    #[value(name = "4x6")]
    Photo4x6,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    BorderedCaption,
    ThinBorder,
    Borderless,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
            PaperArg::Photo4x6 => Self::Photo4x6,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<StyleArg> for CellStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::BorderedCaption => Self::BorderedCaption,
            StyleArg::ThinBorder => Self::ThinBorder,
            StyleArg::Borderless => Self::Borderless,
        }
    }
}

/// Parse an aspect ratio given as `W:H` or as a plain decimal
fn parse_ratio(value: &str) -> std::result::Result<f64, String> {
    let ratio = if let Some((w, h)) = value.split_once(':') {
        let w: f64 = w
            .trim()
            .parse()
            .map_err(|_| format!("Invalid ratio width: {value}"))?;
        let h: f64 = h
            .trim()
            .parse()
            .map_err(|_| format!("Invalid ratio height: {value}"))?;
        if h <= 0.0 {
            return Err(format!("Ratio height must be positive: {value}"));
        }
        w / h
    } else {
        value
            .trim()
            .parse()
            .map_err(|_| format!("Invalid ratio: {value}"))?
    };
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(format!("Ratio must be positive: {value}"));
    }
    Ok(ratio)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::init(cli.verbose)?;

    match cli.command {
        Commands::Export {
            input,
            output,
            format,
            config,
            save_config,
            paper,
            orientation,
            style,
            rows,
            cols,
            gap,
            padding_h,
            padding_v,
            ratio,
            background,
            no_captions,
            captions_file,
            suggest_captions,
        } => {
            let mut settings = match &config {
                Some(path) => Settings::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => Settings::default(),
            };

            if let Some(paper) = paper {
                settings.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                settings.orientation = orientation.into();
            }
            if let Some(style) = style {
                settings.style = style.into();
            }
            if let Some(rows) = rows {
                settings.rows = rows;
            }
            if let Some(cols) = cols {
                settings.cols = cols;
            }
            if let Some(gap) = gap {
                settings.gap_mm = gap;
            }
            if let Some(padding_h) = padding_h {
                settings.padding_h_mm = padding_h;
            }
            if let Some(padding_v) = padding_v {
                settings.padding_v_mm = padding_v;
            }
            if let Some(ratio) = ratio {
                settings.target_ratio = ratio;
            }
            if let Some(background) = &background {
                settings.background = BackgroundColor::from_hex(background)?;
            }
            if no_captions {
                settings.show_captions = false;
            }
            settings.validate()?;

            if let Some(path) = &save_config {
                settings.save(path).await?;
                println!("Saved settings → {}", path.display());
            }

            let mut photos = Vec::new();
            let mut names = Vec::new();
            for path in &input {
                match Photo::load(path, settings.target_ratio).await {
                    Ok(photo) => {
                        photos.push(photo);
                        names.push(
                            path.file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default(),
                        );
                    }
                    Err(err) => warn!("skipping {}: {err}", path.display()),
                }
            }

            if let Some(path) = &captions_file {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read captions {}", path.display()))?;
                let captions: HashMap<String, String> = serde_json::from_str(&text)
                    .with_context(|| format!("Invalid captions file {}", path.display()))?;
                for (photo, name) in photos.iter_mut().zip(&names) {
                    if let Some(caption) = captions.get(name) {
                        photo.caption = caption.trim().to_string();
                    }
                }
            }

            if suggest_captions {
                match HttpCaptionSuggester::from_env() {
                    Some(suggester) => {
                        for photo in photos.iter_mut().filter(|p| p.caption.is_empty()) {
                            photo.caption = suggester.suggest(&photo.source);
                        }
                    }
                    None => warn!("no captioning service configured, keeping captions as-is"),
                }
            }

            let plan = LayoutPlan::build(&settings, photos.len())?;

            match format {
                FormatArg::Pdf => {
                    export_pdf_to_file(&plan, &photos, &settings, &output).await?;
                    println!(
                        "Exported {} photos on {} pages → {}",
                        photos.len(),
                        plan.pages.len(),
                        output.display()
                    );
                }
                FormatArg::Png => {
                    let written = export_png_files(&plan, &photos, &settings, &output).await?;
                    println!(
                        "Exported {} photos on {} pages:",
                        photos.len(),
                        written.len()
                    );
                    for path in &written {
                        println!("  {}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}

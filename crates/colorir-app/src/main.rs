//! Colorir CLI
//!
//! Render outlines and try fills from the command line.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colorir_app::DrawingSession;
use colorir_core::color::{PALETTE, Rgb, Thickness, palette_entry, palette_entry_by_name};
use colorir_core::tools::ToolKind;
use colorir_core::{ColorirConfig, LogNarrator, OutlineId, OutlineLibrary};
use colorir_render::{DEFAULT_EXPORT_NAME, SkiaRasterizer};
use kurbo::Point;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "colorir")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Coloring book for young children", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to <config dir>/colorir/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in outlines
    List,

    /// List the palette colors and stroke thicknesses
    Palette,

    /// Render an outline to a PNG
    Render {
        /// Outline id (see `colorir list`)
        outline: String,

        /// Output path
        #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
        output: PathBuf,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Render an outline, flood fill one point and save the result
    Fill {
        /// Outline id (see `colorir list`)
        outline: String,

        /// Seed pixel as X,Y
        #[arg(long, value_parser = parse_point)]
        at: Point,

        /// Fill color, a palette name (see `colorir palette`) or #RRGGBB
        #[arg(long, value_parser = parse_color)]
        color: Rgb,

        /// Output path
        #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
        output: PathBuf,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = match &cli.config {
        Some(path) => ColorirConfig::load(path)?,
        None => ColorirConfig::load_default()?,
    };

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Palette => cmd_palette(),
        Commands::Render {
            outline,
            output,
            width,
            height,
        } => cmd_render(config, &outline, &output, width, height),
        Commands::Fill {
            outline,
            at,
            color,
            output,
            width,
            height,
        } => cmd_fill(config, &outline, at, color, &output, width, height),
    }
}

fn cmd_list() -> Result<()> {
    for outline in OutlineLibrary::builtin().iter() {
        println!("{:<10} {}", outline.id, outline.name);
    }
    Ok(())
}

fn cmd_palette() -> Result<()> {
    for entry in &PALETTE {
        println!("{:<10} {}", entry.name, entry.color);
    }
    println!();
    for thickness in Thickness::all() {
        println!("{:<10} {} px", thickness.name(), thickness.width());
    }
    Ok(())
}

fn cmd_render(
    config: ColorirConfig,
    outline: &str,
    output: &Path,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let session = open_session(config, outline, width, height)?;
    save(&session, output)
}

fn cmd_fill(
    config: ColorirConfig,
    outline: &str,
    at: Point,
    color: Rgb,
    output: &Path,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let mut session = open_session(config, outline, width, height)?;
    if !session.surface().contains(at.x.floor() as i64, at.y.floor() as i64) {
        bail!(
            "Point {},{} is outside the {}x{} surface",
            at.x,
            at.y,
            session.surface().width(),
            session.surface().height()
        );
    }

    let name = palette_entry(color).map_or_else(|| color.to_hex(), |entry| entry.name.to_string());
    session.select_tool(ToolKind::Fill);
    session.set_color(color, &name);
    session.pointer_down(at)?;
    session.pointer_up(at)?;
    save(&session, output)
}

type CliSession = DrawingSession<SkiaRasterizer, LogNarrator>;

fn open_session(config: ColorirConfig, outline: &str, width: Option<u32>, height: Option<u32>) -> Result<CliSession> {
    let width = width.unwrap_or(config.surface_width);
    let height = height.unwrap_or(config.surface_height);
    if width == 0 || height == 0 {
        bail!("Surface size must be positive, got {width}x{height}");
    }

    let mut session = DrawingSession::new(config, width, height, SkiaRasterizer, LogNarrator)?;
    session
        .select_outline(&OutlineId::new(outline))
        .with_context(|| format!("Cannot open outline '{outline}'; run `colorir list`"))?;
    Ok(session)
}

fn save(session: &CliSession, output: &Path) -> Result<()> {
    let png = session.export_png()?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Saved {}", output.display());
    Ok(())
}

fn parse_color(value: &str) -> Result<Rgb, String> {
    let value = value.trim();
    match palette_entry_by_name(value) {
        Some(entry) => Ok(entry.color),
        None => value
            .parse::<Rgb>()
            .map_err(|e| format!("'{value}' is not a palette color or #RRGGBB: {e}")),
    }
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{value}'"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{s}': {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12, 7.5").unwrap(), Point::new(12.0, 7.5));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_parse_color_accepts_names_and_hex() {
        assert_eq!(parse_color("Azul").unwrap(), Rgb::new(0, 0, 255));
        assert_eq!(parse_color(" marrom ").unwrap(), Rgb::new(0x8B, 0x45, 0x13));
        assert_eq!(parse_color("#00ff00").unwrap(), Rgb::new(0, 255, 0));
        assert!(parse_color("azul-claro").is_err());
    }

    #[test]
    fn test_fill_color_by_name() {
        let cli = Cli::try_parse_from(["colorir", "fill", "sun", "--at", "5,5", "--color", "Rosa"]).unwrap();
        match cli.command {
            Commands::Fill { color, .. } => assert_eq!(color, Rgb::new(0xFF, 0x69, 0xB4)),
            _ => panic!("expected the fill command"),
        }
    }

    #[test]
    fn test_fill_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        cmd_fill(
            ColorirConfig::default(),
            "house",
            Point::new(100.0, 75.0),
            Rgb::new(0, 0, 255),
            &output,
            Some(200),
            Some(150),
        )
        .unwrap();
        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_render_unknown_outline_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        assert!(cmd_render(ColorirConfig::default(), "moon", &output, Some(50), Some(50)).is_err());
        assert!(!output.exists());
    }
}

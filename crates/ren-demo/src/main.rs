//! ren demo - render sample text into a PNG
//!
//! Usage: ren-demo [FONT] [--family NAME] [--size PX] [--subpixel]
//!        [--hinting none|slight|full] [--tab-size N] [--out FILE]
//!        [--width PX] [--height PX]

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use ren_render::{Color, Image, Rect, Renderer};
use ren_text::{BuiltinEngine, Font, ReplacementTable, Rounding, round_subpixel_width};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;

const BACKGROUND: Color = Color::rgb(0x1e, 0x1f, 0x26);
const GUTTER: Color = Color::rgb(0x2a, 0x2c, 0x36);
const SELECTION: Color = Color::rgba(0x61, 0xaf, 0xef, 0x40);
const TEXT: Color = Color::rgb(0xe1, 0xe1, 0xe6);
const WHITESPACE: Color = Color::rgba(0xe1, 0xe1, 0xe6, 0x60);

const SAMPLE: &[&str] = &[
    "fn main() {",
    "\tlet greeting = \"héllo, wörld\";",
    "\tprintln!(\"{greeting}\");",
    "}",
    "",
    "// Ελληνικά, кириллица, 日本語 and → arrows",
    "tabs:\ta\tb\tc",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse(std::env::args().skip(1))?;
    info!(?config, "starting ren demo");

    let mut font = load_font(&config)?;
    font.set_tab_size(config.tab_size)?;

    let image = render(&config, &mut font)?;
    write_png(&image, &config.out)?;

    info!(path = %config.out.display(), "wrote image");
    Ok(())
}

/// Load the configured font file, else a system font, else the builtin cells
fn load_font(config: &Config) -> Result<Font> {
    if let Some(path) = &config.font {
        return Font::load(path, config.size, config.options)
            .with_context(|| format!("failed to load font {}", path.display()));
    }

    match system_font(config) {
        Some(Ok(font)) => return Ok(font),
        Some(Err(e)) => warn!(error = %e, "system font unusable, using builtin glyphs"),
        None => warn!("no system font found, using builtin glyphs"),
    }

    let cell_height = config.size.round().max(1.0) as u16;
    let engine = BuiltinEngine::new(cell_height.div_ceil(2), cell_height);
    Ok(Font::from_engine(Box::new(engine), config.size)?)
}

fn system_font(config: &Config) -> Option<ren_text::Result<Font>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let mut families = Vec::new();
    if let Some(name) = &config.family {
        families.push(Family::Name(name.as_str()));
    }
    families.push(Family::Monospace);

    let id = db.query(&Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    })?;
    if let Some(face) = db.face(id) {
        info!(family = ?face.families.first(), "using system font");
    }

    db.with_face_data(id, |data, index| {
        Font::from_data(data.to_vec(), index, config.size, config.options)
    })
}

fn render(config: &Config, font: &mut Font) -> Result<Image> {
    let mut renderer = Renderer::new(Image::new(config.width, config.height)?);
    let (width, height) = renderer.size();
    renderer.draw_rect(Rect::new(0, 0, width, height), BACKGROUND);

    let line_height = font.height();
    let gutter = font.measure_width("000 ")?.pixels(Rounding::Nearest);
    renderer.draw_rect(Rect::new(0, 0, gutter, height), GUTTER);

    let mut whitespace = ReplacementTable::new();
    whitespace.add("\t", "»")?;

    for (i, line) in SAMPLE.iter().enumerate() {
        let y = i as i32 * line_height + line_height / 2;
        if y >= height {
            break;
        }

        let number = format!("{:>3}", i + 1);
        renderer.set_clip_rect(Rect::new(0, 0, gutter, height));
        renderer.draw_text(font, &number, 0, y, WHITESPACE, None, WHITESPACE)?;

        renderer.set_clip_rect(Rect::new(gutter, 0, width - gutter, height));
        let end = renderer.draw_text(font, *line, gutter, y, TEXT, Some(&whitespace), WHITESPACE)?;

        if i == 1 {
            let right = round_subpixel_width(end, font.subpixel_scale(), Rounding::Up);
            renderer.draw_rect(Rect::new(gutter, y, right - gutter, line_height), SELECTION);
        }
    }

    Ok(renderer.into_surface())
}

fn write_png(image: &Image, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let (width, height) = (image.width() as u32, image.height() as u32);
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.as_bytes())?;
    writer.finish()?;
    Ok(())
}

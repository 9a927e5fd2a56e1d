//! Command line configuration

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use ren_text::{Antialiasing, FontOptions, Hinting};

/// Demo settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Font file; when unset a system font is looked up
    pub font: Option<PathBuf>,
    /// Family to look up when no font file is given
    pub family: Option<String>,
    pub size: f32,
    pub options: FontOptions,
    /// Tab width in spaces
    pub tab_size: i32,
    pub out: PathBuf,
    pub width: i32,
    pub height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: None,
            family: None,
            size: 16.0,
            options: FontOptions::default(),
            tab_size: 4,
            out: PathBuf::from("ren-demo.png"),
            width: 640,
            height: 240,
        }
    }
}

impl Config {
    /// Parse arguments, without the program name.
    ///
    /// A lone positional argument is taken as the font file.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--subpixel" => config.options.antialiasing = Antialiasing::Subpixel,
                "--font" => config.font = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--family" => config.family = Some(value(&mut args, &arg)?),
                "--size" => config.size = number(&mut args, &arg)?,
                "--hinting" => config.options.hinting = parse_hinting(&value(&mut args, &arg)?)?,
                "--tab-size" => config.tab_size = number(&mut args, &arg)?,
                "--out" => config.out = PathBuf::from(value(&mut args, &arg)?),
                "--width" => config.width = number(&mut args, &arg)?,
                "--height" => config.height = number(&mut args, &arg)?,
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ if config.font.is_none() => config.font = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument {arg}"),
            }
        }

        if config.size <= 0.0 {
            bail!("--size must be positive");
        }
        if config.tab_size < 0 {
            bail!("--tab-size must not be negative");
        }
        Ok(config)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{flag} needs a value"))
}

fn number<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = value(args, flag)?;
    raw.parse().with_context(|| format!("invalid value {raw:?} for {flag}"))
}

fn parse_hinting(raw: &str) -> Result<Hinting> {
    match raw {
        "none" => Ok(Hinting::None),
        "slight" => Ok(Hinting::Slight),
        "full" => Ok(Hinting::Full),
        other => bail!("unknown hinting mode {other:?} (expected none, slight or full)"),
    }
}

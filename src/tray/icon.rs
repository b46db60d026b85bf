//! Tray icon images
//!
//! The icon tells whether any output device is available. Built-in glyphs are
//! drawn at runtime; a theme directory can override them with
//! `ready.png` and `no-output.png`.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tray_icon::Icon;

/// Edge length of tray icons in pixels
pub const ICON_SIZE: u32 = 22;

const GLYPH: Rgba<u8> = Rgba([220, 220, 220, 255]);
const STRIKE: Rgba<u8> = Rgba([214, 64, 52, 255]);

/// What the tray icon shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    /// At least one sink is present
    Ready,
    /// No sink to play to
    NoOutput,
}

impl IconState {
    /// State for a menu holding `sinks` sink entries
    pub fn for_sinks(sinks: usize) -> Self {
        if sinks == 0 {
            IconState::NoOutput
        } else {
            IconState::Ready
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            IconState::Ready => "ready.png",
            IconState::NoOutput => "no-output.png",
        }
    }
}

/// Icons for every state, loaded once
pub struct TrayIcons {
    ready: Icon,
    no_output: Icon,
}

impl TrayIcons {
    /// Load icons from `theme_dir`, falling back to the built-in glyphs
    pub fn load(theme_dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            ready: themed_icon(IconState::Ready, theme_dir)?,
            no_output: themed_icon(IconState::NoOutput, theme_dir)?,
        })
    }

    pub fn get(&self, state: IconState) -> Icon {
        match state {
            IconState::Ready => self.ready.clone(),
            IconState::NoOutput => self.no_output.clone(),
        }
    }
}

fn themed_icon(state: IconState, theme_dir: Option<&Path>) -> Result<Icon> {
    let image = match theme_dir.map(|dir| dir.join(state.file_name())) {
        Some(path) if path.exists() => match load_image(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Using built-in {:?} icon: {:#}", state, e);
                glyph(state)
            }
        },
        Some(path) => {
            debug!("No themed icon at {:?}", path);
            glyph(state)
        }
        None => glyph(state),
    };

    to_icon(image)
}

/// Theme directory next to the settings file
pub fn default_theme_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("audiotray").join("icons"))
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("Failed to load icon: {:?}", path))?;
    Ok(image
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}

fn to_icon(image: RgbaImage) -> Result<Icon> {
    let (width, height) = image.dimensions();
    Ok(Icon::from_rgba(image.into_raw(), width, height)?)
}

/// Speaker glyph, with sound waves when ready and a red cross otherwise
pub fn glyph(state: IconState) -> RgbaImage {
    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let dy = (y - 11).abs();

        let body = (3..8).contains(&x) && (8..14).contains(&y);
        let cone = (8..13).contains(&x) && dy <= x - 5;
        if body || cone {
            return GLYPH;
        }

        match state {
            IconState::Ready => {
                let wave = (x == 15 && dy <= 3) || (x == 18 && dy <= 6);
                if wave {
                    return GLYPH;
                }
            }
            IconState::NoOutput => {
                let (u, v) = (x - 14, y - 8);
                let strike = (0..6).contains(&u) && (0..6).contains(&v) && (u == v || u + v == 5);
                if strike {
                    return STRIKE;
                }
            }
        }

        Rgba([0, 0, 0, 0])
    })
}

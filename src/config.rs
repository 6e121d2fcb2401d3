//! User settings, loaded from a JSON file next to the binary.
//!
//! A missing or empty file means "use the defaults". The palette is checked on
//! load: guide toggling separates ink from background by darkness, so ink has to
//! stay strictly darker than every grid and guide pixel.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gamma::GammaLut;

/// How ink survives a background repaint when the guide is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recomposite {
    /// Re-render the recorded stroke paths over the fresh background.
    #[default]
    Vector,
    /// Threshold the current raster into an ink-only layer and overlay it.
    PixelMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InkStyle {
    pub color: [u8; 3],
    pub width: f32,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self { color: [0x00, 0x00, 0x00], width: 18.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub paper: [u8; 3],
    pub grid: [u8; 3],
    pub guide: [u8; 3],
    pub guide_opacity: f32,
    /// A pixel is ink when R, G and B are all below this.
    pub ink_threshold: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paper: [0xFF, 0xFF, 0xFF],
            grid: [0xDD, 0xDD, 0xDD],
            guide: [0x55, 0x55, 0x55],
            guide_opacity: 0.3,
            ink_threshold: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Internal raster resolution (square).
    pub surface_size: u32,
    /// Initial on-screen size of the window (square).
    pub window_size: usize,
    /// Space between the surface edge and the fitted reference glyph.
    pub padding: f32,
    pub guide_visible: bool,
    pub ink: InkStyle,
    pub palette: Palette,
    pub recomposite: Recomposite,
    pub data_dir: PathBuf,
    pub reward_file: PathBuf,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_size: 400,
            window_size: 400,
            padding: 20.0,
            guide_visible: true,
            ink: InkStyle::default(),
            palette: Palette::default(),
            recomposite: Recomposite::default(),
            data_dir: PathBuf::from("data"),
            reward_file: PathBuf::from("rewards.json"),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::read(path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::json(path, e))?;
        std::fs::write(path, json).map_err(|e| Error::write(path, e))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.surface_size == 0 || self.window_size == 0 {
            return Err(Error::Settings("surface and window size must be positive".into()));
        }
        if !(self.ink.width > 0.0) {
            return Err(Error::Settings(format!("ink width must be positive, got {}", self.ink.width)));
        }
        if !(0.0..=1.0).contains(&self.palette.guide_opacity) {
            return Err(Error::Settings(format!(
                "guide opacity must be within 0..=1, got {}",
                self.palette.guide_opacity
            )));
        }
        self.palette.check_ink(self.ink.color)
    }
}

impl Palette {
    /// Every background color, as it actually lands on the surface.
    /// The guide is blended over whatever is under it: paper or grid lines.
    fn background_colors(&self) -> [(&'static str, [u8; 3]); 4] {
        let lut = GammaLut::new();
        let rgb = |p: image::Rgba<u8>| [p[0], p[1], p[2]];
        let opaque = |c: [u8; 3]| image::Rgba([c[0], c[1], c[2], 255]);
        let over_paper = lut.blend_over(opaque(self.paper), self.guide, self.guide_opacity);
        let over_grid = lut.blend_over(opaque(self.grid), self.guide, self.guide_opacity);
        [
            ("paper", self.paper),
            ("grid", self.grid),
            ("guide over paper", rgb(over_paper)),
            ("guide over grid", rgb(over_grid)),
        ]
    }

    pub fn check_ink(&self, ink: [u8; 3]) -> Result<(), Error> {
        let t = self.ink_threshold;
        if ink.iter().any(|c| *c >= t) {
            return Err(Error::Palette(format!("ink {ink:?} is not darker than threshold {t}")));
        }
        for (name, color) in self.background_colors() {
            if color.iter().any(|c| *c < t) {
                return Err(Error::Palette(format!("{name} color {color:?} falls in the ink band (< {t})")));
            }
        }
        Ok(())
    }
}

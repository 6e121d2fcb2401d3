//! Glyph stroke data and the per-glyph stroke list shown to the learner.
//!
//! Data files follow the hanzi-writer layout, one `<char>.json` per glyph:
//!
//! ```json
//! { "strokes": ["M 120 450 ..."], "medians": [[[120, 450], [900, 450]]], "strokeNames": ["H"] }
//! ```
//!
//! Medians are stored y-up around a baseline of 900 and are flipped to y-down
//! on load. `strokeNames` is optional; when present it is authoritative.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::background::ReferenceGlyph;
use crate::classify::classify;
use crate::error::Error;
use crate::types::{Median, Point, StrokeDescriptor};

/// hanzi-writer stores y = 900 - y_down.
const SOURCE_BASELINE: f32 = 900.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlyphFile {
    #[serde(default)]
    strokes: Vec<String>,
    #[serde(default)]
    medians: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    stroke_names: Vec<String>,
}

/// Everything the data source knows about one character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphData {
    pub character: char,
    /// Outline path per stroke, passed through untouched.
    pub outlines: Vec<String>,
    /// y-down medians in em units, in writing order.
    pub medians: Vec<Median>,
    /// Authoritative names in writing order; empty when unknown.
    pub names: Vec<StrokeDescriptor>,
}

impl GlyphData {
    pub fn stroke_count(&self) -> usize {
        self.medians.len().max(self.outlines.len())
    }

    pub fn reference(&self) -> ReferenceGlyph {
        ReferenceGlyph::new(self.medians.clone())
    }
}

pub trait GlyphSource {
    fn lookup(&self, ch: char) -> Result<GlyphData, Error>;
}

/// Reads `<dir>/<char>.json`.
pub struct JsonGlyphSource {
    dir: PathBuf,
}

impl JsonGlyphSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, ch: char) -> PathBuf {
        self.dir.join(format!("{ch}.json"))
    }

    pub fn parse(ch: char, path: &Path, json: &str) -> Result<GlyphData, Error> {
        let file: GlyphFile = serde_json::from_str(json).map_err(|e| Error::json(path, e))?;
        let medians = file
            .medians
            .into_iter()
            .map(|m| m.into_iter().map(|[x, y]| Point::new(x, SOURCE_BASELINE - y)).collect())
            .collect();
        let names = file
            .stroke_names
            .iter()
            .map(|n| StrokeDescriptor::named(stroke_name(n)))
            .collect();
        Ok(GlyphData { character: ch, outlines: file.strokes, medians, names })
    }
}

impl GlyphSource for JsonGlyphSource {
    fn lookup(&self, ch: char) -> Result<GlyphData, Error> {
        let path = self.path_for(ch);
        let json = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::GlyphMissing(ch)),
            Err(e) => return Err(Error::read(&path, e)),
        };
        Self::parse(ch, &path, &json)
    }
}

/// Expand a short stroke code (H, S, HZ, ...) to its name.
/// Anything that is not a known code is taken to be a name already,
/// unless it is plain ASCII, which becomes 其他.
pub fn stroke_name(code: &str) -> String {
    let name = match code {
        "H" => "横",
        "S" => "竖",
        "P" => "撇",
        "N" => "捺",
        "D" => "点",
        "T" => "提",
        "HZ" => "横折",
        "HG" => "横钩",
        "SG" => "竖钩",
        "ZG" => "斜钩",
        "WG" | "XG" => "弯钩",
        "HZH" => "横折钩",
        "HZW" => "横折弯",
        "HZWG" => "横折弯钩",
        "SP" => "竖撇",
        other if other.is_empty() || other.is_ascii() => "其他",
        other => other,
    };
    name.to_string()
}

/// List label for the stroke at `ordinal` (0-based).
pub fn stroke_label(name: &str, ordinal: usize) -> String {
    format!("第{}画：{}", ordinal + 1, name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Authoritative,
    Inferred,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub origin: Origin,
    pub strokes: Vec<StrokeDescriptor>,
}

impl Decomposition {
    /// Authoritative names win outright. Otherwise every median is classified.
    /// The two are never mixed stroke by stroke.
    pub fn from_data(data: &GlyphData) -> Self {
        if !data.names.is_empty() {
            return Self { origin: Origin::Authoritative, strokes: data.names.clone() };
        }
        if data.medians.is_empty() {
            return Self::unavailable();
        }
        let strokes = data
            .medians
            .iter()
            .enumerate()
            .map(|(i, m)| StrokeDescriptor::named(classify(m, i).to_string()))
            .collect();
        Self { origin: Origin::Inferred, strokes }
    }

    pub fn unavailable() -> Self {
        Self { origin: Origin::Unavailable, strokes: Vec::new() }
    }

    pub fn labels(&self) -> Vec<String> {
        self.strokes.iter().enumerate().map(|(i, s)| stroke_label(&s.name, i)).collect()
    }
}

/// Look the glyph up and describe its strokes. Lookup failures are logged and
/// produce an empty description alongside empty glyph data.
pub fn decompose(source: &dyn GlyphSource, ch: char) -> (GlyphData, Decomposition) {
    match source.lookup(ch) {
        Ok(data) => {
            let d = Decomposition::from_data(&data);
            if d.origin == Origin::Unavailable {
                warn!(%ch, "glyph data has no strokes");
            }
            (data, d)
        }
        Err(e) => {
            warn!(%ch, error = %e, "glyph lookup failed; continuing without stroke data");
            (GlyphData { character: ch, ..GlyphData::default() }, Decomposition::unavailable())
        }
    }
}

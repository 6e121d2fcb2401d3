// Core value types shared by the surface, the renderers and the classifier.

use image::RgbaImage;

/// A position in surface-local pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Points captured during one pointer-down .. pointer-up contact.
/// Grows while the contact is open; never edited once it ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn starting_at(p: Point) -> Self {
        Self { points: vec![p] }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of connecting segments rendered for this stroke.
    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Idealized centerline of one authoritative stroke, in writing order.
pub type Median = Vec<Point>;

/// Name (and optional shape marker) for one stroke of a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeDescriptor {
    pub name: String,
    pub shape: Option<String>,
}

impl StrokeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), shape: None }
    }
}

/// Packed pixels ready for the window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Pack an RGBA raster as 0x00RRGGBB. Alpha is dropped; the surface is always opaque.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Self { width: w as usize, height: h as usize, pixels }
    }
}

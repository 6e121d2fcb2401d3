//! Paints the practice grid and, optionally, a faded reference glyph.
//!
//! The grid is the classic square with a center cross and dashed diagonals.
//! The reference glyph is drawn by sweeping a thick brush along each stroke's
//! median, then blending the covered pixels once at the guide opacity.

use image::{Rgba, RgbaImage};

use crate::config::Palette;
use crate::gamma::GammaLut;
use crate::raster::{Coverage, draw_dashed_line, draw_line, sweep_disc};
use crate::types::{Median, Point};

/// Side of the square box glyph medians are expressed in.
pub const EM_SIZE: f32 = 1024.0;

/// Guide stroke thickness as a fraction of the fitted em box.
const GUIDE_WIDTH_EM: f32 = 0.09;

/// A glyph's stroke medians in em units (y downward), used as the tracing guide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceGlyph {
    pub medians: Vec<Median>,
}

impl ReferenceGlyph {
    pub fn new(medians: Vec<Median>) -> Self {
        Self { medians }
    }

    pub fn is_empty(&self) -> bool {
        self.medians.iter().all(|m| m.is_empty())
    }

    /// Medians scaled into a `size`-pixel square, inset by `padding` on every side.
    pub fn fit(&self, size: u32, padding: f32) -> Vec<Median> {
        let scale = ((size as f32 - 2.0 * padding) / EM_SIZE).max(0.0);
        self.medians
            .iter()
            .map(|m| m.iter().map(|p| Point::new(padding + p.x * scale, padding + p.y * scale)).collect())
            .collect()
    }
}

pub struct BackgroundRenderer {
    palette: Palette,
    padding: f32,
    lut: GammaLut,
}

impl BackgroundRenderer {
    pub fn new(palette: Palette, padding: f32) -> Self {
        Self { palette, padding, lut: GammaLut::new() }
    }

    /// Repaint the whole raster: paper, grid, then the guide glyph if visible.
    pub fn paint(&self, img: &mut RgbaImage, reference: &ReferenceGlyph, guide_visible: bool) {
        let [r, g, b] = self.palette.paper;
        for p in img.pixels_mut() {
            *p = Rgba([r, g, b, 255]);
        }
        self.paint_grid(img);
        if guide_visible {
            self.paint_guide(img, reference);
        }
    }

    fn paint_grid(&self, img: &mut RgbaImage) {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let [r, g, b] = self.palette.grid;
        let color = Rgba([r, g, b, 255]);
        let (right, bottom) = (w as i32 - 1, h as i32 - 1);
        let (cx, cy) = (right / 2, bottom / 2);

        // Bounding box
        draw_line(img, 0, 0, right, 0, color);
        draw_line(img, right, 0, right, bottom, color);
        draw_line(img, right, bottom, 0, bottom, color);
        draw_line(img, 0, bottom, 0, 0, color);

        // Center cross
        draw_line(img, cx, 0, cx, bottom, color);
        draw_line(img, 0, cy, right, cy, color);

        // Diagonals
        draw_dashed_line(img, (0, 0), (right, bottom), 6, 6, color);
        draw_dashed_line(img, (right, 0), (0, bottom), 6, 6, color);
    }

    fn paint_guide(&self, img: &mut RgbaImage, reference: &ReferenceGlyph) {
        if reference.is_empty() {
            return;
        }
        let (w, h) = img.dimensions();
        let size = w.min(h);
        let fitted = reference.fit(size, self.padding);
        let radius = (size as f32 - 2.0 * self.padding).max(0.0) * GUIDE_WIDTH_EM / 2.0;

        let mut cov = Coverage::new(w, h);
        for median in &fitted {
            match median.as_slice() {
                [] => {}
                [only] => sweep_disc(w, h, *only, *only, radius, |x, y| cov.mark(x, y)),
                pts => {
                    for pair in pts.windows(2) {
                        sweep_disc(w, h, pair[0], pair[1], radius, |x, y| cov.mark(x, y));
                    }
                }
            }
        }

        for (x, y) in cov.iter_hits() {
            let under = *img.get_pixel(x, y);
            let mixed = self.lut.blend_over(under, self.palette.guide, self.palette.guide_opacity);
            img.put_pixel(x, y, mixed);
        }
    }
}

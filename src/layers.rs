// Splits a composited surface back into "ink" and "everything else" by darkness.
// Only sound while the palette keeps ink darker than any background pixel,
// which Settings::validate enforces.

use image::{Rgba, RgbaImage, imageops};

#[derive(Debug, Clone, Copy)]
pub struct LayerSeparator {
    threshold: u8,
}

impl LayerSeparator {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Ink when all three color channels are below the threshold.
    #[inline]
    pub fn is_ink(&self, p: &Rgba<u8>) -> bool {
        p[0] < self.threshold && p[1] < self.threshold && p[2] < self.threshold
    }

    /// Copy of `surface` where ink pixels are kept and everything else is fully transparent.
    /// Visual: the strokes floating on nothing; grid and guide are gone.
    pub fn extract_ink(&self, surface: &RgbaImage) -> RgbaImage {
        let mut layer = surface.clone();
        for p in layer.pixels_mut() {
            if !self.is_ink(p) {
                *p = Rgba([0, 0, 0, 0]);
            }
        }
        layer
    }

    /// Draw an extracted ink layer over a freshly painted background.
    /// Visual: the old strokes land back on the new grid, pixel for pixel.
    pub fn composite(ink: &RgbaImage, onto: &mut RgbaImage) {
        // Transparent pixels leave the background alone; ink pixels are opaque.
        imageops::overlay(onto, ink, 0, 0);
    }

    /// Coordinates of every ink pixel, row-major.
    pub fn ink_pixels(&self, surface: &RgbaImage) -> Vec<(u32, u32)> {
        surface
            .enumerate_pixels()
            .filter(|(_, _, p)| self.is_ink(p))
            .map(|(x, y, _)| (x, y))
            .collect()
    }
}

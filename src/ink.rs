// Strokes user input onto the surface: solid color, fixed width, round caps and joins.
// No anti-aliasing, so every ink pixel carries exactly the ink color.

use image::{Rgba, RgbaImage};

use crate::config::InkStyle;
use crate::raster::sweep_disc;
use crate::types::{Point, Stroke};

#[derive(Debug, Clone, Copy)]
pub struct InkRenderer {
    color: Rgba<u8>,
    radius: f32,
}

impl InkRenderer {
    pub fn new(style: InkStyle) -> Self {
        let [r, g, b] = style.color;
        Self { color: Rgba([r, g, b, 255]), radius: style.width / 2.0 }
    }

    /// Render the connecting segment a -> b.
    /// Visual: a thick line with rounded ends, so consecutive segments join smoothly.
    pub fn segment(&self, img: &mut RgbaImage, a: Point, b: Point) {
        let (w, h) = img.dimensions();
        let color = self.color;
        // Stamp the pen disc along the segment; overwrite, never blend.
        sweep_disc(w, h, a, b, self.radius, |x, y| img.put_pixel(x, y, color));
    }

    /// Re-render a recorded stroke exactly as it was drawn live.
    pub fn stroke(&self, img: &mut RgbaImage, stroke: &Stroke) {
        for pair in stroke.points().windows(2) {
            self.segment(img, pair[0], pair[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn pen() -> InkRenderer {
        InkRenderer::new(InkStyle { color: [0, 0, 0], width: 6.0 })
    }

    #[test]
    fn segment_paints_solid_ink() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        pen().segment(&mut img, Point::new(5.0, 20.0), Point::new(35.0, 20.0));
        assert_eq!(*img.get_pixel(20, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(20, 5), WHITE);
        assert!(img.pixels().all(|p| *p == WHITE || *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn replaying_a_stroke_matches_live_drawing() {
        let pts = [Point::new(3.0, 3.0), Point::new(30.0, 8.0), Point::new(12.0, 35.0)];
        let mut live = RgbaImage::from_pixel(40, 40, WHITE);
        let mut stroke = Stroke::starting_at(pts[0]);
        for p in &pts[1..] {
            pen().segment(&mut live, stroke.last().unwrap(), *p);
            stroke.push(*p);
        }

        let mut replay = RgbaImage::from_pixel(40, 40, WHITE);
        pen().stroke(&mut replay, &stroke);
        assert_eq!(live, replay);
    }

    #[test]
    fn single_point_stroke_paints_nothing() {
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        pen().stroke(&mut img, &Stroke::starting_at(Point::new(5.0, 5.0)));
        assert!(img.pixels().all(|p| *p == WHITE));
    }
}

// Maps pointer positions in the (possibly resized) window onto the raster grid.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSampler {
    display: (f32, f32),
    raster: (f32, f32),
}

impl PointSampler {
    pub fn new(display: (usize, usize), raster: (u32, u32)) -> Self {
        Self {
            display: (display.0 as f32, display.1 as f32),
            raster: (raster.0 as f32, raster.1 as f32),
        }
    }

    /// Call when the window is resized.
    pub fn set_display(&mut self, display: (usize, usize)) {
        self.display = (display.0 as f32, display.1 as f32);
    }

    /// Window coordinates -> raster coordinates.
    /// Returns None for a zero-sized display or a position outside it.
    pub fn sample(&self, x: f32, y: f32) -> Option<Point> {
        let (dw, dh) = self.display;
        if dw <= 0.0 || dh <= 0.0 {
            return None;
        }
        if x < 0.0 || y < 0.0 || x > dw || y > dh {
            return None;
        }
        Some(Point::new(x * self.raster.0 / dw, y * self.raster.1 / dh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_sizes_match() {
        let s = PointSampler::new((400, 400), (400, 400));
        assert_eq!(s.sample(12.0, 34.0), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn scales_each_axis_after_resize() {
        let mut s = PointSampler::new((400, 400), (400, 400));
        s.set_display((800, 200));
        assert_eq!(s.sample(400.0, 100.0), Some(Point::new(200.0, 200.0)));
    }

    #[test]
    fn rejects_outside_and_degenerate() {
        let s = PointSampler::new((100, 100), (400, 400));
        assert_eq!(s.sample(-1.0, 5.0), None);
        assert_eq!(s.sample(5.0, 101.0), None);
        assert_eq!(PointSampler::new((0, 100), (400, 400)).sample(0.0, 0.0), None);
    }
}

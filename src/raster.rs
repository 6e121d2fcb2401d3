// Software drawing primitives on the RGBA surface.
// Everything here clips to the raster bounds, so callers can pass any coordinates.

use image::{Rgba, RgbaImage};

use crate::types::Point;

/// Put a pixel if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    img.put_pixel(x, y, color);
}

/// Bresenham walk from (x0,y0) to (x1,y1). `plot` sees every step with its index.
fn walk_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(usize, i32, i32)) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut step = 0usize;
    loop {
        plot(step, x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
        step += 1;
    }
}

/// Solid 1-pixel line.
pub fn draw_line(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    walk_line(x0, y0, x1, y1, |_, x, y| put_pixel(img, x, y, color));
}

/// 1-pixel line with `on` pixels drawn, then `off` pixels skipped, repeating.
pub fn draw_dashed_line(
    img: &mut RgbaImage,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    on: usize,
    off: usize,
    color: Rgba<u8>,
) {
    let period = (on + off).max(1);
    walk_line(x0, y0, x1, y1, |step, x, y| {
        if step % period < on {
            put_pixel(img, x, y, color);
        }
    });
}

/// Visit every raster cell whose center lies inside the disc.
pub fn for_each_in_disc(width: u32, height: u32, c: Point, radius: f32, mut visit: impl FnMut(u32, u32)) {
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let x_min = (c.x - radius).floor().max(0.0) as i64;
    let y_min = (c.y - radius).floor().max(0.0) as i64;
    let x_max = ((c.x + radius).ceil() as i64).min(width as i64 - 1);
    let y_max = ((c.y + radius).ceil() as i64).min(height as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 + 0.5 - c.x;
            let dy = y as f32 + 0.5 - c.y;
            if dx * dx + dy * dy <= r2 {
                visit(x as u32, y as u32);
            }
        }
    }
}

/// Sweep a disc from `a` to `b`, one stamp per pixel of travel.
/// The disc at each end gives round caps; consecutive sweeps give round joins.
pub fn sweep_disc(width: u32, height: u32, a: Point, b: Point, radius: f32, mut visit: impl FnMut(u32, u32)) {
    let steps = a.distance(b).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let c = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        for_each_in_disc(width, height, c, radius, &mut visit);
    }
}

/// Per-pixel "was touched" flags, used to blend translucent shapes exactly once.
pub struct Coverage {
    pub width: u32,
    pub height: u32,
    pub hit: Vec<bool>,
}

impl Coverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, hit: vec![false; width as usize * height as usize] }
    }

    pub fn mark(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.hit[y as usize * self.width as usize + x as usize] = true;
        }
    }

    pub fn iter_hits(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.hit
            .iter()
            .enumerate()
            .filter(|(_, h)| **h)
            .map(move |(i, _)| ((i % w) as u32, (i / w) as u32))
    }
}

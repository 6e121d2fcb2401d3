//! The drawing surface: one raster, one background, the user's ink on top.
//!
//! Strokes are recorded as point paths next to the raster. Toggling the guide
//! repaints the background and brings the ink back, either by replaying those
//! paths ([`Recomposite::Vector`]) or by cutting the ink out of the old raster
//! with [`LayerSeparator`] ([`Recomposite::PixelMask`]).
//!
//! Every operation is a no-op until [`DrawingSurface::initialize`] has been
//! given a non-zero size.

use image::RgbaImage;
use tracing::debug;

use crate::background::{BackgroundRenderer, ReferenceGlyph};
use crate::config::{Recomposite, Settings};
use crate::ink::InkRenderer;
use crate::layers::LayerSeparator;
use crate::types::{Point, Stroke};

pub struct DrawingSurface {
    raster: Option<RgbaImage>,
    background: BackgroundRenderer,
    ink: InkRenderer,
    separator: LayerSeparator,
    mode: Recomposite,
    reference: ReferenceGlyph,
    guide_visible: bool,
    open: Option<Stroke>,
    strokes: Vec<Stroke>,
    has_ink: bool,
}

impl DrawingSurface {
    pub fn new(settings: &Settings) -> Self {
        Self {
            raster: None,
            background: BackgroundRenderer::new(settings.palette, settings.padding),
            ink: InkRenderer::new(settings.ink),
            separator: LayerSeparator::new(settings.palette.ink_threshold),
            mode: settings.recomposite,
            reference: ReferenceGlyph::default(),
            guide_visible: settings.guide_visible,
            open: None,
            strokes: Vec::new(),
            has_ink: false,
        }
    }

    /// (Re)allocate a `size`x`size` raster and paint the background.
    /// Any previous ink is discarded. Size 0 leaves the surface untouched.
    /// Visual: an empty practice grid, with the faded character if the guide is on.
    pub fn initialize(&mut self, size: u32, reference: ReferenceGlyph, guide_visible: bool) {
        if size == 0 {
            debug!("ignoring initialize with zero size");
            return;
        }
        let mut raster = RgbaImage::new(size, size);
        self.background.paint(&mut raster, &reference, guide_visible);
        self.raster = Some(raster);
        self.reference = reference;
        self.guide_visible = guide_visible;
        self.open = None;
        self.strokes.clear();
        self.has_ink = false;
        debug!(size, guide_visible, "surface initialized");
    }

    /// Open a stroke at `p`. A stroke that is still open gets closed first.
    pub fn begin_stroke(&mut self, p: Point) {
        if self.raster.is_none() {
            return;
        }
        if self.open.is_some() {
            debug!("begin_stroke while a stroke is open; restarting path");
            self.end_stroke();
        }
        self.open = Some(Stroke::starting_at(p));
    }

    /// Extend the open stroke to `p` and render the new segment right away.
    /// Visual: the line follows the pen with no lag, one segment per mouse move.
    pub fn continue_stroke(&mut self, p: Point) {
        let (Some(raster), Some(stroke)) = (self.raster.as_mut(), self.open.as_mut()) else {
            return;
        };
        if let Some(last) = stroke.last() {
            self.ink.segment(raster, last, p);
        }
        stroke.push(p);
    }

    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.open.take() else {
            return;
        };
        // A tap without movement left no pixels behind.
        if stroke.segments() == 0 {
            return;
        }
        debug!(points = stroke.points().len(), "stroke committed");
        self.strokes.push(stroke);
        self.has_ink = true;
    }

    /// Back to a freshly initialized surface with the current guide setting.
    /// Visual: all ink vanishes; the grid (and guide, if shown) stays.
    pub fn clear(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        self.background.paint(raster, &self.reference, self.guide_visible);
        self.open = None;
        self.strokes.clear();
        self.has_ink = false;
        debug!("surface cleared");
    }

    /// Show or hide the reference glyph without touching the ink.
    /// Visual: only the faded character appears or disappears; every stroke
    /// stays exactly where it was, including one still being drawn.
    pub fn set_guide_visible(&mut self, visible: bool) {
        if visible == self.guide_visible {
            return;
        }
        self.guide_visible = visible;
        let Some(raster) = self.raster.as_mut() else {
            return;
        };

        match self.mode {
            Recomposite::Vector => {
                // Fresh background, then every path replayed in drawing order.
                self.background.paint(raster, &self.reference, visible);
                for stroke in self.strokes.iter().chain(self.open.iter()) {
                    self.ink.stroke(raster, stroke);
                }
            }
            Recomposite::PixelMask => {
                // Cut the ink out before the repaint wipes it.
                let ink = self.separator.extract_ink(raster);
                self.background.paint(raster, &self.reference, visible);
                LayerSeparator::composite(&ink, raster);
            }
        }
        debug!(visible, mode = ?self.mode, "guide toggled");
    }

    pub fn guide_visible(&self) -> bool {
        self.guide_visible
    }

    /// True once a stroke with at least one segment has ended since the last clear.
    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    pub fn is_stroke_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn raster(&self) -> Option<&RgbaImage> {
        self.raster.as_ref()
    }

    /// Coordinates of every ink pixel currently on the raster.
    pub fn ink_pixels(&self) -> Vec<(u32, u32)> {
        self.raster.as_ref().map(|r| self.separator.ink_pixels(r)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph() -> ReferenceGlyph {
        ReferenceGlyph::new(vec![
            vec![Point::new(150.0, 300.0), Point::new(880.0, 300.0)],
            vec![Point::new(512.0, 100.0), Point::new(512.0, 950.0)],
        ])
    }

    fn surface(mode: Recomposite) -> DrawingSurface {
        let settings = Settings { recomposite: mode, ..Settings::default() };
        let mut s = DrawingSurface::new(&settings);
        s.initialize(120, glyph(), true);
        s
    }

    fn draw(s: &mut DrawingSurface, pts: &[(f32, f32)]) {
        let mut it = pts.iter().map(|&(x, y)| Point::new(x, y));
        if let Some(first) = it.next() {
            s.begin_stroke(first);
        }
        for p in it {
            s.continue_stroke(p);
        }
        s.end_stroke();
    }

    const MODES: [Recomposite; 2] = [Recomposite::Vector, Recomposite::PixelMask];

    #[test]
    fn toggle_pair_keeps_ink() {
        for mode in MODES {
            let mut s = surface(mode);
            draw(&mut s, &[(1.0, 1.0), (5.0, 5.0)]);
            assert!(s.has_ink());
            let before = s.ink_pixels();
            assert!(!before.is_empty());

            s.set_guide_visible(false);
            s.set_guide_visible(true);

            assert!(s.has_ink(), "{mode:?}");
            assert_eq!(s.ink_pixels(), before, "{mode:?}");
        }
    }

    #[test]
    fn toggled_surface_matches_ink_drawn_after_the_change() {
        for mode in MODES {
            let strokes: [&[(f32, f32)]; 2] = [&[(10.0, 60.0), (100.0, 62.0)], &[(60.0, 10.0), (58.0, 110.0)]];

            let mut toggled = surface(mode);
            for st in strokes {
                draw(&mut toggled, st);
            }
            toggled.set_guide_visible(false);

            let mut direct = surface(mode);
            direct.set_guide_visible(false);
            for st in strokes {
                draw(&mut direct, st);
            }

            assert_eq!(toggled.raster(), direct.raster(), "{mode:?}");
        }
    }

    #[test]
    fn clear_equals_fresh_initialize() {
        for guide in [true, false] {
            let mut s = surface(Recomposite::Vector);
            s.set_guide_visible(guide);
            draw(&mut s, &[(20.0, 20.0), (90.0, 90.0)]);
            s.clear();
            assert!(!s.has_ink());
            assert!(s.strokes().is_empty());

            let mut fresh = DrawingSurface::new(&Settings::default());
            fresh.initialize(120, glyph(), guide);
            assert_eq!(s.raster(), fresh.raster());
        }
    }

    #[test]
    fn operations_before_initialize_are_noops() {
        let mut s = DrawingSurface::new(&Settings::default());
        s.begin_stroke(Point::new(1.0, 1.0));
        s.continue_stroke(Point::new(5.0, 5.0));
        s.end_stroke();
        s.set_guide_visible(false);
        s.clear();
        assert!(s.raster().is_none());
        assert!(!s.has_ink());
        assert!(s.ink_pixels().is_empty());
    }

    #[test]
    fn zero_size_initialize_is_ignored() {
        let mut s = surface(Recomposite::Vector);
        draw(&mut s, &[(20.0, 20.0), (40.0, 40.0)]);
        let before = s.raster().cloned();
        s.initialize(0, ReferenceGlyph::default(), false);
        assert_eq!(s.raster().cloned(), before);
        assert!(s.has_ink());
    }

    #[test]
    fn continue_without_begin_draws_nothing() {
        let mut s = surface(Recomposite::Vector);
        s.continue_stroke(Point::new(30.0, 30.0));
        s.end_stroke();
        assert!(!s.has_ink());
        assert!(s.ink_pixels().is_empty());
    }

    #[test]
    fn begin_without_segment_is_not_ink() {
        let mut s = surface(Recomposite::Vector);
        s.begin_stroke(Point::new(30.0, 30.0));
        s.end_stroke();
        assert!(!s.has_ink());
    }

    #[test]
    fn overlapping_begin_commits_the_open_stroke() {
        let mut s = surface(Recomposite::Vector);
        s.begin_stroke(Point::new(10.0, 10.0));
        s.continue_stroke(Point::new(30.0, 10.0));
        s.begin_stroke(Point::new(50.0, 50.0));
        assert_eq!(s.strokes().len(), 1);
        assert!(s.is_stroke_open());
        s.continue_stroke(Point::new(70.0, 50.0));
        s.end_stroke();
        assert_eq!(s.strokes().len(), 2);
    }

    #[test]
    fn toggle_keeps_an_open_stroke_alive() {
        for mode in MODES {
            let mut s = surface(mode);
            s.begin_stroke(Point::new(10.0, 90.0));
            s.continue_stroke(Point::new(40.0, 90.0));
            s.set_guide_visible(false);
            s.continue_stroke(Point::new(70.0, 90.0));
            s.end_stroke();

            let mut direct = surface(mode);
            direct.set_guide_visible(false);
            draw(&mut direct, &[(10.0, 90.0), (40.0, 90.0), (70.0, 90.0)]);
            assert_eq!(s.ink_pixels(), direct.ink_pixels(), "{mode:?}");
        }
    }

    #[test]
    fn blank_surface_has_no_ink_pixels() {
        // Grid lines under the guide must not read as ink, or a toggle would keep them.
        for guide in [true, false] {
            let mut s = DrawingSurface::new(&Settings { recomposite: Recomposite::PixelMask, ..Settings::default() });
            s.initialize(120, glyph(), guide);
            assert!(s.ink_pixels().is_empty(), "guide {guide}");
        }
    }

    #[test]
    fn unchanged_visibility_is_a_noop() {
        let mut s = surface(Recomposite::PixelMask);
        draw(&mut s, &[(20.0, 20.0), (80.0, 80.0)]);
        let before = s.raster().cloned();
        s.set_guide_visible(true);
        assert_eq!(s.raster().cloned(), before);
    }
}

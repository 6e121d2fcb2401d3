use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use hanzi_tracer::glyph::{JsonGlyphSource, Origin, decompose};
use hanzi_tracer::reward::{RewardState, Tier};
use hanzi_tracer::sampler::PointSampler;
use hanzi_tracer::session::PracticeSession;
use hanzi_tracer::{Point, Recomposite, Settings, StrokeDescriptor};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn names(strokes: &[StrokeDescriptor]) -> Vec<&str> {
    strokes.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn bundled_glyph_with_names_is_authoritative() {
    let source = JsonGlyphSource::new(data_dir());
    let (data, d) = decompose(&source, '十');
    assert_eq!(data.stroke_count(), 2);
    assert_eq!(d.origin, Origin::Authoritative);
    assert_eq!(names(&d.strokes), ["横", "竖"]);
}

#[test]
fn bundled_glyph_without_names_falls_back_to_geometry() {
    let source = JsonGlyphSource::new(data_dir());
    let (_, d) = decompose(&source, '口');
    assert_eq!(d.origin, Origin::Inferred);
    assert_eq!(names(&d.strokes), ["竖", "折", "横"]);
    assert_eq!(d.labels()[1], "第2画：折");
}

#[test]
fn unknown_glyph_degrades_quietly() {
    let source = JsonGlyphSource::new(data_dir());
    let (data, d) = decompose(&source, '龘');
    assert!(data.medians.is_empty());
    assert_eq!(d.origin, Origin::Unavailable);
}

#[test]
fn draw_toggle_and_complete_on_a_resized_window() {
    for mode in [Recomposite::Vector, Recomposite::PixelMask] {
        let settings = Settings { recomposite: mode, ..Settings::default() };
        let size = settings.surface_size;
        let source = JsonGlyphSource::new(data_dir());

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut session = PracticeSession::new(&settings, RewardState { stars: 9, moons: 9, suns: 0 });
        session.on_complete(move |_| counter.set(counter.get() + 1));
        session.load_character(&source, '十');

        // Window shown at half the raster resolution.
        let sampler = PointSampler::new((200, 200), (size, size));
        let pts: Vec<Point> = [(20.0, 100.0), (100.0, 102.0), (180.0, 100.0)]
            .iter()
            .filter_map(|&(x, y)| sampler.sample(x, y))
            .collect();
        assert_eq!(pts[2], Point::new(360.0, 200.0));

        let surface = session.surface_mut();
        surface.begin_stroke(pts[0]);
        for p in &pts[1..] {
            surface.continue_stroke(*p);
        }
        surface.end_stroke();
        let ink = surface.ink_pixels();
        assert!(!ink.is_empty());

        surface.set_guide_visible(false);
        assert_eq!(surface.ink_pixels(), ink, "{mode:?}");
        surface.set_guide_visible(true);
        assert_eq!(surface.ink_pixels(), ink, "{mode:?}");
        assert!(surface.has_ink());

        let done = session.complete().unwrap();
        assert_eq!(done.tier, Tier::Sun);
        assert_eq!(done.rewards, RewardState { stars: 0, moons: 0, suns: 1 });
        assert_eq!(calls.get(), 1);
        assert!(session.surface().ink_pixels().is_empty());
    }
}

#[test]
fn rewards_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rewards.json");

    let (next, _) = RewardState::load(&path).apply_completion();
    next.save(&path).unwrap();
    let (next, tier) = RewardState::load(&path).apply_completion();
    assert_eq!(tier, Tier::Star);
    assert_eq!(next.stars, 2);
}

//! Guess a stroke's type from the shape of its median.
//!
//! Only used when no authoritative stroke names exist for a glyph. The rules
//! are checked in order and the first match wins:
//!
//! | turn | displacement                | label |
//! |------|-----------------------------|-------|
//! | yes  | \|angle\| < 30°             | 横折  |
//! | yes  | 60° < angle < 120°          | 竖折  |
//! | yes  | anything else               | 折    |
//! | no   | length < 30                 | 点    |
//! | no   | -30° < angle < 30°          | 横    |
//! | no   | 60° < angle < 120°          | 竖    |
//! | no   | 120° < angle < 180°         | 撇    |
//! | no   | -60° < angle < 0°           | 捺    |
//! | no   | 30° < angle < 60°           | 提    |
//! | no   | anything else               | 其他  |
//!
//! Angles are `atan2(dy, dx)` in degrees with y growing downward.

use std::fmt;

use crate::types::Point;

/// Direction change at an interior point that counts as a turn.
const TURN_MIN_DEG: f32 = 30.0;
/// Differences this close to a full circle are wraparound noise, not turns.
const TURN_MAX_DEG: f32 = 330.0;
/// Strokes shorter than this (raster units) are dots whatever their direction.
const DOT_MAX_LEN: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeKind {
    HorizontalTurn,
    VerticalTurn,
    Turn,
    Dot,
    Horizontal,
    Vertical,
    FallingLeft,
    FallingRight,
    Rising,
    Other,
}

impl StrokeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HorizontalTurn => "横折",
            Self::VerticalTurn => "竖折",
            Self::Turn => "折",
            Self::Dot => "点",
            Self::Horizontal => "横",
            Self::Vertical => "竖",
            Self::FallingLeft => "撇",
            Self::FallingRight => "捺",
            Self::Rising => "提",
            Self::Other => "其他",
        }
    }
}

/// What the classifier says about one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLabel {
    Kind(StrokeKind),
    /// Too few points to have a direction; named by position instead.
    Positional(usize),
}

impl fmt::Display for StrokeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(k) => f.write_str(k.name()),
            Self::Positional(ordinal) => write!(f, "第{}笔", ordinal + 1),
        }
    }
}

#[inline]
fn heading_deg(a: Point, b: Point) -> f32 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// True if any interior point bends the path by more than the turn threshold.
pub fn has_turn(median: &[Point]) -> bool {
    median.windows(3).any(|w| {
        // Raw difference, no wrapping: a heading crossing ±180° shows up near 360.
        let diff = (heading_deg(w[0], w[1]) - heading_deg(w[1], w[2])).abs();
        diff > TURN_MIN_DEG && diff < TURN_MAX_DEG
    })
}

/// Classify the stroke at `ordinal` (0-based) from its median alone.
pub fn classify(median: &[Point], ordinal: usize) -> StrokeLabel {
    let (Some(&first), Some(&last)) = (median.first(), median.last()) else {
        return StrokeLabel::Positional(ordinal);
    };
    if median.len() < 2 {
        return StrokeLabel::Positional(ordinal);
    }

    // Only the overall displacement matters; wiggles in between are ignored.
    let angle = heading_deg(first, last);
    let length = first.distance(last);
    let in_range = |lo: f32, hi: f32| angle > lo && angle < hi;

    let kind = if has_turn(median) {
        if angle.abs() < 30.0 {
            StrokeKind::HorizontalTurn
        } else if in_range(60.0, 120.0) {
            StrokeKind::VerticalTurn
        } else {
            StrokeKind::Turn
        }
    } else if length < DOT_MAX_LEN {
        StrokeKind::Dot
    } else if in_range(-30.0, 30.0) {
        StrokeKind::Horizontal
    } else if in_range(60.0, 120.0) {
        StrokeKind::Vertical
    } else if in_range(120.0, 180.0) {
        StrokeKind::FallingLeft
    } else if in_range(-60.0, 0.0) {
        StrokeKind::FallingRight
    } else if in_range(30.0, 60.0) {
        StrokeKind::Rising
    } else {
        StrokeKind::Other
    };
    StrokeLabel::Kind(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(pts: &[(f32, f32)]) -> Vec<Point> {
        pts.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn kind(pts: &[(f32, f32)]) -> StrokeLabel {
        classify(&path(pts), 0)
    }

    #[test]
    fn straight_horizontal() {
        assert_eq!(kind(&[(0.0, 0.0), (100.0, 0.0)]), StrokeLabel::Kind(StrokeKind::Horizontal));
    }

    #[test]
    fn straight_vertical() {
        assert_eq!(kind(&[(0.0, 0.0), (0.0, 100.0)]), StrokeLabel::Kind(StrokeKind::Vertical));
    }

    #[test]
    fn short_stroke_is_a_dot_at_any_angle() {
        assert_eq!(kind(&[(0.0, 0.0), (5.0, 5.0)]), StrokeLabel::Kind(StrokeKind::Dot));
        assert_eq!(kind(&[(0.0, 0.0), (-20.0, 0.0)]), StrokeLabel::Kind(StrokeKind::Dot));
    }

    #[test]
    fn right_angle_with_diagonal_displacement_is_generic_turn() {
        assert_eq!(
            kind(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]),
            StrokeLabel::Kind(StrokeKind::Turn)
        );
    }

    #[test]
    fn turn_variants_follow_displacement() {
        // Long top edge, short drop: overall still mostly horizontal.
        assert_eq!(
            kind(&[(0.0, 0.0), (100.0, 0.0), (100.0, 20.0)]),
            StrokeLabel::Kind(StrokeKind::HorizontalTurn)
        );
        // Long drop, short foot.
        assert_eq!(
            kind(&[(0.0, 0.0), (0.0, 100.0), (20.0, 100.0)]),
            StrokeLabel::Kind(StrokeKind::VerticalTurn)
        );
    }

    #[test]
    fn remaining_directions() {
        assert_eq!(kind(&[(0.0, 0.0), (-60.0, 60.0)]), StrokeLabel::Kind(StrokeKind::FallingLeft));
        assert_eq!(kind(&[(0.0, 0.0), (40.0, -50.0)]), StrokeLabel::Kind(StrokeKind::FallingRight));
        assert_eq!(kind(&[(0.0, 0.0), (60.0, 60.0)]), StrokeLabel::Kind(StrokeKind::Rising));
        // Straight up-left: -135°, nothing matches.
        assert_eq!(kind(&[(0.0, 0.0), (-60.0, -60.0)]), StrokeLabel::Kind(StrokeKind::Other));
        // Exactly 180° is outside the open 120..180 range.
        assert_eq!(kind(&[(0.0, 0.0), (-100.0, 0.0)]), StrokeLabel::Kind(StrokeKind::Other));
    }

    #[test]
    fn wraparound_is_not_a_turn() {
        // Heading goes from just below +180° to just above -180°: a ~350° jump
        // in raw atan2 terms but almost no real bend.
        let pts = path(&[(0.0, 0.0), (-100.0, 3.0), (-200.0, 0.0)]);
        assert!(!has_turn(&pts));
    }

    #[test]
    fn gentle_curve_is_not_a_turn() {
        let pts = path(&[(0.0, 0.0), (50.0, 5.0), (100.0, 15.0), (150.0, 30.0)]);
        assert!(!has_turn(&pts));
        assert_eq!(classify(&pts, 0), StrokeLabel::Kind(StrokeKind::Horizontal));
    }

    #[test]
    fn degenerate_paths_get_positional_labels() {
        assert_eq!(classify(&[], 0).to_string(), "第1笔");
        assert_eq!(classify(&[Point::new(3.0, 4.0)], 4).to_string(), "第5笔");
    }

    #[test]
    fn labels_are_never_empty() {
        let samples = [
            path(&[]),
            path(&[(1.0, 1.0)]),
            path(&[(0.0, 0.0), (0.0, 0.0)]),
            path(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]),
            path(&[(0.0, 0.0), (-60.0, -60.0)]),
        ];
        for (i, s) in samples.iter().enumerate() {
            assert!(!classify(s, i).to_string().is_empty());
        }
    }

    #[test]
    fn same_input_same_label() {
        let pts = path(&[(10.0, 10.0), (80.0, 12.0), (75.0, 90.0)]);
        assert_eq!(classify(&pts, 2), classify(&pts, 2));
    }
}

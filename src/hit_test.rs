//! Pointer hit-testing against a clip's envelope
//!
//! Priority is fixed: grabbing an existing point beats creating a new one on
//! the curve, so a click next to a point never drops a duplicate beside it.

use crate::config::EditorConfig;
use crate::envelope::{evaluate_db_at_time, EnvelopePoint};
use crate::mapper::{CoordinateMapper, Point};

/// What a pointer-down on a clip lane should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// Grab the existing point at this index
    GrabPoint { index: usize },
    /// Create this point on the curve, then drag it
    CreatePoint { point: EnvelopePoint },
    /// Not an envelope interaction
    Miss,
}

impl HitResult {
    /// Whether a drag should start
    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Nearest point to `pos` and its pixel distance
///
/// Equal distances resolve to the lower index.
pub fn nearest_point(
    points: &[EnvelopePoint],
    mapper: &CoordinateMapper,
    pos: Point,
) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, point) in points.iter().enumerate() {
        let dist = mapper.point_to_pixel(point).distance(pos);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// Classify a pointer position on one clip's lane
pub fn hit_test(
    points: &[EnvelopePoint],
    mapper: &CoordinateMapper,
    pos: Point,
    config: &EditorConfig,
) -> HitResult {
    let time = mapper.pixel_x_to_relative_time(pos.x);
    if !mapper.contains_time(time) {
        return HitResult::Miss;
    }

    if let Some((index, dist)) = nearest_point(points, mapper, pos) {
        if dist <= config.grab_radius_px {
            return HitResult::GrabPoint { index };
        }
    }

    let curve_y = mapper.db_to_pixel_y(evaluate_db_at_time(points, time));
    if (pos.y - curve_y).abs() <= config.curve_tolerance_px {
        return HitResult::CreatePoint {
            point: mapper.pixel_to_point(pos),
        };
    }

    HitResult::Miss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Region;

    // 400x72 lane, 4 s clip: 100 px per second, 1 px per dB, 0 dB at y = 12
    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(Region::new(0.0, 0.0, 400.0, 72.0).unwrap(), 4.0)
    }

    fn pts(raw: &[(f64, f32)]) -> Vec<EnvelopePoint> {
        raw.iter().map(|&(t, db)| EnvelopePoint::new(t, db)).collect()
    }

    #[test]
    fn test_grab_existing_point() {
        let points = pts(&[(0.0, 0.0), (2.0, -6.0), (4.0, 0.0)]);
        // Point 1 sits at (200, 18)
        let hit = hit_test(&points, &mapper(), Point::new(205.0, 20.0), &EditorConfig::default());
        assert_eq!(hit, HitResult::GrabPoint { index: 1 });
    }

    #[test]
    fn test_grab_radius_edge() {
        let points = pts(&[(2.0, 0.0)]);
        let m = mapper();
        let config = EditorConfig::default();
        assert_eq!(
            hit_test(&points, &m, Point::new(214.5, 12.0), &config),
            HitResult::GrabPoint { index: 0 }
        );
        // Past the radius but still on the flat curve
        assert!(matches!(
            hit_test(&points, &m, Point::new(216.0, 12.0), &config),
            HitResult::CreatePoint { .. }
        ));
    }

    #[test]
    fn test_nearest_wins_and_ties_go_left() {
        let points = pts(&[(1.0, 0.0), (1.5, 0.0)]);
        let m = mapper();
        // Points at x=100 and x=150
        assert_eq!(nearest_point(&points, &m, Point::new(110.0, 12.0)).unwrap().0, 0);
        assert_eq!(nearest_point(&points, &m, Point::new(140.0, 12.0)).unwrap().0, 1);
        // Equidistant
        assert_eq!(nearest_point(&points, &m, Point::new(125.0, 12.0)).unwrap().0, 0);
        assert!(nearest_point(&[], &m, Point::new(125.0, 12.0)).is_none());
    }

    #[test]
    fn test_create_on_curve() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0)]);
        let hit = hit_test(&points, &mapper(), Point::new(100.0, 22.0), &EditorConfig::default());
        match hit {
            HitResult::CreatePoint { point } => {
                assert!((point.time - 1.0).abs() < 1e-9);
                assert!((point.db + 10.0).abs() < 1e-4);
            }
            other => panic!("expected creation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_envelope_targets_zero_db_line() {
        let m = mapper();
        let config = EditorConfig::default();
        assert!(matches!(
            hit_test(&[], &m, Point::new(100.0, 12.0 - 15.5), &config),
            HitResult::CreatePoint { .. }
        ));
        assert_eq!(
            hit_test(&[], &m, Point::new(100.0, 12.0 + 17.0), &config),
            HitResult::Miss
        );
    }

    #[test]
    fn test_point_grab_beats_curve_creation() {
        // Pointer is both on the curve and within grab range of a point
        let points = pts(&[(1.0, 0.0), (3.0, 0.0)]);
        let hit = hit_test(&points, &mapper(), Point::new(110.0, 12.0), &EditorConfig::default());
        assert_eq!(hit, HitResult::GrabPoint { index: 0 });
    }

    #[test]
    fn test_miss_far_from_curve() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0)]);
        let hit = hit_test(&points, &mapper(), Point::new(200.0, 60.0), &EditorConfig::default());
        assert_eq!(hit, HitResult::Miss);
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_miss_outside_clip() {
        let hit = hit_test(&[], &mapper(), Point::new(-5.0, 12.0), &EditorConfig::default());
        assert_eq!(hit, HitResult::Miss);
        let hit = hit_test(&[], &mapper(), Point::new(401.0, 12.0), &EditorConfig::default());
        assert_eq!(hit, HitResult::Miss);
    }
}

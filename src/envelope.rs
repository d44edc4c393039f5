//! Clip gain envelope
//!
//! A clip's envelope is a list of `(time, dB)` control points sorted by time,
//! with no two points sharing a time. Between points the curve is linear in
//! dB; before the first and after the last point it stays flat. An empty list
//! is a flat 0 dB line.

use crate::config::{MAX_DB, MIN_DB};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Single gain control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    /// Seconds from clip start
    pub time: f64,
    /// Gain in decibels
    pub db: f32,
}

impl EnvelopePoint {
    /// Point at `time` seconds with `db` gain
    pub const fn new(time: f64, db: f32) -> Self {
        Self { time, db }
    }

    /// Create a point clamped into `[0, duration]` and the editable dB range
    pub fn clamped(time: f64, db: f32, duration: f64) -> Self {
        Self {
            time: time.clamp(0.0, duration.max(0.0)),
            db: db.clamp(MIN_DB, MAX_DB),
        }
    }

    /// Linear gain multiplier for this point
    #[inline]
    pub fn gain(&self) -> f32 {
        db_to_gain(self.db)
    }
}

#[inline]
fn cmp_time(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ==================== Evaluation ====================

/// Interpolated dB at `time` (relative to clip start)
///
/// Interpolation happens in dB space. Convert to a linear multiplier with
/// [`db_to_gain`] after evaluating, never before.
#[inline]
#[must_use]
pub fn evaluate_db_at_time(points: &[EnvelopePoint], time: f64) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };

    if time <= first.time {
        return first.db;
    }
    if time >= last.time {
        return last.db;
    }

    match points.binary_search_by(|p| cmp_time(p.time, time)) {
        Ok(exact) => points[exact].db,
        Err(next_idx) => {
            // Bounds checks above guarantee 0 < next_idx < len
            let prev = &points[next_idx - 1];
            let next = &points[next_idx];
            let span = next.time - prev.time;
            if span <= 0.0 {
                return next.db;
            }
            let t = ((time - prev.time) / span) as f32;
            prev.db + t * (next.db - prev.db)
        }
    }
}

/// Linear gain multiplier at `time`
#[inline]
#[must_use]
pub fn evaluate_gain_at_time(points: &[EnvelopePoint], time: f64) -> f32 {
    db_to_gain(evaluate_db_at_time(points, time))
}

/// `10^(db/20)`
#[inline]
#[must_use]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Inverse of [`db_to_gain`]. Silence maps to the bottom of the display range.
#[inline]
#[must_use]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain <= 0.0 {
        return MIN_DB;
    }
    (20.0 * gain.log10()).max(MIN_DB)
}

// ==================== Editing ====================

/// Return a new list with `point` added, sorted by time
///
/// Time is a point's identity within a clip: a point already at exactly
/// `point.time` is replaced.
#[must_use]
pub fn insert_point(points: &[EnvelopePoint], point: EnvelopePoint) -> Vec<EnvelopePoint> {
    let mut result = points.to_vec();
    match result.binary_search_by(|p| cmp_time(p.time, point.time)) {
        Ok(idx) => result[idx] = point,
        Err(idx) => result.insert(idx, point),
    }
    result
}

/// Return a new list without the point at `index`. Out of range leaves the list unchanged.
#[must_use]
pub fn remove_point(points: &[EnvelopePoint], index: usize) -> Vec<EnvelopePoint> {
    let mut result = points.to_vec();
    if index < result.len() {
        result.remove(index);
    }
    result
}

/// Index of the point at exactly `time`, if any
pub fn find_point_at(points: &[EnvelopePoint], time: f64) -> Option<usize> {
    points
        .binary_search_by(|p| cmp_time(p.time, time))
        .ok()
}

/// Strictly ascending by time with no duplicates
pub fn is_sorted_unique(points: &[EnvelopePoint]) -> bool {
    points.windows(2).all(|w| w[0].time < w[1].time)
}

/// Bring an externally supplied list into shape for a clip of `duration`
///
/// Clamps every point into the clip and the dB range, sorts, and collapses
/// equal times keeping the later entry.
#[must_use]
pub fn normalize_points(points: &[EnvelopePoint], duration: f64) -> Vec<EnvelopePoint> {
    points
        .iter()
        .filter(|p| p.time.is_finite() && p.db.is_finite())
        .fold(Vec::with_capacity(points.len()), |acc, p| {
            insert_point(&acc, EnvelopePoint::clamped(p.time, p.db, duration))
        })
}

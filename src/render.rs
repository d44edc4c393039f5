//! Geometry for drawing an envelope over a clip
//!
//! These produce plain point lists and sample buffers; the host's canvas does
//! the actual drawing. All of them expect points sorted by time.

use crate::envelope::{db_to_gain, evaluate_db_at_time, EnvelopePoint};
use crate::mapper::{CoordinateMapper, Point};

/// Envelope line with one vertex per pixel column of the clip lane
pub fn curve_polyline(points: &[EnvelopePoint], mapper: &CoordinateMapper) -> Vec<Point> {
    let columns = mapper.region.width.max(0.0).ceil() as usize;
    (0..=columns)
        .map(|col| {
            let x = (mapper.region.x + col as f32).min(mapper.region.right());
            let time = mapper.pixel_x_to_clamped_time(x);
            Point::new(x, mapper.db_to_pixel_y(evaluate_db_at_time(points, time)))
        })
        .collect()
}

/// Pixel centres of the control point handles
pub fn point_markers(points: &[EnvelopePoint], mapper: &CoordinateMapper) -> Vec<Point> {
    points.iter().map(|p| mapper.point_to_pixel(p)).collect()
}

/// Waveform with the envelope's gain applied, for shading
///
/// Samples are spread evenly over `duration`; results are clipped to `[-1, 1]`.
pub fn shaded_waveform(waveform: &[f32], points: &[EnvelopePoint], duration: f64) -> Vec<f32> {
    if waveform.is_empty() {
        return Vec::new();
    }
    if points.is_empty() {
        return waveform.to_vec();
    }

    let step = duration / waveform.len() as f64;
    waveform
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let gain = db_to_gain(evaluate_db_at_time(points, i as f64 * step));
            (sample * gain).clamp(-1.0, 1.0)
        })
        .collect()
}

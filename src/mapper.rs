//! Coordinate mapping between envelope space and pixel space
//!
//! A clip's envelope lane is a pixel rectangle. Horizontally it spans the
//! clip's duration (relative to clip start), vertically it spans the dB
//! display range with `max_db` at the top edge and `min_db` at the bottom.

use crate::config::{MAX_DB, MIN_DB};
use crate::envelope::EnvelopePoint;
use crate::error::{EnvelopeError, Result};
use serde::{Deserialize, Serialize};

/// Position in surface-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Point at `(x, y)`
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels
    #[inline]
    #[must_use]
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// Build a region, rejecting zero or negative extents
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(EnvelopeError::EmptyRegion { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment test
    pub fn contains(&self, pos: Point) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }
}

/// Maps `(time, dB)` to pixels and back for one clip's envelope lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub region: Region,
    /// Clip duration in seconds
    pub duration: f64,
    pub min_db: f32,
    pub max_db: f32,
}

impl CoordinateMapper {
    /// Mapper using the default `[-60, 12]` dB display range
    pub fn new(region: Region, duration: f64) -> Self {
        Self {
            region,
            duration,
            min_db: MIN_DB,
            max_db: MAX_DB,
        }
    }

    /// Override the displayed dB range
    pub fn with_db_range(mut self, min_db: f32, max_db: f32) -> Self {
        self.min_db = min_db;
        self.max_db = max_db;
        self
    }

    /// dB to pixel Y. Not clamped: values outside the range land outside the region.
    #[inline]
    #[must_use]
    pub fn db_to_pixel_y(&self, db: f32) -> f32 {
        let range = self.max_db - self.min_db;
        if range <= 0.0 {
            return self.region.bottom();
        }
        self.region.bottom() - (db - self.min_db) * self.region.height / range
    }

    /// Pixel Y to dB, clamped to the display range
    #[inline]
    #[must_use]
    pub fn pixel_y_to_db(&self, y: f32) -> f32 {
        if self.region.height <= 0.0 {
            return self.min_db;
        }
        let db = self.min_db
            + (self.region.bottom() - y) * (self.max_db - self.min_db) / self.region.height;
        db.clamp(self.min_db, self.max_db)
    }

    /// Pixel X to time relative to clip start. Not clamped, so callers can
    /// tell when the pointer is outside the clip.
    #[inline]
    #[must_use]
    pub fn pixel_x_to_relative_time(&self, x: f32) -> f64 {
        if self.region.width <= 0.0 {
            return 0.0;
        }
        f64::from(x - self.region.x) * self.duration / f64::from(self.region.width)
    }

    /// Pixel X to relative time, clamped to `[0, duration]` for placement
    #[inline]
    #[must_use]
    pub fn pixel_x_to_clamped_time(&self, x: f32) -> f64 {
        self.pixel_x_to_relative_time(x)
            .clamp(0.0, self.duration.max(0.0))
    }

    /// Relative time to pixel X. Not clamped.
    #[inline]
    #[must_use]
    pub fn relative_time_to_pixel_x(&self, time: f64) -> f32 {
        if self.duration <= 0.0 {
            return self.region.x;
        }
        self.region.x + (time * f64::from(self.region.width) / self.duration) as f32
    }

    /// Whether a relative time falls inside the clip
    #[inline]
    pub fn contains_time(&self, time: f64) -> bool {
        time >= 0.0 && time <= self.duration
    }

    /// Pixel position of an envelope point
    pub fn point_to_pixel(&self, point: &EnvelopePoint) -> Point {
        Point::new(
            self.relative_time_to_pixel_x(point.time),
            self.db_to_pixel_y(point.db),
        )
    }

    /// Envelope point under a pixel position, clamped into the clip and dB range
    pub fn pixel_to_point(&self, pos: Point) -> EnvelopePoint {
        EnvelopePoint::new(self.pixel_x_to_clamped_time(pos.x), self.pixel_y_to_db(pos.y))
    }
}

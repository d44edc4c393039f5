//! Editor tuning
//!
//! Pixel radii and the dB display range used by hit-testing and dragging.
//! Stored as YAML alongside the rest of a host's UI settings.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Lowest editable gain in dB
pub const MIN_DB: f32 = -60.0;
/// Highest editable gain in dB
pub const MAX_DB: f32 = 12.0;

/// Interaction constants for the envelope editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Max pointer distance (px) for grabbing an existing point
    pub grab_radius_px: f32,
    /// Max vertical distance (px) from the curve for creating a point
    pub curve_tolerance_px: f32,
    /// Pointer travel (px) below which a release counts as a click
    pub click_threshold_px: f32,
    /// Bottom of the dB display range
    pub min_db: f32,
    /// Top of the dB display range
    pub max_db: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grab_radius_px: 15.0,
            curve_tolerance_px: 16.0,
            click_threshold_px: 3.0,
            min_db: MIN_DB,
            max_db: MAX_DB,
        }
    }
}

impl EditorConfig {
    /// Parse from YAML. Missing keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config.validated())
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Replace nonsensical values with defaults
    ///
    /// Negative radii become the default, and an inverted or empty dB range
    /// falls back to `[MIN_DB, MAX_DB]`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !is_valid_radius(self.grab_radius_px) {
            log::warn!("grab_radius_px {} invalid, using default", self.grab_radius_px);
            self.grab_radius_px = defaults.grab_radius_px;
        }
        if !is_valid_radius(self.curve_tolerance_px) {
            log::warn!(
                "curve_tolerance_px {} invalid, using default",
                self.curve_tolerance_px
            );
            self.curve_tolerance_px = defaults.curve_tolerance_px;
        }
        if !is_valid_radius(self.click_threshold_px) {
            log::warn!(
                "click_threshold_px {} invalid, using default",
                self.click_threshold_px
            );
            self.click_threshold_px = defaults.click_threshold_px;
        }
        if !(self.min_db.is_finite() && self.max_db.is_finite() && self.min_db < self.max_db) {
            log::warn!(
                "dB range [{}, {}] invalid, using default",
                self.min_db,
                self.max_db
            );
            self.min_db = defaults.min_db;
            self.max_db = defaults.max_db;
        }
        self
    }

    /// Clamp a dB value into the editable range
    #[inline]
    #[must_use]
    pub fn clamp_db(&self, db: f32) -> f32 {
        db.clamp(self.min_db, self.max_db)
    }
}

fn is_valid_radius(px: f32) -> bool {
    px.is_finite() && px >= 0.0
}

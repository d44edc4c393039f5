//! Clips, tracks and time selections
//!
//! A clip is an audio region placed on a track. It owns its waveform (read
//! only while editing) and its gain envelope. Envelope points are written
//! back only when a drag finishes, see [`crate::editor::EnvelopeEditor`].

use crate::envelope::{self, EnvelopePoint};
use crate::error::{EnvelopeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable clip identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip#{}", self.0)
    }
}

/// Audio region with a gain envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    /// Timeline position in seconds
    pub start_time: f64,
    /// Length in seconds
    pub duration: f64,
    /// Sample amplitudes in `[-1, 1]`
    pub waveform: Vec<f32>,
    /// Sorted, unique by time. Empty means flat 0 dB.
    pub envelope_points: Vec<EnvelopePoint>,
}

impl Clip {
    /// Create a clip with no waveform and a flat envelope
    pub fn new(id: ClipId, start_time: f64, duration: f64) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(EnvelopeError::InvalidDuration(duration));
        }
        Ok(Self {
            id,
            start_time,
            duration,
            waveform: Vec::new(),
            envelope_points: Vec::new(),
        })
    }

    /// Attach peak amplitudes for drawing
    pub fn with_waveform(mut self, waveform: Vec<f32>) -> Self {
        self.waveform = waveform;
        self
    }

    /// Replace the envelope, clamping and sorting the given points
    pub fn with_envelope(mut self, points: &[EnvelopePoint]) -> Self {
        self.envelope_points = envelope::normalize_points(points, self.duration);
        self
    }

    /// Timeline time where the clip ends
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether an absolute timeline time falls inside the clip
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time()
    }

    /// Envelope dB at a time relative to clip start
    #[inline]
    pub fn db_at(&self, time: f64) -> f32 {
        envelope::evaluate_db_at_time(&self.envelope_points, time)
    }
}

/// Ordered list of clips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub clips: Vec<Clip>,
}

impl Track {
    /// Empty track
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clips: Vec::new(),
        }
    }

    /// Builder form of [`Self::add_clip`]
    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Append a clip
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Remove a clip by id
    pub fn remove_clip(&mut self, id: ClipId) -> Option<Clip> {
        let pos = self.clips.iter().position(|c| c.id == id)?;
        Some(self.clips.remove(pos))
    }

    /// Clip by id
    #[must_use]
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Mutable clip by id
    pub fn clip_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// First clip covering an absolute timeline time
    #[must_use]
    pub fn clip_at_time(&self, time: f64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(time))
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the track has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Selected range on the timeline, in absolute seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSelection {
    pub start: f64,
    pub end: f64,
}

impl TimeSelection {
    /// Selection ordered so that `start <= end`
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Selection covering exactly the clip's bounds
    pub fn for_clip(clip: &Clip) -> Self {
        Self {
            start: clip.start_time,
            end: clip.end_time(),
        }
    }

    /// Length of the selection in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_creation() {
        let clip = Clip::new(ClipId(1), 2.0, 4.0).unwrap();
        assert_eq!(clip.end_time(), 6.0);
        assert!(clip.envelope_points.is_empty());
        assert_eq!(clip.db_at(1.0), 0.0);
    }

    #[test]
    fn test_invalid_duration() {
        assert!(matches!(
            Clip::new(ClipId(1), 0.0, 0.0),
            Err(EnvelopeError::InvalidDuration(_))
        ));
        assert!(Clip::new(ClipId(1), 0.0, f64::NAN).is_err());
        assert!(Clip::new(ClipId(1), 0.0, -2.0).is_err());
    }

    #[test]
    fn test_with_envelope_normalizes() {
        let clip = Clip::new(ClipId(1), 0.0, 4.0).unwrap().with_envelope(&[
            EnvelopePoint::new(3.0, 0.0),
            EnvelopePoint::new(1.0, 30.0),
        ]);
        assert_eq!(clip.envelope_points[0], EnvelopePoint::new(1.0, 12.0));
        assert_eq!(clip.envelope_points[1].time, 3.0);
    }

    #[test]
    fn test_track_lookup() {
        let mut track = Track::new("Drums")
            .with_clip(Clip::new(ClipId(1), 0.0, 4.0).unwrap())
            .with_clip(Clip::new(ClipId(2), 6.0, 2.0).unwrap());

        assert_eq!(track.clip_at_time(7.0).map(|c| c.id), Some(ClipId(2)));
        assert!(track.clip_at_time(5.0).is_none());
        assert!(track.clip_mut(ClipId(1)).is_some());

        let removed = track.remove_clip(ClipId(1)).unwrap();
        assert_eq!(removed.id, ClipId(1));
        assert!(track.clip(ClipId(1)).is_none());
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_selection_for_clip() {
        let clip = Clip::new(ClipId(3), 1.5, 2.0).unwrap();
        let sel = TimeSelection::for_clip(&clip);
        assert_eq!(sel.start, 1.5);
        assert_eq!(sel.end, 3.5);
        assert_eq!(sel.duration(), 2.0);
        assert_eq!(TimeSelection::new(3.0, 1.0).start, 1.0);
    }

    #[test]
    fn test_clip_id_display() {
        assert_eq!(ClipId(7).to_string(), "clip#7");
    }
}

//! Pointer-driven envelope editing for one track
//!
//! [`EnvelopeEditor`] turns pointer events (already in track-local pixels)
//! into hit-tests and drag sessions, and writes finished drags back to the
//! clip. Only one drag can be active at a time.
//!
//! Grabbing or creating a point selects the enclosing clip's time range. The
//! editor reports that as [`PointerDown::Envelope::selection`]; applying it is
//! up to the caller. A [`PointerDown::Miss`] means the click belongs to
//! someone else, typically time-range selection.

use crate::clip::{Clip, ClipId, TimeSelection, Track};
use crate::config::EditorConfig;
use crate::envelope::{is_sorted_unique, EnvelopePoint};
use crate::error::{EnvelopeError, Result};
use crate::hit_test::{hit_test, nearest_point};
use crate::mapper::{CoordinateMapper, Point, Region};
use crate::session::{DragOutcome, DragSession};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Where a track's clips sit on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    /// Pixel X of timeline time `scroll_time`
    pub origin_x: f32,
    /// Top of the clip lane
    pub top: f32,
    /// Height of the clip lane
    pub height: f32,
    /// Horizontal zoom
    pub pixels_per_second: f64,
    /// Timeline time at the left edge
    pub scroll_time: f64,
}

impl TrackLayout {
    /// Layout with no scroll, rejecting a flat lane or a non-positive zoom
    pub fn new(origin_x: f32, top: f32, height: f32, pixels_per_second: f64) -> Result<Self> {
        if !(height > 0.0) {
            return Err(EnvelopeError::InvalidLaneHeight(height));
        }
        if !(pixels_per_second.is_finite() && pixels_per_second > 0.0) {
            return Err(EnvelopeError::InvalidZoom(pixels_per_second));
        }
        Ok(Self {
            origin_x,
            top,
            height,
            pixels_per_second,
            scroll_time: 0.0,
        })
    }

    /// Same layout scrolled so `scroll_time` sits at `origin_x`
    pub fn with_scroll(mut self, scroll_time: f64) -> Self {
        self.scroll_time = scroll_time;
        self
    }

    /// Pixel rectangle occupied by a clip
    pub fn clip_region(&self, clip: &Clip) -> Region {
        Region {
            x: self.origin_x + ((clip.start_time - self.scroll_time) * self.pixels_per_second) as f32,
            y: self.top,
            width: (clip.duration * self.pixels_per_second) as f32,
            height: self.height,
        }
    }
}

/// Response to a pointer-down
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// A point was grabbed or created; the caller should select `selection`
    Envelope {
        clip_id: ClipId,
        selection: TimeSelection,
    },
    /// Not an envelope interaction
    Miss,
    /// A drag is already in progress
    Busy,
}

/// Pointer-to-envelope controller for one track, holding at most one drag
#[derive(Debug, Clone)]
pub struct EnvelopeEditor {
    config: EditorConfig,
    layout: TrackLayout,
    session: Option<DragSession>,
}

impl EnvelopeEditor {
    /// Editor with default thresholds
    pub fn new(layout: TrackLayout) -> Self {
        Self::with_config(layout, EditorConfig::default())
    }

    /// Editor with custom thresholds, validated on the way in
    pub fn with_config(layout: TrackLayout, config: EditorConfig) -> Self {
        Self {
            config: config.validated(),
            layout,
            session: None,
        }
    }

    /// Active thresholds and dB range
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Geometry used for the next pointer-down
    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    /// Update scroll/zoom. An active drag keeps the geometry it started with.
    pub fn set_layout(&mut self, layout: TrackLayout) {
        self.layout = layout;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The in-progress drag, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Coordinate mapper for a clip under the current layout
    pub fn mapper_for(&self, clip: &Clip) -> CoordinateMapper {
        CoordinateMapper::new(self.layout.clip_region(clip), clip.duration)
            .with_db_range(self.config.min_db, self.config.max_db)
    }

    /// First clip whose lane contains `pos`
    fn clip_under<'a>(&self, track: &'a Track, pos: Point) -> Option<&'a Clip> {
        track
            .clips
            .iter()
            .find(|clip| self.layout.clip_region(clip).contains(pos))
    }

    /// Hit-test and, on a hit, start a drag
    pub fn pointer_down(&mut self, track: &Track, pos: Point) -> PointerDown {
        if self.session.is_some() {
            return PointerDown::Busy;
        }
        let Some(clip) = self.clip_under(track, pos) else {
            return PointerDown::Miss;
        };

        let mapper = self.mapper_for(clip);
        let hit = hit_test(&clip.envelope_points, &mapper, pos, &self.config);
        let Some(session) =
            DragSession::begin(clip.id, &clip.envelope_points, mapper, pos, hit, self.config)
        else {
            return PointerDown::Miss;
        };

        self.session = Some(session);
        PointerDown::Envelope {
            clip_id: clip.id,
            selection: TimeSelection::for_clip(clip),
        }
    }

    /// Follow the pointer. Returns the working envelope to draw, if dragging.
    pub fn pointer_move(&mut self, pos: Point) -> Option<Vec<EnvelopePoint>> {
        let session = self.session.as_mut()?;
        session.update(pos);
        Some(session.working_points())
    }

    /// Release the pointer and write the outcome into the clip
    ///
    /// Returns `Ok(None)` when no drag was active. If the clip was removed
    /// while dragging, the drag is dropped and `ClipNotFound` returned.
    pub fn pointer_up(&mut self, track: &mut Track, pos: Point) -> Result<Option<DragOutcome>> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        let clip_id = session.clip_id();
        let outcome = session.finish(pos);

        let Some(clip) = track.clip_mut(clip_id) else {
            log::warn!("envelope edit dropped: {} was removed during the drag", clip_id);
            return Err(EnvelopeError::ClipNotFound(clip_id));
        };
        debug_assert!(is_sorted_unique(outcome.points()));
        clip.envelope_points = outcome.points().to_vec();
        Ok(Some(outcome))
    }

    /// Pointer left the surface. Treated as a release.
    pub fn pointer_leave(&mut self, track: &mut Track, pos: Point) -> Result<Option<DragOutcome>> {
        self.pointer_up(track, pos)
    }

    /// Drop the active drag without touching the clip. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                session.cancel();
                true
            }
            None => false,
        }
    }

    /// Point under the pointer within grab range, for hover highlighting
    pub fn hover(&self, track: &Track, pos: Point) -> Option<(ClipId, usize)> {
        let clip = self.clip_under(track, pos)?;
        let mapper = self.mapper_for(clip);
        let (index, dist) = nearest_point(&clip.envelope_points, &mapper, pos)?;
        (dist <= self.config.grab_radius_px).then_some((clip.id, index))
    }

    /// Envelope a renderer should draw for `clip`
    ///
    /// The working list while that clip is being dragged, the clip's own
    /// points otherwise.
    pub fn points_for<'a>(&self, clip: &'a Clip) -> Cow<'a, [EnvelopePoint]> {
        match &self.session {
            Some(session) if session.clip_id() == clip.id => {
                Cow::Owned(session.working_points())
            }
            _ => Cow::Borrowed(&clip.envelope_points),
        }
    }
}

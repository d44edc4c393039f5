//! Envelope point drag sessions
//!
//! A [`DragSession`] lives from pointer-down to pointer-up on one clip. It
//! edits a private working copy of the clip's points; the clip itself is
//! untouched until the session finishes and the caller writes the outcome
//! back.
//!
//! While dragging, any point the dragged point passes over (measured from
//! where the drag started) is hidden. Backtracking past a hidden point brings
//! it back with its exact original time and gain. Points still hidden on
//! release are gone for good.
//!
//! Every point gets a [`PointId`] for the duration of the session, so the
//! dragged point is found by identity no matter how the working list is
//! reshuffled.

use crate::clip::ClipId;
use crate::config::EditorConfig;
use crate::envelope::{find_point_at, EnvelopePoint};
use crate::hit_test::HitResult;
use crate::mapper::{CoordinateMapper, Point};
use std::cmp::Ordering;

/// Session-local point identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u32);

#[derive(Debug, Clone, Copy, PartialEq)]
struct WorkingPoint {
    id: PointId,
    point: EnvelopePoint,
}

/// Result of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Pointer moved: the new envelope for the clip
    Committed(Vec<EnvelopePoint>),
    /// Pointer barely moved: the clip's envelope with the grabbed point removed
    Deleted(Vec<EnvelopePoint>),
}

impl DragOutcome {
    /// Points to write back, borrowed
    pub fn points(&self) -> &[EnvelopePoint] {
        match self {
            Self::Committed(points) | Self::Deleted(points) => points,
        }
    }

    /// Points to write back, owned
    pub fn into_points(self) -> Vec<EnvelopePoint> {
        match self {
            Self::Committed(points) | Self::Deleted(points) => points,
        }
    }

    /// Whether the gesture was a click that removed the point
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// An in-progress point drag on one clip
#[derive(Debug, Clone)]
pub struct DragSession {
    clip_id: ClipId,
    mapper: CoordinateMapper,
    config: EditorConfig,
    /// Clip's persisted points at pointer-down
    baseline: Vec<WorkingPoint>,
    working: Vec<WorkingPoint>,
    /// Points hidden by crossing, with their original values
    hidden: Vec<WorkingPoint>,
    dragged: PointId,
    anchor_time: f64,
    start_pos: Point,
    created: bool,
}

impl DragSession {
    /// Start dragging from a hit-test result
    ///
    /// Returns `None` for a miss or a grab index that doesn't exist.
    pub fn begin(
        clip_id: ClipId,
        points: &[EnvelopePoint],
        mapper: CoordinateMapper,
        start_pos: Point,
        hit: HitResult,
        config: EditorConfig,
    ) -> Option<Self> {
        let baseline: Vec<WorkingPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &point)| WorkingPoint {
                id: PointId(i as u32),
                point,
            })
            .collect();
        let mut working = baseline.clone();
        let mut hidden = Vec::new();

        let (anchor, created) = match hit {
            HitResult::GrabPoint { index } if index < baseline.len() => (baseline[index], false),
            HitResult::CreatePoint { point } => {
                let new_point = WorkingPoint {
                    id: PointId(baseline.len() as u32),
                    point: EnvelopePoint::new(
                        point.time.clamp(0.0, mapper.duration.max(0.0)),
                        config.clamp_db(point.db),
                    ),
                };
                // A point already at this time is hidden, not overwritten, so
                // moving off it brings it back and a click leaves it alone
                if let Some(existing) = find_point_at(points, new_point.point.time) {
                    hidden.push(working.remove(existing));
                }
                let index = working.partition_point(|w| w.point.time < new_point.point.time);
                working.insert(index, new_point);
                (new_point, true)
            }
            _ => return None,
        };

        log::debug!(
            "envelope drag start on {}: point at {:.3}s {:.2}dB{}",
            clip_id,
            anchor.point.time,
            anchor.point.db,
            if created { " (new)" } else { "" }
        );

        Some(Self {
            clip_id,
            mapper,
            config,
            baseline,
            working,
            hidden,
            dragged: anchor.id,
            anchor_time: anchor.point.time,
            start_pos,
            created,
        })
    }

    /// Clip this session edits
    pub fn clip_id(&self) -> ClipId {
        self.clip_id
    }

    /// Geometry captured at pointer-down
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Time the dragged point had when the drag started
    pub fn anchor_time(&self) -> f64 {
        self.anchor_time
    }

    /// Pointer-down position, used for click detection
    pub fn start_pos(&self) -> Point {
        self.start_pos
    }

    /// Whether the dragged point was created by this gesture
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Current envelope as the renderer should draw it
    pub fn working_points(&self) -> Vec<EnvelopePoint> {
        self.working.iter().map(|w| w.point).collect()
    }

    /// Index of the dragged point within [`Self::working_points`]
    pub fn dragged_index(&self) -> usize {
        self.working
            .iter()
            .position(|w| w.id == self.dragged)
            .unwrap_or(0)
    }

    /// Dragged point's current position
    pub fn dragged_point(&self) -> Option<EnvelopePoint> {
        self.working
            .iter()
            .find(|w| w.id == self.dragged)
            .map(|w| w.point)
    }

    /// Points currently hidden by crossing, in their original form
    pub fn hidden_points(&self) -> Vec<EnvelopePoint> {
        self.hidden.iter().map(|w| w.point).collect()
    }

    /// Move the dragged point to follow the pointer
    pub fn update(&mut self, pos: Point) {
        let target = self.mapper.pixel_to_point(pos);
        let time = target.time;
        let db = self.config.clamp_db(target.db);
        let anchor = self.anchor_time;
        let dragged = self.dragged;

        let mut i = 0;
        while i < self.working.len() {
            let w = self.working[i];
            if w.id != dragged && is_crossed(w.point.time, anchor, time) {
                log::trace!("crossed point at {:.3}s", w.point.time);
                self.hidden.push(self.working.remove(i));
            } else {
                i += 1;
            }
        }

        let mut i = 0;
        while i < self.hidden.len() {
            if is_crossed(self.hidden[i].point.time, anchor, time) {
                i += 1;
            } else {
                let restored = self.hidden.remove(i);
                log::trace!("restored point at {:.3}s", restored.point.time);
                self.working.push(restored);
            }
        }

        if let Some(w) = self.working.iter_mut().find(|w| w.id == dragged) {
            w.point = EnvelopePoint::new(time, db);
        }
        self.working.sort_by(|a, b| {
            a.point
                .time
                .partial_cmp(&b.point.time)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Release the pointer
    ///
    /// Less than `click_threshold_px` of travel from the pointer-down position
    /// is a click, which deletes the grabbed (or just created) point.
    /// Anything else commits the working list.
    pub fn finish(mut self, pos: Point) -> DragOutcome {
        let travel = self.start_pos.distance(pos);
        if travel < self.config.click_threshold_px {
            let remaining: Vec<EnvelopePoint> = self
                .baseline
                .iter()
                .filter(|w| w.id != self.dragged)
                .map(|w| w.point)
                .collect();
            log::debug!(
                "envelope click on {}: deleted point at {:.3}s",
                self.clip_id,
                self.anchor_time
            );
            return DragOutcome::Deleted(remaining);
        }

        self.update(pos);
        log::debug!(
            "envelope drag commit on {}: {} points, {} crossed",
            self.clip_id,
            self.working.len(),
            self.hidden.len()
        );
        DragOutcome::Committed(self.working_points())
    }

    /// Abandon the drag, returning the clip's points as they were at pointer-down
    pub fn cancel(self) -> Vec<EnvelopePoint> {
        log::debug!("envelope drag cancelled on {}", self.clip_id);
        self.baseline.into_iter().map(|w| w.point).collect()
    }
}

/// Whether a point at `time` lies on the path from `anchor` to `candidate`
///
/// The far end is inclusive so landing exactly on a point absorbs it. While
/// the pointer sits at the anchor time, a point sharing that time stays covered.
fn is_crossed(time: f64, anchor: f64, candidate: f64) -> bool {
    match candidate.partial_cmp(&anchor) {
        Some(Ordering::Greater) => time > anchor && time <= candidate,
        Some(Ordering::Less) => time >= candidate && time < anchor,
        Some(Ordering::Equal) => time == anchor,
        None => false,
    }
}

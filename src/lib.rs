//! # clip-envelope
//!
//! Gain envelope editing for audio clips - framework-agnostic.
//!
//! This crate provides:
//! - **Envelope model** - `(time, dB)` control points with linear-in-dB interpolation
//! - **Coordinate mapping** - time/dB to pixels and back for a clip's lane
//! - **Hit-testing** - grab a point, create one on the curve, or miss
//! - **Drag sessions** - move points with crossing/restore semantics, click to delete
//! - **Editor** - pointer events over a track, written back to clips on release
//!
//! ## Quick Start
//!
//! ```rust
//! use clip_envelope::prelude::*;
//!
//! let clip = Clip::new(ClipId(1), 0.0, 4.0)
//!     .unwrap()
//!     .with_envelope(&[EnvelopePoint::new(0.0, 0.0), EnvelopePoint::new(2.0, 6.0)]);
//! let mut track = Track::new("Vocals").with_clip(clip);
//!
//! // 100 px per second, 72 px tall lane: 1 px per dB, 0 dB at y = 12
//! let mut editor = EnvelopeEditor::new(TrackLayout::new(0.0, 0.0, 72.0, 100.0).unwrap());
//!
//! // Grab the point at 2 s / +6 dB and pull it down to -6 dB
//! let down = editor.pointer_down(&track, Point::new(200.0, 6.0));
//! assert!(matches!(down, PointerDown::Envelope { .. }));
//! editor.pointer_move(Point::new(200.0, 18.0));
//! editor.pointer_up(&mut track, Point::new(200.0, 18.0)).unwrap();
//!
//! let db = track.clips[0].db_at(2.0);
//! assert!((db + 6.0).abs() < 1e-3);
//! ```
//!
//! ## Evaluating the curve
//!
//! ```rust
//! use clip_envelope::envelope::{evaluate_db_at_time, EnvelopePoint};
//!
//! let points = [
//!     EnvelopePoint::new(0.0, 0.0),
//!     EnvelopePoint::new(2.0, 6.0),
//!     EnvelopePoint::new(4.0, 0.0),
//! ];
//! assert_eq!(evaluate_db_at_time(&points, 1.0), 3.0);
//! assert_eq!(evaluate_db_at_time(&[], 1.0), 0.0);
//! ```

pub mod clip;
pub mod config;
pub mod editor;
pub mod envelope;
pub mod error;
pub mod hit_test;
pub mod mapper;
pub mod render;
pub mod session;

pub use clip::{Clip, ClipId, TimeSelection, Track};
pub use config::EditorConfig;
pub use editor::{EnvelopeEditor, PointerDown, TrackLayout};
pub use envelope::EnvelopePoint;
pub use error::{EnvelopeError, Result};
pub use hit_test::HitResult;
pub use mapper::{CoordinateMapper, Point, Region};
pub use session::{DragOutcome, DragSession};

/// Prelude for common imports
pub mod prelude {
    pub use crate::clip::{Clip, ClipId, TimeSelection, Track};
    pub use crate::config::EditorConfig;
    pub use crate::editor::{EnvelopeEditor, PointerDown, TrackLayout};
    pub use crate::envelope::{evaluate_db_at_time, insert_point, EnvelopePoint};
    pub use crate::hit_test::{hit_test, HitResult};
    pub use crate::mapper::{CoordinateMapper, Point, Region};
    pub use crate::session::{DragOutcome, DragSession};
}

#![forbid(unsafe_code)]

//! Region layout editing engine.
//!
//! Slate edits a fixed-size display layout by direct manipulation: named
//! rectangular regions are dragged and resized, and inferred divider lines
//! cascade-resize every region touching them. This crate is the geometry
//! and constraint core only; rendering, device transport, and persistence
//! live in the host, which talks to an [`EditorSession`] through
//! translated input events and the geometry document.
//!
//! ```
//! use slate_core::{InputEvent, LineSegment, Point, PointerEvent};
//! use slate_edit::{EditorSession, GeometryDocument};
//!
//! let baseline = GeometryDocument::from_json(
//!     r#"{
//!         "canvas": { "w": 250, "h": 122 },
//!         "gridSize": 4,
//!         "rects": { "clock": [6, 36, 118, 28], "status": [131, 36, 90, 28] }
//!     }"#,
//! )?;
//! let lines = vec![LineSegment::new(Point::new(125, 18), Point::new(125, 95))];
//! let mut session = EditorSession::new(&baseline, lines)?;
//!
//! let outcome = session.handle_event(InputEvent::Pointer(PointerEvent::pressed(60, 50)));
//! assert_eq!(session.selection(), Some("clock"));
//! assert!(outcome.selection_changed);
//! # Ok::<(), Vec<slate_edit::ValidationIssue>>(())
//! ```

pub use slate_core::{
    Axis, EditorKey, InputEvent, KeyEvent, LineSegment, Modifiers, Point, PointerEvent, Rect,
    snap_to_grid,
};

pub mod analyze;
pub mod divider;
pub mod document;
pub mod engine;
pub mod hit;
pub mod session;
pub mod store;
pub mod validate;

pub use analyze::{RegionDelta, collisions, diff};
pub use divider::{DEFAULT_EDGE_TOLERANCE, Divider, derive_dividers};
pub use document::{CanvasSize, GeometryDocument, RectEntries};
pub use engine::{CascadeAnchor, CascadePlan, plan_cascade, plan_drag, plan_nudge, plan_resize};
pub use hit::{
    DIVIDER_TOLERANCE, HANDLE_MARGIN, Handle, HitTarget, divider_at, handle_at, region_at, route,
};
pub use session::{EditorMode, EditorSession, EventOutcome, GestureKind};
pub use store::{
    Canvas, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE, GeometryStore,
};
pub use validate::{
    DOCUMENT_MIN_EXTENT, MIN_REGION_EXTENT, RectField, ValidationCode, ValidationIssue,
    validate_document, validate_named_rect, validate_rect,
};

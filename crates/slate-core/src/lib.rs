#![forbid(unsafe_code)]

//! Geometry primitives and canonical input events for Slate.
//!
//! This crate is host-agnostic: coordinates are already translated into
//! canvas space, and events carry no windowing-system baggage. Everything
//! the editing engine consumes lives here so that adapters (web, terminal,
//! test harness) share one vocabulary.

pub mod event;
pub mod geometry;

pub use event::{EditorKey, InputEvent, KeyEvent, Modifiers, PointerEvent};
pub use geometry::{Axis, LineSegment, Point, Rect, snap_to_grid};

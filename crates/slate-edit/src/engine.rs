#![forbid(unsafe_code)]

//! Drag/resize/cascade planning.
//!
//! Every gesture captures an anchor (the starting rect(s) and pointer) at
//! press time; each subsequent pointer sample turns into a candidate state
//! computed here from the anchor and the total delta. Planning is pure:
//! candidates are committed (or silently dropped) by the session through
//! the validator-gated store, so a plan function never needs to fail.

use slate_core::{Axis, Point, Rect, snap_to_grid};

use crate::divider::Divider;
use crate::hit::Handle;
use crate::store::{Canvas, GeometryStore};
use crate::validate::MIN_REGION_EXTENT;

/// Captured start state for a divider drag: the divider as derived at
/// press time plus the rects of every region on either side.
#[derive(Debug, Clone)]
pub struct CascadeAnchor {
    pub divider: Divider,
    pub near: Vec<(String, Rect)>,
    pub far: Vec<(String, Rect)>,
    pub origin: Point,
}

impl CascadeAnchor {
    /// Capture the anchor for a divider press.
    ///
    /// Regions named by the divider but missing from the store (cannot
    /// happen for a freshly derived divider) are skipped.
    #[must_use]
    pub fn capture(divider: Divider, store: &GeometryStore, origin: Point) -> Self {
        let collect = |names: &[String]| {
            names
                .iter()
                .filter_map(|name| store.get(name).map(|rect| (name.clone(), rect)))
                .collect()
        };
        let near = collect(&divider.near_regions);
        let far = collect(&divider.far_regions);
        Self {
            divider,
            near,
            far,
            origin,
        }
    }
}

/// A fully computed cascade candidate: the divider's new position and the
/// new rect for every affected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    pub position: i32,
    pub entries: Vec<(String, Rect)>,
}

fn snapped(value: i32, canvas: &Canvas, snap: bool) -> i32 {
    if snap {
        snap_to_grid(value, canvas.grid_size())
    } else {
        value
    }
}

/// Candidate rect for a region drag.
///
/// Position snaps, then clamps into the canvas; extent never changes, so
/// the result is always valid for a valid anchor.
#[must_use]
pub fn plan_drag(anchor: Rect, canvas: &Canvas, delta: Point, snap: bool) -> Rect {
    let x = snapped(anchor.x + delta.x, canvas, snap).clamp(0, canvas.width() - anchor.w);
    let y = snapped(anchor.y + delta.y, canvas, snap).clamp(0, canvas.height() - anchor.h);
    Rect::new(x, y, anchor.w, anchor.h)
}

/// Candidate rect for a handle resize.
///
/// The handle decides which edges move; each moving edge snaps, then the
/// minimum extent is enforced against the fixed opposite edge, then the
/// moving edges clamp into the canvas.
#[must_use]
pub fn plan_resize(anchor: Rect, handle: Handle, canvas: &Canvas, delta: Point, snap: bool) -> Rect {
    let mut left = anchor.x;
    let mut right = anchor.right();
    let mut top = anchor.y;
    let mut bottom = anchor.bottom();

    if handle.affects_left() {
        left = snapped(anchor.x + delta.x, canvas, snap);
        left = left.min(right - MIN_REGION_EXTENT).max(0);
    }
    if handle.affects_right() {
        right = snapped(anchor.right() + delta.x, canvas, snap);
        right = right.max(left + MIN_REGION_EXTENT).min(canvas.width());
    }
    if handle.affects_top() {
        top = snapped(anchor.y + delta.y, canvas, snap);
        top = top.min(bottom - MIN_REGION_EXTENT).max(0);
    }
    if handle.affects_bottom() {
        bottom = snapped(anchor.bottom() + delta.y, canvas, snap);
        bottom = bottom.max(top + MIN_REGION_EXTENT).min(canvas.height());
    }

    Rect::new(left, top, right - left, bottom - top)
}

/// Candidate cascade for a divider drag.
///
/// The delta is measured from the snapped pointer to the anchored divider
/// position. Near regions grow by the delta (origin fixed); far regions
/// shift by it and shrink, keeping their trailing edge fixed. The caller
/// commits the entries atomically; none of them is pre-clamped, so an
/// out-of-range cascade is rejected wholesale by validation.
#[must_use]
pub fn plan_cascade(anchor: &CascadeAnchor, pointer: Point, canvas: &Canvas, snap: bool) -> CascadePlan {
    let along = match anchor.divider.axis {
        Axis::Vertical => pointer.x,
        Axis::Horizontal => pointer.y,
    };
    let delta = snapped(along, canvas, snap) - anchor.divider.position;

    let mut entries = Vec::with_capacity(anchor.near.len() + anchor.far.len());
    for (name, rect) in &anchor.near {
        let candidate = match anchor.divider.axis {
            Axis::Vertical => Rect::new(rect.x, rect.y, rect.w + delta, rect.h),
            Axis::Horizontal => Rect::new(rect.x, rect.y, rect.w, rect.h + delta),
        };
        entries.push((name.clone(), candidate));
    }
    for (name, rect) in &anchor.far {
        let candidate = match anchor.divider.axis {
            Axis::Vertical => Rect::new(rect.x + delta, rect.y, rect.w - delta, rect.h),
            Axis::Horizontal => Rect::new(rect.x, rect.y + delta, rect.w, rect.h - delta),
        };
        entries.push((name.clone(), candidate));
    }

    CascadePlan {
        position: anchor.divider.position + delta,
        entries,
    }
}

/// Candidate rect for a keyboard nudge.
///
/// Arrow steps are already grid-sized, so positions are not re-snapped;
/// moves clamp into the canvas and resizes clamp between the minimum
/// extent and the canvas edge.
#[must_use]
pub fn plan_nudge(anchor: Rect, canvas: &Canvas, step: Point, resize: bool) -> Rect {
    if resize {
        let w = (anchor.w + step.x).clamp(MIN_REGION_EXTENT, canvas.width() - anchor.x);
        let h = (anchor.h + step.y).clamp(MIN_REGION_EXTENT, canvas.height() - anchor.y);
        Rect::new(anchor.x, anchor.y, w, h)
    } else {
        let x = (anchor.x + step.x).clamp(0, canvas.width() - anchor.w);
        let y = (anchor.y + step.y).clamp(0, canvas.height() - anchor.h);
        Rect::new(x, y, anchor.w, anchor.h)
    }
}

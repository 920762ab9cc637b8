#![forbid(unsafe_code)]

//! Hit-testing and mode routing.
//!
//! Converts a pointer position plus the current editor mode into "what
//! would this press affect": a resize handle, a region body, a divider, or
//! nothing. Pure queries; the session owns all state changes.

use slate_core::{Axis, Point, Rect};

use crate::divider::Divider;
use crate::session::EditorMode;
use crate::store::GeometryStore;

/// Half-size of the square hit zone around each resize handle.
pub const HANDLE_MARGIN: i32 = 6;

/// Maximum perpendicular distance at which a divider is grabbable.
pub const DIVIDER_TOLERANCE: i32 = 6;

/// One of the eight resize handles of a selected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub const fn affects_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub const fn affects_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub const fn affects_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub const fn affects_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// The handle's anchor point on a rect: corner or edge midpoint.
    #[must_use]
    pub const fn anchor_on(self, rect: Rect) -> Point {
        match self {
            Self::TopLeft => Point::new(rect.x, rect.y),
            Self::TopRight => Point::new(rect.right(), rect.y),
            Self::BottomLeft => Point::new(rect.x, rect.bottom()),
            Self::BottomRight => Point::new(rect.right(), rect.bottom()),
            Self::Top => Point::new(rect.center_x(), rect.y),
            Self::Bottom => Point::new(rect.center_x(), rect.bottom()),
            Self::Left => Point::new(rect.x, rect.center_y()),
            Self::Right => Point::new(rect.right(), rect.center_y()),
        }
    }
}

/// Corner handles first: they win over edge midpoints on overlap.
const HANDLE_PRIORITY: [Handle; 8] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::BottomLeft,
    Handle::BottomRight,
    Handle::Top,
    Handle::Bottom,
    Handle::Left,
    Handle::Right,
];

/// What a press at some point would affect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A resize handle of the (already selected) region.
    Handle { region: String, handle: Handle },
    /// A region body; pressing selects it and starts a drag.
    Region { region: String },
    /// A divider line (Dividers mode only).
    Divider(Divider),
    /// Empty canvas; pressing deselects.
    Empty,
}

/// Topmost region containing the point.
///
/// Stacking order is insertion order, so the scan runs in reverse.
#[must_use]
pub fn region_at(store: &GeometryStore, point: Point) -> Option<&str> {
    let regions: Vec<_> = store.all().collect();
    regions
        .into_iter()
        .rev()
        .find(|(_, rect)| rect.contains(point))
        .map(|(name, _)| name)
}

/// The handle of `rect` under the point, if any.
///
/// Eight square zones of `margin` half-size around the four corners
/// (checked first) and the four edge midpoints.
#[must_use]
pub fn handle_at(point: Point, rect: Rect, margin: i32) -> Option<Handle> {
    HANDLE_PRIORITY.into_iter().find(|handle| {
        let anchor = handle.anchor_on(rect);
        (point.x - anchor.x).abs() <= margin && (point.y - anchor.y).abs() <= margin
    })
}

/// First divider within `tolerance` of the point.
///
/// The perpendicular distance to the divider's position must be within
/// tolerance and the parallel coordinate must fall inside its span.
#[must_use]
pub fn divider_at<'a>(point: Point, dividers: &'a [Divider], tolerance: i32) -> Option<&'a Divider> {
    dividers.iter().find(|divider| {
        let (perpendicular, parallel) = match divider.axis {
            Axis::Vertical => (point.x, point.y),
            Axis::Horizontal => (point.y, point.x),
        };
        (perpendicular - divider.position).abs() <= tolerance
            && parallel >= divider.span.0
            && parallel <= divider.span.1
    })
}

/// Route a press to its target under the current mode.
///
/// Dividers mode consults dividers only. Regions mode gives the selected
/// region's handles priority, then its body, then any region under the
/// point (which a press would newly select), then empty space.
#[must_use]
pub fn route(
    mode: EditorMode,
    store: &GeometryStore,
    selection: Option<&str>,
    dividers: &[Divider],
    point: Point,
) -> HitTarget {
    match mode {
        EditorMode::Dividers => match divider_at(point, dividers, DIVIDER_TOLERANCE) {
            Some(divider) => HitTarget::Divider(divider.clone()),
            None => HitTarget::Empty,
        },
        EditorMode::Regions => {
            if let Some(selected) = selection
                && let Some(rect) = store.get(selected)
            {
                if let Some(handle) = handle_at(point, rect, HANDLE_MARGIN) {
                    return HitTarget::Handle {
                        region: selected.to_string(),
                        handle,
                    };
                }
                if rect.contains(point) {
                    return HitTarget::Region {
                        region: selected.to_string(),
                    };
                }
            }
            match region_at(store, point) {
                Some(region) => HitTarget::Region {
                    region: region.to_string(),
                },
                None => HitTarget::Empty,
            }
        }
    }
}

#![forbid(unsafe_code)]

//! Divider derivation.
//!
//! A divider is an inferred, movable line between regions: dragging it
//! cascade-resizes every region touching it. Dividers are derived fresh
//! from the current regions and the host-supplied separator segments on
//! every query and are never cached; a cache would go stale the moment
//! any rect mutates.

use slate_core::{Axis, LineSegment};

use crate::store::GeometryStore;

/// Default tolerance (in canvas units) when matching region edges to a
/// separator segment.
pub const DEFAULT_EDGE_TOLERANCE: i32 = 8;

/// A movable divider line and the regions it cascades.
///
/// For a vertical divider, `near_regions` sit to its left (their right
/// edges ride the divider) and `far_regions` to its right (their left
/// edges ride it). Horizontal dividers read the same with top/bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divider {
    pub axis: Axis,
    /// The constant coordinate: x for vertical, y for horizontal.
    pub position: i32,
    /// The varying coordinate range of the source segment, normalized.
    pub span: (i32, i32),
    /// Index of the source segment in the session's line list.
    pub source_line: usize,
    pub near_regions: Vec<String>,
    pub far_regions: Vec<String>,
}

/// Derive all movable dividers from the store and separator segments.
///
/// Segments coincident with a canvas border, diagonal, or degenerate are
/// skipped; so is any divider with an empty side (nothing to cascade).
#[must_use]
pub fn derive_dividers(
    store: &GeometryStore,
    lines: &[LineSegment],
    tolerance: i32,
) -> Vec<Divider> {
    let canvas = store.canvas();
    let mut dividers = Vec::new();

    for (index, segment) in lines.iter().enumerate() {
        let Some(axis) = segment.axis() else {
            continue;
        };
        if segment.on_canvas_border(canvas.width(), canvas.height()) {
            continue;
        }

        let position = segment.position();
        let (span_start, span_end) = segment.span();
        let mut near_regions = Vec::new();
        let mut far_regions = Vec::new();

        for (name, rect) in store.all() {
            // The region's extent along the divider must overlap the
            // segment's span, else the segment does not separate it.
            let (extent_start, extent_end, leading_edge, trailing_edge) = match axis {
                Axis::Vertical => (rect.y, rect.bottom(), rect.x, rect.right()),
                Axis::Horizontal => (rect.x, rect.right(), rect.y, rect.bottom()),
            };
            if extent_start >= span_end || extent_end <= span_start {
                continue;
            }

            if (trailing_edge - position).abs() <= tolerance {
                near_regions.push(name.to_string());
            } else if (leading_edge - position).abs() <= tolerance {
                far_regions.push(name.to_string());
            }
        }

        if near_regions.is_empty() || far_regions.is_empty() {
            continue;
        }

        dividers.push(Divider {
            axis,
            position,
            span: (span_start, span_end),
            source_line: index,
            near_regions,
            far_regions,
        });
    }

    dividers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Canvas, GeometryStore};
    use slate_core::{Point, Rect};

    fn store_with(entries: &[(&str, Rect)]) -> GeometryStore {
        let mut store = GeometryStore::new(Canvas::default());
        store.load(
            entries
                .iter()
                .map(|(name, rect)| ((*name).to_string(), *rect)),
        );
        store
    }

    fn vertical(x: i32, y0: i32, y1: i32) -> LineSegment {
        LineSegment::new(Point::new(x, y0), Point::new(x, y1))
    }

    #[test]
    fn vertical_divider_splits_near_and_far() {
        let store = store_with(&[
            ("a", Rect::new(6, 36, 118, 28)),
            ("b", Rect::new(131, 36, 90, 28)),
        ]);
        let lines = [vertical(125, 18, 95)];
        let dividers = derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE);

        assert_eq!(dividers.len(), 1);
        let divider = &dividers[0];
        assert_eq!(divider.axis, Axis::Vertical);
        assert_eq!(divider.position, 125);
        assert_eq!(divider.span, (18, 95));
        assert_eq!(divider.source_line, 0);
        assert_eq!(divider.near_regions, ["a"]);
        assert_eq!(divider.far_regions, ["b"]);
    }

    #[test]
    fn horizontal_divider_is_symmetric() {
        let store = store_with(&[
            ("top", Rect::new(10, 6, 100, 24)),
            ("bottom", Rect::new(10, 34, 100, 40)),
        ]);
        let lines = [LineSegment::new(Point::new(5, 32), Point::new(115, 32))];
        let dividers = derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE);

        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].axis, Axis::Horizontal);
        assert_eq!(dividers[0].near_regions, ["top"]);
        assert_eq!(dividers[0].far_regions, ["bottom"]);
    }

    #[test]
    fn divider_with_empty_side_is_discarded() {
        let store = store_with(&[("a", Rect::new(6, 36, 118, 28))]);
        let lines = [vertical(125, 18, 95)];
        assert!(derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn border_segments_are_skipped() {
        let store = store_with(&[
            ("a", Rect::new(0, 0, 125, 60)),
            ("b", Rect::new(125, 0, 125, 60)),
        ]);
        let lines = [vertical(0, 0, 122), vertical(250, 0, 122)];
        assert!(derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn diagonal_and_degenerate_segments_are_skipped() {
        let store = store_with(&[
            ("a", Rect::new(6, 36, 118, 28)),
            ("b", Rect::new(131, 36, 90, 28)),
        ]);
        let lines = [
            LineSegment::new(Point::new(120, 10), Point::new(130, 90)),
            LineSegment::new(Point::new(125, 40), Point::new(125, 40)),
        ];
        assert!(derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn span_overlap_gates_membership() {
        // Region sits entirely below the segment's span.
        let store = store_with(&[
            ("a", Rect::new(6, 100, 118, 20)),
            ("b", Rect::new(131, 100, 90, 20)),
        ]);
        let lines = [vertical(125, 18, 95)];
        assert!(derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn edge_beyond_tolerance_is_ignored() {
        let store = store_with(&[
            ("a", Rect::new(6, 36, 100, 28)),  // right edge 106, 19 away
            ("b", Rect::new(131, 36, 90, 28)), // left edge 131, 6 away
        ]);
        let lines = [vertical(125, 18, 95)];
        assert!(derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE).is_empty());
    }

    #[test]
    fn multiple_regions_per_side_cascade_together() {
        let store = store_with(&[
            ("a1", Rect::new(6, 10, 118, 30)),
            ("a2", Rect::new(6, 50, 118, 30)),
            ("b1", Rect::new(131, 10, 90, 30)),
            ("b2", Rect::new(131, 50, 90, 30)),
        ]);
        let lines = [vertical(125, 0, 122)];
        let dividers = derive_dividers(&store, &lines, DEFAULT_EDGE_TOLERANCE);
        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].near_regions, ["a1", "a2"]);
        assert_eq!(dividers[0].far_regions, ["b1", "b2"]);
    }
}

#![forbid(unsafe_code)]

//! Derived read-only views: collisions and baseline diff.
//!
//! Regions are non-overlapping by convention, not by construction, so the
//! editor surfaces overlaps instead of preventing them. Both views are
//! recomputed from the store on demand.

use slate_core::Rect;

use crate::store::GeometryStore;

/// One region's departure from the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDelta {
    pub name: String,
    pub from: Rect,
    pub to: Rect,
}

/// All pairs of regions whose rectangles strictly overlap.
///
/// Pairs are unordered and reported once, in stacking order; rectangles
/// that merely touch along an edge are not collisions.
#[must_use]
pub fn collisions(store: &GeometryStore) -> Vec<(String, String)> {
    let regions: Vec<_> = store.all().collect();
    let mut pairs = Vec::new();
    for (i, (name_a, rect_a)) in regions.iter().enumerate() {
        for (name_b, rect_b) in &regions[i + 1..] {
            if rect_a.intersects(rect_b) {
                pairs.push(((*name_a).to_string(), (*name_b).to_string()));
            }
        }
    }
    pairs
}

/// Every region whose rectangle differs from its baseline, in baseline
/// order. Unchanged regions are omitted.
#[must_use]
pub fn diff(baseline: &[(String, Rect)], store: &GeometryStore) -> Vec<RegionDelta> {
    baseline
        .iter()
        .filter_map(|(name, from)| {
            let to = store.get(name)?;
            (to != *from).then(|| RegionDelta {
                name: name.clone(),
                from: *from,
                to,
            })
        })
        .collect()
}

#![forbid(unsafe_code)]

//! The geometry store: named regions on a fixed canvas.
//!
//! The store is the single mutable resource of an editor session. All
//! interactive writes go through the validator-gated [`GeometryStore::set`]
//! and [`GeometryStore::set_many`]; document loads and baseline restores use
//! the crate-internal paths, which trust document-tier validation performed
//! upstream. Iteration order is the original document insertion order and
//! doubles as stacking order for hit-testing (last = topmost).

use rustc_hash::FxHashMap;
use slate_core::Rect;

use crate::validate::{MIN_REGION_EXTENT, ValidationCode, ValidationIssue, validate_named_rect};

/// Default canvas width in units.
pub const DEFAULT_CANVAS_WIDTH: i32 = 250;

/// Default canvas height in units.
pub const DEFAULT_CANVAS_HEIGHT: i32 = 122;

/// Default snapping grid size in units.
pub const DEFAULT_GRID_SIZE: i32 = 4;

/// Fixed per-session canvas dimensions plus the snapping grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    grid_size: i32,
}

impl Canvas {
    /// Create a canvas, rejecting non-positive dimensions or grid.
    pub fn new(width: i32, height: i32, grid_size: i32) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        if width <= 0 {
            issues.push(ValidationIssue::document(
                ValidationCode::CanvasExtentNotPositive,
                format!("canvas W must be > 0 (got {width})"),
            ));
        }
        if height <= 0 {
            issues.push(ValidationIssue::document(
                ValidationCode::CanvasExtentNotPositive,
                format!("canvas H must be > 0 (got {height})"),
            ));
        }
        if grid_size <= 0 {
            issues.push(ValidationIssue::document(
                ValidationCode::GridSizeNotPositive,
                format!("gridSize must be > 0 (got {grid_size})"),
            ));
        }
        if issues.is_empty() {
            Ok(Self {
                width,
                height,
                grid_size,
            })
        } else {
            Err(issues)
        }
    }

    /// Canvas width in units.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Canvas height in units.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Snapping grid size in units.
    #[must_use]
    pub const fn grid_size(&self) -> i32 {
        self.grid_size
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Insertion-ordered mapping from region name to rectangle.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    canvas: Canvas,
    order: Vec<String>,
    rects: FxHashMap<String, Rect>,
    revision: u64,
}

impl GeometryStore {
    /// Create an empty store over the given canvas.
    #[must_use]
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            order: Vec::new(),
            rects: FxHashMap::default(),
            revision: 0,
        }
    }

    /// The session canvas.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a region with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rects.contains_key(name)
    }

    /// Look up one region's rectangle.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rect> {
        self.rects.get(name).copied()
    }

    /// All regions in insertion (stacking) order.
    pub fn all(&self) -> impl Iterator<Item = (&str, Rect)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.rects.get(name).map(|rect| (name.as_str(), *rect)))
    }

    /// Region names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Monotonic counter bumped on every committed mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Validated single-region write.
    ///
    /// Rejects without mutating when the name is unknown or the rectangle
    /// violates the interactive invariants. Returns whether the store
    /// actually changed (`Ok(false)` for a write of the identical rect).
    pub fn set(&mut self, name: &str, rect: Rect) -> Result<bool, Vec<ValidationIssue>> {
        if !self.rects.contains_key(name) {
            return Err(vec![
                ValidationIssue::document(
                    ValidationCode::UnknownRegion,
                    format!("no region named '{name}'"),
                )
                .for_region(name),
            ]);
        }
        validate_named_rect(name, rect, &self.canvas, MIN_REGION_EXTENT)?;
        Ok(self.write(name, rect))
    }

    /// Validated multi-region write, all-or-nothing.
    ///
    /// Every entry is checked before any is committed; one violation
    /// rejects the whole batch with the combined issue list. The revision
    /// advances at most once per batch.
    pub fn set_many(&mut self, entries: &[(String, Rect)]) -> Result<bool, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for (name, rect) in entries {
            if !self.rects.contains_key(name.as_str()) {
                issues.push(
                    ValidationIssue::document(
                        ValidationCode::UnknownRegion,
                        format!("no region named '{name}'"),
                    )
                    .for_region(name.clone()),
                );
                continue;
            }
            if let Err(rect_issues) =
                validate_named_rect(name, *rect, &self.canvas, MIN_REGION_EXTENT)
            {
                issues.extend(rect_issues);
            }
        }
        if !issues.is_empty() {
            tracing::trace!(entries = entries.len(), issues = issues.len(), "batch write rejected");
            return Err(issues);
        }

        let mut changed = false;
        for (name, rect) in entries {
            if self.rects.get(name.as_str()) != Some(rect) {
                self.rects.insert(name.clone(), *rect);
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
        Ok(changed)
    }

    /// Replace the entire region map from a validated document load.
    pub(crate) fn load(&mut self, entries: impl IntoIterator<Item = (String, Rect)>) {
        self.order.clear();
        self.rects.clear();
        for (name, rect) in entries {
            if self.rects.insert(name.clone(), rect).is_none() {
                self.order.push(name);
            }
        }
        self.revision += 1;
    }

    /// Adopt new canvas dimensions from a validated import.
    pub(crate) fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Restore one region to a document-tier rect, bypassing the
    /// interactive minimum (baselines may carry thinner regions).
    pub(crate) fn restore(&mut self, name: &str, rect: Rect) -> bool {
        match self.rects.get_mut(name) {
            Some(current) if *current != rect => {
                *current = rect;
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    fn write(&mut self, name: &str, rect: Rect) -> bool {
        match self.rects.get_mut(name) {
            Some(current) if *current != rect => {
                *current = rect;
                self.revision += 1;
                tracing::trace!(region = name, ?rect, "rect committed");
                true
            }
            _ => false,
        }
    }
}

#![forbid(unsafe_code)]

//! The editor session: explicit state, one event entry point.
//!
//! Everything mutable (the geometry store, the baseline snapshot, the
//! separator segments, mode, selection, and the active gesture) lives here,
//! and every mutation flows through [`EditorSession::handle_event`] or one
//! of the explicit edit methods. There are no ambient singletons and no
//! callbacks: each call returns an [`EventOutcome`] whose
//! `geometry_changed` flag is the outbound "re-read the store" signal.
//!
//! Commits are live. Valid intermediate frames during a drag go straight
//! into the store, so there is no cancel-gesture; the per-region and global
//! resets restore from the baseline instead.

use slate_core::{EditorKey, InputEvent, LineSegment, Point, Rect};

use crate::analyze::{self, RegionDelta};
use crate::divider::{DEFAULT_EDGE_TOLERANCE, Divider, derive_dividers};
use crate::document::GeometryDocument;
use crate::engine::{CascadeAnchor, plan_cascade, plan_drag, plan_nudge, plan_resize};
use crate::hit::{Handle, HitTarget, route};
use crate::store::{Canvas, GeometryStore};
use crate::validate::{ValidationCode, ValidationIssue, validate_document};

/// What pointer input currently affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Select, drag, and resize regions.
    #[default]
    Regions,
    /// Drag dividers; region interaction is disabled.
    Dividers,
}

/// Discriminant of the session's active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureKind {
    #[default]
    Idle,
    DraggingRegion,
    ResizingRegion,
    DraggingDivider,
}

/// Active gesture with its captured anchors.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    DraggingRegion {
        region: String,
        anchor: Rect,
        origin: Point,
    },
    ResizingRegion {
        region: String,
        handle: Handle,
        anchor: Rect,
        origin: Point,
    },
    DraggingDivider {
        anchor: CascadeAnchor,
    },
}

impl Gesture {
    const fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::DraggingRegion { .. } => GestureKind::DraggingRegion,
            Self::ResizingRegion { .. } => GestureKind::ResizingRegion,
            Self::DraggingDivider { .. } => GestureKind::DraggingDivider,
        }
    }
}

/// Result of processing one input event.
///
/// `geometry_changed` is the outbound notification: it carries no payload,
/// the host re-reads the store (and re-runs any collision/diff view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub geometry_changed: bool,
    pub selection_changed: bool,
    /// Gesture state after the event.
    pub gesture: GestureKind,
}

/// The editor session over one geometry document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: GeometryStore,
    baseline: Vec<(String, Rect)>,
    lines: Vec<LineSegment>,
    mode: EditorMode,
    selection: Option<String>,
    gesture: Gesture,
    snap_enabled: bool,
    pointer_was_down: bool,
}

impl EditorSession {
    /// Create a session from the baseline document and separator segments.
    ///
    /// The baseline is validated at document tier; its region map becomes
    /// both the working state and the immutable reset/diff snapshot.
    pub fn new(
        baseline: &GeometryDocument,
        lines: Vec<LineSegment>,
    ) -> Result<Self, Vec<ValidationIssue>> {
        let defaults = Canvas::default();
        validate_document(baseline, &defaults)?;
        let canvas = baseline.resolved_canvas(&defaults)?;

        let mut store = GeometryStore::new(canvas);
        store.load(
            baseline
                .region_rects()
                .map(|(name, rect)| (name.to_string(), rect)),
        );
        let snapshot: Vec<_> = store
            .all()
            .map(|(name, rect)| (name.to_string(), rect))
            .collect();

        tracing::info!(regions = snapshot.len(), "editor session initialized");
        Ok(Self {
            store,
            baseline: snapshot,
            lines,
            mode: EditorMode::default(),
            selection: None,
            gesture: Gesture::Idle,
            snap_enabled: true,
            pointer_was_down: false,
        })
    }

    /// Create a session from a baseline plus an optional previously-saved
    /// override document (e.g. from the host's keyed store).
    ///
    /// The override is validated exactly like an import and applied over
    /// the baseline's canvas/grid defaults. An invalid override is
    /// discarded with a warning and the session starts from the baseline.
    /// The pristine baseline is retained for reset/diff regardless.
    pub fn with_override(
        baseline: &GeometryDocument,
        saved: Option<&GeometryDocument>,
        lines: Vec<LineSegment>,
    ) -> Result<Self, Vec<ValidationIssue>> {
        let mut session = Self::new(baseline, lines)?;
        if let Some(saved) = saved {
            if let Err(issues) = session.import(saved) {
                tracing::warn!(
                    issues = issues.len(),
                    "saved geometry override rejected, using baseline"
                );
            }
        }
        Ok(session)
    }

    /// Process one host input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        match event {
            InputEvent::Pointer(pointer) => {
                let point = Point::new(pointer.x, pointer.y);
                if pointer.primary_down && !self.pointer_was_down {
                    self.begin_gesture(point, &mut outcome);
                } else if pointer.primary_down {
                    self.update_gesture(point, &mut outcome);
                } else if self.pointer_was_down {
                    self.gesture = Gesture::Idle;
                }
                self.pointer_was_down = pointer.primary_down;
            }
            InputEvent::Key(key) => match key.key {
                EditorKey::Escape => {
                    if self.selection.take().is_some() {
                        outcome.selection_changed = true;
                    }
                    self.gesture = Gesture::Idle;
                }
                EditorKey::Up | EditorKey::Down | EditorKey::Left | EditorKey::Right => {
                    self.nudge_selection(key.key, key.shift(), &mut outcome);
                }
            },
        }
        outcome.gesture = self.gesture.kind();
        outcome
    }

    /// What a press at this point would affect, under the current mode.
    ///
    /// Pure query for hover feedback (cursor shapes); derives dividers
    /// fresh when in Dividers mode.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> HitTarget {
        let dividers = match self.mode {
            EditorMode::Dividers => self.dividers(),
            EditorMode::Regions => Vec::new(),
        };
        route(
            self.mode,
            &self.store,
            self.selection.as_deref(),
            &dividers,
            point,
        )
    }

    /// Derive the current dividers (fresh on every call, never cached).
    #[must_use]
    pub fn dividers(&self) -> Vec<Divider> {
        derive_dividers(&self.store, &self.lines, DEFAULT_EDGE_TOLERANCE)
    }

    /// The geometry store (read side).
    #[must_use]
    pub const fn store(&self) -> &GeometryStore {
        &self.store
    }

    /// The session canvas.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        self.store.canvas()
    }

    /// The separator segments as currently held (including any divider
    /// write-backs).
    #[must_use]
    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    /// Replace the separator segments. Ends any active gesture, since a
    /// divider anchor indexes into the old list.
    pub fn set_lines(&mut self, lines: Vec<LineSegment>) {
        self.lines = lines;
        self.gesture = Gesture::Idle;
    }

    /// Current editor mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch modes; the active gesture (if any) ends.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            self.mode = mode;
            self.gesture = Gesture::Idle;
        }
    }

    /// Currently selected region, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Select a region by name. Returns false (and clears nothing) for an
    /// unknown name.
    pub fn select(&mut self, name: &str) -> bool {
        if self.store.contains(name) {
            self.selection = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Whether grid snapping is applied to gestures.
    #[must_use]
    pub const fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    /// Toggle grid snapping.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    /// The baseline snapshot taken at initialization.
    pub fn baseline(&self) -> impl Iterator<Item = (&str, Rect)> + '_ {
        self.baseline
            .iter()
            .map(|(name, rect)| (name.as_str(), *rect))
    }

    /// Explicit one-shot edit of one region's rectangle.
    ///
    /// Blocked entirely on validation failure; the issue list names the
    /// offending fields.
    pub fn set_rect(&mut self, name: &str, rect: Rect) -> Result<(), Vec<ValidationIssue>> {
        self.store.set(name, rect).map(|_| ())
    }

    /// Import a document, replacing the current region map.
    ///
    /// Canvas and grid size are adopted from the document when present and
    /// keep their current values otherwise. The baseline is untouched; on
    /// failure nothing is.
    pub fn import(&mut self, doc: &GeometryDocument) -> Result<(), Vec<ValidationIssue>> {
        validate_document(doc, self.store.canvas())?;
        let canvas = doc.resolved_canvas(self.store.canvas())?;

        self.store.set_canvas(canvas);
        self.store.load(
            doc.region_rects()
                .map(|(name, rect)| (name.to_string(), rect)),
        );
        self.selection = None;
        self.gesture = Gesture::Idle;
        tracing::info!(regions = self.store.len(), "geometry document imported");
        Ok(())
    }

    /// [`Self::import`] from JSON text.
    pub fn import_json(&mut self, text: &str) -> Result<(), Vec<ValidationIssue>> {
        let doc = GeometryDocument::from_json(text)?;
        self.import(&doc)
    }

    /// Export the current document verbatim.
    #[must_use]
    pub fn export(&self) -> GeometryDocument {
        GeometryDocument::from_regions(self.store.canvas(), self.store.all())
    }

    /// [`Self::export`] as JSON text.
    pub fn export_json(&self) -> Result<String, Vec<ValidationIssue>> {
        self.export().to_json()
    }

    /// Restore every region to its baseline rectangle.
    ///
    /// Returns whether anything changed.
    pub fn reset_all(&mut self) -> bool {
        let mut changed = false;
        for (name, rect) in &self.baseline {
            changed |= self.store.restore(name, *rect);
        }
        self.gesture = Gesture::Idle;
        if changed {
            tracing::info!("geometry reset to baseline");
        }
        changed
    }

    /// Restore one region to its baseline rectangle.
    pub fn reset_region(&mut self, name: &str) -> Result<bool, Vec<ValidationIssue>> {
        let Some((_, rect)) = self.baseline.iter().find(|(n, _)| n == name) else {
            return Err(vec![
                ValidationIssue::document(
                    ValidationCode::UnknownRegion,
                    format!("no region named '{name}'"),
                )
                .for_region(name),
            ]);
        };
        Ok(self.store.restore(name, *rect))
    }

    /// Current pairwise region overlaps.
    #[must_use]
    pub fn collisions(&self) -> Vec<(String, String)> {
        analyze::collisions(&self.store)
    }

    /// Per-region departure from the baseline.
    #[must_use]
    pub fn diff(&self) -> Vec<RegionDelta> {
        analyze::diff(&self.baseline, &self.store)
    }

    fn begin_gesture(&mut self, point: Point, outcome: &mut EventOutcome) {
        let dividers = match self.mode {
            EditorMode::Dividers => self.dividers(),
            EditorMode::Regions => Vec::new(),
        };
        match route(
            self.mode,
            &self.store,
            self.selection.as_deref(),
            &dividers,
            point,
        ) {
            HitTarget::Handle { region, handle } => {
                if let Some(anchor) = self.store.get(&region) {
                    tracing::debug!(region = %region, ?handle, "resize gesture started");
                    self.gesture = Gesture::ResizingRegion {
                        region,
                        handle,
                        anchor,
                        origin: point,
                    };
                }
            }
            HitTarget::Region { region } => {
                if self.selection.as_deref() != Some(region.as_str()) {
                    self.selection = Some(region.clone());
                    outcome.selection_changed = true;
                }
                if let Some(anchor) = self.store.get(&region) {
                    tracing::debug!(region = %region, "drag gesture started");
                    self.gesture = Gesture::DraggingRegion {
                        region,
                        anchor,
                        origin: point,
                    };
                }
            }
            HitTarget::Divider(divider) => {
                tracing::debug!(position = divider.position, "divider gesture started");
                self.gesture = Gesture::DraggingDivider {
                    anchor: CascadeAnchor::capture(divider, &self.store, point),
                };
            }
            HitTarget::Empty => {
                if self.selection.take().is_some() {
                    outcome.selection_changed = true;
                }
            }
        }
    }

    fn update_gesture(&mut self, point: Point, outcome: &mut EventOutcome) {
        match &self.gesture {
            Gesture::Idle => {}
            Gesture::DraggingRegion {
                region,
                anchor,
                origin,
            } => {
                let delta = Point::new(point.x - origin.x, point.y - origin.y);
                let candidate = plan_drag(*anchor, self.store.canvas(), delta, self.snap_enabled);
                let region = region.clone();
                match self.store.set(&region, candidate) {
                    Ok(changed) => outcome.geometry_changed = changed,
                    Err(_) => {
                        tracing::trace!(region = %region, "drag frame dropped");
                    }
                }
            }
            Gesture::ResizingRegion {
                region,
                handle,
                anchor,
                origin,
            } => {
                let delta = Point::new(point.x - origin.x, point.y - origin.y);
                let candidate = plan_resize(
                    *anchor,
                    *handle,
                    self.store.canvas(),
                    delta,
                    self.snap_enabled,
                );
                let region = region.clone();
                match self.store.set(&region, candidate) {
                    Ok(changed) => outcome.geometry_changed = changed,
                    Err(_) => {
                        tracing::trace!(region = %region, "resize frame dropped");
                    }
                }
            }
            Gesture::DraggingDivider { anchor } => {
                let plan = plan_cascade(anchor, point, self.store.canvas(), self.snap_enabled);
                let source_line = anchor.divider.source_line;
                match self.store.set_many(&plan.entries) {
                    Ok(changed) => {
                        outcome.geometry_changed = changed;
                        // Keep the source segment in step so the next
                        // derivation finds the divider where it now is.
                        if let Some(line) = self.lines.get_mut(source_line) {
                            line.shift_to(plan.position);
                        }
                    }
                    Err(issues) => {
                        tracing::trace!(issues = issues.len(), "cascade frame dropped");
                    }
                }
            }
        }
    }

    fn nudge_selection(&mut self, key: EditorKey, resize: bool, outcome: &mut EventOutcome) {
        if self.mode != EditorMode::Regions {
            return;
        }
        let Some(region) = self.selection.clone() else {
            return;
        };
        let Some(anchor) = self.store.get(&region) else {
            return;
        };

        let step = if self.snap_enabled {
            self.store.canvas().grid_size()
        } else {
            1
        };
        let delta = match key {
            EditorKey::Up => Point::new(0, -step),
            EditorKey::Down => Point::new(0, step),
            EditorKey::Left => Point::new(-step, 0),
            EditorKey::Right => Point::new(step, 0),
            EditorKey::Escape => return,
        };

        let candidate = plan_nudge(anchor, self.store.canvas(), delta, resize);
        match self.store.set(&region, candidate) {
            Ok(changed) => outcome.geometry_changed = changed,
            Err(_) => {
                tracing::trace!(region = %region, "nudge dropped");
            }
        }
    }
}

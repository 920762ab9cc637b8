#![forbid(unsafe_code)]

//! Rectangle and document validation.
//!
//! Validation never mutates and never panics: callers get either `Ok` or a
//! list of field-specific issues with stable codes, suitable for direct
//! display by a host UI. The same checks back both the silent continuous
//! gesture path (candidate frames are dropped on failure) and the explicit
//! one-shot edit path (failures are surfaced).

use std::fmt;

use slate_core::Rect;

use crate::document::GeometryDocument;
use crate::store::Canvas;

/// Smallest width/height a region may take through interactive edits.
pub const MIN_REGION_EXTENT: i32 = 8;

/// Smallest width/height accepted from an imported document.
///
/// Documents may legitimately carry regions thinner than the interactive
/// minimum; the editor loads them but will not shrink anything below
/// [`MIN_REGION_EXTENT`] itself.
pub const DOCUMENT_MIN_EXTENT: i32 = 1;

/// Stable code for one validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    /// X or Y is negative.
    OriginNegative,
    /// W or H is below the applicable minimum.
    ExtentTooSmall,
    /// The rectangle extends past the canvas on one axis.
    OutOfBounds,
    /// The document defines no regions at all.
    EmptyDocument,
    /// Canvas width or height is not positive.
    CanvasExtentNotPositive,
    /// Grid size is not positive.
    GridSizeNotPositive,
    /// A named region does not exist in the store.
    UnknownRegion,
    /// The document text could not be parsed at all.
    MalformedDocument,
}

/// Rectangle field a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectField {
    X,
    Y,
    W,
    H,
}

impl fmt::Display for RectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
            Self::W => f.write_str("W"),
            Self::H => f.write_str("H"),
        }
    }
}

/// One actionable validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: ValidationCode,
    /// Region the finding applies to, when known.
    pub region: Option<String>,
    /// Rectangle field the finding anchors to, when applicable.
    pub field: Option<RectField>,
    pub detail: String,
}

impl ValidationIssue {
    /// A finding about a rectangle field.
    #[must_use]
    pub fn rect(code: ValidationCode, field: RectField, detail: impl Into<String>) -> Self {
        Self {
            code,
            region: None,
            field: Some(field),
            detail: detail.into(),
        }
    }

    /// A finding about the document as a whole.
    #[must_use]
    pub fn document(code: ValidationCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            region: None,
            field: None,
            detail: detail.into(),
        }
    }

    /// Attach the region name the finding belongs to.
    #[must_use]
    pub fn for_region(mut self, name: impl Into<String>) -> Self {
        self.region = Some(name.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "region '{region}': {}", self.detail),
            None => f.write_str(&self.detail),
        }
    }
}

impl std::error::Error for ValidationIssue {}

/// Check one rectangle against the canvas invariants.
///
/// `min_extent` is [`MIN_REGION_EXTENT`] for interactive edits and
/// [`DOCUMENT_MIN_EXTENT`] for document-level checks. All violated
/// invariants are reported, not just the first.
pub fn validate_rect(
    rect: Rect,
    canvas: &Canvas,
    min_extent: i32,
) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if rect.x < 0 {
        issues.push(ValidationIssue::rect(
            ValidationCode::OriginNegative,
            RectField::X,
            format!("X must be >= 0 (got {})", rect.x),
        ));
    }
    if rect.y < 0 {
        issues.push(ValidationIssue::rect(
            ValidationCode::OriginNegative,
            RectField::Y,
            format!("Y must be >= 0 (got {})", rect.y),
        ));
    }
    if rect.w < min_extent {
        issues.push(ValidationIssue::rect(
            ValidationCode::ExtentTooSmall,
            RectField::W,
            format!("W must be >= {min_extent} (got {})", rect.w),
        ));
    }
    if rect.h < min_extent {
        issues.push(ValidationIssue::rect(
            ValidationCode::ExtentTooSmall,
            RectField::H,
            format!("H must be >= {min_extent} (got {})", rect.h),
        ));
    }

    // Widened arithmetic so absurd imported values cannot overflow.
    let right = i64::from(rect.x) + i64::from(rect.w);
    if right > i64::from(canvas.width()) {
        issues.push(ValidationIssue::rect(
            ValidationCode::OutOfBounds,
            RectField::W,
            format!("X + W must be <= {} (got {right})", canvas.width()),
        ));
    }
    let bottom = i64::from(rect.y) + i64::from(rect.h);
    if bottom > i64::from(canvas.height()) {
        issues.push(ValidationIssue::rect(
            ValidationCode::OutOfBounds,
            RectField::H,
            format!("Y + H must be <= {} (got {bottom})", canvas.height()),
        ));
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// [`validate_rect`] with findings attributed to a named region.
pub fn validate_named_rect(
    name: &str,
    rect: Rect,
    canvas: &Canvas,
    min_extent: i32,
) -> Result<(), Vec<ValidationIssue>> {
    validate_rect(rect, canvas, min_extent).map_err(|issues| {
        issues
            .into_iter()
            .map(|issue| issue.for_region(name))
            .collect()
    })
}

/// Check a whole geometry document.
///
/// `fallback` supplies canvas dimensions and grid size for documents that
/// omit them. Requires at least one region; every region must satisfy the
/// document-tier rectangle invariants against the document's own canvas
/// (or the fallback's).
pub fn validate_document(
    doc: &GeometryDocument,
    fallback: &Canvas,
) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if let Some(canvas) = &doc.canvas {
        if canvas.w <= 0 {
            issues.push(ValidationIssue::document(
                ValidationCode::CanvasExtentNotPositive,
                format!("canvas W must be > 0 (got {})", canvas.w),
            ));
        }
        if canvas.h <= 0 {
            issues.push(ValidationIssue::document(
                ValidationCode::CanvasExtentNotPositive,
                format!("canvas H must be > 0 (got {})", canvas.h),
            ));
        }
    }
    if let Some(grid) = doc.grid_size
        && grid <= 0
    {
        issues.push(ValidationIssue::document(
            ValidationCode::GridSizeNotPositive,
            format!("gridSize must be > 0 (got {grid})"),
        ));
    }

    if doc.rects.is_empty() {
        issues.push(ValidationIssue::document(
            ValidationCode::EmptyDocument,
            "document must define at least one region",
        ));
    }

    // Rect bounds only make sense against a positive canvas; if the
    // document's own canvas is broken that finding already covers it.
    let canvas = match doc.resolved_canvas(fallback) {
        Ok(canvas) => canvas,
        Err(_) => {
            return if issues.is_empty() { Ok(()) } else { Err(issues) };
        }
    };

    for (name, raw) in doc.rects.iter() {
        let rect = Rect::new(raw[0], raw[1], raw[2], raw[3]);
        if let Err(rect_issues) = validate_named_rect(name, rect, &canvas, DOCUMENT_MIN_EXTENT) {
            issues.extend(rect_issues);
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CanvasSize;

    fn canvas() -> Canvas {
        Canvas::default()
    }

    #[test]
    fn valid_rect_passes_both_tiers() {
        let rect = Rect::new(6, 36, 118, 28);
        assert!(validate_rect(rect, &canvas(), MIN_REGION_EXTENT).is_ok());
        assert!(validate_rect(rect, &canvas(), DOCUMENT_MIN_EXTENT).is_ok());
    }

    #[test]
    fn negative_x_mentions_field_and_bound() {
        let issues = validate_rect(Rect::new(-1, 0, 20, 20), &canvas(), MIN_REGION_EXTENT)
            .expect_err("must reject");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ValidationCode::OriginNegative);
        assert_eq!(issues[0].field, Some(RectField::X));
        assert!(issues[0].detail.contains("X"));
        assert!(issues[0].detail.contains(">= 0"));
    }

    #[test]
    fn interactive_minimum_is_eight() {
        let rect = Rect::new(0, 0, 7, 20);
        let issues =
            validate_rect(rect, &canvas(), MIN_REGION_EXTENT).expect_err("below minimum");
        assert_eq!(issues[0].code, ValidationCode::ExtentTooSmall);
        assert_eq!(issues[0].field, Some(RectField::W));

        // The same rect is fine at document tier.
        assert!(validate_rect(rect, &canvas(), DOCUMENT_MIN_EXTENT).is_ok());
    }

    #[test]
    fn out_of_bounds_reports_the_overhang() {
        let issues = validate_rect(Rect::new(240, 0, 20, 20), &canvas(), MIN_REGION_EXTENT)
            .expect_err("past right edge");
        assert_eq!(issues[0].code, ValidationCode::OutOfBounds);
        assert!(issues[0].detail.contains("<= 250"));
    }

    #[test]
    fn multiple_violations_all_reported() {
        let issues = validate_rect(Rect::new(-2, -3, 4, 4), &canvas(), MIN_REGION_EXTENT)
            .expect_err("many violations");
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn named_rect_attaches_region() {
        let issues =
            validate_named_rect("badge", Rect::new(-1, 0, 20, 20), &canvas(), MIN_REGION_EXTENT)
                .expect_err("must reject");
        assert_eq!(issues[0].region.as_deref(), Some("badge"));
        assert_eq!(issues[0].to_string(), "region 'badge': X must be >= 0 (got -1)");
    }

    #[test]
    fn empty_document_is_rejected() {
        let doc = GeometryDocument::default();
        let issues = validate_document(&doc, &canvas()).expect_err("no regions");
        assert!(issues.iter().any(|i| i.code == ValidationCode::EmptyDocument));
    }

    #[test]
    fn document_canvas_must_be_positive() {
        let mut doc = GeometryDocument::default();
        doc.canvas = Some(CanvasSize { w: 0, h: 122 });
        doc.rects.insert("a", [0, 0, 10, 10]);
        let issues = validate_document(&doc, &canvas()).expect_err("zero width canvas");
        assert!(
            issues
                .iter()
                .any(|i| i.code == ValidationCode::CanvasExtentNotPositive)
        );
    }

    #[test]
    fn document_rects_checked_against_document_canvas() {
        let mut doc = GeometryDocument::default();
        doc.canvas = Some(CanvasSize { w: 100, h: 100 });
        doc.rects.insert("a", [0, 0, 120, 10]);
        let issues = validate_document(&doc, &canvas()).expect_err("wider than own canvas");
        assert!(issues.iter().any(|i| i.code == ValidationCode::OutOfBounds));
    }

    #[test]
    fn document_minimum_extent_is_one() {
        let mut doc = GeometryDocument::default();
        doc.rects.insert("sliver", [0, 0, 1, 1]);
        assert!(validate_document(&doc, &canvas()).is_ok());

        let mut zero = GeometryDocument::default();
        zero.rects.insert("flat", [0, 0, 0, 10]);
        let issues = validate_document(&zero, &canvas()).expect_err("zero width");
        assert!(issues.iter().any(|i| i.code == ValidationCode::ExtentTooSmall));
    }
}

#![forbid(unsafe_code)]

//! The geometry document: the one artifact crossing the host boundary.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "canvas": { "w": 250, "h": 122 },
//!   "gridSize": 4,
//!   "rects": { "clock": [6, 36, 118, 28], "badge": [131, 36, 90, 28] }
//! }
//! ```
//!
//! `canvas` and `gridSize` are optional on input and fall back to the
//! session defaults. `rects` keeps its insertion order through a
//! deserialize/serialize round trip, since that order defines stacking.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use slate_core::Rect;

use crate::store::Canvas;
use crate::validate::{ValidationCode, ValidationIssue};

/// Canvas dimensions as serialized in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub w: i32,
    pub h: i32,
}

/// An externally persisted geometry document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeometryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSize>,

    #[serde(rename = "gridSize", default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<i32>,

    #[serde(default)]
    pub rects: RectEntries,
}

impl GeometryDocument {
    /// Parse a document from JSON text.
    ///
    /// Parse failures (wrong arity rect arrays, non-integer coordinates,
    /// structural mismatches) come back as a single
    /// [`ValidationCode::MalformedDocument`] issue carrying the parser
    /// message; semantic checks are a separate `validate_document` pass.
    pub fn from_json(text: &str) -> Result<Self, Vec<ValidationIssue>> {
        serde_json::from_str(text).map_err(|err| {
            vec![ValidationIssue::document(
                ValidationCode::MalformedDocument,
                format!("document is not valid JSON geometry: {err}"),
            )]
        })
    }

    /// Serialize to pretty-printed JSON text.
    pub fn to_json(&self) -> Result<String, Vec<ValidationIssue>> {
        serde_json::to_string_pretty(self).map_err(|err| {
            vec![ValidationIssue::document(
                ValidationCode::MalformedDocument,
                format!("document serialization failed: {err}"),
            )]
        })
    }

    /// The canvas this document describes, falling back for absent fields.
    pub fn resolved_canvas(&self, fallback: &Canvas) -> Result<Canvas, Vec<ValidationIssue>> {
        let (w, h) = match self.canvas {
            Some(size) => (size.w, size.h),
            None => (fallback.width(), fallback.height()),
        };
        Canvas::new(w, h, self.grid_size.unwrap_or(fallback.grid_size()))
    }

    /// Region entries as named [`Rect`]s, in document order.
    pub fn region_rects(&self) -> impl Iterator<Item = (&str, Rect)> + '_ {
        self.rects
            .iter()
            .map(|(name, raw)| (name, Rect::new(raw[0], raw[1], raw[2], raw[3])))
    }

    /// Build a document from a canvas and ordered region rects.
    pub fn from_regions<'a>(
        canvas: &Canvas,
        regions: impl IntoIterator<Item = (&'a str, Rect)>,
    ) -> Self {
        let mut rects = RectEntries::default();
        for (name, rect) in regions {
            rects.insert(name, [rect.x, rect.y, rect.w, rect.h]);
        }
        Self {
            canvas: Some(CanvasSize {
                w: canvas.width(),
                h: canvas.height(),
            }),
            grid_size: Some(canvas.grid_size()),
            rects,
        }
    }
}

/// Insertion-ordered `name -> [x, y, w, h]` map.
///
/// Serialized as a JSON object; order is significant, so this is a pair
/// vector rather than a hash or tree map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RectEntries(Vec<(String, [i32; 4])>);

impl RectEntries {
    /// Insert or replace an entry. Replacement keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, rect: [i32; 4]) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, value)) => *value = rect,
            None => self.0.push((name, rect)),
        }
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<[i32; 4]> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rect)| *rect)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, [i32; 4])> + '_ {
        self.0.iter().map(|(name, rect)| (name.as_str(), *rect))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RectEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, rect) in &self.0 {
            map.serialize_entry(name, rect)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RectEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RectEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of region name to [x, y, w, h]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = RectEntries::default();
                while let Some((name, rect)) = access.next_entry::<String, [i32; 4]>()? {
                    entries.insert(name, rect);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "canvas": { "w": 250, "h": 122 },
        "gridSize": 4,
        "rects": {
            "zulu": [6, 36, 118, 28],
            "alpha": [131, 36, 90, 28],
            "mike": [6, 70, 215, 44]
        }
    }"#;

    #[test]
    fn parse_keeps_document_order() {
        let doc = GeometryDocument::from_json(DOC).expect("well-formed");
        let names: Vec<_> = doc.rects.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn round_trip_preserves_entries_and_order() {
        let doc = GeometryDocument::from_json(DOC).expect("well-formed");
        let text = doc.to_json().expect("serializable");
        let again = GeometryDocument::from_json(&text).expect("round trip");
        assert_eq!(doc, again);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let doc = GeometryDocument::from_json(r#"{ "rects": { "a": [0, 0, 10, 10] } }"#)
            .expect("minimal document");
        assert_eq!(doc.canvas, None);
        assert_eq!(doc.grid_size, None);

        let canvas = doc.resolved_canvas(&Canvas::default()).expect("defaults apply");
        assert_eq!(canvas.width(), 250);
        assert_eq!(canvas.height(), 122);
        assert_eq!(canvas.grid_size(), 4);
    }

    #[test]
    fn wrong_arity_rect_is_a_parse_error() {
        let err = GeometryDocument::from_json(r#"{ "rects": { "a": [0, 0, 10] } }"#)
            .expect_err("three elements");
        assert_eq!(err[0].code, ValidationCode::MalformedDocument);
    }

    #[test]
    fn non_integer_coordinate_is_a_parse_error() {
        let err = GeometryDocument::from_json(r#"{ "rects": { "a": [0, 0, 10.5, 10] } }"#)
            .expect_err("fractional width");
        assert_eq!(err[0].code, ValidationCode::MalformedDocument);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut entries = RectEntries::default();
        entries.insert("a", [0, 0, 10, 10]);
        entries.insert("b", [10, 0, 10, 10]);
        entries.insert("a", [5, 5, 10, 10]);
        let names: Vec<_> = entries.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(entries.get("a"), Some([5, 5, 10, 10]));
    }

    #[test]
    fn from_regions_serializes_rects_as_arrays() {
        let canvas = Canvas::default();
        let doc = GeometryDocument::from_regions(&canvas, [("clock", Rect::new(6, 36, 118, 28))]);
        let text = doc.to_json().expect("serializable");
        assert!(text.contains("\"gridSize\": 4"));
        assert!(text.contains('['));
        let again = GeometryDocument::from_json(&text).expect("round trip");
        assert_eq!(again.rects.get("clock"), Some([6, 36, 118, 28]));
    }
}

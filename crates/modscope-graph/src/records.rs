//! Wire-shape record types for extraction results.
//!
//! These types define the stable output contract of an analysis run: the
//! analyzer process serializes an [`ExtractionResult`] as a single JSON
//! document on stdout, and the orchestrator deserializes the same shape on
//! the other side. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// A cursor or span endpoint in source text. Both axes are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A source location range attributing a record to originating text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Containment test used by the highlight mapper: the position is inside
    /// the span when both its line and column fall between the endpoints,
    /// inclusive on both sides.
    pub fn contains(&self, pos: Position) -> bool {
        self.start.line <= pos.line
            && pos.line <= self.end.line
            && self.start.column <= pos.column
            && pos.column <= self.end.column
    }
}

/// One static or presentational dependency edge out of the entry module.
///
/// `category` is present on executable references (currently always `"esm"`)
/// and absent on presentational ones, which are distinguished structurally by
/// living in `presentationalDependencies` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// One asynchronous load boundary (a dynamic `import()` expression) and the
/// nested dependency records belonging to it.
///
/// Nested spans normally fall within the block span, but the extractor does
/// not enforce that; consumers must tolerate violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncBlockRecord {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

/// The full structured output of one compile-and-analyze run.
///
/// All three sequences are insertion-ordered as discovered during the graph
/// build. Order is significant for stable indexing by consumers, nothing
/// more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
    #[serde(default)]
    pub presentational_dependencies: Vec<DependencyRecord>,
    #[serde(default)]
    pub async_blocks: Vec<AsyncBlockRecord>,
}

impl ExtractionResult {
    /// Total number of records across the three sequences.
    pub fn record_count(&self) -> usize {
        self.dependencies.len() + self.presentational_dependencies.len() + self.async_blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_round_trips_through_json() {
        let result = ExtractionResult {
            dependencies: vec![DependencyRecord {
                kind: "import".to_string(),
                category: Some("esm".to_string()),
                identifiers: vec!["a".to_string()],
                span: Some(Span::new(Position::new(1, 1), Position::new(1, 26))),
            }],
            presentational_dependencies: vec![],
            async_blocks: vec![],
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let json = serde_json::to_string(&ExtractionResult::default()).unwrap();
        assert!(json.contains("presentationalDependencies"));
        assert!(json.contains("asyncBlocks"));
    }

    #[test]
    fn absent_category_is_omitted() {
        let record = DependencyRecord {
            kind: "type-only import".to_string(),
            category: None,
            identifiers: vec![],
            span: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("category"));
    }

    #[test]
    fn containment_is_inclusive_on_both_ends() {
        let span = Span::new(Position::new(2, 5), Position::new(2, 10));
        assert!(span.contains(Position::new(2, 5)));
        assert!(span.contains(Position::new(2, 10)));
        assert!(!span.contains(Position::new(2, 4)));
        assert!(!span.contains(Position::new(2, 11)));
        assert!(!span.contains(Position::new(1, 7)));
        assert!(!span.contains(Position::new(3, 7)));
    }
}

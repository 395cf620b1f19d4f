//! # modscope-highlight
//!
//! Maps text-cursor positions back onto extraction records and drives a
//! decoration renderer with at most one highlighted range at a time.
//!
//! The matching rule is fixed: records are searched in the concatenation
//! `dependencies ++ presentationalDependencies ++ asyncBlocks`, and the
//! first record whose span contains the cursor wins. The concatenated index
//! is stable for the lifetime of one [`ExtractionResult`], which is what
//! list UIs key hover and expand state on.

use modscope_graph::{AsyncBlockRecord, DependencyRecord, ExtractionResult, Position, Span};

/// A borrowed view of one record in the concatenated sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordView<'a> {
    Dependency(&'a DependencyRecord),
    Presentational(&'a DependencyRecord),
    AsyncBlock(&'a AsyncBlockRecord),
}

impl<'a> RecordView<'a> {
    pub fn kind(&self) -> &'a str {
        match self {
            RecordView::Dependency(dep) | RecordView::Presentational(dep) => &dep.kind,
            RecordView::AsyncBlock(block) => &block.kind,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            RecordView::Dependency(dep) | RecordView::Presentational(dep) => dep.span,
            RecordView::AsyncBlock(block) => block.span,
        }
    }

    /// Containment test for one explicit record; backs hover-from-list
    /// highlighting independent of cursor position. Spanless records never
    /// contain anything.
    pub fn contains(&self, pos: Position) -> bool {
        self.span().is_some_and(|span| span.contains(pos))
    }
}

/// Position-to-record index over one extraction result.
pub struct LocationIndex<'a> {
    records: Vec<RecordView<'a>>,
}

impl<'a> LocationIndex<'a> {
    pub fn new(result: &'a ExtractionResult) -> Self {
        let mut records = Vec::with_capacity(result.record_count());
        records.extend(result.dependencies.iter().map(RecordView::Dependency));
        records.extend(
            result
                .presentational_dependencies
                .iter()
                .map(RecordView::Presentational),
        );
        records.extend(result.async_blocks.iter().map(RecordView::AsyncBlock));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RecordView<'a>> {
        self.records.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, RecordView<'a>)> + '_ {
        self.records.iter().copied().enumerate()
    }

    /// Find the record containing the cursor: lowest concatenated index
    /// wins.
    pub fn record_at(&self, pos: Position) -> Option<(usize, RecordView<'a>)> {
        self.records
            .iter()
            .copied()
            .enumerate()
            .find(|(_, record)| record.contains(pos))
    }
}

/// Renderer boundary: the editor side applies or clears the single
/// decoration range.
pub trait DecorationSink {
    /// Replace any existing decoration with one contiguous range.
    fn apply(&mut self, span: Span);
    /// Remove all decorations.
    fn clear(&mut self);
}

/// Tracks the active selection and drives a [`DecorationSink`] with exactly
/// one decoration change per transition.
pub struct Highlighter<S: DecorationSink> {
    sink: S,
    active: Option<usize>,
}

impl<S: DecorationSink> Highlighter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, active: None }
    }

    /// Index of the currently highlighted record, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Recompute the selection for a cursor move. The sink is only touched
    /// on a match/no-match transition.
    pub fn cursor_moved(&mut self, index: &LocationIndex<'_>, pos: Position) {
        match index.record_at(pos) {
            Some((record_index, record)) => self.activate(record_index, record),
            None => self.clear(),
        }
    }

    /// Highlight one explicit record (hover from a list). Spanless records
    /// clear instead, since there is nothing to decorate.
    pub fn highlight_record(&mut self, index: &LocationIndex<'_>, record_index: usize) {
        match index.get(record_index) {
            Some(record) if record.span().is_some() => self.activate(record_index, record),
            _ => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        if self.active.take().is_some() {
            self.sink.clear();
        }
    }

    fn activate(&mut self, record_index: usize, record: RecordView<'_>) {
        if self.active == Some(record_index) {
            return;
        }
        if let Some(span) = record.span() {
            self.active = Some(record_index);
            self.sink.apply(span);
        }
    }
}

//! Byte-offset to line/column conversion.

use crate::records::Position;

/// Fast line/column lookup using pre-calculated line start offsets.
///
/// Built once per scanned source; every record span produced for that source
/// goes through the same index.
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a 1-based line and 1-based column.
    ///
    /// Columns count characters, not bytes. An offset before the first line
    /// start maps to line 1 (binary_search returns `Err(0)` there, which must
    /// not be decremented).
    pub fn position(&self, offset: u32, source: &str) -> Position {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(idx) => idx - 1,
        };

        let line_start = self.line_starts[line_idx] as usize;
        let line = (line_idx + 1) as u32;

        let column = if offset as usize > source.len() {
            1
        } else {
            source[line_start..offset as usize].chars().count() as u32 + 1
        };

        Position::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_zero_is_line_one_column_one() {
        let source = "abc\ndef";
        let index = LineIndex::new(source);
        assert_eq!(index.position(0, source), Position::new(1, 1));
    }

    #[test]
    fn offset_after_newline_starts_next_line() {
        let source = "abc\ndef";
        let index = LineIndex::new(source);
        assert_eq!(index.position(4, source), Position::new(2, 1));
        assert_eq!(index.position(6, source), Position::new(2, 3));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let source = "héllo\nx";
        let index = LineIndex::new(source);
        // 'é' is two bytes; the 'o' sits at byte offset 5 but column 5.
        assert_eq!(index.position(5, source), Position::new(1, 5));
    }

    #[test]
    fn end_of_source_is_valid() {
        let source = "ab";
        let index = LineIndex::new(source);
        assert_eq!(index.position(2, source), Position::new(1, 3));
    }
}

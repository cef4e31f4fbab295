//! Byte offset to line/column mapping.

/// Precomputed line starts for a source text.
///
/// Lines and columns are 1-indexed. Columns count UTF-16 code units, as
/// editors and ESLint-compatible tooling do, so a character outside the
/// Basic Multilingual Plane advances the column by two.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// The text this index was built from.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Convert a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// Offsets past the end clamp to the end of the source; offsets inside a
    /// multi-byte character resolve to that character.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let mut end = offset as usize;
        while !self.source.is_char_boundary(end) {
            end -= 1;
        }
        let column = self.source[line_start..end]
            .chars()
            .map(char::len_utf16)
            .sum::<usize>()
            + 1;
        (line as u32 + 1, column as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new("abc\ndef");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(2), (1, 3));
    }

    #[test]
    fn test_newline_belongs_to_its_line() {
        let index = LineIndex::new("abc\ndef\nghi");
        assert_eq!(index.line_col(3), (1, 4));
        assert_eq!(index.line_col(4), (2, 1));
        assert_eq!(index.line_col(8), (3, 1));
    }

    #[test]
    fn test_columns_are_not_bytes() {
        let index = LineIndex::new("é = 1");
        // 'é' is two bytes
        assert_eq!(index.line_col(2), (1, 2));
        assert_eq!(index.line_col(1), (1, 1));
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let index = LineIndex::new("\u{1F600}ab");
        // 4 bytes, 2 UTF-16 units
        assert_eq!(index.line_col(4), (1, 3));
        assert_eq!(index.line_col(5), (1, 4));
    }

    #[test]
    fn test_clamps_past_end() {
        let index = LineIndex::new("ab\n");
        assert_eq!(index.line_col(100), (2, 1));
    }
}

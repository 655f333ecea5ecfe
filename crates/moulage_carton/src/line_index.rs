//! Byte offset to line/column lookup.

use memchr::memchr_iter;

/// 1-based line and column of a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

/// Line start table for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|pos| pos as u32 + 1));
        Self { line_starts }
    }

    #[cfg(test)]
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset. Columns count characters, not bytes.
    pub fn line_column(&self, source: &str, offset: u32) -> LineColumn {
        let offset = offset.min(source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = source
            .get(line_start..offset as usize)
            .map_or(0, |prefix| prefix.chars().count());

        LineColumn {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let source = "const a = 1";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 1);
        assert_eq!(
            index.line_column(source, 6),
            LineColumn { line: 1, column: 7 }
        );
    }

    #[test]
    fn test_later_lines() {
        let source = "a\nbc\n\nd";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_column(source, 2), LineColumn { line: 2, column: 1 });
        assert_eq!(index.line_column(source, 3), LineColumn { line: 2, column: 2 });
        assert_eq!(index.line_column(source, 6), LineColumn { line: 4, column: 1 });
    }

    #[test]
    fn test_multibyte_column() {
        let source = "'é' + x";
        let index = LineIndex::new(source);
        // `x` sits after a two-byte character
        assert_eq!(index.line_column(source, 7), LineColumn { line: 1, column: 7 });
    }
}

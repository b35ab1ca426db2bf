//! Line and column helpers for script offsets.
//!
//! The interpreter reports where processing stopped as a byte offset into
//! the script text. These helpers turn that offset into a 1-based line and
//! column for display.
//!
//! For repeated lookups on the same source, use [`LineOffsetTable`] which
//! pre-computes line offsets for O(log L) lookup instead of O(n) scanning.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use kls_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "var x;\nset x 1;\nexit;";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 7), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 20), (3, 5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: usize) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters (not bytes) from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0);
        (line, column_from(source, line_start, offset))
    }

    /// Get the byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute the 1-based line number of a byte offset.
///
/// Counts newlines strictly before the offset; offsets past the end of the
/// source are clamped.
pub fn line_from_offset(source: &str, offset: usize) -> u32 {
    let end = offset.min(source.len());
    let newlines = source.as_bytes()[..end]
        .iter()
        .filter(|&&byte| byte == b'\n')
        .count();
    u32::try_from(newlines).unwrap_or(u32::MAX - 1) + 1
}

/// Compute 1-based (line, column) from a byte offset.
pub fn offset_to_line_col(source: &str, offset: usize) -> (u32, u32) {
    let end = offset.min(source.len());
    let line_start = source.as_bytes()[..end]
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |i| i + 1);
    (line_from_offset(source, end), column_from(source, line_start, end))
}

fn column_from(source: &str, line_start: usize, offset: usize) -> u32 {
    let chars = source
        .get(line_start..)
        .unwrap_or_default()
        .char_indices()
        .take_while(|&(i, _)| line_start + i < offset)
        .count();
    u32::try_from(chars).unwrap_or(u32::MAX - 1) + 1
}

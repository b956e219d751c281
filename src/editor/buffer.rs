use std::ops::Range;

use tracing::{debug, trace};

use super::line_index::LineIndex;
use super::piece_table::PieceTable;
use crate::error::{BufferError, Coordinate, Result};

/// How the line index is brought up to date after an edit.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineIndexMode {
    /// Rescan the whole materialized document after every edit.
    Rebuild,
    /// Patch only the entries affected by the edited span.
    #[default]
    Incremental,
}

/// Construction options for a [`Buffer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferOptions {
    pub line_index: LineIndexMode,
}

/// A text buffer backed by a piece table with a line-start index on top.
///
/// Editing goes through [`insert`](Self::insert) and [`delete`](Self::delete);
/// both update the piece table and the line index before returning, so
/// position queries never see a stale index.
///
/// All positions are 0-based character offsets. Lines and columns are 0-based
/// too, and a line's length includes its trailing newline.
///
/// # Example
///
/// ```
/// use piecebuf::Buffer;
///
/// let mut buf = Buffer::new("a\nb\nc");
/// assert_eq!(buf.line_count(), 3);
/// assert_eq!(buf.line(2).unwrap(), 1);
///
/// buf.insert("xy", 2).unwrap();
/// assert_eq!(buf.as_text(), "a\nxyb\nc");
/// assert_eq!(buf.column(4).unwrap(), 2);
/// ```
#[derive(Clone)]
pub struct Buffer {
    table: PieceTable,
    lines: LineIndex,
    options: BufferOptions,
}

impl Buffer {
    /// Create a buffer from a string with default options.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, BufferOptions::default())
    }

    pub fn with_options(text: &str, options: BufferOptions) -> Self {
        Self {
            table: PieceTable::new(text),
            lines: LineIndex::from_chars(text.chars()),
            options,
        }
    }

    pub const fn options(&self) -> BufferOptions {
        self.options
    }

    /// The full text content of the buffer.
    pub fn as_text(&self) -> String {
        self.table.as_text()
    }

    /// Document length in characters.
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of pieces in the underlying piece table.
    pub fn piece_count(&self) -> usize {
        self.table.piece_count()
    }

    /// Total number of lines. An empty buffer has one line.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Line containing offset `pos`.
    ///
    /// `pos` may equal the document length (the cursor slot after the last
    /// character).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is past the end.
    pub fn line(&self, pos: usize) -> Result<usize> {
        self.check_offset(pos)?;
        Ok(self.lines.line_of(pos))
    }

    /// Offset of the first character of line `n`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `n` is not a line.
    pub fn pos_for_line(&self, n: usize) -> Result<usize> {
        self.lines
            .line_start(n)
            .ok_or_else(|| BufferError::out_of_bounds(Coordinate::Line, n, self.line_count()))
    }

    /// Column of offset `pos` within its line.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is past the end.
    pub fn column(&self, pos: usize) -> Result<usize> {
        let line = self.line(pos)?;
        Ok(pos - self.pos_for_line(line)?)
    }

    /// `(line, column)` of offset `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is past the end.
    pub fn position(&self, pos: usize) -> Result<(usize, usize)> {
        let line = self.line(pos)?;
        Ok((line, pos - self.pos_for_line(line)?))
    }

    /// Length of line `n` in characters, counting its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `n` is not a line.
    pub fn line_length(&self, n: usize) -> Result<usize> {
        let start = self.pos_for_line(n)?;
        let end = self.lines.line_start(n + 1).unwrap_or_else(|| self.len());
        Ok(end - start)
    }

    /// Offset of `column` on `line`.
    ///
    /// The column must stay on the line: up to the newline for lines that have
    /// one, up to one past the last character for the final line.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the line does not exist or the
    /// column runs off it.
    pub fn offset_at(&self, line: usize, column: usize) -> Result<usize> {
        let start = self.pos_for_line(line)?;
        let length = self.line_length(line)?;
        let is_last = line + 1 == self.line_count();
        if column > length || (column == length && !is_last) {
            return Err(BufferError::out_of_bounds(
                Coordinate::Column,
                column,
                length,
            ));
        }
        Ok(start + column)
    }

    /// Text of the character range `range`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the range is not inside the
    /// document.
    pub fn slice(&self, range: Range<usize>) -> Result<String> {
        self.table.slice(range)
    }

    /// Text of line `n`, including its trailing newline if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `n` is not a line.
    pub fn line_text(&self, n: usize) -> Result<String> {
        let start = self.pos_for_line(n)?;
        let length = self.line_length(n)?;
        self.table.slice(start..start + length)
    }

    /// Iterate over the text of every line, newlines included.
    pub const fn lines(&self) -> Lines<'_> {
        Lines {
            buffer: self,
            next: 0,
        }
    }

    /// Insert `text` at offset `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `pos` is past the end. Nothing
    /// is modified on error.
    pub fn insert(&mut self, text: &str, pos: usize) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.table.insert(text, pos)?;
        match self.options.line_index {
            LineIndexMode::Incremental => self.lines.apply_insert(pos, text),
            LineIndexMode::Rebuild => self.rebuild_lines(),
        }
        trace!(pos, lines = self.line_count(), "buffer insert");
        Ok(())
    }

    /// Remove `length` characters starting at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the range runs past the end.
    /// Nothing is modified on error.
    pub fn delete(&mut self, pos: usize, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        self.table.delete(pos, length)?;
        match self.options.line_index {
            LineIndexMode::Incremental => self.lines.apply_delete(pos, length),
            LineIndexMode::Rebuild => self.rebuild_lines(),
        }
        trace!(pos, length, lines = self.line_count(), "buffer delete");
        Ok(())
    }

    fn rebuild_lines(&mut self) {
        self.lines.rebuild(self.table.chunks().flatten().copied());
        debug!(
            len = self.len(),
            lines = self.line_count(),
            "rebuilt line index"
        );
    }

    const fn check_offset(&self, pos: usize) -> Result<()> {
        if pos > self.len() {
            return Err(BufferError::out_of_bounds(
                Coordinate::Offset,
                pos,
                self.len(),
            ));
        }
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("table", &self.table)
            .field("lines", &self.line_count())
            .field("options", &self.options)
            .finish()
    }
}

/// Iterator over the lines of a [`Buffer`], see [`Buffer::lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    buffer: &'a Buffer,
    next: usize,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.buffer.line_text(self.next).ok()?;
        self.next += 1;
        Some(text)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.line_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lines<'_> {}

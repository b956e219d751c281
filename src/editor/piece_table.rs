use std::ops::Range;

use tracing::{debug, trace};

use crate::error::{BufferError, Coordinate, Result};

/// Which backing store a piece points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Original,
    Added,
}

/// A run of `length` characters starting at `offset` in one backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece {
    pub(crate) source: Source,
    pub(crate) offset: usize,
    pub(crate) length: usize,
}

impl Piece {
    const fn new(source: Source, offset: usize, length: usize) -> Self {
        Self {
            source,
            offset,
            length,
        }
    }

    /// The single zero-length piece held by an empty document.
    const fn sentinel() -> Self {
        Self::new(Source::Original, 0, 0)
    }

    /// Store offset one past the last character of this piece.
    const fn end(&self) -> usize {
        self.offset + self.length
    }

    const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Text storage that never copies the document on edit.
///
/// The table keeps two backing stores: the immutable text the document was
/// created from and an append-only store of everything inserted since. The
/// document itself is the ordered sequence of pieces, each addressing a run in
/// one of the two stores. Edits only split, shrink or drop pieces.
///
/// Offsets and lengths are counted in `char`s.
///
/// # Example
///
/// ```
/// use piecebuf::PieceTable;
///
/// let mut table = PieceTable::new("abc");
/// table.insert("hi", 1).unwrap();
/// assert_eq!(table.as_text(), "ahibc");
///
/// table.delete(1, 2).unwrap();
/// assert_eq!(table.as_text(), "abc");
/// ```
#[derive(Clone)]
pub struct PieceTable {
    original: Box<[char]>,
    added: Vec<char>,
    // Never empty: an empty document holds one zero-length sentinel.
    pieces: Vec<Piece>,
    len: usize,
}

impl PieceTable {
    /// Create a table whose original store is `original`.
    pub fn new(original: &str) -> Self {
        let original: Box<[char]> = original.chars().collect();
        let len = original.len();
        Self {
            original,
            added: Vec::new(),
            pieces: vec![Piece::new(Source::Original, 0, len)],
            len,
        }
    }

    /// Document length in characters.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of pieces currently describing the document.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Materialize the whole document.
    ///
    /// This walks every piece; callers that only need line data should ask the
    /// line-indexed [`Buffer`](crate::Buffer) instead.
    pub fn as_text(&self) -> String {
        let mut text = String::with_capacity(self.len);
        for chunk in self.chunks() {
            text.extend(chunk);
        }
        text
    }

    /// Iterate over the runs of characters that make up the document, in order.
    pub fn chunks(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.pieces
            .iter()
            .filter(|piece| !piece.is_empty())
            .map(|piece| &self.store(piece.source)[piece.offset..piece.end()])
    }

    /// Text of the character range `range`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the range ends past the document
    /// or starts after it ends.
    pub fn slice(&self, range: Range<usize>) -> Result<String> {
        if range.end > self.len {
            return Err(BufferError::out_of_bounds(
                Coordinate::RangeEnd,
                range.end,
                self.len,
            ));
        }
        if range.start > range.end {
            return Err(BufferError::out_of_bounds(
                Coordinate::Offset,
                range.start,
                range.end,
            ));
        }

        let mut text = String::with_capacity(range.len());
        let mut pos = 0;
        for chunk in self.chunks() {
            let chunk_end = pos + chunk.len();
            if chunk_end > range.start && pos < range.end {
                let from = range.start.saturating_sub(pos);
                let to = (range.end - pos).min(chunk.len());
                text.extend(&chunk[from..to]);
            }
            if chunk_end >= range.end {
                break;
            }
            pos = chunk_end;
        }
        Ok(text)
    }

    /// Insert `text` at character `offset`.
    ///
    /// Typing at the end of the most recent insertion extends the last added
    /// piece in place, so a run of keystrokes costs one piece, not one each.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `offset` is past the end of the
    /// document. The table is left untouched on error.
    pub fn insert(&mut self, text: &str, offset: usize) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let (index, buf_offset) = self.locate(offset, Coordinate::Offset)?;

        let add_offset = self.added.len();
        self.added.extend(text.chars());
        let inserted = self.added.len() - add_offset;

        let piece = self.pieces[index];
        if piece.source == Source::Added && buf_offset == piece.end() && piece.end() == add_offset
        {
            self.pieces[index].length += inserted;
        } else {
            let head = buf_offset - piece.offset;
            let replacement = [
                Piece::new(piece.source, piece.offset, head),
                Piece::new(Source::Added, add_offset, inserted),
                Piece::new(piece.source, buf_offset, piece.length - head),
            ];
            self.pieces.splice(
                index..=index,
                replacement.into_iter().filter(|p| !p.is_empty()),
            );
        }
        self.len += inserted;

        trace!(
            offset,
            inserted,
            pieces = self.pieces.len(),
            "piece table insert"
        );
        Ok(())
    }

    /// Remove `length` characters starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the range extends past the end of
    /// the document. The table is left untouched on error.
    pub fn delete(&mut self, offset: usize, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }

        let end = offset
            .checked_add(length)
            .filter(|&end| end <= self.len)
            .ok_or_else(|| {
                BufferError::out_of_bounds(
                    Coordinate::RangeEnd,
                    offset.saturating_add(length),
                    self.len,
                )
            })?;

        let (first, first_buf) = self.locate(offset, Coordinate::Offset)?;
        let (last, last_buf) = self.locate(end, Coordinate::RangeEnd)?;

        if first == last && self.shrink_in_place(first, first_buf, last_buf, length) {
            self.len -= length;
            trace!(offset, length, pieces = self.pieces.len(), "piece table delete");
            return Ok(());
        }

        // Everything strictly between `first` and `last` is gone. A cut strictly
        // inside one piece lands here too and leaves two fragments.
        let left = self.pieces[first];
        let right = self.pieces[last];
        let fragments = [
            Piece::new(left.source, left.offset, first_buf - left.offset),
            Piece::new(right.source, last_buf, right.end() - last_buf),
        ];
        self.pieces
            .splice(first..=last, fragments.into_iter().filter(|p| !p.is_empty()));
        self.restore_sentinel();
        self.len -= length;

        trace!(offset, length, pieces = self.pieces.len(), "piece table delete");
        Ok(())
    }

    /// Delete a range touching the leading or trailing edge of one piece by
    /// adjusting that piece. Returns `false` for interior cuts.
    fn shrink_in_place(
        &mut self,
        index: usize,
        first_buf: usize,
        last_buf: usize,
        length: usize,
    ) -> bool {
        let piece = &mut self.pieces[index];
        if first_buf == piece.offset {
            piece.offset += length;
            piece.length -= length;
        } else if last_buf == piece.end() {
            piece.length -= length;
        } else {
            return false;
        }

        if piece.is_empty() {
            self.pieces.remove(index);
            self.restore_sentinel();
        }
        true
    }

    fn restore_sentinel(&mut self) {
        if self.pieces.is_empty() {
            debug!("document emptied, restoring sentinel piece");
            self.pieces.push(Piece::sentinel());
        }
    }

    /// Find the piece containing document `offset` and the store offset it maps
    /// to.
    ///
    /// An offset on the boundary between two pieces resolves to the earlier
    /// one. That is what lets a follow-up insert see the tail of the piece it
    /// may extend.
    fn locate(&self, offset: usize, what: Coordinate) -> Result<(usize, usize)> {
        let mut remaining = offset;
        for (index, piece) in self.pieces.iter().enumerate() {
            if remaining <= piece.length {
                return Ok((index, piece.offset + remaining));
            }
            remaining -= piece.length;
        }
        Err(BufferError::out_of_bounds(what, offset, self.len))
    }

    fn store(&self, source: Source) -> &[char] {
        match source {
            Source::Original => &self.original,
            Source::Added => &self.added,
        }
    }

    #[cfg(test)]
    pub(crate) fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceTable")
            .field("len", &self.len)
            .field("pieces", &self.pieces.len())
            .field("original", &format_args!("{} chars", self.original.len()))
            .field("added", &format_args!("{} chars", self.added.len()))
            .finish()
    }
}

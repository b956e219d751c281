//! Text storage for the editor.
//!
//! A [`PieceTable`] holds the document without copying it on edit, and a
//! [`Buffer`] wraps one with a [`LineIndex`] for line/column queries.

mod buffer;
mod line_index;
mod piece_table;

#[cfg(test)]
mod testing;

pub use buffer::{Buffer, BufferOptions, LineIndexMode, Lines};
pub use line_index::LineIndex;
pub use piece_table::PieceTable;

#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. error::BufferError)
    clippy::module_name_repetitions
)]

//! # piecebuf
//!
//! A text buffer for editors: a piece table for storage, with a line-start
//! index on top for line/column queries.
//!
//! - Inserts and deletes never copy the document. Inserted text goes into an
//!   append-only store and the document is a list of pieces pointing into it
//!   and into the original text.
//! - Typing at the end of the previous insertion extends a piece in place.
//! - The line index is exact after every edit; offset → line lookups are a
//!   binary search.
//!
//! Positions are character offsets (Unicode scalar values), not bytes.
//!
//! ## Modules
//!
//! - [`editor`]: [`PieceTable`], [`LineIndex`] and the line-indexed [`Buffer`]
//! - [`error`]: the out-of-bounds error returned by every fallible operation
//! - [`script`]: edit scripts applied by the command-line driver
//! - [`config`]: saved defaults for the command-line driver
//! - [`perf`]: opt-in timing scopes

pub mod config;
pub mod editor;
pub mod error;
pub mod perf;
pub mod script;

pub use editor::{Buffer, BufferOptions, LineIndex, LineIndexMode, PieceTable};
pub use error::{BufferError, Coordinate, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{Buffer, BufferOptions, LineIndexMode, PieceTable};
    pub use crate::error::{BufferError, Result};
}

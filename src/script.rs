//! Edit scripts for the command-line driver.
//!
//! Each operation is one token: `insert:<POS>:<TEXT>` or `delete:<POS>:<LEN>`.
//! `TEXT` may contain `\n`, `\t` and `\\` escapes; everything after the second
//! colon is text, so it may contain colons itself.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::editor::Buffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { pos: usize, text: String },
    Delete { pos: usize, len: usize },
}

impl EditOp {
    /// Apply this operation to `buffer`.
    ///
    /// # Errors
    ///
    /// Fails if the operation falls outside the buffer.
    pub fn apply(&self, buffer: &mut Buffer) -> Result<()> {
        match self {
            Self::Insert { pos, text } => buffer.insert(text, *pos)?,
            Self::Delete { pos, len } => buffer.delete(*pos, *len)?,
        }
        Ok(())
    }
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let pos = parts
            .next()
            .ok_or_else(|| anyhow!("missing position in `{s}`"))?;
        let pos: usize = pos
            .parse()
            .with_context(|| format!("invalid position `{pos}` in `{s}`"))?;
        let arg = parts
            .next()
            .ok_or_else(|| anyhow!("missing argument in `{s}`"))?;

        match kind {
            "insert" | "i" => Ok(Self::Insert {
                pos,
                text: unescape(arg),
            }),
            "delete" | "d" => {
                let len: usize = arg
                    .parse()
                    .with_context(|| format!("invalid length `{arg}` in `{s}`"))?;
                Ok(Self::Delete { pos, len })
            }
            other => bail!("unknown edit `{other}` (expected insert or delete)"),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { pos, text } => {
                write!(f, "insert {} chars at {pos}", text.chars().count())
            }
            Self::Delete { pos, len } => write!(f, "delete {len} chars at {pos}"),
        }
    }
}

/// Parse every token, failing on the first bad one.
///
/// # Errors
///
/// Fails with the position and content of the first unparseable token.
pub fn parse_script(tokens: &[String]) -> Result<Vec<EditOp>> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<EditOp>()
                .with_context(|| format!("edit #{} could not be parsed", i + 1))
        })
        .collect()
}

/// Apply `ops` in order.
///
/// # Errors
///
/// Stops at the first failing operation and names it. Earlier operations stay
/// applied; the caller decides whether to discard the buffer.
pub fn apply_script(buffer: &mut Buffer, ops: &[EditOp]) -> Result<()> {
    for (i, op) in ops.iter().enumerate() {
        op.apply(buffer)
            .with_context(|| format!("edit #{} ({op}) failed", i + 1))?;
    }
    Ok(())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

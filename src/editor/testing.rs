//! Shared helpers for property tests: random edit scripts and a naive model.

use proptest::prelude::*;

#[derive(Debug, Clone)]
pub enum Edit {
    Insert { at: usize, text: String },
    Delete { at: usize, len: usize },
}

impl Edit {
    /// Map raw generated positions onto a document of `doc_len` chars so the
    /// edit is always valid.
    pub fn clamped(&self, doc_len: usize) -> Self {
        match self {
            Self::Insert { at, text } => Self::Insert {
                at: at % (doc_len + 1),
                text: text.clone(),
            },
            Self::Delete { at, len } => {
                let at = at % (doc_len + 1);
                Self::Delete {
                    at,
                    len: (*len).min(doc_len - at),
                }
            }
        }
    }
}

pub fn edits() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (any::<usize>(), "[a-cé世\n]{0,8}").prop_map(|(at, text)| Edit::Insert { at, text }),
        (any::<usize>(), 0..8usize).prop_map(|(at, len)| Edit::Delete { at, len }),
    ]
}

/// Apply an already clamped edit to a plain `Vec<char>`.
pub fn apply_naive(model: &mut Vec<char>, edit: &Edit) {
    match edit {
        Edit::Insert { at, text } => {
            model.splice(*at..*at, text.chars());
        }
        Edit::Delete { at, len } => {
            model.drain(*at..*at + *len);
        }
    }
}

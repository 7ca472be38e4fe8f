//! Capabilities the panel consumes from its surroundings: the language-server
//! side (`PropertyProvider`) and the editor that owns the document (`EditorHost`).

use crate::model::{Position, TextRange};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("unknown document: {0}")]
    UnknownDocument(String),
    #[error("range {start:?}..{end:?} is outside of {uri}")]
    InvalidRange {
        uri: String,
        start: Position,
        end: Position,
    },
    #[error("host unavailable: {0}")]
    Unavailable(String),
}

impl HostError {
    pub fn invalid_range(range: &TextRange) -> Self {
        HostError::InvalidRange {
            uri: range.uri.clone(),
            start: range.start,
            end: range.end,
        }
    }
}

pub trait PropertyProvider {
    /// Maps a binding's definition position to the range of its expression text.
    fn expression_range(&self, uri: &str, defined_at: Position) -> Option<TextRange>;

    /// Current source text of the binding defined at `defined_at`.
    fn binding_text(&self, uri: &str, defined_at: Position) -> Result<String, HostError>;
}

pub trait EditorHost {
    fn goto_position(&mut self, uri: &str, range: &TextRange) -> Result<(), HostError>;

    /// Replaces `range` with `new_text` if and only if `validator` accepts the
    /// text currently at `range`. Checking and applying must not interleave with
    /// any other write. Returns `Ok(false)` when the validator rejected the edit.
    fn replace_text(
        &mut self,
        uri: &str,
        range: &TextRange,
        new_text: &str,
        validator: &dyn Fn(&str) -> bool,
    ) -> Result<bool, HostError>;
}

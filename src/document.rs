use crate::host::{EditorHost, HostError, PropertyProvider};
use crate::model::{Position, TextRange};
use anyhow::Context;
use indexmap::IndexMap;
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct Document {
    text: String,
    revision: u64,
}

/// In-memory documents acting as both the language-server side and the
/// editor host. Edits happen under `&mut self`, so the validator check and the
/// replacement can never interleave with another write.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: IndexMap<String, Document>,
    last_navigation: Option<TextRange>,
    navigation_count: usize,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or replaces) a document. Replacing counts as a change.
    pub fn open(&mut self, uri: impl Into<String>, text: impl Into<String>) {
        let uri = uri.into();
        let text = text.into();
        match self.documents.get_mut(&uri) {
            Some(doc) => {
                doc.text = text;
                doc.revision += 1;
            }
            None => {
                self.documents.insert(uri, Document { text, revision: 0 });
            }
        }
    }

    /// Reads `path` and opens it under `uri`.
    pub fn load_path(&mut self, uri: impl Into<String>, path: &Path) -> anyhow::Result<()> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        self.open(uri, text);
        Ok(())
    }

    pub fn text(&self, uri: &str) -> Option<&str> {
        self.documents.get(uri).map(|d| d.text.as_str())
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Bumped on every change to the document.
    pub fn revision(&self, uri: &str) -> Option<u64> {
        self.documents.get(uri).map(|d| d.revision)
    }

    pub fn last_navigation(&self) -> Option<&TextRange> {
        self.last_navigation.as_ref()
    }

    pub fn navigation_count(&self) -> usize {
        self.navigation_count
    }

    /// Text currently covered by `range`.
    pub fn slice(&self, range: &TextRange) -> Option<&str> {
        let text = self.text(&range.uri)?;
        let (start, end) = byte_span(text, range)?;
        Some(&text[start..end])
    }

    fn document(&self, uri: &str) -> Result<&Document, HostError> {
        self.documents
            .get(uri)
            .ok_or_else(|| HostError::UnknownDocument(uri.to_string()))
    }
}

impl PropertyProvider for DocumentStore {
    fn expression_range(&self, uri: &str, defined_at: Position) -> Option<TextRange> {
        let text = self.text(uri)?;
        let from = offset_of(text, defined_at)?;
        let (start, end) = scan_binding_expression(text, from)?;
        Some(TextRange::new(
            uri,
            position_of(text, start),
            position_of(text, end),
        ))
    }

    fn binding_text(&self, uri: &str, defined_at: Position) -> Result<String, HostError> {
        let doc = self.document(uri)?;
        let range = self
            .expression_range(uri, defined_at)
            .ok_or_else(|| HostError::invalid_range(&TextRange::new(uri, defined_at, defined_at)))?;
        let (start, end) =
            byte_span(&doc.text, &range).ok_or_else(|| HostError::invalid_range(&range))?;
        Ok(doc.text[start..end].to_string())
    }
}

impl EditorHost for DocumentStore {
    fn goto_position(&mut self, uri: &str, range: &TextRange) -> Result<(), HostError> {
        let doc = self.document(uri)?;
        if byte_span(&doc.text, range).is_none() {
            return Err(HostError::invalid_range(range));
        }
        self.last_navigation = Some(range.clone());
        self.navigation_count += 1;
        Ok(())
    }

    fn replace_text(
        &mut self,
        uri: &str,
        range: &TextRange,
        new_text: &str,
        validator: &dyn Fn(&str) -> bool,
    ) -> Result<bool, HostError> {
        let doc = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| HostError::UnknownDocument(uri.to_string()))?;
        let (start, end) =
            byte_span(&doc.text, range).ok_or_else(|| HostError::invalid_range(range))?;

        if !validator(&doc.text[start..end]) {
            debug!(uri, ?range, "validator rejected replacement");
            return Ok(false);
        }
        doc.text.replace_range(start..end, new_text);
        doc.revision += 1;
        Ok(true)
    }
}

fn byte_span(text: &str, range: &TextRange) -> Option<(usize, usize)> {
    let start = offset_of(text, range.start)?;
    let end = offset_of(text, range.end)?;
    (start <= end).then_some((start, end))
}

/// Byte offset of `position`. A character past the end of its line clamps to
/// the line end; a line past the end of the text yields `None`.
pub fn offset_of(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0usize;
    for _ in 0..position.line {
        let nl = text[line_start..].find('\n')?;
        line_start += nl + 1;
    }

    let line = &text[line_start..];
    let line_len = line.find('\n').unwrap_or(line.len());
    let line = line[..line_len].strip_suffix('\r').unwrap_or(&line[..line_len]);

    let mut units = 0u32;
    for (i, c) in line.char_indices() {
        if units >= position.character {
            return Some(line_start + i);
        }
        units += c.len_utf16() as u32;
    }
    Some(line_start + line.len())
}

/// Inverse of [`offset_of`] for offsets on a char boundary.
pub fn position_of(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let character = before[line_start..]
        .chars()
        .map(|c| c.len_utf16() as u32)
        .sum();
    Position { line, character }
}

/// Finds the expression of the binding starting at `from` (`name: expr;` or
/// `name => { ... }`). Returns its byte span without surrounding whitespace.
/// Brackets, quotes and semicolons inside string literals or `//` and `/* */`
/// comments do not count.
fn scan_binding_expression(text: &str, from: usize) -> Option<(usize, usize)> {
    let rest = &text[from..];
    let sep = rest.find([':', '=', ';', '\n'])?;
    let after_sep = match rest[sep..].as_bytes() {
        [b':', ..] => sep + 1,
        [b'=', b'>', ..] => sep + 2,
        _ => return None,
    };

    let body = &text[from + after_sep..];
    let lead = body.len() - body.trim_start().len();
    let start = from + after_sep + lead;

    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = start;
    let braced = bytes.get(start) == Some(&b'{');

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        match (b, bytes.get(i + 1)) {
            (b'/', Some(b'/')) => {
                i = text[i..].find('\n').map_or(bytes.len(), |nl| i + nl);
                continue;
            }
            (b'/', Some(b'*')) => {
                i = text[i + 2..].find("*/").map_or(bytes.len(), |c| i + 2 + c + 2);
                continue;
            }
            _ => {}
        }
        match b {
            b'"' => in_string = true,
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if braced && depth == 0 {
                    i += 1;
                    break;
                }
            }
            b';' if depth == 0 => break,
            _ => {}
        }
        i += 1;
    }

    let end = start + text[start..i].trim_end().len();
    Some((start, end))
}

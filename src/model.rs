use serde::Deserialize;

/// A zero-based location in a document. `character` counts UTF-16 code units,
/// matching what the language server reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span `[start, end)` inside the document named by `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextRange {
    pub uri: String,
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(uri: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            uri: uri.into(),
            start,
            end,
        }
    }
}

/// The node currently inspected. Replaced wholesale on selection change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub type_name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub group: String,
    pub type_name: String,
    /// Absent for built-in properties.
    #[serde(default)]
    pub declared_at: Option<Position>,
    /// Absent when there is no binding expression; such a field is read-only.
    #[serde(default)]
    pub defined_at: Option<Position>,
}

impl Property {
    pub fn is_builtin(&self) -> bool {
        self.declared_at.is_none()
    }

    pub fn is_defined(&self) -> bool {
        self.defined_at.is_some()
    }
}

/// Everything the language server knows about the current selection.
/// `properties` are expected to be grouped contiguously by `group`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub properties: Vec<Property>,
    pub source_uri: String,
}

impl PropertyQuery {
    pub fn parse_json5(text: &str) -> anyhow::Result<PropertyQuery> {
        Ok(json5::from_str::<PropertyQuery>(text)?)
    }
}

//! View model of the property inspector.
//!
//! `PropertyPanel::set_properties` turns a `PropertyQuery` into header and
//! property rows, capturing for every editable row the expression range and the
//! binding text it had at render time (the baseline). Edits are written back
//! only through `EditorHost::replace_text` with a validator that insists the
//! document still holds the baseline at that range, so a commit racing a
//! concurrent document change is dropped instead of clobbering it.

use crate::category::{DisplayCategory, classify};
use crate::host::{EditorHost, PropertyProvider};
use crate::model::{Element, Position, Property, PropertyQuery, TextRange};
use crate::statics;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelHeader {
    pub type_label: String,
    pub id: String,
}

impl PanelHeader {
    fn for_element(element: Option<&Element>) -> Self {
        match element {
            Some(element) => Self {
                type_label: element.type_name.clone(),
                id: element.id.clone(),
            },
            None => Self {
                type_label: statics::EN_UNKNOWN_ELEMENT.to_string(),
                id: String::new(),
            },
        }
    }
}

/// Style markers applied to a property row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStyle {
    /// The property is not declared on this element.
    pub builtin: bool,
    /// The property has no binding expression.
    pub undefined: bool,
}

/// Edit state of one editable row, owned by the render pass that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditState {
    range: TextRange,
    baseline: String,
    text: String,
    changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub name: String,
    pub group: String,
    pub type_name: String,
    pub category: DisplayCategory,
    pub style: RowStyle,
    pub defined_at: Option<Position>,
    edit: Option<EditState>,
}

impl PropertyRow {
    fn build(provider: &dyn PropertyProvider, uri: &str, property: &Property) -> Self {
        let edit = property
            .defined_at
            .and_then(|defined_at| capture_edit_state(provider, uri, &property.name, defined_at));

        Self {
            name: property.name.clone(),
            group: property.group.clone(),
            type_name: property.type_name.clone(),
            category: classify(&property.type_name),
            style: RowStyle {
                builtin: property.is_builtin(),
                undefined: !property.is_defined(),
            },
            defined_at: property.defined_at,
            edit,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.edit.is_some()
    }

    /// Current input text; empty for read-only rows.
    pub fn text(&self) -> &str {
        self.edit.as_ref().map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn baseline(&self) -> Option<&str> {
        self.edit.as_ref().map(|e| e.baseline.as_str())
    }

    pub fn range(&self) -> Option<&TextRange> {
        self.edit.as_ref().map(|e| &e.range)
    }

    pub fn is_changed(&self) -> bool {
        self.edit.as_ref().is_some_and(|e| e.changed)
    }

    pub fn tooltip(&self) -> String {
        format!("{} {}", statics::EN_TOOLTIP_TYPE, self.type_name)
    }

    /// Style markers in their textual form, for front ends that style by tag.
    pub fn style_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.style.builtin {
            tags.push(statics::STYLE_BUILTIN);
        }
        if self.style.undefined {
            tags.push(statics::STYLE_UNDEFINED);
        }
        if self.is_changed() {
            tags.push(statics::STYLE_CHANGED);
        }
        tags
    }
}

fn capture_edit_state(
    provider: &dyn PropertyProvider,
    uri: &str,
    name: &str,
    defined_at: Position,
) -> Option<EditState> {
    let Some(range) = provider.expression_range(uri, defined_at) else {
        debug!(property = name, ?defined_at, "no expression range; field is read-only");
        return None;
    };
    let baseline = match provider.binding_text(uri, defined_at) {
        Ok(text) => text,
        Err(err) => {
            warn!(property = name, %err, "reading binding text failed; field is read-only");
            return None;
        }
    };
    Some(EditState {
        range,
        text: baseline.clone(),
        baseline,
        changed: false,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    /// Section header spanning both columns.
    Group(String),
    Property(PropertyRow),
}

impl PanelRow {
    pub fn as_property(&self) -> Option<&PropertyRow> {
        match self {
            PanelRow::Property(row) => Some(row),
            PanelRow::Group(_) => None,
        }
    }

    fn as_property_mut(&mut self) -> Option<&mut PropertyRow> {
        match self {
            PanelRow::Property(row) => Some(row),
            PanelRow::Group(_) => None,
        }
    }
}

/// Result of a commit. Callers may log it; it is never shown to the user,
/// since a rejected edit is superseded by the next refresh anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No binding to write to.
    ReadOnly,
    /// Input equals the baseline; nothing was written.
    Unchanged,
    Applied,
    /// The document changed since render time, or the host failed.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// This focus was caused by a navigation that just completed.
    Suppressed,
    /// Navigation was attempted; the caller should give focus back to the field.
    Navigated,
}

#[derive(Debug, Default)]
pub struct PropertyPanel {
    header: PanelHeader,
    rows: Vec<PanelRow>,
    source_uri: String,
    /// Set while a focus-triggered navigation is in flight.
    navigating: bool,
}

impl PropertyPanel {
    pub fn new() -> Self {
        Self {
            header: PanelHeader::for_element(None),
            ..Default::default()
        }
    }

    /// Rebuilds the whole view from `query`. Any row state from a previous call
    /// is discarded.
    pub fn set_properties(&mut self, provider: &dyn PropertyProvider, query: &PropertyQuery) {
        self.header = PanelHeader::for_element(query.element.as_ref());
        self.source_uri = query.source_uri.clone();
        self.rows.clear();

        if query.element.is_none() {
            debug!(uri = %self.source_uri, "no element selected");
            return;
        }

        let mut current_group: Option<&str> = None;
        for property in &query.properties {
            if current_group != Some(property.group.as_str()) {
                self.rows.push(PanelRow::Group(property.group.clone()));
                current_group = Some(property.group.as_str());
            }
            self.rows.push(PanelRow::Property(PropertyRow::build(
                provider,
                &self.source_uri,
                property,
            )));
        }

        debug!(
            uri = %self.source_uri,
            element = %self.header.type_label,
            rows = self.rows.len(),
            "rendered properties"
        );
    }

    pub fn header(&self) -> &PanelHeader {
        &self.header
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&PropertyRow> {
        self.rows.get(index).and_then(PanelRow::as_property)
    }

    /// Index of the first row named `name`.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.as_property().is_some_and(|p| p.name == name))
    }

    pub fn group_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, PanelRow::Group(_)))
            .count()
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Records the new input text and returns whether it now differs from the
    /// baseline. Read-only rows ignore input.
    pub fn on_input(&mut self, index: usize, text: &str) -> bool {
        let Some(edit) = self.edit_state_mut(index) else {
            return false;
        };
        edit.text.clear();
        edit.text.push_str(text);
        edit.changed = edit.text != edit.baseline;
        edit.changed
    }

    /// Writes the row's current text back to the document, guarded by the
    /// baseline captured at render time.
    pub fn on_commit(&mut self, host: &mut dyn EditorHost, index: usize) -> CommitOutcome {
        let uri = self.source_uri.clone();
        let Some(edit) = self.edit_state_mut(index) else {
            return CommitOutcome::ReadOnly;
        };
        if edit.text == edit.baseline {
            return CommitOutcome::Unchanged;
        }

        let baseline = edit.baseline.as_str();
        let validator = |old_text: &str| old_text == baseline;
        match host.replace_text(&uri, &edit.range, &edit.text, &validator) {
            Ok(true) => {
                debug!(%uri, range = ?edit.range, "binding updated");
                CommitOutcome::Applied
            }
            Ok(false) => {
                debug!(%uri, range = ?edit.range, "document changed since render; edit dropped");
                CommitOutcome::Rejected
            }
            Err(err) => {
                warn!(%uri, %err, "replacing binding text failed; edit dropped");
                CommitOutcome::Rejected
            }
        }
    }

    /// Jumps to the row's binding expression. Returns false when there is
    /// nothing to jump to or the host refused.
    pub fn on_navigate(&self, host: &mut dyn EditorHost, index: usize) -> bool {
        let Some(range) = self.row(index).and_then(PropertyRow::range) else {
            return false;
        };
        match host.goto_position(&self.source_uri, range) {
            Ok(()) => {
                debug!(uri = %self.source_uri, ?range, "navigated to binding");
                true
            }
            Err(err) => {
                warn!(uri = %self.source_uri, %err, "navigation failed");
                false
            }
        }
    }

    /// Focusing a field navigates to its binding. Navigation may pull focus
    /// into the editor, after which the caller hands focus back to the field;
    /// that second focus event must not navigate again.
    pub fn on_focus(&mut self, host: &mut dyn EditorHost, index: usize) -> FocusOutcome {
        if self.navigating {
            self.navigating = false;
            debug!(row = index, "focus from navigation ignored");
            return FocusOutcome::Suppressed;
        }
        self.navigating = true;
        self.on_navigate(host, index);
        FocusOutcome::Navigated
    }

    fn edit_state_mut(&mut self, index: usize) -> Option<&mut EditState> {
        self.rows
            .get_mut(index)
            .and_then(PanelRow::as_property_mut)
            .and_then(|row| row.edit.as_mut())
    }
}

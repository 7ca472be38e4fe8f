use pretty_assertions::assert_eq;

use propsync::{
    CommitOutcome, DocumentStore, EditorHost, Element, HostError, Position, Property,
    PropertyPanel, PropertyProvider, PropertyQuery, TextRange,
};

const URI: &str = "doc1";

/// Serves a fixed binding text for every definition and records writes. The
/// validator of each write is probed right away against a few candidate texts.
#[derive(Default)]
struct RecordingHost {
    binding: String,
    writes: Vec<RecordedWrite>,
    result: Option<Result<bool, HostError>>,
    navigations: usize,
}

#[derive(Debug, PartialEq)]
struct RecordedWrite {
    range: TextRange,
    new_text: String,
    accepts_binding: bool,
    accepts_new_text: bool,
    accepts_empty: bool,
}

impl RecordingHost {
    fn with_binding(binding: &str) -> Self {
        Self {
            binding: binding.to_string(),
            ..Default::default()
        }
    }

    fn range_for(at: Position) -> TextRange {
        TextRange::new(URI, at, Position::new(at.line, at.character + 10))
    }
}

impl PropertyProvider for RecordingHost {
    fn expression_range(&self, _uri: &str, defined_at: Position) -> Option<TextRange> {
        Some(Self::range_for(defined_at))
    }

    fn binding_text(&self, _uri: &str, _defined_at: Position) -> Result<String, HostError> {
        Ok(self.binding.clone())
    }
}

impl EditorHost for RecordingHost {
    fn goto_position(&mut self, _uri: &str, _range: &TextRange) -> Result<(), HostError> {
        self.navigations += 1;
        Ok(())
    }

    fn replace_text(
        &mut self,
        _uri: &str,
        range: &TextRange,
        new_text: &str,
        validator: &dyn Fn(&str) -> bool,
    ) -> Result<bool, HostError> {
        self.writes.push(RecordedWrite {
            range: range.clone(),
            new_text: new_text.to_string(),
            accepts_binding: validator(&self.binding),
            accepts_new_text: validator(new_text),
            accepts_empty: validator(""),
        });
        self.result.clone().unwrap_or(Ok(true))
    }
}

fn single_property_query(defined_at: Option<Position>) -> PropertyQuery {
    PropertyQuery {
        element: Some(Element {
            type_name: "Rectangle".to_string(),
            id: "rect1".to_string(),
        }),
        properties: vec![Property {
            name: "width".to_string(),
            group: "geometry".to_string(),
            type_name: "length".to_string(),
            declared_at: Some(Position::new(0, 0)),
            defined_at,
        }],
        source_uri: URI.to_string(),
    }
}

fn rendered(host: &RecordingHost, defined_at: Option<Position>) -> (PropertyPanel, usize) {
    let mut panel = PropertyPanel::new();
    panel.set_properties(host, &single_property_query(defined_at));
    let index = panel.find_row("width").expect("width row");
    (panel, index)
}

#[test]
fn changed_marker_tracks_every_keystroke() {
    let host = RecordingHost::with_binding("40px");
    let (mut panel, index) = rendered(&host, Some(Position::new(2, 8)));

    let keystrokes = ["40p", "40", "4", "", "5", "50", "40", "40p", "40px", "40pxx", "40px"];
    let expected = [true, true, true, true, true, true, true, true, false, true, false];
    for (text, want) in keystrokes.iter().zip(expected) {
        assert_eq!(panel.on_input(index, text), want, "after typing {text:?}");
        assert_eq!(panel.row(index).expect("row").is_changed(), want);
    }
}

#[test]
fn commit_without_change_writes_nothing() {
    let mut host = RecordingHost::with_binding("40px");
    let (mut panel, index) = rendered(&host, Some(Position::new(2, 8)));

    assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::Unchanged);

    // Typing away and back again is still no change.
    panel.on_input(index, "41px");
    panel.on_input(index, "40px");
    assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::Unchanged);
    assert!(host.writes.is_empty());
}

#[test]
fn commit_with_change_writes_once_with_baseline_validator() {
    let mut host = RecordingHost::with_binding("40px");
    let at = Position::new(2, 8);
    let (mut panel, index) = rendered(&host, Some(at));

    panel.on_input(index, "64px");
    assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::Applied);

    assert_eq!(
        host.writes,
        vec![RecordedWrite {
            range: RecordingHost::range_for(at),
            new_text: "64px".to_string(),
            accepts_binding: true,
            accepts_new_text: false,
            accepts_empty: false,
        }]
    );
}

#[test]
fn undefined_field_never_commits() {
    let mut host = RecordingHost::with_binding("40px");
    let (mut panel, index) = rendered(&host, None);

    let row = panel.row(index).expect("row");
    assert!(!row.is_editable());

    for text in ["", "1px", "anything"] {
        assert!(!panel.on_input(index, text));
        assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::ReadOnly);
    }
    assert!(!panel.on_navigate(&mut host, index));
    assert!(host.writes.is_empty());
    assert_eq!(host.navigations, 0);
}

#[test]
fn group_rows_ignore_edit_events() {
    let mut host = RecordingHost::with_binding("40px");
    let (mut panel, _) = rendered(&host, Some(Position::new(2, 8)));

    // Row 0 is the "geometry" header.
    assert!(!panel.on_input(0, "x"));
    assert_eq!(panel.on_commit(&mut host, 0), CommitOutcome::ReadOnly);
    assert_eq!(panel.on_commit(&mut host, 99), CommitOutcome::ReadOnly);
    assert!(host.writes.is_empty());
}

#[test]
fn host_rejection_and_failure_are_swallowed() {
    let mut host = RecordingHost::with_binding("40px");
    let (mut panel, index) = rendered(&host, Some(Position::new(2, 8)));
    panel.on_input(index, "1px");

    host.result = Some(Ok(false));
    assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::Rejected);

    host.result = Some(Err(HostError::Unavailable("editor closed".to_string())));
    assert_eq!(panel.on_commit(&mut host, index), CommitOutcome::Rejected);

    // The field keeps its input and stays interactive.
    assert_eq!(host.writes.len(), 2);
    let row = panel.row(index).expect("row");
    assert_eq!(row.text(), "1px");
    assert!(row.is_changed());
}

#[test]
fn stale_commit_leaves_concurrently_edited_document_alone() {
    let mut store = DocumentStore::new();
    store.open(URI, "Rectangle {\n    width: 40px;\n}\n");
    let at = Position::new(1, 4);

    let mut panel = PropertyPanel::new();
    panel.set_properties(&store, &single_property_query(Some(at)));
    let index = panel.find_row("width").expect("width row");
    panel.on_input(index, "80px");

    // Someone else edits the binding between render and commit.
    store.open(URI, "Rectangle {\n    width: 55px;\n}\n");
    assert_eq!(panel.on_commit(&mut store, index), CommitOutcome::Rejected);
    assert_eq!(store.text(URI), Some("Rectangle {\n    width: 55px;\n}\n"));

    // The next refresh re-baselines from the new text, and the edit goes through.
    panel.set_properties(&store, &single_property_query(Some(at)));
    assert_eq!(panel.row(index).expect("row").text(), "55px");
    panel.on_input(index, "80px");
    assert_eq!(panel.on_commit(&mut store, index), CommitOutcome::Applied);
    assert_eq!(store.text(URI), Some("Rectangle {\n    width: 80px;\n}\n"));
}

#[test]
fn commit_to_closed_document_is_not_applied() {
    let mut store = DocumentStore::new();
    store.open(URI, "width: 1px;\n");

    let mut panel = PropertyPanel::new();
    panel.set_properties(&store, &single_property_query(Some(Position::new(0, 0))));
    let index = panel.find_row("width").expect("width row");
    panel.on_input(index, "2px");

    let mut other = DocumentStore::new();
    other.open("elsewhere", "width: 1px;\n");
    assert_eq!(panel.on_commit(&mut other, index), CommitOutcome::Rejected);
    assert_eq!(other.text("elsewhere"), Some("width: 1px;\n"));
}

#[test]
fn commit_on_commented_callback_keeps_following_binding() {
    let source = "clicked => {\n    // say \"hi\n    foo();\n}\nwidth: 1px;\n";
    let mut store = DocumentStore::new();
    store.open(URI, source);

    let mut panel = PropertyPanel::new();
    panel.set_properties(&store, &single_property_query(Some(Position::new(0, 0))));
    let index = panel.find_row("width").expect("row");
    assert_eq!(
        panel.row(index).expect("row").text(),
        "{\n    // say \"hi\n    foo();\n}"
    );

    panel.on_input(index, "{ bar(); }");
    assert_eq!(panel.on_commit(&mut store, index), CommitOutcome::Applied);
    assert_eq!(store.text(URI), Some("clicked => { bar(); }\nwidth: 1px;\n"));
}

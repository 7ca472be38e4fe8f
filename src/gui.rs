use crate::document::DocumentStore;
use crate::panel::{CommitOutcome, FocusOutcome, PanelRow, PropertyPanel, PropertyRow};
use crate::scenario::Scenario;
use crate::statics;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use tracing::info;

pub fn run_gui(scenario: Scenario, dark: bool) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(statics::WINDOW_SIZE),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(InspectorApp::new(scenario, dark)))
        }),
    )
}

/// Focus moves through these steps after a focus-triggered navigation:
/// the source view takes focus for one frame, then the field gets it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum FocusHandoff {
    #[default]
    Idle,
    ToSource(usize),
    ToField(usize),
}

/// Demo shell: the source document on the left, the property panel on the right.
/// The store stands in for both the language server and the editor.
struct InspectorApp {
    scenario: Scenario,
    store: DocumentStore,
    panel: PropertyPanel,
    rendered_revision: Option<u64>,
    source_buffer: String,
    handoff: FocusHandoff,
    status: String,
    theme_dark: bool,
}

impl InspectorApp {
    fn new(scenario: Scenario, theme_dark: bool) -> Self {
        let mut store = DocumentStore::new();
        store.open(scenario.uri.clone(), scenario.source.clone());
        Self {
            source_buffer: scenario.source.clone(),
            scenario,
            store,
            panel: PropertyPanel::new(),
            rendered_revision: None,
            handoff: FocusHandoff::Idle,
            status: String::new(),
            theme_dark,
        }
    }

    fn source_id() -> egui::Id {
        egui::Id::new("source_view")
    }

    fn field_id(index: usize) -> egui::Id {
        egui::Id::new(("property_field", index))
    }

    /// Re-query whenever the document changed, like the language server would.
    fn refresh_if_changed(&mut self) {
        let revision = self.store.revision(&self.scenario.uri);
        if revision == self.rendered_revision {
            return;
        }
        self.panel.set_properties(&self.store, &self.scenario.query);
        if let Some(text) = self.store.text(&self.scenario.uri) {
            self.source_buffer = text.to_string();
        }
        self.rendered_revision = revision;
    }

    fn note_navigation(&mut self) {
        if let Some(range) = self.store.last_navigation() {
            self.status = format!(
                "{} {}:{}",
                statics::EN_STATUS_NAVIGATED,
                range.start.line + 1,
                range.start.character + 1
            );
        }
    }

    fn render_source_panel(&mut self, ui: &mut egui::Ui, pending: FocusHandoff) {
        ui.heading(statics::EN_HEADING_SOURCE);
        ui.label(self.scenario.uri.as_str());
        ui.separator();

        if let FocusHandoff::ToSource(index) = pending {
            ui.memory_mut(|m| m.request_focus(Self::source_id()));
            self.handoff = FocusHandoff::ToField(index);
            ui.ctx().request_repaint();
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            let editor = egui::TextEdit::multiline(&mut self.source_buffer)
                .id(Self::source_id())
                .code_editor()
                .desired_width(f32::INFINITY);
            let resp = ui.add(editor);
            if resp.changed() {
                // A direct edit races any pending field commit; the validator sorts it out.
                self.store
                    .open(self.scenario.uri.clone(), self.source_buffer.clone());
            }
        });
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let header = self.panel.header();
        ui.horizontal(|ui| {
            ui.heading(header.type_label.as_str());
            if !header.id.is_empty() {
                ui.label(statics::EN_LABEL_ID);
                ui.monospace(header.id.as_str());
            }
        });
    }

    fn name_text(row: &PropertyRow) -> egui::RichText {
        let mut text = egui::RichText::new(&row.name);
        if row.style.builtin {
            text = text.italics();
        }
        if row.style.undefined {
            text = text.weak();
        }
        if row.is_changed() {
            text = text.strong();
        }
        text
    }

    fn render_property_row(
        &mut self,
        ui_row: &mut egui_extras::TableRow<'_, '_>,
        index: usize,
        row: &PropertyRow,
        pending: FocusHandoff,
    ) {
        let tooltip = row.tooltip();

        ui_row.col(|ui| {
            let resp = ui
                .add(egui::Label::new(Self::name_text(row)).sense(egui::Sense::click()))
                .on_hover_text(tooltip.as_str());
            if resp.clicked() && self.panel.on_navigate(&mut self.store, index) {
                self.note_navigation();
            }
        });

        ui_row.col(|ui| {
            let field_id = Self::field_id(index);
            if pending == FocusHandoff::ToField(index) {
                ui.memory_mut(|m| m.request_focus(field_id));
            }

            let mut buffer = row.text().to_string();
            let mut edit = egui::TextEdit::singleline(&mut buffer)
                .id(field_id)
                .desired_width(f32::INFINITY);
            if !row.is_editable() {
                edit = edit.hint_text(statics::EN_HINT_NO_BINDING);
            }
            if row.is_changed() {
                edit = edit.text_color(ui.visuals().warn_fg_color);
            }
            let resp = ui
                .add_enabled(row.is_editable(), edit)
                .on_hover_text(tooltip.as_str());

            if resp.changed() {
                self.panel.on_input(index, &buffer);
            }
            if resp.gained_focus()
                && self.panel.on_focus(&mut self.store, index) == FocusOutcome::Navigated
            {
                self.note_navigation();
                self.handoff = FocusHandoff::ToSource(index);
                ui.ctx().request_repaint();
            }
            if resp.lost_focus() {
                let outcome = self.panel.on_commit(&mut self.store, index);
                if outcome == CommitOutcome::Applied {
                    info!(property = %row.name, "binding written back");
                }
            }
        });

        ui_row.col(|ui| {
            ui.monospace(row.category.tag()).on_hover_text(tooltip.as_str());
        });
    }

    fn render_properties_panel(&mut self, ui: &mut egui::Ui, pending: FocusHandoff) {
        self.render_header(ui);
        ui.separator();

        let rows: Vec<PanelRow> = self.panel.rows().to_vec();
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 8.0;

        ui.push_id("properties_panel", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(160.0).resizable(true))
                .column(Column::remainder().resizable(true))
                .column(Column::initial(90.0).resizable(false))
                .body(|mut body| {
                    for (index, entry) in rows.iter().enumerate() {
                        body.row(row_h, |mut ui_row| match entry {
                            // egui_extras cannot span cells: label first, the rest blank.
                            PanelRow::Group(group) => {
                                ui_row.col(|ui| {
                                    ui.strong(group.as_str());
                                });
                                ui_row.col(|_| {});
                                ui_row.col(|_| {});
                            }
                            PanelRow::Property(row) => {
                                self.render_property_row(&mut ui_row, index, row, pending);
                            }
                        });
                    }
                });
        });
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_if_changed();
        let pending = std::mem::take(&mut self.handoff);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }
                ui.separator();
                ui.label(self.status.as_str());
            });
        });

        egui::SidePanel::left("source_panel")
            .resizable(true)
            .default_width(480.0)
            .show(ctx, |ui| {
                self.render_source_panel(ui, pending);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(statics::EN_HEADING_PROPERTIES);
            self.render_properties_panel(ui, pending);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::InspectorApp;
    use crate::scenario::Scenario;

    #[test]
    fn app_renders_sample_on_first_refresh() {
        let mut app = InspectorApp::new(Scenario::sample().expect("sample"), true);
        assert!(app.panel.rows().is_empty());

        app.refresh_if_changed();
        assert_eq!(app.panel.header().type_label, "Rectangle");
        assert_eq!(app.panel.group_count(), 3);

        // No change, no rebuild: typed input survives.
        let width = app.panel.find_row("width").expect("width row");
        app.panel.on_input(width, "50px");
        app.refresh_if_changed();
        assert!(app.panel.row(width).expect("row").is_changed());
    }

    #[test]
    fn source_edit_triggers_rebuild() {
        let mut app = InspectorApp::new(Scenario::sample().expect("sample"), true);
        app.refresh_if_changed();

        let width = app.panel.find_row("width").expect("width row");
        app.panel.on_input(width, "50px");

        let edited = app.source_buffer.replace("40px", "44px");
        app.store.open(app.scenario.uri.clone(), edited);
        app.refresh_if_changed();

        let row = app.panel.row(width).expect("row");
        assert_eq!(row.text(), "44px");
        assert!(!row.is_changed());
        assert!(app.source_buffer.contains("44px"));
    }
}

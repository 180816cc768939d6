use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::model::AXIS_COLUMNS;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} compounds loaded", ds.len()));
        } else {
            ui.label("No dataset loaded");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – directory + per-page settings
// ---------------------------------------------------------------------------

/// Render the left panel: page selector plus the settings that belong to the
/// active page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Directory");
    ui.separator();

    egui::ComboBox::from_id_salt("page_select")
        .selected_text(state.page.label())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for page in Page::ALL {
                if ui
                    .selectable_label(state.page == page, page.label())
                    .clicked()
                {
                    state.page = page;
                }
            }
        });

    ui.separator();

    match state.page {
        Page::Scatter2d => {
            ui.strong("Filter & Plot Settings");
            molwt_filter(ui, state);
            ui.add_space(4.0);
            ui.label("X-axis descriptor");
            axis_picker(ui, "x_axis_2d", &mut state.x_axis_2d);
        }
        Page::Scatter3d => {
            ui.strong("Filter & Plot Settings");
            molwt_filter(ui, state);
            ui.add_space(4.0);
            ui.label("X axis");
            axis_picker(ui, "x_axis_3d", &mut state.x_axis_3d);
            ui.label("Y axis");
            axis_picker(ui, "y_axis_3d", &mut state.y_axis_3d);
            ui.add_space(4.0);
            ui.label("View angle");
            ui.add(Slider::new(&mut state.yaw, 0.0..=std::f32::consts::TAU).text("yaw"));
            ui.add(
                Slider::new(&mut state.pitch, 0.0..=std::f32::consts::FRAC_PI_2).text("pitch"),
            );
        }
        Page::Searcher => {
            ui.label("Look up compounds by Name, InChI, InChIKey or SMILES.");
        }
        Page::Comparison => {
            ui.label("Pick compounds in the list to compare their LogS values.");
        }
        Page::Molecule => {
            ui.label("Paste or preset a SMILES string to find its record.");
        }
        Page::Home => {}
    }
}

/// Molecular-weight range filter shared by the scatter pages.  Bounds default
/// to the column's load-time extent, so an untouched filter keeps every row.
fn molwt_filter(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    let Ok((min, max)) = dataset.extent("MolWt") else {
        return;
    };

    ui.label("Molecular weight range");
    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut state.mw_range.0, min..=max).text("low"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut state.mw_range.1, min..=max).text("high"))
        .changed();

    if changed {
        // Keep the pair ordered when one slider crosses the other.
        if state.mw_range.0 > state.mw_range.1 {
            state.mw_range = (state.mw_range.1, state.mw_range.0);
        }
        state.refilter_scatter();
    }
}

/// Axis selector over the descriptor catalog plus MolWt.
fn axis_picker(ui: &mut Ui, id: &str, current: &mut String) {
    let selected = current.clone();
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for column in AXIS_COLUMNS {
                if ui.selectable_label(selected == column, column).clicked() {
                    *current = column.to_string();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open solubility dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset(&path);
    }
}

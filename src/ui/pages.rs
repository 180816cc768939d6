use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::find_by_smiles;
use crate::data::model::DESCRIPTOR_COLUMNS;
use crate::state::AppState;
use crate::ui::plot;

/// Cap on the number of checkbox / preset rows rendered at once; the filter
/// box narrows the list below it.
const MAX_NAME_ROWS: usize = 200;

/// Blocking placeholder for pages that need a dataset.
pub fn dataset_missing(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Load a dataset to use this page  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui) {
    ui.heading("Welcome to the AqSolDB Explorer");
    ui.add_space(4.0);
    ui.label("Select a page from the directory on the left.");
    ui.add_space(8.0);
    ui.label("• Searcher: look up compounds by Name, InChI, InChIKey or SMILES");
    ui.label("• 2D Scatterplot: solubility against one molecular descriptor");
    ui.label("• 3D Scatterplot: solubility in the space of two descriptors");
    ui.label("• Solubility Comparison: bar-chart comparison of picked compounds");
    ui.label("• Molecule Lookup: exact-match lookup from a SMILES string");
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

pub fn searcher(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        dataset_missing(ui);
        return;
    };

    ui.heading("Compound Searcher");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search Name/InChI/InChIKey/SMILES:");
        if ui.text_edit_singleline(&mut state.search_query).changed() {
            state.refilter_search();
        }
    });
    ui.label(format!(
        "{} of {} compounds",
        state.search_results.len(),
        dataset.len()
    ));
    ui.add_space(4.0);

    if state.search_results.is_empty() {
        ui.label("No compounds match the current search.");
        return;
    }

    let results = &state.search_results;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0)) // ID
        .column(Column::initial(180.0)) // Name
        .column(Column::auto().at_least(70.0)) // Solubility
        .column(Column::auto().at_least(70.0)) // MolWt
        .column(Column::initial(160.0)) // InChIKey
        .column(Column::remainder()) // SMILES
        .header(20.0, |mut header| {
            for title in ["ID", "Name", "Solubility", "MolWt", "InChIKey", "SMILES"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, results.len(), |mut row| {
                let compound = &dataset.compounds[results[row.index()]];
                row.col(|ui| {
                    ui.label(&compound.id);
                });
                row.col(|ui| {
                    ui.label(&compound.name);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", compound.solubility));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", compound.mol_wt));
                });
                row.col(|ui| {
                    ui.label(&compound.inchikey);
                });
                row.col(|ui| {
                    ui.label(&compound.smiles);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Solubility comparison
// ---------------------------------------------------------------------------

pub fn comparison(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        dataset_missing(ui);
        return;
    };

    ui.heading("Solubility Comparison Tool");
    ui.label("Select compounds below to compare their solubility values (LogS).");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Filter names:");
        ui.text_edit_singleline(&mut state.name_filter);
        if ui.button("Clear selection").clicked() {
            state.selected_names.clear();
        }
        ui.label(format!("{} selected", state.selected_names.len()));
    });

    let needle = state.name_filter.to_lowercase();
    ScrollArea::vertical()
        .max_height(170.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            let mut shown = 0;
            for name in &dataset.names {
                if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                    continue;
                }
                shown += 1;
                if shown > MAX_NAME_ROWS {
                    ui.weak("… more matches hidden; narrow the filter above.");
                    break;
                }
                let mut checked = state.selected_names.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    if checked {
                        state.selected_names.insert(name.clone());
                    } else {
                        state.selected_names.remove(name);
                    }
                }
            }
            if shown == 0 {
                ui.weak("No compound names match the filter.");
            }
        });

    ui.separator();

    // Nothing picked yet is a prompt, not an error or an empty result.
    if state.selected_names.is_empty() {
        ui.label(RichText::new("Please select one or more compounds to compare.").italics());
        return;
    }

    let rows = state.comparison_rows();

    ui.strong("Comparison Table");
    ScrollArea::vertical()
        .id_salt("comparison_table")
        .max_height(150.0)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("comparison_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Name");
                    ui.strong("Solubility (LogS)");
                    ui.end_row();
                    for row in &rows {
                        ui.label(&row.name);
                        ui.label(format!("{:.2}", row.solubility));
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    ui.strong("Solubility Bar Chart (LogS)");
    plot::solubility_bars(ui, &rows);
}

// ---------------------------------------------------------------------------
// Molecule lookup
// ---------------------------------------------------------------------------

pub fn molecule(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        dataset_missing(ui);
        return;
    };

    ui.heading("Molecule Lookup");
    ui.label(
        "The structure editor hands back a SMILES string; the lookup below is an \
         exact text match against the dataset's SMILES column.",
    );
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Preset from dataset:");
        egui::ComboBox::from_id_salt("smiles_preset")
            .selected_text("pick a compound…")
            .show_ui(ui, |ui: &mut Ui| {
                for name in dataset.names.iter().take(MAX_NAME_ROWS) {
                    if ui.selectable_label(false, name).clicked() {
                        if let Some(compound) =
                            dataset.compounds.iter().find(|c| &c.name == name)
                        {
                            state.smiles_input = compound.smiles.clone();
                        }
                    }
                }
            });
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("SMILES:");
        ui.text_edit_singleline(&mut state.smiles_input);
    });
    ui.add_space(8.0);

    if state.smiles_input.is_empty() {
        ui.weak("Enter or preset a SMILES string to look it up.");
        return;
    }

    match find_by_smiles(&dataset, &state.smiles_input) {
        Some(compound) => {
            egui::Grid::new("molecule_card")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("ID");
                    ui.label(&compound.id);
                    ui.end_row();
                    ui.strong("Name");
                    ui.label(&compound.name);
                    ui.end_row();
                    ui.strong("SMILES");
                    ui.label(&compound.smiles);
                    ui.end_row();
                    ui.strong("InChIKey");
                    ui.label(&compound.inchikey);
                    ui.end_row();
                    ui.strong("Solubility (LogS)");
                    ui.label(format!("{:.3}", compound.solubility));
                    ui.end_row();
                    ui.strong("MolWt");
                    ui.label(format!("{:.2}", compound.mol_wt));
                    ui.end_row();
                    ui.strong("MolLogP");
                    ui.label(format!("{:.2}", compound.mol_logp));
                    ui.end_row();
                    for (i, column) in DESCRIPTOR_COLUMNS.iter().enumerate() {
                        ui.strong(*column);
                        ui.label(format!("{:.0}", compound.descriptors[i]));
                        ui.end_row();
                    }
                });
        }
        None => {
            ui.label("No exact match in the dataset.");
            ui.weak(
                "Matching is literal text equality: a chemically identical structure \
                 written in a different but equivalent notation will not match.",
            );
        }
    }
}

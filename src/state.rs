use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::error::UnknownColumnError;
use crate::data::filter::{self, ComparisonRow, FilterCriteria, NumericRange};
use crate::data::loader::DatasetLoader;
use crate::data::model::{Dataset, DESCRIPTOR_COLUMNS};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The dashboard pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Searcher,
    Scatter2d,
    Scatter3d,
    Comparison,
    Molecule,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Searcher,
        Page::Scatter2d,
        Page::Scatter3d,
        Page::Comparison,
        Page::Molecule,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Searcher => "Searcher",
            Page::Scatter2d => "2D Scatterplot",
            Page::Scatter3d => "3D Scatterplot",
            Page::Comparison => "Solubility Comparison",
            Page::Molecule => "Molecule Lookup",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Criteria are derived from the widget fields below on every interaction
/// and handed to `filter::apply`; the resulting index sets are cached here
/// until the next change.
pub struct AppState {
    /// Loader with its process-lifetime path cache.
    pub loader: DatasetLoader,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Configured dataset path, attempted at startup.
    pub dataset_path: PathBuf,

    /// Currently selected page.
    pub page: Page,

    // -- Searcher --
    pub search_query: String,
    pub search_results: Vec<usize>,

    // -- Scatter pages (shared MolWt filter, per-page axes) --
    pub mw_range: (f64, f64),
    pub x_axis_2d: String,
    pub x_axis_3d: String,
    pub y_axis_3d: String,
    pub scatter_indices: Vec<usize>,
    pub yaw: f32,
    pub pitch: f32,

    // -- Comparison --
    pub selected_names: BTreeSet<String>,
    pub name_filter: String,

    // -- Molecule lookup --
    pub smiles_input: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            loader: DatasetLoader::new(),
            dataset: None,
            dataset_path: config.dataset_path,
            page: Page::Home,
            search_query: String::new(),
            search_results: Vec::new(),
            mw_range: (0.0, 0.0),
            x_axis_2d: "MolWt".to_string(),
            x_axis_3d: DESCRIPTOR_COLUMNS[0].to_string(),
            y_axis_3d: DESCRIPTOR_COLUMNS[1].to_string(),
            scatter_indices: Vec::new(),
            yaw: 0.6,
            pitch: 0.5,
            selected_names: BTreeSet::new(),
            name_filter: String::new(),
            smiles_input: String::new(),
            status_message: None,
        }
    }

    /// Attempt the configured dataset path.  A failure leaves the pages in
    /// their blocking error state; File → Open can recover later.
    pub fn load_initial(&mut self) {
        let path = self.dataset_path.clone();
        self.load_dataset(&path);
    }

    /// Load a dataset file through the cache and ingest it.
    pub fn load_dataset(&mut self, path: &Path) {
        match self.loader.load(path) {
            Ok(dataset) => {
                log::info!("loaded {} compounds from {}", dataset.len(), path.display());
                self.dataset_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a loaded dataset and reset the per-page widget state.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.mw_range = dataset.extent("MolWt").unwrap_or((0.0, 0.0));
        self.search_results = (0..dataset.len()).collect();
        self.scatter_indices = (0..dataset.len()).collect();
        self.selected_names.clear();
        self.status_message = None;
        self.dataset = Some(dataset);
    }

    fn run_filter(&mut self, criteria: &FilterCriteria) -> Vec<usize> {
        let Some(dataset) = self.dataset.clone() else {
            return Vec::new();
        };
        match filter::apply(&dataset, criteria) {
            Ok(indices) => indices,
            Err(UnknownColumnError(column)) => {
                // The UI only offers catalog columns, so this is defensive.
                log::error!("filter requested unknown column '{column}'");
                self.status_message = Some(format!("Error: unknown column '{column}'"));
                Vec::new()
            }
        }
    }

    /// Recompute the searcher result cache from the current query.
    pub fn refilter_search(&mut self) {
        let criteria = FilterCriteria {
            text_query: Some(self.search_query.clone()),
            ..Default::default()
        };
        self.search_results = self.run_filter(&criteria);
    }

    /// Recompute the scatter index cache from the current MolWt range.
    pub fn refilter_scatter(&mut self) {
        let criteria = FilterCriteria {
            numeric_range: Some(NumericRange {
                column: "MolWt".to_string(),
                low: self.mw_range.0,
                high: self.mw_range.1,
            }),
            ..Default::default()
        };
        self.scatter_indices = self.run_filter(&criteria);
    }

    /// De-duplicated (Name, Solubility) rows for the comparison page.
    pub fn comparison_rows(&self) -> Vec<ComparisonRow> {
        match &self.dataset {
            Some(dataset) => filter::comparison_rows(dataset, &self.selected_names),
            None => Vec::new(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_compound;

    fn state_with_dataset() -> AppState {
        let dataset = Dataset::from_compounds(vec![
            test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07),
            test_compound("A-2", "Benzene", "c1ccccc1", -1.64, 78.11),
            test_compound("A-3", "Phenol", "Oc1ccccc1", -0.04, 94.11),
        ]);
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(Arc::new(dataset));
        state
    }

    #[test]
    fn set_dataset_seeds_range_and_caches() {
        let state = state_with_dataset();
        assert_eq!(state.mw_range, (46.07, 94.11));
        assert_eq!(state.search_results, vec![0, 1, 2]);
        assert_eq!(state.scatter_indices, vec![0, 1, 2]);
    }

    #[test]
    fn refilter_search_narrows_and_recovers() {
        let mut state = state_with_dataset();

        state.search_query = "benz".to_string();
        state.refilter_search();
        assert_eq!(state.search_results, vec![1]);

        state.search_query.clear();
        state.refilter_search();
        assert_eq!(state.search_results, vec![0, 1, 2]);
    }

    #[test]
    fn refilter_scatter_respects_bounds() {
        let mut state = state_with_dataset();
        state.mw_range = (46.07, 78.11);
        state.refilter_scatter();
        assert_eq!(state.scatter_indices, vec![0, 1]);
    }
}

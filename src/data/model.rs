use std::collections::{BTreeMap, BTreeSet};

use super::error::UnknownColumnError;

// ---------------------------------------------------------------------------
// Column catalog
// ---------------------------------------------------------------------------

/// The ten pre-computed molecular descriptor columns, in dataset order.
/// `Compound::descriptors` is a parallel array indexed by position here.
pub const DESCRIPTOR_COLUMNS: [&str; 10] = [
    "NumHAcceptors",
    "NumHDonors",
    "NumHeteroatoms",
    "NumRotatableBonds",
    "NumValenceElectrons",
    "NumAromaticRings",
    "NumSaturatedRings",
    "NumAliphaticRings",
    "RingCount",
    "HeavyAtomCount",
];

/// Columns offered as scatter-plot axes: the descriptor catalog plus MolWt.
pub const AXIS_COLUMNS: [&str; 11] = [
    "NumHAcceptors",
    "NumHDonors",
    "NumHeteroatoms",
    "NumRotatableBonds",
    "NumValenceElectrons",
    "NumAromaticRings",
    "NumSaturatedRings",
    "NumAliphaticRings",
    "RingCount",
    "HeavyAtomCount",
    "MolWt",
];

/// The text columns searched by the compound searcher.
pub const SEARCH_FIELDS: [&str; 4] = ["Name", "InChI", "InChIKey", "SMILES"];

/// All numeric columns the dataset tracks extents for.
pub fn numeric_columns() -> impl Iterator<Item = &'static str> {
    DESCRIPTOR_COLUMNS
        .iter()
        .copied()
        .chain(["MolWt", "Solubility", "MolLogP"])
}

// ---------------------------------------------------------------------------
// Compound – one row of the dataset
// ---------------------------------------------------------------------------

/// A single compound (one row of the source table).
///
/// Text cells that are empty in the source stay empty strings; numeric cells
/// that are empty parse to `f64::NAN`, so inclusive range comparisons are
/// simply false for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub id: String,
    pub name: String,
    pub inchi: String,
    pub inchikey: String,
    /// Structure notation, treated as an opaque string.
    pub smiles: String,
    /// Aqueous solubility, LogS.
    pub solubility: f64,
    pub mol_wt: f64,
    pub mol_logp: f64,
    /// Parallel to [`DESCRIPTOR_COLUMNS`].
    pub descriptors: [f64; 10],
}

impl Compound {
    /// Numeric cell by column name. Unknown names are an error rather than a
    /// silent NaN so a bad axis pick fails loudly.
    pub fn numeric_value(&self, column: &str) -> Result<f64, UnknownColumnError> {
        if let Some(i) = DESCRIPTOR_COLUMNS.iter().position(|c| *c == column) {
            return Ok(self.descriptors[i]);
        }
        match column {
            "MolWt" => Ok(self.mol_wt),
            "Solubility" => Ok(self.solubility),
            "MolLogP" => Ok(self.mol_logp),
            other => Err(UnknownColumnError(other.to_string())),
        }
    }

    /// Text cell by column name; `None` for columns that are not text.
    pub fn text_value(&self, column: &str) -> Option<&str> {
        match column {
            "ID" => Some(&self.id),
            "Name" => Some(&self.name),
            "InChI" => Some(&self.inchi),
            "InChIKey" => Some(&self.inchikey),
            "SMILES" => Some(&self.smiles),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices precomputed at load time.
/// Immutable after construction; shared as `Arc<Dataset>`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All compounds (rows), in file order.
    pub compounds: Vec<Compound>,
    /// Observed (min, max) per numeric column, skipping NaN cells.
    extents: BTreeMap<&'static str, (f64, f64)>,
    /// Sorted unique non-empty compound names, for the multi-select.
    pub names: Vec<String>,
}

impl Dataset {
    /// Build column indices from the loaded rows.
    pub fn from_compounds(compounds: Vec<Compound>) -> Self {
        let mut extents = BTreeMap::new();
        for column in numeric_columns() {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for c in &compounds {
                // numeric_columns() only yields known names
                let Ok(v) = c.numeric_value(column) else {
                    continue;
                };
                if v.is_nan() {
                    continue;
                }
                min = min.min(v);
                max = max.max(v);
            }
            if min > max {
                // empty dataset or all-NaN column
                min = 0.0;
                max = 0.0;
            }
            extents.insert(column, (min, max));
        }

        let names: Vec<String> = compounds
            .iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| c.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Dataset {
            compounds,
            extents,
            names,
        }
    }

    /// Load-time (min, max) of a numeric column.
    pub fn extent(&self, column: &str) -> Result<(f64, f64), UnknownColumnError> {
        self.extents
            .get(column)
            .copied()
            .ok_or_else(|| UnknownColumnError(column.to_string()))
    }

    /// Number of compounds.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_compound(
    id: &str,
    name: &str,
    smiles: &str,
    solubility: f64,
    mol_wt: f64,
) -> Compound {
    Compound {
        id: id.to_string(),
        name: name.to_string(),
        inchi: format!("InChI=1S/{name}"),
        inchikey: format!("KEY-{id}"),
        smiles: smiles.to_string(),
        solubility,
        mol_wt,
        mol_logp: 0.5,
        descriptors: [1.0, 0.0, 1.0, 0.0, 20.0, 0.0, 0.0, 0.0, 0.0, 2.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_covers_catalog_and_molwt() {
        let c = test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07);
        for column in AXIS_COLUMNS {
            assert!(c.numeric_value(column).is_ok(), "{column}");
        }
        assert_eq!(c.numeric_value("MolWt").unwrap(), 46.07);
        assert_eq!(c.numeric_value("Solubility").unwrap(), -0.77);
    }

    #[test]
    fn numeric_value_rejects_unknown_column() {
        let c = test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07);
        let err = c.numeric_value("NotAColumn").unwrap_err();
        assert_eq!(err, UnknownColumnError("NotAColumn".to_string()));
    }

    #[test]
    fn extents_skip_nan_and_cover_bounds() {
        let mut rows = vec![
            test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07),
            test_compound("A-2", "Benzene", "c1ccccc1", -1.64, 78.11),
        ];
        rows.push(Compound {
            mol_wt: f64::NAN,
            ..test_compound("A-3", "Unknown", "C", -3.0, 0.0)
        });
        let ds = Dataset::from_compounds(rows);
        assert_eq!(ds.extent("MolWt").unwrap(), (46.07, 78.11));
        assert_eq!(ds.extent("Solubility").unwrap(), (-3.0, -0.77));
    }

    #[test]
    fn extent_rejects_unknown_column() {
        let ds = Dataset::from_compounds(vec![]);
        assert!(ds.extent("Name").is_err());
        assert_eq!(ds.extent("MolWt").unwrap(), (0.0, 0.0));
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let ds = Dataset::from_compounds(vec![
            test_compound("A-2", "Benzene", "c1ccccc1", -1.64, 78.11),
            test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07),
            test_compound("A-3", "Benzene", "c1ccccc1", -1.64, 78.11),
        ]);
        assert_eq!(ds.names, vec!["Benzene".to_string(), "Ethanol".to_string()]);
    }
}

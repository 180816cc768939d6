use std::collections::{BTreeSet, HashSet};

use super::error::UnknownColumnError;
use super::model::{Compound, Dataset, SEARCH_FIELDS};

// ---------------------------------------------------------------------------
// Filter criteria: one value object per user interaction
// ---------------------------------------------------------------------------

/// Inclusive bounds on one numeric column.  The UI seeds `low`/`high` from
/// the column's load-time extent, so an untouched range keeps every row.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRange {
    pub column: String,
    pub low: f64,
    pub high: f64,
}

/// The three independent predicate slots, ANDed together.  An absent slot is
/// a no-op.  Criteria are rebuilt from widget state on every interaction and
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over the searched text columns.
    pub text_query: Option<String>,
    pub numeric_range: Option<NumericRange>,
    /// `None` = slot absent (keep everything); `Some` with an empty set =
    /// an active selection with nothing picked, which keeps nothing.
    pub selected_names: Option<BTreeSet<String>>,
}

/// True when `query` occurs case-insensitively in any of the named text
/// fields of `record`.  Fields the record does not have never match.
pub fn any_field_contains(record: &Compound, fields: &[&str], query: &str) -> bool {
    let query = query.to_lowercase();
    fields
        .iter()
        .filter_map(|field| record.text_value(field))
        .any(|value| value.to_lowercase().contains(&query))
}

/// Return indices of compounds that pass all active criteria, in dataset
/// order.
///
/// The range column is validated up front: a column outside the numeric
/// catalog aborts the whole evaluation instead of silently dropping rows.
/// On a valid dataset this is a total function; an empty result is a normal
/// outcome, not an error.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> Result<Vec<usize>, UnknownColumnError> {
    if let Some(range) = &criteria.numeric_range {
        dataset.extent(&range.column)?;
    }

    // An empty query matches everything, exactly like an absent one.
    let query = criteria
        .text_query
        .as_deref()
        .filter(|q| !q.is_empty());

    let indices = dataset
        .compounds
        .iter()
        .enumerate()
        .filter(|(_, compound)| {
            if let Some(q) = query {
                if !any_field_contains(compound, &SEARCH_FIELDS, q) {
                    return false;
                }
            }
            if let Some(range) = &criteria.numeric_range {
                // Column validated above; NaN cells fail the comparison.
                match compound.numeric_value(&range.column) {
                    Ok(v) if range.low <= v && v <= range.high => {}
                    _ => return false,
                }
            }
            if let Some(names) = &criteria.selected_names {
                if !names.contains(&compound.name) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect();

    Ok(indices)
}

// ---------------------------------------------------------------------------
// Comparison view projection
// ---------------------------------------------------------------------------

/// One row of the solubility comparison table / bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub name: String,
    pub solubility: f64,
}

/// Project the selected compounds to `(Name, Solubility)` pairs,
/// de-duplicated on the pair so repeated dataset rows for the same
/// compound/value never double-count in the bar chart.  First occurrence
/// wins; dataset order is preserved.
pub fn comparison_rows(dataset: &Dataset, selected: &BTreeSet<String>) -> Vec<ComparisonRow> {
    let mut seen: HashSet<(&str, u64)> = HashSet::new();
    let mut rows = Vec::new();
    for compound in &dataset.compounds {
        if !selected.contains(&compound.name) {
            continue;
        }
        if seen.insert((compound.name.as_str(), compound.solubility.to_bits())) {
            rows.push(ComparisonRow {
                name: compound.name.clone(),
                solubility: compound.solubility,
            });
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Structure lookup
// ---------------------------------------------------------------------------

/// Find the compound whose `SMILES` column equals `smiles` exactly.
///
/// The comparison is literal string equality, no canonicalization: a
/// chemically identical structure written differently will not match.  That
/// mirrors the stored notation being treated as opaque text.
pub fn find_by_smiles<'a>(dataset: &'a Dataset, smiles: &str) -> Option<&'a Compound> {
    dataset.compounds.iter().find(|c| c.smiles == smiles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_compound;

    fn sample_dataset() -> Dataset {
        Dataset::from_compounds(vec![
            test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07),
            test_compound("A-2", "Benzene", "c1ccccc1", -1.64, 78.11),
            test_compound("A-3", "Phenol", "Oc1ccccc1", -0.04, 94.11),
            test_compound("A-4", "Naphthalene", "c1ccc2ccccc2c1", -3.61, 128.17),
        ])
    }

    fn range(column: &str, low: f64, high: f64) -> Option<NumericRange> {
        Some(NumericRange {
            column: column.to_string(),
            low,
            high,
        })
    }

    #[test]
    fn empty_criteria_is_identity() {
        let ds = sample_dataset();
        let indices = apply(&ds, &FilterCriteria::default()).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            text_query: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap().len(), ds.len());
    }

    #[test]
    fn text_search_is_case_insensitive_and_spans_fields() {
        let ds = sample_dataset();

        // Matches Name
        let criteria = FilterCriteria {
            text_query: Some("PHEN".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap(), vec![2]);

        // Matches SMILES only: Benzene, Phenol and Naphthalene all contain
        // the aromatic ring fragment.
        let criteria = FilterCriteria {
            text_query: Some("c1cc".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn text_search_is_sound_and_complete() {
        let ds = sample_dataset();
        let query = "e";
        let criteria = FilterCriteria {
            text_query: Some(query.to_string()),
            ..Default::default()
        };
        let hits = apply(&ds, &criteria).unwrap();

        for (i, compound) in ds.compounds.iter().enumerate() {
            let matches = any_field_contains(compound, &SEARCH_FIELDS, query);
            assert_eq!(hits.contains(&i), matches, "row {i}");
        }
    }

    #[test]
    fn range_includes_both_boundaries() {
        let ds = sample_dataset();
        let (min, max) = ds.extent("MolWt").unwrap();
        let criteria = FilterCriteria {
            numeric_range: range("MolWt", min, max),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap().len(), ds.len());

        // Tighten to exactly one boundary row.
        let criteria = FilterCriteria {
            numeric_range: range("MolWt", 46.07, 46.07),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap(), vec![0]);
    }

    #[test]
    fn range_excludes_nan_cells() {
        let mut rows = vec![test_compound("A-1", "Ethanol", "CCO", -0.77, 46.07)];
        rows.push(crate::data::model::Compound {
            mol_wt: f64::NAN,
            ..test_compound("A-2", "Mystery", "C", -3.0, 0.0)
        });
        let ds = Dataset::from_compounds(rows);

        let (min, max) = ds.extent("MolWt").unwrap();
        let criteria = FilterCriteria {
            numeric_range: range("MolWt", min, max),
            ..Default::default()
        };
        // Only the non-NaN row survives, even over the full extent.
        assert_eq!(apply(&ds, &criteria).unwrap(), vec![0]);
    }

    #[test]
    fn range_on_unknown_column_fails() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            numeric_range: range("NotAColumn", 0.0, 1.0),
            ..Default::default()
        };
        let err = apply(&ds, &criteria).unwrap_err();
        assert_eq!(err, UnknownColumnError("NotAColumn".to_string()));
    }

    #[test]
    fn empty_selection_keeps_nothing_absent_keeps_everything() {
        let ds = sample_dataset();

        let criteria = FilterCriteria {
            selected_names: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(apply(&ds, &criteria).unwrap().is_empty());

        let criteria = FilterCriteria {
            selected_names: None,
            ..Default::default()
        };
        assert_eq!(apply(&ds, &criteria).unwrap().len(), ds.len());
    }

    #[test]
    fn slots_combine_with_and() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            text_query: Some("c1cc".to_string()),
            numeric_range: range("MolWt", 0.0, 100.0),
            selected_names: Some(
                ["Phenol", "Naphthalene"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        };
        // Naphthalene passes text and name but exceeds the weight range.
        assert_eq!(apply(&ds, &criteria).unwrap(), vec![2]);
    }

    #[test]
    fn comparison_rows_deduplicate_name_solubility_pairs() {
        let ds = Dataset::from_compounds(vec![
            test_compound("A-1", "A", "C", -2.1, 10.0),
            test_compound("A-2", "A", "C", -2.1, 10.0),
            test_compound("A-3", "B", "CC", -1.0, 20.0),
        ]);
        let selected: BTreeSet<String> = ["A", "B"].into_iter().map(String::from).collect();

        let rows = comparison_rows(&ds, &selected);
        assert_eq!(
            rows,
            vec![
                ComparisonRow {
                    name: "A".to_string(),
                    solubility: -2.1
                },
                ComparisonRow {
                    name: "B".to_string(),
                    solubility: -1.0
                },
            ]
        );
    }

    #[test]
    fn same_name_different_solubility_keeps_both_rows() {
        let ds = Dataset::from_compounds(vec![
            test_compound("A-1", "A", "C", -2.1, 10.0),
            test_compound("A-2", "A", "C", -2.2, 10.0),
        ]);
        let selected: BTreeSet<String> = ["A"].into_iter().map(String::from).collect();
        assert_eq!(comparison_rows(&ds, &selected).len(), 2);
    }

    #[test]
    fn find_by_smiles_is_literal() {
        let ds = sample_dataset();

        let hit = find_by_smiles(&ds, "CCO").unwrap();
        assert_eq!(hit.name, "Ethanol");

        // Whitespace-altered but chemically identical notation: no match.
        assert!(find_by_smiles(&ds, "CC O").is_none());
        assert!(find_by_smiles(&ds, "OCC").is_none());
    }
}

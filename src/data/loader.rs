use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Compound, Dataset, DESCRIPTOR_COLUMNS};

// ---------------------------------------------------------------------------
// DatasetLoader – process-lifetime cache
// ---------------------------------------------------------------------------

/// Loads datasets and caches them by path for the lifetime of the process.
///
/// The lock is held across the read, so a distinct path is read at most once
/// even under concurrent first access. Failed loads are not cached; a retry
/// after fixing the file re-reads it.
pub struct DatasetLoader {
    cache: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetLoader {
    pub fn new() -> Self {
        DatasetLoader {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load `path`, or return the cached dataset if it was loaded before.
    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        // Canonicalize so "./data.csv" and an absolute spelling share an entry.
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = cache.get(&key) {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_file(path)?);
        cache.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a solubility dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the AqSolDB distribution format (header row, one compound per row)
/// * `.json`    – `[{ "ID": ..., "Name": ..., "Solubility": ... }, ...]`
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a numeric cell.  Empty cells become NaN (the range filter then
/// excludes them); anything else that fails to parse is a load error.
fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns in the header row.  Columns the schema
/// does not know (SD, Group, TPSA, ...) are simply ignored.
struct ColumnIndices {
    id: usize,
    name: usize,
    inchi: usize,
    inchikey: usize,
    smiles: usize,
    solubility: usize,
    mol_wt: usize,
    mol_logp: usize,
    descriptors: [usize; 10],
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnIndices, LoadError> {
    let position = |column: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(LoadError::MissingColumn { column })
    };

    let mut descriptors = [0usize; 10];
    for (slot, column) in descriptors.iter_mut().zip(DESCRIPTOR_COLUMNS) {
        *slot = position(column)?;
    }

    Ok(ColumnIndices {
        id: position("ID")?,
        name: position("Name")?,
        inchi: position("InChI")?,
        inchikey: position("InChIKey")?,
        smiles: position("SMILES")?,
        solubility: position("Solubility")?,
        mol_wt: position("MolWt")?,
        mol_logp: position("MolLogP")?,
        descriptors,
    })
}

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let columns = resolve_columns(reader.headers()?)?;

    let text = |record: &csv::StringRecord, idx: usize| -> String {
        record.get(idx).unwrap_or("").to_string()
    };

    let mut compounds = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let mut descriptors = [f64::NAN; 10];
        for (i, column) in DESCRIPTOR_COLUMNS.into_iter().enumerate() {
            descriptors[i] = parse_number(cell(columns.descriptors[i]), row_no, column)?;
        }

        compounds.push(Compound {
            id: text(&record, columns.id),
            name: text(&record, columns.name),
            inchi: text(&record, columns.inchi),
            inchikey: text(&record, columns.inchikey),
            smiles: text(&record, columns.smiles),
            solubility: parse_number(cell(columns.solubility), row_no, "Solubility")?,
            mol_wt: parse_number(cell(columns.mol_wt), row_no, "MolWt")?,
            mol_logp: parse_number(cell(columns.mol_logp), row_no, "MolLogP")?,
            descriptors,
        });
    }

    Ok(Dataset::from_compounds(compounds))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
/// a top-level array of objects, one per compound, scalar values only.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or_else(|| LoadError::MalformedRow {
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut compounds = Vec::with_capacity(records.len());
    for (row, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::MalformedRow {
            row,
            message: "not a JSON object".to_string(),
        })?;

        let text_field = |column: &'static str| -> Result<String, LoadError> {
            match obj.get(column) {
                Some(JsonValue::String(s)) => Ok(s.clone()),
                Some(JsonValue::Null) => Ok(String::new()),
                Some(other) => Err(LoadError::MalformedRow {
                    row,
                    message: format!("column '{column}' is not a string: {other}"),
                }),
                None => Err(LoadError::MissingColumn { column }),
            }
        };
        let number_field = |column: &'static str| -> Result<f64, LoadError> {
            match obj.get(column) {
                Some(JsonValue::Null) => Ok(f64::NAN),
                Some(v) => v.as_f64().ok_or_else(|| LoadError::MalformedRow {
                    row,
                    message: format!("column '{column}' is not a number: {v}"),
                }),
                None => Err(LoadError::MissingColumn { column }),
            }
        };

        let mut descriptors = [f64::NAN; 10];
        for (i, column) in DESCRIPTOR_COLUMNS.into_iter().enumerate() {
            descriptors[i] = number_field(column)?;
        }

        compounds.push(Compound {
            id: text_field("ID")?,
            name: text_field("Name")?,
            inchi: text_field("InChI")?,
            inchikey: text_field("InChIKey")?,
            smiles: text_field("SMILES")?,
            solubility: number_field("Solubility")?,
            mol_wt: number_field("MolWt")?,
            mol_logp: number_field("MolLogP")?,
            descriptors,
        });
    }

    Ok(Dataset::from_compounds(compounds))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat scalar columns, one row per compound.  Works with files written by
/// both Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = Arc::clone(builder.schema());
    let columns = resolve_parquet_columns(&schema)?;
    let reader = builder.build()?;

    let mut compounds = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;

        for row in 0..batch.num_rows() {
            let row_no = compounds.len();
            let mut descriptors = [f64::NAN; 10];
            for (i, column) in DESCRIPTOR_COLUMNS.into_iter().enumerate() {
                descriptors[i] =
                    number_at(batch.column(columns.descriptors[i]), row, row_no, column)?;
            }

            compounds.push(Compound {
                id: string_at(batch.column(columns.id), row),
                name: string_at(batch.column(columns.name), row),
                inchi: string_at(batch.column(columns.inchi), row),
                inchikey: string_at(batch.column(columns.inchikey), row),
                smiles: string_at(batch.column(columns.smiles), row),
                solubility: number_at(batch.column(columns.solubility), row, row_no, "Solubility")?,
                mol_wt: number_at(batch.column(columns.mol_wt), row, row_no, "MolWt")?,
                mol_logp: number_at(batch.column(columns.mol_logp), row, row_no, "MolLogP")?,
                descriptors,
            });
        }
    }

    Ok(Dataset::from_compounds(compounds))
}

fn resolve_parquet_columns(schema: &Schema) -> Result<ColumnIndices, LoadError> {
    let position = |column: &'static str| -> Result<usize, LoadError> {
        schema
            .index_of(column)
            .map_err(|_| LoadError::MissingColumn { column })
    };

    let mut descriptors = [0usize; 10];
    for (slot, column) in descriptors.iter_mut().zip(DESCRIPTOR_COLUMNS) {
        *slot = position(column)?;
    }

    Ok(ColumnIndices {
        id: position("ID")?,
        name: position("Name")?,
        inchi: position("InChI")?,
        inchikey: position("InChIKey")?,
        smiles: position("SMILES")?,
        solubility: position("Solubility")?,
        mol_wt: position("MolWt")?,
        mol_logp: position("MolLogP")?,
        descriptors,
    })
}

/// Extract a text cell from an Arrow column; nulls become empty strings.
fn string_at(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<arrow::array::StringArray>();
            arr.map(|a| a.value(row).to_string()).unwrap_or_default()
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<arrow::array::LargeStringArray>();
            arr.map(|a| a.value(row).to_string()).unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// Extract a numeric cell from an Arrow column; nulls become NaN.
fn number_at(
    col: &ArrayRef,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<f64, LoadError> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    };
    value.ok_or_else(|| LoadError::MalformedRow {
        row: row_no,
        message: format!(
            "column '{column}' has type {:?}, expected a numeric type",
            col.data_type()
        ),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "ID,Name,InChI,InChIKey,SMILES,Solubility,MolWt,MolLogP,\
NumHAcceptors,NumHDonors,NumHeteroatoms,NumRotatableBonds,NumValenceElectrons,\
NumAromaticRings,NumSaturatedRings,NumAliphaticRings,RingCount,HeavyAtomCount";

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn sample_csv(dir: &Path) -> PathBuf {
        let body = format!(
            "{HEADER}\n\
A-1,Ethanol,InChI=1S/C2H6O,LFQSCWFLJHTTHZ-UHFFFAOYSA-N,CCO,-0.77,46.07,-0.31,1,1,1,0,20,0,0,0,0,3\n\
A-2,Benzene,InChI=1S/C6H6,UHOVQNZJYSORNB-UHFFFAOYSA-N,c1ccccc1,-1.64,78.11,1.69,0,0,0,0,30,1,0,0,1,6\n\
A-3,Mystery,,,C,-3.20,,0.00,0,0,0,0,8,0,0,0,0,1\n"
        );
        write_file(dir, "sample.csv", &body)
    }

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_csv(dir.path());
        let dataset = load_file(&path).unwrap();

        assert_eq!(dataset.len(), 3);
        let ethanol = &dataset.compounds[0];
        assert_eq!(ethanol.name, "Ethanol");
        assert_eq!(ethanol.smiles, "CCO");
        assert_eq!(ethanol.solubility, -0.77);
        assert_eq!(ethanol.descriptors[0], 1.0); // NumHAcceptors

        // Empty MolWt cell loads as NaN, not an error.
        assert!(dataset.compounds[2].mol_wt.is_nan());
        // Extent skips the NaN row.
        assert_eq!(dataset.extent("MolWt").unwrap(), (46.07, 78.11));
    }

    #[test]
    fn missing_solubility_column_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let header = HEADER.replace("Solubility", "LogS");
        let path = write_file(dir.path(), "bad.csv", &format!("{header}\n"));

        let err = load_file(&path).unwrap_err();
        assert!(
            matches!(err, LoadError::MissingColumn { column: "Solubility" }),
            "{err}"
        );
    }

    #[test]
    fn garbage_numeric_cell_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\nA-1,Ethanol,i,k,CCO,not-a-number,46.07,-0.31,1,1,1,0,20,0,0,0,0,3\n"
        );
        let path = write_file(dir.path(), "bad.csv", &body);

        let err = load_file(&path).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::InvalidNumber { row: 0, column: "Solubility", .. }
            ),
            "{err}"
        );
    }

    #[test]
    fn loader_caches_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_csv(dir.path());

        let loader = DatasetLoader::new();
        let first = loader.load(&path).unwrap();
        let second = loader.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.compounds, second.compounds);
    }

    #[test]
    fn missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");

        let loader = DatasetLoader::new();
        assert!(matches!(
            loader.load(&path).unwrap_err(),
            LoadError::Io { .. }
        ));

        sample_csv(dir.path());
        std::fs::rename(dir.path().join("sample.csv"), &path).unwrap();
        assert_eq!(loader.load(&path).unwrap().len(), 3);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[{
            "ID": "A-1", "Name": "Ethanol",
            "InChI": "InChI=1S/C2H6O", "InChIKey": "LFQSCWFLJHTTHZ-UHFFFAOYSA-N",
            "SMILES": "CCO", "Solubility": -0.77, "MolWt": 46.07, "MolLogP": -0.31,
            "NumHAcceptors": 1, "NumHDonors": 1, "NumHeteroatoms": 1,
            "NumRotatableBonds": 0, "NumValenceElectrons": 20,
            "NumAromaticRings": 0, "NumSaturatedRings": 0, "NumAliphaticRings": 0,
            "RingCount": 0, "HeavyAtomCount": 3
        }]"#;
        let path = write_file(dir.path(), "sample.json", body);

        let dataset = load_file(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.compounds[0].name, "Ethanol");
        assert_eq!(dataset.compounds[0].mol_wt, 46.07);
    }

    #[test]
    fn json_missing_column_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", r#"[{"ID": "A-1"}]"#);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }), "{err}");
    }
}

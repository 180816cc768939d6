//! Writes a small demonstration dataset so the explorer is usable without
//! downloading the full AqSolDB distribution.  The table deliberately
//! contains a repeated (Name, Solubility) row, which the comparison page
//! collapses to a single bar.

use anyhow::{Context, Result};

const OUTPUT: &str = "sample-solubility-dataset.csv";

/// ID, Name, InChI, InChIKey, SMILES, Solubility, MolWt, MolLogP, then the
/// ten descriptor columns.
#[rustfmt::skip]
const ROWS: &[(&str, &str, &str, &str, &str, f64, f64, f64, [i32; 10])] = &[
    ("A-1", "Ethanol", "InChI=1S/C2H6O/c1-2-3/h3H,2H2,1H3", "LFQSCWFLJHTTHZ-UHFFFAOYSA-N",
     "CCO", -0.77, 46.07, -0.31, [1, 1, 1, 0, 20, 0, 0, 0, 0, 3]),
    ("A-2", "Benzene", "InChI=1S/C6H6/c1-2-4-6-5-3-1/h1-6H", "UHOVQNZJYSORNB-UHFFFAOYSA-N",
     "c1ccccc1", -1.64, 78.11, 1.69, [0, 0, 0, 0, 30, 1, 0, 0, 1, 6]),
    ("A-3", "Phenol", "InChI=1S/C6H6O/c7-6-4-2-1-3-5-6/h1-5,7H", "ISWSIDIOOBJBQZ-UHFFFAOYSA-N",
     "Oc1ccccc1", -0.04, 94.11, 1.39, [1, 1, 1, 0, 36, 1, 0, 0, 1, 7]),
    ("A-4", "Naphthalene", "InChI=1S/C10H8/c1-2-6-10-8-4-3-7-9(10)5-1/h1-8H", "UFWIBTONFRDIAS-UHFFFAOYSA-N",
     "c1ccc2ccccc2c1", -3.61, 128.17, 3.30, [0, 0, 0, 0, 48, 2, 0, 0, 2, 10]),
    ("A-5", "Caffeine", "InChI=1S/C8H10N4O2/c1-10-4-9-6-5(10)7(13)12(3)8(14)11(6)2/h4H,1-3H3", "RYYVLZVUVIJVGH-UHFFFAOYSA-N",
     "Cn1cnc2c1c(=O)n(C)c(=O)n2C", -0.88, 194.19, -0.07, [6, 0, 6, 0, 74, 2, 0, 0, 2, 14]),
    ("A-6", "Aspirin", "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)", "BSYNRYMUTXBXSQ-UHFFFAOYSA-N",
     "CC(=O)Oc1ccccc1C(=O)O", -1.72, 180.16, 1.31, [4, 1, 4, 3, 68, 1, 0, 0, 1, 13]),
    ("A-7", "Glucose", "InChI=1S/C6H12O6/c7-1-2-3(8)4(9)5(10)6(11)12-2/h2-11H,1H2", "WQZGKKKJIJFFOK-UHFFFAOYSA-N",
     "OCC1OC(O)C(O)C(O)C1O", 0.74, 180.16, -3.24, [6, 5, 6, 1, 72, 0, 1, 1, 1, 12]),
    ("A-8", "Toluene", "InChI=1S/C7H8/c1-7-5-3-2-4-6-7/h2-6H,1H3", "YXFVVABEGXRONW-UHFFFAOYSA-N",
     "Cc1ccccc1", -2.21, 92.14, 2.11, [0, 0, 0, 0, 36, 1, 0, 0, 1, 7]),
    // Duplicate row for the same compound and value, as the full AqSolDB
    // merge occasionally produces.
    ("A-9", "Toluene", "InChI=1S/C7H8/c1-7-5-3-2-4-6-7/h2-6H,1H3", "YXFVVABEGXRONW-UHFFFAOYSA-N",
     "Cc1ccccc1", -2.21, 92.14, 2.11, [0, 0, 0, 0, 36, 1, 0, 0, 1, 7]),
    ("A-10", "Anthracene", "InChI=1S/C14H10/c1-2-6-12-10-14-8-4-3-7-13(14)9-11(12)5-1/h1-10H", "MWPLVEDNUUSJAV-UHFFFAOYSA-N",
     "c1ccc2cc3ccccc3cc2c1", -6.35, 178.23, 4.45, [0, 0, 0, 0, 66, 3, 0, 0, 3, 14]),
];

fn main() -> Result<()> {
    let mut writer = csv::Writer::from_path(OUTPUT)
        .with_context(|| format!("creating {OUTPUT}"))?;

    writer.write_record([
        "ID",
        "Name",
        "InChI",
        "InChIKey",
        "SMILES",
        "Solubility",
        "MolWt",
        "MolLogP",
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
    ])?;

    for (id, name, inchi, inchikey, smiles, solubility, mol_wt, mol_logp, descriptors) in ROWS {
        let mut record = vec![
            id.to_string(),
            name.to_string(),
            inchi.to_string(),
            inchikey.to_string(),
            smiles.to_string(),
            solubility.to_string(),
            mol_wt.to_string(),
            mol_logp.to_string(),
        ];
        record.extend(descriptors.iter().map(|d| d.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {} compounds to {OUTPUT}", ROWS.len());
    println!("Run with: AQSOL_DATASET={OUTPUT} cargo run");
    Ok(())
}

//! Static reference tables for sacubitril/valsartan.
//!
//! Tables are built once and shared; the dose engine never reads them.

use crate::{Error, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

/// Cached reference store - built once and reused
static REFERENCE_STORE: Lazy<ReferenceStore> = Lazy::new(build_reference_store);

/// Get a reference to the cached reference store
pub fn get_reference_store() -> &'static ReferenceStore {
    &REFERENCE_STORE
}

/// A titled table of text cells
#[derive(Clone, Debug, Serialize)]
pub struct Table {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// All reference tables plus label provenance
#[derive(Clone, Debug, Serialize)]
pub struct ReferenceStore {
    pub label_revision: NaiveDate,
    pub last_updated: NaiveDate,
    tables: Vec<Table>,
}

impl ReferenceStore {
    /// Look up a table by id
    pub fn table(&self, id: &str) -> Result<&Table> {
        self.tables
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::UnknownTable(id.to_string()))
    }

    /// Table ids in display order
    pub fn ids(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Check table shape and id uniqueness; returns one message per problem
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for table in &self.tables {
            if !seen.insert(table.id.as_str()) {
                errors.push(format!("Duplicate table id '{}'", table.id));
            }
            if table.columns.is_empty() {
                errors.push(format!("Table '{}' has no columns", table.id));
            }
            for (i, row) in table.rows.iter().enumerate() {
                if row.len() != table.columns.len() {
                    errors.push(format!(
                        "Table '{}': row {} has {} cells, expected {}",
                        table.id,
                        i + 1,
                        row.len(),
                        table.columns.len()
                    ));
                }
            }
        }

        if self.last_updated < self.label_revision {
            errors.push("Reference content predates the label revision".to_string());
        }

        errors
    }
}

fn table(id: &str, title: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        id: id.into(),
        title: title.into(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

fn build_reference_store() -> ReferenceStore {
    let tables = vec![
        table(
            "strengths",
            "Available Strengths",
            &["Strength (mg)", "Color", "Marking"],
            &[
                &["24/26", "Violet white", "NVR/LZ"],
                &["49/51", "Pale yellow", "NVR/L1"],
                &["97/103", "Light pink", "NVR/L11"],
            ],
        ),
        table(
            "adult-dosing",
            "Adult Dosing (HFrEF)",
            &["Phase", "Dose", "Notes"],
            &[
                &["Starting Dose", "49/51 mg BID", "Double dose every 2-4 weeks as tolerated"],
                &["Target Dose", "97/103 mg BID", "Achieve within 2-4 weeks if tolerated"],
                &["Maximum Dose", "97/103 mg BID", "Based on systolic BP ≥100 mmHg"],
            ],
        ),
        table(
            "renal-adjustment",
            "Renal Impairment",
            &["eGFR (mL/min/1.73m²)", "Dose"],
            &[
                &["≥60", "Standard"],
                &["30-59", "Standard"],
                &["15-29", "24/26 mg BID start"],
                &["<15 or Dialysis", "Not recommended"],
            ],
        ),
        table(
            "hepatic-adjustment",
            "Hepatic Impairment",
            &["Severity", "Dose"],
            &[
                &["Mild (Child-Pugh A)", "Standard"],
                &["Moderate (Child-Pugh B)", "24/26 mg BID start"],
                &["Severe (Child-Pugh C)", "Not recommended"],
            ],
        ),
        table(
            "pediatric-dosing",
            "Pediatric Dosing (≥1 year)",
            &["Weight", "Starting", "Target"],
            &[
                &["<40 kg", "1.6 mg/kg BID", "3.1 mg/kg BID"],
                &["≥40 kg", "49/51 mg BID", "97/103 mg BID"],
            ],
        ),
        table(
            "contraindications",
            "Absolute Contraindications",
            &["Contraindication", "Risk"],
            &[
                &["Known hypersensitivity", "Angioedema, anaphylaxis"],
                &["History of angioedema", "Life-threatening angioedema"],
                &["Concomitant ACE inhibitor use", "Increased angioedema risk (wait 36 hours)"],
                &["Concomitant aliskiren (in diabetes)", "Hyperkalemia, hypotension, renal impairment"],
            ],
        ),
        table(
            "interactions",
            "Drug Interactions",
            &["Drug", "Effect", "Management"],
            &[
                &["ACE inhibitors", "Increased angioedema risk", "36-hour washout required"],
                &["Aliskiren", "Hyperkalemia, hypotension, renal impairment", "Contraindicated in diabetes"],
                &["Other ARBs", "Excessive RAAS suppression", "Avoid concurrent use"],
                &["Potassium-sparing diuretics", "Hyperkalemia", "Monitor K+ closely"],
                &["Potassium supplements", "Hyperkalemia", "Monitor K+ closely"],
                &["NSAIDs", "Reduced renal function and antihypertensive effect", "Monitor renal function and BP"],
                &["Lithium", "Increased lithium levels", "Monitor lithium levels"],
            ],
        ),
        table(
            "no-interactions",
            "No Clinically Significant Interactions",
            &["Drug", "Study Result"],
            &[
                &["Warfarin", "No change in INR or warfarin PK"],
                &["Digoxin", "No change in digoxin levels"],
                &["Atorvastatin", "No change in statin PK"],
                &["Simvastatin", "No change in statin PK"],
                &["Amlodipine", "No PK interaction"],
                &["Omeprazole", "No PK interaction"],
                &["Metformin", "No change in metformin PK"],
                &["Furosemide", "No change in diuretic effect"],
                &["Hydrochlorothiazide", "No change in diuretic effect"],
                &["Carvedilol", "No PK interaction"],
            ],
        ),
        table(
            "adverse-reactions",
            "Adverse Reactions (>2% and > placebo)",
            &["Adverse Reaction", "ENTRESTO", "Enalapril"],
            &[
                &["Hypotension", "18%", "12%"],
                &["Hyperkalemia", "12%", "14%"],
                &["Cough", "9%", "13%"],
                &["Dizziness", "6%", "5%"],
                &["Renal impairment", "3%", "3%"],
                &["Angioedema", "0.5%", "0.2%"],
            ],
        ),
        table(
            "pharmacokinetics",
            "Pharmacokinetic Parameters",
            &["Parameter", "Sacubitril", "LBQ657", "Valsartan"],
            &[
                &["Bioavailability", "≥60%", "-", "23%"],
                &["Tmax", "0.5 hours", "2 hours", "1.5 hours"],
                &["Half-life", "1.4 hours", "11.5 hours", "9.9 hours"],
                &["Protein binding", "94-97%", "94-97%", "94-97%"],
                &["Metabolism", "Esterase → LBQ657", "No further metabolism", "Minimal (~20% metabolites)"],
                &["Excretion", "52-68% urine (as LBQ657)", "52-68% urine, 37-48% feces", "13% urine, 86% feces"],
            ],
        ),
        table(
            "trial-results",
            "PARADIGM-HF Primary Results (n=8,442, median 27 months)",
            &["Outcome", "HR (95% CI)", "P-value", "Risk Reduction"],
            &[
                &["Primary endpoint (CV death or HF hosp)", "0.80 (0.73-0.87)", "<0.001", "20%"],
                &["Cardiovascular death", "0.80 (0.71-0.89)", "<0.001", "20%"],
                &["HF hospitalization", "0.79 (0.71-0.89)", "<0.001", "21%"],
                &["All-cause mortality", "0.84 (0.76-0.93)", "<0.001", "16%"],
            ],
        ),
        table(
            "trial-safety",
            "PARADIGM-HF Safety Profile",
            &["Adverse Event", "ENTRESTO", "Enalapril"],
            &[
                &["Hypotension", "18%", "12%"],
                &["Hyperkalemia (K+ ≥6.0)", "4.3%", "5.6%"],
                &["Renal impairment", "3.3%", "3.3%"],
                &["Cough", "11%", "15%"],
                &["Angioedema", "0.4%", "0.2%"],
            ],
        ),
        table(
            "additional-trials",
            "Additional Key Trials",
            &["Trial", "Population", "Key Finding", "Status"],
            &[
                &["PARAGON-HF", "HF with preserved EF (HFpEF)", "Trend toward benefit (HR 0.87, P=0.059) in women & lower EF", "Published (Circulation 2019)"],
                &["PIONEER-HF", "Acute decompensated HF", "Greater NT-proBNP reduction vs. enalapril at 8 weeks", "Published (JAMA 2019)"],
                &["PANORAMA-HF", "HFrEF + CKD", "Maintained eGFR benefit vs. valsartan", "Published (JACC 2021)"],
                &["PARADISE-MI", "Post-MI with reduced EF", "No significant benefit vs. ramipril in post-MI", "Published (NEJM 2021)"],
            ],
        ),
        table(
            "references",
            "References and Sources",
            &["Source", "URL"],
            &[
                &["FDA Label (April 2024)", "https://www.accessdata.fda.gov/drugsatfda_docs/label/2024/207620s025,218591s000lbl.pdf"],
                &["EMA Product Information (2024)", "https://www.ema.europa.eu/en/documents/product-information/entresto-epar-product-information_en.pdf"],
                &["Novartis Product Monograph", "https://www.novartis.com/us-en/sites/novartis_us/files/entresto.pdf"],
                &["PARADIGM-HF (NEJM 2014)", "https://www.nejm.org/doi/full/10.1056/NEJMoa1409077"],
                &["PARAGON-HF (Circulation 2019)", "https://www.ahajournals.org/doi/10.1161/CIRCULATIONAHA.119.044586"],
                &["PIONEER-HF (JAMA 2019)", "https://jamanetwork.com/journals/jama/fullarticle/2738764"],
                &["PANORAMA-HF (JACC 2021)", "https://www.jacc.org/doi/10.1016/j.jacc.2021.07.036"],
                &["StatPearls - Sacubitril/Valsartan", "https://www.ncbi.nlm.nih.gov/books/NBK507904/"],
                &["FDA Clinical Pharmacology Review (NDA 207620)", "https://www.accessdata.fda.gov/drugsatfda_docs/nda/2015/207620Orig1s000ClinPharmR.pdf"],
                &["Springer - Pharmacokinetics Article", "https://link.springer.com/article/10.1007/s40262-017-0558-9"],
                &["Drugs.com - Drug Interactions Checker", "https://www.drugs.com/drug-interactions/entresto.html"],
                &["Medscape - Entresto Interactions", "https://reference.medscape.com/drug/entresto-sacubitril-valsartan-1000010/interactions"],
                &["ENTRESTO Healthcare Professional Site", "https://www.entrestohcp.com/"],
                &["American Heart Association - Heart Failure Guidelines", "https://www.heart.org/en/health-topics/heart-failure"],
                &["ACC/AHA Heart Failure Guidelines (2022)", "https://www.acc.org/guidelines"],
            ],
        ),
    ];

    ReferenceStore {
        label_revision: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default(),
        last_updated: NaiveDate::from_ymd_opt(2026, 2, 13).unwrap_or_default(),
        tables,
    }
}

use ambu_challenges::{RouteSummary, RunOutcome, Violation};
use ambu_structs::core::{PatientId, SaveRecord};
use ambu_utils::jsonify_pretty;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, io::Write, path::Path};

/// Prints the first violation, if any, then the saved total. The total line
/// is always written, so partial credit is visible after an abort.
pub fn emit_report<W: Write>(outcome: &RunOutcome, out: &mut W) -> std::io::Result<()> {
    if let Some(violation) = &outcome.violation {
        writeln!(out, "{}", violation)?;
    }
    writeln!(out, "Total saved: {}.", outcome.total_saved())
}

#[derive(Serialize, Debug)]
pub struct SavedPatient<'a> {
    pub patient_id: PatientId,
    #[serde(flatten)]
    pub record: &'a SaveRecord,
}

#[derive(Serialize, Debug)]
pub struct RunReport<'a> {
    pub message: Option<String>,
    pub violation: Option<&'a Violation>,
    pub total_saved: usize,
    pub saves: Vec<SavedPatient<'a>>,
    pub routes: &'a [RouteSummary],
}

impl<'a> From<&'a RunOutcome> for RunReport<'a> {
    fn from(outcome: &'a RunOutcome) -> Self {
        Self {
            message: outcome.violation.as_ref().map(Violation::to_string),
            violation: outcome.violation.as_ref(),
            total_saved: outcome.total_saved(),
            saves: outcome
                .ledger
                .iter()
                .map(|(patient_id, record)| SavedPatient { patient_id, record })
                .collect(),
            routes: &outcome.routes,
        }
    }
}

pub fn write_json_report(outcome: &RunOutcome, path: &Path) -> Result<()> {
    let json = jsonify_pretty(&RunReport::from(outcome)).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))
}

//! Renderer-facing output record.
//!
//! Flattens an [`Evaluation`] into the JSON shape consumed by displays:
//! `{"outcome", "reason_code", "starting_dose", "target_dose", "reasons", "schedule", ...}`.

use crate::{Evaluation, RejectionOutcome, Result, TitrationStep};
use serde::Serialize;

/// One schedule row with every field as display text
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScheduleRow {
    pub window: String,
    pub dose: String,
    pub action: String,
    pub monitor: String,
}

impl From<&TitrationStep> for ScheduleRow {
    fn from(step: &TitrationStep) -> Self {
        ScheduleRow {
            window: step.window.clone(),
            dose: step.dose.to_string(),
            action: step.action.label().to_string(),
            monitor: step.monitor.clone(),
        }
    }
}

/// Flat report for a single evaluation
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Report {
    pub outcome: &'static str,
    pub reason_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_remaining: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_dose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dose: Option<String>,
    pub reasons: Vec<String>,
    pub advisories: Vec<String>,
    pub schedule: Vec<ScheduleRow>,
}

impl Report {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        match evaluation {
            Evaluation::Recommendation(rec) => Report {
                outcome: "recommendation",
                reason_code: None,
                hours_remaining: None,
                starting_dose: Some(rec.starting_dose().to_string()),
                target_dose: Some(rec.target_dose.to_string()),
                reasons: rec.reason_texts().into_iter().map(String::from).collect(),
                advisories: rec.advisories.clone(),
                schedule: rec.titration_schedule.iter().map(ScheduleRow::from).collect(),
            },
            Evaluation::Rejected(rejection) => Report {
                outcome: "rejected",
                reason_code: Some(rejection.reason_code()),
                hours_remaining: match rejection {
                    RejectionOutcome::WashoutInsufficient { hours_remaining } => {
                        Some(*hours_remaining)
                    }
                    RejectionOutcome::HepaticContraindicated => None,
                },
                starting_dose: None,
                target_dose: None,
                reasons: Vec::new(),
                advisories: vec![rejection.advisory().to_string()],
                schedule: Vec::new(),
            },
        }
    }

    /// Drop optional advisory notes (for displays configured to hide them)
    ///
    /// A rejection's advisory states why no dose is offered and is always kept.
    pub fn without_advisories(mut self) -> Self {
        if self.reason_code.is_none() {
            self.advisories.clear();
        }
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

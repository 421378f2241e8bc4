//! Core domain types for dose evaluation.
//!
//! This module defines:
//! - Validated patient measurements (age, weight, washout hours)
//! - Clinical status enums (prior therapy, renal, hepatic)
//! - Dose tiers and tablet strengths
//! - Evaluation outcomes (recommendation or rejection)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hours that must elapse after the last ACE inhibitor dose before initiation
pub const WASHOUT_HOURS: u16 = 36;

// ============================================================================
// Validated Measurements
// ============================================================================

/// Patient age in whole years, always within [1, 120]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct Age(u8);

impl Age {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 120;

    pub fn new(years: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(Error::Validation(format!(
                "age must be between {} and {} years, got {}",
                Self::MIN,
                Self::MAX,
                years
            )));
        }
        Ok(Age(years as u8))
    }

    pub fn years(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Age {
    type Error = Error;

    fn try_from(years: u32) -> Result<Self> {
        Age::new(years)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> u32 {
        age.0 as u32
    }
}

/// Body weight in kilograms, always finite and within [10.0, 200.0]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct WeightKg(f64);

impl WeightKg {
    pub const MIN: f64 = 10.0;
    pub const MAX: f64 = 200.0;

    pub fn new(kg: f64) -> Result<Self> {
        if !kg.is_finite() || !(Self::MIN..=Self::MAX).contains(&kg) {
            return Err(Error::Validation(format!(
                "weight must be between {:.1} and {:.1} kg, got {}",
                Self::MIN,
                Self::MAX,
                kg
            )));
        }
        Ok(WeightKg(kg))
    }

    pub fn kg(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for WeightKg {
    type Error = Error;

    fn try_from(kg: f64) -> Result<Self> {
        WeightKg::new(kg)
    }
}

impl From<WeightKg> for f64 {
    fn from(weight: WeightKg) -> f64 {
        weight.0
    }
}

/// Hours since the prior therapy was stopped, always within [0, 168]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct WashoutHours(u16);

impl WashoutHours {
    pub const MAX: u32 = 168;

    pub fn new(hours: u32) -> Result<Self> {
        if hours > Self::MAX {
            return Err(Error::Validation(format!(
                "hours since prior therapy stopped must be between 0 and {}, got {}",
                Self::MAX,
                hours
            )));
        }
        Ok(WashoutHours(hours as u16))
    }

    pub fn hours(self) -> u16 {
        self.0
    }
}

impl TryFrom<u32> for WashoutHours {
    type Error = Error;

    fn try_from(hours: u32) -> Result<Self> {
        WashoutHours::new(hours)
    }
}

impl From<WashoutHours> for u32 {
    fn from(hours: WashoutHours) -> u32 {
        hours.0 as u32
    }
}

// ============================================================================
// Clinical Status
// ============================================================================

/// Current ACE inhibitor / ARB therapy before switching
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PriorTherapyStatus {
    None,
    LowDose,
    ModerateOrHighDose,
}

impl PriorTherapyStatus {
    pub const ALL: [PriorTherapyStatus; 3] = [
        PriorTherapyStatus::None,
        PriorTherapyStatus::LowDose,
        PriorTherapyStatus::ModerateOrHighDose,
    ];
}

impl FromStr for PriorTherapyStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(PriorTherapyStatus::None),
            "low" | "low-dose" | "low_dose" => Ok(PriorTherapyStatus::LowDose),
            "moderate-high" | "moderate_or_high_dose" => Ok(PriorTherapyStatus::ModerateOrHighDose),
            other => Err(Error::Validation(format!(
                "unknown prior therapy status: {}",
                other
            ))),
        }
    }
}

/// Renal function band by eGFR (mL/min/1.73m²)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RenalFunction {
    /// eGFR ≥ 60
    NormalOrMild,
    /// eGFR 30-59
    Moderate,
    /// eGFR < 30
    Severe,
}

impl RenalFunction {
    pub const ALL: [RenalFunction; 3] = [
        RenalFunction::NormalOrMild,
        RenalFunction::Moderate,
        RenalFunction::Severe,
    ];

    /// Classify a measured eGFR
    pub fn from_egfr(egfr: f64) -> Result<Self> {
        if !egfr.is_finite() || egfr < 0.0 {
            return Err(Error::Validation(format!("invalid eGFR: {}", egfr)));
        }
        Ok(if egfr >= 60.0 {
            RenalFunction::NormalOrMild
        } else if egfr >= 30.0 {
            RenalFunction::Moderate
        } else {
            RenalFunction::Severe
        })
    }
}

impl FromStr for RenalFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "mild" | "normal-or-mild" | "normal_or_mild" => {
                Ok(RenalFunction::NormalOrMild)
            }
            "moderate" => Ok(RenalFunction::Moderate),
            "severe" => Ok(RenalFunction::Severe),
            other => Err(Error::Validation(format!(
                "unknown renal function: {}",
                other
            ))),
        }
    }
}

/// Hepatic function, mapped to Child-Pugh class A/B/C for impairment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HepaticFunction {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl HepaticFunction {
    pub const ALL: [HepaticFunction; 4] = [
        HepaticFunction::Normal,
        HepaticFunction::Mild,
        HepaticFunction::Moderate,
        HepaticFunction::Severe,
    ];

    /// Map a Child-Pugh class (A, B, C) to hepatic function; `None` means unimpaired
    pub fn from_child_pugh(class: Option<char>) -> Result<Self> {
        match class.map(|c| c.to_ascii_uppercase()) {
            None => Ok(HepaticFunction::Normal),
            Some('A') => Ok(HepaticFunction::Mild),
            Some('B') => Ok(HepaticFunction::Moderate),
            Some('C') => Ok(HepaticFunction::Severe),
            Some(other) => Err(Error::Validation(format!(
                "unknown Child-Pugh class: {}",
                other
            ))),
        }
    }
}

impl FromStr for HepaticFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(HepaticFunction::Normal),
            "mild" => Ok(HepaticFunction::Mild),
            "moderate" => Ok(HepaticFunction::Moderate),
            "severe" => Ok(HepaticFunction::Severe),
            other => Err(Error::Validation(format!(
                "unknown hepatic function: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Patient Assessment
// ============================================================================

/// Everything the dose engine looks at for a single evaluation
///
/// Every field is domain-checked on construction, so an out-of-range
/// assessment cannot reach the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientAssessment {
    pub age: Age,
    pub weight: WeightKg,
    pub prior_therapy: PriorTherapyStatus,
    pub renal_function: RenalFunction,
    pub hepatic_function: HepaticFunction,
    pub hours_since_prior_therapy_stopped: WashoutHours,
}

impl PatientAssessment {
    /// Build an assessment from raw form values, validating each one
    pub fn new(
        age_years: u32,
        weight_kg: f64,
        prior_therapy: PriorTherapyStatus,
        renal_function: RenalFunction,
        hepatic_function: HepaticFunction,
        hours_since_prior_therapy_stopped: u32,
    ) -> Result<Self> {
        Ok(Self {
            age: Age::new(age_years)?,
            weight: WeightKg::new(weight_kg)?,
            prior_therapy,
            renal_function,
            hepatic_function,
            hours_since_prior_therapy_stopped: WashoutHours::new(
                hours_since_prior_therapy_stopped,
            )?,
        })
    }
}

// ============================================================================
// Doses and Titration
// ============================================================================

/// Sacubitril/valsartan tablet strength
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TabletStrength {
    #[serde(rename = "24/26 mg")]
    Mg24_26,
    #[serde(rename = "49/51 mg")]
    Mg49_51,
    #[serde(rename = "97/103 mg")]
    Mg97_103,
}

impl TabletStrength {
    pub fn label(self) -> &'static str {
        match self {
            TabletStrength::Mg24_26 => "24/26 mg",
            TabletStrength::Mg49_51 => "49/51 mg",
            TabletStrength::Mg97_103 => "97/103 mg",
        }
    }
}

impl fmt::Display for TabletStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target maintenance dose for every adult recommendation
pub const TARGET_DOSE: TabletStrength = TabletStrength::Mg97_103;

/// Starting dose level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DoseTier {
    Half,
    Standard,
}

impl DoseTier {
    /// Tablet strength the tier starts on
    pub fn starting_strength(self) -> TabletStrength {
        match self {
            DoseTier::Half => TabletStrength::Mg24_26,
            DoseTier::Standard => TabletStrength::Mg49_51,
        }
    }
}

impl FromStr for DoseTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "half" => Ok(DoseTier::Half),
            "standard" => Ok(DoseTier::Standard),
            other => Err(Error::Validation(format!("unknown dose tier: {}", other))),
        }
    }
}

/// What to do at a titration step
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TitrationAction {
    Initiate,
    DoubleIfTolerated,
    ContinueMaintenance,
}

impl TitrationAction {
    pub fn label(self) -> &'static str {
        match self {
            TitrationAction::Initiate => "initiate",
            TitrationAction::DoubleIfTolerated => "double if tolerated",
            TitrationAction::ContinueMaintenance => "continue maintenance",
        }
    }
}

/// One step of an up-titration schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TitrationStep {
    pub window: String,
    pub dose: TabletStrength,
    pub action: TitrationAction,
    pub monitor: String,
}

// ============================================================================
// Evaluation Outcomes
// ============================================================================

/// A risk factor that lowers the starting dose to the half tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HalfDoseTrigger {
    InadequatePriorTherapy,
    SevereRenalImpairment,
    ModerateHepaticImpairment,
}

impl HalfDoseTrigger {
    pub fn reason(self) -> &'static str {
        match self {
            HalfDoseTrigger::InadequatePriorTherapy => "not on adequate prior therapy",
            HalfDoseTrigger::SevereRenalImpairment => "severe renal impairment",
            HalfDoseTrigger::ModerateHepaticImpairment => "moderate hepatic impairment",
        }
    }
}

/// Successful evaluation: starting dose, target dose, and how to get there
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoseRecommendation {
    pub starting_dose_tier: DoseTier,
    pub target_dose: TabletStrength,
    /// Triggers in evaluation order; empty for the standard tier
    pub reasons: Vec<HalfDoseTrigger>,
    /// Informational notes that never change the tier
    pub advisories: Vec<String>,
    pub titration_schedule: Vec<TitrationStep>,
}

impl DoseRecommendation {
    pub fn starting_dose(&self) -> TabletStrength {
        self.starting_dose_tier.starting_strength()
    }

    pub fn reason_texts(&self) -> Vec<&'static str> {
        self.reasons.iter().map(|r| r.reason()).collect()
    }
}

/// Evaluation that must not produce a dose
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionOutcome {
    /// Severe hepatic impairment; never dosed
    HepaticContraindicated,
    /// Too soon after the prior therapy; re-evaluate once the hours elapse
    WashoutInsufficient { hours_remaining: u16 },
}

impl RejectionOutcome {
    pub fn reason_code(self) -> &'static str {
        match self {
            RejectionOutcome::HepaticContraindicated => "hepatic_contraindicated",
            RejectionOutcome::WashoutInsufficient { .. } => "washout_insufficient",
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            RejectionOutcome::HepaticContraindicated => {
                "No studies support use in severe hepatic impairment (Child-Pugh C); use is not recommended."
            }
            RejectionOutcome::WashoutInsufficient { .. } => {
                "Allow a 36-hour washout after the last ACE inhibitor dose to reduce the risk of angioedema."
            }
        }
    }
}

/// Result of a single evaluation; exactly one variant per assessment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    Recommendation(DoseRecommendation),
    Rejected(RejectionOutcome),
}

impl Evaluation {
    pub fn as_recommendation(&self) -> Option<&DoseRecommendation> {
        match self {
            Evaluation::Recommendation(rec) => Some(rec),
            Evaluation::Rejected(_) => None,
        }
    }

    pub fn as_rejection(&self) -> Option<RejectionOutcome> {
        match self {
            Evaluation::Recommendation(_) => None,
            Evaluation::Rejected(outcome) => Some(*outcome),
        }
    }
}

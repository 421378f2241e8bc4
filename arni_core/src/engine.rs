//! Dose rule engine.
//!
//! Maps a validated [`PatientAssessment`] to either a dose recommendation or a
//! rejection. Evaluation is pure: no I/O, no shared state, same input always
//! gives the same output.

use crate::titration::build_schedule;
use crate::{
    DoseRecommendation, DoseTier, Evaluation, HalfDoseTrigger, HepaticFunction,
    PatientAssessment, PriorTherapyStatus, RejectionOutcome, RenalFunction, TARGET_DOSE,
    WASHOUT_HOURS,
};

/// Pediatric weight cut-off for mg/kg dosing
const PEDIATRIC_WEIGHT_CUTOFF_KG: f64 = 40.0;
const PEDIATRIC_START_MG_PER_KG: f64 = 1.6;
const PEDIATRIC_TARGET_MG_PER_KG: f64 = 3.1;
const ADULT_AGE: u8 = 18;
const ELDERLY_AGE: u8 = 65;

/// Evaluate a patient assessment
///
/// ## Rules, in order
///
/// 1. **Hepatic gate**: severe impairment (Child-Pugh C) → rejected, whatever
///    else is true.
///
/// 2. **Washout gate**: if the patient is on moderate/high-dose prior therapy
///    or stopped a prior therapy (hours > 0), fewer than 36 hours since the
///    last dose → rejected with the hours still to wait. A patient who was
///    never on prior therapy (status none, 0 hours) has nothing to wash out.
///
/// 3. **Starting tier**: every half-dose trigger is checked and recorded:
///    - inadequate prior therapy (none or low dose)
///    - severe renal impairment (eGFR < 30)
///    - moderate hepatic impairment (Child-Pugh B)
///
///    Any trigger → half tier; none → standard tier.
pub fn evaluate(assessment: &PatientAssessment) -> Evaluation {
    if let Some(rejection) = check_gates(assessment) {
        tracing::warn!("Dose evaluation rejected: {}", rejection.reason_code());
        return Evaluation::Rejected(rejection);
    }

    let reasons = half_dose_triggers(assessment);
    let starting_dose_tier = if reasons.is_empty() {
        DoseTier::Standard
    } else {
        DoseTier::Half
    };

    tracing::info!(
        "Recommending {:?} starting tier ({} trigger(s))",
        starting_dose_tier,
        reasons.len()
    );

    Evaluation::Recommendation(DoseRecommendation {
        starting_dose_tier,
        target_dose: TARGET_DOSE,
        reasons,
        advisories: collect_advisories(assessment),
        titration_schedule: build_schedule(starting_dose_tier),
    })
}

/// Hard stops that short-circuit tier selection
fn check_gates(assessment: &PatientAssessment) -> Option<RejectionOutcome> {
    if assessment.hepatic_function == HepaticFunction::Severe {
        return Some(RejectionOutcome::HepaticContraindicated);
    }

    let hours = assessment.hours_since_prior_therapy_stopped.hours();
    let needs_washout =
        assessment.prior_therapy == PriorTherapyStatus::ModerateOrHighDose || hours > 0;

    if needs_washout && hours < WASHOUT_HOURS {
        return Some(RejectionOutcome::WashoutInsufficient {
            hours_remaining: WASHOUT_HOURS - hours,
        });
    }

    None
}

/// Half-dose triggers that hold for this patient, in evaluation order
fn half_dose_triggers(assessment: &PatientAssessment) -> Vec<HalfDoseTrigger> {
    let mut triggers = Vec::new();

    if matches!(
        assessment.prior_therapy,
        PriorTherapyStatus::None | PriorTherapyStatus::LowDose
    ) {
        triggers.push(HalfDoseTrigger::InadequatePriorTherapy);
    }

    if assessment.renal_function == RenalFunction::Severe {
        triggers.push(HalfDoseTrigger::SevereRenalImpairment);
    }

    if assessment.hepatic_function == HepaticFunction::Moderate {
        triggers.push(HalfDoseTrigger::ModerateHepaticImpairment);
    }

    for trigger in &triggers {
        tracing::debug!("Half-dose trigger fired: {}", trigger.reason());
    }

    triggers
}

/// Informational notes from the special-population guidance
fn collect_advisories(assessment: &PatientAssessment) -> Vec<String> {
    let mut advisories = Vec::new();
    let age = assessment.age.years();
    let weight = assessment.weight.kg();

    if age >= ELDERLY_AGE {
        advisories.push("elderly: no dose adjustment needed; monitor BP and renal function".into());
    }

    if assessment.renal_function == RenalFunction::Moderate {
        advisories
            .push("eGFR 30-59: standard dose; monitor renal function more frequently".into());
    }

    if age < ADULT_AGE {
        if weight < PEDIATRIC_WEIGHT_CUTOFF_KG {
            advisories.push(format!(
                "pediatric <40 kg: start 1.6 mg/kg BID ({:.1} mg), target 3.1 mg/kg BID ({:.1} mg)",
                weight * PEDIATRIC_START_MG_PER_KG,
                weight * PEDIATRIC_TARGET_MG_PER_KG
            ));
        } else {
            advisories.push("pediatric ≥40 kg: adult strengths apply".into());
        }
    }

    advisories
}

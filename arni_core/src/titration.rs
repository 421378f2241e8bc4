//! Titration schedule builder.
//!
//! Up-titration doubles the dose every 2-4 weeks as tolerated until the
//! 97/103 mg target is reached:
//! - Half tier: 24/26 → 49/51 → 97/103 mg (4 steps)
//! - Standard tier: 49/51 → 97/103 mg (3 steps)

use crate::{DoseTier, TabletStrength, TitrationAction, TitrationStep, TARGET_DOSE};

const MONITOR_BASELINE: &str = "BP, K+, Cr at baseline";
const MONITOR_UP_TITRATION: &str = "BP, symptoms, K+, Cr";
const MONITOR_MAINTENANCE: &str = "regular monitoring per standard";

fn step(
    window: &str,
    dose: TabletStrength,
    action: TitrationAction,
    monitor: &str,
) -> TitrationStep {
    TitrationStep {
        window: window.into(),
        dose,
        action,
        monitor: monitor.into(),
    }
}

/// Build the titration schedule for a starting tier
pub fn build_schedule(tier: DoseTier) -> Vec<TitrationStep> {
    let schedule = match tier {
        DoseTier::Half => vec![
            step(
                "week 0",
                TabletStrength::Mg24_26,
                TitrationAction::Initiate,
                MONITOR_BASELINE,
            ),
            step(
                "week 2-4",
                TabletStrength::Mg49_51,
                TitrationAction::DoubleIfTolerated,
                MONITOR_UP_TITRATION,
            ),
            step(
                "week 4-8",
                TARGET_DOSE,
                TitrationAction::DoubleIfTolerated,
                MONITOR_UP_TITRATION,
            ),
            step(
                "week 8+",
                TARGET_DOSE,
                TitrationAction::ContinueMaintenance,
                MONITOR_MAINTENANCE,
            ),
        ],
        DoseTier::Standard => vec![
            step(
                "week 0",
                TabletStrength::Mg49_51,
                TitrationAction::Initiate,
                MONITOR_BASELINE,
            ),
            step(
                "week 2-4",
                TARGET_DOSE,
                TitrationAction::DoubleIfTolerated,
                MONITOR_UP_TITRATION,
            ),
            step(
                "week 4+",
                TARGET_DOSE,
                TitrationAction::ContinueMaintenance,
                MONITOR_MAINTENANCE,
            ),
        ],
    };

    tracing::debug!("Built {:?} titration schedule with {} steps", tier, schedule.len());
    schedule
}

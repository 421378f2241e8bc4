use arni_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arni")]
#[command(about = "Sacubitril/valsartan dose recommendation and reference", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a patient and recommend a starting dose
    Evaluate {
        /// Age in years (1-120)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
        age: u32,

        /// Weight in kg (10.0-200.0)
        #[arg(long)]
        weight: f64,

        /// Prior ACE inhibitor/ARB therapy (none, low, moderate-high)
        #[arg(long)]
        prior: PriorTherapyStatus,

        /// Renal function (normal, moderate, severe)
        #[arg(long, conflicts_with = "egfr", required_unless_present = "egfr")]
        renal: Option<RenalFunction>,

        /// Measured eGFR in mL/min/1.73m², classified automatically
        #[arg(long)]
        egfr: Option<f64>,

        /// Hepatic function (normal, mild, moderate, severe)
        #[arg(long, conflicts_with = "child_pugh", required_unless_present = "child_pugh")]
        hepatic: Option<HepaticFunction>,

        /// Child-Pugh class (A, B, C)
        #[arg(long)]
        child_pugh: Option<char>,

        /// Hours since the prior therapy was stopped (0-168)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=168))]
        hours_since_stop: u32,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Show the titration schedule for a starting tier
    Schedule {
        /// Starting tier (half, standard)
        #[arg(long)]
        tier: DoseTier,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// List reference tables, or show one
    Reference {
        /// Table id (omit to list)
        id: Option<String>,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    arni_core::logging::init_with_level(&config.logging.level);

    match cli.command {
        Commands::Evaluate {
            age,
            weight,
            prior,
            renal,
            egfr,
            hepatic,
            child_pugh,
            hours_since_stop,
            format,
        } => {
            let renal = match (renal, egfr) {
                (Some(renal), _) => renal,
                (None, Some(egfr)) => RenalFunction::from_egfr(egfr)?,
                (None, None) => {
                    return Err(Error::Validation("renal function is required".into()))
                }
            };
            let hepatic = match hepatic {
                Some(hepatic) => hepatic,
                None => HepaticFunction::from_child_pugh(child_pugh)?,
            };

            let assessment =
                PatientAssessment::new(age, weight, prior, renal, hepatic, hours_since_stop)?;
            cmd_evaluate(&assessment, format.unwrap_or(config.output.format), &config)
        }
        Commands::Schedule { tier, format } => {
            cmd_schedule(tier, format.unwrap_or(config.output.format))
        }
        Commands::Reference { id, format } => {
            cmd_reference(id.as_deref(), format.unwrap_or(config.output.format))
        }
    }
}

fn cmd_evaluate(
    assessment: &PatientAssessment,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    tracing::debug!("Evaluating {:?}", assessment);

    let evaluation = evaluate(assessment);
    let mut report = Report::from_evaluation(&evaluation);
    if !config.output.show_advisories {
        report = report.without_advisories();
    }

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => display_report(&report),
    }

    Ok(())
}

fn cmd_schedule(tier: DoseTier, format: OutputFormat) -> Result<()> {
    let rows: Vec<ScheduleRow> = build_schedule(tier).iter().map(ScheduleRow::from).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            println!("\n  Titration from {} BID:", tier.starting_strength());
            display_schedule(&rows);
            println!();
        }
    }

    Ok(())
}

fn cmd_reference(id: Option<&str>, format: OutputFormat) -> Result<()> {
    let store = get_reference_store();

    let Some(id) = id else {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&store.ids())?),
            OutputFormat::Text => {
                println!("Reference tables (label revision {}):", store.label_revision);
                for table in store.tables() {
                    println!("  {:<20} {}", table.id, table.title);
                }
            }
        }
        return Ok(());
    };

    let table = store.table(id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table)?),
        OutputFormat::Text => display_table(table),
    }

    Ok(())
}

fn display_report(report: &Report) {
    println!("\n╭─────────────────────────────────────────╮");
    if report.outcome == "recommendation" {
        println!("│  DOSE RECOMMENDATION");
    } else {
        println!("│  DO NOT START");
    }
    println!("╰─────────────────────────────────────────╯");
    println!();

    if let Some(code) = report.reason_code {
        println!("  Reason: {}", code.replace('_', " "));
        if let Some(hours) = report.hours_remaining {
            println!("  Wait {} more hours, then re-evaluate.", hours);
        }
    }

    if let (Some(start), Some(target)) = (&report.starting_dose, &report.target_dose) {
        println!("  Starting dose: {} BID", start);
        println!("  Target dose:   {} BID", target);
    }

    if !report.reasons.is_empty() {
        println!();
        println!("  Reduced starting dose because:");
        for reason in &report.reasons {
            println!("  → {}", reason);
        }
    }

    if !report.schedule.is_empty() {
        println!();
        println!("  Titration:");
        display_schedule(&report.schedule);
    }

    if !report.advisories.is_empty() {
        println!();
        for advisory in &report.advisories {
            println!("  ℹ {}", advisory);
        }
    }

    println!();
}

fn display_schedule(rows: &[ScheduleRow]) {
    for row in rows {
        println!(
            "  {:<10} {:<10} {:<22} ({})",
            row.window, row.dose, row.action, row.monitor
        );
    }
}

fn display_table(table: &Table) {
    println!("\n  {}", table.title);
    println!("  {}", table.columns.join(" | "));
    for row in &table.rows {
        println!("  {}", row.join(" | "));
    }
    println!();
}

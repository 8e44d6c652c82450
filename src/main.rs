//! NCD-CIE command-line interface
//!
//! Scores demo or file-supplied patients against the knowledge graph and runs
//! what-if simulations.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use ncd_cie::cascade::preset;
use ncd_cie::clinical::{demo_patient, demo_patients, vital_status};
use ncd_cie::{
    CausalEngine, Covariate, Covariates, EngineConfig, Interventions, PatientProfile, RiskSet,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ncd-cie", version, about = "NCD-CIE causal risk engine")]
struct Cli {
    /// YAML engine configuration
    #[arg(long, global = true, env = "NCD_CIE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct PatientArgs {
    /// Demo patient id
    #[arg(long, default_value = "demo-moderate")]
    patient: String,

    /// Patient profile JSON file (overrides --patient)
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score all diseases for a patient
    Risk {
        #[command(flatten)]
        patient: PatientArgs,
    },
    /// Break a disease risk down by contributing factor
    Contributions {
        /// Disease id (cad, stroke, hf, pad, t2dm, ckd, nafld)
        disease: String,

        #[command(flatten)]
        patient: PatientArgs,
    },
    /// Simulate an intervention and compare with baseline
    WhatIf {
        #[command(flatten)]
        patient: PatientArgs,

        /// Intervention as covariate=value, repeatable
        #[arg(long = "set", value_name = "COVARIATE=VALUE")]
        set: Vec<String>,

        /// Preset scenario name
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Hop distance between two nodes
    Depth { source: String, target: String },
    /// Check the knowledge graph's structural invariants
    Validate,
    /// List preset scenarios
    Scenarios,
    /// List demo patients
    Patients,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = CausalEngine::new(config)?;

    match cli.command {
        Commands::Risk { patient } => run_risk(&engine, &load_patient(&patient)?, &cli.format),
        Commands::Contributions { disease, patient } => {
            run_contributions(&engine, &load_patient(&patient)?, &disease, &cli.format)
        }
        Commands::WhatIf {
            patient,
            set,
            scenario,
        } => run_what_if(&engine, &load_patient(&patient)?, &set, scenario.as_deref(), &cli.format),
        Commands::Depth { source, target } => {
            let depth = engine.get_depth(&source, &target);
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "source": source, "target": target, "depth": depth })
                ),
                OutputFormat::Table => {
                    if depth > engine.config().cascade.max_depth {
                        println!("{} -> {}: unreachable within {} hops", source, target, depth - 1);
                    } else {
                        println!("{} -> {}: {} hop(s)", source, target, depth);
                    }
                }
            }
            Ok(())
        }
        Commands::Validate => {
            engine.graph().validate()?;
            println!(
                "Knowledge graph OK: {} nodes, {} edges",
                engine.graph().node_count(),
                engine.graph().edge_count()
            );
            Ok(())
        }
        Commands::Scenarios => {
            for scenario in ncd_cie::cascade::presets() {
                println!("{:<24} {}", scenario.name, scenario.description);
            }
            Ok(())
        }
        Commands::Patients => {
            for patient in demo_patients() {
                println!("{:<14} {}", patient.id, patient.name);
            }
            Ok(())
        }
    }
}

fn load_patient(args: &PatientArgs) -> Result<PatientProfile> {
    if let Some(path) = &args.input {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading patient {}", path.display()))?;
        return Ok(serde_json::from_str(&raw)?);
    }
    demo_patient(&args.patient).ok_or_else(|| anyhow!("unknown demo patient: {}", args.patient))
}

fn parse_interventions(pairs: &[String], scenario: Option<&str>, baseline: &Covariates) -> Result<Interventions> {
    let mut interventions = match scenario {
        Some(name) => preset(name)
            .ok_or_else(|| anyhow!("unknown scenario: {}", name))?
            .resolve(baseline),
        None => Interventions::new(),
    };
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected COVARIATE=VALUE, got {}", pair))?;
        let covariate: Covariate = key.parse()?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}", key))?;
        interventions.set(covariate, value);
    }
    if interventions.is_empty() {
        bail!("no interventions given; use --set or --scenario");
    }
    Ok(interventions)
}

fn run_risk(engine: &CausalEngine, patient: &PatientProfile, format: &OutputFormat) -> Result<()> {
    let risks = engine.all_risks(&patient.covariates);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&risks)?),
        OutputFormat::Table => {
            println!("{} ({})", patient.name, patient.id);
            for violation in patient.covariates.out_of_range() {
                println!("  warning: {}", violation);
            }
            print_vitals(&patient.covariates);
            println!("{}", risk_table(engine, &risks));
        }
    }
    Ok(())
}

fn print_vitals(covariates: &Covariates) {
    let flagged: Vec<String> = covariates
        .iter()
        .filter_map(|(covariate, value)| {
            let status = vital_status(covariate, value)?;
            Some(format!("{}={} ({})", covariate, value, status))
        })
        .collect();
    if !flagged.is_empty() {
        println!("  vitals: {}", flagged.join(", "));
    }
}

fn risk_table(engine: &CausalEngine, risks: &RiskSet) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Risk", "Value", "95% CI", "Level"]);
    for (key, risk) in risks.iter() {
        table.add_row(vec![
            key.to_string(),
            format_percent(risk.value),
            format!("{} - {}", format_percent(risk.ci_low), format_percent(risk.ci_high)),
            engine.risk_level(risk.value).to_string(),
        ]);
    }
    table
}

fn run_contributions(
    engine: &CausalEngine,
    patient: &PatientProfile,
    disease: &str,
    format: &OutputFormat,
) -> Result<()> {
    let contributions = engine.contributions(&patient.covariates, disease);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&contributions)?),
        OutputFormat::Table => {
            if contributions.is_empty() {
                println!("(no contributing factors for {})", disease);
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Factor", "z", "Contribution"]);
            for c in &contributions {
                table.add_row(vec![
                    c.label.clone(),
                    format!("{:+.2}", c.z_score),
                    format!("{:+.3}", c.contribution),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_what_if(
    engine: &CausalEngine,
    patient: &PatientProfile,
    pairs: &[String],
    scenario: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let interventions = parse_interventions(pairs, scenario, &patient.covariates)?;
    let comparison = engine.compare(&patient.covariates, &interventions);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Risk", "Baseline", "Scenario", "Change"]);
            for change in &comparison.changes {
                table.add_row(vec![
                    change.key.to_string(),
                    format_percent(change.baseline),
                    format_percent(change.scenario),
                    format!("{:+.2} pp", change.change * 100.0),
                ]);
            }
            println!("{}", table);

            println!("Deltas:");
            for (node, delta) in &comparison.scenario.deltas {
                println!("  {:<14} {:+.3}", node.as_str(), delta);
            }
            println!("{} edge(s) activated", comparison.scenario.activated_edges.len());
        }
    }
    Ok(())
}

fn format_percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

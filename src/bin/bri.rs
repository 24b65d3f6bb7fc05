//! BRI CLI - Command-line interface for the BRI scoring engine
//!
//! Commands:
//! - score: Score behavioral signal batches into assessments (batch mode)
//! - summarize: Aggregate composite scores into cohort summaries
//! - validate: Validate an engine configuration file

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bri_core::config::EngineConfig;
use bri_core::pipeline::BriProcessor;
use bri_core::report::ReportEncoder;
use bri_core::types::{BehavioralSignal, CohortSummary, CompositeScore, Period, SubjectAssessment};
use bri_core::ENGINE_VERSION;

/// BRI - Behavioral risk scoring engine
#[derive(Parser)]
#[command(name = "bri")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score behavioral signals into a Behavioral Risk Index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score behavioral signal batches into assessments (batch mode)
    Score {
        /// Input file of BehavioralSignal NDJSON (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Engine configuration JSON (defaults to built-in policy)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit one wrapped RiskReport instead of assessment NDJSON
        #[arg(long)]
        report: bool,

        /// Append a cohort summary per period
        #[arg(long)]
        summary: bool,

        /// Load trend history from file before scoring
        #[arg(long)]
        load_trends: Option<PathBuf>,

        /// Save trend history to file after scoring
        #[arg(long)]
        save_trends: Option<PathBuf>,
    },

    /// Aggregate composite scores into cohort summaries
    Summarize {
        /// Input file of CompositeScore NDJSON (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Engine configuration JSON (defaults to built-in policy)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate an engine configuration file
    Validate {
        /// Configuration file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            input,
            output,
            config,
            report,
            summary,
            load_trends,
            save_trends,
        } => cmd_score(
            &input,
            &output,
            config.as_deref(),
            report,
            summary,
            load_trends.as_deref(),
            save_trends.as_deref(),
        ),
        Commands::Summarize {
            input,
            output,
            config,
        } => cmd_summarize(&input, &output, config.as_deref()),
        Commands::Validate { input } => cmd_validate(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_score(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    report: bool,
    summary: bool,
    load_trends: Option<&Path>,
    save_trends: Option<&Path>,
) -> Result<(), String> {
    let config = load_config(config_path)?;
    let mut processor = BriProcessor::new(config).map_err(|e| e.to_string())?;

    if let Some(path) = load_trends {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        processor.load_trends(&json).map_err(|e| e.to_string())?;
    }

    let signals: Vec<BehavioralSignal> = read_ndjson(input)?;

    // Group by period, then subject, so trend appends stay in order
    let mut batches: BTreeMap<(Period, String), Vec<BehavioralSignal>> = BTreeMap::new();
    for signal in signals {
        batches
            .entry((signal.period, signal.subject_id.clone()))
            .or_default()
            .push(signal);
    }

    let mut assessments: Vec<SubjectAssessment> = Vec::new();
    let mut period_scores: BTreeMap<Period, Vec<CompositeScore>> = BTreeMap::new();

    for ((period, subject_id), batch) in &batches {
        let assessment = processor
            .assess(subject_id, *period, batch)
            .map_err(|e| format!("scoring {subject_id} at {period}: {e}"))?;
        period_scores
            .entry(*period)
            .or_default()
            .push(assessment.score.clone());
        assessments.push(assessment);
    }

    let summaries: Vec<CohortSummary> = if summary {
        period_scores
            .iter()
            .map(|(period, scores)| processor.summarize(*period, scores))
            .collect()
    } else {
        Vec::new()
    };

    let rendered = if report {
        let encoder = ReportEncoder::new();
        let cohort_summary = summaries.last().cloned();
        encoder
            .encode_to_json(assessments, cohort_summary)
            .map_err(|e| e.to_string())?
    } else {
        let mut lines: Vec<String> = Vec::new();
        for assessment in &assessments {
            lines.push(serde_json::to_string(assessment).map_err(|e| e.to_string())?);
        }
        for cohort_summary in &summaries {
            lines.push(serde_json::to_string(cohort_summary).map_err(|e| e.to_string())?);
        }
        lines.join("\n") + "\n"
    };

    write_output(output, &rendered)?;

    if let Some(path) = save_trends {
        let json = processor.save_trends().map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    }

    Ok(())
}

fn cmd_summarize(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config = load_config(config_path)?;
    let processor = BriProcessor::new(config).map_err(|e| e.to_string())?;

    let scores: Vec<CompositeScore> = read_ndjson(input)?;

    let mut by_period: BTreeMap<Period, Vec<CompositeScore>> = BTreeMap::new();
    for score in scores {
        by_period.entry(score.period).or_default().push(score);
    }

    let mut lines: Vec<String> = Vec::new();
    for (period, period_scores) in &by_period {
        let summary = processor.summarize(*period, period_scores);
        lines.push(serde_json::to_string(&summary).map_err(|e| e.to_string())?);
    }

    write_output(output, &(lines.join("\n") + "\n"))
}

fn cmd_validate(input: &Path) -> Result<(), String> {
    let json = read_input(input)?;
    let config = EngineConfig::from_json(&json).map_err(|e| format!("parse error: {e}"))?;
    config.validate().map_err(|e| e.to_string())?;
    println!("configuration OK: {} factors weighted", config.weights.len());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    match path {
        Some(path) => {
            let json = read_input(path)?;
            EngineConfig::from_json(&json).map_err(|e| format!("parse error: {e}"))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err("refusing to read from a terminal; pipe input or pass a file".to_string());
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("cannot read stdin: {e}"))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
    }
}

fn read_ndjson<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, String> {
    let text = read_input(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", number + 1))
        })
        .collect()
}

fn write_output(path: &Path, content: &str) -> Result<(), String> {
    if path.as_os_str() == "-" {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("cannot write stdout: {e}"))
    } else {
        fs::write(path, content).map_err(|e| format!("cannot write {}: {e}", path.display()))
    }
}

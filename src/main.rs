//! Equidad CLI
//!
//! Fairness-audit entry point for the equidad library.
//!
//! # Usage
//!
//! ```bash
//! # Run an audit from config
//! equidad audit audit.yaml
//!
//! # Audit with overrides and JSON output
//! equidad audit audit.yaml --prior 1e-4 --format json
//!
//! # Validate config
//! equidad validate audit.yaml
//! ```

use clap::Parser;
use equidad::config::{
    apply_overrides, load_spec, validate_spec, AuditArgs, Cli, Command, OutputFormat, ValidateArgs,
};
use equidad::frame::Frame;
use equidad::report::audit;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    let result = match cli.command {
        Command::Audit(args) => run_audit(args, log_level),
        Command::Validate(args) => run_validate(args, log_level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_audit(args: AuditArgs, level: LogLevel) -> Result<(), String> {
    let mut spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_spec(&spec).map_err(|e| format!("Config error: {e}"))?;

    log(
        level,
        LogLevel::Verbose,
        &format!("Equidad: auditing {}", spec.data.path.display()),
    );

    let frame =
        Frame::read_csv(&spec.data.path).map_err(|e| format!("Dataset error: {e}"))?;

    let predictions = frame
        .column_as_f64(&spec.data.prediction)
        .ok_or_else(|| format!("Dataset error: prediction column not found: {}", spec.data.prediction))?;

    let truths = match &spec.data.target {
        Some(target) => Some(
            frame
                .column_as_f64(target)
                .ok_or_else(|| format!("Dataset error: target column not found: {target}"))?,
        ),
        None => None,
    };

    let labeler = spec.labeler().map_err(|e| format!("Config error: {e}"))?;
    let report = audit(
        &frame,
        &labeler,
        &predictions,
        truths.as_deref(),
        spec.fairness.prior,
        spec.fairness.min_group_size,
    )
    .map_err(|e| format!("Audit error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format!("Fairness audit: {}", spec.data.path.display()),
            );
            println!("  Rows: {}", report.n_rows);
            println!("  Protected: {:?}", report.protected);
            println!("  Groups: {}", report.groups.len());
            println!();
            for group in &report.groups {
                match group.accuracy {
                    Some(accuracy) => println!(
                        "  {}  n={}  rate={:.4}  accuracy={:.4}",
                        group.label, group.count, group.positive_rate, accuracy
                    ),
                    None => println!(
                        "  {}  n={}  rate={:.4}",
                        group.label, group.count, group.positive_rate
                    ),
                }
            }
            println!();
            println!("  Differential Fairness epsilon: {:.6}", report.epsilon);
            if let Some(warning) = &report.small_group_warning {
                println!();
                println!("  Warning: {warning}");
            }
        }
        OutputFormat::Json => {
            let json = report
                .to_json()
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", report.to_csv());
        }
    }

    Ok(())
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;

    validate_spec(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        println!("  Dataset: {}", spec.data.path.display());
        println!("  Prediction column: {}", spec.data.prediction);
        if let Some(target) = &spec.data.target {
            println!("  Target column: {target}");
        }
        println!();
        println!("  Protected columns: {:?}", spec.protected);
        println!(
            "  Label separators: {:?} between pairs, {:?} key/value",
            spec.labels.sep, spec.labels.kv_sep
        );
        println!("  Missing token: {:?}", spec.labels.missing_token);
        println!();
        println!("  Smoothing prior: {}", spec.fairness.prior);
        println!("  Min group size: {}", spec.fairness.min_group_size);
    }

    Ok(())
}

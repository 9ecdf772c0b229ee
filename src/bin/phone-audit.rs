//! CLI batch driver for phone-number auditing.
//!
//! A thin collaborator around the library core: it supplies candidate
//! strings (one per line, or a single argument), aggregates the results it
//! owns into an `AuditReport`, and prints them. The core itself performs no
//! I/O.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use phone_audit::prelude::*;

#[derive(Parser)]
#[command(name = "phone-audit")]
#[command(about = "Audit and normalize phone numbers under the Swiss numbering plan", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single phone number and print the outcome
    Check {
        /// The raw phone number to audit
        number: String,
    },

    /// Audit a file of candidate numbers and print the grouped report
    Audit {
        /// Input file, one candidate per line (stdin if omitted)
        path: Option<PathBuf>,

        /// Print only the summary counts
        #[arg(short, long)]
        summary: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let auditor = Auditor::swiss();

    match cli.command {
        Commands::Check { number } => check(&auditor, &number),
        Commands::Audit { path, summary } => audit_lines(&auditor, path, summary),
    }
}

fn check(auditor: &Auditor, number: &str) -> Result<()> {
    let result = auditor
        .audit(number)
        .with_context(|| format!("auditing {:?}", number))?;

    println!(
        "{} [{}] {}",
        colored_disposition(result.disposition),
        result.rule_id,
        result.rule_description
    );
    if result.was_rewritten() {
        println!("{} -> {}", result.original_input, result.normalized_output.green());
    } else {
        println!("{}", result.original_input);
    }
    Ok(())
}

fn audit_lines(auditor: &Auditor, path: Option<PathBuf>, summary: bool) -> Result<()> {
    let reader: Box<dyn Read> = match &path {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let mut report = AuditReport::new();
    for line in BufReader::new(reader).lines() {
        let line = line.context("reading input")?;
        let candidate = line.trim();
        if candidate.is_empty() {
            continue;
        }
        let result = auditor
            .audit(candidate)
            .with_context(|| format!("auditing {:?}", candidate))?;
        report.record(&result);
    }

    if !summary {
        print!("{}", report);
        println!();
    }

    let review: usize = report.needs_review().map(|group| group.entries.len()).sum();
    println!(
        "{} audited, {} rewritten, {} need manual review",
        report.len(),
        report.rewritten().to_string().green(),
        review.to_string().yellow()
    );
    Ok(())
}

fn colored_disposition(disposition: Disposition) -> String {
    let label = disposition.as_str();
    match disposition {
        Disposition::Fixable => label.green().to_string(),
        Disposition::Unchanged => label.blue().to_string(),
        Disposition::Reject => label.red().to_string(),
        Disposition::Unclassified => label.yellow().to_string(),
    }
}

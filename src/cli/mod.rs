//! Command-line interface for patient-list.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **generate**: Scan register exports and write the master patient list
//! - **check**: Validate an existing master patient list
//!
//! ## Usage
//!
//! ```text
//! # Scan the standard register folders and write master-patient-list.txt
//! patient-list generate
//!
//! # Scan specific folders, including CSV exports
//! patient-list generate --folder exports/opd --folder exports/anc --extension xlsx --extension csv
//!
//! # JSON summary for scripting
//! patient-list --format json generate
//!
//! # Check a list before handing it to the extraction pipeline
//! patient-list check master-patient-list.txt
//! ```

use clap::{Parser, Subcommand};

pub mod check;
pub mod generate;

#[derive(Parser)]
#[command(name = "patient-list")]
#[command(version)]
#[command(about = "Build a deduplicated master patient list from register spreadsheet exports")]
#[command(
    long_about = "patient-list scans folders of register exports (Excel workbooks, optionally CSV/TSV), finds the 'Patient No.' column in each sheet, and writes every valid patient number once, sorted, to a plain-text list.\n\nFiles that cannot be read or have no recognizable header are reported and skipped; the list is always written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan register exports and write the master patient list
    Generate(generate::GenerateArgs),

    /// Validate an existing master patient list
    Check(check::CheckArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Format a count with thousands separators (e.g. `12,345`)
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "patient-list",
            "-v",
            "generate",
            "--folder",
            "a",
            "--folder",
            "b",
            "--extension",
            ".CSV",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.folders.len(), 2);
                assert_eq!(args.extensions, vec!["csv".to_string()]);
            }
            Commands::Check(_) => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_extension() {
        assert!(Cli::try_parse_from(["patient-list", "generate", "--extension", "pdf"]).is_err());
    }
}

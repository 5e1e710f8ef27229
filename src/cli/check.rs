use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{format_count, OutputFormat};
use crate::output::emitter::DEFAULT_OUTPUT_FILE;
use crate::parsing::patient_list::{parse_patient_list_file, InvalidLine, PatientList};

/// Invalid lines listed in text output before truncating
const MAX_INVALID_SHOWN: usize = 20;

#[derive(Args)]
pub struct CheckArgs {
    /// Patient list to check
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    pub input: PathBuf,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let list = parse_patient_list_file(&args.input)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", args.input.display()))?;

    match format {
        OutputFormat::Text => print_text_report(&args, &list),
        OutputFormat::Json => print_json_report(&args, &list)?,
    }

    if !list.is_clean() {
        anyhow::bail!("{} failed validation", args.input.display());
    }

    Ok(())
}

fn print_text_report(args: &CheckArgs, list: &PatientList) {
    println!("Patient list: {}", args.input.display());
    println!("  Entries: {}", format_count(list.patients.len()));
    println!("  Unique patients: {}", format_count(list.unique_patients()));
    if let Some(declared) = list.declared_total {
        let marker = if list.total_matches() { "✓" } else { "✗" };
        println!("  Declared total: {} {marker}", format_count(declared));
    }
    println!("  Duplicates: {}", list.duplicates);
    println!("  Sorted: {}", if list.is_sorted() { "yes" } else { "no" });
    println!("  Invalid lines: {}", list.invalid.len());

    for invalid in list.invalid.iter().take(MAX_INVALID_SHOWN) {
        println!("    line {}: {}", invalid.line, invalid.content);
    }
    if list.invalid.len() > MAX_INVALID_SHOWN {
        println!("    ... and {} more", list.invalid.len() - MAX_INVALID_SHOWN);
    }
}

#[derive(Serialize)]
struct CheckJson<'a> {
    input: &'a PathBuf,
    entries: usize,
    unique_patients: usize,
    declared_total: Option<usize>,
    duplicates: usize,
    sorted: bool,
    invalid: &'a [InvalidLine],
    valid: bool,
}

fn print_json_report(args: &CheckArgs, list: &PatientList) -> anyhow::Result<()> {
    let report = CheckJson {
        input: &args.input,
        entries: list.patients.len(),
        unique_patients: list.unique_patients(),
        declared_total: list.declared_total,
        duplicates: list.duplicates,
        sorted: list.is_sorted(),
        invalid: &list.invalid,
        valid: list.is_clean(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

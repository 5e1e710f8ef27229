use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Args;
use serde::Serialize;

use crate::cli::{format_count, OutputFormat};
use crate::core::types::{
    FileStatus, FileSummary, FolderSummary, ScanResult, ScanWarning, SourceLocation,
};
use crate::corpus::config::ScanConfig;
use crate::corpus::scanner::{CorpusScanner, NoopObserver, ScanObserver};
use crate::extraction::header::{HeaderHeuristics, DEFAULT_MAX_SEARCH_ROWS, DEFAULT_MIN_FILLED_CELLS};
use crate::output::emitter::{self, DEFAULT_OUTPUT_FILE};
use crate::parsing::{FileSheetLoader, SUPPORTED_EXTENSIONS};

/// Number of patient numbers shown after generation
const SAMPLE_SIZE: usize = 10;

const RULE_WIDTH: usize = 70;

#[derive(Args)]
pub struct GenerateArgs {
    /// Folder to scan; repeat for several (defaults to the standard register folders)
    #[arg(long = "folder", value_name = "DIR")]
    pub folders: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// File extension to scan; repeat for several (defaults to xlsx and xls)
    #[arg(long = "extension", value_name = "EXT", value_parser = parse_extension)]
    pub extensions: Vec<String>,

    /// Number of rows searched for the header row
    #[arg(long, default_value_t = DEFAULT_MAX_SEARCH_ROWS)]
    pub max_header_rows: usize,

    /// Minimum filled cells for a row to count as the header row
    #[arg(long, default_value_t = DEFAULT_MIN_FILLED_CELLS)]
    pub min_header_cells: usize,
}

impl GenerateArgs {
    /// Build the scan configuration, falling back to defaults for anything not given
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        let defaults = ScanConfig::default();

        ScanConfig {
            locations: if self.folders.is_empty() {
                defaults.locations
            } else {
                self.folders.iter().cloned().map(SourceLocation::new).collect()
            },
            extensions: if self.extensions.is_empty() {
                defaults.extensions
            } else {
                self.extensions.clone()
            },
            lock_file_prefix: defaults.lock_file_prefix,
            heuristics: HeaderHeuristics {
                max_search_rows: self.max_header_rows,
                min_filled_cells: self.min_header_cells,
                ..HeaderHeuristics::default()
            },
        }
    }
}

fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim().trim_start_matches('.').to_lowercase();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(format!(
            "unsupported extension '{s}' (supported: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        ))
    }
}

pub fn run(args: GenerateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = args.scan_config();
    let scanner = CorpusScanner::new(config, FileSheetLoader);

    let result = match format {
        OutputFormat::Text => {
            print_banner("LHIMS MASTER PATIENT LIST GENERATOR");
            println!();
            let mut reporter = ConsoleReporter::default();
            scanner.scan_with(&mut reporter)
        }
        OutputFormat::Json => scanner.scan_with(&mut NoopObserver),
    };

    let generated_at = Local::now();
    emitter::emit(&result, &args.output, &generated_at)?;

    match format {
        OutputFormat::Text => print_text_summary(&result, &args.output),
        OutputFormat::Json => print_json_summary(&result, &args.output, &generated_at)?,
    }

    Ok(())
}

/// Prints scan progress to stdout as it happens
#[derive(Default)]
struct ConsoleReporter {
    in_file: bool,
    file_warning: Option<String>,
}

impl ScanObserver for ConsoleReporter {
    fn folder_started(&mut self, location: &SourceLocation, _file_count: usize) {
        println!("📂 Scanning: {location}");
    }

    fn file_started(&mut self, index: usize, total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        print!("  [{index}/{total}] Processing: {name}...");
        std::io::stdout().flush().ok();
        self.in_file = true;
    }

    fn file_finished(&mut self, summary: &FileSummary) {
        match (summary.status, self.file_warning.take()) {
            (FileStatus::Warning(_), Some(message)) => println!(" ⚠ {message}"),
            (FileStatus::Warning(kind), None) => println!(" ⚠ {kind}"),
            (FileStatus::Ok, _) => println!(" ✓ ({} patients)", summary.patients),
        }
        self.in_file = false;
    }

    fn warning(&mut self, warning: &ScanWarning) {
        if self.in_file {
            self.file_warning = Some(warning.message.clone());
        } else {
            println!("⚠ {}", warning.message);
        }
    }

    fn folder_finished(&mut self, folder: &FolderSummary) {
        if !folder.scanned {
            return;
        }
        println!(
            "  ✓ Found {} unique patients in {} files",
            format_count(folder.unique_patients()),
            folder.files.len()
        );
        println!();
    }
}

fn print_banner(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_text_summary(result: &ScanResult, output: &Path) {
    println!();
    print_banner("GENERATING OUTPUT FILE");
    println!();

    println!("✓ Master patient list generated: {}", output.display());
    println!("  Total unique patients: {}", format_count(result.unique_patients()));
    println!("  Files scanned: {}", result.files_scanned);
    if !result.warnings.is_empty() {
        println!("  Warnings: {}", result.warnings.len());
    }
    println!();

    println!("Sample patients:");
    for patient in result.sample(SAMPLE_SIZE) {
        println!("  - {patient}");
    }
    if result.unique_patients() > SAMPLE_SIZE {
        println!(
            "  ... and {} more",
            format_count(result.unique_patients() - SAMPLE_SIZE)
        );
    }
    println!();

    print_banner("NEXT STEPS");
    println!("1. Review: {}", output.display());
    println!("2. Run extraction: npm run extract:patients");
    println!("3. Find JSON data in: data/patient-json/");
    println!();
}

#[derive(Serialize)]
struct FolderJson<'a> {
    location: &'a SourceLocation,
    scanned: bool,
    unique_patients: usize,
    files: &'a [FileSummary],
}

#[derive(Serialize)]
struct GenerateJson<'a> {
    output: &'a Path,
    generated_at: String,
    total_unique_patients: usize,
    files_scanned: usize,
    source_folders: &'a [SourceLocation],
    folders: Vec<FolderJson<'a>>,
    warnings: &'a [ScanWarning],
    sample: Vec<&'a str>,
}

fn print_json_summary(
    result: &ScanResult,
    output: &Path,
    generated_at: &DateTime<Local>,
) -> anyhow::Result<()> {
    let summary = GenerateJson {
        output,
        generated_at: generated_at.to_rfc3339(),
        total_unique_patients: result.unique_patients(),
        files_scanned: result.files_scanned,
        source_folders: &result.source_locations,
        folders: result
            .folders
            .iter()
            .map(|f| FolderJson {
                location: &f.location,
                scanned: f.scanned,
                unique_patients: f.unique_patients(),
                files: &f.files,
            })
            .collect(),
        warnings: &result.warnings,
        sample: result
            .sample(SAMPLE_SIZE)
            .into_iter()
            .map(|p| p.as_str())
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

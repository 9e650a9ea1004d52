use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use syllabus_core::*;

#[derive(Parser)]
#[command(name = "syllabus")]
#[command(about = "Syllabus event and grading export tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the summary, events and evaluations of a parse result
    Show {
        /// Parse result JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Normalize evaluation weights before showing them
        #[arg(long)]
        normalize: bool,
    },

    /// Export events as a calendar or spreadsheet file
    Export {
        /// Parse result JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum)]
        format: FormatArg,

        /// Directory to write into (defaults to config export.output_dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Calendar name for ICS exports (defaults to config export.calendar_name)
        #[arg(long)]
        calendar_name: Option<String>,
    },

    /// Rescale evaluation weights so they sum to 100
    Normalize {
        /// Parse result JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Write the normalized result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Format an ISO date (YYYY-MM-DD) for display
    Date {
        /// Date to format; omit for an undated value
        date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Ics,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ics => ExportFormat::Ics,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    syllabus_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Show { input, normalize } => cmd_show(&input, normalize, &config),
        Commands::Export {
            input,
            format,
            out_dir,
            calendar_name,
        } => cmd_export(&input, format.into(), out_dir, calendar_name, &config),
        Commands::Normalize { input, output } => cmd_normalize(&input, output, &config),
        Commands::Date { date } => {
            println!("{}", format_display_date(date.as_deref()));
            Ok(())
        }
    }
}

fn load_result(input: &Path) -> Result<ParseResult> {
    let document = std::fs::read(input)?;
    tracing::debug!("Read {} bytes from {:?}", document.len(), input);
    JsonResultExtractor.extract(&document)
}

fn cmd_show(input: &Path, normalize: bool, config: &Config) -> Result<()> {
    let result = load_result(input)?;

    let evaluations = if normalize {
        config
            .normalization
            .normalizer()
            .normalize_evaluations(&result.evaluations)
    } else {
        result.evaluations.clone()
    };
    let report = EvaluationReport::from_items(evaluations, config.normalization.tolerance);

    print!("{}", render_report(&result, &report));
    Ok(())
}

fn cmd_export(
    input: &Path,
    format: ExportFormat,
    out_dir: Option<PathBuf>,
    calendar_name: Option<String>,
    config: &Config,
) -> Result<()> {
    let result = load_result(input)?;

    let options = ExportOptions {
        calendar_name: Some(calendar_name.unwrap_or_else(|| config.export.calendar_name.clone())),
    };

    let Some(artifact) = build_export(&result.events, format, &options, &SystemClock)? else {
        println!("No events to export.");
        return Ok(());
    };

    let out_dir = out_dir.unwrap_or_else(|| config.export.output_dir.clone());
    let mut sink = DirectorySink::new(out_dir);
    let path = deliver(&mut sink, &artifact)?;

    // Count what was actually written; ICS drops undated and unexportable events.
    let exported = match format {
        ExportFormat::Ics => String::from_utf8_lossy(&artifact.bytes)
            .matches("BEGIN:VEVENT")
            .count(),
        ExportFormat::Csv => result.events.len(),
    };
    println!(
        "✓ Exported {} of {} events as {}",
        exported,
        result.events.len(),
        artifact.mime_type
    );
    println!("  File: {}", path.display());

    Ok(())
}

fn cmd_normalize(input: &Path, output: Option<PathBuf>, config: &Config) -> Result<()> {
    let mut result = load_result(input)?;
    result.evaluations = config
        .normalization
        .normalizer()
        .normalize_evaluations(&result.evaluations);

    match output {
        Some(path) => {
            result.save(&path)?;
            println!(
                "✓ Normalized {} evaluations",
                result.evaluations.len()
            );
            println!("  File: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

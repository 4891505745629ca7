mod render;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use csv_lens_common::Config;
use csv_lens_core::{
    column_table, detect_datetime_columns, detect_numeric_columns, detect_text_columns,
    export_json, load_csv_path, preview, profile_datetime_column, profile_numeric_column,
    profile_text_column, DatasetProfile, PreviewMode, Table,
};
use render::{print_bar_chart, print_frequency, print_histogram, print_preview, print_summary};
use std::path::PathBuf;

fn parse_reference(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight exists"))
        })
        .map_err(|_| format!("not a datetime (want YYYY-MM-DD [HH:MM:SS]): {s}"))
}

#[derive(Parser)]
#[command(name = "csv-lens", version, about = "CSV column profiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PreviewModeArg {
    Head,
    Tail,
    Sample,
}

#[derive(Subcommand)]
enum Commands {
    /// Whole-table summary and column metadata
    Overview {
        path: PathBuf,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Show the first/last/random n rows
    Preview {
        path: PathBuf,
        #[arg(long, value_enum, default_value = "head")]
        mode: PreviewModeArg,
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Profile a numeric column (omit COLUMN to list candidates)
    Numeric {
        path: PathBuf,
        column: Option<String>,
        #[arg(long)]
        bins: Option<usize>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Profile a text column (omit COLUMN to list candidates)
    Text {
        path: PathBuf,
        column: Option<String>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Profile a datetime column (omit COLUMN to list candidates)
    Datetime {
        path: PathBuf,
        column: Option<String>,
        /// Instant future dates are counted against; defaults to now
        #[arg(long, value_parser = parse_reference)]
        reference: Option<NaiveDateTime>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    match cli.command {
        Commands::Overview { path, export } => run_overview(path, export),
        Commands::Preview { path, mode, rows } => run_preview(path, mode, rows, &config),
        Commands::Numeric {
            path,
            column,
            bins,
            export,
        } => run_numeric(path, column, bins, export, &config),
        Commands::Text {
            path,
            column,
            export,
        } => run_text(path, column, export, &config),
        Commands::Datetime {
            path,
            column,
            reference,
            export,
        } => run_datetime(path, column, reference, export, &config),
    }
}

fn load(path: &PathBuf) -> anyhow::Result<Table> {
    load_csv_path(path).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Prints the candidate list; returns false when there is nothing to select.
fn list_columns(kind: &str, cols: &[String]) -> bool {
    if cols.is_empty() {
        println!("No {kind} columns found in this dataset.");
        return false;
    }
    println!("{kind} columns:");
    for c in cols {
        println!("  {c}");
    }
    true
}

fn run_overview(path: PathBuf, export: Option<PathBuf>) -> anyhow::Result<()> {
    let table = load(&path)?;
    let profile = DatasetProfile::from_table(&table);
    print_summary(&profile.summary());
    if table.is_empty() {
        println!("The dataset is empty; nothing further to show.");
        return Ok(());
    }
    println!();
    println!("{:<24} {:<10} {}", "Column Name", "Data Type", "Memory (Bytes)");
    for meta in column_table(&table) {
        println!("{:<24} {:<10} {}", meta.name, meta.dtype, meta.memory_bytes);
    }
    if let Some(out) = export {
        let doc = serde_json::json!({ "dataset": profile, "columns": column_table(&table) });
        export_json(&out, &doc).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("exported to {}", out.display());
    }
    Ok(())
}

fn run_preview(
    path: PathBuf,
    mode: PreviewModeArg,
    rows: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let table = load(&path)?;
    let n = rows.unwrap_or(config.display.preview_rows);
    let mode = match mode {
        PreviewModeArg::Head => PreviewMode::Head,
        PreviewModeArg::Tail => PreviewMode::Tail,
        PreviewModeArg::Sample => PreviewMode::Sample,
    };
    match preview(&table, mode, n) {
        Some(view) => print_preview(&view),
        None => println!("Nothing to preview (empty dataset, or sample larger than the table)."),
    }
    Ok(())
}

fn run_numeric(
    path: PathBuf,
    column: Option<String>,
    bins: Option<usize>,
    export: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let table = load(&path)?;
    let cols = detect_numeric_columns(&table);
    let Some(column) = column else {
        list_columns("numeric", &cols);
        return Ok(());
    };
    if !cols.contains(&column) {
        anyhow::bail!("{column} is not a numeric column (try `numeric` with no column)");
    }
    let bins = bins.or(config.profiling.histogram_bins);
    let profile = profile_numeric_column(&table, &column, bins, config.profiling.frequency_top)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    print_summary(&profile.summary());
    print_histogram(&profile.histogram, config.display.chart_width);
    print_frequency(&profile.frequent);
    if let Some(out) = export {
        export_json(&out, &profile).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("exported to {}", out.display());
    }
    Ok(())
}

fn run_text(
    path: PathBuf,
    column: Option<String>,
    export: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let table = load(&path)?;
    let cols = detect_text_columns(&table);
    let Some(column) = column else {
        list_columns("text", &cols);
        return Ok(());
    };
    if !cols.contains(&column) {
        anyhow::bail!("{column} is not a text column (try `text` with no column)");
    }
    let profile = profile_text_column(&table, &column, config.profiling.frequency_top)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    print_summary(&profile.summary());
    print_bar_chart(&profile.barchart, config.display.chart_width);
    print_frequency(&profile.frequent);
    if let Some(out) = export {
        export_json(&out, &profile).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("exported to {}", out.display());
    }
    Ok(())
}

fn run_datetime(
    path: PathBuf,
    column: Option<String>,
    reference: Option<NaiveDateTime>,
    export: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let table = load(&path)?;
    let cols = detect_datetime_columns(&table);
    let Some(column) = column else {
        list_columns("datetime", &cols);
        return Ok(());
    };
    if !cols.contains(&column) {
        anyhow::bail!("{column} is not a datetime column (try `datetime` with no column)");
    }
    let reference = reference.unwrap_or_else(|| chrono::Local::now().naive_local());
    let profile =
        profile_datetime_column(&table, &column, config.profiling.frequency_top, reference)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    if !profile.is_valid_datetime {
        eprintln!(
            "WARNING: the selected column \"{column}\" does not appear to be of datetime data \
             type, as a result, some statistics may not be available. These statistics have \
             been flagged as \"N/A\""
        );
    }
    print_summary(&profile.summary());
    print_bar_chart(&profile.barchart, config.display.chart_width);
    print_frequency(&profile.frequent);
    if let Some(out) = export {
        export_json(&out, &profile).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("exported to {}", out.display());
    }
    Ok(())
}

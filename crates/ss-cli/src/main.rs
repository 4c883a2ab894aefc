//! stackstat CLI

mod artifacts;
mod config;
mod pipeline;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use artifacts::ArtifactTee;
use config::StackstatConfig;
use pipeline::Sources;
use ss_stats::{CapacityOptions, HeightOptions};
use ss_viz_render::SvgPlotter;
use ss_viz_render::config::{VizConfig, resolve_config};

#[derive(Parser)]
#[command(name = "stackstat")]
#[command(about = "stackstat - Stack-height statistics for emissions inventories")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stack height statistics by design capacity, per configured category
    Capacity {
        /// Run configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Only run these categories (repeatable). Defaults to all.
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Override every category's target capacity unit.
        #[arg(long)]
        unit: Option<String>,

        /// Also write each plot's artifact JSON next to the image.
        #[arg(long)]
        save_artifacts: bool,

        /// Output file for the run summary (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Capacity analysis on a flat CSV (stkhgt, design_capacity, design_capacity_units)
    CapacityTable {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Target capacity unit
        #[arg(long, default_value = "MW")]
        unit: String,

        /// Directory for the statistics table and plot
        #[arg(long)]
        out_dir: PathBuf,

        /// Explicit bin boundaries, comma separated (e.g. 0,10,100)
        #[arg(long, value_delimiter = ',')]
        bins: Option<Vec<f64>>,

        /// Plot format
        #[arg(long, value_enum, default_value = "svg")]
        format: PlotFormat,

        /// Visualization config (YAML)
        #[arg(long)]
        viz_config: Option<PathBuf>,

        /// Also write each plot's artifact JSON next to the image.
        #[arg(long)]
        save_artifacts: bool,

        /// Output file for the run summary (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stack height distribution by height category, per configured category
    Heights {
        /// Run configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Only run these categories (repeatable). Defaults to all.
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Also write each plot's artifact JSON next to the image.
        #[arg(long)]
        save_artifacts: bool,

        /// Output file for the run summary (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List design capacity units present in the inventory
    Units {
        /// Run configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Output file (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a plot artifact JSON to SVG/PNG
    Render {
        /// Artifact JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Artifact kind
        #[arg(long, value_enum)]
        kind: ArtifactKind,

        /// Output image; the extension selects the format
        #[arg(short, long)]
        output: PathBuf,

        /// Visualization config (YAML)
        #[arg(long)]
        viz_config: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlotFormat {
    Svg,
    Png,
}

impl PlotFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ArtifactKind {
    Capacity,
    Heights,
}

impl ArtifactKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::Heights => "heights",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON summary.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Capacity { config, categories, unit, save_artifacts, output } => {
            cmd_capacity(&config, &categories, unit.as_deref(), save_artifacts, output.as_ref())
        }
        Commands::CapacityTable {
            input,
            unit,
            out_dir,
            bins,
            format,
            viz_config,
            save_artifacts,
            output,
        } => cmd_capacity_table(
            &input,
            &unit,
            &out_dir,
            bins,
            format,
            viz_config.as_deref(),
            save_artifacts,
            output.as_ref(),
        ),
        Commands::Heights { config, categories, save_artifacts, output } => {
            cmd_heights(&config, &categories, save_artifacts, output.as_ref())
        }
        Commands::Units { config, output } => cmd_units(&config, output.as_ref()),
        Commands::Render { input, kind, output, viz_config } => {
            cmd_render(&input, kind, &output, viz_config.as_deref())
        }
        Commands::Version => {
            println!("stackstat {}", ss_core::VERSION);
            Ok(())
        }
    }
}

fn load_viz_config(path: Option<&Path>) -> Result<VizConfig> {
    let Some(path) = path else {
        return Ok(VizConfig::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read viz config {}", path.display()))?;
    Ok(resolve_config(Some(&yaml))?)
}

fn plot_extension(cfg: &StackstatConfig) -> Result<&'static str> {
    match cfg.data.plot_format.to_ascii_lowercase().as_str() {
        "svg" => Ok("svg"),
        "png" => Ok("png"),
        other => anyhow::bail!("unsupported plot_format '{other}' (expected svg or png)"),
    }
}

fn skipped(name: &str, reason: impl std::fmt::Display) -> serde_json::Value {
    tracing::warn!(category = name, %reason, "category skipped");
    serde_json::json!({ "category": name, "status": "skipped", "reason": reason.to_string() })
}

fn cmd_capacity(
    config: &Path,
    only: &[String],
    unit: Option<&str>,
    save_artifacts: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let cfg = StackstatConfig::load(config)?;
    let categories = cfg.select(only)?;
    let ext = plot_extension(&cfg)?;
    let plotter = ArtifactTee::new(
        SvgPlotter::new(load_viz_config(cfg.data.viz_config.as_deref())?),
        save_artifacts,
    );

    let sources = Sources::load(&cfg)?;
    sources.inventory.require_capacity_columns()?;

    let mut results = Vec::with_capacity(categories.len());
    for (name, category) in categories {
        let Some(selection) = sources.select(name, category)? else {
            results.push(skipped(name, "no SCC codes matched"));
            continue;
        };
        let options = CapacityOptions {
            target_unit: unit.unwrap_or(&category.target_unit).to_string(),
            output_dir: cfg.data.save_dir.clone(),
            stats_filename: format!("stack_height_by_capacity_{name}.csv"),
            plot_filename: format!("stack_height_by_capacity_{name}.{ext}"),
            boundaries: category.capacity_bins.clone(),
            title: name.to_string(),
        };
        match ss_stats::analyze_capacity(&selection.table, &options, &plotter) {
            Ok(report) => {
                let mut v = serde_json::to_value(&report)?;
                v["category"] = serde_json::json!(name);
                v["status"] = serde_json::json!("ok");
                results.push(v);
            }
            Err(e @ ss_core::Error::EmptyResult { .. }) => results.push(skipped(name, e)),
            Err(e) => return Err(e).with_context(|| format!("category '{name}': capacity analysis failed")),
        }
    }

    write_json(
        output,
        serde_json::json!({
            "input_files": sources.inventory.files.len(),
            "skipped_files": sources.inventory.skipped.iter().map(|(p, e)| {
                serde_json::json!({ "path": p, "error": e })
            }).collect::<Vec<_>>(),
            "categories": results,
        }),
    )
}

#[allow(clippy::too_many_arguments)]
fn cmd_capacity_table(
    input: &Path,
    unit: &str,
    out_dir: &Path,
    bins: Option<Vec<f64>>,
    format: PlotFormat,
    viz_config: Option<&Path>,
    save_artifacts: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let table = ss_ingest::read_capacity_table(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let plotter = ArtifactTee::new(SvgPlotter::new(load_viz_config(viz_config)?), save_artifacts);
    let options = CapacityOptions {
        target_unit: unit.to_string(),
        output_dir: out_dir.to_path_buf(),
        plot_filename: format!("stack_height_by_capacity.{}", format.extension()),
        boundaries: bins,
        ..CapacityOptions::default()
    };
    let report = ss_stats::analyze_capacity(&table, &options, &plotter)?;
    write_json(output, serde_json::to_value(&report)?)
}

fn cmd_heights(
    config: &Path,
    only: &[String],
    save_artifacts: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let cfg = StackstatConfig::load(config)?;
    let categories = cfg.select(only)?;
    let ext = plot_extension(&cfg)?;
    let plotter = ArtifactTee::new(
        SvgPlotter::new(load_viz_config(cfg.data.viz_config.as_deref())?),
        save_artifacts,
    );
    let sources = Sources::load(&cfg)?;

    let mut results = Vec::with_capacity(categories.len());
    for (name, category) in categories {
        let Some(selection) = sources.select(name, category)? else {
            results.push(skipped(name, "no SCC codes matched"));
            continue;
        };
        if selection.is_empty() {
            results.push(skipped(name, "no records for the pollutant and SCC codes"));
            continue;
        }
        let options = HeightOptions {
            output_dir: cfg.data.save_dir.clone(),
            stats_filename: format!("stack_height_analysis_{name}.csv"),
            plot_filename: format!("stack_height_analysis_{name}.{ext}"),
            title: name.to_string(),
        };
        let report = ss_stats::analyze_heights(&selection.stack_heights, &options, &plotter)
            .with_context(|| format!("category '{name}': height analysis failed"))?;
        let mut v = serde_json::to_value(&report)?;
        v["category"] = serde_json::json!(name);
        v["status"] = serde_json::json!("ok");
        results.push(v);
    }

    write_json(output, serde_json::json!({ "categories": results }))
}

fn cmd_units(config: &Path, output: Option<&PathBuf>) -> Result<()> {
    let cfg = StackstatConfig::load(config)?;
    let inventory = ss_ingest::read_inventory(&cfg.data.input_dir)
        .with_context(|| format!("failed to read inventory under {}", cfg.data.input_dir.display()))?;
    let units: Vec<serde_json::Value> = ss_ingest::unit_counts(&inventory.rows)
        .into_iter()
        .map(|(unit, count)| serde_json::json!({ "unit": unit, "count": count }))
        .collect();
    write_json(output, serde_json::json!({ "rows": inventory.rows.len(), "units": units }))
}

fn cmd_render(input: &Path, kind: ArtifactKind, output: &Path, viz_config: Option<&Path>) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read artifact {}", input.display()))?;
    let config = load_viz_config(viz_config)?;
    ss_viz_render::render_to_file(&json, kind.as_str(), output, &config)
        .with_context(|| format!("failed to render {}", output.display()))?;
    Ok(())
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

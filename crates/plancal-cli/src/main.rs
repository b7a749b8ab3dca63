//! plancal CLI - Calendar Generator for Project Plans
//!
//! Command-line interface for parsing plan files, composing month pages
//! and writing LaTeX or SVG artifacts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use plancal_core::{Config, Layouter, MonthPage, Plan, Renderer};
use plancal_layout::GridLayouter;
use plancal_parser::parse_file;
use plancal_render::{LatexRenderer, SvgMonthRenderer, TextRenderer};

#[derive(Parser)]
#[command(name = "plancal")]
#[command(author, version, about = "Calendar generator for project plans", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a plan file and report per-month layout statistics
    Check {
        /// Input file path (.yaml, .yml or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// First weekday (monday, sunday)
        #[arg(long)]
        first_weekday: Option<String>,
    },

    /// Compose all covered months and write the calendar artifacts
    Generate {
        /// Input file path (.yaml, .yml or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (latex, svg)
        #[arg(short, long, default_value = "latex")]
        format: String,

        /// Configuration file (plancal.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// First weekday (monday, sunday); overrides the config file
        #[arg(long)]
        first_weekday: Option<String>,

        /// Render mode (standard, compact); overrides the config file
        #[arg(long)]
        mode: Option<String>,

        /// Color key (phase, sub-phase); overrides the config file
        #[arg(long)]
        color_source: Option<String>,

        /// Drop task descriptions from pill heads
        #[arg(long)]
        no_descriptions: bool,
    },

    /// Initialize a sample plan file
    Init {
        /// Plan name (default: "my-plan")
        #[arg(value_name = "NAME", default_value = "my-plan")]
        name: String,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check {
            file,
            format,
            first_weekday,
        }) => cmd_check(&file, &format, first_weekday.as_deref()),
        Some(Commands::Generate {
            file,
            output,
            format,
            config,
            first_weekday,
            mode,
            color_source,
            no_descriptions,
        }) => cmd_generate(
            &file,
            &output,
            &format,
            config.as_deref(),
            first_weekday.as_deref(),
            mode.as_deref(),
            color_source.as_deref(),
            no_descriptions,
        ),
        Some(Commands::Init { name, output }) => cmd_init(&name, output.as_deref()),
        None => {
            println!("plancal - Calendar Generator for Project Plans");
            println!();
            println!("Usage: plancal <COMMAND>");
            println!();
            println!("Commands:");
            println!("  init       Initialize a sample plan file");
            println!("  check      Parse a plan file and report layout statistics");
            println!("  generate   Write the calendar document (LaTeX) or previews (SVG)");
            println!();
            println!("Run 'plancal --help' for more information");
            Ok(())
        }
    }
}

/// Assemble the effective configuration from a file and flag overrides
fn load_config(
    config_path: Option<&Path>,
    first_weekday: Option<&str>,
    mode: Option<&str>,
    color_source: Option<&str>,
    no_descriptions: bool,
) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in '{}'", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(value) = first_weekday {
        config.first_weekday = value.parse()?;
    }
    if let Some(value) = mode {
        config.render_mode = value.parse()?;
    }
    if let Some(value) = color_source {
        config.color_source = value.parse()?;
    }
    if no_descriptions {
        config.show_descriptions = false;
    }
    Ok(config)
}

/// Compose every covered month; months are independent, so they are laid
/// out in parallel.
fn layout_pages(plan: &Plan, config: &Config) -> Result<Vec<MonthPage>> {
    let layouter = GridLayouter::new(config.clone());
    let months = plan.months_covered();
    if months.is_empty() {
        bail!("plan '{}' contains no dated tasks", plan.name);
    }
    let pages = months
        .par_iter()
        .map(|&(year, month)| layouter.layout_month(plan, year, month))
        .collect::<Result<Vec<_>, _>>()
        .context("Layout failed")?;
    Ok(pages)
}

#[derive(serde::Serialize)]
struct MonthSummary {
    year: i32,
    month: u32,
    weeks: usize,
    tasks: usize,
    max_tracks: usize,
}

/// Check command: parse, lay out, report statistics
fn cmd_check(file: &Path, format: &str, first_weekday: Option<&str>) -> Result<()> {
    let plan = parse_file(file).with_context(|| format!("Failed to parse '{}'", file.display()))?;
    let config = load_config(None, first_weekday, None, None, false)?;
    let pages = layout_pages(&plan, &config)?;

    match format {
        "text" => {
            let text = TextRenderer
                .render(&plan, &pages)
                .context("Failed to summarize plan")?;
            print!("{text}");
            println!(
                "OK: {} tasks across {} months",
                plan.tasks.len(),
                pages.len()
            );
        }
        "json" => {
            let summary: Vec<MonthSummary> = pages
                .iter()
                .map(|p| MonthSummary {
                    year: p.year,
                    month: p.month,
                    weeks: p.weeks.len(),
                    tasks: p.task_count(),
                    max_tracks: p.max_track_count(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        other => bail!("unknown output format '{other}' (expected text or json)"),
    }
    Ok(())
}

/// Generate command: write the LaTeX document or per-month SVG previews
#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    file: &Path,
    output: &Path,
    format: &str,
    config_path: Option<&Path>,
    first_weekday: Option<&str>,
    mode: Option<&str>,
    color_source: Option<&str>,
    no_descriptions: bool,
) -> Result<()> {
    let plan = parse_file(file).with_context(|| format!("Failed to parse '{}'", file.display()))?;
    let config = load_config(config_path, first_weekday, mode, color_source, no_descriptions)?;
    let pages = layout_pages(&plan, &config)?;
    tracing::info!(months = pages.len(), "composed month pages");

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory '{}'", output.display()))?;

    match format {
        "latex" => {
            let renderer = LatexRenderer::new()
                .pill_height(config.pill_height.clone())
                .week_header_style(config.week_column_header_style.clone());
            let renderer = if config.milestone_marker {
                renderer
            } else {
                renderer.plain_milestones()
            };
            let tex = renderer
                .render(&plan, &pages)
                .context("LaTeX rendering failed")?;
            let path = output.join(format!("{}.tex", file_stem(&plan.name)));
            fs::write(&path, tex)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            println!("Created: {}", path.display());
        }
        "svg" => {
            let renderer = if config.milestone_marker {
                SvgMonthRenderer::new()
            } else {
                SvgMonthRenderer::new().plain_milestones()
            };
            for page in &pages {
                let svg = renderer
                    .render_month(page)
                    .with_context(|| format!("SVG rendering failed for {}-{:02}", page.year, page.month))?;
                let path = output.join(format!("{}-{:02}.svg", page.year, page.month));
                fs::write(&path, svg)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                println!("Created: {}", path.display());
            }
        }
        other => bail!("unknown output format '{other}' (expected latex or svg)"),
    }
    Ok(())
}

/// Turn a plan name into a safe file stem
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = stem.trim_matches('-');
    if trimmed.is_empty() {
        "calendar".into()
    } else {
        trimmed.to_lowercase()
    }
}

const SAMPLE_PLAN: &str = r#"# plancal sample plan
#
# Dates are inclusive ISO days; status is planned, in-progress or
# completed; milestone tasks render with a diamond marker.
name: {name}
tasks:
  - id: kickoff
    name: Project kickoff
    start: 2026-03-02
    end: 2026-03-02
    phase: Setup
    milestone: true
  - id: research
    name: Background research
    description: Literature and prior art
    start: 2026-03-02
    end: 2026-03-20
    phase: Analysis
    subphase: Research
  - id: draft
    name: Write first draft
    start: 2026-03-16
    end: 2026-04-10
    phase: Writing
    subphase: Drafting
  - id: review
    name: Internal review
    start: 2026-04-13
    end: 2026-04-24
    phase: Review
"#;

/// Init command: write a commented sample plan file
fn cmd_init(name: &str, output: Option<&Path>) -> Result<()> {
    let directory = output.unwrap_or(Path::new("."));
    let path = directory.join(format!("{name}.yaml"));
    if path.exists() {
        bail!("'{}' already exists, refusing to overwrite", path.display());
    }

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create '{}'", directory.display()))?;
    fs::write(&path, SAMPLE_PLAN.replace("{name}", name))
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    println!("Created: {}", path.display());
    println!("Next: plancal check {}", path.display());
    Ok(())
}

#![forbid(unsafe_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sentiscope_core::{Dataset, LoadReport, Metric, PostId, SkippedPost};
use sentiscope_layout::{LinearScale, MonthBands, Point};
use sentiscope_render::{LegendView, SvgExporter};
use sentiscope_style::{Rgb, color_of};

use crate::config::{DashboardConfig, MAX_ITERATIONS};
use crate::dashboard::{Dashboard, Msg, Notice};
use crate::error::{AppError, Result};
use crate::logging::{self, LogOptions};

#[derive(Debug, Parser)]
#[command(
    name = "sentiscope",
    about = "Render sentiment-scored posts as a month-banded scatter dashboard",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Surface width in pixels (overrides SENTISCOPE_WIDTH).
    #[arg(long, global = true)]
    pub width: Option<f64>,

    /// Surface height in pixels (overrides SENTISCOPE_HEIGHT).
    #[arg(long, global = true)]
    pub height: Option<f64>,

    /// Layout relaxation ticks, at most 10000 (overrides SENTISCOPE_ITERATIONS).
    #[arg(long, global = true)]
    pub iterations: Option<usize>,

    /// Log as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the plot as SVG, or the whole dashboard as HTML.
    Render(RenderArgs),

    /// Dump computed targets, positions, and month bands as JSON.
    Layout(LayoutArgs),

    /// Write the standalone gradient legend as SVG.
    Legend(LegendArgs),

    /// Summarize a posts file: counts, months, and skipped entries.
    Inspect(InspectArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Html,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// JSON array of posts.
    pub input: PathBuf,

    /// Coloring metric (Sentiment or Subjectivity).
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Select the post with this idx; repeatable, later selections list first.
    #[arg(long = "select", value_name = "IDX", value_parser = PostId::from_str)]
    pub select: Vec<PostId>,

    /// Click at surface coordinates, toggling the post under the pointer.
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_point)]
    pub click: Vec<(f64, f64)>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Page title for HTML output.
    #[arg(long)]
    pub title: Option<String>,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    pub input: PathBuf,

    /// Include each post's fill color under this metric.
    #[arg(long)]
    pub metric: Option<Metric>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct LegendArgs {
    #[arg(long)]
    pub metric: Option<Metric>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    pub input: PathBuf,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&LogOptions {
        json: cli.global.log_json,
        directives: None,
    });
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.global)?;
    match cli.command {
        Commands::Render(args) => run_render(config, args),
        Commands::Layout(args) => run_layout(config, args),
        Commands::Legend(args) => run_legend(config, args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn resolve_config(global: &GlobalArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::from_env();
    let margin = config.scene.margin;
    if let Some(width) = global.width {
        if !(width.is_finite() && width > margin.left + margin.right) {
            return Err(AppError::invalid(format!(
                "--width must exceed the horizontal margins ({})",
                margin.left + margin.right
            )));
        }
        config.scene.width = width;
    }
    if let Some(height) = global.height {
        if !(height.is_finite() && height > margin.top + margin.bottom) {
            return Err(AppError::invalid(format!(
                "--height must exceed the vertical margins ({})",
                margin.top + margin.bottom
            )));
        }
        config.scene.height = height;
    }
    if let Some(iterations) = global.iterations {
        if iterations > MAX_ITERATIONS {
            return Err(AppError::invalid(format!(
                "--iterations must be at most {MAX_ITERATIONS}"
            )));
        }
        config.iterations = iterations;
    }
    Ok(config)
}

fn parse_point(value: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("not a finite number: {part:?}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Load `path` into a fresh dashboard, turning an error notice into an error.
fn open(config: DashboardConfig, path: &Path) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new(config);
    for notice in dashboard.run(Msg::OpenFile(path.to_path_buf())) {
        match notice {
            Notice::Error(message) => {
                return Err(AppError::Load {
                    path: path.to_path_buf(),
                    message,
                });
            }
            Notice::Warning(message) => tracing::warn!(path = %path.display(), "{message}"),
        }
    }
    Ok(dashboard)
}

fn run_render(config: DashboardConfig, args: RenderArgs) -> Result<()> {
    let config = match args.title {
        Some(title) => config.with_title(title),
        None => config,
    };
    let mut dashboard = open(config, &args.input)?;

    if let Some(metric) = args.metric {
        dashboard.run(Msg::SetMetric(metric));
    }
    for idx in args.select {
        let known = dashboard.dataset().is_some_and(|d| d.get(&idx).is_some());
        if !known {
            return Err(AppError::invalid(format!("no post with idx {idx}")));
        }
        dashboard.run(Msg::ToggleSelection(idx));
    }
    for (x, y) in args.click {
        let before = dashboard.selection().len();
        dashboard.run(Msg::Click { x, y });
        if dashboard.selection().len() == before {
            tracing::warn!(x, y, "click did not land on a post");
        }
    }

    let rendered = match args.format {
        OutputFormat::Html => dashboard.render_html(),
        OutputFormat::Svg => match dashboard.view() {
            Some(scene) => SvgExporter::standalone().export(scene),
            None => return Err(AppError::invalid("nothing to render")),
        },
    };
    write_output(args.output.as_deref(), &rendered)
}

#[derive(Debug, Serialize)]
struct PlacedPost<'a> {
    idx: &'a PostId,
    month: &'a str,
    target: Point,
    position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<Rgb>,
}

#[derive(Debug, Serialize)]
struct LayoutDump<'a> {
    posts: Vec<PlacedPost<'a>>,
    bands: &'a MonthBands,
    x_scale: LinearScale,
    min_pair_distance: Option<f64>,
}

fn run_layout(config: DashboardConfig, args: LayoutArgs) -> Result<()> {
    let dashboard = open(config, &args.input)?;
    let (Some(dataset), Some(layout)) = (dashboard.dataset(), dashboard.layout()) else {
        return Err(AppError::invalid("no posts loaded"));
    };

    let posts = dataset
        .posts()
        .iter()
        .zip(&layout.points)
        .map(|(post, placed)| PlacedPost {
            idx: post.idx(),
            month: post.month(),
            target: placed.target,
            position: placed.position,
            fill: args
                .metric
                .map(|metric| color_of(metric, post.metric_value(metric))),
        })
        .collect();
    let dump = LayoutDump {
        posts,
        bands: &layout.bands,
        x_scale: layout.x_scale,
        min_pair_distance: layout.min_pair_distance(),
    };
    let mut json = serde_json::to_string_pretty(&dump)?;
    json.push('\n');
    write_output(args.output.as_deref(), &json)
}

fn run_legend(config: DashboardConfig, args: LegendArgs) -> Result<()> {
    let metric = args.metric.unwrap_or(config.metric);
    let svg = SvgExporter::standalone().export_legend(&LegendView::new(metric));
    write_output(args.output.as_deref(), &svg)
}

#[derive(Debug, Serialize)]
struct MonthSummary<'a> {
    month: &'a str,
    posts: usize,
}

#[derive(Debug, Serialize)]
struct InspectSummary<'a> {
    total: usize,
    loaded: usize,
    months: Vec<MonthSummary<'a>>,
    sentiment_range: Option<(f64, f64)>,
    subjectivity_range: Option<(f64, f64)>,
    skipped: &'a [SkippedPost],
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let (dataset, report) = Dataset::from_path(&args.input)?;
    let summary = summarize(&dataset, &report);
    let mut json = serde_json::to_string_pretty(&summary)?;
    json.push('\n');
    write_output(None, &json)
}

fn summarize<'a>(dataset: &'a Dataset, report: &'a LoadReport) -> InspectSummary<'a> {
    let months = dataset
        .months()
        .into_iter()
        .map(|month| MonthSummary {
            month,
            posts: dataset.posts().iter().filter(|p| p.month() == month).count(),
        })
        .collect();
    let range = |metric: Metric| {
        dataset
            .posts()
            .iter()
            .map(|p| p.metric_value(metric))
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    };
    InspectSummary {
        total: report.total,
        loaded: report.loaded,
        months,
        sentiment_range: range(Metric::Sentiment),
        subjectivity_range: range(Metric::Subjectivity),
        skipped: &report.skipped,
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

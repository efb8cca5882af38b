use clap::Parser;
use serde::{Deserialize, Serialize};
use slidematch::debug::{annotate_match, render_surface, SurfaceRecorder};
use slidematch::{
    load_gray_image, top_candidates, CoordinateMapping, EdgeThresholds, MatchResult, Metric,
    OffsetConfig, OffsetSolver, Peak,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Slide puzzle offset solver (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    CoeffNormed,
    Coeff,
    SqDiff,
    SqDiffNormed,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::CoeffNormed => Metric::CoeffNormed,
            MetricConfig::Coeff => Metric::Coeff,
            MetricConfig::SqDiff => Metric::SqDiff,
            MetricConfig::SqDiffNormed => Metric::SqDiffNormed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct OffsetConfigJson {
    low_threshold: f32,
    high_threshold: f32,
    metric: MetricConfig,
    scale: f64,
    crop_origin_x: usize,
    parallel: bool,
}

impl Default for OffsetConfigJson {
    fn default() -> Self {
        let cfg = OffsetConfig::default();
        Self {
            low_threshold: cfg.thresholds.low,
            high_threshold: cfg.thresholds.high,
            metric: MetricConfig::CoeffNormed,
            scale: cfg.mapping.scale,
            crop_origin_x: cfg.mapping.crop_origin_x,
            parallel: cfg.parallel,
        }
    }
}

impl From<OffsetConfigJson> for OffsetConfig {
    fn from(value: OffsetConfigJson) -> Self {
        Self {
            thresholds: EdgeThresholds {
                low: value.low_threshold,
                high: value.high_threshold,
            },
            metric: value.metric.into(),
            mapping: CoordinateMapping {
                scale: value.scale,
                crop_origin_x: value.crop_origin_x,
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    background_path: String,
    piece_path: String,
    output_path: Option<String>,
    debug_dir: Option<String>,
    topk: usize,
    nms_radius: usize,
    offset: OffsetConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background_path: String::new(),
            piece_path: String::new(),
            output_path: None,
            debug_dir: None,
            topk: 1,
            nms_radius: 4,
            offset: OffsetConfigJson::default(),
        }
    }
}

fn parse_config(text: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = serde_json::from_str(text)?;
    if config.background_path.is_empty() || config.piece_path.is_empty() {
        return Err("background_path and piece_path must be set in the config".into());
    }
    if config.topk == 0 {
        return Err("topk must be at least 1".into());
    }
    Ok(config)
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    score: f32,
}

impl From<&MatchResult> for MatchRecord {
    fn from(value: &MatchResult) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
        }
    }
}

impl From<Peak> for MatchRecord {
    fn from(value: Peak) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    offset: usize,
    best: MatchRecord,
    candidates: Vec<MatchRecord>,
}

fn write_debug_images(
    dir: &Path,
    background_path: &str,
    recorder: &SurfaceRecorder,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(surface), Some(best)) = (recorder.surface(), recorder.best()) else {
        return Ok(());
    };
    fs::create_dir_all(dir)?;
    render_surface(surface)?.save(dir.join("surface.png"))?;
    let background = load_gray_image(background_path)?;
    annotate_match(background.view(), best, 255)?.save(dir.join("match.png"))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("slidematch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config = parse_config(&config_text)?;

    let background = fs::read(&config.background_path)?;
    let piece = fs::read(&config.piece_path)?;

    let solver = OffsetSolver::new().with_config(config.offset.into());
    let mut recorder = SurfaceRecorder::new();
    let report = solver.solve_bytes_observed(&background, &piece, &mut recorder)?;
    tracing::info!(offset = report.offset, x = report.best.x, y = report.best.y, "solved");

    let candidates = recorder
        .surface()
        .map(|surface| top_candidates(surface, config.topk, config.nms_radius))
        .unwrap_or_default()
        .into_iter()
        .map(MatchRecord::from)
        .collect();

    if let Some(dir) = &config.debug_dir {
        write_debug_images(Path::new(dir), &config.background_path, &recorder)?;
    }

    let output = Output {
        offset: report.offset,
        best: MatchRecord::from(&report.best),
        candidates,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

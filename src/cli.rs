use crate::config::{Config, load_config};
use crate::layout::{FontMetrics, HeuristicMetrics, SurfaceBounds, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_labels;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wcp", version, about = "Word cloud packer: lay out weighted labels on a surface")]
pub struct Args {
    /// Label list (JSON array or `text weight [magnitude]` lines), '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout, render and theme settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Surface width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Surface height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Maximum number of labels considered
    #[arg(long = "maxLabels")]
    pub max_labels: Option<usize>,

    /// Measure text with a fixed per-character advance instead of system fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let labels = parse_labels(&input)?;
    if labels.is_empty() {
        return Err(anyhow::anyhow!("No labels found in input"));
    }
    tracing::info!(labels = labels.len(), "parsed input");

    let bounds = SurfaceBounds::new(config.render.width, config.render.height);
    let result = if args.fast_text {
        compute_layout(&labels, bounds, &config.layout, &HeuristicMetrics::default())?
    } else {
        let metrics = FontMetrics::new(config.theme.font_family.clone());
        compute_layout(&labels, bounds, &config.layout, &metrics)?
    };
    if !result.is_complete() {
        tracing::info!(dropped = result.dropped.len(), "some labels did not fit");
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&result, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&result, &config.theme, &config.render);
            write_output_png(&svg, &output, &config.theme)?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &result)?;
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(max_labels) = args.max_labels {
        config.layout.max_labels = max_labels;
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

//! flowlab CLI

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fl_core::{Density, RecordingSink, SharedSink};
use fl_prob::TransformedDensity;
use fl_viz::{CurveArtifact, DensityArtifact, HistogramArtifact, SplineArtifact};
use std::path::PathBuf;
use std::sync::Arc;

mod scenario;

/// Curve points traced per B-spline in the `curve` output.
const SPLINE_TRACE_POINTS: usize = 101;

#[derive(Parser)]
#[command(name = "flowlab")]
#[command(about = "flowlab - interactive probability-density transformations")]
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
    /// Sample the composed transformation (y and dy/dx) over the scenario grid
    Curve {
        /// Input scenario (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate the change-of-variables density over the scenario grid
    Density {
        /// Input scenario (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Push base samples through the transformation and histogram them
    Samples {
        /// Input scenario (YAML or JSON); requires a `samples` section
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Steepness k that makes a sigmoid/logit pass through (x, y)
    Steepness {
        /// Curve family
        #[arg(long, value_enum)]
        family: Family,

        /// Point x coordinate
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Point y coordinate
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Curve center
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        x0: f64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a scenario file and build its transformation chain
    Validate {
        /// Input scenario (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Family {
    Sigmoid,
    Logit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Curve { input, output } => cmd_curve(&input, output.as_ref()),
        Commands::Density { input, output } => cmd_density(&input, output.as_ref()),
        Commands::Samples { input, output } => cmd_samples(&input, output.as_ref()),
        Commands::Steepness { family, x, y, x0, output } => {
            cmd_steepness(family, x, y, x0, output.as_ref())
        }
        Commands::Validate { input } => cmd_validate(&input),
    }
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

/// Serialize `artifact` and append the recorded diagnostics next to its fields.
fn with_diagnostics<A: serde::Serialize>(
    artifact: &A,
    recorder: &RecordingSink,
) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(artifact)?;
    let events = recorder.events();
    if !events.is_empty() {
        tracing::warn!(count = events.len(), "numeric diagnostics recorded");
    }
    if let Some(obj) = value.as_object_mut() {
        obj.insert("diagnostics".to_string(), serde_json::to_value(events)?);
    }
    Ok(value)
}

fn load(input: &PathBuf) -> Result<(scenario::ScenarioV0, Arc<RecordingSink>, SharedSink)> {
    let scenario = scenario::read_scenario(input)?;
    tracing::info!(path = %input.display(), steps = scenario.transforms.len(), "scenario loaded");
    let recorder = Arc::new(RecordingSink::new());
    let sink: SharedSink = recorder.clone();
    Ok((scenario, recorder, sink))
}

fn cmd_curve(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let (scenario, recorder, sink) = load(input)?;
    let model = scenario.build(&sink)?;

    let mut artifact = CurveArtifact::sample(&model.chain, &scenario.grid)?;
    if let Some((sx, sy)) = scenario.plot_scales(&artifact.y_values)? {
        artifact = artifact.with_pixels(&sx, &sy);
    }
    let splines: Vec<SplineArtifact> = scenario
        .splines(&sink)?
        .iter()
        .map(|s| SplineArtifact::from_spline(s, SPLINE_TRACE_POINTS))
        .collect();

    let mut value = with_diagnostics(&artifact, &recorder)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("steps".to_string(), serde_json::to_value(model.chain.step_names())?);
        obj.insert("splines".to_string(), serde_json::to_value(splines)?);
    }
    write_json(output, value)
}

fn cmd_density(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let (scenario, recorder, sink) = load(input)?;
    let model = scenario.build(&sink)?;
    let base_name = model.base.name();

    let density = TransformedDensity::new(model.base, model.chain)
        .with_threshold(scenario.large_value_threshold)
        .with_sink(sink);
    let artifact = DensityArtifact::evaluate(&density, &scenario.grid)?;
    tracing::info!(mass = artifact.mass, large = artifact.large_indices.len(), "density evaluated");

    let mut value = with_diagnostics(&artifact, &recorder)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("base".to_string(), serde_json::Value::from(base_name));
    }
    write_json(output, value)
}

fn cmd_samples(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let (scenario, recorder, sink) = load(input)?;
    let Some(samples) = scenario.samples else {
        anyhow::bail!("scenario has no `samples` section");
    };
    let model = scenario.build(&sink)?;

    let pushed = fl_prob::sampling::push_forward(&model.base, &model.chain, samples.n, samples.seed)?;
    let histogram = HistogramArtifact::from_samples(
        &pushed,
        samples.bins,
        Some([scenario.grid.lo, scenario.grid.hi]),
    )?;
    tracing::info!(n = samples.n, dropped = histogram.dropped, "samples binned");

    let density = TransformedDensity::new(model.base, model.chain)
        .with_threshold(scenario.large_value_threshold)
        .with_sink(sink);
    let pdf_at_centers: Vec<f64> = histogram.centers().iter().map(|&c| density.pdf(c)).collect();

    let mut value = with_diagnostics(&histogram, &recorder)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("seed".to_string(), serde_json::Value::from(samples.seed));
        obj.insert("pdf_at_centers".to_string(), serde_json::to_value(pdf_at_centers)?);
    }
    write_json(output, value)
}

fn cmd_steepness(family: Family, x: f64, y: f64, x0: f64, output: Option<&PathBuf>) -> Result<()> {
    let (name, solved) = match family {
        Family::Sigmoid => ("sigmoid", fl_prob::sigmoid_steepness_through(x, y, x0)),
        Family::Logit => ("logit", fl_prob::logit_steepness_through(x, y, x0)),
    };
    // Indeterminate is a normal outcome for a drag near the center: the
    // caller keeps its previous k.
    let value = match solved {
        Ok(k) => serde_json::json!({
            "family": name,
            "x": x,
            "y": y,
            "x0": x0,
            "k": k,
            "indeterminate": false,
        }),
        Err(e) if e.is_indeterminate() => {
            tracing::info!(x, y, x0, "steepness indeterminate near center");
            serde_json::json!({
                "family": name,
                "x": x,
                "y": y,
                "x0": x0,
                "k": serde_json::Value::Null,
                "indeterminate": true,
                "reason": e.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    write_json(output, value)
}

fn cmd_validate(input: &PathBuf) -> Result<()> {
    let (scenario, _recorder, sink) = load(input)?;
    let model = scenario.build(&sink)?;
    let value = serde_json::json!({
        "valid": true,
        "schema_version": scenario.schema_version,
        "base": model.base.name(),
        "steps": model.chain.step_names(),
        "grid_points": scenario.grid.points,
    });
    write_json(None, value)
}

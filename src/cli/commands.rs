//! Command implementations for the Tonal CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::{LexicalResources, Normalizer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ServiceConfig;
use crate::context::SentimentContext;
use crate::error::Result;
use crate::predictor::Predictor;
use crate::server::run_server;

/// Execute a CLI command.
pub fn execute_command(args: TonalArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args.clone()),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize(normalize_args.clone(), &args),
    }
}

/// Combine the configuration file, if any, with command-line overrides.
pub fn resolve_config(artifacts: &ArtifactArgs) -> Result<ServiceConfig> {
    let mut config = match &artifacts.config {
        Some(path) => {
            info!("Reading configuration from {}", path.display());
            ServiceConfig::load(path)?
        }
        None => ServiceConfig::default(),
    };

    if let Some(model_dir) = &artifacts.model_dir {
        config.artifacts.model_dir = model_dir.clone();
    }
    if let Some(resources_dir) = &artifacts.resources_dir {
        config.artifacts.resources_dir = Some(resources_dir.clone());
    }

    Ok(config)
}

/// Serve the HTTP endpoint.
fn serve(args: ServeArgs) -> Result<()> {
    let mut config = resolve_config(&args.artifacts)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(workers) = args.workers {
        config.server.workers = workers;
    }
    config.validate()?;
    debug!("Effective configuration: {config:?}");

    let predictor = load_predictor(&config)?;
    actix_web::rt::System::new().block_on(run_server(&config.server, predictor))
}

/// Classify a single text or every line of a file.
fn predict(args: PredictArgs, cli_args: &TonalArgs) -> Result<()> {
    let config = resolve_config(&args.artifacts)?;
    let predictor = load_predictor(&config)?;

    if let Some(path) = &args.file {
        return predict_file(&predictor, path, cli_args);
    }

    let text = args.text.unwrap_or_default();
    let result = predictor.predict(&text)?;
    output_result(
        "Prediction",
        &PredictionOutput::new(&text, Ok(result)),
        cli_args,
    )
}

fn predict_file(predictor: &Predictor, path: &Path, cli_args: &TonalArgs) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let comments: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;
    info!("Classifying {} comments from {}", comments.len(), path.display());

    let start_time = Instant::now();
    let outcomes = predictor.predict_batch(&comments);
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let predictions: Vec<PredictionOutput> = comments
        .iter()
        .zip(outcomes)
        .map(|(comment, outcome)| PredictionOutput::new(comment, outcome))
        .collect();
    let failed = predictions.iter().filter(|p| p.error.is_some()).count();

    output_result(
        "Batch prediction",
        &BatchOutput {
            total: predictions.len(),
            failed,
            duration_ms,
            predictions,
        },
        cli_args,
    )
}

/// Print the normalized form of a text.
fn normalize(args: NormalizeArgs, cli_args: &TonalArgs) -> Result<()> {
    let config = resolve_config(&args.artifacts)?;
    let resources = LexicalResources::load_dir(config.artifacts.resources_dir.as_deref())?;
    let normalizer = Normalizer::new(&resources)?;

    output_result(
        "Normalized text",
        &NormalizeOutput {
            cleaned: normalizer.clean(&args.text),
            normalized: normalizer.normalize(&args.text),
            input: args.text,
        },
        cli_args,
    )
}

fn load_predictor(config: &ServiceConfig) -> Result<Predictor> {
    let context = SentimentContext::load(&config.artifacts.paths())?;
    Ok(Predictor::new(Arc::new(context)))
}

//! Command line argument parsing for the Tonal CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Tonal - sentiment classification for short texts
#[derive(Parser, Debug, Clone)]
#[command(name = "tonal")]
#[command(about = "Classify the sentiment of comments, reviews and feedback")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TonalArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TonalArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the web UI and the prediction endpoint
    Serve(ServeArgs),

    /// Predict the sentiment of a text or of each line in a file
    Predict(PredictArgs),

    /// Show the normalized form of a text
    Normalize(NormalizeArgs),
}

/// Where to load artifacts and resources from.
#[derive(Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE", env = "TONAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding sentiment_model.json and tfidf_vectorizer.json
    #[arg(short, long, value_name = "DIR", env = "TONAL_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Directory holding stopwords.txt, lemmas.txt and lemma_exceptions.txt
    #[arg(short, long, value_name = "DIR", env = "TONAL_RESOURCES_DIR")]
    pub resources_dir: Option<PathBuf>,
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "TONAL_HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long, env = "TONAL_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long, env = "TONAL_WORKERS")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Arguments for one-off predictions
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Text to classify
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    pub text: Option<String>,

    /// Classify each line of this file instead
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Arguments for showing normalized text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_command() {
        let args = TonalArgs::try_parse_from([
            "tonal",
            "predict",
            "I love this product",
            "--model-dir",
            "/srv/models",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.text.as_deref(), Some("I love this product"));
            assert_eq!(predict_args.file, None);
            assert_eq!(
                predict_args.artifacts.model_dir,
                Some(PathBuf::from("/srv/models"))
            );
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_predict_requires_input() {
        assert!(TonalArgs::try_parse_from(["tonal", "predict"]).is_err());
        assert!(
            TonalArgs::try_parse_from(["tonal", "predict", "text", "--file", "comments.txt"])
                .is_err()
        );

        let args =
            TonalArgs::try_parse_from(["tonal", "predict", "--file", "comments.txt"]).unwrap();
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.file, Some(PathBuf::from("comments.txt")));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_serve_command() {
        let args = TonalArgs::try_parse_from([
            "tonal",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--workers",
            "2",
        ])
        .unwrap();

        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.host.as_deref(), Some("127.0.0.1"));
            assert_eq!(serve_args.port, Some(8080));
            assert_eq!(serve_args.workers, Some(2));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = TonalArgs::try_parse_from(["tonal", "normalize", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = TonalArgs::try_parse_from(["tonal", "-v", "normalize", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = TonalArgs::try_parse_from(["tonal", "-vv", "normalize", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = TonalArgs::try_parse_from(["tonal", "-vv", "--quiet", "normalize", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            TonalArgs::try_parse_from(["tonal", "--format", "json", "normalize", "hi"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);

        // Global flags are accepted after the subcommand too
        let args =
            TonalArgs::try_parse_from(["tonal", "normalize", "hi", "--pretty", "-f", "json"])
                .unwrap();
        assert!(args.pretty);
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}

//! Service configuration.
//!
//! Values come from an optional JSON file and from the command line; anything
//! given on the command line wins.
//!
//! ```json
//! {
//!   "server": { "host": "127.0.0.1", "port": 8080, "workers": 4 },
//!   "artifacts": { "model_dir": "models", "resources_dir": "nltk_data" }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::ArtifactPaths;
use crate::error::{Result, TonalError};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default model directory.
pub const DEFAULT_MODEL_DIR: &str = "models";

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Number of worker threads.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: num_cpus::get(),
        }
    }
}

/// Where artifacts and lexical resources live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory holding the model and vectorizer artifacts.
    pub model_dir: PathBuf,
    /// Directory holding lexical resource files.
    pub resources_dir: Option<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            resources_dir: None,
        }
    }
}

impl ArtifactConfig {
    /// Resolve to concrete artifact paths.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::from_model_dir(&self.model_dir)
            .with_resources_dir(self.resources_dir.clone())
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Artifact locations.
    pub artifacts: ArtifactConfig,
}

impl ServiceConfig {
    /// Read a configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            TonalError::config(format!("Cannot open {}: {}", path.display(), e))
        })?;
        let config: ServiceConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TonalError::config(format!("Invalid {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(TonalError::config("server.host must not be empty"));
        }
        if self.server.workers == 0 {
            return Err(TonalError::config("server.workers must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.workers >= 1);
        assert_eq!(config.artifacts.model_dir, PathBuf::from("models"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"port": 8080}}}}"#).unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.artifacts, ArtifactConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"workers": 0}}}}"#).unwrap();
        let err = ServiceConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("workers"));

        let err = ServiceConfig::load(Path::new("/nonexistent/tonal.json")).unwrap_err();
        assert!(matches!(err, TonalError::Config(_)));
    }

    #[test]
    fn test_paths() {
        let artifacts = ArtifactConfig {
            model_dir: PathBuf::from("/srv/models"),
            resources_dir: Some(PathBuf::from("/srv/nltk")),
        };
        let paths = artifacts.paths();
        assert_eq!(
            paths.model_path,
            PathBuf::from("/srv/models/sentiment_model.json")
        );
        assert_eq!(paths.resources_dir, Some(PathBuf::from("/srv/nltk")));
    }
}

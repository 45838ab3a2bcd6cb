use std::{env, num::NonZeroUsize, path::PathBuf};

use crate::error::ConfigErr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_DIR: &str = "model";

/// Immutable settings for a server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    model_dir: PathBuf,
    workers: Option<NonZeroUsize>,
}

impl ServerConfig {
    /// Creates a new server configuration.
    ///
    /// # Arguments
    /// * `host` - Address to bind.
    /// * `port` - Port to bind.
    /// * `model_dir` - Directory holding the model artifact and the feature schema.
    ///
    /// # Returns
    /// A `ServerConfig` using the default amount of HTTP workers.
    pub fn new(host: impl Into<String>, port: u16, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            model_dir: model_dir.into(),
            workers: None,
        }
    }

    /// Reads the configuration from `HOST`, `PORT`, `MODEL_DIR` and `WORKERS`.
    ///
    /// # Errors
    /// Returns a `ConfigErr` if `PORT` or `WORKERS` is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`ServerConfig::from_env`], with the variables taken from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigErr::Invalid { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let model_dir = lookup("MODEL_DIR").unwrap_or_else(|| DEFAULT_MODEL_DIR.to_string());

        let workers = match lookup("WORKERS") {
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigErr::Invalid { var: "WORKERS", value })?,
            ),
            None => None,
        };

        Ok(Self {
            host,
            port,
            model_dir: model_dir.into(),
            workers,
        })
    }

    /// Returns the `host:port` pair to bind.
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    pub fn model_dir(&self) -> &PathBuf {
        &self.model_dir
    }

    /// Returns the amount of HTTP workers, `None` meaning actix-web's default.
    pub fn workers(&self) -> Option<NonZeroUsize> {
        self.workers
    }
}

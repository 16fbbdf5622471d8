//! Service configuration
//!
//! Loaded from TOML. Every key is optional; absent keys take the defaults
//! below.
//!
//! ```toml
//! [dataset]
//! data_dir = "annexes"
//! activity_file = "activity-properties.csv"
//! adjacency_file = "adjacency-matrix.csv"
//! delimiter = ","
//!
//! [graph]
//! report_unresolved = false
//! diagnostics = false
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! cors_origins = ["http://localhost:4200"]
//! ```

use actnet_core::DatasetKind;
use actnet_graph::GraphOptions;
use actnet_parsers::delimiter_byte;
use http::Uri;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Delimiter is not a single ASCII character
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    /// CORS origin is not `scheme://host[:port]`
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

/// Where the two source files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding both files
    pub data_dir: PathBuf,
    /// Activity properties file name
    pub activity_file: String,
    /// Adjacency matrix file name
    pub adjacency_file: String,
    /// Field delimiter shared by both files
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("annexes"),
            activity_file: "activity-properties.csv".to_string(),
            adjacency_file: "adjacency-matrix.csv".to_string(),
            delimiter: ',',
        }
    }
}

impl DatasetConfig {
    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// File name configured for a dataset
    #[must_use]
    pub fn file_name(&self, dataset: DatasetKind) -> &str {
        match dataset {
            DatasetKind::Activities => &self.activity_file,
            DatasetKind::Adjacency => &self.adjacency_file,
        }
    }

    /// Delimiter as the byte the parsers expect
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        delimiter_byte(self.delimiter).map_err(|_| ConfigError::InvalidDelimiter(self.delimiter))
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActnetConfig {
    /// Source files
    pub dataset: DatasetConfig,
    /// Optional graph reporting
    pub graph: GraphOptions,
    /// HTTP listener
    pub server: ServerConfig,
}

impl ActnetConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dataset.delimiter_byte()?;
        self.server
            .cors_origins
            .iter()
            .try_for_each(|origin| validate_origin(origin))
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dataset.data_dir = dir.into();
        self
    }

    /// With graph options
    #[inline]
    #[must_use]
    pub fn with_graph(mut self, graph: GraphOptions) -> Self {
        self.graph = graph;
        self
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.server.bind = bind;
        self
    }
}

/// Check a CORS origin.
///
/// Accepts what the `Origin` header parser accepts: an absolute URI with a
/// scheme and an authority, and no path other than `/` and no query.
pub fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidOrigin(origin.to_string());
    let parts = origin.parse::<Uri>().map_err(|_| invalid())?.into_parts();
    let bare = parts
        .path_and_query
        .as_ref()
        .map_or(true, |p| p.as_str() == "/");
    if parts.scheme.is_some() && parts.authority.is_some() && bare {
        Ok(())
    } else {
        Err(invalid())
    }
}

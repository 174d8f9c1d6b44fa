//! Runtime configuration: defaults, environment overrides, explicit setters.
//!
//! Environment variables are read by [`CatalogConfig::from_env`]; command-line
//! flags are applied on top through the `with_*` setters.

use std::env;
use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use log::warn;

use crate::html::DEFAULT_PLOTLY_SRC;

/// Input file read when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "whisky.csv";

/// Loopback address the dashboard is served on by default.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8050";

/// Overrides the input file.
pub const DATA_ENV: &str = "WHISKY_CATALOG_DATA";

/// Overrides the bind address.
pub const ADDR_ENV: &str = "WHISKY_CATALOG_ADDR";

/// Overrides the Plotly script source.
pub const PLOTLY_SRC_ENV: &str = "WHISKY_CATALOG_PLOTLY_SRC";

/// Invalid configuration values.
#[derive(Debug)]
pub enum ConfigError {
    /// The bind address could not be parsed.
    InvalidAddress {
        value: String,
        source: AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress { value, .. } => {
                write!(f, "Invalid bind address {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddress { source, .. } => Some(source),
        }
    }
}

/// Parses a socket address, warning when it is not a loopback address.
pub fn parse_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    let addr: SocketAddr = value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidAddress {
            value: value.to_owned(),
            source,
        })?;
    if !addr.ip().is_loopback() {
        warn!("binding the dashboard to non-loopback address {addr}");
    }
    Ok(addr)
}

fn env_value(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

/// Settings shared by every sink of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    data_path: PathBuf,
    addr: SocketAddr,
    plotly_src: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            plotly_src: DEFAULT_PLOTLY_SRC.to_owned(),
        }
    }
}

impl CatalogConfig {
    /// Starts from the defaults and applies any environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = env_value(DATA_ENV) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(addr) = env_value(ADDR_ENV) {
            config.addr = parse_addr(&addr)?;
        }
        if let Some(src) = env_value(PLOTLY_SRC_ENV) {
            config.plotly_src = src;
        }
        Ok(config)
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn plotly_src(&self) -> &str {
        &self.plotly_src
    }

    /// Sets the input file and returns the updated config.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Sets the bind address and returns the updated config.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Sets the Plotly script source and returns the updated config.
    pub fn with_plotly_src(mut self, src: impl Into<String>) -> Self {
        self.plotly_src = src.into();
        self
    }
}

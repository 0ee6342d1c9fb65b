//! `subdoc.json` configuration.
//!
//! ```json
//! { "indir": "src", "outdir": "docs", "exclude": ["src/vendor"], "format": "markdown" }
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the config file. Command-line flags take precedence.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the input directory when `-c` is not given.
pub const CONFIG_FILE: &str = "subdoc.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned when no inputs are given on the command line.
    pub indir: Option<PathBuf>,
    /// Where rendered files go; defaults to `<indir>/docs`.
    pub outdir: Option<PathBuf>,
    /// Path prefixes skipped while walking directories.
    pub exclude: Vec<PathBuf>,
    pub format: Option<String>,
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load `<indir>/subdoc.json` if it exists.
    pub fn discover(indir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = indir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        Self {
            indir: self.indir.map(resolve),
            outdir: self.outdir.map(resolve),
            exclude: self.exclude.into_iter().map(resolve).collect(),
            format: self.format,
        }
    }
}

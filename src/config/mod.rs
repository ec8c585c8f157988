//! Config file persistence.
//!
//! The file lives next to the running executable by default. Loading never
//! fails from the caller's point of view: an absent or malformed file yields
//! an empty marker list and default settings.

pub mod codec;
pub mod node;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use codec::{parse_bool, ConfigCodec, GeneralSettings, OverlayConfig};
pub use node::{ConfigNode, ParseError};

use crate::constants::CONFIG_FILE_NAME;
use crate::logging::LogContext;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config tree: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Clone, Debug)]
pub struct ConfigFile {
    path: PathBuf,
    codec: ConfigCodec,
}

impl ConfigFile {
    pub fn at(path: impl Into<PathBuf>, log: LogContext) -> Self {
        Self {
            path: path.into(),
            codec: ConfigCodec::new(log),
        }
    }

    /// `draw_layer.cfg` in the directory of the current executable, or in the
    /// working directory if that cannot be determined.
    pub fn beside_executable(log: LogContext) -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let path = match dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => {
                log.warn(format_args!(
                    "could not locate executable directory, using ./{CONFIG_FILE_NAME}"
                ));
                PathBuf::from(CONFIG_FILE_NAME)
            }
        };
        Self::at(path, log)
    }

    /// Same file, different logging context.
    pub fn with_log(self, log: LogContext) -> Self {
        Self {
            codec: ConfigCodec::new(log),
            ..self
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &ConfigCodec {
        &self.codec
    }

    /// Reads and parses the file, surfacing every failure.
    pub fn try_load(&self) -> Result<Option<OverlayConfig>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let root = ConfigNode::parse(&text)?;
        Ok(Some(self.codec.deserialize(&root)))
    }

    /// Like [`ConfigFile::try_load`] but substitutes defaults for anything
    /// that goes wrong.
    pub fn load(&self) -> OverlayConfig {
        let log = self.codec.log();
        match self.try_load() {
            Ok(Some(config)) => {
                log.info(format_args!(
                    "loaded {} markers from {}",
                    config.markers.len(),
                    self.path.display()
                ));
                config
            }
            Ok(None) => {
                log.info(format_args!(
                    "no configuration file at {}, starting with empty list",
                    self.path.display()
                ));
                OverlayConfig::default()
            }
            Err(e) => {
                log.warn(format_args!(
                    "invalid configuration file, starting with empty list: {e}"
                ));
                OverlayConfig::default()
            }
        }
    }

    /// Overwrites the whole file.
    pub fn save(&self, config: &OverlayConfig) -> Result<()> {
        let text = self.codec.serialize(config).to_text();
        fs::write(&self.path, text).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.codec.log().info(format_args!(
            "saved {} markers to {}",
            config.markers.len(),
            self.path.display()
        ));
        Ok(())
    }
}

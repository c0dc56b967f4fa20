//! Projection configuration
//!
//! All settings have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! id_padding = 3
//! close_at_end = true
//!
//! [families]
//! process = true
//! block_io = true
//! messages = true
//! bfd = true
//! oam = true
//! ```

use crate::classify::Family;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Widest zero-padding that still fits an `i64`
const MAX_ID_PADDING: usize = 19;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-family enable switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Families {
    /// Work-queue process start/finish
    pub process: bool,
    /// Block request insert/complete bookkeeping
    pub block_io: bool,
    /// Zipkin message lifecycle
    pub messages: bool,
    /// BFD session state machine
    pub bfd: bool,
    /// OAM protection group state
    pub oam: bool,
}

impl Families {
    /// Every family enabled
    pub const ALL: Families = Families {
        process: true,
        block_io: true,
        messages: true,
        bfd: true,
        oam: true,
    };

    /// True if events of `family` should be projected
    pub fn is_enabled(&self, family: Family) -> bool {
        match family {
            Family::Process => self.process,
            Family::BlockIo => self.block_io,
            Family::Messages => self.messages,
            Family::Bfd => self.bfd,
            Family::Oam => self.oam,
        }
    }

    /// Toggle one family
    pub fn set(&mut self, family: Family, enabled: bool) {
        match family {
            Family::Process => self.process = enabled,
            Family::BlockIo => self.block_io = enabled,
            Family::Messages => self.messages = enabled,
            Family::Bfd => self.bfd = enabled,
            Family::Oam => self.oam = enabled,
        }
    }
}

impl Default for Families {
    fn default() -> Self {
        Self::ALL
    }
}

/// Settings for one projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Which event families are projected
    pub families: Families,
    /// Zero-pad width of BFD session and OAM protection group ids
    pub id_padding: usize,
    /// Close every ongoing interval at the last timestamp when the stream ends
    pub close_at_end: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            families: Families::ALL,
            id_padding: 3,
            close_at_end: true,
        }
    }
}

impl ProjectionConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ProjectionConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id_padding > MAX_ID_PADDING {
            return Err(ConfigError::Invalid(format!(
                "id_padding {} exceeds {}",
                self.id_padding, MAX_ID_PADDING
            )));
        }
        Ok(())
    }
}

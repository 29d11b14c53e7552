use std::fs;
use std::path::Path;

use hic_core::{ErrorInfo, HicError, DEFAULT_NOTE};
use serde::{Deserialize, Serialize};

use crate::layout::F15Layout;

/// YAML-configurable parameters of an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Half-width of the symmetric midrapidity window.
    #[serde(default = "default_rapidity_cut")]
    pub rapidity_cut: f64,
    /// Provenance note stored in the bundle.
    #[serde(default = "default_note")]
    pub note: String,
    /// Event-file layout.
    #[serde(default)]
    pub layout: F15Layout,
}

fn default_rapidity_cut() -> f64 {
    0.5
}

fn default_note() -> String {
    DEFAULT_NOTE.to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            rapidity_cut: default_rapidity_cut(),
            note: default_note(),
            layout: F15Layout::default(),
        }
    }
}

impl ExtractConfig {
    /// Loads a configuration from a YAML file; absent keys keep defaults.
    pub fn load(path: &Path) -> Result<Self, HicError> {
        let raw = fs::read_to_string(path).map_err(|err| HicError::io("config-read", path, err))?;
        let config: ExtractConfig = serde_yaml::from_str(&raw).map_err(|err| {
            HicError::Serde(ErrorInfo::new("config-parse", err.to_string()).with_path(path))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rapidity window and the layout.
    pub fn validate(&self) -> Result<(), HicError> {
        if !self.rapidity_cut.is_finite() || self.rapidity_cut <= 0.0 {
            return Err(HicError::Usage(
                ErrorInfo::new("config-rapidity-cut", "rapidity cut must be positive")
                    .with_context("rapidity_cut", self.rapidity_cut.to_string()),
            ));
        }
        self.layout.validate()
    }
}

//! JSON configuration for the targeting pipeline.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use vision_targeting_acquire::{AcquireParams, AcquireParamsError, SourceConfig};
use vision_targeting_core::{GeometryConstants, GeometryError};

#[derive(thiserror::Error, Debug)]
pub enum TargetingIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TargetingConfigError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Acquire(#[from] AcquireParamsError),
}

/// Calibration, acquisition policy and producer selection.
///
/// Read once when the pipeline is built; every field falls back to the
/// Limelight 2 defaults when omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub camera: GeometryConstants,
    pub acquire: AcquireParams,
    pub source: SourceConfig,
}

impl TargetingConfig {
    pub fn validate(&self) -> Result<(), TargetingConfigError> {
        self.camera.validate()?;
        self.acquire.validate()?;
        Ok(())
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TargetingIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TargetingIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

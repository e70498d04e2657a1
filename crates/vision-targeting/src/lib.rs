//! Onboard vision targeting pipeline.
//!
//! Turns detection fields published by a vision coprocessor into range,
//! bearing and a signed pixel error for the most relevant target.
//!
//! This crate provides:
//! - [`TargetingPipeline`], which owns a telemetry store handle and the latest
//!   snapshot,
//! - two capability traits it implements: [`TargetInfoProvider`] for discrete
//!   queries and [`ProcessVariableSource`] for closed-loop feedback,
//! - JSON configuration ([`TargetingConfig`]) and a serializable
//!   [`TargetReport`],
//! - re-exports of the underlying crates as [`core`] and [`acquire`].
//!
//! ## Quickstart
//!
//! ```
//! use vision_targeting::acquire::MemoryTelemetryStore;
//! use vision_targeting::{TargetInfoProvider, TargetingConfig, TargetingPipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryTelemetryStore::new();
//! let mut pipeline = TargetingPipeline::new(&store, &TargetingConfig::default())?;
//!
//! store.set_f64("limelight/tv", 1.0);
//! store.set_f64("limelight/thor", 100.0);
//! store.set_f64("limelight/tvert", 40.0);
//!
//! if pipeline.acquire_targets(false) {
//!     println!("range {:.1} in", pipeline.range_by_horizontal_fov());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure model
//!
//! Nothing here returns an error at runtime. A snapshot that stays torn
//! after the retry bound reads as zero targets, and zero targets read as
//! `+inf` range with zero bearing and displacement.

mod config;
mod pipeline;
mod provider;
mod report;

pub use vision_targeting_acquire as acquire;
pub use vision_targeting_core as core;

pub use config::{TargetingConfig, TargetingConfigError, TargetingIoError};
pub use pipeline::TargetingPipeline;
pub use provider::{ProcessVariableSource, PvUnit, TargetInfoProvider};
pub use report::TargetReport;

pub use vision_targeting_core::{
    DetectionSnapshot, GeometryConstants, TargetCandidate, TargetEstimate,
};

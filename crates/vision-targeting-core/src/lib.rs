//! Core types and geometry for vision-coprocessor target estimation.
//!
//! This crate is pure computation over an already acquired
//! [`DetectionSnapshot`]: it performs no I/O and knows nothing about where
//! the detection fields came from.
//!
//! ## Quickstart
//!
//! ```
//! use vision_targeting_core::{
//!     select_largest, DetectionSnapshot, GeometryConstants, GeometryEstimator,
//! };
//!
//! let snapshot = DetectionSnapshot::single(1.2, 100.0, 40.0, 200.0, 120.0);
//! let estimator = GeometryEstimator::new(GeometryConstants::LIMELIGHT2);
//!
//! let selected = select_largest(&snapshot).and_then(|i| snapshot.candidate(i));
//! let bearing = estimator.bearing_deg(selected.as_ref());
//! assert!(bearing > 0.0);
//! ```

mod camera;
mod geometry;
mod logger;
mod select;
mod snapshot;

pub use camera::{GeometryConstants, GeometryError};
pub use geometry::{GeometryEstimator, TargetEstimate};
pub use select::{select_largest, target_count};
pub use snapshot::{DetectionSnapshot, TargetCandidate};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

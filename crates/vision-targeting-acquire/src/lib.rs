//! Snapshot acquisition from a telemetry store.
//!
//! A vision coprocessor publishes detection fields into a key-value store
//! asynchronously, one key at a time. Nothing makes a group of reads
//! atomic, so this crate:
//! - reads every field of a [`DetectionSource`] in one pass,
//! - checks the resulting snapshot for coherence,
//! - repeats the pass a bounded number of times ([`AcquireParams::max_attempts`])
//!   and hands back the last snapshot either way.
//!
//! ```
//! use vision_targeting_acquire::{
//!     AcquireParams, LimelightKeys, LimelightSource, MemoryTelemetryStore, SnapshotAcquirer,
//! };
//! use vision_targeting_core::GeometryConstants;
//!
//! let store = MemoryTelemetryStore::new();
//! store.set_f64("limelight/tv", 1.0);
//! store.set_f64("limelight/thor", 80.0);
//!
//! let source = LimelightSource::new(&LimelightKeys::default(), GeometryConstants::LIMELIGHT2);
//! let acquirer = SnapshotAcquirer::new(&store, Box::new(source), AcquireParams::default());
//! let acq = acquirer.acquire(false);
//! assert_eq!(acq.snapshot.len(), 1);
//! ```

mod acquirer;
mod source;
mod store;

pub use acquirer::{AcquireParams, AcquireParamsError, Acquisition, SnapshotAcquirer};
pub use source::{
    ContourReportKeys, ContourReportSource, DetectionSource, LimelightKeys, LimelightSource,
    SourceConfig,
};
pub use store::{MemoryTelemetryStore, TelemetryStore};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vision_targeting_core::DetectionSnapshot;

use crate::{DetectionSource, TelemetryStore};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Acquisition parameter validation errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AcquireParamsError {
    #[error("max_attempts must be >= 1")]
    NoAttempts,
    #[error("settle_delay_s must be finite and >= 0 (got {0})")]
    InvalidSettleDelay(f64),
}

fn default_settle_delay_s() -> f64 {
    0.5
}

fn default_max_attempts() -> u32 {
    5
}

/// Settle and retry policy for snapshot acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcquireParams {
    /// Blocking wait before a settled read, in seconds.
    #[serde(default = "default_settle_delay_s")]
    pub settle_delay_s: f64,
    /// Upper bound on full reads per acquisition. No backoff between reads.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for AcquireParams {
    fn default() -> Self {
        Self {
            settle_delay_s: default_settle_delay_s(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl AcquireParams {
    pub fn validate(&self) -> Result<(), AcquireParamsError> {
        if self.max_attempts == 0 {
            return Err(AcquireParamsError::NoAttempts);
        }
        if !self.settle_delay_s.is_finite() || self.settle_delay_s < 0.0 {
            return Err(AcquireParamsError::InvalidSettleDelay(self.settle_delay_s));
        }
        Ok(())
    }

    /// Settle delay as a `Duration`; an unusable value maps to zero.
    pub fn settle_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.settle_delay_s).unwrap_or(Duration::ZERO)
    }
}

/// Outcome of one acquisition.
#[derive(Clone, Debug, PartialEq)]
pub struct Acquisition {
    /// Last assembled snapshot. May be incoherent if every attempt tore.
    pub snapshot: DetectionSnapshot,
    /// Full reads performed, in `1..=max_attempts`.
    pub attempts: u32,
}

/// Reads a detection source until its snapshot is coherent or the attempt
/// bound is reached.
///
/// Exhausting the bound is not an error: the last snapshot is returned as
/// is, and an incoherent snapshot already reads as "no targets" downstream.
pub struct SnapshotAcquirer<S> {
    store: S,
    source: Box<dyn DetectionSource + Send + Sync>,
    params: AcquireParams,
}

impl<S: TelemetryStore> SnapshotAcquirer<S> {
    pub fn new(
        store: S,
        source: Box<dyn DetectionSource + Send + Sync>,
        params: AcquireParams,
    ) -> Self {
        Self {
            store,
            source,
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &AcquireParams {
        &self.params
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Acquire a fresh snapshot.
    ///
    /// With `wait_for_settle` the calling thread first blocks for the settle
    /// delay so the coprocessor can catch up with a preceding change (an aim
    /// adjustment, for example). Per-tick polling passes `false`.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn acquire(&self, wait_for_settle: bool) -> Acquisition {
        if wait_for_settle {
            let delay = self.params.settle_delay();
            if !delay.is_zero() {
                log::debug!("settling {:.3}s before read", delay.as_secs_f64());
                std::thread::sleep(delay);
            }
        }

        let max_attempts = self.params.max_attempts.max(1);
        let mut attempts = 0;
        loop {
            let snapshot = self.source.read(&self.store);
            attempts += 1;
            if snapshot.is_coherent() {
                return Acquisition { snapshot, attempts };
            }
            if attempts >= max_attempts {
                log::warn!(
                    "snapshot still incoherent after {attempts} reads (columns {:?}); treating as no targets",
                    snapshot.column_lengths()
                );
                return Acquisition { snapshot, attempts };
            }
            log::debug!(
                "torn read on attempt {attempts}/{max_attempts} (columns {:?}), retrying",
                snapshot.column_lengths()
            );
        }
    }
}

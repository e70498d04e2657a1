use vision_targeting_acquire::{
    AcquireParams, Acquisition, DetectionSource, SnapshotAcquirer, TelemetryStore,
};
use vision_targeting_core::{
    select_largest, DetectionSnapshot, GeometryConstants, GeometryEstimator, TargetCandidate,
    TargetEstimate,
};

use crate::{
    ProcessVariableSource, PvUnit, TargetInfoProvider, TargetReport, TargetingConfig,
    TargetingConfigError,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Acquire, select and estimate, backed by one telemetry store.
///
/// The pipeline holds only the latest snapshot and its selection; each
/// acquisition replaces both. It is meant to be owned by the drive component
/// and lent (`&mut`) to whatever needs to poll it, such as a PID loop.
pub struct TargetingPipeline<S> {
    acquirer: SnapshotAcquirer<S>,
    estimator: GeometryEstimator,
    snapshot: DetectionSnapshot,
    selected: Option<usize>,
}

impl<S: TelemetryStore> TargetingPipeline<S> {
    /// Build a pipeline from a validated configuration.
    pub fn new(store: S, config: &TargetingConfig) -> Result<Self, TargetingConfigError> {
        config.validate()?;
        let source = config.source.build(config.camera);
        Ok(Self::from_parts(store, config.camera, source, config.acquire))
    }

    /// Build a pipeline around a custom detection source. No validation.
    pub fn from_parts(
        store: S,
        constants: GeometryConstants,
        source: Box<dyn DetectionSource + Send + Sync>,
        params: AcquireParams,
    ) -> Self {
        Self {
            acquirer: SnapshotAcquirer::new(store, source, params),
            estimator: GeometryEstimator::new(constants),
            // no columns yet: reads as zero targets until the first acquisition
            snapshot: DetectionSnapshot::default(),
            selected: None,
        }
    }

    /// Acquire a new snapshot and reselect the largest candidate.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn acquire(&mut self, wait_for_settle: bool) -> &DetectionSnapshot {
        let Acquisition { snapshot, attempts } = self.acquirer.acquire(wait_for_settle);
        self.selected = select_largest(&snapshot);
        self.snapshot = snapshot;
        log::trace!(
            "acquired {} target(s) in {attempts} read(s), selected {:?}",
            self.snapshot.len(),
            self.selected
        );
        &self.snapshot
    }

    #[inline]
    pub fn snapshot(&self) -> &DetectionSnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn constants(&self) -> &GeometryConstants {
        self.estimator.constants()
    }

    #[inline]
    pub fn acquire_params(&self) -> &AcquireParams {
        self.acquirer.params()
    }

    #[inline]
    pub fn store(&self) -> &S {
        self.acquirer.store()
    }

    /// The largest-area candidate of the held snapshot.
    pub fn selected_target(&self) -> Option<TargetCandidate> {
        self.selected.and_then(|i| self.snapshot.candidate(i))
    }

    /// Range, bearing and displacement of the selected target.
    pub fn estimate(&self) -> TargetEstimate {
        self.estimator.estimate(self.selected_target().as_ref())
    }

    pub fn report(&self) -> TargetReport {
        TargetReport::capture(self)
    }
}

impl<S: TelemetryStore> TargetInfoProvider for TargetingPipeline<S> {
    fn acquire_targets(&mut self, wait_for_settle: bool) -> bool {
        self.acquire(wait_for_settle);
        self.selected_target().is_some()
    }

    fn is_coherent(&self) -> bool {
        self.snapshot.is_coherent()
    }

    fn target_count(&self) -> usize {
        self.snapshot.len()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn range_by_vertical_fov(&self) -> f64 {
        self.estimator
            .range_by_vertical_fov(self.selected_target().as_ref())
    }

    fn range_by_horizontal_fov(&self) -> f64 {
        self.estimator
            .range_by_horizontal_fov(self.selected_target().as_ref())
    }

    fn bearing_deg(&self) -> f64 {
        self.estimator.bearing_deg(self.selected_target().as_ref())
    }

    fn pixel_displacement(&self) -> f64 {
        self.estimator
            .pixel_displacement(self.selected_target().as_ref())
    }
}

impl<S: TelemetryStore> ProcessVariableSource for TargetingPipeline<S> {
    fn unit(&self) -> PvUnit {
        PvUnit::Displacement
    }

    /// Fast acquisition, then the negated pixel displacement.
    ///
    /// The controller drives the sample toward zero; negating makes a target
    /// right of center produce a negative error.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn sample(&mut self) -> f64 {
        self.acquire(false);
        -self.pixel_displacement()
    }
}

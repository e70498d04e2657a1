//! Capability traits consumed by drive code and closed-loop controllers.

use serde::{Deserialize, Serialize};

/// Discrete target queries over the most recent acquisition.
///
/// Queries never fail. With no usable target, ranges are `+inf` and
/// bearing/displacement are `0`.
pub trait TargetInfoProvider {
    /// Replace the held snapshot with a fresh acquisition.
    ///
    /// Returns `true` when the new snapshot is coherent and has a target.
    fn acquire_targets(&mut self, wait_for_settle: bool) -> bool;

    fn is_coherent(&self) -> bool;

    /// Candidates in the held snapshot; 0 when incoherent.
    fn target_count(&self) -> usize;

    /// At least one candidate is visible.
    fn has_target(&self) -> bool {
        self.target_count() > 0
    }

    /// Index of the largest-area candidate, if any.
    fn selected_index(&self) -> Option<usize>;

    fn range_by_vertical_fov(&self) -> f64;

    fn range_by_horizontal_fov(&self) -> f64;

    fn bearing_deg(&self) -> f64;

    fn pixel_displacement(&self) -> f64;
}

/// What a process-variable sample measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PvUnit {
    /// A position error usable directly as a PID input.
    Displacement,
    /// A rate of change.
    Rate,
}

/// Scalar feedback polled by a closed-loop controller once per cycle.
pub trait ProcessVariableSource {
    fn unit(&self) -> PvUnit;

    /// Take a fresh sample.
    fn sample(&mut self) -> f64;
}

impl<T: TargetInfoProvider + ?Sized> TargetInfoProvider for &mut T {
    fn acquire_targets(&mut self, wait_for_settle: bool) -> bool {
        (**self).acquire_targets(wait_for_settle)
    }

    fn is_coherent(&self) -> bool {
        (**self).is_coherent()
    }

    fn target_count(&self) -> usize {
        (**self).target_count()
    }

    fn selected_index(&self) -> Option<usize> {
        (**self).selected_index()
    }

    fn range_by_vertical_fov(&self) -> f64 {
        (**self).range_by_vertical_fov()
    }

    fn range_by_horizontal_fov(&self) -> f64 {
        (**self).range_by_horizontal_fov()
    }

    fn bearing_deg(&self) -> f64 {
        (**self).bearing_deg()
    }

    fn pixel_displacement(&self) -> f64 {
        (**self).pixel_displacement()
    }
}

impl<T: ProcessVariableSource + ?Sized> ProcessVariableSource for &mut T {
    fn unit(&self) -> PvUnit {
        (**self).unit()
    }

    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

//! FOV triangulation and steering bearing.
//!
//! Every estimate is a pure function of the calibration and the selected
//! candidate. When nothing is selected the estimates fall back to values a
//! control loop can use without branching: ranges are `+inf` (so "within N
//! inches" checks fail closed) and bearing/displacement are `0` (no steering
//! correction).

use serde::{Deserialize, Serialize};

use crate::{select_largest, DetectionSnapshot, GeometryConstants, TargetCandidate};

/// Range, bearing and pixel error for one selected candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetEstimate {
    /// Range in inches from the measured height and the vertical FOV.
    pub range_vertical_fov_in: f64,
    /// Range in inches from the measured width and the horizontal FOV.
    pub range_horizontal_fov_in: f64,
    /// Signed bearing in degrees, positive to the right of center.
    pub bearing_deg: f64,
    /// Signed horizontal offset from image center in pixels.
    pub pixel_displacement: f64,
}

impl TargetEstimate {
    /// Estimate reported when no candidate is selected.
    pub const NO_TARGET: TargetEstimate = TargetEstimate {
        range_vertical_fov_in: f64::INFINITY,
        range_horizontal_fov_in: f64::INFINITY,
        bearing_deg: 0.0,
        pixel_displacement: 0.0,
    };
}

/// Converts a candidate's projected size and position into physical units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryEstimator {
    constants: GeometryConstants,
}

impl GeometryEstimator {
    pub fn new(constants: GeometryConstants) -> Self {
        Self { constants }
    }

    #[inline]
    pub fn constants(&self) -> &GeometryConstants {
        &self.constants
    }

    /// Range from the measured height against the vertical field of view.
    pub fn range_by_vertical_fov(&self, target: Option<&TargetCandidate>) -> f64 {
        let Some(t) = target else {
            return f64::INFINITY;
        };
        let c = &self.constants;
        fov_range(
            c.target_height_in,
            c.vertical_resolution_px,
            t.height(),
            c.vertical_fov_deg,
        )
    }

    /// Range from the measured width against the horizontal field of view.
    pub fn range_by_horizontal_fov(&self, target: Option<&TargetCandidate>) -> f64 {
        let Some(t) = target else {
            return f64::INFINITY;
        };
        let c = &self.constants;
        fov_range(
            c.target_width_in,
            c.horizontal_resolution_px,
            t.width(),
            c.horizontal_fov_deg,
        )
    }

    /// Angle to turn toward the target; negative means left of center.
    pub fn bearing_deg(&self, target: Option<&TargetCandidate>) -> f64 {
        let Some(t) = target else {
            return 0.0;
        };
        let c = &self.constants;
        let frac = (t.center.x - c.center_x_px()) / f64::from(c.horizontal_resolution_px);
        frac * c.horizontal_fov_deg
    }

    /// Raw signed horizontal pixel error from image center.
    pub fn pixel_displacement(&self, target: Option<&TargetCandidate>) -> f64 {
        target.map_or(0.0, |t| t.center.x - self.constants.center_x_px())
    }

    /// All four estimates for `target`.
    pub fn estimate(&self, target: Option<&TargetCandidate>) -> TargetEstimate {
        if target.is_none() {
            return TargetEstimate::NO_TARGET;
        }
        TargetEstimate {
            range_vertical_fov_in: self.range_by_vertical_fov(target),
            range_horizontal_fov_in: self.range_by_horizontal_fov(target),
            bearing_deg: self.bearing_deg(target),
            pixel_displacement: self.pixel_displacement(target),
        }
    }

    /// Select the largest candidate of `snapshot` and estimate it.
    pub fn estimate_snapshot(&self, snapshot: &DetectionSnapshot) -> TargetEstimate {
        let target = select_largest(snapshot).and_then(|i| snapshot.candidate(i));
        self.estimate(target.as_ref())
    }
}

/// `physical * (resolution / measured) / 2 / tan(fov / 2)`.
#[inline]
fn fov_range(physical_in: f64, resolution_px: u32, measured_px: f64, fov_deg: f64) -> f64 {
    physical_in * (f64::from(resolution_px) / measured_px)
        / 2.0
        / (fov_deg / 2.0).to_radians().tan()
}

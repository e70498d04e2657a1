use serde::{Deserialize, Serialize};

use crate::TargetInfoProvider;

/// Snapshot of the pipeline's query results for dashboards and logs.
///
/// Ranges are `None` when no target is selected (the queries return `+inf`,
/// which JSON cannot carry).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    pub target_count: usize,
    pub coherent: bool,
    pub selected: Option<usize>,
    pub range_vertical_fov_in: Option<f64>,
    pub range_horizontal_fov_in: Option<f64>,
    pub bearing_deg: f64,
    pub pixel_displacement: f64,
}

impl TargetReport {
    /// Read the current query results without triggering an acquisition.
    pub fn capture<P: TargetInfoProvider + ?Sized>(provider: &P) -> Self {
        Self {
            target_count: provider.target_count(),
            coherent: provider.is_coherent(),
            selected: provider.selected_index(),
            range_vertical_fov_in: finite(provider.range_by_vertical_fov()),
            range_horizontal_fov_in: finite(provider.range_by_horizontal_fov()),
            bearing_deg: provider.bearing_deg(),
            pixel_displacement: provider.pixel_displacement(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

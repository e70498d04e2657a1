//! Detection sources: how raw telemetry fields become a snapshot.

use serde::{Deserialize, Serialize};
use vision_targeting_core::{DetectionSnapshot, GeometryConstants};

use crate::TelemetryStore;

/// One read of a producer's fields into a (possibly incoherent) snapshot.
pub trait DetectionSource {
    fn read(&self, store: &dyn TelemetryStore) -> DetectionSnapshot;
}

fn default_limelight_table() -> String {
    "limelight".to_string()
}

/// Entry names of a Limelight-style single-target producer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimelightKeys {
    pub table: String,
    /// Target-valid flag; non-zero means one target is reported.
    pub valid: String,
    pub area: String,
    /// Bounding-box width in pixels.
    pub width: String,
    /// Bounding-box height in pixels.
    pub height: String,
    /// Horizontal offset from crosshair in degrees.
    pub offset_x: String,
    /// Vertical offset from crosshair in degrees.
    pub offset_y: String,
}

impl Default for LimelightKeys {
    fn default() -> Self {
        Self {
            table: default_limelight_table(),
            valid: "tv".to_string(),
            area: "ta".to_string(),
            width: "thor".to_string(),
            height: "tvert".to_string(),
            offset_x: "tx".to_string(),
            offset_y: "ty".to_string(),
        }
    }
}

impl LimelightKeys {
    /// Fully qualified key `table/entry`.
    pub fn key(&self, entry: &str) -> String {
        qualify(&self.table, entry)
    }
}

/// Entry names of a contour-report producer publishing one array per column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourReportKeys {
    pub table: String,
    pub area: String,
    pub width: String,
    pub height: String,
    pub center_x: String,
    pub center_y: String,
}

impl Default for ContourReportKeys {
    fn default() -> Self {
        Self {
            table: "GRIP/myContoursReport".to_string(),
            area: "area".to_string(),
            width: "width".to_string(),
            height: "height".to_string(),
            center_x: "centerX".to_string(),
            center_y: "centerY".to_string(),
        }
    }
}

impl ContourReportKeys {
    pub fn key(&self, entry: &str) -> String {
        qualify(&self.table, entry)
    }
}

fn qualify(table: &str, entry: &str) -> String {
    if table.is_empty() {
        entry.to_string()
    } else {
        format!("{table}/{entry}")
    }
}

/// Single-target producer reporting angular offsets.
///
/// The offsets are remapped into pixel coordinates with
/// `offset * resolution / fov + resolution / 2` so that downstream code
/// works in pixels for every source. The remap is linear and only as good
/// as the calibration constants.
#[derive(Clone, Debug)]
pub struct LimelightSource {
    constants: GeometryConstants,
    valid: String,
    area: String,
    width: String,
    height: String,
    offset_x: String,
    offset_y: String,
}

impl LimelightSource {
    pub fn new(keys: &LimelightKeys, constants: GeometryConstants) -> Self {
        Self {
            constants,
            valid: keys.key(&keys.valid),
            area: keys.key(&keys.area),
            width: keys.key(&keys.width),
            height: keys.key(&keys.height),
            offset_x: keys.key(&keys.offset_x),
            offset_y: keys.key(&keys.offset_y),
        }
    }
}

impl DetectionSource for LimelightSource {
    fn read(&self, store: &dyn TelemetryStore) -> DetectionSnapshot {
        let area = store.get_f64(&self.area, 0.0);
        let width = store.get_f64(&self.width, 0.0);
        let height = store.get_f64(&self.height, 0.0);
        let tx = store.get_f64(&self.offset_x, 0.0);
        let ty = store.get_f64(&self.offset_y, 0.0);
        let valid = store.get_f64(&self.valid, 0.0);

        if valid == 0.0 {
            return DetectionSnapshot::empty();
        }
        DetectionSnapshot::single(
            area,
            width,
            height,
            self.constants.horizontal_offset_to_px(tx),
            self.constants.vertical_offset_to_px(ty),
        )
    }
}

/// Multi-target producer publishing five independent pixel-space arrays.
///
/// Arrays are read one key at a time, so a producer update landing between
/// two reads yields columns of different lengths.
#[derive(Clone, Debug)]
pub struct ContourReportSource {
    area: String,
    width: String,
    height: String,
    center_x: String,
    center_y: String,
}

impl ContourReportSource {
    pub fn new(keys: &ContourReportKeys) -> Self {
        Self {
            area: keys.key(&keys.area),
            width: keys.key(&keys.width),
            height: keys.key(&keys.height),
            center_x: keys.key(&keys.center_x),
            center_y: keys.key(&keys.center_y),
        }
    }
}

impl DetectionSource for ContourReportSource {
    fn read(&self, store: &dyn TelemetryStore) -> DetectionSnapshot {
        DetectionSnapshot::from_columns(
            store.get_f64_array(&self.area),
            store.get_f64_array(&self.width),
            store.get_f64_array(&self.height),
            store.get_f64_array(&self.center_x),
            store.get_f64_array(&self.center_y),
        )
    }
}

/// Which producer the pipeline reads from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Limelight(LimelightKeys),
    ContourReport(ContourReportKeys),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Limelight(LimelightKeys::default())
    }
}

impl SourceConfig {
    /// Build the configured source; `constants` drive the angular remap.
    pub fn build(&self, constants: GeometryConstants) -> Box<dyn DetectionSource + Send + Sync> {
        match self {
            SourceConfig::Limelight(keys) => Box::new(LimelightSource::new(keys, constants)),
            SourceConfig::ContourReport(keys) => Box::new(ContourReportSource::new(keys)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTelemetryStore;
    use approx::assert_relative_eq;

    fn limelight() -> LimelightSource {
        LimelightSource::new(&LimelightKeys::default(), GeometryConstants::LIMELIGHT2)
    }

    #[test]
    fn invalid_flag_yields_empty_coherent_snapshot() {
        let store = MemoryTelemetryStore::new();
        store.set_f64("limelight/ta", 3.0);
        store.set_f64("limelight/thor", 50.0);
        let snap = limelight().read(&store);
        assert!(snap.is_coherent());
        assert_eq!(snap.len(), 0);
    }

    #[test]
    fn valid_flag_yields_one_remapped_candidate() {
        let store = MemoryTelemetryStore::new();
        store.set_f64("limelight/tv", 1.0);
        store.set_f64("limelight/ta", 2.5);
        store.set_f64("limelight/thor", 80.0);
        store.set_f64("limelight/tvert", 30.0);
        store.set_f64("limelight/tx", 14.9);
        store.set_f64("limelight/ty", -5.0);

        let snap = limelight().read(&store);
        let c = snap.candidate(0).expect("candidate");
        assert_eq!(snap.len(), 1);
        assert_eq!(c.area, 2.5);
        assert_eq!(c.width(), 80.0);
        assert_eq!(c.height(), 30.0);
        assert_relative_eq!(c.center.x, 14.9 * 320.0 / 59.6 + 160.0, max_relative = 1e-12);
        assert_relative_eq!(c.center.y, -5.0 * 240.0 / 45.7 + 120.0, max_relative = 1e-12);
    }

    #[test]
    fn custom_table_name_is_honoured() {
        let keys = LimelightKeys {
            table: "limelight-front".to_string(),
            ..LimelightKeys::default()
        };
        let store = MemoryTelemetryStore::new();
        store.set_f64("limelight-front/tv", 1.0);
        let snap = LimelightSource::new(&keys, GeometryConstants::LIMELIGHT2).read(&store);
        assert_eq!(snap.len(), 1);
        // all-default fields: centered, zero size
        assert_eq!(snap.center_x(), &[160.0]);
    }

    #[test]
    fn contour_report_reads_columns_verbatim() {
        let store = MemoryTelemetryStore::new();
        let keys = ContourReportKeys::default();
        store.set_f64_array(keys.key("area"), vec![10.0, 40.0]);
        store.set_f64_array(keys.key("width"), vec![5.0, 8.0]);
        store.set_f64_array(keys.key("height"), vec![2.0, 5.0]);
        store.set_f64_array(keys.key("centerX"), vec![30.0, 250.0]);
        store.set_f64_array(keys.key("centerY"), vec![100.0, 110.0]);

        let snap = ContourReportSource::new(&keys).read(&store);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.center_x(), &[30.0, 250.0]);

        store.remove(&keys.key("centerY"));
        let torn = ContourReportSource::new(&keys).read(&store);
        assert!(!torn.is_coherent());
    }

    #[test]
    fn source_config_is_tagged_json() {
        let json = r#"{"kind":"contour_report","table":"vision"}"#;
        let cfg: SourceConfig = serde_json::from_str(json).expect("parse");
        match &cfg {
            SourceConfig::ContourReport(keys) => {
                assert_eq!(keys.table, "vision");
                assert_eq!(keys.center_x, "centerX");
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(SourceConfig::default(), SourceConfig::Limelight(LimelightKeys::default()));
    }
}

//! Camera calibration constants.

use serde::{Deserialize, Serialize};

/// Calibration validation errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("resolution must be > 0 px on both axes (got {horizontal}x{vertical})")]
    InvalidResolution { horizontal: u32, vertical: u32 },
    #[error("{axis} field of view must be in (0, 180) degrees (got {value})")]
    InvalidFov { axis: &'static str, value: f64 },
    #[error("physical target {dimension} must be finite and > 0 (got {value})")]
    InvalidTargetSize { dimension: &'static str, value: f64 },
}

/// Optical and physical constants used to triangulate range and bearing.
///
/// These are flashed with the robot configuration and never change while a
/// pipeline is running. Lengths are inches, angles are degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConstants {
    pub horizontal_resolution_px: u32,
    pub vertical_resolution_px: u32,
    pub horizontal_fov_deg: f64,
    pub vertical_fov_deg: f64,
    /// Assumed width of the physical target.
    pub target_width_in: f64,
    /// Assumed height of the physical target.
    pub target_height_in: f64,
}

impl GeometryConstants {
    /// Limelight 2 at its 320x240 processing resolution.
    pub const LIMELIGHT2: GeometryConstants = GeometryConstants {
        horizontal_resolution_px: 320,
        vertical_resolution_px: 240,
        horizontal_fov_deg: 59.6,
        vertical_fov_deg: 45.7,
        target_width_in: 12.0,
        target_height_in: 5.5,
    };

    /// Check that every constant can be used in the range and bearing formulas.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.horizontal_resolution_px == 0 || self.vertical_resolution_px == 0 {
            return Err(GeometryError::InvalidResolution {
                horizontal: self.horizontal_resolution_px,
                vertical: self.vertical_resolution_px,
            });
        }
        for (axis, value) in [
            ("horizontal", self.horizontal_fov_deg),
            ("vertical", self.vertical_fov_deg),
        ] {
            if !value.is_finite() || value <= 0.0 || value >= 180.0 {
                return Err(GeometryError::InvalidFov { axis, value });
            }
        }
        for (dimension, value) in [
            ("width", self.target_width_in),
            ("height", self.target_height_in),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidTargetSize { dimension, value });
            }
        }
        Ok(())
    }

    /// Horizontal image center in pixels.
    ///
    /// Integer halving: an odd resolution rounds the center down.
    #[inline]
    pub fn center_x_px(&self) -> f64 {
        f64::from(self.horizontal_resolution_px / 2)
    }

    /// Vertical image center in pixels.
    #[inline]
    pub fn center_y_px(&self) -> f64 {
        f64::from(self.vertical_resolution_px / 2)
    }

    /// Map a horizontal angular offset (degrees) onto the pixel axis.
    ///
    /// This is a linear approximation that only holds for the calibration it
    /// was tuned against; it is not a pinhole projection.
    #[inline]
    pub fn horizontal_offset_to_px(&self, offset_deg: f64) -> f64 {
        offset_deg * f64::from(self.horizontal_resolution_px) / self.horizontal_fov_deg
            + self.center_x_px()
    }

    /// Map a vertical angular offset (degrees) onto the pixel axis.
    #[inline]
    pub fn vertical_offset_to_px(&self, offset_deg: f64) -> f64 {
        offset_deg * f64::from(self.vertical_resolution_px) / self.vertical_fov_deg
            + self.center_y_px()
    }
}

impl Default for GeometryConstants {
    fn default() -> Self {
        Self::LIMELIGHT2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn limelight_defaults_validate() {
        assert_eq!(GeometryConstants::default(), GeometryConstants::LIMELIGHT2);
        assert!(GeometryConstants::LIMELIGHT2.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_calibration() {
        let zero_res = GeometryConstants {
            vertical_resolution_px: 0,
            ..GeometryConstants::LIMELIGHT2
        };
        assert!(matches!(
            zero_res.validate(),
            Err(GeometryError::InvalidResolution { .. })
        ));

        let wide = GeometryConstants {
            horizontal_fov_deg: 180.0,
            ..GeometryConstants::LIMELIGHT2
        };
        assert_eq!(
            wide.validate(),
            Err(GeometryError::InvalidFov {
                axis: "horizontal",
                value: 180.0
            })
        );

        let flat = GeometryConstants {
            target_height_in: f64::NAN,
            ..GeometryConstants::LIMELIGHT2
        };
        assert!(matches!(
            flat.validate(),
            Err(GeometryError::InvalidTargetSize {
                dimension: "height",
                ..
            })
        ));
    }

    #[test]
    fn zero_offset_maps_to_image_center() {
        let cam = GeometryConstants::LIMELIGHT2;
        assert_eq!(cam.horizontal_offset_to_px(0.0), 160.0);
        assert_eq!(cam.vertical_offset_to_px(0.0), 120.0);
        // Half the FOV lands on the image edge.
        assert_relative_eq!(cam.horizontal_offset_to_px(29.8), 320.0, epsilon = 1e-9);
        assert_relative_eq!(cam.vertical_offset_to_px(-22.85), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn odd_resolution_center_rounds_down() {
        let cam = GeometryConstants {
            horizontal_resolution_px: 321,
            ..GeometryConstants::LIMELIGHT2
        };
        assert_eq!(cam.center_x_px(), 160.0);
    }

    #[test]
    fn json_round_trip_keeps_constants() {
        let json = serde_json::to_string(&GeometryConstants::LIMELIGHT2).expect("serialize");
        let back: GeometryConstants = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, GeometryConstants::LIMELIGHT2);
    }
}

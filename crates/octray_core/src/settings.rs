//! Render settings.
//!
//! Every field is optional in the serialized form; missing fields take the
//! defaults below. Settings are usually read from a JSON file and then
//! overridden from the command line.

use std::path::Path;

use octray_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera, sampling and scheduling parameters for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Width over height; the image height is derived from it
    pub aspect_ratio: f32,
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f32,

    /// Colour returned by rays that escape the scene
    pub background: Vec3,

    /// Worker threads; 0 picks the available parallelism
    pub threads: usize,
    /// Base seed for per-scanline random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Vec3::new(0.70, 0.80, 1.00),
            threads: 0,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&text)?;
        log::debug!("Loaded render settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Reject values the camera cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| {
            Err(SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.image_width == 0 {
            return invalid("image_width", "must be at least 1");
        }
        if !(self.aspect_ratio > 0.0) {
            return invalid("aspect_ratio", "must be positive");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel", "must be at least 1");
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid("vfov", "must be between 0 and 180 degrees");
        }
        if self.look_from == self.look_at {
            return invalid("look_at", "must differ from look_from");
        }
        let view = (self.look_from - self.look_at).normalize();
        if self.vup.cross(view).length_squared() < 1e-12 {
            return invalid("vup", "must not be parallel to the view direction");
        }
        if !(self.focus_dist > 0.0) {
            return invalid("focus_dist", "must be positive");
        }
        Ok(())
    }

    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = RenderSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{
            "image_width": 800,
            "samples_per_pixel": 100,
            "look_from": [0.0, 0.0, 5.0],
            "look_at": [0.0, 0.0, 0.0],
            "background": [0.0, 0.0, 0.0]
        }"#;
        let settings = RenderSettings::from_json_str(json).unwrap();

        assert_eq!(settings.image_width, 800);
        assert_eq!(settings.samples_per_pixel, 100);
        assert_eq!(settings.look_from, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(settings.background, Vec3::ZERO);
        // Untouched fields keep their defaults
        assert_eq!(settings.max_depth, 10);
        assert_eq!(settings.vfov, 90.0);
    }

    #[test]
    fn test_image_height() {
        let settings = RenderSettings::default();
        assert_eq!(settings.image_height(), 225);

        let tiny = RenderSettings {
            image_width: 1,
            aspect_ratio: 16.0,
            ..Default::default()
        };
        assert_eq!(tiny.image_height(), 1);
    }

    #[test]
    fn test_validation() {
        let err = RenderSettings::from_json_str(r#"{"samples_per_pixel": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "samples_per_pixel",
                ..
            }
        ));

        assert!(RenderSettings::from_json_str(r#"{"vfov": 180.0}"#).is_err());
        assert!(RenderSettings::from_json_str("not json").is_err());
    }

    #[test]
    fn test_vup_along_view_is_rejected() {
        // Looking straight down with the default +Y up
        let down = RenderSettings {
            look_from: Vec3::new(0.0, 5.0, 0.0),
            look_at: Vec3::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            down.validate(),
            Err(SettingsError::Invalid { field: "vup", .. })
        ));

        let tilted = RenderSettings {
            vup: Vec3::NEG_Z,
            ..down.clone()
        };
        assert!(tilted.validate().is_ok());

        let zero_up = RenderSettings {
            vup: Vec3::ZERO,
            ..Default::default()
        };
        assert!(zero_up.validate().is_err());
    }

    #[test]
    fn test_focus_dist_must_be_positive() {
        for focus_dist in [0.0, -2.0, f32::NAN] {
            let settings = RenderSettings {
                focus_dist,
                ..Default::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(SettingsError::Invalid {
                    field: "focus_dist",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_worker_count() {
        let fixed = RenderSettings {
            threads: 3,
            ..Default::default()
        };
        assert_eq!(fixed.worker_count(), 3);
        assert!(RenderSettings::default().worker_count() >= 1);
    }
}

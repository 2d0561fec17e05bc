//! Shared configuration for wallpaint
//!
//! This crate provides the single source of truth for paint buffer
//! dimensions, brush scaling and the enable-toggle threshold used by both
//! the Bevy-free painting core and the Bevy integration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default paint buffer edge length in pixels
pub const DEFAULT_TEXTURE_SIZE: u32 = 1024;

/// Largest paint buffer edge length accepted by validation
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Default tile size for dirty tracking
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Edge length of the synthesized default brush stamp
pub const DEFAULT_STAMP_SIZE: u32 = 64;

/// Nominal upper bound of the external size control
pub const DEFAULT_SIZE_SCALE_DIVISOR: f32 = 10.0;

/// Toggle values at or above this count as "painting enabled"
pub const DEFAULT_TOGGLE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("texture size must be in 1..={max}, got {0}", max = MAX_TEXTURE_SIZE)]
    TextureSize(u32),
    #[error("tile size must be non-zero")]
    TileSize,
    #[error("stamp size must be non-zero")]
    StampSize,
    #[error("size scale divisor must be finite and positive, got {0}")]
    SizeScaleDivisor(f32),
    #[error("toggle threshold must be finite, got {0}")]
    ToggleThreshold(f32),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Paint engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct PaintConfig {
    /// Paint buffer width and height in pixels
    pub texture_size: u32,
    /// Tile edge length used for dirty tracking and partial uploads
    pub tile_size: u32,
    /// Edge length of the synthesized soft brush
    pub default_stamp_size: u32,
    /// Maps the size scale to a diameter: `scale * texture_size / divisor`
    pub size_scale_divisor: f32,
    /// Enable toggle threshold (slider values are 0.0 or 1.0)
    pub toggle_threshold: f32,
    /// Active color before any swatch is picked
    pub initial_color: [f32; 4],
    /// Active size scale before the size control is touched
    pub initial_brush_size: f32,
    /// Toggle value before the toggle is touched
    pub initial_toggle: f32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            texture_size: DEFAULT_TEXTURE_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            default_stamp_size: DEFAULT_STAMP_SIZE,
            size_scale_divisor: DEFAULT_SIZE_SCALE_DIVISOR,
            toggle_threshold: DEFAULT_TOGGLE_THRESHOLD,
            initial_color: [1.0, 1.0, 1.0, 1.0],
            initial_brush_size: 1.0,
            initial_toggle: 1.0,
        }
    }
}

impl PaintConfig {
    /// Create a config for a buffer of the given size, other fields default
    pub fn with_texture_size(texture_size: u32) -> Self {
        Self {
            texture_size,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.texture_size == 0 || self.texture_size > MAX_TEXTURE_SIZE {
            return Err(ConfigError::TextureSize(self.texture_size));
        }
        if self.tile_size == 0 {
            return Err(ConfigError::TileSize);
        }
        if self.default_stamp_size == 0 {
            return Err(ConfigError::StampSize);
        }
        if !self.size_scale_divisor.is_finite() || self.size_scale_divisor <= 0.0 {
            return Err(ConfigError::SizeScaleDivisor(self.size_scale_divisor));
        }
        if !self.toggle_threshold.is_finite() {
            return Err(ConfigError::ToggleThreshold(self.toggle_threshold));
        }
        Ok(())
    }

    /// Whether a toggle value counts as enabled
    #[inline]
    pub fn toggle_enabled(&self, value: f32) -> bool {
        value >= self.toggle_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaintConfig::default();
        assert_eq!(config.texture_size, DEFAULT_TEXTURE_SIZE);
        assert_eq!(config.default_stamp_size, 64);
        assert_eq!(config.size_scale_divisor, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = PaintConfig::from_json(r#"{ "texture_size": 512 }"#).unwrap();
        assert_eq!(config.texture_size, 512);
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.initial_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PaintConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PaintConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_texture_size() {
        let err = PaintConfig::from_json(r#"{ "texture_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TextureSize(0)));
    }

    #[test]
    fn test_rejects_bad_divisor() {
        let config = PaintConfig {
            size_scale_divisor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SizeScaleDivisor(_))
        ));
    }

    #[test]
    fn test_toggle_threshold() {
        let config = PaintConfig::default();
        assert!(!config.toggle_enabled(0.49));
        assert!(config.toggle_enabled(0.5));
        assert!(config.toggle_enabled(1.0));
        assert!(!config.toggle_enabled(0.0));
    }
}

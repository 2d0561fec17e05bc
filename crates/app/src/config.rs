//! Application configuration loaded from the environment

use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use painting::BrushStamp;
use wallpaint_config::PaintConfig;

/// Path of an optional JSON paint config
const CONFIG_ENV: &str = "WALLPAINT_CONFIG";
/// Path of an optional brush image offered next to the built-in brushes
const BRUSH_ENV: &str = "WALLPAINT_BRUSH";

/// Load the paint config from `WALLPAINT_CONFIG`, falling back to defaults
pub fn load_paint_config() -> PaintConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return PaintConfig::default();
    };

    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| PaintConfig::from_json(&json).map_err(|e| e.to_string()));

    match loaded {
        Ok(config) => {
            info!("Loaded paint config from {}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring paint config {}: {}", path, e);
            PaintConfig::default()
        }
    }
}

/// Brushes the brush hotkey cycles through
#[derive(Resource)]
pub struct BrushLibrary {
    pub stamps: Vec<Arc<BrushStamp>>,
}

impl BrushLibrary {
    /// Built-in soft and square brushes plus the optional `WALLPAINT_BRUSH` image
    pub fn from_env(config: &PaintConfig) -> Self {
        let mut stamps = vec![
            BrushStamp::default_shared(),
            Arc::new(BrushStamp::hard_square(config.default_stamp_size)),
        ];

        if let Some(path) = std::env::var_os(BRUSH_ENV).map(PathBuf::from) {
            match BrushStamp::load(&path) {
                Ok(stamp) => {
                    info!("Loaded brush '{}' from {}", stamp.name(), path.display());
                    stamps.push(Arc::new(stamp));
                }
                Err(e) => warn!("Ignoring brush image {}: {}", path.display(), e),
            }
        }

        Self { stamps }
    }
}

//! Wallpaint - paint onto 3D walls with mouse or touch

use bevy::prelude::*;
use bevy::window::WindowResolution;

mod config;
mod input;
mod scene;

use config::{BrushLibrary, load_paint_config};
use wallpaint_scene::WallPaintPlugin;

fn main() {
    let paint_config = load_paint_config();
    let brushes = BrushLibrary::from_env(&paint_config);

    let window_config = Window {
        title: "Wallpaint".into(),
        resolution: WindowResolution::new(1280, 720),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .insert_resource(paint_config)
        .insert_resource(brushes)
        .add_plugins(WallPaintPlugin)
        .add_plugins(scene::DemoScenePlugin)
        .add_plugins(input::InputPlugin)
        .run();
}

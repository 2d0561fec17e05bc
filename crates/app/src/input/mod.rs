//! Keyboard stand-ins for the color, brush and size controls

use bevy::prelude::*;

mod hotkeys;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                hotkeys::handle_color_hotkeys,
                hotkeys::handle_brush_hotkeys,
                hotkeys::handle_size_hotkeys,
                hotkeys::handle_toggle_hotkey,
                hotkeys::handle_clear_hotkey,
            ),
        );

        info!("Input plugin initialized");
    }
}

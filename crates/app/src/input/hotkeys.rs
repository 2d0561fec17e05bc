//! Hotkey handling for Wallpaint
//!
//! - 1-6: select a palette color
//! - B: cycle brushes
//! - [ / ]: shrink / grow the brush
//! - P: toggle painting
//! - C: clear every surface

use bevy::prelude::*;
use painting::Rgba8;
use wallpaint_config::PaintConfig;
use wallpaint_scene::{PaintSurfaceCommand, SharedPaintContext};

use crate::config::BrushLibrary;

/// Colors on the number keys
const PALETTE: [Rgba8; 6] = [
    Rgba8::RED,
    Rgba8::GREEN,
    Rgba8::BLUE,
    Rgba8([255, 255, 0, 255]),
    Rgba8::WHITE,
    Rgba8::BLACK,
];

const PALETTE_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Size scale change per key press
const BRUSH_SIZE_STEP: f32 = 0.25;

/// Upper end of the size control's range
const MAX_BRUSH_SIZE: f32 = 10.0;

pub fn handle_color_hotkeys(key_input: Res<ButtonInput<KeyCode>>, context: Res<SharedPaintContext>) {
    for (key, color) in PALETTE_KEYS.iter().zip(PALETTE) {
        if key_input.just_pressed(*key) {
            context.set_color(color);
            info!("Color set to {:?}", color.0);
        }
    }
}

pub fn handle_brush_hotkeys(
    key_input: Res<ButtonInput<KeyCode>>,
    context: Res<SharedPaintContext>,
    library: Res<BrushLibrary>,
    mut current: Local<usize>,
) {
    if !key_input.just_pressed(KeyCode::KeyB) || library.stamps.is_empty() {
        return;
    }
    *current = (*current + 1) % library.stamps.len();
    context.set_brush_stamp(library.stamps[*current].clone());
}

pub fn handle_size_hotkeys(key_input: Res<ButtonInput<KeyCode>>, context: Res<SharedPaintContext>) {
    let step = if key_input.just_pressed(KeyCode::BracketRight) {
        BRUSH_SIZE_STEP
    } else if key_input.just_pressed(KeyCode::BracketLeft) {
        -BRUSH_SIZE_STEP
    } else {
        return;
    };

    let size = (context.brush_size() + step).clamp(0.0, MAX_BRUSH_SIZE);
    context.set_brush_size(size);
    info!("Brush size {:.2}", size);
}

pub fn handle_toggle_hotkey(
    key_input: Res<ButtonInput<KeyCode>>,
    config: Res<PaintConfig>,
    context: Res<SharedPaintContext>,
) {
    if key_input.just_pressed(KeyCode::KeyP) {
        let enabled = !config.toggle_enabled(context.toggle_value());
        context.set_paint_enabled(enabled);
        info!("Painting {}", if enabled { "enabled" } else { "disabled" });
    }
}

pub fn handle_clear_hotkey(
    key_input: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<PaintSurfaceCommand>,
) {
    if key_input.just_pressed(KeyCode::KeyC) {
        commands.write(PaintSurfaceCommand::Clear(None));
    }
}

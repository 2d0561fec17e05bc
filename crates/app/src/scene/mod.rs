//! Demo scene: two paintable walls, a cube in front of them and a camera

use bevy::prelude::*;
use painting::EngineOptions;
use wallpaint_config::PaintConfig;
use wallpaint_scene::{PaintCamera, PaintOccluder, PaintableSurface, SharedPaintContext};

pub struct DemoScenePlugin;

impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PaintConfig>,
    context: Res<SharedPaintContext>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.5, 6.0).looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
        PaintCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(12.0, 12.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.3, 0.3),
            perceptual_roughness: 0.8,
            ..default()
        })),
    ));

    let walls = [
        ("back wall", Transform::from_xyz(0.0, 1.5, -1.0)),
        (
            "side wall",
            Transform::from_xyz(-3.0, 1.5, 1.0).with_rotation(Quat::from_rotation_y(
                std::f32::consts::FRAC_PI_2,
            )),
        ),
    ];

    let wall_mesh = meshes.add(Rectangle::new(3.0, 3.0));
    for (label, transform) in walls {
        let surface = match PaintableSurface::with_options(
            &config,
            &context,
            EngineOptions::labeled(label),
        ) {
            Ok(surface) => surface,
            Err(e) => {
                error!("Cannot create paint surface '{}': {}", label, e);
                continue;
            }
        };

        // Plaster behind the paint layer
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.85, 0.82, 0.78),
                perceptual_roughness: 0.9,
                ..default()
            })),
            transform * Transform::from_xyz(0.0, 0.0, -0.01),
        ));

        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            transform,
            surface,
            Name::new(label),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.8, 0.8, 0.8))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.2, 0.2),
            metallic: 0.5,
            perceptual_roughness: 0.3,
            ..default()
        })),
        Transform::from_xyz(0.8, 0.4, 0.5),
        PaintOccluder,
        Name::new("Cube"),
    ));

    info!("Scene initialized with paintable walls");
}

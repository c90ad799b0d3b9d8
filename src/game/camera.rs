use bevy::prelude::*;

pub struct FieldCameraPlugin;

impl Plugin for FieldCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

/// The single 2D camera looking at the playfield. One world unit is one
/// pixel at the default window size.
#[derive(Component)]
pub struct FieldCamera;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, FieldCamera));
}

/// Project a window cursor position onto the playfield.
pub fn cursor_world_position(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

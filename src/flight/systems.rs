use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseMotion;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::FlightConfig;
use super::entities::{DefaultPose, Viewpoint};
use crate::grid::GridFraming;
use crate::math;

/// Spawns the Camera3d entity at the grid's default framing pose and stores
/// that pose as [`DefaultPose`]. Runs in `PostStartup` so the grid batch and
/// its framing resource exist.
pub fn spawn_viewpoint(mut commands: Commands, framing: Res<GridFraming>, cfg: Res<FlightConfig>) {
    let pose = framing.framing;
    commands.spawn((
        Name::new("Viewpoint"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Projection::from(PerspectiveProjection {
            fov: cfg.fov_degrees.to_radians(),
            near: cfg.near,
            far: cfg.far,
            ..default()
        }),
        Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
        Viewpoint,
    ));
    commands.insert_resource(DefaultPose {
        position: pose.position,
        look_at: pose.look_at,
    });
}

/// Free-flight integration: WASD forward/strafe, R/F along the camera's up
/// axis, drag-to-look with the left mouse button.
pub fn fly(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    time: Res<Time>,
    cfg: Res<FlightConfig>,
    mut query: Query<&mut Transform, With<Viewpoint>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    // Drag-to-look: yaw + pitch only while the button is held.
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    if buttons.pressed(MouseButton::Left) {
        for ev in motion.read() {
            yaw -= ev.delta.x * cfg.mouse_sensitivity_x;
            pitch -= ev.delta.y * cfg.mouse_sensitivity_y;
        }
    } else {
        for _ in motion.read() {}
    }
    if yaw != 0.0 {
        transform.rotate_y(yaw);
    }
    if pitch != 0.0 {
        let (_, current_pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let pitch_delta = math::clamp_pitch(current_pitch, pitch, cfg.pitch_margin);
        transform.rotate_local_x(pitch_delta);
    }

    // Movement along the viewpoint's own axes.
    let forward: Vec3 = transform.forward().into();
    let right: Vec3 = transform.right().into();
    let up: Vec3 = transform.up().into();

    let mut direction = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction += right;
    }
    if keys.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keys.pressed(KeyCode::KeyR) {
        direction += up;
    }
    if keys.pressed(KeyCode::KeyF) {
        direction -= up;
    }

    if direction != Vec3::ZERO {
        let delta = direction.normalize() * cfg.move_speed * time.delta_secs();
        transform.translation += delta;
    }
}

/// Re-frames the viewpoint and refreshes [`DefaultPose`] after a grid
/// rebuild publishes new framing data.
pub fn sync_framing(
    framing: Res<GridFraming>,
    default_pose: Option<ResMut<DefaultPose>>,
    mut query: Query<&mut Transform, With<Viewpoint>>,
) {
    if !framing.is_changed() || framing.is_added() {
        return;
    }
    let Some(mut default_pose) = default_pose else {
        return;
    };

    let pose = framing.framing;
    default_pose.position = pose.position;
    default_pose.look_at = pose.look_at;

    if let Ok(mut transform) = query.single_mut() {
        super::reposition(&mut transform, pose.position, pose.look_at);
    }
}

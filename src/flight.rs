//! Free-flight viewpoint controller.
//!
//! WASD + R/F movement along the camera's own axes, drag-to-look while the
//! left mouse button is held. Spawns the Camera3d entity with bloom at the
//! grid's default framing pose and re-frames it when the grid is rebuilt.

mod entities;
mod systems;

pub use entities::{ControlsEnabled, DefaultPose, Viewpoint};
pub use systems::fly;

use bevy::prelude::*;

use crate::GameState;
use crate::torus;

/// Per-plugin configuration for the flight controller.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct FlightConfig {
    /// Movement speed in world-units per second.
    pub move_speed: f32,
    /// Horizontal mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_x: f32,
    /// Vertical mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_y: f32,
    /// Margin from vertical to prevent camera flip (radians).
    pub pitch_margin: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            mouse_sensitivity_x: 0.003,
            mouse_sensitivity_y: 0.002,
            pitch_margin: 0.05,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            bloom_intensity: 0.3,
        }
    }
}

/// Positions `transform` at `position`, facing `look_at`.
///
/// The single write path for computed viewpoint poses; hotkey commands and
/// grid re-framing both go through here.
pub fn reposition(transform: &mut Transform, position: Vec3, look_at: Vec3) {
    transform.translation = position;
    transform.look_at(look_at, Vec3::Y);
}

/// Whether free-movement controls currently accept input.
pub fn controls_enabled(enabled: Res<ControlsEnabled>) -> bool {
    enabled.0
}

/// Free-flight viewpoint plugin.
pub struct FlightPlugin(pub FlightConfig);

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Viewpoint>()
            .register_type::<FlightConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<ControlsEnabled>()
            .add_systems(PostStartup, systems::spawn_viewpoint)
            .add_systems(
                Update,
                systems::fly
                    .run_if(in_state(GameState::Running))
                    .run_if(controls_enabled)
                    .run_if(torus::loop_active),
            )
            .add_systems(Update, systems::sync_framing);
    }
}

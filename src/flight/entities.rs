use bevy::prelude::*;

/// Marker component for the movable viewpoint (the camera entity).
#[derive(Component, Reflect)]
pub struct Viewpoint;

/// Gate for free-movement input. The host flips this off before handing the
/// keyboard to a modal UI and back on when the UI closes, so movement keys
/// are never double-handled.
#[derive(Resource)]
pub struct ControlsEnabled(pub bool);

impl Default for ControlsEnabled {
    fn default() -> Self {
        Self(true)
    }
}

/// Stored default pose, captured from the grid framing. The reset command
/// copies this back onto the viewpoint.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DefaultPose {
    /// Default viewpoint position.
    pub position: Vec3,
    /// Point the default pose faces.
    pub look_at: Vec3,
}

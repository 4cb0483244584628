//! Toroidal boundary enforcement and the navigation loop lifecycle.
//!
//! Owns the frame-counted boundary check: every `check_interval` frames the
//! viewpoint position is tested against [`crate::math::is_inside`] and
//! wrapped back onto the torus when it has left the grid footprint. Within a
//! frame the order is fixed: flight integration, then the boundary check,
//! then the draw (Bevy renders after `Update`), so a wrap is never one frame
//! stale on screen.

use bevy::prelude::*;

use crate::GameState;
use crate::flight::{FlightConfig, Viewpoint};
use crate::grid::GridConfig;
use crate::math::{self, BoundaryConfig};

/// Per-plugin configuration for the boundary loop.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TorusConfig {
    /// Boundary check cadence in frames. Checks are amortized, not per-frame.
    pub check_interval: u32,
    /// Nominal frame time used to derive the exceeding margin.
    pub frame_time: f32,
    /// Fraction of the exceeding margin kept as make-up slack after a wrap,
    /// so a wrapped viewpoint never sits exactly on the opposite edge.
    pub epsilon: f32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            check_interval: 25,
            frame_time: 1.0 / 60.0,
            epsilon: 0.1,
        }
    }
}

/// Lifecycle state of the navigation loop.
///
/// `start` and `stop` are idempotent: misuse logs a warning and changes
/// nothing, so a double start can never produce two active loops.
#[derive(Resource, Default)]
pub struct LoopState {
    active: bool,
    frames: u32,
}

impl LoopState {
    /// Activates the loop. A no-op with a warning if already active.
    pub fn start(&mut self) {
        if self.active {
            warn!("Navigation loop is already running");
            return;
        }
        self.active = true;
        self.frames = 0;
    }

    /// Deactivates the loop before the next frame. A no-op with a warning if
    /// already inactive. A frame already in flight completes normally.
    pub fn stop(&mut self) {
        if !self.active {
            warn!("Navigation loop is not active");
            return;
        }
        self.active = false;
    }

    /// Whether the loop is currently running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advances the frame counter and reports whether a boundary check is
    /// due this frame. The counter resets on every due frame.
    fn check_due(&mut self, interval: u32) -> bool {
        self.frames += 1;
        if self.frames >= interval.max(1) {
            self.frames = 0;
            true
        } else {
            false
        }
    }
}

/// Run condition: the navigation loop is active.
pub fn loop_active(state: Res<LoopState>) -> bool {
    state.is_active()
}

/// Current boundary parameters, recomputed whenever speed, cadence, or grid
/// dimensions change.
#[derive(Resource, Debug)]
pub struct ActiveBounds(pub BoundaryConfig);

impl Default for ActiveBounds {
    fn default() -> Self {
        Self(BoundaryConfig {
            row_count: 1,
            column_count: 1,
            exceeding: 0.0,
        })
    }
}

/// Boundary loop plugin.
pub struct TorusPlugin(pub TorusConfig);

impl Plugin for TorusPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TorusConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<LoopState>()
            .init_resource::<ActiveBounds>()
            .add_systems(Startup, activate_loop)
            .add_systems(Update, (sync_bounds, toggle_loop))
            .add_systems(
                Update,
                check_bounds
                    .after(crate::flight::fly)
                    .run_if(in_state(GameState::Running))
                    .run_if(loop_active),
            );
    }
}

/// Starts the loop once the world is built.
fn activate_loop(mut state: ResMut<LoopState>) {
    state.start();
}

/// `P` pauses and resumes the navigation loop.
fn toggle_loop(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<LoopState>) {
    if keys.just_pressed(KeyCode::KeyP) {
        if state.is_active() {
            state.stop();
            info!("Navigation loop paused");
        } else {
            state.start();
            info!("Navigation loop resumed");
        }
    }
}

/// Recomputes [`ActiveBounds`] when movement speed, check cadence, or grid
/// dimensions change. The exceeding margin covers the distance flown at top
/// speed across one full check interval.
fn sync_bounds(
    flight: Res<FlightConfig>,
    grid: Res<GridConfig>,
    torus: Res<TorusConfig>,
    mut bounds: ResMut<ActiveBounds>,
) {
    if !(flight.is_changed() || grid.is_changed() || torus.is_changed()) {
        return;
    }
    let exceeding =
        math::exceeding_margin(flight.move_speed, torus.check_interval, torus.frame_time);
    bounds.0 = BoundaryConfig::new(grid.dimensions(), exceeding);
}

/// Periodic boundary check: every `check_interval` frames, wrap the
/// viewpoint back onto the torus if it has left the grid footprint.
fn check_bounds(
    mut state: ResMut<LoopState>,
    cfg: Res<TorusConfig>,
    bounds: Res<ActiveBounds>,
    mut query: Query<&mut Transform, With<Viewpoint>>,
) {
    if !state.check_due(cfg.check_interval) {
        return;
    }
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    if !math::is_inside(transform.translation, &bounds.0) {
        let wrapped = math::wrap(transform.translation, &bounds.0, cfg.epsilon);
        debug!(
            "Viewpoint wrapped: {:?} -> {:?}",
            transform.translation, wrapped
        );
        transform.translation = wrapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_twice_keeps_one_active_loop() {
        let mut state = LoopState::default();
        state.start();
        state.start();
        assert!(state.is_active());
        state.stop();
        assert!(!state.is_active());
    }

    #[test]
    fn stop_when_inactive_is_a_no_op() {
        let mut state = LoopState::default();
        state.stop();
        assert!(!state.is_active());
    }

    #[test]
    fn restart_resets_frame_counter() {
        let mut state = LoopState::default();
        state.start();
        assert!(!state.check_due(3));
        state.stop();
        state.start();
        // Counter restarted: still two frames away from the next check.
        assert!(!state.check_due(3));
        assert!(!state.check_due(3));
        assert!(state.check_due(3));
    }

    #[test]
    fn check_due_fires_every_interval() {
        let mut state = LoopState::default();
        state.start();
        let pattern: Vec<bool> = (0..6).map(|_| state.check_due(3)).collect();
        assert_eq!(pattern, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn check_due_tolerates_interval_of_one() {
        let mut state = LoopState::default();
        state.start();
        assert!(state.check_due(1));
        assert!(state.check_due(1));
    }
}

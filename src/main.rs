#![warn(missing_docs)]
//! Toroidal hex grid flyer.
//!
//! Renders a periodic hexagonal grid and flies a free viewpoint through it.
//! Leaving one edge of the grid re-enters at the opposite edge, so the world
//! appears boundless; modal hotkeys jump the viewpoint to exact cells or
//! depths.

pub mod flight;
pub mod grid;
pub mod hotkeys;
pub mod math;
pub mod tips;
pub mod torus;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal operation: free flight + hotkey commands.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}

fn main() {
    let (grid_cfg, flight_cfg, torus_cfg) = configs();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Torus".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(grid::GridPlugin(grid_cfg))
    .add_plugins(flight::FlightPlugin(flight_cfg))
    .add_plugins(torus::TorusPlugin(torus_cfg))
    .add_plugins(hotkeys::HotkeysPlugin)
    .add_plugins(tips::TipsPlugin)
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    app.run();
}

/// Initial plugin configurations, with command-line overrides on native.
#[cfg(feature = "native")]
fn configs() -> (grid::GridConfig, flight::FlightConfig, torus::TorusConfig) {
    use clap::Parser;

    #[derive(Parser)]
    #[command(about = "Fly through a toroidal hexagonal grid")]
    struct Args {
        /// Number of grid rows.
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
        rows: u32,
        /// Number of grid columns.
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
        cols: u32,
        /// Free-movement speed in world-units per second.
        #[arg(long, default_value_t = 10.0)]
        speed: f32,
        /// Boundary check cadence in frames.
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
        check_interval: u32,
    }

    let args = Args::parse();
    (
        grid::GridConfig {
            row_count: args.rows,
            column_count: args.cols,
            ..default()
        },
        flight::FlightConfig {
            move_speed: args.speed,
            ..default()
        },
        torus::TorusConfig {
            check_interval: args.check_interval,
            ..default()
        },
    )
}

#[cfg(not(feature = "native"))]
fn configs() -> (grid::GridConfig, flight::FlightConfig, torus::TorusConfig) {
    (default(), default(), default())
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

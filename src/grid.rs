//! Hex grid world: instance layout, framing data, and rebuild handling.
//!
//! Spawns one flat hexagon cell per `(row, col)` index at its
//! [`crate::math::hex_center`] position and publishes the framing data the
//! viewpoint needs for its default pose. A grid is immutable once built;
//! dimension changes arrive as [`RebuildGrid`] requests and produce a fresh
//! batch.

mod entities;
mod systems;

pub use entities::{GridFraming, HexCell, HexGrid, RebuildGrid};

use bevy::prelude::*;

use crate::math::GridDimensions;

/// Per-plugin configuration for grid construction.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GridConfig {
    /// Number of rows in the grid.
    pub row_count: u32,
    /// Number of columns in the grid.
    pub column_count: u32,
    /// Visual radius of each hexagon cell (`√3/3` tiles edge-to-edge).
    pub hex_radius: f32,
    /// Default fill color shared by uncolored cells.
    pub fill_color: Color,
    /// Emissive edge color for the neon look.
    pub edge_color: Color,
    /// Emissive intensity multiplier.
    pub emissive_intensity: f32,
    /// When set, a noise field varies the fill color per cell.
    pub color_seed: Option<u32>,
    /// Octave count for the color noise field.
    pub color_noise_octaves: usize,
    /// Spatial scale divisor for color noise sampling.
    pub color_noise_scale: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_count: 16,
            column_count: 16,
            hex_radius: crate::math::SQRT_3 / 3.0,
            fill_color: Color::srgb_u8(22, 0, 95),
            edge_color: Color::srgb_u8(253, 48, 229),
            emissive_intensity: 1.0,
            color_seed: Some(42),
            color_noise_octaves: 3,
            color_noise_scale: 8.0,
        }
    }
}

impl GridConfig {
    /// Validated dimensions of the configured grid.
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            row_count: self.row_count.max(1),
            column_count: self.column_count.max(1),
        }
    }
}

/// Grid plugin: batch construction at startup, rebuild on request.
pub struct GridPlugin(pub GridConfig);

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GridConfig>()
            .register_type::<HexCell>()
            .insert_resource(self.0.clone())
            .add_message::<RebuildGrid>()
            .add_systems(Startup, systems::spawn_grid)
            .add_systems(Update, systems::rebuild_grid);
    }
}

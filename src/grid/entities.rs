use bevy::prelude::*;

use crate::math::{Framing, GridDimensions};

/// Root component of the spawned grid batch. Parents every [`HexCell`];
/// despawning it tears down the whole batch.
#[derive(Component)]
pub struct HexGrid {
    /// Dimensions this batch was built with.
    pub dimensions: GridDimensions,
}

/// One rendered hexagon cell. Row-major: `index = row · column_count + col`.
#[derive(Component, Reflect)]
pub struct HexCell {
    /// Grid row of this cell.
    pub row: u32,
    /// Grid column of this cell.
    pub col: u32,
}

/// Framing data published by grid construction for initial camera placement.
#[derive(Resource, Clone, Copy, Debug)]
pub struct GridFraming {
    /// World center of instance 0 (`row 0, col 0`).
    pub first_center: Vec2,
    /// World center of the last instance.
    pub last_center: Vec2,
    /// Derived default viewpoint pose.
    pub framing: Framing,
}

/// Request to tear down the current grid and build a new one with the given
/// dimensions. Dimensions are validated at construction; there is no way to
/// resize a live batch in place.
#[derive(Message)]
pub struct RebuildGrid {
    /// Dimensions of the replacement grid.
    pub dimensions: GridDimensions,
}

use bevy::color::Mix;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::GridConfig;
use super::entities::{GridFraming, HexCell, HexGrid, RebuildGrid};
use crate::math;

/// How many distinct fill materials the color noise quantizes into.
const COLOR_BANDS: u8 = 8;

/// Spawns the initial [`HexGrid`] batch and publishes [`GridFraming`].
pub fn spawn_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GridConfig>,
) {
    let framing = build_batch(&mut commands, &mut meshes, &mut materials, &cfg);
    commands.insert_resource(framing);
}

/// Tears down the current batch and builds a replacement when a
/// [`RebuildGrid`] request arrives. Only the last request of a frame wins.
pub fn rebuild_grid(
    mut commands: Commands,
    mut requests: MessageReader<RebuildGrid>,
    grid_q: Query<Entity, With<HexGrid>>,
    mut cfg: ResMut<GridConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    for entity in &grid_q {
        commands.entity(entity).despawn();
    }

    cfg.row_count = request.dimensions.row_count;
    cfg.column_count = request.dimensions.column_count;
    info!(
        "Rebuilding grid: {} rows x {} cols",
        cfg.row_count, cfg.column_count
    );

    let framing = build_batch(&mut commands, &mut meshes, &mut materials, &cfg);
    commands.insert_resource(framing);
}

/// Builds one grid batch: a shared hexagon mesh, per-band materials, and one
/// child cell per `(row, col)` in row-major order. Returns the framing data
/// derived from the first and last instance centers.
fn build_batch(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cfg: &GridConfig,
) -> GridFraming {
    let dims = cfg.dimensions();
    let mesh = meshes.add(RegularPolygon::new(cfg.hex_radius, 6));

    let default_material = materials.add(cell_material(cfg, cfg.fill_color));

    // Optional per-cell coloring: a noise field picks a quantized band per
    // cell; one material per band keeps the handle count small.
    let color_fbm = cfg
        .color_seed
        .map(|seed| Fbm::<Perlin>::new(seed).set_octaves(cfg.color_noise_octaves));
    let mut band_materials: HashMap<u8, Handle<StandardMaterial>> = HashMap::new();

    let batch = commands
        .spawn((
            Name::new("HexGrid"),
            HexGrid { dimensions: dims },
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for row in 0..dims.row_count {
        for col in 0..dims.column_count {
            let center = math::hex_center(row as f32, col as f32);

            let material = match &color_fbm {
                None => default_material.clone(),
                Some(fbm) => {
                    let band = color_band(fbm, center, cfg.color_noise_scale);
                    band_materials
                        .entry(band)
                        .or_insert_with(|| {
                            let t = band as f32 / (COLOR_BANDS - 1) as f32;
                            let fill = cfg.fill_color.mix(&cfg.edge_color, t * 0.6);
                            materials.add(cell_material(cfg, fill))
                        })
                        .clone()
                }
            };

            let cell = commands
                .spawn((
                    Name::new(format!("Hex {row},{col}")),
                    HexCell { row, col },
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(center.x, center.y, 0.0),
                ))
                .id();
            commands.entity(batch).add_child(cell);
        }
    }

    let first_center = math::hex_center(0.0, 0.0);
    let last_center = math::hex_center(
        (dims.row_count - 1) as f32,
        (dims.column_count - 1) as f32,
    );
    GridFraming {
        first_center,
        last_center,
        framing: math::default_framing(first_center, last_center, dims),
    }
}

fn cell_material(cfg: &GridConfig, fill: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: fill,
        emissive: cfg.edge_color.to_linear() * cfg.emissive_intensity,
        ..default()
    }
}

/// Quantizes the noise value at `center / scale` into `0..COLOR_BANDS`.
fn color_band(fbm: &Fbm<Perlin>, center: Vec2, scale: f64) -> u8 {
    let n = fbm.get([center.x as f64 / scale, center.y as f64 / scale]);
    // Noise is centred on zero in [-1, 1]; rescale to [0, 1] before banding.
    let t = ((n as f32 + 1.0) / 2.0).clamp(0.0, 1.0);
    ((t * COLOR_BANDS as f32) as u8).min(COLOR_BANDS - 1)
}

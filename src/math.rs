//! Pure navigation math extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs. This is the canonical home of
//! the hex basis transform and the toroidal boundary arithmetic; every other
//! module that needs a cell's world position calls [`hex_center`] rather than
//! recomputing basis math, so grid construction, boundary checks, and camera
//! jumps can never disagree.

use bevy::prelude::{Vec2, Vec3};

/// `√3`, the recurring constant of the skewed hex frame.
pub const SQRT_3: f32 = 1.732_050_8;

/// Basis vector mapping one column step to world space.
pub const X_BASIS: Vec2 = Vec2::new(SQRT_3 * 0.5, 0.5);

/// Basis vector mapping one row step to world space.
pub const Y_BASIS: Vec2 = Vec2::new(0.0, 1.0);

/// World-space center of the hex cell at `(row, col)`.
///
/// Linear in both arguments; `hex_center(0.0, 0.0) == Vec2::ZERO`.
/// Takes floats because camera-jump commands parse free-form numeric input;
/// fractional coordinates land between cell centers.
///
/// # Examples
/// ```
/// # use hex_torus::math::{hex_center, SQRT_3};
/// let c = hex_center(0.0, 1.0);
/// assert!((c.x - SQRT_3 / 2.0).abs() < 1e-6);
/// assert!((c.y - 0.5).abs() < 1e-6);
/// ```
pub fn hex_center(row: f32, col: f32) -> Vec2 {
    Vec2::new(
        col * X_BASIS.x + row * Y_BASIS.x,
        col * X_BASIS.y + row * Y_BASIS.y,
    )
}

/// Validated grid extent. Both counts are at least 1; a world is rebuilt,
/// never resized in place, when these change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of rows.
    pub row_count: u32,
    /// Number of columns.
    pub column_count: u32,
}

impl GridDimensions {
    /// Builds dimensions, rejecting a zero count on either axis.
    pub fn new(row_count: u32, column_count: u32) -> Option<Self> {
        if row_count == 0 || column_count == 0 {
            return None;
        }
        Some(Self {
            row_count,
            column_count,
        })
    }

    /// Total cell count, also the instance count of the grid batch.
    pub fn cell_count(&self) -> u32 {
        self.row_count * self.column_count
    }
}

/// Boundary test parameters: grid extent plus the minimum permitted depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConfig {
    /// Number of rows (y period of the torus).
    pub row_count: u32,
    /// Number of columns (x period of the torus, scaled by `√3/2`).
    pub column_count: u32,
    /// Minimum permitted distance along the depth axis. Always `>= 0`.
    pub exceeding: f32,
}

impl BoundaryConfig {
    /// Combines grid dimensions with a computed exceeding margin.
    pub fn new(dimensions: GridDimensions, exceeding: f32) -> Self {
        Self {
            row_count: dimensions.row_count,
            column_count: dimensions.column_count,
            exceeding: exceeding.max(0.0),
        }
    }
}

/// Minimum safe depth margin: the distance covered at `speed` over one full
/// check interval. A viewpoint at top speed cannot tunnel past the depth
/// floor between two periodic boundary checks.
pub fn exceeding_margin(speed: f32, check_interval: u32, frame_time: f32) -> f32 {
    (speed * check_interval as f32 * frame_time).max(0.0)
}

/// Whether `pos` is inside the grid footprint (closed region, inclusive
/// edges) and above the depth floor.
///
/// The footprint is the parallelogram spanned by the hex basis:
/// `0 <= x <= (√3/2)·cols`, `x/√3 <= y <= rows + x/√3`, plus `z >= exceeding`.
pub fn is_inside(pos: Vec3, cfg: &BoundaryConfig) -> bool {
    let cols = cfg.column_count as f32;
    let rows = cfg.row_count as f32;
    pos.x >= 0.0
        && pos.x <= SQRT_3 / 2.0 * cols
        && pos.y >= pos.x / SQRT_3
        && pos.y <= rows + pos.x / SQRT_3
        && pos.z >= cfg.exceeding
}

/// Toroidal wrap of an out-of-bounds position.
///
/// Each planar axis shifts by its full period, minus a small
/// `epsilon·exceeding` make-up so the result does not sit exactly on the
/// opposite edge and oscillate in and out of bounds on every check. An x wrap
/// also shifts y by the matching skew amount (`cols/2`), because the x basis
/// vector carries a y component. The y test uses the post-wrap x, so a
/// corner exit resolves in one call. Depth is clamped up to the floor, not
/// wrapped: only the planar grid is periodic.
pub fn wrap(pos: Vec3, cfg: &BoundaryConfig, epsilon: f32) -> Vec3 {
    let cols = cfg.column_count as f32;
    let rows = cfg.row_count as f32;
    let make_up = cfg.exceeding * epsilon;
    let mut p = pos;

    if p.z < cfg.exceeding {
        p.z = cfg.exceeding;
    }

    if p.x > SQRT_3 / 2.0 * cols {
        p.x -= SQRT_3 / 2.0 * cols - make_up;
        p.y -= 0.5 * cols - make_up;
    } else if p.x < 0.0 {
        p.x += SQRT_3 / 2.0 * cols - make_up;
        p.y += 0.5 * cols - make_up;
    }

    if p.y > rows + p.x / SQRT_3 {
        p.y -= rows - make_up;
    } else if p.y < p.x / SQRT_3 {
        p.y += rows - make_up;
    }

    p
}

/// Default viewpoint pose for framing a freshly built grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Viewpoint position: planar midpoint of the grid at a depth scaled to
    /// its extent (capped at 25).
    pub position: Vec3,
    /// Point the viewpoint faces: the same midpoint at depth 0.
    pub look_at: Vec3,
}

/// Computes the default framing from the centers of the first and last grid
/// instance.
pub fn default_framing(first: Vec2, last: Vec2, dimensions: GridDimensions) -> Framing {
    let mid = (first + last) / 2.0;
    let depth = (dimensions.row_count.max(dimensions.column_count) as f32).min(25.0);
    Framing {
        position: Vec3::new(mid.x, mid.y, depth),
        look_at: Vec3::new(mid.x, mid.y, 0.0),
    }
}

/// Clamps a pitch delta so the viewpoint cannot flip past vertical.
///
/// `current` is the existing pitch in radians (from `Quat::to_euler`),
/// `delta` the desired change. Returns the *effective* delta after clamping
/// the target to `(-PI/2 + margin, PI/2 - margin)`.
pub fn clamp_pitch(current: f32, delta: f32, margin: f32) -> f32 {
    let limit = std::f32::consts::FRAC_PI_2 - margin;
    let clamped = (current + delta).clamp(-limit, limit);
    clamped - current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(rows: u32, cols: u32, exceeding: f32) -> BoundaryConfig {
        BoundaryConfig {
            row_count: rows,
            column_count: cols,
            exceeding,
        }
    }

    // ── hex_center ──────────────────────────────────────────────────

    #[test]
    fn center_of_origin_is_zero() {
        assert_eq!(hex_center(0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn center_matches_basis_vectors() {
        assert!((hex_center(0.0, 1.0) - X_BASIS).length() < 1e-6);
        assert!((hex_center(1.0, 0.0) - Y_BASIS).length() < 1e-6);
    }

    #[test]
    fn center_is_linear_in_both_arguments() {
        for row in 0..6 {
            for col in 0..6 {
                let direct = hex_center(row as f32, col as f32);
                let summed = X_BASIS * col as f32 + Y_BASIS * row as f32;
                assert!(
                    (direct - summed).length() < 1e-5,
                    "nonlinear at ({row}, {col})"
                );
            }
        }
    }

    // ── grid dimensions ─────────────────────────────────────────────

    #[test]
    fn dimensions_reject_zero_counts() {
        assert!(GridDimensions::new(0, 5).is_none());
        assert!(GridDimensions::new(5, 0).is_none());
        let dims = GridDimensions::new(4, 7).unwrap();
        assert_eq!(dims.cell_count(), 28);
    }

    // ── exceeding margin ────────────────────────────────────────────

    #[test]
    fn margin_is_speed_times_interval_times_frame() {
        let m = exceeding_margin(10.0, 25, 1.0 / 60.0);
        assert!((m - 10.0 * 25.0 / 60.0).abs() < 1e-5);
    }

    #[test]
    fn margin_never_negative() {
        assert_eq!(exceeding_margin(-3.0, 25, 1.0 / 60.0), 0.0);
    }

    // ── is_inside ───────────────────────────────────────────────────

    #[test]
    fn inside_at_grid_middle() {
        let c = cfg(5, 5, 0.5);
        assert!(is_inside(Vec3::new(2.0, 3.0, 5.0), &c));
    }

    #[test]
    fn boundary_is_inclusive() {
        let c = cfg(5, 5, 0.5);
        let right = SQRT_3 / 2.0 * 5.0;
        // Exactly on each edge still counts as inside.
        assert!(is_inside(Vec3::new(0.0, 0.0, 0.5), &c));
        assert!(is_inside(Vec3::new(right, right / SQRT_3, 0.5), &c));
        assert!(is_inside(Vec3::new(0.0, 5.0, 0.5), &c));
    }

    #[test]
    fn outside_left_of_grid() {
        let c = cfg(5, 5, 0.5);
        assert!(!is_inside(Vec3::new(-0.2, 2.0, 5.0), &c));
    }

    #[test]
    fn outside_below_skewed_floor() {
        let c = cfg(5, 5, 0.5);
        // y must stay above x/√3.
        assert!(!is_inside(Vec3::new(3.0, 1.0, 5.0), &c));
    }

    #[test]
    fn outside_below_depth_floor() {
        let c = cfg(5, 5, 0.5);
        assert!(!is_inside(Vec3::new(2.0, 3.0, 0.2), &c));
    }

    // ── wrap ────────────────────────────────────────────────────────

    #[test]
    fn wrap_relocates_left_exit_to_right_edge() {
        // End-to-end scenario: 5×5 grid, viewpoint just past the left edge.
        // One wrap restores it near the right edge with the matching skew
        // shift on y and an untouched depth.
        let c = cfg(5, 5, 0.5);
        let wrapped = wrap(Vec3::new(-0.2, 2.0, 5.0), &c, 0.1);
        let make_up = 0.5 * 0.1;
        assert!((wrapped.x - (-0.2 + SQRT_3 / 2.0 * 5.0 - make_up)).abs() < 1e-5);
        assert!((wrapped.y - (2.0 + 2.5 - make_up)).abs() < 1e-5);
        assert_eq!(wrapped.z, 5.0);
    }

    #[test]
    fn wrap_restores_inside_for_mild_exits() {
        let c = cfg(8, 6, 0.5);
        let right = SQRT_3 / 2.0 * 6.0;
        let exits = [
            Vec3::new(-0.3, 4.0, 2.0),
            Vec3::new(right + 0.3, 6.0, 2.0),
            Vec3::new(2.0, -0.5, 2.0),
            Vec3::new(2.0, 10.0, 2.0),
            Vec3::new(2.0, 4.0, 0.1),
        ];
        for pos in exits {
            let wrapped = wrap(pos, &c, 0.1);
            assert!(
                is_inside(wrapped, &c),
                "wrap of {pos:?} left {wrapped:?} outside"
            );
        }
    }

    #[test]
    fn wrap_is_identity_for_inside_positions_without_make_up() {
        // With epsilon 0 an inside position passes through untouched.
        let c = cfg(5, 5, 0.5);
        let pos = Vec3::new(2.0, 3.0, 5.0);
        assert_eq!(wrap(pos, &c, 0.0), pos);
    }

    #[test]
    fn toroidal_continuity_right_then_left() {
        // Fly out the right edge, wrap, fly the same distance back out the
        // left edge, wrap again: the viewpoint is exactly where it started.
        // The two make-up corrections cancel, confirming the topology is
        // periodic with period (√3/2)·cols on x and the skew amount on y.
        let c = cfg(5, 5, 0.5);
        let start = Vec3::new(4.2, 3.8, 3.0);

        let out_right = start + Vec3::new(0.3, 0.0, 0.0);
        assert!(!is_inside(out_right, &c));
        let wrapped = wrap(out_right, &c, 0.1);
        assert!(is_inside(wrapped, &c));

        let out_left = wrapped - Vec3::new(0.3, 0.0, 0.0);
        assert!(!is_inside(out_left, &c));
        let back = wrap(out_left, &c, 0.1);

        assert!(
            (back - start).length() < 1e-5,
            "expected {start:?}, got {back:?}"
        );
    }

    #[test]
    fn wrap_clamps_depth_instead_of_wrapping() {
        let c = cfg(5, 5, 0.5);
        let wrapped = wrap(Vec3::new(2.0, 3.0, -4.0), &c, 0.1);
        assert_eq!(wrapped.z, 0.5);
        assert_eq!(wrapped.x, 2.0);
        assert_eq!(wrapped.y, 3.0);
    }

    // ── default framing ─────────────────────────────────────────────

    #[test]
    fn framing_centers_between_first_and_last() {
        let dims = GridDimensions::new(5, 5).unwrap();
        let first = hex_center(0.0, 0.0);
        let last = hex_center(4.0, 4.0);
        let f = default_framing(first, last, dims);
        assert!((f.position.x - (first.x + last.x) / 2.0).abs() < 1e-6);
        assert!((f.position.y - (first.y + last.y) / 2.0).abs() < 1e-6);
        assert_eq!(f.position.z, 5.0);
        assert_eq!(f.look_at.z, 0.0);
    }

    #[test]
    fn framing_depth_caps_at_25() {
        let dims = GridDimensions::new(40, 60).unwrap();
        let f = default_framing(Vec2::ZERO, hex_center(39.0, 59.0), dims);
        assert_eq!(f.position.z, 25.0);
    }

    // ── clamp_pitch ─────────────────────────────────────────────────

    #[test]
    fn small_pitch_delta_passes_through() {
        let delta = clamp_pitch(0.0, 0.1, 0.05);
        assert!((delta - 0.1).abs() < 1e-6);
    }

    #[test]
    fn pitch_clamps_at_vertical_limit() {
        let limit = std::f32::consts::FRAC_PI_2 - 0.05;
        let delta = clamp_pitch(limit - 0.01, 0.1, 0.05);
        assert!((delta - 0.01).abs() < 1e-4);
    }
}

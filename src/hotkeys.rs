//! Modal hotkey command machine for precise camera jumps.
//!
//! `z` then digits then Enter sets the viewpoint depth; `g` then
//! `column,row` (half- or full-width comma) then Enter jumps to a hex cell
//! center; `Alt+G` resets to the default pose and `Alt+R` spins the
//! viewpoint around, both immediately. The transition function and the
//! commit parsers are pure so the whole machine is unit-testable without a
//! running app.

mod systems;

pub use systems::capture_hotkeys;

use bevy::input::keyboard::Key;
use bevy::prelude::*;

use crate::GameState;
use crate::math;

/// Depth the viewpoint is placed at after a coordinate jump.
pub const JUMP_DEPTH: f32 = 10.0;

/// Gate for the whole hotkey machine. The host flips this off while a modal
/// UI owns the keyboard.
#[derive(Resource)]
pub struct HotkeysActive(pub bool);

impl Default for HotkeysActive {
    fn default() -> Self {
        Self(true)
    }
}

/// Capture state of the command machine. Buffers live only for one input
/// episode: any commit, valid or not, returns to `Idle` with the buffer
/// discarded.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// No sequence in progress.
    #[default]
    Idle,
    /// Accumulating digits for a depth jump.
    CapturingZ(String),
    /// Accumulating digits and a separator for a coordinate jump.
    CapturingCoord(String),
}

/// A committed or immediate command produced by [`apply_key`].
#[derive(Debug, PartialEq, Eq)]
pub enum CommandAction {
    /// Enter pressed in `CapturingZ`; payload is the raw buffer.
    CommitDepth(String),
    /// Enter pressed in `CapturingCoord`; payload is the raw buffer.
    CommitCoordinate(String),
    /// `Alt+G`: return to the stored default pose.
    Reset,
    /// `Alt+R`: rotate the viewpoint by half a turn about the vertical axis.
    Reverse,
}

/// Advances the machine by one keystroke.
///
/// Prefix keys arm a capture buffer, digits (and commas, in coordinate mode)
/// append, Enter commits and always returns to `Idle`. Keys that fit neither
/// the current state nor a command are ignored in place.
pub fn apply_key(state: &mut CaptureState, key: &Key, alt: bool) -> Option<CommandAction> {
    if let Key::Enter = key {
        return match std::mem::take(state) {
            CaptureState::Idle => None,
            CaptureState::CapturingZ(buffer) => Some(CommandAction::CommitDepth(buffer)),
            CaptureState::CapturingCoord(buffer) => Some(CommandAction::CommitCoordinate(buffer)),
        };
    }

    let Key::Character(text) = key else {
        return None;
    };
    let Some(ch) = text.chars().next() else {
        return None;
    };

    match state {
        CaptureState::Idle if alt => match ch.to_ascii_lowercase() {
            'g' => Some(CommandAction::Reset),
            'r' => Some(CommandAction::Reverse),
            _ => None,
        },
        CaptureState::Idle => {
            match ch.to_ascii_lowercase() {
                'z' => *state = CaptureState::CapturingZ(String::new()),
                'g' => *state = CaptureState::CapturingCoord(String::new()),
                _ => {}
            }
            None
        }
        CaptureState::CapturingZ(buffer) => {
            if ch.is_ascii_digit() {
                buffer.push(ch);
            }
            None
        }
        CaptureState::CapturingCoord(buffer) => {
            if ch.is_ascii_digit() || ch == ',' || ch == '，' {
                buffer.push(ch);
            }
            None
        }
    }
}

/// Computed target of a coordinate jump.
#[derive(Debug, PartialEq)]
pub struct Reposition {
    /// New viewpoint position.
    pub position: Vec3,
    /// Point the viewpoint faces after the jump.
    pub look_at: Vec3,
}

/// Parses a depth buffer. Valid non-negative values yield the new depth and
/// a user-facing confirmation; anything else yields an error message.
pub fn commit_depth(buffer: &str) -> Result<(f32, String), String> {
    match buffer.parse::<f32>() {
        Ok(z) if z >= 0.0 => Ok((z, format!("Camera Z updated: {z}"))),
        _ => Err(format!("Invalid Z depth input: '{buffer}'")),
    }
}

/// Parses a coordinate buffer of the form `column,row` (full-width comma
/// accepted) and computes the jump target: the hex cell center at
/// [`JUMP_DEPTH`], facing the same center at depth 0.
pub fn commit_coordinate(buffer: &str) -> Result<(Reposition, String), String> {
    let normalized = buffer.replace('，', ",");
    let invalid = || format!("Invalid coordinate input, expected 'column,row': '{buffer}'");

    let Some((col_str, row_str)) = normalized.split_once(',') else {
        return Err(invalid());
    };
    let (Ok(col), Ok(row)) = (col_str.parse::<f32>(), row_str.parse::<f32>()) else {
        return Err(invalid());
    };

    let center = math::hex_center(row, col);
    Ok((
        Reposition {
            position: Vec3::new(center.x, center.y, JUMP_DEPTH),
            look_at: Vec3::new(center.x, center.y, 0.0),
        },
        format!("Camera moved to: [{:.3}, {:.3}]", center.x, center.y),
    ))
}

/// Hotkey command machine plugin.
pub struct HotkeysPlugin;

impl Plugin for HotkeysPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HotkeysActive>()
            .init_resource::<CaptureState>()
            .add_systems(
                Update,
                systems::capture_hotkeys.run_if(in_state(GameState::Running)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr(s: &str) -> Key {
        Key::Character(s.into())
    }

    fn feed(state: &mut CaptureState, keys: &[&str]) -> Option<CommandAction> {
        let mut last = None;
        for k in keys {
            last = apply_key(state, &chr(k), false);
        }
        last
    }

    // ── transitions ─────────────────────────────────────────────────

    #[test]
    fn z_prefix_arms_depth_capture() {
        let mut state = CaptureState::default();
        assert_eq!(apply_key(&mut state, &chr("z"), false), None);
        assert_eq!(state, CaptureState::CapturingZ(String::new()));
    }

    #[test]
    fn digits_accumulate_in_depth_buffer() {
        let mut state = CaptureState::default();
        feed(&mut state, &["z", "1", "2"]);
        assert_eq!(state, CaptureState::CapturingZ("12".into()));
    }

    #[test]
    fn non_digits_are_ignored_while_capturing() {
        let mut state = CaptureState::default();
        feed(&mut state, &["z", "1", "x", ",", "2"]);
        assert_eq!(state, CaptureState::CapturingZ("12".into()));
    }

    #[test]
    fn enter_commits_depth_and_returns_to_idle() {
        let mut state = CaptureState::default();
        feed(&mut state, &["z", "4", "2"]);
        let action = apply_key(&mut state, &Key::Enter, false);
        assert_eq!(action, Some(CommandAction::CommitDepth("42".into())));
        assert_eq!(state, CaptureState::Idle);
    }

    #[test]
    fn coordinate_capture_accepts_digits_and_commas() {
        let mut state = CaptureState::default();
        feed(&mut state, &["g", "1", "2", ",", "7"]);
        let action = apply_key(&mut state, &Key::Enter, false);
        assert_eq!(action, Some(CommandAction::CommitCoordinate("12,7".into())));
        assert_eq!(state, CaptureState::Idle);
    }

    #[test]
    fn full_width_comma_is_captured() {
        let mut state = CaptureState::default();
        feed(&mut state, &["g", "3", "，", "4"]);
        assert_eq!(state, CaptureState::CapturingCoord("3，4".into()));
    }

    #[test]
    fn enter_in_idle_does_nothing() {
        let mut state = CaptureState::default();
        assert_eq!(apply_key(&mut state, &Key::Enter, false), None);
        assert_eq!(state, CaptureState::Idle);
    }

    #[test]
    fn alt_commands_fire_only_from_idle() {
        let mut state = CaptureState::default();
        assert_eq!(
            apply_key(&mut state, &chr("g"), true),
            Some(CommandAction::Reset)
        );
        assert_eq!(
            apply_key(&mut state, &chr("r"), true),
            Some(CommandAction::Reverse)
        );
        assert_eq!(state, CaptureState::Idle);

        // Mid-capture, alt chords neither fire nor corrupt the buffer.
        feed(&mut state, &["z", "5"]);
        assert_eq!(apply_key(&mut state, &chr("g"), true), None);
        assert_eq!(state, CaptureState::CapturingZ("5".into()));
    }

    // ── depth commit ────────────────────────────────────────────────

    #[test]
    fn valid_depth_commits() {
        let (z, msg) = commit_depth("42").unwrap();
        assert_eq!(z, 42.0);
        assert!(msg.contains("42"));
    }

    #[test]
    fn malformed_depth_is_rejected() {
        assert!(commit_depth("abc").is_err());
        assert!(commit_depth("").is_err());
    }

    #[test]
    fn negative_depth_is_rejected() {
        assert!(commit_depth("-5").is_err());
    }

    // ── coordinate commit ───────────────────────────────────────────

    #[test]
    fn coordinate_commit_uses_column_then_row() {
        // First number is the column, second the row.
        let (jump, msg) = commit_coordinate("12,7").unwrap();
        let center = math::hex_center(7.0, 12.0);
        assert_eq!(jump.position, Vec3::new(center.x, center.y, JUMP_DEPTH));
        assert_eq!(jump.look_at, Vec3::new(center.x, center.y, 0.0));
        assert_eq!(
            msg,
            format!("Camera moved to: [{:.3}, {:.3}]", center.x, center.y)
        );
    }

    #[test]
    fn full_width_comma_is_normalized() {
        let half = commit_coordinate("3,4").unwrap();
        let full = commit_coordinate("3，4").unwrap();
        assert_eq!(half.0, full.0);
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        assert!(commit_coordinate("abc").is_err());
        assert!(commit_coordinate("5").is_err());
        assert!(commit_coordinate("5,").is_err());
        assert!(commit_coordinate(",5").is_err());
    }
}

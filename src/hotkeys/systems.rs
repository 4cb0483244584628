use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use super::{CaptureState, CommandAction, HotkeysActive, apply_key, commit_coordinate, commit_depth};
use crate::flight::{self, DefaultPose, Viewpoint};
use crate::tips::Tip;

/// Feeds keystrokes through the command machine and applies the resulting
/// commands to the viewpoint.
///
/// Hotkeys are global, not scoped to a focused element; [`HotkeysActive`]
/// is the only gate. While it is off, pending keystrokes are dropped so a
/// modal UI never races the machine for the same keys.
pub fn capture_hotkeys(
    active: Res<HotkeysActive>,
    keys: Res<ButtonInput<KeyCode>>,
    mut keyboard: MessageReader<KeyboardInput>,
    mut state: ResMut<CaptureState>,
    mut tips: MessageWriter<Tip>,
    default_pose: Option<Res<DefaultPose>>,
    mut query: Query<&mut Transform, With<Viewpoint>>,
) {
    if !active.0 {
        keyboard.clear();
        return;
    }

    let alt = keys.pressed(KeyCode::AltLeft) || keys.pressed(KeyCode::AltRight);

    for ev in keyboard.read() {
        if !ev.state.is_pressed() || ev.repeat {
            continue;
        }
        if let Some(action) = apply_key(&mut state, &ev.logical_key, alt) {
            run_action(action, &mut tips, default_pose.as_deref(), &mut query);
        }
    }
}

fn run_action(
    action: CommandAction,
    tips: &mut MessageWriter<Tip>,
    default_pose: Option<&DefaultPose>,
    query: &mut Query<&mut Transform, With<Viewpoint>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        warn!("No viewpoint to apply a hotkey command to");
        return;
    };

    match action {
        CommandAction::CommitDepth(buffer) => match commit_depth(&buffer) {
            Ok((z, message)) => {
                transform.translation.z = z;
                tips.write(Tip::success(message));
            }
            Err(message) => {
                tips.write(Tip::error(message));
            }
        },
        CommandAction::CommitCoordinate(buffer) => match commit_coordinate(&buffer) {
            Ok((jump, message)) => {
                flight::reposition(&mut transform, jump.position, jump.look_at);
                tips.write(Tip::success(message));
            }
            Err(message) => {
                tips.write(Tip::error(message));
            }
        },
        CommandAction::Reset => {
            let Some(pose) = default_pose else {
                warn!("No default pose stored; reset ignored");
                return;
            };
            flight::reposition(&mut transform, pose.position, pose.look_at);
            tips.write(Tip::success(format!(
                "Camera reset to default position: [{:.3}, {:.3}, {:.3}]",
                pose.position.x, pose.position.y, pose.position.z
            )));
        }
        CommandAction::Reverse => {
            transform.rotate_y(std::f32::consts::PI);
            tips.write(Tip::success("Camera reversed 180 degrees"));
        }
    }
}

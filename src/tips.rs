//! Transient on-screen notifications.
//!
//! Navigation commands report outcomes by writing [`Tip`] messages. Tips are
//! mirrored to the log (the fallback when no UI context exists) and drawn as
//! an egui overlay for a duration scaled to the message length.

use bevy::prelude::*;
use bevy_egui::egui;

/// Severity of a [`Tip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum TipLevel {
    /// A command completed.
    Success,
    /// Something was off but handled.
    Warning,
    /// A command was rejected.
    Error,
    /// Neutral information.
    Info,
}

/// Fire-and-forget user notification.
#[derive(Message, Clone, Debug)]
pub struct Tip {
    /// Severity, controls the overlay color and log level.
    pub level: TipLevel,
    /// User-facing text.
    pub text: String,
}

impl Tip {
    /// Success-level tip.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: TipLevel::Success,
            text: text.into(),
        }
    }

    /// Error-level tip.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: TipLevel::Error,
            text: text.into(),
        }
    }

    /// Info-level tip.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: TipLevel::Info,
            text: text.into(),
        }
    }
}

/// On-screen lifetime for a message of `chars` characters: 0.1 s per
/// character, clamped to `[2 s, 10 s]`.
pub fn display_seconds(chars: usize) -> f32 {
    (chars as f32 * 0.1).clamp(2.0, 10.0)
}

struct TipEntry {
    tip: Tip,
    remaining: f32,
}

/// Tips currently on screen.
#[derive(Resource, Default)]
pub struct ActiveTips {
    entries: Vec<TipEntry>,
}

/// Notification overlay plugin.
pub struct TipsPlugin;

impl Plugin for TipsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TipLevel>()
            .add_message::<Tip>()
            .init_resource::<ActiveTips>()
            .add_systems(Update, (collect_tips, draw_tips).chain());
    }
}

/// Drains incoming [`Tip`] messages into [`ActiveTips`], mirrors each to the
/// log, and expires entries whose display time has elapsed.
fn collect_tips(
    mut reader: MessageReader<Tip>,
    mut active: ResMut<ActiveTips>,
    time: Res<Time>,
) {
    for tip in reader.read() {
        match tip.level {
            TipLevel::Error => error!("{}", tip.text),
            TipLevel::Warning => warn!("{}", tip.text),
            TipLevel::Success | TipLevel::Info => info!("{}", tip.text),
        }
        active.entries.push(TipEntry {
            tip: tip.clone(),
            remaining: display_seconds(tip.text.chars().count()),
        });
    }

    let dt = time.delta_secs();
    active.entries.retain_mut(|entry| {
        entry.remaining -= dt;
        entry.remaining > 0.0
    });
}

/// Draws active tips in the top-right corner.
fn draw_tips(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    active: Res<ActiveTips>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    if active.entries.is_empty() {
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("tips-overlay"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx.get_mut(), |ui| {
            for entry in &active.entries {
                let color = match entry.tip.level {
                    TipLevel::Success => egui::Color32::from_rgb(80, 250, 123),
                    TipLevel::Warning => egui::Color32::from_rgb(241, 250, 140),
                    TipLevel::Error => egui::Color32::from_rgb(255, 85, 85),
                    TipLevel::Info => egui::Color32::from_rgb(139, 233, 253),
                };
                ui.colored_label(color, &entry.tip.text);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_stay_two_seconds() {
        assert_eq!(display_seconds(0), 2.0);
        assert_eq!(display_seconds(10), 2.0);
    }

    #[test]
    fn duration_scales_with_length() {
        assert!((display_seconds(50) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn long_messages_cap_at_ten_seconds() {
        assert_eq!(display_seconds(500), 10.0);
    }
}

use egui::{Color32, Pos2};

use crate::ui::{Component, DrawCommand, ReplayContext, TextCommand};

const LEADER_OFFSET: f32 = 30.;

/// Lap counter and race leader in the top left corner. Shows the loaded lap
/// instead while a qualifying lap replaces the race frames.
pub struct SessionInfoComponent {
    left: f32,
    top: f32,
}

impl SessionInfoComponent {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Header lines for the current frame, title first
pub fn session_lines(ctx: &ReplayContext) -> Vec<String> {
    if let Some((code, segment)) = &ctx.loaded_telemetry {
        return vec![format!("{} {}", code, segment)];
    }
    let Some(frame) = ctx.current_frame() else {
        return Vec::new();
    };

    let lap = frame.lap.max(1);
    let mut lines = vec![match ctx.total_laps {
        Some(total) => format!("Lap {}/{}", lap.min(total), total),
        None => format!("Lap {}", lap),
    }];
    if let Some(leader) = &frame.leader {
        lines.push(format!("Leader: {}", leader));
    }
    lines
}

impl Component for SessionInfoComponent {
    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        for (i, line) in session_lines(ctx).into_iter().enumerate() {
            let pos = Pos2::new(self.left, self.top + i as f32 * LEADER_OFFSET);
            let text = if i == 0 {
                TextCommand::new(line, pos, Color32::WHITE, 20.).bold()
            } else {
                TextCommand::new(line, pos, Color32::LIGHT_GRAY, 16.)
            };
            out.push(text.into());
        }
    }
}

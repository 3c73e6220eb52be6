use egui::{Align2, Color32, Pos2};

use crate::ui::{Component, DrawCommand, ReplayContext, TextCommand};

const LINE_SPACING: f32 = 25.;

const CONTROLS: [&str; 5] = [
    "Controls:",
    "[SPACE]  Pause/Resume",
    "[←/→]    Rewind / FastForward",
    "[↑/↓]    Speed +/- (0.5x, 1x, 2x, 4x)",
    "[R]       Restart",
];

/// Keyboard controls, anchored to the bottom left
pub struct LegendComponent {
    x: f32,
    bottom_offset: f32,
}

impl LegendComponent {
    pub fn new(x: f32, bottom_offset: f32) -> Self {
        Self { x, bottom_offset }
    }
}

impl Component for LegendComponent {
    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        let base_y = ctx.window_size.y - self.bottom_offset;
        for (i, line) in CONTROLS.iter().enumerate() {
            let pos = Pos2::new(self.x, base_y + i as f32 * LINE_SPACING);
            let text = if i == 0 {
                TextCommand::new(*line, pos, Color32::WHITE, 14.).bold()
            } else {
                TextCommand::new(*line, pos, Color32::LIGHT_GRAY, 14.)
            };
            out.push(text.anchor(Align2::LEFT_BOTTOM).into());
        }
    }
}

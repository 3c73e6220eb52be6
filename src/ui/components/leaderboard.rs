use egui::{Color32, PointerButton, Pos2};

use super::{LEADERBOARD_TOP, RowRects, race_order, toggle_driver_selection};
use crate::{
    replay::{DriverState, Frame},
    ui::{Component, DrawCommand, ReplayContext, TextCommand},
};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub code: String,
    pub color: Color32,
    pub state: DriverState,
}

/// Leaderboard entries for `frame` in race order
pub fn leaderboard_entries(frame: &Frame, ctx: &ReplayContext) -> Vec<LeaderboardEntry> {
    race_order(frame)
        .into_iter()
        .map(|code| {
            let state = frame.drivers[code].clone();
            LeaderboardEntry {
                code: code.clone(),
                color: ctx.driver_color(code),
                state,
            }
        })
        .collect()
}

/// Live race order on the right side of the window
pub struct LeaderboardComponent {
    x: f32,
    right_margin: f32,
    width: f32,
    entries: Vec<LeaderboardEntry>,
    rows: RowRects,
}

impl LeaderboardComponent {
    pub fn new(right_margin: f32, width: f32) -> Self {
        Self {
            x: 0.,
            right_margin,
            width,
            entries: Vec::new(),
            rows: RowRects::default(),
        }
    }

    /// Entries are drawn in the given order
    pub fn set_entries(&mut self, entries: Vec<LeaderboardEntry>) {
        self.entries = entries;
    }
}

impl Component for LeaderboardComponent {
    fn on_resize(&mut self, ctx: &mut ReplayContext) {
        self.x = ctx.window_size.x - self.right_margin;
    }

    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        out.push(
            TextCommand::new("Leaderboard", Pos2::new(self.x, LEADERBOARD_TOP), Color32::WHITE, 20.)
                .bold()
                .into(),
        );

        self.rows.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            let rect = self.rows.push_row(&entry.code, self.x, self.width, i);
            let text_color = if ctx.selected_driver.as_deref() == Some(entry.code.as_str()) {
                out.push(DrawCommand::RectFilled {
                    rect,
                    color: Color32::LIGHT_GRAY,
                });
                Color32::BLACK
            } else {
                entry.color
            };

            let text = if entry.state.is_out() {
                format!("{}. {}   OUT", i + 1, entry.code)
            } else {
                format!("{}. {}", i + 1, entry.code)
            };
            out.push(TextCommand::new(text, rect.left_top(), text_color, 16.).into());
        }
    }

    fn on_mouse_press(
        &mut self,
        ctx: &mut ReplayContext,
        pos: Pos2,
        _button: PointerButton,
    ) -> bool {
        match self.rows.hit(pos) {
            Some(code) => {
                toggle_driver_selection(ctx, code);
                true
            }
            None => false,
        }
    }
}

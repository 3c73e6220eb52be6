use std::cmp::Ordering;

use egui::{Align2, Color32, PointerButton, Pos2};
use itertools::Itertools;

use super::{LEADERBOARD_TOP, RowRects, toggle_driver_selection};
use crate::{
    replay::format_lap_time,
    ui::{Component, DrawCommand, ReplayContext, TextCommand},
};

const TEXT_INSET: f32 = 8.;

#[derive(Debug, Clone, PartialEq)]
pub struct LapTimeEntry {
    pub pos: u32,
    pub code: String,
    pub color: Color32,
    pub time: String,
}

/// Qualifying classification: classified drivers by position, the rest by their
/// fastest lap.
pub fn lap_time_entries(ctx: &ReplayContext) -> Vec<LapTimeEntry> {
    ctx.results
        .iter()
        .sorted_by(|a, b| match (a.position, b.position) {
            (Some(pa), Some(pb)) => pa.cmp(&pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (a.best_time(), b.best_time()) {
                (Some(ta), Some(tb)) => ta.total_cmp(&tb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.code.cmp(&b.code),
            },
        })
        .enumerate()
        .map(|(i, result)| LapTimeEntry {
            pos: result.position.unwrap_or(i as u32 + 1),
            code: result.code.clone(),
            color: ctx.driver_color(&result.code),
            time: result.best_time().map(format_lap_time).unwrap_or_default(),
        })
        .collect()
}

/// Fastest lap per driver, shown instead of the race order during qualifying
pub struct LapTimeLeaderboardComponent {
    x: f32,
    right_margin: f32,
    width: f32,
    entries: Vec<LapTimeEntry>,
    rows: RowRects,
}

impl LapTimeLeaderboardComponent {
    pub fn new(right_margin: f32, width: f32) -> Self {
        Self {
            x: 0.,
            right_margin,
            width,
            entries: Vec::new(),
            rows: RowRects::default(),
        }
    }

    pub fn set_entries(&mut self, entries: Vec<LapTimeEntry>) {
        self.entries = entries;
    }
}

impl Component for LapTimeLeaderboardComponent {
    fn on_resize(&mut self, ctx: &mut ReplayContext) {
        self.x = ctx.window_size.x - self.right_margin;
    }

    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        out.push(
            TextCommand::new("Lap Times", Pos2::new(self.x, LEADERBOARD_TOP), Color32::WHITE, 20.)
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

            out.push(
                TextCommand::new(
                    format!("{}. {}", entry.pos, entry.code),
                    rect.left_top() + egui::vec2(TEXT_INSET, 0.),
                    text_color,
                    16.,
                )
                .into(),
            );
            out.push(
                TextCommand::new(
                    entry.time.clone(),
                    rect.right_top() - egui::vec2(TEXT_INSET, 0.),
                    text_color,
                    14.,
                )
                .anchor(Align2::RIGHT_TOP)
                .into(),
            );
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

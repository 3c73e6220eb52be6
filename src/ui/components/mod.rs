mod driver_info;
mod lap_times;
mod leaderboard;
mod legend;
mod qualifying;
mod session_info;
mod track_map;
mod weather;

use std::cmp::Ordering;

use egui::{Pos2, Rect};
use itertools::Itertools;
use log::debug;

pub use driver_info::DriverInfoComponent;
pub use lap_times::{LapTimeEntry, LapTimeLeaderboardComponent, lap_time_entries};
pub use leaderboard::{LeaderboardComponent, LeaderboardEntry, leaderboard_entries};
pub use legend::LegendComponent;
pub use qualifying::QualifyingSegmentSelectorComponent;
pub use session_info::{SessionInfoComponent, session_lines};
pub use track_map::TrackMapComponent;
pub use weather::WeatherComponent;

use super::ReplayContext;
use crate::replay::Frame;

/// Distance of a leaderboard title from the top of the window
const LEADERBOARD_TOP: f32 = 40.;
/// Gap between a leaderboard title and its first row
const LEADERBOARD_HEADER_HEIGHT: f32 = 30.;
const ROW_HEIGHT: f32 = 25.;

/// Clickable leaderboard rows, rebuilt on every draw
#[derive(Debug, Default)]
pub(crate) struct RowRects {
    rects: Vec<(String, Rect)>,
}

impl RowRects {
    fn clear(&mut self) {
        self.rects.clear();
    }

    /// Lays out row `i` and registers it as clickable for `code`
    fn push_row(&mut self, code: &str, left: f32, width: f32, i: usize) -> Rect {
        let top = LEADERBOARD_TOP + LEADERBOARD_HEADER_HEIGHT + i as f32 * ROW_HEIGHT;
        let rect = Rect::from_min_max(Pos2::new(left, top), Pos2::new(left + width, top + ROW_HEIGHT));
        self.rects.push((code.to_string(), rect));
        rect
    }

    fn hit(&self, pos: Pos2) -> Option<&str> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(code, _)| code.as_str())
    }
}

/// Clicking the selected driver clears the selection, clicking another driver
/// selects them.
pub(crate) fn toggle_driver_selection(ctx: &mut ReplayContext, code: &str) {
    if ctx.selected_driver.as_deref() == Some(code) {
        ctx.selected_driver = None;
    } else {
        ctx.selected_driver = Some(code.to_string());
    }
    ctx.selected_segment = None;
    debug!("Selected driver: {:?}", ctx.selected_driver);
}

/// Race order for a frame: by position, then by distance covered
pub(crate) fn race_order(frame: &Frame) -> Vec<&String> {
    frame
        .drivers
        .iter()
        .sorted_by(|(code_a, a), (code_b, b)| {
            let pos_a = if a.position == 0 { u32::MAX } else { a.position };
            let pos_b = if b.position == 0 { u32::MAX } else { b.position };
            pos_a
                .cmp(&pos_b)
                .then_with(|| b.dist.partial_cmp(&a.dist).unwrap_or(Ordering::Equal))
                .then_with(|| code_a.cmp(code_b))
        })
        .map(|(code, _)| code)
        .collect()
}

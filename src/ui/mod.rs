use egui::{Align2, Color32, PointerButton, Pos2, Rect};

pub mod app;
pub mod components;
pub mod context;
pub(crate) mod painter;

use components::{
    DriverInfoComponent, LapTimeLeaderboardComponent, LeaderboardComponent, LegendComponent,
    QualifyingSegmentSelectorComponent, SessionInfoComponent, TrackMapComponent,
    WeatherComponent, lap_time_entries, leaderboard_entries,
};
pub use context::ReplayContext;

use crate::{config::ReplayConfig, track::TrackGeometry};

/// Text drawn at an anchor point
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub pos: Pos2,
    pub anchor: Align2,
    pub color: Color32,
    pub size: f32,
    pub bold: bool,
}

impl TextCommand {
    pub fn new(text: impl Into<String>, pos: Pos2, color: Color32, size: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            anchor: Align2::LEFT_TOP,
            color,
            size,
            bold: false,
        }
    }

    pub fn anchor(mut self, anchor: Align2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A single paint operation, in screen coordinates with the origin at the top left
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RectFilled { rect: Rect, color: Color32 },
    RectOutline { rect: Rect, color: Color32, width: f32 },
    Text(TextCommand),
    Image { uri: String, rect: Rect },
    Polyline { points: Vec<Pos2>, color: Color32, width: f32 },
    Circle { center: Pos2, radius: f32, color: Color32 },
}

impl From<TextCommand> for DrawCommand {
    fn from(value: TextCommand) -> Self {
        DrawCommand::Text(value)
    }
}

/// A panel drawn on top of the replay.
///
/// `draw` is called once per frame in draw order; `on_mouse_press` returns `true`
/// when the click was consumed.
pub trait Component {
    fn on_resize(&mut self, _ctx: &mut ReplayContext) {}

    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>);

    fn on_mouse_press(
        &mut self,
        _ctx: &mut ReplayContext,
        _pos: Pos2,
        _button: PointerButton,
    ) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    Race,
    Qualifying,
}

impl ReplayMode {
    /// Qualifying when any classified driver has a segment time
    pub fn detect(ctx: &ReplayContext) -> Self {
        if ctx.results.iter().any(|r| !r.segments().is_empty()) {
            Self::Qualifying
        } else {
            Self::Race
        }
    }
}

/// Owns the replay panels and dispatches events to them
pub struct ReplayUi {
    mode: ReplayMode,
    track_map: TrackMapComponent,
    session_info: SessionInfoComponent,
    legend: LegendComponent,
    weather: WeatherComponent,
    leaderboard: LeaderboardComponent,
    lap_times: LapTimeLeaderboardComponent,
    driver_info: DriverInfoComponent,
    qualifying: QualifyingSegmentSelectorComponent,
}

impl ReplayUi {
    pub fn new(mode: ReplayMode, config: &ReplayConfig, track: Option<TrackGeometry>) -> Self {
        let layout = &config.layout;
        Self {
            mode,
            track_map: TrackMapComponent::new(track, config.circuit_rotation),
            session_info: SessionInfoComponent::new(
                layout.session_info_left,
                layout.session_info_top,
            ),
            legend: LegendComponent::new(layout.legend_x, layout.legend_bottom_offset),
            weather: WeatherComponent::new(
                layout.weather_left,
                layout.weather_height,
                layout.weather_top_offset,
            ),
            leaderboard: LeaderboardComponent::new(
                layout.leaderboard_right_margin,
                layout.leaderboard_width,
            ),
            lap_times: LapTimeLeaderboardComponent::new(
                layout.leaderboard_right_margin,
                layout.leaderboard_width,
            ),
            driver_info: DriverInfoComponent::new(
                layout.driver_info_left,
                layout.driver_info_width,
                layout.driver_info_min_top,
            ),
            qualifying: QualifyingSegmentSelectorComponent::new(
                layout.modal_width,
                layout.modal_height,
            ),
        }
    }

    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    /// Components in draw order
    fn components_mut(&mut self) -> Vec<&mut dyn Component> {
        match self.mode {
            ReplayMode::Race => vec![
                &mut self.track_map as &mut dyn Component,
                &mut self.session_info,
                &mut self.legend,
                &mut self.weather,
                &mut self.leaderboard,
                &mut self.driver_info,
            ],
            ReplayMode::Qualifying => vec![
                &mut self.track_map as &mut dyn Component,
                &mut self.session_info,
                &mut self.legend,
                &mut self.weather,
                &mut self.lap_times,
                &mut self.driver_info,
                &mut self.qualifying,
            ],
        }
    }

    pub fn on_resize(&mut self, ctx: &mut ReplayContext) {
        for component in self.components_mut() {
            component.on_resize(ctx);
        }
    }

    /// Refreshes per-frame component inputs and returns the frame's draw list
    pub fn draw(&mut self, ctx: &ReplayContext) -> Vec<DrawCommand> {
        let frame = ctx.current_frame();
        self.weather
            .set_info(frame.and_then(|f| f.weather.clone()));
        match self.mode {
            ReplayMode::Race => self
                .leaderboard
                .set_entries(frame.map(|f| leaderboard_entries(f, ctx)).unwrap_or_default()),
            ReplayMode::Qualifying => self.lap_times.set_entries(lap_time_entries(ctx)),
        }

        let mut out = Vec::new();
        for component in self.components_mut() {
            component.draw(ctx, &mut out);
        }
        out
    }

    /// Offers the click to the topmost component first
    pub fn on_mouse_press(
        &mut self,
        ctx: &mut ReplayContext,
        pos: Pos2,
        button: PointerButton,
    ) -> bool {
        self.components_mut()
            .into_iter()
            .rev()
            .any(|component| component.on_mouse_press(ctx, pos, button))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use egui::Vec2;

    use super::*;
    use crate::replay::{DriverResult, DriverState, Frame};

    fn race_context() -> ReplayContext {
        let mut drivers = HashMap::new();
        drivers.insert(
            "VER".to_string(),
            DriverState {
                position: 1,
                ..Default::default()
            },
        );
        drivers.insert(
            "HAM".to_string(),
            DriverState {
                position: 2,
                ..Default::default()
            },
        );
        ReplayContext {
            frames: vec![Frame {
                drivers,
                ..Default::default()
            }],
            window_size: Vec2::new(1920., 1200.),
            ..Default::default()
        }
    }

    #[test]
    fn test_mode_detection() {
        let mut ctx = race_context();
        assert_eq!(ReplayMode::detect(&ctx), ReplayMode::Race);
        ctx.results.push(DriverResult {
            code: "VER".to_string(),
            q1: Some(88.),
            ..Default::default()
        });
        assert_eq!(ReplayMode::detect(&ctx), ReplayMode::Qualifying);
    }

    #[test]
    fn test_click_on_leaderboard_row_selects_driver() {
        let mut ctx = race_context();
        let mut ui = ReplayUi::new(ReplayMode::Race, &ReplayConfig::default(), None);
        ui.on_resize(&mut ctx);
        let commands = ui.draw(&ctx);
        assert!(!commands.is_empty());

        // second row of the leaderboard
        let x = 1920. - 260. + 10.;
        let y = 40. + 30. + 25. + 5.;
        assert!(ui.on_mouse_press(&mut ctx, Pos2::new(x, y), PointerButton::Primary));
        assert_eq!(ctx.selected_driver.as_deref(), Some("HAM"));

        // clicking empty space is not consumed
        assert!(!ui.on_mouse_press(&mut ctx, Pos2::new(900., 900.), PointerButton::Primary));
        assert_eq!(ctx.selected_driver.as_deref(), Some("HAM"));
    }

    #[test]
    fn test_open_modal_consumes_clicks_first() {
        let mut ctx = race_context();
        ctx.results.push(DriverResult {
            code: "VER".to_string(),
            q1: Some(88.),
            ..Default::default()
        });
        ctx.selected_driver = Some("VER".to_string());
        let mut ui = ReplayUi::new(ReplayMode::Qualifying, &ReplayConfig::default(), None);
        ui.on_resize(&mut ctx);
        ui.draw(&ctx);

        assert!(ui.on_mouse_press(&mut ctx, Pos2::new(5., 5.), PointerButton::Primary));
        assert_eq!(ctx.selected_driver.as_deref(), Some("VER"));
    }
}

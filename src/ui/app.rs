use egui::{Color32, Frame, Id, Key, PointerButton, Sense, Vec2, Visuals};
use log::debug;

use super::{ReplayContext, ReplayUi, painter::paint};

const PLAYBACK_SPEEDS: [f64; 4] = [0.5, 1., 2., 4.];
const DEFAULT_SPEED_IDX: usize = 1;
const SEEK_SECONDS: f64 = 5.;

/// Frame advance state driven by the keyboard controls
#[derive(Debug, Clone)]
pub struct Playback {
    fps: f64,
    paused: bool,
    speed_idx: usize,
}

impl Playback {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
        }
    }

    pub fn speed(&self) -> f64 {
        PLAYBACK_SPEEDS[self.speed_idx]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn faster(&mut self) {
        self.speed_idx = (self.speed_idx + 1).min(PLAYBACK_SPEEDS.len() - 1);
    }

    pub fn slower(&mut self) {
        self.speed_idx = self.speed_idx.saturating_sub(1);
    }

    /// Moves playback forward by `dt` seconds of wall time
    pub fn advance(&self, ctx: &mut ReplayContext, dt: f64) {
        if !self.paused {
            self.seek(ctx, dt * self.speed());
        }
    }

    /// Jumps by `seconds` of replay time, staying within the frames
    pub fn seek(&self, ctx: &mut ReplayContext, seconds: f64) {
        let last = ctx.n_frames().saturating_sub(1) as f64;
        ctx.frame_index = (ctx.frame_index + seconds * self.fps).clamp(0., last);
    }

    pub fn restart(&self, ctx: &mut ReplayContext) {
        ctx.frame_index = 0.;
    }
}

pub struct ReplayApp {
    replay: ReplayContext,
    ui: ReplayUi,
    playback: Playback,
    laid_out: bool,
}

impl ReplayApp {
    pub fn new(
        replay: ReplayContext,
        ui: ReplayUi,
        playback: Playback,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::from_parts(replay, ui, playback)
    }

    fn from_parts(replay: ReplayContext, ui: ReplayUi, playback: Playback) -> Self {
        Self {
            replay,
            ui,
            playback,
            laid_out: false,
        }
    }

    /// Lays the panels out on the first frame and whenever the canvas changes size
    fn layout(&mut self, canvas: Vec2) {
        if self.laid_out && canvas == self.replay.window_size {
            return;
        }
        self.replay.window_size = canvas;
        self.ui.on_resize(&mut self.replay);
        self.laid_out = true;
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed = |key| ctx.input(|i| i.key_pressed(key));
        if pressed(Key::Space) {
            self.playback.toggle_pause();
            debug!("Paused: {}", self.playback.is_paused());
        }
        if pressed(Key::ArrowLeft) {
            self.playback.seek(&mut self.replay, -SEEK_SECONDS);
        }
        if pressed(Key::ArrowRight) {
            self.playback.seek(&mut self.replay, SEEK_SECONDS);
        }
        if pressed(Key::ArrowUp) {
            self.playback.faster();
            debug!("Playback speed: {}x", self.playback.speed());
        }
        if pressed(Key::ArrowDown) {
            self.playback.slower();
            debug!("Playback speed: {}x", self.playback.speed());
        }
        if pressed(Key::R) {
            self.playback.restart(&mut self.replay);
        }
    }
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.playback.advance(&mut self.replay, dt);

        egui::CentralPanel::default()
            .frame(Frame::new().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let canvas = ui.max_rect();
                self.layout(canvas.size());

                let response = ui.interact(canvas, Id::new("replay-canvas"), Sense::click());
                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    self.ui
                        .on_mouse_press(&mut self.replay, pos, PointerButton::Primary);
                }

                let commands = self.ui.draw(&self.replay);
                paint(ui, &commands);
            });

        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ReplayConfig, ReplayMode,
        replay::Frame,
        track::{ReferenceLap, build_track_from_example_lap},
        ui::DrawCommand,
    };

    fn context(n_frames: usize) -> ReplayContext {
        ReplayContext {
            frames: vec![Frame::default(); n_frames],
            ..Default::default()
        }
    }

    fn app_at_configured_size() -> (ReplayApp, ReplayConfig) {
        let config = ReplayConfig::default();
        let lap = ReferenceLap {
            x: vec![0., 1000., 1000., 0.],
            y: vec![0., 0., 1000., 1000.],
        };
        let track = build_track_from_example_lap(&lap, config.track_width).unwrap();
        let replay = ReplayContext {
            frames: vec![Frame::default()],
            window_size: Vec2::new(config.window_width, config.window_height),
            has_weather: true,
            ..Default::default()
        };
        let ui = ReplayUi::new(ReplayMode::Race, &config, Some(track));
        let app = ReplayApp::from_parts(replay, ui, Playback::new(config.fps));
        (app, config)
    }

    #[test]
    fn test_first_frame_lays_out_when_canvas_matches_window_size() {
        let (mut app, config) = app_at_configured_size();
        let canvas = app.replay.window_size;
        app.layout(canvas);
        let commands = app.ui.draw(&app.replay);

        let polylines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .count();
        assert_eq!(polylines, 2);

        let title = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text(t) if t.text == "Leaderboard" => Some(t.pos),
                _ => None,
            })
            .unwrap();
        assert_eq!(title.x, canvas.x - config.layout.leaderboard_right_margin);

        let layout = &config.layout;
        assert_eq!(
            app.replay.weather_bottom,
            Some(layout.weather_top_offset + layout.weather_height)
        );
    }

    #[test]
    fn test_layout_follows_canvas_resize() {
        let (mut app, config) = app_at_configured_size();
        app.layout(app.replay.window_size);
        app.layout(Vec2::new(1280., 720.));
        assert_eq!(app.replay.window_size, Vec2::new(1280., 720.));

        let commands = app.ui.draw(&app.replay);
        let title = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text(t) if t.text == "Leaderboard" => Some(t.pos),
                _ => None,
            })
            .unwrap();
        assert_eq!(title.x, 1280. - config.layout.leaderboard_right_margin);
    }

    #[test]
    fn test_advance_scales_with_fps_and_speed() {
        let mut ctx = context(1000);
        let mut playback = Playback::new(25.);
        playback.advance(&mut ctx, 2.);
        assert_eq!(ctx.frame_index, 50.);

        playback.faster();
        playback.advance(&mut ctx, 1.);
        assert_eq!(ctx.frame_index, 100.);
    }

    #[test]
    fn test_paused_playback_does_not_advance() {
        let mut ctx = context(100);
        let mut playback = Playback::new(25.);
        playback.toggle_pause();
        playback.advance(&mut ctx, 1.);
        assert_eq!(ctx.frame_index, 0.);
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut ctx = context(100);
        let playback = Playback::new(25.);
        playback.seek(&mut ctx, 10.);
        assert_eq!(ctx.frame_index, 99.);
        playback.seek(&mut ctx, -100.);
        assert_eq!(ctx.frame_index, 0.);
    }

    #[test]
    fn test_speed_steps_are_bounded() {
        let mut playback = Playback::new(25.);
        assert_eq!(playback.speed(), 1.);
        for _ in 0..10 {
            playback.faster();
        }
        assert_eq!(playback.speed(), 4.);
        for _ in 0..10 {
            playback.slower();
        }
        assert_eq!(playback.speed(), 0.5);
    }
}

use egui::{Align2, Color32, Pos2, Rect, Vec2};

use crate::ui::{Component, DrawCommand, ReplayContext, TextCommand};

const BOX_HEIGHT: f32 = 150.;
const NAME_BAND_HEIGHT: f32 = 40.;
const IMAGE_SIZE: f32 = 130.;
const LINE_SPACING: f32 = 25.;

/// Details of the selected driver, placed below the weather panel
pub struct DriverInfoComponent {
    left: f32,
    width: f32,
    min_top: f32,
}

impl DriverInfoComponent {
    pub fn new(left: f32, width: f32, min_top: f32) -> Self {
        Self {
            left,
            width,
            min_top,
        }
    }

    /// Screen y of the top of the stats box
    fn info_top(&self, ctx: &ReplayContext) -> f32 {
        let height = ctx.window_size.y;
        let default_top = height / 2. - 100.;
        let top = match ctx.weather_bottom {
            Some(weather_bottom) => default_top.max(weather_bottom + 20. + BOX_HEIGHT / 2.),
            None => default_top,
        };
        top.min(height - self.min_top - BOX_HEIGHT / 2.)
    }

    fn lines(&self, ctx: &ReplayContext, code: &str) -> Vec<String> {
        let state = ctx
            .current_frame()
            .and_then(|frame| frame.drivers.get(code));
        let team = ctx
            .driver_teams
            .get(code)
            .cloned()
            .or_else(|| ctx.driver_result(code).and_then(|r| r.team.clone()))
            .unwrap_or_else(|| "Unknown Team".to_string());

        vec![
            format!("Speed: {:.1} km/h", state.map(|s| s.speed).unwrap_or(0.)),
            format!("Gear: {}", state.map(|s| s.gear).unwrap_or(0)),
            format!(
                "DRS: {}",
                state
                    .map(|s| s.drs.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ),
            format!("Current Lap: {}", state.map(|s| s.lap).unwrap_or(1)),
            format!("Team: {}", team),
        ]
    }
}

impl Component for DriverInfoComponent {
    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        let Some(code) = ctx.selected_driver.as_deref() else {
            return;
        };
        let color = ctx.driver_color(code);
        let full_name = ctx
            .driver_names
            .get(code)
            .cloned()
            .or_else(|| ctx.driver_result(code).and_then(|r| r.full_name.clone()))
            .unwrap_or_default();

        let top = self.info_top(ctx);
        out.push(DrawCommand::RectOutline {
            rect: Rect::from_min_size(Pos2::new(self.left, top), Vec2::new(self.width, BOX_HEIGHT)),
            color,
            width: 1.,
        });
        out.push(DrawCommand::RectFilled {
            rect: Rect::from_min_size(
                Pos2::new(self.left, top - NAME_BAND_HEIGHT),
                Vec2::new(self.width, NAME_BAND_HEIGHT),
            ),
            color,
        });
        out.push(
            TextCommand::new(
                format!("{} - {}", code, full_name),
                Pos2::new(self.left + 10., top - NAME_BAND_HEIGHT / 2.),
                Color32::BLACK,
                16.,
            )
            .anchor(Align2::LEFT_CENTER)
            .into(),
        );

        if let Some(uri) = ctx.driver_textures.get(code) {
            out.push(DrawCommand::Image {
                uri: uri.clone(),
                rect: Rect::from_center_size(
                    Pos2::new(self.left + self.width / 1.3, top - BOX_HEIGHT + 220.),
                    Vec2::splat(IMAGE_SIZE),
                ),
            });
        }

        for (i, line) in self.lines(ctx, code).into_iter().enumerate() {
            out.push(
                TextCommand::new(
                    line,
                    Pos2::new(self.left + 10., top + 20. + i as f32 * LINE_SPACING),
                    Color32::WHITE,
                    14.,
                )
                .anchor(Align2::LEFT_CENTER)
                .into(),
            );
        }
    }
}

use egui::{Color32, Pos2, Rect};

use crate::{
    track::{TrackGeometry, TrackTransform},
    ui::{Component, DrawCommand, ReplayContext},
};

const TRACK_PADDING: f32 = 60.;
const EDGE_WIDTH: f32 = 4.;
const DRIVER_RADIUS: f32 = 6.;
const SELECTED_DRIVER_RADIUS: f32 = 9.;

/// Circuit outline with one marker per car
pub struct TrackMapComponent {
    geometry: Option<TrackGeometry>,
    rotation_deg: f64,
    transform: Option<TrackTransform>,
    inner: Vec<Pos2>,
    outer: Vec<Pos2>,
}

impl TrackMapComponent {
    pub fn new(geometry: Option<TrackGeometry>, rotation_deg: f64) -> Self {
        Self {
            geometry,
            rotation_deg,
            transform: None,
            inner: Vec::new(),
            outer: Vec::new(),
        }
    }
}

impl Component for TrackMapComponent {
    fn on_resize(&mut self, ctx: &mut ReplayContext) {
        let Some(geometry) = &self.geometry else {
            return;
        };
        let screen = Rect::from_min_size(Pos2::ZERO, ctx.window_size);
        let transform = TrackTransform::fit(&geometry.bounds, self.rotation_deg, screen, TRACK_PADDING);
        self.inner = transform.polyline(&geometry.x_inner, &geometry.y_inner);
        self.outer = transform.polyline(&geometry.x_outer, &geometry.y_outer);
        self.transform = Some(transform);
    }

    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        let Some(transform) = self.transform else {
            return;
        };
        for edge in [&self.inner, &self.outer] {
            out.push(DrawCommand::Polyline {
                points: edge.clone(),
                color: Color32::GRAY,
                width: EDGE_WIDTH,
            });
        }

        let Some(frame) = ctx.current_frame() else {
            return;
        };
        let selected = ctx.selected_driver.as_deref();
        let mut drivers: Vec<_> = frame.drivers.iter().filter(|(_, s)| !s.is_out()).collect();
        // selected car painted last so it sits on top
        drivers.sort_by(|(code_a, _), (code_b, _)| {
            let key_a = (Some(code_a.as_str()) == selected, *code_a);
            let key_b = (Some(code_b.as_str()) == selected, *code_b);
            key_a.cmp(&key_b)
        });
        for (code, state) in drivers {
            let radius = if Some(code.as_str()) == selected {
                SELECTED_DRIVER_RADIUS
            } else {
                DRIVER_RADIUS
            };
            out.push(DrawCommand::Circle {
                center: transform.world_to_screen(state.x, state.y),
                radius,
                color: ctx.driver_color(code),
            });
        }
    }
}

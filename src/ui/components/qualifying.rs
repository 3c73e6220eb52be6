use egui::{Align2, Color32, PointerButton, Pos2, Rect, Vec2};
use log::{debug, error};

use crate::{
    replay::{QualifyingSegment, format_lap_time},
    ui::{Component, DrawCommand, ReplayContext, TextCommand},
};

const SEGMENT_HEIGHT: f32 = 50.;
const SEGMENT_GAP: f32 = 10.;
const SEGMENTS_OFFSET: f32 = 80.;
const SEGMENT_INSET: f32 = 20.;
const CLOSE_BUTTON_OFFSET: f32 = 30.;
const CLOSE_BUTTON_SIZE: f32 = 20.;

/// Modal listing the selected driver's qualifying segments. Picking a segment
/// loads that lap's telemetry into the replay.
pub struct QualifyingSegmentSelectorComponent {
    width: f32,
    height: f32,
}

impl QualifyingSegmentSelectorComponent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn modal_rect(&self, ctx: &ReplayContext) -> Rect {
        Rect::from_center_size(
            (ctx.window_size / 2.).to_pos2(),
            Vec2::new(self.width, self.height),
        )
    }

    fn close_button_rect(&self, modal: Rect) -> Rect {
        Rect::from_center_size(
            Pos2::new(
                modal.right() - CLOSE_BUTTON_OFFSET,
                modal.top() + CLOSE_BUTTON_OFFSET,
            ),
            Vec2::splat(CLOSE_BUTTON_SIZE),
        )
    }

    /// Segments with a time for the selected driver, each with its row rect
    fn segment_rows(&self, ctx: &ReplayContext, modal: Rect) -> Vec<(QualifyingSegment, f64, Rect)> {
        let Some(result) = ctx
            .selected_driver
            .as_deref()
            .and_then(|code| ctx.driver_result(code))
        else {
            return Vec::new();
        };
        result
            .segments()
            .into_iter()
            .enumerate()
            .map(|(i, (segment, time))| {
                let top = modal.top() + SEGMENTS_OFFSET + i as f32 * (SEGMENT_HEIGHT + SEGMENT_GAP);
                let rect = Rect::from_min_max(
                    Pos2::new(modal.left() + SEGMENT_INSET, top),
                    Pos2::new(modal.right() - SEGMENT_INSET, top + SEGMENT_HEIGHT),
                );
                (segment, time, rect)
            })
            .collect()
    }

    fn close(&self, ctx: &mut ReplayContext) {
        ctx.selected_driver = None;
        ctx.selected_segment = None;
    }
}

impl Component for QualifyingSegmentSelectorComponent {
    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        let Some(code) = ctx.selected_driver.as_deref() else {
            return;
        };
        let modal = self.modal_rect(ctx);

        out.push(DrawCommand::RectFilled {
            rect: modal,
            color: Color32::from_rgba_unmultiplied(40, 40, 40, 230),
        });
        out.push(DrawCommand::RectOutline {
            rect: modal,
            color: Color32::WHITE,
            width: 2.,
        });
        out.push(
            TextCommand::new(
                format!("Qualifying Sessions - {}", code),
                Pos2::new(modal.left() + 20., modal.top() + 30.),
                Color32::WHITE,
                18.,
            )
            .anchor(Align2::LEFT_CENTER)
            .bold()
            .into(),
        );

        for (segment, time, rect) in self.segment_rows(ctx, modal) {
            let text_color = if ctx.selected_segment == Some(segment) {
                out.push(DrawCommand::RectFilled {
                    rect,
                    color: Color32::LIGHT_GRAY,
                });
                Color32::BLACK
            } else {
                out.push(DrawCommand::RectFilled {
                    rect,
                    color: Color32::from_rgb(60, 60, 60),
                });
                Color32::WHITE
            };
            out.push(DrawCommand::RectOutline {
                rect,
                color: Color32::WHITE,
                width: 1.,
            });

            let text_y = rect.top() + 20.;
            out.push(
                TextCommand::new(
                    segment.to_string(),
                    Pos2::new(modal.left() + 30., text_y),
                    text_color,
                    16.,
                )
                .anchor(Align2::LEFT_CENTER)
                .bold()
                .into(),
            );
            out.push(
                TextCommand::new(
                    format_lap_time(time),
                    Pos2::new(modal.right() - 30., text_y),
                    text_color,
                    14.,
                )
                .anchor(Align2::RIGHT_CENTER)
                .into(),
            );
        }

        let close_button = self.close_button_rect(modal);
        out.push(DrawCommand::RectFilled {
            rect: close_button,
            color: Color32::RED,
        });
        out.push(
            TextCommand::new("×", close_button.center(), Color32::WHITE, 16.)
                .anchor(Align2::CENTER_CENTER)
                .bold()
                .into(),
        );
    }

    fn on_mouse_press(
        &mut self,
        ctx: &mut ReplayContext,
        pos: Pos2,
        _button: PointerButton,
    ) -> bool {
        let Some(code) = ctx.selected_driver.clone() else {
            return false;
        };
        let modal = self.modal_rect(ctx);

        if self.close_button_rect(modal).contains(pos) {
            debug!("Closing qualifying selector for {}", code);
            self.close(ctx);
            return true;
        }

        let clicked = self
            .segment_rows(ctx, modal)
            .into_iter()
            .find(|(_, _, rect)| rect.contains(pos));
        if let Some((segment, _, _)) = clicked {
            ctx.selected_segment = Some(segment);
            match ctx.load_driver_telemetry(&code, segment) {
                Ok(()) => self.close(ctx),
                Err(e) => error!("Error starting telemetry load: {}", e),
            }
        }

        // the modal swallows every click while it is open
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{DriverResult, Frame, QualifyingLap};

    fn context() -> ReplayContext {
        ReplayContext {
            window_size: Vec2::new(1000., 800.),
            frames: vec![Frame::default()],
            selected_driver: Some("HAM".to_string()),
            results: vec![DriverResult {
                code: "HAM".to_string(),
                q1: Some(90.2),
                q3: Some(89.1),
                ..Default::default()
            }],
            qualifying_laps: vec![QualifyingLap {
                code: "HAM".to_string(),
                segment: QualifyingSegment::Q3,
                frames: vec![Frame::default(); 4],
            }],
            ..Default::default()
        }
    }

    // modal spans x 300..700, y 250..550
    const CLOSE_BUTTON: Pos2 = Pos2::new(670., 280.);
    const FIRST_SEGMENT: Pos2 = Pos2::new(500., 350.);
    const SECOND_SEGMENT: Pos2 = Pos2::new(500., 410.);

    #[test]
    fn test_hidden_without_selected_driver() {
        let mut ctx = context();
        ctx.selected_driver = None;
        let mut modal = QualifyingSegmentSelectorComponent::new(400., 300.);

        let mut out = Vec::new();
        modal.draw(&ctx, &mut out);
        assert!(out.is_empty());
        assert!(!modal.on_mouse_press(&mut ctx, FIRST_SEGMENT, PointerButton::Primary));
    }

    #[test]
    fn test_only_recorded_segments_are_listed() {
        let ctx = context();
        let mut out = Vec::new();
        QualifyingSegmentSelectorComponent::new(400., 300.).draw(&ctx, &mut out);

        let texts: Vec<_> = out
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Qualifying Sessions - HAM",
                "Q1",
                "1:30.200",
                "Q3",
                "1:29.100",
                "×"
            ]
        );
    }

    #[test]
    fn test_driver_without_results_still_shows_modal() {
        let mut ctx = context();
        ctx.selected_driver = Some("DOO".to_string());
        let mut out = Vec::new();
        QualifyingSegmentSelectorComponent::new(400., 300.).draw(&ctx, &mut out);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_close_button_clears_selection() {
        let mut ctx = context();
        ctx.selected_segment = Some(QualifyingSegment::Q1);
        let mut modal = QualifyingSegmentSelectorComponent::new(400., 300.);

        assert!(modal.on_mouse_press(&mut ctx, CLOSE_BUTTON, PointerButton::Primary));
        assert_eq!(ctx.selected_driver, None);
        assert_eq!(ctx.selected_segment, None);
    }

    #[test]
    fn test_selecting_segment_loads_telemetry_and_hides_modal() {
        let mut ctx = context();
        let mut modal = QualifyingSegmentSelectorComponent::new(400., 300.);

        assert!(modal.on_mouse_press(&mut ctx, SECOND_SEGMENT, PointerButton::Primary));
        assert_eq!(ctx.selected_driver, None);
        assert_eq!(ctx.selected_segment, None);
        assert_eq!(ctx.n_frames(), 4);
        assert_eq!(
            ctx.loaded_telemetry,
            Some(("HAM".to_string(), QualifyingSegment::Q3))
        );
    }

    #[test]
    fn test_failed_load_is_logged_not_raised() {
        let mut ctx = context();
        let mut modal = QualifyingSegmentSelectorComponent::new(400., 300.);

        // no Q1 lap telemetry available
        assert!(modal.on_mouse_press(&mut ctx, FIRST_SEGMENT, PointerButton::Primary));
        assert_eq!(ctx.selected_driver.as_deref(), Some("HAM"));
        assert_eq!(ctx.selected_segment, Some(QualifyingSegment::Q1));
        assert_eq!(ctx.n_frames(), 1);
    }

    #[test]
    fn test_clicks_outside_rows_are_consumed() {
        let mut ctx = context();
        let mut modal = QualifyingSegmentSelectorComponent::new(400., 300.);
        assert!(modal.on_mouse_press(&mut ctx, Pos2::new(5., 5.), PointerButton::Primary));
        assert_eq!(ctx.selected_driver.as_deref(), Some("HAM"));
    }
}

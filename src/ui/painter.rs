use egui::{FontId, Image, Stroke, StrokeKind, Ui, Vec2};

use super::DrawCommand;

// egui's default fonts have no bold face, bold text is painted twice with a small offset
const FAUX_BOLD_OFFSET: f32 = 0.6;

/// Paints a draw list onto the ui, in order
pub(crate) fn paint(ui: &Ui, commands: &[DrawCommand]) {
    let painter = ui.painter();
    for command in commands {
        match command {
            DrawCommand::RectFilled { rect, color } => {
                painter.rect_filled(*rect, 0., *color);
            }
            DrawCommand::RectOutline { rect, color, width } => {
                painter.rect_stroke(*rect, 0., Stroke::new(*width, *color), StrokeKind::Inside);
            }
            DrawCommand::Text(text) => {
                let font = FontId::proportional(text.size);
                painter.text(text.pos, text.anchor, &text.text, font.clone(), text.color);
                if text.bold {
                    painter.text(
                        text.pos + Vec2::new(FAUX_BOLD_OFFSET, 0.),
                        text.anchor,
                        &text.text,
                        font,
                        text.color,
                    );
                }
            }
            DrawCommand::Image { uri, rect } => {
                Image::new(uri.clone()).paint_at(ui, *rect);
            }
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => {
                painter.line(points.clone(), Stroke::new(*width, *color));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(*center, *radius, *color);
            }
        }
    }
}

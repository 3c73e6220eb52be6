use egui::{Color32, Pos2};

use crate::{
    ui::{Component, DrawCommand, ReplayContext, TextCommand},
    weather::{WeatherSnapshot, format_wind_direction},
};

const TEXT_INSET: f32 = 12.;
const TITLE_OFFSET: f32 = 10.;
const FIRST_LINE_OFFSET: f32 = 36.;
const LINE_SPACING: f32 = 22.;

fn format_value(value: Option<f64>, suffix: &str, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}{}", precision, v, suffix),
        None => "N/A".to_string(),
    }
}

/// Formats the panel lines; every missing value renders as "N/A"
pub(crate) fn weather_lines(info: Option<&WeatherSnapshot>) -> Vec<String> {
    let default = WeatherSnapshot::default();
    let snapshot = info.unwrap_or(&default);
    let rain = info
        .map(|i| i.rain_state.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    vec![
        format!("Track: {}", format_value(snapshot.track_temp, "°C", 1)),
        format!("Air: {}", format_value(snapshot.air_temp, "°C", 1)),
        format!("Humidity: {}", format_value(snapshot.humidity, "%", 0)),
        format!(
            "Wind: {} {}",
            format_value(snapshot.wind_speed, " km/h", 1),
            format_wind_direction(snapshot.wind_direction)
        ),
        format!("Rain: {}", rain),
    ]
}

/// Current conditions in the top left corner
pub struct WeatherComponent {
    left: f32,
    height: f32,
    top_offset: f32,
    info: Option<WeatherSnapshot>,
}

impl WeatherComponent {
    pub fn new(left: f32, height: f32, top_offset: f32) -> Self {
        Self {
            left,
            height,
            top_offset,
            info: None,
        }
    }

    pub fn set_info(&mut self, info: Option<WeatherSnapshot>) {
        self.info = info;
    }
}

impl Component for WeatherComponent {
    fn on_resize(&mut self, ctx: &mut ReplayContext) {
        ctx.weather_bottom = ctx
            .has_weather
            .then_some(self.top_offset + self.height);
    }

    fn draw(&mut self, ctx: &ReplayContext, out: &mut Vec<DrawCommand>) {
        if self.info.is_none() && !ctx.has_weather {
            return;
        }

        let panel_top = self.top_offset;
        out.push(
            TextCommand::new(
                "Weather",
                Pos2::new(self.left + TEXT_INSET, panel_top + TITLE_OFFSET),
                Color32::WHITE,
                18.,
            )
            .bold()
            .into(),
        );

        let start_y = panel_top + FIRST_LINE_OFFSET;
        for (idx, line) in weather_lines(self.info.as_ref()).into_iter().enumerate() {
            out.push(
                TextCommand::new(
                    line,
                    Pos2::new(self.left + TEXT_INSET, start_y + idx as f32 * LINE_SPACING),
                    Color32::LIGHT_GRAY,
                    14.,
                )
                .into(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::RainState;

    #[test]
    fn test_missing_values_render_as_na() {
        let lines = weather_lines(None);
        assert_eq!(
            lines,
            vec![
                "Track: N/A",
                "Air: N/A",
                "Humidity: N/A",
                "Wind: N/A N/A",
                "Rain: N/A"
            ]
        );
    }

    #[test]
    fn test_values_are_formatted() {
        let snapshot = WeatherSnapshot {
            track_temp: Some(41.26),
            air_temp: None,
            humidity: Some(55.6),
            wind_speed: Some(3.04),
            wind_direction: Some(180.),
            rain_state: RainState::Raining,
        };
        let lines = weather_lines(Some(&snapshot));
        assert_eq!(lines[0], "Track: 41.3°C");
        assert_eq!(lines[1], "Air: N/A");
        assert_eq!(lines[2], "Humidity: 56%");
        assert_eq!(lines[3], "Wind: 3.0 km/h S");
        assert_eq!(lines[4], "Rain: RAINING");
    }

    #[test]
    fn test_hidden_without_weather() {
        let mut weather = WeatherComponent::new(20., 130., 170.);
        let mut ctx = ReplayContext::default();
        weather.on_resize(&mut ctx);
        assert_eq!(ctx.weather_bottom, None);

        let mut out = Vec::new();
        weather.draw(&ctx, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_drawn_when_session_has_weather() {
        let mut weather = WeatherComponent::new(20., 130., 170.);
        let mut ctx = ReplayContext {
            has_weather: true,
            ..Default::default()
        };
        weather.on_resize(&mut ctx);
        assert_eq!(ctx.weather_bottom, Some(300.));

        let mut out = Vec::new();
        weather.draw(&ctx, &mut out);
        assert_eq!(out.len(), 6);
    }
}

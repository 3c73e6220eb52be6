use std::collections::HashMap;

use egui::{Color32, Vec2};
use log::info;

use crate::{
    ReplayError,
    replay::{DriverResult, Frame, QualifyingLap, QualifyingSegment, ReplayData},
};

/// State shared by every UI component.
///
/// Components read the current frame and driver metadata from here, and the
/// clickable components write the selection back.
#[derive(Debug, Clone, Default)]
pub struct ReplayContext {
    pub frames: Vec<Frame>,
    /// Fractional playback position into `frames`
    pub frame_index: f64,
    pub window_size: Vec2,
    pub total_laps: Option<u32>,
    pub driver_colors: HashMap<String, Color32>,
    pub driver_teams: HashMap<String, String>,
    pub driver_names: HashMap<String, String>,
    pub driver_textures: HashMap<String, String>,
    pub results: Vec<DriverResult>,
    pub qualifying_laps: Vec<QualifyingLap>,
    pub selected_driver: Option<String>,
    pub selected_segment: Option<QualifyingSegment>,
    pub has_weather: bool,
    /// Screen y of the weather panel's bottom edge, once laid out
    pub weather_bottom: Option<f32>,
    /// Qualifying lap currently loaded in place of the race frames
    pub loaded_telemetry: Option<(String, QualifyingSegment)>,
}

impl ReplayContext {
    pub fn from_replay(data: ReplayData, window_size: Vec2) -> Self {
        let has_weather = data.weather.as_ref().is_some_and(|w| !w.is_empty())
            || data.frames.iter().any(|f| f.weather.is_some());
        Self {
            frames: data.frames,
            frame_index: 0.,
            window_size,
            total_laps: data.total_laps,
            driver_colors: data
                .driver_colors
                .into_iter()
                .map(|(code, [r, g, b])| (code, Color32::from_rgb(r, g, b)))
                .collect(),
            driver_teams: data.driver_teams,
            driver_names: data.driver_names,
            driver_textures: data.driver_images,
            results: data.results,
            qualifying_laps: data.qualifying_laps,
            selected_driver: None,
            selected_segment: None,
            has_weather,
            weather_bottom: None,
            loaded_telemetry: None,
        }
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frame at the current playback position, clamped to the last frame
    pub fn current_frame(&self) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        let idx = (self.frame_index.max(0.) as usize).min(last);
        self.frames.get(idx)
    }

    pub fn driver_color(&self, code: &str) -> Color32 {
        self.driver_colors
            .get(code)
            .copied()
            .unwrap_or(Color32::GRAY)
    }

    pub fn driver_result(&self, code: &str) -> Option<&DriverResult> {
        self.results.iter().find(|r| r.code == code)
    }

    /// Replaces the playback frames with the driver's lap from the given qualifying
    /// segment and rewinds to its start.
    pub fn load_driver_telemetry(
        &mut self,
        code: &str,
        segment: QualifyingSegment,
    ) -> Result<(), ReplayError> {
        let lap = self
            .qualifying_laps
            .iter()
            .find(|l| l.code == code && l.segment == segment)
            .ok_or_else(|| ReplayError::TelemetryNotFound {
                code: code.to_string(),
                segment: segment.to_string(),
            })?;
        info!(
            "Loading {} telemetry for {} ({} frames)",
            segment,
            code,
            lap.frames.len()
        );
        self.frames = lap.frames.clone();
        self.frame_index = 0.;
        self.loaded_telemetry = Some((code.to_string(), segment));
        Ok(())
    }
}

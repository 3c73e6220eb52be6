mod loader;

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

pub use loader::load_replay_json;

use crate::{
    track::ReferenceLap,
    weather::{WeatherSnapshot, WeatherTable},
};

/// Position state of a single driver at one playback instant
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DriverState {
    /// World x coordinate
    pub x: f64,
    /// World y coordinate
    pub y: f64,
    /// Distance covered in the race in meters
    pub dist: f64,
    /// Normalized progress along the track, 1.0 once the driver is out
    pub rel_dist: f64,
    pub lap: u32,
    pub position: u32,
    /// Speed in km/h
    pub speed: f64,
    pub gear: u32,
    /// Raw DRS channel value
    pub drs: u32,
}

impl DriverState {
    pub fn is_out(&self) -> bool {
        self.rel_dist == 1.0
    }
}

/// One playback instant
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Frame {
    /// Seconds since the start of the replay
    pub t: f64,
    pub lap: u32,
    pub leader: Option<String>,
    pub drivers: HashMap<String, DriverState>,
    pub weather: Option<WeatherSnapshot>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualifyingSegment {
    Q1,
    Q2,
    Q3,
}

impl QualifyingSegment {
    pub const ALL: [QualifyingSegment; 3] = [Self::Q1, Self::Q2, Self::Q3];
}

impl Display for QualifyingSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Q1 => write!(f, "Q1"),
            Self::Q2 => write!(f, "Q2"),
            Self::Q3 => write!(f, "Q3"),
        }
    }
}

/// Classification of a driver, with the best lap time of each qualifying segment
/// they took part in.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DriverResult {
    pub code: String,
    pub full_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<u32>,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
}

impl DriverResult {
    pub fn segment_time(&self, segment: QualifyingSegment) -> Option<f64> {
        match segment {
            QualifyingSegment::Q1 => self.q1,
            QualifyingSegment::Q2 => self.q2,
            QualifyingSegment::Q3 => self.q3,
        }
    }

    /// Segments with a recorded time, in session order
    pub fn segments(&self) -> Vec<(QualifyingSegment, f64)> {
        QualifyingSegment::ALL
            .iter()
            .filter_map(|s| self.segment_time(*s).map(|t| (*s, t)))
            .collect()
    }

    /// Fastest lap across all segments
    pub fn best_time(&self) -> Option<f64> {
        self.segments()
            .into_iter()
            .map(|(_, t)| t)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Telemetry for one driver's lap in a qualifying segment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QualifyingLap {
    pub code: String,
    pub segment: QualifyingSegment,
    pub frames: Vec<Frame>,
}

/// Replay document as produced by the session export
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ReplayData {
    pub title: String,
    pub total_laps: Option<u32>,
    pub frames: Vec<Frame>,
    pub example_lap: ReferenceLap,
    pub driver_colors: HashMap<String, [u8; 3]>,
    pub driver_teams: HashMap<String, String>,
    pub driver_names: HashMap<String, String>,
    /// Headshot image URIs keyed by driver code
    pub driver_images: HashMap<String, String>,
    pub results: Vec<DriverResult>,
    pub weather: Option<WeatherTable>,
    /// Session time of the first frame, used to align weather samples
    pub global_t_min: f64,
    pub qualifying_laps: Vec<QualifyingLap>,
}

/// Formats a lap time in seconds as `M:SS.mmm`
pub fn format_lap_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "No Time".to_string();
    }
    let total_ms = (seconds * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}

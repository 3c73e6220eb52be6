// Weather resampling onto the playback timeline

use std::fmt::Display;

use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::ReplayError;

/// Interpolated rainfall at or above this value is reported as rain
pub const RAIN_THRESHOLD: f64 = 0.5;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Raw weather samples as recorded by the timing feed. Each metric is a column
/// aligned with `time`; a column that was never recorded is `None`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WeatherTable {
    /// Session time of each sample in seconds
    pub time: Vec<f64>,
    pub track_temp: Option<Vec<f64>>,
    pub air_temp: Option<Vec<f64>>,
    pub humidity: Option<Vec<f64>>,
    pub wind_speed: Option<Vec<f64>>,
    pub wind_direction: Option<Vec<f64>>,
    pub rainfall: Option<Vec<bool>>,
}

impl WeatherTable {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Weather metrics aligned 1:1 with the playback timeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherResampled {
    pub track_temp: Option<Vec<f64>>,
    pub air_temp: Option<Vec<f64>>,
    pub humidity: Option<Vec<f64>>,
    pub wind_speed: Option<Vec<f64>>,
    pub wind_direction: Option<Vec<f64>>,
    pub rainfall: Option<Vec<f64>>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RainState {
    #[default]
    Dry,
    Raining,
}

impl RainState {
    pub fn from_rainfall(rainfall: f64) -> Self {
        if rainfall >= RAIN_THRESHOLD {
            Self::Raining
        } else {
            Self::Dry
        }
    }
}

impl Display for RainState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dry => write!(f, "DRY"),
            Self::Raining => write!(f, "RAINING"),
        }
    }
}

/// Weather values for a single frame
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub track_temp: Option<f64>,
    pub air_temp: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub rain_state: RainState,
}

/// Resamples the weather table onto `timeline`.
///
/// Sample times are shifted by `global_t_min` so that they share the origin of the
/// timeline. Returns `None` when there is no weather data or it cannot be processed;
/// processing errors are logged rather than propagated.
pub fn resample_weather(
    table: Option<&WeatherTable>,
    timeline: &[f64],
    global_t_min: f64,
) -> Option<WeatherResampled> {
    let table = table.filter(|t| !t.is_empty())?;
    match try_resample_weather(table, timeline, global_t_min) {
        Ok(resampled) => Some(resampled),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

fn try_resample_weather(
    table: &WeatherTable,
    timeline: &[f64],
    global_t_min: f64,
) -> Result<WeatherResampled, ReplayError> {
    if table.time.iter().any(|t| !t.is_finite()) {
        return Err(ReplayError::WeatherDataError {
            reason: "sample times must be finite".to_string(),
        });
    }
    if timeline.iter().any(|t| t.is_nan()) {
        return Err(ReplayError::WeatherDataError {
            reason: "timeline contains NaN timestamps".to_string(),
        });
    }

    let order = (0..table.time.len())
        .sorted_by(|a, b| table.time[*a].total_cmp(&table.time[*b]))
        .collect_vec();
    let times = order
        .iter()
        .map(|i| table.time[*i] - global_t_min)
        .collect_vec();

    let resample = |name: &str, column: Option<Vec<f64>>| -> Result<Option<Vec<f64>>, ReplayError> {
        let Some(column) = column else {
            return Ok(None);
        };
        if column.len() != times.len() {
            return Err(ReplayError::WeatherDataError {
                reason: format!(
                    "{name} has {} samples but there are {} timestamps",
                    column.len(),
                    times.len()
                ),
            });
        }
        let values = order.iter().map(|i| column[*i]).collect_vec();
        Ok(Some(
            timeline
                .iter()
                .map(|t| interpolate(*t, &times, &values))
                .collect(),
        ))
    };

    let rainfall = table
        .rainfall
        .as_ref()
        .map(|r| r.iter().map(|v| if *v { 1.0 } else { 0.0 }).collect_vec());

    Ok(WeatherResampled {
        track_temp: resample("track_temp", table.track_temp.clone())?,
        air_temp: resample("air_temp", table.air_temp.clone())?,
        humidity: resample("humidity", table.humidity.clone())?,
        wind_speed: resample("wind_speed", table.wind_speed.clone())?,
        wind_direction: resample("wind_direction", table.wind_direction.clone())?,
        rainfall: resample("rainfall", rainfall)?,
    })
}

/// Piecewise linear interpolation of `(xp, fp)` at `x`, holding the edge values
/// outside of the sampled range. `xp` must be sorted and non-empty.
pub(crate) fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    let hi = xp.partition_point(|v| *v <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Extracts the weather for frame `i`. Returns `None` when there is no weather data
/// or the index is outside of the resampled series.
pub fn build_weather_snapshot(
    resampled: Option<&WeatherResampled>,
    i: usize,
) -> Option<WeatherSnapshot> {
    let weather = resampled?;
    match try_build_snapshot(weather, i) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Failed to attach weather data to frame {}: {}", i, e);
            None
        }
    }
}

fn try_build_snapshot(weather: &WeatherResampled, i: usize) -> Result<WeatherSnapshot, ReplayError> {
    let value_at = |name: &str, series: &Option<Vec<f64>>| -> Result<Option<f64>, ReplayError> {
        match series {
            None => Ok(None),
            Some(values) => values.get(i).copied().map(Some).ok_or_else(|| {
                ReplayError::WeatherDataError {
                    reason: format!("{name} has no sample at index {i}"),
                }
            }),
        }
    };

    let rainfall = value_at("rainfall", &weather.rainfall)?.unwrap_or(0.0);
    Ok(WeatherSnapshot {
        track_temp: value_at("track_temp", &weather.track_temp)?,
        air_temp: value_at("air_temp", &weather.air_temp)?,
        humidity: value_at("humidity", &weather.humidity)?,
        wind_speed: value_at("wind_speed", &weather.wind_speed)?,
        wind_direction: value_at("wind_direction", &weather.wind_direction)?,
        rain_state: RainState::from_rainfall(rainfall),
    })
}

/// Converts a wind direction in degrees to a 16-point compass label
pub fn format_wind_direction(degrees: Option<f64>) -> String {
    let Some(degrees) = degrees.filter(|d| d.is_finite()) else {
        return "N/A".to_string();
    };
    let normalized = degrees.rem_euclid(360.);
    let idx = ((normalized / 22.5) + 0.5) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[idx].to_string()
}

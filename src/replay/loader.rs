use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use itertools::Itertools;
use log::info;

use super::{Frame, ReplayData};
use crate::{
    ReplayError,
    weather::{WeatherTable, build_weather_snapshot, resample_weather},
};

pub fn load_replay_json(source_file: &Path) -> Result<ReplayData, ReplayError> {
    if !source_file.exists() {
        return Err(ReplayError::InvalidReplayFile {
            path: format!("{:?}", source_file),
        });
    }

    let file = File::open(source_file).map_err(|e| ReplayError::ReplayLoaderError { source: e })?;
    let mut data: ReplayData = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ReplayError::ReplayParseError { source: e })?;

    attach_weather(&mut data);

    info!(
        "Loaded {:?}: \"{}\" with {} frames, {} drivers and {} qualifying laps",
        source_file,
        data.title,
        data.frames.len(),
        data.driver_colors.len(),
        data.qualifying_laps.len()
    );
    Ok(data)
}

/// Fills in per-frame weather from the raw weather table when the export did not
/// already carry snapshots, for the race frames and every qualifying lap.
fn attach_weather(data: &mut ReplayData) {
    let weather = data.weather.as_ref();
    attach_frame_weather(&mut data.frames, weather, data.global_t_min);
    for lap in data.qualifying_laps.iter_mut() {
        attach_frame_weather(&mut lap.frames, weather, data.global_t_min);
    }
}

fn attach_frame_weather(
    frames: &mut [Frame],
    weather: Option<&WeatherTable>,
    global_t_min: f64,
) {
    if frames.iter().any(|f| f.weather.is_some()) {
        return;
    }
    let timeline = frames.iter().map(|f| f.t).collect_vec();
    let Some(resampled) = resample_weather(weather, &timeline, global_t_min) else {
        return;
    };
    for (i, frame) in frames.iter_mut().enumerate() {
        frame.weather = build_weather_snapshot(Some(&resampled), i);
    }
}

use serde::{Deserialize, Serialize};

use log::warn;

use crate::ReplayError;
use crate::track::DEFAULT_TRACK_WIDTH;

const CONFIG_DIR_NAME: &str = "race-replay";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_FPS: f64 = 25.;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PanelLayout {
    pub session_info_left: f32,
    pub session_info_top: f32,
    pub legend_x: f32,
    /// Distance of the legend title from the bottom of the window
    pub legend_bottom_offset: f32,
    pub weather_left: f32,
    pub weather_height: f32,
    pub weather_top_offset: f32,
    pub leaderboard_width: f32,
    /// Distance of the leaderboard's left edge from the right of the window
    pub leaderboard_right_margin: f32,
    pub driver_info_left: f32,
    pub driver_info_width: f32,
    pub driver_info_min_top: f32,
    pub modal_width: f32,
    pub modal_height: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            session_info_left: 20.,
            session_info_top: 40.,
            legend_x: 20.,
            legend_bottom_offset: 150.,
            weather_left: 20.,
            weather_height: 130.,
            weather_top_offset: 170.,
            leaderboard_width: 240.,
            leaderboard_right_margin: 260.,
            driver_info_left: 20.,
            driver_info_width: 300.,
            driver_info_min_top: 220.,
            modal_width: 400.,
            modal_height: 300.,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    pub track_width: f64,
    pub fps: f64,
    /// Circuit rotation in degrees
    pub circuit_rotation: f64,
    pub window_width: f32,
    pub window_height: f32,
    pub layout: PanelLayout,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            fps: DEFAULT_FPS,
            circuit_rotation: 0.,
            window_width: 1920.,
            window_height: 1200.,
            layout: PanelLayout::default(),
        }
    }
}

impl ReplayConfig {
    pub fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        Self::from_file(&config_path)
    }

    pub fn from_file(config_path: &std::path::Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| warn!("Could not open config file {:?}: {}", config_path, e))
            .ok()?;
        serde_json::from_reader(file)
            .map_err(|e| warn!("Could not parse config file {:?}: {}", config_path, e))
            .ok()
    }

    pub fn save(&self) -> Result<(), ReplayError> {
        let config_path = dirs::config_dir()
            .ok_or(ReplayError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), ReplayError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReplayError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| ReplayError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| ReplayError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = ReplayConfig {
            track_width: 150.,
            circuit_rotation: 92.,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = ReplayConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"fps": 50.0, "layout": {"modal_width": 500.0}}"#).unwrap();

        let loaded = ReplayConfig::from_file(&path).unwrap();
        assert_eq!(loaded.fps, 50.);
        assert_eq!(loaded.track_width, DEFAULT_TRACK_WIDTH);
        assert_eq!(loaded.layout.modal_width, 500.);
        assert_eq!(loaded.layout.modal_height, 300.);
    }

    #[test]
    fn test_unparseable_config_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(ReplayConfig::from_file(&path).is_none());
        assert!(ReplayConfig::from_file(&temp_dir.path().join("missing.json")).is_none());
    }
}

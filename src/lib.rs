// Library interface for race-replay
// This allows integration tests to access internal modules

pub mod config;
pub mod errors;
pub mod replay;
pub mod track;
pub mod ui;
pub mod weather;

// Re-export commonly used types
pub use config::ReplayConfig;
pub use errors::ReplayError;
pub use replay::{DriverResult, DriverState, Frame, QualifyingSegment, ReplayData};
pub use track::{TrackGeometry, build_track_from_example_lap};
pub use ui::{Component, DrawCommand, ReplayContext, ReplayMode, ReplayUi};
pub use weather::{WeatherSnapshot, build_weather_snapshot, resample_weather};

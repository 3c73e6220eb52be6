// Error types for race-replay

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum ReplayError {
    // Replay file errors
    #[snafu(display("Invalid replay file: {path}"))]
    InvalidReplayFile { path: String },
    #[snafu(display("Error loading replay file"))]
    ReplayLoaderError { source: io::Error },
    #[snafu(display("Error parsing replay file"))]
    ReplayParseError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Data derivation errors
    #[snafu(display("Weather data could not be processed: {reason}"))]
    WeatherDataError { reason: String },
    #[snafu(display("Track geometry could not be built: {reason}"))]
    TrackGeometryError { reason: String },

    // Window entry point errors
    #[snafu(display("No {segment} telemetry available for driver {code}"))]
    TelemetryNotFound { code: String, segment: String },
}

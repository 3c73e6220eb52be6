use std::path::PathBuf;

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{info, warn};

use race_replay::{
    ReplayConfig, ReplayContext, ReplayError, ReplayMode, ReplayUi, build_track_from_example_lap,
    replay::load_replay_json,
    ui::app::{Playback, ReplayApp},
};

const DEFAULT_TITLE: &str = "Race Replay";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Load {
        #[arg(short, long)]
        input: PathBuf,

        /// Circuit rotation in degrees
        #[arg(short, long)]
        rotation: Option<f64>,

        #[arg(short, long)]
        track_width: Option<f64>,

        /// Store the rotation and track width as the new defaults
        #[arg(long)]
        save_config: bool,
    },
}

fn load(
    input: &PathBuf,
    rotation: Option<f64>,
    track_width: Option<f64>,
    save_config: bool,
) -> Result<(), ReplayError> {
    let data = load_replay_json(input)?;

    let mut config = ReplayConfig::from_local_file().unwrap_or_default();
    if let Some(rotation) = rotation {
        config.circuit_rotation = rotation;
    }
    if let Some(track_width) = track_width {
        config.track_width = track_width;
    }
    if save_config {
        config.save()?;
        info!("Saved replay config");
    }

    let track = build_track_from_example_lap(&data.example_lap, config.track_width)
        .map_err(|e| warn!("Track outline unavailable: {}", e))
        .ok();
    let title = if data.title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        data.title.clone()
    };

    let window_size = Vec2::new(config.window_width, config.window_height);
    let replay = ReplayContext::from_replay(data, window_size);
    let ui = ReplayUi::new(ReplayMode::detect(&replay), &config, track);
    let playback = Playback::new(config.fps);

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options.viewport.with_inner_size(window_size);

    eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(ReplayApp::new(replay, ui, playback, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");
    match &cli.command {
        Commands::Load {
            input,
            rotation,
            track_width,
            save_config,
        } => {
            load(input, *rotation, *track_width, *save_config)
                .expect("Error while loading replay file");
        }
    };
}

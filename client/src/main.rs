mod graphics;
mod scene;
mod shaders;
mod sky;
mod ui;
mod water;

use std::path::PathBuf;

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*, window::PresentMode};
use clap::Parser;
use jets_core::{SceneConfig, CONFIG_LOAD_ERROR, DEFAULT_CONFIG_FILE, MISSING_GPU_MESSAGE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, help = "Scene configuration (RON)")]
    config: PathBuf,

    #[arg(
        short,
        long,
        help = "Allows overriding of the asset folder path from the configuration"
    )]
    assets_folder_path: Option<PathBuf>,

    #[arg(long, help = "Simulated time units per second for the sphere motion")]
    time_scale: Option<f64>,

    #[arg(long, help = "Reflect the sky on the sphere")]
    sphere_env_map: bool,

    #[arg(long, help = "Start with the performance overlay hidden")]
    hide_stats: bool,

    #[arg(long, help = "Write the effective configuration to --config and exit")]
    write_config: bool,
}

impl Args {
    fn apply(&self, config: &mut SceneConfig) {
        if let Some(folder) = &self.assets_folder_path {
            config.assets.folder = folder.clone();
        }
        if let Some(time_scale) = self.time_scale {
            config.sphere.motion.time_scale = time_scale;
        }
        if self.sphere_env_map {
            config.sphere.env_map = true;
        }
        if self.hide_stats {
            config.show_stats = false;
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut config = match SceneConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{CONFIG_LOAD_ERROR} from {}: {err}", args.config.display());
            std::process::exit(1);
        }
    };
    args.apply(&mut config);
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    if args.write_config {
        if let Err(err) = config.save(&args.config) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", args.config.display());
        return;
    }

    // Nothing of the scene is built without a usable adapter
    match graphics::probe_adapter() {
        Some(adapter) => println!("Rendering with {adapter}"),
        None => {
            eprintln!("{MISSING_GPU_MESSAGE}");
            std::process::exit(1);
        }
    }

    println!(
        "Starting Jets with assets from {}",
        config.assets.folder.display()
    );

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                file_path: config.assets.folder.to_string_lossy().into_owned(),
                ..Default::default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Jets".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            }),
    );

    app.add_plugins(FrameTimeDiagnosticsPlugin::default())
        .insert_resource(config)
        .add_plugins((
            shaders::ShadersPlugin,
            scene::DirectorPlugin,
            sky::SkyboxPlugin,
            water::WaterPlugin,
            ui::StatsPlugin,
        ))
        .run();
}

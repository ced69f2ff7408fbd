//! Moonslide 2D
//!
//! Tap (or click) to slide the moon around and catch the stars before
//! more than twenty of them crowd the sky.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::WindowMode;

use moonslide::GameConfig;

use game::GamePlugin;
use ui::UiPlugin;

/// Config file looked up in the working directory.
const CONFIG_PATH: &str = "moonslide.json";

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    GameOver,
}

/// Loaded configuration, plus the load error if defaults were used instead.
#[derive(Resource)]
pub struct GameSettings {
    pub config: GameConfig,
    pub load_error: Option<String>,
}

fn main() {
    let settings = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => GameSettings { config, load_error: None },
        Err(e) => GameSettings {
            config: GameConfig::default(),
            load_error: Some(e.to_string()),
        },
    };
    let field = settings.config.playfield;
    let tick_rate = settings.config.tick_rate_hz;

    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Moonslide".into(),
                resolution: (field.width, field.height).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        // Game loop runs on the fixed timestep
        .insert_resource(Time::<Fixed>::from_hz(tick_rate as f64))
        .insert_resource(settings)
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            GamePlugin,
            UiPlugin,
        ))
        // Startup
        .add_systems(Startup, (report_config, setup_2d_camera))
        .run();
}

fn report_config(settings: Res<GameSettings>) {
    match &settings.load_error {
        Some(e) => warn!("Ignoring {}: {}; using defaults", CONFIG_PATH, e),
        None => info!("Config ready ({} Hz fixed tick)", settings.config.tick_rate_hz),
    }
}

/// 2D camera framing the whole playfield
fn setup_2d_camera(mut commands: Commands, settings: Res<GameSettings>) {
    let field = settings.config.playfield;

    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.94, 0.94, 0.96)), // Pale grey sky
            ..default()
        },
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: field.width,
                min_height: field.height,
            },
            ..OrthographicProjection::default_2d()
        },
    ));

    info!("Moonslide initialized!");
}

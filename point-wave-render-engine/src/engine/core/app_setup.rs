// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::WAVE_CONFIG_EXTENSION;
use constants::render_settings::CLEAR_COLOUR;

// Crate engine modules
use crate::engine::camera::orbit_controls::{
    OrbitControls, orbit_controls_input, orbit_controls_update, spawn_orbit_camera,
};
use crate::engine::config::wave_config::{WaveConfig, apply_wave_config_changes};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::shaders::PointSpriteMaterial;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::loading_overlay::{despawn_loading_overlay, spawn_loading_overlay};
use crate::engine::wave::frame_updater::{
    WaveClock, advance_wave_surface, upload_surface_positions,
};

// Loading pipeline
use crate::engine::loading::config_loader::{ConfigLoader, resolve_config_system, start_loading};
use crate::engine::loading::progress::{LoadingProgress, notify_loading_progress};
use crate::engine::loading::surface_creator::create_surface_when_ready;
use crate::engine::loading::texture_loader::{PointTexture, check_texture_loading};

// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{create_native_overlays, fps_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    let [r, g, b] = CLEAR_COLOUR;

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<PointSpriteMaterial> {
            // Custom vertex layout; the sprites neither cast shadows nor need a prepass.
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers WaveConfig as a loadable asset type from *.wave.json files.
        .add_plugins(JsonAssetPlugin::<WaveConfig>::new(&[WAVE_CONFIG_EXTENSION]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::srgb(r, g, b)));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<PointTexture>()
        .init_resource::<WaveConfig>()
        .init_resource::<WaveClock>()
        .init_resource::<OrbitControls>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                resolve_config_system,
                check_texture_loading,
                create_surface_when_ready,
                transition_to_running,
                notify_loading_progress,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnExit(AppState::Loading), despawn_loading_overlay);

    // Camera controls stay live while loading and when the surface is unavailable.
    app.add_systems(Update, (orbit_controls_input, orbit_controls_update).chain());

    let runtime_systems = (
        apply_wave_config_changes,
        advance_wave_surface,
        upload_surface_positions,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)))
        .add_systems(
            Update,
            fps_notification_system.run_if(in_state(AppState::Running)),
        );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, controls: Res<OrbitControls>) {
    spawn_orbit_camera(&mut commands, &controls);
    spawn_loading_overlay(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "info,wgpu=error,naga=warn".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(create_asset_plugin())
        .set(log_config)
}

/// Asset sources for the app. Native builds watch the asset folder so edits
/// to the wave config apply while running.
pub fn create_asset_plugin() -> AssetPlugin {
    AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        watch_for_changes_override: Some(cfg!(not(target_arch = "wasm32"))),
        ..default()
    }
}

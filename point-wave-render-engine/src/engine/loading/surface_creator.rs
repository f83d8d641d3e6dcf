use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use crate::engine::config::wave_config::WaveConfig;
use crate::engine::loading::progress::{LoadingProgress, TextureLoadState};
use crate::engine::loading::texture_loader::PointTexture;
use crate::engine::mesh::point_sprite_mesh::{WavePoints, create_point_sprite_mesh};
use crate::engine::shaders::PointSpriteMaterial;
use crate::engine::wave::frame_updater::WaveSurface;
use crate::rpc::web_rpc::WebRpcInterface;

pub fn create_surface_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
    texture: Res<PointTexture>,
    config: Res<WaveConfig>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.is_settled() {
        return;
    }

    match loading_progress.texture {
        TextureLoadState::Pending => {}
        TextureLoadState::Failed => {
            // Only the point cloud is lost; camera and page keep running.
            warn!("Point cloud skipped: sprite texture unavailable");
            rpc_interface.send_notification(
                "surface_unavailable",
                serde_json::json!({
                    "reason": "texture_load_failed",
                    "texture_path": config.texture_path,
                }),
            );
            loading_progress.surface_unavailable = true;
        }
        TextureLoadState::Loaded => {
            let sprite_texture = texture.handle.clone().unwrap_or_default();
            let surface = spawn_wave_points(
                &mut commands,
                &mut meshes,
                &mut materials,
                sprite_texture,
                &config,
            );

            rpc_interface.send_notification(
                "surface_ready",
                serde_json::json!({
                    "points": config.grid.point_count(),
                }),
            );
            commands.insert_resource(surface);
            loading_progress.surface_created = true;
        }
    }
}

/// Generate the surface, spawn its point cloud and return the owned handles
/// the frame updater works with.
pub fn spawn_wave_points(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointSpriteMaterial>,
    sprite_texture: Handle<Image>,
    config: &WaveConfig,
) -> WaveSurface {
    let mut surface = WaveSurface::new(config.grid, config.wave, Handle::default());
    let mesh = meshes.add(create_point_sprite_mesh(surface.buffer_mut()));
    let material = materials.add(PointSpriteMaterial::new(sprite_texture, &config.points));
    surface.mesh = mesh.clone();

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        Visibility::Visible,
        // Heights change every frame, so the initial bounds go stale.
        NoFrustumCulling,
        NotShadowCaster,
        WavePoints,
    ));

    info!(
        "Wave surface spawned with {} points ({} per axis)",
        config.grid.point_count(),
        config.grid.count
    );

    surface
}

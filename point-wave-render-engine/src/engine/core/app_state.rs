use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct LoadingOverlay;

// Leave Loading once the surface exists or is known to be unavailable
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.is_settled() {
        return;
    }

    if loading_progress.surface_created {
        info!("→ Surface ready, transitioning to Running state");
    } else {
        warn!("→ Running without a surface");
    }
    next_state.set(AppState::Running);
}

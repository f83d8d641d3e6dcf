use bevy::prelude::*;

use crate::engine::core::app_state::LoadingOverlay;

/// Generic fallback shown until the surface settles.
pub fn spawn_loading_overlay(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            LoadingOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading ... "),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn despawn_loading_overlay(
    mut commands: Commands,
    overlays: Query<Entity, With<LoadingOverlay>>,
) {
    for overlay in &overlays {
        commands.entity(overlay).despawn();
    }
}

use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::Projection;
use bevy::window::PrimaryWindow;
use constants::camera::{
    CAMERA_FAR, CAMERA_NEAR, MAX_DISTANCE, MIN_DISTANCE, PAN_SPEED, PIXELS_PER_WHEEL_STEP,
    POLAR_EPSILON, ROTATE_SPEED, ZOOM_SPEED,
};

use crate::engine::config::wave_config::CameraConfig;

/// Pointer gesture currently steering the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Orbit camera around a target point, in spherical coordinates.
///
/// Input accumulates into pending deltas; `update` applies them once per frame
/// together with auto-rotation, then yields the camera transform.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    /// Vertical field of view in radians, used to scale panning.
    pub fov: f32,
    pub auto_rotate: bool,
    /// Full orbits per minute; negative reverses the direction.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_rotation: Vec2,
    pending_scale: f32,
    pending_pan: Vec3,
    drag: Option<DragMode>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitControls {
    /// Controls whose camera starts at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius == 0.0 {
            (0.0, 0.0)
        } else {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        };

        Self {
            target,
            radius,
            theta,
            phi,
            fov: fov_degrees.to_radians(),
            auto_rotate: false,
            auto_rotate_speed: 0.0,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
            enable_damping: false,
            damping_factor: 0.0,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            pending_rotation: Vec2::ZERO,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
            drag: None,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut controls = Self::from_position(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
            config.fov_degrees,
        );
        controls.apply_behaviour(config);
        controls
    }

    /// Take over rotation and damping settings without moving the camera.
    pub fn apply_behaviour(&mut self, config: &CameraConfig) {
        self.auto_rotate = config.auto_rotate;
        self.auto_rotate_speed = config.auto_rotate_speed;
        self.enable_damping = config.enable_damping;
        self.damping_factor = config.damping_factor;
    }

    pub fn set_auto_rotate(&mut self, enabled: Option<bool>, speed: Option<f32>) {
        if let Some(enabled) = enabled {
            self.auto_rotate = enabled;
        }
        if let Some(speed) = speed {
            self.auto_rotate_speed = speed;
        }
    }

    pub fn begin_drag(&mut self, mode: DragMode) {
        self.drag = Some(mode);
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag
    }

    /// Positive angles swing the camera clockwise when seen from above.
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_rotation.x -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_rotation.y -= angle;
    }

    /// Pointer drag in pixels; a drag across the full viewport height is one
    /// full turn at unit rotate speed.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * delta.x / viewport_height * self.rotate_speed);
        self.rotate_up(TAU * delta.y / viewport_height * self.rotate_speed);
    }

    /// Wheel input in steps; positive steps move towards the target.
    pub fn dolly(&mut self, steps: f32) {
        if steps == 0.0 {
            return;
        }
        let factor = 0.95_f32.powf(self.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.pending_scale *= factor;
        } else {
            self.pending_scale /= factor;
        }
    }

    /// Pointer drag in pixels, moving the target in the camera's screen plane
    /// so the surface follows the pointer.
    pub fn pan_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = self.radius * (self.fov / 2.0).tan();
        let transform = self.camera_transform();
        let left = 2.0 * delta.x * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * delta.y * target_distance / viewport_height * self.pan_speed;
        self.pending_pan -= *transform.right() * left;
        self.pending_pan += *transform.up() * up;
    }

    /// Auto-rotation angle for a frame lasting `delta_secs`.
    pub fn auto_rotation_angle(&self, delta_secs: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * delta_secs
    }

    /// Apply auto-rotation and pending input. Called exactly once per frame.
    pub fn update(&mut self, delta_secs: f32) -> Transform {
        if self.auto_rotate && self.drag.is_none() {
            self.rotate_left(self.auto_rotation_angle(delta_secs));
        }

        let blend = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.theta = (self.theta + self.pending_rotation.x * blend).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_rotation.y * blend).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * blend;

        if self.enable_damping {
            self.pending_rotation *= 1.0 - self.damping_factor;
            self.pending_pan *= 1.0 - self.damping_factor;
        } else {
            self.pending_rotation = Vec2::ZERO;
            self.pending_pan = Vec3::ZERO;
        }
        self.pending_scale = 1.0;

        self.camera_transform()
    }

    pub fn camera_position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.camera_position()).looking_at(self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Projection {
        Projection::Perspective(PerspectiveProjection {
            fov: self.fov,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        })
    }
}

#[derive(Component)]
pub struct OrbitCamera;

/// Spawn the camera for the current controls.
pub fn spawn_orbit_camera(commands: &mut Commands, controls: &OrbitControls) {
    commands.spawn((
        Camera3d::default(),
        controls.projection(),
        controls.camera_transform(),
        OrbitCamera,
    ));
}

/// Translate pointer input into pending orbit motion.
/// Left drag rotates, right drag pans, the wheel dollies.
pub fn orbit_controls_input(
    mut controls: ResMut<OrbitControls>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        controls.begin_drag(DragMode::Rotate);
    } else if mouse_button.just_pressed(MouseButton::Right) {
        controls.begin_drag(DragMode::Pan);
    }

    let released = match controls.drag_mode() {
        Some(DragMode::Rotate) => !mouse_button.pressed(MouseButton::Left),
        Some(DragMode::Pan) => !mouse_button.pressed(MouseButton::Right),
        None => false,
    };
    if released {
        controls.end_drag();
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let viewport_height = windows
        .single()
        .map(|window| window.height())
        .unwrap_or_default();

    if mouse_delta != Vec2::ZERO {
        match controls.drag_mode() {
            Some(DragMode::Rotate) => controls.rotate_by_pixels(mouse_delta, viewport_height),
            Some(DragMode::Pan) => controls.pan_by_pixels(mouse_delta, viewport_height),
            None => {}
        }
    }

    let mut steps = 0.0;
    for ev in scroll_events.read() {
        steps += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_WHEEL_STEP,
        };
    }
    controls.dolly(steps);
}

/// Per-frame controls update, independent of the wave surface.
pub fn orbit_controls_update(
    mut controls: ResMut<OrbitControls>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<OrbitCamera>>,
) {
    let transform = controls.update(time.delta_secs());
    if let Ok(mut camera_transform) = camera_query.single_mut() {
        *camera_transform = transform;
    }
}

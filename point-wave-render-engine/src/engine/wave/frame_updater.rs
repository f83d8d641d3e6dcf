use bevy::prelude::*;
use constants::wave::TICK_STEP;

use super::grid::GridParams;
use super::height::WaveParams;
use super::position_buffer::{PositionBuffer, SurfaceCache};
use crate::engine::mesh::point_sprite_mesh::write_sprite_positions;

/// Discrete animation time. Advances by a fixed step per rendered frame, so
/// the wave speed follows the display rate.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WaveClock {
    tick: f64,
    step: f64,
    frames: u64,
}

impl Default for WaveClock {
    fn default() -> Self {
        Self::new(TICK_STEP)
    }
}

impl WaveClock {
    pub fn new(step: f64) -> Self {
        Self {
            tick: 0.0,
            step,
            frames: 0,
        }
    }

    /// Advance one frame and return the new tick.
    pub fn advance(&mut self) -> f64 {
        self.tick += self.step;
        self.frames += 1;
        self.tick
    }

    pub fn tick(&self) -> f64 {
        self.tick
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Change the per-frame step without resetting elapsed ticks.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }
}

/// Owned handles of the live surface: parameters, CPU-side positions and the
/// mesh they are uploaded to. Only inserted once the point cloud exists.
#[derive(Resource, Debug)]
pub struct WaveSurface {
    grid: GridParams,
    wave: WaveParams,
    cache: SurfaceCache,
    pub mesh: Handle<Mesh>,
}

impl WaveSurface {
    pub fn new(grid: GridParams, wave: WaveParams, mesh: Handle<Mesh>) -> Self {
        let mut cache = SurfaceCache::default();
        cache.positions(&grid, &wave);
        Self {
            grid,
            wave,
            cache,
            mesh,
        }
    }

    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    pub fn wave(&self) -> &WaveParams {
        &self.wave
    }

    pub fn buffer(&self) -> Option<&PositionBuffer> {
        self.cache.current()
    }

    pub fn buffer_mut(&mut self) -> &mut PositionBuffer {
        self.cache.positions_mut(&self.grid, &self.wave)
    }

    pub fn generations(&self) -> u32 {
        self.cache.generations()
    }

    /// Swap in new parameters. Returns true when the buffer was regenerated,
    /// in which case the mesh must be rebuilt to match its new length.
    pub fn reconfigure(&mut self, grid: GridParams, wave: WaveParams) -> bool {
        let before = self.cache.generations();
        self.grid = grid;
        self.wave = wave;
        self.cache.positions(&self.grid, &self.wave);
        self.cache.generations() != before
    }

    /// Recompute every height for `tick` and flag the buffer for upload.
    pub fn rewrite_heights(&mut self, tick: f64) {
        let grid = self.grid;
        let wave = self.wave;
        rewrite_heights(self.buffer_mut(), &grid, &wave, tick);
    }
}

/// Overwrite the y component of every cell, walking the same order the
/// buffer was generated in. x and z are recomputed, never read back.
pub fn rewrite_heights(buffer: &mut PositionBuffer, grid: &GridParams, wave: &WaveParams, tick: f64) {
    let data = buffer.as_mut_slice();
    for cell in grid.cells() {
        if let Some(y) = data.get_mut(cell.offset + 1) {
            *y = wave.height_f32(cell.x, cell.z, tick);
        }
    }
    buffer.mark_needs_update();
}

/// Per-frame tick advance and height rewrite.
///
/// The tick always advances; without a surface there is nothing else to do.
pub fn advance_wave_surface(mut clock: ResMut<WaveClock>, surface: Option<ResMut<WaveSurface>>) {
    let tick = clock.advance();

    let Some(mut surface) = surface else {
        return;
    };

    surface.rewrite_heights(tick);
}

/// Copy flagged positions into the sprite mesh. `Assets::get_mut` marks the
/// mesh modified, which re-extracts it to the GPU before the next draw.
pub fn upload_surface_positions(
    surface: Option<ResMut<WaveSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut surface) = surface else {
        return;
    };

    if !surface.buffer().is_some_and(PositionBuffer::needs_update) {
        return;
    }

    let Some(mesh) = meshes.get_mut(&surface.mesh) else {
        return;
    };

    let buffer = surface.buffer_mut();
    if write_sprite_positions(mesh, buffer) {
        buffer.take_needs_update();
    } else {
        warn!(
            "Sprite mesh does not match surface of {} points; skipping upload",
            buffer.point_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mesh::point_sprite_mesh::create_point_sprite_mesh;
    use bevy::render::mesh::VertexAttributeValues;

    fn two_by_two() -> (GridParams, WaveParams) {
        (GridParams::new(2, 3.0).unwrap(), WaveParams::default())
    }

    fn build_app(with_surface: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<WaveClock>();
        app.init_resource::<Assets<Mesh>>();

        if with_surface {
            let (grid, wave) = two_by_two();
            let mesh = create_point_sprite_mesh(&PositionBuffer::generate(&grid, &wave));
            let handle = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
            app.insert_resource(WaveSurface::new(grid, wave, handle));
        }

        app.add_systems(Update, (advance_wave_surface, upload_surface_positions).chain());
        app
    }

    fn mesh_positions(app: &App) -> Vec<[f32; 3]> {
        let surface = app.world().resource::<WaveSurface>();
        let meshes = app.world().resource::<Assets<Mesh>>();
        meshes
            .get(&surface.mesh)
            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_POSITION))
            .and_then(VertexAttributeValues::as_float3)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = WaveClock::default();
        let mut previous = clock.tick();
        for frame in 1..=10 {
            let tick = clock.advance();
            assert_eq!(tick - previous, 15.0);
            assert_eq!(clock.frames(), frame);
            previous = tick;
        }
        assert_eq!(clock.tick(), 150.0);
    }

    #[test]
    fn rewrite_keeps_planar_coordinates() {
        let (grid, wave) = two_by_two();
        let mut buffer = PositionBuffer::generate(&grid, &wave);
        let planar_before: Vec<(f32, f32)> = buffer.points().map(|p| (p[0], p[2])).collect();

        rewrite_heights(&mut buffer, &grid, &wave, 15.0);

        let planar_after: Vec<(f32, f32)> = buffer.points().map(|p| (p[0], p[2])).collect();
        assert_eq!(planar_before, planar_after);
        assert_eq!(buffer.len(), 12);

        let corner = buffer.point(&grid, 0, 0).unwrap();
        let expected = 3.0 * (0.002_f64 * 33.0).sin();
        assert!((f64::from(corner[1]) - expected).abs() < 1e-6);
        assert!((corner[1] - 0.1979).abs() < 1e-3);
    }

    #[test]
    fn rewrite_at_tick_zero_reproduces_generation() {
        let (grid, wave) = two_by_two();
        let generated = PositionBuffer::generate(&grid, &wave);
        let mut rewritten = generated.clone();
        rewrite_heights(&mut rewritten, &grid, &wave, 0.0);
        assert_eq!(generated.as_slice(), rewritten.as_slice());
    }

    #[test]
    fn frame_updates_buffer_and_mesh() {
        let mut app = build_app(true);
        app.update();

        assert_eq!(app.world().resource::<WaveClock>().tick(), 15.0);

        let surface = app.world().resource::<WaveSurface>();
        let buffer = surface.buffer().unwrap();
        assert_eq!(buffer.update_count(), 1);
        assert!(!buffer.needs_update());

        let grid = *surface.grid();
        let wave = *surface.wave();
        for cell in grid.cells() {
            let y = buffer.as_slice()[cell.offset + 1];
            assert_eq!(y, wave.height_f32(cell.x, cell.z, 15.0));
        }

        let positions = mesh_positions(&app);
        let first = buffer.points().next().unwrap();
        assert!(positions[..4].iter().all(|vertex| *vertex == first));
    }

    #[test]
    fn buffer_is_flagged_once_per_frame() {
        let mut app = build_app(true);
        for _ in 0..3 {
            app.update();
        }

        let surface = app.world().resource::<WaveSurface>();
        assert_eq!(surface.buffer().unwrap().update_count(), 3);
        assert_eq!(surface.generations(), 1);
        assert_eq!(app.world().resource::<WaveClock>().tick(), 45.0);
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut app = build_app(false);
        app.update();
        app.update();

        assert_eq!(app.world().resource::<WaveClock>().frames(), 2);
        assert!(app.world().get_resource::<WaveSurface>().is_none());
    }

    #[test]
    fn reconfigure_regenerates_only_on_change() {
        let (grid, wave) = two_by_two();
        let mut surface = WaveSurface::new(grid, wave, Handle::default());
        surface.rewrite_heights(15.0);

        assert!(!surface.reconfigure(grid, wave));
        assert_eq!(surface.buffer().unwrap().update_count(), 1);

        let wider = GridParams::new(4, 3.0).unwrap();
        assert!(surface.reconfigure(wider, wave));
        assert_eq!(surface.buffer().unwrap().len(), 48);
        assert_eq!(surface.buffer().unwrap().update_count(), 0);
    }
}

use super::grid::GridParams;
use super::height::WaveParams;

/// Memoisation key of a generated surface. Floats compare by bit pattern so
/// the key is `Eq` and any parameter change, however small, regenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceKey {
    count: u32,
    spacing: u32,
    frequency: u64,
    amplitude: u64,
}

impl SurfaceKey {
    pub fn new(grid: &GridParams, wave: &WaveParams) -> Self {
        Self {
            count: grid.count,
            spacing: grid.spacing.to_bits(),
            frequency: wave.frequency.to_bits(),
            amplitude: wave.amplitude.to_bits(),
        }
    }
}

/// Flat xyz triples for every grid point, laid out in `GridParams::cells`
/// order. x and z are fixed at generation; only y is rewritten afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionBuffer {
    data: Vec<f32>,
    key: SurfaceKey,
    needs_update: bool,
    update_count: u64,
}

impl PositionBuffer {
    /// Build the surface at tick 0.
    pub fn generate(grid: &GridParams, wave: &WaveParams) -> Self {
        let mut data = Vec::with_capacity(grid.buffer_len());
        for cell in grid.cells() {
            data.extend_from_slice(&[cell.x, wave.height_f32(cell.x, cell.z, 0.0), cell.z]);
        }

        Self {
            data,
            key: SurfaceKey::new(grid, wave),
            needs_update: false,
            update_count: 0,
        }
    }

    pub fn key(&self) -> SurfaceKey {
        self.key
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable view used by the frame updater. Length cannot change.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn point_count(&self) -> usize {
        self.len() / 3
    }

    /// Triple stored for cell (i, j).
    pub fn point(&self, grid: &GridParams, i: u32, j: u32) -> Option<[f32; 3]> {
        let offset = grid.offset(i, j);
        self.data
            .get(offset..offset + 3)
            .map(|xyz| [xyz[0], xyz[1], xyz[2]])
    }

    pub fn points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data.chunks_exact(3).map(|xyz| [xyz[0], xyz[1], xyz[2]])
    }

    /// Flag the contents as changed so the next upload copies them to the mesh.
    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
        self.update_count += 1;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Clear the flag, returning whether it was set.
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }

    /// Number of times the buffer has been marked since generation.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

/// Holds the last generated buffer and only regenerates it when the grid or
/// wave parameters change.
#[derive(Debug, Default)]
pub struct SurfaceCache {
    buffer: Option<PositionBuffer>,
    generations: u32,
}

impl SurfaceCache {
    pub fn positions(&mut self, grid: &GridParams, wave: &WaveParams) -> &PositionBuffer {
        self.positions_mut(grid, wave)
    }

    /// As `positions`, but mutable so the frame updater can rewrite heights in
    /// place without breaking the memoisation.
    pub fn positions_mut(&mut self, grid: &GridParams, wave: &WaveParams) -> &mut PositionBuffer {
        let key = SurfaceKey::new(grid, wave);
        if self.buffer.as_ref().map(PositionBuffer::key) != Some(key) {
            self.buffer = Some(PositionBuffer::generate(grid, wave));
            self.generations += 1;
        }
        self.buffer
            .get_or_insert_with(|| PositionBuffer::generate(grid, wave))
    }

    /// Last generated buffer, if any.
    pub fn current(&self) -> Option<&PositionBuffer> {
        self.buffer.as_ref()
    }

    /// How many times a buffer has been generated.
    pub fn generations(&self) -> u32 {
        self.generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> (GridParams, WaveParams) {
        (GridParams::new(2, 3.0).unwrap(), WaveParams::default())
    }

    #[test]
    fn generates_expected_triples() {
        let (grid, wave) = two_by_two();
        let buffer = PositionBuffer::generate(&grid, &wave);
        assert_eq!(buffer.len(), 12);

        let planar: Vec<(f32, f32)> = buffer.points().map(|p| (p[0], p[2])).collect();
        assert_eq!(planar, vec![(-3.0, -3.0), (-3.0, 0.0), (0.0, -3.0), (0.0, 0.0)]);

        for p in buffer.points() {
            let expected = 3.0 * (0.002 * f64::from(p[0] * p[0] + p[2] * p[2])).sin();
            assert!((f64::from(p[1]) - expected).abs() < 1e-6);
        }

        let corner = buffer.point(&grid, 0, 0).unwrap();
        assert!((corner[1] - 0.108).abs() < 1e-3);
        assert_eq!(buffer.point(&grid, 1, 1).unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn length_is_three_n_squared() {
        for count in [1, 2, 5, 100] {
            let grid = GridParams::new(count, 3.0).unwrap();
            let buffer = PositionBuffer::generate(&grid, &WaveParams::default());
            assert_eq!(buffer.len(), 3 * (count as usize).pow(2));
        }
    }

    #[test]
    fn fresh_buffer_is_clean() {
        let (grid, wave) = two_by_two();
        let mut buffer = PositionBuffer::generate(&grid, &wave);
        assert!(!buffer.needs_update());
        buffer.mark_needs_update();
        assert!(buffer.take_needs_update());
        assert!(!buffer.take_needs_update());
        assert_eq!(buffer.update_count(), 1);
    }

    #[test]
    fn cache_reuses_until_parameters_change() {
        let (grid, wave) = two_by_two();
        let mut cache = SurfaceCache::default();

        cache.positions(&grid, &wave);
        cache.positions(&grid, &wave);
        assert_eq!(cache.generations(), 1);

        let louder = WaveParams::new(0.002, 4.0).unwrap();
        assert_eq!(cache.positions(&grid, &louder).key(), SurfaceKey::new(&grid, &louder));
        assert_eq!(cache.generations(), 2);

        let wider = GridParams::new(3, 3.0).unwrap();
        assert_eq!(cache.positions(&wider, &louder).len(), 27);
        assert_eq!(cache.generations(), 3);
    }
}

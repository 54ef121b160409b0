//! Dense per-vertex height storage with world-space queries.

/// Slope is measured against this fraction of the amplitude
const SLOPE_REFERENCE: f32 = 0.1;

/// 2D grid of vertex heights indexed `[x][z]`.
///
/// The grid covers a terrain centred on the origin, spanning
/// `[-width/2, width/2]` along X and `[-depth/2, depth/2]` along Z.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    columns: usize,
    rows: usize,
    width: f32,
    depth: f32,
    data: Vec<f32>,
}

impl HeightGrid {
    /// Flat grid of `columns x rows` vertices
    pub fn new(columns: usize, rows: usize, width: f32, depth: f32) -> Self {
        Self {
            columns,
            rows,
            width,
            depth,
            data: vec![0.0; columns * rows],
        }
    }

    /// Vertices along X
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Vertices along Z
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        x * self.rows + z
    }

    /// Height at grid vertex, `None` outside the grid
    pub fn get(&self, x: usize, z: usize) -> Option<f32> {
        (x < self.columns && z < self.rows).then(|| self.data[self.index(x, z)])
    }

    /// Height at grid vertex, 0 outside the grid
    pub fn height_or_zero(&self, x: usize, z: usize) -> f32 {
        self.get(x, z).unwrap_or(0.0)
    }

    /// Panics if `(x, z)` is outside the grid.
    pub fn set(&mut self, x: usize, z: usize, height: f32) {
        assert!(x < self.columns && z < self.rows, "({}, {}) outside height grid", x, z);
        let i = self.index(x, z);
        self.data[i] = height;
    }

    /// Raw heights, column-major (`x * rows + z`)
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// (min, max) over all vertices
    pub fn min_max(&self) -> (f32, f32) {
        self.data.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        })
    }

    /// Whether the vertex lies on the outer ring of the grid
    pub fn is_border(&self, x: usize, z: usize) -> bool {
        x == 0 || z == 0 || x >= self.columns.saturating_sub(1) || z >= self.rows.saturating_sub(1)
    }

    /// Normalized gradient magnitude from the four orthogonal neighbours.
    ///
    /// Border vertices and zero amplitude give 0. The result is capped at 1.
    pub fn slope_at(&self, x: usize, z: usize, amplitude: f32) -> f32 {
        if amplitude <= 0.0 || self.is_border(x, z) {
            return 0.0;
        }
        let left = self.data[self.index(x - 1, z)];
        let right = self.data[self.index(x + 1, z)];
        let top = self.data[self.index(x, z - 1)];
        let bottom = self.data[self.index(x, z + 1)];

        let dx = (right - left).abs() / 2.0;
        let dz = (bottom - top).abs() / 2.0;

        ((dx * dx + dz * dz).sqrt() / (amplitude * SLOPE_REFERENCE)).min(1.0)
    }

    /// Continuous grid coordinates for a world position, `None` when outside
    fn grid_coords(&self, world_x: f32, world_z: f32) -> Option<(f32, f32)> {
        let segments_x = (self.columns.max(2) - 1) as f32;
        let segments_z = (self.rows.max(2) - 1) as f32;
        let u = (world_x + self.width * 0.5) / self.width * segments_x;
        let v = (world_z + self.depth * 0.5) / self.depth * segments_z;
        let inside = (0.0..=segments_x).contains(&u) && (0.0..=segments_z).contains(&v);
        inside.then_some((u, v))
    }

    /// Height of the cell whose lower corner contains the world position.
    ///
    /// Positions outside the grid, including the far edge, return 0.
    pub fn cell_height_at(&self, world_x: f32, world_z: f32) -> f32 {
        match self.grid_coords(world_x, world_z) {
            Some((u, v)) => {
                let (x, z) = (u.floor() as usize, v.floor() as usize);
                if x >= self.columns.saturating_sub(1) || z >= self.rows.saturating_sub(1) {
                    0.0
                } else {
                    self.data[self.index(x, z)]
                }
            }
            None => 0.0,
        }
    }

    /// Bilinearly interpolated surface height; 0 outside the grid
    pub fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        let Some((u, v)) = self.grid_coords(world_x, world_z) else {
            return 0.0;
        };
        if self.columns < 2 || self.rows < 2 {
            return self.height_or_zero(0, 0);
        }
        let x0 = (u.floor() as usize).min(self.columns - 2);
        let z0 = (v.floor() as usize).min(self.rows - 2);
        let fx = u - x0 as f32;
        let fz = v - z0 as f32;

        let h00 = self.data[self.index(x0, z0)];
        let h10 = self.data[self.index(x0 + 1, z0)];
        let h01 = self.data[self.index(x0, z0 + 1)];
        let h11 = self.data[self.index(x0 + 1, z0 + 1)];

        let near = h00 + (h10 - h00) * fx;
        let far = h01 + (h11 - h01) * fx;
        near + (far - near) * fz
    }
}

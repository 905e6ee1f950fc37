#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub n: usize, // Number of points along each axis (grids are square)
    pub dx: f64,  // Grid spacing in x
    pub dy: f64,  // Grid spacing in y
}

impl Grid {
    pub fn new(n: usize, dx: f64, dy: f64) -> Self {
        Grid { n, dx, dy }
    }

    /// Square grid with unit spacing, the default geometry.
    pub fn square(n: usize) -> Self {
        Grid::new(n, 1.0, 1.0)
    }

    /// Index of the central cell, where the initial impulse lands.
    pub fn center(&self) -> (usize, usize) {
        (self.n / 2, self.n / 2)
    }

    pub fn in_bounds(&self, i: usize, j: usize) -> bool {
        i < self.n && j < self.n
    }

    pub fn n_cells(&self) -> usize {
        self.n * self.n
    }
}

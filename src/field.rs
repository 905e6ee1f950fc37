use ndarray::Array2;

use crate::error::EngineError;
use crate::grid::Grid;

/// Default magnitude of the central disturbance seeded into `u`.
pub const DEFAULT_IMPULSE: f64 = 2.0;

/// Fixed physical and numerical constants of the field equation.
#[derive(Debug, Clone, Copy)]
pub struct FieldParams {
    pub dt: f64,    // Time step
    pub c: f64,     // Wave speed
    pub alpha: f64, // Cubic (restoring) damping coefficient
    pub beta: f64,  // Linear damping coefficient
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams {
            dt: 0.1,
            c: 1.0,
            alpha: 0.05,
            beta: 0.02,
        }
    }
}

/// The three co-located simulation grids plus their constants.
///
/// Mutable only through the integrator; every other component reads it.
#[derive(Debug)]
pub struct FieldState {
    pub grid: Grid,
    pub params: FieldParams,
    pub u: Array2<f64>,   // Displacement
    pub v: Array2<f64>,   // Velocity
    pub phi: Array2<f64>, // Accumulated potential
}

impl FieldState {
    /// Zeroed grids with a single central impulse in `u`.
    pub fn new(grid: Grid, impulse_magnitude: f64, params: FieldParams) -> Result<Self, EngineError> {
        if grid.n == 0 {
            return Err(EngineError::invalid("grid size must be positive, got 0"));
        }
        if grid.dx <= 0.0 || grid.dy <= 0.0 {
            return Err(EngineError::invalid(format!(
                "grid spacing must be positive (dx={}, dy={})",
                grid.dx, grid.dy
            )));
        }
        if params.dt <= 0.0 {
            return Err(EngineError::invalid(format!(
                "time step must be positive, got {}",
                params.dt
            )));
        }

        let mut u = Array2::zeros((grid.n, grid.n));
        let (ci, cj) = grid.center();
        u[[ci, cj]] = impulse_magnitude;

        Ok(FieldState {
            grid,
            params,
            u,
            v: Array2::zeros((grid.n, grid.n)),
            phi: Array2::zeros((grid.n, grid.n)),
        })
    }

    /// Reset to the initial condition without reallocating.
    pub fn reset(&mut self, impulse_magnitude: f64) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.phi.fill(0.0);
        let (ci, cj) = self.grid.center();
        self.u[[ci, cj]] = impulse_magnitude;
    }

    pub fn size(&self) -> usize {
        self.grid.n
    }
}

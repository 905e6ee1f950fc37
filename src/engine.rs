use ndarray::{Array2, Array3};

use crate::config::Config;
use crate::energy::EnergyFlowExtractor;
use crate::error::EngineError;
use crate::field::{FieldParams, FieldState};
use crate::grid::Grid;
use crate::history::HistoryBuffer;
use crate::integrator::{Integrator, DEFAULT_NOISE_STD};

/// The full step → extract → push pipeline behind one facade.
///
/// Single-threaded and synchronous: [`Engine::step`] runs to completion
/// before any reader can observe the new state. The engine performs no I/O
/// and holds its entire state in memory.
pub struct Engine {
    state: FieldState,
    integrator: Integrator,
    extractor: EnergyFlowExtractor,
    history: HistoryBuffer,
    current_flow: Array2<f64>,
    frame_count: u64,
}

impl Engine {
    /// Engine with default physics and an entropy-seeded forcing source.
    pub fn new(
        size: usize,
        time_depth: usize,
        impulse_magnitude: f64,
    ) -> Result<Self, EngineError> {
        let integrator = Integrator::new(DEFAULT_NOISE_STD)?;
        Self::build(
            Grid::square(size),
            FieldParams::default(),
            impulse_magnitude,
            time_depth,
            integrator,
        )
    }

    /// Reproducible engine: fixed seed, fixed trajectory.
    pub fn with_seed(
        size: usize,
        time_depth: usize,
        impulse_magnitude: f64,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let integrator = Integrator::with_seed(seed, DEFAULT_NOISE_STD)?;
        Self::build(
            Grid::square(size),
            FieldParams::default(),
            impulse_magnitude,
            time_depth,
            integrator,
        )
    }

    /// Engine built from a validated [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let grid = Grid::new(config.grid.size, config.grid.dx, config.grid.dy);
        let params = FieldParams {
            dt: config.physics.dt,
            c: config.physics.c,
            alpha: config.physics.alpha,
            beta: config.physics.beta,
        };
        let integrator = match config.forcing.seed {
            Some(seed) => Integrator::with_seed(seed, config.forcing.std_dev)?,
            None => Integrator::new(config.forcing.std_dev)?,
        };
        Self::build(
            grid,
            params,
            config.physics.impulse_magnitude,
            config.history.time_depth,
            integrator,
        )
    }

    fn build(
        grid: Grid,
        params: FieldParams,
        impulse_magnitude: f64,
        time_depth: usize,
        integrator: Integrator,
    ) -> Result<Self, EngineError> {
        let state = FieldState::new(grid, impulse_magnitude, params)?;
        let history = HistoryBuffer::new(time_depth, grid.n)?;
        let extractor = EnergyFlowExtractor::new();
        // The initial frame is derived but not pushed; history only records
        // stepped states
        let current_flow = extractor.compute(&state);

        Ok(Engine {
            state,
            integrator,
            extractor,
            history,
            current_flow,
            frame_count: 0,
        })
    }

    /// Advance the simulation by one `dt`, refresh the energy-flow frame and
    /// append it to the rolling history.
    pub fn step(&mut self) {
        self.integrator.step(&mut self.state);
        self.current_flow = self.extractor.compute(&self.state);
        self.history.push(self.current_flow.clone());
        self.frame_count += 1;
    }

    /// Current normalized energy-flow frame.
    pub fn energy_flow(&self) -> &Array2<f64> {
        &self.current_flow
    }

    /// Rolling history as a `(time, x, y)` volume, oldest first.
    pub fn history_snapshot(&self) -> Array3<f64> {
        self.history.snapshot()
    }

    /// Constant external input added to the acceleration each step; the
    /// grid must match the field dimensions.
    pub fn set_drive(&mut self, drive: Array2<f64>) -> Result<(), EngineError> {
        if drive.dim() != self.state.u.dim() {
            return Err(EngineError::invalid(format!(
                "drive dimensions {:?} do not match field dimensions {:?}",
                drive.dim(),
                self.state.u.dim()
            )));
        }
        self.integrator.set_drive(drive);
        Ok(())
    }

    pub fn clear_drive(&mut self) {
        self.integrator.clear_drive();
    }

    // Diagnostic accessors; all mutation goes through `step`.

    pub fn u(&self) -> &Array2<f64> {
        &self.state.u
    }

    pub fn v(&self) -> &Array2<f64> {
        &self.state.v
    }

    pub fn phi(&self) -> &Array2<f64> {
        &self.state.phi
    }

    pub fn size(&self) -> usize {
        self.state.size()
    }

    pub fn time_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Elapsed simulated time.
    pub fn time(&self) -> f64 {
        self.frame_count as f64 * self.state.params.dt
    }
}

//! Stateful 2D scalar-field simulation engine.
//!
//! Evolves a displacement field under a nonlinear, stochastically forced wave
//! equation with explicit finite-difference time stepping, derives a
//! normalized energy-flow field from the spatial gradient each step, and
//! keeps a fixed-depth rolling history of those frames for downstream
//! consumers. Rendering, interactivity and persistence live outside this
//! crate; the [`Engine`] facade is the entire surface.

pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod field;
pub mod grid;
pub mod history;
pub mod integrator;
pub mod operators;

pub use config::Config;
pub use energy::EnergyFlowExtractor;
pub use engine::Engine;
pub use error::EngineError;
pub use field::{FieldParams, FieldState, DEFAULT_IMPULSE};
pub use grid::Grid;
pub use history::HistoryBuffer;
pub use integrator::{Integrator, DEFAULT_NOISE_STD};

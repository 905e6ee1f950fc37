use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: usize,
    #[serde(default = "default_spacing")]
    pub dx: f64,
    #[serde(default = "default_spacing")]
    pub dy: f64,
}

fn default_spacing() -> f64 {
    1.0
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            size: 100,
            dx: 1.0,
            dy: 1.0,
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(anyhow!("Grid size must be positive, got {}", self.size));
        }
        if self.dx <= 0.0 || self.dy <= 0.0 {
            return Err(anyhow!(
                "Grid spacing must be positive (dx={}, dy={})",
                self.dx,
                self.dy
            ));
        }
        Ok(())
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_c")]
    pub c: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_impulse")]
    pub impulse_magnitude: f64,
}

fn default_dt() -> f64 {
    0.1
}

fn default_c() -> f64 {
    1.0
}

fn default_alpha() -> f64 {
    0.05
}

fn default_beta() -> f64 {
    0.02
}

fn default_impulse() -> f64 {
    2.0
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            dt: default_dt(),
            c: default_c(),
            alpha: default_alpha(),
            beta: default_beta(),
            impulse_magnitude: default_impulse(),
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> Result<()> {
        if self.dt <= 0.0 {
            return Err(anyhow!("dt must be positive, got {}", self.dt));
        }
        for (name, value) in [
            ("c", self.c),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("impulse_magnitude", self.impulse_magnitude),
        ] {
            if !value.is_finite() {
                return Err(anyhow!("{} must be finite, got {}", name, value));
            }
        }
        // No CFL-style bound relating dt, spacing and c is enforced: the
        // engine accepts divergent parameter sets and lets them diverge
        Ok(())
    }
}

/// Stochastic forcing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForcingConfig {
    #[serde(default = "default_noise_std")]
    pub std_dev: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
}

fn default_noise_std() -> f64 {
    0.1
}

impl Default for ForcingConfig {
    fn default() -> Self {
        ForcingConfig {
            std_dev: default_noise_std(),
            seed: None,
        }
    }
}

impl ForcingConfig {
    fn validate(&self) -> Result<()> {
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(anyhow!(
                "Forcing std_dev must be finite and non-negative, got {}",
                self.std_dev
            ));
        }
        Ok(())
    }
}

/// History configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub time_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig { time_depth: 50 }
    }
}

impl HistoryConfig {
    fn validate(&self) -> Result<()> {
        if self.time_depth == 0 {
            return Err(anyhow!(
                "time_depth must be positive, got {}",
                self.time_depth
            ));
        }
        Ok(())
    }
}

/// Driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default = "default_report_period")]
    pub report_period: usize,
}

fn default_steps() -> usize {
    500
}

fn default_report_period() -> usize {
    100
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            steps: default_steps(),
            report_period: default_report_period(),
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(anyhow!("steps must be positive, got {}", self.steps));
        }
        if self.report_period == 0 {
            return Err(anyhow!(
                "report_period must be positive, got {}",
                self.report_period
            ));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub forcing: ForcingConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.physics.validate()?;
        self.forcing.validate()?;
        self.history.validate()?;
        self.run.validate()?;
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("=== Engine Configuration ===");
        println!(
            "Grid: {}x{} (dx={}, dy={})",
            self.grid.size, self.grid.size, self.grid.dx, self.grid.dy
        );
        println!(
            "Physics: dt={}, c={}, alpha={}, beta={}, impulse={}",
            self.physics.dt,
            self.physics.c,
            self.physics.alpha,
            self.physics.beta,
            self.physics.impulse_magnitude
        );
        match self.forcing.seed {
            Some(seed) => println!("Forcing: std_dev={} (seed={})", self.forcing.std_dev, seed),
            None => println!("Forcing: std_dev={} (entropy-seeded)", self.forcing.std_dev),
        }
        println!("History: {} frames", self.history.time_depth);
        println!(
            "Run: {} steps, reporting every {}",
            self.run.steps, self.run.report_period
        );
        println!("============================");
    }
}

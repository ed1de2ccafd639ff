use thiserror::Error;

use crate::topology::TopologyMode;

/// Rejected configuration values. Everything is checked at the engine boundary;
/// past construction all coordinate arithmetic is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("density must be within [0, 1], got {0}")]
    Density(f64),

    #[error("neighbor radius must be a finite value of at least 1, got {0}")]
    Radius(f64),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    Dimensions { width: usize, height: usize },

    #[error("topology covers {got} cells, grid has {expected}")]
    TopologyMismatch { expected: usize, got: usize },
}

/// Tunable simulation parameters — the values the frontend exposes as sliders.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    /// Probability that a cell starts out alive when the grid is (re)seeded.
    pub density: f64,
    /// Maximum distance of a sample point from its cell.
    pub neighbor_radius: f64,
    pub mode: TopologyMode,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            density: 0.185,
            neighbor_radius: 5.0,
            mode: TopologyMode::Independent,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_density(self.density)?;
        check_radius(self.neighbor_radius)?;
        Ok(())
    }
}

pub(crate) fn check_density(density: f64) -> Result<(), ConfigError> {
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::Density(density));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: f64) -> Result<(), ConfigError> {
    if !radius.is_finite() || radius < 1.0 {
        return Err(ConfigError::Radius(radius));
    }
    Ok(())
}

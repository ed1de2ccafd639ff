use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{check_density, check_radius, ConfigError, SimConfig};
use crate::grid::CellState::{Alive, Dead};
use crate::grid::{CellState, Grid};
use crate::topology::{Topology, TopologyMode};

/// The evolution engine: one simulation run's grid, sampling geometry,
/// configuration and iteration counter, behind read-only accessors for
/// renderers.
pub struct LifeEngine {
    grid: Grid,
    topology: Topology,
    config: SimConfig,
    iterations: u64,
    rng: StdRng,
}

impl LifeEngine {
    /// Validate `config`, draw a topology and seed the grid at the configured
    /// density. The engine is ready to step on return.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rng_for(&config);
        let topology = Topology::generate(
            config.mode,
            config.neighbor_radius,
            config.width,
            config.height,
            &mut rng,
        );
        Ok(Self::assemble(config, topology, rng))
    }

    /// Like [`new`](Self::new), but installs a caller-supplied sampling
    /// geometry instead of drawing one. A per-cell topology must cover exactly
    /// the configured grid.
    pub fn with_topology(config: SimConfig, topology: Topology) -> Result<Self, ConfigError> {
        config.validate()?;
        let expected = config.width * config.height;
        if let Some(got) = topology.cell_count() {
            if got != expected {
                return Err(ConfigError::TopologyMismatch { expected, got });
            }
        }
        let rng = rng_for(&config);
        Ok(Self::assemble(config, topology, rng))
    }

    fn assemble(mut config: SimConfig, topology: Topology, mut rng: StdRng) -> Self {
        let mut grid = Grid::new(config.width, config.height);
        seed_grid(&mut grid, config.density, &mut rng);
        config.mode = topology.mode();
        Self {
            grid,
            topology,
            config,
            iterations: 0,
            rng,
        }
    }

    /// Reseed the grid with a fresh live/dead scatter, keeping the current
    /// topology untouched. The iteration counter restarts at zero and the
    /// previous grid is replaced wholesale, never patched in place.
    pub fn initialize(&mut self, density: f64) -> Result<(), ConfigError> {
        check_density(density)?;
        let mut grid = Grid::new(self.config.width, self.config.height);
        seed_grid(&mut grid, density, &mut self.rng);
        self.grid = grid;
        self.config.density = density;
        self.iterations = 0;
        Ok(())
    }

    /// Draw a new sampling geometry for the current grid dimensions and return
    /// it for preview. Leaves the grid and the iteration counter alone;
    /// reseeding stays a separate action.
    pub fn regenerate_topology(
        &mut self,
        mode: TopologyMode,
        radius: f64,
    ) -> Result<&Topology, ConfigError> {
        check_radius(radius)?;
        self.topology = Topology::generate(
            mode,
            radius,
            self.config.width,
            self.config.height,
            &mut self.rng,
        );
        self.config.mode = mode;
        self.config.neighbor_radius = radius;
        Ok(&self.topology)
    }

    /// Advance the grid by one generation. Every cell's live-sample count is
    /// taken against the pre-step grid, so the update is simultaneous across
    /// the whole torus. Returns whether any cell changed.
    pub fn step(&mut self) -> bool {
        let mut next = Grid::new(self.grid.width(), self.grid.height());

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let live_samples = self.live_samples(x, y);
                let state = match (self.grid.get(x, y), live_samples) {
                    (Alive, 2..=3) => Alive, // Survives
                    (Dead, 3) => Alive,      // Becomes alive
                    _ => Dead,               // Dies or remains dead
                };
                next.set(x, y, state);
            }
        }

        self.iterations += 1;
        if self.grid == next {
            return false;
        }
        self.grid = next;
        true
    }

    /// Count live cells among the eight sample points of `(x, y)`.
    fn live_samples(&self, x: usize, y: usize) -> usize {
        let idx = self.grid.idx(x, y);
        self.topology
            .offsets(idx)
            .iter()
            .filter(|offset| {
                self.grid.alive_at(
                    x as isize + offset.dx as isize,
                    y as isize + offset.dy as isize,
                )
            })
            .count()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) {
        self.grid.set(x, y, state);
    }

    pub fn cell(&self, x: usize, y: usize) -> CellState {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn rng_for(config: &SimConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn seed_grid(grid: &mut Grid, density: f64, rng: &mut impl Rng) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let state = if rng.random_bool(density) { Alive } else { Dead };
            grid.set(x, y, state);
        }
    }
}

/**
* A live cell with two or three live sample points lives on to the next generation.
* A live cell with any other number of live sample points dies.
* A dead cell will be brought back to life if exactly three of its sample points are live.
*
* Unlike classic Life, the eight sample points are not the adjacent cells but random
* points drawn once from a disk around each cell and then held fixed for the whole run.
*/

pub mod config;
pub mod engine;
pub mod grid;
pub mod topology;

pub use config::{ConfigError, SimConfig};
pub use engine::LifeEngine;
pub use grid::{CellState, Grid};
pub use topology::{Offset, Topology, TopologyMode, SAMPLES_PER_CELL};

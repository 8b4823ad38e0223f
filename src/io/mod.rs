//! IO module - run configuration and text rendering.

mod config;
mod render;

pub use config::{parse_config, read_config, SimulationConfig};
pub use render::render_lattice;

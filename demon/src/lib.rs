//! Demon: a cyclic cellular automaton on a toroidal grid.
//!
//! Every cell holds one of `num_states` states arranged in a cycle. A cell
//! whose neighbor holds its successor state is "eaten" and takes that state.
//! Neighbors are tried in a fixed order (E, W, S, N, then the diagonals under
//! the Moore neighborhood) and the first match wins.

pub mod colormap;
pub mod config;
pub mod driver;
pub mod grid;
pub mod params;
pub mod render;
pub mod rule;
pub mod scale;
pub mod sim;
pub mod ui;

pub use colormap::{ColorMapper, ColorTable, Colormap, Rgb};
pub use grid::{State, StateGrid};
pub use params::SimulationParameters;
pub use render::{Frame, FrameSink, SinkError};
pub use rule::{Direction, Neighborhood, apply_generation, next_state};
pub use sim::{IDLE_POLL_INTERVAL, LoopState, SimulationLoop, Tick};

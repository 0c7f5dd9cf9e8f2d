// sim.rs - Frame-paced simulation loop

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::colormap::{ColorMapper, ColorTable};
use crate::grid::StateGrid;
use crate::params::SimulationParameters;
use crate::render::{Frame, FrameSink};
use crate::rule::apply_generation;

/// How often an idle loop wakes to look for a run or reset request. Shorter
/// means snappier response, longer means less idle CPU.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// What the scheduler should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Call `tick` again after this delay.
    Continue(Duration),
    Stopped,
}

pub struct SimulationLoop {
    grid: StateGrid,
    mapper: ColorMapper,
    table: ColorTable,
    pixels: Vec<u8>,
    rng: StdRng,
    seeded_states: usize,
    generation: u64,
    reset_requested: bool,
    stopped: bool,
}

impl SimulationLoop {
    /// Allocate and seed a `width x height` grid from OS entropy.
    pub fn new(width: usize, height: usize, params: SimulationParameters) -> Self {
        Self::with_rng(width, height, params, StdRng::from_os_rng())
    }

    /// Same as [`SimulationLoop::new`] but reproducible.
    pub fn with_seed(width: usize, height: usize, params: SimulationParameters, seed: u64) -> Self {
        Self::with_rng(width, height, params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: usize, height: usize, params: SimulationParameters, mut rng: StdRng) -> Self {
        let mut grid = StateGrid::new(width, height);
        grid.initialize(params.num_states, &mut rng);
        info!(width, height, num_states = params.num_states, "grid seeded");
        Self::assemble(grid, params, rng)
    }

    /// Run on a hand-built grid instead of a random one. The grid's states
    /// must already be below `params.num_states`. Like a seeded grid, it is
    /// rendered and stepped once by the first tick even when idle.
    pub fn from_grid(mut grid: StateGrid, params: SimulationParameters) -> Self {
        grid.mark_fresh();
        Self::assemble(grid, params, StdRng::from_os_rng())
    }

    fn assemble(grid: StateGrid, params: SimulationParameters, rng: StdRng) -> Self {
        let mapper = ColorMapper::default();
        let table = mapper.build(params.num_states, params.colormap);
        let pixels = vec![0; grid.len() * 4];
        Self {
            grid,
            mapper,
            table,
            pixels,
            rng,
            seeded_states: params.num_states,
            generation: 0,
            reset_requested: false,
            stopped: false,
        }
    }

    pub fn grid(&self) -> &StateGrid {
        &self.grid
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// The most recently rendered frame's pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Generations completed so far; reset to zero on reinitialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn state(&self, params: &SimulationParameters) -> LoopState {
        if self.stopped {
            LoopState::Stopped
        } else if params.running {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    /// Reseed the grid at the next tick, which then renders and steps once
    /// even when idle.
    pub fn reset(&mut self) {
        self.reset_requested = true;
    }

    /// Halt for good. Later ticks do nothing.
    pub fn stop(&mut self) {
        if !self.stopped {
            info!(generation = self.generation, "simulation stopped");
        }
        self.stopped = true;
    }

    pub fn tick(&mut self, params: SimulationParameters, sink: &mut dyn FrameSink) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }

        let mut recolored = false;
        if self.reset_requested || params.num_states != self.seeded_states {
            self.reinitialize(&params);
        } else if params.colormap != self.table.scheme() {
            self.table = self.mapper.build(params.num_states, params.colormap);
            recolored = true;
        }

        let fresh = self.grid.take_fresh() || recolored;
        if params.running || fresh {
            self.render(sink);
            self.step(&params);
        }

        if params.running {
            Tick::Continue(params.frame_delay())
        } else {
            Tick::Continue(IDLE_POLL_INTERVAL)
        }
    }

    fn reinitialize(&mut self, params: &SimulationParameters) {
        self.grid.initialize(params.num_states, &mut self.rng);
        self.table = self.mapper.build(params.num_states, params.colormap);
        self.seeded_states = params.num_states;
        self.generation = 0;
        self.reset_requested = false;
        info!(
            num_states = params.num_states,
            colormap = params.colormap.name(),
            "grid reinitialized"
        );
    }

    fn render(&mut self, sink: &mut dyn FrameSink) {
        self.table.paint(self.grid.current(), &mut self.pixels);
        let frame = Frame {
            width: self.grid.width(),
            height: self.grid.height(),
            generation: self.generation,
            pixels: &self.pixels,
        };
        if let Err(err) = sink.present(frame) {
            warn!(%err, generation = self.generation, "frame dropped");
        }
    }

    fn step(&mut self, params: &SimulationParameters) {
        apply_generation(&mut self.grid, params.neighborhood, params.num_states);
        self.grid.swap();
        self.generation += 1;
        debug!(
            generation = self.generation,
            neighborhood = params.neighborhood.name(),
            "generation advanced"
        );
    }
}

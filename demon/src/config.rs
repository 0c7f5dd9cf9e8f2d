// config.rs - Command-line configuration

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};

use crate::colormap::Colormap;
use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::params::SimulationParameters;
use crate::rule::Neighborhood;

#[derive(Debug, Clone, Parser)]
#[command(name = "demon", about = "Cyclic cellular automaton on a torus")]
pub struct Config {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = cell_count())]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = cell_count())]
    pub height: usize,

    /// Number of cyclic states (5-30)
    #[arg(long, default_value_t = 16)]
    pub num_states: usize,

    #[arg(long, value_enum, default_value_t = NeighborhoodArg::VonNeumann)]
    pub neighborhood: NeighborhoodArg,

    #[arg(long, value_enum, default_value_t = ColormapArg::CyclicBrightness)]
    pub colormap: ColormapArg,

    /// Delay between generations while running, in ms (0-50)
    #[arg(long, default_value_t = 20)]
    pub frame_delay: u64,

    /// Start running instead of paused
    #[arg(long)]
    pub run: bool,

    /// Seed for a reproducible initial grid
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without a window
    #[arg(long)]
    pub headless: bool,

    /// Headless only: stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// Grid dimensions must be at least one cell.
fn cell_count() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

/// `--neighborhood` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NeighborhoodArg {
    VonNeumann,
    Moore,
}

impl From<NeighborhoodArg> for Neighborhood {
    fn from(arg: NeighborhoodArg) -> Self {
        match arg {
            NeighborhoodArg::VonNeumann => Neighborhood::VonNeumann,
            NeighborhoodArg::Moore => Neighborhood::Moore,
        }
    }
}

/// `--colormap` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColormapArg {
    Grayscale,
    CyclicGrayscale,
    CyclicRainbow,
    CyclicBrightness,
}

impl From<ColormapArg> for Colormap {
    fn from(arg: ColormapArg) -> Self {
        match arg {
            ColormapArg::Grayscale => Colormap::Grayscale,
            ColormapArg::CyclicGrayscale => Colormap::CyclicGrayscale,
            ColormapArg::CyclicRainbow => Colormap::CyclicRainbow,
            ColormapArg::CyclicBrightness => Colormap::CyclicBrightness,
        }
    }
}

impl Config {
    pub fn params(&self) -> SimulationParameters {
        SimulationParameters {
            num_states: self.num_states,
            neighborhood: self.neighborhood.into(),
            colormap: self.colormap.into(),
            frame_delay_ms: self.frame_delay,
            running: self.run,
        }
        .clamped()
    }
}

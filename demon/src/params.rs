// params.rs - User-adjustable simulation parameters

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::colormap::Colormap;
use crate::rule::Neighborhood;

pub const NUM_STATES_RANGE: RangeInclusive<usize> = 5..=30;
pub const FRAME_DELAY_RANGE: RangeInclusive<u64> = 0..=50;

/// Snapshot of the control surface, taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParameters {
    pub num_states: usize,
    pub neighborhood: Neighborhood,
    pub colormap: Colormap,
    pub frame_delay_ms: u64,
    pub running: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            num_states: 16,
            neighborhood: Neighborhood::VonNeumann,
            colormap: Colormap::CyclicBrightness,
            frame_delay_ms: 20,
            running: false,
        }
    }
}

impl SimulationParameters {
    /// Pull numeric fields back into their supported ranges.
    pub fn clamped(self) -> Self {
        Self {
            num_states: self
                .num_states
                .clamp(*NUM_STATES_RANGE.start(), *NUM_STATES_RANGE.end()),
            frame_delay_ms: self
                .frame_delay_ms
                .clamp(*FRAME_DELAY_RANGE.start(), *FRAME_DELAY_RANGE.end()),
            ..self
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

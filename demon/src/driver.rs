// driver.rs - Async tick scheduler for running the loop without a window

use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::params::SimulationParameters;
use crate::render::FrameSink;
use crate::sim::{SimulationLoop, Tick};

/// Requests from the control surface that are not plain parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Reset,
    Stop,
}

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Stopped,
    Disconnected,
    Budget,
}

/// Tick `sim` until it stops, the control channel closes, or `max_ticks`
/// ticks have run. Parameters are read once per tick; each tick finishes
/// before the next sleep starts.
pub async fn run<S: FrameSink>(
    sim: &mut SimulationLoop,
    params: watch::Receiver<SimulationParameters>,
    mut control: mpsc::UnboundedReceiver<Control>,
    sink: &mut S,
    max_ticks: Option<u64>,
) -> Finish {
    let mut ticks = 0u64;
    let mut disconnected = false;
    let finish = loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break Finish::Budget;
        }

        loop {
            match control.try_recv() {
                Ok(Control::Reset) => sim.reset(),
                Ok(Control::Stop) => sim.stop(),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    disconnected = true;
                    sim.stop();
                    break;
                }
            }
        }

        let snapshot = *params.borrow();
        match sim.tick(snapshot.clamped(), &mut *sink) {
            Tick::Continue(delay) => tokio::time::sleep(delay).await,
            Tick::Stopped if disconnected => break Finish::Disconnected,
            Tick::Stopped => break Finish::Stopped,
        }
        ticks += 1;
    };

    info!(?finish, ticks, generation = sim.generation(), "driver finished");
    finish
}

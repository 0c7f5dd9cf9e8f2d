// main.rs - Demon cyclic cellular automaton
// Desktop window by default, or a tokio-driven headless run with --headless

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;
use tokio::sync::{mpsc, watch};
use tracing::info;

use demon::config::Config;
use demon::driver;
use demon::render::HistogramSink;
use demon::sim::SimulationLoop;
use demon::ui::DemonApp;

fn main() -> Result<()> {
    init_tracing();
    let config = Config::parse();
    let params = config.params();

    let sim = match config.seed {
        Some(seed) => SimulationLoop::with_seed(config.width, config.height, params, seed),
        None => SimulationLoop::new(config.width, config.height, params),
    };

    if config.headless {
        run_headless(sim, &config)
    } else {
        run_window(sim, &config)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn run_window(sim: SimulationLoop, config: &Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32 + 40.0, config.height as f32 + 120.0]),
        ..Default::default()
    };

    let app = DemonApp::new(sim, config.params());
    info!(width = config.width, height = config.height, "opening window");
    eframe::run_native("Demon", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("window failed: {err}"))
}

fn run_headless(mut sim: SimulationLoop, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let (_params_tx, params_rx) = watch::channel(config.params());
    let (_control_tx, control_rx) = mpsc::unbounded_channel();
    let mut sink = HistogramSink::new();

    info!(ticks = ?config.ticks, "running headless");
    let finish = runtime.block_on(driver::run(
        &mut sim,
        params_rx,
        control_rx,
        &mut sink,
        config.ticks,
    ));

    if let Some((color, count)) = sink.dominant() {
        info!(
            ?finish,
            frames = sink.frames(),
            generation = sim.generation(),
            distinct = sink.distinct_colors(),
            ?color,
            count,
            "headless run complete"
        );
    }
    Ok(())
}

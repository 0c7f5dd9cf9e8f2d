// ui.rs - Control panel and canvas for the desktop front-end

use std::time::Instant;

use eframe::egui;
use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::{debug, info};

use crate::colormap::Colormap;
use crate::params::{FRAME_DELAY_RANGE, NUM_STATES_RANGE, SimulationParameters};
use crate::render::{Frame, FrameSink, SinkError};
use crate::rule::Neighborhood;
use crate::sim::{LoopState, SimulationLoop, Tick};

/// Uploads frames into an egui texture, creating it on first use.
pub struct TextureSink<'a> {
    ctx: &'a egui::Context,
    texture: &'a mut Option<TextureHandle>,
}

impl<'a> TextureSink<'a> {
    pub fn new(ctx: &'a egui::Context, texture: &'a mut Option<TextureHandle>) -> Self {
        Self { ctx, texture }
    }
}

impl FrameSink for TextureSink<'_> {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        frame.check()?;
        let image = ColorImage::from_rgba_unmultiplied([frame.width, frame.height], frame.pixels);
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, TextureOptions::NEAREST);
        } else {
            *self.texture = Some(self.ctx.load_texture("demon-grid", image, TextureOptions::NEAREST));
        }
        Ok(())
    }
}

pub struct DemonApp {
    pub sim: SimulationLoop,
    pub params: SimulationParameters,
    /// Where the states slider sits while it is being dragged.
    pending_states: usize,
    texture: Option<TextureHandle>,
    next_tick: Instant,
}

impl DemonApp {
    pub fn new(sim: SimulationLoop, params: SimulationParameters) -> Self {
        Self {
            sim,
            params,
            pending_states: params.num_states,
            texture: None,
            next_tick: Instant::now(),
        }
    }

    /// Hand the slider's value to the loop. Every new state count reseeds the
    /// grid, so nothing is committed until the drag is over.
    fn commit_states(&mut self, finished: bool) {
        if finished && self.pending_states != self.params.num_states {
            debug!(from = self.params.num_states, to = self.pending_states, "state count committed");
            self.params.num_states = self.pending_states;
        }
    }

    /// Stop the loop for good when the window goes away.
    pub fn shutdown(&mut self) {
        info!(generation = self.sim.generation(), "window closing");
        self.sim.stop();
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let slider =
                ui.add(egui::Slider::new(&mut self.pending_states, NUM_STATES_RANGE).text("states"));
            self.commit_states(slider.drag_released() || (slider.changed() && !slider.dragged()));

            ui.separator();

            egui::ComboBox::from_id_source("neighborhood")
                .selected_text(self.params.neighborhood.name())
                .show_ui(ui, |ui| {
                    for n in Neighborhood::ALL {
                        ui.selectable_value(&mut self.params.neighborhood, n, n.name());
                    }
                });

            egui::ComboBox::from_id_source("colormap")
                .selected_text(self.params.colormap.name())
                .show_ui(ui, |ui| {
                    for c in Colormap::ALL {
                        ui.selectable_value(&mut self.params.colormap, c, c.name());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.add(
                egui::Slider::new(&mut self.params.frame_delay_ms, FRAME_DELAY_RANGE)
                    .text("frame delay")
                    .suffix(" ms"),
            );

            ui.separator();

            let was_running = self.params.running;
            ui.checkbox(&mut self.params.running, "run");
            if self.params.running && !was_running {
                self.next_tick = Instant::now();
            }

            if ui.button("reset").clicked() {
                self.sim.reset();
                self.next_tick = Instant::now();
            }

            ui.separator();

            let state = match self.sim.state(&self.params) {
                LoopState::Idle => "idle",
                LoopState::Running => "running",
                LoopState::Stopped => "stopped",
            };
            ui.label(format!("Generation: {} ({state})", self.sim.generation()));
        });
    }
}

impl eframe::App for DemonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        // Tick when the scheduled time comes round
        let now = Instant::now();
        if now >= self.next_tick {
            let params = self.params.clamped();
            let mut sink = TextureSink::new(ctx, &mut self.texture);
            if let Tick::Continue(delay) = self.sim.tick(params, &mut sink) {
                self.next_tick = now + delay;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.centered_and_justified(|ui| {
                    ui.image((texture.id(), texture.size_vec2()));
                });
            }
        });

        if !self.sim.is_stopped() {
            ctx.request_repaint_after(self.next_tick.saturating_duration_since(Instant::now()));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}

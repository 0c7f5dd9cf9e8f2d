// render.rs - Output boundary for finished frames

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

/// A finished frame: `width * height` RGBA quads, alpha always 255.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    pub pixels: &'a [u8],
}

impl Frame<'_> {
    /// Fails unless the buffer holds exactly one quad per cell.
    pub fn check(&self) -> Result<(), SinkError> {
        let expected = self.width * self.height * 4;
        if self.pixels.len() == expected {
            Ok(())
        } else {
            Err(SinkError::BadFrame {
                expected,
                got: self.pixels.len(),
            })
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    /// The surface is gone, e.g. the window closed mid-frame.
    #[error("render surface unavailable")]
    Unavailable,

    #[error("frame carries {got} pixel bytes, expected {expected}")]
    BadFrame { expected: usize, got: usize },
}

/// Anything that can display a frame. Ownership of the pixels stays with the
/// caller.
pub trait FrameSink {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError>;
}

/// Headless sink that keeps a per-colour pixel census of the latest frame.
#[derive(Debug, Default)]
pub struct HistogramSink {
    frames: u64,
    census: HashMap<[u8; 3], usize>,
}

impl HistogramSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn distinct_colors(&self) -> usize {
        self.census.len()
    }

    /// Most common colour and its pixel count.
    pub fn dominant(&self) -> Option<([u8; 3], usize)> {
        self.census
            .iter()
            .max_by_key(|&(color, count)| (*count, *color))
            .map(|(c, n)| (*c, *n))
    }
}

impl FrameSink for HistogramSink {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        frame.check()?;
        self.census.clear();
        for quad in frame.pixels.chunks_exact(4) {
            *self.census.entry([quad[0], quad[1], quad[2]]).or_default() += 1;
        }
        self.frames += 1;

        if let Some((color, count)) = self.dominant() {
            debug!(
                generation = frame.generation,
                distinct = self.census.len(),
                ?color,
                count,
                "frame census"
            );
        }
        Ok(())
    }
}

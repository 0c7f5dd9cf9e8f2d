// colormap.rs - State index to colour lookup

use std::f64::consts::FRAC_PI_2;

use crate::grid::State;
use crate::scale::LightnessScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    Grayscale,
    CyclicGrayscale,
    CyclicRainbow,
    #[default]
    CyclicBrightness,
}

impl Colormap {
    pub const ALL: [Colormap; 4] = [
        Colormap::Grayscale,
        Colormap::CyclicGrayscale,
        Colormap::CyclicRainbow,
        Colormap::CyclicBrightness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Grayscale => "grayscale",
            Colormap::CyclicGrayscale => "cyclic grayscale",
            Colormap::CyclicRainbow => "cyclic rainbow",
            Colormap::CyclicBrightness => "cyclic brightness",
        }
    }
}

fn byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Fold `t` about its midpoint so the map returns to its start at `t = 1`.
fn fold(t: f64) -> f64 {
    if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) }
}

pub fn grayscale(t: f64) -> Rgb {
    Rgb::gray(byte(t))
}

pub fn cyclic_grayscale(t: f64) -> Rgb {
    Rgb::gray(byte(fold(t)))
}

fn ramp(f: f64) -> u8 {
    (255.0 * (f * FRAC_PI_2).sin()).round() as u8
}

/// Red, yellow, green, cyan, blue, magenta and back, one sextant each.
pub fn cyclic_rainbow(t: f64) -> Rgb {
    if t < 1.0 / 6.0 {
        let frac = t * 6.0;
        Rgb::new(255, ramp(frac), 0)
    } else if t < 2.0 / 6.0 {
        let frac = (t - 1.0 / 6.0) * 6.0;
        Rgb::new(ramp(1.0 - frac), 255, 0)
    } else if t < 3.0 / 6.0 {
        let frac = (t - 2.0 / 6.0) * 6.0;
        Rgb::new(0, 255, ramp(frac))
    } else if t < 4.0 / 6.0 {
        let frac = (t - 3.0 / 6.0) * 6.0;
        Rgb::new(0, ramp(1.0 - frac), 255)
    } else if t < 5.0 / 6.0 {
        let frac = (t - 4.0 / 6.0) * 6.0;
        Rgb::new(ramp(frac), 0, 255)
    } else {
        let frac = (t - 5.0 / 6.0) * 6.0;
        Rgb::new(255, 0, ramp(1.0 - frac))
    }
}

/// Evaluates the four schemes. Holds the two lightness ramps used by
/// [`Colormap::CyclicBrightness`].
#[derive(Debug, Clone)]
pub struct ColorMapper {
    warm: LightnessScale,
    cool: LightnessScale,
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self {
            warm: LightnessScale::warm(),
            cool: LightnessScale::cool(),
        }
    }
}

impl ColorMapper {
    pub fn cyclic_brightness(&self, t: f64) -> Rgb {
        if t < 0.5 {
            self.warm.sample(fold(t))
        } else {
            self.cool.sample(fold(t))
        }
    }

    pub fn color(&self, scheme: Colormap, t: f64) -> Rgb {
        match scheme {
            Colormap::Grayscale => grayscale(t),
            Colormap::CyclicGrayscale => cyclic_grayscale(t),
            Colormap::CyclicRainbow => cyclic_rainbow(t),
            Colormap::CyclicBrightness => self.cyclic_brightness(t),
        }
    }

    pub fn build(&self, num_states: usize, scheme: Colormap) -> ColorTable {
        let colors = (0..num_states)
            .map(|i| self.color(scheme, i as f64 / num_states as f64))
            .collect();
        ColorTable { scheme, colors }
    }
}

/// One colour per state, fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    scheme: Colormap,
    colors: Vec<Rgb>,
}

impl ColorTable {
    pub fn build(num_states: usize, scheme: Colormap) -> Self {
        ColorMapper::default().build(num_states, scheme)
    }

    pub fn scheme(&self) -> Colormap {
        self.scheme
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, state: State) -> Rgb {
        self.colors[state as usize]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Write one opaque RGBA quad per state into `pixels`.
    pub fn paint(&self, states: &[State], pixels: &mut [u8]) {
        debug_assert_eq!(pixels.len(), states.len() * 4);
        for (quad, &s) in pixels.chunks_exact_mut(4).zip(states) {
            let c = self.colors[s as usize];
            quad.copy_from_slice(&[c.r, c.g, c.b, 255]);
        }
    }
}

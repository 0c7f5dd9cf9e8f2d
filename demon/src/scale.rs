// scale.rs - Lightness-corrected colour ramps

use crate::colormap::Rgb;

/// Colour with channels in `0.0..=255.0`, kept unrounded while interpolating.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgbf {
    r: f64,
    g: f64,
    b: f64,
}

impl Rgbf {
    const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// CIE-Lab L* under D65.
    fn lightness(self) -> f64 {
        let y = 0.2126729 * srgb_to_linear(self.r / 255.0)
            + 0.7151522 * srgb_to_linear(self.g / 255.0)
            + 0.0721750 * srgb_to_linear(self.b / 255.0);
        (116.0 * lab_f(y) - 16.0).max(0.0)
    }

    fn round(self) -> Rgb {
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

pub const BLACK: (u8, u8, u8) = (0, 0, 0);
pub const RED: (u8, u8, u8) = (255, 0, 0);
pub const BLUE: (u8, u8, u8) = (0, 0, 255);
pub const WHITE: (u8, u8, u8) = (255, 255, 255);

const MAX_ITERATIONS: usize = 20;
const TOLERANCE: f64 = 1e-2;

/// Three evenly spaced stops interpolated in RGB, with the parameter remapped
/// so L* moves linearly from the first stop to the last.
#[derive(Debug, Clone)]
pub struct LightnessScale {
    stops: [Rgbf; 3],
    l0: f64,
    l1: f64,
}

impl LightnessScale {
    pub fn new(start: (u8, u8, u8), mid: (u8, u8, u8), end: (u8, u8, u8)) -> Self {
        let to_f = |(r, g, b): (u8, u8, u8)| Rgbf::new(r as f64, g as f64, b as f64);
        let stops = [to_f(start), to_f(mid), to_f(end)];
        let l0 = stops[0].lightness();
        let l1 = stops[2].lightness();
        Self { stops, l0, l1 }
    }

    /// Black through red to white.
    pub fn warm() -> Self {
        Self::new(BLACK, RED, WHITE)
    }

    /// Black through blue to white.
    pub fn cool() -> Self {
        Self::new(BLACK, BLUE, WHITE)
    }

    pub fn sample(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        self.raw(self.correct(t)).round()
    }

    fn raw(&self, t: f64) -> Rgbf {
        if t <= 0.5 {
            self.stops[0].lerp(self.stops[1], t * 2.0)
        } else {
            self.stops[1].lerp(self.stops[2], (t - 0.5) * 2.0)
        }
    }

    // Bisect for the parameter whose lightness matches the linear target.
    fn correct(&self, t: f64) -> f64 {
        let ideal = self.l0 + (self.l1 - self.l0) * t;
        let descending = self.l0 > self.l1;
        let (mut lo, mut hi, mut t) = (0.0, 1.0, t);
        let mut diff = self.raw(t).lightness() - ideal;

        for _ in 0..MAX_ITERATIONS {
            if diff.abs() <= TOLERANCE {
                break;
            }
            let below = if descending { diff > 0.0 } else { diff < 0.0 };
            if below {
                lo = t;
                t += (hi - t) * 0.5;
            } else {
                hi = t;
                t += (lo - t) * 0.5;
            }
            diff = self.raw(t).lightness() - ideal;
        }
        t
    }
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    const T1: f64 = 6.0 / 29.0;
    const T2: f64 = 3.0 * T1 * T1;
    const T3: f64 = T1 * T1 * T1;
    if t > T3 { t.cbrt() } else { t / T2 + 4.0 / 29.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(c: Rgb) -> f64 {
        Rgbf::new(c.r as f64, c.g as f64, c.b as f64).lightness()
    }

    #[test]
    fn end_stops_are_exact() {
        for scale in [LightnessScale::warm(), LightnessScale::cool()] {
            assert_eq!(scale.sample(0.0), Rgb::new(0, 0, 0));
            assert_eq!(scale.sample(1.0), Rgb::new(255, 255, 255));
        }
    }

    #[test]
    fn reference_lightness() {
        assert!((lightness(Rgb::new(255, 255, 255)) - 100.0).abs() < 1e-3);
        assert!((lightness(Rgb::new(255, 0, 0)) - 53.24).abs() < 0.01);
        assert!((lightness(Rgb::new(0, 0, 255)) - 32.30).abs() < 0.01);
    }

    #[test]
    fn lightness_is_linear_in_t() {
        for scale in [LightnessScale::warm(), LightnessScale::cool()] {
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let l = lightness(scale.sample(t));
                // Rounding to bytes costs up to about half a unit of L*.
                assert!((l - 100.0 * t).abs() < 0.75, "t={t}: L*={l}");
            }
        }
    }

    #[test]
    fn lightness_is_monotonic() {
        for scale in [LightnessScale::warm(), LightnessScale::cool()] {
            let mut prev = -1.0;
            for i in 0..=50 {
                let l = lightness(scale.sample(i as f64 / 50.0));
                assert!(l >= prev - 1e-9, "lightness dropped at step {i}");
                prev = l;
            }
        }
    }

    #[test]
    fn warm_passes_through_red_hues() {
        let mid = LightnessScale::warm().sample(0.4);
        assert!(mid.r > mid.g && mid.r > mid.b);
        assert_eq!(mid.g, mid.b);
    }

    #[test]
    fn cool_passes_through_blue_hues() {
        let mid = LightnessScale::cool().sample(0.25);
        assert!(mid.b > mid.r && mid.b > mid.g);
        assert_eq!(mid.r, mid.g);
    }
}

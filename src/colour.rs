// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning iteration counts into colours.
//!
//! Colours live in normalized [0, 1] space here; scaling to whatever
//! the output wants (usually bytes) is the consumer's business.  The
//! usual palette is a `Gradient`, a handful of stops with linear
//! interpolation between them.  As an alternative, the ratio can be
//! spun around the HSV colour wheel instead.

use crate::errors::{RenderError, Result};
use num::clamp;

/// A colour with each channel in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

/// Points inside the set are painted this.
pub const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

impl Rgb {
    /// Construct from the three channels.
    pub fn new(r: f64, g: f64, b: f64) -> Rgb {
        Rgb { r, g, b }
    }

    fn lerp(self, other: Rgb, amount: f64) -> Rgb {
        Rgb {
            r: self.r * (1.0 - amount) + other.r * amount,
            g: self.g * (1.0 - amount) + other.g * amount,
            b: self.b * (1.0 - amount) + other.b * amount,
        }
    }

    fn clamped(self) -> Rgb {
        Rgb {
            r: clamp(self.r, 0.0, 1.0),
            g: clamp(self.g, 0.0, 1.0),
            b: clamp(self.b, 0.0, 1.0),
        }
    }

    fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| *c >= 0.0 && *c <= 1.0)
    }

    /// Scale each channel to a byte.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = |c: f64| (clamp(c, 0.0, 1.0) * 255.0) as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

/// A point on the HSV colour wheel.  Hue is in degrees, [0, 360);
/// saturation and value are in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value.
    pub v: f64,
}

/// The textbook six-sector HSV to RGB conversion.  A hue of 360 or
/// more wraps to 0; no saturation means grey.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        return Rgb::new(v, v, v);
    }

    let hh = if h >= 360.0 { 0.0 } else { h } / 60.0;
    let sector = hh as i64;
    let ff = hh - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * ff);
    let t = v * (1.0 - s * (1.0 - ff));

    match sector {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

/// An ordered list of at least two colour stops.  Built once and
/// shared read-only; there is no way to change one after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<Rgb>,
}

impl Gradient {
    /// Requires at least two stops, each normalized.
    pub fn new(stops: Vec<Rgb>) -> Result<Gradient> {
        if stops.len() < 2 {
            return Err(RenderError::InvalidGradient(format!(
                "need at least 2 stops, got {}",
                stops.len()
            )));
        }
        if let Some(i) = stops.iter().position(|s| !s.is_normalized()) {
            return Err(RenderError::InvalidGradient(format!(
                "stop {} is outside [0, 1]: {:?}",
                i, stops[i]
            )));
        }
        Ok(Gradient { stops })
    }

    /// Builds a gradient out of packed r, g, b triples.
    pub fn from_flat(colours: &[f64]) -> Result<Gradient> {
        if colours.len() % 3 != 0 {
            return Err(RenderError::InvalidGradient(format!(
                "{} values do not make whole r,g,b triples",
                colours.len()
            )));
        }
        Gradient::new(
            colours
                .chunks(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect(),
        )
    }

    /// The default palette: black, blue, red, magenta, white.
    pub fn nova() -> Gradient {
        Gradient {
            stops: vec![
                Rgb::new(0.0, 0.0, 0.0),
                Rgb::new(0.0, 0.0, 1.0),
                Rgb::new(1.0, 0.0, 0.0),
                Rgb::new(1.0, 0.0, 1.0),
                Rgb::new(1.0, 1.0, 1.0),
            ],
        }
    }

    /// The stops, in order.
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Look up the colour at `fraction` of the way along the gradient.
    /// The segment is the first one whose upper stop is at or past
    /// `fraction`; within it the blend amount runs `fraction * len - i`,
    /// and the result is clamped back into [0, 1].  0 and 1 land exactly
    /// on the first and last stops.
    pub fn colour_at(&self, fraction: f64) -> Rgb {
        let len = self.stops.len();
        let fraction = clamp(fraction, 0.0, 1.0);
        if fraction <= 0.0 {
            return self.stops[0];
        }
        if fraction >= 1.0 {
            return self.stops[len - 1];
        }

        let position = fraction * (len - 1) as f64;
        for i in 0..len - 1 {
            if position > (i + 1) as f64 {
                continue;
            }
            let amount = fraction * len as f64 - i as f64;
            return self.stops[i].lerp(self.stops[i + 1], amount).clamped();
        }
        self.stops[0]
    }
}

impl Default for Gradient {
    fn default() -> Gradient {
        Gradient::nova()
    }
}

/// Where colours come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Palette {
    /// Interpolate along a gradient.
    Gradient(Gradient),
    /// Walk the hue wheel at full saturation and value.
    Hsv,
}

impl Palette {
    /// The colour for a ratio in [0, 1].
    pub fn colour_at(&self, ratio: f64) -> Rgb {
        match self {
            Palette::Gradient(gradient) => gradient.colour_at(ratio),
            Palette::Hsv => hsv_to_rgb(Hsv {
                h: 360.0 * ratio,
                s: 1.0,
                v: 1.0,
            }),
        }
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::Gradient(Gradient::nova())
    }
}

/// Maps an escape count to a colour, borrowing its palette from
/// whoever built it.
#[derive(Copy, Clone, Debug)]
pub struct ColourMapper<'a> {
    palette: &'a Palette,
}

impl<'a> ColourMapper<'a> {
    /// Wrap a palette.
    pub fn new(palette: &'a Palette) -> ColourMapper<'a> {
        ColourMapper { palette }
    }

    /// Counts within one iteration of `depth` are treated as inside the
    /// set and come out black.  Everything else is scaled by `exposure`,
    /// capped at 1, and looked up in the palette.
    pub fn map(&self, count: u32, depth: u32, exposure: f64) -> Rgb {
        if count >= depth.saturating_sub(1) {
            return BLACK;
        }
        let ratio = (exposure * f64::from(count) / f64::from(depth)).min(1.0);
        self.palette.colour_at(ratio)
    }
}

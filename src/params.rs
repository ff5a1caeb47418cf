// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs of a render: how big the canvas is, and which part of
//! the complex plane it looks at.  Both are validated once, up front,
//! so nothing downstream has an error path for bad configuration.

use crate::colour::Rgb;
use crate::errors::{RenderError, Result};
use num::Complex;
use std::mem;

/// Canvas width used when the caller doesn't name one.
pub const DEFAULT_WIDTH: usize = 200;
/// Canvas height used when the caller doesn't name one.
pub const DEFAULT_HEIGHT: usize = 200;
/// Iteration depth used when the caller doesn't name one.
pub const DEFAULT_DEPTH: u32 = 128;
/// Exposure used when the caller doesn't name one.
pub const DEFAULT_EXPOSURE: f64 = 4.0;

/// Width and height of the output image in pixels.  The origin is
/// always the upper-left corner at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas(pub usize, pub usize);

impl Canvas {
    /// Refuses canvases with no pixels in them, and canvases whose
    /// frame could not be allocated.
    pub fn new(width: usize, height: usize) -> Result<Canvas> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        let bytes = width
            .checked_mul(height)
            .and_then(|area| area.checked_mul(mem::size_of::<Rgb>()));
        match bytes {
            Some(b) if b <= isize::max_value() as usize => Ok(Canvas(width, height)),
            _ => Err(RenderError::CanvasTooLarge { width, height }),
        }
    }

    /// A canvas with both sides rounded up to the next power of two.
    pub fn rounded(width: usize, height: usize) -> Result<Canvas> {
        Canvas::new(width, height)?;
        match (width.checked_next_power_of_two(), height.checked_next_power_of_two()) {
            (Some(w), Some(h)) => Canvas::new(w, h),
            _ => Err(RenderError::CanvasTooLarge { width, height }),
        }
    }

    /// Total number of pixels.  Saturates for canvases built by hand
    /// rather than through `new`.
    pub fn len(&self) -> usize {
        self.0.saturating_mul(self.1)
    }

    /// Never true for a canvas built through `new`.
    pub fn is_empty(&self) -> bool {
        self.0 == 0 || self.1 == 0
    }
}

impl Default for Canvas {
    fn default() -> Canvas {
        Canvas(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Where to look and how hard.  The viewport is the square of side
/// `radius` centred on `center`; the escape test runs for at most
/// `depth` iterations per pixel and `exposure` scales the iteration
/// ratio before it is turned into a colour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalParameters {
    center: Complex<f64>,
    radius: f64,
    depth: u32,
    exposure: f64,
}

impl FractalParameters {
    /// Validates everything; a zero depth or a non-positive radius or
    /// exposure is a configuration error.
    pub fn new(
        center: Complex<f64>,
        radius: f64,
        depth: u32,
        exposure: f64,
    ) -> Result<FractalParameters> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidRadius(radius));
        }
        if depth == 0 {
            return Err(RenderError::InvalidDepth(depth));
        }
        if !(exposure.is_finite() && exposure > 0.0) {
            return Err(RenderError::InvalidExposure(exposure));
        }
        Ok(FractalParameters {
            center,
            radius,
            depth,
            exposure,
        })
    }

    /// The default depth and exposure around the given viewport.
    pub fn with_defaults(center: Complex<f64>, radius: f64) -> Result<FractalParameters> {
        FractalParameters::new(center, radius, DEFAULT_DEPTH, DEFAULT_EXPOSURE)
    }

    /// The middle of the viewport.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The side length of the square viewport.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The most iterations any pixel gets.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Multiplier on the iteration ratio before colour lookup.
    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    /// The upper-left corner of the viewport on the complex plane.
    pub fn origin(&self) -> Complex<f64> {
        Complex::new(
            self.center.re - self.radius / 2.0,
            self.center.im - self.radius / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_radius() {
        for radius in &[0.0, -2.0, std::f64::NAN, std::f64::INFINITY] {
            let p = FractalParameters::new(Complex::new(0.0, 0.0), *radius, 10, 1.0);
            match p {
                Err(RenderError::InvalidRadius(_)) => {}
                other => panic!("expected InvalidRadius, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_zero_depth() {
        let p = FractalParameters::new(Complex::new(0.0, 0.0), 2.0, 0, 1.0);
        match p {
            Err(RenderError::InvalidDepth(0)) => {}
            other => panic!("expected InvalidDepth, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_exposure() {
        let p = FractalParameters::new(Complex::new(0.0, 0.0), 2.0, 10, 0.0);
        assert!(p.is_err());
    }

    #[test]
    fn defaults_fill_depth_and_exposure() {
        let p = FractalParameters::with_defaults(Complex::new(-0.5, 0.0), 2.0).unwrap();
        assert_eq!(p.depth(), DEFAULT_DEPTH);
        assert_eq!(p.exposure(), DEFAULT_EXPOSURE);
        assert_eq!(p.origin(), Complex::new(-1.5, -1.0));
    }

    #[test]
    fn canvas_rounds_up_to_powers_of_two() {
        assert_eq!(Canvas::rounded(200, 200).unwrap(), Canvas(256, 256));
        assert_eq!(Canvas::rounded(64, 65).unwrap(), Canvas(64, 128));
        assert_eq!(Canvas::rounded(1, 3).unwrap(), Canvas(1, 4));
    }

    #[test]
    fn canvas_must_have_pixels() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::rounded(0, 0).is_err());
        assert_eq!(Canvas::new(3, 5).unwrap().len(), 15);
    }

    #[test]
    fn sides_too_big_to_round_are_refused() {
        match Canvas::rounded(usize::max_value(), 1) {
            Err(RenderError::CanvasTooLarge { width, height: 1 }) => {
                assert_eq!(width, usize::max_value())
            }
            other => panic!("expected CanvasTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn areas_that_overflow_are_refused() {
        let side = usize::max_value() / 2 + 1;
        match Canvas::new(side, 2) {
            Err(RenderError::CanvasTooLarge { .. }) => {}
            other => panic!("expected CanvasTooLarge, got {:?}", other),
        }
        // The area fits but the frame of colours would not.
        let wide = usize::max_value() / mem::size_of::<Rgb>();
        assert!(Canvas::new(wide, 2).is_err());
        assert!(Canvas::rounded(1 << 20, 1 << 20).is_ok());
    }

    #[test]
    fn hand_built_canvases_do_not_overflow_len() {
        assert_eq!(Canvas(usize::max_value(), 2).len(), usize::max_value());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Breaks a canvas up into a square grid of tiles, each of which gets
//! its own worker.
//!
//! Each tile knows two rectangles: where it sits on the canvas, and
//! the matching window onto the complex plane.  Tiles carry their own
//! output buffer so that no two workers ever write to the same memory.

use crate::params::{Canvas, FractalParameters};
use log::debug;
use num::Complex;

/// The edge length, in pixels, that tiles are sized around.
pub const TARGET_TILE_EDGE: f64 = 64.0;

/// One rectangle of the canvas and its slice of the complex plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub(crate) index: usize,
    pub(crate) screen_x: usize,
    pub(crate) screen_y: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) start: Complex<f64>,
    pub(crate) end: Complex<f64>,
    pub(crate) depth: u32,
    pub(crate) buffer: Vec<u32>,
}

impl Tile {
    /// Position of this tile in scheduling order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Left edge on the canvas.
    pub fn screen_x(&self) -> usize {
        self.screen_x
    }

    /// Top edge on the canvas.
    pub fn screen_y(&self) -> usize {
        self.screen_y
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The corner of the plane window that maps to local pixel 0,0.
    pub fn start(&self) -> Complex<f64> {
        self.start
    }

    /// The far corner of the plane window, one pixel past the last.
    pub fn end(&self) -> Complex<f64> {
        self.end
    }

    /// Iteration depth for every pixel in the tile.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Escape counts, row-major, `width * height` long.
    pub fn counts(&self) -> &[u32] {
        &self.buffer
    }

    /// Map a local pixel to the complex plane.
    pub fn point_at(&self, x: usize, y: usize) -> Complex<f64> {
        Complex::new(
            self.start.re + (x as f64) * (self.end.re - self.start.re) / (self.width as f64),
            self.start.im + (y as f64) * (self.end.im - self.start.im) / (self.height as f64),
        )
    }
}

/// Side length of the tile grid: the smallest power of two whose
/// square is a power of four at or above (sqrt(W*H) / 64) tiles.
/// Tiny canvases get a single tile.
pub fn grid_side(canvas: Canvas) -> usize {
    let k = ((canvas.0 as f64) * (canvas.1 as f64)).sqrt() / TARGET_TILE_EDGE;
    let exponent = (k.log2() / 2.0).ceil().max(0.0);
    1 << (exponent as u32)
}

/// Lay the tiles out left to right, top to bottom.  Tile boundaries
/// sit at `W * col / side` and `H * row / side`, so sides that don't
/// divide evenly leave some tiles a pixel wider instead of dropping
/// pixels.  The plane window of each tile is cut from the viewport at
/// the same proportions as its pixel rectangle.
pub fn schedule(canvas: Canvas, params: &FractalParameters) -> Vec<Tile> {
    let Canvas(width, height) = canvas;
    let side = grid_side(canvas);
    let origin = params.origin();
    let radius = params.radius();
    debug!(
        "{}x{} canvas splits into {} tiles ({}x{} grid)",
        width,
        height,
        side * side,
        side,
        side
    );

    let to_plane = |x: usize, y: usize| {
        Complex::new(
            origin.re + radius * (x as f64) / (width as f64),
            origin.im + radius * (y as f64) / (height as f64),
        )
    };

    (0..side * side)
        .map(|index| {
            let (column, row) = (index % side, index / side);
            let (x0, x1) = (width * column / side, width * (column + 1) / side);
            let (y0, y1) = (height * row / side, height * (row + 1) / side);
            let (start, end) = (to_plane(x0, y0), to_plane(x1, y1));
            debug!("tile {} at {},{} covers {} to {}", index, x0, y0, start, end);
            Tile {
                index,
                screen_x: x0,
                screen_y: y0,
                width: x1 - x0,
                height: y1 - y0,
                start,
                end,
                depth: params.depth(),
                buffer: vec![0; (x1 - x0) * (y1 - y0)],
            }
        })
        .collect()
}

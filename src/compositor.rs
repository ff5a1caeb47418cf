// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assembles finished tiles into one colour image.

use crate::colour::{ColourMapper, Rgb, BLACK};
use crate::params::Canvas;
use crate::tiles::Tile;
use itertools::iproduct;

/// The finished frame: `width * height` colours, row-major, each
/// channel in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// An all-black frame.
    pub fn new(canvas: Canvas) -> FrameBuffer {
        FrameBuffer {
            width: canvas.0,
            height: canvas.1,
            pixels: vec![BLACK; canvas.len()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The colour at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Every pixel, row-major.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packed 8-bit RGB, ready for an image encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgb8().to_vec()).collect()
    }
}

/// Paint every tile into a new frame.  The tiles are consumed; their
/// buffers are gone once the frame exists.
pub fn composite(
    canvas: Canvas,
    tiles: Vec<Tile>,
    mapper: &ColourMapper,
    exposure: f64,
) -> FrameBuffer {
    let mut frame = FrameBuffer::new(canvas);
    for tile in tiles {
        for ((y, x), count) in iproduct!(0..tile.height, 0..tile.width).zip(tile.buffer.iter()) {
            let offset = (tile.screen_y + y) * frame.width + tile.screen_x + x;
            frame.pixels[offset] = mapper.map(*count, tile.depth, exposure);
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Palette;
    use crate::params::FractalParameters;
    use crate::tiles::schedule;
    use crate::worker::run;
    use num::Complex;

    #[test]
    fn places_each_tile_at_its_offset() {
        let params = FractalParameters::new(Complex::new(0.0, 0.0), 4.0, 20, 1.0).unwrap();
        let canvas = Canvas(256, 256);
        let mut tiles = schedule(canvas, &params);
        for tile in tiles.iter_mut() {
            let index = tile.index as u32;
            for count in tile.buffer.iter_mut() {
                *count = index;
            }
        }
        let palette = Palette::default();
        let frame = composite(canvas, tiles, &ColourMapper::new(&palette), 1.0);
        let mapper = ColourMapper::new(&palette);
        assert_eq!(frame.get(0, 0), mapper.map(0, 20, 1.0));
        assert_eq!(frame.get(200, 10), mapper.map(1, 20, 1.0));
        assert_eq!(frame.get(10, 200), mapper.map(2, 20, 1.0));
        assert_eq!(frame.get(255, 255), mapper.map(3, 20, 1.0));
    }

    #[test]
    fn in_set_pixels_are_black() {
        let params = FractalParameters::new(Complex::new(0.0, 0.0), 0.1, 30, 4.0).unwrap();
        let canvas = Canvas(64, 64);
        let mut tiles = schedule(canvas, &params);
        run(&mut tiles).unwrap();
        let palette = Palette::default();
        let frame = composite(canvas, tiles, &ColourMapper::new(&palette), 4.0);
        assert!(frame.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn bytes_are_packed_rgb() {
        let mut frame = FrameBuffer::new(Canvas(2, 1));
        frame.pixels[1] = Rgb::new(1.0, 0.0, 1.0);
        assert_eq!(frame.to_rgb8(), vec![0, 0, 0, 255, 0, 255]);
    }
}

#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of 0 under z -> z² + c stays bounded.  For every
//! pixel we count how many steps the orbit takes to leave the circle
//! of radius 2, and turn that count into a colour; points that never
//! leave within the iteration depth are painted black.
//!
//! The canvas is cut into a square grid of tiles sized around 64
//! pixels on a side.  Each tile is rendered on its own thread into its
//! own buffer, and once every thread has finished the tiles are
//! painted into a single frame.  What happens to the frame afterwards
//! (saving it, showing it) is up to the caller.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod colour;
pub mod compositor;
pub mod errors;
pub mod escape;
pub mod params;
pub mod preview;
pub mod tiles;
pub mod worker;

pub use colour::{ColourMapper, Gradient, Hsv, Palette, Rgb};
pub use compositor::FrameBuffer;
pub use errors::{RenderError, Result};
pub use escape::escape_count;
pub use params::{Canvas, FractalParameters};

use log::info;

/// Render one frame: schedule the tiles, run them all, and paint the
/// result.  The tile buffers live only as long as this call, whether
/// it succeeds or not.
pub fn render(canvas: Canvas, params: &FractalParameters, palette: &Palette) -> Result<FrameBuffer> {
    render_with_stack(canvas, params, palette, None)
}

fn render_with_stack(
    canvas: Canvas,
    params: &FractalParameters,
    palette: &Palette,
    stack_size: Option<usize>,
) -> Result<FrameBuffer> {
    info!(
        "rendering {}x{} around {} (radius {}, depth {})",
        canvas.0,
        canvas.1,
        params.center(),
        params.radius(),
        params.depth()
    );
    let mut tiles = tiles::schedule(canvas, params);
    worker::run_with_stack(&mut tiles, stack_size)?;
    let mapper = ColourMapper::new(palette);
    let frame = compositor::composite(canvas, tiles, &mapper, params.exposure());
    info!("rendered {} pixels", frame.pixels().len());
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn scenario() -> FractalParameters {
        FractalParameters::new(Complex::new(-0.5, 0.0), 2.0, 50, 4.0).unwrap()
    }

    #[test]
    fn rendering_is_deterministic() {
        let palette = Palette::default();
        let first = render(Canvas(64, 64), &scenario(), &palette).unwrap();
        let second = render(Canvas(64, 64), &scenario(), &palette).unwrap();
        assert_eq!(first.to_rgb8(), second.to_rgb8());
        assert_eq!(first, second);
    }

    #[test]
    fn frame_matches_per_pixel_evaluation() {
        let params = scenario();
        let palette = Palette::default();
        let mapper = ColourMapper::new(&palette);
        let frame = render(Canvas(128, 64), &params, &palette).unwrap();
        assert_eq!((frame.width(), frame.height()), (128, 64));
        for &(x, y) in &[(0, 0), (64, 32), (100, 10), (127, 63), (5, 60)] {
            let c = Complex::new(-1.5 + 2.0 * (x as f64) / 128.0, -1.0 + 2.0 * (y as f64) / 64.0);
            let expected = mapper.map(escape_count(c, 50), 50, 4.0);
            assert_eq!(frame.get(x, y), expected, "pixel {},{}", x, y);
        }
    }

    #[test]
    fn refused_workers_yield_no_frame() {
        let stack = worker::UNSPAWNABLE_STACK;
        match render_with_stack(Canvas(256, 256), &scenario(), &Palette::default(), Some(stack)) {
            Err(RenderError::WorkerSpawn { requested, .. }) => assert_eq!(requested, 4),
            other => panic!("expected WorkerSpawn, got {:?}", other),
        }
    }

    #[test]
    fn large_frames_use_many_tiles_and_still_agree() {
        let params = scenario();
        let palette = Palette::Hsv;
        let frame = render(Canvas(512, 512), &params, &palette).unwrap();
        let mapper = ColourMapper::new(&palette);
        let c = Complex::new(-1.5 + 2.0 * 300.0 / 512.0, -1.0 + 2.0 * 17.0 / 512.0);
        assert_eq!(frame.get(300, 17), mapper.map(escape_count(c, 50), 50, 4.0));
    }
}

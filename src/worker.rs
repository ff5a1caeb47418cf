// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Runs the escape-time kernel over tiles, one OS thread per tile.
//!
//! Every worker gets exclusive access to one tile and nothing else, so
//! there is no locking; the crossbeam scope is the only barrier.  A
//! render either finishes every tile or fails as a whole.

use crate::errors::{RenderError, Result};
use crate::escape::escape_count;
use crate::tiles::Tile;
use itertools::iproduct;
use log::{debug, trace};
use num::Complex;

impl Tile {
    /// Fill this tile's buffer with escape counts.
    pub fn render(&mut self) {
        let (width, height, depth) = (self.width, self.height, self.depth);
        let start = self.start;
        let step = Complex::new(
            (self.end.re - self.start.re) / (width as f64),
            (self.end.im - self.start.im) / (height as f64),
        );
        for ((y, x), count) in iproduct!(0..height, 0..width).zip(self.buffer.iter_mut()) {
            let c = Complex::new(start.re + (x as f64) * step.re, start.im + (y as f64) * step.im);
            *count = escape_count(c, depth);
        }
    }
}

/// A page-aligned stack size no address space has room for, so the
/// OS refuses the very first worker.
#[cfg(test)]
pub(crate) const UNSPAWNABLE_STACK: usize = usize::max_value() / 4 + 1;

/// Render every tile in parallel and wait for all of them.  If a
/// worker can't be started, no more are spawned, the ones already
/// running are joined, and the render fails with the tile count it
/// asked for.
pub fn run(tiles: &mut [Tile]) -> Result<()> {
    run_with_stack(tiles, None)
}

/// `run` with an explicit stack size for every worker thread.
pub(crate) fn run_with_stack(tiles: &mut [Tile], stack_size: Option<usize>) -> Result<()> {
    let requested = tiles.len();
    let cores = num_cpus::get();
    if requested > cores {
        debug!("{} tile workers sharing {} cores", requested, cores);
    }

    let work: Vec<&mut Tile> = tiles.iter_mut().collect();
    let outcome = crossbeam::scope(|spawner| -> Result<()> {
        for tile in work {
            let index = tile.index;
            let mut builder = spawner.builder().name(format!("tile-{}", index));
            if let Some(size) = stack_size {
                builder = builder.stack_size(size);
            }
            builder
                .spawn(move |_| {
                    tile.render();
                    trace!("tile {} done", index);
                })
                .map_err(|cause| RenderError::WorkerSpawn {
                    requested,
                    index,
                    cause,
                })?;
        }
        Ok(())
    });

    match outcome {
        Ok(spawned) => spawned,
        Err(_) => Err(RenderError::WorkerPanicked { requested }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Canvas, FractalParameters};
    use crate::tiles::schedule;

    fn params() -> FractalParameters {
        FractalParameters::new(Complex::new(-0.5, 0.0), 2.0, 50, 4.0).unwrap()
    }

    #[test]
    fn tile_render_matches_direct_evaluation() {
        let mut tiles = schedule(Canvas(128, 128), &params());
        let tile = &mut tiles[0];
        tile.render();
        for y in 0..tile.height() {
            for x in 0..tile.width() {
                let expected = escape_count(tile.point_at(x, y), 50);
                assert_eq!(tile.counts()[y * tile.width() + x], expected);
            }
        }
    }

    #[test]
    fn counts_stay_within_depth() {
        let mut tiles = schedule(Canvas(64, 64), &params());
        run(&mut tiles).unwrap();
        assert!(tiles[0].counts().iter().all(|c| *c <= 50));
        // The viewport holds both the set and its outside.
        assert!(tiles[0].counts().iter().any(|c| *c == 50));
        assert!(tiles[0].counts().iter().any(|c| *c < 50));
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let mut parallel = schedule(Canvas(512, 256), &params());
        let mut sequential = parallel.clone();
        run(&mut parallel).unwrap();
        for tile in sequential.iter_mut() {
            tile.render();
        }
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn refused_workers_fail_the_whole_run() {
        let mut tiles = schedule(Canvas(512, 512), &params());
        let requested = tiles.len();
        match run_with_stack(&mut tiles, Some(UNSPAWNABLE_STACK)) {
            Err(RenderError::WorkerSpawn {
                requested: r,
                index: 0,
                ..
            }) => assert_eq!(r, requested),
            other => panic!("expected WorkerSpawn, got {:?}", other),
        }
        assert!(tiles.iter().all(|t| t.counts().iter().all(|c| *c == 0)));
    }

    #[test]
    fn explicit_stack_size_still_renders() {
        let mut tiles = schedule(Canvas(128, 128), &params());
        let mut expected = tiles.clone();
        run_with_stack(&mut tiles, Some(256 * 1024)).unwrap();
        for tile in expected.iter_mut() {
            tile.render();
        }
        assert_eq!(tiles, expected);
    }

    #[test]
    fn empty_tiles_are_harmless() {
        // Two columns of tiles over a one pixel wide canvas.
        let mut tiles = schedule(Canvas(1, 65536), &params());
        assert!(tiles.iter().any(|t| t.width() == 0));
        run(&mut tiles).unwrap();
        assert_eq!(tiles.iter().map(|t| t.counts().len()).sum::<usize>(), 65536);
    }
}

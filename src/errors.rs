// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a render.  All of these are terminal for
//! the render in progress; nothing is retried.

use failure::Fail;
use std::io;

/// The failure modes of configuring and running a render.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The radius of the viewport must be a positive, finite number.
    #[fail(display = "radius must be a positive number, got {}", _0)]
    InvalidRadius(f64),

    /// The iteration depth must be at least one.
    #[fail(display = "depth must be at least 1, got {}", _0)]
    InvalidDepth(u32),

    /// The exposure must be a positive, finite number.
    #[fail(display = "exposure must be a positive number, got {}", _0)]
    InvalidExposure(f64),

    /// A canvas with no pixels has nothing to render.
    #[fail(display = "canvas must not be empty, got {}x{}", width, height)]
    EmptyCanvas {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The canvas has more pixels than can be addressed or allocated.
    #[fail(display = "canvas is too large, got {}x{}", width, height)]
    CanvasTooLarge {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The gradient stops were unusable.
    #[fail(display = "invalid gradient: {}", _0)]
    InvalidGradient(String),

    /// The operating system refused to start one of the tile workers.
    #[fail(
        display = "could not start worker {} of {} requested tile workers: {}",
        index, requested, cause
    )]
    WorkerSpawn {
        /// Number of workers the render needed.
        requested: usize,
        /// The tile whose worker failed to start.
        index: usize,
        /// What the operating system said.
        #[cause]
        cause: io::Error,
    },

    /// A worker died before finishing its tile.  Tile rendering has no
    /// panic path, so this only guards the crossbeam scope result.
    #[fail(display = "a tile worker panicked; {} tiles were requested", requested)]
    WorkerPanicked {
        /// Number of workers the render needed.
        requested: usize,
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

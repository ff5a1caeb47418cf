// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A quick look at the viewport in plain text, handy for checking the
//! framing before paying for a full render.  This evaluates its own
//! small grid directly and shares nothing with the tiled path.

use crate::escape::escape_count;
use crate::params::FractalParameters;
use num::Complex;
use std::io::{self, Write};

/// Columns in the preview.
pub const PREVIEW_WIDTH: usize = 80;
/// Rows in the preview.
pub const PREVIEW_HEIGHT: usize = 35;
/// Density characters, from escaped-immediately to never-escaped.
pub const DENSITY_SCALE: &[u8] = b" .-oO0";

/// The density character for one escape count.
pub fn density(count: u32, depth: u32) -> char {
    let top = (DENSITY_SCALE.len() - 1) as u64;
    let index = (top * u64::from(count) / u64::from(depth)) as usize;
    DENSITY_SCALE[index.min(DENSITY_SCALE.len() - 1)] as char
}

/// Render the preview as lines of text, one per row.
pub fn preview_lines(params: &FractalParameters) -> Vec<String> {
    let (center, radius, depth) = (params.center(), params.radius(), params.depth());
    (0..PREVIEW_HEIGHT)
        .map(|y| {
            (0..PREVIEW_WIDTH)
                .map(|x| {
                    let c = Complex::new(
                        center.re + ((x as f64) / (PREVIEW_WIDTH as f64) - 0.5) * radius,
                        center.im + ((y as f64) / (PREVIEW_HEIGHT as f64) - 0.5) * radius,
                    );
                    density(escape_count(c, depth), depth)
                })
                .collect()
        })
        .collect()
}

/// Write the preview to `out`, newline-terminated.
pub fn write_preview<W: Write>(params: &FractalParameters, out: &mut W) -> io::Result<()> {
    for line in preview_lines(params) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

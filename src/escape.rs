// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.

use num::Complex;

/// Iterate z -> z² + c from z = 0 and report how many iterations
/// completed before |z|² passed 4.  Points that never pass the
/// threshold within `depth` iterations report `depth`, which callers
/// treat as "inside the set."
///
/// A `depth` of zero performs no iterations and returns 0.
#[inline]
pub fn escape_count(c: Complex<f64>, depth: u32) -> u32 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for n in 1..=depth {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return n;
        }
    }
    depth
}

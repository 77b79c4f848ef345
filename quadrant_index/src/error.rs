// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the tree and the geocoder.

use thiserror::Error;

/// Errors reported by [`QuadTree`][crate::QuadTree] insertion and the geocoder.
///
/// Queries never fail: absence is reported as `false` or an empty result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The point lies outside the bounding box it was inserted into or hashed against.
    ///
    /// Containment is half-open, so a point on the maximum edge of the root box is out of bounds.
    #[error("point lies outside the bounding box")]
    OutOfBounds,

    /// The cell can no longer be halved at the coordinate type's precision.
    #[error("coordinate precision exhausted after {depth} subdivisions")]
    PrecisionExhausted {
        /// Number of quadrant levels that were resolved before precision ran out.
        depth: usize,
    },

    /// A bounding box was inverted (`min > max`) or had a NaN edge.
    #[error("bounding box is inverted or has a NaN edge")]
    InvalidBounds,
}

// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant geohash: a point's address as successive quadrant indices.
//!
//! The subdivision is the same one the tree uses (midpoint splits with
//! half-open quadrants), but it is fixed by the global box alone. Two callers
//! that agree on the global box always compute the same address for a point,
//! whether or not a tree exists.

use crate::error::Error;
use crate::types::{BBox, Point, Quadrant, Scalar};

/// Number of levels that fit in a [`geohash_key`].
pub const MAX_KEY_LEVELS: usize = 32;

/// Start the quadrant sequence for `point` within the global box `bbox`.
///
/// Fails with [`Error::OutOfBounds`] if the point is not inside `bbox`
/// (half-open), which also rejects NaN coordinates.
///
/// The returned iterator is unbounded in principle; it ends only when the
/// cell can no longer be halved at the coordinate type's precision, at which
/// point it yields [`Error::PrecisionExhausted`] once and then stops. Take as
/// many levels as you need:
///
/// ```
/// use quadrant_index::{BBox, Point, Quadrant, geohash};
///
/// let world = BBox::new(0.0, 100.0, 0.0, 100.0);
/// let code: Result<Vec<_>, _> = geohash(world, Point::new(80.0, 10.0))?.take(3).collect();
/// assert_eq!(
///     code?,
///     [Quadrant::BottomRight, Quadrant::BottomRight, Quadrant::BottomLeft],
/// );
/// # Ok::<(), quadrant_index::Error>(())
/// ```
pub fn geohash<T: Scalar>(bbox: BBox<T>, point: Point<T>) -> Result<Geohash<T>, Error> {
    if !bbox.contains(point) {
        return Err(Error::OutOfBounds);
    }
    Ok(Geohash {
        cell: bbox,
        point,
        depth: 0,
        exhausted: false,
    })
}

/// Pack the first `levels` quadrant indices of `point` into a Z-order key.
///
/// Each level takes two bits, the coarsest level in the most significant
/// position, so keys that share a prefix share a cell. `levels` above
/// [`MAX_KEY_LEVELS`] fails with [`Error::PrecisionExhausted`].
///
/// ```
/// use quadrant_index::{BBox, Point, geohash_key};
///
/// let world = BBox::new(0.0, 100.0, 0.0, 100.0);
/// // BottomRight (1), BottomRight (1), BottomLeft (0)
/// assert_eq!(geohash_key(world, Point::new(80.0, 10.0), 3)?, 0b01_01_00);
/// # Ok::<(), quadrant_index::Error>(())
/// ```
pub fn geohash_key<T: Scalar>(bbox: BBox<T>, point: Point<T>, levels: usize) -> Result<u64, Error> {
    if levels > MAX_KEY_LEVELS {
        return Err(Error::PrecisionExhausted {
            depth: MAX_KEY_LEVELS,
        });
    }
    let mut key = 0_u64;
    for quadrant in geohash(bbox, point)?.take(levels) {
        key = (key << 2) | u64::from(quadrant? as u8);
    }
    Ok(key)
}

/// Iterator over a point's quadrant indices at ever finer subdivisions.
///
/// Created by [`geohash`]. Cloning it (or calling [`geohash`] again with the
/// same inputs) restarts from the same state and reproduces the same sequence.
#[derive(Clone, Debug)]
pub struct Geohash<T> {
    cell: BBox<T>,
    point: Point<T>,
    depth: usize,
    exhausted: bool,
}

impl<T: Scalar> Geohash<T> {
    /// Number of quadrant indices yielded so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The cell the point has been narrowed down to so far.
    pub fn cell(&self) -> BBox<T> {
        self.cell
    }

    /// The point being hashed.
    pub fn point(&self) -> Point<T> {
        self.point
    }
}

impl<T: Scalar> Iterator for Geohash<T> {
    type Item = Result<Quadrant, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if !self.cell.is_splittable() {
            self.exhausted = true;
            return Some(Err(Error::PrecisionExhausted { depth: self.depth }));
        }
        let quadrant = self.cell.quadrant_of(self.point);
        self.cell = self.cell.quadrant(quadrant);
        self.depth += 1;
        Some(Ok(quadrant))
    }
}

impl<T: Scalar> core::iter::FusedIterator for Geohash<T> {}

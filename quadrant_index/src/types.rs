// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt::Debug;

use crate::error::Error;

/// A point in 2D.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Create a new point.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<[T; 2]> for Point<T> {
    #[inline]
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

/// One of the four quadrants of a bounding box, split at its midpoint.
///
/// The `y` axis is taken to increase upwards, so "bottom" means lower `y`.
/// The discriminant is the quadrant index used by child ordering and by the
/// geocoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Quadrant {
    /// Lower x, lower y.
    BottomLeft = 0,
    /// Upper x, lower y.
    BottomRight = 1,
    /// Lower x, upper y.
    TopLeft = 2,
    /// Upper x, upper y.
    TopRight = 3,
}

impl Quadrant {
    /// All quadrants in index order.
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// The quadrant index in `0..4`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The quadrant with the given index, if it is in `0..4`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::BottomLeft),
            1 => Some(Self::BottomRight),
            2 => Some(Self::TopLeft),
            3 => Some(Self::TopRight),
            _ => None,
        }
    }

    // Bit 0 selects the upper x half, bit 1 the upper y half.
    #[inline]
    const fn from_halves(upper_x: bool, upper_y: bool) -> Self {
        match (upper_x, upper_y) {
            (false, false) => Self::BottomLeft,
            (true, false) => Self::BottomRight,
            (false, true) => Self::TopLeft,
            (true, true) => Self::TopRight,
        }
    }
}

/// Axis-aligned bounding box in 2D, stored as `(xmin, xmax, ymin, ymax)`.
///
/// Containment is half-open: the minimum edges belong to the box, the maximum
/// edges do not. Splitting a box at its midpoint therefore puts every point of
/// the box in exactly one quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BBox<T> {
    /// Minimum x (inclusive).
    pub xmin: T,
    /// Maximum x (exclusive).
    pub xmax: T,
    /// Minimum y (inclusive).
    pub ymin: T,
    /// Maximum y (exclusive).
    pub ymax: T,
}

impl<T> BBox<T> {
    /// Create a new box from its edges, in `(xmin, xmax, ymin, ymax)` order.
    ///
    /// The edges are not validated; see [`BBox::try_new`].
    #[inline(always)]
    pub const fn new(xmin: T, xmax: T, ymin: T, ymax: T) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

impl<T: Scalar> BBox<T> {
    /// Create a new box, rejecting inverted boxes and NaN edges.
    ///
    /// ```
    /// use quadrant_index::{BBox, Error};
    ///
    /// assert!(BBox::try_new(0.0, 1.0, 0.0, 1.0).is_ok());
    /// assert_eq!(BBox::try_new(1.0, 0.0, 0.0, 1.0), Err(Error::InvalidBounds));
    /// assert_eq!(BBox::try_new(0.0, f64::NAN, 0.0, 1.0), Err(Error::InvalidBounds));
    /// ```
    pub fn try_new(xmin: T, xmax: T, ymin: T, ymax: T) -> Result<Self, Error> {
        // `<=` is false for NaN, which is what rejects it here.
        if xmin <= xmax && ymin <= ymax {
            Ok(Self::new(xmin, xmax, ymin, ymax))
        } else {
            Err(Error::InvalidBounds)
        }
    }

    /// Whether this box contains the point (half-open on both axes).
    #[inline]
    pub fn contains(&self, point: Point<T>) -> bool {
        self.xmin <= point.x && point.x < self.xmax && self.ymin <= point.y && point.y < self.ymax
    }

    /// Determines whether some point could lie in both boxes.
    ///
    /// This is the axis-interval test under half-open semantics: boxes that
    /// only share an edge do not overlap, and neither does an empty box.
    ///
    /// ```
    /// use quadrant_index::BBox;
    ///
    /// // A long thin box crossing through the middle of another, with no corner inside it.
    /// let square = BBox::new(0.0, 10.0, 0.0, 10.0);
    /// let bar = BBox::new(-5.0, 15.0, 4.0, 6.0);
    /// assert!(square.overlaps(&bar));
    ///
    /// let neighbour = BBox::new(10.0, 20.0, 0.0, 10.0);
    /// assert!(!square.overlaps(&neighbour));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.xmin < other.xmax
            && other.xmin < self.xmax
            && self.ymin < other.ymax
            && other.ymin < self.ymax
    }

    /// The geometric midpoint (never the centroid of any stored data).
    #[inline]
    pub fn midpoint(&self) -> Point<T> {
        Point::new(T::mid(self.xmin, self.xmax), T::mid(self.ymin, self.ymax))
    }

    /// The quadrant of this box that `point` falls in, relative to the midpoint.
    ///
    /// The point is not required to lie inside the box.
    #[inline]
    pub fn quadrant_of(&self, point: Point<T>) -> Quadrant {
        let mid = self.midpoint();
        Quadrant::from_halves(point.x >= mid.x, point.y >= mid.y)
    }

    /// The box covering one quadrant.
    #[inline]
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let mid = self.midpoint();
        match quadrant {
            Quadrant::BottomLeft => Self::new(self.xmin, mid.x, self.ymin, mid.y),
            Quadrant::BottomRight => Self::new(mid.x, self.xmax, self.ymin, mid.y),
            Quadrant::TopLeft => Self::new(self.xmin, mid.x, mid.y, self.ymax),
            Quadrant::TopRight => Self::new(mid.x, self.xmax, mid.y, self.ymax),
        }
    }

    /// The four quadrant boxes, in quadrant index order.
    #[inline]
    pub fn quadrants(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }

    /// Whether halving this box still yields four non-empty quadrants.
    ///
    /// This is the coordinate precision floor: once a midpoint coincides with
    /// one of its edges, further subdivision no longer separates anything.
    #[inline]
    pub fn is_splittable(&self) -> bool {
        let mid = self.midpoint();
        self.xmin < mid.x && mid.x < self.xmax && self.ymin < mid.y && mid.y < self.ymax
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> T {
        T::sub(self.xmax, self.xmin)
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> T {
        T::sub(self.ymax, self.ymin)
    }

    /// Return true if the box has no area and so can contain no point. Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xmax <= self.xmin || self.ymax <= self.ymin
    }
}

/// Numeric scalar abstraction for coordinates.
///
/// This trait provides the minimal set of operations the tree and the
/// geocoder need: ordering, and an exact-as-possible midpoint.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Midpoint between a and b (used for quadrant boundaries).
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Halve first so that `a + b` cannot overflow to infinity.
        0.5 * a + 0.5 * b
    }
}

impl Scalar for f64 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Halve first so that `a + b` cannot overflow to infinity.
        0.5 * a + 0.5 * b
    }
}

impl Scalar for i64 {
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow, rounding towards -∞: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Point> for Point<f64> {
    #[inline]
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for BBox<f64> {
    /// Converts a kurbo rect, normalizing it first so that `min <= max`.
    #[inline]
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.x1, r.y0, r.y1)
    }
}

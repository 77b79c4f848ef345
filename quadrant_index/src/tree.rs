// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API over the recursive node algorithms.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::QuadTreeConfig;
use crate::error::Error;
use crate::node::{Node, Points};
use crate::types::{BBox, Point, Scalar};

/// A point quadtree over a fixed global bounding box.
///
/// Points are inserted one at a time and never removed. A leaf holding
/// [`max_points`][QuadTreeConfig::max_points] points splits into four
/// midpoint quadrants when another point arrives, unless it is already at
/// [`max_depth`][QuadTreeConfig::max_depth] or too small to halve at the
/// coordinate precision, in which case it simply grows.
///
/// The tree is not synchronized. Wrap it in a lock if insertions and queries
/// can come from different threads.
///
/// ## Example
///
/// ```rust
/// use quadrant_index::{BBox, Point, QuadTree, QuadTreeConfig};
///
/// let mut tree = QuadTree::with_config(
///     BBox::new(0.0, 100.0, 0.0, 100.0),
///     QuadTreeConfig::default().with_max_points(2),
/// );
/// tree.insert(Point::new(10.0, 10.0))?;
/// tree.insert(Point::new(20.0, 20.0))?;
/// tree.insert(Point::new(90.0, 90.0))?;
/// assert_eq!(tree.height(), 1);
///
/// assert!(tree.contains(Point::new(90.0, 90.0)));
/// let hits = tree.query_range(BBox::new(0.0, 50.0, 0.0, 50.0));
/// assert_eq!(hits, [Point::new(10.0, 10.0), Point::new(20.0, 20.0)]);
/// # Ok::<(), quadrant_index::Error>(())
/// ```
#[derive(Clone)]
pub struct QuadTree<T: Scalar = f64> {
    root: Node<T>,
    len: usize,
    config: QuadTreeConfig,
}

impl<T: Scalar> Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bbox", self.root.bbox())
            .field("len", &self.len)
            .field("config", &self.config)
            .field("height", &self.height())
            .field("leaves", &self.leaf_count())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> QuadTree<T> {
    /// Create an empty tree over `bbox` with the default configuration.
    pub fn new(bbox: BBox<T>) -> Self {
        Self::with_config(bbox, QuadTreeConfig::default())
    }

    /// Create an empty tree over `bbox` with explicit split and depth limits.
    pub fn with_config(bbox: BBox<T>, config: QuadTreeConfig) -> Self {
        Self {
            root: Node::leaf(bbox),
            len: 0,
            config,
        }
    }

    /// Insert a point.
    ///
    /// Fails with [`Error::OutOfBounds`] if the point is outside the tree's
    /// box (half-open, so the maximum edges are outside). The tree is left
    /// unchanged on failure.
    pub fn insert(&mut self, point: Point<T>) -> Result<(), Error> {
        match self.root.insert(point, 0, &self.config) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?point, bbox = ?self.root.bbox(), %err, "rejected insert");
                Err(err)
            }
        }
    }

    /// Insert every point from `points`, stopping at the first failure.
    ///
    /// Points inserted before the failing one stay in the tree.
    pub fn try_extend<I>(&mut self, points: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<Point<T>>,
    {
        for point in points {
            self.insert(point.into())?;
        }
        Ok(())
    }

    /// Whether a point coordinate-equal to `point` has been inserted.
    pub fn contains(&self, point: Point<T>) -> bool {
        self.root.contains(point)
    }

    /// Query for every point inside `bbox` (half-open).
    ///
    /// Results come out depth-first in quadrant order, which is deterministic
    /// for a given tree.
    pub fn query_range(&self, bbox: BBox<T>) -> Vec<Point<T>> {
        let mut out = Vec::new();
        self.visit_range(bbox, |p| out.push(p));
        out
    }

    /// Visit every point inside `bbox` (does not allocate result storage).
    ///
    /// Calls `f(point)` for each match, in the same order as [`query_range`][Self::query_range].
    pub fn visit_range<F: FnMut(Point<T>)>(&self, bbox: BBox<T>, mut f: F) {
        self.root.visit_range(&bbox, &mut f);
    }

    /// Iterate over every stored point, depth-first in quadrant order.
    ///
    /// Within a leaf, points come out in insertion order.
    pub fn iter(&self) -> Points<'_, T> {
        Points::new(&self.root)
    }

    /// Number of points inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no point has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The global bounding box.
    pub fn bbox(&self) -> BBox<T> {
        *self.root.bbox()
    }

    /// The split and depth limits.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Depth of the deepest leaf (0 while the root has not split).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Number of nodes, leaves and branches together.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl<'a, T: Scalar> IntoIterator for &'a QuadTree<T> {
    type Item = Point<T>;
    type IntoIter = Points<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

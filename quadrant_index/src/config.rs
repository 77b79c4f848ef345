// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning parameters for [`QuadTree`][crate::QuadTree].

/// Split and depth limits for a [`QuadTree`][crate::QuadTree].
///
/// Both values are fixed for the lifetime of a tree.
///
/// ```
/// use quadrant_index::QuadTreeConfig;
///
/// let config = QuadTreeConfig::default().with_max_points(4).with_max_depth(12);
/// assert_eq!(config.max_points(), 4);
/// assert_eq!(config.max_depth(), 12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadTreeConfig {
    max_points: usize,
    max_depth: usize,
}

impl QuadTreeConfig {
    /// Points a leaf may hold before inserting another one splits it.
    pub const DEFAULT_MAX_POINTS: usize = 20;

    /// Subdivision levels below the root before leaves stop splitting.
    pub const DEFAULT_MAX_DEPTH: usize = 999;

    /// Create a configuration with explicit limits.
    ///
    /// `max_points` must be at least one; zero is treated as one.
    pub fn new(max_points: usize, max_depth: usize) -> Self {
        debug_assert!(max_points > 0, "max_points must be strictly positive");
        Self {
            max_points: max_points.max(1),
            max_depth,
        }
    }

    /// Set the number of points a leaf holds before it splits.
    pub fn with_max_points(self, max_points: usize) -> Self {
        Self::new(max_points, self.max_depth)
    }

    /// Set the depth at which leaves stop splitting and overflow instead.
    ///
    /// The root is at depth 0, so a `max_depth` of 0 never splits.
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self::new(self.max_points, max_depth)
    }

    /// Points a leaf may hold before inserting another one splits it.
    #[inline]
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Depth at which leaves stop splitting.
    ///
    /// This counts subdivisions below the root, which is at depth 0, so a tree
    /// is at most `max_depth` levels deep:
    ///
    /// ```
    /// use quadrant_index::{BBox, Point, QuadTree, QuadTreeConfig};
    ///
    /// let mut tree = QuadTree::with_config(BBox::new(0.0, 8.0, 0.0, 8.0), QuadTreeConfig::new(1, 2));
    /// for _ in 0..4 {
    ///     tree.insert(Point::new(1.0, 1.0))?;
    /// }
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(QuadTreeConfig::new(1, 2).max_depth(), 2);
    /// # Ok::<(), quadrant_index::Error>(())
    /// ```
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_points: Self::DEFAULT_MAX_POINTS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

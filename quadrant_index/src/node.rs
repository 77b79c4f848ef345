// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive tree cells: insertion with in-place splits, point and range queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::slice;

use smallvec::SmallVec;

use crate::config::QuadTreeConfig;
use crate::error::Error;
use crate::types::{BBox, Point, Scalar};

/// Inline capacity of a leaf's point list before it spills to the heap.
const LEAF_INLINE: usize = 8;

type LeafPoints<T> = SmallVec<[Point<T>; LEAF_INLINE]>;

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    bbox: BBox<T>,
    kind: NodeKind<T>,
}

#[derive(Clone, Debug)]
enum NodeKind<T> {
    /// Points in insertion order.
    Leaf(LeafPoints<T>),
    /// Children in quadrant index order.
    Branch(Box<[Node<T>; 4]>),
}

impl<T: Scalar> Node<T> {
    /// An empty leaf covering `bbox`.
    pub(crate) fn leaf(bbox: BBox<T>) -> Self {
        Self {
            bbox,
            kind: NodeKind::Leaf(SmallVec::new()),
        }
    }

    pub(crate) fn bbox(&self) -> &BBox<T> {
        &self.bbox
    }

    /// Insert `point` into this node, which sits at `depth` below the root.
    ///
    /// A full leaf is replaced in place by a branch of four quadrant leaves,
    /// and the point then goes into the matching child one level down.
    pub(crate) fn insert(
        &mut self,
        point: Point<T>,
        depth: usize,
        config: &QuadTreeConfig,
    ) -> Result<(), Error> {
        if !self.bbox.contains(point) {
            return Err(Error::OutOfBounds);
        }

        if let NodeKind::Leaf(points) = &mut self.kind {
            if points.len() < config.max_points() || depth >= config.max_depth() {
                points.push(point);
                return Ok(());
            }
            if !self.bbox.is_splittable() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    depth,
                    points = points.len() + 1,
                    bbox = ?self.bbox,
                    "leaf at precision floor, overflowing instead of splitting"
                );
                points.push(point);
                return Ok(());
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(depth, points = points.len(), bbox = ?self.bbox, "splitting leaf");
            self.split();
        }

        let quadrant = self.bbox.quadrant_of(point);
        match &mut self.kind {
            NodeKind::Branch(children) => children[quadrant.index()].insert(point, depth + 1, config),
            NodeKind::Leaf(_) => unreachable!("quadtree invariant violated: full leaf was not split"),
        }
    }

    /// Replace this leaf by a branch, moving each point into the quadrant containing it.
    fn split(&mut self) {
        let NodeKind::Leaf(points) = &mut self.kind else {
            return;
        };
        let mut buckets: [LeafPoints<T>; 4] = core::array::from_fn(|_| SmallVec::new());
        for p in points.drain(..) {
            buckets[self.bbox.quadrant_of(p).index()].push(p);
        }
        let quadrants = self.bbox.quadrants();
        let children = core::array::from_fn(|i| Self {
            bbox: quadrants[i],
            kind: NodeKind::Leaf(core::mem::take(&mut buckets[i])),
        });
        self.kind = NodeKind::Branch(Box::new(children));
    }

    /// Whether a point coordinate-equal to `point` is stored under this node.
    pub(crate) fn contains(&self, point: Point<T>) -> bool {
        if !self.bbox.contains(point) {
            return false;
        }
        match &self.kind {
            NodeKind::Leaf(points) => points.iter().any(|p| *p == point),
            NodeKind::Branch(children) => {
                children[self.bbox.quadrant_of(point).index()].contains(point)
            }
        }
    }

    /// Visit every stored point inside `query`, depth-first in quadrant order.
    pub(crate) fn visit_range<F: FnMut(Point<T>)>(&self, query: &BBox<T>, f: &mut F) {
        match &self.kind {
            NodeKind::Leaf(points) => {
                for &p in points {
                    if query.contains(p) {
                        f(p);
                    }
                }
            }
            NodeKind::Branch(children) => {
                for child in children.iter() {
                    if child.bbox.overlaps(query) {
                        child.visit_range(query, f);
                    }
                }
            }
        }
    }

    /// Number of levels below this node (0 for a leaf).
    pub(crate) fn height(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Branch(children) => {
                1 + children.iter().map(Self::height).max().unwrap_or(0)
            }
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => children.iter().map(Self::leaf_count).sum(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => 1 + children.iter().map(Self::node_count).sum::<usize>(),
        }
    }
}

/// Iterator over every point in a [`QuadTree`][crate::QuadTree].
///
/// Leaves are visited depth-first in quadrant index order; points within a
/// leaf come out in insertion order. The order is stable for a given tree.
#[derive(Clone, Debug)]
pub struct Points<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: slice::Iter<'a, Point<T>>,
}

impl<'a, T> Points<'a, T> {
    pub(crate) fn new(root: &'a Node<T>) -> Self {
        let mut stack = Vec::new();
        stack.push(root);
        Self {
            stack,
            current: slice::Iter::default(),
        }
    }
}

impl<T: Copy> Iterator for Points<'_, T> {
    type Item = Point<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&p) = self.current.next() {
                return Some(p);
            }
            let node = self.stack.pop()?;
            match &node.kind {
                NodeKind::Leaf(points) => self.current = points.iter(),
                // Reversed so that quadrant 0 is popped first.
                NodeKind::Branch(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}

impl<T: Copy> core::iter::FusedIterator for Points<'_, T> {}

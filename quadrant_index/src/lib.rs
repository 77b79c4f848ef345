// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant Index: a point quadtree over a fixed 2D bounding box.
//!
//! Quadrant Index is a small building block for spatial point lookups.
//!
//! - Insert points one at a time; a leaf that fills up splits into four quadrants at its midpoint.
//! - Test whether a point has been stored, or collect every point inside a query rectangle.
//! - Compute a point's quadrant address (a geohash) against a global box, with or without a tree.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and does not depend on any
//! geometry crate. With the `kurbo` feature, kurbo points and rects convert into the crate's types.
//!
//! Bounding boxes are `(xmin, xmax, ymin, ymax)` and half-open: a point on a box's maximum edge
//! is outside it. Splitting at the geometric midpoint (never the data centroid) means that the
//! quadrant a point lands in depends only on its position, so the tree's subdivision and the
//! geohash agree for any insertion order.
//!
//! ## Features
//!
//! - `std` *(default)*: implements `std::error::Error` through `thiserror`'s std support.
//! - `kurbo`: conversions from `kurbo::Point` and `kurbo::Rect`. Needs `std` or `libm`.
//! - `tracing`: emits `trace` events for splits and `debug` events for rejected inserts and
//!   leaves that overflow at the coordinate precision floor.
//!
//! # Example
//!
//! ```rust
//! use quadrant_index::{BBox, Point, QuadTree, QuadTreeConfig};
//!
//! let mut tree = QuadTree::with_config(
//!     BBox::new(0.0, 100.0, 0.0, 100.0),
//!     QuadTreeConfig::default().with_max_points(2),
//! );
//! tree.try_extend([(10.0, 10.0), (20.0, 20.0), (90.0, 90.0)])?;
//!
//! assert!(tree.contains(Point::new(90.0, 90.0)));
//! assert!(!tree.contains(Point::new(50.0, 50.0)));
//!
//! let hits = tree.query_range(BBox::new(0.0, 50.0, 0.0, 50.0));
//! assert_eq!(hits.len(), 2);
//!
//! // Points outside the global box are rejected, not clamped.
//! assert!(tree.insert(Point::new(100.0, 10.0)).is_err());
//! assert_eq!(tree.len(), 3);
//! # Ok::<(), quadrant_index::Error>(())
//! ```
//!
//! The geocoder needs only the global box:
//!
//! ```rust
//! use quadrant_index::{BBox, Point, Quadrant, geohash};
//!
//! let world = BBox::new(-180.0, 180.0, -90.0, 90.0);
//! let mut hash = geohash(world, Point::new(-122.4, 37.8))?;
//! assert_eq!(hash.next(), Some(Ok(Quadrant::TopLeft)));
//! # Ok::<(), quadrant_index::Error>(())
//! ```
//!
//! ### Float semantics
//!
//! NaN coordinates are never inside any box, so they are rejected on insert and never found.
//! The depth of a tree is bounded both by its configured `max_depth` and by how many times the
//! scalar type can halve the root box; past that floor, leaves grow instead of splitting.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod geohash;
mod node;
mod tree;
mod types;

pub use config::QuadTreeConfig;
pub use error::Error;
pub use geohash::{Geohash, MAX_KEY_LEVELS, geohash, geohash_key};
pub use node::Points;
pub use tree::QuadTree;
pub use types::{BBox, Point, Quadrant, Scalar};

// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant VTK: write point collections as VTK PolyData files.
//!
//! Points from a [`QuadTree`][quadrant_index::QuadTree] (or any iterator of
//! points) are collected into [`Piece`]s, optionally with named per-point
//! attributes, and written by [`VtpWriter`] as an ASCII `.vtp` document that
//! ParaView and other VTK readers open as a point cloud.
//!
//! 2D points are written with `z = 0`.
//!
//! # Example
//!
//! ```rust
//! use quadrant_index::{BBox, QuadTree};
//! use quadrant_vtk::{Piece, VtpWriter};
//!
//! let mut tree = QuadTree::new(BBox::new(0.0, 1.0, 0.0, 1.0));
//! tree.try_extend([(0.25, 0.5), (0.75, 0.125)])?;
//!
//! let piece = Piece::from_points(&tree).with_attribute("weight", [1.0, 2.0]);
//! let xml = VtpWriter::new().write_string(&[piece])?;
//! assert!(xml.contains(r#"Name="weight""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod piece;
mod writer;

pub use error::VtkError;
pub use piece::{Attribute, Piece, UNNAMED_ATTRIBUTE, Value};
pub use writer::{ByteOrder, VtpWriter};

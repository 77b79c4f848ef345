// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point collections and their per-point attributes.

use quadrant_index::Point;

use crate::error::VtkError;

/// Name used for a single unnamed attribute.
pub const UNNAMED_ATTRIBUTE: &str = "point_data";

/// A scalar attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Written as `Int32`.
    Int(i32),
    /// Written as `Float32`.
    Float(f64),
    /// Written as `String`.
    Str(String),
}

impl Value {
    /// The VTK `DataArray` type name for this value.
    pub fn vtk_type(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int32",
            Self::Float(_) => "Float32",
            Self::Str(_) => "String",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// A named attribute: one value per point, in point order.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    values: Vec<Value>,
}

impl Attribute {
    /// The attribute name, written as the `DataArray` `Name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The values, in point order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An ordered collection of points with optional per-point attributes.
///
/// Each piece becomes one `<Piece>` element. Point order is preserved, and
/// attributes are written in the order they were added.
///
/// ```
/// use quadrant_index::{BBox, Point, QuadTree};
/// use quadrant_vtk::Piece;
///
/// let mut tree = QuadTree::new(BBox::new(0.0, 10.0, 0.0, 10.0));
/// tree.try_extend([(1.0, 2.0), (3.0, 4.0)])?;
///
/// let piece = Piece::from_points(&tree).with_attribute("id", [7, 8]);
/// assert_eq!(piece.len(), 2);
/// # Ok::<(), quadrant_index::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Piece {
    points: Vec<[f64; 3]>,
    attributes: Vec<Attribute>,
}

impl Piece {
    /// An empty piece.
    pub fn new() -> Self {
        Self::default()
    }

    /// A piece from 2D points, placed at `z = 0`.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Point<f64>>,
    {
        Self::from_xyz(points.into_iter().map(|p| {
            let p = p.into();
            [p.x, p.y, 0.0]
        }))
    }

    /// A piece from 3D coordinates.
    pub fn from_xyz<I: IntoIterator<Item = [f64; 3]>>(points: I) -> Self {
        Self {
            points: points.into_iter().collect(),
            attributes: Vec::new(),
        }
    }

    /// Add (or replace) a named attribute.
    ///
    /// The number of values is checked against the point count when the piece is written.
    pub fn with_attribute<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let attribute = Attribute {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        };
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self
    }

    /// Add a single unnamed attribute, written as [`UNNAMED_ATTRIBUTE`].
    pub fn with_values<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_attribute(UNNAMED_ATTRIBUTE, values)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the piece has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point coordinates, in order.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// The attributes, in the order they were added.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Check that every attribute has one value per point, all of one type.
    ///
    /// ASCII arrays are whitespace-separated, so string values must be
    /// non-empty and free of whitespace.
    pub fn validate(&self) -> Result<(), VtkError> {
        for attribute in &self.attributes {
            if attribute.values.len() != self.points.len() {
                return Err(VtkError::ArityMismatch {
                    name: attribute.name.clone(),
                    expected: self.points.len(),
                    found: attribute.values.len(),
                });
            }
            if let Some((first, rest)) = attribute.values.split_first() {
                let ty = first.vtk_type();
                if rest.iter().any(|v| v.vtk_type() != ty) {
                    return Err(VtkError::MixedTypes {
                        name: attribute.name.clone(),
                    });
                }
            }
            let unencodable = attribute.values.iter().position(|v| {
                matches!(v, Value::Str(s) if s.is_empty() || s.contains(char::is_whitespace))
            });
            if let Some(index) = unencodable {
                return Err(VtkError::UnencodableString {
                    name: attribute.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

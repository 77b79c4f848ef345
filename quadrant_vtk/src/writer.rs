// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serial VTK PolyData (`.vtp`) writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::VtkError;
use crate::piece::{Piece, Value};

/// Byte order recorded in the `VTKFile` header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// `LittleEndian`.
    LittleEndian,
    /// `BigEndian`.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the target platform.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::LittleEndian => "LittleEndian",
            Self::BigEndian => "BigEndian",
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

/// Writes pieces as an ASCII VTK PolyData document.
///
/// Every point becomes a vertex cell, so visualization tools render the
/// collection as a point cloud. All pieces are validated before any output is
/// produced.
///
/// ```
/// use quadrant_vtk::{Piece, VtpWriter};
///
/// let piece = Piece::from_points([(0.0, 0.0), (1.0, 2.0)]).with_attribute("id", [1, 2]);
/// let xml = VtpWriter::new().write_string(&[piece])?;
/// assert!(xml.contains(r#"<Piece NumberOfPoints="2" NumberOfVerts="2">"#));
/// # Ok::<(), quadrant_vtk::VtkError>(())
/// ```
#[derive(Clone, Debug)]
pub struct VtpWriter {
    byte_order: ByteOrder,
    write_point_data: bool,
    version: String,
}

impl Default for VtpWriter {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::native(),
            write_point_data: true,
            version: "0.1".to_owned(),
        }
    }
}

impl VtpWriter {
    /// A writer with native byte order, point data enabled, and file version `0.1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a byte order other than the native one.
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Whether to write `<PointData>` for pieces that have attributes.
    pub fn write_point_data(mut self, enabled: bool) -> Self {
        self.write_point_data = enabled;
        self
    }

    /// The `version` attribute of the `VTKFile` element.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Write `pieces` to a file at `path`, replacing it if it exists.
    pub fn write_file(&self, pieces: &[Piece], path: impl AsRef<Path>) -> Result<(), VtkError> {
        let path = path.as_ref();
        for piece in pieces {
            piece.validate()?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write(pieces, &mut out)?;
        out.flush()?;
        tracing::debug!(path = %path.display(), pieces = pieces.len(), "wrote VTK PolyData file");
        Ok(())
    }

    /// Write `pieces` to a string.
    pub fn write_string(&self, pieces: &[Piece]) -> Result<String, VtkError> {
        let mut buf = Vec::new();
        self.write(pieces, &mut buf)?;
        // quick-xml only emits UTF-8 and all inputs are `str`.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write `pieces` to `out`.
    pub fn write<W: Write>(&self, pieces: &[Piece], out: W) -> Result<(), VtkError> {
        for piece in pieces {
            piece.validate()?;
        }

        let mut xml = Writer::new_with_indent(out, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        xml.write_event(Event::Start(BytesStart::new("VTKFile").with_attributes([
            ("type", "PolyData"),
            ("version", self.version.as_str()),
            ("byte_order", self.byte_order.as_str()),
        ])))?;
        xml.write_event(Event::Start(BytesStart::new("PolyData")))?;

        for piece in pieces {
            self.write_piece(&mut xml, piece)?;
        }

        xml.write_event(Event::End(BytesEnd::new("PolyData")))?;
        xml.write_event(Event::End(BytesEnd::new("VTKFile")))?;
        tracing::debug!(pieces = pieces.len(), "encoded VTK PolyData");
        Ok(())
    }

    fn write_piece<W: Write>(&self, xml: &mut Writer<W>, piece: &Piece) -> Result<(), VtkError> {
        let n = piece.len().to_string();
        xml.write_event(Event::Start(
            BytesStart::new("Piece")
                .with_attributes([("NumberOfPoints", n.as_str()), ("NumberOfVerts", n.as_str())]),
        ))?;

        xml.write_event(Event::Start(BytesStart::new("Points")))?;
        let coords = join(piece.points().iter().flatten().map(|&c| float32(c)));
        data_array(
            xml,
            &[
                ("NumberOfComponents", "3"),
                ("type", "Float32"),
                ("format", "ascii"),
            ],
            &coords,
        )?;
        xml.write_event(Event::End(BytesEnd::new("Points")))?;

        if self.write_point_data && !piece.is_empty() && !piece.attributes().is_empty() {
            xml.write_event(Event::Start(BytesStart::new("PointData")))?;
            for attribute in piece.attributes() {
                let ty = attribute.values().first().map_or("Float32", Value::vtk_type);
                let text = join(attribute.values().iter().map(|v| match v {
                    Value::Int(i) => i.to_string(),
                    Value::Float(f) => float32(*f),
                    Value::Str(s) => s.clone(),
                }));
                data_array(
                    xml,
                    &[("type", ty), ("format", "ascii"), ("Name", attribute.name())],
                    &text,
                )?;
            }
            xml.write_event(Event::End(BytesEnd::new("PointData")))?;
        }

        xml.write_event(Event::Start(BytesStart::new("Verts")))?;
        let connectivity = join((0..piece.len()).map(|i| i.to_string()));
        data_array(
            xml,
            &[("type", "Int32"), ("Name", "connectivity"), ("format", "ascii")],
            &connectivity,
        )?;
        let offsets = join((1..=piece.len()).map(|i| i.to_string()));
        data_array(
            xml,
            &[("type", "Int32"), ("Name", "offsets"), ("format", "ascii")],
            &offsets,
        )?;
        xml.write_event(Event::End(BytesEnd::new("Verts")))?;

        xml.write_event(Event::End(BytesEnd::new("Piece")))?;
        tracing::trace!(points = piece.len(), attributes = piece.attributes().len(), "wrote piece");
        Ok(())
    }
}

fn data_array<W: Write>(
    xml: &mut Writer<W>,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<(), VtkError> {
    xml.write_event(Event::Start(
        BytesStart::new("DataArray").with_attributes(attributes.iter().copied()),
    ))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("DataArray")))?;
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Coordinates and float attributes are declared as Float32 arrays."
)]
fn float32(v: f64) -> String {
    (v as f32).to_string()
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrant_index::{BBox, QuadTree, QuadTreeConfig};

    #[test]
    fn header_and_piece_structure() {
        let piece = Piece::from_points([(0.5, 1.0), (2.0, 3.25)]);
        let xml = VtpWriter::new()
            .byte_order(ByteOrder::BigEndian)
            .write_string(&[piece])
            .unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0"?>"#), "{xml}");
        assert!(xml.contains(r#"<VTKFile type="PolyData" version="0.1" byte_order="BigEndian">"#));
        assert!(xml.contains(r#"<Piece NumberOfPoints="2" NumberOfVerts="2">"#));
        assert!(xml.contains(">0.5 1 0 2 3.25 0<"), "{xml}");
        assert!(xml.contains(r#"Name="connectivity" format="ascii">0 1<"#));
        assert!(xml.contains(r#"Name="offsets" format="ascii">1 2<"#));
        assert!(!xml.contains("PointData"));
    }

    #[test]
    fn attributes_become_typed_data_arrays() {
        let piece = Piece::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
            .with_attribute("id", [3, 1, 2])
            .with_attribute("mass", [0.5, 1.5, 2.5])
            .with_attribute("tag", ["a", "b", "c"]);
        let xml = VtpWriter::new().write_string(&[piece]).unwrap();

        assert!(xml.contains(r#"<DataArray type="Int32" format="ascii" Name="id">3 1 2<"#));
        assert!(xml.contains(r#"<DataArray type="Float32" format="ascii" Name="mass">0.5 1.5 2.5<"#));
        assert!(xml.contains(r#"<DataArray type="String" format="ascii" Name="tag">a b c<"#));

        let id = xml.find(r#"Name="id""#).unwrap();
        let mass = xml.find(r#"Name="mass""#).unwrap();
        assert!(id < mass, "attributes must keep insertion order");
    }

    #[test]
    fn unnamed_values_use_default_name() {
        let piece = Piece::from_points([(0.0, 0.0)]).with_values([42]);
        let xml = VtpWriter::new().write_string(&[piece]).unwrap();
        assert!(xml.contains(r#"Name="point_data">42<"#));
    }

    #[test]
    fn point_data_can_be_disabled() {
        let piece = Piece::from_points([(0.0, 0.0)]).with_attribute("id", [1]);
        let xml = VtpWriter::new()
            .write_point_data(false)
            .write_string(&[piece])
            .unwrap();
        assert!(!xml.contains("PointData"));
    }

    #[test]
    fn arity_mismatch_writes_nothing() {
        let good = Piece::from_points([(0.0, 0.0)]);
        let bad = Piece::from_points([(0.0, 0.0), (1.0, 1.0)]).with_attribute("id", [1, 2, 3]);
        let mut out = Vec::new();
        let err = VtpWriter::new().write(&[good, bad], &mut out).unwrap_err();
        assert!(matches!(
            err,
            VtkError::ArityMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn multi_token_string_writes_nothing() {
        let piece = Piece::from_points([(0.0, 0.0), (1.0, 1.0)]).with_attribute("tag", ["a b", "c"]);
        let mut out = Vec::new();
        let err = VtpWriter::new().write(&[piece], &mut out).unwrap_err();
        assert!(matches!(err, VtkError::UnencodableString { index: 0, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn one_piece_per_input() {
        let a = Piece::from_points([(0.0, 0.0)]);
        let b = Piece::from_xyz([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let xml = VtpWriter::new().version("1.0").write_string(&[a, b]).unwrap();
        assert_eq!(xml.matches("<Piece ").count(), 2);
        assert!(xml.contains(r#"version="1.0""#));
        assert!(xml.contains(">1 2 3 4 5 6<"));
    }

    #[test]
    fn tree_points_in_iteration_order() {
        let mut tree = QuadTree::with_config(
            BBox::new(0.0, 100.0, 0.0, 100.0),
            QuadTreeConfig::new(1, 8),
        );
        tree.try_extend([(75.0, 75.0), (25.0, 25.0)]).unwrap();
        let xml = VtpWriter::new()
            .write_string(&[Piece::from_points(&tree)])
            .unwrap();
        assert!(xml.contains(">25 25 0 75 75 0<"), "{xml}");
    }

    #[test]
    fn write_file_roundtrips_through_disk() {
        let path = std::env::temp_dir().join(format!("quadrant_vtk_{}.vtp", std::process::id()));
        let piece = Piece::from_points([(1.0, 2.0)]).with_attribute("id", [9]);
        VtpWriter::new().write_file(&[piece.clone()], &path).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(on_disk, VtpWriter::new().write_string(&[piece]).unwrap());
    }
}

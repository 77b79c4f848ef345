// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while validating or writing pieces.

use thiserror::Error;

/// Errors produced by [`VtpWriter`][crate::VtpWriter].
#[derive(Debug, Error)]
pub enum VtkError {
    /// The output could not be created or written.
    #[error("failed to write VTK output")]
    Io(#[from] std::io::Error),

    /// The XML writer failed.
    #[error("failed to encode VTK XML")]
    Xml(#[from] quick_xml::Error),

    /// An attribute does not carry exactly one value per point.
    #[error("attribute `{name}` has {found} values for {expected} points")]
    ArityMismatch {
        /// Attribute name.
        name: String,
        /// Number of points in the piece.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// A string value is empty or contains whitespace, so it would not be read
    /// back as exactly one ASCII token.
    #[error("attribute `{name}` has an empty or whitespace-containing string at index {index}")]
    UnencodableString {
        /// Attribute name.
        name: String,
        /// Position of the offending value.
        index: usize,
    },

    /// An attribute holds values of more than one type.
    #[error("attribute `{name}` mixes value types")]
    MixedTypes {
        /// Attribute name.
        name: String,
    },
}

// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Defines `QuiverError` for representing failures in various quiver operations.

use crate::DataType;

/// Many different operations in the `quiver` crates return this error type.
#[derive(Debug, thiserror::Error)]
pub enum QuiverError {
    /// An index or row range fell outside the bounds of an array or collection.
    #[error("Index out of range: {index} is not within 0..{len}")]
    IndexOutOfRange {
        /// The offending index (for ranges, the exclusive end that overflowed)
        index: usize,
        /// The length that was exceeded
        len: usize,
    },
    /// A descriptor or array could not be constructed from the given arguments.
    #[error("Invalid argument error: {0}")]
    InvalidArgument(String),
    /// An array's buffers are inconsistent with its declared shape.
    #[error("Invalid array: {0}")]
    Validation(#[from] ValidationError),
}

/// The first structural invariant an array was found to violate.
///
/// Returned (wrapped in [`QuiverError::Validation`]) by the `validate` family
/// of methods. Only one violation is ever reported; fix it and validate again
/// to discover the next.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The validity bitmap has fewer bytes than the array length requires.
    #[error("null bitmap needs at least {expected} bytes but got {actual}")]
    NullBitmapTooSmall {
        /// Bytes required to hold one bit per row
        expected: usize,
        /// Bytes present
        actual: usize,
    },
    /// The declared null count disagrees with the validity bitmap (or its absence).
    #[error("declared null count {declared} does not match the {expected} nulls in the bitmap")]
    NullCountMismatch {
        /// The null count the array was built with
        declared: usize,
        /// The number of null rows implied by the bitmap
        expected: usize,
    },
    /// The type id buffer does not hold exactly one int16 per row.
    #[error("union type id buffer has {actual} entries but the array has {expected} rows")]
    TagLengthMismatch {
        /// The array length
        expected: usize,
        /// Number of int16 entries in the buffer
        actual: usize,
    },
    /// The dense union offset buffer does not hold exactly one int32 per row.
    #[error("dense union offset buffer has {actual} entries but the array has {expected} rows")]
    OffsetLengthMismatch {
        /// The array length
        expected: usize,
        /// Number of int32 entries in the buffer
        actual: usize,
    },
    /// The number of child arrays differs from the number of declared fields.
    #[error("expected {expected} child arrays but got {actual}")]
    ChildCountMismatch {
        /// Declared number of children
        expected: usize,
        /// Children supplied
        actual: usize,
    },
    /// A child array's type differs from the type declared for its slot.
    #[error("child array #{child} should be {expected} but has type {actual}")]
    ChildTypeMismatch {
        /// Index of the offending child
        child: usize,
        /// Declared type
        expected: DataType,
        /// Actual type of the child
        actual: DataType,
    },
    /// A row's type id does not select any child.
    #[error("type id {tag} at row {row} is not in 0..{num_children}")]
    TagOutOfRange {
        /// The offending row
        row: usize,
        /// Its type id
        tag: i16,
        /// Number of children
        num_children: usize,
    },
    /// A dense union row points outside its selected child.
    #[error("offset {offset} at row {row} is out of bounds for child #{child} of length {child_len}")]
    OffsetOutOfRange {
        /// The offending row
        row: usize,
        /// Its offset
        offset: i32,
        /// The child selected by the row's type id
        child: usize,
        /// Length of that child
        child_len: usize,
    },
    /// A sparse union child is not as long as the union.
    #[error("sparse union child array #{child} has length {actual} but the union has {expected} rows")]
    SparseChildLengthMismatch {
        /// Index of the offending child
        child: usize,
        /// The union length
        expected: usize,
        /// The child length
        actual: usize,
    },
    /// A struct child is not as long as the struct.
    #[error("child array #{child} has length {actual} but the parent has {expected} rows")]
    ChildLengthMismatch {
        /// Index of the offending child
        child: usize,
        /// The parent length
        expected: usize,
        /// The child length
        actual: usize,
    },
    /// A data buffer is smaller than the array length requires.
    #[error("need at least {expected} bytes in the {buffer} buffer of {data_type} array but got {actual}")]
    BufferTooSmall {
        /// The array type
        data_type: DataType,
        /// Which buffer, e.g. `values` or `offsets`
        buffer: &'static str,
        /// Bytes required
        expected: usize,
        /// Bytes present
        actual: usize,
    },
    /// A typed buffer does not start at the alignment of its native type.
    #[error("misaligned {buffer} buffer in {data_type} array: offset from expected alignment of {align} by {offset}")]
    MisalignedBuffer {
        /// The array type
        data_type: DataType,
        /// Which buffer, e.g. `type_ids` or `offsets`
        buffer: &'static str,
        /// Required alignment in bytes
        align: usize,
        /// Distance in bytes from the previous aligned address
        offset: usize,
    },
    /// A variable-length offset is negative, decreasing, or past the end of the values.
    #[error("invalid offset at index {index}: {offset} (previous {previous}, values length {values_len})")]
    InvalidOffset {
        /// Index into the offsets buffer
        index: usize,
        /// The offending offset
        offset: i32,
        /// The offset before it
        previous: i32,
        /// Length of the values the offsets point into
        values_len: usize,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_source() {
        let err = QuiverError::from(ValidationError::TagOutOfRange {
            row: 2,
            tag: 3,
            num_children: 2,
        });
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "type id 3 at row 2 is not in 0..2");
        assert_eq!(
            err.to_string(),
            "Invalid array: type id 3 at row 2 is not in 0..2"
        );
    }

    #[test]
    fn index_out_of_range_display() {
        let err = QuiverError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(err.to_string(), "Index out of range: 3 is not within 0..1");
    }
}

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

//! Contains [`ArrayData`], the closed set of array representations, and the
//! concrete array kinds it dispatches to.

use std::sync::Arc;

use arrow_buffer::Buffer;
use quiver_schema::{DataType, QuiverError, ValidationError};

mod boolean;
mod bytes;
mod list;
mod null;
mod nulls;
mod primitive;
mod r#struct;
mod union;

pub use boolean::*;
pub use bytes::*;
pub use list::*;
pub use null::*;
pub use nulls::*;
pub use primitive::*;
pub use r#struct::*;
pub use union::*;

pub(crate) use nulls::contains_nulls;

/// A reference-counted reference to an [`ArrayData`].
pub type ArrayRef = Arc<ArrayData>;

/// An immutable array of any supported kind.
///
/// Every operation shared by all arrays (length, type, nulls, validation,
/// equality) is implemented by an exhaustive `match` over the variants.
#[derive(Debug, Clone)]
pub enum ArrayData {
    /// An array of [`DataType::Null`]
    Null(NullArray),
    /// An array of [`DataType::Boolean`]
    Boolean(BooleanArray),
    /// An array of fixed width integers or floats
    Primitive(PrimitiveArray),
    /// An array of [`DataType::Utf8`] or [`DataType::Binary`]
    Bytes(BytesArray),
    /// An array of [`DataType::List`]
    List(ListArray),
    /// An array of [`DataType::Struct`]
    Struct(StructArray),
    /// A [`DataType::Union`] array with the dense layout
    DenseUnion(DenseUnionArray),
    /// A [`DataType::Union`] array with the sparse layout
    SparseUnion(SparseUnionArray),
}

macro_rules! array_op {
    ($array:ident, $op:block) => {
        match $array {
            ArrayData::Null($array) => $op
            ArrayData::Boolean($array) => $op
            ArrayData::Primitive($array) => $op
            ArrayData::Bytes($array) => $op
            ArrayData::List($array) => $op
            ArrayData::Struct($array) => $op
            ArrayData::DenseUnion($array) => $op
            ArrayData::SparseUnion($array) => $op
        }
    };
}

impl ArrayData {
    /// Returns a reference to the [`DataType`] of this array
    #[inline]
    pub fn data_type(&self) -> &DataType {
        let s = self;
        array_op!(s, { s.data_type() })
    }

    /// Returns the number of rows in this array
    #[inline]
    pub fn len(&self) -> usize {
        let s = self;
        array_op!(s, { s.len() })
    }

    /// Returns `true` if this array has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the declared number of null rows
    #[inline]
    pub fn null_count(&self) -> usize {
        let s = self;
        array_op!(s, { s.null_count() })
    }

    /// Returns the validity bitmap of this array, if any
    ///
    /// A [`NullArray`] has no bitmap even though all of its rows are null.
    #[inline]
    pub fn nulls(&self) -> Option<&Buffer> {
        match self {
            ArrayData::Null(_) => None,
            ArrayData::Boolean(a) => a.nulls().buffer(),
            ArrayData::Primitive(a) => a.nulls().buffer(),
            ArrayData::Bytes(a) => a.nulls().buffer(),
            ArrayData::List(a) => a.nulls().buffer(),
            ArrayData::Struct(a) => a.nulls().buffer(),
            ArrayData::DenseUnion(a) => a.nulls().buffer(),
            ArrayData::SparseUnion(a) => a.nulls().buffer(),
        }
    }

    /// Returns `true` if row `i` is null
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        let s = self;
        array_op!(s, { s.is_null(i) })
    }

    /// Returns `true` if row `i` is not null
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        !self.is_null(i)
    }

    /// Returns the child arrays of this array, empty for non-nested kinds
    pub fn child_data(&self) -> &[ArrayRef] {
        match self {
            ArrayData::Null(_)
            | ArrayData::Boolean(_)
            | ArrayData::Primitive(_)
            | ArrayData::Bytes(_) => &[],
            ArrayData::List(a) => std::slice::from_ref(a.values()),
            ArrayData::Struct(a) => a.children(),
            ArrayData::DenseUnion(a) => a.children(),
            ArrayData::SparseUnion(a) => a.children(),
        }
    }

    /// Returns the shared union representation if this is a dense or sparse union
    pub fn as_union(&self) -> Option<&UnionArray> {
        match self {
            ArrayData::DenseUnion(a) => Some(a.union()),
            ArrayData::SparseUnion(a) => Some(a.union()),
            _ => None,
        }
    }

    /// Checks the buffers of this array are consistent with its declared
    /// shape, returning the first violation found.
    ///
    /// Child arrays are only checked for their length and type, never for
    /// their content; see [`Self::validate_full`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let s = self;
        array_op!(s, { s.validate() })
    }

    /// Validates this array and then, depth first, every array nested in it
    pub fn validate_full(&self) -> Result<(), ValidationError> {
        self.validate()?;
        let children = self.child_data();
        if !children.is_empty() {
            log::debug!(
                "validating {} children of {} array with {} rows",
                children.len(),
                self.data_type(),
                self.len()
            );
        }
        children.iter().try_for_each(|child| child.validate_full())
    }

    /// Returns `true` if `self` and `other` are structurally equal.
    ///
    /// See [`crate::equal`]
    pub fn equals(&self, other: &ArrayData) -> bool {
        crate::equal(self, other)
    }

    /// Compares rows `start..end` of `self` with the same number of rows of
    /// `other` starting at `other_start`.
    ///
    /// See [`crate::range_equal`]
    pub fn range_equals(
        &self,
        start: usize,
        end: usize,
        other_start: usize,
        other: &ArrayData,
    ) -> Result<bool, QuiverError> {
        crate::range_equal(self, other, start, end, other_start)
    }
}

impl PartialEq for ArrayData {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

macro_rules! array_from {
    ($t:ty, $v:ident) => {
        impl From<$t> for ArrayData {
            fn from(value: $t) -> Self {
                ArrayData::$v(value)
            }
        }

        impl From<$t> for ArrayRef {
            fn from(value: $t) -> Self {
                Arc::new(ArrayData::$v(value))
            }
        }
    };
}

array_from!(NullArray, Null);
array_from!(BooleanArray, Boolean);
array_from!(PrimitiveArray, Primitive);
array_from!(BytesArray, Bytes);
array_from!(ListArray, List);
array_from!(StructArray, Struct);
array_from!(DenseUnionArray, DenseUnion);
array_from!(SparseUnionArray, SparseUnion);

/// Runs `validate` on a freshly constructed array when the `force_validate`
/// feature is enabled, panicking on failure
#[inline]
pub(crate) fn force_validate<T>(
    array: T,
    validate: impl FnOnce(&T) -> Result<(), ValidationError>,
) -> T {
    #[cfg(feature = "force_validate")]
    {
        log::debug!("force_validate: validating array on construction");
        if let Err(e) = validate(&array) {
            panic!("Invalid array: {e}");
        }
    }
    #[cfg(not(feature = "force_validate"))]
    let _ = validate;
    array
}

/// Returns the number of `T` sized entries held by `buffer`
#[inline]
pub(crate) fn entries<T>(buffer: &Buffer) -> usize {
    buffer.len() / std::mem::size_of::<T>()
}

/// Checks that a non-empty `buffer` starts at a multiple of `align` bytes,
/// as required to view it as a slice of a native type of that alignment
pub(crate) fn validate_alignment(
    data_type: &DataType,
    buffer_name: &'static str,
    buffer: &Buffer,
    align: usize,
) -> Result<(), ValidationError> {
    let offset = buffer.as_ptr() as usize % align;
    if buffer.is_empty() || offset == 0 {
        return Ok(());
    }
    Err(ValidationError::MisalignedBuffer {
        data_type: data_type.clone(),
        buffer: buffer_name,
        align,
        offset,
    })
}

/// Validates `len + 1` int32 value offsets read from `offsets` against a
/// value range of `values_len`
///
/// The offsets must start at or after zero, never decrease, and end at or
/// before `values_len`.
pub(crate) fn validate_offsets(
    data_type: &DataType,
    offsets: &Buffer,
    len: usize,
    values_len: usize,
) -> Result<(), ValidationError> {
    if len == 0 && offsets.is_empty() {
        return Ok(());
    }
    let needed = (len + 1) * std::mem::size_of::<i32>();
    if offsets.len() < needed {
        return Err(ValidationError::BufferTooSmall {
            data_type: data_type.clone(),
            buffer: "offsets",
            expected: needed,
            actual: offsets.len(),
        });
    }

    validate_alignment(data_type, "offsets", offsets, std::mem::align_of::<i32>())?;

    let mut previous = 0_i32;
    for (index, chunk) in offsets.as_slice()[..needed].chunks_exact(4).enumerate() {
        let offset = i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let in_bounds = usize::try_from(offset).is_ok_and(|o| o <= values_len);
        if !in_bounds || offset < previous {
            return Err(ValidationError::InvalidOffset {
                index,
                offset,
                previous,
                values_len,
            });
        }
        previous = offset;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_offsets() {
        let data_type = DataType::Utf8;
        let offsets = Buffer::from_vec(vec![0_i32, 2, 2, 5]);
        assert!(validate_offsets(&data_type, &offsets, 3, 5).is_ok());

        let err = validate_offsets(&data_type, &offsets, 3, 4).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidOffset {
                index: 3,
                offset: 5,
                previous: 2,
                values_len: 4
            }
        );

        let offsets = Buffer::from_vec(vec![0_i32, 3, 1]);
        let err = validate_offsets(&data_type, &offsets, 2, 5).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOffset { index: 2, .. }));

        let offsets = Buffer::from_vec(vec![-1_i32, 1]);
        let err = validate_offsets(&data_type, &offsets, 1, 5).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOffset { index: 0, .. }));
    }

    #[test]
    fn test_validate_offsets_too_small() {
        let offsets = Buffer::from_vec(vec![0_i32, 2]);
        let err = validate_offsets(&DataType::Binary, &offsets, 2, 5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BufferTooSmall {
                data_type: DataType::Binary,
                buffer: "offsets",
                expected: 12,
                actual: 8
            }
        );
        assert!(validate_offsets(&DataType::Binary, &Buffer::from_vec(Vec::<i32>::new()), 0, 0).is_ok());
    }

    #[test]
    fn test_child_data() {
        let values: ArrayRef = PrimitiveArray::from(vec![1_i32, 2, 3]).into();
        let list = ListArray::new(
            DataType::new_list(DataType::Int32),
            2,
            Buffer::from_vec(vec![0_i32, 1, 3]),
            values,
            Nulls::none(),
        );
        let list = ArrayData::from(list);
        assert_eq!(list.child_data().len(), 1);
        assert!(list.as_union().is_none());
        assert!(list.validate_full().is_ok());
    }
}

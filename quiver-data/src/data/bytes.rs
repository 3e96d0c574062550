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

use std::ops::Range;

use arrow_buffer::{ArrowNativeType, Buffer};
use quiver_schema::{DataType, QuiverError, ValidationError};

use crate::data::{force_validate, validate_offsets, Nulls};

/// An array of variable length [`DataType::Utf8`] or [`DataType::Binary`]
/// values, located by `len + 1` int32 offsets into a shared values buffer
#[derive(Debug, Clone)]
pub struct BytesArray {
    data_type: DataType,
    len: usize,
    offsets: Buffer,
    values: Buffer,
    nulls: Nulls,
}

impl BytesArray {
    /// Create a new [`BytesArray`].
    ///
    /// Only the data type is checked; call [`Self::validate`] before use,
    /// or use [`Self::try_new`].
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is not `Utf8` or `Binary`
    pub fn new(
        data_type: DataType,
        len: usize,
        offsets: Buffer,
        values: Buffer,
        nulls: Nulls,
    ) -> Self {
        assert!(
            matches!(data_type, DataType::Utf8 | DataType::Binary),
            "Illegal data type for BytesArray: {data_type}"
        );
        let array = Self::from_parts(data_type, len, offsets, values, nulls);
        force_validate(array, Self::validate)
    }

    /// Create a new [`BytesArray`], returning an error if `data_type` is not
    /// `Utf8` or `Binary` or the array is invalid
    pub fn try_new(
        data_type: DataType,
        len: usize,
        offsets: Buffer,
        values: Buffer,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        if !matches!(data_type, DataType::Utf8 | DataType::Binary) {
            return Err(QuiverError::InvalidArgument(format!(
                "Illegal data type for BytesArray: {data_type}"
            )));
        }
        let array = Self::from_parts(data_type, len, offsets, values, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(
        data_type: DataType,
        len: usize,
        offsets: Buffer,
        values: Buffer,
        nulls: Nulls,
    ) -> Self {
        Self {
            data_type,
            len,
            offsets,
            values,
            nulls,
        }
    }

    fn from_optional_values<'a>(
        data_type: DataType,
        iter: impl IntoIterator<Item = Option<&'a [u8]>>,
    ) -> Self {
        let mut offsets = vec![0_i32];
        let mut values = Vec::new();
        let mut validity = Vec::new();
        for value in iter {
            validity.push(value.is_some());
            values.extend_from_slice(value.unwrap_or_default());
            offsets.push(values.len() as i32);
        }
        let len = validity.len();
        Self::new(
            data_type,
            len,
            Buffer::from_vec(offsets),
            Buffer::from_vec(values),
            Nulls::from_validity(validity),
        )
    }

    /// Create a [`DataType::Utf8`] array where `None` is null
    pub fn from_strs<'a>(iter: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let iter = iter.into_iter().map(|s| s.map(str::as_bytes));
        Self::from_optional_values(DataType::Utf8, iter)
    }

    /// Create a [`DataType::Binary`] array where `None` is null
    pub fn from_bytes<'a>(iter: impl IntoIterator<Item = Option<&'a [u8]>>) -> Self {
        Self::from_optional_values(DataType::Binary, iter)
    }

    /// Returns the data type of this array
    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns the length of this array
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this array has zero length
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the offsets of this array
    #[inline]
    pub fn value_offsets(&self) -> &[i32] {
        self.offsets.typed_data()
    }

    /// Returns the concatenated bytes of every value
    #[inline]
    pub fn values(&self) -> &Buffer {
        &self.values
    }

    /// Returns the byte range of row `i` in [`Self::values`]
    #[inline]
    pub fn value_range(&self, i: usize) -> Range<usize> {
        let offsets = self.value_offsets();
        offsets[i].as_usize()..offsets[i + 1].as_usize()
    }

    /// Returns the bytes of row `i`, ignoring nullness
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()` or the offsets are invalid
    #[inline]
    pub fn value(&self, i: usize) -> &[u8] {
        &self.values.as_slice()[self.value_range(i)]
    }

    /// Returns the null tracking of this array
    #[inline]
    pub fn nulls(&self) -> &Nulls {
        &self.nulls
    }

    /// Returns the declared number of null rows
    #[inline]
    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// Returns `true` if row `i` is null
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        self.nulls.is_null(i)
    }

    /// Checks the null bitmap and that the offsets are in bounds of the values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        validate_offsets(&self.data_type, &self.offsets, self.len, self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_strs() {
        let array = BytesArray::from_strs([Some("hello"), None, Some(""), Some("x")]);
        assert_eq!(array.data_type(), &DataType::Utf8);
        assert_eq!(array.len(), 4);
        assert_eq!(array.null_count(), 1);
        assert_eq!(array.value(0), b"hello");
        assert_eq!(array.value(1), b"");
        assert_eq!(array.value(3), b"x");
        assert_eq!(array.value_offsets(), &[0, 5, 5, 5, 6]);
        assert!(array.validate().is_ok());
    }

    #[test]
    fn test_offsets_past_values() {
        let array = BytesArray::try_new(
            DataType::Binary,
            2,
            Buffer::from_vec(vec![0_i32, 2, 7]),
            Buffer::from_slice_ref(b"abcde"),
            Nulls::none(),
        );
        let err = array.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid array: invalid offset at index 2: 7 (previous 2, values length 5)"
        );
    }
}

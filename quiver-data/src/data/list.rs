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

use crate::data::{force_validate, validate_offsets, ArrayRef, Nulls};

/// An array of [`DataType::List`], where row `i` holds the elements
/// `offsets[i]..offsets[i + 1]` of a child values array
#[derive(Debug, Clone)]
pub struct ListArray {
    data_type: DataType,
    len: usize,
    offsets: Buffer,
    values: ArrayRef,
    nulls: Nulls,
}

impl ListArray {
    /// Create a new [`ListArray`].
    ///
    /// Only the data type is checked; call [`Self::validate`] before use,
    /// or use [`Self::try_new`].
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is not a list
    pub fn new(
        data_type: DataType,
        len: usize,
        offsets: Buffer,
        values: ArrayRef,
        nulls: Nulls,
    ) -> Self {
        assert!(
            matches!(data_type, DataType::List(_)),
            "ListArray data type should be a list, got {data_type}"
        );
        let array = Self::from_parts(data_type, len, offsets, values, nulls);
        force_validate(array, Self::validate)
    }

    /// Create a new [`ListArray`], returning an error if `data_type` is not
    /// a list or the array is invalid
    pub fn try_new(
        data_type: DataType,
        len: usize,
        offsets: Buffer,
        values: ArrayRef,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        if !matches!(data_type, DataType::List(_)) {
            return Err(QuiverError::InvalidArgument(format!(
                "ListArray data type should be a list, got {data_type}"
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
        values: ArrayRef,
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

    /// Returns the child array holding the elements of every list
    #[inline]
    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    /// Returns the range of [`Self::values`] holding the elements of row `i`
    #[inline]
    pub fn value_range(&self, i: usize) -> Range<usize> {
        let offsets = self.value_offsets();
        offsets[i].as_usize()..offsets[i + 1].as_usize()
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

    /// Checks the null bitmap, the type of the values array, and that the
    /// offsets are in bounds of it
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        if let DataType::List(item) = &self.data_type {
            if self.values.data_type() != item.as_ref() {
                return Err(ValidationError::ChildTypeMismatch {
                    child: 0,
                    expected: item.as_ref().clone(),
                    actual: self.values.data_type().clone(),
                });
            }
        }
        validate_offsets(&self.data_type, &self.offsets, self.len, self.values.len())
    }
}

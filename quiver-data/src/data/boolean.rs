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

use arrow_buffer::{bit_util, Buffer};
use quiver_schema::{DataType, ValidationError};

use crate::data::{force_validate, Nulls};

/// An array of [`DataType::Boolean`] with bit-packed values
#[derive(Debug, Clone)]
pub struct BooleanArray {
    data_type: DataType,
    len: usize,
    values: Buffer,
    nulls: Nulls,
}

impl BooleanArray {
    /// Create a new [`BooleanArray`] from bit-packed `values`.
    ///
    /// Nothing is checked; call [`Self::validate`] before use, or use
    /// [`Self::try_new`].
    pub fn new(len: usize, values: Buffer, nulls: Nulls) -> Self {
        force_validate(Self::from_parts(len, values, nulls), Self::validate)
    }

    /// Create a new [`BooleanArray`], returning an error if it is invalid
    pub fn try_new(len: usize, values: Buffer, nulls: Nulls) -> Result<Self, ValidationError> {
        let array = Self::from_parts(len, values, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(len: usize, values: Buffer, nulls: Nulls) -> Self {
        Self {
            data_type: DataType::Boolean,
            len,
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

    /// Returns the bit-packed values
    #[inline]
    pub fn values(&self) -> &Buffer {
        &self.values
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

    /// Returns the value of row `i`, ignoring nullness
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds of the values buffer
    #[inline]
    pub fn value(&self, i: usize) -> bool {
        bit_util::get_bit(self.values.as_slice(), i)
    }

    /// Checks the null bitmap and that the values hold one bit per row
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        let needed = bit_util::ceil(self.len, 8);
        if self.values.len() < needed {
            return Err(ValidationError::BufferTooSmall {
                data_type: self.data_type.clone(),
                buffer: "values",
                expected: needed,
                actual: self.values.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Option<bool>>> for BooleanArray {
    fn from(values: Vec<Option<bool>>) -> Self {
        let len = values.len();
        let mut bits = vec![0_u8; bit_util::ceil(len, 8)];
        for (i, v) in values.iter().enumerate() {
            if *v == Some(true) {
                bit_util::set_bit(&mut bits, i);
            }
        }
        let nulls = Nulls::from_validity(values.iter().map(Option::is_some));
        Self::new(len, Buffer::from_vec(bits), nulls)
    }
}

impl From<Vec<bool>> for BooleanArray {
    fn from(values: Vec<bool>) -> Self {
        values.into_iter().map(Some).collect::<Vec<_>>().into()
    }
}

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

use arrow_buffer::{ArrowNativeType, Buffer};
use half::f16;
use quiver_schema::{DataType, QuiverError, ValidationError};

use crate::data::{force_validate, validate_alignment, Nulls};

/// A native type that is stored in a [`PrimitiveArray`] of [`Primitive::DATA_TYPE`]
pub trait Primitive: ArrowNativeType {
    /// The [`DataType`] of arrays holding this type
    const DATA_TYPE: DataType;
}

macro_rules! primitive {
    ($t:ty,$v:ident) => {
        impl Primitive for $t {
            const DATA_TYPE: DataType = DataType::$v;
        }
    };
}

primitive!(i8, Int8);
primitive!(i16, Int16);
primitive!(i32, Int32);
primitive!(i64, Int64);
primitive!(u8, UInt8);
primitive!(u16, UInt16);
primitive!(u32, UInt32);
primitive!(u64, UInt64);
primitive!(f16, Float16);
primitive!(f32, Float32);
primitive!(f64, Float64);

/// An array of fixed width integers or floating point numbers
#[derive(Debug, Clone)]
pub struct PrimitiveArray {
    data_type: DataType,
    len: usize,
    values: Buffer,
    nulls: Nulls,
}

impl PrimitiveArray {
    /// Create a new [`PrimitiveArray`] of `len` values of `data_type`.
    ///
    /// Only the data type is checked; call [`Self::validate`] before use,
    /// or use [`Self::try_new`].
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is not a primitive type
    pub fn new(data_type: DataType, len: usize, values: Buffer, nulls: Nulls) -> Self {
        assert!(
            data_type.is_primitive(),
            "Illegal data type for PrimitiveArray: {data_type}"
        );
        force_validate(Self::from_parts(data_type, len, values, nulls), Self::validate)
    }

    /// Create a new [`PrimitiveArray`], returning an error if `data_type` is
    /// not primitive or the array is invalid
    pub fn try_new(
        data_type: DataType,
        len: usize,
        values: Buffer,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        if !data_type.is_primitive() {
            return Err(QuiverError::InvalidArgument(format!(
                "Illegal data type for PrimitiveArray: {data_type}"
            )));
        }
        let array = Self::from_parts(data_type, len, values, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(data_type: DataType, len: usize, values: Buffer, nulls: Nulls) -> Self {
        Self {
            data_type,
            len,
            values,
            nulls,
        }
    }

    /// Create a [`PrimitiveArray`] of `T::DATA_TYPE` with no nulls
    pub fn from_values<T: Primitive>(values: Vec<T>) -> Self {
        let len = values.len();
        Self::new(T::DATA_TYPE, len, Buffer::from_vec(values), Nulls::none())
    }

    /// Create a [`PrimitiveArray`] of `T::DATA_TYPE` where `None` is null
    pub fn from_options<T: Primitive>(values: Vec<Option<T>>) -> Self {
        let nulls = Nulls::from_validity(values.iter().map(Option::is_some));
        let len = values.len();
        let values: Vec<T> = values.into_iter().map(Option::unwrap_or_default).collect();
        Self::new(T::DATA_TYPE, len, Buffer::from_vec(values), nulls)
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

    /// Returns the width in bytes of a single value
    #[inline]
    pub fn byte_width(&self) -> usize {
        self.data_type.primitive_width().unwrap_or_default()
    }

    /// Returns the underlying values buffer
    #[inline]
    pub fn values_buffer(&self) -> &Buffer {
        &self.values
    }

    /// Returns the values of this array as a slice of `T`
    ///
    /// # Panics
    ///
    /// Panics if the values buffer is not a whole, aligned number of `T`
    /// or holds fewer than [`Self::len`] of them
    pub fn values<T: ArrowNativeType>(&self) -> &[T] {
        debug_assert_eq!(std::mem::size_of::<T>(), self.byte_width());
        &self.values.typed_data::<T>()[..self.len]
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

    /// Checks the null bitmap and that the values hold `len` entries
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        let needed = self.len * self.byte_width();
        if self.values.len() < needed {
            return Err(ValidationError::BufferTooSmall {
                data_type: self.data_type.clone(),
                buffer: "values",
                expected: needed,
                actual: self.values.len(),
            });
        }
        validate_alignment(&self.data_type, "values", &self.values, self.byte_width().max(1))
    }
}

impl<T: Primitive> From<Vec<T>> for PrimitiveArray {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: Primitive> From<Vec<Option<T>>> for PrimitiveArray {
    fn from(values: Vec<Option<T>>) -> Self {
        Self::from_options(values)
    }
}

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

use quiver_schema::{DataType, Fields, QuiverError, ValidationError};

use crate::data::{force_validate, ArrayRef, Nulls};

/// An array of [`DataType::Struct`], holding one child array per field, each
/// with the same length as the struct
#[derive(Debug, Clone)]
pub struct StructArray {
    data_type: DataType,
    len: usize,
    children: Vec<ArrayRef>,
    nulls: Nulls,
}

impl StructArray {
    /// Create a new [`StructArray`] of `len` rows over `children`.
    ///
    /// Nothing is checked; call [`Self::validate`] before use, or use
    /// [`Self::try_new`].
    pub fn new(fields: Fields, len: usize, children: Vec<ArrayRef>, nulls: Nulls) -> Self {
        force_validate(Self::from_parts(fields, len, children, nulls), Self::validate)
    }

    /// Create a new [`StructArray`], returning an error if it is invalid
    pub fn try_new(
        fields: Fields,
        len: usize,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        let array = Self::from_parts(fields, len, children, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(fields: Fields, len: usize, children: Vec<ArrayRef>, nulls: Nulls) -> Self {
        Self {
            data_type: DataType::Struct(fields),
            len,
            children,
            nulls,
        }
    }

    /// Returns the data type of this array
    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns the fields of this struct
    pub fn fields(&self) -> &Fields {
        match &self.data_type {
            DataType::Struct(fields) => fields,
            _ => unreachable!("StructArray must have a struct data type"),
        }
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

    /// Returns the child arrays, in field order
    #[inline]
    pub fn children(&self) -> &[ArrayRef] {
        &self.children
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

    /// Checks the null bitmap and the number, types and lengths of the children
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        let fields = self.fields();
        if fields.len() != self.children.len() {
            return Err(ValidationError::ChildCountMismatch {
                expected: fields.len(),
                actual: self.children.len(),
            });
        }
        for (i, (field, child)) in fields.iter().zip(&self.children).enumerate() {
            if field.data_type() != child.data_type() {
                return Err(ValidationError::ChildTypeMismatch {
                    child: i,
                    expected: field.data_type().clone(),
                    actual: child.data_type().clone(),
                });
            }
            if child.len() != self.len {
                return Err(ValidationError::ChildLengthMismatch {
                    child: i,
                    expected: self.len,
                    actual: child.len(),
                });
            }
        }
        Ok(())
    }
}

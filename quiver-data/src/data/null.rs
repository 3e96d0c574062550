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

use quiver_schema::{DataType, ValidationError};

/// An array of [`DataType::Null`], where every row is null and no buffers are held
#[derive(Debug, Clone)]
pub struct NullArray {
    data_type: DataType,
    len: usize,
}

impl NullArray {
    /// Create a new [`NullArray`] of `len` rows
    pub fn new(len: usize) -> Self {
        Self {
            data_type: DataType::Null,
            len,
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

    /// Returns the number of null rows, which is all of them
    #[inline]
    pub fn null_count(&self) -> usize {
        self.len
    }

    /// Returns `true`, every row of a [`NullArray`] is null
    #[inline]
    pub fn is_null(&self, _i: usize) -> bool {
        true
    }

    /// A [`NullArray`] has no buffers and is always valid
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

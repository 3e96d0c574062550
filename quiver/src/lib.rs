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

//! A complete, safe, in-memory representation of union columns: columns
//! whose rows hold values of one of several declared types, selected per
//! row by a type id.
//!
//! This crate re-exports `quiver-schema` (types and errors) and
//! `quiver-data` (arrays, validation and equality) under a single facade.
//!
//! # Type descriptors
//!
//! A union type declares its variants in order; type id `i` selects variant
//! `i`. Its signature lists the variants and does not depend on the layout:
//!
//! ```
//! # use quiver::datatypes::{DataType, UnionFields, UnionMode};
//! let fields = UnionFields::new([DataType::Int32, DataType::Utf8]);
//! let dense = DataType::Union(fields.clone(), UnionMode::Dense);
//! let sparse = DataType::Union(fields, UnionMode::Sparse);
//!
//! assert_eq!(dense.to_string(), "union<int32, string>");
//! assert_eq!(dense.to_string(), sparse.to_string());
//! assert!(dense.equals_datatype(&sparse));
//! ```
//!
//! # Arrays
//!
//! Arrays are immutable and built from already populated buffers. The
//! checked constructors (`try_new`) validate before returning; the
//! unchecked ones (`new`) leave it to [`array::ArrayData::validate`].
//!
//! ```
//! # use quiver::array::{ArrayData, Nulls, PrimitiveArray, SparseUnionArray};
//! # use quiver::buffer::Buffer;
//! # use quiver::datatypes::{DataType, UnionFields};
//! # use quiver::error::{QuiverError, ValidationError};
//! let fields = UnionFields::new([DataType::Int32, DataType::Int64]);
//! let err = SparseUnionArray::try_new(
//!     fields,
//!     2,
//!     Buffer::from_vec(vec![0_i16, 1]),
//!     vec![
//!         PrimitiveArray::from(vec![1_i32, 2]).into(),
//!         PrimitiveArray::from(vec![3_i64]).into(),
//!     ],
//!     Nulls::none(),
//! )
//! .unwrap_err();
//!
//! assert!(matches!(
//!     err,
//!     QuiverError::Validation(ValidationError::SparseChildLengthMismatch { child: 1, .. })
//! ));
//! ```

#![warn(missing_docs)]

pub use quiver_data::{equal, range_equal};

/// Array representations, validation and equality
pub mod array {
    pub use quiver_data::*;
}

/// Logical types
pub mod datatypes {
    pub use quiver_schema::{
        DataType, Field, Fields, UnionFields, UnionMode, MAX_UNION_VARIANTS,
    };
}

/// Errors
pub mod error {
    pub use quiver_schema::{QuiverError, ValidationError};
}

/// Memory buffers backing arrays
pub mod buffer {
    pub use arrow_buffer::{bit_util, Buffer};
}

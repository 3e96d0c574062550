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

//! Array data abstractions for [quiver](https://docs.rs/quiver)
//!
//! This crate holds the immutable in-memory representation of every array
//! kind as the closed [`ArrayData`] enum, together with structural
//! validation and logical equality.
//!
//! Union arrays come in two layouts. A [`DenseUnionArray`] packs the values
//! of each variant into its child and addresses them with per-row offsets,
//! while a [`SparseUnionArray`] keeps every child as long as the union and
//! addresses them by row. Both describe the same logical rows, and compare
//! equal when those rows are equal:
//!
//! ```
//! # use arrow_buffer::Buffer;
//! # use quiver_data::{ArrayData, BytesArray, DenseUnionArray, Nulls, PrimitiveArray, SparseUnionArray};
//! # use quiver_schema::{DataType, UnionFields};
//! let fields = UnionFields::new([DataType::Int32, DataType::Utf8]);
//! let dense = DenseUnionArray::try_new(
//!     fields.clone(),
//!     3,
//!     Buffer::from_vec(vec![0_i16, 1, 0]),
//!     Buffer::from_vec(vec![0_i32, 0, 1]),
//!     vec![
//!         PrimitiveArray::from(vec![10_i32, 20]).into(),
//!         BytesArray::from_strs([Some("x")]).into(),
//!     ],
//!     Nulls::none(),
//! )
//! .unwrap();
//! let sparse = SparseUnionArray::try_new(
//!     fields,
//!     3,
//!     Buffer::from_vec(vec![0_i16, 1, 0]),
//!     vec![
//!         PrimitiveArray::from(vec![10_i32, 0, 20]).into(),
//!         BytesArray::from_strs([None, Some("x"), None]).into(),
//!     ],
//!     Nulls::none(),
//! )
//! .unwrap();
//!
//! assert_eq!(ArrayData::from(dense), ArrayData::from(sparse));
//! ```

#![warn(missing_docs)]

mod data;
pub use data::*;

mod equal;
pub use equal::{equal, range_equal};

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

use arrow_buffer::bit_chunk_iterator::BitChunks;
use arrow_buffer::Buffer;

use crate::data::{contains_nulls, ArrayData};

// whether bits along the positions are equal
// `lhs_start`, `rhs_start` and `len` are _measured in bits_.
#[inline]
pub(super) fn equal_bits(
    lhs_values: &[u8],
    rhs_values: &[u8],
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    let lhs = BitChunks::new(lhs_values, lhs_start, len).iter_padded();
    let rhs = BitChunks::new(rhs_values, rhs_start, len).iter_padded();
    lhs.zip(rhs).all(|(a, b)| a == b)
}

/// Whether rows `lhs_start..lhs_start + len` of `lhs` are null exactly where
/// the matching rows of `rhs` are
#[inline]
pub(super) fn equal_nulls(
    lhs: &ArrayData,
    rhs: &ArrayData,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    match (lhs.nulls(), rhs.nulls()) {
        (Some(lhs), Some(rhs)) => {
            equal_bits(lhs.as_slice(), rhs.as_slice(), lhs_start, rhs_start, len)
        }
        (Some(lhs), None) => !contains_nulls(Some(lhs), lhs_start, len),
        (None, Some(rhs)) => !contains_nulls(Some(rhs), rhs_start, len),
        (None, None) => true,
    }
}

// union modes are ignored, only the logical type matters
#[inline]
pub(super) fn base_equal(lhs: &ArrayData, rhs: &ArrayData) -> bool {
    lhs.data_type().equals_datatype(rhs.data_type()) && lhs.len() == rhs.len()
}

// whether the two memory regions are equal
#[inline]
pub(super) fn equal_len(
    lhs_values: &[u8],
    rhs_values: &[u8],
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    lhs_values[lhs_start..(lhs_start + len)] == rhs_values[rhs_start..(rhs_start + len)]
}

/// Returns the bitmap of `nulls` if `len` rows from `start` contain a null
#[inline]
pub(super) fn nulls_in_range(nulls: Option<&Buffer>, start: usize, len: usize) -> Option<&Buffer> {
    nulls.filter(|&buffer| contains_nulls(Some(buffer), start, len))
}

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

use arrow_buffer::ArrowNativeType;

use crate::data::BytesArray;

use super::list::lengths_equal;
use super::utils::{equal_len, nulls_in_range};

fn offset_value_equal(
    lhs_values: &[u8],
    rhs_values: &[u8],
    lhs_offsets: &[i32],
    rhs_offsets: &[i32],
    lhs_pos: usize,
    rhs_pos: usize,
    len: usize,
) -> bool {
    let lhs_start = lhs_offsets[lhs_pos].as_usize();
    let rhs_start = rhs_offsets[rhs_pos].as_usize();
    let lhs_len = lhs_offsets[lhs_pos + len].as_usize() - lhs_start;
    let rhs_len = rhs_offsets[rhs_pos + len].as_usize() - rhs_start;

    if lhs_len == 0 && rhs_len == 0 {
        return true;
    }

    lhs_len == rhs_len && equal_len(lhs_values, rhs_values, lhs_start, rhs_start, lhs_len)
}

pub(super) fn variable_sized_equal(
    lhs: &BytesArray,
    rhs: &BytesArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    if len == 0 {
        return true;
    }
    let lhs_offsets = lhs.value_offsets();
    let rhs_offsets = rhs.value_offsets();
    let lhs_values = lhs.values().as_slice();
    let rhs_values = rhs.values().as_slice();

    match nulls_in_range(lhs.nulls().buffer(), lhs_start, len) {
        None => {
            let lhs_offsets_slice = &lhs_offsets[lhs_start..lhs_start + len + 1];
            let rhs_offsets_slice = &rhs_offsets[rhs_start..rhs_start + len + 1];
            lengths_equal(lhs_offsets_slice, rhs_offsets_slice)
                && offset_value_equal(
                    lhs_values,
                    rhs_values,
                    lhs_offsets,
                    rhs_offsets,
                    lhs_start,
                    rhs_start,
                    len,
                )
        }
        Some(_) => (0..len).all(|i| {
            let lhs_pos = lhs_start + i;
            let rhs_pos = rhs_start + i;
            lhs.is_null(lhs_pos)
                || offset_value_equal(
                    lhs_values,
                    rhs_values,
                    lhs_offsets,
                    rhs_offsets,
                    lhs_pos,
                    rhs_pos,
                    1,
                )
        }),
    }
}

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

use arrow_buffer::bit_iterator::BitIndexIterator;
use arrow_buffer::bit_util::get_bit;

use crate::data::BooleanArray;

use super::utils::{equal_bits, nulls_in_range};

pub(super) fn boolean_equal(
    lhs: &BooleanArray,
    rhs: &BooleanArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    let lhs_values = lhs.values().as_slice();
    let rhs_values = rhs.values().as_slice();

    match nulls_in_range(lhs.nulls().buffer(), lhs_start, len) {
        None => equal_bits(lhs_values, rhs_values, lhs_start, rhs_start, len),
        Some(lhs_nulls) => {
            // the null masks are equal, so only the valid rows of lhs are compared
            BitIndexIterator::new(lhs_nulls.as_slice(), lhs_start, len).all(|i| {
                get_bit(lhs_values, lhs_start + i) == get_bit(rhs_values, rhs_start + i)
            })
        }
    }
}

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

use arrow_buffer::bit_iterator::BitSliceIterator;

use crate::data::PrimitiveArray;

use super::utils::{equal_len, nulls_in_range};

pub(super) fn primitive_equal(
    lhs: &PrimitiveArray,
    rhs: &PrimitiveArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    let byte_width = lhs.byte_width();
    if byte_width != rhs.byte_width() {
        return false;
    }
    let lhs_values = lhs.values_buffer().as_slice();
    let rhs_values = rhs.values_buffer().as_slice();

    // Only checking one null mask here because by the time the control flow reaches
    // this point, the equality of the two masks would have already been verified.
    match nulls_in_range(lhs.nulls().buffer(), lhs_start, len) {
        None => equal_len(
            lhs_values,
            rhs_values,
            lhs_start * byte_width,
            rhs_start * byte_width,
            len * byte_width,
        ),
        Some(lhs_nulls) => {
            // compare each run of valid rows as one slice
            BitSliceIterator::new(lhs_nulls.as_slice(), lhs_start, len).all(|(start, end)| {
                equal_len(
                    lhs_values,
                    rhs_values,
                    (lhs_start + start) * byte_width,
                    (rhs_start + start) * byte_width,
                    (end - start) * byte_width,
                )
            })
        }
    }
}

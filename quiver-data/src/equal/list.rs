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

use crate::data::ListArray;

use super::equal_range;
use super::utils::nulls_in_range;

pub(super) fn lengths_equal(lhs: &[i32], rhs: &[i32]) -> bool {
    // invariant from `base_equal`
    debug_assert_eq!(lhs.len(), rhs.len());

    if lhs.is_empty() {
        return true;
    }

    if lhs[0] == 0 && rhs[0] == 0 {
        return lhs == rhs;
    };

    // The expensive case, e.g.
    // [0, 2, 4, 6, 9] == [4, 6, 8, 10, 13]
    lhs.windows(2)
        .zip(rhs.windows(2))
        .all(|(lhs_offsets, rhs_offsets)| {
            // length of left == length of right
            (lhs_offsets[1] - lhs_offsets[0]) == (rhs_offsets[1] - rhs_offsets[0])
        })
}

pub(super) fn list_equal(
    lhs: &ListArray,
    rhs: &ListArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    // zero length ranges hold no elements
    if len == 0 {
        return true;
    }

    let lhs_offsets = lhs.value_offsets();
    let rhs_offsets = rhs.value_offsets();
    let lhs_values = lhs.values();
    let rhs_values = rhs.values();

    match nulls_in_range(lhs.nulls().buffer(), lhs_start, len) {
        None => {
            let lhs_first = lhs_offsets[lhs_start].as_usize();
            let rhs_first = rhs_offsets[rhs_start].as_usize();
            let lhs_child_length = lhs_offsets[lhs_start + len].as_usize() - lhs_first;
            let rhs_child_length = rhs_offsets[rhs_start + len].as_usize() - rhs_first;

            if lhs_child_length == 0 && rhs_child_length == 0 {
                return true;
            }

            lhs_child_length == rhs_child_length
                && lengths_equal(
                    &lhs_offsets[lhs_start..lhs_start + len + 1],
                    &rhs_offsets[rhs_start..rhs_start + len + 1],
                )
                && equal_range(lhs_values, rhs_values, lhs_first, rhs_first, lhs_child_length)
        }
        // with nulls, we need to compare item by item whenever it is not null
        Some(_) => (0..len).all(|i| {
            let lhs_pos = lhs_start + i;
            let rhs_pos = rhs_start + i;
            if lhs.is_null(lhs_pos) {
                return true;
            }

            let lhs_range = lhs.value_range(lhs_pos);
            let rhs_range = rhs.value_range(rhs_pos);
            lhs_range.len() == rhs_range.len()
                && equal_range(
                    lhs_values,
                    rhs_values,
                    lhs_range.start,
                    rhs_range.start,
                    lhs_range.len(),
                )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ArrayRef, Nulls, PrimitiveArray};
    use arrow_buffer::Buffer;
    use quiver_schema::DataType;

    fn list(offsets: Vec<i32>, values: Vec<i32>, nulls: Nulls) -> ListArray {
        let values: ArrayRef = PrimitiveArray::from(values).into();
        ListArray::new(
            DataType::new_list(DataType::Int32),
            offsets.len() - 1,
            Buffer::from_vec(offsets),
            values,
            nulls,
        )
    }

    #[test]
    fn test_lengths_equal() {
        assert!(lengths_equal(&[0, 2, 4, 6, 9], &[4, 6, 8, 10, 13]));
        assert!(!lengths_equal(&[0, 2, 4], &[4, 5, 8]));
        assert!(lengths_equal(&[], &[]));
    }

    #[test]
    fn test_list_equal() {
        // [[1, 2], [], [3]]
        let lhs = list(vec![0, 2, 2, 3], vec![1, 2, 3], Nulls::none());
        // [[9], [1, 2], [], [3]]
        let rhs = list(vec![0, 1, 3, 3, 4], vec![9, 1, 2, 3], Nulls::none());
        assert!(list_equal(&lhs, &rhs, 0, 1, 3));
        assert!(!list_equal(&lhs, &rhs, 0, 0, 1));
        assert!(list_equal(&lhs, &rhs, 1, 2, 1));
    }

    #[test]
    fn test_list_equal_nulls() {
        // [[1], null, [2]] where the null row still spans an element
        let lhs = list(
            vec![0, 1, 2, 3],
            vec![1, 5, 2],
            Nulls::from_validity([true, false, true]),
        );
        let rhs = list(
            vec![0, 1, 1, 2],
            vec![1, 2],
            Nulls::from_validity([true, false, true]),
        );
        assert!(list_equal(&lhs, &rhs, 0, 0, 3));
    }
}

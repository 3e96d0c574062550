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

use crate::data::StructArray;

use super::equal_range;
use super::utils::nulls_in_range;

/// Compares the values of two [StructArray] starting at `lhs_start` and `rhs_start` respectively
/// for `len` slots.
fn equal_child_values(
    lhs: &StructArray,
    rhs: &StructArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    lhs.children()
        .iter()
        .zip(rhs.children())
        .all(|(lhs_values, rhs_values)| {
            equal_range(lhs_values, rhs_values, lhs_start, rhs_start, len)
        })
}

pub(super) fn struct_equal(
    lhs: &StructArray,
    rhs: &StructArray,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    if lhs.children().len() != rhs.children().len() {
        return false;
    }
    // Only checking one null mask here because by the time the control flow reaches
    // this point, the equality of the two masks would have already been verified.
    match nulls_in_range(lhs.nulls().buffer(), lhs_start, len) {
        None => equal_child_values(lhs, rhs, lhs_start, rhs_start, len),
        Some(_) => (0..len).all(|i| {
            let lhs_pos = lhs_start + i;
            let rhs_pos = rhs_start + i;
            lhs.is_null(lhs_pos) || equal_child_values(lhs, rhs, lhs_pos, rhs_pos, 1)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ArrayData, BytesArray, Nulls, PrimitiveArray};
    use quiver_schema::{DataType, Field, Fields};

    fn fields() -> Fields {
        Fields::from(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
        ])
    }

    #[test]
    fn test_struct_equal() {
        let lhs = StructArray::new(
            fields(),
            3,
            vec![
                PrimitiveArray::from(vec![1_i32, 2, 3]).into(),
                BytesArray::from_strs([Some("a"), None, Some("c")]).into(),
            ],
            Nulls::none(),
        );
        let rhs = StructArray::new(
            fields(),
            2,
            vec![
                PrimitiveArray::from(vec![2_i32, 3]).into(),
                BytesArray::from_strs([None, Some("c")]).into(),
            ],
            Nulls::none(),
        );
        assert!(struct_equal(&lhs, &rhs, 1, 0, 2));
        assert!(!struct_equal(&lhs, &rhs, 0, 0, 1));
    }

    #[test]
    fn test_struct_equal_ignores_null_rows() {
        let lhs = StructArray::new(
            fields(),
            2,
            vec![
                PrimitiveArray::from(vec![1_i32, 2]).into(),
                BytesArray::from_strs([Some("a"), Some("b")]).into(),
            ],
            Nulls::from_validity([false, true]),
        );
        let rhs = StructArray::new(
            fields(),
            2,
            vec![
                PrimitiveArray::from(vec![7_i32, 2]).into(),
                BytesArray::from_strs([Some("z"), Some("b")]).into(),
            ],
            Nulls::from_validity([false, true]),
        );
        assert!(struct_equal(&lhs, &rhs, 0, 0, 2));
        assert!(ArrayData::from(lhs).equals(&ArrayData::from(rhs)));
    }
}

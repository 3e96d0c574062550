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

use quiver_schema::DataType;

use crate::data::{ArrayData, UnionArray};

use super::equal_range;

/// Resolves the rows of a dense or sparse union to the child slot holding
/// their value, so both layouts compare through the same path.
struct UnionSlots<'a> {
    union: &'a UnionArray,
    // `None` for the sparse layout, where the slot is the row itself
    offsets: Option<&'a [i32]>,
}

impl<'a> UnionSlots<'a> {
    fn new(array: &'a ArrayData) -> Option<Self> {
        match array {
            ArrayData::DenseUnion(a) => Some(Self {
                union: a.union(),
                offsets: Some(a.offsets()),
            }),
            ArrayData::SparseUnion(a) => Some(Self {
                union: a.union(),
                offsets: None,
            }),
            _ => None,
        }
    }

    /// Returns the variant type, child array and slot of `row`
    #[inline]
    fn resolve(&self, row: usize) -> (&'a DataType, &'a ArrayData, usize) {
        let tag = self.union.type_id(row) as usize;
        let slot = match self.offsets {
            Some(offsets) => offsets[row] as usize,
            None => row,
        };
        (
            &self.union.fields().variants()[tag],
            self.union.children()[tag].as_ref(),
            slot,
        )
    }
}

/// Compares `len` rows of two union arrays of either layout.
///
/// Each row is resolved to the child slot holding its value and equal rows
/// must select variants of the same logical type whose values compare
/// equal. Which tag number or physical slot a row uses does not matter.
pub(super) fn union_equal(
    lhs: &ArrayData,
    rhs: &ArrayData,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    let (Some(lhs_slots), Some(rhs_slots)) = (UnionSlots::new(lhs), UnionSlots::new(rhs)) else {
        return false;
    };
    if lhs_slots.union.mode() != rhs_slots.union.mode() {
        log::trace!(
            "comparing {} rows of a {} union against a {} union",
            len,
            lhs_slots.union.mode(),
            rhs_slots.union.mode()
        );
    }

    (0..len).all(|i| {
        let lhs_pos = lhs_start + i;
        let rhs_pos = rhs_start + i;
        // null masks were already compared
        if lhs.is_null(lhs_pos) {
            return true;
        }

        let (lhs_type, lhs_child, lhs_slot) = lhs_slots.resolve(lhs_pos);
        let (rhs_type, rhs_child, rhs_slot) = rhs_slots.resolve(rhs_pos);
        lhs_type.equals_datatype(rhs_type)
            && equal_range(lhs_child, rhs_child, lhs_slot, rhs_slot, 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        ArrayRef, BytesArray, DenseUnionArray, Nulls, PrimitiveArray, SparseUnionArray,
    };
    use arrow_buffer::Buffer;
    use quiver_schema::{UnionFields, UnionMode};

    fn fields() -> UnionFields {
        UnionFields::new([DataType::Int32, DataType::Utf8])
    }

    // [10, "x", 20]
    fn dense() -> ArrayData {
        DenseUnionArray::new(
            fields(),
            3,
            Buffer::from_vec(vec![0_i16, 1, 0]),
            Buffer::from_vec(vec![0_i32, 0, 1]),
            vec![
                PrimitiveArray::from(vec![10_i32, 20]).into(),
                BytesArray::from_strs([Some("x")]).into(),
            ],
            Nulls::none(),
        )
        .into()
    }

    // [10, "x", 20]
    fn sparse() -> ArrayData {
        let children: Vec<ArrayRef> = vec![
            PrimitiveArray::from(vec![10_i32, 0, 20]).into(),
            BytesArray::from_strs([Some("?"), Some("x"), Some("?")]).into(),
        ];
        SparseUnionArray::new(
            fields(),
            3,
            Buffer::from_vec(vec![0_i16, 1, 0]),
            children,
            Nulls::none(),
        )
        .into()
    }

    #[test]
    fn test_union_equal_across_layouts() {
        let dense = dense();
        let sparse = sparse();
        assert_eq!(dense.data_type().union_mode(), Some(UnionMode::Dense));
        assert_eq!(sparse.data_type().union_mode(), Some(UnionMode::Sparse));
        assert!(union_equal(&dense, &sparse, 0, 0, 3));
        assert!(union_equal(&sparse, &dense, 0, 0, 3));
        assert!(union_equal(&dense, &sparse, 1, 1, 2));
        assert!(!union_equal(&dense, &sparse, 0, 1, 1));
    }

    #[test]
    fn test_union_equal_requires_unions() {
        let values = ArrayData::from(PrimitiveArray::from(vec![10_i32]));
        assert!(!union_equal(&dense(), &values, 0, 0, 1));
    }

    #[test]
    fn test_resolve() {
        let dense = dense();
        let slots = UnionSlots::new(&dense).unwrap();
        let (data_type, child, slot) = slots.resolve(2);
        assert_eq!(data_type, &DataType::Int32);
        assert_eq!(child.len(), 2);
        assert_eq!(slot, 1);

        let sparse = sparse();
        let slots = UnionSlots::new(&sparse).unwrap();
        let (data_type, _, slot) = slots.resolve(1);
        assert_eq!(data_type, &DataType::Utf8);
        assert_eq!(slot, 1);
    }
}

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

use quiver::array::{
    ArrayData, ArrayRef, BooleanArray, BytesArray, DenseUnionArray, ListArray, Nulls,
    PrimitiveArray, SparseUnionArray, StructArray,
};
use quiver::buffer::Buffer;
use quiver::datatypes::{DataType, Field, Fields, UnionFields, UnionMode};
use quiver::error::{QuiverError, ValidationError};

fn fields() -> UnionFields {
    UnionFields::new([DataType::Int32, DataType::Utf8])
}

fn dense_children() -> Vec<ArrayRef> {
    vec![
        PrimitiveArray::from(vec![10_i32, 20]).into(),
        BytesArray::from_strs([Some("x")]).into(),
    ]
}

fn sparse_children(len: usize) -> Vec<ArrayRef> {
    vec![
        PrimitiveArray::from(vec![1_i32; len]).into(),
        BytesArray::from_strs(vec![Some("y"); len]).into(),
    ]
}

fn validation_error(result: Result<impl std::fmt::Debug, QuiverError>) -> ValidationError {
    match result {
        Err(QuiverError::Validation(e)) => e,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "OffsetOutOfRange { row: 2, offset: 2, child: 0, child_len: 2 }")]
fn test_dense_offset_past_child() {
    DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        Buffer::from_vec(vec![0_i32, 0, 2]),
        dense_children(),
        Nulls::none(),
    )
    .unwrap();
}

#[test]
#[should_panic(expected = "SparseChildLengthMismatch { child: 1, expected: 3, actual: 2 }")]
fn test_sparse_child_too_short() {
    SparseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        vec![
            PrimitiveArray::from(vec![1_i32, 2, 3]).into(),
            BytesArray::from_strs([Some("a"), Some("b")]).into(),
        ],
        Nulls::none(),
    )
    .unwrap();
}

#[test]
#[should_panic(expected = "TagOutOfRange { row: 1, tag: 2, num_children: 2 }")]
fn test_tag_out_of_range() {
    SparseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 2, 0]),
        sparse_children(3),
        Nulls::none(),
    )
    .unwrap();
}

#[test]
#[should_panic(expected = "TagLengthMismatch { expected: 3, actual: 2 }")]
fn test_tag_buffer_too_short() {
    SparseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1]),
        sparse_children(3),
        Nulls::none(),
    )
    .unwrap();
}

#[test]
fn test_tag_buffer_wrong_width() {
    // 6 bytes of int8 type ids where int16 ones are expected
    let err = validation_error(SparseUnionArray::try_new(
        fields(),
        6,
        Buffer::from_vec(vec![0_i8, 1, 0, 1, 0, 1]),
        sparse_children(6),
        Nulls::none(),
    ));
    assert_eq!(
        err,
        ValidationError::TagLengthMismatch {
            expected: 6,
            actual: 3
        }
    );
}

#[test]
fn test_offset_buffer_length() {
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        Buffer::from_vec(vec![0_i32, 0]),
        dense_children(),
        Nulls::none(),
    ));
    assert_eq!(
        err,
        ValidationError::OffsetLengthMismatch {
            expected: 3,
            actual: 2
        }
    );
}

/// `len` bytes starting `shift` bytes past an 8-byte aligned address
fn shifted_bytes(shift: usize, len: usize) -> Buffer {
    Buffer::from_vec(vec![0_i64; 4]).slice_with_length(shift, len)
}

#[test]
fn test_misaligned_tag_buffer() {
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        shifted_bytes(1, 6),
        Buffer::from_vec(vec![0_i32, 1, 0]),
        dense_children(),
        Nulls::none(),
    ));
    assert!(matches!(
        err,
        ValidationError::MisalignedBuffer {
            buffer: "type_ids",
            align: 2,
            offset: 1,
            ..
        }
    ));

    let err = validation_error(SparseUnionArray::try_new(
        fields(),
        3,
        shifted_bytes(3, 6),
        sparse_children(3),
        Nulls::none(),
    ));
    assert!(matches!(
        err,
        ValidationError::MisalignedBuffer {
            buffer: "type_ids",
            align: 2,
            offset: 1,
            ..
        }
    ));

    // a wrong length is reported before the alignment
    let err = validation_error(SparseUnionArray::try_new(
        fields(),
        3,
        shifted_bytes(1, 5),
        sparse_children(3),
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::TagLengthMismatch { .. }));
}

#[test]
fn test_misaligned_offset_buffer() {
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 0, 0]),
        shifted_bytes(2, 12),
        dense_children(),
        Nulls::none(),
    ));
    assert_eq!(
        err.to_string(),
        "misaligned offsets buffer in union<int32, string> array: \
         offset from expected alignment of 4 by 2"
    );
    assert!(matches!(
        err,
        ValidationError::MisalignedBuffer {
            buffer: "offsets",
            align: 4,
            offset: 2,
            ..
        }
    ));

    let err = validation_error(BytesArray::try_new(
        DataType::Utf8,
        1,
        shifted_bytes(2, 8),
        Buffer::from_vec(b"ab".to_vec()),
        Nulls::none(),
    ));
    assert!(matches!(
        err,
        ValidationError::MisalignedBuffer {
            buffer: "offsets",
            align: 4,
            offset: 2,
            ..
        }
    ));
}

#[test]
fn test_misaligned_primitive_values() {
    let err = validation_error(PrimitiveArray::try_new(
        DataType::Int64,
        2,
        shifted_bytes(4, 16),
        Nulls::none(),
    ));
    assert!(matches!(
        err,
        ValidationError::MisalignedBuffer {
            buffer: "values",
            align: 8,
            offset: 4,
            ..
        }
    ));
}

#[test]
#[should_panic(expected = "NullCountMismatch { declared: 2, expected: 1 }")]
fn test_union_null_count() {
    SparseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        sparse_children(3),
        Nulls::new(Some(Buffer::from_slice_ref([0b0000_0101_u8])), 2),
    )
    .unwrap();
}

#[test]
fn test_union_null_bitmap_too_small() {
    let err = validation_error(SparseUnionArray::try_new(
        fields(),
        9,
        Buffer::from_vec(vec![0_i16; 9]),
        sparse_children(9),
        Nulls::new(Some(Buffer::from_slice_ref([0xFF_u8])), 0),
    ));
    assert_eq!(
        err,
        ValidationError::NullBitmapTooSmall {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
#[should_panic(expected = "ChildTypeMismatch { child: 1, expected: Utf8, actual: Binary }")]
fn test_union_child_type() {
    SparseUnionArray::try_new(
        fields(),
        1,
        Buffer::from_vec(vec![0_i16]),
        vec![
            PrimitiveArray::from(vec![1_i32]).into(),
            BytesArray::from_bytes([Some(b"x".as_slice())]).into(),
        ],
        Nulls::none(),
    )
    .unwrap();
}

#[test]
fn test_union_child_layout_is_checked() {
    // a dense child where the variant declares a sparse union
    let inner_fields = UnionFields::new([DataType::Int32]);
    let inner: ArrayRef = DenseUnionArray::try_new(
        inner_fields.clone(),
        1,
        Buffer::from_vec(vec![0_i16]),
        Buffer::from_vec(vec![0_i32]),
        vec![PrimitiveArray::from(vec![1_i32]).into()],
        Nulls::none(),
    )
    .unwrap()
    .into();
    let err = validation_error(SparseUnionArray::try_new(
        UnionFields::new([DataType::Union(inner_fields, UnionMode::Sparse)]),
        1,
        Buffer::from_vec(vec![0_i16]),
        vec![inner],
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::ChildTypeMismatch { child: 0, .. }));
}

#[test]
fn test_union_child_count() {
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        0,
        Buffer::from_vec(Vec::<i16>::new()),
        Buffer::from_vec(Vec::<i32>::new()),
        vec![PrimitiveArray::from(Vec::<i32>::new()).into()],
        Nulls::none(),
    ));
    assert_eq!(
        err,
        ValidationError::ChildCountMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_validation_order() {
    // short tag buffer, bad tag, bad offset and short child together
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 9]),
        Buffer::from_vec(vec![0_i32, 0, 9]),
        vec![PrimitiveArray::from(vec![1_i32]).into()],
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::TagLengthMismatch { .. }));

    // bad tag and bad offset
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 0, 9]),
        Buffer::from_vec(vec![5_i32, 0, 0]),
        dense_children(),
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::TagOutOfRange { row: 2, .. }));

    // wrong child count and a sparse child too short
    let err = validation_error(SparseUnionArray::try_new(
        fields(),
        2,
        Buffer::from_vec(vec![0_i16, 0]),
        vec![PrimitiveArray::from(vec![1_i32]).into()],
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::ChildCountMismatch { .. }));

    // the first offending row is reported
    let err = validation_error(DenseUnionArray::try_new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        Buffer::from_vec(vec![0_i32, 3, 4]),
        dense_children(),
        Nulls::none(),
    ));
    assert!(matches!(err, ValidationError::OffsetOutOfRange { row: 1, child: 1, .. }));
    assert_eq!(
        QuiverError::from(err).to_string(),
        "Invalid array: offset 3 at row 1 is out of bounds for child #1 of length 1"
    );
}

#[test]
fn test_unchecked_constructor() {
    let array = ArrayData::from(DenseUnionArray::new(
        fields(),
        3,
        Buffer::from_vec(vec![0_i16, 1, 0]),
        Buffer::from_vec(vec![0_i32, 0, 1]),
        dense_children(),
        Nulls::none(),
    ));
    assert!(array.validate().is_ok());
    assert_eq!(array.len(), 3);
    assert_eq!(array.child_data().len(), 2);
    assert!(array.as_union().is_some());
}

#[cfg(not(feature = "force_validate"))]
#[test]
fn test_validate_is_not_recursive() {
    // the union is well formed but its int32 child has a short value buffer
    let bad_child = PrimitiveArray::new(
        DataType::Int32,
        2,
        Buffer::from_vec(vec![1_i32]),
        Nulls::none(),
    );
    let union = ArrayData::from(SparseUnionArray::new(
        UnionFields::new([DataType::Int32]),
        2,
        Buffer::from_vec(vec![0_i16, 0]),
        vec![bad_child.into()],
        Nulls::none(),
    ));
    assert!(union.validate().is_ok());
    assert_eq!(
        union.validate_full().unwrap_err(),
        ValidationError::BufferTooSmall {
            data_type: DataType::Int32,
            buffer: "values",
            expected: 8,
            actual: 4
        }
    );
}

#[test]
fn test_validate_full_nested() {
    let item_fields = Fields::from(vec![
        Field::new("flag", DataType::Boolean, false),
        Field::new("tags", DataType::new_list(DataType::Utf8), true),
    ]);
    let tags: ArrayRef = ListArray::try_new(
        DataType::new_list(DataType::Utf8),
        2,
        Buffer::from_vec(vec![0_i32, 1, 1]),
        BytesArray::from_strs([Some("t")]).into(),
        Nulls::from_validity([true, false]),
    )
    .unwrap()
    .into();
    let item: ArrayRef = StructArray::try_new(
        item_fields.clone(),
        2,
        vec![BooleanArray::from(vec![true, false]).into(), tags],
        Nulls::none(),
    )
    .unwrap()
    .into();
    let union = ArrayData::from(
        DenseUnionArray::try_new(
            UnionFields::new([DataType::Struct(item_fields), DataType::Int32]),
            3,
            Buffer::from_vec(vec![0_i16, 1, 0]),
            Buffer::from_vec(vec![1_i32, 0, 0]),
            vec![item, PrimitiveArray::from(vec![5_i32]).into()],
            Nulls::none(),
        )
        .unwrap(),
    );
    assert!(union.validate_full().is_ok());
}

#[test]
#[should_panic(expected = "a union must declare at least one variant")]
fn test_empty_union_fields() {
    UnionFields::try_new(Vec::new()).unwrap();
}

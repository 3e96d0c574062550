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

use std::ops::Deref;

use arrow_buffer::Buffer;
use quiver_schema::{DataType, QuiverError, UnionFields, UnionMode, ValidationError};

use crate::data::{entries, force_validate, validate_alignment, ArrayRef, Nulls};

/// The representation shared by [`DenseUnionArray`] and [`SparseUnionArray`]:
/// one int16 type id per row, selecting which of the child arrays (one per
/// declared variant, in the same order) holds that row's value.
///
/// A [`UnionArray`] is never constructed on its own; both layouts dereference
/// to it for the accessors they have in common.
#[derive(Debug, Clone)]
pub struct UnionArray {
    data_type: DataType,
    len: usize,
    type_ids: Buffer,
    children: Vec<ArrayRef>,
    nulls: Nulls,
}

impl UnionArray {
    fn new(
        fields: UnionFields,
        mode: UnionMode,
        len: usize,
        type_ids: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Self {
        Self {
            data_type: DataType::Union(fields, mode),
            len,
            type_ids,
            children,
            nulls,
        }
    }

    /// Returns the data type of this array
    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns the declared variants of this union
    pub fn fields(&self) -> &UnionFields {
        match &self.data_type {
            DataType::Union(fields, _) => fields,
            _ => unreachable!("UnionArray must have a union data type"),
        }
    }

    /// Returns the layout of this union
    pub fn mode(&self) -> UnionMode {
        match &self.data_type {
            DataType::Union(_, mode) => *mode,
            _ => unreachable!("UnionArray must have a union data type"),
        }
    }

    /// Returns the length of this array
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this array has zero length
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the type ids of this array, one per row
    #[inline]
    pub fn tags(&self) -> &[i16] {
        self.type_ids.typed_data()
    }

    /// Returns the buffer backing [`Self::tags`]
    #[inline]
    pub fn tag_buffer(&self) -> &Buffer {
        &self.type_ids
    }

    /// Returns the type id of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds of the type ids
    #[inline]
    pub fn type_id(&self, i: usize) -> i16 {
        self.tags()[i]
    }

    /// Returns the child arrays, in variant order
    #[inline]
    pub fn children(&self) -> &[ArrayRef] {
        &self.children
    }

    /// Returns the child array holding the values of variant `index`
    pub fn child(&self, index: usize) -> Result<&ArrayRef, QuiverError> {
        self.children.get(index).ok_or(QuiverError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    /// Returns the null tracking of this array
    #[inline]
    pub fn nulls(&self) -> &Nulls {
        &self.nulls
    }

    /// Returns the declared number of null rows
    #[inline]
    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// Returns `true` if row `i` is null
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        self.nulls.is_null(i)
    }

    /// Returns `true` if row `i` is not null
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        !self.is_null(i)
    }

    fn validate_buffers(&self) -> Result<(), ValidationError> {
        self.nulls.validate(self.len)?;
        let type_ids = entries::<i16>(&self.type_ids);
        if self.type_ids.len() != self.len * std::mem::size_of::<i16>() {
            return Err(ValidationError::TagLengthMismatch {
                expected: self.len,
                actual: type_ids,
            });
        }
        validate_alignment(
            &self.data_type,
            "type_ids",
            &self.type_ids,
            std::mem::align_of::<i16>(),
        )
    }

    fn validate_children(&self) -> Result<(), ValidationError> {
        let fields = self.fields();
        if fields.len() != self.children.len() {
            return Err(ValidationError::ChildCountMismatch {
                expected: fields.len(),
                actual: self.children.len(),
            });
        }
        for (i, (variant, child)) in fields.iter().zip(&self.children).enumerate() {
            if variant != child.data_type() {
                return Err(ValidationError::ChildTypeMismatch {
                    child: i,
                    expected: variant.clone(),
                    actual: child.data_type().clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_tags(&self) -> Result<(), ValidationError> {
        let num_children = self.children.len();
        let invalid = self
            .tags()
            .iter()
            .enumerate()
            .find(|(_, tag)| usize::try_from(**tag).map_or(true, |t| t >= num_children));
        match invalid {
            Some((row, tag)) => Err(ValidationError::TagOutOfRange {
                row,
                tag: *tag,
                num_children,
            }),
            None => Ok(()),
        }
    }
}

/// A union array with the dense layout.
///
/// Children are packed: each holds only the values of the rows that selected
/// it, and row `r` is found at slot `offsets[r]` of child `tags[r]`. Child
/// lengths are independent of the union length and of each other.
///
/// ```
/// # use std::sync::Arc;
/// # use arrow_buffer::Buffer;
/// # use quiver_data::{BytesArray, DenseUnionArray, Nulls, PrimitiveArray};
/// # use quiver_schema::{DataType, UnionFields};
/// // logical rows [10, "x", 20]
/// let array = DenseUnionArray::try_new(
///     UnionFields::new([DataType::Int32, DataType::Utf8]),
///     3,
///     Buffer::from_vec(vec![0_i16, 1, 0]),
///     Buffer::from_vec(vec![0_i32, 0, 1]),
///     vec![
///         PrimitiveArray::from(vec![10_i32, 20]).into(),
///         BytesArray::from_strs([Some("x")]).into(),
///     ],
///     Nulls::none(),
/// )
/// .unwrap();
///
/// assert_eq!(array.data_type().to_string(), "union<int32, string>");
/// let (child, slot) = array.value(2);
/// assert_eq!(slot, 1);
/// assert_eq!(child.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DenseUnionArray {
    union: UnionArray,
    offsets: Buffer,
}

impl DenseUnionArray {
    /// Create a new [`DenseUnionArray`].
    ///
    /// Nothing is checked; call [`Self::validate`] before use, or use
    /// [`Self::try_new`].
    pub fn new(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        offsets: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Self {
        let array = Self::from_parts(fields, len, type_ids, offsets, children, nulls);
        force_validate(array, Self::validate)
    }

    /// Create a new [`DenseUnionArray`], returning an error if it is invalid
    pub fn try_new(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        offsets: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        let array = Self::from_parts(fields, len, type_ids, offsets, children, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        offsets: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Self {
        let union = UnionArray::new(fields, UnionMode::Dense, len, type_ids, children, nulls);
        Self { union, offsets }
    }

    /// Returns the shared union representation
    #[inline]
    pub fn union(&self) -> &UnionArray {
        &self.union
    }

    /// Returns the offsets of this array, one per row
    #[inline]
    pub fn offsets(&self) -> &[i32] {
        self.offsets.typed_data()
    }

    /// Returns the buffer backing [`Self::offsets`]
    #[inline]
    pub fn offset_buffer(&self) -> &Buffer {
        &self.offsets
    }

    /// Returns the slot of row `i` within the child selected by its type id
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds of the offsets or the offset is negative
    #[inline]
    pub fn value_offset(&self, i: usize) -> usize {
        usize::try_from(self.offsets()[i]).unwrap_or_else(|_| {
            panic!("negative offset {} at row {i}", self.offsets()[i])
        })
    }

    /// Returns the child array and slot holding the value of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the array is invalid
    pub fn value(&self, i: usize) -> (&ArrayRef, usize) {
        let child = self.type_id(i) as usize;
        (&self.children()[child], self.value_offset(i))
    }

    /// Checks this array against its declared shape, returning the first
    /// violation found.
    ///
    /// Buffer and children sizing is checked first, then that every type id
    /// selects a child, then that every offset is in bounds of the child its
    /// row selects. The content of the children is not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.union.validate_buffers()?;
        let offsets = entries::<i32>(&self.offsets);
        if self.offsets.len() != self.len() * std::mem::size_of::<i32>() {
            return Err(ValidationError::OffsetLengthMismatch {
                expected: self.len(),
                actual: offsets,
            });
        }
        validate_alignment(
            self.data_type(),
            "offsets",
            &self.offsets,
            std::mem::align_of::<i32>(),
        )?;
        self.union.validate_children()?;
        self.union.validate_tags()?;

        let children = self.children();
        for (row, (tag, offset)) in self.tags().iter().zip(self.offsets()).enumerate() {
            let child = *tag as usize;
            let child_len = children[child].len();
            if usize::try_from(*offset).map_or(true, |o| o >= child_len) {
                return Err(ValidationError::OffsetOutOfRange {
                    row,
                    offset: *offset,
                    child,
                    child_len,
                });
            }
        }
        Ok(())
    }
}

impl Deref for DenseUnionArray {
    type Target = UnionArray;

    fn deref(&self) -> &Self::Target {
        &self.union
    }
}

/// A union array with the sparse layout.
///
/// Every child has the same length as the union and row `r` is found at slot
/// `r` of child `tags[r]`. The slots of the other children at `r` hold
/// unspecified values that are never read.
#[derive(Debug, Clone)]
pub struct SparseUnionArray {
    union: UnionArray,
}

impl SparseUnionArray {
    /// Create a new [`SparseUnionArray`].
    ///
    /// Nothing is checked; call [`Self::validate`] before use, or use
    /// [`Self::try_new`].
    pub fn new(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Self {
        let array = Self::from_parts(fields, len, type_ids, children, nulls);
        force_validate(array, Self::validate)
    }

    /// Create a new [`SparseUnionArray`], returning an error if it is invalid
    pub fn try_new(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Result<Self, QuiverError> {
        let array = Self::from_parts(fields, len, type_ids, children, nulls);
        array.validate()?;
        Ok(array)
    }

    fn from_parts(
        fields: UnionFields,
        len: usize,
        type_ids: Buffer,
        children: Vec<ArrayRef>,
        nulls: Nulls,
    ) -> Self {
        let union = UnionArray::new(fields, UnionMode::Sparse, len, type_ids, children, nulls);
        Self { union }
    }

    /// Returns the shared union representation
    #[inline]
    pub fn union(&self) -> &UnionArray {
        &self.union
    }

    /// Returns the slot of row `i` within the child selected by its type id,
    /// which for a sparse union is always `i`
    #[inline]
    pub fn value_offset(&self, i: usize) -> usize {
        i
    }

    /// Returns the child array and slot holding the value of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the array is invalid
    pub fn value(&self, i: usize) -> (&ArrayRef, usize) {
        let child = self.type_id(i) as usize;
        (&self.children()[child], i)
    }

    /// Checks this array against its declared shape, returning the first
    /// violation found.
    ///
    /// Buffer and children sizing is checked first, then that every type id
    /// selects a child, then that every child is as long as the union. The
    /// content of the children is not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.union.validate_buffers()?;
        self.union.validate_children()?;
        self.union.validate_tags()?;

        let invalid = self
            .children()
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != self.len());
        match invalid {
            Some((child, c)) => Err(ValidationError::SparseChildLengthMismatch {
                child,
                expected: self.len(),
                actual: c.len(),
            }),
            None => Ok(()),
        }
    }
}

impl Deref for SparseUnionArray {
    type Target = UnionArray;

    fn deref(&self) -> &Self::Target {
        &self.union
    }
}

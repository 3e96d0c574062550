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

//! Module containing functionality to compute array equality.
//! This module uses [ArrayData] and dispatches on its variants rather than
//! on dynamic casting.

use quiver_schema::QuiverError;

use crate::data::ArrayData;

mod boolean;
mod list;
mod primitive;
mod structure;
mod union;
mod utils;
mod variable_size;

// these methods assume the same logical type, and that the null masks of the
// compared ranges are equal. For this reason, they are not exposed and are
// instead used to build the generic functions below (`equal_range`, `equal`
// and `range_equal`).
use boolean::boolean_equal;
use list::list_equal;
use primitive::primitive_equal;
use structure::struct_equal;
use union::union_equal;
use variable_size::variable_sized_equal;

/// Compares the values of two [ArrayData] starting at `lhs_start` and `rhs_start` respectively
/// for `len` slots.
#[inline]
fn equal_values(
    lhs: &ArrayData,
    rhs: &ArrayData,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    match (lhs, rhs) {
        (ArrayData::Null(_), ArrayData::Null(_)) => true,
        (ArrayData::Boolean(l), ArrayData::Boolean(r)) => {
            boolean_equal(l, r, lhs_start, rhs_start, len)
        }
        (ArrayData::Primitive(l), ArrayData::Primitive(r)) => {
            primitive_equal(l, r, lhs_start, rhs_start, len)
        }
        (ArrayData::Bytes(l), ArrayData::Bytes(r)) => {
            variable_sized_equal(l, r, lhs_start, rhs_start, len)
        }
        (ArrayData::List(l), ArrayData::List(r)) => list_equal(l, r, lhs_start, rhs_start, len),
        (ArrayData::Struct(l), ArrayData::Struct(r)) => {
            struct_equal(l, r, lhs_start, rhs_start, len)
        }
        (
            ArrayData::DenseUnion(_) | ArrayData::SparseUnion(_),
            ArrayData::DenseUnion(_) | ArrayData::SparseUnion(_),
        ) => union_equal(lhs, rhs, lhs_start, rhs_start, len),
        _ => false,
    }
}

fn equal_range(
    lhs: &ArrayData,
    rhs: &ArrayData,
    lhs_start: usize,
    rhs_start: usize,
    len: usize,
) -> bool {
    utils::equal_nulls(lhs, rhs, lhs_start, rhs_start, len)
        && equal_values(lhs, rhs, lhs_start, rhs_start, len)
}

/// Logically compares two [ArrayData].
///
/// Two arrays are logically equal if and only if:
/// * they are the same array, or
/// * their data types are equal ignoring union layouts
///   (see [`DataType::equals_datatype`](quiver_schema::DataType::equals_datatype))
/// * their lengths are equal
/// * their null counts are equal
/// * their null bitmaps are equal
/// * each of their non-null items are equal
///
/// Two items are equal when their in-memory representation is physically equal
/// (i.e. has the same bit content). Union items are resolved to the child
/// slot holding them first, so a dense and a sparse union holding the same
/// rows are equal.
///
/// # Panics
///
/// This function may panic whenever any of the [ArrayData] does not pass
/// [`ArrayData::validate_full`]
pub fn equal(lhs: &ArrayData, rhs: &ArrayData) -> bool {
    if std::ptr::eq(lhs, rhs) {
        return true;
    }
    utils::base_equal(lhs, rhs)
        && lhs.null_count() == rhs.null_count()
        && equal_range(lhs, rhs, 0, 0, lhs.len())
}

/// Compares rows `lhs_start..lhs_end` of `lhs` with the same number of rows
/// of `rhs` starting at `rhs_start`.
///
/// Returns an error if either range is out of bounds, and `Ok(false)` if the
/// arrays do not have the same logical type. Two unions are compared row by
/// row whatever their variant lists, and a row only needs both sides to
/// select variants of the same logical type. Rows compare as in [`equal`].
///
/// # Panics
///
/// This function may panic whenever any of the [ArrayData] does not pass
/// [`ArrayData::validate_full`]
pub fn range_equal(
    lhs: &ArrayData,
    rhs: &ArrayData,
    lhs_start: usize,
    lhs_end: usize,
    rhs_start: usize,
) -> Result<bool, QuiverError> {
    if lhs_end > lhs.len() {
        return Err(QuiverError::IndexOutOfRange {
            index: lhs_end,
            len: lhs.len(),
        });
    }
    if lhs_start > lhs_end {
        return Err(QuiverError::IndexOutOfRange {
            index: lhs_start,
            len: lhs_end,
        });
    }
    let len = lhs_end - lhs_start;
    match rhs_start.checked_add(len) {
        Some(rhs_end) if rhs_end <= rhs.len() => {}
        _ => {
            return Err(QuiverError::IndexOutOfRange {
                index: rhs_start.saturating_add(len),
                len: rhs.len(),
            })
        }
    }

    if std::ptr::eq(lhs, rhs) && lhs_start == rhs_start {
        return Ok(true);
    }
    // union rows are matched by the variant they select, not by tag number
    let both_unions = lhs.as_union().is_some() && rhs.as_union().is_some();
    if !both_unions && !lhs.data_type().equals_datatype(rhs.data_type()) {
        return Ok(false);
    }
    Ok(equal_range(lhs, rhs, lhs_start, rhs_start, len))
}

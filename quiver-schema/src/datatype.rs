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

use std::fmt;

use crate::{Fields, UnionFields};

/// Datatypes a quiver array can hold.
///
/// The variants include primitive fixed size types as well as the nested
/// types `List`, `Struct` and `Union`. Nested types can themselves be
/// nested within other arrays.
///
/// # Examples
///
/// ```
/// # use quiver_schema::{DataType, UnionFields, UnionMode};
/// let variants = UnionFields::new([DataType::Int32, DataType::Utf8]);
/// let dense = DataType::Union(variants.clone(), UnionMode::Dense);
/// let sparse = DataType::Union(variants, UnionMode::Sparse);
///
/// // the layout is not part of the signature
/// assert_eq!(dense.to_string(), "union<int32, string>");
/// assert_eq!(dense.to_string(), sparse.to_string());
/// assert_ne!(dense, sparse);
/// assert!(dense.equals_datatype(&sparse));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// Null type
    Null,
    /// A boolean datatype representing the values `true` and `false`.
    Boolean,
    /// A signed 8-bit integer.
    Int8,
    /// A signed 16-bit integer.
    Int16,
    /// A signed 32-bit integer.
    Int32,
    /// A signed 64-bit integer.
    Int64,
    /// An unsigned 8-bit integer.
    UInt8,
    /// An unsigned 16-bit integer.
    UInt16,
    /// An unsigned 32-bit integer.
    UInt32,
    /// An unsigned 64-bit integer.
    UInt64,
    /// A 16-bit floating point number.
    Float16,
    /// A 32-bit floating point number.
    Float32,
    /// A 64-bit floating point number.
    Float64,
    /// Opaque binary data of variable length, with 32-bit offsets.
    Binary,
    /// A variable-length string in Unicode with UTF-8 encoding, with 32-bit offsets.
    Utf8,
    /// A list of some logical data type with variable length, with 32-bit offsets.
    List(Box<DataType>),
    /// A nested datatype that contains a number of named sub-fields.
    Struct(Fields),
    /// A nested datatype that can represent slots of differing types.
    ///
    /// The row-to-child mapping is given by an int16 type id per row, where
    /// type id `i` selects the `i`-th variant of the [`UnionFields`].
    Union(UnionFields, UnionMode),
}

/// Sparse or Dense union layouts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnionMode {
    /// Every child has the same length as the union; row `r` lives at slot `r`
    /// of the child selected by its type id.
    Sparse,
    /// Children are packed; row `r` lives at slot `offsets[r]` of the child
    /// selected by its type id.
    Dense,
}

impl fmt::Display for UnionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnionMode::Sparse => write!(f, "sparse"),
            UnionMode::Dense => write!(f, "dense"),
        }
    }
}

impl DataType {
    /// Create a `List` of `item`
    pub fn new_list(item: DataType) -> Self {
        DataType::List(Box::new(item))
    }

    /// Returns true if this type is nested (List, Struct or Union).
    #[inline]
    pub fn is_nested(&self) -> bool {
        matches!(self, DataType::List(_) | DataType::Struct(_) | DataType::Union(_, _))
    }

    /// Returns true if this type is DataType::Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    /// Returns true if this type is a fixed-width integer or floating point type.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.primitive_width().is_some()
    }

    /// Returns the layout of this type if it is a union
    #[inline]
    pub fn union_mode(&self) -> Option<UnionMode> {
        match self {
            DataType::Union(_, mode) => Some(*mode),
            _ => None,
        }
    }

    /// Returns the declared variants of this type if it is a union
    #[inline]
    pub fn union_fields(&self) -> Option<&UnionFields> {
        match self {
            DataType::Union(fields, _) => Some(fields),
            _ => None,
        }
    }

    /// Returns the byte width of a primitive type, or `None` for every other type.
    pub fn primitive_width(&self) -> Option<usize> {
        match self {
            DataType::Int8 | DataType::UInt8 => Some(1),
            DataType::Int16 | DataType::UInt16 | DataType::Float16 => Some(2),
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => Some(4),
            DataType::Int64 | DataType::UInt64 | DataType::Float64 => Some(8),
            DataType::Null
            | DataType::Boolean
            | DataType::Binary
            | DataType::Utf8
            | DataType::List(_)
            | DataType::Struct(_)
            | DataType::Union(_, _) => None,
        }
    }

    /// Compares the logical identity of two types.
    ///
    /// This is `==` except that the [`UnionMode`] of unions is ignored at
    /// every level of nesting: a dense and a sparse union over the same
    /// variants describe the same logical values. Two types are
    /// `equals_datatype` exactly when their signatures (`to_string()`) agree.
    pub fn equals_datatype(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::List(a), DataType::List(b)) => a.equals_datatype(b),
            (DataType::Struct(a), DataType::Struct(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(a, b)| {
                        a.name() == b.name()
                            && a.is_nullable() == b.is_nullable()
                            && a.data_type().equals_datatype(b.data_type())
                    })
            }
            (DataType::Union(a, _), DataType::Union(b, _)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(a, b)| a.equals_datatype(b))
            }
            _ => self == other,
        }
    }
}

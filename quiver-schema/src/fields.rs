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
use std::sync::Arc;

use crate::{DataType, QuiverError};

/// A named, optionally nullable child of a [`DataType::Struct`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl Field {
    /// Creates a new field with the given name, data type, and nullability
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Returns an immutable reference to the `Field`'s name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an immutable reference to the [`Field`]'s  [`DataType`].
    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Indicates whether this [`Field`] supports null values.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// A cheaply cloneable, owned slice of [`Field`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fields(Arc<[Field]>);

impl Fields {
    /// Returns a new empty [`Fields`]
    pub fn empty() -> Self {
        Self(Arc::new([]))
    }
}

impl Default for Fields {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Field>> for Fields {
    fn from(value: Vec<Field>) -> Self {
        Self(value.into())
    }
}

impl Deref for Fields {
    type Target = [Field];

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The largest number of variants an int16 type id can address
pub const MAX_UNION_VARIANTS: usize = i16::MAX as usize + 1;

/// A cheaply cloneable, ordered, non-empty list of union variant types.
///
/// The position of a variant is its type id: rows tagged `i` hold a value
/// of the `i`-th variant, stored in the `i`-th child array.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<DataType>", into = "Vec<DataType>")
)]
pub struct UnionFields(Arc<[DataType]>);

impl std::fmt::Debug for UnionFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.as_ref().fmt(f)
    }
}

impl UnionFields {
    /// Create a new [`UnionFields`] from its variants, in type id order.
    ///
    /// Returns an error if `variants` is empty or has more entries than an
    /// int16 type id can select.
    ///
    /// ```
    /// use quiver_schema::{DataType, UnionFields};
    /// // type id 0 -> Int32, type id 1 -> Utf8
    /// let fields = UnionFields::try_new([DataType::Int32, DataType::Utf8]).unwrap();
    /// assert_eq!(fields.variant(1), Some(&DataType::Utf8));
    ///
    /// assert!(UnionFields::try_new(Vec::<DataType>::new()).is_err());
    /// ```
    pub fn try_new(variants: impl IntoIterator<Item = DataType>) -> Result<Self, QuiverError> {
        let variants: Arc<[DataType]> = variants.into_iter().collect();
        if variants.is_empty() {
            return Err(QuiverError::InvalidArgument(
                "a union must declare at least one variant".to_string(),
            ));
        }
        if variants.len() > MAX_UNION_VARIANTS {
            return Err(QuiverError::InvalidArgument(format!(
                "a union can declare at most {MAX_UNION_VARIANTS} variants, got {}",
                variants.len()
            )));
        }
        Ok(Self(variants))
    }

    /// Create a new [`UnionFields`] from its variants, in type id order.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions [`Self::try_new`] returns an error.
    pub fn new(variants: impl IntoIterator<Item = DataType>) -> Self {
        Self::try_new(variants).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Returns the number of variants
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no variants, which a validly constructed
    /// [`UnionFields`] never is
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the variant selected by `type_id`, if any
    pub fn variant(&self, type_id: i16) -> Option<&DataType> {
        usize::try_from(type_id).ok().and_then(|i| self.0.get(i))
    }

    /// Returns the variants in type id order
    pub fn variants(&self) -> &[DataType] {
        &self.0
    }

    /// Returns an iterator over the variants in type id order
    pub fn iter(&self) -> impl Iterator<Item = &DataType> + '_ {
        self.0.iter()
    }
}

impl TryFrom<Vec<DataType>> for UnionFields {
    type Error = QuiverError;

    fn try_from(variants: Vec<DataType>) -> Result<Self, Self::Error> {
        Self::try_new(variants)
    }
}

impl From<UnionFields> for Vec<DataType> {
    fn from(fields: UnionFields) -> Self {
        fields.0.to_vec()
    }
}

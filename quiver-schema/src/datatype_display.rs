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

use crate::{DataType, Field, UnionFields};

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // union layout is not part of the signature
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "bool"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::UInt8 => write!(f, "uint8"),
            Self::UInt16 => write!(f, "uint16"),
            Self::UInt32 => write!(f, "uint32"),
            Self::UInt64 => write!(f, "uint64"),
            Self::Float16 => write!(f, "halffloat"),
            Self::Float32 => write!(f, "float"),
            Self::Float64 => write!(f, "double"),
            Self::Binary => write!(f, "binary"),
            Self::Utf8 => write!(f, "string"),
            Self::List(item) => write!(f, "list<{item}>"),
            Self::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ">")
            }
            Self::Union(fields, _) => write!(f, "{fields}"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.data_type())?;
        if !self.is_nullable() {
            write!(f, " not null")?;
        }
        Ok(())
    }
}

impl fmt::Display for UnionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "union<")?;
        for (i, variant) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{variant}")?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use crate::{DataType, Field, Fields, UnionFields, UnionMode};

    #[test]
    fn test_display_primitive() {
        assert_eq!(DataType::Null.to_string(), "null");
        assert_eq!(DataType::Boolean.to_string(), "bool");
        assert_eq!(DataType::UInt16.to_string(), "uint16");
        assert_eq!(DataType::Float16.to_string(), "halffloat");
        assert_eq!(DataType::Float32.to_string(), "float");
        assert_eq!(DataType::Float64.to_string(), "double");
        assert_eq!(DataType::Utf8.to_string(), "string");
    }

    #[test]
    fn test_display_union() {
        let fields = UnionFields::new([DataType::Int32, DataType::Utf8]);
        let dense = DataType::Union(fields.clone(), UnionMode::Dense);
        let sparse = DataType::Union(fields, UnionMode::Sparse);
        assert_eq!(dense.to_string(), "union<int32, string>");
        assert_eq!(sparse.to_string(), "union<int32, string>");
    }

    #[test]
    fn test_display_single_variant_union() {
        let data_type = DataType::Union(UnionFields::new([DataType::Boolean]), UnionMode::Dense);
        assert_eq!(data_type.to_string(), "union<bool>");
    }

    #[test]
    fn test_display_nested() {
        let inner = DataType::Union(
            UnionFields::new([DataType::Int8, DataType::Binary]),
            UnionMode::Sparse,
        );
        let point = DataType::Struct(Fields::from(vec![
            Field::new("x", DataType::Float64, false),
            Field::new("tag", inner.clone(), true),
        ]));
        let outer = DataType::Union(
            UnionFields::new([DataType::new_list(inner), point]),
            UnionMode::Dense,
        );
        assert_eq!(
            outer.to_string(),
            "union<list<union<int8, binary>>, struct<x: double not null, tag: union<int8, binary>>>"
        );
    }
}

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

use arrow_buffer::bit_util;
use arrow_buffer::Buffer;
use quiver_schema::ValidationError;

/// A validity bitmap paired with the null count it was declared with.
///
/// Bit `i` of the bitmap is set when row `i` is valid. An absent bitmap means
/// every row is valid. The declared null count is stored as given and only
/// checked against the bitmap by [`Nulls::validate`].
#[derive(Debug, Clone, Default)]
pub struct Nulls {
    buffer: Option<Buffer>,
    null_count: usize,
}

impl Nulls {
    /// Creates a new [`Nulls`] from a bitmap and the number of unset bits it
    /// is declared to contain. Nothing is checked until [`Nulls::validate`].
    pub fn new(buffer: Option<Buffer>, null_count: usize) -> Self {
        Self { buffer, null_count }
    }

    /// Creates a [`Nulls`] with no bitmap, i.e. with every row valid
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a [`Nulls`] from a bitmap covering `len` rows, counting its nulls
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer than `len` bits
    pub fn from_bitmap(buffer: Buffer, len: usize) -> Self {
        let null_count = len - buffer.count_set_bits_offset(0, len);
        Self::new(Some(buffer), null_count)
    }

    /// Creates a [`Nulls`] from per-row validity, omitting the bitmap if no
    /// row is null
    pub fn from_validity(validity: impl IntoIterator<Item = bool>) -> Self {
        let mut bits = Vec::new();
        let mut null_count = 0;
        for (i, valid) in validity.into_iter().enumerate() {
            if i % 8 == 0 {
                bits.push(0_u8);
            }
            if valid {
                bit_util::set_bit(&mut bits, i);
            } else {
                null_count += 1;
            }
        }
        match null_count {
            0 => Self::none(),
            _ => Self::new(Some(Buffer::from_vec(bits)), null_count),
        }
    }

    /// Returns the bitmap, if any
    #[inline]
    pub fn buffer(&self) -> Option<&Buffer> {
        self.buffer.as_ref()
    }

    /// Returns the declared null count
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// Returns `true` if the bit for row `i` is unset
    ///
    /// # Panics
    ///
    /// Panics if the bitmap is shorter than `i` bits
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        self.buffer
            .as_ref()
            .map(|b| !bit_util::get_bit(b.as_slice(), i))
            .unwrap_or_default()
    }

    /// Checks the bitmap is large enough for `len` rows and that the declared
    /// null count agrees with it
    pub fn validate(&self, len: usize) -> Result<(), ValidationError> {
        let expected = match &self.buffer {
            Some(buffer) => {
                let needed = bit_util::ceil(len, 8);
                if buffer.len() < needed {
                    return Err(ValidationError::NullBitmapTooSmall {
                        expected: needed,
                        actual: buffer.len(),
                    });
                }
                len - buffer.count_set_bits_offset(0, len)
            }
            None => 0,
        };
        if self.null_count != expected {
            return Err(ValidationError::NullCountMismatch {
                declared: self.null_count,
                expected,
            });
        }
        Ok(())
    }
}

/// Returns `true` if any of the `len` bits of `nulls` starting at `offset` are unset
#[inline]
pub(crate) fn contains_nulls(nulls: Option<&Buffer>, offset: usize, len: usize) -> bool {
    match nulls {
        Some(buffer) => buffer.count_set_bits_offset(offset, len) != len,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_validity() {
        let nulls = Nulls::from_validity([true, false, true, true, false, true, true, true, false]);
        assert_eq!(nulls.null_count(), 3);
        assert_eq!(nulls.buffer().unwrap().len(), 2);
        assert!(!nulls.is_null(0));
        assert!(nulls.is_null(1));
        assert!(nulls.is_null(8));
        assert!(nulls.validate(9).is_ok());

        let nulls = Nulls::from_validity([true, true]);
        assert!(nulls.buffer().is_none());
        assert!(!nulls.is_null(1));
    }

    #[test]
    fn test_validate_null_count() {
        let bitmap = Buffer::from_slice_ref([0b0000_0101_u8]);
        assert!(Nulls::new(Some(bitmap.clone()), 1).validate(3).is_ok());

        let err = Nulls::new(Some(bitmap), 2).validate(3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NullCountMismatch {
                declared: 2,
                expected: 1
            }
        );

        let err = Nulls::new(None, 1).validate(3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NullCountMismatch {
                declared: 1,
                expected: 0
            }
        );
    }

    #[test]
    fn test_validate_bitmap_too_small() {
        let bitmap = Buffer::from_slice_ref([0xFF_u8]);
        let err = Nulls::new(Some(bitmap), 0).validate(9).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NullBitmapTooSmall {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_contains_nulls() {
        let bitmap = Buffer::from_slice_ref([0b1111_0111_u8]);
        assert!(contains_nulls(Some(&bitmap), 0, 8));
        assert!(!contains_nulls(Some(&bitmap), 4, 4));
        assert!(!contains_nulls(None, 0, 8));
    }
}

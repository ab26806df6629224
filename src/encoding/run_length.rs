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

//! `RunLength` decoding: `(value, length)` pairs expanded back into a flat
//! integer sequence.

use crate::encoding::EncodingKind;
use crate::error::{MalformedEncodingSnafu, Result, UnexpectedSequenceSnafu};
use crate::types::{DataType, TypedBuffer};

pub fn decode(input: &TypedBuffer, src_type: DataType, src_size: usize) -> Result<TypedBuffer> {
    let pairs = input.as_int32().ok_or_else(|| {
        UnexpectedSequenceSnafu {
            kind: EncodingKind::RunLength,
            expected: "an Int32 sequence of (value, length) pairs",
        }
        .build()
    })?;

    if pairs.len() % 2 != 0 {
        return MalformedEncodingSnafu {
            kind: EncodingKind::RunLength,
            msg: format!("pair sequence has odd length {}", pairs.len()),
        }
        .fail();
    }

    let mut flat: Vec<i32> = Vec::with_capacity(src_size);
    for pair in pairs.chunks_exact(2) {
        let (value, length) = (pair[0], pair[1]);
        if length < 0 {
            return MalformedEncodingSnafu {
                kind: EncodingKind::RunLength,
                msg: format!("negative run length {length}"),
            }
            .fail();
        }
        flat.extend(std::iter::repeat(value).take(length as usize));
    }

    if flat.len() != src_size {
        return MalformedEncodingSnafu {
            kind: EncodingKind::RunLength,
            msg: format!(
                "expected {src_size} emitted values, got {}",
                flat.len()
            ),
        }
        .fail();
    }

    cast_i32_sequence(flat, src_type, EncodingKind::RunLength)
}

/// Narrows/widens a freshly assembled `i32` sequence into the buffer shape
/// named by `src_type`. Only `RunLength` calls this: its expansion runs
/// entirely in `i32` space before the final cast, whereas `Delta` needs
/// width-correct wrapping at each accumulation step and so accumulates
/// directly in the target width instead.
pub(super) fn cast_i32_sequence(
    values: Vec<i32>,
    target: DataType,
    kind: EncodingKind,
) -> Result<TypedBuffer> {
    match target {
        DataType::Int8 => Ok(TypedBuffer::Int8(values.into_iter().map(|v| v as i8).collect())),
        DataType::Int16 => Ok(TypedBuffer::Int16(values.into_iter().map(|v| v as i16).collect())),
        DataType::Int32 => Ok(TypedBuffer::Int32(values)),
        DataType::Uint8 => Ok(TypedBuffer::Uint8(values.into_iter().map(|v| v as u8).collect())),
        DataType::Uint16 => Ok(TypedBuffer::Uint16(values.into_iter().map(|v| v as u16).collect())),
        DataType::Uint32 => Ok(TypedBuffer::Uint32(values.into_iter().map(|v| v as u32).collect())),
        other => MalformedEncodingSnafu {
            kind,
            msg: format!("srcType must be an integer type, got {other:?}"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_pairs_into_flat_sequence() {
        let input = TypedBuffer::Int32(vec![7, 3, 2, 2]);
        let out = decode(&input, DataType::Int32, 5).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![7, 7, 7, 2, 2]));
    }

    #[test]
    fn mismatched_src_size_is_malformed() {
        let input = TypedBuffer::Int32(vec![7, 3, 2, 2]);
        let err = decode(&input, DataType::Int32, 6).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedEncoding { .. }));
    }

    #[test]
    fn empty_pairs_yield_empty_output() {
        let input = TypedBuffer::Int32(vec![]);
        let out = decode(&input, DataType::Int32, 0).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![]));
    }
}

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

//! `IntegerPacking` decoding: a narrow-int sequence widened back to `Int32`,
//! using saturation tokens as overflow-continuation markers.

use crate::encoding::EncodingKind;
use crate::error::{MalformedEncodingSnafu, Result};
use crate::types::TypedBuffer;

fn narrow_to_i32(input: &TypedBuffer, byte_count: u8, is_unsigned: bool) -> Result<Vec<i32>> {
    match (is_unsigned, byte_count, input) {
        (false, 1, TypedBuffer::Int8(v)) => Ok(v.iter().map(|&x| x as i32).collect()),
        (false, 2, TypedBuffer::Int16(v)) => Ok(v.iter().map(|&x| x as i32).collect()),
        (true, 1, TypedBuffer::Uint8(v)) => Ok(v.iter().map(|&x| x as i32).collect()),
        (true, 2, TypedBuffer::Uint16(v)) => Ok(v.iter().map(|&x| x as i32).collect()),
        _ => MalformedEncodingSnafu {
            kind: EncodingKind::IntegerPacking,
            msg: format!(
                "input sequence {:?} does not match byteCount={byte_count} isUnsigned={is_unsigned}",
                input.data_type()
            ),
        }
        .fail(),
    }
}

/// The saturation token(s) that signal "this value continues into the next
/// element" for the given width/signedness. Unsigned packing has a single
/// continuation token (the max value); signed packing has two (min and max).
fn continuation_tokens(byte_count: u8, is_unsigned: bool) -> Result<(i32, Option<i32>)> {
    match (is_unsigned, byte_count) {
        (false, 1) => Ok((0x7F, Some(-0x80))),
        (false, 2) => Ok((0x7FFF, Some(-0x8000))),
        (true, 1) => Ok((0xFF, None)),
        (true, 2) => Ok((0xFFFF, None)),
        _ => MalformedEncodingSnafu {
            kind: EncodingKind::IntegerPacking,
            msg: format!("byteCount must be 1 or 2, got {byte_count}"),
        }
        .fail(),
    }
}

pub fn decode(
    input: &TypedBuffer,
    byte_count: u8,
    is_unsigned: bool,
    src_size: usize,
) -> Result<TypedBuffer> {
    let tokens = narrow_to_i32(input, byte_count, is_unsigned)?;
    let (upper, lower) = continuation_tokens(byte_count, is_unsigned)?;

    let mut out = Vec::with_capacity(src_size);
    let mut acc: i32 = 0;
    for &token in &tokens {
        let is_continuation = token == upper || lower == Some(token);
        acc += token;
        if !is_continuation {
            out.push(acc);
            acc = 0;
        }
    }

    if out.len() != src_size {
        return MalformedEncodingSnafu {
            kind: EncodingKind::IntegerPacking,
            msg: format!("expected {src_size} unpacked values, got {}", out.len()),
        }
        .fail();
    }

    Ok(TypedBuffer::Int32(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_one_byte_continuation() {
        let input = TypedBuffer::Int8(vec![127, 127, 1, -128, -1, 5]);
        let out = decode(&input, 1, false, 3).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![255, -129, 5]));
    }

    #[test]
    fn unsigned_one_byte_continuation() {
        let input = TypedBuffer::Uint8(vec![255, 255, 10]);
        let out = decode(&input, 1, true, 1).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![520]));
    }

    #[test]
    fn no_continuations_emits_identity() {
        let input = TypedBuffer::Int8(vec![1, 2, 3]);
        let out = decode(&input, 1, false, 3).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![1, 2, 3]));
    }

    #[test]
    fn mismatched_src_size_is_malformed() {
        let input = TypedBuffer::Int8(vec![1, 2, 3]);
        let err = decode(&input, 1, false, 2).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedEncoding { .. }));
    }
}

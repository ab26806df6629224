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

//! `Delta` decoding: cumulative sum with an explicit starting offset.
//! Overflow wraps in the declared `srcType`; the encoder is trusted to have
//! picked a type wide enough for the actual value range.

use num::traits::Zero;

use crate::encoding::packed_int::PackedInt;
use crate::encoding::EncodingKind;
use crate::error::{MalformedEncodingSnafu, Result};
use crate::types::{DataType, TypedBuffer};

fn delta_typed<T: PackedInt>(input: &TypedBuffer, origin: i64) -> Vec<T> {
    let n = input.len();
    let mut out = Vec::with_capacity(n);
    let mut acc = T::zero();
    for i in 0..n {
        let v = T::from_i32(input.get_as_i64(i) as i32);
        acc = if i == 0 {
            v.wrapping_add(&T::from_i32(origin as i32))
        } else {
            v.wrapping_add(&acc)
        };
        out.push(acc);
    }
    out
}

pub fn decode(input: &TypedBuffer, origin: i64, src_type: DataType) -> Result<TypedBuffer> {
    match src_type {
        DataType::Int8 => Ok(TypedBuffer::Int8(delta_typed::<i8>(input, origin))),
        DataType::Int16 => Ok(TypedBuffer::Int16(delta_typed::<i16>(input, origin))),
        DataType::Int32 => Ok(TypedBuffer::Int32(delta_typed::<i32>(input, origin))),
        other => MalformedEncodingSnafu {
            kind: EncodingKind::Delta,
            msg: format!("srcType must be a signed integer type, got {other:?}"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_from_origin() {
        let input = TypedBuffer::Int32(vec![1, 2, 3, -1]);
        let out = decode(&input, 10, DataType::Int32).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![11, 13, 16, 15]));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let input = TypedBuffer::Int32(vec![]);
        let out = decode(&input, 5, DataType::Int32).unwrap();
        assert_eq!(out, TypedBuffer::Int32(vec![]));
    }

    #[test]
    fn wraps_on_overflow_in_declared_width() {
        let input = TypedBuffer::Int8(vec![100, 100]);
        let out = decode(&input, 0, DataType::Int8).unwrap();
        // 100 + 100 wraps around i8::MAX.
        assert_eq!(out, TypedBuffer::Int8(vec![100, 100i8.wrapping_add(100)]));
    }
}

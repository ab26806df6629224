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

//! `FixedPoint` decoding: an `Int32` sequence scaled back to a real number.

use crate::encoding::EncodingKind;
use crate::error::{MalformedEncodingSnafu, Result, UnexpectedSequenceSnafu};
use crate::types::{DataType, TypedBuffer};

pub fn decode(input: &TypedBuffer, factor: f64, src_type: DataType) -> Result<TypedBuffer> {
    let values = input
        .as_int32()
        .ok_or_else(|| {
            UnexpectedSequenceSnafu {
                kind: EncodingKind::FixedPoint,
                expected: "an Int32 sequence",
            }
            .build()
        })?;

    if factor == 0.0 {
        return MalformedEncodingSnafu {
            kind: EncodingKind::FixedPoint,
            msg: "factor must be nonzero".to_string(),
        }
        .fail();
    }

    // Precompute the reciprocal once rather than dividing per element.
    let inv_factor = 1.0 / factor;

    match src_type {
        DataType::Float32 => Ok(TypedBuffer::Float32(
            values
                .iter()
                .map(|&v| (v as f64 * inv_factor) as f32)
                .collect(),
        )),
        DataType::Float64 => Ok(TypedBuffer::Float64(
            values.iter().map(|&v| v as f64 * inv_factor).collect(),
        )),
        other => MalformedEncodingSnafu {
            kind: EncodingKind::FixedPoint,
            msg: format!("srcType must be Float32 or Float64, got {other:?}"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_int32_by_reciprocal_factor() {
        let input = TypedBuffer::Int32(vec![1500, 2500, 3140]);
        let out = decode(&input, 1000.0, DataType::Float32).unwrap();
        match out {
            TypedBuffer::Float32(v) => {
                assert!((v[0] - 1.5).abs() < 1e-6);
                assert!((v[1] - 2.5).abs() < 1e-6);
                assert!((v[2] - 3.14).abs() < 1e-4);
            }
            _ => panic!("expected Float32"),
        }
    }

    #[test]
    fn zero_factor_is_malformed() {
        let input = TypedBuffer::Int32(vec![1]);
        let err = decode(&input, 0.0, DataType::Float64).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedEncoding { .. }));
    }
}

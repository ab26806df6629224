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

//! `IntervalQuantization` decoding: an `Int32` step index into a uniformly
//! discretized `[min, max]` interval.

use crate::encoding::EncodingKind;
use crate::error::{MalformedEncodingSnafu, Result, UnexpectedSequenceSnafu};
use crate::types::{DataType, TypedBuffer};

pub fn decode(
    input: &TypedBuffer,
    min: f64,
    max: f64,
    num_steps: i64,
    src_type: DataType,
) -> Result<TypedBuffer> {
    let values = input.as_int32().ok_or_else(|| {
        UnexpectedSequenceSnafu {
            kind: EncodingKind::IntervalQuantization,
            expected: "an Int32 sequence",
        }
        .build()
    })?;

    if num_steps < 2 {
        return MalformedEncodingSnafu {
            kind: EncodingKind::IntervalQuantization,
            msg: format!("numSteps must be >= 2, got {num_steps}"),
        }
        .fail();
    }

    let step = (max - min) / (num_steps - 1) as f64;

    match src_type {
        DataType::Float32 => Ok(TypedBuffer::Float32(
            values
                .iter()
                .map(|&v| (min + step * v as f64) as f32)
                .collect(),
        )),
        DataType::Float64 => Ok(TypedBuffer::Float64(
            values.iter().map(|&v| min + step * v as f64).collect(),
        )),
        other => MalformedEncodingSnafu {
            kind: EncodingKind::IntervalQuantization,
            msg: format!("srcType must be Float32 or Float64, got {other:?}"),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_uniformly_across_steps() {
        let input = TypedBuffer::Int32(vec![0, 2, 4]);
        let out = decode(&input, 0.0, 1.0, 5, DataType::Float64).unwrap();
        assert_eq!(out, TypedBuffer::Float64(vec![0.0, 0.5, 1.0]));
    }

    #[test]
    fn num_steps_of_one_is_malformed() {
        let input = TypedBuffer::Int32(vec![0]);
        let err = decode(&input, 0.0, 1.0, 1, DataType::Float64).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedEncoding { .. }));
    }
}

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

//! Byte primitives: the data-type enumeration and little-endian-to-native
//! reinterpretation of raw byte buffers.

use std::sync::OnceLock;

use serde::Deserialize;
use snafu::OptionExt;

use crate::error::{Result, UnsupportedTypeSnafu};

/// The eight numeric widths a `ByteArray` encoding may target. Values match
/// the wire-format type codes used by the BinaryCIF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    Float32,
    Float64,
}

impl DataType {
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            1 => DataType::Int8,
            2 => DataType::Int16,
            3 => DataType::Int32,
            4 => DataType::Uint8,
            5 => DataType::Uint16,
            6 => DataType::Uint32,
            32 => DataType::Float32,
            33 => DataType::Float64,
            other => return UnsupportedTypeSnafu { code: other }.fail(),
        })
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub fn is_signed(self) -> bool {
        matches!(self, DataType::Int8 | DataType::Int16 | DataType::Int32)
    }

    pub(crate) fn byte_width(self) -> usize {
        match self {
            DataType::Int8 | DataType::Uint8 => 1,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float32 => 4,
            DataType::Float64 => 8,
        }
    }
}

/// Allows the BinaryCIF wire type code (used both as the `ByteArray` target
/// type and as the numeric code embedded in test fixtures) to be produced
/// from an ordinary integer via serde without this crate depending on any
/// particular outer container format.
impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = i32::deserialize(deserializer)?;
        DataType::from_code(code).map_err(serde::de::Error::custom)
    }
}

/// A typed, owned sequence: the value flowing between stages of the decoding
/// pipeline once raw bytes have been reinterpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedBuffer {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedBuffer {
    pub fn data_type(&self) -> DataType {
        match self {
            TypedBuffer::Int8(_) => DataType::Int8,
            TypedBuffer::Int16(_) => DataType::Int16,
            TypedBuffer::Int32(_) => DataType::Int32,
            TypedBuffer::Uint8(_) => DataType::Uint8,
            TypedBuffer::Uint16(_) => DataType::Uint16,
            TypedBuffer::Uint32(_) => DataType::Uint32,
            TypedBuffer::Float32(_) => DataType::Float32,
            TypedBuffer::Float64(_) => DataType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedBuffer::Int8(v) => v.len(),
            TypedBuffer::Int16(v) => v.len(),
            TypedBuffer::Int32(v) => v.len(),
            TypedBuffer::Uint8(v) => v.len(),
            TypedBuffer::Uint16(v) => v.len(),
            TypedBuffer::Uint32(v) => v.len(),
            TypedBuffer::Float32(v) => v.len(),
            TypedBuffer::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int32(&self) -> Option<&[i32]> {
        match self {
            TypedBuffer::Int32(v) => Some(v),
            _ => None,
        }
    }

    /// Widens any element to `i64`, truncating toward zero for floats. Used
    /// by the column accessor layer's integer getter.
    pub fn get_as_i64(&self, row: usize) -> i64 {
        match self {
            TypedBuffer::Int8(v) => v[row] as i64,
            TypedBuffer::Int16(v) => v[row] as i64,
            TypedBuffer::Int32(v) => v[row] as i64,
            TypedBuffer::Uint8(v) => v[row] as i64,
            TypedBuffer::Uint16(v) => v[row] as i64,
            TypedBuffer::Uint32(v) => v[row] as i64,
            TypedBuffer::Float32(v) => v[row] as i64,
            TypedBuffer::Float64(v) => v[row] as i64,
        }
    }

    /// Compares two rows' stored values exactly, without widening through
    /// `i64`/`f64` first (which would corrupt float comparisons). Backs the
    /// column accessor's value-equality check, which compares the stored
    /// representation alone.
    pub fn values_equal(&self, a: usize, b: usize) -> bool {
        match self {
            TypedBuffer::Int8(v) => v[a] == v[b],
            TypedBuffer::Int16(v) => v[a] == v[b],
            TypedBuffer::Int32(v) => v[a] == v[b],
            TypedBuffer::Uint8(v) => v[a] == v[b],
            TypedBuffer::Uint16(v) => v[a] == v[b],
            TypedBuffer::Uint32(v) => v[a] == v[b],
            TypedBuffer::Float32(v) => v[a] == v[b],
            TypedBuffer::Float64(v) => v[a] == v[b],
        }
    }

    /// Widens any element to `f64`. Used by `getFloat`.
    pub fn get_as_f64(&self, row: usize) -> f64 {
        match self {
            TypedBuffer::Int8(v) => v[row] as f64,
            TypedBuffer::Int16(v) => v[row] as f64,
            TypedBuffer::Int32(v) => v[row] as f64,
            TypedBuffer::Uint8(v) => v[row] as f64,
            TypedBuffer::Uint16(v) => v[row] as f64,
            TypedBuffer::Uint32(v) => v[row] as f64,
            TypedBuffer::Float32(v) => v[row] as f64,
            TypedBuffer::Float64(v) => v[row] as f64,
        }
    }
}

fn host_is_little_endian() -> bool {
    static CACHE: OnceLock<bool> = OnceLock::new();
    *CACHE.get_or_init(|| 1u16.to_ne_bytes()[0] == 1)
}

/// Reinterprets a little-endian wire buffer as a typed sequence.
///
/// On a little-endian host this is a single allocating copy via
/// [`bytemuck::pod_collect_to_vec`] with no per-element unpacking; on a
/// big-endian host each element is unpacked explicitly through
/// `from_le_bytes`. Either way the result owns its storage rather than
/// aliasing `bytes`, since this crate hands owned `TypedBuffer`s up through
/// the column layer independent of the input buffer's lifetime (see Design
/// Notes on zero-copy vs copy).
pub fn reinterpret(bytes: &[u8], target: DataType) -> Result<TypedBuffer> {
    macro_rules! narrow {
        ($ty:ty, $variant:ident) => {{
            let v: Vec<$ty> = bytes.iter().map(|&b| b as $ty).collect();
            Ok(TypedBuffer::$variant(v))
        }};
    }

    macro_rules! wide {
        ($ty:ty, $variant:ident) => {{
            let width = target.byte_width();
            debug_assert_eq!(width, std::mem::size_of::<$ty>());
            if bytes.len() % width != 0 {
                return crate::error::MalformedEncodingSnafu {
                    kind: crate::encoding::EncodingKind::ByteArray,
                    msg: format!(
                        "buffer length {} is not a multiple of element width {}",
                        bytes.len(),
                        width
                    ),
                }
                .fail();
            }
            let v: Vec<$ty> = if host_is_little_endian() {
                bytemuck::pod_collect_to_vec::<u8, $ty>(bytes)
            } else {
                bytes
                    .chunks_exact(width)
                    .map(|c| {
                        let mut buf = [0u8; std::mem::size_of::<$ty>()];
                        buf.copy_from_slice(c);
                        <$ty>::from_le_bytes(buf)
                    })
                    .collect()
            };
            Ok(TypedBuffer::$variant(v))
        }};
    }

    match target {
        DataType::Int8 => narrow!(i8, Int8),
        DataType::Uint8 => narrow!(u8, Uint8),
        DataType::Int16 => wide!(i16, Int16),
        DataType::Uint16 => wide!(u16, Uint16),
        DataType::Int32 => wide!(i32, Int32),
        DataType::Uint32 => wide!(u32, Uint32),
        DataType::Float32 => wide!(f32, Float32),
        DataType::Float64 => wide!(f64, Float64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int16_little_endian_bytes_decode_regardless_of_host() {
        // 0x1234 and -1 as i16, decoded the same way on either host endianness.
        let bytes = [0x34, 0x12, 0xFF, 0xFF];
        let decoded = reinterpret(&bytes, DataType::Int16).unwrap();
        assert_eq!(decoded, TypedBuffer::Int16(vec![0x1234, -1]));
    }

    #[test]
    fn uint8_bytes_alias_without_swap() {
        let bytes = [0u8, 255, 128];
        let decoded = reinterpret(&bytes, DataType::Uint8).unwrap();
        assert_eq!(decoded, TypedBuffer::Uint8(vec![0, 255, 128]));
    }

    #[test]
    fn int8_reinterprets_signed() {
        let bytes = [0xFFu8, 0x01, 0x80];
        let decoded = reinterpret(&bytes, DataType::Int8).unwrap();
        assert_eq!(decoded, TypedBuffer::Int8(vec![-1, 1, -128]));
    }

    #[test]
    fn float32_round_trips() {
        let value: f32 = 3.14;
        let bytes = value.to_le_bytes();
        let decoded = reinterpret(&bytes, DataType::Float32).unwrap();
        assert_eq!(decoded, TypedBuffer::Float32(vec![value]));
    }

    #[test]
    fn unaligned_length_is_malformed() {
        let bytes = [0u8, 1, 2];
        let err = reinterpret(&bytes, DataType::Int32).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedEncoding { .. }));
    }

    #[test]
    fn unsupported_type_code() {
        let err = DataType::from_code(99).unwrap_err();
        assert!(matches!(err, crate::error::Error::UnsupportedType { code: 99, .. }));
    }
}

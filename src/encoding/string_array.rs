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

//! `StringArray` decoding: a per-row index sequence resolved against a
//! shared string pool through an offset table.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use super::{decode as decode_pipeline, EncodedData, Encoding, EncodingKind};
use crate::error::{MalformedEncodingSnafu, Result};

/// A decoded string column's backing sequence. Absent entries (negative
/// index) are `None`. Repeated indices share one allocation, interning
/// scoped to a single column decode via the cache built in [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct StringSequence(pub Vec<Option<Arc<str>>>);

impl StringSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.0[row].as_deref()
    }
}

fn decode_to_i64(encodings: &[Encoding], bytes: Bytes, kind: EncodingKind) -> Result<Vec<i64>> {
    let data = EncodedData {
        encodings: encodings.to_vec(),
        data: bytes,
    };
    let decoded = decode_pipeline(&data)?;
    let typed = decoded.as_typed().ok_or_else(|| {
        MalformedEncodingSnafu {
            kind,
            msg: "expected a numeric sequence".to_string(),
        }
        .build()
    })?;
    Ok((0..typed.len()).map(|i| typed.get_as_i64(i)).collect())
}

pub fn decode(
    index_bytes: &Bytes,
    data_encoding: &[Encoding],
    offset_encoding: &[Encoding],
    string_data: &str,
    offsets: &Bytes,
) -> Result<StringSequence> {
    let offset_table = decode_to_i64(offset_encoding, offsets.clone(), EncodingKind::StringArray)?;
    let indices = decode_to_i64(data_encoding, index_bytes.clone(), EncodingKind::StringArray)?;

    let mut cache: HashMap<i64, Arc<str>> = HashMap::new();
    let mut out = Vec::with_capacity(indices.len());
    for index in indices {
        if index < 0 {
            out.push(None);
            continue;
        }
        if let Some(cached) = cache.get(&index) {
            out.push(Some(cached.clone()));
            continue;
        }
        let start = *offset_table.get(index as usize).ok_or_else(|| {
            MalformedEncodingSnafu {
                kind: EncodingKind::StringArray,
                msg: format!("string index {index} out of range for offset table"),
            }
            .build()
        })? as usize;
        let end = *offset_table.get(index as usize + 1).ok_or_else(|| {
            MalformedEncodingSnafu {
                kind: EncodingKind::StringArray,
                msg: format!("string index {index} out of range for offset table"),
            }
            .build()
        })? as usize;
        let slice = string_data.get(start..end).ok_or_else(|| {
            MalformedEncodingSnafu {
                kind: EncodingKind::StringArray,
                msg: format!("offset range {start}..{end} is not valid within stringData"),
            }
            .build()
        })?;
        let interned: Arc<str> = Arc::from(slice);
        cache.insert(index, interned.clone());
        out.push(Some(interned));
    }

    Ok(StringSequence(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    fn byte_array_i32() -> Vec<Encoding> {
        vec![Encoding::ByteArray {
            target_type: DataType::Int32,
        }]
    }

    #[test]
    fn resolves_indices_against_pool_with_nulls() {
        let string_data = "foobar";
        let offsets_values = [0i32, 3, 6];
        let offsets_bytes: Bytes = offsets_values
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>()
            .into();
        let indices_values = [0i32, 1, 0, -1, 1];
        let indices_bytes: Bytes = indices_values
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>()
            .into();

        let data_encoding = byte_array_i32();
        let offset_encoding = byte_array_i32();

        let result = decode(
            &indices_bytes,
            &data_encoding,
            &offset_encoding,
            string_data,
            &offsets_bytes,
        )
        .unwrap();

        let rendered: Vec<Option<&str>> = (0..result.len()).map(|i| result.get(i)).collect();
        assert_eq!(
            rendered,
            vec![Some("foo"), Some("bar"), Some("foo"), None, Some("bar")]
        );
    }

    #[test]
    fn repeated_index_shares_one_allocation() {
        let string_data = "aaa";
        let offsets_values = [0i32, 3];
        let offsets_bytes: Bytes = offsets_values
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>()
            .into();
        let indices_values = [0i32, 0, 0];
        let indices_bytes: Bytes = indices_values
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>()
            .into();

        let data_encoding = byte_array_i32();
        let offset_encoding = byte_array_i32();

        let result = decode(
            &indices_bytes,
            &data_encoding,
            &offset_encoding,
            string_data,
            &offsets_bytes,
        )
        .unwrap();

        let (a, b) = (result.0[0].clone().unwrap(), result.0[1].clone().unwrap());
        assert!(Arc::ptr_eq(&a, &b));
    }
}

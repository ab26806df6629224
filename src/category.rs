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

//! `Category`: a named, row-counted set of columns whose decoding is
//! deferred until a column is first requested.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::column::Column;
use crate::encoding::{decode, Decoded, EncodedData};
use crate::error::{MismatchedDataTypeSnafu, Result};

/// Wire shape of a category's column: a required values buffer and an
/// optional presence-mask buffer.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedColumn {
    pub name: String,
    pub data: EncodedData,
    #[serde(default)]
    pub mask: Option<EncodedData>,
}

/// Wire shape of a category.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedCategory {
    pub name: String,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    pub columns: Vec<EncodedColumn>,
}

/// A category's decoded view. Column objects are built lazily: the encoded
/// form is retained until a name is first requested through
/// [`Category::get_column`], at which point the pipeline is run and the
/// resulting [`Column`] is cached for subsequent calls.
///
/// The cache is guarded by a `Mutex` so concurrent first-touch calls from
/// multiple threads race on the lock, not on the decode, mirroring the
/// teacher's `Mutex`-guarded lazily-built fields in its own schema types.
#[derive(Debug)]
pub struct Category {
    name: String,
    row_count: usize,
    column_names: Vec<String>,
    columns: HashMap<String, EncodedColumn>,
    cache: Mutex<HashMap<String, Arc<Column>>>,
}

impl Category {
    pub fn new(encoded: EncodedCategory) -> Self {
        let column_names = encoded.columns.iter().map(|c| c.name.clone()).collect();
        let columns = encoded
            .columns
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();
        Category {
            name: encoded.name,
            row_count: encoded.row_count,
            column_names,
            columns,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Declaration order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Decodes (on first call) and returns the named column, or the
    /// `Undefined` sentinel if `name` isn't one of this category's columns.
    /// Repeated calls return the same cached, semantically equivalent
    /// object rather than re-running the pipeline.
    pub fn get_column(&self, name: &str) -> Result<Arc<Column>> {
        if let Some(cached) = self.cache.lock().unwrap().get(name) {
            return Ok(cached.clone());
        }
        let Some(encoded) = self.columns.get(name) else {
            return Ok(Arc::new(Column::Undefined));
        };

        let data = decode(&encoded.data)?;
        let mask = match encoded.mask.as_ref().map(decode).transpose()? {
            Some(Decoded::Typed(t)) => Some(t),
            Some(Decoded::Strings(_)) => {
                return MismatchedDataTypeSnafu {
                    msg: "presence mask must decode to a numeric sequence, got strings".to_string(),
                }
                .fail()
            }
            None => None,
        };
        let column = Arc::new(Column::from_decoded(data, mask));

        self.cache
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert_with(|| column.clone());
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;
    use crate::types::DataType;
    use bytes::Bytes;

    fn int32_column(name: &str, values: &[i32]) -> EncodedColumn {
        EncodedColumn {
            name: name.to_string(),
            data: EncodedData {
                encodings: vec![Encoding::ByteArray {
                    target_type: DataType::Int32,
                }],
                data: values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>().into(),
            },
            mask: None,
        }
    }

    #[test]
    fn unknown_column_name_is_undefined() {
        let cat = Category::new(EncodedCategory {
            name: "atom_site".to_string(),
            row_count: 2,
            columns: vec![int32_column("id", &[1, 2])],
        });
        let col = cat.get_column("nope").unwrap();
        assert!(!col.is_defined());
    }

    #[test]
    fn repeated_get_column_is_idempotent() {
        let cat = Category::new(EncodedCategory {
            name: "atom_site".to_string(),
            row_count: 2,
            columns: vec![int32_column("id", &[1, 2])],
        });
        let a = cat.get_column("id").unwrap();
        let b = cat.get_column("id").unwrap();
        assert_eq!(a.get_integer(0).unwrap(), b.get_integer(0).unwrap());
        assert_eq!(a.get_integer(1).unwrap(), 2);
    }

    #[test]
    fn column_names_preserve_declaration_order() {
        let cat = Category::new(EncodedCategory {
            name: "atom_site".to_string(),
            row_count: 1,
            columns: vec![int32_column("b", &[1]), int32_column("a", &[2])],
        });
        assert_eq!(cat.column_names(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn masked_column_decodes_presence_bytes() {
        let mut col = int32_column("id", &[0, 0, 5]);
        col.mask = Some(EncodedData {
            encodings: vec![Encoding::ByteArray {
                target_type: DataType::Uint8,
            }],
            data: Bytes::from_static(&[0, 1, 2]),
        });
        let cat = Category::new(EncodedCategory {
            name: "atom_site".to_string(),
            row_count: 3,
            columns: vec![col],
        });
        let decoded = cat.get_column("id").unwrap();
        assert_eq!(decoded.get_string(0).unwrap(), Some("0".to_string()));
        assert_eq!(decoded.get_string(1).unwrap(), None);
        assert_eq!(decoded.get_string(2).unwrap(), None);
    }
}

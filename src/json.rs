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

//! `toJSON` projections: each level of the decoded tree renders itself as a
//! plain `serde_json::Value`, with a category's rows rendered as name to
//! string-form-of-value maps, substituting `.`/`?` for absent cells.

use serde_json::{Map, Value};

use crate::category::Category;
use crate::column::{Column, Presence};
use crate::data_block::DataBlock;
use crate::error::Result;
use crate::file::File;

/// Renders one cell. A row whose presence mask says not-present substitutes
/// the mask's placeholder rune; a row that *is* present but whose
/// underlying value is itself null (a `StringArray` negative index, which
/// carries no presence sub-kind of its own) renders as `?`, the more
/// conservative of the two placeholders.
fn render_cell(col: &Column, row: usize) -> Result<String> {
    let presence = col.get_value_presence(row)?;
    if presence != Presence::Present {
        return Ok(presence.placeholder().to_string());
    }
    match col.get_string(row)? {
        Some(s) => Ok(s),
        None => Ok(Presence::Unknown.placeholder().to_string()),
    }
}

impl Category {
    /// Renders this category's rows as a JSON array of objects, one per
    /// row, mapping each column name to its string-form cell value.
    pub fn to_json(&self) -> Result<Value> {
        let columns: Vec<(&String, std::sync::Arc<Column>)> = self
            .column_names()
            .iter()
            .map(|name| self.get_column(name).map(|col| (name, col)))
            .collect::<Result<_>>()?;

        let mut rows = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let mut obj = Map::with_capacity(columns.len());
            for (name, col) in &columns {
                obj.insert((*name).clone(), Value::String(render_cell(col, row)?));
            }
            rows.push(Value::Object(obj));
        }
        Ok(Value::Array(rows))
    }
}

impl DataBlock {
    /// Renders `{ "header": ..., "categories": { name: categoryJson } }`.
    pub fn to_json(&self) -> Result<Value> {
        let mut categories = Map::with_capacity(self.category_names().len());
        for name in self.category_names() {
            let category = self
                .get_category(name)
                .expect("category_names only lists categories that exist");
            categories.insert(name.clone(), category.to_json()?);
        }
        let mut obj = Map::new();
        obj.insert("header".to_string(), Value::String(self.header().to_string()));
        obj.insert("categories".to_string(), Value::Object(categories));
        Ok(Value::Object(obj))
    }
}

impl File {
    /// Renders `{ "version": ..., "encoder": ..., "dataBlocks": [...] }`.
    pub fn to_json(&self) -> Result<Value> {
        let blocks = self
            .data_blocks()
            .iter()
            .map(DataBlock::to_json)
            .collect::<Result<Vec<_>>>()?;
        let mut obj = Map::new();
        obj.insert("version".to_string(), Value::String(self.version().to_string()));
        obj.insert("encoder".to_string(), Value::String(self.encoder().to_string()));
        obj.insert("dataBlocks".to_string(), Value::Array(blocks));
        Ok(Value::Object(obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{EncodedCategory, EncodedColumn};
    use crate::data_block::EncodedDataBlock;
    use crate::encoding::{EncodedData, Encoding};
    use crate::file::EncodedFile;
    use crate::types::DataType;
    use bytes::Bytes;

    #[test]
    fn renders_mask_placeholders() {
        let column = EncodedColumn {
            name: "x".to_string(),
            data: EncodedData {
                encodings: vec![Encoding::ByteArray {
                    target_type: DataType::Int32,
                }],
                data: [0i32, 0, 5].iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>().into(),
            },
            mask: Some(EncodedData {
                encodings: vec![Encoding::ByteArray {
                    target_type: DataType::Uint8,
                }],
                data: Bytes::from_static(&[0, 1, 2]),
            }),
        };
        let category = Category::new(EncodedCategory {
            name: "atom_site".to_string(),
            row_count: 3,
            columns: vec![column],
        });
        let json = category.to_json().unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows[0]["x"], Value::String("0".to_string()));
        assert_eq!(rows[1]["x"], Value::String(".".to_string()));
        assert_eq!(rows[2]["x"], Value::String("?".to_string()));
    }

    #[test]
    fn file_json_preserves_block_order() {
        let file = File::new(EncodedFile {
            version: "0.3.0".to_string(),
            encoder: "test".to_string(),
            data_blocks: vec![EncodedDataBlock {
                header: "1ABC".to_string(),
                categories: vec![],
            }],
        });
        let json = file.to_json().unwrap();
        assert_eq!(json["dataBlocks"][0]["header"], Value::String("1ABC".to_string()));
    }
}

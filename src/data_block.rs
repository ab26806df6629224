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

//! `DataBlock`: a header plus an ordered, name-addressable set of
//! categories.

use std::collections::HashMap;

use serde::Deserialize;

use crate::category::{Category, EncodedCategory};

/// Wire shape of a data block.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedDataBlock {
    pub header: String,
    pub categories: Vec<EncodedCategory>,
}

/// A data block's decoded view: categories are materialized eagerly as thin
/// wrappers (cheap, since only `Category::new` runs and no column is
/// decoded) and looked up by name in constant time.
#[derive(Debug)]
pub struct DataBlock {
    header: String,
    category_names: Vec<String>,
    categories: HashMap<String, Category>,
}

impl DataBlock {
    pub fn new(encoded: EncodedDataBlock) -> Self {
        let category_names = encoded.categories.iter().map(|c| c.name.clone()).collect();
        let categories = encoded
            .categories
            .into_iter()
            .map(|c| (c.name.clone(), Category::new(c)))
            .collect();
        DataBlock {
            header: encoded.header,
            category_names,
            categories,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Declaration order.
    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_is_absent() {
        let block = DataBlock::new(EncodedDataBlock {
            header: "1ABC".to_string(),
            categories: vec![],
        });
        assert!(block.get_category("atom_site").is_none());
    }

    #[test]
    fn category_lookup_by_name() {
        let block = DataBlock::new(EncodedDataBlock {
            header: "1ABC".to_string(),
            categories: vec![EncodedCategory {
                name: "atom_site".to_string(),
                row_count: 0,
                columns: vec![],
            }],
        });
        assert_eq!(block.get_category("atom_site").unwrap().row_count(), 0);
        assert_eq!(block.category_names(), &["atom_site".to_string()]);
    }
}

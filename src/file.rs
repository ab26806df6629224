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

//! `File`: the root of the decoded tree, a version/encoder identifier plus
//! an ordered list of data blocks.

use serde::Deserialize;

use crate::data_block::{DataBlock, EncodedDataBlock};

/// Wire shape of the file root.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedFile {
    pub version: String,
    pub encoder: String,
    #[serde(rename = "dataBlocks")]
    pub data_blocks: Vec<EncodedDataBlock>,
}

/// The decoded root object. Construction is O(block count): each
/// `DataBlock` eagerly wraps its categories but defers column decoding
/// until `Category::get_column` is called.
#[derive(Debug)]
pub struct File {
    version: String,
    encoder: String,
    data_blocks: Vec<DataBlock>,
}

impl File {
    pub fn new(encoded: EncodedFile) -> Self {
        File {
            version: encoded.version,
            encoder: encoded.encoder,
            data_blocks: encoded.data_blocks.into_iter().map(DataBlock::new).collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoder(&self) -> &str {
        &self.encoder
    }

    /// Declaration order.
    pub fn data_blocks(&self) -> &[DataBlock] {
        &self.data_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_blocks_preserve_declaration_order() {
        let file = File::new(EncodedFile {
            version: "0.3.0".to_string(),
            encoder: "test".to_string(),
            data_blocks: vec![
                EncodedDataBlock {
                    header: "1ABC".to_string(),
                    categories: vec![],
                },
                EncodedDataBlock {
                    header: "2XYZ".to_string(),
                    categories: vec![],
                },
            ],
        });
        let headers: Vec<&str> = file.data_blocks().iter().map(|b| b.header()).collect();
        assert_eq!(headers, vec!["1ABC", "2XYZ"]);
    }
}

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

//! Decoder core for a binary tabular-data format for crystallographic /
//! structural data (BinaryCIF): a composable pipeline of byte-level
//! encodings reconstructed into typed arrays and strings, presented through
//! a uniform row/column accessor API over files, data blocks, and
//! categories.
//!
//! Construction from an already-deserialized encoded tree:
//!
//! ```
//! use bcif_core::{EncodedFile, File};
//!
//! let encoded: EncodedFile = serde_json::from_str(r#"{
//!     "version": "0.3.0",
//!     "encoder": "example",
//!     "dataBlocks": []
//! }"#).unwrap();
//! let file = File::new(encoded);
//! assert_eq!(file.data_blocks().len(), 0);
//! ```

pub mod category;
pub mod column;
pub mod data_block;
pub mod encoding;
pub mod error;
pub mod file;
pub mod json;
pub mod types;

pub use category::{Category, EncodedCategory, EncodedColumn};
pub use column::{Column, ColumnAccessor, Presence};
pub use data_block::{DataBlock, EncodedDataBlock};
pub use encoding::{Decoded, Encoding, EncodingKind, EncodedData, StringSequence};
pub use error::{Error, Result};
pub use file::{EncodedFile, File};
pub use types::{DataType, TypedBuffer};

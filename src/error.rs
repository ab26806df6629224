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

use snafu::prelude::*;
use snafu::Location;

use crate::encoding::EncodingKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("unsupported data type code: {}", code))]
    UnsupportedType {
        code: i32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("malformed encoding ({:?}): {}", kind, msg))]
    MalformedEncoding {
        kind: EncodingKind,
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("unexpected input sequence for encoding {:?}: expected {}", kind, expected))]
    UnexpectedSequence {
        kind: EncodingKind,
        expected: &'static str,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("unknown encoding kind: {}", kind))]
    UnknownEncodingKind {
        kind: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("row {} out of bounds for {} rows", row, row_count))]
    RowOutOfBounds {
        row: usize,
        row_count: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("mismatched decoded type: {}", msg))]
    MismatchedDataType {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

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

//! A small numeric-genericity trait, in the spirit of the `NInt`/`VarintSerde`
//! traits `orc-rust` uses to write one RLE implementation across `i16`/`i32`/
//! `i64` instead of several near-duplicate functions. Here it lets `Delta`
//! and `IntegerPacking` be written once and instantiated over every narrow
//! integer width the format supports.

use num::traits::{PrimInt, WrappingAdd};

pub trait PackedInt: PrimInt + WrappingAdd {
    fn from_i32(v: i32) -> Self;
    fn to_i32(self) -> i32;
}

macro_rules! impl_packed_int {
    ($ty:ty) => {
        impl PackedInt for $ty {
            #[inline]
            fn from_i32(v: i32) -> Self {
                v as Self
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }
        }
    };
}

impl_packed_int!(i8);
impl_packed_int!(i16);
impl_packed_int!(i32);
impl_packed_int!(u8);
impl_packed_int!(u16);
impl_packed_int!(u32);

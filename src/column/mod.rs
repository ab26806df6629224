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

//! The column accessor layer: four decoded column variants behind one
//! uniform row contract, plus the `UndefinedColumn` sentinel.

mod parse;

use crate::encoding::{Decoded, StringSequence};
use crate::error::{Result, RowOutOfBoundsSnafu};
use crate::types::TypedBuffer;
use parse::{parse_float, parse_int};

/// A row's presence marker. Any mask byte other than 0 or 2 is treated as
/// `NotSpecified`: higher values are undefined on the wire, and a
/// conservative reader treats them as not-specified rather than rejecting
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    NotSpecified,
    Unknown,
}

impl Presence {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Presence::Present,
            2 => Presence::Unknown,
            _ => Presence::NotSpecified,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Presence::Present)
    }

    /// The rune a category's JSON projection substitutes for an absent
    /// cell.
    pub fn placeholder(self) -> &'static str {
        match self {
            Presence::Present => unreachable!("present values are rendered, not placeholdered"),
            Presence::NotSpecified => ".",
            Presence::Unknown => "?",
        }
    }
}

/// A decoded, row-addressable column. The four materialized variants share
/// this one interface; `Undefined` is the sentinel `Category::get_column`
/// returns for an unknown name. Every getter on it returns a neutral default
/// and never fails, regardless of row index.
#[derive(Debug, Clone)]
pub enum Column {
    Numeric(TypedBuffer),
    MaskedNumeric(TypedBuffer, Vec<u8>),
    String(StringSequence),
    MaskedString(StringSequence, Vec<u8>),
    Undefined,
}

impl Column {
    /// Builds the variant appropriate to `data`'s shape: a numeric typed
    /// sequence yields a numeric column, a string sequence yields a string
    /// column; presence of `mask` picks the masked member of that pair.
    pub fn from_decoded(data: Decoded, mask: Option<TypedBuffer>) -> Self {
        let mask = mask.map(|buf| (0..buf.len()).map(|i| buf.get_as_i64(i) as u8).collect());
        match (data, mask) {
            (Decoded::Typed(t), Some(m)) => Column::MaskedNumeric(t, m),
            (Decoded::Typed(t), None) => Column::Numeric(t),
            (Decoded::Strings(s), Some(m)) => Column::MaskedString(s, m),
            (Decoded::Strings(s), None) => Column::String(s),
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Column::Undefined)
    }

    pub fn row_count(&self) -> usize {
        match self {
            Column::Numeric(t) | Column::MaskedNumeric(t, _) => t.len(),
            Column::String(s) | Column::MaskedString(s, _) => s.len(),
            Column::Undefined => 0,
        }
    }

    fn bounds_check(&self, row: usize) -> Result<()> {
        let row_count = self.row_count();
        if row >= row_count {
            return RowOutOfBoundsSnafu { row, row_count }.fail();
        }
        Ok(())
    }

    /// `getString(r)`: null only when the row is not present, or (for
    /// string columns) when the underlying index itself encoded absence.
    pub fn get_string(&self, row: usize) -> Result<Option<String>> {
        if matches!(self, Column::Undefined) {
            return Ok(None);
        }
        self.bounds_check(row)?;
        Ok(match self {
            Column::Numeric(data) => Some(render_numeric(data, row)),
            Column::MaskedNumeric(data, mask) => Presence::from_byte(mask[row])
                .is_present()
                .then(|| render_numeric(data, row)),
            Column::String(strings) => strings.get(row).map(str::to_owned),
            Column::MaskedString(strings, mask) => Presence::from_byte(mask[row])
                .is_present()
                .then(|| strings.get(row).map(str::to_owned))
                .flatten(),
            Column::Undefined => unreachable!(),
        })
    }

    /// `getInteger(r)`: truncates numeric values, parses string values, and
    /// reads 0 for an absent row.
    pub fn get_integer(&self, row: usize) -> Result<i64> {
        if matches!(self, Column::Undefined) {
            return Ok(0);
        }
        self.bounds_check(row)?;
        Ok(match self {
            Column::Numeric(data) => data.get_as_i64(row),
            Column::MaskedNumeric(data, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    data.get_as_i64(row)
                } else {
                    0
                }
            }
            Column::String(strings) => strings
                .get(row)
                .map(|s| parse_int(s, 0, s.len()))
                .unwrap_or(0),
            Column::MaskedString(strings, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    strings.get(row).map(|s| parse_int(s, 0, s.len())).unwrap_or(0)
                } else {
                    0
                }
            }
            Column::Undefined => unreachable!(),
        })
    }

    /// `getFloat(r)`: widens numeric values, parses string values, and
    /// reads 0.0 for an absent row.
    pub fn get_float(&self, row: usize) -> Result<f64> {
        if matches!(self, Column::Undefined) {
            return Ok(0.0);
        }
        self.bounds_check(row)?;
        Ok(match self {
            Column::Numeric(data) => data.get_as_f64(row),
            Column::MaskedNumeric(data, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    data.get_as_f64(row)
                } else {
                    0.0
                }
            }
            Column::String(strings) => strings
                .get(row)
                .map(|s| parse_float(s, 0, s.len()))
                .unwrap_or(0.0),
            Column::MaskedString(strings, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    strings.get(row).map(|s| parse_float(s, 0, s.len())).unwrap_or(0.0)
                } else {
                    0.0
                }
            }
            Column::Undefined => unreachable!(),
        })
    }

    /// `stringEquals(r, value)`: for numeric columns `value` is parsed as a
    /// float and compared to the stored number; for string columns the
    /// compare is byte-equal. `value = None` is the caller's null/absent
    /// sentinel: this crate exposes it as an explicit "equals-absent"
    /// predicate (a `None` comparand) rather than overload a plain string
    /// argument.
    pub fn string_equals(&self, row: usize, value: Option<&str>) -> Result<bool> {
        if matches!(self, Column::Undefined) {
            return Ok(value.is_none());
        }
        self.bounds_check(row)?;
        Ok(match self {
            Column::Numeric(data) => {
                value.map(|v| parse_float(v, 0, v.len())) == Some(data.get_as_f64(row))
            }
            Column::MaskedNumeric(data, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    value.map(|v| parse_float(v, 0, v.len())) == Some(data.get_as_f64(row))
                } else {
                    value.is_none()
                }
            }
            Column::String(strings) => strings.get(row) == value,
            Column::MaskedString(strings, mask) => {
                if Presence::from_byte(mask[row]).is_present() {
                    strings.get(row) == value
                } else {
                    value.is_none()
                }
            }
            Column::Undefined => unreachable!(),
        })
    }

    /// `areValuesEqual(rA, rB)`: compares the stored value only. Presence is
    /// intentionally not consulted: two absent numeric rows whose backing
    /// integer happens to match compare equal.
    pub fn values_equal(&self, row_a: usize, row_b: usize) -> Result<bool> {
        if matches!(self, Column::Undefined) {
            return Ok(true);
        }
        self.bounds_check(row_a)?;
        self.bounds_check(row_b)?;
        Ok(match self {
            Column::Numeric(data) | Column::MaskedNumeric(data, _) => {
                data.values_equal(row_a, row_b)
            }
            Column::String(strings) | Column::MaskedString(strings, _) => {
                strings.get(row_a) == strings.get(row_b)
            }
            Column::Undefined => unreachable!(),
        })
    }

    /// `getValuePresence(r)`: always `Present` for unmasked columns.
    pub fn get_value_presence(&self, row: usize) -> Result<Presence> {
        if matches!(self, Column::Undefined) {
            return Ok(Presence::Present);
        }
        self.bounds_check(row)?;
        Ok(match self {
            Column::Numeric(_) | Column::String(_) => Presence::Present,
            Column::MaskedNumeric(_, mask) | Column::MaskedString(_, mask) => {
                Presence::from_byte(mask[row])
            }
            Column::Undefined => unreachable!(),
        })
    }
}

/// The uniform row contract every column variant (including `Undefined`)
/// satisfies. `Column`'s inherent methods above are the actual
/// implementation; this trait exists so code generic over "something with
/// row accessors" doesn't need to match on the enum itself.
pub trait ColumnAccessor {
    fn is_defined(&self) -> bool;
    fn row_count(&self) -> usize;
    fn get_string(&self, row: usize) -> Result<Option<String>>;
    fn get_integer(&self, row: usize) -> Result<i64>;
    fn get_float(&self, row: usize) -> Result<f64>;
    fn string_equals(&self, row: usize, value: Option<&str>) -> Result<bool>;
    fn values_equal(&self, row_a: usize, row_b: usize) -> Result<bool>;
    fn get_value_presence(&self, row: usize) -> Result<Presence>;
}

impl ColumnAccessor for Column {
    fn is_defined(&self) -> bool {
        Column::is_defined(self)
    }

    fn row_count(&self) -> usize {
        Column::row_count(self)
    }

    fn get_string(&self, row: usize) -> Result<Option<String>> {
        Column::get_string(self, row)
    }

    fn get_integer(&self, row: usize) -> Result<i64> {
        Column::get_integer(self, row)
    }

    fn get_float(&self, row: usize) -> Result<f64> {
        Column::get_float(self, row)
    }

    fn string_equals(&self, row: usize, value: Option<&str>) -> Result<bool> {
        Column::string_equals(self, row, value)
    }

    fn values_equal(&self, row_a: usize, row_b: usize) -> Result<bool> {
        Column::values_equal(self, row_a, row_b)
    }

    fn get_value_presence(&self, row: usize) -> Result<Presence> {
        Column::get_value_presence(self, row)
    }
}

fn render_numeric(data: &TypedBuffer, row: usize) -> String {
    match data {
        TypedBuffer::Int8(v) => v[row].to_string(),
        TypedBuffer::Int16(v) => v[row].to_string(),
        TypedBuffer::Int32(v) => v[row].to_string(),
        TypedBuffer::Uint8(v) => v[row].to_string(),
        TypedBuffer::Uint16(v) => v[row].to_string(),
        TypedBuffer::Uint32(v) => v[row].to_string(),
        TypedBuffer::Float32(v) => v[row].to_string(),
        TypedBuffer::Float64(v) => v[row].to_string(),
    }
}

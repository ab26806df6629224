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

//! Fast bounded-slice numeric parsing. Column accessors call these instead
//! of allocating a substring just to widen or compare a stored string value.

/// Parses a base-10 signed integer from `s[start..end]`. Returns 0 for an
/// empty or unparsable slice rather than failing: every column accessor
/// built on this is a total function, never an error.
pub fn parse_int(s: &str, start: usize, end: usize) -> i64 {
    let Some(slice) = s.get(start..end) else {
        return 0;
    };
    let bytes = slice.as_bytes();
    let (neg, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return 0;
    }
    let mut acc: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return 0;
        }
        acc = acc.wrapping_mul(10).wrapping_add((b - b'0') as i64);
    }
    if neg {
        -acc
    } else {
        acc
    }
}

/// Parses an IEEE-754 double from `s[start..end]`. Returns 0.0 for an empty
/// or unparsable slice. Delegates the actual digit grammar to the standard
/// library's `f64::from_str`, which is already correctly-rounded; the
/// bounded-slice contract here only avoids an intermediate `String`.
pub fn parse_float(s: &str, start: usize, end: usize) -> f64 {
    match s.get(start..end) {
        Some(slice) => slice.parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_integers() {
        assert_eq!(parse_int("-123x", 0, 4), -123);
        assert_eq!(parse_int("42", 0, 2), 42);
    }

    #[test]
    fn empty_or_unparsable_int_is_zero() {
        assert_eq!(parse_int("", 0, 0), 0);
        assert_eq!(parse_int("abc", 0, 3), 0);
    }

    #[test]
    fn parses_floats() {
        assert_eq!(parse_float("3.14", 0, 4), 3.14);
        assert_eq!(parse_float("-0.5", 0, 4), -0.5);
    }

    #[test]
    fn empty_or_unparsable_float_is_zero() {
        assert_eq!(parse_float("", 0, 0), 0.0);
        assert_eq!(parse_float("?", 0, 1), 0.0);
    }

    #[test]
    fn bounds_outside_slice_is_zero() {
        assert_eq!(parse_int("12", 0, 10), 0);
    }
}

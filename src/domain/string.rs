// Copyright 2025 Chunkstats Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded-alphabet string domain
//!
//! Strings over a closed character range behave as a mixed-radix numeral
//! system: [`StringAlphabet`] provides successor/predecessor arithmetic and
//! an order-preserving base-|A| embedding into `u64` that lets the integer
//! fraction math drive string range estimation.
//!
//! The embedding pads a string to the configured prefix length with the
//! alphabet minimum ("shorter strings are smaller") and reads the result as
//! digits. Strings longer than the prefix length are truncated, which keeps
//! the embedding monotone but no longer injective; range estimates over such
//! columns become over-approximations.

use crate::core::{Error, Result};
use crate::domain::{PatternBounds, ValueDomain};

/// Default number of leading characters the numeric embedding encodes
pub const DEFAULT_STRING_PREFIX_LENGTH: usize = 4;

/// LIKE wildcards: any suffix / any single character
const WILDCARDS: [char; 2] = ['%', '_'];

/// Closed character range a string histogram supports, plus the prefix
/// length of its numeric embedding
///
/// The default alphabet is lowercase `'a'..='z'` with a prefix length of 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringAlphabet {
    /// Smallest supported character
    first: u8,
    /// Largest supported character
    last: u8,
    /// Number of leading characters encoded by the embedding
    /// Default: 4
    prefix_len: usize,
}

impl Default for StringAlphabet {
    fn default() -> Self {
        Self {
            first: b'a',
            last: b'z',
            prefix_len: DEFAULT_STRING_PREFIX_LENGTH,
        }
    }
}

impl StringAlphabet {
    /// Create an alphabet over the closed ASCII range `[first, last]`
    ///
    /// The prefix length is capped so that the embedding fits into `u64`.
    pub fn new(first: char, last: char, prefix_len: usize) -> Result<Self> {
        if !first.is_ascii() || !last.is_ascii() {
            return Err(Error::invalid_alphabet("characters must be ASCII"));
        }
        if last < first {
            return Err(Error::invalid_alphabet("empty character range"));
        }
        if prefix_len == 0 {
            return Err(Error::invalid_alphabet("prefix length must be positive"));
        }
        let radix = (last as u8 - first as u8 + 1) as u128;
        let fits = prefix_len <= u32::MAX as usize
            && radix
                .checked_pow(prefix_len as u32)
                .is_some_and(|span| span <= u64::MAX as u128);
        if !fits {
            return Err(Error::invalid_alphabet(
                "prefix length overflows the numeric embedding",
            ));
        }
        Ok(Self {
            first: first as u8,
            last: last as u8,
            prefix_len,
        })
    }

    /// Smallest supported character
    pub fn first_char(&self) -> char {
        self.first as char
    }

    /// Largest supported character
    pub fn last_char(&self) -> char {
        self.last as char
    }

    /// Number of leading characters encoded by the numeric embedding
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Number of characters in the alphabet
    pub fn radix(&self) -> u64 {
        (self.last - self.first + 1) as u64
    }

    /// Check whether a character belongs to the alphabet
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && (self.first..=self.last).contains(&(c as u8))
    }

    /// Validate that every character of `value` belongs to the alphabet
    pub fn validate(&self, value: &str) -> Result<()> {
        match value.chars().find(|&c| !self.contains(c)) {
            Some(c) => Err(Error::UnsupportedCharacter(c)),
            None => Ok(()),
        }
    }

    /// Lexicographically smallest supported string strictly greater than
    /// `value`
    ///
    /// Strings shorter than the prefix length grow by the minimum character;
    /// at full length the rightmost incrementable character is bumped and
    /// everything after it resets to the minimum. A string of all-maximum
    /// characters grows by one.
    pub fn next_value(&self, value: &str) -> Result<String> {
        self.validate(value)?;
        if value.is_empty() {
            return Ok((self.first as char).to_string());
        }
        let mut bytes = value.as_bytes().to_vec();
        if bytes.len() < self.prefix_len {
            bytes.push(self.first);
            return Ok(ascii_string(bytes));
        }
        match bytes.iter().rposition(|&b| b < self.last) {
            Some(pos) => {
                bytes[pos] += 1;
                for b in &mut bytes[pos + 1..] {
                    *b = self.first;
                }
            }
            None => bytes.push(self.first),
        }
        Ok(ascii_string(bytes))
    }

    /// Lexicographically greatest supported string strictly less than
    /// `value`; the empty string has no predecessor and maps to itself
    pub fn previous_value(&self, value: &str) -> Result<String> {
        self.validate(value)?;
        let mut bytes = value.as_bytes().to_vec();
        match bytes.last() {
            None => {}
            Some(&b) if b == self.first => {
                bytes.pop();
            }
            Some(_) => {
                let end = bytes.len() - 1;
                bytes[end] -= 1;
            }
        }
        Ok(ascii_string(bytes))
    }

    /// Order-preserving base-|A| embedding of the first `prefix_len`
    /// characters; missing positions read as the alphabet minimum
    pub fn embed(&self, value: &str) -> Result<u64> {
        self.validate(value)?;
        let radix = self.radix();
        let bytes = value.as_bytes();
        let mut code = 0u64;
        for index in 0..self.prefix_len {
            let digit = match bytes.get(index) {
                Some(&b) => (b - self.first) as u64,
                None => 0,
            };
            code = code * radix + digit;
        }
        Ok(code)
    }

    /// Shortest string whose embedding equals `code` (trailing minimum
    /// characters are padding and stripped)
    pub fn decode(&self, mut code: u64) -> String {
        let radix = self.radix();
        let mut bytes = vec![self.first; self.prefix_len];
        for index in (0..self.prefix_len).rev() {
            bytes[index] = self.first + (code % radix) as u8;
            code /= radix;
        }
        while bytes.last() == Some(&self.first) {
            bytes.pop();
        }
        ascii_string(bytes)
    }

    /// Same-length successor of `prefix`: the exclusive upper bound of the
    /// interval of strings starting with `prefix`. `None` when every
    /// character is the alphabet maximum (interval open above).
    pub fn prefix_successor(&self, prefix: &str) -> Result<Option<String>> {
        self.validate(prefix)?;
        let mut bytes = prefix.as_bytes().to_vec();
        match bytes.iter().rposition(|&b| b < self.last) {
            Some(pos) => {
                bytes[pos] += 1;
                bytes.truncate(pos + 1);
                Ok(Some(ascii_string(bytes)))
            }
            None => Ok(None),
        }
    }
}

/// Rebuild a string from validated ASCII bytes
fn ascii_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

/// Domain of bounded-alphabet strings
///
/// Width and distance go through the numeric embedding, so string range
/// estimation follows the integer fraction math. LIKE patterns reduce to a
/// range over the longest literal prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDomain {
    alphabet: StringAlphabet,
}

impl StringDomain {
    /// Create a domain over the given alphabet
    pub fn new(alphabet: StringAlphabet) -> Self {
        Self { alphabet }
    }

    /// The alphabet this domain operates on
    pub fn alphabet(&self) -> &StringAlphabet {
        &self.alphabet
    }
}

impl ValueDomain for StringDomain {
    type Value = String;

    fn validate(&self, _value: &String) -> Result<()> {
        // Every string orders fine; only the embedding arithmetic is
        // restricted to the alphabet.
        Ok(())
    }

    fn validate_build(&self, value: &String) -> Result<()> {
        self.alphabet.validate(value)
    }

    fn width(&self, lo: &String, hi: &String) -> Result<f64> {
        let lo = self.alphabet.embed(lo)?;
        let hi = self.alphabet.embed(hi)?;
        Ok(hi.saturating_sub(lo) as f64 + 1.0)
    }

    fn distance(&self, lo: &String, value: &String) -> Result<f64> {
        let lo = self.alphabet.embed(lo)?;
        let value = self.alphabet.embed(value)?;
        Ok(value.saturating_sub(lo) as f64)
    }

    fn successor(&self, value: &String) -> Result<String> {
        self.alphabet.next_value(value)
    }

    fn partition(
        &self,
        min: &String,
        max: &String,
        max_parts: u64,
    ) -> Result<Vec<(String, String)>> {
        if max_parts == 0 {
            return Err(Error::ZeroBuckets);
        }
        if max < min {
            return Err(Error::InvertedRange);
        }
        let lo = self.alphabet.embed(min)?;
        let hi = self.alphabet.embed(max)?;

        let span = (hi - lo) as u128 + 1;
        let parts = (max_parts as u128).min(span);
        let base = span / parts;
        let extra = span % parts;

        let mut ranges = Vec::with_capacity(parts as usize);
        let mut code = lo as u128;
        for index in 0..parts {
            let width = base + u128::from(index < extra);
            let upper = code + width - 1;
            ranges.push((
                self.alphabet.decode(code as u64),
                self.alphabet.decode(upper as u64),
            ));
            code = upper + 1;
        }
        // Decoding returns the shortest representative of each edge code;
        // anchor the outer edges at the declared column bounds.
        if let Some(first) = ranges.first_mut() {
            first.0 = min.clone();
            if first.1 < first.0 {
                first.1 = first.0.clone();
            }
        }
        if let Some(last) = ranges.last_mut() {
            last.1 = max.clone();
        }
        Ok(ranges)
    }

    fn pattern_bounds(&self, pattern: &String) -> Result<Option<PatternBounds<String>>> {
        let prefix: String = pattern
            .chars()
            .take_while(|c| !WILDCARDS.contains(c))
            .collect();
        if prefix.is_empty() {
            return Ok(None);
        }
        self.alphabet.validate(&prefix)?;
        if prefix.len() == pattern.len() {
            return Ok(Some(PatternBounds {
                lower: prefix,
                upper: None,
                exact: true,
            }));
        }
        let upper = self.alphabet.prefix_successor(&prefix)?;
        Ok(Some(PatternBounds {
            lower: prefix,
            upper,
            exact: false,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_value() {
        let alphabet = StringAlphabet::default();
        assert_eq!(alphabet.next_value("").unwrap(), "a");
        assert_eq!(alphabet.next_value("abcd").unwrap(), "abce");
        assert_eq!(alphabet.next_value("abaz").unwrap(), "abba");
        assert_eq!(alphabet.next_value("abzz").unwrap(), "acaa");
        assert_eq!(alphabet.next_value("abca").unwrap(), "abcb");
        assert_eq!(alphabet.next_value("abaa").unwrap(), "abab");
        assert_eq!(alphabet.next_value("zzzz").unwrap(), "zzzza");
        // Shorter than the prefix length: grow by the minimum character
        assert_eq!(alphabet.next_value("ab").unwrap(), "aba");
    }

    #[test]
    fn test_previous_value() {
        let alphabet = StringAlphabet::default();
        assert_eq!(alphabet.previous_value("").unwrap(), "");
        assert_eq!(alphabet.previous_value("a").unwrap(), "");
        assert_eq!(alphabet.previous_value("aaa").unwrap(), "aa");
        assert_eq!(alphabet.previous_value("abcd").unwrap(), "abcc");
        assert_eq!(alphabet.previous_value("abzz").unwrap(), "abzy");
        assert_eq!(alphabet.previous_value("abca").unwrap(), "abc");
        assert_eq!(alphabet.previous_value("abaa").unwrap(), "aba");
        assert_eq!(alphabet.previous_value("aba").unwrap(), "ab");
    }

    #[test]
    fn test_round_trips() {
        let alphabet = StringAlphabet::default();
        for value in ["a", "ab", "abc", "zzy", "mno"] {
            let next = alphabet.next_value(value).unwrap();
            assert_eq!(alphabet.previous_value(&next).unwrap(), value);
        }
        for value in ["b", "ab", "abcd", "zzzz", "aab"] {
            let prev = alphabet.previous_value(value).unwrap();
            assert_eq!(alphabet.next_value(&prev).unwrap(), value);
        }
    }

    #[test]
    fn test_unsupported_characters() {
        let alphabet = StringAlphabet::default();
        assert_eq!(
            alphabet.next_value("abc1"),
            Err(Error::UnsupportedCharacter('1'))
        );
        assert_eq!(
            alphabet.previous_value("Abc"),
            Err(Error::UnsupportedCharacter('A'))
        );
        assert_eq!(alphabet.next_value("@"), Err(Error::UnsupportedCharacter('@')));
        assert!(alphabet.next_value("abcd").is_ok());
        assert!(alphabet.previous_value("abcd").is_ok());
    }

    #[test]
    fn test_embed_is_monotone() {
        let alphabet = StringAlphabet::default();
        let values = ["", "a", "ab", "abc", "abz", "b", "ba", "zzzz"];
        for pair in values.windows(2) {
            let lo = alphabet.embed(pair[0]).unwrap();
            let hi = alphabet.embed(pair[1]).unwrap();
            assert!(lo < hi, "{:?} should embed below {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_embed_decode_round_trip() {
        let alphabet = StringAlphabet::default();
        for value in ["", "a", "b", "ab", "abc", "abcd", "zzzz", "qrst"] {
            let code = alphabet.embed(value).unwrap();
            assert_eq!(alphabet.decode(code), value);
            assert_eq!(alphabet.embed(&alphabet.decode(code)).unwrap(), code);
        }
    }

    #[test]
    fn test_embed_truncates_past_prefix() {
        let alphabet = StringAlphabet::default();
        // Beyond the prefix length the embedding collapses onto the prefix
        assert_eq!(
            alphabet.embed("abcdzz").unwrap(),
            alphabet.embed("abcd").unwrap()
        );
    }

    #[test]
    fn test_prefix_successor() {
        let alphabet = StringAlphabet::default();
        assert_eq!(alphabet.prefix_successor("abc").unwrap(), Some("abd".into()));
        assert_eq!(alphabet.prefix_successor("abz").unwrap(), Some("ac".into()));
        assert_eq!(alphabet.prefix_successor("zz").unwrap(), None);
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(StringAlphabet::new('a', 'z', 4).is_ok());
        assert!(StringAlphabet::new('a', 'f', 8).is_ok());
        assert!(matches!(
            StringAlphabet::new('z', 'a', 4),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            StringAlphabet::new('a', 'z', 0),
            Err(Error::InvalidAlphabet(_))
        ));
        assert!(matches!(
            StringAlphabet::new('a', 'z', 32),
            Err(Error::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_domain_width_matches_embedding() {
        let domain = StringDomain::default();
        let width = domain
            .width(&"aa".to_string(), &"ab".to_string())
            .unwrap();
        // "aa" and "ab" differ by one radix^2 step plus the closed edge
        assert_eq!(width, 26.0 * 26.0 + 1.0);
    }

    #[test]
    fn test_domain_partition_covers_range() {
        let domain = StringDomain::default();
        let ranges = domain
            .partition(&"aa".to_string(), &"dz".to_string(), 4)
            .unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].0, "aa");
        assert_eq!(ranges[3].1, "dz");
        for pair in ranges.windows(2) {
            assert!(pair[0].1 < pair[1].0);
        }
    }

    #[test]
    fn test_pattern_bounds() {
        let domain = StringDomain::default();
        let bounds = domain
            .pattern_bounds(&"abc%".to_string())
            .unwrap()
            .unwrap();
        assert_eq!(bounds.lower, "abc");
        assert_eq!(bounds.upper, Some("abd".into()));
        assert!(!bounds.exact);

        // No literal prefix: no selectivity information
        assert!(domain.pattern_bounds(&"%abc".to_string()).unwrap().is_none());

        // No wildcard at all: exact match
        let bounds = domain.pattern_bounds(&"abc".to_string()).unwrap().unwrap();
        assert!(bounds.exact);

        // All-maximum prefix: interval open above
        let bounds = domain.pattern_bounds(&"zz%".to_string()).unwrap().unwrap();
        assert_eq!(bounds.upper, None);

        // Unsupported character in the prefix surfaces as an error
        assert_eq!(
            domain.pattern_bounds(&"ab1%".to_string()),
            Err(Error::UnsupportedCharacter('1'))
        );
    }
}

//! Pattern-scoped field encryption.
//!
//! A regular expression selects the parts of a value to encrypt through its capture
//! groups; everything outside the groups (separators, prefixes) is copied through.
//! Each group is encrypted on its own with FF3-1, so its length and alphabet are kept.

use core::ops::Range;

use regex::Regex;

use crate::alphabet::Alphabet;
use crate::common::{Direction, Error};
use crate::ff3_1::Ff3_1;

/// A compiled pattern bound to an FF3-1 engine.
///
/// Every captured field must meet the FF3-1 minimum length on its own: with a decimal
/// alphabet each group needs at least 6 digits, so an SSN such as `1111-22-3333` split
/// into 4-, 2- and 4-digit groups is rejected with [`Error::InvalidTextLength`]. Capture
/// the digits in fields long enough to cover 1,000,000 values instead.
pub struct PatternFpe {
    regex: Regex,
    ff3: Ff3_1,
}

impl PatternFpe {
    /// Creates a new PatternFpe instance.
    ///
    /// # Arguments
    ///
    /// * `key` - A 16, 24 or 32-byte AES key.
    /// * `tweak` - A 7-byte tweak.
    /// * `pattern` - A regular expression with at least one capture group.
    /// * `alphabet` - The symbols captured fields are made of.
    pub fn new(key: &[u8], tweak: &[u8], pattern: &str, alphabet: &str) -> Result<Self, Error> {
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern(e.to_string()))?;
        // captures_len() counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(Error::MissingCaptureGroup);
        }
        let ff3 = Ff3_1::with_alphabet(key, Some(tweak), Alphabet::new(alphabet)?)?;
        Ok(Self { regex, ff3 })
    }

    pub fn encrypt(&self, value: &str) -> Result<String, Error> {
        self.transform(value, Direction::Encrypt)
    }

    pub fn decrypt(&self, value: &str) -> Result<String, Error> {
        self.transform(value, Direction::Decrypt)
    }

    /// Encrypts or decrypts every captured field of `value`.
    ///
    /// All groups are checked before the first one is transformed, so a failure
    /// never leaves a partially transformed result.
    pub fn transform(&self, value: &str, direction: Direction) -> Result<String, Error> {
        let captures = self.regex.captures(value).ok_or(Error::PatternMismatch)?;

        let mut fields: Vec<(Range<usize>, Vec<char>)> = Vec::new();
        for group in captures.iter().skip(1).flatten() {
            let span = group.range();
            let expected = value
                .get(span.clone())
                .ok_or(Error::InternalConsistencyError("capture offsets outside value"))?;
            if group.as_str() != expected {
                return Err(Error::InternalConsistencyError(
                    "captured text differs from value",
                ));
            }
            if let Some((previous, _)) = fields.last() {
                if span.start < previous.end {
                    return Err(Error::InternalConsistencyError(
                        "capture groups overlap",
                    ));
                }
            }
            let text: Vec<char> = expected.chars().collect();
            self.ff3.validate(&text, None)?;
            fields.push((span, text));
        }

        let mut out = String::with_capacity(value.len());
        let mut copied = 0;
        for (span, text) in &fields {
            out.push_str(&value[copied..span.start]);
            let transformed = match direction {
                Direction::Encrypt => self.ff3.encrypt_chars(text, None)?,
                Direction::Decrypt => self.ff3.decrypt_chars(text, None)?,
            };
            out.extend(transformed);
            copied = span.end;
        }
        out.push_str(&value[copied..]);
        Ok(out)
    }
}

/// One-shot pattern transform with a freshly compiled pattern and keyed engine.
///
/// Prefer [`PatternFpe`] when transforming more than one value.
pub fn transform_by_pattern(
    key: &[u8],
    tweak: &[u8],
    value: &str,
    pattern: &str,
    alphabet: &str,
    direction: Direction,
) -> Result<String, Error> {
    PatternFpe::new(key, tweak, pattern, alphabet)?.transform(value, direction)
}

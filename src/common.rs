//! Common types and helpers shared by the Feistel core and its wrappers.
//!
//! This module provides the crate-wide error type, the cipher direction, and the
//! byte/symbol reversal primitives FF3-1 applies around every round function call.

use core::fmt;

/// AES block length in bytes.
pub const BLOCK_BYTES: usize = 16;

/// Unified error type for all format-preserving operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The alphabet has fewer than two symbols or repeats a symbol.
    InvalidAlphabet { reason: &'static str },
    /// The key is not 16, 24 or 32 bytes long.
    InvalidKeyLength { len: usize },
    /// The tweak length is outside the configured bounds.
    InvalidTweakLength { len: usize, min: usize, max: usize },
    /// The text length is outside the bounds derived from the radix.
    InvalidTextLength { len: usize, min: usize, max: usize },
    /// A character of the input is not part of the alphabet.
    InvalidSymbol { symbol: char, position: usize },
    /// The radix admits no valid text length.
    InvalidRadix {
        radix: usize,
        min_len: usize,
        max_len: usize,
    },
    /// An address is neither 4 nor 16 bytes long.
    UnsupportedAddressFamily { len: usize },
    /// An address string could not be parsed.
    InvalidAddress(String),
    /// The regular expression does not compile.
    InvalidPattern(String),
    /// The regular expression declares no capture group.
    MissingCaptureGroup,
    /// The value does not match the regular expression.
    PatternMismatch,
    /// Offsets or lengths disagree with the data they describe.
    InternalConsistencyError(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAlphabet { reason } => write!(f, "invalid alphabet: {reason}"),
            Error::InvalidKeyLength { len } => {
                write!(f, "invalid key length: {len} bytes (expected 16, 24 or 32)")
            }
            Error::InvalidTweakLength { len, min, max } if min == max => {
                write!(f, "invalid tweak length: {len} bytes (expected {min})")
            }
            Error::InvalidTweakLength { len, min, max } => {
                write!(f, "invalid tweak length: {len} bytes (expected {min}..={max})")
            }
            Error::InvalidTextLength { len, min, max } => {
                write!(f, "invalid text length: {len} symbols (expected {min}..={max})")
            }
            Error::InvalidSymbol { symbol, position } => {
                write!(f, "symbol {symbol:?} at position {position} is not in the alphabet")
            }
            Error::InvalidRadix {
                radix,
                min_len,
                max_len,
            } => write!(
                f,
                "radix {radix} is unsupported (text bounds {min_len}..={max_len} are empty)"
            ),
            Error::UnsupportedAddressFamily { len } => {
                write!(f, "unsupported address family: {len} bytes (expected 4 or 16)")
            }
            Error::InvalidAddress(addr) => write!(f, "invalid IP address: {addr:?}"),
            Error::InvalidPattern(msg) => write!(f, "invalid pattern: {msg}"),
            Error::MissingCaptureGroup => write!(f, "pattern has no capture group"),
            Error::PatternMismatch => write!(f, "value does not match pattern"),
            Error::InternalConsistencyError(what) => {
                write!(f, "internal consistency error: {what}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Direction of cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Returns a copy of `bytes` in reverse order.
pub fn reverse_bytes<const N: usize>(bytes: &[u8; N]) -> [u8; N] {
    let mut out = *bytes;
    out.reverse();
    out
}

/// Returns a copy of `symbols` in reverse order.
pub fn reverse_runes(symbols: &[char]) -> Vec<char> {
    symbols.iter().rev().copied().collect()
}

/// Splits a 56-bit FF3-1 tweak into its left and right 32-bit halves.
///
/// The middle byte is shared: its high nibble ends the left half, its low nibble
/// (shifted up) ends the right half.
pub fn split_tweak(tweak: &[u8; 7]) -> ([u8; 4], [u8; 4]) {
    let left = [tweak[0], tweak[1], tweak[2], tweak[3] & 0xf0];
    let right = [tweak[4], tweak[5], tweak[6], (tweak[3] & 0x0f) << 4];
    (left, right)
}

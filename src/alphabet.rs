//! Ordered symbol sets and the numeral codec built on them.
//!
//! A string over an alphabet of `r` symbols is read as a base-`r` number, most
//! significant symbol first. The symbol at index 0 plays the role of the digit zero.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::common::Error;

/// Decimal digits.
pub const DECIMAL: &str = "0123456789";
/// Lowercase hexadecimal digits.
pub const HEX_LOWER: &str = "0123456789abcdef";
/// Uppercase hexadecimal digits.
pub const HEX_UPPER: &str = "0123456789ABCDEF";
/// Digits followed by lowercase letters.
pub const BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
/// Digits, lowercase letters, then uppercase letters.
pub const ALPHANUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, u32>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`, in order.
    pub fn new(symbols: &str) -> Result<Self, Error> {
        Self::from_chars(symbols.chars().collect())
    }

    /// Builds an alphabet from an explicit symbol list.
    pub fn from_chars(symbols: Vec<char>) -> Result<Self, Error> {
        if symbols.len() < 2 {
            return Err(Error::InvalidAlphabet {
                reason: "fewer than 2 symbols",
            });
        }
        let radix = u32::try_from(symbols.len()).map_err(|_| Error::InvalidAlphabet {
            reason: "too many symbols",
        })?;
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in (0..radix).zip(symbols.iter()) {
            if index.insert(c, i).is_some() {
                return Err(Error::InvalidAlphabet {
                    reason: "duplicate symbol",
                });
            }
        }
        Ok(Self { symbols, index })
    }

    /// Number of symbols.
    pub fn radix(&self) -> usize {
        self.symbols.len()
    }

    /// The symbol standing for the digit zero.
    pub fn zero(&self) -> char {
        self.symbols[0]
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Position of `c` in the alphabet, if present.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).map(|&i| i as usize)
    }

    /// Symbol for the digit `digit`, if in range.
    pub fn symbol(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).copied()
    }

    /// Checks that every character of `text` belongs to the alphabet.
    pub fn validate(&self, text: &[char]) -> Result<(), Error> {
        match text.iter().position(|c| !self.contains(*c)) {
            Some(position) => Err(Error::InvalidSymbol {
                symbol: text[position],
                position,
            }),
            None => Ok(()),
        }
    }

    /// Reads `text` as a base-`radix` numeral, most significant symbol first.
    pub fn decode(&self, text: &[char]) -> Result<BigUint, Error> {
        let radix = self.radix() as u32;
        let mut value = BigUint::zero();
        for (position, &symbol) in text.iter().enumerate() {
            let digit = *self
                .index
                .get(&symbol)
                .ok_or(Error::InvalidSymbol { symbol, position })?;
            value *= radix;
            value += digit;
        }
        Ok(value)
    }

    /// Shortest representation of `value`, most significant symbol first.
    ///
    /// Zero is encoded as the single zero symbol.
    pub fn encode(&self, value: &BigUint) -> Vec<char> {
        if value.is_zero() {
            return vec![self.zero()];
        }
        let radix = BigUint::from(self.radix());
        let mut digits = Vec::new();
        let mut rest = value.clone();
        while !rest.is_zero() {
            let (quotient, remainder) = rest.div_rem(&radix);
            // remainder < radix <= u32::MAX
            let digit = remainder.to_usize().unwrap_or_default();
            digits.push(self.symbols[digit]);
            rest = quotient;
        }
        digits.reverse();
        digits
    }

    /// Encodes `value` left-padded with the zero symbol to `width` symbols.
    ///
    /// Values whose shortest form is wider than `width` are returned unpadded.
    pub fn encode_padded(&self, value: &BigUint, width: usize) -> Vec<char> {
        let digits = if value.is_zero() {
            Vec::new()
        } else {
            self.encode(value)
        };
        if digits.len() >= width {
            return digits;
        }
        let mut out = vec![self.zero(); width - digits.len()];
        out.extend(digits);
        out
    }
}

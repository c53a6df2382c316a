//! Format-preserving encryption with FF3-1.
//!
//! This crate implements the FF3-1 Feistel construction over an arbitrary, caller-supplied
//! alphabet, and two structured consumers built on top of it.
//!
//! # Features
//!
//! - `Ff3_1`: FF3-1 over any alphabet of 2 to 65536 distinct symbols, with AES-128/192/256
//!   selected by the key length and a 7-byte tweak
//! - `IpFpe`: address-space-preserving IP address encryption; IPv4 maps to IPv4, IPv6 to IPv6
//! - `PatternFpe`: encryption of the capture groups of a regular expression, leaving
//!   separators and any other uncaptured text untouched
//!
//! # Examples
//!
//! ```rust
//! use fpecrypt::{Ff3_1, IpFpe, PatternFpe, DECIMAL};
//! use std::net::IpAddr;
//! use std::str::FromStr;
//!
//! let key = [0x2bu8; 16];
//! let tweak = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
//!
//! // Strings over an alphabet
//! let ff3 = Ff3_1::new(&key, Some(&tweak), DECIMAL).unwrap();
//! let encrypted = ff3.encrypt("4111111111111111", None).unwrap();
//! assert_eq!(encrypted.len(), 16);
//! assert_eq!(ff3.decrypt(&encrypted, None).unwrap(), "4111111111111111");
//!
//! // IP addresses
//! let ip = IpAddr::from_str("192.0.2.1").unwrap();
//! let cipher = IpFpe::new(&key, &tweak).unwrap();
//! let encrypted = cipher.encrypt_ipaddr(ip).unwrap();
//! assert!(encrypted.is_ipv4());
//! assert_eq!(cipher.decrypt_ipaddr(encrypted).unwrap(), ip);
//!
//! // Fields selected by a pattern
//! let cipher = PatternFpe::new(&key, &tweak, r"^(\d{6})-(\d{8})$", DECIMAL).unwrap();
//! let encrypted = cipher.encrypt("123456-12345678").unwrap();
//! assert_eq!(&encrypted[6..7], "-");
//! assert_eq!(cipher.decrypt(&encrypted).unwrap(), "123456-12345678");
//! ```
//!
//! # Security Considerations
//!
//! - Ciphertexts reveal the length and alphabet of the plaintext, by construction
//! - Encryption is deterministic: equal inputs under the same key and tweak give equal
//!   outputs; vary the tweak to separate domains
//! - No authentication; keys are neither stored nor rotated by this crate
//! - Small domains (short texts over small alphabets) offer limited security, which is
//!   why texts must cover at least 1,000,000 values

pub(crate) mod alphabet;
pub(crate) mod cipher;
pub(crate) mod common;
pub(crate) mod ff3_1;
pub(crate) mod ffx;
pub(crate) mod ip;
pub(crate) mod pattern;

pub use alphabet::{Alphabet, ALPHANUMERIC, BASE36, DECIMAL, HEX_LOWER, HEX_UPPER};
pub use cipher::{AesCipher, BlockCipher};
pub use common::{reverse_bytes, reverse_runes, Direction, Error, BLOCK_BYTES};
pub use ff3_1::Ff3_1;
pub use ffx::{Ffx, FfxParams, ROUNDS};
pub use ip::{anonymize, bytes_to_ip, ip_to_bytes, IpFpe};
pub use pattern::{transform_by_pattern, PatternFpe};

pub mod reexports {
    pub use aes;
    pub use num_bigint;
    #[cfg(feature = "random")]
    pub use rand;
    pub use regex;
}

//! Address-space-preserving IP address encryption.
//!
//! An address is written as a lowercase hexadecimal numeral of its fixed-width byte
//! form (8 digits for IPv4, 32 for IPv6) and run through FF3-1 over the 16 hex digits.
//! The family is fixed before the transform, so IPv4 always maps to IPv4 and IPv6 to
//! IPv6, and each family's address space is permuted bijectively.

use ct_codecs::{Decoder as _, Encoder as _, Hex};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::alphabet::{Alphabet, HEX_LOWER};
use crate::common::{Direction, Error};
use crate::ff3_1::Ff3_1;

/// Returns the fixed-width byte form of an address: 4 bytes for IPv4, 16 for IPv6.
pub fn ip_to_bytes(ip: IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(ipv4) => ipv4.octets().to_vec(),
        IpAddr::V6(ipv6) => ipv6.octets().to_vec(),
    }
}

/// Rebuilds an address from its byte form; the length selects the family.
pub fn bytes_to_ip(bytes: &[u8]) -> Result<IpAddr, Error> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(Error::UnsupportedAddressFamily { len: bytes.len() })
}

/// A structure representing the FF3-1 context for IP addresses.
pub struct IpFpe {
    ff3: Ff3_1,
}

impl IpFpe {
    /// Creates a new IpFpe instance.
    ///
    /// # Arguments
    ///
    /// * `key` - A 16, 24 or 32-byte AES key.
    /// * `tweak` - A 7-byte tweak.
    pub fn new(key: &[u8], tweak: &[u8]) -> Result<Self, Error> {
        let ff3 = Ff3_1::with_alphabet(key, Some(tweak), Alphabet::new(HEX_LOWER)?)?;
        Ok(Self { ff3 })
    }

    /// Encrypts or decrypts the raw bytes of an address (4 or 16 bytes).
    pub fn transform_ip_bytes(&self, ip: &[u8], direction: Direction) -> Result<Vec<u8>, Error> {
        if ip.len() != 4 && ip.len() != 16 {
            return Err(Error::UnsupportedAddressFamily { len: ip.len() });
        }
        let hex = Hex::encode_to_string(ip)
            .map_err(|_| Error::InternalConsistencyError("hex encoding failed"))?;
        let out = self.ff3.transform(&hex, None, direction)?;
        let bytes = Hex::decode_to_vec(out.as_bytes(), None)
            .map_err(|_| Error::InternalConsistencyError("hex decoding failed"))?;
        if bytes.len() != ip.len() {
            return Err(Error::InternalConsistencyError("address width changed"));
        }
        Ok(bytes)
    }

    pub fn encrypt_ip_bytes(&self, ip: &[u8]) -> Result<Vec<u8>, Error> {
        self.transform_ip_bytes(ip, Direction::Encrypt)
    }

    pub fn decrypt_ip_bytes(&self, ip: &[u8]) -> Result<Vec<u8>, Error> {
        self.transform_ip_bytes(ip, Direction::Decrypt)
    }

    /// Encrypts or decrypts an address, keeping its family.
    pub fn transform_ipaddr(&self, ip: IpAddr, direction: Direction) -> Result<IpAddr, Error> {
        let bytes = self.transform_ip_bytes(&ip_to_bytes(ip), direction)?;
        bytes_to_ip(&bytes)
    }

    /// Encrypts an IP address.
    ///
    /// # Arguments
    ///
    /// * `ip` - The IP address to encrypt
    ///
    /// # Returns
    /// The encrypted IP address, of the same family
    pub fn encrypt_ipaddr(&self, ip: IpAddr) -> Result<IpAddr, Error> {
        self.transform_ipaddr(ip, Direction::Encrypt)
    }

    /// Decrypts an IP address.
    ///
    /// # Arguments
    ///
    /// * `encrypted` - The encrypted IP address
    ///
    /// # Returns
    /// The decrypted IP address
    pub fn decrypt_ipaddr(&self, encrypted: IpAddr) -> Result<IpAddr, Error> {
        self.transform_ipaddr(encrypted, Direction::Decrypt)
    }

    /// Encrypts an IP address string (IPv4 or IPv6).
    pub fn encrypt_ip_str(&self, ip: &str) -> Result<String, Error> {
        Ok(self.encrypt_ipaddr(parse_ip(ip)?)?.to_string())
    }

    /// Decrypts an IP address string (IPv4 or IPv6).
    pub fn decrypt_ip_str(&self, encrypted: &str) -> Result<String, Error> {
        Ok(self.decrypt_ipaddr(parse_ip(encrypted)?)?.to_string())
    }
}

fn parse_ip(ip: &str) -> Result<IpAddr, Error> {
    IpAddr::from_str(ip).map_err(|_| Error::InvalidAddress(ip.to_string()))
}

/// One-shot address transform with a freshly keyed engine.
///
/// Prefer [`IpFpe`] when transforming more than one address with the same key.
pub fn anonymize(
    key: &[u8],
    tweak: &[u8],
    addr: IpAddr,
    direction: Direction,
) -> Result<IpAddr, Error> {
    IpFpe::new(key, tweak)?.transform_ipaddr(addr, direction)
}

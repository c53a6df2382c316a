use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};

use crate::common::{Error, BLOCK_BYTES};

/// A 128-bit block cipher, used in the forward direction only.
///
/// The Feistel core never decrypts a block: both directions of the format-preserving
/// cipher evaluate the round function with the forward permutation.
pub trait BlockCipher {
    /// Encrypts a single block in place.
    fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]);
}

/// AES with the key size selected by the key length.
#[derive(Clone)]
pub enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    /// Accepted key lengths in bytes.
    pub const KEY_LENGTHS: [usize; 3] = [16, 24, 32];

    /// Creates a cipher from a 16, 24 or 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let invalid = |_| Error::InvalidKeyLength { len: key.len() };
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            len => Err(Error::InvalidKeyLength { len }),
        }
    }
}

impl BlockCipher for AesCipher {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        let mut b = Block::from(*block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut b),
            Self::Aes192(c) => c.encrypt_block(&mut b),
            Self::Aes256(c) => c.encrypt_block(&mut b),
        }
        *block = b.into();
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        (**self).encrypt_block(block)
    }
}

use crate::alphabet::Alphabet;
use crate::cipher::{AesCipher, BlockCipher};
use crate::common::{Direction, Error};
use crate::ffx::{Ffx, FfxParams};

/// FF3-1 format-preserving cipher over a caller-defined alphabet.
///
/// Ciphertexts have the same length as plaintexts and only use symbols of the
/// alphabet. The instance is immutable and can be shared between threads; build it
/// once per key and alphabet and reuse it.
pub struct Ff3_1<C = AesCipher> {
    ffx: Ffx<C>,
}

impl Ff3_1 {
    /// The number of bytes required for the tweak.
    pub const TWEAK_BYTES: usize = 7;

    /// Creates a new FF3-1 instance.
    ///
    /// # Arguments
    ///
    /// * `key` - A 16, 24 or 32-byte AES key.
    /// * `tweak` - Optional default 7-byte tweak, used when a call supplies none.
    /// * `alphabet` - The symbols of the plaintext domain, in numeral order.
    pub fn new(key: &[u8], tweak: Option<&[u8]>, alphabet: &str) -> Result<Self, Error> {
        Self::with_alphabet(key, tweak, Alphabet::new(alphabet)?)
    }

    /// Creates a new FF3-1 instance from a prebuilt alphabet.
    pub fn with_alphabet(
        key: &[u8],
        tweak: Option<&[u8]>,
        alphabet: Alphabet,
    ) -> Result<Self, Error> {
        // FF3-1 keys the block cipher with the byte-reversed key
        let mut reversed = key.to_vec();
        reversed.reverse();
        Self::with_cipher(AesCipher::new(&reversed)?, tweak, alphabet)
    }

    /// Generates a new random key of `len` bytes (16, 24 or 32).
    #[cfg(feature = "random")]
    pub fn generate_key(len: usize) -> Result<Vec<u8>, Error> {
        use rand::Rng as _;

        if !AesCipher::KEY_LENGTHS.contains(&len) {
            return Err(Error::InvalidKeyLength { len });
        }
        let mut key = vec![0u8; len];
        rand::rng().fill(key.as_mut_slice());
        Ok(key)
    }

    /// Generates a random tweak.
    #[cfg(feature = "random")]
    pub fn generate_tweak() -> [u8; Self::TWEAK_BYTES] {
        rand::random()
    }
}

impl<C: BlockCipher> Ff3_1<C> {
    /// Creates an instance around an already keyed block cipher.
    ///
    /// The cipher is used as is: the FF3-1 key reversal is the caller's business.
    pub fn with_cipher(
        cipher: C,
        tweak: Option<&[u8]>,
        alphabet: Alphabet,
    ) -> Result<Self, Error> {
        let params = FfxParams::ff3_1(alphabet.radix())?;
        Ok(Self {
            ffx: Ffx::new(cipher, alphabet, params, tweak)?,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.ffx.alphabet()
    }

    pub fn radix(&self) -> usize {
        self.ffx.alphabet().radix()
    }

    /// Shortest accepted text length.
    pub fn min_text_len(&self) -> usize {
        self.ffx.params().min_text_len
    }

    /// Longest accepted text length.
    ///
    /// This is `floor(192 / log2(radix))`, except at odd values whose longer half could
    /// exceed 96 bits, where it is one less (56 rather than 57 decimal digits).
    pub fn max_text_len(&self) -> usize {
        self.ffx.params().longest_text_len()
    }

    /// Checks a text and tweak without encrypting anything.
    pub fn validate(&self, text: &[char], tweak: Option<&[u8]>) -> Result<(), Error> {
        self.ffx.validate(text, tweak)
    }

    /// Encrypts `plaintext`. `tweak` overrides the default tweak when given.
    pub fn encrypt(&self, plaintext: &str, tweak: Option<&[u8]>) -> Result<String, Error> {
        self.transform(plaintext, tweak, Direction::Encrypt)
    }

    /// Decrypts `ciphertext`. `tweak` overrides the default tweak when given.
    pub fn decrypt(&self, ciphertext: &str, tweak: Option<&[u8]>) -> Result<String, Error> {
        self.transform(ciphertext, tweak, Direction::Decrypt)
    }

    pub fn encrypt_chars(
        &self,
        plaintext: &[char],
        tweak: Option<&[u8]>,
    ) -> Result<Vec<char>, Error> {
        self.ffx.cipher(plaintext, tweak, Direction::Encrypt)
    }

    pub fn decrypt_chars(
        &self,
        ciphertext: &[char],
        tweak: Option<&[u8]>,
    ) -> Result<Vec<char>, Error> {
        self.ffx.cipher(ciphertext, tweak, Direction::Decrypt)
    }

    /// Encrypts or decrypts `text` depending on `direction`.
    pub fn transform(
        &self,
        text: &str,
        tweak: Option<&[u8]>,
        direction: Direction,
    ) -> Result<String, Error> {
        let text: Vec<char> = text.chars().collect();
        let out = self.ffx.cipher(&text, tweak, direction)?;
        Ok(out.into_iter().collect())
    }
}

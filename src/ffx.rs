//! The FFX Feistel core shared by FF3-family ciphers.
//!
//! An [`Ffx`] context binds a block cipher, an alphabet, length bounds and an optional
//! default tweak. It is immutable once built: every call allocates its own working
//! state, so a context can be shared across threads for concurrent use.

use num_bigint::BigUint;
use num_traits::One;

use crate::alphabet::Alphabet;
use crate::cipher::BlockCipher;
use crate::common::{reverse_bytes, reverse_runes, split_tweak, Direction, Error, BLOCK_BYTES};

/// Number of Feistel rounds.
pub const ROUNDS: u8 = 8;

/// Bytes available for a half-block numeral in the round input.
const NUMERAL_BYTES: usize = 12;

/// Bits available for a half-block numeral in the round input.
const NUMERAL_BITS: u32 = 8 * NUMERAL_BYTES as u32;

/// Smallest domain size a message length must cover.
const MIN_DOMAIN: u64 = 1_000_000;

/// Largest radix accepted by FF3-1.
const MAX_RADIX: usize = 1 << 16;

/// Length bounds enforced before any round runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FfxParams {
    pub min_text_len: usize,
    pub max_text_len: usize,
    /// Longest half whose numerals all fit the 96-bit numeral field of a round input.
    pub max_half_len: usize,
    pub min_tweak_len: usize,
    pub max_tweak_len: usize,
}

impl FfxParams {
    /// FF3-1 bounds for `radix`.
    ///
    /// `min_text_len` is the smallest `n` with `radix^n >= 1_000_000` and
    /// `max_text_len` is `floor(192 / log2(radix))`, both computed exactly.
    /// `max_half_len` is `floor(96 / log2(radix))`: an odd `max_text_len` whose longer
    /// half exceeds it is not accepted, see [`FfxParams::longest_text_len`].
    pub fn ff3_1(radix: usize) -> Result<Self, Error> {
        let min_text_len = min_text_len(radix);
        let max_text_len = max_len_within(radix, 2 * NUMERAL_BITS);
        if !(2..=MAX_RADIX).contains(&radix) || min_text_len > max_text_len {
            return Err(Error::InvalidRadix {
                radix,
                min_len: min_text_len,
                max_len: max_text_len,
            });
        }
        Ok(Self {
            min_text_len,
            max_text_len,
            max_half_len: max_len_within(radix, NUMERAL_BITS),
            min_tweak_len: 7,
            max_tweak_len: 7,
        })
    }

    /// Longest accepted text: `max_text_len`, or the even length below it when the
    /// longer half of `max_text_len` symbols could exceed 96 bits.
    pub fn longest_text_len(&self) -> usize {
        self.max_text_len.min(2 * self.max_half_len)
    }

    /// Checks a text length against the bounds. The outcome depends on `len` alone.
    pub fn validate_text_length(&self, len: usize) -> Result<(), Error> {
        let max = self.longest_text_len();
        if len < self.min_text_len || len > max {
            return Err(Error::InvalidTextLength {
                len,
                min: self.min_text_len,
                max,
            });
        }
        Ok(())
    }

    pub fn validate_tweak_length(&self, len: usize) -> Result<(), Error> {
        if len < self.min_tweak_len || len > self.max_tweak_len {
            return Err(Error::InvalidTweakLength {
                len,
                min: self.min_tweak_len,
                max: self.max_tweak_len,
            });
        }
        Ok(())
    }
}

fn min_text_len(radix: usize) -> usize {
    if radix < 2 {
        return usize::MAX;
    }
    let radix = radix as u64;
    let mut len = 1;
    let mut domain = radix;
    while domain < MIN_DOMAIN {
        domain = domain.saturating_mul(radix);
        len += 1;
    }
    len
}

/// Largest `n` with `radix^n <= 2^bits`.
fn max_len_within(radix: usize, bits: u32) -> usize {
    if radix < 2 {
        return 0;
    }
    let limit = BigUint::one() << bits;
    let radix = BigUint::from(radix);
    let mut len = 0;
    let mut domain = radix.clone();
    while domain <= limit {
        domain *= &radix;
        len += 1;
    }
    len
}

/// Feistel context: block cipher, alphabet, bounds and default tweak.
pub struct Ffx<C> {
    cipher: C,
    alphabet: Alphabet,
    params: FfxParams,
    tweak: Option<Vec<u8>>,
}

impl<C: BlockCipher> Ffx<C> {
    /// Creates a context. A default tweak, if given, is validated immediately.
    pub fn new(
        cipher: C,
        alphabet: Alphabet,
        params: FfxParams,
        tweak: Option<&[u8]>,
    ) -> Result<Self, Error> {
        if let Some(tweak) = tweak {
            params.validate_tweak_length(tweak.len())?;
        }
        Ok(Self {
            cipher,
            alphabet,
            params,
            tweak: tweak.map(<[u8]>::to_vec),
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn params(&self) -> &FfxParams {
        &self.params
    }

    /// Resolves the tweak for a call: the override if present, else the default.
    pub fn tweak<'a>(&'a self, tweak: Option<&'a [u8]>) -> &'a [u8] {
        tweak.or(self.tweak.as_deref()).unwrap_or_default()
    }

    /// Validates a call's inputs without running the cipher.
    pub fn validate(&self, text: &[char], tweak: Option<&[u8]>) -> Result<(), Error> {
        self.params.validate_tweak_length(self.tweak(tweak).len())?;
        self.params.validate_text_length(text.len())?;
        self.alphabet.validate(text)
    }

    /// Runs the 8-round FF3-1 Feistel network over `text`.
    pub fn cipher(
        &self,
        text: &[char],
        tweak: Option<&[u8]>,
        direction: Direction,
    ) -> Result<Vec<char>, Error> {
        self.validate(text, tweak)?;
        let tweak: &[u8; 7] = self
            .tweak(tweak)
            .try_into()
            .map_err(|_| Error::InternalConsistencyError("tweak is not 7 bytes"))?;
        let (tweak_left, tweak_right) = split_tweak(tweak);

        let n = text.len();
        let v = n / 2;
        let u = n - v;
        let radix = BigUint::from(self.alphabet.radix());
        // (length, modulus) of the half written by even rounds, then odd rounds
        let mut even = (u, radix.pow(u as u32));
        let mut odd = (v, radix.pow(v as u32));

        let (mut a, mut b) = match direction {
            Direction::Encrypt => (text[..u].to_vec(), text[u..].to_vec()),
            Direction::Decrypt => {
                core::mem::swap(&mut even, &mut odd);
                (text[u..].to_vec(), text[..u].to_vec())
            }
        };

        for i in 0..ROUNDS {
            let use_right = match direction {
                Direction::Encrypt => i % 2 == 0,
                Direction::Decrypt => i % 2 == 1,
            };
            let (m, modulus) = if i % 2 == 0 { &even } else { &odd };
            let round = match direction {
                Direction::Encrypt => i,
                Direction::Decrypt => ROUNDS - 1 - i,
            };

            let mut p = [0u8; BLOCK_BYTES];
            p[..4].copy_from_slice(if use_right { &tweak_right } else { &tweak_left });
            p[3] ^= round;
            let numeral_b = self.alphabet.decode(&reverse_runes(&b))?.to_bytes_be();
            if numeral_b.len() > NUMERAL_BYTES {
                return Err(Error::InternalConsistencyError("half-block numeral exceeds 96 bits"));
            }
            p[BLOCK_BYTES - numeral_b.len()..].copy_from_slice(&numeral_b);

            let mut s = reverse_bytes(&p);
            self.cipher.encrypt_block(&mut s);
            let y = BigUint::from_bytes_be(&reverse_bytes(&s));

            let numeral_a = self.alphabet.decode(&reverse_runes(&a))?;
            let c = match direction {
                Direction::Encrypt => (numeral_a + y) % modulus,
                Direction::Decrypt => (numeral_a + modulus - y % modulus) % modulus,
            };

            a = core::mem::replace(&mut b, reverse_runes(&self.alphabet.encode_padded(&c, *m)));
        }

        Ok(match direction {
            Direction::Encrypt => [a, b].concat(),
            Direction::Decrypt => [b, a].concat(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{DECIMAL, HEX_LOWER};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and mixes the block with a fixed byte pattern.
    struct CountingCipher {
        calls: AtomicUsize,
    }

    impl CountingCipher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl BlockCipher for CountingCipher {
        fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            for (i, byte) in block.iter_mut().enumerate() {
                *byte = byte.rotate_left(3) ^ (i as u8).wrapping_mul(0x9d);
            }
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_ff3_1_bounds() {
        let decimal = FfxParams::ff3_1(10).unwrap();
        assert_eq!((decimal.min_text_len, decimal.max_text_len), (6, 57));
        let hex = FfxParams::ff3_1(16).unwrap();
        assert_eq!((hex.min_text_len, hex.max_text_len), (5, 48));
        let binary = FfxParams::ff3_1(2).unwrap();
        assert_eq!((binary.min_text_len, binary.max_text_len), (20, 192));
        let alnum = FfxParams::ff3_1(62).unwrap();
        assert_eq!((alnum.min_text_len, alnum.max_text_len), (4, 32));
        let max = FfxParams::ff3_1(1 << 16).unwrap();
        assert_eq!((max.min_text_len, max.max_text_len), (2, 12));
        assert_eq!((decimal.min_tweak_len, decimal.max_tweak_len), (7, 7));
    }

    #[test]
    fn test_unsupported_radix() {
        assert!(matches!(
            FfxParams::ff3_1((1 << 16) + 1),
            Err(Error::InvalidRadix { .. })
        ));
        assert!(matches!(FfxParams::ff3_1(1), Err(Error::InvalidRadix { .. })));
    }

    #[test]
    fn test_rejects_before_cipher() {
        let alphabet = Alphabet::new(DECIMAL).unwrap();
        let params = FfxParams::ff3_1(10).unwrap();
        let cipher = CountingCipher::new();
        let ffx = Ffx::new(&cipher, alphabet, params, Some(&[0u8; 7])).unwrap();

        assert_eq!(
            ffx.cipher(&chars("12345"), None, Direction::Encrypt),
            Err(Error::InvalidTextLength {
                len: 5,
                min: 6,
                max: 56
            })
        );
        let long = vec!['1'; 58];
        assert!(matches!(
            ffx.cipher(&long, None, Direction::Decrypt),
            Err(Error::InvalidTextLength { len: 58, .. })
        ));
        assert_eq!(
            ffx.cipher(&chars("123456"), Some(&[0u8; 8]), Direction::Encrypt),
            Err(Error::InvalidTweakLength {
                len: 8,
                min: 7,
                max: 7
            })
        );
        assert_eq!(
            ffx.cipher(&chars("12a456"), None, Direction::Encrypt),
            Err(Error::InvalidSymbol {
                symbol: 'a',
                position: 2
            })
        );
        assert_eq!(cipher.calls.load(Ordering::Relaxed), 0);

        ffx.cipher(&chars("123456"), None, Direction::Encrypt).unwrap();
        assert_eq!(cipher.calls.load(Ordering::Relaxed), ROUNDS as usize);
    }

    #[test]
    fn test_missing_tweak() {
        let alphabet = Alphabet::new(DECIMAL).unwrap();
        let params = FfxParams::ff3_1(10).unwrap();
        let ffx = Ffx::new(CountingCipher::new(), alphabet, params, None).unwrap();
        assert!(matches!(
            ffx.cipher(&chars("123456"), None, Direction::Encrypt),
            Err(Error::InvalidTweakLength { len: 0, .. })
        ));
        assert!(ffx
            .cipher(&chars("123456"), Some(&[1u8; 7]), Direction::Encrypt)
            .is_ok());
        let alphabet = Alphabet::new(DECIMAL).unwrap();
        assert!(matches!(
            Ffx::new(CountingCipher::new(), alphabet, params, Some(&[0u8; 6])),
            Err(Error::InvalidTweakLength { len: 6, .. })
        ));
    }

    #[test]
    fn test_round_trip_any_cipher() {
        let alphabet = Alphabet::new(HEX_LOWER).unwrap();
        let params = FfxParams::ff3_1(16).unwrap();
        let ffx = Ffx::new(CountingCipher::new(), alphabet, params, Some(b"tweak!!")).unwrap();

        let long = "a".repeat(48);
        for text in ["00000", "fffff", "0123456789abcdef", "deadbeefcafe0", long.as_str()] {
            let x = chars(text);
            let y = ffx.cipher(&x, None, Direction::Encrypt).unwrap();
            assert_eq!(y.len(), x.len());
            assert!(y.iter().all(|c| HEX_LOWER.contains(*c)));
            assert_eq!(ffx.cipher(&y, None, Direction::Decrypt).unwrap(), x);
        }
    }

    #[test]
    fn test_half_block_bounds() {
        let decimal = FfxParams::ff3_1(10).unwrap();
        assert_eq!(decimal.max_half_len, 28);
        assert_eq!(decimal.longest_text_len(), 56);
        let ternary = FfxParams::ff3_1(3).unwrap();
        assert_eq!((ternary.max_text_len, ternary.max_half_len), (121, 60));
        assert_eq!(ternary.longest_text_len(), 120);
        // even maxima always split into halves that fit
        for radix in [2, 16, 62, 1 << 16] {
            let params = FfxParams::ff3_1(radix).unwrap();
            assert_eq!(params.longest_text_len(), params.max_text_len);
        }
    }

    #[test]
    fn test_odd_maximum_rejected_by_length() {
        // 57 decimal digits split 29/28 and 10^29 > 2^96: only some 29-digit halves fit,
        // so the length is refused outright whatever the digits are
        let alphabet = Alphabet::new(DECIMAL).unwrap();
        let params = FfxParams::ff3_1(10).unwrap();
        let cipher = CountingCipher::new();
        let ffx = Ffx::new(&cipher, alphabet, params, Some(&[0u8; 7])).unwrap();

        let expected = Err(Error::InvalidTextLength {
            len: 57,
            min: 6,
            max: 56,
        });
        let texts = [
            "0".repeat(57),
            "9".repeat(57),
            "1".repeat(57),
            "0123456789".repeat(6)[..57].to_string(),
            "9876543210".repeat(6)[..57].to_string(),
            format!("{}{}", "0".repeat(28), "9".repeat(29)),
        ];
        for text in &texts {
            for direction in [Direction::Encrypt, Direction::Decrypt] {
                assert_eq!(ffx.cipher(&chars(text), None, direction), expected);
            }
        }
        assert_eq!(cipher.calls.load(Ordering::Relaxed), 0);

        for text in &texts {
            let x = chars(&text[..56]);
            let y = ffx.cipher(&x, None, Direction::Encrypt).unwrap();
            assert_eq!(ffx.cipher(&y, None, Direction::Decrypt).unwrap(), x);
        }

        let alphabet = Alphabet::new("012").unwrap();
        let params = FfxParams::ff3_1(3).unwrap();
        let ffx = Ffx::new(&cipher, alphabet, params, Some(&[0u8; 7])).unwrap();
        let calls = cipher.calls.load(Ordering::Relaxed);
        for digit in ['0', '1', '2'] {
            assert_eq!(
                ffx.cipher(&vec![digit; 121], None, Direction::Encrypt),
                Err(Error::InvalidTextLength {
                    len: 121,
                    min: 13,
                    max: 120
                })
            );
        }
        assert_eq!(cipher.calls.load(Ordering::Relaxed), calls);
        assert!(ffx.cipher(&vec!['2'; 120], None, Direction::Encrypt).is_ok());
    }
}

//! Adapter over the `bip39` crate: the only place that touches wordlists and
//! checksums.
//!
//! Raw text becomes a [`Mnemonic`] through [`parse`] before anything else
//! runs, so the rest of the crate only ever sees validated mnemonics.

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

use crate::entropy::{Entropy, entropy_bits};
use crate::error::{Result, ShareError};

/// Parses and validates a phrase
///
/// Surrounding whitespace and letter case are normalized; BIP39 word count,
/// wordlist membership and checksum are all checked.
///
/// # Example
/// ```
/// use mnemonic_share::mnemonic;
/// use bip39::Language;
///
/// let phrase = "  Abandon abandon abandon abandon abandon abandon \
///               abandon abandon abandon abandon abandon about ";
/// let parsed = mnemonic::parse(phrase, Language::English).unwrap();
/// assert_eq!(parsed.word_count(), 12);
///
/// assert!(mnemonic::parse("abandon abandon", Language::English).is_err());
/// ```
pub fn parse(phrase: &str, language: Language) -> Result<Mnemonic> {
    let normalized = phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Mnemonic::parse_in_normalized(language, &normalized)?)
}

/// Validates a phrase without keeping the result
pub fn validate(phrase: &str, language: Language) -> Result<()> {
    parse(phrase, language).map(|_| ())
}

/// Extracts the entropy behind a mnemonic
pub fn decode(mnemonic: &Mnemonic) -> Result<Entropy> {
    Entropy::from_bytes(mnemonic.to_entropy())
}

/// Encodes entropy as a mnemonic in `language`
pub fn encode(entropy: &Entropy, language: Language) -> Result<Mnemonic> {
    Ok(Mnemonic::from_entropy_in(language, entropy.as_bytes())?)
}

/// Creates a fresh random mnemonic of `word_count` words
///
/// # Example
/// ```
/// use mnemonic_share::mnemonic;
/// use bip39::Language;
///
/// let fresh = mnemonic::generate(18, Language::English).unwrap();
/// assert_eq!(fresh.word_count(), 18);
/// assert!(mnemonic::generate(16, Language::English).is_err());
/// ```
pub fn generate(word_count: usize, language: Language) -> Result<Mnemonic> {
    let bits = entropy_bits(word_count)?;
    let mut rng = ChaCha20Rng::try_from_rng(&mut OsRng)
        .map_err(|e| ShareError::RandomSource(e.to_string()))?;
    let mut bytes = vec![0u8; bits / 8];
    rng.fill_bytes(&mut bytes);
    let entropy = Entropy::from_bytes(bytes)?;
    encode(&entropy, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP39 test vector for 16 zero bytes
    const ZERO_12: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    // BIP39 test vector for 32 0x7f bytes
    const LEGAL_24: &str = "legal winner thank year wave sausage worth useful legal winner \
                            thank year wave sausage worth useful legal winner thank year \
                            wave sausage worth title";

    #[test]
    fn test_decode_known_vector() {
        let mnemonic = parse(ZERO_12, Language::English).unwrap();
        let entropy = decode(&mnemonic).unwrap();
        assert_eq!(entropy.as_bytes(), &[0u8; 16][..]);
    }

    #[test]
    fn test_encode_known_vector() {
        let entropy = Entropy::from_bytes(vec![0x7f; 32]).unwrap();
        let mnemonic = encode(&entropy, Language::English).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert_eq!(mnemonic, parse(LEGAL_24, Language::English).unwrap());
    }

    #[test]
    fn test_bad_checksum() {
        let phrase = ZERO_12.replace("about", "abandon");
        assert!(matches!(
            parse(&phrase, Language::English),
            Err(ShareError::InvalidMnemonic(bip39::Error::InvalidChecksum))
        ));
    }

    #[test]
    fn test_unknown_word() {
        let phrase = ZERO_12.replace("about", "aboot");
        assert!(matches!(
            parse(&phrase, Language::English),
            Err(ShareError::InvalidMnemonic(bip39::Error::UnknownWord(11)))
        ));
    }

    #[test]
    fn test_bad_word_count() {
        assert!(matches!(
            validate("abandon abandon abandon", Language::English),
            Err(ShareError::InvalidMnemonic(bip39::Error::BadWordCount(3)))
        ));
    }

    #[test]
    fn test_generate_all_lengths() {
        for words in crate::entropy::WORD_COUNTS {
            let mnemonic = generate(words, Language::English).unwrap();
            assert_eq!(mnemonic.word_count(), words);
            assert_eq!(decode(&mnemonic).unwrap().word_count(), words);
        }
    }

    #[test]
    fn test_generate_is_random() {
        let a = generate(12, Language::English).unwrap();
        let b = generate(12, Language::English).unwrap();
        assert_ne!(a, b);
    }
}

//! Entropy widths for the standard BIP39 mnemonic lengths.

use crate::error::{Result, ShareError};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bits encoded by a single mnemonic word
pub const BITS_PER_WORD: usize = 11;

/// Mnemonic lengths accepted for sharing
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Returns the entropy bit-length behind a mnemonic of `word_count` words.
///
/// Every word carries 11 bits, one bit in every 33 is checksum, so the
/// entropy is `w * 11 - w / 3` bits.
///
/// # Example
/// ```
/// use mnemonic_share::entropy_bits;
///
/// assert_eq!(entropy_bits(12).unwrap(), 128);
/// assert_eq!(entropy_bits(24).unwrap(), 256);
/// assert!(entropy_bits(13).is_err());
/// ```
pub fn entropy_bits(word_count: usize) -> Result<usize> {
    if !WORD_COUNTS.contains(&word_count) {
        return Err(ShareError::InvalidWordCount(word_count));
    }
    Ok(word_count * BITS_PER_WORD - word_count / 3)
}

/// Returns the mnemonic word count for an entropy of `bits` bits.
pub fn word_count_for_bits(bits: usize) -> Result<usize> {
    WORD_COUNTS
        .iter()
        .copied()
        .find(|&w| w * BITS_PER_WORD - w / 3 == bits)
        .ok_or(ShareError::InvalidEntropyLength(bits))
}

/// Raw entropy behind a mnemonic, always a standard width
///
/// The bytes are wiped on drop when the `zeroize` feature is enabled.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Entropy {
    bytes: Vec<u8>,
}

impl Entropy {
    /// Wraps `bytes`, rejecting lengths that no mnemonic can encode
    ///
    /// # Example
    /// ```
    /// use mnemonic_share::Entropy;
    ///
    /// let entropy = Entropy::from_bytes(vec![0u8; 16]).unwrap();
    /// assert_eq!(entropy.bits(), 128);
    /// assert_eq!(entropy.word_count(), 12);
    /// assert!(Entropy::from_bytes(vec![0u8; 17]).is_err());
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        word_count_for_bits(bytes.len() * 8)?;
        Ok(Self { bytes })
    }

    /// Entropy width in bits
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Number of words in the mnemonic encoding this entropy
    pub fn word_count(&self) -> usize {
        let bits = self.bits();
        // from_bytes only admits standard widths
        bits * 3 / 32
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entropy")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_word_counts() {
        let expected = [(12, 128), (15, 160), (18, 192), (21, 224), (24, 256)];
        for (words, bits) in expected {
            assert_eq!(entropy_bits(words).unwrap(), bits);
            assert_eq!(word_count_for_bits(bits).unwrap(), words);
        }
    }

    #[test]
    fn test_invalid_word_counts() {
        for words in [0, 1, 3, 11, 13, 23, 25, 48] {
            assert_eq!(
                entropy_bits(words),
                Err(ShareError::InvalidWordCount(words))
            );
        }
    }

    #[test]
    fn test_invalid_bit_lengths() {
        for bits in [0, 8, 127, 129, 512] {
            assert_eq!(
                word_count_for_bits(bits),
                Err(ShareError::InvalidEntropyLength(bits))
            );
        }
    }

    #[test]
    fn test_entropy_word_count() {
        for words in WORD_COUNTS {
            let bytes = vec![0xAB; entropy_bits(words).unwrap() / 8];
            let entropy = Entropy::from_bytes(bytes).unwrap();
            assert_eq!(entropy.word_count(), words);
        }
    }

    #[test]
    fn test_debug_hides_bytes() {
        let entropy = Entropy::from_bytes(vec![0x42; 32]).unwrap();
        let rendered = format!("{:?}", entropy);
        assert!(rendered.contains("256"));
        assert!(!rendered.contains("42"));
    }

    #[test]
    #[cfg(feature = "zeroize")]
    fn test_zeroize() {
        let mut entropy = Entropy::from_bytes(vec![0xFF; 16]).unwrap();
        entropy.zeroize();
        assert!(entropy.as_bytes().iter().all(|&b| b == 0));
    }
}

//! Width-exact conversion between entropy bytes and field elements.
//!
//! Entropy is read as a big-endian unsigned integer. Going back, a field
//! element is rendered as exactly `bits / 8` bytes: shorter output would lose
//! leading zeros and longer output would change the mnemonic word count.

use num_bigint::BigUint;

use crate::entropy::{Entropy, word_count_for_bits};
use crate::error::{Result, ShareError};
use crate::field::FieldElement;

/// Interprets `entropy` as a big-endian integer
pub fn to_field_element(entropy: &Entropy) -> FieldElement {
    FieldElement::new(BigUint::from_bytes_be(entropy.as_bytes()))
}

/// Renders `value` as exactly `bits / 8` big-endian bytes
///
/// # Errors
/// Returns `ShareError::InvalidEntropyLength` for a non-standard width and
/// `ShareError::WidthOverflow` if `value` needs more than `bits` bits.
///
/// # Example
/// ```
/// use mnemonic_share::{FieldElement, from_field_element};
///
/// let entropy = from_field_element(&FieldElement::from(1u32), 128).unwrap();
/// assert_eq!(entropy.as_bytes().len(), 16);
/// assert_eq!(entropy.as_bytes()[15], 1);
/// ```
pub fn from_field_element(value: &FieldElement, bits: usize) -> Result<Entropy> {
    word_count_for_bits(bits)?;
    let value_bits = value.value().bits();
    if value_bits > bits as u64 {
        return Err(ShareError::WidthOverflow { bits, value_bits });
    }

    let width = bits / 8;
    let digits = value.value().to_bytes_be();
    let mut bytes = vec![0u8; width];
    // to_bytes_be renders zero as a single zero byte
    let digits = if value.value().bits() == 0 {
        &[][..]
    } else {
        &digits[..]
    };
    bytes[width - digits.len()..].copy_from_slice(digits);
    Entropy::from_bytes(bytes)
}

/// Renders entropy as `bits / 4` lowercase hex digits
pub fn to_hex(entropy: &Entropy) -> String {
    hex::encode(entropy.as_bytes())
}

/// Parses exactly `bits / 4` hex digits back into entropy
///
/// # Errors
/// - `ShareError::WidthOverflow` for more than `bits / 4` digits
/// - `ShareError::InvalidEntropyLength` for fewer
/// - `ShareError::InvalidHex` for anything that is not a hex digit
///
/// # Example
/// ```
/// use mnemonic_share::{from_hex, to_hex};
///
/// let hex = "000102030405060708090a0b0c0d0e0f";
/// let entropy = from_hex(hex, 128).unwrap();
/// assert_eq!(to_hex(&entropy), hex);
/// assert!(from_hex("0102", 128).is_err());
/// ```
pub fn from_hex(hex: &str, bits: usize) -> Result<Entropy> {
    word_count_for_bits(bits)?;
    let digits = bits / 4;
    if hex.len() > digits {
        return Err(ShareError::WidthOverflow {
            bits,
            value_bits: hex.len() as u64 * 4,
        });
    }
    if hex.len() != digits {
        return Err(ShareError::InvalidEntropyLength(hex.len() * 4));
    }

    let bytes = hex::decode(hex).map_err(|e| ShareError::InvalidHex(e.to_string()))?;
    Entropy::from_bytes(bytes)
}

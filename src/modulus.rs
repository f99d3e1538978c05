//! Selection of the sharing-field modulus for an entropy width.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShareError};

/// Distance from `2^bits` down to the largest prime below it, per entropy width
const PRIME_OFFSETS: [(usize, u32); 5] = [(128, 159), (160, 47), (192, 237), (224, 63), (256, 189)];

/// Bases for Miller-Rabin; deterministic far beyond 64 bits, probabilistic above
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// How the field modulus is derived from the entropy width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModulusPolicy {
    /// Largest prime below `2^bits`
    ///
    /// Every nonzero residue is invertible, so any set of distinct share
    /// indices interpolates. Secrets at or above the prime are rejected.
    #[default]
    Prime,
    /// `2^bits - 1`, compatible with shares made by earlier tooling
    ///
    /// This value is composite for every standard width; index pairs whose
    /// difference shares a factor with it cannot be interpolated.
    Mersenne,
}

/// Returns `2^bits - 1`. Primality is not checked.
///
/// # Example
/// ```
/// use mnemonic_share::mersenne_modulus;
/// use num_bigint::BigUint;
///
/// assert_eq!(mersenne_modulus(8), BigUint::from(255u32));
/// ```
pub fn mersenne_modulus(bits: usize) -> BigUint {
    (BigUint::one() << bits) - BigUint::one()
}

/// Returns the largest prime below `2^bits` for a standard entropy width
pub fn prime_modulus(bits: usize) -> Result<BigUint> {
    let (_, offset) = PRIME_OFFSETS
        .iter()
        .find(|(b, _)| *b == bits)
        .ok_or(ShareError::InvalidEntropyLength(bits))?;
    Ok((BigUint::one() << bits) - BigUint::from(*offset))
}

/// Selects the modulus for `bits` under `policy`
pub fn select_modulus(bits: usize, policy: ModulusPolicy) -> Result<BigUint> {
    match policy {
        ModulusPolicy::Prime => prime_modulus(bits),
        ModulusPolicy::Mersenne => {
            crate::entropy::word_count_for_bits(bits)?;
            let modulus = mersenne_modulus(bits);
            if !is_probable_prime(&modulus) {
                tracing::warn!(bits, "modulus::composite_mersenne_modulus");
            }
            Ok(modulus)
        }
    }
}

/// Miller-Rabin primality test over a fixed witness set
///
/// # Example
/// ```
/// use mnemonic_share::is_probable_prime;
/// use num_bigint::BigUint;
///
/// assert!(is_probable_prime(&BigUint::from(65537u32)));
/// assert!(!is_probable_prime(&BigUint::from(65535u32)));
/// ```
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for w in WITNESSES {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while (&d % &two).is_zero() {
        d >>= 1;
        s += 1;
    }

    'witness: for w in WITNESSES {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

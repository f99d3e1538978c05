use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use std::collections::HashSet;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::error::{Result, ShareError};
use crate::field::{FieldElement, PrimeField};

/// A point on the sharing polynomial
///
/// Any `threshold` shares with distinct indices determine the polynomial and
/// therefore its constant term, the secret. Fewer reveal nothing about it.
///
/// # Example
/// ```
/// use mnemonic_share::{FieldElement, PrimeField, ShamirShare};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(257u32));
/// let scheme = ShamirShare::builder(5, 3).build().unwrap();
/// let shares = scheme.split(&FieldElement::from(42u32), &field).unwrap();
///
/// assert_eq!(shares[0].index, 1);
/// assert_eq!(shares.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Evaluation point (x-coordinate), never zero
    pub index: u8,
    /// Polynomial value at `index`
    pub value: FieldElement,
}

/// Threshold secret sharing over integers modulo `p`
///
/// Each call to [`ShamirShare::split`] seeds a fresh ChaCha20 generator from
/// the operating system and drops it before returning; no generator state
/// survives between splits.
///
/// # Example
/// ```
/// use mnemonic_share::{FieldElement, PrimeField, ShamirShare};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(7919u32));
/// let scheme = ShamirShare::builder(5, 3).build().unwrap();
///
/// let secret = FieldElement::from(1234u32);
/// let shares = scheme.split(&secret, &field).unwrap();
///
/// let recovered = ShamirShare::reconstruct(&shares[1..4], &field).unwrap();
/// assert_eq!(recovered, secret);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShamirShare {
    /// Total number of shares to generate
    total_shares: u8,
    /// Minimum number of shares needed for reconstruction
    threshold: u8,
}

/// Builder for [`ShamirShare`] that validates parameters before any
/// randomness is drawn
#[derive(Debug)]
pub struct ShamirShareBuilder {
    total_shares: u8,
    threshold: u8,
}

impl ShamirShareBuilder {
    /// # Arguments
    /// * `total_shares` - Number of shares to create (threshold-255)
    /// * `threshold` - Shares required for reconstruction (2-total_shares)
    pub fn new(total_shares: u8, threshold: u8) -> Self {
        Self {
            total_shares,
            threshold,
        }
    }

    /// Builds the scheme
    ///
    /// # Errors
    /// Returns `ShareError::ThresholdOutOfRange` unless
    /// `2 <= threshold <= total_shares`.
    pub fn build(self) -> Result<ShamirShare> {
        if self.threshold < 2 || self.threshold > self.total_shares {
            return Err(ShareError::ThresholdOutOfRange {
                threshold: self.threshold,
                total_shares: self.total_shares,
            });
        }

        Ok(ShamirShare {
            total_shares: self.total_shares,
            threshold: self.threshold,
        })
    }
}

impl ShamirShare {
    pub fn builder(total_shares: u8, threshold: u8) -> ShamirShareBuilder {
        ShamirShareBuilder::new(total_shares, threshold)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn total_shares(&self) -> u8 {
        self.total_shares
    }

    /// Splits `secret` into `total_shares` shares over `field`
    ///
    /// # Errors
    /// - `ShareError::SecretOutOfRange` if `secret` is not below the modulus
    /// - `ShareError::RandomSource` if the OS random source is unavailable
    pub fn split(&self, secret: &FieldElement, field: &PrimeField) -> Result<Vec<Share>> {
        Self::check_secret(secret, field)?;
        let mut rng = ChaCha20Rng::try_from_rng(&mut OsRng)
            .map_err(|e| ShareError::RandomSource(e.to_string()))?;
        self.split_with_rng(secret, field, &mut rng)
    }

    /// Splits with a caller-supplied generator
    ///
    /// Only the sampling byte buffer is wiped. The coefficients are `BigUint`
    /// values whose limbs are freed without being cleared.
    pub(crate) fn split_with_rng<R: RngCore + CryptoRng>(
        &self,
        secret: &FieldElement,
        field: &PrimeField,
        rng: &mut R,
    ) -> Result<Vec<Share>> {
        Self::check_secret(secret, field)?;

        // f(x) = secret + a1*x + ... + a_{t-1}*x^{t-1}
        let mut coefficients = Vec::with_capacity(self.threshold as usize);
        coefficients.push(secret.clone());
        for _ in 1..self.threshold {
            coefficients.push(random_below(field.modulus(), rng));
        }

        let shares = (1..=self.total_shares)
            .map(|index| Share {
                index,
                value: field.evaluate(&coefficients, &FieldElement::from(index as u32)),
            })
            .collect();

        tracing::trace!(
            threshold = self.threshold,
            total_shares = self.total_shares,
            "shamir::split"
        );
        Ok(shares)
    }

    /// Recovers the constant term by Lagrange interpolation at zero
    ///
    /// All supplied shares are used. Passing at least two but fewer than
    /// `threshold` shares cannot be detected and yields an unrelated value.
    ///
    /// # Errors
    /// - `ShareError::InsufficientShares` for fewer than two shares
    /// - `ShareError::InvalidShareIndex` for index zero
    /// - `ShareError::DuplicateShareIndex` if an index repeats
    /// - `ShareError::ShareOutOfRange` if a value is not below the modulus
    /// - `ShareError::NonInvertible` if two indices differ by a non-unit of a
    ///   composite modulus
    pub fn reconstruct(shares: &[Share], field: &PrimeField) -> Result<FieldElement> {
        if shares.len() < 2 {
            return Err(ShareError::InsufficientShares { got: shares.len() });
        }

        let mut seen = HashSet::with_capacity(shares.len());
        for share in shares {
            if share.index == 0 {
                return Err(ShareError::InvalidShareIndex(share.index));
            }
            if !seen.insert(share.index) {
                return Err(ShareError::DuplicateShareIndex(share.index));
            }
            if !field.contains(&share.value) {
                return Err(ShareError::ShareOutOfRange { index: share.index });
            }
        }

        let coefficients = Self::compute_lagrange_coefficients(shares, field)?;
        let secret = shares
            .iter()
            .zip(&coefficients)
            .fold(FieldElement::zero(), |acc, (share, coeff)| {
                field.add(&acc, &field.mul(coeff, &share.value))
            });

        tracing::trace!(shares = shares.len(), "shamir::reconstruct");
        Ok(secret)
    }

    /// Basis polynomials evaluated at zero: `Π_{j≠i} x_j / (x_j - x_i)`
    fn compute_lagrange_coefficients(
        shares: &[Share],
        field: &PrimeField,
    ) -> Result<Vec<FieldElement>> {
        let xs: Vec<FieldElement> = shares
            .iter()
            .map(|share| FieldElement::from(share.index as u32))
            .collect();

        xs.iter()
            .enumerate()
            .map(|(i, x_i)| {
                let mut numerator = FieldElement::from(1u32);
                let mut denominator = FieldElement::from(1u32);
                for (j, x_j) in xs.iter().enumerate() {
                    if i != j {
                        numerator = field.mul(&numerator, x_j);
                        denominator = field.mul(&denominator, &field.sub(x_j, x_i));
                    }
                }
                match field.inverse(&denominator) {
                    Some(inv) => Ok(field.mul(&numerator, &inv)),
                    None => Err(Self::non_invertible_pair(shares, i, field)),
                }
            })
            .collect()
    }

    fn non_invertible_pair(shares: &[Share], i: usize, field: &PrimeField) -> ShareError {
        let x_i = FieldElement::from(shares[i].index as u32);
        shares
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .find(|(_, share)| {
                let x_j = FieldElement::from(share.index as u32);
                field.inverse(&field.sub(&x_j, &x_i)).is_none()
            })
            .map(|(_, share)| ShareError::NonInvertible(shares[i].index, share.index))
            .unwrap_or(ShareError::NonInvertible(shares[i].index, shares[i].index))
    }

    fn check_secret(secret: &FieldElement, field: &PrimeField) -> Result<()> {
        if !field.contains(secret) {
            return Err(ShareError::SecretOutOfRange {
                bits: field.modulus().bits() as usize,
            });
        }
        Ok(())
    }
}

/// Draws uniformly from `[0, modulus)` by rejection sampling
fn random_below<R: RngCore + CryptoRng>(modulus: &BigUint, rng: &mut R) -> FieldElement {
    let bits = modulus.bits() as usize;
    let mut buf = vec![0u8; bits.div_ceil(8)];
    let excess = buf.len() * 8 - bits;
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= 0xFF >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < *modulus {
            #[cfg(feature = "zeroize")]
            buf.zeroize();
            return FieldElement::new(candidate);
        }
    }
}

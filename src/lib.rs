//! Threshold secret sharing for BIP39 mnemonics
//!
//! The entropy behind a mnemonic is split into shares with Shamir's scheme
//! over integers modulo a number sized to the entropy width. Every share is
//! itself rendered as a valid mnemonic with the same word count as the
//! secret, so shares can be written down and checked like any seed phrase.
//!
//! # Quick Start
//!
//! ```
//! use mnemonic_share::{mnemonic, recover_secret, split_secret};
//! use bip39::Language;
//!
//! let secret = mnemonic::parse(
//!     "legal winner thank year wave sausage worth useful legal winner thank yellow",
//!     Language::English,
//! )
//! .unwrap();
//!
//! // Any 2 of 3 shares recover the secret
//! let shares = split_secret(&secret, 2, 3).unwrap();
//! for share in &shares {
//!     assert_eq!(share.mnemonic.word_count(), 12);
//! }
//!
//! let recovered = recover_secret(&[shares[2].clone(), shares[0].clone()]).unwrap();
//! assert_eq!(recovered, secret);
//! ```

mod codec;
mod config;
mod entropy;
mod error;
mod field;
pub mod mnemonic;
mod modulus;
mod shamir;
mod sharing;
mod verify;

pub use codec::{from_field_element, from_hex, to_field_element, to_hex};
pub use config::{Config, SubsetStrategy};
pub use entropy::{BITS_PER_WORD, Entropy, WORD_COUNTS, entropy_bits, word_count_for_bits};
pub use error::{Result, ShareError};
pub use field::{FieldElement, PrimeField};
pub use modulus::{ModulusPolicy, is_probable_prime, mersenne_modulus, prime_modulus, select_modulus};
pub use shamir::{ShamirShare, ShamirShareBuilder, Share};
pub use sharing::{MnemonicShare, MnemonicSharing, MnemonicSharingBuilder, recover_secret, split_secret};
pub use verify::{
    LengthDeviation, MismatchOutcome, RoundTripReport, SubsetMismatch, verify_round_trip,
    verify_shares,
};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Config, MnemonicShare, MnemonicSharing, ModulusPolicy, Result, ShareError,
        SubsetStrategy, recover_secret, split_secret, verify_round_trip,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use bip39::Language;

    #[test]
    fn test_full_workflow() -> Result<()> {
        // Create a fresh secret
        let secret = mnemonic::generate(24, Language::English)?;

        // Split 3 of 5
        let sharing = MnemonicSharing::builder(5, 3).build()?;
        let shares = sharing.split(&secret)?;
        assert_eq!(shares.len(), 5);

        // Shares travel as text; parse them back as a user would type them
        let typed: Vec<MnemonicShare> = shares
            .iter()
            .map(|share| -> Result<MnemonicShare> {
                Ok(MnemonicShare {
                    index: share.index,
                    mnemonic: mnemonic::parse(
                        &share.mnemonic.to_string().to_uppercase(),
                        Language::English,
                    )?,
                })
            })
            .collect::<Result<_>>()?;

        let recovered = MnemonicSharing::recover(&typed[1..4])?;
        assert_eq!(recovered.to_string(), secret.to_string());

        Ok(())
    }

    #[test]
    fn test_with_config() -> Result<()> {
        let config = Config::new()
            .with_modulus(ModulusPolicy::Prime)
            .with_subset_strategy(SubsetStrategy::Cyclic)
            .with_max_checked_subsets(100)?;

        let secret = mnemonic::generate(18, Language::English)?;
        let sharing = MnemonicSharing::builder(6, 4).with_config(config.clone()).build()?;
        let shares = sharing.split(&secret)?;

        let picked = vec![
            shares[5].clone(),
            shares[0].clone(),
            shares[3].clone(),
            shares[2].clone(),
        ];
        let recovered = MnemonicSharing::recover_with_config(&picked, &config)?;
        assert_eq!(recovered, secret);

        Ok(())
    }

    #[test]
    fn test_error_handling() {
        let secret = mnemonic::generate(12, Language::English).unwrap();

        assert!(matches!(
            split_secret(&secret, 4, 3),
            Err(ShareError::ThresholdOutOfRange { .. })
        ));

        let shares = split_secret(&secret, 2, 3).unwrap();
        assert!(matches!(
            recover_secret(&shares[0..1]),
            Err(ShareError::InsufficientShares { got: 1 })
        ));
    }
}

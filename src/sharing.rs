use bip39::Mnemonic;
use serde::{Deserialize, Serialize};

use crate::codec::{from_field_element, to_field_element};
use crate::config::Config;
use crate::entropy::entropy_bits;
use crate::error::{Result, ShareError};
use crate::field::PrimeField;
use crate::mnemonic;
use crate::modulus::select_modulus;
use crate::shamir::{ShamirShare, Share};
use crate::verify::verify_shares;

/// A share rendered as a BIP39 mnemonic of the same length as the secret
///
/// The index must be recorded alongside the words; without it the share is
/// useless.
///
/// # Example
/// ```
/// use mnemonic_share::{MnemonicShare, split_secret};
/// use bip39::Mnemonic;
///
/// let secret: Mnemonic = "abandon abandon abandon abandon abandon abandon \
///                         abandon abandon abandon abandon abandon about"
///     .parse()
///     .unwrap();
/// let shares: Vec<MnemonicShare> = split_secret(&secret, 2, 3).unwrap();
///
/// assert_eq!(shares[2].index, 3);
/// assert_eq!(shares[2].mnemonic.word_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicShare {
    /// Share number, starting at 1
    pub index: u8,
    /// Share value as a mnemonic
    #[serde(with = "phrase")]
    pub mnemonic: Mnemonic,
}

impl std::fmt::Display for MnemonicShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}) {}", self.index, self.mnemonic)
    }
}

mod phrase {
    use bip39::Mnemonic;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(mnemonic: &Mnemonic, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(mnemonic)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mnemonic, D::Error> {
        let phrase = String::deserialize(deserializer)?;
        Mnemonic::parse_normalized(&phrase).map_err(D::Error::custom)
    }
}

/// Splits mnemonics into mnemonic shares and recovers them
///
/// # Example
/// ```
/// use mnemonic_share::{Config, MnemonicSharing, ModulusPolicy, mnemonic};
/// use bip39::Language;
///
/// let secret = mnemonic::generate(24, Language::English).unwrap();
/// let sharing = MnemonicSharing::builder(5, 3)
///     .with_config(Config::new().with_modulus(ModulusPolicy::Prime))
///     .build()
///     .unwrap();
///
/// let shares = sharing.split(&secret).unwrap();
/// let recovered = MnemonicSharing::recover(&shares[2..5]).unwrap();
/// assert_eq!(recovered, secret);
/// ```
#[derive(Debug, Clone)]
pub struct MnemonicSharing {
    scheme: ShamirShare,
    config: Config,
}

/// Builder for [`MnemonicSharing`]
#[derive(Debug)]
pub struct MnemonicSharingBuilder {
    total_shares: u8,
    threshold: u8,
    config: Config,
}

impl MnemonicSharingBuilder {
    pub fn new(total_shares: u8, threshold: u8) -> Self {
        Self {
            total_shares,
            threshold,
            config: Config::default(),
        }
    }

    /// Sets a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builds the instance with validation
    ///
    /// # Errors
    /// Returns `ShareError::ThresholdOutOfRange` unless
    /// `2 <= threshold <= total_shares`, or `ShareError::InvalidConfig`.
    pub fn build(self) -> Result<MnemonicSharing> {
        let scheme = ShamirShare::builder(self.total_shares, self.threshold).build()?;
        self.config.validate()?;
        Ok(MnemonicSharing {
            scheme,
            config: self.config,
        })
    }
}

impl MnemonicSharing {
    pub fn builder(total_shares: u8, threshold: u8) -> MnemonicSharingBuilder {
        MnemonicSharingBuilder::new(total_shares, threshold)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn threshold(&self) -> u8 {
        self.scheme.threshold()
    }

    pub fn total_shares(&self) -> u8 {
        self.scheme.total_shares()
    }

    /// Splits the entropy of `secret` into mnemonic shares
    ///
    /// Shares use the wordlist of `secret`. With `Config::self_check` enabled
    /// the fresh shares are recovered from the configured subsets first, and
    /// nothing is returned unless every subset yields `secret` again.
    ///
    /// Under the default `ModulusPolicy::Prime` the modulus is the largest
    /// prime below 2^b, so the few secrets in `[p, 2^b)` cannot be shared.
    /// The all-ones phrase `zoo zoo ... wrong` is one of them.
    ///
    /// # Errors
    /// - `ShareError::SecretOutOfRange` if the entropy is not below the modulus
    /// - `ShareError::SelfCheckFailed` if the round-trip check fails
    pub fn split(&self, secret: &Mnemonic) -> Result<Vec<MnemonicShare>> {
        let shares = self.split_unchecked(secret)?;

        if self.config.self_check {
            let report = verify_shares(secret, &shares, self.threshold(), &self.config)?;
            if !report.is_consistent() {
                tracing::warn!(
                    threshold = self.threshold(),
                    total_shares = self.total_shares(),
                    "sharing::self_check_failed"
                );
                return Err(ShareError::SelfCheckFailed(report.summary()));
            }
        }

        Ok(shares)
    }

    pub(crate) fn split_unchecked(&self, secret: &Mnemonic) -> Result<Vec<MnemonicShare>> {
        let bits = entropy_bits(secret.word_count())?;
        let entropy = mnemonic::decode(secret)?;
        let language = secret.language();
        let field = PrimeField::new(select_modulus(bits, self.config.modulus)?);

        tracing::debug!(
            bits,
            threshold = self.threshold(),
            total_shares = self.total_shares(),
            modulus = ?self.config.modulus,
            "sharing::split"
        );

        let shares = self.scheme.split(&to_field_element(&entropy), &field)?;
        shares
            .iter()
            .map(|share| -> Result<MnemonicShare> {
                let entropy = from_field_element(&share.value, bits)?;
                Ok(MnemonicShare {
                    index: share.index,
                    mnemonic: mnemonic::encode(&entropy, language)?,
                })
            })
            .collect()
    }

    /// Recovers the secret mnemonic using the default configuration
    pub fn recover(shares: &[MnemonicShare]) -> Result<Mnemonic> {
        Self::recover_with_config(shares, &Config::default())
    }

    /// Recovers the secret mnemonic from at least `threshold` shares
    ///
    /// The modulus policy must match the one used for splitting. The secret
    /// is rendered in the wordlist of the first share.
    ///
    /// # Errors
    /// - `ShareError::InsufficientShares` for fewer than two shares
    /// - `ShareError::MismatchedEntropyLength` if share lengths differ
    /// - `ShareError::InvalidShareIndex` / `ShareError::DuplicateShareIndex`
    /// - `ShareError::ShareOutOfRange` if a share does not belong to the field
    pub fn recover_with_config(shares: &[MnemonicShare], config: &Config) -> Result<Mnemonic> {
        config.validate()?;
        let first = shares
            .first()
            .ok_or(ShareError::InsufficientShares { got: 0 })?;
        if shares.len() < 2 {
            return Err(ShareError::InsufficientShares { got: shares.len() });
        }

        let bits = entropy_bits(first.mnemonic.word_count())?;
        for share in shares {
            let found = entropy_bits(share.mnemonic.word_count())?;
            if found != bits {
                return Err(ShareError::MismatchedEntropyLength {
                    expected: bits,
                    found,
                });
            }
        }

        let field = PrimeField::new(select_modulus(bits, config.modulus)?);
        let points = shares
            .iter()
            .map(|share| -> Result<Share> {
                Ok(Share {
                    index: share.index,
                    value: to_field_element(&mnemonic::decode(&share.mnemonic)?),
                })
            })
            .collect::<Result<Vec<Share>>>()?;

        tracing::debug!(
            bits,
            shares = shares.len(),
            modulus = ?config.modulus,
            "sharing::recover"
        );

        let secret = ShamirShare::reconstruct(&points, &field)?;
        let entropy = from_field_element(&secret, bits)?;
        mnemonic::encode(&entropy, first.mnemonic.language())
    }
}

/// Splits `secret` into `total_shares` mnemonic shares, any `threshold` of
/// which recover it. Uses the default configuration.
///
/// The default modulus is the largest prime below 2^b, where b is the
/// entropy width. Secrets at or above it are refused, which covers the top
/// 159, 47, 237, 63 and 189 values for 12, 15, 18, 21 and 24 words.
///
/// ```
/// use mnemonic_share::{ShareError, mnemonic, split_secret};
/// use bip39::Language;
///
/// let all_ones = mnemonic::parse(
///     "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
///     Language::English,
/// )
/// .unwrap();
/// assert_eq!(
///     split_secret(&all_ones, 2, 3),
///     Err(ShareError::SecretOutOfRange { bits: 128 })
/// );
/// ```
///
/// # Errors
/// - `ShareError::ThresholdOutOfRange` unless `2 <= threshold <= total_shares`
/// - `ShareError::SecretOutOfRange` if the entropy is not below the modulus
/// - `ShareError::SelfCheckFailed` if the round-trip check fails
pub fn split_secret(secret: &Mnemonic, threshold: u8, total_shares: u8) -> Result<Vec<MnemonicShare>> {
    MnemonicSharing::builder(total_shares, threshold)
        .build()?
        .split(secret)
}

/// Recovers a secret mnemonic from shares made by [`split_secret`]
pub fn recover_secret(shares: &[MnemonicShare]) -> Result<Mnemonic> {
    MnemonicSharing::recover(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::ModulusPolicy;
    use bip39::Language;

    const ZERO_12: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    fn zero_24() -> Mnemonic {
        let entropy = crate::entropy::Entropy::from_bytes(vec![0u8; 32]).unwrap();
        mnemonic::encode(&entropy, Language::English).unwrap()
    }

    #[test]
    fn test_split_and_recover_pairs() {
        let secret = mnemonic::parse(ZERO_12, Language::English).unwrap();
        let shares = split_secret(&secret, 2, 3).unwrap();

        let indices: Vec<u8> = shares.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);

        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            let pair = vec![shares[a].clone(), shares[b].clone()];
            let recovered = recover_secret(&pair).unwrap();
            assert_eq!(recovered.to_string(), ZERO_12.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }

    #[test]
    fn test_share_lengths_match_secret() {
        for words in crate::entropy::WORD_COUNTS {
            let secret = mnemonic::generate(words, Language::English).unwrap();
            let shares = split_secret(&secret, 3, 5).unwrap();
            assert!(shares.iter().all(|s| s.mnemonic.word_count() == words));
        }
    }

    #[test]
    fn test_all_zero_entropy() {
        let secret = zero_24();
        let shares = split_secret(&secret, 2, 3).unwrap();
        let recovered = recover_secret(&shares[1..3]).unwrap();
        assert_eq!(recovered.to_entropy(), vec![0u8; 32]);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let secret = zero_24();
        assert_eq!(
            split_secret(&secret, 1, 3),
            Err(ShareError::ThresholdOutOfRange {
                threshold: 1,
                total_shares: 3
            })
        );
        assert_eq!(
            split_secret(&secret, 4, 3),
            Err(ShareError::ThresholdOutOfRange {
                threshold: 4,
                total_shares: 3
            })
        );
    }

    #[test]
    fn test_recover_needs_two_shares() {
        let secret = zero_24();
        let shares = split_secret(&secret, 2, 3).unwrap();
        assert_eq!(
            recover_secret(&shares[0..1]),
            Err(ShareError::InsufficientShares { got: 1 })
        );
        assert_eq!(
            recover_secret(&[]),
            Err(ShareError::InsufficientShares { got: 0 })
        );
    }

    #[test]
    fn test_recover_rejects_mixed_lengths() {
        let long = split_secret(&zero_24(), 2, 3).unwrap();
        let short_secret = mnemonic::parse(ZERO_12, Language::English).unwrap();
        let short = split_secret(&short_secret, 2, 3).unwrap();

        let mixed = vec![long[0].clone(), short[1].clone()];
        assert_eq!(
            recover_secret(&mixed),
            Err(ShareError::MismatchedEntropyLength {
                expected: 256,
                found: 128
            })
        );
    }

    #[test]
    fn test_recover_rejects_duplicate_index() {
        let shares = split_secret(&zero_24(), 2, 3).unwrap();
        let mut duplicate = shares[1].clone();
        duplicate.index = shares[0].index;
        assert_eq!(
            recover_secret(&[shares[0].clone(), duplicate]),
            Err(ShareError::DuplicateShareIndex(1))
        );
    }

    #[test]
    fn test_mersenne_policy_round_trip() {
        let config = Config::new().with_modulus(ModulusPolicy::Mersenne);
        let sharing = MnemonicSharing::builder(3, 2)
            .with_config(config.clone())
            .build()
            .unwrap();
        let secret = mnemonic::generate(12, Language::English).unwrap();
        let shares = sharing.split(&secret).unwrap();

        let recovered = MnemonicSharing::recover_with_config(&shares[0..2], &config).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_mersenne_policy_fails_self_check_on_composite_gap() {
        // indices 1 and 4 differ by 3, a factor of 2^b - 1
        let config = Config::new().with_modulus(ModulusPolicy::Mersenne);
        let sharing = MnemonicSharing::builder(4, 2)
            .with_config(config)
            .build()
            .unwrap();
        let secret = mnemonic::generate(12, Language::English).unwrap();
        assert!(matches!(
            sharing.split(&secret),
            Err(ShareError::SelfCheckFailed(_))
        ));
    }

    #[test]
    fn test_all_ones_secret_rejected_under_mersenne_policy() {
        let entropy = crate::entropy::Entropy::from_bytes(vec![0xFF; 16]).unwrap();
        let secret = mnemonic::encode(&entropy, Language::English).unwrap();
        let sharing = MnemonicSharing::builder(3, 2)
            .with_config(Config::new().with_modulus(ModulusPolicy::Mersenne))
            .build()
            .unwrap();
        assert_eq!(
            sharing.split(&secret),
            Err(ShareError::SecretOutOfRange { bits: 128 })
        );
    }

    #[test]
    fn test_mersenne_recovers_hand_evaluated_line() {
        // f(x) = s + a*x mod 2^128 - 1 with
        // s = 0x0123456789abcdeffedcba9876543210
        // a = 0xf0e1d2c3b4a5968778695a4b3c2d1e0f
        let share = |index: u8, hex: &str| MnemonicShare {
            index,
            mnemonic: mnemonic::encode(&crate::codec::from_hex(hex, 128).unwrap(), Language::English)
                .unwrap(),
        };
        let shares = vec![
            share(1, "f205182b3e516477774614e3b281501f"),
            share(3, "d3c8bdb2a79c91866818c97a2adb8c3f"),
        ];

        let config = Config::new().with_modulus(ModulusPolicy::Mersenne);
        let recovered = MnemonicSharing::recover_with_config(&shares, &config).unwrap();
        assert_eq!(
            crate::codec::to_hex(&mnemonic::decode(&recovered).unwrap()),
            "0123456789abcdeffedcba9876543210"
        );
    }

    #[test]
    fn test_all_ones_secret_rejected_under_prime_policy() {
        let secret = mnemonic::parse(
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            Language::English,
        )
        .unwrap();
        assert_eq!(
            split_secret(&secret, 2, 3),
            Err(ShareError::SecretOutOfRange { bits: 128 })
        );
    }

    #[test]
    fn test_shares_keep_secret_language() {
        let secret = mnemonic::generate(12, Language::Spanish).unwrap();
        let shares = split_secret(&secret, 2, 3).unwrap();
        assert!(
            shares
                .iter()
                .all(|share| share.mnemonic.language() == Language::Spanish)
        );

        let recovered = recover_secret(&shares[1..3]).unwrap();
        assert_eq!(recovered.language(), Language::Spanish);
        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_share_serde() {
        let shares = split_secret(&zero_24(), 2, 2).unwrap();
        let json = serde_json::to_string(&shares[0]).unwrap();
        assert!(json.starts_with("{\"index\":1,\"mnemonic\":\""));

        let back: MnemonicShare = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shares[0]);
    }

    #[test]
    fn test_share_display() {
        let shares = split_secret(&zero_24(), 2, 2).unwrap();
        let rendered = shares[1].to_string();
        assert!(rendered.starts_with("2) "));
        assert_eq!(rendered.split_whitespace().count(), 25);
    }
}

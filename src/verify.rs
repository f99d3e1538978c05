//! Round-trip consistency checks for freshly generated share sets.
//!
//! This is a self-check of the split and recover path, run before shares are
//! handed out. It proves nothing cryptographic.

use bip39::Mnemonic;

use crate::config::{Config, SubsetStrategy};
use crate::error::{Result, ShareError};
use crate::sharing::{MnemonicShare, MnemonicSharing};

/// A share whose word count differs from the secret's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDeviation {
    pub index: u8,
    pub word_count: usize,
}

/// What went wrong when recovering from a subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchOutcome {
    /// Recovery succeeded but produced a different phrase
    Different(Mnemonic),
    /// Recovery failed outright
    Failed(ShareError),
}

/// The first subset that did not recover the secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetMismatch {
    /// Share indices in the subset
    pub indices: Vec<u8>,
    pub outcome: MismatchOutcome,
}

/// Result of a round-trip check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Word count of the secret
    pub word_count: usize,
    pub threshold: u8,
    pub total_shares: u8,
    /// Subsets recovered before the check stopped
    pub checked_subsets: usize,
    pub length_deviations: Vec<LengthDeviation>,
    pub first_mismatch: Option<SubsetMismatch>,
}

impl RoundTripReport {
    /// True when every share has the secret's length and every checked
    /// subset recovered the secret
    pub fn is_consistent(&self) -> bool {
        self.length_deviations.is_empty() && self.first_mismatch.is_none()
    }

    /// One-line description that never contains phrases
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for deviation in &self.length_deviations {
            parts.push(format!(
                "share {} has {} words, expected {}",
                deviation.index, deviation.word_count, self.word_count
            ));
        }
        if let Some(mismatch) = &self.first_mismatch {
            let reason = match &mismatch.outcome {
                MismatchOutcome::Different(_) => "a different secret".to_string(),
                MismatchOutcome::Failed(e) => e.to_string(),
            };
            parts.push(format!("shares {:?} recovered {}", mismatch.indices, reason));
        }
        if parts.is_empty() {
            format!(
                "{} of {} subsets consistent",
                self.checked_subsets, self.checked_subsets
            )
        } else {
            parts.join("; ")
        }
    }
}

/// Splits `secret` and checks the resulting share set
///
/// # Example
/// ```
/// use mnemonic_share::{Config, mnemonic, verify_round_trip};
/// use bip39::Language;
///
/// let secret = mnemonic::generate(15, Language::English).unwrap();
/// let report = verify_round_trip(&secret, 3, 5, &Config::default()).unwrap();
///
/// assert!(report.is_consistent());
/// assert_eq!(report.checked_subsets, 10);
/// ```
pub fn verify_round_trip(
    secret: &Mnemonic,
    threshold: u8,
    total_shares: u8,
    config: &Config,
) -> Result<RoundTripReport> {
    let sharing = MnemonicSharing::builder(total_shares, threshold)
        .with_config(config.clone())
        .build()?;
    let shares = sharing.split_unchecked(secret)?;
    verify_shares(secret, &shares, threshold, config)
}

/// Checks an existing share set against the secret it should recover
///
/// Stops at the first subset that fails to recover `secret`, or once
/// `config.max_checked_subsets` subsets have been recovered.
pub fn verify_shares(
    secret: &Mnemonic,
    shares: &[MnemonicShare],
    threshold: u8,
    config: &Config,
) -> Result<RoundTripReport> {
    let total_shares =
        u8::try_from(shares.len()).map_err(|_| ShareError::TooManyShares(shares.len()))?;
    if threshold < 2 || threshold > total_shares {
        return Err(ShareError::ThresholdOutOfRange {
            threshold,
            total_shares,
        });
    }
    config.validate()?;

    let word_count = secret.word_count();
    let mut report = RoundTripReport {
        word_count,
        threshold,
        total_shares,
        checked_subsets: 0,
        length_deviations: shares
            .iter()
            .filter(|share| share.mnemonic.word_count() != word_count)
            .map(|share| LengthDeviation {
                index: share.index,
                word_count: share.mnemonic.word_count(),
            })
            .collect(),
        first_mismatch: None,
    };

    let subsets = subsets(shares.len(), threshold as usize, config.subset_strategy);
    for positions in subsets.take(config.max_checked_subsets) {
        let subset: Vec<MnemonicShare> = positions.iter().map(|&p| shares[p].clone()).collect();
        report.checked_subsets += 1;

        let outcome = match MnemonicSharing::recover_with_config(&subset, config) {
            Ok(recovered) if recovered == *secret => continue,
            Ok(recovered) => MismatchOutcome::Different(recovered),
            Err(e) => MismatchOutcome::Failed(e),
        };
        report.first_mismatch = Some(SubsetMismatch {
            indices: subset.iter().map(|share| share.index).collect(),
            outcome,
        });
        break;
    }

    tracing::debug!(
        threshold,
        total_shares,
        checked_subsets = report.checked_subsets,
        consistent = report.is_consistent(),
        "verify::round_trip"
    );
    Ok(report)
}

fn subsets(n: usize, k: usize, strategy: SubsetStrategy) -> Box<dyn Iterator<Item = Vec<usize>>> {
    match strategy {
        SubsetStrategy::Exhaustive => Box::new(Combinations::new(n, k)),
        SubsetStrategy::Cyclic => {
            Box::new((0..n).map(move |start| (0..k).map(|offset| (start + offset) % n).collect()))
        }
    }
}

/// k-subsets of `0..n` in lexicographic order
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        // rightmost position that can still move right
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

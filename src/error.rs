use thiserror::Error;

/// Error type for mnemonic secret sharing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// Word count is not one of 12, 15, 18, 21 or 24
    #[error("Invalid mnemonic word count {0}")]
    InvalidWordCount(usize),

    /// Entropy bit-length does not correspond to a standard mnemonic length
    #[error("Invalid entropy length of {0} bits")]
    InvalidEntropyLength(usize),

    /// Mnemonic failed BIP39 validation (unknown word, bad checksum, bad length)
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),

    /// Threshold must satisfy 2 <= threshold <= total_shares
    #[error("Threshold {threshold} out of range for {total_shares} total shares")]
    ThresholdOutOfRange { threshold: u8, total_shares: u8 },

    /// Two shares in one set carry the same index
    #[error("Duplicate share index {0}")]
    DuplicateShareIndex(u8),

    /// Share indices are evaluation points and must be nonzero
    #[error("Invalid share index {0}")]
    InvalidShareIndex(u8),

    /// Fewer than two shares supplied for reconstruction
    #[error("Need at least 2 shares, got {got}")]
    InsufficientShares { got: usize },

    /// Shares of different entropy bit-lengths were combined
    #[error("Share entropy length {found} bits does not match {expected} bits")]
    MismatchedEntropyLength { expected: usize, found: usize },

    /// Hex text is not an even run of hex digits
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Share sets are indexed by u8, so at most 255 shares fit in one set
    #[error("Too many shares: {0}")]
    TooManyShares(usize),

    /// Field value does not fit in the expected entropy width
    #[error("Value needs {value_bits} bits but entropy width is {bits} bits")]
    WidthOverflow { bits: usize, value_bits: u64 },

    /// Secret is not a member of the sharing field
    #[error("Secret does not fit in the {bits}-bit sharing field")]
    SecretOutOfRange { bits: usize },

    /// Share value is not a member of the sharing field
    #[error("Share {index} value is outside the sharing field")]
    ShareOutOfRange { index: u8 },

    /// Interpolation denominator has no inverse modulo a composite modulus
    #[error("Share indices {0} and {1} cannot be interpolated in this field")]
    NonInvertible(u8, u8),

    /// The operating system random source failed
    #[error("Random source error: {0}")]
    RandomSource(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Freshly generated shares did not round-trip
    #[error("Share self-check failed: {0}")]
    SelfCheckFailed(String),
}

pub type Result<T> = std::result::Result<T, ShareError>;

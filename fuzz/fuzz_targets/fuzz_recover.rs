#![no_main]

use libfuzzer_sys::fuzz_target;
use mnemonic_share::{Config, MnemonicShare, MnemonicSharing, ModulusPolicy};

// Builds arbitrary share sets from raw bytes and feeds them to recovery.
//
// Covered inputs: zero and duplicate indices, mixed word counts, share
// values at or above the modulus, and composite-modulus gaps. Recovery must
// return Ok or Err and never panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let policy = if data[0] & 1 == 0 {
        ModulusPolicy::Prime
    } else {
        ModulusPolicy::Mersenne
    };
    let count = (data[1] % 12) as usize;
    let mut offset = 2;

    let mut shares = Vec::new();
    for _ in 0..count {
        if offset + 2 > data.len() {
            break;
        }
        let index = data[offset];
        let width = [16, 20, 24, 28, 32][(data[offset + 1] % 5) as usize];
        offset += 2;

        let mut entropy = vec![0u8; width];
        for (i, byte) in entropy.iter_mut().enumerate() {
            *byte = data.get(offset + i).copied().unwrap_or(0);
        }
        offset += width;

        if let Ok(mnemonic) = bip39::Mnemonic::from_entropy(&entropy) {
            shares.push(MnemonicShare { index, mnemonic });
        }
    }

    let config = Config::new().with_modulus(policy);
    let _result = MnemonicSharing::recover_with_config(&shares, &config);

    if shares.len() >= 2 {
        let duplicated = vec![shares[0].clone(), shares[0].clone()];
        let _result = MnemonicSharing::recover_with_config(&duplicated, &config);
    }
});

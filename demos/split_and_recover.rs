use bip39::Language;
use mnemonic_share::{Config, MnemonicSharing, mnemonic, verify_round_trip};
use tracing_subscriber::EnvFilter;

fn main() -> mnemonic_share::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Mnemonic Share Demo ===\n");

    let secret = mnemonic::generate(24, Language::English)?;
    println!("Secret ({} words):\n{}\n", secret.word_count(), secret);

    let sharing = MnemonicSharing::builder(5, 3).build()?;
    let shares = sharing.split(&secret)?;
    println!("Any 3 of these 5 shares recover the secret:\n");
    for share in &shares {
        println!("{}\n", share);
    }

    let picked = [shares[4].clone(), shares[1].clone(), shares[2].clone()];
    let recovered = MnemonicSharing::recover(&picked)?;
    println!(
        "Recovered from shares {:?}: {}",
        picked.iter().map(|s| s.index).collect::<Vec<_>>(),
        recovered == secret
    );

    let report = verify_round_trip(&secret, 3, 5, &Config::default())?;
    println!("Round-trip check: {}", report.summary());

    Ok(())
}

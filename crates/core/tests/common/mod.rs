//! Shared test utilities for token and envelope integration tests
#![allow(dead_code)]

use signet::envelope::EnvelopeCipher;
use signet::token::TokenSigner;

/// Install a tracing subscriber once so `RUST_LOG` controls test output
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Set up a signer with a freshly generated key pair
pub fn setup_signer() -> TokenSigner {
    init_logging();
    TokenSigner::generate().unwrap()
}

/// Set up a cipher with a freshly generated key pair
pub fn setup_cipher() -> EnvelopeCipher {
    init_logging();
    EnvelopeCipher::generate().unwrap()
}

//! Hybrid encryption envelopes
//!
//! An envelope is two dot-separated base64url (no padding) segments,
//! key-ciphertext first:
//!
//! ```text
//! <base64url(RSA-OAEP(payload key))>.<base64url(nonce || ciphertext || tag)>
//! ```
//!
//! # Scheme
//!
//! To seal a payload:
//! 1. **Generate a payload key**: a fresh 256-bit [`Secret`](crate::crypto::Secret)
//! 2. **Seal the payload**: AES-256-GCM under that key with a fresh random nonce
//! 3. **Wrap the key**: RSA-OAEP (SHA-256) under the component public key
//!
//! Opening reverses the steps: unwrap the payload key with the private key,
//! then open the payload with it. The payload key exists only for the
//! duration of one call on each side; it is never stored.
//!
//! Because both the payload key and the nonce are fresh per call, sealing the
//! same plaintext twice produces envelopes that differ in both segments.

mod cipher;

pub use cipher::{EnvelopeCipher, EnvelopeError};

/**
 * Cryptographic types and operations.
 *  - RSA-2048 key pair implementations
 *  - Single-use symmetric payload keys
 */
pub mod crypto;
/**
 * Hybrid encryption envelopes: each payload is
 *  sealed under a fresh symmetric key, which is
 *  wrapped under the component's public key.
 */
pub mod envelope;
/**
 * Signed token construction and verification.
 *  Three-segment tokens in the RS256 JWT layout.
 */
pub mod token;

pub mod prelude {
    pub use crate::crypto::{PublicKey, Secret, SecretKey};
    pub use crate::envelope::{EnvelopeCipher, EnvelopeError};
    pub use crate::token::{Claims, Header, TokenError, TokenSigner};
}

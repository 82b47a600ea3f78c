//! Signed token construction and verification
//!
//! A token is three dot-separated base64url (no padding) segments:
//!
//! ```text
//! <base64url(header JSON)>.<base64url(claims JSON)>.<base64url(signature)>
//! ```
//!
//! The header is the constant [`Header::rs256`] object, the claims carry
//! issuer, subject, and expiry ([`Claims`]), and the signature is RS256 over
//! the UTF-8 bytes of `header_b64.payload_b64`. [`TokenSigner`] holds the
//! RSA-2048 key pair and exposes the sign/verify surface.
//!
//! # Verification Contract
//!
//! [`TokenSigner::verify`] fails closed: wrong segment count, invalid
//! base64url, and signature mismatch all collapse to `false`, so a caller
//! can never distinguish malformed input from a forged signature.
//! Expiry is deliberately not checked there; [`Claims::is_expired`] exists
//! for callers that want it.

mod claims;
mod signer;

pub use claims::{Claims, Header, ISSUER, TOKEN_TTL_SECS};
pub use signer::{TokenError, TokenSigner};

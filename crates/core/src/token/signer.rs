use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::crypto::{KeyError, PublicKey, SecretKey};

use super::claims::{Claims, Header};

/// Errors from fail-hard token operations
///
/// [`TokenSigner::verify`] never returns these: it collapses every failure
/// into a bare `false` instead.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The input string is structurally invalid (segment count, base64url, JSON)
    #[error("malformed token input: {0}")]
    MalformedInput(String),
    /// The underlying cryptographic provider failed
    #[error("crypto provider error: {0}")]
    CryptoProvider(anyhow::Error),
}

impl From<KeyError> for TokenError {
    fn from(err: KeyError) -> Self {
        TokenError::CryptoProvider(err.into())
    }
}

/// Signs and verifies three-segment tokens with a fixed RSA-2048 key pair
///
/// The key pair is generated (or injected) once at construction and never
/// mutated afterwards, so a signer can be shared read-only across concurrent
/// callers, e.g. behind an `Arc`, by a transport layer.
///
/// # Examples
///
/// ```ignore
/// let signer = TokenSigner::generate()?;
/// let token = signer.sign("alice")?;
/// assert!(signer.verify(&token));
/// ```
#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: SecretKey,
    public: PublicKey,
}

impl TokenSigner {
    /// Build a signer around a pre-generated key pair
    pub fn new(secret: SecretKey) -> Self {
        let public = secret.public();
        TokenSigner { secret, public }
    }

    /// Generate a fresh RSA-2048 key pair and build a signer around it
    pub fn generate() -> Result<Self, KeyError> {
        let secret = SecretKey::generate()?;
        tracing::debug!("generated token signing key pair");
        Ok(Self::new(secret))
    }

    /// The public half of the signing key pair, exportable for sharing
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Build a signed token for a subject.
    ///
    /// The token is `header.payload.signature`: the constant RS256 header
    /// and the claims (expiring [`TOKEN_TTL_SECS`](super::TOKEN_TTL_SECS)
    /// seconds from now) as base64url JSON, then the RS256 signature over
    /// the UTF-8 bytes of `header_b64.payload_b64`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::CryptoProvider`] if the signing provider fails.
    pub fn sign(&self, subject: &str) -> Result<String, TokenError> {
        let header = serde_json::to_string(&Header::rs256())
            .map_err(|e| TokenError::CryptoProvider(e.into()))?;
        let payload = serde_json::to_string(&Claims::new(subject))
            .map_err(|e| TokenError::CryptoProvider(e.into()))?;

        let header_b64 = URL_SAFE_NO_PAD.encode(header.as_bytes());
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload.as_bytes());

        let message = format!("{header_b64}.{payload_b64}");
        let signature = self.secret.sign(message.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);

        Ok(format!("{message}.{signature_b64}"))
    }

    /// Check a token's structure and signature.
    ///
    /// Fails closed: wrong segment count, invalid base64url in any segment,
    /// or a signature that does not match `header.payload` under this key
    /// pair all collapse to `false`. This method never errors or panics, and
    /// callers cannot distinguish malformed input from a forged signature.
    ///
    /// Expiry is NOT checked: a token whose `exp` has passed still verifies.
    /// Use [`Claims::is_expired`] when token lifetime matters.
    pub fn verify(&self, token: &str) -> bool {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return false;
        }

        // Every segment must be valid base64url, though only the signature
        // bytes feed the check itself.
        if URL_SAFE_NO_PAD.decode(parts[0]).is_err() || URL_SAFE_NO_PAD.decode(parts[1]).is_err() {
            return false;
        }
        let signature = match URL_SAFE_NO_PAD.decode(parts[2]) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let message = format!("{}.{}", parts[0], parts[1]);
        self.public.verify(message.as_bytes(), &signature).is_ok()
    }
}

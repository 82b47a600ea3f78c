use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::crypto::{KeyError, PublicKey, Secret, SecretError, SecretKey};

/// Errors from envelope operations
///
/// Both operations fail hard: the first error encountered is propagated to
/// the caller, with no retries and no partial results.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The input string is structurally invalid (segment count, base64url, UTF-8)
    #[error("malformed envelope input: {0}")]
    MalformedInput(String),
    /// The underlying cryptographic provider failed
    #[error("crypto provider error: {0}")]
    CryptoProvider(anyhow::Error),
}

impl From<KeyError> for EnvelopeError {
    fn from(err: KeyError) -> Self {
        EnvelopeError::CryptoProvider(err.into())
    }
}

impl From<SecretError> for EnvelopeError {
    fn from(err: SecretError) -> Self {
        EnvelopeError::CryptoProvider(err.into())
    }
}

/// Seals and opens hybrid envelopes with a fixed RSA-2048 key pair
///
/// Each `encrypt` call generates a fresh payload [`Secret`], seals the
/// plaintext with it, and wraps the key bytes under the component public key;
/// `decrypt` recovers the payload key transiently and discards it. The key
/// pair itself is immutable after construction, so a cipher can be shared
/// read-only across concurrent callers.
///
/// # Examples
///
/// ```ignore
/// let cipher = EnvelopeCipher::generate()?;
/// let envelope = cipher.encrypt("opaque payload")?;
/// assert_eq!(cipher.decrypt(&envelope)?, "opaque payload");
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeCipher {
    secret: SecretKey,
    public: PublicKey,
}

impl EnvelopeCipher {
    /// Build a cipher around a pre-generated key pair
    pub fn new(secret: SecretKey) -> Self {
        let public = secret.public();
        EnvelopeCipher { secret, public }
    }

    /// Generate a fresh RSA-2048 key pair and build a cipher around it
    pub fn generate() -> Result<Self, KeyError> {
        let secret = SecretKey::generate()?;
        tracing::debug!("generated envelope key pair");
        Ok(Self::new(secret))
    }

    /// The public half of the envelope key pair, exportable for sharing
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Seal a plaintext into a two-segment envelope.
    ///
    /// Generates a fresh 256-bit payload key, seals the UTF-8 plaintext with
    /// AES-256-GCM, wraps the key under the component public key with
    /// RSA-OAEP (SHA-256), and returns both ciphertexts base64url-encoded
    /// and dot-joined, key first.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::CryptoProvider`] if key generation, payload
    /// encryption, or key wrapping fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, EnvelopeError> {
        let payload_key = Secret::generate()?;
        let sealed_payload = payload_key.encrypt(plaintext.as_bytes())?;
        let wrapped_key = self.public.wrap_key(payload_key.bytes())?;

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(wrapped_key),
            URL_SAFE_NO_PAD.encode(sealed_payload)
        ))
    }

    /// Open a two-segment envelope back into its plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MalformedInput`] if the envelope does not
    /// have exactly two segments, either segment is not valid base64url, or
    /// the recovered payload is not UTF-8.
    ///
    /// Returns [`EnvelopeError::CryptoProvider`] if key unwrapping, key
    /// reconstruction, or payload decryption fails. Envelopes sealed for a
    /// different key pair land here rather than yielding garbage.
    pub fn decrypt(&self, envelope: &str) -> Result<String, EnvelopeError> {
        let parts: Vec<&str> = envelope.split('.').collect();
        if parts.len() != 2 {
            return Err(EnvelopeError::MalformedInput(format!(
                "expected 2 envelope segments, got {}",
                parts.len()
            )));
        }

        let wrapped_key = URL_SAFE_NO_PAD.decode(parts[0]).map_err(|_| {
            EnvelopeError::MalformedInput("key segment is not valid base64url".into())
        })?;
        let sealed_payload = URL_SAFE_NO_PAD.decode(parts[1]).map_err(|_| {
            EnvelopeError::MalformedInput("payload segment is not valid base64url".into())
        })?;

        let key_bytes = self.secret.unwrap_key(&wrapped_key)?;
        let payload_key = Secret::from_slice(&key_bytes)?;
        let plaintext = payload_key.decrypt(&sealed_payload)?;

        String::from_utf8(plaintext)
            .map_err(|_| EnvelopeError::MalformedInput("payload is not valid UTF-8".into()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let cipher = EnvelopeCipher::generate().unwrap();
        let envelope = cipher.encrypt("hello world").unwrap();
        assert_eq!(cipher.decrypt(&envelope).unwrap(), "hello world");
    }

    #[test]
    fn test_envelope_has_two_segments() {
        let cipher = EnvelopeCipher::generate().unwrap();
        let envelope = cipher.encrypt("payload").unwrap();

        let parts: Vec<&str> = envelope.split('.').collect();
        assert_eq!(parts.len(), 2);

        // The key segment is a full RSA-2048 block
        let wrapped_key = URL_SAFE_NO_PAD.decode(parts[0]).unwrap();
        assert_eq!(wrapped_key.len(), 256);
    }

    #[test]
    fn test_decrypt_rejects_wrong_segment_count() {
        let cipher = EnvelopeCipher::generate().unwrap();

        for input in ["", "one-segment", "a.b.c", "a.b.c.d"] {
            assert!(matches!(
                cipher.decrypt(input),
                Err(EnvelopeError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn test_decrypt_rejects_bad_base64() {
        let cipher = EnvelopeCipher::generate().unwrap();
        assert!(matches!(
            cipher.decrypt("!!!.???"),
            Err(EnvelopeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_injected_key_pair() {
        let secret = SecretKey::generate().unwrap();
        let cipher = EnvelopeCipher::new(secret.clone());
        let envelope = cipher.encrypt("shared pair").unwrap();

        let twin = EnvelopeCipher::new(secret);
        assert_eq!(twin.decrypt(&envelope).unwrap(), "shared pair");
    }
}

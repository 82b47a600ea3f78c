//! Payload encryption using AES-256-GCM
//!
//! This module provides symmetric encryption for envelope payloads. Each
//! envelope gets its own `Secret` key, generated for a single encrypt call:
//! the key travels alongside the ciphertext only in RSA-wrapped form and is
//! recovered transiently on decryption.

use std::ops::Deref;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

/// Size of AES-GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of AES-256-GCM key in bytes (256 bits)
pub const SECRET_SIZE: usize = 32;

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret error: {0}")]
    Default(#[from] anyhow::Error),
}

/// A 256-bit symmetric encryption key for payload encryption
///
/// Each `Secret` encrypts a single payload using AES-256-GCM AEAD.
/// The encrypted format is: `nonce (12 bytes) || ciphertext || auth_tag (16 bytes)`.
/// A fresh random nonce is generated per encryption, so encrypting the same
/// plaintext twice under the same key produces different ciphertexts.
///
/// # Examples
///
/// ```ignore
/// // Generate a new random secret
/// let secret = Secret::generate()?;
///
/// // Encrypt data
/// let plaintext = b"sensitive data";
/// let ciphertext = secret.encrypt(plaintext)?;
///
/// // Decrypt data
/// let recovered = secret.decrypt(&ciphertext)?;
/// assert_eq!(plaintext, &recovered[..]);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Secret([u8; SECRET_SIZE]);

impl Deref for Secret {
    type Target = [u8; SECRET_SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; SECRET_SIZE]> for Secret {
    fn from(bytes: [u8; SECRET_SIZE]) -> Self {
        Secret(bytes)
    }
}

impl Secret {
    /// Generate a new random secret using a cryptographically secure RNG
    ///
    /// # Errors
    ///
    /// Returns an error if the system RNG fails.
    pub fn generate() -> Result<Self, SecretError> {
        let mut buff = [0; SECRET_SIZE];
        getrandom::getrandom(&mut buff)
            .map_err(|e| anyhow::anyhow!("failed to generate random bytes: {}", e))?;
        Ok(Self(buff))
    }

    /// Create a secret from a byte slice
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly `SECRET_SIZE` bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, SecretError> {
        if data.len() != SECRET_SIZE {
            return Err(anyhow::anyhow!(
                "invalid secret size, expected {}, got {}",
                SECRET_SIZE,
                data.len()
            )
            .into());
        }
        let mut buff = [0; SECRET_SIZE];
        buff.copy_from_slice(data);
        Ok(buff.into())
    }

    /// Get a reference to the secret key bytes
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Encrypt data using AES-256-GCM
    ///
    /// The output format is: `nonce (12 bytes) || ciphertext || auth_tag (16 bytes)`.
    /// A random nonce is generated for each encryption operation.
    ///
    /// # Errors
    ///
    /// Returns an error if nonce generation or encryption fails (should be
    /// rare, only on system RNG failure).
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        let key = Key::<Aes256Gcm>::from_slice(self.bytes());
        let cipher = Aes256Gcm::new(key);

        // Generate random nonce
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| anyhow::anyhow!("failed to generate nonce: {}", e))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, data)
            .map_err(|_| anyhow::anyhow!("encrypt error"))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(nonce.as_ref());
        out.extend_from_slice(ciphertext.as_ref());

        Ok(out)
    }

    /// Decrypt data using AES-256-GCM
    ///
    /// Expects input in the format: `nonce (12 bytes) || ciphertext || auth_tag (16 bytes)`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data is too short to contain a nonce
    /// - Authentication tag verification fails (data was tampered with or wrong key)
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        if data.len() < NONCE_SIZE {
            return Err(anyhow::anyhow!("data too short for nonce").into());
        }

        let key = Key::<Aes256Gcm>::from_slice(self.bytes());
        let nonce = Nonce::from_slice(&data[..NONCE_SIZE]);
        let cipher = Aes256Gcm::new(key);
        let plaintext = cipher
            .decrypt(nonce, &data[NONCE_SIZE..])
            .map_err(|_| anyhow::anyhow!("decrypt error"))?;

        Ok(plaintext)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_secret_encrypt_decrypt() {
        let secret = Secret::generate().unwrap();
        let data = b"hello world, this is a test message for encryption";

        let encrypted = secret.encrypt(data).unwrap();
        let decrypted = secret.decrypt(&encrypted).unwrap();

        assert_eq!(data.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_secret_size_validation() {
        let too_short = [1u8; 16];
        let too_long = [1u8; 64];

        assert!(Secret::from_slice(&too_short).is_err());
        assert!(Secret::from_slice(&too_long).is_err());

        let just_right = [1u8; SECRET_SIZE];
        assert!(Secret::from_slice(&just_right).is_ok());
    }

    #[test]
    fn test_fresh_nonce_per_encryption() {
        let secret = Secret::generate().unwrap();
        let data = b"same plaintext";

        let first = secret.encrypt(data).unwrap();
        let second = secret.encrypt(data).unwrap();

        // Random nonce per call: same key + plaintext never repeats ciphertext
        assert_ne!(first, second);
        assert_eq!(secret.decrypt(&first).unwrap(), data.to_vec());
        assert_eq!(secret.decrypt(&second).unwrap(), data.to_vec());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let secret = Secret::generate().unwrap();
        let data = b"test data for integrity check";

        let mut encrypted = secret.encrypt(data).unwrap();

        // Corrupt a byte in the ciphertext region; authentication must fail
        encrypted[NONCE_SIZE + 2] ^= 0xFF;
        assert!(secret.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let secret = Secret::generate().unwrap();
        let other = Secret::generate().unwrap();

        let encrypted = secret.encrypt(b"for the first key only").unwrap();
        assert!(other.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_empty_data_encryption() {
        let secret = Secret::generate().unwrap();
        let data = b"";

        let encrypted = secret.encrypt(data).unwrap();
        let decrypted = secret.decrypt(&encrypted).unwrap();

        assert_eq!(decrypted, data.to_vec());
    }

    #[test]
    fn test_truncated_input_fails() {
        let secret = Secret::generate().unwrap();

        // Shorter than a nonce
        assert!(secret.decrypt(&[0u8; NONCE_SIZE - 1]).is_err());
        // Nonce only, no ciphertext or tag
        assert!(secret.decrypt(&[0u8; NONCE_SIZE]).is_err());
    }
}

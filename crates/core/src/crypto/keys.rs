use std::ops::Deref;

use rand::rngs::OsRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};

/// RSA modulus size in bits for generated key pairs
pub const KEY_BITS: usize = 2048;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public half of an RSA-2048 key pair
///
/// A thin wrapper around the `rsa` crate's `RsaPublicKey`. The public key
/// serves two purposes:
/// - **Signature verification**: checks RS256 signatures produced by the
///   matching [`SecretKey`]
/// - **Key wrapping**: encrypts fresh payload keys under RSA-OAEP so that
///   only the holder of the matching [`SecretKey`] can recover them
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate()?;
/// let public_key = secret_key.public();
///
/// // Serialize to SPKI PEM for sharing
/// let pem = public_key.to_pem()?;
/// let recovered = PublicKey::from_pem(&pem)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl Deref for PublicKey {
    type Target = RsaPublicKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        PublicKey(key)
    }
}

impl From<PublicKey> for RsaPublicKey {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl PublicKey {
    /// Parse a public key from SPKI PEM
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| anyhow::anyhow!("failed to parse public key PEM: {}", e))?;
        Ok(PublicKey(key))
    }

    /// Encode the public key as SPKI PEM for sharing
    pub fn to_pem(&self) -> Result<String, KeyError> {
        let pem = self
            .0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| anyhow::anyhow!("failed to encode public key PEM: {}", e))?;
        Ok(pem)
    }

    /// Verify an RS256 signature on a message.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The signature bytes are malformed
    /// - The signature does not match the message under this key
    pub fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<(), KeyError> {
        let verifying_key = VerifyingKey::<Sha256>::new(self.0.clone());
        let signature = Signature::try_from(signature)
            .map_err(|_| anyhow::anyhow!("malformed signature bytes"))?;
        verifying_key
            .verify(msg, &signature)
            .map_err(|_| anyhow::anyhow!("signature verification failed"))?;
        Ok(())
    }

    /// Encrypt a key under this public key with OAEP (SHA-256 hash, MGF1-SHA-256 mask)
    ///
    /// The input must fit in a single RSA-2048 OAEP block (at most 190 bytes);
    /// payload keys are 32 bytes, well within the bound.
    pub fn wrap_key(&self, key: &[u8]) -> Result<Vec<u8>, KeyError> {
        let mut rng = OsRng;
        let wrapped = self
            .0
            .encrypt(&mut rng, Oaep::new::<Sha256>(), key)
            .map_err(|e| anyhow::anyhow!("OAEP encrypt error: {}", e))?;
        Ok(wrapped)
    }
}

/// Private half of an RSA-2048 key pair
///
/// A thin wrapper around the `rsa` crate's `RsaPrivateKey`, generated once at
/// component construction and held immutably for the process lifetime.
///
/// # Security Considerations
///
/// - Never share this key; only the derived [`PublicKey`] is exportable
/// - Each component owns its own pair; pairs are not shared between the
///   token signer and the envelope cipher
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate()?;
/// let signature = secret_key.sign(b"header.payload")?;
/// assert!(secret_key.public().verify(b"header.payload", &signature).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SecretKey(RsaPrivateKey);

impl Deref for SecretKey {
    type Target = RsaPrivateKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RsaPrivateKey> for SecretKey {
    fn from(key: RsaPrivateKey) -> Self {
        SecretKey(key)
    }
}

impl SecretKey {
    /// Generate a new 2048-bit RSA key pair using a cryptographically secure RNG
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying provider fails to produce a key.
    pub fn generate() -> Result<Self, KeyError> {
        let mut rng = OsRng;
        let key = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|e| anyhow::anyhow!("RSA key generation error: {}", e))?;
        Ok(SecretKey(key))
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(RsaPublicKey::from(&self.0))
    }

    /// Sign a message with RS256 (RSASSA-PKCS1-v1_5 over SHA-256)
    ///
    /// Returns the raw signature bytes, 256 bytes for a 2048-bit key.
    pub fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, KeyError> {
        let signing_key = SigningKey::<Sha256>::new(self.0.clone());
        let signature = signing_key
            .try_sign(msg)
            .map_err(|e| anyhow::anyhow!("RS256 signing error: {}", e))?;
        Ok(signature.to_bytes().into_vec())
    }

    /// Decrypt an OAEP-wrapped key with this private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the ciphertext was not produced under the matching
    /// public key (the padding check fails) or is otherwise malformed.
    pub fn unwrap_key(&self, wrapped: &[u8]) -> Result<Vec<u8>, KeyError> {
        let key = self
            .0
            .decrypt(Oaep::new::<Sha256>(), wrapped)
            .map_err(|e| anyhow::anyhow!("OAEP decrypt error: {}", e))?;
        Ok(key)
    }
}

//! Cryptographic primitives for Signet
//!
//! This module provides the two key types the components are built on:
//!
//! - **Asymmetric keys**: RSA-2048 pairs ([`SecretKey`]/[`PublicKey`]) used to
//!   sign tokens (RS256) and to wrap payload keys (OAEP with SHA-256)
//! - **Payload keys**: 256-bit symmetric [`Secret`]s used to encrypt envelope
//!   payloads with AES-256-GCM
//!
//! # Key Model
//!
//! Each component ([`TokenSigner`](crate::token::TokenSigner),
//! [`EnvelopeCipher`](crate::envelope::EnvelopeCipher)) owns one key pair,
//! generated at construction and held immutably for the process lifetime.
//! The private key never leaves its component; the public key is exportable
//! as SPKI PEM for sharing.
//!
//! A [`Secret`] has a much shorter life: one is generated per envelope
//! encryption, travels only in RSA-wrapped form, and is recovered transiently
//! on decryption.

mod keys;
mod secret;

pub use keys::{KeyError, PublicKey, SecretKey, KEY_BITS};
pub use secret::{Secret, SecretError, NONCE_SIZE, SECRET_SIZE};

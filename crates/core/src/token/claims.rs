//! Token wire bodies
//!
//! [`Header`] and [`Claims`] serialize to the exact JSON bytes that make up
//! the first two token segments. Field order is fixed by declaration order,
//! so re-serializing a parsed body reproduces the signed bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::signer::TokenError;

/// Issuer embedded in every token payload
pub const ISSUER: &str = "MyApp";
/// Token lifetime in seconds, from issuance to the `exp` claim
pub const TOKEN_TTL_SECS: i64 = 600;

/// The fixed token header: `{"alg":"RS256","typ":"JWT"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Header {
    /// The constant header carried by every token
    pub fn rs256() -> Self {
        Header {
            alg: "RS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Token payload claims
///
/// The JSON layout is `{"iss":...,"sub":...,"exp":...}` with `exp` in Unix
/// seconds. [`TokenSigner::verify`](super::TokenSigner::verify) checks the
/// signature over these bytes but never the expiry; the [`Claims::is_expired`]
/// and [`Claims::expires_in`] helpers give callers that check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, always [`ISSUER`]
    pub iss: String,
    /// Subject (user identifier)
    pub sub: String,
    /// Expiry as Unix seconds
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, expiring [`TOKEN_TTL_SECS`] from now
    pub fn new(subject: &str) -> Self {
        Claims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        }
    }

    /// Extract the claims from a token WITHOUT verifying its signature.
    ///
    /// This parses the payload segment only. Pair with
    /// [`TokenSigner::verify`](super::TokenSigner::verify) before trusting
    /// the contents.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MalformedInput`] if the token does not have
    /// exactly three segments, the payload segment is not valid base64url,
    /// or the decoded payload is not valid claims JSON.
    pub fn from_token(token: &str) -> Result<Self, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::MalformedInput(format!(
                "expected 3 token segments, got {}",
                parts.len()
            )));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| TokenError::MalformedInput("payload is not valid base64url".into()))?;
        let claims = serde_json::from_slice(&payload)
            .map_err(|_| TokenError::MalformedInput("payload is not valid claims JSON".into()))?;

        Ok(claims)
    }

    /// Whether the expiry timestamp is in the past
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Seconds until expiry, clamped to zero for already-expired claims
    pub fn expires_in(&self) -> i64 {
        self.exp.saturating_sub(Utc::now().timestamp()).max(0)
    }
}

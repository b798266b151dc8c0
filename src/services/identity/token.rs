use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::identity::provider::PrincipalAttributes;

// Errors returned by identity-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or invalid 'aud' claim")]
    MissingOrInvalidAud,
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        // Typical: aud is a string
        serde_json::Value::String(s) => !s.trim().is_empty(),
        // Also valid: aud is an array of strings
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Identity token (JWT) claims.
///
/// NOTE:
/// - `aud` can be either string or array; jsonwebtoken validates it via `Validation::set_audience`.
/// - the username/groups claims accept the names used by common hosted user pools.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub nbf: Option<u64>,

    #[serde(default, alias = "username", alias = "cognito:username")]
    pub preferred_username: Option<String>,

    #[serde(default, alias = "cognito:groups")]
    pub groups: Vec<String>,
}

impl From<IdentityClaims> for PrincipalAttributes {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            username: claims.preferred_username,
            groups: claims.groups,
        }
    }
}

/// EdDSA (Ed25519) identity-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, TokenError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `nbf`,
    /// `iss` and `aud`. This additionally rejects empty `iss`/`sub`/`aud`.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let claims =
            jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.iss.trim().is_empty() {
            return Err(TokenError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(TokenError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(TokenError::MissingOrInvalidAud);
        }

        Ok(claims)
    }
}

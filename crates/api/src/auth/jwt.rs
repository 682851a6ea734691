//! Access-token validation.
//!
//! Tokens are minted by the external identity provider and verified here
//! against its HS256 signing secret. This service never issues tokens.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims consumed from the provider's access tokens.
///
/// Only the subject and expiry matter to this service; any other claims the
/// provider includes are ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id.
    pub sub: Uuid,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Validate a token against the provider's signing secret and return its
/// claims.
///
/// Fails on bad signatures, expired tokens, malformed tokens, and subjects
/// that are not UUIDs.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret";

    fn sign(secret: &str, sub: Uuid, exp: i64) -> String {
        encode(
            &Header::default(),
            &Claims { sub, exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_roundtrip() {
        let sub = Uuid::new_v4();
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = sign(SECRET, sub, exp);

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn expired_token_is_rejected() {
        use assert_matches::assert_matches;
        use jsonwebtoken::errors::ErrorKind;

        // Well past the default 60s leeway.
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(SECRET, Uuid::new_v4(), exp);

        let err = validate_token(&token, SECRET).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        use assert_matches::assert_matches;
        use jsonwebtoken::errors::ErrorKind;

        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = sign("some-other-secret", Uuid::new_v4(), exp);

        let err = validate_token(&token, SECRET).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_token("not-a-jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
        assert!(validate_token("a.b.c", SECRET).is_err());
    }
}

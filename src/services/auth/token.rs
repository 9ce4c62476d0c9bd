use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why a presented token could not be turned into [`Claims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed, tampered, or signed with something other than our secret/algorithm.
    #[error("invalid token signature or encoding")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token could not be verified")]
    Unverifiable,
}

impl From<&ErrorKind> for TokenError {
    fn from(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::InvalidSignature,
            _ => TokenError::Unverifiable,
        }
    }
}

/// Why a token could not be minted.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("token expiry is outside the representable time range")]
    ExpiryOutOfRange,
    #[error(transparent)]
    Encode(#[from] jsonwebtoken::errors::Error),
}

// Wire format of the access token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Verified token payload, promoted to application types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub subject_id: Uuid,
    pub issued_at: DateTime<Utc>,
}

/// HS256 access-token codec over one shared secret.
///
/// - The secret is passed in at construction; nothing is read from the environment here.
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a token for `subject_id`, valid for `ttl` from `issued_at`.
    pub fn sign(
        &self,
        subject_id: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, SignError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(SignError::ExpiryOutOfRange)?;
        let claims = AccessTokenClaims {
            sub: subject_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    /// Check signature and expiry, then convert the payload.
    ///
    /// A subject that is not a UUID, or an `iat` outside chrono's range, is `Unverifiable`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| TokenError::from(e.kind()))?;

        let subject_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Unverifiable)?;
        let issued_at =
            DateTime::from_timestamp(data.claims.iat, 0).ok_or(TokenError::Unverifiable)?;

        Ok(Claims {
            subject_id,
            issued_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"unit-test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 0)
    }

    fn encode_raw(payload: serde_json::Value, alg: Algorithm, secret: &[u8]) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            &payload,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn verify_returns_subject_and_issue_time() {
        let subject = Uuid::new_v4();
        let issued_at = DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();
        let token = codec().sign(subject, issued_at, Duration::hours(1)).unwrap();

        let claims = codec().verify(&token).unwrap();
        assert_eq!(claims.subject_id, subject);
        assert_eq!(claims.issued_at, issued_at);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let issued_at = Utc::now() - Duration::hours(2);
        let token = codec()
            .sign(Uuid::new_v4(), issued_at, Duration::hours(1))
            .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let issued_at = Utc::now() - Duration::seconds(70);
        let token = codec()
            .sign(Uuid::new_v4(), issued_at, Duration::seconds(60))
            .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
        assert!(TokenCodec::new(SECRET, 300).verify(&token).is_ok());
    }

    #[test]
    fn token_from_another_secret_is_invalid_signature() {
        let other = TokenCodec::new(b"another-secret", 0);
        let token = other
            .sign(Uuid::new_v4(), Utc::now(), Duration::hours(1))
            .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_invalid_signature() {
        assert_eq!(codec().verify("not-a-jwt"), Err(TokenError::InvalidSignature));
        assert_eq!(codec().verify("a.b.c"), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_is_invalid_signature() {
        let token = codec()
            .sign(Uuid::new_v4(), Utc::now(), Duration::hours(1))
            .unwrap();
        let forged = encode_raw(
            json!({ "sub": Uuid::new_v4().to_string(), "iat": 0, "exp": 4_102_444_800i64 }),
            Algorithm::HS256,
            b"attacker",
        );
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;

        assert_eq!(
            codec().verify(&parts.join(".")),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn other_algorithm_is_invalid_signature() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode_raw(
            json!({ "sub": Uuid::new_v4().to_string(), "iat": Utc::now().timestamp(), "exp": exp }),
            Algorithm::HS384,
            SECRET,
        );

        assert_eq!(codec().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn missing_issue_time_is_invalid_signature() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode_raw(
            json!({ "sub": Uuid::new_v4().to_string(), "exp": exp }),
            Algorithm::HS256,
            SECRET,
        );

        assert_eq!(codec().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn non_uuid_subject_is_unverifiable() {
        let now = Utc::now().timestamp();
        let token = encode_raw(
            json!({ "sub": "507f1f77bcf86cd799439011", "iat": now, "exp": now + 3600 }),
            Algorithm::HS256,
            SECRET,
        );

        assert_eq!(codec().verify(&token), Err(TokenError::Unverifiable));
    }

    #[test]
    fn sign_rejects_expiry_past_the_time_range() {
        let result = codec().sign(Uuid::new_v4(), DateTime::<Utc>::MAX_UTC, Duration::hours(1));

        assert!(matches!(result, Err(SignError::ExpiryOutOfRange)));
    }

    #[test]
    fn debug_output_hides_keys() {
        let printed = format!("{:?}", codec());
        assert!(printed.contains("TokenCodec"));
        assert!(!printed.contains("unit-test-secret"));
    }
}

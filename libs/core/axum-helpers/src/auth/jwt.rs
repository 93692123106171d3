use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JwtClaims {
    /// Username
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl JwtClaims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            ttl_minutes = config.access_token_ttl_minutes,
            "JWT auth initialized"
        );
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_ttl: Duration::minutes(config.access_token_ttl_minutes),
        }
    }

    /// Lifetime of issued access tokens, in seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    pub fn create_access_token(&self, subject: &str, role: &str) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_token_ttl).timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature and expiry, and require an access token
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<JwtClaims>(token, &self.decoding_key, &validation)?.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            eyre::bail!("unexpected token type: {}", claims.token_type);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    #[test]
    fn test_issue_and_verify() {
        let auth = auth();
        let token = auth.create_access_token("alice", "admin").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.is_admin());
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = auth().create_access_token("alice", "user").unwrap();
        let other = JwtAuth::new(
            &JwtConfig::new("another-secret-that-is-also-long-enough").unwrap(),
        );
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = JwtConfig::new(SECRET)
            .unwrap()
            .with_access_token_ttl_minutes(-5);
        let auth = JwtAuth::new(&config);
        let token = auth.create_access_token("alice", "user").unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_non_access_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: "alice".into(),
            role: "user".into(),
            iat: now,
            exp: now + 600,
            token_type: "refresh".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(auth().verify_token("not.a.token").is_err());
    }
}

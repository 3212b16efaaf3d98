//! Access-token verification. Tokens are issued by the external identity
//! provider; this service only validates the HS256 signature and expiry
//! against the shared secret.

use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "postgres://unused".into(),
            db_max_connections: 20,
            host: "127.0.0.1".into(),
            port: 8080,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: secret.into(),
            claude_api_key: String::new(),
            claude_model: "claude-sonnet-4-20250514".into(),
            insight_cache_max_entries: 16,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trips() {
        let config = test_config("secret");
        let user_id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: user_id,
                email: "a@b.c".into(),
                exp: now + 900,
                iat: now,
            },
            "secret",
        );

        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config("secret");
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: Uuid::new_v4(),
                email: String::new(),
                exp: now - 3600,
                iat: now - 7200,
            },
            "secret",
        );

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config("secret");
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: Uuid::new_v4(),
                email: String::new(),
                exp: now + 900,
                iat: now,
            },
            "other-secret",
        );

        assert!(verify_token(&token, &config).is_err());
    }
}

//! HS256 JSON Web Token implementation of the `TokenIssuer` port.
//!
//! Expiry is checked against the injected [`Clock`] rather than the system
//! time so tests can move time forward deterministically.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, Email, TokenClaims, TokenTtl};

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    secret: Arc<Zeroizing<Vec<u8>>>,
    ttl: TokenTtl,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Create an issuer; the secret must not be empty.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        ttl: TokenTtl,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(TokenError::signing("token secret must not be empty"));
        }
        Ok(Self {
            secret: Arc::new(secret),
            ttl,
            clock,
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, email: &Email) -> Result<AccessToken, TokenError> {
        let iat = self.clock.utc().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| TokenError::signing("token lifetime out of range"))?;
        let claims = TokenClaims {
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(AccessToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )
        .map_err(|err| TokenError::invalid(err.to_string()))?;
        if data.claims.is_expired_at(self.clock.utc().timestamp()) {
            return Err(TokenError::expired());
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn issuer_at(secret: &str, now: DateTime<Utc>) -> JwtTokenIssuer {
        let ttl: TokenTtl = "1h".parse().expect("valid ttl");
        JwtTokenIssuer::new(secret, ttl, Arc::new(FixtureClock { utc_now: now }))
            .expect("valid issuer")
    }

    #[fixture]
    fn email() -> Email {
        Email::new("ada@example.org").expect("fixture email")
    }

    #[rstest]
    fn issued_tokens_carry_email_claim(email: Email) {
        let issuer = issuer_at("secret", issued_at());
        let token = issuer.issue(&email).expect("token issued");

        let claims = issuer.verify(token.as_str()).expect("token verifies");
        assert_eq!(claims.email, "ada@example.org");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[rstest]
    #[case(Duration::minutes(59), true)]
    #[case(Duration::minutes(60), false)]
    #[case(Duration::days(1), false)]
    fn tokens_expire_after_ttl(email: Email, #[case] elapsed: Duration, #[case] valid: bool) {
        let token = issuer_at("secret", issued_at())
            .issue(&email)
            .expect("token issued");

        let result = issuer_at("secret", issued_at() + elapsed).verify(token.as_str());
        match (valid, result) {
            (true, Ok(_)) => {}
            (false, Err(err)) => assert_eq!(err, TokenError::Expired),
            (expected, actual) => panic!("expected valid={expected}, got {actual:?}"),
        }
    }

    #[rstest]
    fn foreign_signatures_are_rejected(email: Email) {
        let token = issuer_at("other-secret", issued_at())
            .issue(&email)
            .expect("token issued");

        let err = issuer_at("secret", issued_at())
            .verify(token.as_str())
            .expect_err("signature mismatch");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    #[case("Bearer abc")]
    fn malformed_tokens_are_rejected(#[case] token: &str) {
        let err = issuer_at("secret", issued_at())
            .verify(token)
            .expect_err("malformed token");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[rstest]
    fn empty_secrets_are_refused() {
        let result = JwtTokenIssuer::new(
            Vec::new(),
            TokenTtl::default(),
            Arc::new(FixtureClock {
                utc_now: issued_at(),
            }),
        );
        assert!(result.is_err());
    }
}

//! Process configuration loaded via OrthoConfig.
//!
//! Every value can be supplied as a `FEEDFORWARD_*` environment variable or
//! the matching CLI flag. Unset values fall back to the defaults below.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{TokenTtl, TokenTtlParseError};
use crate::outbound::mongo::DEFAULT_DATABASE;

const DEFAULT_CORS_ORIGIN: &str = "https://ashik-feed-forward-foundation.netlify.app";

const DEFAULT_CATEGORIES_FILE: &str = "category.json";

/// Category list next to the working directory the service starts in.
fn default_categories_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATEGORIES_FILE)
}

/// Start-up settings for the HTTP server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEEDFORWARD")]
pub struct AppSettings {
    /// MongoDB connection string; in-memory storage is used when absent.
    pub mongodb_uri: Option<String>,
    /// Database holding the `users`, `supply`, `posts`, `volunteer` and
    /// `review` collections.
    pub database: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Token lifetime such as `12h` or `7d`.
    pub token_ttl: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// JSON file listing the donation categories.
    pub categories_path: Option<PathBuf>,
    /// Browser origins allowed by CORS, comma separated in the environment.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppSettings {
    /// Database name, `food_donation` unless overridden.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Signing secret, ignoring blank values.
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
    }

    /// Parse the configured token lifetime, defaulting to seven days.
    pub fn token_ttl(&self) -> Result<TokenTtl, TokenTtlParseError> {
        self.token_ttl
            .as_deref()
            .map_or(Ok(TokenTtl::DEFAULT), str::parse::<TokenTtl>)
    }

    /// Listen on every interface at the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Category list location, `category.json` in the working directory by default.
    pub fn categories_path(&self) -> PathBuf {
        self.categories_path
            .clone()
            .unwrap_or_else(default_categories_path)
    }

    /// Allowed origins with surrounding whitespace and empty items removed.
    ///
    /// Falls back to the hosted frontend when none are configured.
    pub fn cors_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() {
            vec![DEFAULT_CORS_ORIGIN.to_owned()]
        } else {
            origins
        }
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("mongodb_uri", &self.mongodb_uri.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl", &self.token_ttl)
            .field("port", &self.port)
            .field("categories_path", &self.categories_path)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "FEEDFORWARD_MONGODB_URI",
        "FEEDFORWARD_DATABASE",
        "FEEDFORWARD_JWT_SECRET",
        "FEEDFORWARD_TOKEN_TTL",
        "FEEDFORWARD_PORT",
        "FEEDFORWARD_CATEGORIES_PATH",
        "FEEDFORWARD_CORS_ORIGINS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("feedforward")]).expect("config should load")
    }

    fn cleared_except(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|&name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_owned());
                (name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared_except(&[]));

        let settings = load_from_empty_args();
        assert!(settings.mongodb_uri.is_none());
        assert!(settings.jwt_secret().is_none());
        assert_eq!(settings.database(), "food_donation");
        assert_eq!(settings.token_ttl(), Ok(TokenTtl::DEFAULT));
        assert_eq!(settings.bind_addr().port(), 5000);
        assert_eq!(settings.categories_path(), PathBuf::from("category.json"));
        assert_eq!(settings.cors_origins(), vec![DEFAULT_CORS_ORIGIN.to_owned()]);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("FEEDFORWARD_MONGODB_URI", "mongodb://db:27017"),
            ("FEEDFORWARD_DATABASE", "staging"),
            ("FEEDFORWARD_JWT_SECRET", "s3cret"),
            ("FEEDFORWARD_TOKEN_TTL", "12h"),
            ("FEEDFORWARD_PORT", "8080"),
            ("FEEDFORWARD_CATEGORIES_PATH", "/etc/feedforward/category.json"),
            (
                "FEEDFORWARD_CORS_ORIGINS",
                "https://a.example, ,http://localhost:5173",
            ),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.mongodb_uri.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(settings.database(), "staging");
        assert_eq!(settings.jwt_secret(), Some("s3cret"));
        assert_eq!(settings.token_ttl().map(|ttl| ttl.as_secs()), Ok(43_200));
        assert_eq!(settings.bind_addr().port(), 8080);
        assert_eq!(
            settings.categories_path(),
            PathBuf::from("/etc/feedforward/category.json")
        );
        assert_eq!(
            settings.cors_origins(),
            vec![
                "https://a.example".to_owned(),
                "http://localhost:5173".to_owned()
            ]
        );
    }

    #[rstest]
    #[case("http://localhost:5173", &["http://localhost:5173"])]
    #[case("https://a.example,https://b.example", &["https://a.example", "https://b.example"])]
    fn origins_accept_one_or_many(#[case] raw: &str, #[case] expected: &[&str]) {
        let _guard = lock_env(cleared_except(&[("FEEDFORWARD_CORS_ORIGINS", raw)]));

        assert_eq!(load_from_empty_args().cors_origins(), expected);
    }

    #[rstest]
    fn blank_secrets_count_as_missing() {
        let _guard = lock_env(cleared_except(&[("FEEDFORWARD_JWT_SECRET", "   ")]));

        assert!(load_from_empty_args().jwt_secret().is_none());
    }

    #[rstest]
    fn malformed_lifetimes_are_reported() {
        let _guard = lock_env(cleared_except(&[("FEEDFORWARD_TOKEN_TTL", "soon")]));

        assert!(matches!(
            load_from_empty_args().token_ttl(),
            Err(TokenTtlParseError::Malformed(_))
        ));
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let _guard = lock_env(cleared_except(&[
            ("FEEDFORWARD_JWT_SECRET", "s3cret"),
            ("FEEDFORWARD_MONGODB_URI", "mongodb://user:pw@db"),
        ]));

        let rendered = format!("{:?}", load_from_empty_args());
        assert!(!rendered.contains("s3cret"), "{rendered}");
        assert!(!rendered.contains("pw@db"), "{rendered}");
    }
}

use std::collections::HashMap;

use hrdesk_core::AppError;

use super::{ApiConfig, DEVELOPMENT_JWT_SECRET, LegacyAuthScheme};

const STRONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();

    ApiConfig::from_source(false, |name| values.get(name).cloned())
}

#[test]
fn production_requires_jwt_secret() {
    let result = load(&[("DATABASE_URL", "postgres://localhost/hrdesk")]);

    assert!(matches!(
        result,
        Err(AppError::Validation(ref message)) if message.contains("JWT_SECRET")
    ));
}

#[test]
fn production_rejects_short_jwt_secret() {
    let result = load(&[
        ("DATABASE_URL", "postgres://localhost/hrdesk"),
        ("JWT_SECRET", "short"),
    ]);

    assert!(matches!(
        result,
        Err(AppError::Validation(ref message)) if message.contains("32 bytes")
    ));
}

#[test]
fn development_falls_back_to_known_secret_and_memory_store() {
    let Ok(config) = load(&[("APP_ENV", "development")]) else {
        panic!("development config should load");
    };

    assert!(config.development);
    assert_eq!(config.jwt_secret, DEVELOPMENT_JWT_SECRET);
    assert_eq!(config.database_url, None);
}

#[test]
fn defaults_apply_when_optional_values_are_absent() {
    let Ok(config) = load(&[
        ("DATABASE_URL", "postgres://localhost/hrdesk"),
        ("JWT_SECRET", STRONG_SECRET),
    ]) else {
        panic!("config should load");
    };

    assert!(!config.development);
    assert_eq!(config.api_port, 3001);
    assert_eq!(config.database_max_connections, 10);
    assert_eq!(config.jwt_leeway_seconds, 0);
    assert_eq!(config.legacy_auth_scheme, LegacyAuthScheme::Accept);
    assert!(config.role_label_aliases.is_empty());
    assert!(config.socket_address().is_ok());
}

#[test]
fn role_label_aliases_are_parsed() {
    let Ok(config) = load(&[
        ("DATABASE_URL", "postgres://localhost/hrdesk"),
        ("JWT_SECRET", STRONG_SECRET),
        ("ROLE_LABEL_ALIASES", "Administrator=role_admin, People Ops = role_hr ,"),
        ("LEGACY_AUTH_SCHEME", "Reject"),
    ]) else {
        panic!("config should load");
    };

    assert_eq!(
        config.role_label_aliases,
        vec![
            ("Administrator".to_owned(), "role_admin".to_owned()),
            ("People Ops".to_owned(), "role_hr".to_owned()),
        ]
    );
    assert_eq!(config.legacy_auth_scheme, LegacyAuthScheme::Reject);
}

#[test]
fn malformed_values_fail_startup() {
    let base = [
        ("DATABASE_URL", "postgres://localhost/hrdesk"),
        ("JWT_SECRET", STRONG_SECRET),
    ];

    let bad_alias = load(&[base[0], base[1], ("ROLE_LABEL_ALIASES", "Administrator")]);
    assert!(bad_alias.is_err());

    let bad_port = load(&[base[0], base[1], ("API_PORT", "http")]);
    assert!(bad_port.is_err());

    let bad_scheme = load(&[base[0], base[1], ("LEGACY_AUTH_SCHEME", "maybe")]);
    assert!(bad_scheme.is_err());
}

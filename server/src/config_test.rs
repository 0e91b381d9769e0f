use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_applies_defaults() {
    let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/app")])).unwrap();
    assert_eq!(config.database_url, "postgres://localhost/app");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(config.cors_allow_origin, None);
}

#[test]
fn from_lookup_requires_database_url() {
    let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
}

#[test]
fn from_lookup_rejects_blank_database_url() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
}

#[test]
fn from_lookup_parses_overrides() {
    let config = Config::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://db/app"),
        ("PORT", " 8080 "),
        ("DB_MAX_CONNECTIONS", "12"),
        ("CORS_ALLOW_ORIGIN", "http://localhost:5173"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.cors_allow_origin.as_deref(), Some("http://localhost:5173"));
}

#[test]
fn from_lookup_rejects_invalid_port() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/app"), ("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() });
}

#[test]
fn from_lookup_rejects_port_out_of_range() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/app"), ("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
}

#[test]
fn from_lookup_wildcard_cors_means_any() {
    let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/app"), ("CORS_ALLOW_ORIGIN", "*")])).unwrap();
    assert_eq!(config.cors_allow_origin, None);
}

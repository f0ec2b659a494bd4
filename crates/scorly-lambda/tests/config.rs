use std::collections::HashMap;

use scorly_lambda::config::{BackendKind, Config};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn supabase_is_the_default_backend() {
    let config = Config::from_lookup(lookup(&[
        ("SUPABASE_URL", "https://abc.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon"),
    ]))
    .unwrap();

    assert_eq!(config.backend, BackendKind::Supabase);
    assert!(config.jwt_secret.is_none());
    assert!(config.listen_addr.is_none());
    assert!(config.build_state().is_ok());
}

#[test]
fn supabase_backend_requires_url_and_key() {
    let err = Config::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "anon")])).unwrap_err();
    assert!(err.to_string().contains("SUPABASE_URL"));

    let err = Config::from_lookup(lookup(&[("SUPABASE_URL", "https://abc.supabase.co")])).unwrap_err();
    assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
}

#[test]
fn memory_backend_with_local_listener() {
    let config = Config::from_lookup(lookup(&[
        ("SCORLY_BACKEND", "memory"),
        ("SCORLY_LISTEN_ADDR", "127.0.0.1:8787"),
        ("SUPABASE_JWT_SECRET", "local-dev-secret"),
    ]))
    .unwrap();

    assert_eq!(config.backend, BackendKind::Memory);
    assert_eq!(config.listen_addr.unwrap().port(), 8787);
    assert!(config.build_state().is_ok());
}

#[test]
fn bad_values_are_startup_errors() {
    assert!(Config::from_lookup(lookup(&[("SCORLY_BACKEND", "dynamo")])).is_err());
    assert!(
        Config::from_lookup(lookup(&[
            ("SCORLY_BACKEND", "memory"),
            ("SCORLY_LISTEN_ADDR", "not-an-addr"),
        ]))
        .is_err()
    );
}

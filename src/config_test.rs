use super::*;

#[test]
fn default_config_matches_backend_conventions() {
    let config = ClientConfig::default();
    assert_eq!(config.csrf.field_name, "csrf_token");
    assert_eq!(config.csrf.meta_name, "csrf-token");
    assert_eq!(config.csrf.header_name, "x-csrf-token");
    assert_eq!(config.endpoints.login, "/auth/login");
    assert_eq!(config.endpoints.me, "/auth/me");
    assert_eq!(config.body_snippet_chars, DEFAULT_BODY_SNIPPET_CHARS);
}

#[test]
fn empty_object_yields_defaults() {
    let config = ClientConfig::from_json("{}").unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let raw = r#"{
        "csrf": { "header_name": "x-xsrf-token" },
        "endpoints": { "login": "/api/login" },
        "body_snippet_chars": 80
    }"#;
    let config = ClientConfig::from_json(raw).unwrap();
    assert_eq!(config.csrf.header_name, "x-xsrf-token");
    assert_eq!(config.csrf.field_name, "csrf_token");
    assert_eq!(config.endpoints.login, "/api/login");
    assert_eq!(config.endpoints.register, "/auth/register");
    assert_eq!(config.body_snippet_chars, 80);
    assert_eq!(config.messages, Messages::default());
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = ClientConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[test]
fn log_level_parses_known_names() {
    let config = ClientConfig { log_level: "debug".to_owned(), ..ClientConfig::default() };
    assert_eq!(config.log_level(), log::Level::Debug);
    let config = ClientConfig { log_level: " WARN ".to_owned(), ..ClientConfig::default() };
    assert_eq!(config.log_level(), log::Level::Warn);
}

#[test]
fn log_level_falls_back_to_info() {
    let config = ClientConfig { log_level: "loud".to_owned(), ..ClientConfig::default() };
    assert_eq!(config.log_level(), log::Level::Info);
}

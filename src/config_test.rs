use std::collections::HashMap;

use super::*;
use crate::routing::table::RouteTable;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = GuardConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, GuardConfig::default());
    assert_eq!(cfg.token_key, "jwt");
    assert_eq!(cfg.login_path, "/login");
    assert_eq!(cfg.home_path, "/");
    assert_eq!(cfg.log_level, log::Level::Info);
}

#[test]
fn empty_json_object_yields_defaults() {
    assert_eq!(GuardConfig::from_json("{}").unwrap(), GuardConfig::default());
}

// =============================================================
// Overrides
// =============================================================

#[test]
fn lookup_overrides_every_field() {
    let cfg = GuardConfig::from_lookup(lookup_from(&[
        (TOKEN_KEY_VAR, "access_token"),
        (ROLE_KEY_VAR, "user_role"),
        (ADMIN_SENTINEL_VAR, "theatre-admin"),
        (LOGIN_PATH_VAR, "/sign-in"),
        (HOME_PATH_VAR, "/shows"),
        (LOG_LEVEL_VAR, "debug"),
    ]))
    .unwrap();

    assert_eq!(cfg.token_key, "access_token");
    assert_eq!(cfg.role_key, "user_role");
    assert_eq!(cfg.admin_sentinel, "theatre-admin");
    assert_eq!(cfg.login_path, "/sign-in");
    assert_eq!(cfg.home_path, "/shows");
    assert_eq!(cfg.log_level, log::Level::Debug);
}

#[test]
fn json_uses_camel_case_fields() {
    let cfg = GuardConfig::from_json(r#"{"roleKey": "r", "adminSentinel": "ADMIN", "logLevel": "warn"}"#).unwrap();
    assert_eq!(cfg.role_key, "r");
    assert_eq!(cfg.admin_sentinel, "ADMIN");
    assert_eq!(cfg.log_level, log::Level::Warn);
    assert_eq!(cfg.token_key, DEFAULT_TOKEN_KEY);
}

#[test]
fn sentinel_is_not_trimmed() {
    let cfg = GuardConfig::from_lookup(lookup_from(&[(ADMIN_SENTINEL_VAR, " admin ")])).unwrap();
    assert_eq!(cfg.admin_sentinel, " admin ");
}

// =============================================================
// Validation
// =============================================================

#[test]
fn rejects_empty_storage_key() {
    let err = GuardConfig::from_lookup(lookup_from(&[(TOKEN_KEY_VAR, "")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { field: "token_key" });
}

#[test]
fn rejects_empty_sentinel() {
    let err = GuardConfig::from_json(r#"{"adminSentinel": ""}"#).unwrap_err();
    assert_eq!(err, ConfigError::Empty { field: "admin_sentinel" });
}

#[test]
fn rejects_relative_redirect_path() {
    let err = GuardConfig::from_lookup(lookup_from(&[(LOGIN_PATH_VAR, "login")])).unwrap_err();
    assert_eq!(err, ConfigError::RelativePath { field: "login_path", value: "login".to_owned() });
    assert_eq!(err.to_string(), "login_path must be an absolute path starting with '/', got 'login'");
}

#[test]
fn rejects_unknown_log_level() {
    let err = GuardConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
    assert_eq!(err, ConfigError::LogLevel("loud".to_owned()));
}

#[test]
fn rejects_unknown_json_field() {
    let err = GuardConfig::from_json(r#"{"tokenKey": "jwt", "sessionTtl": 30}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(GuardConfig::from_json("{"), Err(ConfigError::Json(_))));
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn default_redirects_are_admissible() {
    assert_eq!(GuardConfig::default().validate_redirects(&RouteTable::booking()), Ok(()));
}

#[test]
fn visitor_page_is_a_valid_login_target() {
    let cfg = GuardConfig { login_path: "/admin-login".to_owned(), ..GuardConfig::default() };
    assert_eq!(cfg.validate_redirects(&RouteTable::booking()), Ok(()));
}

#[test]
fn rejects_login_target_that_requires_a_session() {
    let cfg = GuardConfig { login_path: "/bookings".to_owned(), ..GuardConfig::default() };
    assert_eq!(
        cfg.validate_redirects(&RouteTable::booking()),
        Err(ConfigError::RefusedRedirect { field: "login_path", path: "/bookings".to_owned() })
    );
}

#[test]
fn rejects_login_target_inside_admin_area() {
    let cfg = GuardConfig { login_path: "/admin/theatres".to_owned(), ..GuardConfig::default() };
    assert!(matches!(
        cfg.validate_redirects(&RouteTable::booking()),
        Err(ConfigError::RefusedRedirect { field: "login_path", .. })
    ));
}

#[test]
fn rejects_home_target_with_any_requirement() {
    for path in ["/login", "/bookings", "/admin"] {
        let cfg = GuardConfig { home_path: path.to_owned(), ..GuardConfig::default() };
        assert_eq!(
            cfg.validate_redirects(&RouteTable::booking()),
            Err(ConfigError::RefusedRedirect { field: "home_path", path: path.to_owned() }),
            "{path}"
        );
    }
}

#[test]
fn open_pages_are_valid_home_targets() {
    for path in ["/about", "/shows/12"] {
        let cfg = GuardConfig { home_path: path.to_owned(), ..GuardConfig::default() };
        assert_eq!(cfg.validate_redirects(&RouteTable::booking()), Ok(()), "{path}");
    }
}

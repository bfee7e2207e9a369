use std::time::Duration;

use crate::config::{self, DbConfig};
use crate::error::ServiceError;

fn base_env() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        (config::ENV_SECRET_ARN, Some("arn:aws:secretsmanager:eu-west-2:123456789012:secret:db-creds")),
        (config::ENV_DB_HOST, Some("db.internal")),
        (config::ENV_DB_PORT, Some("5432")),
        (config::ENV_DB_NAME, Some("users")),
        (config::ENV_CONNECT_TIMEOUT, None),
        (config::ENV_ENABLE_RLS, None),
    ]
}

#[test]
fn test_config_loads_from_env() {
    temp_env::with_vars(base_env(), || {
        let config = DbConfig::from_env().expect("config should load");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "users");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    });
}

#[test]
fn test_config_defaults_port_when_unset() {
    let mut env = base_env();
    env[2] = (config::ENV_DB_PORT, None);
    temp_env::with_vars(env, || {
        let config = DbConfig::from_env().unwrap();
        assert_eq!(config.port, 5432);
    });
}

#[test]
fn test_config_rejects_missing_host() {
    let mut env = base_env();
    env[1] = (config::ENV_DB_HOST, None);
    temp_env::with_vars(env, || {
        let err = DbConfig::from_env().unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
        assert_eq!(err.status_code(), 500);
    });
}

#[test]
fn test_config_rejects_blank_host() {
    let mut env = base_env();
    env[1] = (config::ENV_DB_HOST, Some("   "));
    temp_env::with_vars(env, || {
        assert!(matches!(
            DbConfig::from_env(),
            Err(ServiceError::Configuration(_))
        ));
    });
}

#[test]
fn test_config_rejects_invalid_port() {
    for bad_port in ["0", "70000", "not-a-port", "-1"] {
        let mut env = base_env();
        env[2] = (config::ENV_DB_PORT, Some(bad_port));
        temp_env::with_vars(env, || {
            assert!(
                matches!(DbConfig::from_env(), Err(ServiceError::Configuration(_))),
                "port '{}' should be rejected",
                bad_port
            );
        });
    }
}

#[test]
fn test_config_custom_connect_timeout() {
    let mut env = base_env();
    env[4] = (config::ENV_CONNECT_TIMEOUT, Some("30"));
    temp_env::with_vars(env, || {
        let config = DbConfig::from_env().unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    });
}

#[test]
fn test_rls_flag() {
    temp_env::with_var(config::ENV_ENABLE_RLS, Some("TRUE"), || {
        assert!(config::rls_enabled());
    });
    temp_env::with_var(config::ENV_ENABLE_RLS, Some("false"), || {
        assert!(!config::rls_enabled());
    });
    temp_env::with_var(config::ENV_ENABLE_RLS, None::<&str>, || {
        assert!(!config::rls_enabled());
    });
}

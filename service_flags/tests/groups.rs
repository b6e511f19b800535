//! Flag groups loaded from the process environment.

use clap::Command;
use flagbind::ProcessEnv;
use rstest::rstest;
use serial_test::serial;
use service_flags::{
    NsqConfig, PostgresConfig, Prefix, RedisConfig, ServiceError, parse_group,
};

#[test]
#[serial]
fn redis_reads_process_environment() -> anyhow::Result<()> {
    let _scope = test_helpers::env::scope([
        ("REDIS_ADDR", Some("cache.internal:6379")),
        ("REDIS_DB", Some("3")),
        ("REDIS_IDLE_TIMEOUT", None),
    ]);
    let redis: RedisConfig =
        parse_group(Command::new("svc"), ["svc"], &Prefix::none(), &ProcessEnv)?;
    assert_eq!(redis.connection_url(), "redis://cache.internal:6379/3");
    Ok(())
}

#[rstest]
#[case::primary("", "postgresql://app@primary:5432/orders?sslmode=disable")]
#[case::replica("replica", "postgresql://reader@replica:5432/orders?sslmode=disable")]
#[serial]
fn prefixes_select_separate_environments(#[case] prefix: &str, #[case] expected: &str) {
    figment::Jail::expect_with(|jail| {
        jail.set_env("DB_HOST", "primary");
        jail.set_env("DB_USER", "app");
        jail.set_env("DB_NAME", "orders");
        jail.set_env("REPLICA_DB_HOST", "replica");
        jail.set_env("REPLICA_DB_USER", "reader");
        jail.set_env("REPLICA_DB_NAME", "orders");
        let config: PostgresConfig =
            parse_group(Command::new("svc"), ["svc"], &Prefix::new(prefix), &ProcessEnv)
                .map_err(|err| err.to_string())?;
        assert_eq!(config.dsn().map_err(|err| err.to_string())?, expected);
        Ok(())
    });
}

#[test]
#[serial]
fn nsq_tls_from_environment() -> anyhow::Result<()> {
    let _scope = test_helpers::env::scope([
        ("NSQ_ADDR", Some("nsq.internal:4150")),
        ("NSQ_SSL_CERT", Some("/etc/nsq/client.pem")),
        ("NSQ_SSL_KEY", Some("/etc/nsq/client.key")),
        ("NSQ_SSL_CA_CERT", None),
    ]);
    let nsq: NsqConfig = parse_group(Command::new("svc"), ["svc"], &Prefix::none(), &ProcessEnv)?;
    let settings = nsq.client_settings(None)?;
    assert_eq!(settings.addr, "nsq.internal:4150");
    let tls = settings.tls.expect("tls configured");
    assert_eq!(tls.ca_cert, None);
    Ok(())
}

#[test]
fn hand_built_settings_render_and_check() -> anyhow::Result<()> {
    let mut config = PostgresConfig::default();
    config.host = "db.internal".into();
    config.user = "app".into();
    config.name = "orders".into();
    config.port = 5432;
    config.ssl_mode = "require".into();
    assert_eq!(
        config.dsn()?,
        "postgresql://app@db.internal:5432/orders?sslcert=&sslkey=&sslmode=require&sslrootcert="
    );

    let replica = PostgresConfig::default().with_prefix(Prefix::new("replica"));
    let err = replica.check().expect_err("nothing set");
    let ServiceError::Flags(flags) = &err else {
        panic!("expected flag errors, got {err:?}");
    };
    assert_eq!(flags.missing_names().first(), Some(&"replica-db-host"));
    Ok(())
}

#[test]
fn hand_built_nsq_settings_name_prefixed_flags() {
    let mut nsq = NsqConfig::default().with_prefix(Prefix::new("events"));
    nsq.addr = "nsq.internal:4150".into();
    nsq.ssl_key = "/etc/nsq/client.key".into();
    let err = nsq.client_settings(None).expect_err("key without cert");
    assert_eq!(
        err.to_string(),
        "--events-nsq-ssl-key was given without --events-nsq-ssl-cert"
    );
}

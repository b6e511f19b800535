//! Type registry coverage and dispatch failures.

use clap::Command;
use flagbind::{Flag, FlagError, FlagSet, Kind, MapEnv, TypeBehavior, TypeRegistry, registry};

#[test]
fn global_registry_supports_every_kind() {
    let kinds: Vec<Kind> = registry().kinds().collect();
    assert_eq!(kinds, Kind::ALL);
}

#[test]
fn custom_registry_limits_supported_kinds() {
    let mut custom = TypeRegistry::empty();
    custom.register(Kind::Uint16, TypeBehavior::of::<u16>());
    let env = MapEnv::new();

    let mut port: u16 = 0;
    let mut host = String::new();
    let mut flags = FlagSet::with_registry(&custom).with_env(&env);
    let err = flags
        .add(
            Command::new("svc"),
            [
                Flag::new(&mut port, "db-port", "Database port").build(),
                Flag::new(&mut host, "db-host", "Database host").build(),
            ],
        )
        .expect_err("string not registered");
    assert!(err.is_fatal());
    assert_eq!(
        err.to_string(),
        "flag \"db-host\": unsupported type string"
    );
}

#[test]
fn every_builtin_kind_binds_and_parses() -> anyhow::Result<()> {
    let env = MapEnv::new();
    let mut int8: i8 = 0;
    let mut int64: i64 = 0;
    let mut int: isize = 0;
    let mut uint8: u8 = 0;
    let mut uint32: u32 = 0;
    let mut uint: usize = 0;
    let mut float32 = 0.0_f32;
    {
        let mut flags = FlagSet::new().with_env(&env);
        let command = flags.add(
            Command::new("svc"),
            [
                Flag::new(&mut int8, "int8", "i8").build(),
                Flag::new(&mut int64, "int64", "i64").build(),
                Flag::new(&mut int, "int", "isize").build(),
                Flag::new(&mut uint8, "uint8", "u8").build(),
                Flag::new(&mut uint32, "uint32", "u32").build(),
                Flag::new(&mut uint, "uint", "usize").build(),
                Flag::new(&mut float32, "float32", "f32").build(),
            ],
        )?;
        flags.parse_from(
            command,
            [
                "svc", "--int8", "-8", "--int64", "64", "--int", "-1", "--uint8", "255",
                "--uint32", "32", "--uint", "7", "--float32", "2.5",
            ],
        )?;
    }
    assert_eq!((int8, int64, int), (-8, 64, -1));
    assert_eq!((uint8, uint32, uint), (255, 32, 7));
    assert_eq!(float32, 2.5);
    Ok(())
}

#[test]
fn out_of_range_command_line_value_is_a_parse_error() {
    let env = MapEnv::new();
    let mut uint8: u8 = 0;
    let mut flags = FlagSet::new().with_env(&env);
    let command = flags
        .add(
            Command::new("svc"),
            [Flag::new(&mut uint8, "uint8", "u8").build()],
        )
        .expect("bind");
    let err = flags
        .parse_from(command, ["svc", "--uint8", "256"])
        .expect_err("out of range");
    assert!(matches!(err, FlagError::CliParsing(_)));
}

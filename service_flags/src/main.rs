//! `svcflags`: prints connection settings assembled from flags and the
//! environment.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Command;
use flagbind::FlagSet;
use service_flags::{
    LogConfig, NsqConfig, PostgresConfig, Prefix, RedisConfig, RootCommand, ServiceError,
    VersionInfo, bind, finish,
};
use tracing::debug;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    Ok(root_command().execute(|root| run(root, std::env::args_os())))
}

fn root_command() -> RootCommand {
    RootCommand::new("svcflags [command]")
        .short("Print service connection settings resolved from flags and environment")
        .version(VersionInfo::new(
            env!("CARGO_PKG_VERSION"),
            option_env!("SVCFLAGS_COMMIT").unwrap_or("none"),
            option_env!("SVCFLAGS_BUILD_DATE").unwrap_or("unknown"),
        ))
        .logging(true)
        .docs(true)
}

fn run<I>(base: &RootCommand, args: I) -> Result<(), ServiceError>
where
    I: IntoIterator<Item = OsString>,
{
    let prefix = Prefix::none();
    let mut log = LogConfig::default();
    let mut postgres = PostgresConfig::default();
    let mut redis = RedisConfig::default();
    let mut nsq = NsqConfig::default();

    let mut root_flags = FlagSet::new();
    let mut dsn_flags = FlagSet::new();
    let mut redis_flags = FlagSet::new();
    let mut nsq_flags = FlagSet::new();

    let dsn = bind(
        &mut dsn_flags,
        Command::new("dsn").about("Print the PostgreSQL connection string"),
        &mut postgres,
        &prefix,
    )?;
    let redis_url = bind(
        &mut redis_flags,
        Command::new("redis-url").about("Print the Redis connection URL"),
        &mut redis,
        &prefix,
    )?;
    let nsq_settings = bind(
        &mut nsq_flags,
        Command::new("nsq").about("Print the NSQ client settings as JSON"),
        &mut nsq,
        &prefix,
    )?;

    let root = base
        .clone()
        .command(dsn)
        .command(redis_url)
        .command(nsq_settings);
    let command = root.build_with_logging(&mut root_flags, &mut log)?;
    let matches = command.clone().try_get_matches_from(args)?;
    finish(root_flags, &matches)?;
    log.install()?;

    let mut stdout = io::stdout().lock();
    match matches.subcommand() {
        Some(("dsn", sub)) => {
            finish(dsn_flags, sub)?;
            writeln!(stdout, "{}", postgres.dsn()?)?;
        }
        Some(("redis-url", sub)) => {
            finish(redis_flags, sub)?;
            debug!(idle_timeout = ?redis.idle_timeout, "resolved redis settings");
            writeln!(stdout, "{}", redis.connection_url())?;
        }
        Some(("nsq", sub)) => {
            finish(nsq_flags, sub)?;
            let agent = root.user_agent_for(&matches);
            let settings = nsq.client_settings(Some(&agent))?;
            serde_json::to_writer_pretty(&mut stdout, &settings)?;
            writeln!(stdout)?;
        }
        Some(("version", sub)) => root.write_version(sub, &mut stdout)?,
        Some(("gendocs", _)) => {
            let written = root.write_docs(command, &matches)?;
            debug!(pages = written.len(), "generated documentation");
        }
        _ => {}
    }
    Ok(())
}

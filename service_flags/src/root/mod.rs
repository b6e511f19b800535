//! Root command bootstrapping: version reporting, logging flags, generated
//! reference pages and user agents derived from the invoked command path.

mod docs;
mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Arg, ArgAction, ArgMatches, Command};
use flagbind::FlagSet;
use serde::Serialize;
use tracing::error;

use crate::{ExitCoder, FlagGroup, Prefix, ServiceError};

pub use logging::LogConfig;

/// Build metadata reported by the `version` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Release version.
    pub version: String,
    /// Source revision.
    pub commit: String,
    /// Build date.
    pub date: String,
}

impl VersionInfo {
    /// Bundles build metadata.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        commit: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            commit: commit.into(),
            date: date.into(),
        }
    }
}

/// Builder for a service's top-level command.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use service_flags::{RootCommand, VersionInfo};
///
/// let root = RootCommand::new("myapp [command]")
///     .short("Does the thing")
///     .version(VersionInfo::new("1.2.3", "abc123", "2024-01-02"))
///     .command(Command::new("foo"));
/// let matches = root.build().try_get_matches_from(["myapp", "foo"])?;
/// assert_eq!(root.user_agent_for(&matches), "myapp-foo / 1.2.3");
/// # Ok::<(), clap::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RootCommand {
    name: String,
    short: Option<String>,
    long: Option<String>,
    version: Option<VersionInfo>,
    commands: Vec<Command>,
    logging: bool,
    docs: bool,
}

impl RootCommand {
    /// Starts a root command; the first word of `usage` names the binary.
    #[must_use]
    pub fn new(usage: &str) -> Self {
        Self {
            name: usage.split_whitespace().next().unwrap_or_default().to_owned(),
            short: None,
            long: None,
            version: None,
            commands: Vec::new(),
            logging: false,
            docs: false,
        }
    }

    /// One-line description shown in help.
    #[must_use]
    pub fn short(mut self, text: impl Into<String>) -> Self {
        self.short = Some(text.into());
        self
    }

    /// Extended description shown by `--help`.
    #[must_use]
    pub fn long(mut self, text: impl Into<String>) -> Self {
        self.long = Some(text.into());
        self
    }

    /// Enables `--version` and the `version` subcommand.
    #[must_use]
    pub fn version(mut self, info: VersionInfo) -> Self {
        self.version = Some(info);
        self
    }

    /// Adds a subcommand.
    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Adds the logging flags when [`RootCommand::build_with_logging`] runs.
    #[must_use]
    pub const fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Adds the `gendocs DIRECTORY` subcommand, see
    /// [`RootCommand::write_docs`].
    #[must_use]
    pub const fn docs(mut self, enabled: bool) -> Self {
        self.docs = enabled;
        self
    }

    /// Binary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build metadata, if configured.
    #[must_use]
    pub const fn version_info(&self) -> Option<&VersionInfo> {
        self.version.as_ref()
    }

    /// Builds the clap command without logging flags.
    #[must_use]
    pub fn build(&self) -> Command {
        let mut command = Command::new(self.name.clone())
            .subcommand_required(!self.commands.is_empty())
            .arg_required_else_help(!self.commands.is_empty());
        if let Some(short) = &self.short {
            command = command.about(short.clone());
        }
        if let Some(long) = &self.long {
            command = command.long_about(long.clone());
        }
        if let Some(info) = &self.version {
            command = command.version(info.version.clone()).subcommand(
                Command::new("version")
                    .about("Print version information")
                    .arg(
                        Arg::new("json")
                            .long("json")
                            .action(ArgAction::SetTrue)
                            .help("Print as JSON"),
                    ),
            );
        }
        if self.docs {
            command = command.subcommand(docs::command());
        }
        command.subcommands(self.commands.iter().cloned())
    }

    /// Builds the clap command and, when enabled, binds `log`'s flags
    /// through `flags`. The log level is accepted after any subcommand.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ServiceError::Flags`] when binding fails.
    pub fn build_with_logging<'a>(
        &self,
        flags: &mut FlagSet<'a>,
        log: &'a mut LogConfig,
    ) -> Result<Command, ServiceError> {
        let command = self.build();
        if !self.logging {
            return Ok(command);
        }
        let command = flags.add(command, log.flags(&Prefix::none()))?;
        Ok(command.mut_arg(logging::LEVEL_FLAG, |arg| arg.global(true)))
    }

    /// Formats a user agent from the subcommand `path` below the root.
    ///
    /// The binary and subcommand names are joined with `-`, followed by
    /// ` / VERSION` when a version is configured.
    #[must_use]
    pub fn user_agent<'p, I>(&self, path: I) -> String
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut agent = self.name.clone();
        for part in path {
            agent.push('-');
            agent.push_str(part);
        }
        if let Some(info) = &self.version {
            agent.push_str(" / ");
            agent.push_str(&info.version);
        }
        agent
    }

    /// [`RootCommand::user_agent`] for the subcommand chain in `matches`.
    #[must_use]
    pub fn user_agent_for(&self, matches: &ArgMatches) -> String {
        self.user_agent(subcommand_path(matches))
    }

    /// Writes build metadata for the `version` subcommand.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Output`] or [`ServiceError::Encode`] when
    /// writing fails.
    pub fn write_version<W: Write>(
        &self,
        matches: &ArgMatches,
        out: &mut W,
    ) -> Result<(), ServiceError> {
        let Some(info) = &self.version else {
            return Ok(());
        };
        if matches.get_flag("json") {
            serde_json::to_writer_pretty(&mut *out, info)?;
            writeln!(out)?;
        } else {
            writeln!(out, "Version: {}", info.version)?;
            writeln!(out, "Commit:  {}", info.commit)?;
            writeln!(out, "Date:    {}", info.date)?;
        }
        Ok(())
    }
}

impl RootCommand {
    /// Handles the `gendocs` subcommand: writes one Markdown page per command
    /// in `command` into the directory it names.
    ///
    /// `matches` are the root matches. Pass the fully built command,
    /// including any bound flags, so the pages list every option. Returns the
    /// written paths, root first, or nothing when `gendocs` was not invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Docs`] when the directory or a page cannot be
    /// written.
    pub fn write_docs(
        &self,
        command: Command,
        matches: &ArgMatches,
    ) -> Result<Vec<Utf8PathBuf>, ServiceError> {
        let requested = matches
            .subcommand_matches(docs::DOCS_COMMAND)
            .and_then(docs::directory);
        match requested {
            Some(dir) if self.docs => docs::write_tree(command, dir),
            _ => Ok(Vec::new()),
        }
    }

    /// Runs `run` with this command and turns its outcome into the process
    /// exit status.
    ///
    /// Failures are reported through [`RootCommand::report`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::process::ExitCode;
    ///
    /// use service_flags::RootCommand;
    ///
    /// fn main() -> ExitCode {
    ///     RootCommand::new("myapp").logging(true).execute(|root| {
    ///         root.build().try_get_matches_from(std::env::args_os())?;
    ///         Ok(())
    ///     })
    /// }
    /// ```
    pub fn execute<F>(&self, run: F) -> ExitCode
    where
        F: FnOnce(&Self) -> Result<(), ServiceError>,
    {
        match run(self) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => ExitCode::from(self.report(&err)),
        }
    }

    /// Reports `err` and returns the exit status it calls for.
    ///
    /// Command-line errors, including `--help` and `--version`, are printed
    /// by clap. Other errors are logged at `error` when logging is enabled
    /// and a subscriber is installed, and written to standard error
    /// otherwise. The status comes from [`ExitCoder`].
    #[must_use]
    pub fn report(&self, err: &ServiceError) -> u8 {
        if let Some(clap_err) = err.as_clap() {
            if let Err(print_err) = clap_err.print() {
                tracing::debug!(error = %print_err, "could not print usage");
            }
            return err.exit_code();
        }
        if self.logging && tracing::dispatcher::has_been_set() {
            error!(error = %err, "execution error");
            return err.exit_code();
        }
        Self::report_to(err, &mut io::stderr().lock())
    }

    fn report_to<W: Write>(err: &ServiceError, out: &mut W) -> u8 {
        if let Err(write_err) = writeln!(out, "Error: {err}") {
            tracing::debug!(error = %write_err, "could not report error");
        }
        err.exit_code()
    }
}

/// Names of the subcommands selected in `matches`, outermost first.
#[must_use]
pub fn subcommand_path(matches: &ArgMatches) -> Vec<&str> {
    let mut path = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        path.push(name);
        current = sub;
    }
    path
}

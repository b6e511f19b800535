//! Errors raised while loading service settings.

use flagbind::FlagError;
use thiserror::Error;

/// Lets an error choose the process exit status.
pub trait ExitCoder {
    /// Status reported when this error ends the process.
    fn exit_code(&self) -> u8 {
        1
    }
}

/// Errors produced by the service configuration groups and the root command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Binding, parsing or validating flags failed.
    #[error(transparent)]
    Flags(#[from] FlagError),

    /// The PostgreSQL SSL mode is not one libpq understands.
    #[error(
        "unsupported ssl mode {mode:?}; expected one of disable, allow, prefer, require, verify-ca, verify-full"
    )]
    InvalidSslMode {
        /// The rejected value.
        mode: String,
    },

    /// Only half of a TLS key pair was configured.
    #[error("--{given} was given without --{missing}")]
    IncompleteTls {
        /// Flag that was set.
        given: String,
        /// Flag that is still empty.
        missing: String,
    },

    /// The log filter directive could not be parsed.
    #[error("invalid log level {level:?}: {source}")]
    InvalidLogLevel {
        /// Directive as supplied.
        level: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global tracing subscriber was already installed.
    #[error("failed to install the log subscriber: {0}")]
    LogInstall(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Writing a documentation page failed.
    #[error("failed to write {path}: {source}")]
    Docs {
        /// Page or directory being written.
        path: camino::Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serialising command output failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<clap::Error> for ServiceError {
    fn from(err: clap::Error) -> Self {
        Self::Flags(FlagError::from(err))
    }
}

impl ServiceError {
    /// Whether the error reports a wiring mistake rather than bad input.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Flags(err) => err.is_fatal(),
            Self::LogInstall(_) => true,
            Self::InvalidSslMode { .. }
            | Self::IncompleteTls { .. }
            | Self::InvalidLogLevel { .. }
            | Self::Docs { .. }
            | Self::Output(_)
            | Self::Encode(_) => false,
        }
    }

    /// The clap error behind a command-line failure, if that is what this is.
    #[must_use]
    pub fn as_clap(&self) -> Option<&clap::Error> {
        match self {
            Self::Flags(FlagError::CliParsing(err)) => Some(&**err),
            _ => None,
        }
    }
}

/// Usage errors exit with 2, matching clap; everything else with 1.
impl ExitCoder for ServiceError {
    fn exit_code(&self) -> u8 {
        if let Some(err) = self.as_clap() {
            return u8::try_from(err.exit_code()).unwrap_or(2);
        }
        match self {
            Self::Flags(err) if !err.is_fatal() => 2,
            Self::InvalidSslMode { .. }
            | Self::IncompleteTls { .. }
            | Self::InvalidLogLevel { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagbind::Kind;
    use rstest::rstest;

    #[rstest]
    #[case::missing(ServiceError::from(FlagError::missing("db-user")), 2, false)]
    #[case::ssl(ServiceError::InvalidSslMode { mode: "sometimes".into() }, 2, false)]
    #[case::tls(
        ServiceError::IncompleteTls { given: "nsq-ssl-cert".into(), missing: "nsq-ssl-key".into() },
        2,
        false
    )]
    #[case::unsupported(
        ServiceError::from(FlagError::UnsupportedKind {
            name: "ratio".into(),
            kind: Kind::Float32
        }),
        1,
        true
    )]
    fn classifies_errors(#[case] err: ServiceError, #[case] code: u8, #[case] fatal: bool) {
        assert_eq!(err.exit_code(), code);
        assert_eq!(err.is_fatal(), fatal);
    }

    #[test]
    fn clap_errors_keep_their_exit_code() {
        let err = clap::Command::new("svc")
            .try_get_matches_from(["svc", "--nope"])
            .map(|_| ())
            .map_err(ServiceError::from)
            .expect_err("unknown argument");
        assert!(err.as_clap().is_some());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn incomplete_tls_names_both_flags() {
        let err = ServiceError::IncompleteTls {
            given: "nsq-ssl-key".into(),
            missing: "nsq-ssl-cert".into(),
        };
        assert_eq!(err.to_string(), "--nsq-ssl-key was given without --nsq-ssl-cert");
    }
}

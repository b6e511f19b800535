//! Log filter flags and subscriber installation.

use flagbind::Flag;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{FlagGroup, Prefix, ServiceError};

/// Name of the log level flag.
pub(super) const LEVEL_FLAG: &str = "log-level";

/// Filter directive used when none is configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Log settings bound to `--log-level` / `LOG_LEVEL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, for example `info` or `service_flags=debug`.
    pub level: String,
}

impl FlagGroup for LogConfig {
    fn flags<'a>(&'a mut self, prefix: &Prefix) -> Vec<Flag<'a>> {
        vec![
            Flag::new(&mut self.level, prefix.flag_name(LEVEL_FLAG), "Log filter directive")
                .env(prefix.env_name("LOG_LEVEL"))
                .default(DEFAULT_LEVEL.to_owned())
                .required()
                .build(),
        ]
    }
}

impl LogConfig {
    /// Parses the configured directive.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidLogLevel`] when the directive is
    /// malformed.
    pub fn filter(&self) -> Result<EnvFilter, ServiceError> {
        EnvFilter::try_new(&self.level).map_err(|source| ServiceError::InvalidLogLevel {
            level: self.level.clone(),
            source,
        })
    }

    /// A formatting subscriber writing to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidLogLevel`] when the directive is
    /// malformed.
    pub fn subscriber<W>(
        &self,
        writer: W,
    ) -> Result<impl Subscriber + Send + Sync + use<W>, ServiceError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Ok(fmt()
            .with_env_filter(self.filter()?)
            .with_writer(writer)
            .finish())
    }

    /// Installs the process-wide subscriber, writing to standard error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidLogLevel`] for a malformed directive
    /// and [`ServiceError::LogInstall`] when a subscriber is already set.
    pub fn install(&self) -> Result<(), ServiceError> {
        let subscriber = self.subscriber(std::io::stderr)?;
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

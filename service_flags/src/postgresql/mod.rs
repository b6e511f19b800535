//! PostgreSQL connection settings.
//!
//! [`PostgresConfig`] declares the `db-*` flags and renders a libpq
//! connection URI from them. Multiple hosts may be given as a comma-separated
//! list; each is paired with the configured port.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use flagbind::Flag;

use crate::{FlagGroup, Prefix, ServiceError};

/// libpq `sslmode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// No TLS.
    Disable,
    /// TLS only if the server insists.
    Allow,
    /// TLS when the server supports it.
    Prefer,
    /// TLS without certificate verification.
    Require,
    /// TLS with CA verification.
    VerifyCa,
    /// TLS with CA and host name verification.
    VerifyFull,
}

impl SslMode {
    /// The libpq spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow => "allow",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }

    /// Whether the root certificate is passed along in the DSN.
    #[must_use]
    pub const fn sends_root_cert(self) -> bool {
        matches!(self, Self::Require | Self::VerifyFull)
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SslMode {
    type Err = ServiceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "disable" => Ok(Self::Disable),
            "allow" => Ok(Self::Allow),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCa),
            "verify-full" => Ok(Self::VerifyFull),
            other => Err(ServiceError::InvalidSslMode {
                mode: other.to_owned(),
            }),
        }
    }
}

/// Settings for one PostgreSQL database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Host name or address; a comma-separated list selects several hosts.
    pub host: String,
    /// Login role.
    pub user: String,
    /// Password for [`PostgresConfig::user`].
    pub password: String,
    /// Database name.
    pub name: String,
    /// Port shared by every host.
    pub port: u16,
    /// libpq `sslmode`.
    pub ssl_mode: String,
    /// Root certificate path, or PEM text when inline.
    pub ssl_root_cert: String,
    /// Client key path, or PEM text when inline.
    pub ssl_key: String,
    /// Client certificate path, or PEM text when inline.
    pub ssl_cert: String,
    /// Pass certificates in the DSN instead of by path.
    pub ssl_inline: bool,
    prefix: Prefix,
}

impl FlagGroup for PostgresConfig {
    fn flags<'a>(&'a mut self, prefix: &Prefix) -> Vec<Flag<'a>> {
        self.prefix = prefix.clone();
        vec![
            Flag::new(
                &mut self.host,
                prefix.flag_name("db-host"),
                "Database hostname or IP address",
            )
            .env(prefix.env_name("DB_HOST"))
            .default(String::from("127.0.0.1"))
            .required()
            .build(),
            Flag::new(&mut self.user, prefix.flag_name("db-user"), "Database username")
                .env(prefix.env_name("DB_USER"))
                .required()
                .build(),
            Flag::new(
                &mut self.password,
                prefix.flag_name("db-pass"),
                "Database password",
            )
            .env(prefix.env_name("DB_PASSWORD"))
            .build(),
            Flag::new(&mut self.name, prefix.flag_name("db-name"), "Database name")
                .env(prefix.env_name("DB_NAME"))
                .required()
                .build(),
            Flag::new(&mut self.port, prefix.flag_name("db-port"), "Database port")
                .env(prefix.env_name("DB_PORT"))
                .default(5432)
                .required()
                .build(),
            Flag::new(
                &mut self.ssl_mode,
                prefix.flag_name("db-ssl-mode"),
                "Database SSL mode",
            )
            .env(prefix.env_name("DB_SSL_MODE"))
            .default(String::from("disable"))
            .required()
            .build(),
            Flag::new(
                &mut self.ssl_root_cert,
                prefix.flag_name("db-ssl-root-cert"),
                "Database SSL root certificate",
            )
            .env(prefix.env_name("DB_SSL_ROOT_CERT"))
            .build(),
            Flag::new(
                &mut self.ssl_key,
                prefix.flag_name("db-ssl-key"),
                "Database SSL client key",
            )
            .env(prefix.env_name("DB_SSL_KEY"))
            .build(),
            Flag::new(
                &mut self.ssl_cert,
                prefix.flag_name("db-ssl-cert"),
                "Database SSL client certificate",
            )
            .env(prefix.env_name("DB_SSL_CERT"))
            .build(),
            Flag::new(
                &mut self.ssl_inline,
                prefix.flag_name("db-ssl-inline"),
                "Pass SSL certificates inline in the connection string",
            )
            .env(prefix.env_name("DB_SSL_INLINE"))
            .build(),
        ]
    }
}

impl PostgresConfig {
    /// Names reported flags as if bound under `prefix`.
    ///
    /// Binding through [`FlagGroup`] sets this already; use it when the
    /// settings are assembled by hand.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Reports required settings that are empty.
    ///
    /// The required set is whatever [`FlagGroup::flags`] marks required.
    ///
    /// # Errors
    ///
    /// Returns [`flagbind::FlagError::Missing`] or
    /// [`flagbind::FlagError::Aggregate`], naming the flags as registered.
    pub fn check(&self) -> Result<(), ServiceError> {
        let mut current = self.clone();
        let flags = current.flags(&self.prefix);
        flagbind::registry().check(&flags)?;
        Ok(())
    }

    /// The parsed SSL mode.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidSslMode`] for unknown spellings.
    pub fn ssl_mode(&self) -> Result<SslMode, ServiceError> {
        self.ssl_mode.parse()
    }

    /// Renders the connection URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_flags::PostgresConfig;
    ///
    /// let mut config = PostgresConfig::default();
    /// config.host = "db1,db2".into();
    /// config.user = "app".into();
    /// config.name = "orders".into();
    /// config.port = 5432;
    /// config.ssl_mode = "disable".into();
    /// assert_eq!(
    ///     config.dsn()?,
    ///     "postgresql://app@db1:5432,db2:5432/orders?sslmode=disable"
    /// );
    /// # Ok::<(), service_flags::ServiceError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PostgresConfig::check`] and
    /// [`PostgresConfig::ssl_mode`].
    pub fn dsn(&self) -> Result<String, ServiceError> {
        self.check()?;
        let mode = self.ssl_mode()?;

        let hosts = self
            .host
            .split(',')
            .map(|host| format!("{}:{}", host.trim(), self.port))
            .collect::<Vec<_>>()
            .join(",");

        let mut query: BTreeMap<&str, &str> = BTreeMap::new();
        query.insert("sslmode", mode.as_str());
        if mode != SslMode::Disable {
            if self.ssl_inline {
                query.insert("sslinline", "true");
            }
            if mode.sends_root_cert() {
                query.insert("sslrootcert", &self.ssl_root_cert);
            }
            query.insert("sslkey", &self.ssl_key);
            query.insert("sslcert", &self.ssl_cert);
        }
        let query = query
            .into_iter()
            .map(|(key, value)| format!("{}={}", form_escape(key), form_escape(value)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "postgresql://{}{hosts}/{}?{query}",
            self.auth(),
            self.name
        ))
    }

    fn auth(&self) -> String {
        if self.user.is_empty() {
            return String::new();
        }
        let mut auth = urlencoding::encode(&self.user).into_owned();
        if !self.password.is_empty() {
            auth.push(':');
            auth.push_str(&urlencoding::encode(&self.password));
        }
        auth.push('@');
        auth
    }
}

/// Query-string escaping with `+` for spaces.
fn form_escape(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

#[cfg(test)]
mod tests;

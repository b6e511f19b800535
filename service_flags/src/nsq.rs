//! NSQ client settings.
//!
//! TLS is enabled by supplying both a client certificate and key. The CA
//! certificate is optional; without it the platform roots apply.

use camino::Utf8PathBuf;
use flagbind::{Flag, FlagError};
use serde::Serialize;

use crate::{FlagGroup, Prefix, ServiceError};

/// Settings for connecting to one `nsqd`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NsqConfig {
    /// `host:port` of the daemon.
    pub addr: String,
    /// CA certificate file.
    pub ssl_ca_cert: String,
    /// Client certificate file.
    pub ssl_cert: String,
    /// Client private key file.
    pub ssl_key: String,
    prefix: Prefix,
}

/// Certificate files for a TLS connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsFiles {
    /// CA bundle used to verify the server, if not the platform default.
    pub ca_cert: Option<Utf8PathBuf>,
    /// Client certificate.
    pub cert: Utf8PathBuf,
    /// Client private key.
    pub key: Utf8PathBuf,
}

/// Everything a producer or consumer needs to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSettings {
    /// `host:port` of the daemon.
    pub addr: String,
    /// Identifies this client to the daemon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Certificate files when TLS is on.
    pub tls: Option<TlsFiles>,
}

impl ClientSettings {
    /// Whether the connection upgrades to TLS.
    #[must_use]
    pub const fn tls_enabled(&self) -> bool {
        self.tls.is_some()
    }
}

impl FlagGroup for NsqConfig {
    fn flags<'a>(&'a mut self, prefix: &Prefix) -> Vec<Flag<'a>> {
        self.prefix = prefix.clone();
        vec![
            Flag::new(
                &mut self.addr,
                prefix.flag_name("nsq-addr"),
                "The address:port of the nsq server",
            )
            .env(prefix.env_name("NSQ_ADDR"))
            .default(String::from("127.0.0.1:4150"))
            .required()
            .build(),
            Flag::new(
                &mut self.ssl_ca_cert,
                prefix.flag_name("nsq-ssl-ca-cert"),
                "The path to the CA certificate file",
            )
            .env(prefix.env_name("NSQ_SSL_CA_CERT"))
            .build(),
            Flag::new(
                &mut self.ssl_cert,
                prefix.flag_name("nsq-ssl-cert"),
                "The path to the certificate file",
            )
            .env(prefix.env_name("NSQ_SSL_CERT"))
            .build(),
            Flag::new(
                &mut self.ssl_key,
                prefix.flag_name("nsq-ssl-key"),
                "The path to the ssl private key file",
            )
            .env(prefix.env_name("NSQ_SSL_KEY"))
            .build(),
        ]
    }
}

impl NsqConfig {
    /// Names reported flags as if bound under `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// The TLS file set, or `None` when TLS is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::IncompleteTls`] when only one of the
    /// certificate and key is set.
    pub fn tls_files(&self) -> Result<Option<TlsFiles>, ServiceError> {
        match (self.ssl_cert.is_empty(), self.ssl_key.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => Ok(Some(TlsFiles {
                ca_cert: (!self.ssl_ca_cert.is_empty())
                    .then(|| Utf8PathBuf::from(&self.ssl_ca_cert)),
                cert: Utf8PathBuf::from(&self.ssl_cert),
                key: Utf8PathBuf::from(&self.ssl_key),
            })),
            (false, true) => Err(self.incomplete("nsq-ssl-cert", "nsq-ssl-key")),
            (true, false) => Err(self.incomplete("nsq-ssl-key", "nsq-ssl-cert")),
        }
    }

    /// Resolves the settings a client connects with.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Missing`] for an empty address and the errors of
    /// [`NsqConfig::tls_files`].
    pub fn client_settings(
        &self,
        user_agent: Option<&str>,
    ) -> Result<ClientSettings, ServiceError> {
        if self.addr.is_empty() {
            return Err(FlagError::missing(self.prefix.flag_name("nsq-addr")).into());
        }
        Ok(ClientSettings {
            addr: self.addr.clone(),
            user_agent: user_agent.filter(|agent| !agent.is_empty()).map(str::to_owned),
            tls: self.tls_files()?,
        })
    }

    fn incomplete(&self, given: &str, missing: &str) -> ServiceError {
        ServiceError::IncompleteTls {
            given: self.prefix.flag_name(given),
            missing: self.prefix.flag_name(missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> NsqConfig {
        NsqConfig {
            addr: "127.0.0.1:4150".into(),
            ..NsqConfig::default()
        }
    }

    #[rstest]
    fn no_tls_without_files(config: NsqConfig) {
        assert_eq!(config.tls_files().expect("valid"), None);
    }

    #[rstest]
    fn cert_and_key_enable_tls(mut config: NsqConfig) {
        config.ssl_cert = "/etc/nsq/client.pem".into();
        config.ssl_key = "/etc/nsq/client.key".into();
        let files = config.tls_files().expect("valid").expect("tls on");
        assert_eq!(files.cert, "/etc/nsq/client.pem");
        assert_eq!(files.ca_cert, None);
    }

    #[rstest]
    #[case::cert_only("/etc/nsq/client.pem", "", "nsq-ssl-cert", "nsq-ssl-key")]
    #[case::key_only("", "/etc/nsq/client.key", "nsq-ssl-key", "nsq-ssl-cert")]
    fn half_a_key_pair_is_rejected(
        mut config: NsqConfig,
        #[case] cert: &str,
        #[case] key: &str,
        #[case] given: &str,
        #[case] missing: &str,
    ) {
        config.ssl_cert = cert.into();
        config.ssl_key = key.into();
        let err = config.tls_files().expect_err("incomplete");
        let ServiceError::IncompleteTls {
            given: reported_given,
            missing: reported_missing,
        } = &err
        else {
            panic!("expected IncompleteTls, got {err:?}");
        };
        assert_eq!(reported_given, given);
        assert_eq!(reported_missing, missing);
    }

    #[rstest]
    fn client_settings_carry_user_agent(mut config: NsqConfig) {
        config.ssl_ca_cert = "/etc/nsq/ca.pem".into();
        config.ssl_cert = "/etc/nsq/client.pem".into();
        config.ssl_key = "/etc/nsq/client.key".into();
        let settings = config
            .client_settings(Some("myapp-consume / 1.2.3"))
            .expect("settings");
        assert_eq!(settings.user_agent.as_deref(), Some("myapp-consume / 1.2.3"));
        assert!(settings.tls_enabled());
        let json = serde_json::to_value(&settings).expect("json");
        assert_eq!(json["tls"]["ca_cert"], "/etc/nsq/ca.pem");
    }

    #[test]
    fn empty_address_is_missing() {
        let err = NsqConfig::default()
            .client_settings(None)
            .expect_err("no address");
        assert_eq!(err.to_string(), "required value \"nsq-addr\" not specified");
    }
}

use std::{
    env,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use secure_session_logger::trace;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, result::CliResult};

/// Env variable pointing at the JSON configuration file.
pub const SECURE_SESSION_CONF_ENV: &str = "SECURE_SESSION_CONF";

/// Define the configuration of the CLI reading a json
///
/// {
///     "public_key_file": "/etc/ssession/counterparty.pem",
///     "private_key_file": "/etc/ssession/counterparty.key",
///     "session_key": "AA...AAA",
///     "log_level": "info"
/// }
///
/// Every field is optional; command line arguments take precedence.
#[derive(Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConf {
    /// PEM file holding the counterparty RSA public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_file: Option<PathBuf>,
    /// PEM file holding the counterparty RSA private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_file: Option<PathBuf>,
    /// A base64 session key reused across invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl std::fmt::Debug for CliConf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConf")
            .field("public_key_file", &self.public_key_file)
            .field("private_key_file", &self.private_key_file)
            .field("session_key", &self.session_key.as_ref().map(|_| "***"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl CliConf {
    /// The configuration file to read: the command line value first, then
    /// the `SECURE_SESSION_CONF` env variable.
    #[must_use]
    pub fn location(conf: Option<PathBuf>) -> Option<PathBuf> {
        conf.or_else(|| env::var_os(SECURE_SESSION_CONF_ENV).map(PathBuf::from))
    }

    /// Load the configuration, or an empty one when no file is given.
    pub fn load(conf_path: Option<&Path>) -> CliResult<Self> {
        let Some(conf_path) = conf_path else {
            return Ok(Self::default())
        };
        let file = File::open(conf_path).map_err(|e| {
            CliError::Configuration(format!(
                "Can't read the configuration file {}: {e}",
                conf_path.display()
            ))
        })?;
        let conf: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CliError::Configuration(format!(
                "Config JSON malformed in {}: {e}",
                conf_path.display()
            ))
        })?;
        trace!("configuration loaded from {}", conf_path.display());
        Ok(conf)
    }
}

//! Configuration Management
//!
//! Credentials live in a TOML file (`~/.fish` by default):
//!
//! ```toml
//! [conf]
//! client_id = "..."
//! api_key = "..."
//! ```
//!
//! The file is read once per process; afterwards the pair is read-only.

use crate::api::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Environment variable that overrides the credential file location
pub const CONFIG_ENV: &str = "FISHERMAN_CONFIG";

/// Base URL of the v1 API
pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/v1/";

/// Request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONFIG_FILE_NAME: &str = ".fish";

/// Account credentials plus connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub api_key: String,
    /// Override for the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
            api_url: None,
            timeout_secs: None,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Config("client_id is empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key is empty".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(alias = "Conf")]
    conf: Credentials,
}

/// Default credential file path (`$FISHERMAN_CONFIG`, else `~/.fish`)
pub fn default_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Load-once holder for the account credentials
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    loaded: OnceLock<Credentials>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    /// Store backed by the default path
    pub fn from_default_path() -> Result<Self> {
        default_path()
            .map(Self::new)
            .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read credentials from disk. Later calls return the cached pair.
    pub fn load(&self) -> Result<&Credentials> {
        if let Some(creds) = self.loaded.get() {
            return Ok(creds);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Config(format!(
                "cannot read credential file {}: {e} (run `fisherman configure`)",
                self.path.display()
            ))
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "cannot parse credential file {}: {e}",
                self.path.display()
            ))
        })?;
        file.conf.validate()?;

        tracing::debug!("Loaded credentials from {:?}", self.path);
        Ok(self.loaded.get_or_init(|| file.conf))
    }

    /// Cached credentials; fails if [`load`](Self::load) has not succeeded
    pub fn current(&self) -> Result<&Credentials> {
        self.loaded
            .get()
            .ok_or_else(|| Error::Config("credentials have not been loaded".to_string()))
    }

    /// Write credentials to disk
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("cannot create {}: {e}", parent.display())))?;
        }

        let content = toml::to_string_pretty(&ConfigFile {
            conf: credentials.clone(),
        })
        .map_err(|e| Error::Config(format!("cannot serialize credentials: {e}")))?;

        std::fs::write(&self.path, content)
            .map_err(|e| Error::Config(format!("cannot write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| Error::Config(format!("cannot restrict {}: {e}", self.path.display())),
            )?;
        }

        tracing::info!("Wrote credentials to {:?}", self.path);
        Ok(())
    }
}

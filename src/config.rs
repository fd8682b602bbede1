//! Client configuration.
//!
//! [`ClientConfig`] holds everything read from the environment at startup:
//! API credentials, the phone number used for login, where the session
//! lives and where exports go. It is built once and handed to the
//! Telegram adapter; nothing reads the environment after that.
//!
//! # Environment
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `API_ID` | yes | |
//! | `API_HASH` | yes | |
//! | `PHONE_NUMBER` | no | prompted during `--auth` |
//! | `DATA_DIR` | no | `./data` |
//! | `OUTPUT_DIR` | no | the user's download directory |
//!
//! The binary loads a `.env` file from the working directory first, if one
//! exists.
//!
//! # Example
//!
//! ```rust
//! use tgexport::config::ClientConfig;
//!
//! let config = ClientConfig::new(12345, "0123456789abcdef")
//!     .with_data_dir("/var/lib/tgexport")
//!     .with_phone("+15550100");
//!
//! assert!(config.session_path().ends_with("user.session"));
//! ```

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::TgExportError;

/// Default directory for the session file.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Base name of the session file inside the data directory.
pub const SESSION_NAME: &str = "user";

/// Credentials and paths for talking to Telegram.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application id from my.telegram.org
    pub api_id: i32,

    /// Application hash from my.telegram.org
    pub api_hash: String,

    /// Phone number for interactive login (international format)
    pub phone: Option<String>,

    /// Directory holding the session file (default: `./data`)
    pub data_dir: PathBuf,

    /// Base directory for relative output names (default: downloads)
    pub output_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Creates a configuration with default paths.
    pub fn new(api_id: i32, api_hash: impl Into<String>) -> Self {
        Self {
            api_id,
            api_hash: api_hash.into(),
            phone: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: None,
        }
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, TgExportError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TgExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_id_raw = get("API_ID").ok_or_else(|| {
            TgExportError::config("API_ID", "not set; get one at https://my.telegram.org")
        })?;
        let api_id = api_id_raw.parse::<i32>().map_err(|_| {
            TgExportError::config("API_ID", format!("'{}' is not a number", api_id_raw))
        })?;
        if api_id <= 0 {
            return Err(TgExportError::config("API_ID", "must be positive"));
        }

        let api_hash = get("API_HASH").ok_or_else(|| TgExportError::config("API_HASH", "not set"))?;

        let mut config = Self::new(api_id, api_hash);
        config.phone = get("PHONE_NUMBER");
        if let Some(dir) = get("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.output_dir = get("OUTPUT_DIR").map(PathBuf::from);
        Ok(config)
    }

    /// Sets the phone number used for login.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the session directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the base directory for relative output names.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Path of the session file (`<data_dir>/user.session`).
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.session", SESSION_NAME))
    }

    /// Every file a previous login may have left behind.
    pub fn session_files(&self) -> Vec<PathBuf> {
        let base = self.data_dir.join(SESSION_NAME);
        let base = base.as_os_str().to_string_lossy();
        ["", ".session", "-journal", ".session-journal"]
            .iter()
            .map(|suffix| PathBuf::from(format!("{}{}", base, suffix)))
            .collect()
    }

    /// Directory that relative output names are resolved against.
    pub fn output_base(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::format::default_output_dir)
    }
}

// The hash is a credential; keep it out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .field("phone", &self.phone.as_ref().map(|_| "<set>"))
            .field("data_dir", &self.data_dir)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

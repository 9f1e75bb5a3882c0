//! Settings of the environment hosting the web interface

use log::debug;
use serde::{Deserialize, Serialize};

use crate::tree::TreeError;

/// Environment variable consulted for the root prefix
pub const ROOT_PREFIX_ENV: &str = "CMDWEB_ROOT_PREFIX";

/// Where the web interface is mounted, e.g. `/` or `/tools`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostConfig {
    pub root_prefix: Option<String>,
}

impl HostConfig {
    #[must_use]
    pub fn with_root_prefix(root_prefix: &str) -> Self {
        HostConfig {
            root_prefix: Some(root_prefix.to_string()),
        }
    }

    /// Read the root prefix from [`ROOT_PREFIX_ENV`]
    #[must_use]
    pub fn from_env() -> Self {
        let root_prefix = std::env::var(ROOT_PREFIX_ENV).ok();
        if let Some(ref prefix) = root_prefix {
            debug!("Using root prefix {prefix:?} from {ROOT_PREFIX_ENV}");
        }
        HostConfig { root_prefix }
    }

    /// Fill settings missing here from `fallback`
    #[must_use]
    pub fn or(self, fallback: HostConfig) -> Self {
        HostConfig {
            root_prefix: self.root_prefix.or(fallback.root_prefix),
        }
    }

    /// The configured root prefix.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MissingConfiguration` if none of the sources set one.
    pub fn root_prefix(&self) -> Result<&str, TreeError> {
        self.root_prefix
            .as_deref()
            .ok_or(TreeError::MissingConfiguration)
    }
}

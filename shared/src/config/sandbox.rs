//! Path sandbox configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Sandbox root and transfer limits for file routes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SandboxConfig {
    /// Remote directory every user path must resolve beneath
    pub root: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            root: String::from("/upload"),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl SandboxConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root: std::env::var("SANDBOX_ROOT").unwrap_or(defaults.root),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
        }
    }
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

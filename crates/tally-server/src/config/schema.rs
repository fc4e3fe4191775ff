use std::time::Duration;

use serde::Deserialize;
use tally_core::error::{Result, TallyError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallyConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
        }
    }
}

impl TallyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.server.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.bind.trim().is_empty() {
            return Err(TallyError::BadConfig("server.bind must not be empty".into()));
        }
        if self.shutdown_grace_ms > 60_000 {
            return Err(TallyError::BadConfig(
                "server.shutdown_grace_ms must be between 0 and 60000".into(),
            ));
        }
        Ok(())
    }

    /// Addresses to try, in order. `:port` means every interface: the IPv6
    /// wildcard first (dual-stack where the OS allows it), then IPv4 only.
    pub fn listen_addrs(&self) -> Vec<String> {
        let bind = self.bind.trim();
        if bind.starts_with(':') {
            vec![format!("[::]{bind}"), format!("0.0.0.0{bind}")]
        } else {
            vec![bind.to_string()]
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn default_bind() -> String {
    ":8080".into()
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

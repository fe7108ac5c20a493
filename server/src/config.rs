use log::{info, warn};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::catalog::CatalogOptions;
use crate::error::Result;
use crate::mirror::hackmd::DEFAULT_ENDPOINT;

pub const CONFIG_PATH_VAR: &str = "REQUESTNONSENSE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const TOKEN_VAR: &str = "HACKMD_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub local: LocalConfig,
    pub hackmd: HackMdConfig,
    pub chat: ChatConfig,
}

/// Files on this machine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalConfig {
    pub songlist: String,
    pub list_cfsm: bool,
    pub list_delimiter: String,
    pub instruments: Vec<String>,
    pub queue_file: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            songlist: "songlist.csv".to_string(),
            list_cfsm: false,
            list_delimiter: ";".to_string(),
            instruments: Vec::new(),
            queue_file: "queue.json".to_string(),
        }
    }
}

impl LocalConfig {
    pub fn catalog_options(&self) -> CatalogOptions {
        let delimiter = match self.list_delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                warn!(
                    "[!] list_delimiter {:?} is not a single byte, using ';'",
                    self.list_delimiter
                );
                b';'
            }
        };

        CatalogOptions {
            delimiter,
            skip_first_line: self.list_cfsm,
            instruments: self.instruments.clone(),
        }
    }
}

/// Note service the queue and song list are mirrored to. An empty token
/// disables mirroring.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HackMdConfig {
    pub token: String,
    pub tag: String,
    pub list_title: String,
    pub queue_title: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for HackMdConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            tag: "requestnonsense".to_string(),
            list_title: "List".to_string(),
            queue_title: "Queue".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl HackMdConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_enabled(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    pub command_prefix: String,
    pub message_prefix: String,
    /// Names allowed to promote and advance the queue.
    pub operators: Vec<String>,
    pub rules: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            message_prefix: String::new(),
            operators: Vec::new(),
            rules: vec!["Requests are free.".to_string()],
        }
    }
}

impl ChatConfig {
    pub fn is_operator(&self, name: &str) -> bool {
        self.operators
            .iter()
            .any(|operator| operator.eq_ignore_ascii_case(name))
    }

    pub fn prefixed(&self, message: &str) -> String {
        if self.message_prefix.is_empty() {
            message.to_string()
        } else {
            format!("{}: {}", self.message_prefix, message)
        }
    }
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads the file at `path`, falling back to defaults when it is
    /// missing, then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            info!("[+] reading config from {}", path.display());
            Self::from_toml(&fs::read_to_string(path)?)?
        } else {
            warn!("[!] no config at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(token) = env::var(TOKEN_VAR) {
            config.hackmd.token = token;
        }

        info!(
            "[-] song list {}, queue file {}, mirroring {}",
            config.local.songlist,
            config.local.queue_file,
            if config.hackmd.is_enabled() { "on" } else { "off" }
        );
        Ok(config)
    }

    /// Loads from `$REQUESTNONSENSE_CONFIG` or `./config.toml`.
    pub fn from_env() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }
}

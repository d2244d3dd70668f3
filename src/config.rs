use crate::core_vfs::{Node, VirtualFs};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub pasv_address: Ipv4Addr, // Address of the data listeners, advertised by PASV
    pub idle_timeout_secs: u64,
    pub data_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("127.0.0.1"),
            listen_port: 2137,
            pasv_address: Ipv4Addr::LOCALHOST,
            idle_timeout_secs: 60,
            data_timeout_secs: 60,
        }
    }
}

impl ServerConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn data_timeout(&self) -> Duration {
        Duration::from_secs(self.data_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Tree to serve. Strings are files, tables are directories.
    #[serde(default)]
    pub filesystem: Option<toml::Table>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid entry {path}: expected a string (file) or a table (directory), found {found}")]
    InvalidEntry { path: String, found: &'static str },

    #[error("Invalid entry name {0:?}")]
    InvalidName(String),
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        Ok(config)
    }

    /// Builds the filesystem to serve, falling back to the sample tree.
    pub fn build_filesystem(&self) -> Result<VirtualFs, ConfigError> {
        match &self.filesystem {
            Some(table) => Ok(VirtualFs::new(table_to_children(table, "")?)),
            None => Ok(VirtualFs::sample()),
        }
    }
}

fn table_to_children(table: &toml::Table, parent: &str) -> Result<HashMap<String, Node>, ConfigError> {
    let mut children = HashMap::with_capacity(table.len());

    for (name, value) in table {
        // These names could never be reached by the resolver.
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(ConfigError::InvalidName(name.clone()));
        }

        let path = format!("{}/{}", parent, name);
        let node = match value {
            toml::Value::String(content) => Node::file(content.as_bytes()),
            toml::Value::Table(sub) => Node::Directory {
                children: table_to_children(sub, &path)?,
            },
            other => {
                return Err(ConfigError::InvalidEntry {
                    path,
                    found: other.type_str(),
                })
            }
        };
        children.insert(name.clone(), node);
    }

    Ok(children)
}

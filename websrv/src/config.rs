// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt, fs, io,
    net::{IpAddr, Ipv6Addr, SocketAddr},
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.ron";

/// The configuration file in the platform-specific config directory.
///
/// `None` if no home directory could be determined.
pub(crate) fn default_config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "trackrater", env!("CARGO_PKG_NAME"))
        .map(|project_dirs| project_dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// All settings are optional in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) storage: StorageConfig,
}

impl Config {
    /// Read a configuration file in RON format.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub(crate) fn read_from_file(file_path: &Path) -> anyhow::Result<Option<Self>> {
        let text = match fs::read_to_string(file_path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Self::parse_ron(&text).map(Some)
    }

    fn parse_ron(text: &str) -> anyhow::Result<Self> {
        ron::from_str(text).map_err(Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,

    /// Upper bound for the size of request bodies
    pub(crate) request_body_limit_bytes: u64,
}

pub(crate) const DEFAULT_REQUEST_BODY_LIMIT_BYTES: u64 = 16 * 1024;

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            endpoint: Default::default(),
            request_body_limit_bytes: DEFAULT_REQUEST_BODY_LIMIT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

const ENDPOINT_PORT_EPHEMERAL: u16 = 0;

impl EndpointConfig {
    pub(crate) const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: ENDPOINT_PORT_EPHEMERAL,
        }
    }

    pub(crate) fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

/// Storage backends
///
/// Only volatile storage is available for now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Storage {
    #[default]
    InMemory,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str("in-memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageConfig {
    pub(crate) kind: Storage,

    /// Number of tracks to reserve capacity for on startup
    pub(crate) initial_capacity: usize,
}

const DEFAULT_STORAGE_INITIAL_CAPACITY: usize = 1024;

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: Storage::InMemory,
            initial_capacity: DEFAULT_STORAGE_INITIAL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn parse_partial_config() -> anyhow::Result<()> {
        let config = Config::parse_ron(
            r#"(
                network: (
                    endpoint: (ip_addr: "127.0.0.1", port: 8080),
                ),
            )"#,
        )?;
        assert_eq!(
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
            config.network.endpoint.socket_addr()
        );
        assert_eq!(
            DEFAULT_REQUEST_BODY_LIMIT_BYTES,
            config.network.request_body_limit_bytes
        );
        assert_eq!(StorageConfig::default(), config.storage);
        Ok(())
    }

    #[test]
    fn parse_empty_config() -> anyhow::Result<()> {
        assert_eq!(Config::default(), Config::parse_ron("()")?);
        Ok(())
    }

    #[test]
    fn reject_malformed_config() {
        assert!(Config::parse_ron("(network: 42)").is_err());
    }

    #[test]
    fn missing_config_file() -> anyhow::Result<()> {
        let file_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("missing")
            .join(CONFIG_FILE_NAME);
        assert!(Config::read_from_file(&file_path)?.is_none());
        Ok(())
    }
}

use anyhow::Context;
use calccore::prelude::Limits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

/// Process-wide settings, built once at start-up and shared by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub limits: Limits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 10_000,
            limits: Limits::default(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading server config {}", path_ref.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing server config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Applies command-line overrides on top of a loaded or default config.
    pub fn with_overrides(mut self, bind_address: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(address) = bind_address {
            self.bind_address = address;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_replace_bind_settings() {
        let cfg = ServerConfig::default()
            .with_overrides(Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED)), Some(8080));
        assert_eq!(cfg.socket_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.limits, Limits::default());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"port: 8081\nlimits:\n  max_matrix_dim: 4\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ServerConfig::load(&path).unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.limits.max_matrix_dim, 4);
        assert_eq!(cfg.limits.max_even_count, 1000);
        assert_eq!(cfg.bind_address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = ServerConfig::load("/nonexistent/calc.yaml").unwrap_err();
        assert!(err.to_string().contains("reading server config"));
    }
}

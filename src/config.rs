use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::server::ServeOptions;

/// Server settings.
///
/// Resolved from defaults, then the YAML file named by `CONFIG`, then
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Log every response at info and raise the log level to debug
    pub log: bool,
    /// Document served for paths ending in `/`
    pub index: String,
    pub root: PathBuf,
    pub server_name: String,
    /// Cap on concurrently served connections; unset means no cap
    pub max_connections: Option<usize>,
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub enabled: bool,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            log: false,
            index: "index.html".to_string(),
            root: PathBuf::from("."),
            server_name: "yo".to_string(),
            max_connections: None,
            tls: TlsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var_os("CONFIG") {
            Some(path) => Self::from_yaml_file(Path::new(&path))?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML configuration")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Overrides fields from environment-style variables looked up by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("LOG") {
            self.log = parse_bool("LOG", &v)?;
        }
        if let Some(v) = lookup("INDEX") {
            self.index = v;
        }
        if let Some(v) = lookup("ROOT") {
            self.root = PathBuf::from(v);
        }
        if let Some(v) = lookup("SERVER_NAME") {
            self.server_name = v;
        }
        if let Some(v) = lookup("MAX_CONNECTIONS") {
            self.max_connections = Some(parse_var("MAX_CONNECTIONS", &v)?);
        }
        if let Some(v) = lookup("SSL") {
            self.tls.enabled = parse_bool("SSL", &v)?;
        }
        if let Some(v) = lookup("TLS_CERT") {
            self.tls.cert_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("TLS_KEY") {
            self.tls.key_path = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.index.is_empty() {
            bail!("index document name must not be empty");
        }
        if self.max_connections == Some(0) {
            bail!("max_connections must be at least 1");
        }
        if self.tls.enabled && (self.tls.cert_path.is_none() || self.tls.key_path.is_none()) {
            bail!("TLS is enabled but cert_path and key_path are not both set");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn serve_options(&self) -> ServeOptions {
        ServeOptions {
            root: self.root.clone(),
            index: self.index.clone(),
            server_name: self.server_name.clone(),
            log_responses: self.log,
        }
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {name}: {value:?}"))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("invalid value for {name}: {value:?}"),
    }
}

use std::net::{IpAddr, SocketAddr};

use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,

    // Public URL that share links are built from
    pub base_url: Url,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("Invalid host '{value}': {source}")]
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("Invalid base_url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let builder =
            config::Config::builder().add_source(config::Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    /// Resolves the settings from any prepared builder, filling in defaults
    /// for anything the sources leave out.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config = builder
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .build()?;

        let raw_host: String = config.get("host")?;
        let host: IpAddr = raw_host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                value: raw_host.clone(),
                source,
            })?;
        let port: u16 = config.get("port")?;

        let raw_base_url = config
            .get::<String>("base_url")
            .unwrap_or_else(|_| format!("http://{}/", SocketAddr::new(host, port)));
        let base_url = Url::parse(&raw_base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw_base_url.clone(),
            source,
        })?;

        Ok(Self {
            host,
            port,
            base_url,
        })
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

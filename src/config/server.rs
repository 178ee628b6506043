use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DATABASE_FILE_NAME: &str = ".timetracker.server.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("HOST must be an IP address, got {0:?}")]
    InvalidHost(String),
    #[error("Could not determine the home directory; set DATABASE_URL")]
    NoHomeDirectory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `DATABASE_URL`, falling back to port 8080 and
    /// a dotfile database in the home directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => default_database_url()?,
        };

        Ok(Self {
            host,
            port,
            database_url,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::from((ip, self.port)))
    }
}

pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DATABASE_FILE_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

fn default_database_url() -> Result<String, ConfigError> {
    Ok(format!("sqlite://{}", default_database_path()?.display()))
}

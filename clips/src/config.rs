/// Defines the configuration file format for the clips service.
use std::{
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::Error;

const DB_NAME: &str = "clips.sqlite";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// The data directory where the clip database is stored
    pub data_directory: PathBuf,
    /// The HTTP server configuration options
    pub http_api: HttpApi,
}

impl Config {
    pub fn database_url(&self) -> String {
        self.data_directory
            .join(DB_NAME)
            .to_str()
            .unwrap_or(DB_NAME)
            .to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HttpApi {
    /// The address and port the HTTP API binds to.
    pub url: SocketAddr,
}

impl Default for HttpApi {
    fn default() -> Self {
        HttpApi {
            url: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_directory: PathBuf::from(r"/var/lib/clips/"),
            http_api: Default::default(),
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            toml::ser::to_string_pretty(&self).unwrap_or_default()
        )
    }
}

/// Load a [`Config`] instance from the given path.
pub fn load_config(path: &str) -> Result<Config, Error> {
    let path = PathBuf::from(path);
    let config_string = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_string).map_err(|err| {
        println!("Example config format:\n\n{}", Config::default());
        err
    })?;
    Ok(config)
}

use once_cell::sync::Lazy;
use serde_derive::Deserialize;

pub static CONFIG: Lazy<Config> = Lazy::new(|| Config::new().expect("Config could not be loaded."));

#[derive(Debug, Deserialize)]
pub struct General {
    pub log_level: log::Level,
}

#[derive(Debug, Deserialize)]
pub struct Search {
    pub endpoint: String,
    /// Name of the environment variable holding the API credential.
    /// The credential itself never lives in a config file.
    pub api_key_var: String,
}

#[derive(Debug, Deserialize)]
pub struct Map {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub search: Search,
    pub map: Map,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut s = config::Config::new();

        // Start off by merging in the "default" configuration file
        s.merge(config::File::with_name("config/default"))?;

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        s.merge(config::File::with_name("config/local").required(false))?;

        s.try_into()
    }
}

pub mod logger;

use crate::{config::logger::LoggerConfig, handler, sqlite};
use envconfig::Envconfig;

#[derive(Envconfig, Debug)]
pub struct Config {
    #[envconfig(nested)]
    pub server: handler::config::Config,
    #[envconfig(nested)]
    pub database: sqlite::config::Config,
    #[envconfig(nested)]
    pub logger: LoggerConfig,
}

pub fn load() -> Result<Config, envconfig::Error> {
    Config::init_from_env()
}

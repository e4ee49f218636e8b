use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DB_URL", default = "sqlite://shortener.db")]
    pub url: String,
    #[envconfig(from = "DB_MAX_CONNECTIONS", default = "5")]
    pub max_connections: u32,
}

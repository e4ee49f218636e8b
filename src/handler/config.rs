use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    /// Public base used to build short and admin URLs in responses.
    #[envconfig(from = "BASE_URL", default = "http://localhost:8080")]
    pub base_url: String,
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,
}

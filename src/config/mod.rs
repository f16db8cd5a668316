use serde::Deserialize;

/// Local development placeholder, deployments set `MONGODB_URI`.
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "notes";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
    #[serde(default = "default_mongodb_database")]
    pub mongodb_database: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_uri: default_mongodb_uri(),
            mongodb_database: default_mongodb_database(),
            port: DEFAULT_PORT,
        }
    }
}

fn default_mongodb_uri() -> String {
    DEFAULT_MONGODB_URI.to_string()
}

fn default_mongodb_database() -> String {
    DEFAULT_MONGODB_DATABASE.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

pub fn load_config() -> Result<Config, envy::Error> {
    let config: Config = envy::from_env()?;

    if std::env::var_os("MONGODB_URI").is_none() {
        tracing::warn!(
            "MONGODB_URI is not set, falling back to {DEFAULT_MONGODB_URI}\
             \n This default is meant for local development only"
        );
    }

    Ok(config)
}

use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding `users.json`, `flights.json` and `bookings.json`
    pub path: String,
    /// Fill empty collections with sample flights and accounts on startup
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &run_mode, None)
    }

    /// Layer defaults, files under `dir`, then `SKYBOOK__*` variables. `env_vars`
    /// stands in for the process environment when given.
    fn load_from(
        dir: &Path,
        run_mode: &str,
        env_vars: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("server.port", 8080)?
            .set_default("storage.path", "./data")?
            .set_default("storage.seed_sample_data", true)?
            .set_default("auth.jwt_secret", "skybook-dev-secret")?
            .set_default("auth.jwt_expiration_seconds", 86400)?
            .set_default(
                "cors.allowed_origins",
                vec!["http://localhost:5173", "http://localhost:3000"],
            )?
            .add_source(file("default"))
            .add_source(file(run_mode))
            // Local overrides, not checked in
            .add_source(file("local"))
            // e.g. SKYBOOK__SERVER__PORT=9000, SKYBOOK__CORS__ALLOWED_ORIGINS=a,b
            .add_source(
                config::Environment::with_prefix("SKYBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()?;

        s.try_deserialize()
    }
}

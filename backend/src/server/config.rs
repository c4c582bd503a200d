//! Server settings and the assembled server configuration.

use feedback_backend::outbound::groq::GroqSettings;
use feedback_backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "feedback.db";
const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Listener and store settings loaded from CLI flags and `FEEDBACK_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEEDBACK")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Path of the SQLite database file.
    #[ortho_config(default = DEFAULT_DATABASE_URL.to_owned())]
    pub database_url: String,
    /// Maximum pooled store connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Everything [`super::create_server`] needs to wire the application.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: DbPool,
    pub(crate) groq: GroqSettings,
}

impl ServerConfig {
    pub fn new(bind_addr: (String, u16), db_pool: DbPool, groq: GroqSettings) -> Self {
        Self {
            bind_addr,
            db_pool,
            groq,
        }
    }
}

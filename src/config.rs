//! Process Configuration
//! Mission: Read startup settings once; nothing here changes after boot

use chrono::Duration;
use clap::Parser;
use std::net::SocketAddr;

/// Signing secret used when none is configured. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Lifetime of a login token unless overridden.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 20;

#[derive(Parser, Debug, Clone)]
#[command(name = "todoapp")]
#[command(about = "Todo API with bearer-token authentication")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "TODOAPP_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "TODOAPP_DB_PATH", default_value = "todos.db")]
    pub database_path: String,

    /// Symmetric secret for signing access tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "TOKEN_TTL_MINUTES", default_value_t = DEFAULT_TOKEN_TTL_MINUTES,
          value_parser = clap::value_parser!(i64).range(1..))]
    pub token_ttl_minutes: i64,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST,
          value_parser = clap::value_parser!(u32).range(4..=31))]
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.token_ttl_minutes)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

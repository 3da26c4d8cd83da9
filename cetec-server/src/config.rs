//! Process configuration
//!
//! Values come from flags, then environment variables, then `.env` files.
//! Nothing is reloaded after startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use urlencoding::encode;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;

/// Load `.env` from the current directory, then `~/.cetec/.env`.
///
/// dotenvy never overwrites a variable that is already set, so the real
/// environment wins over both files and the working directory wins over
/// the home directory. Returns the files that were loaded; this runs
/// before tracing is up, so the caller logs them.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(home) = dirs::home_dir() {
        let env_file = home.join(".cetec").join(".env");
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

/// Command-line arguments for the server binary
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cetec-server",
    version,
    about = "Serve person profiles over HTTP from a MySQL store"
)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CETEC_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Full database URL; overrides the individual --db-* settings
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[command(flatten)]
    pub db: DbArgs,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "CETEC_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(long)]
    pub debug: bool,
}

/// MySQL connection settings used when no DATABASE_URL is given
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    #[arg(long = "db-host", env = "DB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long = "db-port", env = "DB_PORT", default_value_t = 3306)]
    pub port: u16,

    #[arg(long = "db-user", env = "DB_USER", default_value = "root")]
    pub user: String,

    #[arg(long = "db-password", env = "DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long = "db-name", env = "DB_NAME", default_value = "cetec")]
    pub name: String,

    #[arg(long = "db-charset", env = "DB_CHARSET", default_value = "utf8mb4")]
    pub charset: String,

    /// Session time zone, e.g. "+00:00"; server default when unset
    #[arg(long = "db-timezone", env = "DB_TIMEZONE")]
    pub timezone: Option<String>,
}

impl DbArgs {
    /// Assemble a `mysql://` URL, percent-encoding the credentials.
    pub fn mysql_url(&self) -> Result<String> {
        let password = self
            .password
            .as_deref()
            .context("database password not configured; set DB_PASSWORD or DATABASE_URL")?;

        let mut url = format!(
            "mysql://{}:{}@{}:{}/{}?charset={}",
            encode(&self.user),
            encode(password),
            self.host,
            self.port,
            encode(&self.name),
            encode(&self.charset),
        );
        if let Some(tz) = &self.timezone {
            url.push_str("&timezone=");
            url.push_str(&encode(tz));
        }
        Ok(url)
    }
}

impl ServeArgs {
    pub fn database_url(&self) -> Result<String> {
        match &self.database_url {
            Some(url) => Ok(url.clone()),
            None => self.db.mysql_url(),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }
}

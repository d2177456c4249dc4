use clap::{Parser, ValueEnum};
use shortlink_store::connection_url;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "APP_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "APP_STORAGE_BACKEND";
pub const REDIS_ADDR_ENV: &str = "APP_REDIS_ADDR";
pub const REDIS_PASSWD_ENV: &str = "APP_REDIS_PASSWD";
pub const REDIS_DB_ENV: &str = "APP_REDIS_DB";
pub const LOG_FORMAT_ENV: &str = "APP_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_REDIS_ADDR: &str = "localhost:6379";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "redis")]
    Redis,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Redis => write!(f, "redis"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shortlink", about = "URL shortener backed by Redis")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Redis
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_ADDR_ENV, default_value = DEFAULT_REDIS_ADDR)]
    pub redis_addr: String,

    #[arg(long, env = REDIS_PASSWD_ENV, default_value = "", hide_env_values = true)]
    pub redis_passwd: String,

    #[arg(long, env = REDIS_DB_ENV, default_value_t = 0)]
    pub redis_db: i64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// The `redis://` url assembled from address, password and database.
    pub fn redis_url(&self) -> String {
        connection_url(&self.redis_addr, &self.redis_passwd, self.redis_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["shortlink"]).unwrap();

        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.storage, StorageBackendArg::Redis);
        assert_eq!(cli.redis_url(), "redis://localhost:6379/0");
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn explicit_arguments() {
        let cli = Cli::try_parse_from([
            "shortlink",
            "--storage",
            "in-memory",
            "--redis-addr",
            "cache:6380",
            "--redis-passwd",
            "pw",
            "--redis-db",
            "3",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.redis_url(), "redis://:pw@cache:6380/3");
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn redis_db_must_be_an_integer() {
        assert!(Cli::try_parse_from(["shortlink", "--redis-db", "zero"]).is_err());
    }
}

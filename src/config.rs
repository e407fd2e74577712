use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_busy_timeout_secs: u64,

    // CORS
    pub cors_allow_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::parse(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));

        // SERVER_ADDR wins; otherwise bind every interface on PORT.
        let server_addr = match lookup("SERVER_ADDR") {
            Some(addr) => addr,
            None => {
                let port: u16 = parse_or("PORT", lookup("PORT"), 8000)?;
                format!("0.0.0.0:{port}")
            }
        };

        // Database
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://randgate.db".to_string());
        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            10,
        )?;
        let database_busy_timeout_secs = parse_or(
            "DATABASE_BUSY_TIMEOUT_SECS",
            lookup("DATABASE_BUSY_TIMEOUT_SECS"),
            5,
        )?;

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Settings {
            env,
            server_addr,
            database_url,
            database_max_connections,
            database_busy_timeout_secs,
            cors_allow_origins,
        })
    }

    /// `*` in the origin list opens CORS to every origin.
    pub fn cors_allows_any_origin(&self) -> bool {
        self.cors_allow_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number, got {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_local_sqlite_setup() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.env, Environment::Dev);
        assert_eq!(s.server_addr, "0.0.0.0:8000");
        assert_eq!(s.database_url, "sqlite://randgate.db");
        assert_eq!(s.database_max_connections, 10);
        assert_eq!(s.database_busy_timeout_secs, 5);
        assert!(s.cors_allows_any_origin());
    }

    #[test]
    fn port_is_used_when_no_server_addr() {
        let s = settings(&[("PORT", "9090")]).unwrap();
        assert_eq!(s.server_addr, "0.0.0.0:9090");

        let s = settings(&[("PORT", "9090"), ("SERVER_ADDR", "127.0.0.1:3000")]).unwrap();
        assert_eq!(s.server_addr, "127.0.0.1:3000");
    }

    #[test]
    fn invalid_numbers_are_errors() {
        assert!(settings(&[("PORT", "eighty")]).is_err());
        assert!(settings(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
        assert!(settings(&[("DATABASE_BUSY_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn origin_list_is_trimmed() {
        let s = settings(&[
            ("ENV", "production"),
            ("CORS_ALLOW_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();
        assert!(s.env.is_prod());
        assert_eq!(
            s.cors_allow_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!s.cors_allows_any_origin());
    }
}

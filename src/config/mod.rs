use crate::error::{Error, Result};
use crate::search::{MatchMode, PaginationStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Strategy used by `GET /search`
    pub default_strategy: PaginationStrategy,
    pub match_mode: MatchMode,
    /// Report a query with zero matches as 404 instead of an empty 200
    pub empty_as_not_found: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub api_max_limit: usize,
    pub default_page_size: usize,
    /// Page size of `GET /search/{page}`, not overridable by the caller
    pub fixed_page_size: usize,
    pub max_pages: usize, // Caps the cursor walk's round trips
    pub max_request_body_size: usize,
}

fn env_or<T: FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let external_url = std::env::var("EXTERNAL_URL").ok();

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", "25")?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", "5")?,
                connection_timeout_seconds: env_or("DATABASE_CONNECTION_TIMEOUT", "30")?,
                idle_timeout_seconds: env_or("DATABASE_IDLE_TIMEOUT", "600")?,
            },
            server: ServerConfig {
                host,
                port: env_or("PORT", "3000")?,
                external_url,
                api_rate_limit: env_or("API_RATE_LIMIT", "100")?,
            },
            search: SearchConfig {
                default_strategy: env_or("SEARCH_STRATEGY", "cursor_walk")?,
                match_mode: env_or("SEARCH_MATCH_MODE", "token")?,
                empty_as_not_found: env_or("SEARCH_EMPTY_AS_NOT_FOUND", "true")?,
            },
            pagination: PaginationConfig {
                api_max_limit: env_or("API_MAX_LIMIT", "100")?,
                default_page_size: env_or("DEFAULT_PAGE_SIZE", "20")?,
                fixed_page_size: env_or("FIXED_PAGE_SIZE", "10")?,
                max_pages: env_or("MAX_PAGES", "1000")?,
                max_request_body_size: env_or("MAX_REQUEST_BODY_SIZE", "1048576")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(Error::Config(
                "DATABASE_MIN_CONNECTIONS exceeds DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        let pagination = &self.pagination;
        if pagination.api_max_limit == 0
            || pagination.default_page_size == 0
            || pagination.fixed_page_size == 0
            || pagination.max_pages == 0
        {
            return Err(Error::Config("Page sizes and limits must be non-zero".to_string()));
        }

        if pagination.fixed_page_size > pagination.api_max_limit {
            return Err(Error::Config(
                "FIXED_PAGE_SIZE must not exceed API_MAX_LIMIT".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL clients should use to reach this server
    pub fn server_url(&self) -> String {
        self.server
            .external_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            external_url: None,
            api_rate_limit: 100,
        },
        search: SearchConfig {
            default_strategy: PaginationStrategy::CursorWalk,
            match_mode: MatchMode::Token,
            empty_as_not_found: true,
        },
        pagination: PaginationConfig {
            api_max_limit: 100,
            default_page_size: 20,
            fixed_page_size: 10,
            max_pages: 1000,
            max_request_body_size: 1048576,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.pagination.fixed_page_size = 500;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.database.min_connections = 10;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_server_url() {
        let mut settings = test_settings();
        assert_eq!(settings.server_url(), "http://127.0.0.1:3000");

        settings.server.external_url = Some("https://recipes.example.com".to_string());
        assert_eq!(settings.server_url(), "https://recipes.example.com");
    }
}

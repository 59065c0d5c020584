use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub public_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// SMTP settings for transactional mail. When `enabled` is false the
/// mailer logs outgoing messages instead of connecting anywhere, which is
/// what development and CI want.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub admin_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("PUBLIC_BASE_URL") {
            self.server.public_base_url = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // API overrides
        if let Ok(v) = env::var("API_DEFAULT_PAGE_SIZE") {
            self.api.default_page_size = v.parse().unwrap_or(self.api.default_page_size);
        }
        if let Ok(v) = env::var("API_MAX_PAGE_SIZE") {
            self.api.max_page_size = v.parse().unwrap_or(self.api.max_page_size);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes =
                v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("AUTH_COOKIE_NAME") {
            self.security.cookie_name = v;
        }
        if let Ok(v) = env::var("AUTH_COOKIE_SECURE") {
            self.security.cookie_secure = v.parse().unwrap_or(self.security.cookie_secure);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // SMTP overrides
        if let Ok(v) = env::var("SMTP_ENABLED") {
            self.smtp.enabled = v.parse().unwrap_or(self.smtp.enabled);
        }
        if let Ok(v) = env::var("SMTP_HOST") {
            self.smtp.host = v;
        }
        if let Ok(v) = env::var("SMTP_PORT") {
            self.smtp.port = v.parse().unwrap_or(self.smtp.port);
        }
        if let Ok(v) = env::var("SMTP_USERNAME") {
            self.smtp.username = v;
        }
        if let Ok(v) = env::var("SMTP_PASSWORD") {
            self.smtp.password = v;
        }
        if let Ok(v) = env::var("SMTP_FROM_ADDRESS") {
            self.smtp.from_address = v;
        }
        if let Ok(v) = env::var("ADMIN_NOTIFY_ADDRESS") {
            self.smtp.admin_address = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                public_base_url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                default_page_size: 20,
                max_page_size: 200,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
                cookie_name: "civica_admin".to_string(),
                cookie_secure: false,
                bcrypt_cost: 10,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            smtp: SmtpConfig {
                enabled: false,
                host: "localhost".to_string(),
                port: 1025,
                username: String::new(),
                password: String::new(),
                from_address: "no-reply@association.local".to_string(),
                admin_address: "admin@association.local".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                public_base_url: "https://staging.association.example".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
                run_migrations: true,
            },
            api: ApiConfig {
                default_page_size: 20,
                max_page_size: 100,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                cookie_name: "civica_admin".to_string(),
                cookie_secure: true,
                bcrypt_cost: 12,
                enable_cors: true,
                cors_origins: vec!["https://staging.association.example".to_string()],
            },
            smtp: SmtpConfig {
                enabled: true,
                host: "localhost".to_string(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from_address: "no-reply@association.example".to_string(),
                admin_address: "contact@association.example".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                public_base_url: "https://association.example".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
                run_migrations: false,
            },
            api: ApiConfig {
                default_page_size: 20,
                max_page_size: 100,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 8,
                cookie_name: "civica_admin".to_string(),
                cookie_secure: true,
                bcrypt_cost: 12,
                enable_cors: true,
                cors_origins: vec!["https://association.example".to_string()],
            },
            smtp: SmtpConfig {
                enabled: true,
                host: "localhost".to_string(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from_address: "no-reply@association.example".to_string(),
                admin_address: "contact@association.example".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.smtp.enabled);
        assert!(!config.security.cookie_secure);
        assert_eq!(config.api.default_page_size, 20);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.smtp.enabled);
        assert!(config.security.cookie_secure);
        assert_eq!(config.security.jwt_expiry_hours, 8);
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn test_page_size_caps() {
        let config = AppConfig::production();
        assert!(config.api.default_page_size <= config.api.max_page_size);
    }
}

use std::env;

use crate::utils::AppError;

/// Runtime configuration, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub identity_token_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::InvalidRequest("DATABASE_URL must be set".to_string()))?;

        let port = get("PORT", "3002")
            .parse::<u16>()
            .map_err(|e| AppError::InvalidRequest(format!("Invalid PORT: {}", e)))?;

        let identity_token_ttl_secs = get("IDENTITY_TOKEN_TTL_SECS", "3600")
            .parse::<i64>()
            .map_err(|e| AppError::InvalidRequest(format!("Invalid IDENTITY_TOKEN_TTL_SECS: {}", e)))?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| AppError::InvalidRequest(format!("Invalid BCRYPT_COST: {}", e)))?,
            None => bcrypt::DEFAULT_COST,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: get("HOST", "0.0.0.0"),
            port,
            database_url,
            environment: get("APP_ENV", "development"),
            jwt_secret: get("JWT_SECRET", "default-secret-change-me"),
            jwt_issuer: get("JWT_ISSUER", "interview-prep-service"),
            jwt_audience: get("JWT_AUDIENCE", "interview-prep-web"),
            identity_token_ttl_secs,
            bcrypt_cost,
            cors_allowed_origins,
        })
    }

    /// Session cookies are only marked `Secure` in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

//! Authentication configuration shared by every service
//!
//! All services must load the same signing secret and algorithm for
//! cross-service verification to work; this is a deployment-time invariant
//! enforced through the shared environment contract below.

use crate::error::{CoreError, CoreResult};

/// Default service names recognized at the internal boundary
const DEFAULT_KNOWN_SERVICES: &[&str] = &[
    "auth-service",
    "candidate-service",
    "company-service",
    "payment-service",
    "document-service",
    "notification-service",
    "audit-service",
    "search-service",
    "cv-parser-service",
];

/// Token signing and trust configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared symmetric signing secret (identical across all services)
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_ttl_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_ttl_days: i64,
    /// Service token lifetime in seconds (minutes-scale, not hours)
    pub service_ttl_seconds: i64,
    /// Service names accepted at the service-to-service boundary
    pub known_services: Vec<String>,
}

impl AuthConfig {
    /// Create a configuration with the given secret and default TTLs
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl_minutes: 30,
            refresh_ttl_days: 30,
            service_ttl_seconds: 300,
            known_services: DEFAULT_KNOWN_SERVICES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// A missing `TALENTGATE_JWT_SECRET` is a fatal startup condition for the
    /// owning service, never a per-call error.
    pub fn from_env() -> CoreResult<Self> {
        let jwt_secret = std::env::var("TALENTGATE_JWT_SECRET").map_err(|_| {
            CoreError::Config("TALENTGATE_JWT_SECRET is not set".to_string())
        })?;

        let mut config = Self::new(jwt_secret);

        if let Ok(minutes) = std::env::var("TALENTGATE_ACCESS_TTL_MINUTES") {
            config.access_ttl_minutes = minutes
                .parse()
                .map_err(|_| CoreError::Config("Invalid TALENTGATE_ACCESS_TTL_MINUTES".into()))?;
        }
        if let Ok(days) = std::env::var("TALENTGATE_REFRESH_TTL_DAYS") {
            config.refresh_ttl_days = days
                .parse()
                .map_err(|_| CoreError::Config("Invalid TALENTGATE_REFRESH_TTL_DAYS".into()))?;
        }
        if let Ok(seconds) = std::env::var("TALENTGATE_SERVICE_TTL_SECONDS") {
            config.service_ttl_seconds = seconds
                .parse()
                .map_err(|_| CoreError::Config("Invalid TALENTGATE_SERVICE_TTL_SECONDS".into()))?;
        }
        if let Ok(services) = std::env::var("TALENTGATE_KNOWN_SERVICES") {
            config.known_services = services
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Whether a service name is recognized at the internal boundary
    pub fn is_known_service(&self, name: &str) -> bool {
        self.known_services.iter().any(|s| s == name)
    }
}

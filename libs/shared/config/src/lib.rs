use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub platform_url: String,
    pub platform_anon_key: String,
    pub platform_jwt_secret: String,
    pub refresh_threshold_secs: u64,
    pub invite_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            platform_url: env::var("PLATFORM_URL")
                .unwrap_or_else(|_| {
                    warn!("PLATFORM_URL not set, using empty value");
                    String::new()
                }),
            platform_anon_key: env::var("PLATFORM_ANON_KEY")
                .unwrap_or_else(|_| {
                    warn!("PLATFORM_ANON_KEY not set, using empty value");
                    String::new()
                }),
            platform_jwt_secret: env::var("PLATFORM_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("PLATFORM_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            refresh_threshold_secs: env::var("DEALGRID_REFRESH_THRESHOLD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            invite_ttl_hours: env::var("DEALGRID_INVITE_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(72),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.platform_url.is_empty()
            && !self.platform_anon_key.is_empty()
            && !self.platform_jwt_secret.is_empty()
    }
}

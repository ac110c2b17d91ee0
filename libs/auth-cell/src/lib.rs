pub mod handlers;
pub mod router;
pub mod services;

pub use services::session::{
    ExpiryWatcher, InMemorySessionStore, PlatformTokenRefresher, RefreshPolicy, SessionMaterial,
    SessionStore, ThresholdRefreshPolicy, TokenExpiryTracker, TokenRefresher, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY, TOKEN_EXPIRY_KEY,
};

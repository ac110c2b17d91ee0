use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::platform::PlatformClient;
use shared_models::auth::SessionSnapshot;

/// Keys under which the session collaborator persists session material.
/// The expiry value is an integer epoch-millisecond timestamp.
pub const TOKEN_EXPIRY_KEY: &str = "token_expires_at";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

// ==============================================================================
// COLLABORATOR SEAMS
// ==============================================================================

/// Key/value persistence owned by the session collaborator. The tracker
/// only reads the expiry instant and writes back refreshed material.
pub trait SessionStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
}

#[derive(Default)]
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiry_millis(expires_at_ms: i64) -> Self {
        let store = Self::new();
        store.write(TOKEN_EXPIRY_KEY, expires_at_ms.to_string());
        store
    }
}

impl SessionStore for InMemorySessionStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.values.write().unwrap().insert(key.to_string(), value);
    }
}

/// Owns the refresh threshold; the tracker delegates the decision here.
pub trait RefreshPolicy: Send + Sync {
    fn needs_refresh(&self, seconds_until_expiry: u64) -> bool;
}

pub struct ThresholdRefreshPolicy {
    threshold_secs: u64,
}

impl ThresholdRefreshPolicy {
    pub fn new(threshold_secs: u64) -> Self {
        Self { threshold_secs }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.refresh_threshold_secs)
    }
}

impl RefreshPolicy for ThresholdRefreshPolicy {
    fn needs_refresh(&self, seconds_until_expiry: u64) -> bool {
        seconds_until_expiry < self.threshold_secs
    }
}

/// Fresh session material handed back by a successful refresh.
#[derive(Debug, Clone)]
pub struct SessionMaterial {
    pub access_token: String,
    pub expires_at_ms: i64,
}

#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> anyhow::Result<SessionMaterial>;
}

/// Refreshes the platform session with the persisted refresh token.
pub struct PlatformTokenRefresher {
    platform: PlatformClient,
    store: Arc<dyn SessionStore>,
}

impl PlatformTokenRefresher {
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            platform: PlatformClient::new(config),
            store,
        }
    }
}

#[async_trait]
impl TokenRefresher for PlatformTokenRefresher {
    async fn refresh(&self) -> anyhow::Result<SessionMaterial> {
        let refresh_token = self
            .store
            .read(REFRESH_TOKEN_KEY)
            .ok_or_else(|| anyhow::anyhow!("No refresh token persisted"))?;

        let refreshed = self.platform.refresh_session(&refresh_token).await?;

        Ok(SessionMaterial {
            access_token: refreshed.access_token,
            expires_at_ms: Utc::now().timestamp_millis() + refreshed.expires_in * 1000,
        })
    }
}

// ==============================================================================
// TOKEN EXPIRY TRACKER
// ==============================================================================

/// Derives seconds-until-expiry and the expired/needs-refresh flags from
/// the persisted expiry instant, and runs the manual refresh with a
/// single-in-flight guarantee.
pub struct TokenExpiryTracker {
    store: Arc<dyn SessionStore>,
    policy: Arc<dyn RefreshPolicy>,
    refresher: Arc<dyn TokenRefresher>,
    refresh_in_flight: AtomicBool,
}

impl TokenExpiryTracker {
    pub fn new(
        store: Arc<dyn SessionStore>,
        policy: Arc<dyn RefreshPolicy>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            store,
            policy,
            refresher,
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    fn expiry_millis(&self) -> Option<i64> {
        self.store
            .read(TOKEN_EXPIRY_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    /// Whole seconds until the persisted expiry instant, rounded, clamped
    /// at zero. A missing or unparseable value counts as already expired.
    pub fn seconds_until_expiry(&self) -> u64 {
        let Some(expires_at_ms) = self.expiry_millis() else {
            return 0;
        };

        let remaining_ms = expires_at_ms - Utc::now().timestamp_millis();
        if remaining_ms <= 0 {
            0
        } else {
            ((remaining_ms + 500) / 1000) as u64
        }
    }

    pub fn is_expired(&self) -> bool {
        self.seconds_until_expiry() == 0
    }

    pub fn needs_refresh(&self) -> bool {
        self.policy.needs_refresh(self.seconds_until_expiry())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let seconds_until_expiry = self.seconds_until_expiry();
        SessionSnapshot {
            seconds_until_expiry,
            is_expired: seconds_until_expiry == 0,
            needs_refresh: self.policy.needs_refresh(seconds_until_expiry),
            checked_at: Utc::now(),
        }
    }

    /// Invoke the external refresh call. A second invocation while one is
    /// in flight is suppressed; failures are logged and leave the
    /// persisted state unchanged. Returns whether a refresh happened.
    pub async fn force_refresh(&self) -> bool {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Token refresh already in flight, skipping");
            return false;
        }

        let outcome = match self.refresher.refresh().await {
            Ok(material) => {
                self.store.write(ACCESS_TOKEN_KEY, material.access_token);
                self.store
                    .write(TOKEN_EXPIRY_KEY, material.expires_at_ms.to_string());
                info!("Platform session refreshed");
                true
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                false
            }
        };

        self.refresh_in_flight.store(false, Ordering::SeqCst);
        outcome
    }
}

// ==============================================================================
// EXPIRY WATCHER
// ==============================================================================

/// Recomputes a session snapshot every second and publishes it over a
/// watch channel. When the refresh policy fires, the watcher triggers a
/// refresh through the tracker (same in-flight guard as manual refresh).
/// Stopping or dropping the watcher cancels the task.
pub struct ExpiryWatcher {
    shutdown: watch::Sender<bool>,
    snapshots: watch::Receiver<SessionSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl ExpiryWatcher {
    pub fn spawn(tracker: Arc<TokenExpiryTracker>) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(tracker.snapshot());

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if tracker.needs_refresh() {
                            tracker.force_refresh().await;
                        }
                        let _ = snapshot_tx.send(tracker.snapshot());
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            debug!("Expiry watcher stopping");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            shutdown: shutdown_tx,
            snapshots: snapshot_rx,
            handle: Some(handle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        // Teardown must not leave the interval ticking.
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

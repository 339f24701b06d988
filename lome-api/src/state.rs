use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Duration, Utc};
use lome_booking::{BookingPanel, HandoffChannel, MessagingLink};
use lome_core::{Clock, DocumentStore};
use lome_shared::SiteContext;
use lome_store::app_config::{RateLimitConfig, SessionConfig};
use lome_store::RedisClient;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::launcher::ClientLauncher;

/// One visitor's mounted booking panel and page chrome
pub struct Session {
    pub panel: BookingPanel,
    pub site: Mutex<SiteContext>,
    last_seen: Mutex<DateTime<Utc>>,
}

impl Session {
    pub fn new(panel: BookingPanel, site: SiteContext, now: DateTime<Utc>) -> Self {
        Self {
            panel,
            site: Mutex::new(site),
            last_seen: Mutex::new(now),
        }
    }

    pub fn touch(&self, now: DateTime<Utc>) {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_idle(&self, now: DateTime<Utc>, limit: Duration) -> bool {
        now - self.last_seen() > limit
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub redis: Option<Arc<RedisClient>>,
    pub clock: Arc<dyn Clock>,
    pub handoff: HandoffChannel,
    pub sessions: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
    pub session_idle: Duration,
    pub rate_limit: RateLimitConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        redis: Option<Arc<RedisClient>>,
        clock: Arc<dyn Clock>,
        link: MessagingLink,
        source: String,
        rate_limit: RateLimitConfig,
        sessions: SessionConfig,
    ) -> Self {
        let handoff = HandoffChannel::new(store.clone(), Arc::new(ClientLauncher), link, source);

        Self {
            store,
            redis,
            clock,
            handoff,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_idle: Duration::seconds(sessions.idle_timeout_seconds),
            rate_limit,
        }
    }

    /// Drop every session idle longer than `session_idle`, returning how many went
    pub async fn evict_idle_sessions(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.session_idle));
        before - sessions.len()
    }
}

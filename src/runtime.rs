//! Runtime for executing sessions
//!
//! Every connected student owns an independent [`SessionRuntime`]. Actions on
//! one session are serialized by its mutex; sessions share only the
//! read-only question bank and the counselor. Sessions idle for longer than
//! the configured TTL are evicted.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::{SessionError, SessionRuntime};

use crate::counselor::Counselor;
use crate::quiz::QuestionBank;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Handle to a running session
pub type SessionHandle = Arc<Mutex<SessionRuntime>>;

/// Manager for all in-memory sessions
pub struct SessionManager {
    bank: Arc<QuestionBank>,
    counselor: Arc<Counselor>,
    idle_ttl: Duration,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(bank: Arc<QuestionBank>, counselor: Arc<Counselor>, idle_ttl: Duration) -> Self {
        Self {
            bank,
            counselor,
            idle_ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Start a fresh session with default state
    pub async fn create(&self) -> (String, SessionHandle) {
        let id = uuid::Uuid::new_v4().to_string();
        let runtime = SessionRuntime::new(id.clone(), self.bank.clone(), self.counselor.clone());
        let handle = Arc::new(Mutex::new(runtime));

        self.evict_idle().await;

        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), handle.clone());
        tracing::info!(session_id = %id, active = sessions.len(), "Session created");
        drop(sessions);
        (id, handle)
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Drop every session idle for at least the TTL; returns how many went.
    ///
    /// A session whose lock is held is mid-action and always kept.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, handle| match handle.try_lock() {
            Ok(runtime) if runtime.idle_for() >= self.idle_ttl => {
                tracing::info!(session_id = %id, "Session expired");
                false
            }
            _ => true,
        });
        before - sessions.len()
    }

    /// Run [`Self::evict_idle`] on a fixed period until the manager is dropped
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                let evicted = manager.evict_idle().await;
                if evicted > 0 {
                    tracing::debug!(evicted, "Idle sessions evicted");
                }
            }
        })
    }
}

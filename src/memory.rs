//! Conversational memory — bounded per-visitor chat histories.
//!
//! DESIGN
//! ======
//! A process-wide map from visitor id to a shared history handle. The first
//! access for a visitor seeds the history with one system message; later
//! accesses return the same handle so appends are visible to subsequent
//! turns. Each history sits behind its own `tokio::sync::Mutex`, held across
//! the whole chat turn — concurrent turns for one visitor serialize, while
//! different visitors never contend.
//!
//! Retention is explicit: histories are capped at a message count (the seed
//! system message always survives trimming) and a background sweeper evicts
//! visitors idle past a TTL. Memory is deliberately not durable; a restart
//! clears all conversations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::llm::{Message, Role};

/// Seed system message for every new visitor history.
pub const SEED_SYSTEM_MESSAGE: &str = "You are a helpful assistant";

const DEFAULT_MAX_MESSAGES: usize = 64;
const DEFAULT_IDLE_TTL_SECS: u64 = 6 * 60 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Retention knobs, loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct MemoryConfig {
    /// Hard cap on messages per visitor history.
    pub max_messages: usize,
    /// Idle time after which a visitor's history is evicted.
    pub idle_ttl: Duration,
    /// How often the sweeper runs.
    pub sweep_interval: Duration,
}

impl MemoryConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_messages: env_parse("CHAT_MEMORY_MAX_MESSAGES", DEFAULT_MAX_MESSAGES),
            idle_ttl: Duration::from_secs(env_parse("CHAT_MEMORY_IDLE_TTL_SECS", DEFAULT_IDLE_TTL_SECS)),
            sweep_interval: Duration::from_secs(env_parse(
                "CHAT_MEMORY_SWEEP_INTERVAL_SECS",
                DEFAULT_SWEEP_INTERVAL_SECS,
            )),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            idle_ttl: Duration::from_secs(DEFAULT_IDLE_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// One visitor's ordered conversation state.
#[derive(Debug)]
pub struct VisitorHistory {
    pub messages: Vec<Message>,
    last_active: Instant,
}

impl VisitorHistory {
    fn seeded() -> Self {
        Self { messages: vec![Message::system(SEED_SYSTEM_MESSAGE)], last_active: Instant::now() }
    }

    /// Append a turn and refresh the activity timestamp.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_active = Instant::now();
    }

    /// Drop the oldest non-seed turns until the history fits `max` messages.
    /// The post-trim conversation always resumes on a user turn; Anthropic
    /// rejects message lists that open with an assistant message.
    pub fn trim_to(&mut self, max: usize) {
        if self.messages.len() <= max {
            return;
        }
        let excess = self.messages.len() - max;
        // The seed system message at index 0 is never trimmed.
        let start = usize::from(self.messages.first().is_some_and(|m| m.role == Role::System));
        let end = (start + excess).min(self.messages.len());
        self.messages.drain(start..end);
        while self.messages.get(start).is_some_and(|m| m.role == Role::Assistant) {
            self.messages.remove(start);
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.last_active = Instant::now() - by;
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-wide conversational memory store. Clone is cheap — all state is
/// behind an `Arc`.
#[derive(Clone)]
pub struct ChatMemory {
    visitors: Arc<RwLock<HashMap<String, Arc<Mutex<VisitorHistory>>>>>,
    config: MemoryConfig,
}

impl ChatMemory {
    #[must_use]
    pub fn new(config: MemoryConfig) -> Self {
        Self { visitors: Arc::new(RwLock::new(HashMap::new())), config }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(MemoryConfig::from_env())
    }

    /// Fetch the visitor's history handle, creating a seeded one on first
    /// contact. The id is an opaque caller-supplied string; no format is
    /// enforced and the empty string is a valid key.
    pub async fn get_or_create(&self, visitor_id: &str) -> Arc<Mutex<VisitorHistory>> {
        {
            let visitors = self.visitors.read().await;
            if let Some(handle) = visitors.get(visitor_id) {
                return Arc::clone(handle);
            }
        }

        let mut visitors = self.visitors.write().await;
        let handle = visitors
            .entry(visitor_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VisitorHistory::seeded())));
        Arc::clone(handle)
    }

    #[must_use]
    pub fn max_messages(&self) -> usize {
        self.config.max_messages
    }

    /// Current number of tracked visitors.
    pub async fn visitor_count(&self) -> usize {
        self.visitors.read().await.len()
    }

    /// Evict histories idle past the TTL. Visitors with a turn in flight
    /// (history mutex held) are skipped. Returns the number evicted.
    pub async fn sweep(&self) -> usize {
        let mut visitors = self.visitors.write().await;
        let before = visitors.len();
        let idle_ttl = self.config.idle_ttl;
        visitors.retain(|_, handle| match handle.try_lock() {
            Ok(history) => history.last_active.elapsed() < idle_ttl,
            Err(_) => true,
        });
        before - visitors.len()
    }
}

/// Spawn the background eviction task. Returns a handle for shutdown.
pub fn spawn_sweeper_task(memory: ChatMemory) -> JoinHandle<()> {
    let interval = memory.config.sweep_interval;
    info!(
        max_messages = memory.config.max_messages,
        idle_ttl_secs = memory.config.idle_ttl.as_secs(),
        sweep_interval_secs = interval.as_secs(),
        "chat memory sweeper configured"
    );
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let evicted = memory.sweep().await;
            if evicted > 0 {
                debug!(evicted, "chat memory sweep evicted idle visitors");
            }
        }
    })
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

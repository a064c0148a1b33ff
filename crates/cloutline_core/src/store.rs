//! crates/cloutline_core/src/store.rs
//!
//! Favorites, stats, history and settings persisted as whole JSON documents
//! behind the `KeyValueStore` port.
//!
//! Every call re-reads or fully overwrites its key; nothing is cached. Reads are
//! soft: a missing backend or a corrupt document degrades to the default value.
//! Read-modify-write sequences hold a per-key lock so concurrent callers do not
//! lose updates.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::{ActionKind, GenerationHistory, GenerationSettings, Hook, UserStats};
use crate::ports::{KeyValueStore, PortError, PortResult};

pub const FAVORITES_KEY: &str = "cloutline-favorites";
pub const STATS_KEY: &str = "cloutline-stats";
pub const HISTORY_KEY: &str = "cloutline-history";
pub const SETTINGS_KEY: &str = "cloutline-settings";

/// Maximum number of generation batches kept in history.
pub const HISTORY_LIMIT: usize = 50;

pub struct PersistenceStore {
    backend: Arc<dyn KeyValueStore>,
    favorites_lock: Mutex<()>,
    stats_lock: Mutex<()>,
    history_lock: Mutex<()>,
}

impl PersistenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            favorites_lock: Mutex::new(()),
            stats_lock: Mutex::new(()),
            history_lock: Mutex::new(()),
        }
    }

    //=====================================================================================
    // Favorites
    //=====================================================================================

    pub async fn get_favorites(&self) -> Vec<Hook> {
        self.read_or_default(FAVORITES_KEY, Vec::new).await
    }

    /// Replaces the whole favorites list.
    pub async fn save_favorites(&self, favorites: &[Hook]) -> PortResult<()> {
        self.write(FAVORITES_KEY, favorites).await
    }

    /// Adds the hook if it is not a favorite yet, removes it otherwise.
    /// Returns whether the hook is a favorite afterwards.
    pub async fn toggle_favorite(&self, hook: Hook) -> PortResult<bool> {
        let favorited = {
            let _guard = self.favorites_lock.lock().await;
            let mut favorites = self.get_favorites().await;
            let favorited = match favorites.iter().position(|f| f.id == hook.id) {
                Some(index) => {
                    favorites.remove(index);
                    false
                }
                None => {
                    favorites.push(hook);
                    true
                }
            };
            self.save_favorites(&favorites).await?;
            favorited
        };
        self.resync_favorites_count().await;
        Ok(favorited)
    }

    /// Removes the favorite with the given id.
    pub async fn remove_favorite(&self, hook_id: &str) -> PortResult<Vec<Hook>> {
        let favorites = {
            let _guard = self.favorites_lock.lock().await;
            let mut favorites = self.get_favorites().await;
            let before = favorites.len();
            favorites.retain(|f| f.id != hook_id);
            if favorites.len() == before {
                return Err(PortError::NotFound(format!("Favorite {} not found", hook_id)));
            }
            self.save_favorites(&favorites).await?;
            favorites
        };
        self.resync_favorites_count().await;
        Ok(favorites)
    }

    /// Runs after the favorites list is saved. A failed stats write leaves
    /// `favoritesCount` stale until the next favorite action.
    async fn resync_favorites_count(&self) {
        if let Err(e) = self.record_action(ActionKind::Favorite).await {
            warn!(error = %e, "failed to record favorite action");
        }
    }

    //=====================================================================================
    // Stats
    //=====================================================================================

    pub async fn get_stats(&self) -> UserStats {
        self.read_or_default(STATS_KEY, || UserStats::fresh(Utc::now()))
            .await
    }

    pub async fn save_stats(&self, stats: &UserStats) -> PortResult<()> {
        self.write(STATS_KEY, stats).await
    }

    pub async fn record_action(&self, kind: ActionKind) -> PortResult<UserStats> {
        self.record_action_at(kind, Utc::now()).await
    }

    /// Bumps the counter for `kind` and advances the streak as of `now`.
    pub async fn record_action_at(
        &self,
        kind: ActionKind,
        now: DateTime<Utc>,
    ) -> PortResult<UserStats> {
        let _guard = self.stats_lock.lock().await;
        let mut stats = self.get_stats().await;

        match kind {
            ActionKind::Generate => stats.total_generated += 1,
            ActionKind::Copy => stats.total_copied += 1,
            ActionKind::Share => stats.total_shared += 1,
            ActionKind::Favorite => {
                stats.favorites_count = self.get_favorites().await.len() as u64;
            }
        }
        advance_streak(&mut stats, now);

        self.save_stats(&stats).await?;
        Ok(stats)
    }

    //=====================================================================================
    // History
    //=====================================================================================

    pub async fn get_history(&self) -> Vec<GenerationHistory> {
        self.read_or_default(HISTORY_KEY, Vec::new).await
    }

    /// Appends an entry, keeping only the most recent `HISTORY_LIMIT`.
    pub async fn add_to_history(&self, entry: GenerationHistory) -> PortResult<()> {
        let _guard = self.history_lock.lock().await;
        let mut history = self.get_history().await;
        history.push(entry);
        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }
        self.write(HISTORY_KEY, &history).await
    }

    //=====================================================================================
    // Settings
    //=====================================================================================

    pub async fn get_settings(&self) -> GenerationSettings {
        self.read_or_default(SETTINGS_KEY, GenerationSettings::default)
            .await
    }

    pub async fn save_settings(&self, settings: &GenerationSettings) -> PortResult<()> {
        self.write(SETTINGS_KEY, settings).await
    }

    //=====================================================================================
    // Helpers
    //=====================================================================================

    async fn read_or_default<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.backend.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "stored document is malformed, using default");
                    default()
                }
            },
            Ok(None) => default(),
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using default");
                default()
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PortResult<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.backend.put(key, &raw).await
    }
}

/// Streak rule: one elapsed day extends the streak, a longer gap restarts it,
/// a same-day action leaves it alone. `last_visit` always moves to `now`.
pub fn advance_streak(stats: &mut UserStats, now: DateTime<Utc>) {
    let elapsed_days = (now - stats.last_visit).num_days();
    if elapsed_days == 1 {
        stats.streak += 1;
    } else if elapsed_days > 1 {
        stats.streak = 1;
    }
    stats.last_visit = now;
}

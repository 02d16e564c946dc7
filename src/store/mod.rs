//! In-memory user registry with per-user serialization.
//!
//! The registry maps each user id to an `Arc<Mutex<UserRecord>>`. Message
//! handling locks the sender's record for the whole operation, so
//! concurrent messages from one user never interleave a read-then-write,
//! while different users proceed in parallel. The registry-wide lock is
//! only held to look up or create an entry, never across gateway I/O.

pub mod model;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::{Mutex, RwLock};

use crate::engine::state::ConversationState;
use crate::gateway::WeatherGateway;

pub use model::{DailyStats, FoodEntry, UserProfile, WorkoutEntry};

/// Temperature assumed when the weather gateway is unavailable at seeding
/// time (°C). Goals seeded from it are provisional, not an error.
pub const DEFAULT_TEMPERATURE: f64 = 20.0;

/// Today's date on the process-local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Everything the assistant tracks for one user.
#[derive(Debug, Default)]
pub struct UserRecord {
    /// Set once profile setup completes; fully replaced on redo.
    pub profile: Option<UserProfile>,
    /// The in-progress conversational flow, if any.
    pub conversation: ConversationState,
}

/// Process-wide user registry.
pub struct UserStore {
    weather: Arc<dyn WeatherGateway>,
    users: RwLock<HashMap<String, Arc<Mutex<UserRecord>>>>,
}

impl UserStore {
    pub fn new(weather: Arc<dyn WeatherGateway>) -> Self {
        Self {
            weather,
            users: RwLock::new(HashMap::new()),
        }
    }

    /// The per-user serialization primitive: one mutex-guarded record per
    /// user id, created on first contact.
    pub async fn entry(&self, user_id: &str) -> Arc<Mutex<UserRecord>> {
        if let Some(entry) = self.users.read().await.get(user_id) {
            return Arc::clone(entry);
        }
        let mut users = self.users.write().await;
        Arc::clone(users.entry(user_id.to_string()).or_default())
    }

    /// Today's stats for a profile, created lazily.
    ///
    /// First access of a day fetches the current temperature for the
    /// profile's city to seed the goals; if the gateway is unavailable the
    /// goals are seeded at [`DEFAULT_TEMPERATURE`] and the failure is
    /// logged as recovered. Later accesses on the same day never re-fetch.
    pub async fn today_stats<'a>(&self, profile: &'a mut UserProfile) -> &'a mut DailyStats {
        let today = local_today();
        if !profile.daily_stats.contains_key(&today) {
            let temperature = match self.weather.fetch_temperature(&profile.city).await {
                Ok(t) => t,
                Err(err) => {
                    tracing::warn!(
                        %err,
                        city = %profile.city,
                        fallback = DEFAULT_TEMPERATURE,
                        "weather unavailable, seeding provisional goals"
                    );
                    DEFAULT_TEMPERATURE
                }
            };
            profile.daily_stats.insert(today, DailyStats::new(today));
            profile.refresh_goals(today, temperature);
        }
        profile
            .daily_stats
            .entry(today)
            .or_insert_with(|| DailyStats::new(today))
    }
}

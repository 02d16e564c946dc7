//! Conversation engine — turns one inbound message into replies.
//!
//! Commands are parsed first; anything else is routed to the sender's
//! in-progress flow by their current [`ConversationState`]. All domain
//! mutations happen here, under the sender's store entry lock.

pub mod commands;
pub mod guard;
pub mod progress;
pub mod state;

use std::sync::Arc;

use chrono::Local;

use crate::gateway::{FoodGateway, WeatherGateway};
use crate::goals;
use crate::store::{self, DailyStats, FoodEntry, UserProfile, UserRecord, UserStore, WorkoutEntry};

use commands::Command;
use state::ConversationState;

/// Temperature drift (°C, exclusive) beyond which a progress query
/// refreshes the day's goals.
const TEMPERATURE_DRIFT_LIMIT: f64 = 5.0;

const HELP_TEXT: &str = "/set_profile - set up profile\n\
                         /log_water <ml> - log water consumption\n\
                         /log_food <food> - log food consumption\n\
                         /log_workout <type> - log workout\n\
                         /check_progress - check progress\n\
                         /help - commands list";

/// The conversation engine. One instance serves all users.
pub struct Engine {
    store: Arc<UserStore>,
    weather: Arc<dyn WeatherGateway>,
    food: Arc<dyn FoodGateway>,
}

impl Engine {
    pub fn new(
        store: Arc<UserStore>,
        weather: Arc<dyn WeatherGateway>,
        food: Arc<dyn FoodGateway>,
    ) -> Self {
        Self {
            store,
            weather,
            food,
        }
    }

    /// Handle one inbound message and produce the replies to send back.
    ///
    /// Holds the sender's record lock for the whole operation: concurrent
    /// messages from the same user are serialized, other users are not
    /// affected.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> Vec<String> {
        let entry = self.store.entry(user_id).await;
        let mut record = entry.lock().await;
        self.process(&mut record, text.trim()).await
    }

    async fn process(&self, record: &mut UserRecord, text: &str) -> Vec<String> {
        let has_profile = record.profile.is_some();

        if let Some(cmd) = Command::parse(text) {
            if !guard::command_allowed(&cmd, has_profile, &record.conversation) {
                return vec![guard::SETUP_REQUIRED.to_string()];
            }
            return self.dispatch_command(record, cmd).await;
        }

        if !guard::reply_allowed(has_profile, &record.conversation) {
            return vec![guard::SETUP_REQUIRED.to_string()];
        }
        self.dispatch_reply(record, text).await
    }

    // ── One-shot commands and flow starts ───────────────────────────

    async fn dispatch_command(&self, record: &mut UserRecord, cmd: Command) -> Vec<String> {
        match cmd {
            Command::Start => vec![format!(
                "Hi! I'm a fitness assistant: I track your water, food and workouts \
                 against daily goals.\n\n{HELP_TEXT}"
            )],
            Command::Help => vec![HELP_TEXT.to_string()],
            Command::Unknown(token) => {
                vec![format!("Unknown command {token}. See /help for the list.")]
            }
            Command::SetProfile => {
                record.conversation = ConversationState::AwaitingWeight;
                vec!["Log your weight (kg):".to_string()]
            }
            Command::LogWater(None) => {
                record.conversation = ConversationState::AwaitingWaterAmount;
                vec!["How much water did you drink, in ml?".to_string()]
            }
            Command::LogWater(Some(raw)) => self.log_water(record, &raw).await,
            Command::LogFood(None) => {
                record.conversation = ConversationState::AwaitingFoodName;
                vec!["What did you eat? Submit the food name (in English).".to_string()]
            }
            Command::LogFood(Some(query)) => self.lookup_food(record, &query).await,
            Command::LogWorkout(None) => {
                record.conversation = ConversationState::AwaitingWorkoutType;
                vec![format!(
                    "Which workout type?\nAvailable types: {}",
                    goals::workout_kinds()
                )]
            }
            Command::LogWorkout(Some(kind)) => self.select_workout(record, &kind),
            Command::CheckProgress => self.check_progress(record).await,
        }
    }

    // ── Flow replies, routed by current state ───────────────────────

    async fn dispatch_reply(&self, record: &mut UserRecord, text: &str) -> Vec<String> {
        match record.conversation.clone() {
            ConversationState::Idle => {
                vec!["I didn't catch that. See /help for the command list.".to_string()]
            }

            ConversationState::AwaitingWeight => match parse_positive_f64(text) {
                Some(weight_kg) => {
                    record.conversation = ConversationState::AwaitingHeight { weight_kg };
                    vec!["Log your height (cm):".to_string()]
                }
                None => vec!["Submit a number. Try once more.".to_string()],
            },
            ConversationState::AwaitingHeight { weight_kg } => match parse_positive_f64(text) {
                Some(height_cm) => {
                    record.conversation = ConversationState::AwaitingAge {
                        weight_kg,
                        height_cm,
                    };
                    vec!["Log your age:".to_string()]
                }
                None => vec!["Submit a number. Try once more.".to_string()],
            },
            ConversationState::AwaitingAge {
                weight_kg,
                height_cm,
            } => match parse_positive_u32(text) {
                Some(age_years) => {
                    record.conversation = ConversationState::AwaitingActivity {
                        weight_kg,
                        height_cm,
                        age_years,
                    };
                    vec!["How many free minutes of activity do you have per day?".to_string()]
                }
                None => vec!["Submit a whole number. Try once more.".to_string()],
            },
            ConversationState::AwaitingActivity {
                weight_kg,
                height_cm,
                age_years,
            } => match parse_u32(text) {
                Some(activity_minutes) => {
                    record.conversation = ConversationState::AwaitingCity {
                        weight_kg,
                        height_cm,
                        age_years,
                        activity_minutes,
                    };
                    vec!["Which city are you located in?".to_string()]
                }
                None => vec!["Submit a whole number. Try once more.".to_string()],
            },
            ConversationState::AwaitingCity {
                weight_kg,
                height_cm,
                age_years,
                activity_minutes,
            } => {
                if text.is_empty() {
                    return vec!["Submit a city name.".to_string()];
                }
                self.finish_profile_setup(
                    record,
                    UserProfile::new(weight_kg, height_cm, age_years, activity_minutes, text),
                )
                .await
            }

            ConversationState::AwaitingWaterAmount => self.log_water(record, text).await,

            ConversationState::AwaitingFoodName => self.lookup_food(record, text).await,
            ConversationState::AwaitingFoodWeight {
                food_name,
                calories_per_100,
            } => {
                self.log_food_weight(record, &food_name, calories_per_100, text)
                    .await
            }

            ConversationState::AwaitingWorkoutType => self.select_workout(record, text),
            ConversationState::AwaitingWorkoutDuration { workout_kind } => {
                match parse_u32(text) {
                    Some(duration_minutes) => {
                        record.conversation = ConversationState::CommitWorkout {
                            workout_kind,
                            duration_minutes,
                        };
                        self.commit_workout(record).await
                    }
                    None => vec![
                        "Please enter the workout duration in minutes as a whole number."
                            .to_string(),
                    ],
                }
            }
            // Commit normally happens inline right after the duration
            // answer; finish it here if a message lands in between.
            ConversationState::CommitWorkout { .. } => self.commit_workout(record).await,
        }
    }

    // ── Profile setup ───────────────────────────────────────────────

    /// Final setup step: the city answer. If the temperature lookup fails
    /// no profile is created and the whole attempt ends.
    async fn finish_profile_setup(
        &self,
        record: &mut UserRecord,
        mut profile: UserProfile,
    ) -> Vec<String> {
        let temperature = match self.weather.fetch_temperature(&profile.city).await {
            Ok(t) => t,
            Err(err) => {
                tracing::error!(%err, city = %profile.city, "profile setup failed");
                record.conversation = ConversationState::Idle;
                return vec![
                    "Unable to retrieve weather for that city.\n\
                     Check the city name and run /set_profile again."
                        .to_string(),
                ];
            }
        };

        let today = store::local_today();
        profile.daily_stats.insert(today, DailyStats::new(today));
        profile.refresh_goals(today, temperature);
        let report = profile
            .daily_stats
            .get(&today)
            .map(progress::goals_report)
            .unwrap_or_default();

        tracing::info!(city = %profile.city, temperature, "profile set up");
        record.profile = Some(profile);
        record.conversation = ConversationState::Idle;
        vec![report]
    }

    // ── Water logging ───────────────────────────────────────────────

    async fn log_water(&self, record: &mut UserRecord, raw: &str) -> Vec<String> {
        let Some(amount) = parse_positive_f64(raw) else {
            record.conversation = ConversationState::AwaitingWaterAmount;
            return vec!["Please enter the amount of water in ml as a number.".to_string()];
        };
        let Some(profile) = record.profile.as_mut() else {
            return vec![guard::SETUP_REQUIRED.to_string()];
        };

        let stats = self.store.today_stats(profile).await;
        stats.logged_water += amount;
        let remaining = stats.water_remaining();

        record.conversation = ConversationState::Idle;
        vec![format!(
            "Logged: {amount} ml of water\nRemaining to drink: {remaining:.0} ml"
        )]
    }

    // ── Food logging ────────────────────────────────────────────────

    async fn lookup_food(&self, record: &mut UserRecord, query: &str) -> Vec<String> {
        match self.food.fetch_food_info(query).await {
            Ok(info) => {
                let prompt = format!(
                    "{} - {:.1} kcal per 100 g.\nHow many grams did you eat?",
                    info.name, info.calories_per_100g
                );
                record.conversation = ConversationState::AwaitingFoodWeight {
                    food_name: info.name,
                    calories_per_100: info.calories_per_100g,
                };
                vec![prompt]
            }
            Err(err) => {
                tracing::warn!(%err, query, "food lookup failed");
                record.conversation = ConversationState::Idle;
                vec![
                    "Sorry, couldn't find information about this food.\n\
                     Try another food or check the spelling."
                        .to_string(),
                ]
            }
        }
    }

    async fn log_food_weight(
        &self,
        record: &mut UserRecord,
        food_name: &str,
        calories_per_100: f64,
        raw: &str,
    ) -> Vec<String> {
        let Some(grams) = parse_positive_f64(raw) else {
            return vec!["Please enter the weight in grams as a number.".to_string()];
        };
        let Some(profile) = record.profile.as_mut() else {
            return vec![guard::SETUP_REQUIRED.to_string()];
        };

        let calories = calories_per_100 * grams / 100.0;
        let stats = self.store.today_stats(profile).await;
        stats.logged_calories += calories;
        stats.food_log.push(FoodEntry {
            name: food_name.to_string(),
            weight_grams: grams,
            calories,
            logged_at: Local::now(),
        });

        record.conversation = ConversationState::Idle;
        vec![format!(
            "Logged: {food_name}\n- Weight: {grams} g\n- Calories: {calories:.1} kcal"
        )]
    }

    // ── Workout logging ─────────────────────────────────────────────

    fn select_workout(&self, record: &mut UserRecord, raw: &str) -> Vec<String> {
        let kind = raw.trim();
        if goals::workout_rate(kind).is_none() {
            record.conversation = ConversationState::AwaitingWorkoutType;
            return vec![format!(
                "Unknown workout type.\nAvailable types: {}",
                goals::workout_kinds()
            )];
        }
        record.conversation = ConversationState::AwaitingWorkoutDuration {
            workout_kind: kind.to_string(),
        };
        vec!["How many minutes did you work out?".to_string()]
    }

    async fn commit_workout(&self, record: &mut UserRecord) -> Vec<String> {
        let ConversationState::CommitWorkout {
            workout_kind,
            duration_minutes,
        } = record.conversation.clone()
        else {
            record.conversation = ConversationState::Idle;
            return vec!["I didn't catch that. See /help for the command list.".to_string()];
        };
        let Some(rate) = goals::workout_rate(&workout_kind) else {
            // Kind was validated on entry; a miss here means stale state.
            record.conversation = ConversationState::AwaitingWorkoutType;
            return vec![format!(
                "Unknown workout type.\nAvailable types: {}",
                goals::workout_kinds()
            )];
        };
        let Some(profile) = record.profile.as_mut() else {
            record.conversation = ConversationState::Idle;
            return vec![guard::SETUP_REQUIRED.to_string()];
        };

        let calories = rate * duration_minutes;
        let water = goals::workout_water(duration_minutes);

        let stats = self.store.today_stats(profile).await;
        stats.burned_calories += f64::from(calories);
        stats.workout_log.push(WorkoutEntry {
            kind: workout_kind.clone(),
            duration_minutes,
            calories,
            logged_at: Local::now(),
        });

        record.conversation = ConversationState::Idle;
        vec![format!(
            "Logged: {workout_kind} for {duration_minutes} minutes\n\
             - Calories burned: {calories} kcal\n\
             - Recommended extra water: {water} ml"
        )]
    }

    // ── Progress query ──────────────────────────────────────────────

    /// One-shot: report today's stats, re-checking the temperature for
    /// goal drift first. A weather failure skips the refresh and still
    /// reports stored stats.
    async fn check_progress(&self, record: &mut UserRecord) -> Vec<String> {
        let Some(profile) = record.profile.as_mut() else {
            return vec![guard::SETUP_REQUIRED.to_string()];
        };

        let today = store::local_today();
        let stored = self.store.today_stats(profile).await.temperature;
        let city = profile.city.clone();

        let mut replies = Vec::new();
        match self.weather.fetch_temperature(&city).await {
            Ok(current) if (current - stored).abs() > TEMPERATURE_DRIFT_LIMIT => {
                profile.refresh_goals(today, current);
                if let Some(stats) = profile.daily_stats.get(&today) {
                    replies.push(progress::temperature_notice(
                        stored,
                        current,
                        stats.water_goal,
                    ));
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, city = %city, "weather unavailable, reporting stored stats");
            }
        }

        let stats = self.store.today_stats(profile).await;
        replies.push(progress::daily_summary(stats));
        replies
    }
}

// ── Input parsing ───────────────────────────────────────────────────

fn parse_positive_f64(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_positive_u32(raw: &str) -> Option<u32> {
    parse_u32(raw).filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_float_parsing() {
        assert_eq!(parse_positive_f64("500"), Some(500.0));
        assert_eq!(parse_positive_f64(" 72.5 "), Some(72.5));
        assert_eq!(parse_positive_f64("0"), None);
        assert_eq!(parse_positive_f64("-3"), None);
        assert_eq!(parse_positive_f64("NaN"), None);
        assert_eq!(parse_positive_f64("inf"), None);
        assert_eq!(parse_positive_f64("abc"), None);
        assert_eq!(parse_positive_f64(""), None);
    }

    #[test]
    fn integer_parsing() {
        assert_eq!(parse_u32("45"), Some(45));
        assert_eq!(parse_u32("0"), Some(0));
        assert_eq!(parse_u32("-1"), None);
        assert_eq!(parse_u32("4.5"), None);
        assert_eq!(parse_u32("abc"), None);

        assert_eq!(parse_positive_u32("30"), Some(30));
        assert_eq!(parse_positive_u32("0"), None);
    }
}

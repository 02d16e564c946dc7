//! Domain records — user profile and per-day stat snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::goals;

/// A registered user's physiological profile.
///
/// Owns one [`DailyStats`] per calendar day. Replaced wholesale when the
/// user redoes profile setup; never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Age in years.
    pub age_years: u32,
    /// Free activity minutes per day.
    pub activity_minutes: u32,
    /// Home city, used for weather lookups.
    pub city: String,
    /// One stats record per calendar day, created lazily.
    pub daily_stats: HashMap<NaiveDate, DailyStats>,
}

impl UserProfile {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        activity_minutes: u32,
        city: impl Into<String>,
    ) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            activity_minutes,
            city: city.into(),
            daily_stats: HashMap::new(),
        }
    }

    /// Recompute the given day's goals for a newly observed temperature.
    ///
    /// Keeps the invariant that stored goals always match the profile and
    /// the most recently observed temperature. Idempotent for an unchanged
    /// temperature. No-op if the day has no record yet.
    pub fn refresh_goals(&mut self, date: NaiveDate, temperature: f64) {
        let water = goals::water_goal(self.weight_kg, self.activity_minutes, temperature);
        let calories = goals::calorie_goal(
            self.weight_kg,
            self.height_cm,
            self.age_years,
            self.activity_minutes,
        );
        if let Some(stats) = self.daily_stats.get_mut(&date) {
            stats.water_goal = water;
            stats.calorie_goal = calories;
            stats.temperature = temperature;
        }
    }
}

/// One day's tracked intake, burn, and goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Cumulative logged water (ml).
    pub logged_water: f64,
    /// Cumulative logged food calories (kcal).
    pub logged_calories: f64,
    /// Cumulative burned calories (kcal).
    pub burned_calories: f64,
    /// Daily water target (ml).
    pub water_goal: f64,
    /// Daily calorie target (kcal).
    pub calorie_goal: f64,
    /// Last observed temperature for this day (°C).
    pub temperature: f64,
    pub food_log: Vec<FoodEntry>,
    pub workout_log: Vec<WorkoutEntry>,
}

impl DailyStats {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            logged_water: 0.0,
            logged_calories: 0.0,
            burned_calories: 0.0,
            water_goal: 0.0,
            calorie_goal: 0.0,
            temperature: 0.0,
            food_log: Vec::new(),
            workout_log: Vec::new(),
        }
    }

    /// Water still to drink today, clamped at zero.
    pub fn water_remaining(&self) -> f64 {
        (self.water_goal - self.logged_water).max(0.0)
    }

    /// Net calorie balance: consumed minus goal minus burned.
    pub fn calorie_balance(&self) -> f64 {
        self.logged_calories - self.calorie_goal - self.burned_calories
    }
}

/// One logged food item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub weight_grams: f64,
    pub calories: f64,
    pub logged_at: DateTime<Local>,
}

/// One logged workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub kind: String,
    pub duration_minutes: u32,
    pub calories: u32,
    pub logged_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::new(70.0, 175.0, 30, 45, "Tbilisi")
    }

    #[test]
    fn refresh_goals_recomputes_both_goals() {
        let mut profile = profile();
        profile.daily_stats.insert(date(), DailyStats::new(date()));

        profile.refresh_goals(date(), 30.0);
        let stats = &profile.daily_stats[&date()];
        assert_eq!(stats.water_goal, 3100.0);
        assert_eq!(stats.calorie_goal, 1823.75);
        assert_eq!(stats.temperature, 30.0);
    }

    #[test]
    fn refresh_goals_is_idempotent_for_same_temperature() {
        let mut profile = profile();
        profile.daily_stats.insert(date(), DailyStats::new(date()));

        profile.refresh_goals(date(), 22.0);
        let first = profile.daily_stats[&date()].clone();
        profile.refresh_goals(date(), 22.0);
        let second = &profile.daily_stats[&date()];

        assert_eq!(first.water_goal, second.water_goal);
        assert_eq!(first.calorie_goal, second.calorie_goal);
        assert_eq!(first.temperature, second.temperature);
    }

    #[test]
    fn refresh_goals_ignores_missing_day() {
        let mut profile = profile();
        profile.refresh_goals(date(), 30.0);
        assert!(profile.daily_stats.is_empty());
    }

    #[test]
    fn water_remaining_clamps_at_zero() {
        let mut stats = DailyStats::new(date());
        stats.water_goal = 2000.0;
        stats.logged_water = 2500.0;
        assert_eq!(stats.water_remaining(), 0.0);

        stats.logged_water = 1500.0;
        assert_eq!(stats.water_remaining(), 500.0);
    }

    #[test]
    fn calorie_balance_subtracts_goal_and_burn() {
        let mut stats = DailyStats::new(date());
        stats.logged_calories = 2000.0;
        stats.calorie_goal = 1800.0;
        stats.burned_calories = 300.0;
        assert_eq!(stats.calorie_balance(), -100.0);
    }
}

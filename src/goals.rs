//! Daily goal math — hydration and calorie targets plus the workout table.
//!
//! Everything here is pure: callers recompute goals whenever an input
//! changes instead of caching results.

/// Baseline water per kilogram of body weight (ml).
pub const WATER_PER_KG: f64 = 30.0;

/// Extra water per complete 30-minute activity block (ml).
pub const WATER_PER_ACTIVITY_BLOCK: f64 = 500.0;

/// Flat extra water in hot weather (ml).
pub const WATER_HOT_WEATHER: f64 = 500.0;

/// Temperature above which the hot-weather bonus applies (°C, exclusive).
pub const HOT_WEATHER_THRESHOLD: f64 = 25.0;

/// Extra calories per free activity minute (kcal).
pub const CALORIES_PER_ACTIVITY_MINUTE: f64 = 4.0;

/// Activity block length used for water bonuses (minutes).
pub const ACTIVITY_BLOCK_MINUTES: u32 = 30;

/// Recommended water per complete 30-minute workout block (ml).
pub const WATER_PER_WORKOUT_BLOCK: u32 = 200;

/// Calories burned per minute, by workout kind.
const WORKOUT_RATES: &[(&str, u32)] = &[
    ("run", 10),
    ("walk", 5),
    ("jump", 8),
    ("tennis", 14),
    ("football", 12),
];

/// Daily water target in ml.
///
/// base weight component, plus a bonus per complete 30-minute activity
/// block, plus a flat hot-weather bonus when the temperature exceeds 25 °C.
pub fn water_goal(weight_kg: f64, activity_minutes: u32, temperature: f64) -> f64 {
    let base = weight_kg * WATER_PER_KG;
    let activity =
        f64::from(activity_minutes / ACTIVITY_BLOCK_MINUTES) * WATER_PER_ACTIVITY_BLOCK;
    let hot = if temperature > HOT_WEATHER_THRESHOLD {
        WATER_HOT_WEATHER
    } else {
        0.0
    };
    base + activity + hot
}

/// Daily calorie target in kcal.
///
/// Mifflin-St Jeor BMR without the sex term (simplification kept from the
/// product definition), plus 4 kcal per free activity minute.
pub fn calorie_goal(weight_kg: f64, height_cm: f64, age_years: u32, activity_minutes: u32) -> f64 {
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    bmr + f64::from(activity_minutes) * CALORIES_PER_ACTIVITY_MINUTE
}

/// kcal burned per minute for a known workout kind.
pub fn workout_rate(kind: &str) -> Option<u32> {
    WORKOUT_RATES
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, rate)| *rate)
}

/// Comma-separated list of accepted workout kinds, for prompts.
pub fn workout_kinds() -> String {
    WORKOUT_RATES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recommended water intake for a workout of the given duration (ml).
///
/// Recommendation only — never added to the logged total.
pub fn workout_water(duration_minutes: u32) -> u32 {
    (duration_minutes / ACTIVITY_BLOCK_MINUTES) * WATER_PER_WORKOUT_BLOCK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_goal_reference_case() {
        // 70 kg, 45 min activity, 30 °C: 2100 + 500 + 500
        assert_eq!(water_goal(70.0, 45, 30.0), 3100.0);
    }

    #[test]
    fn water_goal_threshold_is_exclusive() {
        assert_eq!(water_goal(70.0, 0, 25.0), 2100.0);
        assert_eq!(water_goal(70.0, 0, 25.1), 2600.0);
    }

    #[test]
    fn water_goal_counts_complete_blocks_only() {
        assert_eq!(water_goal(60.0, 29, 10.0), 1800.0);
        assert_eq!(water_goal(60.0, 30, 10.0), 2300.0);
        assert_eq!(water_goal(60.0, 59, 10.0), 2300.0);
        assert_eq!(water_goal(60.0, 90, 10.0), 3300.0);
    }

    #[test]
    fn calorie_goal_reference_case() {
        // 70 kg, 175 cm, 30 y, 60 min: 700 + 1093.75 - 150 + 240
        assert_eq!(calorie_goal(70.0, 175.0, 30, 60), 1883.75);
    }

    #[test]
    fn calorie_goal_zero_activity() {
        assert_eq!(calorie_goal(80.0, 180.0, 40, 0), 1725.0);
    }

    #[test]
    fn workout_rates_match_table() {
        assert_eq!(workout_rate("run"), Some(10));
        assert_eq!(workout_rate("walk"), Some(5));
        assert_eq!(workout_rate("jump"), Some(8));
        assert_eq!(workout_rate("tennis"), Some(14));
        assert_eq!(workout_rate("football"), Some(12));
        assert_eq!(workout_rate("swim"), None);
        assert_eq!(workout_rate(""), None);
    }

    #[test]
    fn workout_kind_lookup_is_exact() {
        assert_eq!(workout_rate("Run"), None);
        assert_eq!(workout_rate("run "), None);
    }

    #[test]
    fn workout_water_reference_case() {
        assert_eq!(workout_water(45), 200);
        assert_eq!(workout_water(29), 0);
        assert_eq!(workout_water(60), 400);
        assert_eq!(workout_water(0), 0);
    }

    #[test]
    fn workout_kinds_lists_all() {
        let kinds = workout_kinds();
        assert_eq!(kinds, "run, walk, jump, tennis, football");
    }
}

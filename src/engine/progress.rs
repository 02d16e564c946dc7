//! Progress reporting — daily summary and temperature-change notices.

use crate::store::DailyStats;

/// Notice emitted when the observed temperature drifted far enough from
/// the stored one to change the hydration recommendation.
pub fn temperature_notice(stored: f64, current: f64, water_goal: f64) -> String {
    let direction = if current > stored {
        "increased"
    } else {
        "decreased"
    };
    format!(
        "Temperature {direction}!\n\
         New water intake recommendation: {water_goal:.0} ml"
    )
}

/// The daily summary for a progress query.
pub fn daily_summary(stats: &DailyStats) -> String {
    format!(
        "Today's progress:\n\
         Water:\n\
         - Drunk: {:.0} ml of {:.0} ml\n\
         - Remaining: {:.0} ml\n\n\
         Calories:\n\
         - Consumed: {:.1} kcal of {:.1} kcal goal\n\
         - Burned: {:.1} kcal\n\
         - Balance (consumed - goal - burned): {:.1} kcal",
        stats.logged_water,
        stats.water_goal,
        stats.water_remaining(),
        stats.logged_calories,
        stats.calorie_goal,
        stats.burned_calories,
        stats.calorie_balance(),
    )
}

/// Goals announcement after a completed profile setup.
pub fn goals_report(stats: &DailyStats) -> String {
    format!(
        "Profile saved!\n\
         Your water goal: {:.0} ml\n\
         Your calorie goal: {:.0} kcal",
        stats.water_goal, stats.calorie_goal,
    )
}

use chrono::Weekday;

use super::super::catalog;

/// Thresholds and cooldown windows steering test selection.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Check-in urge at or above this value counts as a high-urge signal.
    pub high_urge_threshold: u8,
    /// Check-in stress at or above this value counts as a high-stress signal.
    pub high_stress_threshold: u8,
    /// Day of week on which the weekly reflection is offered.
    pub weekly_day: Weekday,
    /// Days of silence after which the re-engagement follow-up applies.
    pub reengagement_after_days: i64,
    pub relapse_window_hours: i64,
    pub high_urge_window_hours: i64,
    pub crisis_window_hours: i64,
    pub reengagement_window_hours: i64,
    /// Case-insensitive substrings that flag a note for the crisis follow-up.
    pub crisis_keywords: Vec<&'static str>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            high_urge_threshold: 7,
            high_stress_threshold: 7,
            weekly_day: Weekday::Sun,
            reengagement_after_days: 3,
            relapse_window_hours: 24,
            high_urge_window_hours: 12,
            crisis_window_hours: 24,
            reengagement_window_hours: 168,
            crisis_keywords: catalog::CRISIS_KEYWORDS.to_vec(),
        }
    }
}

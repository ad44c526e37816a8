use chrono::NaiveDateTime;

use super::super::domain::{CheckinContext, TestDefinition, UserId};
use super::super::registry::QuestionBank;
use super::super::repository::ResultHistory;
use super::config::SelectionConfig;
use crate::tracking::repository::RepositoryError;

/// Event-test (level D) rules, evaluated in fixed order; the first trigger
/// whose cooldown window is clear wins.
pub(crate) fn event_test<'bank, H>(
    bank: &'bank QuestionBank,
    config: &SelectionConfig,
    user_id: &UserId,
    context: &CheckinContext,
    last_checkin_at: Option<NaiveDateTime>,
    history: &H,
    now: NaiveDateTime,
) -> Result<Option<&'bank TestDefinition>, RepositoryError>
where
    H: ResultHistory + ?Sized,
{
    // D1: relapse reported in this check-in.
    if context.relapse && !history.shown_within(user_id, "D1", config.relapse_window_hours, now)? {
        return Ok(bank.lookup("D1"));
    }

    // D2: urge at or above the high-urge threshold.
    if context.urge.unwrap_or(0) >= config.high_urge_threshold
        && !history.shown_within(user_id, "D2", config.high_urge_window_hours, now)?
    {
        return Ok(bank.lookup("D2"));
    }

    // D3: crisis language in the free-text note.
    if note_flags_crisis(context.note.as_deref(), &config.crisis_keywords)
        && !history.shown_within(user_id, "D3", config.crisis_window_hours, now)?
    {
        return Ok(bank.lookup("D3"));
    }

    // D4: returning after days of silence. No check-in history at all means
    // a brand-new user, not a lapsed one.
    if let Some(last_checkin) = last_checkin_at {
        let days_away = (now - last_checkin).num_days();
        if days_away >= config.reengagement_after_days
            && !history.shown_within(user_id, "D4", config.reengagement_window_hours, now)?
        {
            return Ok(bank.lookup("D4"));
        }
    }

    Ok(None)
}

fn note_flags_crisis(note: Option<&str>, keywords: &[&'static str]) -> bool {
    let Some(note) = note else {
        return false;
    };
    if note.is_empty() {
        return false;
    }
    let lowered = note.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crisis_match_is_case_insensitive_substring() {
        let keywords = vec!["no way out", "hopeless"];
        assert!(note_flags_crisis(Some("It all feels HOPELESS today"), &keywords));
        assert!(note_flags_crisis(Some("there is No Way Out of this"), &keywords));
        assert!(!note_flags_crisis(Some("a hard day, but okay"), &keywords));
        assert!(!note_flags_crisis(Some(""), &keywords));
        assert!(!note_flags_crisis(None, &keywords));
    }
}

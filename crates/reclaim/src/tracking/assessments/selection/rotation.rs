use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

use super::super::catalog;
use super::super::domain::{CheckinContext, TestDefinition, TestLevel, Track, UserId, UserProfile};
use super::super::registry::QuestionBank;
use super::super::repository::ResultHistory;
use super::config::SelectionConfig;
use crate::tracking::repository::RepositoryError;

/// Weekly reflection (level C): only on the configured weekly day, at most
/// once per ISO week (Monday 00:00 boundary), rotated least-recently-taken.
pub(crate) fn weekly_test<'bank, H>(
    bank: &'bank QuestionBank,
    config: &SelectionConfig,
    user_id: &UserId,
    profile: &UserProfile,
    history: &H,
    now: NaiveDateTime,
) -> Result<Option<&'bank TestDefinition>, RepositoryError>
where
    H: ResultHistory + ?Sized,
{
    if now.weekday() != config.weekly_day {
        return Ok(None);
    }

    let week_start = now
        .date()
        .week(Weekday::Mon)
        .first_day()
        .and_time(NaiveTime::MIN);
    if history.level_taken_since(user_id, TestLevel::C, week_start)? {
        return Ok(None);
    }

    let candidates = admissible_codes(bank, catalog::WEEKLY_ROTATION, profile);
    let Some(code) = least_recently_taken(history, user_id, &candidates)? else {
        return Ok(None);
    };

    Ok(bank.lookup(code))
}

/// Daily test (level B): contextual priority list first, then the rotation
/// pool by least-recently-taken, then the guaranteed baseline. Returns
/// `None` only once every eligible candidate has a result dated today.
pub(crate) fn daily_test<'bank, H>(
    bank: &'bank QuestionBank,
    config: &SelectionConfig,
    user_id: &UserId,
    profile: &UserProfile,
    context: &CheckinContext,
    history: &H,
    now: NaiveDateTime,
) -> Result<Option<&'bank TestDefinition>, RepositoryError>
where
    H: ResultHistory + ?Sized,
{
    let today = now.date();

    for code in priority_codes(bank, config, profile, context) {
        let Some(definition) = bank.lookup(code) else {
            continue;
        };
        if !admissible(definition, profile) {
            continue;
        }
        if !history.completed_on(user_id, code, today)? {
            return Ok(Some(definition));
        }
    }

    let mut pool = Vec::new();
    for code in admissible_codes(bank, catalog::DAILY_ROTATION, profile) {
        if !history.completed_on(user_id, code, today)? {
            pool.push(code);
        }
    }
    if let Some(code) = least_recently_taken(history, user_id, &pool)? {
        return Ok(bank.lookup(code));
    }

    if !history.completed_on(user_id, catalog::DAILY_BASELINE, today)? {
        return Ok(bank.lookup(catalog::DAILY_BASELINE));
    }

    Ok(None)
}

/// Context-driven priority list, most urgent concern first: the catalog's
/// relapse and high-urge flags, the stress cluster, then the track-specific
/// additions. Duplicates keep their first position.
fn priority_codes(
    bank: &QuestionBank,
    config: &SelectionConfig,
    profile: &UserProfile,
    context: &CheckinContext,
) -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Vec::new();

    if context.relapse {
        codes.extend(flagged_daily_codes(bank, |definition| {
            definition.show_after_relapse
        }));
    }
    if context.urge.unwrap_or(0) >= config.high_urge_threshold {
        codes.extend(flagged_daily_codes(bank, |definition| {
            definition.show_on_high_urge
        }));
    }
    if context.stress.unwrap_or(0) >= config.high_stress_threshold {
        codes.extend(["B5_1", "B5_2"]);
    }

    match profile.effective_track() {
        Track::Gambling => codes.push("B7_1"),
        Track::Trading => codes.push("B7_2"),
        Track::Digital => {}
    }

    let mut deduped: Vec<&'static str> = Vec::with_capacity(codes.len());
    for code in codes {
        if !deduped.contains(&code) {
            deduped.push(code);
        }
    }
    deduped
}

fn flagged_daily_codes(
    bank: &QuestionBank,
    flag: impl Fn(&TestDefinition) -> bool,
) -> Vec<&'static str> {
    bank.level(TestLevel::B)
        .into_iter()
        .filter(|definition| flag(definition))
        .map(|definition| definition.code)
        .collect()
}

/// Oldest-completion-wins selection. Codes never taken sort first, in
/// candidate order, so the pick is deterministic for fresh users.
pub(crate) fn least_recently_taken<H>(
    history: &H,
    user_id: &UserId,
    candidates: &[&'static str],
) -> Result<Option<&'static str>, RepositoryError>
where
    H: ResultHistory + ?Sized,
{
    let mut oldest: Option<(&'static str, NaiveDateTime)> = None;

    for code in candidates.iter().copied() {
        match history.last_taken_at(user_id, code)? {
            None => return Ok(Some(code)),
            Some(taken_at) => {
                let replace = match oldest {
                    Some((_, current)) => taken_at < current,
                    None => true,
                };
                if replace {
                    oldest = Some((code, taken_at));
                }
            }
        }
    }

    Ok(oldest.map(|(code, _)| code))
}

fn admissible(definition: &TestDefinition, profile: &UserProfile) -> bool {
    if !definition.tracks.admits(profile.effective_track()) {
        return false;
    }
    match definition.min_risk_level {
        Some(min) => profile.risk_level >= min,
        None => true,
    }
}

fn admissible_codes(
    bank: &QuestionBank,
    codes: &[&'static str],
    profile: &UserProfile,
) -> Vec<&'static str> {
    codes
        .iter()
        .copied()
        .filter(|code| {
            bank.lookup(code)
                .map(|definition| admissible(definition, profile))
                .unwrap_or(false)
        })
        .collect()
}

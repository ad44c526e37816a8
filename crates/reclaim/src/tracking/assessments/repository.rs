use chrono::{NaiveDate, NaiveDateTime};

use super::domain::{ProfileUpdate, TestLevel, TestResult, UserId, UserProfile};
use crate::tracking::repository::RepositoryError;

/// Per-user profile state. A missing profile is never an error: `get_or_create`
/// materializes the default row (onboarding day 1) on first touch.
pub trait ProfileStore: Send + Sync {
    fn get_or_create(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError>;
    fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError>;
}

/// Append-only completion log. All cooldown and rotation decisions read
/// through this narrow surface; rows are never mutated or deleted.
///
/// Presentation and completion are the same submitted event, so
/// `shown_within` is defined over completion rows.
pub trait ResultHistory: Send + Sync {
    fn append(&self, result: TestResult) -> Result<(), RepositoryError>;

    /// True when a result for `(user, code)` exists with `recorded_at`
    /// within the trailing `hours` before `now`.
    fn shown_within(
        &self,
        user_id: &UserId,
        code: &str,
        hours: i64,
        now: NaiveDateTime,
    ) -> Result<bool, RepositoryError>;

    /// True when a result for `(user, code)` exists on the given calendar
    /// date.
    fn completed_on(
        &self,
        user_id: &UserId,
        code: &str,
        date: NaiveDate,
    ) -> Result<bool, RepositoryError>;

    /// Most recent completion timestamp, `None` if never taken.
    fn last_taken_at(
        &self,
        user_id: &UserId,
        code: &str,
    ) -> Result<Option<NaiveDateTime>, RepositoryError>;

    /// True when any result of the given level exists at or after `since`.
    fn level_taken_since(
        &self,
        user_id: &UserId,
        level: TestLevel,
        since: NaiveDateTime,
    ) -> Result<bool, RepositoryError>;

    /// Newest-first slice of the user's history.
    fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<TestResult>, RepositoryError>;
}

/// Read side of the check-in log the selection engine needs for the
/// re-engagement rule.
pub trait CheckinLog: Send + Sync {
    fn last_checkin_at(&self, user_id: &UserId) -> Result<Option<NaiveDateTime>, RepositoryError>;
}

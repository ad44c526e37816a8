use chrono::NaiveDate;

use super::domain::{Checkin, StreakSnapshot};
use crate::tracking::assessments::domain::UserId;
use crate::tracking::repository::RepositoryError;

/// Storage abstraction for check-ins and streak state.
///
/// Implementations are also expected to serve the selection engine's
/// [`crate::tracking::assessments::repository::CheckinLog`] read.
pub trait CheckinStore: Send + Sync {
    fn insert(&self, checkin: Checkin) -> Result<(), RepositoryError>;

    /// Newest-first slice of the user's check-ins.
    fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<Checkin>, RepositoryError>;

    /// Latest check-in recorded on the given calendar date, if any.
    fn on_date(&self, user_id: &UserId, date: NaiveDate)
        -> Result<Option<Checkin>, RepositoryError>;

    fn streak(&self, user_id: &UserId) -> Result<Option<StreakSnapshot>, RepositoryError>;

    fn put_streak(
        &self,
        user_id: &UserId,
        snapshot: StreakSnapshot,
    ) -> Result<(), RepositoryError>;
}

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::domain::{Checkin, CheckinReceipt, NewCheckin, StreakSnapshot};
use super::repository::CheckinStore;
use crate::tracking::assessments::domain::UserId;
use crate::tracking::repository::RepositoryError;

const SCALE_MAX: u8 = 10;

/// Records check-ins and keeps the streak in step with them.
pub struct CheckinService<S> {
    store: Arc<S>,
}

impl<S> CheckinService<S>
where
    S: CheckinStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a check-in and advance the streak: a relapse resets it, a
    /// repeat check-in on the same day leaves it unchanged, a new clean day
    /// increments it.
    pub fn record(
        &self,
        user_id: &UserId,
        new_checkin: NewCheckin,
        now: NaiveDateTime,
    ) -> Result<CheckinReceipt, CheckinError> {
        validate_scale("urge", new_checkin.urge)?;
        validate_scale("stress", new_checkin.stress)?;
        validate_scale("mood", new_checkin.mood)?;

        let previous_streak = self
            .store
            .streak(user_id)?
            .map(|snapshot| snapshot.current)
            .unwrap_or(0);

        let checkin = Checkin {
            user_id: user_id.clone(),
            urge: new_checkin.urge,
            stress: new_checkin.stress,
            mood: new_checkin.mood,
            relapse: new_checkin.relapse,
            note: new_checkin.note,
            loss_amount: new_checkin.loss_amount,
            recorded_at: now,
        };
        self.store.insert(checkin.clone())?;

        let today = now.date();
        let streak = match self.store.streak(user_id)? {
            Some(snapshot) => {
                let current = if checkin.relapse {
                    0
                } else if snapshot.last_checkin_date == Some(today) {
                    snapshot.current
                } else {
                    snapshot.current + 1
                };
                StreakSnapshot {
                    current,
                    best: snapshot.best.max(current),
                    last_checkin_date: Some(today),
                }
            }
            None => {
                let current = if checkin.relapse { 0 } else { 1 };
                StreakSnapshot {
                    current,
                    best: current,
                    last_checkin_date: Some(today),
                }
            }
        };
        self.store.put_streak(user_id, streak.clone())?;

        Ok(CheckinReceipt {
            checkin,
            previous_streak,
            streak,
        })
    }

    pub fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<Checkin>, CheckinError> {
        Ok(self.store.recent(user_id, limit)?)
    }

    pub fn today(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Option<Checkin>, CheckinError> {
        Ok(self.store.on_date(user_id, today)?)
    }

    pub fn streak(&self, user_id: &UserId) -> Result<StreakSnapshot, CheckinError> {
        Ok(self.store.streak(user_id)?.unwrap_or_else(StreakSnapshot::empty))
    }
}

fn validate_scale(field: &'static str, value: u8) -> Result<(), CheckinError> {
    if value > SCALE_MAX {
        return Err(CheckinError::OutOfRange { field, value });
    }
    Ok(())
}

/// Error raised by the check-in service.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    #[error("{field} must be between 0 and 10, got {value}")]
    OutOfRange { field: &'static str, value: u8 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

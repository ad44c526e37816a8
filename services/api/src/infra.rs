use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use reclaim::tracking::assessments::{
    CheckinLog, ProfileStore, ProfileUpdate, ResultHistory, TestLevel, TestResult, UserId,
    UserProfile,
};
use reclaim::tracking::checkins::{Checkin, CheckinStore, StreakSnapshot};
use reclaim::tracking::reminders::{
    NotifyError, ReminderNotifier, ReminderQueue, ReminderTarget,
};
use reclaim::tracking::repository::RepositoryError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryProfileStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl ProfileStore for InMemoryProfileStore {
    fn get_or_create(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let profile = guard
            .entry(user_id.clone())
            .or_insert_with(|| UserProfile::new(user_id.clone()));
        Ok(profile.clone())
    }

    fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let profile = guard
            .entry(user_id.clone())
            .or_insert_with(|| UserProfile::new(user_id.clone()));
        update.apply(profile);
        Ok(profile.clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryResultHistory {
    rows: Mutex<Vec<TestResult>>,
}

impl ResultHistory for InMemoryResultHistory {
    fn append(&self, result: TestResult) -> Result<(), RepositoryError> {
        self.rows.lock().expect("history mutex poisoned").push(result);
        Ok(())
    }

    fn shown_within(
        &self,
        user_id: &UserId,
        code: &str,
        hours: i64,
        now: NaiveDateTime,
    ) -> Result<bool, RepositoryError> {
        let threshold = now - Duration::hours(hours);
        let rows = self.rows.lock().expect("history mutex poisoned");
        Ok(rows.iter().any(|row| {
            &row.user_id == user_id && row.test_code == code && row.recorded_at >= threshold
        }))
    }

    fn completed_on(
        &self,
        user_id: &UserId,
        code: &str,
        date: NaiveDate,
    ) -> Result<bool, RepositoryError> {
        let rows = self.rows.lock().expect("history mutex poisoned");
        Ok(rows.iter().any(|row| {
            &row.user_id == user_id && row.test_code == code && row.recorded_at.date() == date
        }))
    }

    fn last_taken_at(
        &self,
        user_id: &UserId,
        code: &str,
    ) -> Result<Option<NaiveDateTime>, RepositoryError> {
        let rows = self.rows.lock().expect("history mutex poisoned");
        Ok(rows
            .iter()
            .filter(|row| &row.user_id == user_id && row.test_code == code)
            .map(|row| row.recorded_at)
            .max())
    }

    fn level_taken_since(
        &self,
        user_id: &UserId,
        level: TestLevel,
        since: NaiveDateTime,
    ) -> Result<bool, RepositoryError> {
        let rows = self.rows.lock().expect("history mutex poisoned");
        Ok(rows.iter().any(|row| {
            &row.user_id == user_id && row.level == level && row.recorded_at >= since
        }))
    }

    fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<TestResult>, RepositoryError> {
        let rows = self.rows.lock().expect("history mutex poisoned");
        let mut matching: Vec<TestResult> = rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCheckinStore {
    rows: Mutex<Vec<Checkin>>,
    streaks: Mutex<HashMap<UserId, StreakSnapshot>>,
}

impl InMemoryCheckinStore {
    /// Distinct users with at least one check-in on record.
    pub(crate) fn known_users(&self) -> Vec<UserId> {
        let rows = self.rows.lock().expect("checkin mutex poisoned");
        let mut users: Vec<UserId> = Vec::new();
        for row in rows.iter() {
            if !users.contains(&row.user_id) {
                users.push(row.user_id.clone());
            }
        }
        users
    }
}

impl CheckinStore for InMemoryCheckinStore {
    fn insert(&self, checkin: Checkin) -> Result<(), RepositoryError> {
        self.rows.lock().expect("checkin mutex poisoned").push(checkin);
        Ok(())
    }

    fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<Checkin>, RepositoryError> {
        let rows = self.rows.lock().expect("checkin mutex poisoned");
        let mut matching: Vec<Checkin> = rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        matching.truncate(limit);
        Ok(matching)
    }

    fn on_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<Checkin>, RepositoryError> {
        let rows = self.rows.lock().expect("checkin mutex poisoned");
        Ok(rows
            .iter()
            .filter(|row| &row.user_id == user_id && row.recorded_at.date() == date)
            .max_by_key(|row| row.recorded_at)
            .cloned())
    }

    fn streak(&self, user_id: &UserId) -> Result<Option<StreakSnapshot>, RepositoryError> {
        let streaks = self.streaks.lock().expect("streak mutex poisoned");
        Ok(streaks.get(user_id).cloned())
    }

    fn put_streak(
        &self,
        user_id: &UserId,
        snapshot: StreakSnapshot,
    ) -> Result<(), RepositoryError> {
        let mut streaks = self.streaks.lock().expect("streak mutex poisoned");
        streaks.insert(user_id.clone(), snapshot);
        Ok(())
    }
}

impl CheckinLog for InMemoryCheckinStore {
    fn last_checkin_at(&self, user_id: &UserId) -> Result<Option<NaiveDateTime>, RepositoryError> {
        let rows = self.rows.lock().expect("checkin mutex poisoned");
        Ok(rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| row.recorded_at)
            .max())
    }
}

/// Reminder bookkeeping over the in-memory check-in store. Every user who
/// has ever checked in counts as enrolled at the default hour, matching the
/// product default of reminders-on. A deployment would back this with the
/// user table instead.
pub(crate) struct InMemoryReminderQueue {
    checkins: Arc<InMemoryCheckinStore>,
    default_hour: u32,
    reminded: Mutex<HashMap<UserId, NaiveDate>>,
}

impl InMemoryReminderQueue {
    pub(crate) fn new(checkins: Arc<InMemoryCheckinStore>, default_hour: u32) -> Self {
        Self {
            checkins,
            default_hour,
            reminded: Mutex::new(HashMap::new()),
        }
    }
}

impl ReminderQueue for InMemoryReminderQueue {
    fn due(&self, hour: u32, date: NaiveDate) -> Result<Vec<ReminderTarget>, RepositoryError> {
        if hour != self.default_hour {
            return Ok(Vec::new());
        }

        let reminded = self.reminded.lock().expect("reminder mutex poisoned");
        let mut targets = Vec::new();

        for user_id in self.checkins.known_users() {
            if reminded.get(&user_id) == Some(&date) {
                continue;
            }
            if self.checkins.on_date(&user_id, date)?.is_some() {
                continue;
            }
            let streak = self
                .checkins
                .streak(&user_id)?
                .map(|snapshot| snapshot.current)
                .unwrap_or(0);
            targets.push(ReminderTarget { user_id, streak });
        }

        Ok(targets)
    }

    fn mark_reminded(&self, user_id: &UserId, date: NaiveDate) -> Result<(), RepositoryError> {
        let mut reminded = self.reminded.lock().expect("reminder mutex poisoned");
        reminded.insert(user_id.clone(), date);
        Ok(())
    }
}

/// Delivery is an external collaborator; this adapter just records the nudge
/// in the service log.
pub(crate) struct LogNotifier;

impl ReminderNotifier for LogNotifier {
    fn send(&self, target: &ReminderTarget) -> Result<(), NotifyError> {
        info!(
            user = %target.user_id.0,
            streak = target.streak,
            "check-in reminder dispatched"
        );
        Ok(())
    }
}

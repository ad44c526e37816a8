use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::tracking::assessments::domain::{
    CheckinContext, ProfileUpdate, RiskLevel, TestLevel, TestResult, Track, UserId, UserProfile,
};
use crate::tracking::assessments::registry::QuestionBank;
use crate::tracking::assessments::repository::{CheckinLog, ProfileStore, ResultHistory};
use crate::tracking::assessments::selection::SelectionConfig;
use crate::tracking::assessments::service::AssessmentService;
use crate::tracking::repository::RepositoryError;

pub(super) type TestService =
    AssessmentService<MemoryProfiles, MemoryHistory, MemoryCheckins>;

pub(super) fn service() -> (
    TestService,
    Arc<MemoryProfiles>,
    Arc<MemoryHistory>,
    Arc<MemoryCheckins>,
) {
    let bank = Arc::new(QuestionBank::standard().expect("built-in catalog is valid"));
    let profiles = Arc::new(MemoryProfiles::default());
    let history = Arc::new(MemoryHistory::default());
    let checkins = Arc::new(MemoryCheckins::default());
    let service = AssessmentService::new(
        bank,
        SelectionConfig::default(),
        profiles.clone(),
        history.clone(),
        checkins.clone(),
    );
    (service, profiles, history, checkins)
}

pub(super) fn user() -> UserId {
    UserId("user-1".to_string())
}

pub(super) fn quiet() -> CheckinContext {
    CheckinContext::default()
}

pub(super) fn context(relapse: bool, urge: Option<u8>, stress: Option<u8>) -> CheckinContext {
    CheckinContext {
        urge,
        stress,
        mood: None,
        relapse,
        note: None,
        time_of_day: None,
    }
}

/// Monday of the reference week.
pub(super) fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
}

/// Sunday closing the reference week.
pub(super) fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date")
}

pub(super) fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 0, 0).expect("valid time")
}

/// A weekday-noon reference moment (Tuesday).
pub(super) fn weekday_noon() -> NaiveDateTime {
    at(NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date"), 12)
}

/// Preload a profile that finished onboarding on the given track.
pub(super) fn seed_completed_profile(
    profiles: &MemoryProfiles,
    user_id: &UserId,
    track: Track,
    risk_level: RiskLevel,
) {
    let mut profile = UserProfile::new(user_id.clone());
    profile.track = Some(track);
    profile.onboarding_day = 4;
    profile.onboarding_completed = true;
    profile.risk_behavior_score = Some(8);
    profile.gambling_score = Some(6);
    profile.emotional_regulation_score = Some(6);
    profile.risk_level = risk_level;
    profiles.seed(profile);
}

pub(super) fn seed_result(
    history: &MemoryHistory,
    user_id: &UserId,
    code: &str,
    level: TestLevel,
    recorded_at: NaiveDateTime,
) {
    history
        .append(TestResult {
            user_id: user_id.clone(),
            test_code: code.to_string(),
            level,
            answers: BTreeMap::new(),
            total_score: 3,
            interpretation_level: "low".to_string(),
            interpretation_message: "fixture".to_string(),
            recorded_at,
        })
        .expect("seed history row");
}

pub(super) fn hours_before(moment: NaiveDateTime, hours: i64) -> NaiveDateTime {
    moment - Duration::hours(hours)
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl MemoryProfiles {
    pub(super) fn seed(&self, profile: UserProfile) {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(profile.user_id.clone(), profile);
    }

    pub(super) fn get(&self, user_id: &UserId) -> Option<UserProfile> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.get(user_id).cloned()
    }
}

impl ProfileStore for MemoryProfiles {
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
pub(super) struct MemoryHistory {
    rows: Mutex<Vec<TestResult>>,
}

impl MemoryHistory {
    pub(super) fn rows(&self) -> Vec<TestResult> {
        self.rows.lock().expect("history mutex poisoned").clone()
    }
}

impl ResultHistory for MemoryHistory {
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
pub(super) struct MemoryCheckins {
    last: Mutex<HashMap<UserId, NaiveDateTime>>,
}

impl MemoryCheckins {
    pub(super) fn set_last(&self, user_id: &UserId, at: NaiveDateTime) {
        let mut guard = self.last.lock().expect("checkin mutex poisoned");
        guard.insert(user_id.clone(), at);
    }
}

impl CheckinLog for MemoryCheckins {
    fn last_checkin_at(&self, user_id: &UserId) -> Result<Option<NaiveDateTime>, RepositoryError> {
        let guard = self.last.lock().expect("checkin mutex poisoned");
        Ok(guard.get(user_id).copied())
    }
}

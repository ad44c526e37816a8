use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::domain::{
    AnswerValue, CheckinContext, ProfileUpdate, SubmissionOutcome, TestDescriptor, TestLevel,
    TestResult, Track, UserId, UserProfile,
};
use super::registry::QuestionBank;
use super::repository::{CheckinLog, ProfileStore, ResultHistory};
use super::scoring;
use super::selection::{SelectionConfig, SelectionEngine};
use crate::tracking::repository::RepositoryError;

/// Facade composing the question bank, selection engine, and result
/// processor over the storage traits.
///
/// Each call is one short-lived unit of work for one user. Two concurrent
/// submissions for the same user can race past the "completed today" check;
/// that check-then-act gap is accepted rather than locked away, matching a
/// client that submits one test at a time.
pub struct AssessmentService<P, H, C> {
    bank: Arc<QuestionBank>,
    engine: SelectionEngine,
    profiles: Arc<P>,
    history: Arc<H>,
    checkins: Arc<C>,
}

impl<P, H, C> AssessmentService<P, H, C>
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    pub fn new(
        bank: Arc<QuestionBank>,
        config: SelectionConfig,
        profiles: Arc<P>,
        history: Arc<H>,
        checkins: Arc<C>,
    ) -> Self {
        let engine = SelectionEngine::new(bank.clone(), config);
        Self {
            bank,
            engine,
            profiles,
            history,
            checkins,
        }
    }

    /// At most one test to present right now, or `None`.
    pub fn next_test(
        &self,
        user_id: &UserId,
        context: &CheckinContext,
        now: NaiveDateTime,
    ) -> Result<Option<TestDescriptor>, AssessmentError> {
        let profile = self.profiles.get_or_create(user_id)?;
        let last_checkin_at = self.checkins.last_checkin_at(user_id)?;

        let descriptor = self.engine.next_test(
            user_id,
            &profile,
            context,
            last_checkin_at,
            &*self.history,
            now,
        )?;
        Ok(descriptor)
    }

    /// Score, interpret, persist, and derive follow-ups for a submission.
    /// The result row is appended unconditionally, `unknown` interpretations
    /// included, because the selection rules above read this log.
    pub fn submit(
        &self,
        user_id: &UserId,
        test_code: &str,
        answers: BTreeMap<String, AnswerValue>,
        score: i32,
        now: NaiveDateTime,
    ) -> Result<SubmissionOutcome, AssessmentError> {
        let definition = self
            .bank
            .lookup(test_code)
            .ok_or_else(|| AssessmentError::UnknownTest(test_code.to_string()))?;

        let interpretation = scoring::interpret(definition, score);

        self.history.append(TestResult {
            user_id: user_id.clone(),
            test_code: definition.code.to_string(),
            level: definition.level,
            answers,
            total_score: score,
            interpretation_level: interpretation.level.clone(),
            interpretation_message: interpretation.message.clone(),
            recorded_at: now,
        })?;

        if definition.level == TestLevel::A {
            let profile = self.profiles.get_or_create(user_id)?;
            if let Some(transition) =
                scoring::onboarding_transition(definition.code, score, &profile)
            {
                self.profiles.update(user_id, &transition.update)?;
                return Ok(SubmissionOutcome {
                    interpretation,
                    message: None,
                    actions: Vec::new(),
                    profile_updates: Some(transition.update),
                    onboarding_completed: transition.completed,
                    show_track_selection: transition.show_track_selection,
                });
            }
        }

        let message = scoring::response_message(definition, &interpretation);
        let actions = scoring::recommended_actions(&interpretation.level);

        Ok(SubmissionOutcome {
            interpretation,
            message: Some(message),
            actions,
            profile_updates: None,
            onboarding_completed: false,
            show_track_selection: false,
        })
    }

    /// Out-of-band track choice; the engine only ever reads this field.
    pub fn select_track(
        &self,
        user_id: &UserId,
        track: Track,
    ) -> Result<UserProfile, AssessmentError> {
        let update = ProfileUpdate {
            track: Some(track),
            ..ProfileUpdate::default()
        };
        let profile = self.profiles.update(user_id, &update)?;
        Ok(profile)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<UserProfile, AssessmentError> {
        Ok(self.profiles.get_or_create(user_id)?)
    }

    pub fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<TestResult>, AssessmentError> {
        Ok(self.history.recent(user_id, limit)?)
    }
}

/// Error raised by the assessment facade.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("unknown test code '{0}'")]
    UnknownTest(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

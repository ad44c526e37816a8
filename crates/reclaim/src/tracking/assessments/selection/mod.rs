//! The test-selection engine.
//!
//! Strict priority, first match wins: onboarding gate, event tests (D),
//! weekly reflection (C), daily rotation (B). While onboarding is
//! incomplete nothing below the gate is ever surfaced.

mod config;
mod events;
mod rotation;

pub use config::SelectionConfig;

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::domain::{CheckinContext, TestDefinition, TestDescriptor, Track, UserId, UserProfile};
use super::registry::QuestionBank;
use super::repository::ResultHistory;
use crate::tracking::repository::RepositoryError;

/// Stateless decision core over the question bank and a narrow history
/// query surface. The current time is an explicit parameter so day-boundary
/// behavior is deterministic under test.
pub struct SelectionEngine {
    bank: Arc<QuestionBank>,
    config: SelectionConfig,
}

impl SelectionEngine {
    pub fn new(bank: Arc<QuestionBank>, config: SelectionConfig) -> Self {
        Self { bank, config }
    }

    /// At most one test for this user and moment, or `None` when nothing is
    /// due.
    pub fn next_test<H>(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
        context: &CheckinContext,
        last_checkin_at: Option<NaiveDateTime>,
        history: &H,
        now: NaiveDateTime,
    ) -> Result<Option<TestDescriptor>, RepositoryError>
    where
        H: ResultHistory + ?Sized,
    {
        if !profile.onboarding_completed {
            return Ok(self.onboarding_test(profile).map(TestDefinition::to_descriptor));
        }

        if let Some(definition) = events::event_test(
            &self.bank,
            &self.config,
            user_id,
            context,
            last_checkin_at,
            history,
            now,
        )? {
            return Ok(Some(definition.to_descriptor()));
        }

        if let Some(definition) =
            rotation::weekly_test(&self.bank, &self.config, user_id, profile, history, now)?
        {
            return Ok(Some(definition.to_descriptor()));
        }

        let daily = rotation::daily_test(
            &self.bank,
            &self.config,
            user_id,
            profile,
            context,
            history,
            now,
        )?;
        Ok(daily.map(TestDefinition::to_descriptor))
    }

    /// Onboarding gate: the screen for the profile's current day, `None`
    /// outside the 0..=3 window (terminal no-op).
    fn onboarding_test(&self, profile: &UserProfile) -> Option<&TestDefinition> {
        let code = match profile.onboarding_day {
            0 | 1 => "A1",
            2 => match profile.effective_track() {
                Track::Gambling => "A2",
                Track::Trading => "A3",
                Track::Digital => "A4",
            },
            3 => "A5",
            _ => return None,
        };
        self.bank.lookup(code)
    }
}

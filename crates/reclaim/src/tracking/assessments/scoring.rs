use std::collections::BTreeSet;

use super::domain::{
    Interpretation, ProfileUpdate, RecommendedAction, RiskLevel, TestDefinition, UserProfile,
};

/// Interpretation levels that call for crisis resources.
const CRISIS_LEVELS: &[&str] = &["high", "red", "problem_gambling", "vulnerable", "critical"];

/// Interpretation levels that call for a soft intervention prompt.
const ELEVATED_LEVELS: &[&str] = &["yellow", "medium", "elevated", "moderate_risk"];

const GENERIC_ACKNOWLEDGMENT: &str = "Your answers were recorded.";

/// First band containing the score wins; a score outside every band degrades
/// to `unknown`, never an error.
pub(crate) fn interpret(definition: &TestDefinition, score: i32) -> Interpretation {
    for band in &definition.bands {
        if band.contains(score) {
            return Interpretation {
                level: band.level.to_string(),
                message: band.message.to_string(),
                score,
                max_score: Some(definition.max_score),
            };
        }
    }

    Interpretation {
        level: "unknown".to_string(),
        message: GENERIC_ACKNOWLEDGMENT.to_string(),
        score,
        max_score: None,
    }
}

/// Level-keyed response template, falling back to the interpretation's own
/// message.
pub(crate) fn response_message(
    definition: &TestDefinition,
    interpretation: &Interpretation,
) -> String {
    definition
        .response_for(&interpretation.level)
        .map(str::to_string)
        .unwrap_or_else(|| interpretation.message.clone())
}

/// Deduplicated follow-up actions for an interpretation level.
pub(crate) fn recommended_actions(level: &str) -> Vec<RecommendedAction> {
    let mut actions = BTreeSet::new();

    if CRISIS_LEVELS.contains(&level) {
        actions.insert(RecommendedAction::OfferCrisisSupport);
        actions.insert(RecommendedAction::ShowHelplines);
    }
    if ELEVATED_LEVELS.contains(&level) {
        actions.insert(RecommendedAction::SoftIntervention);
    }

    actions.into_iter().collect()
}

/// Overall risk from the summed screening scores.
pub(crate) fn risk_level_from_total(total: i32) -> RiskLevel {
    if total <= 15 {
        RiskLevel::Low
    } else if total <= 30 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Profile mutation derived from an onboarding submission.
pub(crate) struct OnboardingTransition {
    pub(crate) update: ProfileUpdate,
    pub(crate) show_track_selection: bool,
    pub(crate) completed: bool,
}

/// State machine for the A-level screens:
/// A1 pending → track screen pending → A5 pending → completed (terminal).
pub(crate) fn onboarding_transition(
    code: &str,
    score: i32,
    profile: &UserProfile,
) -> Option<OnboardingTransition> {
    match code {
        "A1" => Some(OnboardingTransition {
            update: ProfileUpdate {
                risk_behavior_score: Some(score),
                onboarding_day: Some(2),
                ..ProfileUpdate::default()
            },
            show_track_selection: true,
            completed: false,
        }),
        "A2" => Some(track_screen_transition(ProfileUpdate {
            gambling_score: Some(score),
            onboarding_day: Some(3),
            ..ProfileUpdate::default()
        })),
        "A3" => Some(track_screen_transition(ProfileUpdate {
            trading_score: Some(score),
            onboarding_day: Some(3),
            ..ProfileUpdate::default()
        })),
        "A4" => Some(track_screen_transition(ProfileUpdate {
            digital_score: Some(score),
            onboarding_day: Some(3),
            ..ProfileUpdate::default()
        })),
        "A5" => {
            let total = profile.risk_behavior_score.unwrap_or(0)
                + profile.track_score().unwrap_or(0)
                + score;
            Some(OnboardingTransition {
                update: ProfileUpdate {
                    emotional_regulation_score: Some(score),
                    onboarding_completed: Some(true),
                    onboarding_day: Some(4),
                    risk_level: Some(risk_level_from_total(total)),
                    ..ProfileUpdate::default()
                },
                show_track_selection: false,
                completed: true,
            })
        }
        _ => None,
    }
}

fn track_screen_transition(update: ProfileUpdate) -> OnboardingTransition {
    OnboardingTransition {
        update,
        show_track_selection: false,
        completed: false,
    }
}

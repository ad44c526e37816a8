use super::common::*;
use crate::tracking::assessments::domain::RecommendedAction;
use crate::tracking::assessments::registry::QuestionBank;
use crate::tracking::assessments::scoring;

#[test]
fn every_band_boundary_classifies_into_its_own_band() {
    let bank = QuestionBank::standard().expect("built-in catalog is valid");

    for definition in bank.definitions() {
        for band in &definition.bands {
            for score in [band.min, band.max] {
                let interpretation = scoring::interpret(definition, score);
                assert_eq!(
                    interpretation.level, band.level,
                    "{} score {score} landed outside its band",
                    definition.code
                );
            }
        }
    }
}

#[test]
fn scores_past_the_last_band_degrade_to_unknown() {
    let bank = QuestionBank::standard().expect("built-in catalog is valid");

    for definition in bank.definitions() {
        let top = definition
            .bands
            .iter()
            .map(|band| band.max)
            .max()
            .expect("bands exist");
        let interpretation = scoring::interpret(definition, top + 1);
        assert_eq!(interpretation.level, "unknown", "{}", definition.code);
        assert!(interpretation.max_score.is_none());

        let interpretation = scoring::interpret(definition, -1);
        assert_eq!(interpretation.level, "unknown", "{}", definition.code);
    }
}

#[test]
fn crisis_levels_recommend_crisis_support() {
    for level in ["high", "red", "problem_gambling", "vulnerable", "critical"] {
        let actions = scoring::recommended_actions(level);
        assert!(
            actions.contains(&RecommendedAction::OfferCrisisSupport),
            "missing crisis support for {level}"
        );
        assert!(actions.contains(&RecommendedAction::ShowHelplines));
    }
}

#[test]
fn elevated_levels_recommend_a_soft_intervention() {
    for level in ["yellow", "medium", "elevated", "moderate_risk"] {
        let actions = scoring::recommended_actions(level);
        assert_eq!(actions, vec![RecommendedAction::SoftIntervention]);
    }
}

#[test]
fn calm_levels_recommend_nothing() {
    for level in ["low", "green", "steady", "unknown"] {
        assert!(scoring::recommended_actions(level).is_empty(), "{level}");
    }
}

#[test]
fn actions_are_deduplicated() {
    let actions = scoring::recommended_actions("high");
    let mut deduped = actions.clone();
    deduped.dedup();
    assert_eq!(actions, deduped);
}

#[test]
fn response_template_wins_over_band_message() {
    let bank = QuestionBank::standard().expect("built-in catalog is valid");
    let definition = bank.lookup("B1_1").expect("baseline exists");

    let interpretation = scoring::interpret(definition, 9);
    assert_eq!(interpretation.level, "high");

    let message = scoring::response_message(definition, &interpretation);
    assert_ne!(message, interpretation.message);
    assert!(message.contains("urge"));
}

#[test]
fn missing_template_falls_back_to_the_band_message() {
    let bank = QuestionBank::standard().expect("built-in catalog is valid");
    let definition = bank.lookup("B2_1").expect("definition exists");

    let interpretation = scoring::interpret(definition, 5);
    let message = scoring::response_message(definition, &interpretation);
    assert_eq!(message, interpretation.message);
}

#[test]
fn risk_aggregation_thresholds_are_inclusive() {
    use crate::tracking::assessments::domain::RiskLevel;

    assert_eq!(scoring::risk_level_from_total(0), RiskLevel::Low);
    assert_eq!(scoring::risk_level_from_total(15), RiskLevel::Low);
    assert_eq!(scoring::risk_level_from_total(16), RiskLevel::Medium);
    assert_eq!(scoring::risk_level_from_total(30), RiskLevel::Medium);
    assert_eq!(scoring::risk_level_from_total(31), RiskLevel::High);
}

#[test]
fn generic_submission_surfaces_message_and_actions() {
    use crate::tracking::assessments::domain::{RiskLevel, Track};
    use std::collections::BTreeMap;

    let (service, profiles, _, _) = service();
    let user = user();
    seed_completed_profile(&profiles, &user, Track::Gambling, RiskLevel::Low);

    let outcome = service
        .submit(&user, "B1_1", BTreeMap::new(), 9, weekday_noon())
        .expect("submission processed");

    assert_eq!(outcome.interpretation.level, "high");
    assert!(outcome.message.is_some());
    assert!(outcome
        .actions
        .contains(&RecommendedAction::OfferCrisisSupport));
    assert!(outcome.profile_updates.is_none());
}

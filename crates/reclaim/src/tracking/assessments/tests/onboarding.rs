use std::collections::BTreeMap;

use super::common::*;
use crate::tracking::assessments::domain::{RiskLevel, Track};
use crate::tracking::assessments::service::AssessmentError;

#[test]
fn first_screen_advances_to_track_selection() {
    let (service, profiles, history, _) = service();
    let user = user();
    let now = weekday_noon();

    let outcome = service
        .submit(&user, "A1", BTreeMap::new(), 9, now)
        .expect("submission processed");

    assert!(outcome.show_track_selection);
    assert!(!outcome.onboarding_completed);

    let profile = profiles.get(&user).expect("profile exists");
    assert_eq!(profile.risk_behavior_score, Some(9));
    assert_eq!(profile.onboarding_day, 2);
    assert!(!profile.onboarding_completed);
    assert_eq!(history.rows().len(), 1);
}

#[test]
fn track_screen_advances_to_day_three() {
    let (service, profiles, _, _) = service();
    let user = user();
    let now = weekday_noon();

    service.submit(&user, "A1", BTreeMap::new(), 9, now).expect("A1");
    service.select_track(&user, Track::Trading).expect("track set");
    let outcome = service
        .submit(&user, "A3", BTreeMap::new(), 11, now)
        .expect("A3 processed");

    assert!(!outcome.show_track_selection);
    assert!(!outcome.onboarding_completed);

    let profile = profiles.get(&user).expect("profile exists");
    assert_eq!(profile.trading_score, Some(11));
    assert_eq!(profile.onboarding_day, 3);
}

#[test]
fn final_screen_completes_onboarding_and_derives_risk() {
    let (service, profiles, _, _) = service();
    let user = user();
    let now = weekday_noon();

    // risk 10 + track 10 + emotional 5 = 25, inside the medium band.
    service.submit(&user, "A1", BTreeMap::new(), 10, now).expect("A1");
    service.select_track(&user, Track::Gambling).expect("track set");
    service.submit(&user, "A2", BTreeMap::new(), 10, now).expect("A2");
    let outcome = service
        .submit(&user, "A5", BTreeMap::new(), 5, now)
        .expect("A5 processed");

    assert!(outcome.onboarding_completed);

    let profile = profiles.get(&user).expect("profile exists");
    assert!(profile.onboarding_completed);
    assert_eq!(profile.onboarding_day, 4);
    assert_eq!(profile.emotional_regulation_score, Some(5));
    assert_eq!(profile.risk_level, RiskLevel::Medium);
}

#[test]
fn low_scoring_onboarding_lands_on_low_risk() {
    let (service, profiles, _, _) = service();
    let user = user();
    let now = weekday_noon();

    service.submit(&user, "A1", BTreeMap::new(), 4, now).expect("A1");
    service.select_track(&user, Track::Digital).expect("track set");
    service.submit(&user, "A4", BTreeMap::new(), 5, now).expect("A4");
    service.submit(&user, "A5", BTreeMap::new(), 6, now).expect("A5");

    let profile = profiles.get(&user).expect("profile exists");
    assert_eq!(profile.risk_level, RiskLevel::Low);
}

#[test]
fn heavy_scores_land_on_high_risk() {
    let (service, profiles, _, _) = service();
    let user = user();
    let now = weekday_noon();

    service.submit(&user, "A1", BTreeMap::new(), 14, now).expect("A1");
    service.select_track(&user, Track::Gambling).expect("track set");
    service.submit(&user, "A2", BTreeMap::new(), 20, now).expect("A2");
    service.submit(&user, "A5", BTreeMap::new(), 10, now).expect("A5");

    let profile = profiles.get(&user).expect("profile exists");
    assert_eq!(profile.risk_level, RiskLevel::High);
}

#[test]
fn onboarding_submissions_carry_profile_updates_back() {
    let (service, _, _, _) = service();
    let user = user();

    let outcome = service
        .submit(&user, "A1", BTreeMap::new(), 9, weekday_noon())
        .expect("submission processed");

    let updates = outcome.profile_updates.expect("updates are surfaced");
    assert_eq!(updates.risk_behavior_score, Some(9));
    assert_eq!(updates.onboarding_day, Some(2));
}

#[test]
fn unknown_test_is_rejected_without_persistence() {
    let (service, _, history, _) = service();
    let result = service.submit(&user(), "Z9", BTreeMap::new(), 3, weekday_noon());

    assert!(matches!(result, Err(AssessmentError::UnknownTest(code)) if code == "Z9"));
    assert!(history.rows().is_empty());
}

#[test]
fn out_of_band_scores_are_recorded_as_unknown() {
    let (service, profiles, history, _) = service();
    let user = user();
    seed_completed_profile(&profiles, &user, Track::Gambling, RiskLevel::Low);

    let outcome = service
        .submit(&user, "B1_1", BTreeMap::new(), 99, weekday_noon())
        .expect("submission processed");

    assert_eq!(outcome.interpretation.level, "unknown");
    let rows = history.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].interpretation_level, "unknown");
}

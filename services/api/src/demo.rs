use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Local;
use clap::Args;

use reclaim::error::AppError;
use reclaim::tracking::assessments::{
    AssessmentService, CheckinContext, QuestionBank, SelectionConfig, TestLevel, Track, UserId,
};
use reclaim::tracking::checkins::{CheckinService, NewCheckin};

use crate::infra::{InMemoryCheckinStore, InMemoryProfileStore, InMemoryResultHistory};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Track chosen at the track-selection step (gambling, trading, digital)
    #[arg(long, default_value = "gambling")]
    pub(crate) track: String,
}

/// Drive a fresh in-memory user through the full onboarding sequence, one
/// check-in, and the first post-onboarding selection.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let track = Track::parse(&args.track).unwrap_or(Track::Gambling);

    let bank = Arc::new(QuestionBank::standard()?);
    let profiles = Arc::new(InMemoryProfileStore::default());
    let history = Arc::new(InMemoryResultHistory::default());
    let checkin_store = Arc::new(InMemoryCheckinStore::default());

    let assessments = AssessmentService::new(
        bank,
        SelectionConfig::default(),
        profiles,
        history,
        checkin_store.clone(),
    );
    let checkins = CheckinService::new(checkin_store);

    let user = UserId("demo-user".to_string());
    let now = Local::now().naive_local();
    let quiet_context = CheckinContext::default();

    println!("== onboarding ==");
    loop {
        let Some(test) = assessments.next_test(&user, &quiet_context, now)? else {
            break;
        };
        if test.level != TestLevel::A {
            break;
        }

        let score = test.questions.len() as i32 * 2;
        let outcome = assessments.submit(&user, test.code, BTreeMap::new(), score, now)?;

        println!(
            "{:<4} {:<24} score {:>2} -> {}",
            test.code, test.name, score, outcome.interpretation.level
        );

        if outcome.show_track_selection {
            assessments.select_track(&user, track)?;
            println!("     track selected: {}", track.label());
        }
        if outcome.onboarding_completed {
            break;
        }
    }

    let profile = assessments.profile(&user)?;
    println!("risk level after onboarding: {}", profile.risk_level.label());

    println!();
    println!("== first tracked day ==");
    let checkin = NewCheckin {
        urge: 8,
        stress: 4,
        mood: 5,
        relapse: false,
        note: None,
        loss_amount: None,
    };
    let receipt = checkins.record(&user, checkin, now)?;
    println!("check-in recorded, streak {}", receipt.streak.current);

    let context = CheckinContext {
        urge: Some(8),
        ..CheckinContext::default()
    };
    match assessments.next_test(&user, &context, now)? {
        Some(test) => println!("next test for urge 8: {} ({})", test.code, test.name),
        None => println!("no test due right now"),
    }

    Ok(())
}

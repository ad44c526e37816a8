//! Built-in question bank.
//!
//! Levels: A = onboarding screens, B = daily rotation clusters (B1 urge,
//! B2 impulse, B3 triggers, B4 emotional drift, B5 stress, B6 sleep/energy,
//! B7 decision pressure), C = weekly reflections, D = event-triggered.

use super::domain::{
    AnswerKind, FrequencyClass, InterpretationBand, QuestionSpec, ResponseTemplate, RiskLevel,
    TestDefinition, TestLevel, Track, TrackFilter,
};

/// Substrings that flag a check-in note for the crisis follow-up (D3).
/// Matched case-insensitively.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "no way out",
    "can't go on",
    "cant go on",
    "hopeless",
    "self-harm",
    "hurt myself",
    "no point anymore",
];

/// Rotation pool walked by least-recently-taken when no contextual daily
/// test applies.
pub(crate) const DAILY_ROTATION: &[&str] = &["B2_1", "B3_1", "B4_1", "B6_1"];

/// Guaranteed daily baseline; the last candidate before the day is exhausted.
pub(crate) const DAILY_BASELINE: &str = "B1_1";

/// Weekly candidates, rotated least-recently-taken on the weekly day.
pub(crate) const WEEKLY_ROTATION: &[&str] = &["C1", "C2", "C3", "C4"];

pub(crate) fn standard_definitions() -> Vec<TestDefinition> {
    let mut definitions = onboarding_screens();
    definitions.extend(daily_tests());
    definitions.extend(weekly_tests());
    definitions.extend(event_tests());
    definitions
}

fn scale10(code: &'static str, prompt: &'static str) -> QuestionSpec {
    QuestionSpec {
        code,
        prompt,
        kind: AnswerKind::Scale0To10,
        choices: Vec::new(),
        allow_multiple: false,
        weight: 1,
    }
}

fn scale3(code: &'static str, prompt: &'static str) -> QuestionSpec {
    QuestionSpec {
        code,
        prompt,
        kind: AnswerKind::Scale0To3,
        choices: Vec::new(),
        allow_multiple: false,
        weight: 1,
    }
}

fn yes_no(code: &'static str, prompt: &'static str) -> QuestionSpec {
    QuestionSpec {
        code,
        prompt,
        kind: AnswerKind::YesNo,
        choices: Vec::new(),
        allow_multiple: false,
        weight: 1,
    }
}

fn choice(
    code: &'static str,
    prompt: &'static str,
    choices: Vec<&'static str>,
    allow_multiple: bool,
) -> QuestionSpec {
    QuestionSpec {
        code,
        prompt,
        kind: AnswerKind::Choice,
        choices,
        allow_multiple,
        weight: 1,
    }
}

fn band(min: i32, max: i32, level: &'static str, message: &'static str) -> InterpretationBand {
    InterpretationBand {
        min,
        max,
        level,
        message,
    }
}

fn onboarding_screens() -> Vec<TestDefinition> {
    vec![
        TestDefinition {
            code: "A1",
            level: TestLevel::A,
            cluster: None,
            name: "Impulse profile",
            description: "A short screen of how strongly impulses steer your decisions.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Onboarding,
            cooldown_days: 0,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("A1_Q1", "How often do you act before thinking a decision through?"),
                scale3("A1_Q2", "How hard is it to stop an activity once you have started?"),
                scale3("A1_Q3", "How often do you chase a loss or setback with another attempt?"),
                scale3("A1_Q4", "How often do urges win even when you planned otherwise?"),
                scale3("A1_Q5", "How much do your habits interfere with work or relationships?"),
            ],
            bands: vec![
                band(0, 5, "low", "Impulses play a small role in your decisions right now."),
                band(6, 10, "medium", "Impulses have noticeable influence; the daily practice here will help you watch them."),
                band(11, 15, "high", "Impulses carry a lot of weight at the moment. That is exactly what this program works on."),
            ],
            max_score: 15,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "A2",
            level: TestLevel::A,
            cluster: None,
            name: "Gambling screen",
            description: "Nine questions about gambling over the last twelve months.",
            tracks: TrackFilter::Only(vec![Track::Gambling]),
            frequency: FrequencyClass::Onboarding,
            cooldown_days: 0,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("A2_Q1", "Have you bet more than you could really afford to lose?"),
                scale3("A2_Q2", "Have you needed to gamble with larger amounts to get the same excitement?"),
                scale3("A2_Q3", "Have you gone back another day to try to win back money you lost?"),
                scale3("A2_Q4", "Have you borrowed money or sold anything to gamble?"),
                scale3("A2_Q5", "Have you felt that you might have a problem with gambling?"),
                scale3("A2_Q6", "Has gambling caused you health problems, including stress or anxiety?"),
                scale3("A2_Q7", "Have people criticized your betting or told you that you had a problem?"),
                scale3("A2_Q8", "Has gambling caused financial problems for you or your household?"),
                scale3("A2_Q9", "Have you felt guilty about the way you gamble or what happens when you gamble?"),
            ],
            bands: vec![
                band(0, 2, "low", "Your answers point to low-risk gambling over the last year."),
                band(3, 7, "moderate_risk", "Your answers point to a moderate level of risk worth keeping an eye on."),
                band(8, 27, "problem_gambling", "Your answers point to gambling that is causing real harm. The support sections here are built for this."),
            ],
            max_score: 27,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "A3",
            level: TestLevel::A,
            cluster: None,
            name: "Trading screen",
            description: "How speculative trading behaves in your life right now.",
            tracks: TrackFilter::Only(vec![Track::Trading]),
            frequency: FrequencyClass::Onboarding,
            cooldown_days: 0,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("A3_Q1", "How often do you open positions outside your own trading plan?"),
                scale3("A3_Q2", "How often do you increase position size after a losing streak?"),
                scale3("A3_Q3", "How often do you check charts when you intended to be doing something else?"),
                scale3("A3_Q4", "How often has trading cut into sleep, meals, or time with people?"),
                scale3("A3_Q5", "How often do you hide trades or losses from people close to you?"),
                scale3("A3_Q6", "How often do you trade to recover an earlier loss the same day?"),
            ],
            bands: vec![
                band(0, 5, "low", "Trading looks contained right now."),
                band(6, 11, "elevated", "Trading is pulling at the edges of your plan; the daily tracking here will show you where."),
                band(12, 18, "high", "Trading is running a lot of your decisions. This program focuses on exactly that pattern."),
            ],
            max_score: 18,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "A4",
            level: TestLevel::A,
            cluster: None,
            name: "Digital habits screen",
            description: "How compulsive digital use shows up day to day.",
            tracks: TrackFilter::Only(vec![Track::Digital]),
            frequency: FrequencyClass::Onboarding,
            cooldown_days: 0,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("A4_Q1", "How often do you pick up your phone without a concrete reason?"),
                scale3("A4_Q2", "How often do sessions run much longer than you intended?"),
                scale3("A4_Q3", "How often do you feel restless when you cannot check your feeds?"),
                scale3("A4_Q4", "How often does screen time displace sleep?"),
                scale3("A4_Q5", "How often have you tried to cut down and not managed it?"),
                scale3("A4_Q6", "How often does use continue despite clear downsides?"),
            ],
            bands: vec![
                band(0, 5, "low", "Your digital use looks largely intentional."),
                band(6, 11, "elevated", "Use is drifting out of intention in places; tracking will show the pattern."),
                band(12, 18, "high", "Use is strongly compulsive right now. The daily work here targets that loop."),
            ],
            max_score: 18,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "A5",
            level: TestLevel::A,
            cluster: None,
            name: "Emotional regulation",
            description: "How you handle difficult feelings when they arrive.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Onboarding,
            cooldown_days: 0,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("A5_Q1", "When you are upset, how hard is it to concentrate on anything else?"),
                scale3("A5_Q2", "How often do feelings seem to arrive at full strength with no warning?"),
                scale3("A5_Q3", "How often do you act on a feeling before naming it?"),
                scale3("A5_Q4", "How hard is it to calm back down once you are worked up?"),
                scale3("A5_Q5", "How often do you avoid situations because of the feelings they bring?"),
                scale3("A5_Q6", "How often do difficult feelings end in the behavior you are trying to change?"),
            ],
            bands: vec![
                band(0, 5, "low", "You have solid footing with difficult feelings."),
                band(6, 11, "medium", "Some feelings still move you around; the journaling tools here are built for that."),
                band(12, 18, "vulnerable", "Difficult feelings are hard to ride out right now. The program will lean on short, concrete exercises."),
            ],
            max_score: 18,
            responses: Vec::new(),
        },
    ]
}

fn daily_tests() -> Vec<TestDefinition> {
    vec![
        TestDefinition {
            code: "B1_1",
            level: TestLevel::B,
            cluster: Some("B1"),
            name: "Urge level",
            description: "Rate today's pull toward the old behavior.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Daily,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![scale10(
                "B1_1_Q1",
                "How strong was the urge to go back to the old behavior today?",
            )],
            bands: vec![
                band(0, 3, "low", "A low-urge day. Worth noticing what made it easier."),
                band(4, 6, "medium", "A middling day. Urges came and went without taking over."),
                band(7, 10, "high", "A heavy-urge day. That is information, not failure."),
            ],
            max_score: 10,
            responses: vec![
                ResponseTemplate {
                    level: "low",
                    message: "Low urge today. Days like this are worth studying as much as the hard ones.",
                },
                ResponseTemplate {
                    level: "medium",
                    message: "A medium day. Noting when the urge peaked helps you see its shape.",
                },
                ResponseTemplate {
                    level: "high",
                    message: "The urge ran high today. Riding it out without acting is the whole skill.",
                },
            ],
        },
        TestDefinition {
            code: "B1_2",
            level: TestLevel::B,
            cluster: Some("B1"),
            name: "Urge triggers",
            description: "What set today's urge off.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Daily,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: true,
            show_after_relapse: false,
            questions: vec![choice(
                "B1_2_Q1",
                "What could have set the urge off today?",
                vec![
                    "Stress",
                    "Boredom or emptiness",
                    "Anxiety",
                    "An argument or difficult conversation",
                    "Bad news",
                    "Money worries",
                    "Ads or notifications",
                    "A match or market event",
                    "Tiredness",
                    "Plain habit",
                ],
                true,
            )],
            bands: vec![
                band(0, 2, "low", "A short trigger list today."),
                band(3, 10, "elevated", "Several triggers stacked up today; stacking is what makes urges feel sudden."),
            ],
            max_score: 10,
            responses: vec![ResponseTemplate {
                level: "elevated",
                message: "Naming the triggers is the first step to getting ahead of them.",
            }],
        },
        TestDefinition {
            code: "B2_1",
            level: TestLevel::B,
            cluster: Some("B2"),
            name: "Impulses under stress",
            description: "How stress converted into impulses today.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::AlternateDays,
            cooldown_days: 2,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("B2_1_Q1", "Did impulses flare up when you were under stress today?"),
                scale3(
                    "B2_1_Q2",
                    "Did you feel the pull to escape into the old behavior to switch off?",
                ),
            ],
            bands: vec![
                band(0, 2, "low", "Stress stayed decoupled from impulses today."),
                band(3, 4, "medium", "Stress and impulses linked up a few times today."),
                band(5, 6, "high", "Stress fed straight into impulses today; a planned outlet helps break that line."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B3_1",
            level: TestLevel::B,
            cluster: Some("B3"),
            name: "Trigger awareness",
            description: "Which situations put you at risk today.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly2or3,
            cooldown_days: 2,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: true,
            questions: vec![
                choice(
                    "B3_1_Q1",
                    "Which risky situations did you walk into today?",
                    vec![
                        "Being alone with nothing planned",
                        "Payday or money arriving",
                        "Alcohol",
                        "A place tied to the old behavior",
                        "Late night scrolling",
                        "An app or site you used before",
                        "Friends who still do it",
                        "None of these",
                    ],
                    true,
                ),
                scale3("B3_1_Q2", "How risky did those situations feel while you were in them?"),
            ],
            bands: vec![
                band(0, 3, "low", "Light trigger exposure today."),
                band(4, 11, "elevated", "You crossed several risk zones today; worth planning tomorrow's route around them."),
            ],
            max_score: 11,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B3_2",
            level: TestLevel::B,
            cluster: Some("B3"),
            name: "Trigger planning",
            description: "Looking one day ahead at avoidable triggers.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly2or3,
            cooldown_days: 3,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: true,
            questions: vec![
                scale3(
                    "B3_2_Q1",
                    "How exposed will tomorrow be to the situations that trip you up?",
                ),
                yes_no("B3_2_Q2", "Do you have a concrete plan for the riskiest moment tomorrow?"),
            ],
            bands: vec![
                band(0, 2, "low", "Tomorrow looks manageable."),
                band(3, 6, "elevated", "Tomorrow has exposed stretches; a plan made tonight beats willpower tomorrow."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B4_1",
            level: TestLevel::B,
            cluster: Some("B4"),
            name: "Emotional drift",
            description: "Where your mood moved over the day.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Daily,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("B4_1_Q1", "How far did your mood swing over the day?"),
                scale3("B4_1_Q2", "How much of the day was spent in a low or irritable state?"),
            ],
            bands: vec![
                band(0, 2, "steady", "A steady day emotionally."),
                band(3, 4, "medium", "Some drift today; moods that move fast deserve a note in the diary."),
                band(5, 6, "high", "A turbulent day. Turbulence and urges tend to travel together."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B5_1",
            level: TestLevel::B,
            cluster: Some("B5"),
            name: "Stress reactivity",
            description: "How sharply stress landed today.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 2,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("B5_1_Q1", "How strongly did your body react to stress today?"),
                scale3("B5_1_Q2", "How long did it take to come back down after a spike?"),
            ],
            bands: vec![
                band(0, 2, "low", "Stress rolled off without much grip today."),
                band(3, 4, "medium", "Stress left some marks today."),
                band(5, 6, "high", "Stress hit hard and stayed. Recovery time is trainable."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B5_2",
            level: TestLevel::B,
            cluster: Some("B5"),
            name: "Coping check",
            description: "What you reached for when stress peaked.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 2,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                yes_no("B5_2_Q1", "Did you use any deliberate coping step today (walk, breathing, calling someone)?"),
                scale3("B5_2_Q2", "How close did stress push you toward the old behavior today?"),
            ],
            bands: vec![
                band(0, 2, "low", "Coping held today."),
                band(3, 6, "medium", "Stress got close to the old road today; one rehearsed coping step changes that."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B6_1",
            level: TestLevel::B,
            cluster: Some("B6"),
            name: "Sleep and energy",
            description: "Last night's sleep and today's fuel.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly2or4,
            cooldown_days: 2,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("B6_1_Q1", "How poor was last night's sleep?"),
                scale3("B6_1_Q2", "How drained did you feel through the day?"),
            ],
            bands: vec![
                band(0, 2, "low", "Decent fuel today."),
                band(3, 4, "medium", "Running a bit low; tired days lower the guard."),
                band(5, 6, "high", "Running on empty. Urges get louder on days like this."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B7_1",
            level: TestLevel::B,
            cluster: Some("B7"),
            name: "Decision pressure",
            description: "Moments today where a risky decision almost happened.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::AlternateDays,
            cooldown_days: 2,
            min_risk_level: Some(RiskLevel::Medium),
            show_on_high_urge: true,
            show_after_relapse: false,
            questions: vec![
                scale3(
                    "B7_1_Q1",
                    "How close did you come to a decision you would have regretted?",
                ),
                scale3("B7_1_Q2", "How much did \"just this once\" thinking show up today?"),
            ],
            bands: vec![
                band(0, 2, "low", "Decisions stayed on your side today."),
                band(3, 4, "elevated", "A few near misses today; near misses are where the pattern shows itself."),
                band(5, 6, "high", "Today was a string of close calls. Slowing the decision down is the lever."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "B7_2",
            level: TestLevel::B,
            cluster: Some("B7"),
            name: "Risk appetite",
            description: "How much risk felt acceptable today.",
            tracks: TrackFilter::Only(vec![Track::Trading]),
            frequency: FrequencyClass::AlternateDays,
            cooldown_days: 2,
            min_risk_level: Some(RiskLevel::Medium),
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("B7_2_Q1", "How tempted were you to size up beyond your plan today?"),
                scale3("B7_2_Q2", "How reasonable did a revenge trade feel at any point today?"),
            ],
            bands: vec![
                band(0, 2, "low", "Risk appetite stayed inside the plan."),
                band(3, 4, "elevated", "Appetite pushed at the plan today."),
                band(5, 6, "high", "Appetite ran well past the plan today; that is the signal to step back from the screen."),
            ],
            max_score: 6,
            responses: Vec::new(),
        },
    ]
}

fn weekly_tests() -> Vec<TestDefinition> {
    let weekly_bands = |red_message: &'static str| {
        vec![
            band(0, 3, "green", "A solid week on this front."),
            band(4, 6, "yellow", "A mixed week; worth one concrete adjustment for the next one."),
            band(7, 9, "red", red_message),
        ]
    };

    vec![
        TestDefinition {
            code: "C1",
            level: TestLevel::C,
            cluster: None,
            name: "Week in review: control",
            description: "How much of the week ran on your terms.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 7,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("C1_Q1", "How often this week did the old behavior feel like it was steering?"),
                scale3("C1_Q2", "How often did you break a commitment you made to yourself?"),
                scale3("C1_Q3", "How often did you feel unable to stop once something started?"),
            ],
            bands: weekly_bands(
                "Control slipped a lot this week. That calls for tightening the basics, not for verdicts about yourself.",
            ),
            max_score: 9,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "C2",
            level: TestLevel::C,
            cluster: None,
            name: "Week in review: cravings",
            description: "The week's craving pattern at a glance.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 7,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("C2_Q1", "How frequent were cravings this week?"),
                scale3("C2_Q2", "How intense was the strongest craving?"),
                scale3("C2_Q3", "How much did cravings disrupt what you were doing?"),
            ],
            bands: weekly_bands(
                "Cravings ran the week. The event tools here exist exactly for weeks like this one.",
            ),
            max_score: 9,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "C3",
            level: TestLevel::C,
            cluster: None,
            name: "Week in review: balance",
            description: "Sleep, people, movement, and meals across the week.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 7,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("C3_Q1", "How off was your sleep rhythm this week?"),
                scale3("C3_Q2", "How isolated were you from people who matter?"),
                scale3("C3_Q3", "How much did basic routines (meals, movement) slip?"),
            ],
            bands: weekly_bands(
                "The foundations slipped badly this week; recovery work stands on them, so they come first.",
            ),
            max_score: 9,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "C4",
            level: TestLevel::C,
            cluster: None,
            name: "Week in review: confidence",
            description: "How capable the week left you feeling.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Weekly1or2,
            cooldown_days: 7,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("C4_Q1", "How much did you doubt you can change this pattern?"),
                scale3("C4_Q2", "How often did a setback feel like proof it is pointless?"),
                scale3("C4_Q3", "How hard was it to picture a month from now going well?"),
            ],
            bands: weekly_bands(
                "Confidence took real hits this week. Confidence follows evidence, and every tracked day is evidence.",
            ),
            max_score: 9,
            responses: Vec::new(),
        },
    ]
}

fn event_tests() -> Vec<TestDefinition> {
    vec![
        TestDefinition {
            code: "D1",
            level: TestLevel::D,
            cluster: None,
            name: "Relapse debrief",
            description: "A short, judgment-free look at what just happened.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Event,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: true,
            questions: vec![
                choice(
                    "D1_Q1",
                    "What was happening right before?",
                    vec![
                        "Stress peaked",
                        "I was alone with nothing planned",
                        "Money arrived",
                        "I was already low for days",
                        "A trigger I know caught me",
                        "Alcohol was involved",
                        "It came out of nowhere",
                        "Something else",
                    ],
                    false,
                ),
                scale3("D1_Q2", "How heavy does it feel right now?"),
                yes_no("D1_Q3", "Is there someone you could tell about this today?"),
            ],
            bands: vec![
                band(0, 2, "steady", "You are looking at this clearly. A slip is a data point, not a reset of who you are."),
                band(3, 5, "medium", "This one hit hard. Be deliberate about the next 24 hours; they matter most."),
                band(6, 7, "high", "This is weighing heavily. Please use the support tools now, not later."),
            ],
            max_score: 7,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "D2",
            level: TestLevel::D,
            cluster: None,
            name: "Urge surge check",
            description: "Right-now snapshot while the urge is high.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Event,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: true,
            show_after_relapse: false,
            questions: vec![
                scale10("D2_Q1", "How strong is the urge at this exact moment?"),
                scale3("D2_Q2", "How hard would it be to wait twenty minutes before deciding anything?"),
            ],
            bands: vec![
                band(0, 5, "medium", "The surge is real but you have room. Twenty minutes of delay is the move."),
                band(6, 13, "high", "The surge is at full strength. Change your location or call someone; decide nothing while it peaks."),
            ],
            max_score: 13,
            responses: Vec::new(),
        },
        TestDefinition {
            code: "D3",
            level: TestLevel::D,
            cluster: None,
            name: "Safety check",
            description: "A check on how heavy things are right now.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Event,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                scale3("D3_Q1", "How overwhelmed do you feel right now?"),
                scale3("D3_Q2", "How alone do you feel with this?"),
            ],
            bands: vec![
                band(0, 2, "medium", "Heavy, but carryable. Keep the day small and concrete."),
                band(3, 6, "critical", "This sounds like more than anyone should carry alone. Helplines exist for exactly this moment."),
            ],
            max_score: 6,
            responses: vec![ResponseTemplate {
                level: "critical",
                message: "Thank you for answering honestly. You do not have to hold this alone; a helpline call is a strong move, not a weak one.",
            }],
        },
        TestDefinition {
            code: "D4",
            level: TestLevel::D,
            cluster: None,
            name: "Welcome back",
            description: "Picking the thread back up after days away.",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Event,
            cooldown_days: 7,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![
                choice(
                    "D4_Q1",
                    "What kept you away?",
                    vec![
                        "Life got busy",
                        "I slipped and avoided the app",
                        "It felt pointless",
                        "I felt fine and stopped tracking",
                        "Something difficult happened",
                        "Just forgot",
                    ],
                    true,
                ),
                scale10("D4_Q2", "Where is the urge today?"),
                yes_no("D4_Q3", "Do you want to restart the daily check-in habit this week?"),
            ],
            bands: vec![
                band(0, 6, "low", "Good to have you back. The streak restarts today."),
                band(7, 12, "medium", "Good to have you back; the away days were not easy ones. Start small."),
                band(13, 19, "high", "Good to have you back, and it sounds like a rough stretch. One check-in today is enough."),
            ],
            max_score: 19,
            responses: Vec::new(),
        },
    ]
}

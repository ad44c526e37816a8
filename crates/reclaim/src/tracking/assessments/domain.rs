use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque identifier handed to the engine by the identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Problem-behavior category chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Gambling,
    Trading,
    Digital,
}

impl Track {
    pub const fn label(self) -> &'static str {
        match self {
            Track::Gambling => "gambling",
            Track::Trading => "trading",
            Track::Digital => "digital",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gambling" => Some(Track::Gambling),
            "trading" => Some(Track::Trading),
            "digital" => Some(Track::Digital),
            _ => None,
        }
    }
}

/// Derived risk classification from aggregated screening scores.
///
/// Ordering matters: `Unknown < Low < Medium < High` so definitions gated by
/// `min_risk_level` can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "unknown",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Questionnaire category: onboarding, daily rotation, weekly, event-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestLevel {
    A,
    B,
    C,
    D,
}

impl TestLevel {
    pub const fn label(self) -> &'static str {
        match self {
            TestLevel::A => "A",
            TestLevel::B => "B",
            TestLevel::C => "C",
            TestLevel::D => "D",
        }
    }
}

/// How often a definition is intended to surface once eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyClass {
    Daily,
    AlternateDays,
    Weekly1or2,
    Weekly2or3,
    Weekly2or4,
    Event,
    Onboarding,
}

/// Which tracks a definition applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackFilter {
    All,
    Only(Vec<Track>),
}

impl TrackFilter {
    pub fn admits(&self, track: Track) -> bool {
        match self {
            TrackFilter::All => true,
            TrackFilter::Only(tracks) => tracks.contains(&track),
        }
    }
}

/// Supported answer widgets, mirrored by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Scale0To10,
    Scale0To3,
    YesNo,
    Choice,
}

/// One question inside a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub code: &'static str,
    pub prompt: &'static str,
    pub kind: AnswerKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub allow_multiple: bool,
    pub weight: u8,
}

/// Inclusive score band mapped to an interpretive label and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationBand {
    pub min: i32,
    pub max: i32,
    pub level: &'static str,
    pub message: &'static str,
}

impl InterpretationBand {
    pub fn contains(&self, score: i32) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Follow-up message keyed by interpretation level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTemplate {
    pub level: &'static str,
    pub message: &'static str,
}

/// Immutable registry-owned questionnaire definition.
#[derive(Debug, Clone)]
pub struct TestDefinition {
    pub code: &'static str,
    pub level: TestLevel,
    pub cluster: Option<&'static str>,
    pub name: &'static str,
    pub description: &'static str,
    pub tracks: TrackFilter,
    pub frequency: FrequencyClass,
    pub cooldown_days: u8,
    pub min_risk_level: Option<RiskLevel>,
    pub show_on_high_urge: bool,
    pub show_after_relapse: bool,
    pub questions: Vec<QuestionSpec>,
    pub bands: Vec<InterpretationBand>,
    pub max_score: i32,
    pub responses: Vec<ResponseTemplate>,
}

impl TestDefinition {
    pub fn response_for(&self, level: &str) -> Option<&'static str> {
        self.responses
            .iter()
            .find(|template| template.level == level)
            .map(|template| template.message)
    }

    pub fn to_descriptor(&self) -> TestDescriptor {
        TestDescriptor {
            code: self.code,
            level: self.level,
            name: self.name,
            description: self.description,
            questions: self.questions.clone(),
        }
    }
}

/// Wire-facing view of a selected test.
#[derive(Debug, Clone, Serialize)]
pub struct TestDescriptor {
    pub code: &'static str,
    pub level: TestLevel,
    pub name: &'static str,
    pub description: &'static str,
    pub questions: Vec<QuestionSpec>,
}

/// Per-user mutable onboarding and screening state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub track: Option<Track>,
    pub onboarding_day: u8,
    pub onboarding_completed: bool,
    pub risk_behavior_score: Option<i32>,
    pub gambling_score: Option<i32>,
    pub trading_score: Option<i32>,
    pub digital_score: Option<i32>,
    pub emotional_regulation_score: Option<i32>,
    pub risk_level: RiskLevel,
}

impl UserProfile {
    /// Fresh profile as created on first engine touch.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            track: None,
            onboarding_day: 1,
            onboarding_completed: false,
            risk_behavior_score: None,
            gambling_score: None,
            trading_score: None,
            digital_score: None,
            emotional_regulation_score: None,
            risk_level: RiskLevel::Unknown,
        }
    }

    /// Track used for selection when the user has not chosen one yet.
    pub fn effective_track(&self) -> Track {
        self.track.unwrap_or(Track::Gambling)
    }

    /// Screening score matching the effective track.
    pub fn track_score(&self) -> Option<i32> {
        match self.effective_track() {
            Track::Gambling => self.gambling_score,
            Track::Trading => self.trading_score,
            Track::Digital => self.digital_score,
        }
    }
}

/// Partial profile mutation applied by the result processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_day: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_behavior_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambling_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_regulation_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(track) = self.track {
            profile.track = Some(track);
        }
        if let Some(day) = self.onboarding_day {
            profile.onboarding_day = day;
        }
        if let Some(completed) = self.onboarding_completed {
            profile.onboarding_completed = completed;
        }
        if let Some(score) = self.risk_behavior_score {
            profile.risk_behavior_score = Some(score);
        }
        if let Some(score) = self.gambling_score {
            profile.gambling_score = Some(score);
        }
        if let Some(score) = self.trading_score {
            profile.trading_score = Some(score);
        }
        if let Some(score) = self.digital_score {
            profile.digital_score = Some(score);
        }
        if let Some(score) = self.emotional_regulation_score {
            profile.emotional_regulation_score = Some(score);
        }
        if let Some(level) = self.risk_level {
            profile.risk_level = level;
        }
    }
}

/// Caller-supplied snapshot of the latest check-in; absent values mean
/// "no signal", never an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckinContext {
    #[serde(default)]
    pub urge: Option<u8>,
    #[serde(default)]
    pub stress: Option<u8>,
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub relapse: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub time_of_day: Option<String>,
}

/// One submitted answer value as it arrives off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Flag(bool),
    Selection(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// Raw score contribution: integers count as-is, an affirmative flag
    /// counts 3, a multi-select counts its selections.
    pub fn score_contribution(&self) -> i64 {
        match self {
            AnswerValue::Number(value) => *value,
            AnswerValue::Flag(true) => 3,
            AnswerValue::Flag(false) => 0,
            AnswerValue::Selection(values) => values.len() as i64,
            AnswerValue::Text(_) => 0,
        }
    }
}

/// Append-only completion record; presentation and completion are one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub user_id: UserId,
    pub test_code: String,
    pub level: TestLevel,
    pub answers: BTreeMap<String, AnswerValue>,
    pub total_score: i32,
    pub interpretation_level: String,
    pub interpretation_message: String,
    pub recorded_at: NaiveDateTime,
}

/// Scored interpretation of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub level: String,
    pub message: String,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i32>,
}

/// Follow-up the caller should surface after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    OfferCrisisSupport,
    ShowHelplines,
    SoftIntervention,
}

impl RecommendedAction {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendedAction::OfferCrisisSupport => "offer_crisis_support",
            RecommendedAction::ShowHelplines => "show_helplines",
            RecommendedAction::SoftIntervention => "soft_intervention",
        }
    }
}

/// Everything the caller gets back from a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub interpretation: Interpretation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<RecommendedAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_updates: Option<ProfileUpdate>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub onboarding_completed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_track_selection: bool,
}

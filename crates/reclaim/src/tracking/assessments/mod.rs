//! Adaptive questionnaire scheduling: question bank, selection engine, and
//! result processing.

pub mod catalog;
pub mod domain;
pub mod registry;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerKind, AnswerValue, CheckinContext, FrequencyClass, Interpretation, InterpretationBand,
    ProfileUpdate, QuestionSpec, RecommendedAction, ResponseTemplate, RiskLevel, SubmissionOutcome,
    TestDefinition, TestDescriptor, TestLevel, TestResult, Track, TrackFilter, UserId, UserProfile,
};
pub use registry::{QuestionBank, RegistryError};
pub use repository::{CheckinLog, ProfileStore, ResultHistory};
pub use router::assessment_router;
pub use selection::{SelectionConfig, SelectionEngine};
pub use service::{AssessmentError, AssessmentService};

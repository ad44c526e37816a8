use std::collections::BTreeMap;

use super::catalog;
use super::domain::{TestDefinition, TestLevel};

/// Validation errors raised while loading the question bank.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate test code '{0}' in question bank")]
    DuplicateCode(String),
    #[error("test '{code}' has an empty band [{min}, {max}]")]
    EmptyBand { code: String, min: i32, max: i32 },
    #[error("test '{code}' has overlapping bands at score {score}")]
    OverlappingBands { code: String, score: i32 },
    #[error("test '{code}' defines no questions")]
    NoQuestions { code: String },
}

/// Read-only, load-time-validated catalog of test definitions.
///
/// Lookup is key-based; `level` preserves definition order, which the
/// least-recently-taken rule depends on for deterministic tie-breaks.
#[derive(Debug)]
pub struct QuestionBank {
    definitions: Vec<TestDefinition>,
    index: BTreeMap<&'static str, usize>,
}

impl QuestionBank {
    /// Build the bank from the built-in catalog.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_definitions(catalog::standard_definitions())
    }

    /// Validate and index a definition set. Rejects duplicate codes,
    /// inverted bands, overlapping bands, and question-less tests so that
    /// malformed definitions surface at startup, not at lookup time.
    pub fn from_definitions(definitions: Vec<TestDefinition>) -> Result<Self, RegistryError> {
        let mut index = BTreeMap::new();

        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.code, position).is_some() {
                return Err(RegistryError::DuplicateCode(definition.code.to_string()));
            }
            if definition.questions.is_empty() {
                return Err(RegistryError::NoQuestions {
                    code: definition.code.to_string(),
                });
            }
            validate_bands(definition)?;
        }

        Ok(Self { definitions, index })
    }

    pub fn lookup(&self, code: &str) -> Option<&TestDefinition> {
        self.index
            .get(code)
            .map(|position| &self.definitions[*position])
    }

    /// Definitions of one level, in catalog order.
    pub fn level(&self, level: TestLevel) -> Vec<&TestDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.level == level)
            .collect()
    }

    pub fn definitions(&self) -> &[TestDefinition] {
        &self.definitions
    }
}

fn validate_bands(definition: &TestDefinition) -> Result<(), RegistryError> {
    let mut sorted = definition.bands.clone();
    sorted.sort_by_key(|band| band.min);

    for pair in sorted.windows(2) {
        if pair[1].min <= pair[0].max {
            return Err(RegistryError::OverlappingBands {
                code: definition.code.to_string(),
                score: pair[1].min,
            });
        }
    }

    for band in &sorted {
        if band.min > band.max {
            return Err(RegistryError::EmptyBand {
                code: definition.code.to_string(),
                min: band.min,
                max: band.max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::assessments::domain::{
        AnswerKind, FrequencyClass, InterpretationBand, QuestionSpec, TrackFilter,
    };

    fn definition(code: &'static str, bands: Vec<InterpretationBand>) -> TestDefinition {
        TestDefinition {
            code,
            level: TestLevel::B,
            cluster: None,
            name: "fixture",
            description: "",
            tracks: TrackFilter::All,
            frequency: FrequencyClass::Daily,
            cooldown_days: 1,
            min_risk_level: None,
            show_on_high_urge: false,
            show_after_relapse: false,
            questions: vec![QuestionSpec {
                code: "Q1",
                prompt: "fixture",
                kind: AnswerKind::Scale0To3,
                choices: Vec::new(),
                allow_multiple: false,
                weight: 1,
            }],
            bands,
            max_score: 10,
            responses: Vec::new(),
        }
    }

    fn bands(ranges: &[(i32, i32)]) -> Vec<InterpretationBand> {
        ranges
            .iter()
            .map(|(min, max)| InterpretationBand {
                min: *min,
                max: *max,
                level: "low",
                message: "fixture",
            })
            .collect()
    }

    #[test]
    fn standard_catalog_loads() {
        let bank = QuestionBank::standard().expect("built-in catalog is valid");
        assert!(bank.lookup("A1").is_some());
        assert!(bank.lookup("B3_2").is_some());
        assert!(bank.lookup("D4").is_some());
        assert!(bank.lookup("Z9").is_none());
        assert_eq!(bank.level(TestLevel::A).len(), 5);
        assert_eq!(bank.level(TestLevel::C).len(), 4);
        assert_eq!(bank.level(TestLevel::D).len(), 4);
    }

    #[test]
    fn level_listing_preserves_catalog_order() {
        let bank = QuestionBank::standard().expect("built-in catalog is valid");
        let codes: Vec<&str> = bank
            .level(TestLevel::C)
            .iter()
            .map(|definition| definition.code)
            .collect();
        assert_eq!(codes, vec!["C1", "C2", "C3", "C4"]);
    }

    #[test]
    fn rejects_duplicate_codes() {
        let result = QuestionBank::from_definitions(vec![
            definition("X1", bands(&[(0, 5)])),
            definition("X1", bands(&[(0, 5)])),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateCode(code)) if code == "X1"));
    }

    #[test]
    fn rejects_overlapping_bands() {
        let result = QuestionBank::from_definitions(vec![definition(
            "X1",
            bands(&[(0, 5), (5, 9)]),
        )]);
        assert!(matches!(
            result,
            Err(RegistryError::OverlappingBands { score: 5, .. })
        ));
    }

    #[test]
    fn rejects_inverted_bands() {
        let result = QuestionBank::from_definitions(vec![definition("X1", bands(&[(6, 2)]))]);
        assert!(matches!(result, Err(RegistryError::EmptyBand { .. })));
    }

    #[test]
    fn rejects_question_less_tests() {
        let mut empty = definition("X1", bands(&[(0, 5)]));
        empty.questions.clear();
        let result = QuestionBank::from_definitions(vec![empty]);
        assert!(matches!(result, Err(RegistryError::NoQuestions { .. })));
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;
use wb_vocab::{LanguagePairKey, tokenizer::clean_words};

use crate::{
    error::LessonError,
    validation::{validate_language_pair, validate_sentence},
};

/// One of the two authored language slots of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// A sentence pair with optional author-supplied distractor words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    /// Space separated decoys shown when `A` is the solution.
    #[serde(rename = "noiseA", default, skip_serializing_if = "Option::is_none")]
    pub noise_a: Option<String>,
    /// Space separated decoys shown when `B` is the solution.
    #[serde(rename = "noiseB", default, skip_serializing_if = "Option::is_none")]
    pub noise_b: Option<String>,
}

impl Exercise {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            noise_a: None,
            noise_b: None,
        }
    }

    pub fn sentence(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Author noise for `side`, ignoring blank strings.
    pub fn noise(&self, side: Side) -> Option<&str> {
        let noise = match side {
            Side::A => self.noise_a.as_deref(),
            Side::B => self.noise_b.as_deref(),
        };
        noise.filter(|n| !n.trim().is_empty())
    }
}

/// A lesson as authored, shared or saved.
///
/// `languages` keeps the authored `[A, B]` order; it is not sorted like a
/// [`LanguagePairKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LessonConfig {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(rename = "langA-B")]
    pub languages: [String; 2],
    #[validate(length(min = 1, message = "a lesson needs at least one exercise"))]
    pub exercises: Vec<Exercise>,
}

impl LessonConfig {
    /// Parse lesson JSON and validate it.
    pub fn from_json(text: &str) -> Result<Self, LessonError> {
        let config: LessonConfig = serde_json::from_str(text)?;
        config.validated()
    }

    pub fn to_json(&self) -> Result<String, LessonError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every rule a lesson must satisfy before it reaches a session.
    pub fn validate_lesson(&self) -> Result<(), LessonError> {
        if self.title.trim().is_empty() {
            return Err(LessonError::Validation("Title cannot be empty".to_string()));
        }
        self.validate()?;
        validate_language_pair(&self.languages)?;

        for (index, exercise) in self.exercises.iter().enumerate() {
            validate_sentence("A", index, &exercise.a)?;
            validate_sentence("B", index, &exercise.b)?;
        }

        Ok(())
    }

    /// Validate, normalizing the language codes to lower case.
    pub fn validated(mut self) -> Result<Self, LessonError> {
        self.validate_lesson()?;
        for lang in &mut self.languages {
            *lang = lang.trim().to_lowercase();
        }
        Ok(self)
    }

    pub fn language(&self, side: Side) -> &str {
        match side {
            Side::A => &self.languages[0],
            Side::B => &self.languages[1],
        }
    }

    pub fn pair_key(&self) -> Result<LanguagePairKey, LessonError> {
        LanguagePairKey::new(&self.languages[0], &self.languages[1])
            .map_err(|e| LessonError::Validation(e.to_string()))
    }

    pub fn exercise(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Every clean token of the `side` sentences, across all exercises.
    pub fn word_pool(&self, side: Side) -> Vec<String> {
        self.exercises
            .iter()
            .flat_map(|exercise| clean_words(exercise.sentence(side)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = r#"{
        "title": "T",
        "langA-B": ["EN", "es"],
        "exercises": [
            {"A": "The cat is black", "B": "El gato es negro"},
            {"A": "The dog is white.", "B": "El perro es blanco.", "noiseB": "gata  rojo"}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let lesson = LessonConfig::from_json(LESSON).unwrap();
        assert_eq!(lesson.title, "T");
        assert_eq!(lesson.languages, ["en".to_string(), "es".to_string()]);
        assert_eq!(lesson.len(), 2);
        assert_eq!(lesson.language(Side::B), "es");
        assert_eq!(lesson.pair_key().unwrap().to_string(), "en:es");
        assert_eq!(lesson.exercises[1].noise(Side::B), Some("gata  rojo"));
        assert_eq!(lesson.exercises[1].noise(Side::A), None);
    }

    #[test]
    fn test_json_round_trip_keeps_field_names() {
        let lesson = LessonConfig::from_json(LESSON).unwrap();
        let json = lesson.to_json().unwrap();
        assert!(json.contains("\"langA-B\""));
        assert!(json.contains("\"noiseB\""));
        assert!(!json.contains("\"noiseA\""));
        assert_eq!(LessonConfig::from_json(&json).unwrap(), lesson);
    }

    #[test]
    fn test_missing_fields_are_parse_errors() {
        let missing_exercises = r#"{"title": "T", "langA-B": ["en", "es"]}"#;
        assert!(matches!(
            LessonConfig::from_json(missing_exercises),
            Err(LessonError::Parse(_))
        ));

        let short_languages = r#"{"title": "T", "langA-B": ["en"], "exercises": []}"#;
        assert!(matches!(
            LessonConfig::from_json(short_languages),
            Err(LessonError::Parse(_))
        ));

        let missing_b = r#"{"title": "T", "langA-B": ["en", "es"], "exercises": [{"A": "x"}]}"#;
        assert!(matches!(
            LessonConfig::from_json(missing_b),
            Err(LessonError::Parse(_))
        ));

        let wrong_type = r#"{"title": "T", "langA-B": ["en", "es"], "exercises": [{"A": 1, "B": "x"}]}"#;
        assert!(matches!(
            LessonConfig::from_json(wrong_type),
            Err(LessonError::Parse(_))
        ));
    }

    #[test]
    fn test_rule_violations_are_validation_errors() {
        let no_exercises = r#"{"title": "T", "langA-B": ["en", "es"], "exercises": []}"#;
        assert!(matches!(
            LessonConfig::from_json(no_exercises),
            Err(LessonError::Validation(_))
        ));

        let same_languages =
            r#"{"title": "T", "langA-B": ["en", "EN"], "exercises": [{"A": "a", "B": "b"}]}"#;
        assert!(matches!(
            LessonConfig::from_json(same_languages),
            Err(LessonError::Validation(_))
        ));

        let blank_sentence =
            r#"{"title": "T", "langA-B": ["en", "es"], "exercises": [{"A": "a", "B": " "}]}"#;
        assert!(matches!(
            LessonConfig::from_json(blank_sentence),
            Err(LessonError::Validation(_))
        ));

        let blank_title =
            r#"{"title": "  ", "langA-B": ["en", "es"], "exercises": [{"A": "a", "B": "b"}]}"#;
        assert!(matches!(
            LessonConfig::from_json(blank_title),
            Err(LessonError::Validation(_))
        ));
    }

    #[test]
    fn test_word_pool() {
        let lesson = LessonConfig::from_json(LESSON).unwrap();
        assert_eq!(
            lesson.word_pool(Side::B),
            vec!["El", "gato", "es", "negro", "El", "perro", "es", "blanco"]
        );
    }
}

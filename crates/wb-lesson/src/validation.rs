use std::sync::LazyLock;

use regex::Regex;

use crate::error::LessonError;

/// BCP 47-ish language tag: a 2-3 letter base language with optional
/// subtags (`en`, `pt-br`, `zh-hans`).
static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{2,8})*$").expect("language code pattern is valid")
});

/// Validate a language code
///
/// # Examples
/// ```
/// use wb_lesson::validation::validate_language_code;
///
/// assert!(validate_language_code("en").is_ok());
/// assert!(validate_language_code("PT-br").is_ok());
/// assert!(validate_language_code("english").is_err());
/// ```
pub fn validate_language_code(code: &str) -> Result<(), LessonError> {
    if code.trim().is_empty() {
        return Err(LessonError::Validation(
            "Language code cannot be empty".to_string(),
        ));
    }

    // Normalize to lowercase for comparison
    let normalized = code.trim().to_lowercase();

    if !LANGUAGE_CODE.is_match(&normalized) {
        return Err(LessonError::Validation(format!(
            "Invalid language code: '{}'. Expected a code such as 'en', 'es' or 'pt-br'",
            code
        )));
    }

    Ok(())
}

/// Validate the authored `[A, B]` language pair of a lesson
pub fn validate_language_pair(languages: &[String; 2]) -> Result<(), LessonError> {
    validate_language_code(&languages[0])?;
    validate_language_code(&languages[1])?;

    if languages[0].trim().eq_ignore_ascii_case(languages[1].trim()) {
        return Err(LessonError::Validation(format!(
            "Lesson languages must differ, got '{}' twice",
            languages[0]
        )));
    }

    Ok(())
}

/// Reject empty or whitespace-only sentences
pub fn validate_sentence(field: &str, index: usize, sentence: &str) -> Result<(), LessonError> {
    if sentence.trim().is_empty() {
        return Err(LessonError::Validation(format!(
            "Exercise {} has an empty '{}' sentence",
            index + 1,
            field
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_code() {
        // Valid codes
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("EN").is_ok()); // Case insensitive
        assert!(validate_language_code("es").is_ok());
        assert!(validate_language_code("fil").is_ok());
        assert!(validate_language_code("zh-Hans").is_ok());

        // Invalid codes
        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("e").is_err());
        assert!(validate_language_code("english").is_err());
        assert!(validate_language_code("123").is_err());
        assert!(validate_language_code("en:es").is_err());
    }

    #[test]
    fn test_validate_language_pair() {
        assert!(validate_language_pair(&["en".into(), "es".into()]).is_ok());
        assert!(validate_language_pair(&["en".into(), "EN".into()]).is_err());
        assert!(validate_language_pair(&["en".into(), "".into()]).is_err());
    }

    #[test]
    fn test_validate_sentence() {
        assert!(validate_sentence("A", 0, "Hola").is_ok());
        assert!(validate_sentence("B", 3, "  ").is_err());
    }
}

//! Lesson sharing through URL parameters, and translator links.

use url::Url;

use crate::{
    codec::{compress, decompress},
    error::LessonError,
    lesson::LessonConfig,
};

/// Query parameter carrying a shared lesson.
pub const LESSON_PARAM: &str = "lesson";

const TRANSLATOR_URL: &str = "https://translate.google.com/";

/// Compress a lesson into a URL-safe string.
pub fn encode_lesson(config: &LessonConfig) -> Result<String, LessonError> {
    Ok(compress(&config.to_json()?)?)
}

/// Inverse of [`encode_lesson`]. The decoded lesson is validated.
pub fn decode_lesson(encoded: &str) -> Result<LessonConfig, LessonError> {
    let json = decompress(encoded)?;
    LessonConfig::from_json(&json)
}

/// `base` with the encoded lesson attached as the [`LESSON_PARAM`] query
/// parameter. Existing query parameters of `base` are kept.
pub fn share_url(base: &str, config: &LessonConfig) -> Result<Url, LessonError> {
    let mut url = Url::parse(base)?;
    let encoded = encode_lesson(config)?;
    url.query_pairs_mut().append_pair(LESSON_PARAM, &encoded);
    Ok(url)
}

/// Extract and decode the lesson carried by a share URL.
pub fn lesson_from_url(url: &str) -> Result<LessonConfig, LessonError> {
    let url = Url::parse(url)?;
    let encoded = url
        .query_pairs()
        .find(|(name, _)| name == LESSON_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(LessonError::MissingParameter(LESSON_PARAM))?;
    decode_lesson(&encoded)
}

/// Link to an external translator for `text`. The link is only built, never
/// fetched.
pub fn translate_link(text: &str, from: &str, to: &str) -> Result<Url, LessonError> {
    let mut url = Url::parse(TRANSLATOR_URL)?;
    url.query_pairs_mut()
        .append_pair("sl", from)
        .append_pair("tl", to)
        .append_pair("text", text)
        .append_pair("op", "translate");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::Exercise;

    fn lesson() -> LessonConfig {
        LessonConfig {
            title: "Animales".into(),
            languages: ["en".into(), "es".into()],
            exercises: vec![
                Exercise::new("The cat is black", "El gato es negro"),
                Exercise::new("Good morning!", "¡Buenos días!"),
            ],
        }
    }

    #[test]
    fn test_encode_decode() {
        let encoded = encode_lesson(&lesson()).unwrap();
        assert_eq!(decode_lesson(&encoded).unwrap(), lesson());
    }

    #[test]
    fn test_share_url_round_trip() {
        let url = share_url("https://example.org/drill?theme=dark", &lesson()).unwrap();
        assert!(url.as_str().starts_with("https://example.org/drill?theme=dark&lesson="));
        assert_eq!(lesson_from_url(url.as_str()).unwrap(), lesson());
    }

    #[test]
    fn test_lesson_from_url_without_parameter() {
        assert!(matches!(
            lesson_from_url("https://example.org/drill"),
            Err(LessonError::MissingParameter(LESSON_PARAM))
        ));
        assert!(matches!(
            lesson_from_url("not a url"),
            Err(LessonError::Url(_))
        ));
    }

    #[test]
    fn test_invalid_shared_lesson_is_rejected() {
        let invalid = LessonConfig {
            exercises: Vec::new(),
            ..lesson()
        };
        let encoded = compress(&serde_json::to_string(&invalid).unwrap()).unwrap();
        assert!(matches!(
            decode_lesson(&encoded),
            Err(LessonError::Validation(_))
        ));
        assert!(matches!(decode_lesson("@@"), Err(LessonError::Codec(_))));
    }

    #[test]
    fn test_translate_link() {
        let link = translate_link("¿Qué tal?", "es", "en").unwrap();
        assert_eq!(link.host_str(), Some("translate.google.com"));
        let pairs: Vec<(String, String)> = link
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("text".to_string(), "¿Qué tal?".to_string())));
        assert!(pairs.contains(&("sl".to_string(), "es".to_string())));
    }
}

//! Answer checking and the word-level diff shown back to the learner.
//!
//! Comparison is lenient on accents, casing, punctuation and whitespace while
//! still requiring the right words in the right order.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use wb_vocab::tokenizer::{clean_words, split_words};

/// Normalize a string for answer comparison.
///
/// Applies the following transformations in order:
/// 1. Lowercase
/// 2. Ligature expansion (e.g. `ß` -> `ss`)
/// 3. Unicode NFD decomposition to separate base characters from combining marks
/// 4. Strip combining marks and punctuation, keeping letters and digits
/// 5. Collapse and trim whitespace
pub fn normalize_for_comparison(s: &str) -> String {
    s.to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe")
        .nfd()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// In the attempt and in the solution, at this position.
    Matched,
    /// In the solution but not in the attempt.
    Missing,
    /// In the attempt but not in the solution.
    Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackToken {
    pub text: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub tokens: Vec<FeedbackToken>,
}

impl AnswerFeedback {
    pub fn mistakes(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Matched)
            .count()
    }
}

/// Compare the words picked by the learner against the solution sentence.
pub fn check_answer(attempt: &[String], solution: &str) -> AnswerFeedback {
    let attempt_words: Vec<String> = attempt
        .iter()
        .flat_map(|word| split_words(word))
        .collect();
    let solution_words = clean_words(solution);

    let correct = normalize_for_comparison(&attempt_words.join(" "))
        == normalize_for_comparison(solution);

    AnswerFeedback {
        correct,
        tokens: diff_words(&attempt_words, &solution_words),
    }
}

/// Longest-common-subsequence diff over normalized words.
fn diff_words(attempt: &[String], solution: &[String]) -> Vec<FeedbackToken> {
    let left: Vec<String> = attempt.iter().map(|w| normalize_for_comparison(w)).collect();
    let right: Vec<String> = solution.iter().map(|w| normalize_for_comparison(w)).collect();
    let (n, m) = (left.len(), right.len());

    // lcs[i][j] = LCS length of left[i..] and right[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if left[i] == right[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut tokens = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if left[i] == right[j] {
            tokens.push(token(&attempt[i], TokenKind::Matched));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            tokens.push(token(&attempt[i], TokenKind::Extra));
            i += 1;
        } else {
            tokens.push(token(&solution[j], TokenKind::Missing));
            j += 1;
        }
    }
    tokens.extend(attempt[i..].iter().map(|w| token(w, TokenKind::Extra)));
    tokens.extend(solution[j..].iter().map(|w| token(w, TokenKind::Missing)));
    tokens
}

fn token(text: &str, kind: TokenKind) -> FeedbackToken {
    FeedbackToken {
        text: text.to_string(),
        kind,
    }
}

//! Per-exercise progress and the mistake log of a lesson.
//!
//! Review scheduling follows an exponential interval system keyed on the
//! score `times_correct - times_wrong`: hours while an exercise is fresh,
//! then days with roughly doubling gaps up to three months.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::direction::ExerciseDirection;

/// Interval before an exercise with `score` should be reviewed again.
///
/// * Score ≤ 0: 2 hours (immediate retry)
/// * Score 1: 4 hours
/// * Score 2: 8 hours
/// * Score 3: 1 day
/// * Score 4: 2 days
/// * Score 5: 5 days
/// * Score 6: 10 days
/// * Score 7: 20 days
/// * Score 8: 40 days
/// * Score 9: 60 days
/// * Score ≥ 10: 90 days (mastered)
pub fn review_interval(score: i32) -> Duration {
    match score {
        s if s <= 0 => Duration::hours(2),
        1 => Duration::hours(4),
        2 => Duration::hours(8),
        3 => Duration::days(1),
        4 => Duration::days(2),
        5 => Duration::days(5),
        6 => Duration::days(10),
        7 => Duration::days(20),
        8 => Duration::days(40),
        9 => Duration::days(60),
        _ => Duration::days(90),
    }
}

/// Score at which an exercise counts as mastered.
pub const MASTERY_SCORE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub times_correct: i32,
    pub times_wrong: i32,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
}

impl ExerciseProgress {
    pub fn score(&self) -> i32 {
        self.times_correct - self.times_wrong
    }

    pub fn is_mastered(&self) -> bool {
        self.score() >= MASTERY_SCORE
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_at
    }

    fn record(&mut self, correct: bool, now: DateTime<Utc>) {
        if correct {
            self.times_correct += 1;
        } else {
            self.times_wrong += 1;
        }
        self.last_reviewed_at = now;
        self.next_review_at = now + review_interval(self.score());
    }
}

/// A wrong answer, kept so it can be reviewed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    pub exercise_index: usize,
    pub direction: ExerciseDirection,
    pub prompt: String,
    pub attempt: String,
    pub solution: String,
    pub at: DateTime<Utc>,
}

/// Progress of one lesson: review counters per exercise plus every mistake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub exercises: BTreeMap<usize, ExerciseProgress>,
    pub mistakes: Vec<Mistake>,
}

impl LessonProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize, correct: bool) -> &ExerciseProgress {
        self.record_at(index, correct, Utc::now())
    }

    pub fn record_at(&mut self, index: usize, correct: bool, now: DateTime<Utc>) -> &ExerciseProgress {
        let progress = self.exercises.entry(index).or_insert(ExerciseProgress {
            times_correct: 0,
            times_wrong: 0,
            last_reviewed_at: now,
            next_review_at: now,
        });
        progress.record(correct, now);
        progress
    }

    pub fn record_mistake(&mut self, mistake: Mistake) {
        self.mistakes.push(mistake);
    }

    pub fn mistakes_for(&self, index: usize) -> impl Iterator<Item = &Mistake> {
        self.mistakes
            .iter()
            .filter(move |m| m.exercise_index == index)
    }

    pub fn clear_mistakes(&mut self) {
        self.mistakes.clear();
    }

    /// Indices of exercises that were never reviewed or are due at `now`,
    /// out of `exercise_count`.
    pub fn due_exercises(&self, exercise_count: usize, now: DateTime<Utc>) -> Vec<usize> {
        (0..exercise_count)
            .filter(|index| {
                self.exercises
                    .get(index)
                    .is_none_or(|progress| progress.is_due(now))
            })
            .collect()
    }
}

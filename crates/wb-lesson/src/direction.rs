//! Exercise direction assignment and its two-pass cycle.
//!
//! Each exercise gets a direction so that half of the lesson (rounded down)
//! is practised A to B and the rest B to A. The first pass over the lesson
//! uses that assignment, the second pass flips every direction, and the pass
//! after that starts over with a fresh shuffle.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::lesson::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseDirection {
    AtoB,
    BtoA,
}

impl ExerciseDirection {
    pub fn flip(self) -> Self {
        match self {
            ExerciseDirection::AtoB => ExerciseDirection::BtoA,
            ExerciseDirection::BtoA => ExerciseDirection::AtoB,
        }
    }

    pub fn prompt_side(self) -> Side {
        match self {
            ExerciseDirection::AtoB => Side::A,
            ExerciseDirection::BtoA => Side::B,
        }
    }

    pub fn solution_side(self) -> Side {
        match self {
            ExerciseDirection::AtoB => Side::B,
            ExerciseDirection::BtoA => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Directions are used as assigned.
    Assigned,
    /// Every assigned direction is flipped.
    Flipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionCycle {
    exercise_count: usize,
    assignment: Vec<ExerciseDirection>,
    phase: CyclePhase,
}

impl DirectionCycle {
    /// A cycle for `exercise_count` exercises. The assignment is built lazily
    /// on the first [`direction_for`](Self::direction_for).
    pub fn new(exercise_count: usize) -> Self {
        Self {
            exercise_count,
            assignment: Vec::new(),
            phase: CyclePhase::Assigned,
        }
    }

    pub fn initialize(&mut self, exercise_count: usize) {
        self.initialize_with(exercise_count, &mut rand::thread_rng());
    }

    /// Build a balanced assignment, shuffle it and go back to
    /// [`CyclePhase::Assigned`].
    pub fn initialize_with<R: Rng + ?Sized>(&mut self, exercise_count: usize, rng: &mut R) {
        let a_to_b = exercise_count / 2;

        self.exercise_count = exercise_count;
        self.assignment.clear();
        self.assignment
            .extend(std::iter::repeat_n(ExerciseDirection::AtoB, a_to_b));
        self.assignment.extend(std::iter::repeat_n(
            ExerciseDirection::BtoA,
            exercise_count - a_to_b,
        ));
        self.assignment.shuffle(rng);
        self.phase = CyclePhase::Assigned;

        tracing::debug!(
            "Direction assignment built for {} exercises ({} A->B)",
            exercise_count,
            a_to_b
        );
    }

    /// Direction of exercise `index` in the current phase, or `None` when the
    /// index is outside the lesson.
    pub fn direction_for(&mut self, index: usize) -> Option<ExerciseDirection> {
        if self.assignment.is_empty() {
            self.initialize(self.exercise_count);
        }

        let assigned = *self.assignment.get(index)?;
        Some(match self.phase {
            CyclePhase::Assigned => assigned,
            CyclePhase::Flipped => assigned.flip(),
        })
    }

    /// Move to the next pass. Called once a full pass over the lesson is done.
    pub fn advance_cycle(&mut self) {
        self.advance_cycle_with(&mut rand::thread_rng());
    }

    pub fn advance_cycle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.phase {
            CyclePhase::Assigned => {
                self.phase = CyclePhase::Flipped;
                tracing::info!("Pass complete, replaying lesson with flipped directions");
            }
            CyclePhase::Flipped => {
                tracing::info!("Second pass complete, reshuffling directions");
                self.initialize_with(self.exercise_count, rng);
            }
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn assignment(&self) -> &[ExerciseDirection] {
        &self.assignment
    }
}

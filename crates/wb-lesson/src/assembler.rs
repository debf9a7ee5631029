use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use wb_vocab::tokenizer::{clean_words, split_words};

use crate::{
    direction::ExerciseDirection,
    lesson::{Exercise, LessonConfig},
};

/// Synthesized decoys per exercise unless configured otherwise.
pub const DEFAULT_NOISE_WORDS: usize = 5;

/// Everything a UI needs to render one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePayload {
    pub index: usize,
    pub direction: ExerciseDirection,
    pub prompt: String,
    pub solution: String,
    pub prompt_lang: String,
    pub solution_lang: String,
    pub solution_words: Vec<String>,
    pub noise_words: Vec<String>,
    /// Solution and noise words, shuffled.
    pub word_bank: Vec<String>,
}

/// Builds exercise payloads for one lesson.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseAssembler<'a> {
    lesson: &'a LessonConfig,
    noise_count: usize,
}

impl<'a> ExerciseAssembler<'a> {
    pub fn new(lesson: &'a LessonConfig) -> Self {
        Self {
            lesson,
            noise_count: DEFAULT_NOISE_WORDS,
        }
    }

    pub fn with_noise_count(mut self, noise_count: usize) -> Self {
        self.noise_count = noise_count;
        self
    }

    /// Payload for exercise `index`, or `None` if the lesson has no such
    /// exercise.
    pub fn assemble(&self, index: usize, direction: ExerciseDirection) -> Option<ExercisePayload> {
        self.assemble_with(index, direction, &mut rand::thread_rng())
    }

    pub fn assemble_with<R: Rng + ?Sized>(
        &self,
        index: usize,
        direction: ExerciseDirection,
        rng: &mut R,
    ) -> Option<ExercisePayload> {
        let exercise = self.lesson.exercise(index)?;
        let solution_side = direction.solution_side();

        let noise_words = match exercise.noise(solution_side) {
            Some(noise) => split_words(noise),
            None => synthesize_noise(
                &self.lesson.word_pool(solution_side),
                &clean_words(exercise.sentence(solution_side)),
                self.noise_count,
                rng,
            ),
        };

        Some(build_payload(
            index,
            exercise,
            direction,
            self.lesson,
            noise_words,
            rng,
        ))
    }
}

fn build_payload<R: Rng + ?Sized>(
    index: usize,
    exercise: &Exercise,
    direction: ExerciseDirection,
    lesson: &LessonConfig,
    noise_words: Vec<String>,
    rng: &mut R,
) -> ExercisePayload {
    let prompt_side = direction.prompt_side();
    let solution_side = direction.solution_side();
    let solution = exercise.sentence(solution_side).to_string();
    let solution_words = clean_words(&solution);

    let mut word_bank: Vec<String> = solution_words
        .iter()
        .chain(&noise_words)
        .cloned()
        .collect();
    word_bank.shuffle(rng);

    ExercisePayload {
        index,
        direction,
        prompt: exercise.sentence(prompt_side).to_string(),
        solution,
        prompt_lang: lesson.language(prompt_side).to_string(),
        solution_lang: lesson.language(solution_side).to_string(),
        solution_words,
        noise_words,
        word_bank,
    }
}

/// Pick up to `count` decoys from `pool`, skipping anything that appears in
/// the solution. Comparisons ignore case.
pub fn synthesize_noise<R: Rng + ?Sized>(
    pool: &[String],
    solution_words: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let solution: Vec<String> = solution_words.iter().map(|w| w.to_lowercase()).collect();

    let mut candidates: Vec<&String> = pool
        .iter()
        .filter(|word| !solution.contains(&word.to_lowercase()))
        .collect();
    candidates.shuffle(rng);

    let mut seen: Vec<String> = Vec::new();
    let mut noise = Vec::new();
    for word in candidates {
        if noise.len() == count {
            break;
        }
        let lowered = word.to_lowercase();
        if seen.contains(&lowered) {
            continue;
        }
        seen.push(lowered);
        noise.push(word.clone());
    }
    noise
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn lesson(exercises: Vec<Exercise>) -> LessonConfig {
        LessonConfig {
            title: "T".into(),
            languages: ["en".into(), "es".into()],
            exercises,
        }
    }

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    #[test]
    fn test_single_exercise_a_to_b() {
        let lesson = lesson(vec![Exercise::new("The cat is black", "El gato es negro")]);
        let payload = ExerciseAssembler::new(&lesson)
            .assemble(0, ExerciseDirection::AtoB)
            .unwrap();

        assert_eq!(payload.prompt, "The cat is black");
        assert_eq!(payload.solution, "El gato es negro");
        assert_eq!(payload.prompt_lang, "en");
        assert_eq!(payload.solution_lang, "es");
        assert_eq!(payload.solution_words, vec!["El", "gato", "es", "negro"]);
        // The only pool words are the solution itself.
        assert!(payload.noise_words.is_empty());
        assert_eq!(
            sorted(payload.word_bank),
            sorted(payload.solution_words.clone())
        );
    }

    #[test]
    fn test_b_to_a_swaps_sides() {
        let lesson = lesson(vec![Exercise::new("The cat is black", "El gato es negro")]);
        let payload = ExerciseAssembler::new(&lesson)
            .assemble(0, ExerciseDirection::BtoA)
            .unwrap();

        assert_eq!(payload.prompt, "El gato es negro");
        assert_eq!(payload.solution, "The cat is black");
        assert_eq!(payload.prompt_lang, "es");
        assert_eq!(payload.solution_lang, "en");
    }

    #[test]
    fn test_synthesized_noise_comes_from_the_solution_language() {
        let lesson = lesson(vec![
            Exercise::new("The cat is black.", "El gato es negro."),
            Exercise::new("The dog is white", "El perro es blanco"),
            Exercise::new("I see a bird", "Veo un pájaro"),
            Exercise::new("We eat bread", "Comemos pan"),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let payload = ExerciseAssembler::new(&lesson)
            .assemble_with(0, ExerciseDirection::AtoB, &mut rng)
            .unwrap();

        let spanish = ["perro", "blanco", "Veo", "un", "pájaro", "Comemos", "pan"];
        assert_eq!(payload.noise_words.len(), 5);
        for word in &payload.noise_words {
            assert!(spanish.contains(&word.as_str()), "unexpected noise {word}");
        }
        assert_eq!(payload.word_bank.len(), 4 + 5);
    }

    #[test]
    fn test_author_noise_wins() {
        let mut exercise = Exercise::new("The cat", "El gato");
        exercise.noise_b = Some("  perro   la ".into());
        exercise.noise_a = Some("   ".into());
        let lesson = lesson(vec![exercise, Exercise::new("A dog", "Un perro")]);
        let assembler = ExerciseAssembler::new(&lesson);

        let payload = assembler.assemble(0, ExerciseDirection::AtoB).unwrap();
        assert_eq!(payload.noise_words, vec!["perro", "la"]);

        // Blank author noise falls back to the pool.
        let payload = assembler.assemble(0, ExerciseDirection::BtoA).unwrap();
        assert_eq!(sorted(payload.noise_words), vec!["A", "dog"]);
    }

    #[test]
    fn test_missing_index() {
        let lesson = lesson(vec![Exercise::new("a", "b")]);
        assert!(
            ExerciseAssembler::new(&lesson)
                .assemble(1, ExerciseDirection::AtoB)
                .is_none()
        );
    }

    #[test]
    fn test_synthesize_noise_dedups_case_insensitively() {
        let pool: Vec<String> = ["Casa", "casa", "CASA", "gato", "Perro"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let solution = vec!["El".to_string(), "Gato".to_string()];
        let mut rng = StdRng::seed_from_u64(11);

        let noise = synthesize_noise(&pool, &solution, 5, &mut rng);
        assert_eq!(noise.len(), 2);
        assert!(noise.iter().any(|w| w.eq_ignore_ascii_case("casa")));
        assert!(noise.contains(&"Perro".to_string()));

        let noise = synthesize_noise(&pool, &solution, 1, &mut rng);
        assert_eq!(noise.len(), 1);
        assert!(synthesize_noise(&[], &solution, 5, &mut rng).is_empty());
    }
}

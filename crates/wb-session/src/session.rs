use chrono::Utc;
use url::Url;
use uuid::Uuid;
use wb_lesson::{
    AnswerFeedback, CyclePhase, DirectionCycle, ExerciseAssembler, ExerciseDirection,
    ExercisePayload, LessonConfig, LessonProgress, Mistake, check_answer, share,
};
use wb_store::{
    BlobStore, FileBlobStore, LessonLibrary, LessonRecord, ProgressRepository, VocabularyStore,
};
use wb_vocab::{TOMBSTONE, VocabularyEntry, extract_entries};

use crate::{config::SessionConfig, error::SessionError};

/// The lesson currently being practised.
#[derive(Debug)]
struct ActiveLesson {
    id: Option<Uuid>,
    lesson: LessonConfig,
    index: usize,
    cycle: DirectionCycle,
    progress: LessonProgress,
}

/// A learning session: one lesson, the vocabulary of its language pair, and
/// the learner's progress through it.
#[derive(Debug)]
pub struct Session<S> {
    config: SessionConfig,
    vocabulary: VocabularyStore<S>,
    lessons: LessonLibrary<S>,
    progress: ProgressRepository<S>,
    active: Option<ActiveLesson>,
}

impl Session<FileBlobStore> {
    /// A session persisting to `config.data_dir`.
    pub async fn from_config(config: SessionConfig) -> Result<Self, SessionError> {
        let storage = FileBlobStore::new(&config.data_dir).await?;
        Ok(Self::new(storage, config))
    }

    /// A session configured from `WORDBANK_*` environment variables.
    pub async fn from_env() -> Result<Self, SessionError> {
        Self::from_config(SessionConfig::from_env()?).await
    }
}

impl<S: BlobStore + Clone> Session<S> {
    pub fn new(storage: S, config: SessionConfig) -> Self {
        Self {
            config,
            vocabulary: VocabularyStore::new(storage.clone()),
            lessons: LessonLibrary::new(storage.clone()),
            progress: ProgressRepository::new(storage),
            active: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn lessons(&self) -> &LessonLibrary<S> {
        &self.lessons
    }

    pub fn vocabulary(&self) -> &VocabularyStore<S> {
        &self.vocabulary
    }

    /// Start practising `lesson` from its first exercise.
    ///
    /// `id` links the lesson to a library record so progress can be loaded
    /// and saved. A vocabulary that fails to load is replaced by an empty one
    /// and the session continues.
    pub async fn start_lesson(
        &mut self,
        lesson: LessonConfig,
        id: Option<Uuid>,
    ) -> Result<(), SessionError> {
        if lesson.is_empty() {
            return Err(SessionError::NoExercises);
        }
        let lesson = lesson.validated()?;

        let key = lesson.pair_key()?;
        if let Err(error) = self.vocabulary.ensure_loaded(&key).await {
            if error.is_contract_violation() {
                return Err(error.into());
            }
            tracing::warn!("Continuing with an empty vocabulary for {}: {}", key, error);
        }

        let progress = match id {
            Some(id) => self.progress.load(id).await?,
            None => LessonProgress::new(),
        };

        let mut cycle = DirectionCycle::new(lesson.len());
        cycle.initialize(lesson.len());

        tracing::info!(
            "Started lesson '{}' ({} exercises, {})",
            lesson.title,
            lesson.len(),
            key
        );
        self.active = Some(ActiveLesson {
            id,
            lesson,
            index: 0,
            cycle,
            progress,
        });
        Ok(())
    }

    /// Load a lesson from the library and start it.
    pub async fn open_lesson(&mut self, id: Uuid) -> Result<(), SessionError> {
        let record = self.lessons.load(id).await?;
        self.start_lesson(record.lesson, Some(record.id)).await
    }

    /// Start the lesson carried by a share link.
    pub async fn open_shared(&mut self, url: &str) -> Result<(), SessionError> {
        let lesson = share::lesson_from_url(url)?;
        self.start_lesson(lesson, None).await
    }

    /// Store the active lesson in the library, creating a record the first
    /// time.
    pub async fn save_lesson(&mut self) -> Result<LessonRecord, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoLesson)?;
        let record = match active.id {
            Some(id) => self.lessons.update(id, active.lesson.clone()).await?,
            None => self.lessons.save(active.lesson.clone()).await?,
        };
        active.id = Some(record.id);
        Ok(record)
    }

    pub fn share_url(&self) -> Result<Url, SessionError> {
        let active = self.active()?;
        Ok(share::share_url(&self.config.share_base_url, &active.lesson)?)
    }

    /// External translator link for the current prompt.
    pub fn translation_link(&mut self) -> Result<Url, SessionError> {
        let payload = self.current_exercise()?;
        Ok(share::translate_link(
            &payload.prompt,
            &payload.prompt_lang,
            &payload.solution_lang,
        )?)
    }

    pub fn lesson(&self) -> Option<&LessonConfig> {
        self.active.as_ref().map(|active| &active.lesson)
    }

    pub fn lesson_id(&self) -> Option<Uuid> {
        self.active.as_ref().and_then(|active| active.id)
    }

    pub fn index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    pub fn phase(&self) -> Option<CyclePhase> {
        self.active.as_ref().map(|active| active.cycle.phase())
    }

    pub fn progress(&self) -> Option<&LessonProgress> {
        self.active.as_ref().map(|active| &active.progress)
    }

    fn active(&self) -> Result<&ActiveLesson, SessionError> {
        self.active.as_ref().ok_or(SessionError::NoLesson)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveLesson, SessionError> {
        self.active.as_mut().ok_or(SessionError::NoLesson)
    }

    fn current_direction(&mut self) -> Result<ExerciseDirection, SessionError> {
        let active = self.active_mut()?;
        let len = active.lesson.len();
        active
            .cycle
            .direction_for(active.index)
            .ok_or(SessionError::IndexOutOfRange {
                index: active.index,
                len,
            })
    }

    /// The exercise at the current index, in its current direction.
    pub fn current_exercise(&mut self) -> Result<ExercisePayload, SessionError> {
        let direction = self.current_direction()?;
        let noise_words = self.config.noise_words;
        let active = self.active()?;

        ExerciseAssembler::new(&active.lesson)
            .with_noise_count(noise_words)
            .assemble(active.index, direction)
            .ok_or(SessionError::IndexOutOfRange {
                index: active.index,
                len: active.lesson.len(),
            })
    }

    /// Move to the next exercise. Wrapping past the last one completes a pass
    /// and advances the direction cycle. Returns the new index.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        let active = self.active_mut()?;
        active.index += 1;
        if active.index >= active.lesson.len() {
            active.index = 0;
            active.cycle.advance_cycle();
        }
        Ok(active.index)
    }

    /// Jump to exercise `index` without touching the direction cycle.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        let active = self.active_mut()?;
        let len = active.lesson.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        active.index = index;
        Ok(())
    }

    /// Check `words` against the current solution and record the outcome.
    pub fn submit_answer(&mut self, words: &[String]) -> Result<AnswerFeedback, SessionError> {
        let payload = self.current_exercise()?;
        let feedback = check_answer(words, &payload.solution);

        let active = self.active_mut()?;
        active.progress.record(payload.index, feedback.correct);
        if !feedback.correct {
            active.progress.record_mistake(Mistake {
                exercise_index: payload.index,
                direction: payload.direction,
                prompt: payload.prompt,
                attempt: words.join(" "),
                solution: payload.solution,
                at: Utc::now(),
            });
        }

        tracing::debug!(
            "Exercise {} answered {} ({} mistake token(s))",
            payload.index,
            if feedback.correct { "correctly" } else { "wrongly" },
            feedback.mistakes()
        );
        Ok(feedback)
    }

    /// Words and phrases of the current prompt, with known translations.
    pub fn vocabulary_for_prompt(&mut self) -> Result<Vec<VocabularyEntry>, SessionError> {
        let payload = self.current_exercise()?;
        let matcher = self.vocabulary.matcher()?;
        let entries = extract_entries(&payload.prompt, &payload.prompt_lang, &matcher);
        tracing::debug!(
            "Extracted {} vocabulary entries from exercise {}",
            entries.len(),
            payload.index
        );
        Ok(entries)
    }

    /// Record `translation` (solution language) for `word` (prompt language).
    pub fn learn_word(&mut self, word: &str, translation: &str) -> Result<(), SessionError> {
        let payload = self.current_exercise()?;
        self.vocabulary.add_pair(
            word,
            &payload.prompt_lang,
            translation,
            &payload.solution_lang,
        )?;
        Ok(())
    }

    /// Drop every translation of `word` (prompt language). Returns how many
    /// pairs were removed.
    pub fn forget_word(&mut self, word: &str) -> Result<usize, SessionError> {
        let payload = self.current_exercise()?;
        Ok(self
            .vocabulary
            .remove_pairs_for_source_word(word, &payload.prompt_lang)?)
    }

    /// Mark `word` (prompt language) as having no translation.
    pub fn mark_untranslatable(&mut self, word: &str) -> Result<(), SessionError> {
        self.learn_word(word, TOMBSTONE)
    }

    pub async fn save_vocabulary(&self) -> Result<(), SessionError> {
        self.vocabulary.save().await?;
        Ok(())
    }

    pub async fn save_progress(&self) -> Result<(), SessionError> {
        let active = self.active()?;
        let id = active.id.ok_or(SessionError::UnsavedLesson)?;
        self.progress.save(id, &active.progress).await?;
        Ok(())
    }

    /// Exercises of the active lesson that were never reviewed or are due now.
    pub fn due_exercises(&self) -> Result<Vec<usize>, SessionError> {
        let active = self.active()?;
        Ok(active.progress.due_exercises(active.lesson.len(), Utc::now()))
    }

    /// Indices of exercises whose score reached the mastery threshold.
    pub fn mastered_exercises(&self) -> Result<Vec<usize>, SessionError> {
        let active = self.active()?;
        Ok(active
            .progress
            .exercises
            .iter()
            .filter(|(_, progress)| progress.is_mastered())
            .map(|(index, _)| *index)
            .collect())
    }

    /// Forget recorded mistakes of the active lesson.
    pub fn clear_mistakes(&mut self) -> Result<(), SessionError> {
        self.active_mut()?.progress.clear_mistakes();
        Ok(())
    }
}

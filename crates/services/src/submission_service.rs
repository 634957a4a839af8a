use std::sync::Arc;

use induction_core::model::{AnswerRecord, Attempt, NewAttempt, VisitorProfile};
use storage::repository::AttemptRepository;

use crate::Clock;
use crate::error::SubmissionError;

/// Everything needed to record one quiz completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub profile: VisitorProfile,
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub passed: bool,
}

impl Submission {
    fn check(&self) -> Result<(), SubmissionError> {
        if self.profile.name().trim().is_empty() {
            return Err(SubmissionError::InvalidInput("name is required".into()));
        }
        let correct = self.answers.iter().filter(|a| a.is_correct).count();
        if usize::try_from(self.score).map_or(true, |score| score != correct) {
            return Err(SubmissionError::InvalidInput(format!(
                "score {} does not match the {correct} correct answers",
                self.score
            )));
        }
        let all_correct = !self.answers.is_empty() && correct == self.answers.len();
        if self.passed != all_correct {
            return Err(SubmissionError::InvalidInput(
                "pass flag does not match the recorded answers".into(),
            ));
        }
        Ok(())
    }
}

/// Appends quiz completions to the record store.
#[derive(Clone)]
pub struct SubmissionService {
    clock: Clock,
    attempts: Arc<dyn AttemptRepository>,
}

impl SubmissionService {
    #[must_use]
    pub fn new(clock: Clock, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { clock, attempts }
    }

    /// Write exactly one new attempt stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::InvalidInput` for inconsistent submissions.
    /// Returns `SubmissionError::StoreUnavailable` or
    /// `SubmissionError::Configuration` if the store rejects the write.
    pub async fn submit(&self, submission: &Submission) -> Result<Attempt, SubmissionError> {
        submission.check()?;

        let attempt = NewAttempt::from_profile(
            &submission.profile,
            submission.score,
            submission.passed,
            self.clock.now(),
        );

        let stored = self
            .attempts
            .insert_attempt(attempt)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "attempt could not be stored"))?;
        tracing::info!(
            attempt_id = %stored.id(),
            passed = stored.passed(),
            "attempt stored"
        );
        Ok(stored)
    }
}

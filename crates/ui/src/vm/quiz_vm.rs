use induction_core::model::{AnswerRecord, Quiz, QuizError};

/// Answers given so far and the state of the current question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizProgress {
    index: usize,
    selected: Option<usize>,
    revealed: Option<AnswerRecord>,
    answers: Vec<AnswerRecord>,
}

impl QuizProgress {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn revealed(&self) -> Option<AnswerRecord> {
        self.revealed
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Choose an option; ignored once the answer is revealed.
    pub fn select(&mut self, quiz: &Quiz, option: usize) -> bool {
        let valid = quiz
            .question(self.index)
            .is_some_and(|q| option < q.options().len());
        if self.revealed.is_some() || !valid {
            return false;
        }
        self.selected = Some(option);
        true
    }

    /// Record the selected option and reveal whether it was right.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the selection does not belong to the question.
    pub fn confirm(&mut self, quiz: &Quiz) -> Result<Option<AnswerRecord>, QuizError> {
        if self.revealed.is_some() {
            return Ok(None);
        }
        let Some(selected) = self.selected else {
            return Ok(None);
        };
        let record = quiz.grade(self.index, selected)?;
        self.answers.push(record);
        self.revealed = Some(record);
        Ok(Some(record))
    }

    /// Move past a revealed question. Returns `true` when the quiz is finished.
    pub fn advance(&mut self, quiz: &Quiz) -> bool {
        if self.revealed.is_none() {
            return false;
        }
        if self.index + 1 >= quiz.len() {
            return true;
        }
        self.index += 1;
        self.selected = None;
        self.revealed = None;
        false
    }

    #[must_use]
    pub fn is_last(&self, quiz: &Quiz) -> bool {
        self.index + 1 >= quiz.len()
    }
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub counter: String,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub feedback: Option<FeedbackVm>,
    pub confirm_label: &'static str,
    pub advance_label: &'static str,
    pub progress_percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub headline: &'static str,
    pub correct_option: Option<String>,
}

#[must_use]
pub fn map_question(quiz: &Quiz, progress: &QuizProgress) -> Option<QuestionVm> {
    let question = quiz.question(progress.index())?;
    let total = quiz.len();
    let is_last = progress.is_last(quiz);
    let feedback = progress.revealed().map(|record| FeedbackVm {
        correct: record.is_correct,
        headline: if record.is_correct { "Correct!" } else { "Incorrect" },
        correct_option: (!record.is_correct).then(|| question.correct_option().to_string()),
    });
    let answered = progress.answers().len();
    let progress_percent = u32::try_from(answered * 100 / total.max(1)).unwrap_or(100);

    Some(QuestionVm {
        counter: format!("Question {} of {total}", progress.index() + 1),
        text: question.text().to_string(),
        options: question.options().to_vec(),
        selected: progress.selected(),
        feedback,
        confirm_label: if is_last { "Complete Assessment" } else { "Confirm Answer" },
        advance_label: if is_last { "Submit Results" } else { "Next Question" },
        progress_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_requires_a_selection() {
        let quiz = Quiz::site_induction();
        let mut progress = QuizProgress::default();
        assert_eq!(progress.confirm(&quiz).unwrap(), None);
        assert!(progress.answers().is_empty());
    }

    #[test]
    fn selection_locks_after_reveal() {
        let quiz = Quiz::site_induction();
        let mut progress = QuizProgress::default();
        assert!(progress.select(&quiz, 0));
        let record = progress.confirm(&quiz).unwrap().unwrap();
        assert!(!record.is_correct);
        assert!(!progress.select(&quiz, 2));
        assert_eq!(progress.selected(), Some(0));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let quiz = Quiz::site_induction();
        let mut progress = QuizProgress::default();
        assert!(!progress.select(&quiz, 9));
        assert_eq!(progress.selected(), None);
    }

    #[test]
    fn feedback_names_the_right_answer_when_wrong() {
        let quiz = Quiz::site_induction();
        let mut progress = QuizProgress::default();
        progress.select(&quiz, 1);
        progress.confirm(&quiz).unwrap();

        let vm = map_question(&quiz, &progress).unwrap();
        let feedback = vm.feedback.unwrap();
        assert_eq!(feedback.headline, "Incorrect");
        assert_eq!(feedback.correct_option.as_deref(), Some("15 km/h"));
        assert_eq!(vm.counter, "Question 1 of 6");
    }

    #[test]
    fn advance_reports_completion_on_last_question() {
        let quiz = Quiz::site_induction();
        let mut progress = QuizProgress::default();
        for question in quiz.questions() {
            progress.select(&quiz, question.correct_answer());
            progress.confirm(&quiz).unwrap();
            let done = progress.advance(&quiz);
            assert_eq!(done, progress.answers().len() == quiz.len());
        }
        assert!(progress.answers().iter().all(|a| a.is_correct));
    }
}

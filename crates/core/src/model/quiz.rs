use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("a question needs at least two options")]
    TooFewOptions,

    #[error("correct option {index} is out of range")]
    CorrectOutOfRange { index: usize },

    #[error("question {index} does not exist")]
    UnknownQuestion { index: usize },

    #[error("option {selected} does not exist for question {index}")]
    UnknownOption { index: usize, selected: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single-choice question. Serialized with the field names the submission
/// endpoint expects (`question`, `options`, `correctAnswer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuizError` if the text is empty, fewer than two options are
    /// given, or the correct index does not point at an option.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, QuizError> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if options.len() < 2 {
            return Err(QuizError::TooFewOptions);
        }
        if correct_answer >= options.len() {
            return Err(QuizError::CorrectOutOfRange {
                index: correct_answer,
            });
        }
        Ok(Self {
            question,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// One recorded answer, with its correctness fixed at answer time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_answer: usize,
    pub is_correct: bool,
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Correct answers out of the number of questions asked.
///
/// A score passes only when every question was answered correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    correct: u32,
    total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn from_answers(answers: &[AnswerRecord], total: usize) -> Self {
        let correct = answers.iter().filter(|answer| answer.is_correct).count();
        Self::new(
            u32::try_from(correct).unwrap_or(u32::MAX),
            u32::try_from(total).unwrap_or(u32::MAX),
        )
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    /// Whole-number percentage, rounded half up.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 + self.total / 2) / self.total
    }

    /// Display form, e.g. `6 / 6 (100%)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {} ({}%)", self.correct, self.total, self.percentage())
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The site induction assessment every visitor takes.
    #[must_use]
    pub fn site_induction() -> Self {
        let table: [(&str, &[&str], usize); 6] = [
            (
                "What is the site speed limit?",
                &["10 km/h", "20 km/h", "15 km/h"],
                2,
            ),
            (
                "Smoking is permitted inside the production area",
                &["True", "False"],
                0,
            ),
            (
                "Assembly area is located near to gate #1",
                &["True", "False"],
                1,
            ),
            (
                "Visitor badge must be kept visible at all times",
                &["True", "False"],
                0,
            ),
            (
                "Wearing a watch inside the plant and intervention with moving machinery are permitted.",
                &["True", "False"],
                1,
            ),
            (
                "When entering a high care area, you must:",
                &["Sanitize your hands", "Wear hair net", "Both", "None of the above"],
                2,
            ),
        ];

        let questions = table
            .into_iter()
            .map(|(text, options, correct)| Question {
                question: text.to_string(),
                options: options.iter().map(|opt| (*opt).to_string()).collect(),
                correct_answer: correct,
            })
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Grade a selected option for the question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the question or option does not exist.
    pub fn grade(&self, index: usize, selected: usize) -> Result<AnswerRecord, QuizError> {
        let question = self
            .question(index)
            .ok_or(QuizError::UnknownQuestion { index })?;
        if selected >= question.options.len() {
            return Err(QuizError::UnknownOption { index, selected });
        }
        Ok(AnswerRecord {
            question_index: index,
            selected_answer: selected,
            is_correct: selected == question.correct_answer,
        })
    }

    #[must_use]
    pub fn score(&self, answers: &[AnswerRecord]) -> QuizScore {
        QuizScore::from_answers(answers, self.len())
    }
}

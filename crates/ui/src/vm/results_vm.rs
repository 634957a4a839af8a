use chrono::{DateTime, Utc};
use induction_core::Certification;
use induction_core::model::{Attempt, Quiz, QuizScore, VisitorProfile};

use super::time_fmt::{format_date, format_datetime, time_ago};
use super::workflow_vm::Workflow;
use crate::views::ViewState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailsVm {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub host_name: String,
}

impl From<&VisitorProfile> for DetailsVm {
    fn from(profile: &VisitorProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            company: profile.company().to_string(),
            phone: profile.phone().to_string(),
            host_name: profile.host_name().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionReviewVm {
    pub heading: String,
    pub your_answer: String,
    pub correct: bool,
    pub correct_answer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub status: &'static str,
    pub passed: bool,
    pub score: String,
    pub host: String,
    pub ago: String,
    pub completed: String,
    pub most_recent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificationVm {
    Certified { completed: String, expires: String },
    NotCertified,
}

/// Shown on a fresh result whose save failed or is being retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionBannerVm {
    pub message: &'static str,
    pub retrying: bool,
    pub retry_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub passed: bool,
    pub heading: &'static str,
    pub summary: String,
    pub score_label: String,
    pub completed_on: Option<String>,
    pub details: Option<DetailsVm>,
    pub review: Vec<QuestionReviewVm>,
    pub history: Vec<HistoryRowVm>,
    pub certification: Option<CertificationVm>,
    pub host_notice: String,
    pub banner: Option<SubmissionBannerVm>,
    pub restart_label: &'static str,
    pub retake_label: &'static str,
    pub retake_optional: bool,
}

fn history_row(attempt: &Attempt, total: u32, most_recent: bool, now: DateTime<Utc>) -> HistoryRowVm {
    HistoryRowVm {
        status: if attempt.passed() { "PASSED" } else { "FAILED" },
        passed: attempt.passed(),
        score: format!("Score: {}/{total}", attempt.score()),
        host: format!("Host: {}", attempt.host_name()),
        ago: time_ago(attempt.completed_at(), now),
        completed: format_datetime(attempt.completed_at()),
        most_recent,
    }
}

fn review_rows(quiz: &Quiz, workflow: &Workflow) -> Vec<QuestionReviewVm> {
    workflow
        .progress()
        .answers()
        .iter()
        .filter_map(|answer| {
            let question = quiz.question(answer.question_index)?;
            Some(QuestionReviewVm {
                heading: format!("Question {}: {}", answer.question_index + 1, question.text()),
                your_answer: question
                    .option(answer.selected_answer)
                    .unwrap_or_default()
                    .to_string(),
                correct: answer.is_correct,
                correct_answer: (!answer.is_correct)
                    .then(|| question.correct_option().to_string()),
            })
        })
        .collect()
}

// On the results step a pending save is always a retry.
fn banner(state: &ViewState<Attempt>) -> Option<SubmissionBannerVm> {
    match state {
        ViewState::Loading => Some(SubmissionBannerVm {
            message: "Saving your results...",
            retrying: true,
            retry_label: "Retrying...",
        }),
        ViewState::Error(err) => Some(SubmissionBannerVm {
            message: err.message(),
            retrying: false,
            retry_label: "Retry Submission",
        }),
        ViewState::Idle | ViewState::Ready(_) => None,
    }
}

/// Build the results screen for the workflow at `now`.
#[must_use]
pub fn map_results(workflow: &Workflow, now: DateTime<Utc>) -> ResultsVm {
    let quiz = workflow.quiz();
    let total = u32::try_from(quiz.len()).unwrap_or(u32::MAX);
    let details = workflow.profile().map(DetailsVm::from);
    let host = details
        .as_ref()
        .map(|d| d.host_name.clone())
        .unwrap_or_default();

    if let Some(recent) = workflow
        .existing()
        .filter(|_| workflow.showing_existing())
        .and_then(|outcome| outcome.recent.as_ref().map(|recent| (outcome, recent)))
    {
        let (outcome, recent) = recent;
        let score = QuizScore::new(recent.score(), total);
        let passed = recent.passed();
        let history = if outcome.completions.len() > 1 {
            outcome
                .completions
                .iter()
                .enumerate()
                .map(|(i, attempt)| history_row(attempt, total, i == 0, now))
                .collect()
        } else {
            Vec::new()
        };
        let certification = match Certification::for_attempt(recent) {
            Certification::Certified {
                completed_at,
                expires_at,
            } => CertificationVm::Certified {
                completed: format_datetime(completed_at),
                expires: format_date(expires_at),
            },
            Certification::NotCertified => CertificationVm::NotCertified,
        };

        return ResultsVm {
            passed,
            heading: "Training Records Found",
            summary: format!(
                "Your most recent assessment was completed {}",
                time_ago(recent.completed_at(), now).to_lowercase()
            ),
            score_label: score.label(),
            completed_on: Some(format!("Completed on {}", format_datetime(recent.completed_at()))),
            details,
            review: Vec::new(),
            history,
            certification: Some(certification),
            host_notice: format!("Your training records have been reviewed. Host: {host}"),
            banner: None,
            restart_label: "Check Another Name",
            retake_label: if passed {
                "Retake Assessment (Optional)"
            } else {
                "Retake Assessment"
            },
            retake_optional: passed,
        };
    }

    let score = workflow.score();
    let passed = score.passed();
    ResultsVm {
        passed,
        heading: if passed {
            "Congratulations!"
        } else {
            "Assessment Not Passed"
        },
        summary: if passed {
            "You have successfully completed the safety training assessment.".to_string()
        } else {
            "You did not meet the passing requirements for this assessment.".to_string()
        },
        score_label: score.label(),
        completed_on: None,
        details,
        review: review_rows(quiz, workflow),
        history: Vec::new(),
        certification: None,
        host_notice: format!(
            "Your assessment results have been automatically sent to {host} via email."
        ),
        banner: banner(workflow.submission()),
        restart_label: "Start Over",
        retake_label: "Take Assessment Again",
        retake_optional: false,
    }
}

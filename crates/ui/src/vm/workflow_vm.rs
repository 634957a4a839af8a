//! The induction workflow controller.
//!
//! One owned [`Workflow`] holds the visitor session. Views send
//! [`WorkflowIntent`]s through [`Workflow::dispatch`]; intents that need the
//! record store come back as a [`WorkflowEffect`], which the view runs with
//! [`run_effect`] and feeds back as a `*Finished` intent.

use induction_core::model::{
    Attempt, FieldError, Playlist, ProfileDraft, ProfileError, ProfileField, Quiz, QuizScore,
    VisitorProfile, validate_visitor_name,
};
use services::{LookupOutcome, LookupService, Submission, SubmissionService};

use super::quiz_vm::QuizProgress;
use crate::views::{ViewError, ViewState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    NameCheck,
    Video,
    Form,
    Quiz,
    Results,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowIntent {
    EditName(String),
    SubmitName,
    RetryLookup,
    DismissError,
    LookupFinished(Result<LookupOutcome, ViewError>),
    NextSegment,
    PreviousSegment,
    EditField(ProfileField, String),
    SubmitForm,
    SelectOption(usize),
    ConfirmAnswer,
    Advance,
    SubmissionFinished(Result<Attempt, ViewError>),
    RetrySubmission,
    Restart,
    Retake,
}

/// Store calls requested by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowEffect {
    Lookup(String),
    Submit(Submission),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Workflow {
    step: Step,
    quiz: Quiz,
    playlist: Playlist,

    name_input: String,
    name_error: Option<FieldError>,
    lookup: ViewState<()>,
    last_lookup: Option<String>,
    existing: Option<LookupOutcome>,

    segment: usize,

    draft: ProfileDraft,
    form_errors: Option<ProfileError>,
    profile: Option<VisitorProfile>,

    progress: QuizProgress,
    submission: ViewState<Attempt>,
    last_submission: Option<Submission>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(Quiz::site_induction(), Playlist::site_induction())
    }
}

impl Workflow {
    #[must_use]
    pub fn new(quiz: Quiz, playlist: Playlist) -> Self {
        Self {
            step: Step::NameCheck,
            quiz,
            playlist,
            name_input: String::new(),
            name_error: None,
            lookup: ViewState::Idle,
            last_lookup: None,
            existing: None,
            segment: 0,
            draft: ProfileDraft::default(),
            form_errors: None,
            profile: None,
            progress: QuizProgress::default(),
            submission: ViewState::Idle,
            last_submission: None,
        }
    }

    // ─── accessors ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    #[must_use]
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Inline message for the name-check field.
    #[must_use]
    pub fn name_error(&self) -> Option<&'static str> {
        self.name_error.map(|err| match err {
            FieldError::NameRequired => "Please enter your full name",
            _ => "Please enter a valid full name (letters and spaces only)",
        })
    }

    #[must_use]
    pub fn lookup(&self) -> &ViewState<()> {
        &self.lookup
    }

    #[must_use]
    pub fn existing(&self) -> Option<&LookupOutcome> {
        self.existing.as_ref()
    }

    #[must_use]
    pub fn segment(&self) -> usize {
        self.segment
    }

    #[must_use]
    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    #[must_use]
    pub fn field_error(&self, field: ProfileField) -> Option<FieldError> {
        self.form_errors.as_ref().and_then(|e| e.for_field(field))
    }

    #[must_use]
    pub fn profile(&self) -> Option<&VisitorProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &QuizProgress {
        &self.progress
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        self.quiz.score(self.progress.answers())
    }

    #[must_use]
    pub fn submission(&self) -> &ViewState<Attempt> {
        &self.submission
    }

    /// Results come from an earlier attempt rather than this session's quiz.
    #[must_use]
    pub fn showing_existing(&self) -> bool {
        self.step == Step::Results && self.existing.is_some()
    }

    // ─── dispatch ────────────────────────────────────────────────────────────

    /// Apply one intent. Returns the store call the caller must run, if any.
    pub fn dispatch(&mut self, intent: WorkflowIntent) -> Option<WorkflowEffect> {
        match intent {
            WorkflowIntent::EditName(value) => {
                if self.step == Step::NameCheck {
                    self.name_input = value;
                    self.name_error = None;
                }
                None
            }
            WorkflowIntent::SubmitName => self.submit_name(),
            WorkflowIntent::RetryLookup => {
                if self.step != Step::NameCheck || self.lookup.is_loading() {
                    return None;
                }
                let name = self.last_lookup.clone()?;
                self.lookup = ViewState::Loading;
                Some(WorkflowEffect::Lookup(name))
            }
            WorkflowIntent::DismissError => {
                match self.step {
                    Step::NameCheck if self.lookup.error().is_some() => {
                        self.lookup = ViewState::Idle;
                    }
                    Step::Results if self.submission.error().is_some() => {
                        self.submission = ViewState::Idle;
                    }
                    _ => {}
                }
                None
            }
            WorkflowIntent::LookupFinished(result) => {
                self.finish_lookup(result);
                None
            }
            WorkflowIntent::NextSegment => {
                if self.step == Step::Video {
                    if self.segment + 1 >= self.playlist.len() {
                        self.step = Step::Form;
                    } else {
                        self.segment += 1;
                    }
                }
                None
            }
            WorkflowIntent::PreviousSegment => {
                if self.step == Step::Video {
                    self.segment = self.segment.saturating_sub(1);
                }
                None
            }
            WorkflowIntent::EditField(field, value) => {
                if self.step == Step::Form {
                    match field {
                        ProfileField::Name => self.draft.name = value,
                        ProfileField::Company => self.draft.company = value,
                        ProfileField::Phone => self.draft.phone = value,
                        ProfileField::HostName => self.draft.host_name = value,
                    }
                }
                None
            }
            WorkflowIntent::SubmitForm => {
                if self.step == Step::Form {
                    match self.draft.validate() {
                        Ok(profile) => {
                            self.profile = Some(profile);
                            self.form_errors = None;
                            self.progress = QuizProgress::default();
                            self.step = Step::Quiz;
                        }
                        Err(errors) => self.form_errors = Some(errors),
                    }
                }
                None
            }
            WorkflowIntent::SelectOption(option) => {
                if self.step == Step::Quiz {
                    self.progress.select(&self.quiz, option);
                }
                None
            }
            WorkflowIntent::ConfirmAnswer => {
                if self.step == Step::Quiz {
                    if let Err(err) = self.progress.confirm(&self.quiz) {
                        tracing::warn!(error = %err, "answer could not be graded");
                    }
                }
                None
            }
            WorkflowIntent::Advance => self.advance_quiz(),
            WorkflowIntent::SubmissionFinished(result) => {
                if !self.submission.is_loading() {
                    return None;
                }
                self.submission = match result {
                    Ok(row) => ViewState::Ready(row),
                    Err(err) => ViewState::Error(err),
                };
                self.existing = None;
                self.step = Step::Results;
                None
            }
            WorkflowIntent::RetrySubmission => {
                if self.step != Step::Results || self.submission.error().is_none() {
                    return None;
                }
                let submission = self.last_submission.clone()?;
                self.submission = ViewState::Loading;
                Some(WorkflowEffect::Submit(submission))
            }
            WorkflowIntent::Restart => {
                *self = Self::new(self.quiz.clone(), self.playlist.clone());
                None
            }
            WorkflowIntent::Retake => {
                if self.step != Step::Results {
                    return None;
                }
                self.progress = QuizProgress::default();
                self.submission = ViewState::Idle;
                self.last_submission = None;
                self.form_errors = None;
                self.name_error = None;
                self.segment = 0;
                self.step = Step::Video;
                None
            }
        }
    }

    fn submit_name(&mut self) -> Option<WorkflowEffect> {
        if self.step != Step::NameCheck || self.lookup.is_loading() {
            return None;
        }
        match validate_visitor_name(&self.name_input) {
            Ok(name) => {
                self.name_error = None;
                self.last_lookup = Some(name.clone());
                self.lookup = ViewState::Loading;
                Some(WorkflowEffect::Lookup(name))
            }
            Err(err) => {
                self.name_error = Some(err);
                None
            }
        }
    }

    fn finish_lookup(&mut self, result: Result<LookupOutcome, ViewError>) {
        if self.step != Step::NameCheck || !self.lookup.is_loading() {
            return;
        }
        match result {
            Ok(outcome) => {
                self.lookup = ViewState::Ready(());
                if let Some(recent) = outcome.recent.as_ref() {
                    self.profile = Some(VisitorProfile::from_persisted(
                        recent.name(),
                        recent.company(),
                        recent.phone().unwrap_or_default(),
                        recent.host_name(),
                    ));
                    self.draft = ProfileDraft {
                        name: recent.name().to_string(),
                        company: recent.company().to_string(),
                        phone: recent.phone().unwrap_or_default().to_string(),
                        host_name: recent.host_name().to_string(),
                    };
                    self.existing = Some(outcome);
                    self.step = Step::Results;
                } else {
                    self.draft.name = outcome.searched_name;
                    self.existing = None;
                    self.segment = 0;
                    self.step = Step::Video;
                }
            }
            Err(err) => self.lookup = ViewState::Error(err),
        }
    }

    fn advance_quiz(&mut self) -> Option<WorkflowEffect> {
        if self.step != Step::Quiz || self.submission.is_loading() {
            return None;
        }
        if !self.progress.advance(&self.quiz) {
            return None;
        }
        let profile = self.profile.clone()?;
        let score = self.score();
        let submission = Submission {
            profile,
            answers: self.progress.answers().to_vec(),
            score: score.correct(),
            passed: score.passed(),
        };
        self.last_submission = Some(submission.clone());
        self.submission = ViewState::Loading;
        Some(WorkflowEffect::Submit(submission))
    }
}

/// Run a store call and turn its outcome into the intent that completes it.
pub async fn run_effect(
    effect: WorkflowEffect,
    lookup: &LookupService,
    submission: &SubmissionService,
) -> WorkflowIntent {
    match effect {
        WorkflowEffect::Lookup(name) => WorkflowIntent::LookupFinished(
            lookup.lookup(&name).await.map_err(|err| ViewError::from(&err)),
        ),
        WorkflowEffect::Submit(payload) => WorkflowIntent::SubmissionFinished(
            submission
                .submit(&payload)
                .await
                .map_err(|err| ViewError::from(&err)),
        ),
    }
}

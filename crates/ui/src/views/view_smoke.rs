use chrono::Duration;
use induction_core::model::{NewAttempt, ProfileField};
use induction_core::time::fixed_now;
use services::LookupOutcome;
use storage::{AttemptRepository, NameMatch, Storage};

use super::induction::InductionTestSeed;
use super::test_harness::{setup_view_harness, setup_view_harness_with_storage};
use crate::vm::{Workflow, WorkflowIntent};
use crate::views::ViewError;

fn jane(days_ago: i64, passed: bool) -> NewAttempt {
    NewAttempt {
        name: "Jane Doe".into(),
        company: "Acme Foods".into(),
        phone: Some("0412345678".into()),
        host_name: "Sam Host".into(),
        score: if passed { 6 } else { 3 },
        passed,
        completed_at: fixed_now() - Duration::days(days_ago),
    }
}

fn no_records() -> LookupOutcome {
    LookupOutcome {
        searched_name: "Jane Doe".into(),
        completions: Vec::new(),
        recent: None,
        matched_by: None,
        recent_count: 0,
    }
}

fn at_video() -> Workflow {
    let mut wf = Workflow::default();
    wf.dispatch(WorkflowIntent::EditName("Jane Doe".into()));
    wf.dispatch(WorkflowIntent::SubmitName);
    wf.dispatch(WorkflowIntent::LookupFinished(Ok(no_records())));
    wf
}

fn at_form() -> Workflow {
    let mut wf = at_video();
    for _ in 0..wf.playlist().len() {
        wf.dispatch(WorkflowIntent::NextSegment);
    }
    wf
}

fn at_quiz() -> Workflow {
    let mut wf = at_form();
    wf.dispatch(WorkflowIntent::EditField(ProfileField::Company, "Acme Foods".into()));
    wf.dispatch(WorkflowIntent::EditField(ProfileField::Phone, "0412345678".into()));
    wf.dispatch(WorkflowIntent::EditField(ProfileField::HostName, "Sam Host".into()));
    wf.dispatch(WorkflowIntent::SubmitForm);
    wf
}

fn seeded(workflow: Workflow) -> InductionTestSeed {
    InductionTestSeed {
        workflow,
        intents: Vec::new(),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn name_check_renders_prompt() {
    let mut harness = setup_view_harness(InductionTestSeed::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Check Training Status"), "missing button in {html}");
    assert!(
        html.contains("Enter your full name as it appears in records"),
        "missing placeholder in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn name_check_shows_inline_error() {
    let mut wf = Workflow::default();
    wf.dispatch(WorkflowIntent::EditName("J4ne".into()));
    wf.dispatch(WorkflowIntent::SubmitName);

    let mut harness = setup_view_harness(seeded(wf));
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Please enter a valid full name (letters and spaces only)"),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn video_step_renders_first_segment() {
    let mut harness = setup_view_harness(seeded(at_video()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Section 1 of 8"), "missing section label in {html}");
    assert!(html.contains("0:00 / 3:41"), "missing time label in {html}");
    assert!(html.contains("Next Video"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn form_step_prefills_checked_name() {
    let mut harness = setup_view_harness(seeded(at_form()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Jane Doe"), "missing prefilled name in {html}");
    assert!(html.contains("Enter your company name"), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn form_step_renders_field_errors() {
    let mut wf = at_form();
    wf.dispatch(WorkflowIntent::EditField(ProfileField::Phone, "12".into()));
    wf.dispatch(WorkflowIntent::SubmitForm);

    let mut harness = setup_view_harness(seeded(wf));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Phone number must be 10 digits"), "missing error in {html}");
    assert!(html.contains("Company name is required"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_step_renders_first_question() {
    let mut harness = setup_view_harness(seeded(at_quiz()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 6"), "missing counter in {html}");
    assert!(html.contains("What is the site speed limit?"), "missing question in {html}");
    assert!(html.contains("Confirm Answer"), "missing confirm in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_step_reveals_feedback() {
    let mut wf = at_quiz();
    wf.dispatch(WorkflowIntent::SelectOption(0));
    wf.dispatch(WorkflowIntent::ConfirmAnswer);

    let mut harness = setup_view_harness(seeded(wf));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Incorrect"), "missing feedback in {html}");
    assert!(html.contains("15 km/h"), "missing correct answer in {html}");
    assert!(html.contains("Next Question"), "missing advance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lookup_with_recent_record_shows_existing_results() {
    let storage = Storage::in_memory();
    storage.attempts.insert_attempt(jane(40, false)).await.expect("insert");
    storage.attempts.insert_attempt(jane(2, true)).await.expect("insert");

    let seed = InductionTestSeed {
        workflow: Workflow::default(),
        intents: vec![
            WorkflowIntent::EditName("jane doe".into()),
            WorkflowIntent::SubmitName,
        ],
    };
    let mut harness = setup_view_harness_with_storage(seed, &storage);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Training Records Found"), "missing heading in {html}");
    assert!(html.contains("Certified"), "missing certification in {html}");
    assert!(html.contains("All Training Attempts (2)"), "missing history in {html}");
    assert!(html.contains("Retake Assessment (Optional)"), "missing retake in {html}");
    assert!(html.contains("Check Another Name"), "missing reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lookup_without_records_starts_videos() {
    let seed = InductionTestSeed {
        workflow: Workflow::default(),
        intents: vec![
            WorkflowIntent::EditName("Jane Doe".into()),
            WorkflowIntent::SubmitName,
        ],
    };
    let mut harness = setup_view_harness(seed);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Section 1 of 8"), "missing video step in {html}");
}

fn failed_lookup() -> Workflow {
    let mut wf = Workflow::default();
    wf.dispatch(WorkflowIntent::EditName("Jane Doe".into()));
    wf.dispatch(WorkflowIntent::SubmitName);
    wf.dispatch(WorkflowIntent::LookupFinished(Err(ViewError::StoreUnavailable)));
    wf
}

#[tokio::test(flavor = "current_thread")]
async fn failed_lookup_banner_offers_dismiss() {
    let mut harness = setup_view_harness(seeded(failed_lookup()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("notice--error"), "missing banner in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Dismiss"), "missing dismiss in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dismissed_lookup_banner_is_hidden() {
    let seed = InductionTestSeed {
        workflow: failed_lookup(),
        intents: vec![WorkflowIntent::DismissError],
    };
    let mut harness = setup_view_harness(seed);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("notice--error"), "banner still shown in {html}");
    assert!(html.contains("Jane Doe"), "lost typed name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_offers_retry() {
    let mut wf = at_quiz();
    let total = wf.quiz().len();
    for i in 0..total {
        let correct = wf.quiz().questions()[i].correct_answer();
        wf.dispatch(WorkflowIntent::SelectOption(correct));
        wf.dispatch(WorkflowIntent::ConfirmAnswer);
        if i + 1 < total {
            wf.dispatch(WorkflowIntent::Advance);
        }
    }

    let storage = Storage::unconfigured("no store configured");
    let seed = InductionTestSeed {
        workflow: wf,
        intents: vec![WorkflowIntent::Advance],
    };
    let mut harness = setup_view_harness_with_storage(seed, &storage);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Submission Error"), "missing banner in {html}");
    assert!(html.contains("Retry Submission"), "missing retry in {html}");
    assert!(html.contains("Congratulations!"), "missing local result in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn existing_failed_record_is_not_certified() {
    let mut wf = Workflow::default();
    wf.dispatch(WorkflowIntent::EditName("Jane Doe".into()));
    wf.dispatch(WorkflowIntent::SubmitName);
    let storage = Storage::in_memory();
    let stored = storage.attempts.insert_attempt(jane(1, false)).await.expect("insert");
    wf.dispatch(WorkflowIntent::LookupFinished(Ok(LookupOutcome {
        searched_name: "Jane Doe".into(),
        completions: vec![stored.clone()],
        recent: Some(stored),
        matched_by: Some(NameMatch::Exact),
        recent_count: 1,
    })));

    let mut harness = setup_view_harness_with_storage(seeded(wf), &storage);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Not Certified"), "missing status in {html}");
    assert!(html.contains("Retake Assessment"), "missing retake in {html}");
}

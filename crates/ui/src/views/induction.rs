use std::sync::Arc;

use dioxus::prelude::*;

use super::form::FormStep;
use super::name_check::NameCheckStep;
use super::quiz::QuizStep;
use super::results::ResultsStep;
use super::video::VideoStep;
use crate::context::AppContext;
use crate::vm::{Step, Workflow, WorkflowIntent, map_question, map_results, map_video, run_effect};

/// Starting state injected by view tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct InductionTestSeed {
    pub workflow: Workflow,
    pub intents: Vec<WorkflowIntent>,
}

fn initial_workflow() -> Workflow {
    #[cfg(test)]
    if let Some(seed) = try_consume_context::<InductionTestSeed>() {
        return seed.workflow;
    }
    Workflow::default()
}

#[component]
pub fn InductionView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut workflow = use_signal(initial_workflow);
    let lookup = ctx.lookup();
    let submission = ctx.submission();

    let dispatch = use_callback(move |intent: WorkflowIntent| {
        let Some(effect) = workflow.write().dispatch(intent) else {
            return;
        };
        tracing::debug!(?effect, "running workflow effect");
        let lookup = Arc::clone(&lookup);
        let submission = Arc::clone(&submission);
        spawn(async move {
            let finished = run_effect(effect, &lookup, &submission).await;
            let mut workflow = workflow;
            workflow.write().dispatch(finished);
        });
    });

    #[cfg(test)]
    use_hook(move || {
        let intents = try_consume_context::<InductionTestSeed>()
            .map(|seed| seed.intents)
            .unwrap_or_default();
        if !intents.is_empty() {
            spawn(async move {
                for intent in intents {
                    dispatch.call(intent);
                }
            });
        }
    });

    let wf = workflow.read();
    let body = match wf.step() {
        Step::NameCheck => rsx! {
            NameCheckStep {
                name: wf.name_input().to_string(),
                error: wf.name_error(),
                lookup: wf.lookup().clone(),
                on_intent: dispatch,
            }
        },
        Step::Video => match map_video(wf.playlist(), wf.segment()) {
            Some(vm) => rsx! { VideoStep { vm, on_intent: dispatch } },
            None => rsx! { p { "No training videos are configured." } },
        },
        Step::Form => rsx! {
            FormStep { workflow: Workflow::clone(&wf), on_intent: dispatch }
        },
        Step::Quiz => match map_question(wf.quiz(), wf.progress()) {
            Some(vm) => rsx! {
                QuizStep {
                    vm,
                    saving: wf.submission().is_loading(),
                    on_intent: dispatch,
                }
            },
            None => rsx! { p { "No assessment questions are configured." } },
        },
        Step::Results => rsx! {
            ResultsStep {
                vm: map_results(&wf, ctx.clock().now()),
                on_intent: dispatch,
            }
        },
    };

    rsx! {
        div { class: "page induction-page",
            {body}
        }
    }
}

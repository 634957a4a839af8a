use dioxus::prelude::*;

use crate::vm::{CertificationVm, ResultsVm, WorkflowIntent};

#[component]
pub fn ResultsStep(vm: ResultsVm, on_intent: EventHandler<WorkflowIntent>) -> Element {
    let status_class = if vm.passed {
        "results-hero results-hero--passed"
    } else {
        "results-hero results-hero--failed"
    };
    let retake_class = if vm.retake_optional {
        "btn btn-secondary"
    } else {
        "btn btn-primary"
    };
    let history_count = vm.history.len();

    rsx! {
        section { class: "card results-step",
            if let Some(banner) = vm.banner.as_ref() {
                div { class: "notice notice--error",
                    strong { "Submission Error" }
                    p { "{banner.message}" }
                    div { class: "actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: banner.retrying,
                            onclick: move |_| on_intent.call(WorkflowIntent::RetrySubmission),
                            "{banner.retry_label}"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_intent.call(WorkflowIntent::Restart),
                            "Start Over"
                        }
                        if !banner.retrying {
                            button {
                                class: "btn btn-link",
                                r#type: "button",
                                onclick: move |_| on_intent.call(WorkflowIntent::DismissError),
                                "Dismiss"
                            }
                        }
                    }
                }
            }

            div { class: status_class,
                h2 { class: "view-title", "{vm.heading}" }
                p { class: "view-subtitle", "{vm.summary}" }
                p { class: "results-score", "{vm.score_label}" }
                if let Some(completed) = vm.completed_on.as_ref() {
                    p { class: "results-date", "{completed}" }
                }
            }

            if let Some(details) = vm.details.as_ref() {
                div { class: "results-details",
                    h3 { "Visitor Details" }
                    dl {
                        dt { "Name" }
                        dd { "{details.name}" }
                        dt { "Company" }
                        dd { "{details.company}" }
                        dt { "Phone" }
                        dd { "{details.phone}" }
                        dt { "Host" }
                        dd { "{details.host_name}" }
                    }
                }
            }

            if let Some(certification) = vm.certification.as_ref() {
                div { class: "results-certification",
                    h3 { "Certification Status" }
                    match certification {
                        CertificationVm::Certified { completed, expires } => rsx! {
                            p { class: "badge badge--passed", "Certified" }
                            p { "Completed: {completed}" }
                            p { "Valid until: {expires}" }
                        },
                        CertificationVm::NotCertified => rsx! {
                            p { class: "badge badge--failed", "Not Certified" }
                            p { "The most recent attempt did not meet the passing score." }
                        },
                    }
                }
            }

            if !vm.history.is_empty() {
                div { class: "results-history",
                    h3 { "All Training Attempts ({history_count})" }
                    ul {
                        for row in vm.history.iter() {
                            li { class: if row.passed { "attempt attempt--passed" } else { "attempt attempt--failed" },
                                span { class: "attempt-status", "{row.status}" }
                                if row.most_recent {
                                    span { class: "attempt-tag", "Most Recent" }
                                }
                                span { "{row.score}" }
                                span { "{row.host}" }
                                span { title: "{row.completed}", "{row.ago}" }
                            }
                        }
                    }
                }
            }

            if !vm.review.is_empty() {
                div { class: "results-review",
                    h3 { "Question Review" }
                    for row in vm.review.iter() {
                        div { class: if row.correct { "review review--correct" } else { "review review--incorrect" },
                            p { class: "review-question", "{row.heading}" }
                            p { "Your answer: {row.your_answer}" }
                            if let Some(correct) = row.correct_answer.as_ref() {
                                p { "Correct answer: {correct}" }
                            }
                        }
                    }
                }
            }

            p { class: "results-notice", "{vm.host_notice}" }
            p { class: "results-validity",
                "Training Validity: a passed induction remains valid for 6 months from the completion date."
            }

            div { class: "actions",
                button {
                    class: retake_class,
                    r#type: "button",
                    onclick: move |_| on_intent.call(WorkflowIntent::Retake),
                    "{vm.retake_label}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(WorkflowIntent::Restart),
                    "{vm.restart_label}"
                }
            }
        }
    }
}

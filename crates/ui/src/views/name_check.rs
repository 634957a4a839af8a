use dioxus::prelude::*;

use crate::views::ViewState;
use crate::vm::WorkflowIntent;

#[component]
pub fn NameCheckStep(
    name: String,
    #[props(!optional)]
    error: Option<&'static str>,
    lookup: ViewState<()>,
    on_intent: EventHandler<WorkflowIntent>,
) -> Element {
    let checking = lookup.is_loading();
    let button_label = if checking { "Checking..." } else { "Check Training Status" };

    rsx! {
        section { class: "card name-check",
            header { class: "view-header",
                h2 { class: "view-title", "Welcome" }
                p { class: "view-subtitle",
                    "Enter your name to check for a recent safety training record."
                }
            }
            form {
                class: "name-check-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_intent.call(WorkflowIntent::SubmitName);
                },
                label { r#for: "visitor-name", "Full Name" }
                input {
                    id: "visitor-name",
                    class: if error.is_some() { "input input--error" } else { "input" },
                    r#type: "text",
                    placeholder: "Enter your full name as it appears in records",
                    value: "{name}",
                    disabled: checking,
                    oninput: move |evt: FormEvent| on_intent.call(WorkflowIntent::EditName(evt.value())),
                }
                if let Some(message) = error {
                    p { class: "field-error", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: checking,
                    "{button_label}"
                }
            }
            if let Some(err) = lookup.error() {
                div { class: "notice notice--error",
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(WorkflowIntent::RetryLookup),
                        "Retry"
                    }
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
}

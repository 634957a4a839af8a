use dioxus::prelude::*;

use crate::vm::{QuestionVm, WorkflowIntent};

#[component]
pub fn QuizStep(vm: QuestionVm, saving: bool, on_intent: EventHandler<WorkflowIntent>) -> Element {
    let locked = vm.feedback.is_some();
    let options = vm.options.iter().enumerate().map(|(index, option)| {
        let selected = vm.selected == Some(index);
        rsx! {
            label {
                class: if selected { "option option--selected" } else { "option" },
                input {
                    r#type: "radio",
                    name: "answer",
                    checked: selected,
                    disabled: locked,
                    onchange: move |_| on_intent.call(WorkflowIntent::SelectOption(index)),
                }
                span { "{option}" }
            }
        }
    });

    rsx! {
        section { class: "card quiz-step",
            header { class: "view-header",
                p { class: "view-eyebrow", "{vm.counter}" }
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
                }
                h2 { class: "view-title", "{vm.text}" }
            }
            div { class: "options", {options} }
            if let Some(feedback) = vm.feedback.as_ref() {
                div {
                    class: if feedback.correct { "feedback feedback--correct" } else { "feedback feedback--incorrect" },
                    strong { "{feedback.headline}" }
                    if let Some(correct) = feedback.correct_option.as_ref() {
                        p { "The correct answer is: {correct}" }
                    }
                }
            }
            div { class: "actions",
                if locked {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: saving,
                        onclick: move |_| on_intent.call(WorkflowIntent::Advance),
                        if saving { "Saving..." } else { "{vm.advance_label}" }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: vm.selected.is_none(),
                        onclick: move |_| on_intent.call(WorkflowIntent::ConfirmAnswer),
                        "{vm.confirm_label}"
                    }
                }
            }
        }
    }
}

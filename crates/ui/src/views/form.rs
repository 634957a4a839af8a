use dioxus::prelude::*;
use induction_core::model::ProfileField;

use crate::vm::{Workflow, WorkflowIntent};

struct FormField {
    field: ProfileField,
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    input_type: &'static str,
}

const FIELDS: [FormField; 4] = [
    FormField {
        field: ProfileField::Name,
        id: "profile-name",
        label: "Full Name",
        placeholder: "Enter your full name",
        input_type: "text",
    },
    FormField {
        field: ProfileField::Company,
        id: "profile-company",
        label: "Company",
        placeholder: "Enter your company name",
        input_type: "text",
    },
    FormField {
        field: ProfileField::Phone,
        id: "profile-phone",
        label: "Phone Number",
        placeholder: "Enter your phone number",
        input_type: "tel",
    },
    FormField {
        field: ProfileField::HostName,
        id: "profile-host",
        label: "Host Name",
        placeholder: "Enter your host's name",
        input_type: "text",
    },
];

fn field_value(workflow: &Workflow, field: ProfileField) -> String {
    let draft = workflow.draft();
    match field {
        ProfileField::Name => draft.name.clone(),
        ProfileField::Company => draft.company.clone(),
        ProfileField::Phone => draft.phone.clone(),
        ProfileField::HostName => draft.host_name.clone(),
    }
}

#[component]
pub fn FormStep(workflow: Workflow, on_intent: EventHandler<WorkflowIntent>) -> Element {
    let inputs = FIELDS.iter().map(|def| {
        let field = def.field;
        let value = field_value(&workflow, field);
        let error = workflow.field_error(field).map(|err| err.to_string());
        rsx! {
            div { class: "field",
                label { r#for: def.id, "{def.label}" }
                input {
                    id: def.id,
                    class: if error.is_some() { "input input--error" } else { "input" },
                    r#type: def.input_type,
                    placeholder: def.placeholder,
                    value: "{value}",
                    oninput: move |evt: FormEvent| {
                        on_intent.call(WorkflowIntent::EditField(field, evt.value()));
                    },
                }
                if let Some(message) = error {
                    p { class: "field-error", "{message}" }
                }
            }
        }
    });

    rsx! {
        section { class: "card profile-form",
            header { class: "view-header",
                h2 { class: "view-title", "Your Details" }
                p { class: "view-subtitle",
                    "These details are recorded with your assessment and sent to your host."
                }
            }
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_intent.call(WorkflowIntent::SubmitForm);
                },
                {inputs}
                div { class: "actions",
                    button { class: "btn btn-primary", r#type: "submit", "Continue to Assessment" }
                }
            }
        }
    }
}

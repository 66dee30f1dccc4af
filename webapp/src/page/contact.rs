use dioxus::prelude::*;
use gloo_console::error as console_error;

use crate::common::dom::alert;
use api::{
    contact::{ContactField, ContactReq, SubmitOutcome, Validation, submit_contact},
    page::{FormPhase, INVALID_BORDER},
};

// the border is only painted once a submit has found the field invalid, and
// cleared again by the next submit that finds it valid
fn border(validation: &Validation, field: ContactField) -> &'static str {
    if validation.is_invalid(field) {
        INVALID_BORDER
    } else {
        ""
    }
}

fn update(mut form: Signal<ContactReq>, name: &str, value: String) {
    form.write().set(name, value);
}

#[component]
pub fn ContactSection() -> Element {
    let mut form = use_signal(ContactReq::default);
    let mut validation = use_signal(Validation::default);
    let mut phase = use_signal(FormPhase::default);

    rsx! {
        section { id: "contact", class: "section",
            h2 { "Contact" }
            p { "Have a project in mind, or just want to say hello? Send me a message." }

            form {
                id: "contactForm",
                class: "contact-form",
                "novalidate": "true",
                "aria-busy": phase() == FormPhase::Submitting,
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();

                    let req = form();
                    let checked = req.validate();
                    validation.set(checked.clone());

                    if !checked.is_valid() {
                        alert(&checked.alert_text());
                        return;
                    }

                    // nothing is disabled while the request is out; another
                    // submit simply sends another request
                    phase.set(FormPhase::Submitting);

                    spawn(async move {
                        let result = submit_contact(&req).await;

                        if let Err(err) = &result {
                            console_error!(format!("Error sending contact form: {err}"));
                        }

                        let outcome = SubmitOutcome::from_result(result);
                        alert(&outcome.alert_text());

                        if outcome.clears_form() {
                            form.set(ContactReq::default());
                        }

                        phase.set(FormPhase::Editing);
                    });
                },

                input {
                    name: ContactField::FirstName.name(),
                    id: ContactField::FirstName.name(),
                    placeholder: "First name *",
                    value: "{form.read().first_name}",
                    border_color: border(&validation.read(), ContactField::FirstName),
                    oninput: move |evt| update(form, ContactField::FirstName.name(), evt.value()),
                }
                input {
                    name: "lastName",
                    id: "lastName",
                    placeholder: "Last name",
                    value: "{form.read().last_name}",
                    oninput: move |evt| update(form, "lastName", evt.value()),
                }
                input {
                    name: ContactField::Email.name(),
                    id: ContactField::Email.name(),
                    r#type: "email",
                    placeholder: "Email *",
                    value: "{form.read().email}",
                    border_color: border(&validation.read(), ContactField::Email),
                    oninput: move |evt| update(form, ContactField::Email.name(), evt.value()),
                }
                input {
                    name: "phone",
                    id: "phone",
                    r#type: "tel",
                    placeholder: "Phone",
                    value: "{form.read().phone}",
                    oninput: move |evt| update(form, "phone", evt.value()),
                }
                input {
                    class: "full-width",
                    name: "subject",
                    id: "subject",
                    placeholder: "Subject",
                    value: "{form.read().subject}",
                    oninput: move |evt| update(form, "subject", evt.value()),
                }
                textarea {
                    class: "full-width",
                    name: ContactField::Message.name(),
                    id: ContactField::Message.name(),
                    rows: "6",
                    placeholder: "Message *",
                    value: "{form.read().message}",
                    border_color: border(&validation.read(), ContactField::Message),
                    oninput: move |evt| update(form, ContactField::Message.name(), evt.value()),
                }
                button { r#type: "submit", "Send Message" }
            }
        }
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::CONTACT_PATH;

// structs and types

// the client only checks that the address has the rough shape local@domain.tld;
// the relay does not look at the format at all
pub const EMAIL_REGEX: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_REGEX).expect("EMAIL_REGEX is a valid pattern"));

pub const MISSING_FIELDS_ERROR: &str = "First name, email, and message are required";
pub const DISPATCH_ERROR: &str = "Failed to send message. Please try again.";
pub const SENT_MESSAGE: &str = "Message sent successfully!";

// contact form submission
//
// every field is a plain string on the wire, an absent (or null) field is the
// same thing as an empty one, and other scalars are taken as their text.  this keeps the form state in the webapp and
// the request body decoded by the relay as the exact same struct
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReq {
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}

// whatever a script posts for a field is kept as its text, so a phone number
// sent as a json number still arrives as "5551234"
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(val)) => val,
        Some(Scalar::Int(val)) => val.to_string(),
        Some(Scalar::Uint(val)) => val.to_string(),
        Some(Scalar::Float(val)) => val.to_string(),
        Some(Scalar::Bool(val)) => val.to_string(),
    })
}

// relay response
//
// a body carrying an error is always a failure, regardless of what else is
// in it, so that variant has to be tried first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactResp {
    Failed {
        error: String,
    },
    Sent {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ContactResp {
    pub fn sent() -> Self {
        ContactResp::Sent {
            success: true,
            message: Some(SENT_MESSAGE.to_owned()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ContactResp::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ContactResp::Sent { success: true, .. })
    }
}

// validation

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContactField {
    FirstName,
    Email,
    Message,
}

impl ContactField {
    // form control name, which doubles as the element id
    pub fn name(self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn error_text(self) -> &'static str {
        match self {
            ContactField::FirstName => "First name is required",
            ContactField::Email => "Valid email is required",
            ContactField::Message => "Message is required",
        }
    }
}

// outcome of the client-side check
//
// fields are checked independently, and the invalid ones are kept in form
// order so that the error list reads top to bottom
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Validation {
    invalid: Vec<ContactField>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn is_invalid(&self, field: ContactField) -> bool {
        self.invalid.contains(&field)
    }

    pub fn errors(&self) -> Vec<&'static str> {
        self.invalid.iter().map(|f| f.error_text()).collect()
    }

    pub fn alert_text(&self) -> String {
        format!(
            "Please fill in all required fields correctly.\n\n{}",
            self.errors().join("\n")
        )
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ContactReq {
    pub fn validate(&self) -> Validation {
        let mut invalid = Vec::new();

        if is_blank(&self.first_name) {
            invalid.push(ContactField::FirstName);
        }

        if is_blank(&self.email) || !is_valid_email(&self.email) {
            invalid.push(ContactField::Email);
        }

        if is_blank(&self.message) {
            invalid.push(ContactField::Message);
        }

        Validation { invalid }
    }

    // the relay's check: presence only, no format validation of the address
    pub fn missing_required(&self) -> bool {
        is_blank(&self.first_name) || is_blank(&self.email) || is_blank(&self.message)
    }

    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "firstName" => self.first_name = value,
            "lastName" => self.last_name = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            "subject" => self.subject = value,
            "message" => self.message = value,
            _ => (),
        }
    }
}

// what the user is told once a submission comes back
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Sent,
    Rejected(String),
    Unreachable,
}

impl SubmitOutcome {
    pub fn from_result(result: anyhow::Result<ContactResp>) -> Self {
        match result {
            Ok(resp) if resp.is_success() => SubmitOutcome::Sent,
            Ok(ContactResp::Failed { error }) => SubmitOutcome::Rejected(error),
            Ok(ContactResp::Sent { .. }) => SubmitOutcome::Rejected(String::from("unknown error")),
            Err(_) => SubmitOutcome::Unreachable,
        }
    }

    pub fn alert_text(&self) -> String {
        match self {
            SubmitOutcome::Sent => {
                String::from("Thank you for your message! I will get back to you soon.")
            }
            SubmitOutcome::Rejected(error) => format!("Error: {error}"),
            SubmitOutcome::Unreachable => {
                String::from("Failed to send message. Please try again later.")
            }
        }
    }

    pub fn clears_form(&self) -> bool {
        *self == SubmitOutcome::Sent
    }
}

// messages

// post the form to the relay
//
// the relay answers with a ContactResp body for both success and failure, so
// the status code is not inspected; a body that does not parse is an error
pub async fn submit_contact(req: &ContactReq) -> anyhow::Result<ContactResp> {
    let resp = gloo_net::http::Request::post(CONTACT_PATH)
        .json(req)?
        .send()
        .await?;

    Ok(resp.json().await?)
}

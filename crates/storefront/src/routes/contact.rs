//! Contact form route handlers.
//!
//! The form is validated server-side; errors re-render it with a message
//! under each offending field.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tienda_core::Email;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::filters;
use crate::state::AppState;

/// Message for a blank required field.
pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio.";

/// Message for an email that does not look like `name@domain.tld`.
pub const INVALID_EMAIL_MESSAGE: &str = "Por favor, introduce un email válido.";

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl ContactErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

fn required(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(REQUIRED_MESSAGE)
}

/// Validate a submission.
#[must_use]
pub fn validate(form: &ContactForm) -> ContactErrors {
    let email = required(&form.email).or_else(|| {
        Email::parse(form.email.trim())
            .is_err()
            .then_some(INVALID_EMAIL_MESSAGE)
    });

    ContactErrors {
        name: required(&form.name),
        email,
        message: required(&form.message),
    }
}

/// Contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/form.html")]
pub struct ContactTemplate {
    pub form: ContactForm,
    pub errors: ContactErrors,
    pub cart_count: u32,
    pub notice: String,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/thanks.html")]
pub struct ContactThanksTemplate {
    pub name: String,
    pub cart_count: u32,
    pub notice: String,
}

/// Display the contact form.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session).await;

    ContactTemplate {
        form: ContactForm::default(),
        errors: ContactErrors::default(),
        cart_count: page.cart_count,
        notice: page.notice,
    }
}

/// Accept a contact submission.
///
/// Invalid submissions re-render the form with 422.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Response {
    let page = PageContext::load(&state, &session).await;
    let errors = validate(&form);

    if !errors.is_empty() {
        tracing::debug!(?errors, "Rejected contact submission");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            ContactTemplate {
                form,
                errors,
                cart_count: page.cart_count,
                notice: page.notice,
            },
        )
            .into_response();
    }

    tracing::info!(
        email = %form.email.trim(),
        message_len = form.message.trim().len(),
        "Contact message received"
    );

    ContactThanksTemplate {
        name: form.name.trim().to_string(),
        cart_count: page.cart_count,
        notice: page.notice,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let errors = validate(&form("Ana", "ana@correo.co", "Hola"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_fields_are_required() {
        let errors = validate(&form("  ", "", "\n"));
        assert_eq!(errors.name, Some(REQUIRED_MESSAGE));
        assert_eq!(errors.email, Some(REQUIRED_MESSAGE));
        assert_eq!(errors.message, Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_invalid_email() {
        for email in ["ana", "ana@correo", "@correo.co", "ana@.co", "ana @correo.co"] {
            let errors = validate(&form("Ana", email, "Hola"));
            assert_eq!(errors.email, Some(INVALID_EMAIL_MESSAGE), "{email}");
            assert!(errors.name.is_none());
        }
    }

    #[test]
    fn test_email_surrounding_whitespace_is_ignored() {
        let errors = validate(&form("Ana", " ana@correo.co ", "Hola"));
        assert!(errors.email.is_none());
    }

    #[test]
    fn test_form_rerenders_values_and_messages() {
        let html = ContactTemplate {
            form: form("Ana", "ana", ""),
            errors: validate(&form("Ana", "ana", "")),
            cart_count: 0,
            notice: String::new(),
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains("value=\"Ana\""));
        assert!(html.contains("Por favor, introduce un email válido."));
        assert!(html.contains("Este campo es obligatorio."));
        assert_eq!(html.matches("grupo-formulario error").count(), 2);
    }
}

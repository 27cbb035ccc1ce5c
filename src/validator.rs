use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use handyhub_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Joins field messages into one line, falling back to `"<field> is invalid"`.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();
    // field_errors() iterates a HashMap.
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            match text.split("missing field `").nth(1).and_then(|s| s.split('`').next()) {
                Some(field) => format!("{field} is required"),
                None if text.contains("unknown variant") => "Invalid enum value in request".into(),
                None => "Invalid field type in request".into(),
            }
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
        _ => "Invalid request body".to_string(),
    }
}

/// `Json<T>` that also runs `validator` rules.
///
/// Undecodable bodies are rejected with 400, rule violations with 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection_message(&rejection)))?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

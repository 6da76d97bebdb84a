use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use bursar_core::AppError;

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
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Pulls the field name out of serde's "missing field `x`" message.
fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn reject(rejection: JsonRejection) -> AppError {
    let detail = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(_) => {
            let text = rejection.body_text();
            match missing_field(&text) {
                Some(field) => format!("{field} is required"),
                None => "Invalid field type in request".to_string(),
            }
        }
        _ => "Invalid request body".to_string(),
    };
    AppError::bad_request(anyhow!(detail))
}

/// JSON body extractor that also runs `validator` rules.
///
/// - Malformed or incomplete JSON is a 400 `BAD_REQUEST`
/// - A body that parses but fails validation is a 422 `VALIDATION_ERROR`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(reject)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

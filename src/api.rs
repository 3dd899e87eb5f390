use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Success envelope: `{ "success": true, "message": ..., ...payload }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

pub fn ok<T: Serialize>(message: impl Into<String>, payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: message.into(),
        payload,
    })
}

/// `Json` extractor whose rejection is rendered as a validation envelope
/// instead of axum's plain-text body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "rejected request body");
                Err(AppError::invalid("body", rejection_message(&rejection)))
            }
        }
    }
}

/// Body field that keeps a value of the wrong JSON type instead of failing the
/// whole body, so validation can report it against the field.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Valid(T),
    WrongType(Value),
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Valid(value)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value(raw.clone()) {
            Ok(value) => Lenient::Valid(value),
            Err(_) => Lenient::WrongType(raw),
        })
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".into()
        }
        _ => rejection.body_text(),
    }
}

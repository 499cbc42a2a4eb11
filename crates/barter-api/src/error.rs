use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barter_engine::BarterError;
use serde::Serialize;

/// Engine error as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub BarterError);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    intents: Vec<u64>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            BarterError::InvalidArgument(_) | BarterError::InvalidChain(_) => {
                StatusCode::BAD_REQUEST
            }
            BarterError::NotFound(_)
            | BarterError::SettlementNotFound(_)
            | BarterError::NoChainFound(_) => StatusCode::NOT_FOUND,
            BarterError::InvalidState { .. }
            | BarterError::StaleChain(_)
            | BarterError::Conflict(_) => StatusCode::CONFLICT,
            BarterError::Config(_) | BarterError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BarterError> for ApiError {
    fn from(err: BarterError) -> Self {
        ApiError(err)
    }
}

// Malformed or incomplete request bodies are argument errors like any other
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(BarterError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
            intents: self.0.intent_ids().into_iter().map(|id| id.get()).collect(),
        };
        (status, Json(body)).into_response()
    }
}

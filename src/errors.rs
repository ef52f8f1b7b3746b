use axum::http::StatusCode;

/// Request-level failure. The data pipeline itself never surfaces errors
/// (bad input collapses to zeros at the reader boundary); this type only
/// covers invalid requests such as an unknown query parameter value.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

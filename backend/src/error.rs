use axum::body::Body;
use axum::http::StatusCode;
use serde_json::json;

#[derive(Debug)]
pub enum Error {
    /// POST body failed the presence checks.
    Validation,
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::Validation => (
                StatusCode::BAD_REQUEST,
                "Missing winner or itemList field".to_string(),
            ),
        };

        axum::response::Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({
                    "error": message
                }))
                .unwrap(),
            ))
            .unwrap()
    }
}

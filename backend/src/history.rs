use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::info;

use shared::history::SpinRecord;

use crate::error::Error;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/history", get(list_history).post(append_spin))
}

/// GET /history: every recorded spin in insertion order. Never fails; a
/// fresh store is an empty array.
async fn list_history(State(state): State<AppState>) -> Json<Vec<SpinRecord>> {
    let history = state.history.lock().await;
    Json(history.clone())
}

/// POST /history: presence-check the body, stamp the server clock, append.
///
/// Validation deliberately stays at "winner is a non-empty string and
/// itemList is an array" to keep the wire contract of the service this
/// replaces, so the checks run against the raw JSON value rather than a
/// typed extractor.
async fn append_spin(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<SpinRecord>), Error> {
    let winner = body
        .get("winner")
        .and_then(Value::as_str)
        .filter(|winner| !winner.is_empty());
    let items = body.get("itemList").and_then(Value::as_array);

    let (Some(winner), Some(items)) = (winner, items) else {
        return Err(Error::Validation);
    };

    // Every element must be a string; a mixed array is rejected rather than
    // stored with entries silently dropped.
    let item_list: Vec<String> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or(Error::Validation)?;

    let record = SpinRecord {
        winner: winner.to_string(),
        item_list: Some(item_list),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let mut history = state.history.lock().await;
    history.push(record.clone());
    info!("recorded spin winner={} ({} total)", record.winner, history.len());

    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> axum::Router {
        crate::app(AppState {
            history: Arc::new(tokio::sync::Mutex::new(Vec::new())),
        })
    }

    fn post_history(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/history")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_history() -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/history")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_history_lists_nothing() {
        let app = test_app();
        let response = app.oneshot(get_history()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_post_then_list_round_trip() {
        let app = test_app();
        let before = Utc::now();

        let response = app
            .clone()
            .oneshot(post_history(r#"{"winner":"A","itemList":["A","B"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = body_json(response).await;
        assert_eq!(stored["winner"], "A");
        assert_eq!(stored["itemList"], json!(["A", "B"]));
        let stamp = DateTime::parse_from_rfc3339(stored["timestamp"].as_str().unwrap()).unwrap();
        assert!(stamp.with_timezone(&Utc) >= before - Duration::seconds(1));

        let response = app.oneshot(get_history()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0], stored);
    }

    #[tokio::test]
    async fn test_history_keeps_insertion_order() {
        let app = test_app();
        for winner in ["A", "B", "C"] {
            let body = json!({ "winner": winner, "itemList": ["A", "B", "C"] }).to_string();
            let response = app.clone().oneshot(post_history(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let listed = body_json(app.oneshot(get_history()).await.unwrap()).await;
        let winners: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["winner"].as_str().unwrap())
            .collect();
        assert_eq!(winners, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_post_missing_winner_is_rejected() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(post_history(r#"{"itemList":["A","B"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing winner or itemList field" })
        );

        // Nothing was stored.
        let listed = body_json(app.oneshot(get_history()).await.unwrap()).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_post_empty_winner_is_rejected() {
        let app = test_app();
        let response = app
            .oneshot(post_history(r#"{"winner":"","itemList":["A"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing winner or itemList field" })
        );
    }

    #[tokio::test]
    async fn test_post_mixed_item_list_is_rejected() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(post_history(r#"{"winner":"A","itemList":["A",1]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing winner or itemList field" })
        );

        // Nothing was stored, truncated or otherwise.
        let listed = body_json(app.oneshot(get_history()).await.unwrap()).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_post_non_array_item_list_is_rejected() {
        let app = test_app();
        let response = app
            .oneshot(post_history(r#"{"winner":"A","itemList":"A,B"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing winner or itemList field" })
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health_check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

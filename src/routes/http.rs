//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;
use axum::{body::Bytes, extract::State, Json, response::IntoResponse};
use tracing::instrument;

use crate::domain::Category;
use crate::logic::{answer_chat, parse_chat_body};
use crate::protocol::*;
use crate::state::AppState;
use crate::util::unix_millis;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true, ts: unix_millis() }) }

#[instrument(level = "info", skip(state))]
pub async fn http_debug(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let mut modes: Vec<&'static str> = Category::PRIORITY.iter().map(|c| c.as_str()).collect();
  modes.extend([Category::Lunar.as_str(), "solar", "random", "chat"]);
  Json(DebugOut { pools: state.store.pool_sizes(), modes })
}

/// Raw body instead of `Json<_>`: a malformed body must still get a quiz.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_chat(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
  let req = parse_chat_body(&body);
  let out = answer_chat(&state, req, &mut rand::thread_rng());
  Json(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use crate::facts::FactStore;
  use crate::assets::NoAssets;
  use crate::routes::build_router;
  use axum::body::{to_bytes, Body};
  use axum::http::{Request, StatusCode};
  use serde_json::{json, Value};
  use tower::ServiceExt;

  fn north_only_state() -> Arc<AppState> {
    let cons = json!({ "constellations": [
      { "name_en": "Lyra", "name_ko": "거문고자리", "hemisphere": "N", "best_season_northern": "summer" },
      { "name_en": "Cygnus", "name_ko": "백조자리", "hemisphere": "N", "best_season_northern": "autumn" }
    ]});
    let store = FactStore::from_values(Some(&cons), None, &NoAssets, &NoAssets);
    Arc::new(AppState::with_store(store, QuizConfig::default()))
  }

  async fn post_chat(state: Arc<AppState>, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
      .method("POST")
      .uri("/chat")
      .header("content-type", "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = build_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn hemisphere_mode_is_binary_and_north() {
    let state = north_only_state();
    for _ in 0..30 {
      let (status, v) = post_chat(state.clone(), r#"{"mode":"hemisphere"}"#).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(v["type"], "quiz");
      let data = &v["data"];
      assert_eq!(data["category"], "hemisphere");
      let choices: Vec<&str> = data["choices"].as_array().unwrap().iter().map(|c| c.as_str().unwrap()).collect();
      assert_eq!(choices.len(), 2);
      assert!(choices.contains(&"North") && choices.contains(&"South"));
      let idx = data["correctIndex"].as_u64().unwrap() as usize;
      assert_eq!(choices[idx], "North");
    }
  }

  #[tokio::test]
  async fn malformed_body_still_gets_a_quiz() {
    let (status, v) = post_chat(north_only_state(), "{oops").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["type"], "quiz");
    let n = v["data"]["choices"].as_array().unwrap().len();
    assert!(n == 2 || n == 4);
  }

  #[tokio::test]
  async fn unavailable_category_falls_back() {
    let (status, v) = post_chat(north_only_state(), r#"{"mode":"eclipse"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["category"], "season");
    assert_eq!(v["data"]["choices"].as_array().unwrap().len(), 4);
    assert!(v["data"].get("image").is_none());
  }

  #[tokio::test]
  async fn chat_mode_guides() {
    let (_, v) = post_chat(north_only_state(), r#"{"mode":"chat"}"#).await;
    assert_eq!(v["type"], "guide");
    assert!(v["data"].is_string());
  }

  #[tokio::test]
  async fn health_and_debug() {
    let state = north_only_state();
    let resp = build_router(state.clone())
      .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(v["ok"], true);
    assert!(v["ts"].as_u64().unwrap() > 0);

    let resp = build_router(state)
      .oneshot(Request::builder().uri("/debug").body(Body::empty()).unwrap())
      .await
      .unwrap();
    let v: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(v["pools"]["constellations"], 2);
    assert_eq!(v["pools"]["season"], 2);
    assert_eq!(v["pools"]["planets"], 0);
    assert_eq!(v["pools"]["sun"], false);
    assert!(v["modes"].as_array().unwrap().iter().any(|m| m == "hemisphere"));
  }
}

//! Request-level behavior behind `POST /chat`: body parsing, the `chat`
//! help mode, and quiz serving.

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::protocol::{ChatIn, ChatOut};
use crate::state::AppState;
use crate::util::trunc_for_log;

const GUIDE_TEXT: &str = "Press one of the quiz buttons to get started!";
const RULE_TEXT: &str = "In quiz mode just reply with the number of your choice (1 to N) and it will be graded.";

/// Parse a `/chat` body leniently. Empty or malformed bodies mean random mode.
pub fn parse_chat_body(body: &[u8]) -> ChatIn {
  if body.iter().all(|b| b.is_ascii_whitespace()) {
    return ChatIn::default();
  }
  match serde_json::from_slice::<ChatIn>(body) {
    Ok(c) => c,
    Err(e) => {
      warn!(target: "quiz", error = %e, "Malformed /chat body; defaulting to random mode");
      ChatIn::default()
    }
  }
}

#[instrument(level = "info", skip(state, rng, body), fields(mode = body.mode.as_deref().unwrap_or("random")))]
pub fn answer_chat<R: Rng + ?Sized>(state: &AppState, body: ChatIn, rng: &mut R) -> ChatOut {
  let mode = body.mode.as_deref().map(str::trim).filter(|m| !m.is_empty()).unwrap_or("random");

  if mode.eq_ignore_ascii_case("chat") {
    let msg = body.message.as_deref().unwrap_or("").trim();
    info!(target: "quiz", message = %trunc_for_log(msg, 80), "Chat help requested");
    return if msg.is_empty() { ChatOut::Guide(GUIDE_TEXT.into()) } else { ChatOut::Rule(RULE_TEXT.into()) };
  }

  let (q, origin) = state.next_question(mode, rng);
  info!(
    target: "quiz",
    %mode,
    category = q.category.as_str(),
    %origin,
    choices = q.choices.len(),
    "Quiz served"
  );
  ChatOut::Quiz(q)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use crate::domain::Category;
  use crate::facts::FactStore;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn empty_state() -> AppState {
    AppState::with_store(FactStore::default(), QuizConfig::default())
  }

  #[test]
  fn lenient_body_parsing() {
    assert_eq!(parse_chat_body(b"").mode, None);
    assert_eq!(parse_chat_body(b"  \n").mode, None);
    assert_eq!(parse_chat_body(b"{not json").mode, None);
    assert_eq!(parse_chat_body(br#"{"mode": 3}"#).mode, None);
    assert_eq!(parse_chat_body(br#"{"mode":"star"}"#).mode.as_deref(), Some("star"));
    assert_eq!(parse_chat_body(br#"{"mode":"chat","message":"1"}"#).message.as_deref(), Some("1"));
  }

  #[test]
  fn chat_mode_returns_help() {
    let state = empty_state();
    let mut rng = StdRng::seed_from_u64(0);
    let guide = answer_chat(&state, ChatIn { mode: Some("chat".into()), message: None }, &mut rng);
    assert!(matches!(guide, ChatOut::Guide(_)));
    let rule = answer_chat(&state, ChatIn { mode: Some("chat".into()), message: Some("3".into()) }, &mut rng);
    assert!(matches!(rule, ChatOut::Rule(_)));
  }

  #[test]
  fn quiz_is_always_served() {
    let state = empty_state();
    let mut rng = StdRng::seed_from_u64(0);
    match answer_chat(&state, ChatIn::default(), &mut rng) {
      ChatOut::Quiz(q) => assert_eq!(q.category, Category::Sun),
      other => panic!("expected a quiz, got {:?}", other),
    }
  }
}

//! Question Generator: category builders, choice normalization and the
//! fail-soft dispatcher.
//!
//! Flow:
//! 1) The request mode picks a first category (explicit, `solar`, or random).
//! 2) If its builder has no data, the fixed `Category::PRIORITY` list is tried in order.
//! 3) If nothing works, the hard-coded fallback question is served.
//!
//! Every builder output (`Draft`) goes through `finalize`, which enforces the
//! choice-count and uniqueness invariants and shuffles the answer position.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::domain::{Category, Question};
use crate::facts::FactStore;
use crate::seeds::hard_fallback_draft;

pub mod builders;
pub mod distractors;

/// A builder's raw output: the right answer and its distractors, not yet padded or shuffled.
#[derive(Clone, Debug)]
pub struct Draft {
  pub category: Category,
  pub prompt: String,
  pub correct: String,
  pub distractors: Vec<String>,
  pub explanation: String,
  pub image: Option<String>,
  pub credit: Option<String>,
}

/// Normalize a draft into a `Question` (choice count, uniqueness, random answer position).
pub fn finalize<R: Rng + ?Sized>(draft: Draft, rng: &mut R) -> Question {
  let (choices, correct_index) = distractors::assemble(rng, draft.category, &draft.correct, draft.distractors);
  Question {
    category: draft.category,
    prompt: draft.prompt,
    choices,
    correct_index,
    explanation: draft.explanation,
    image: draft.image,
    credit: draft.credit,
  }
}

/// How the served question was chosen. Logged with every response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
  Requested,
  Random,
  Fallback,
  StaticFallback,
}

impl Origin {
  pub fn as_str(self) -> &'static str {
    match self {
      Origin::Requested => "requested",
      Origin::Random => "random",
      Origin::Fallback => "fallback_chain",
      Origin::StaticFallback => "static_fallback",
    }
  }
}

impl std::fmt::Display for Origin {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What a request mode asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
  One(Category),
  Solar,
  Random,
}

fn parse_request(mode: &str) -> Request {
  if mode.trim().eq_ignore_ascii_case("solar") {
    return Request::Solar;
  }
  match Category::from_mode(mode) {
    Some(c) => Request::One(c),
    None => Request::Random,
  }
}

/// Borrows an immutable `FactStore`; cheap to build per request.
pub struct QuizGenerator<'a> {
  store: &'a FactStore,
}

impl<'a> QuizGenerator<'a> {
  pub fn new(store: &'a FactStore) -> Self {
    Self { store }
  }

  /// Run one category's builder. None when its pool is empty.
  pub fn build<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<Question> {
    let s = self.store;
    let draft = match category {
      Category::Season => builders::season(s, rng),
      Category::Hemisphere => builders::hemisphere(s, rng),
      Category::Star => builders::star(s, rng),
      Category::Image => builders::chart_image(s, rng),
      Category::PlanetType => builders::planet_type(s, rng),
      Category::OrbitOrder => builders::orbit_order(s, rng),
      Category::InnerOuter => builders::inner_outer(s, rng),
      Category::Moon => builders::moon(s, rng),
      Category::Sun => builders::sun(s, rng),
      Category::Eclipse => builders::eclipse(s, rng),
      Category::Photo => builders::photo(s, rng),
      Category::Lunar => builders::lunar(s, rng),
    }?;
    Some(finalize(draft, rng))
  }

  /// Always returns a question. See the module docs for the selection order.
  pub fn generate<R: Rng + ?Sized>(&self, mode: &str, rng: &mut R) -> (Question, Origin) {
    let request = parse_request(mode);
    let (first, origin) = match request {
      Request::One(c) => (c, Origin::Requested),
      Request::Solar => (*Category::SOLAR.choose(rng).unwrap_or(&Category::Sun), Origin::Requested),
      Request::Random => (*Category::PRIORITY.choose(rng).unwrap_or(&Category::Season), Origin::Random),
    };

    if let Some(q) = self.build(first, rng) {
      return (q, origin);
    }
    debug!(target: "quiz", %mode, category = first.as_str(), "Category unavailable; walking fallback list");

    for c in Category::PRIORITY.iter().copied().filter(|c| *c != first) {
      if let Some(q) = self.build(c, rng) {
        debug!(target: "quiz", %mode, category = c.as_str(), "Fallback category served");
        return (q, Origin::Fallback);
      }
    }

    warn!(target: "quiz", %mode, "Every category is empty; serving the static fallback question");
    (finalize(hard_fallback_draft(), rng), Origin::StaticFallback)
  }
}

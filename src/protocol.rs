//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::Question;
use crate::facts::PoolSizes;

/// Body of `POST /chat`. Every field is optional; a body that fails to parse
/// is treated as `{}` (random mode).
#[derive(Debug, Default, Deserialize)]
pub struct ChatIn {
    #[serde(default)]
    pub mode: Option<String>,
    /// Free text, only read in `chat` mode.
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `POST /chat`: `{ "type": "quiz", "data": {...} }` and friends.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChatOut {
    Quiz(Question),
    Guide(String),
    Rule(String),
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub ts: u64,
}

#[derive(Serialize)]
pub struct DebugOut {
    pub pools: PoolSizes,
    pub modes: Vec<&'static str>,
}

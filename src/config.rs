//! Loading service configuration (data files, image directories, static roots) from TOML.
//!
//! Every section and key is optional; see `QuizConfig` for defaults.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct QuizConfig {
  #[serde(default)]
  pub data: DataPaths,
  #[serde(default)]
  pub assets: AssetDirs,
  #[serde(default)]
  pub server: ServerCfg,
}

/// Source JSON datasets read once at startup.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
  pub constellations: String,
  pub solar_system: String,
}

impl Default for DataPaths {
  fn default() -> Self {
    Self {
      constellations: "constellations_88_ko_named.json".into(),
      solar_system: "solar_system.json".into(),
    }
  }
}

/// Image directories scanned at startup and the URL prefixes they are served under.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetDirs {
  pub charts_dir: String,
  pub charts_url: String,
  pub charts_credit: String,
  pub photos_dir: String,
  pub photos_url: String,
  pub photos_credit: String,
}

impl Default for AssetDirs {
  fn default() -> Self {
    Self {
      charts_dir: "public/images/constellations_iau".into(),
      charts_url: "/public/images/constellations_iau".into(),
      charts_credit: "IAU / Sky & Telescope".into(),
      photos_dir: "public/images/planets".into(),
      photos_url: "/public/images/planets".into(),
      photos_credit: "NASA".into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerCfg {
  /// Root served for the quiz frontend (index.html fallback).
  pub static_dir: String,
  /// Directory mounted under `/public`.
  pub public_dir: String,
}

impl Default for ServerCfg {
  fn default() -> Self {
    Self { static_dir: ".".into(), public_dir: "public".into() }
  }
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizConfig>(&s) {
      Ok(cfg) => {
        info!(target: "astro_quiz", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "astro_quiz", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "astro_quiz", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg: QuizConfig = toml::from_str(
      r#"
      [data]
      solar_system = "data/solar.json"

      [assets]
      photos_credit = "JPL"
      "#,
    )
    .expect("toml");
    assert_eq!(cfg.data.solar_system, "data/solar.json");
    assert_eq!(cfg.data.constellations, "constellations_88_ko_named.json");
    assert_eq!(cfg.assets.photos_credit, "JPL");
    assert_eq!(cfg.assets.charts_url, "/public/images/constellations_iau");
    assert_eq!(cfg.server, ServerCfg::default());
  }

  #[test]
  fn empty_toml_is_default() {
    let cfg: QuizConfig = toml::from_str("").expect("toml");
    assert_eq!(cfg, QuizConfig::default());
  }
}

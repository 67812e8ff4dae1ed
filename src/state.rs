//! Application state: the immutable Fact Store plus the config it was built from.
//!
//! Built once at startup and shared read-only (behind `Arc`) by every request.
//! Nothing here is mutated after construction, so handlers need no locking.

use std::path::Path;

use rand::Rng;
use tracing::{info, instrument};

use crate::assets::DirAssetResolver;
use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::domain::Question;
use crate::facts::FactStore;
use crate::quiz::{Origin, QuizGenerator};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: FactStore,
    pub config: QuizConfig,
}

impl AppState {
    /// Build state from env: load config, read both datasets, index image folders.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_quiz_config_from_env().unwrap_or_default();
        Self::from_config(config)
    }

    #[instrument(level = "info", skip_all)]
    pub fn from_config(config: QuizConfig) -> Self {
        let a = &config.assets;
        let charts = DirAssetResolver::scan(&a.charts_dir, &a.charts_url, &a.charts_credit);
        let photos = DirAssetResolver::scan(&a.photos_dir, &a.photos_url, &a.photos_credit);

        let store = FactStore::load(
            Path::new(&config.data.constellations),
            Path::new(&config.data.solar_system),
            &charts,
            &photos,
        );

        let sizes = store.pool_sizes();
        info!(
            target: "astro_quiz",
            season = sizes.season,
            star = sizes.star,
            hemisphere = sizes.hemisphere,
            orbit_order = sizes.orbit_order,
            planet_type = sizes.planet_type,
            chart_files = charts.len(),
            photo_files = photos.len(),
            "Startup quiz pool inventory"
        );

        Self { store, config }
    }

    /// State around an already-built store (tests, embedding).
    #[allow(dead_code)]
    pub fn with_store(store: FactStore, config: QuizConfig) -> Self {
        Self { store, config }
    }

    /// Generate one question for `mode` with the caller's random source.
    pub fn next_question<R: Rng + ?Sized>(&self, mode: &str, rng: &mut R) -> (Question, Origin) {
        QuizGenerator::new(&self.store).generate(mode, rng)
    }
}

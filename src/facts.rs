//! Fact Store: normalized, immutable view of the constellation catalog and the
//! solar-system facts, with the query pools the quiz builders draw from.
//!
//! Source files drift in shape (wrapper vs bare array, nested vs flat star
//! lists, local vs English labels), so records are read as `serde_json::Value`
//! and normalized field by field. Pools are computed once in the constructor.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assets::AssetResolver;
use crate::domain::{
  BodyKind, ChartAsset, ConstellationFact, EclipseFact, EclipseType, Hemisphere, ImageAsset, PhotoAsset,
  PlanetType, Season, SolarBodyFact,
};
use crate::seeds::{planet_ref, star_name_ko, PlanetRef, MIRA_KO, SEASON_CORRECTIONS};
use crate::util::{fold_label, slugify, star_key};

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("IO error reading {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("JSON error in {path}: {source}")]
  Json {
    path: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("Unexpected shape in {path}: {what}")]
  Shape { path: String, what: &'static str },
}

/// Read and parse one JSON source file.
pub fn read_json(path: &Path) -> Result<Value, LoadError> {
  let display = path.display().to_string();
  let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: display.clone(), source })?;
  serde_json::from_str(&raw).map_err(|source| LoadError::Json { path: display, source })
}

// ---------- field helpers ----------

/// First non-empty string among `keys`.
fn str_field<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a str> {
  keys
    .iter()
    .filter_map(|k| v.get(*k).and_then(Value::as_str))
    .map(str::trim)
    .find(|s| !s.is_empty())
}

fn array_field<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
  keys.iter().find_map(|k| v.get(*k).and_then(Value::as_array))
}

fn u8_field(v: &Value, keys: &[&str]) -> Option<u8> {
  keys.iter().find_map(|k| {
    let f = v.get(*k)?;
    f.as_u64()
      .or_else(|| f.as_str().and_then(|s| s.trim().parse().ok()))
      .and_then(|n| u8::try_from(n).ok())
  })
}

// ---------- label normalization ----------

/// Map a free-form season label. Unknown labels yield None.
pub fn parse_season(label: &str) -> Option<Season> {
  match fold_label(label).as_str() {
    "spring" | "봄" => Some(Season::Spring),
    "summer" | "여름" => Some(Season::Summer),
    "autumn" | "fall" | "가을" => Some(Season::Autumn),
    "winter" | "겨울" => Some(Season::Winter),
    "year round" | "yearround" | "all" | "all year" | "연중" => Some(Season::YearRound),
    _ => None,
  }
}

/// Map a hemisphere code (`N`, `S`, `E`) or free text. Unspecified means North.
pub fn parse_hemisphere(code: Option<&str>) -> Hemisphere {
  let Some(code) = code else { return Hemisphere::North };
  let folded = fold_label(code);
  match folded.as_str() {
    "s" => Hemisphere::South,
    "n" | "e" => Hemisphere::North,
    other if other.contains("south") || other.contains('남') => Hemisphere::South,
    _ => Hemisphere::North,
  }
}

pub fn parse_planet_type(label: &str) -> Option<PlanetType> {
  let l = fold_label(label);
  if l.contains("terrestrial") || l.contains("rocky") || l.contains("지구형") {
    Some(PlanetType::Terrestrial)
  } else if l.contains("ice") || l.contains("얼음") {
    Some(PlanetType::Ice)
  } else if l.contains("gas") || l.contains("가스") {
    Some(PlanetType::Gas)
  } else {
    None
  }
}

pub fn parse_eclipse_type(label: &str) -> Option<EclipseType> {
  let l = fold_label(label);
  if l.contains("solar") || l.contains("일식") {
    Some(EclipseType::Solar)
  } else if l.contains("lunar") || l.contains("월식") {
    Some(EclipseType::Lunar)
  } else {
    None
  }
}

// ---------- constellations ----------

/// Korean name for a known star, from any English or Bayer spelling.
fn localized_star(name: &str) -> Option<&'static str> {
  let key = star_key(name);
  star_name_ko(&key).or_else(|| key.contains("mira").then_some(MIRA_KO))
}

const STAR_NAME_KEYS: &[&str] = &["name", "proper", "designation", "bayer", "flamsteed"];

/// Display name of one star entry: explicit local name, then the localization
/// table over every known spelling, then the raw name.
fn star_display_name(star: &Value) -> Option<String> {
  match star {
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() {
        return None;
      }
      Some(localized_star(s).unwrap_or(s).to_string())
    }
    Value::Object(_) => {
      if let Some(local) = str_field(star, &["name_ko", "name_local"]) {
        return Some(local.to_string());
      }
      let localized = STAR_NAME_KEYS
        .iter()
        .filter_map(|k| str_field(star, &[*k]))
        .find_map(localized_star);
      localized.or_else(|| str_field(star, STAR_NAME_KEYS)).map(str::to_string)
    }
    _ => None,
  }
}

/// Star names from a nested star-record list or a flat list, localized where known.
fn extract_stars(rec: &Value) -> Vec<String> {
  let list = array_field(rec, &["notable_stars", "stars"]).map(Vec::as_slice).unwrap_or(&[]);
  let mut out: Vec<String> = Vec::new();
  for name in list.iter().filter_map(star_display_name) {
    if !out.contains(&name) {
      out.push(name);
    }
  }
  out
}

fn apply_corrections(fact: &mut ConstellationFact) {
  for fix in SEASON_CORRECTIONS {
    if fact.name_canonical.eq_ignore_ascii_case(fix.name_canonical) || fact.name_local == fix.name_local {
      if fact.season != fix.season {
        debug!(target: "astro_quiz", name = %fact.name_canonical, from = ?fact.season, to = ?fix.season, note = fix.note, "Season corrected");
      }
      fact.season = fix.season;
    }
  }
}

/// Normalize one catalog record. Returns None when it carries no name at all.
pub fn normalize_constellation(rec: &Value) -> Option<ConstellationFact> {
  let canonical = str_field(rec, &["name_en", "english", "name"]);
  let local = str_field(rec, &["name_ko", "korean", "name_local"]);
  let (name_canonical, name_local) = match (canonical, local) {
    (Some(c), Some(l)) => (c.to_string(), l.to_string()),
    (Some(c), None) => (c.to_string(), c.to_string()),
    (None, Some(l)) => (l.to_string(), l.to_string()),
    (None, None) => return None,
  };

  let season = str_field(rec, &["season", "best_season_northern", "best_season"])
    .and_then(parse_season)
    .unwrap_or_default();
  let hemisphere = parse_hemisphere(str_field(rec, &["hemisphere"]));

  let mut fact = ConstellationFact {
    name_local,
    name_canonical,
    hemisphere,
    season,
    notable_stars: extract_stars(rec),
  };
  apply_corrections(&mut fact);
  Some(fact)
}

fn shape_error(source: &str, what: &'static str) -> LoadError {
  LoadError::Shape { path: source.to_string(), what }
}

/// Accepts `[ ... ]` or `{ "constellations": [ ... ] }`. `source` names the
/// document in errors.
pub fn parse_constellations(v: &Value, source: &str) -> Result<Vec<ConstellationFact>, LoadError> {
  let list = match v {
    Value::Array(a) => a,
    Value::Object(_) => array_field(v, &["constellations"])
      .ok_or_else(|| shape_error(source, "object without a `constellations` array"))?,
    _ => return Err(shape_error(source, "neither an array nor an object")),
  };
  let facts: Vec<ConstellationFact> = list.iter().filter_map(normalize_constellation).collect();
  if facts.len() < list.len() {
    debug!(target: "astro_quiz", dropped = list.len() - facts.len(), "Dropped nameless constellation records");
  }
  Ok(facts)
}

// ---------- solar system ----------

fn same_ref(a: &PlanetRef, b: &PlanetRef) -> bool {
  std::ptr::eq(a, b)
}

/// True when `name` and `body` denote the same planet, by either name or via
/// the reference table ("지구" and "Earth").
pub fn same_planet(body: &SolarBodyFact, name: &str) -> bool {
  if body.answers_to(name) {
    return true;
  }
  let Some(r) = planet_ref(name) else { return false };
  std::iter::once(body.name_local.as_str())
    .chain(body.name_canonical.as_deref())
    .filter_map(planet_ref)
    .any(|p| same_ref(p, r))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolarCatalog {
  pub bodies: Vec<SolarBodyFact>,
  pub eclipses: Vec<EclipseFact>,
}

fn normalize_body(rec: &Value, kind: BodyKind) -> Option<SolarBodyFact> {
  let canonical = str_field(rec, &["name_en", "english"]).map(str::to_string);
  let local = str_field(rec, &["name_ko", "name_local", "korean", "name"])
    .map(str::to_string)
    .or_else(|| canonical.clone())?;

  let mut body = SolarBodyFact {
    name_local: local,
    name_canonical: canonical,
    kind,
    orbit_order: u8_field(rec, &["orbit_order", "order"]),
    planet_type: str_field(rec, &["type", "planet_type"]).and_then(parse_planet_type),
    parent_body: str_field(rec, &["parent", "planet", "parent_body"]).map(str::to_string),
    description: str_field(rec, &["desc", "description"]).map(str::to_string),
  };

  if kind == BodyKind::Planet {
    let known = planet_ref(&body.name_local).or_else(|| body.name_canonical.as_deref().and_then(planet_ref));
    if let Some(p) = known {
      body.orbit_order = body.orbit_order.or(Some(p.orbit_order));
      body.planet_type = body.planet_type.or(Some(p.planet_type));
      if body.name_canonical.is_none() {
        body.name_canonical = Some(p.name_en.to_string());
      }
    }
  }
  Some(body)
}

fn normalize_eclipse(rec: &Value) -> Option<EclipseFact> {
  let eclipse_type = str_field(rec, &["type", "kind"]).and_then(parse_eclipse_type)?;
  let order: Vec<String> = array_field(rec, &["order", "body_order"])?
    .iter()
    .filter_map(Value::as_str)
    .map(|s| s.trim().to_string())
    .collect();
  let body_order: [String; 3] = order.try_into().ok()?;
  if body_order[0] == body_order[1] || body_order[1] == body_order[2] || body_order[0] == body_order[2] {
    return None;
  }
  Some(EclipseFact {
    eclipse_type,
    body_order,
    description: str_field(rec, &["desc", "description"]).unwrap_or_default().to_string(),
  })
}

/// Accepts `{ sun?, planets?, moons?, dwarf_planets?, small_bodies?, eclipses? }`.
pub fn parse_solar(v: &Value, source: &str) -> Result<SolarCatalog, LoadError> {
  if !v.is_object() {
    return Err(shape_error(source, "solar-system document is not an object"));
  }
  let mut bodies = Vec::new();
  if let Some(sun) = v.get("sun").filter(|s| s.is_object()) {
    let mut sun = normalize_body(sun, BodyKind::Star).unwrap_or_else(|| SolarBodyFact {
      name_local: "Sun".into(),
      name_canonical: Some("Sun".into()),
      kind: BodyKind::Star,
      orbit_order: None,
      planet_type: None,
      parent_body: None,
      description: None,
    });
    sun.name_canonical.get_or_insert_with(|| "Sun".into());
    bodies.push(sun);
  }
  let lists: [(&str, BodyKind); 4] = [
    ("planets", BodyKind::Planet),
    ("moons", BodyKind::Moon),
    ("dwarf_planets", BodyKind::DwarfPlanet),
    ("small_bodies", BodyKind::SmallBody),
  ];
  for (key, kind) in lists {
    if let Some(list) = array_field(v, &[key]) {
      bodies.extend(list.iter().filter_map(|r| normalize_body(r, kind)));
    }
  }

  // Point moon parents at the planet's local name so answers match planet choices.
  // Names in either language resolve through the reference table.
  let planet_names: Vec<(String, Option<String>)> = bodies
    .iter()
    .filter(|b| b.kind == BodyKind::Planet)
    .map(|b| (b.name_local.clone(), b.name_canonical.clone()))
    .collect();
  for moon in bodies.iter_mut().filter(|b| b.kind == BodyKind::Moon) {
    let Some(parent) = moon.parent_body.as_deref() else { continue };
    let parent_ref = planet_ref(parent);
    let hit = planet_names.iter().find(|(local, canonical)| {
      let names = std::iter::once(local.as_str()).chain(canonical.as_deref());
      let literal = names.clone().any(|n| n.eq_ignore_ascii_case(parent));
      literal || parent_ref.map_or(false, |r| names.filter_map(planet_ref).any(|p| same_ref(p, r)))
    });
    if let Some((local, _)) = hit {
      moon.parent_body = Some(local.clone());
    }
  }

  let eclipses = array_field(v, &["eclipses"])
    .map(|l| l.iter().filter_map(normalize_eclipse).collect())
    .unwrap_or_default();
  Ok(SolarCatalog { bodies, eclipses })
}

// ---------- store ----------

/// Pool cardinalities, exposed on `/debug`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PoolSizes {
  pub constellations: usize,
  pub season: usize,
  pub star: usize,
  pub hemisphere: usize,
  pub charts: usize,
  pub planets: usize,
  pub orbit_order: usize,
  pub planet_type: usize,
  pub moons: usize,
  pub eclipses: usize,
  pub photos: usize,
  pub sun: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactStore {
  constellations: Vec<ConstellationFact>,
  season_pool: Vec<ConstellationFact>,
  star_pool: Vec<ConstellationFact>,
  charts: Vec<ChartAsset>,
  planets: Vec<SolarBodyFact>,
  planets_by_order: Vec<SolarBodyFact>,
  typed_planets: Vec<SolarBodyFact>,
  moons: Vec<SolarBodyFact>,
  sun: Option<SolarBodyFact>,
  eclipses: Vec<EclipseFact>,
  photos: Vec<PhotoAsset>,
}

impl FactStore {
  /// Build from already-normalized facts; all pools are derived here.
  pub fn new(
    constellations: Vec<ConstellationFact>,
    solar: SolarCatalog,
    charts: &dyn AssetResolver,
    photos: &dyn AssetResolver,
  ) -> Self {
    // Season questions are about the northern evening sky.
    let season_pool = constellations
      .iter()
      .filter(|c| c.season != Season::YearRound && c.hemisphere != Hemisphere::South)
      .cloned()
      .collect();
    let star_pool = constellations.iter().filter(|c| !c.notable_stars.is_empty()).cloned().collect();

    let mut chart_assets: Vec<ChartAsset> = Vec::new();
    for c in &constellations {
      let key = slugify(&c.name_canonical);
      if chart_assets.iter().any(|a| a.key == key) {
        continue;
      }
      if let Some(a) = charts.resolve(&c.name_canonical) {
        chart_assets.push(ImageAsset {
          key,
          display_name: c.name_canonical.clone(),
          image_path: a.url,
          credit: a.credit,
          kind: None,
        });
      }
    }

    let planets: Vec<SolarBodyFact> = solar.bodies.iter().filter(|b| b.kind == BodyKind::Planet).cloned().collect();
    let mut planets_by_order: Vec<SolarBodyFact> = planets.iter().filter(|p| p.orbit_order.is_some()).cloned().collect();
    planets_by_order.sort_by_key(|p| p.orbit_order);
    planets_by_order.dedup_by_key(|p| p.orbit_order);
    let typed_planets = planets.iter().filter(|p| p.planet_type.is_some()).cloned().collect();
    let moons = solar
      .bodies
      .iter()
      .filter(|b| b.kind == BodyKind::Moon && b.parent_body.is_some())
      .cloned()
      .collect();
    let sun = solar.bodies.iter().find(|b| b.kind == BodyKind::Star).cloned();

    let mut photo_assets: Vec<PhotoAsset> = Vec::new();
    for b in &solar.bodies {
      let key = slugify(b.lookup_name());
      if photo_assets.iter().any(|a| a.key == key) {
        continue;
      }
      let found = photos.resolve(b.lookup_name()).or_else(|| photos.resolve(&b.name_local));
      if let Some(a) = found {
        photo_assets.push(ImageAsset {
          key,
          display_name: b.name_local.clone(),
          image_path: a.url,
          credit: a.credit,
          kind: Some(b.kind),
        });
      }
    }

    Self {
      constellations,
      season_pool,
      star_pool,
      charts: chart_assets,
      planets,
      planets_by_order,
      typed_planets,
      moons,
      sun,
      eclipses: solar.eclipses,
      photos: photo_assets,
    }
  }

  /// Build from parsed JSON documents. A document of the wrong shape counts as empty.
  pub fn from_values(
    constellations: Option<&Value>,
    solar: Option<&Value>,
    charts: &dyn AssetResolver,
    photos: &dyn AssetResolver,
  ) -> Self {
    Self::from_documents(
      constellations.map(|v| ("constellations", v)),
      solar.map(|v| ("solar_system", v)),
      charts,
      photos,
    )
  }

  /// Like `from_values`, with each document tagged by its source path for errors.
  fn from_documents(
    constellations: Option<(&str, &Value)>,
    solar: Option<(&str, &Value)>,
    charts: &dyn AssetResolver,
    photos: &dyn AssetResolver,
  ) -> Self {
    let cons = match constellations.map(|(src, v)| parse_constellations(v, src)) {
      Some(Ok(c)) => c,
      Some(Err(e)) => {
        warn!(target: "astro_quiz", error = %e, "Constellation catalog rejected; pool is empty");
        Vec::new()
      }
      None => Vec::new(),
    };
    let sol = match solar.map(|(src, v)| parse_solar(v, src)) {
      Some(Ok(s)) => s,
      Some(Err(e)) => {
        warn!(target: "astro_quiz", error = %e, "Solar-system facts rejected; pool is empty");
        SolarCatalog::default()
      }
      None => SolarCatalog::default(),
    };
    Self::new(cons, sol, charts, photos)
  }

  /// Load both source files. Missing or malformed files degrade to empty pools.
  pub fn load(
    constellations_path: &Path,
    solar_path: &Path,
    charts: &dyn AssetResolver,
    photos: &dyn AssetResolver,
  ) -> Self {
    let cons = read_logged(constellations_path);
    let sol = read_logged(solar_path);
    let cons_src = constellations_path.display().to_string();
    let sol_src = solar_path.display().to_string();
    let store = Self::from_documents(
      cons.as_ref().map(|v| (cons_src.as_str(), v)),
      sol.as_ref().map(|v| (sol_src.as_str(), v)),
      charts,
      photos,
    );
    let sizes = store.pool_sizes();
    info!(
      target: "astro_quiz",
      constellations = sizes.constellations,
      planets = sizes.planets,
      moons = sizes.moons,
      eclipses = sizes.eclipses,
      charts = sizes.charts,
      photos = sizes.photos,
      sun = sizes.sun,
      "Fact store loaded"
    );
    store
  }

  pub fn constellations(&self) -> &[ConstellationFact] { &self.constellations }
  /// Constellations with a specific (not year-round) season.
  pub fn season_pool(&self) -> &[ConstellationFact] { &self.season_pool }
  pub fn star_pool(&self) -> &[ConstellationFact] { &self.star_pool }
  /// Every constellation has a hemisphere (North by default).
  pub fn hemisphere_pool(&self) -> &[ConstellationFact] { &self.constellations }
  pub fn charts(&self) -> &[ChartAsset] { &self.charts }
  pub fn planets(&self) -> &[SolarBodyFact] { &self.planets }
  /// Planets with a known orbit position, sorted by it.
  pub fn planets_by_order(&self) -> &[SolarBodyFact] { &self.planets_by_order }
  pub fn typed_planets(&self) -> &[SolarBodyFact] { &self.typed_planets }
  pub fn moons(&self) -> &[SolarBodyFact] { &self.moons }
  pub fn sun(&self) -> Option<&SolarBodyFact> { self.sun.as_ref() }
  pub fn eclipses(&self) -> &[EclipseFact] { &self.eclipses }
  pub fn photos(&self) -> &[PhotoAsset] { &self.photos }

  pub fn pool_sizes(&self) -> PoolSizes {
    PoolSizes {
      constellations: self.constellations.len(),
      season: self.season_pool.len(),
      star: self.star_pool.len(),
      hemisphere: self.hemisphere_pool().len(),
      charts: self.charts.len(),
      planets: self.planets.len(),
      orbit_order: self.planets_by_order.len(),
      planet_type: self.typed_planets.len(),
      moons: self.moons.len(),
      eclipses: self.eclipses.len(),
      photos: self.photos.len(),
      sun: self.sun.is_some(),
    }
  }
}

fn read_logged(path: &Path) -> Option<Value> {
  match read_json(path) {
    Ok(v) => Some(v),
    Err(e) => {
      warn!(target: "astro_quiz", error = %e, "Source file unavailable; dataset treated as empty");
      None
    }
  }
}

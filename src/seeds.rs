//! Built-in reference tables and the hard fallback question.
//!
//! Everything here is static content: lookup tables used when the source data
//! is incomplete, filler vocabularies used to pad choices, and the question
//! served when no data-backed category can produce anything.

use crate::domain::{Category, PlanetType, Season};
use crate::quiz::Draft;

/// Known planet facts keyed by English and local name.
/// Used when a planet record omits `orbit_order` or `type`.
pub struct PlanetRef {
  pub name_en: &'static str,
  pub name_ko: &'static str,
  pub orbit_order: u8,
  pub planet_type: PlanetType,
}

pub const PLANETS: &[PlanetRef] = &[
  PlanetRef { name_en: "Mercury", name_ko: "수성", orbit_order: 1, planet_type: PlanetType::Terrestrial },
  PlanetRef { name_en: "Venus", name_ko: "금성", orbit_order: 2, planet_type: PlanetType::Terrestrial },
  PlanetRef { name_en: "Earth", name_ko: "지구", orbit_order: 3, planet_type: PlanetType::Terrestrial },
  PlanetRef { name_en: "Mars", name_ko: "화성", orbit_order: 4, planet_type: PlanetType::Terrestrial },
  PlanetRef { name_en: "Jupiter", name_ko: "목성", orbit_order: 5, planet_type: PlanetType::Gas },
  PlanetRef { name_en: "Saturn", name_ko: "토성", orbit_order: 6, planet_type: PlanetType::Gas },
  PlanetRef { name_en: "Uranus", name_ko: "천왕성", orbit_order: 7, planet_type: PlanetType::Ice },
  PlanetRef { name_en: "Neptune", name_ko: "해왕성", orbit_order: 8, planet_type: PlanetType::Ice },
];

pub fn planet_ref(name: &str) -> Option<&'static PlanetRef> {
  let name = name.trim();
  PLANETS
    .iter()
    .find(|p| p.name_en.eq_ignore_ascii_case(name) || p.name_ko == name)
}

/// Planets inside the asteroid belt.
pub const INNER_PLANETS: &[&str] = &["Mercury", "Venus", "Earth", "Mars"];

pub const INNER_LABEL: &str = "Inner planet";
pub const OUTER_LABEL: &str = "Outer planet";

/// Manual season corrections applied after normalization, overriding the source catalog.
pub struct SeasonCorrection {
  pub name_canonical: &'static str,
  pub name_local: &'static str,
  pub season: Season,
  /// Why the source value is overridden.
  pub note: &'static str,
}

pub const SEASON_CORRECTIONS: &[SeasonCorrection] = &[SeasonCorrection {
  name_canonical: "Cancer",
  name_local: "게자리",
  season: Season::Winter,
  note: "Korea Astronomy and Space Science Institute lists Cancer as a winter constellation",
}];

/// Phases of the Moon that cannot be seen at a given time of night.
pub const MOON_PHASES: [&str; 4] = ["Full moon", "First quarter", "Waxing crescent", "Waning crescent"];
pub const MOON_PHASE_RULES: &[(&str, &str)] = &[
  ("in the early evening", "Waning crescent"),
  ("at midnight", "Waxing crescent"),
  ("just before dawn", "First quarter"),
];

pub const SUN_ANSWER: &str = "Star";
pub const SUN_DISTRACTORS: [&str; 3] = ["Planet", "Moon", "Dwarf planet"];

/// Filler used to pad a category's choices up to the required count.
pub fn filler_for(category: Category) -> &'static [&'static str] {
  match category {
    Category::Season => &["Spring", "Summer", "Autumn", "Winter", "Year-round"],
    Category::PlanetType => &["Dwarf planet", "Asteroid", "Comet"],
    Category::OrbitOrder => &["1st planet", "2nd planet", "3rd planet", "4th planet", "5th planet", "6th planet", "7th planet", "8th planet"],
    Category::InnerOuter => &["Asteroid belt object", "Kuiper belt object"],
    Category::Sun => &SUN_DISTRACTORS,
    Category::Lunar => &MOON_PHASES,
    _ => &[],
  }
}

/// Last-resort padding when a category's own filler is exhausted.
pub const GENERIC_FILLER: &[&str] = &["None of the above", "Cannot be determined", "Not listed", "Unknown"];

/// Absolute last-resort question served when every data pool is empty.
/// Goes through the same normalization as every other draft.
pub fn hard_fallback_draft() -> Draft {
  Draft {
    category: Category::Sun,
    prompt: "What kind of celestial body is the Sun?".into(),
    correct: SUN_ANSWER.into(),
    distractors: SUN_DISTRACTORS.iter().map(|d| d.to_string()).collect(),
    explanation: "The Sun is the only star in the Solar System.".into(),
    image: None,
    credit: None,
  }
}

/// Korean names of well-known stars, keyed by the normalized English name.
pub const STAR_NAMES_KO: &[(&str, &str)] = &[
  ("betelgeuse", "베텔게우스"), ("rigel", "리겔"), ("bellatrix", "벨라트릭스"),
  ("sirius", "시리우스"), ("procyon", "프로키온"), ("vega", "베가"), ("deneb", "데네브"), ("altair", "알타이르"),
  ("arcturus", "아크투루스"), ("spica", "스피카"), ("capella", "카펠라"),
  ("castor", "카스토르"), ("pollux", "폴룩스"), ("aldebaran", "알데바란"), ("algol", "알골"), ("mirfak", "미르팍"),
  ("almach", "알마크"), ("alpheratz", "알페라츠"), ("algenib", "알게니브"), ("enif", "애니프"),
  ("dubhe", "두베"), ("merak", "메라크"), ("phecda", "페크다"), ("megrez", "메그레즈"), ("alioth", "알리오트"),
  ("mizar", "미자르"), ("alcor", "알코르"), ("alkaid", "알카이드"), ("regulus", "레굴루스"), ("denebola", "데네볼라"),
  ("antares", "안타레스"), ("mira", "미라"), ("fomalhaut", "포말하우트"), ("polaris", "폴라리스"),
  ("sadr", "사드르"), ("albireo", "알비레오"), ("dabih", "다비흐"), ("canopus", "카노푸스"),
];

/// Mira is often listed by variable-star designation ("Mira (ο Ceti)", "omicron Ceti Mira").
pub const MIRA_KO: &str = "미라";

pub fn star_name_ko(key: &str) -> Option<&'static str> {
  STAR_NAMES_KO.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Spelled-out Greek letters for Bayer designations.
pub fn greek_letter_name(ch: char) -> Option<&'static str> {
  Some(match ch {
    'α' => "alpha", 'β' => "beta", 'γ' => "gamma", 'δ' => "delta", 'ε' => "epsilon", 'ζ' => "zeta",
    'η' => "eta", 'θ' => "theta", 'ι' => "iota", 'κ' => "kappa", 'λ' => "lambda", 'μ' => "mu",
    'ν' => "nu", 'ξ' => "xi", 'ο' => "omicron", 'π' => "pi", 'ρ' => "rho", 'σ' | 'ς' => "sigma",
    'τ' => "tau", 'υ' => "upsilon", 'φ' => "phi", 'χ' => "chi", 'ψ' => "psi", 'ω' => "omega",
    _ => return None,
  })
}

//! Domain models: normalized astronomy facts, image assets, quiz categories, and the question itself.

use serde::{Deserialize, Serialize};

/// Sky hemisphere a constellation is mainly seen from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Hemisphere {
  North,
  South,
}
impl Default for Hemisphere {
  fn default() -> Self { Hemisphere::North }
}

impl Hemisphere {
  pub fn label(self) -> &'static str {
    match self {
      Hemisphere::North => "North",
      Hemisphere::South => "South",
    }
  }

  pub fn other(self) -> Hemisphere {
    match self {
      Hemisphere::North => Hemisphere::South,
      Hemisphere::South => Hemisphere::North,
    }
  }
}

/// Best observing season (northern-hemisphere evening sky).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
  Spring,
  Summer,
  Autumn,
  Winter,
  YearRound,
}
impl Default for Season {
  fn default() -> Self { Season::YearRound }
}

impl Season {
  /// The four seasons a question can ask about (year-round is not one of them).
  pub const CANONICAL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

  pub fn label(self) -> &'static str {
    match self {
      Season::Spring => "Spring",
      Season::Summer => "Summer",
      Season::Autumn => "Autumn",
      Season::Winter => "Winter",
      Season::YearRound => "Year-round",
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BodyKind {
  Star,
  Planet,
  Moon,
  DwarfPlanet,
  SmallBody,
}

impl BodyKind {
  pub fn label(self) -> &'static str {
    match self {
      BodyKind::Star => "Star",
      BodyKind::Planet => "Planet",
      BodyKind::Moon => "Moon",
      BodyKind::DwarfPlanet => "Dwarf planet",
      BodyKind::SmallBody => "Small body",
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlanetType {
  Terrestrial,
  Gas,
  Ice,
}

impl PlanetType {
  pub const ALL: [PlanetType; 3] = [PlanetType::Terrestrial, PlanetType::Gas, PlanetType::Ice];

  pub fn label(self) -> &'static str {
    match self {
      PlanetType::Terrestrial => "Terrestrial planet",
      PlanetType::Gas => "Gas giant",
      PlanetType::Ice => "Ice giant",
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EclipseType {
  Solar,
  Lunar,
}

impl EclipseType {
  pub fn label(self) -> &'static str {
    match self {
      EclipseType::Solar => "solar eclipse",
      EclipseType::Lunar => "lunar eclipse",
    }
  }
}

/// One constellation after normalization. Both names are non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstellationFact {
  pub name_local: String,
  pub name_canonical: String,
  pub hemisphere: Hemisphere,
  pub season: Season,
  pub notable_stars: Vec<String>,
}

/// Sun, planet, moon or other solar-system body after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolarBodyFact {
  pub name_local: String,
  pub name_canonical: Option<String>,
  pub kind: BodyKind,
  pub orbit_order: Option<u8>,
  pub planet_type: Option<PlanetType>,
  pub parent_body: Option<String>,
  pub description: Option<String>,
}

impl SolarBodyFact {
  /// True if `name` is either of this body's names (case-insensitive).
  pub fn answers_to(&self, name: &str) -> bool {
    let name = name.trim();
    self.name_local.eq_ignore_ascii_case(name)
      || self.name_canonical.as_deref().map_or(false, |c| c.eq_ignore_ascii_case(name))
  }

  /// Name used for asset lookup: the English name when present.
  pub fn lookup_name(&self) -> &str {
    self.name_canonical.as_deref().unwrap_or(&self.name_local)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EclipseFact {
  pub eclipse_type: EclipseType,
  pub body_order: [String; 3],
  pub description: String,
}

/// Image joined with the fact it depicts. Chart assets are constellation charts,
/// photo assets are pictures of solar-system bodies (with `kind` set).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
  pub key: String,
  pub display_name: String,
  pub image_path: String,
  pub credit: String,
  pub kind: Option<BodyKind>,
}

pub type ChartAsset = ImageAsset;
pub type PhotoAsset = ImageAsset;

/// Question category. The serialized name doubles as the request `mode`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Season,
  Hemisphere,
  Star,
  Image,
  PlanetType,
  OrbitOrder,
  InnerOuter,
  Moon,
  Sun,
  Eclipse,
  Photo,
  Lunar,
}

impl Category {
  /// Fallback order tried when the requested builder has nothing to offer.
  /// `Lunar` is static content and only served on explicit request.
  pub const PRIORITY: [Category; 11] = [
    Category::Season,
    Category::Star,
    Category::Hemisphere,
    Category::Image,
    Category::PlanetType,
    Category::OrbitOrder,
    Category::InnerOuter,
    Category::Moon,
    Category::Eclipse,
    Category::Photo,
    Category::Sun,
  ];

  /// Categories reachable through the `solar` mode.
  pub const SOLAR: [Category; 6] = [
    Category::PlanetType,
    Category::OrbitOrder,
    Category::InnerOuter,
    Category::Moon,
    Category::Sun,
    Category::Eclipse,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Season => "season",
      Category::Hemisphere => "hemisphere",
      Category::Star => "star",
      Category::Image => "image",
      Category::PlanetType => "planet_type",
      Category::OrbitOrder => "orbit_order",
      Category::InnerOuter => "inner_outer",
      Category::Moon => "moon",
      Category::Sun => "sun",
      Category::Eclipse => "eclipse",
      Category::Photo => "photo",
      Category::Lunar => "lunar",
    }
  }

  /// Parse a request mode. Accepts a few aliases used by older frontends.
  pub fn from_mode(mode: &str) -> Option<Category> {
    let m = mode.trim().to_ascii_lowercase().replace('-', "_");
    let c = match m.as_str() {
      "season" => Category::Season,
      "hemisphere" => Category::Hemisphere,
      "star" => Category::Star,
      "image" | "chart" => Category::Image,
      "planet_type" | "planet" => Category::PlanetType,
      "orbit_order" | "orbit" => Category::OrbitOrder,
      "inner_outer" => Category::InnerOuter,
      "moon" => Category::Moon,
      "sun" => Category::Sun,
      "eclipse" => Category::Eclipse,
      "photo" => Category::Photo,
      "lunar" | "moon_phase" => Category::Lunar,
      _ => return None,
    };
    Some(c)
  }

  /// Number of choices every question of this category carries.
  pub fn choice_count(self) -> usize {
    match self {
      Category::Hemisphere => 2,
      _ => 4,
    }
  }
}

/// A generated multiple-choice question. Created per request, never mutated.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub category: Category,
  pub prompt: String,
  pub choices: Vec<String>,
  pub correct_index: usize,
  pub explanation: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub credit: Option<String>,
}

impl Question {
  #[allow(dead_code)]
  pub fn correct_answer(&self) -> &str {
    &self.choices[self.correct_index]
  }
}

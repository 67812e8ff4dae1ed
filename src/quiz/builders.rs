//! One builder per question category. Each draws from a Fact Store pool and
//! returns `None` when that pool is empty.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use crate::domain::{Category, ConstellationFact, PlanetType, Season, SolarBodyFact};
use crate::facts::{same_planet, FactStore};
use crate::seeds::{
  planet_ref, INNER_LABEL, INNER_PLANETS, MOON_PHASES, MOON_PHASE_RULES, OUTER_LABEL, PLANETS, SUN_ANSWER,
  SUN_DISTRACTORS,
};
use crate::util::ordinal_label;

use super::distractors::pick_distractors;
use super::Draft;

const DISTRACTORS: usize = 3;

/// "오리온자리 (Orion)", or just the one name when both are equal.
fn constellation_label(c: &ConstellationFact) -> String {
  if c.name_local == c.name_canonical {
    c.name_local.clone()
  } else {
    format!("{} ({})", c.name_local, c.name_canonical)
  }
}

fn strings<'a>(it: impl IntoIterator<Item = &'a str>) -> Vec<String> {
  it.into_iter().map(str::to_string).collect()
}

pub fn season<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let c = store.season_pool().choose(rng)?;
  let correct = c.season.label();
  let distractors = Season::CANONICAL
    .iter()
    .filter(|s| **s != c.season)
    .map(|s| s.label().to_string())
    .collect();
  let name = constellation_label(c);
  Some(Draft {
    category: Category::Season,
    prompt: format!("In which season is {} best seen in the northern-hemisphere evening sky?", name),
    correct: correct.to_string(),
    distractors,
    explanation: format!("{} → {}", name, correct),
    image: None,
    credit: None,
  })
}

pub fn hemisphere<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let c = store.hemisphere_pool().choose(rng)?;
  let name = constellation_label(c);
  Some(Draft {
    category: Category::Hemisphere,
    prompt: format!("From which hemisphere is {} mainly seen?", name),
    correct: c.hemisphere.label().to_string(),
    distractors: vec![c.hemisphere.other().label().to_string()],
    explanation: format!("{} is a {}ern-hemisphere constellation.", name, c.hemisphere.label()),
    image: None,
    credit: None,
  })
}

pub fn star<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let c = store.star_pool().choose(rng)?;
  let star = c.notable_stars.choose(rng)?;
  let correct = &c.name_canonical;

  // A constellation listing the same star would be a second right answer.
  let eligible = store
    .constellations()
    .iter()
    .filter(|o| o.name_canonical != *correct && !o.notable_stars.contains(star));
  let (preferred, others): (Vec<&ConstellationFact>, Vec<&ConstellationFact>) =
    eligible.partition(|o| o.hemisphere == c.hemisphere);
  let distractors = pick_distractors(
    rng,
    correct,
    preferred.iter().map(|o| o.name_canonical.clone()).collect(),
    others.iter().map(|o| o.name_canonical.clone()).collect(),
    DISTRACTORS,
  );

  Some(Draft {
    category: Category::Star,
    prompt: format!("Which constellation does the star {} belong to?", star),
    correct: correct.clone(),
    distractors,
    explanation: format!("{} → {}", star, constellation_label(c)),
    image: None,
    credit: None,
  })
}

pub fn chart_image<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let a = store.charts().choose(rng)?;
  let correct = &a.display_name;
  let preferred = store.charts().iter().map(|o| o.display_name.clone()).collect();
  let others = store.constellations().iter().map(|o| o.name_canonical.clone()).collect();
  let distractors = pick_distractors(rng, correct, preferred, others, DISTRACTORS);
  Some(Draft {
    category: Category::Image,
    prompt: "Which constellation is shown in this chart?".into(),
    correct: correct.clone(),
    distractors,
    explanation: format!("Answer: {}", correct),
    image: Some(a.image_path.clone()),
    credit: Some(a.credit.clone()),
  })
}

pub fn planet_type<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let p = store.typed_planets().choose(rng)?;
  let t = p.planet_type?;
  let distractors = PlanetType::ALL
    .iter()
    .filter(|o| **o != t)
    .map(|o| o.label().to_string())
    .collect();
  Some(Draft {
    category: Category::PlanetType,
    prompt: format!("What kind of planet is {}?", p.name_local),
    correct: t.label().to_string(),
    distractors,
    explanation: format!("{} → {}", p.name_local, t.label()),
    image: None,
    credit: None,
  })
}

pub fn orbit_order<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let pool = store.planets_by_order();
  let p = pool.choose(rng)?;
  let n = p.orbit_order?;
  let correct = ordinal_label(n);
  let preferred = pool.iter().filter_map(|o| o.orbit_order).map(ordinal_label).collect();
  let others = (1..=8u8).map(ordinal_label).collect();
  let distractors = pick_distractors(rng, &correct, preferred, others, DISTRACTORS);
  Some(Draft {
    category: Category::OrbitOrder,
    prompt: format!("Counting outward from the Sun, where does {} orbit?", p.name_local),
    explanation: format!("{} is the {} from the Sun.", p.name_local, correct),
    correct,
    distractors,
    image: None,
    credit: None,
  })
}

/// Inner (inside the asteroid belt) or outer. Membership in `INNER_PLANETS`
/// decides; orbit order is used for planets known only by a local name.
fn is_inner(p: &SolarBodyFact) -> Option<bool> {
  if INNER_PLANETS.iter().any(|name| p.answers_to(name)) {
    return Some(true);
  }
  match (p.name_canonical.as_deref(), p.orbit_order) {
    (_, Some(n)) => Some(n <= 4),
    (Some(_), None) => Some(false),
    (None, None) => None,
  }
}

pub fn inner_outer<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let (p, inner) = store
    .planets()
    .iter()
    .filter_map(|p| is_inner(p).map(|inner| (p, inner)))
    .choose(rng)?;
  let (correct, other) = if inner { (INNER_LABEL, OUTER_LABEL) } else { (OUTER_LABEL, INNER_LABEL) };
  Some(Draft {
    category: Category::InnerOuter,
    prompt: format!("Is {} an inner or an outer planet?", p.name_local),
    correct: correct.to_string(),
    distractors: vec![other.to_string()],
    explanation: format!(
      "{} orbits {} the asteroid belt, so it is an {}.",
      p.name_local,
      if inner { "inside" } else { "beyond" },
      correct.to_lowercase()
    ),
    image: None,
    credit: None,
  })
}

pub fn moon<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let m = store.moons().choose(rng)?;
  let parent = m.parent_body.as_deref()?;
  let parent_fact = store.planets().iter().find(|p| same_planet(p, parent));
  let parent_type = parent_fact.and_then(|p| p.planet_type).or_else(|| planet_ref(parent).map(|r| r.planet_type));

  let candidates: Vec<&SolarBodyFact> = store.planets().iter().filter(|p| !same_planet(p, parent)).collect();
  let preferred = candidates
    .iter()
    .filter(|p| parent_type.is_some() && p.planet_type == parent_type)
    .map(|p| p.name_local.clone())
    .collect();
  let mut others: Vec<String> = candidates.iter().map(|p| p.name_local.clone()).collect();

  // Top up from the reference table in the answer's script, skipping the
  // parent and planets the data already names.
  let ascii = parent.is_ascii();
  let parent_ref = planet_ref(parent);
  for r in PLANETS {
    let is_parent = parent_ref.map_or(false, |p| std::ptr::eq(p, r));
    let listed = store.planets().iter().any(|p| same_planet(p, r.name_en));
    if !is_parent && !listed {
      let name = if ascii { r.name_en } else { r.name_ko };
      others.push(name.to_string());
    }
  }

  let distractors = pick_distractors(rng, parent, preferred, others, DISTRACTORS);
  Some(Draft {
    category: Category::Moon,
    prompt: format!("Which planet does {} orbit?", m.name_local),
    correct: parent.to_string(),
    distractors,
    explanation: format!("{} → {}", m.name_local, parent),
    image: None,
    credit: None,
  })
}

pub fn sun<R: Rng + ?Sized>(store: &FactStore, _rng: &mut R) -> Option<Draft> {
  let s = store.sun()?;
  let subject = if s.name_local.eq_ignore_ascii_case("Sun") {
    "the Sun".to_string()
  } else {
    format!("the Sun ({})", s.name_local)
  };
  let explanation = match &s.description {
    Some(d) => format!("The Sun is a star. {}", d),
    None => "The Sun is the only star in the Solar System.".to_string(),
  };
  Some(Draft {
    category: Category::Sun,
    prompt: format!("What kind of celestial body is {}?", subject),
    correct: SUN_ANSWER.to_string(),
    distractors: strings(SUN_DISTRACTORS),
    explanation,
    image: None,
    credit: None,
  })
}

fn path(x: &str, y: &str, z: &str) -> String {
  format!("{} → {} → {}", x, y, z)
}

pub fn eclipse<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let e = store.eclipses().choose(rng)?;
  let [a, b, c] = &e.body_order;
  let correct = path(a, b, c);
  let reversed = path(c, b, a);
  let permutations = vec![path(a, c, b), path(b, a, c), path(b, c, a), path(c, a, b)];
  let distractors = pick_distractors(rng, &correct, vec![reversed], permutations, DISTRACTORS);

  let mut explanation = format!("{}: {}", e.eclipse_type.label(), correct);
  if !e.description.is_empty() {
    explanation.push_str(&format!(" ({})", e.description));
  }
  Some(Draft {
    category: Category::Eclipse,
    prompt: format!("During a {}, in what order are the three bodies lined up?", e.eclipse_type.label()),
    correct,
    distractors,
    explanation,
    image: None,
    credit: None,
  })
}

pub fn photo<R: Rng + ?Sized>(store: &FactStore, rng: &mut R) -> Option<Draft> {
  let a = store.photos().choose(rng)?;
  let (same, rest): (Vec<_>, Vec<_>) = store
    .photos()
    .iter()
    .filter(|o| o.key != a.key)
    .partition(|o| o.kind == a.kind);
  let distractors = pick_distractors(
    rng,
    &a.display_name,
    same.iter().map(|o| o.display_name.clone()).collect(),
    rest.iter().map(|o| o.display_name.clone()).collect(),
    DISTRACTORS,
  );
  Some(Draft {
    category: Category::Photo,
    prompt: "Which body of the Solar System is shown in this picture?".into(),
    correct: a.display_name.clone(),
    distractors,
    explanation: match a.kind {
      Some(kind) => format!("Answer: {} ({})", a.display_name, kind.label().to_lowercase()),
      None => format!("Answer: {}", a.display_name),
    },
    image: Some(a.image_path.clone()),
    credit: Some(a.credit.clone()),
  })
}

/// Static: which Moon phase is not visible at a given time of night.
pub fn lunar<R: Rng + ?Sized>(_store: &FactStore, rng: &mut R) -> Option<Draft> {
  let (when, phase) = MOON_PHASE_RULES.choose(rng)?;
  Some(Draft {
    category: Category::Lunar,
    prompt: format!("Which phase of the Moon can you NOT see {}?", when),
    correct: phase.to_string(),
    distractors: MOON_PHASES.iter().filter(|p| *p != phase).map(|p| p.to_string()).collect(),
    explanation: format!("{} → {} is not visible", when, phase),
    image: None,
    credit: None,
  })
}

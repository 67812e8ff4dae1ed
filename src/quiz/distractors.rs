//! Distractor selection and choice-list assembly shared by every builder.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Category;
use crate::seeds::{filler_for, GENERIC_FILLER};

/// Pick up to `k` unique distractors, never equal to `correct`.
/// The `preferred` tier is exhausted (in random order) before `others` is touched.
/// Returns fewer than `k` when the candidates run out.
pub fn pick_distractors<R: Rng + ?Sized>(
  rng: &mut R,
  correct: &str,
  preferred: Vec<String>,
  others: Vec<String>,
  k: usize,
) -> Vec<String> {
  let mut picked: Vec<String> = Vec::with_capacity(k);
  for mut tier in [preferred, others] {
    tier.shuffle(rng);
    for cand in tier {
      if picked.len() == k {
        return picked;
      }
      if cand != correct && !cand.trim().is_empty() && !picked.contains(&cand) {
        picked.push(cand);
      }
    }
  }
  picked
}

/// Build the final choice list for a category: correct answer plus distractors,
/// trimmed or padded to the category's choice count, then shuffled.
/// Returns the choices and the index of `correct` in them.
pub fn assemble<R: Rng + ?Sized>(
  rng: &mut R,
  category: Category,
  correct: &str,
  distractors: Vec<String>,
) -> (Vec<String>, usize) {
  let target = category.choice_count();
  let mut choices: Vec<String> = vec![correct.to_string()];
  for d in distractors {
    if choices.len() == target {
      break;
    }
    if !choices.contains(&d) {
      choices.push(d);
    }
  }

  if choices.len() < target {
    let mut filler: Vec<&str> = filler_for(category).to_vec();
    filler.shuffle(rng);
    for f in filler.into_iter().chain(GENERIC_FILLER.iter().copied()) {
      if choices.len() == target {
        break;
      }
      if !choices.iter().any(|c| c.eq_ignore_ascii_case(f)) {
        choices.push(f.to_string());
      }
    }
  }

  choices.shuffle(rng);
  let idx = choices.iter().position(|c| c == correct).unwrap_or(0);
  (choices, idx)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn s(v: &[&str]) -> Vec<String> {
    v.iter().map(|x| x.to_string()).collect()
  }

  #[test]
  fn preferred_tier_goes_first() {
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let out = pick_distractors(&mut rng, "Jupiter", s(&["Saturn", "Jupiter"]), s(&["Mars", "Venus", "Earth"]), 3);
      assert_eq!(out.len(), 3);
      assert_eq!(out[0], "Saturn");
      assert!(!out.contains(&"Jupiter".to_string()));
    }
  }

  #[test]
  fn duplicates_and_correct_are_excluded() {
    let mut rng = StdRng::seed_from_u64(7);
    let out = pick_distractors(&mut rng, "A", s(&["B", "B", "A", ""]), s(&["B", "C"]), 3);
    let mut sorted = out.clone();
    sorted.sort();
    assert_eq!(sorted, s(&["B", "C"]));
  }

  #[test]
  fn small_pools_return_what_exists() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(pick_distractors(&mut rng, "A", vec![], s(&["B"]), 3), s(&["B"]));
    assert!(pick_distractors(&mut rng, "A", vec![], vec![], 3).is_empty());
  }

  #[test]
  fn assemble_pads_with_category_filler() {
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (choices, idx) = assemble(&mut rng, Category::PlanetType, "Gas giant", s(&["Ice giant"]));
      assert_eq!(choices.len(), 4);
      assert_eq!(choices[idx], "Gas giant");
      assert!(choices.contains(&"Ice giant".to_string()));
      let mut dedup = choices.clone();
      dedup.sort();
      dedup.dedup();
      assert_eq!(dedup.len(), 4);
    }
  }

  #[test]
  fn assemble_falls_back_to_generic_filler() {
    let mut rng = StdRng::seed_from_u64(3);
    let (choices, idx) = assemble(&mut rng, Category::Star, "Orion", vec![]);
    assert_eq!(choices.len(), 4);
    assert_eq!(choices[idx], "Orion");
  }

  #[test]
  fn hemisphere_is_binary() {
    let mut rng = StdRng::seed_from_u64(9);
    let (choices, idx) = assemble(&mut rng, Category::Hemisphere, "North", s(&["South", "East"]));
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[idx], "North");
    assert!(choices.contains(&"South".to_string()));
  }

  #[test]
  fn position_is_not_fixed() {
    let mut seen = [false; 4];
    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (_, idx) = assemble(&mut rng, Category::Season, "Winter", s(&["Spring", "Summer", "Autumn"]));
      seen[idx] = true;
    }
    assert!(seen.iter().all(|s| *s));
  }
}

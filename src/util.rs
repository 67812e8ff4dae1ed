//! Small utility helpers used across modules.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::seeds::greek_letter_name;

/// Lowercase, drop parenthesized notes, turn separators into single spaces.
/// Used to compare free-form labels coming from the source catalogs.
pub fn fold_label(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut depth = 0usize;
  for ch in s.chars() {
    match ch {
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      _ if depth > 0 => {}
      '_' | '-' | '.' | ',' => out.push(' '),
      _ => out.extend(ch.to_lowercase()),
    }
  }
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_accent(ch: char) -> char {
  match ch {
    'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
    'ç' | 'č' => 'c',
    'è' | 'é' | 'ê' | 'ë' | 'ē' => 'e',
    'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
    'ñ' => 'n',
    'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' => 'o',
    'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
    'ý' | 'ÿ' => 'y',
    'š' => 's',
    'ž' => 'z',
    other => other,
  }
}

/// Lookup key for a star name: accents stripped, lowercase, parenthesized notes
/// and `.`/`,` dropped, Greek letters spelled out.
/// "Mira (ο Ceti)" -> "mira", "α Ori" -> "alpha ori".
pub fn star_key(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut depth = 0usize;
  for ch in name.chars().flat_map(char::to_lowercase).map(strip_accent) {
    match ch {
      '(' => depth += 1,
      ')' => {
        depth = depth.saturating_sub(1);
        out.push(' ');
      }
      _ if depth > 0 => {}
      '.' | ',' => out.push(' '),
      _ => match greek_letter_name(ch) {
        Some(spelled) => out.push_str(spelled),
        None => out.push(ch),
      },
    }
  }
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// File-name slug for an English name: lowercase, spaces to `_`, `ö` to `o`.
/// "Boötes" -> "bootes", "Canis Major" -> "canis_major".
pub fn slugify(name: &str) -> String {
  name
    .trim()
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("_")
    .replace('ö', "o")
}

/// "1st planet", "2nd planet", ...
pub fn ordinal_label(n: u8) -> String {
  let suffix = match (n % 10, n % 100) {
    (_, 11..=13) => "th",
    (1, _) => "st",
    (2, _) => "nd",
    (3, _) => "rd",
    _ => "th",
  };
  format!("{}{} planet", n, suffix)
}

pub fn unix_millis() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or(0)
}

/// Log-safe truncation for user-provided strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fold_label_handles_separators_and_notes() {
    assert_eq!(fold_label("Year-Round"), "year round");
    assert_eq!(fold_label("  Spring (evening) "), "spring");
    assert_eq!(fold_label("year_round"), "year round");
  }

  #[test]
  fn slugify_matches_chart_file_names() {
    assert_eq!(slugify("Boötes"), "bootes");
    assert_eq!(slugify("Canis  Major"), "canis_major");
  }

  #[test]
  fn star_keys_are_normalized() {
    assert_eq!(star_key("Betelgeuse"), "betelgeuse");
    assert_eq!(star_key("  Mira (ο Ceti) "), "mira");
    assert_eq!(star_key("α Ori."), "alpha ori");
    assert_eq!(star_key("Alnaïr"), "alnair");
  }

  #[test]
  fn ordinal_labels() {
    assert_eq!(ordinal_label(1), "1st planet");
    assert_eq!(ordinal_label(2), "2nd planet");
    assert_eq!(ordinal_label(3), "3rd planet");
    assert_eq!(ordinal_label(4), "4th planet");
    assert_eq!(ordinal_label(11), "11th planet");
    assert_eq!(ordinal_label(12), "12th planet");
  }

  #[test]
  fn trunc_counts_chars_not_bytes() {
    assert_eq!(trunc_for_log("게자리", 5), "게자리");
    assert!(trunc_for_log("abcdefgh", 3).starts_with("abc…"));
  }
}

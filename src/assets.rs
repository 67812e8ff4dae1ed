//! Image asset resolution: "is there an image for this name?".
//!
//! The quiz core only sees the `AssetResolver` trait. The directory resolver
//! scans an image folder once at startup and matches files by name slug.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::util::slugify;

const IMAGE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "webp"];

/// Public URL of a resolved image plus its attribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRef {
  pub url: String,
  pub credit: String,
}

pub trait AssetResolver: Send + Sync {
  fn resolve(&self, name: &str) -> Option<AssetRef>;
}

/// Resolver that never finds anything (no image directory configured).
#[allow(dead_code)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
  fn resolve(&self, _name: &str) -> Option<AssetRef> { None }
}

/// Fixed name -> asset table, keyed by slug.
#[allow(dead_code)]
#[derive(Default)]
pub struct MapAssetResolver {
  by_slug: HashMap<String, AssetRef>,
}

#[allow(dead_code)]
impl MapAssetResolver {
  pub fn with(mut self, name: &str, url: &str, credit: &str) -> Self {
    self.by_slug.insert(slugify(name), AssetRef { url: url.into(), credit: credit.into() });
    self
  }
}

impl AssetResolver for MapAssetResolver {
  fn resolve(&self, name: &str) -> Option<AssetRef> {
    slug_candidates(name).iter().find_map(|s| self.by_slug.get(s).cloned())
  }
}

/// Slugs to try for a name, most specific first.
/// Serpens is often shipped as separate Caput/Cauda charts.
fn slug_candidates(name: &str) -> Vec<String> {
  let slug = slugify(name);
  let mut out = vec![slug.clone()];
  let oe = name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_").replace('ö', "oe");
  if oe != slug {
    out.push(oe);
  }
  if slug == "serpens" {
    out.push("serpens_caput".into());
    out.push("serpens_cauda".into());
  }
  out
}

/// Indexes the image files of one directory by file stem.
pub struct DirAssetResolver {
  url_prefix: String,
  credit: String,
  files: HashMap<String, String>,
}

impl DirAssetResolver {
  /// Scan `dir` once. A missing or unreadable directory yields an empty index.
  pub fn scan(dir: impl AsRef<Path>, url_prefix: &str, credit: &str) -> Self {
    let dir = dir.as_ref();
    let mut files = HashMap::new();
    match std::fs::read_dir(dir) {
      Ok(entries) => {
        for entry in entries.flatten() {
          let path = entry.path();
          let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
          let is_image = ext.as_deref().map_or(false, |e| IMAGE_EXTENSIONS.contains(&e));
          if !is_image {
            continue;
          }
          if let (Some(stem), Some(file)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
          ) {
            files.entry(stem.to_lowercase()).or_insert_with(|| file.to_string());
          }
        }
        info!(target: "astro_quiz", dir = %dir.display(), images = files.len(), "Indexed image directory");
      }
      Err(e) => {
        warn!(target: "astro_quiz", dir = %dir.display(), error = %e, "Image directory unavailable; image questions disabled for it");
      }
    }
    Self {
      url_prefix: url_prefix.trim_end_matches('/').to_string(),
      credit: credit.to_string(),
      files,
    }
  }

  #[allow(dead_code)]
  pub fn len(&self) -> usize { self.files.len() }
}

impl AssetResolver for DirAssetResolver {
  fn resolve(&self, name: &str) -> Option<AssetRef> {
    let file = slug_candidates(name).iter().find_map(|s| self.files.get(s))?;
    debug!(target: "astro_quiz", %name, %file, "Resolved image");
    Some(AssetRef {
      url: format!("{}/{}", self.url_prefix, file),
      credit: self.credit.clone(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn dir_resolver_matches_by_slug() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("canis_major.svg"), "<svg/>").unwrap();
    fs::write(dir.path().join("bootes.svg"), "<svg/>").unwrap();
    fs::write(dir.path().join("serpens_cauda.svg"), "<svg/>").unwrap();
    fs::write(dir.path().join("README.txt"), "not an image").unwrap();

    let r = DirAssetResolver::scan(dir.path(), "/public/images/constellations_iau/", "IAU");
    assert_eq!(r.len(), 3);

    let cma = r.resolve("Canis Major").expect("canis major");
    assert_eq!(cma.url, "/public/images/constellations_iau/canis_major.svg");
    assert_eq!(cma.credit, "IAU");
    assert!(r.resolve("Boötes").is_some());
    assert_eq!(r.resolve("Serpens").map(|a| a.url), Some("/public/images/constellations_iau/serpens_cauda.svg".into()));
    assert!(r.resolve("Orion").is_none());
    assert!(r.resolve("README").is_none());
  }

  #[test]
  fn dir_resolver_tolerates_missing_directory() {
    let r = DirAssetResolver::scan("/definitely/not/here", "/x", "none");
    assert_eq!(r.len(), 0);
    assert!(r.resolve("Orion").is_none());
  }

  #[test]
  fn oe_spelling_is_tried() {
    let r = MapAssetResolver::default().with("booetes", "/b.svg", "c");
    assert!(r.resolve("Boötes").is_some());
  }
}

//! Video catalog data model and sources.
//!
//! The seed catalog is embedded from `catalog.ron` at compile time and parsed
//! once on first access via `LazyLock`. A JSON file can substitute for the
//! seed data through the same [`CatalogSource`] seam, so the filter and
//! navigation contracts never see where records come from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::CatalogError;

/// Valid level range for catalog entries (the menu's level dropdown domain).
pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 5;

/// The fixed tag vocabulary offered by the menu's tag dropdown.
/// Records may carry tags outside this list; these are just the preset choices.
pub const TAG_OPTIONS: [&str; 5] = ["动画", "互动", "教育", "娱乐", "经典"];

// --- Category ---

/// Content category, matching the original menu's type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Song,
  Story,
  English,
  Math,
  Science,
}

impl Category {
  pub const ALL: [Category; 5] =
    [Category::Song, Category::Story, Category::English, Category::Math, Category::Science];

  /// Display label as shown on the menu chips (Chinese, matching the source app).
  pub fn label(self) -> &'static str {
    match self {
      Category::Song => "儿歌",
      Category::Story => "故事",
      Category::English => "英语",
      Category::Math => "数学",
      Category::Science => "科学",
    }
  }

  /// ASCII name used in serialized data and CLI flags.
  pub fn name(self) -> &'static str {
    match self {
      Category::Song => "song",
      Category::Story => "story",
      Category::English => "english",
      Category::Math => "math",
      Category::Science => "science",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Category {
  type Err = String;

  /// Accepts either the ASCII name (`story`) or the display label (`故事`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim();
    Category::ALL
      .iter()
      .copied()
      .find(|c| c.name().eq_ignore_ascii_case(needle) || c.label() == needle)
      .ok_or_else(|| format!("unknown category '{}' (expected one of: song, story, english, math, science)", s))
  }
}

// --- VideoRecord ---

/// One catalog entry. Created at catalog load, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
  /// Unique, stable identifier across the catalog.
  pub id: String,
  pub title: String,
  /// Difficulty level, 1–5 inclusive (checked by [`validate_catalog`]).
  pub level: u8,
  pub category: Category,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub description: String,
}

// --- Validation ---

/// Check catalog invariants: unique ids and level within [LEVEL_MIN, LEVEL_MAX].
/// Runs at the load boundary so everything downstream can trust the records.
pub fn validate_catalog(records: &[VideoRecord]) -> Result<(), CatalogError> {
  let mut seen = HashSet::new();
  for record in records {
    if !seen.insert(record.id.as_str()) {
      return Err(CatalogError::InvalidRecord {
        id: record.id.clone(),
        reason: "duplicate id".to_string(),
      });
    }
    if record.level < LEVEL_MIN || record.level > LEVEL_MAX {
      return Err(CatalogError::InvalidRecord {
        id: record.id.clone(),
        reason: format!("level {} outside {}..={}", record.level, LEVEL_MIN, LEVEL_MAX),
      });
    }
  }
  Ok(())
}

// --- Sources ---

/// Supplies the full catalog in insertion order.
pub trait CatalogSource {
  fn load(&self) -> Result<Vec<VideoRecord>, CatalogError>;
}

static SEED: LazyLock<Vec<VideoRecord>> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this
  // surfaces on first access during development, never from user data.
  ron::from_str(include_str!("../catalog.ron")).expect("catalog.ron must be valid RON (embedded at compile time)")
});

/// The built-in seed catalog embedded from `catalog.ron`.
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
  fn load(&self) -> Result<Vec<VideoRecord>, CatalogError> {
    let records = SEED.clone();
    validate_catalog(&records)?;
    debug!(count = records.len(), "loaded embedded catalog");
    Ok(records)
  }
}

/// A user-supplied JSON catalog file. Any I/O or parse failure surfaces as
/// [`CatalogError::DataUnavailable`] so the menu can show an explicit error
/// state instead of silently falling back to stale data.
pub struct JsonCatalog {
  path: PathBuf,
}

impl JsonCatalog {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl CatalogSource for JsonCatalog {
  fn load(&self) -> Result<Vec<VideoRecord>, CatalogError> {
    let content = std::fs::read_to_string(&self.path)
      .map_err(|e| CatalogError::DataUnavailable(format!("{}: {}", self.path.display(), e)))?;
    let records: Vec<VideoRecord> = serde_json::from_str(&content)
      .map_err(|e| CatalogError::DataUnavailable(format!("{}: {}", self.path.display(), e)))?;
    validate_catalog(&records)?;
    debug!(count = records.len(), path = %self.path.display(), "loaded catalog file");
    Ok(records)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_record(id: &str, level: u8) -> VideoRecord {
    VideoRecord {
      id: id.to_string(),
      title: format!("title {}", id),
      level,
      category: Category::Song,
      tags: Vec::new(),
      description: String::new(),
    }
  }

  // --- embedded seed ---

  #[test]
  fn embedded_catalog_has_eight_records_in_order() {
    let records = EmbeddedCatalog.load().unwrap();
    assert_eq!(records.len(), 8);
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["video1", "video2", "video3", "video4", "video5", "video6", "video7", "video8"]);
  }

  #[test]
  fn embedded_catalog_passes_validation() {
    let records = EmbeddedCatalog.load().unwrap();
    assert!(validate_catalog(&records).is_ok());
  }

  #[test]
  fn embedded_catalog_matches_source_app_sample() {
    let records = EmbeddedCatalog.load().unwrap();
    let video2 = records.iter().find(|r| r.id == "video2").unwrap();
    assert_eq!(video2.title, "三只小猪的故事");
    assert_eq!(video2.level, 2);
    assert_eq!(video2.category, Category::Story);
    assert_eq!(video2.tags, ["教育", "互动"]);
  }

  // --- validate_catalog ---

  #[test]
  fn validate_rejects_duplicate_ids() {
    let records = vec![make_record("a", 1), make_record("a", 2)];
    let err = validate_catalog(&records).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { ref id, .. } if id == "a"));
  }

  #[test]
  fn validate_rejects_out_of_range_levels() {
    assert!(validate_catalog(&[make_record("a", 0)]).is_err());
    assert!(validate_catalog(&[make_record("a", 6)]).is_err());
    assert!(validate_catalog(&[make_record("a", 1), make_record("b", 5)]).is_ok());
  }

  #[test]
  fn validate_accepts_empty_catalog() {
    assert!(validate_catalog(&[]).is_ok());
  }

  // --- Category parsing ---

  #[test]
  fn category_from_ascii_name() {
    assert_eq!("story".parse::<Category>().unwrap(), Category::Story);
    assert_eq!("SCIENCE".parse::<Category>().unwrap(), Category::Science);
  }

  #[test]
  fn category_from_display_label() {
    assert_eq!("儿歌".parse::<Category>().unwrap(), Category::Song);
    assert_eq!("数学".parse::<Category>().unwrap(), Category::Math);
  }

  #[test]
  fn category_from_unknown_string_fails() {
    assert!("cartoons".parse::<Category>().is_err());
  }

  #[test]
  fn category_display_uses_label() {
    assert_eq!(Category::English.to_string(), "英语");
  }

  // --- JsonCatalog ---

  #[test]
  fn json_catalog_missing_file_is_data_unavailable() {
    let source = JsonCatalog::new("/nonexistent/kidvid-catalog.json");
    let err = source.load().unwrap_err();
    assert!(matches!(err, CatalogError::DataUnavailable(_)));
  }

  #[test]
  fn json_catalog_round_trip() {
    let path = std::env::temp_dir().join(format!("kidvid-catalog-test-{}.json", std::process::id()));
    let records = vec![make_record("a", 1), make_record("b", 3)];
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    let loaded = JsonCatalog::new(&path).load().unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, records);
  }

  #[test]
  fn json_catalog_malformed_file_is_data_unavailable() {
    let path = std::env::temp_dir().join(format!("kidvid-catalog-bad-{}.json", std::process::id()));
    std::fs::write(&path, "not json").unwrap();
    let err = JsonCatalog::new(&path).load().unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, CatalogError::DataUnavailable(_)));
  }
}

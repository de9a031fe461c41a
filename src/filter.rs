//! Menu filtering: conjunctive level/category/tag/search predicates.
//!
//! Pure functions over the loaded catalog. The presentation layer owns a
//! [`FilterCriteria`] value, mutates one field per user interaction, and
//! re-applies it on every change; nothing here carries state.

use crate::catalog::{Category, VideoRecord};

/// The active combination of menu constraints. `Default` matches everything,
/// mirroring the dropdowns' "全部…" options and an empty search bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
  /// Level dropdown; `None` = 全部等级.
  pub level: Option<u8>,
  /// Type dropdown; `None` = 全部类型.
  pub category: Option<Category>,
  /// Tag dropdown; `None` = 全部标签. Matches set membership, not substring.
  pub tag: Option<String>,
  /// Search bar text; empty = no constraint.
  pub search: String,
}

impl FilterCriteria {
  /// True when no field constrains anything.
  pub fn is_unrestricted(&self) -> bool {
    self.level.is_none() && self.category.is_none() && self.tag.is_none() && self.search.is_empty()
  }

  /// True when `record` passes all four predicates. Unset criteria match all.
  /// The search text matches case-insensitively against title or description.
  pub fn matches(&self, record: &VideoRecord) -> bool {
    let level_match = self.level.is_none_or(|l| l == record.level);
    let category_match = self.category.is_none_or(|c| c == record.category);
    let tag_match = self.tag.as_deref().is_none_or(|t| record.tags.iter().any(|rt| rt == t));
    let search_match = self.search.is_empty() || {
      let needle = self.search.to_lowercase();
      record.title.to_lowercase().contains(&needle) || record.description.to_lowercase().contains(&needle)
    };
    level_match && category_match && tag_match && search_match
  }
}

/// Apply `criteria` to `catalog`, preserving relative order.
/// Total over well-formed inputs: an empty catalog or criteria matching
/// nothing yield an empty result, never an error.
pub fn apply(catalog: &[VideoRecord], criteria: &FilterCriteria) -> Vec<VideoRecord> {
  catalog.iter().filter(|record| criteria.matches(record)).cloned().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{CatalogSource, EmbeddedCatalog};

  fn seed() -> Vec<VideoRecord> {
    EmbeddedCatalog.load().unwrap()
  }

  fn ids(records: &[VideoRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
  }

  // --- unrestricted criteria ---

  #[test]
  fn default_criteria_returns_full_catalog_in_order() {
    let catalog = seed();
    let criteria = FilterCriteria::default();
    assert!(criteria.is_unrestricted());
    assert_eq!(apply(&catalog, &criteria), catalog);
  }

  #[test]
  fn empty_catalog_yields_empty_result() {
    assert!(apply(&[], &FilterCriteria::default()).is_empty());
  }

  // --- individual predicates ---

  #[test]
  fn level_filter_selects_all_level_one_entries() {
    let catalog = seed();
    let criteria = FilterCriteria { level: Some(1), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video1", "video3", "video4", "video7"]);
  }

  #[test]
  fn category_filter_selects_stories() {
    let catalog = seed();
    let criteria = FilterCriteria { category: Some(Category::Story), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video2", "video6"]);
  }

  #[test]
  fn tag_filter_is_set_membership_not_substring() {
    let catalog = seed();
    let criteria = FilterCriteria { tag: Some("经典".to_string()), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video1", "video6"]);

    // A tag fragment must not match.
    let criteria = FilterCriteria { tag: Some("经".to_string()), ..Default::default() };
    assert!(apply(&catalog, &criteria).is_empty());
  }

  #[test]
  fn search_matches_title() {
    let catalog = seed();
    let criteria = FilterCriteria { search: "三只小猪".to_string(), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video2"]);
  }

  #[test]
  fn search_matches_description() {
    let catalog = seed();
    // "格林童话" only appears in video6's description, not its title.
    let criteria = FilterCriteria { search: "格林童话".to_string(), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video6"]);
  }

  #[test]
  fn search_is_case_insensitive() {
    let catalog = seed();
    let criteria = FilterCriteria { search: "abc".to_string(), ..Default::default() };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video3"]); // "ABC字母歌"
  }

  // --- conjunction ---

  #[test]
  fn combined_category_and_tag_filters() {
    let catalog = seed();
    let criteria = FilterCriteria {
      category: Some(Category::Story),
      tag: Some("经典".to_string()),
      ..Default::default()
    };
    assert_eq!(ids(&apply(&catalog, &criteria)), ["video6"]);
  }

  #[test]
  fn every_result_satisfies_all_predicates() {
    let catalog = seed();
    let criteria = FilterCriteria {
      level: Some(1),
      category: Some(Category::Song),
      tag: Some("互动".to_string()),
      search: "颜色".to_string(),
    };
    let results = apply(&catalog, &criteria);
    assert_eq!(ids(&results), ["video7"]);
    for record in &results {
      assert!(criteria.matches(record));
    }
  }

  #[test]
  fn unmatched_criteria_yield_empty_not_error() {
    let catalog = seed();
    let criteria = FilterCriteria { level: Some(5), ..Default::default() };
    assert!(apply(&catalog, &criteria).is_empty());
  }

  // --- algebraic properties ---

  #[test]
  fn filter_is_idempotent() {
    let catalog = seed();
    let criteria = FilterCriteria { level: Some(1), search: "歌".to_string(), ..Default::default() };
    let once = apply(&catalog, &criteria);
    let twice = apply(&once, &criteria);
    assert_eq!(once, twice);
  }

  #[test]
  fn filter_preserves_relative_order() {
    let catalog = seed();
    let criteria = FilterCriteria { tag: Some("教育".to_string()), ..Default::default() };
    let results = apply(&catalog, &criteria);
    let positions: Vec<usize> =
      results.iter().map(|r| catalog.iter().position(|c| c.id == r.id).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
  }
}

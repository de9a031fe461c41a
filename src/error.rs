use thiserror::Error;

/// Failures at the catalog and resume-record boundaries.
///
/// Filtering and navigation resolution are total and never produce these;
/// they only arise where external data enters the component.
#[derive(Debug, Error)]
pub enum CatalogError {
  /// The catalog source could not produce any data (missing file, bad JSON, …).
  /// Presentation must show an explicit error state, never stale data.
  #[error("catalog unavailable: {0}")]
  DataUnavailable(String),

  /// A record referenced a video id that is not in the catalog.
  #[error("video id '{0}' not found in catalog")]
  ReferenceNotFound(String),

  /// A loaded record violated a catalog invariant.
  #[error("invalid catalog record '{id}': {reason}")]
  InvalidRecord { id: String, reason: String },
}

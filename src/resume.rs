//! The "continue watching" record shown above the catalog list.
//!
//! Persistence lives behind [`ResumeSource`]; the built-in sample mirrors the
//! original app's placeholder, and [`FileResumeStore`] keeps one record as
//! JSON in the platform data dir.

use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::catalog::VideoRecord;
use crate::error::CatalogError;

/// Resume state for one video. `video_id` is a foreign reference into the
/// catalog with no enforced integrity at this layer — callers validate with
/// [`LastPlayedRecord::validate_against`] where the record is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPlayedRecord {
  pub video_id: String,
  /// Denormalized title copy, shown without a catalog lookup.
  pub title: String,
  /// Playback progress as loaded; not guaranteed to be within [0, 1].
  pub progress: f32,
  /// Unix timestamp of the save; zero for the built-in sample.
  #[serde(default)]
  pub saved_at: i64,
}

impl LastPlayedRecord {
  /// Progress clamped to [0, 1]. The raw field stays as loaded, so consumers
  /// that render a progress bar should go through this.
  pub fn clamped_progress(&self) -> f32 {
    self.progress.clamp(0.0, 1.0)
  }

  /// Referential check against the catalog this record points into.
  pub fn validate_against(&self, catalog: &[VideoRecord]) -> Result<(), CatalogError> {
    if catalog.iter().any(|record| record.id == self.video_id) {
      Ok(())
    } else {
      Err(CatalogError::ReferenceNotFound(self.video_id.clone()))
    }
  }
}

/// Supplies the single resume record, or none when nothing has been played.
pub trait ResumeSource {
  fn last_played(&self) -> Option<LastPlayedRecord>;
}

/// The sample resume entry the original app ships with.
pub struct SampleResume;

impl ResumeSource for SampleResume {
  fn last_played(&self) -> Option<LastPlayedRecord> {
    Some(LastPlayedRecord {
      video_id: "video2".to_string(),
      title: "三只小猪的故事".to_string(),
      progress: 0.65,
      saved_at: 0,
    })
  }
}

/// File-backed resume store: one JSON record in the platform data dir.
pub struct FileResumeStore {
  path: PathBuf,
}

impl FileResumeStore {
  /// Store at the default platform location, or `None` when no home
  /// directory can be determined.
  pub fn open() -> Option<Self> {
    let proj_dirs = ProjectDirs::from("", "", "kidvid")?;
    Some(Self { path: proj_dirs.data_dir().join("last_played.json") })
  }

  /// Store at an explicit path (tests, unusual setups).
  pub fn at(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Record `video` as the last played entry with the given progress.
  /// Best-effort: a failed write is logged, not propagated — losing resume
  /// state must never break playback.
  pub fn record_played(&self, video: &VideoRecord, progress: f32) {
    let record = LastPlayedRecord {
      video_id: video.id.clone(),
      title: video.title.clone(),
      progress,
      saved_at: Utc::now().timestamp(),
    };
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
      && let Err(e) = std::fs::create_dir_all(parent)
    {
      warn!(err = %e, path = %self.path.display(), "resume: failed to create data dir");
      return;
    }
    match serde_json::to_string_pretty(&record) {
      Ok(content) => {
        if let Err(e) = std::fs::write(&self.path, content) {
          warn!(err = %e, path = %self.path.display(), "resume: failed to write record");
        } else {
          debug!(video_id = %record.video_id, "resume: recorded last played");
        }
      }
      Err(e) => warn!(err = %e, "resume: failed to serialize record"),
    }
  }
}

impl ResumeSource for FileResumeStore {
  fn last_played(&self) -> Option<LastPlayedRecord> {
    let content = std::fs::read_to_string(&self.path).ok()?;
    match serde_json::from_str(&content) {
      Ok(record) => Some(record),
      Err(e) => {
        warn!(err = %e, path = %self.path.display(), "resume: ignoring malformed record");
        None
      }
    }
  }
}

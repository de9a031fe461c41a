//! Selection resolution and the route contract toward the player surface.
//!
//! The player surface is an opaque external runtime; the only thing crossing
//! the boundary is a path-style route with exactly two query keys. Keep the
//! key names and order stable — the player parses this string as-is.

use crate::catalog::VideoRecord;
use crate::resume::LastPlayedRecord;

/// Level reported when resuming. The resume record carries no level field,
/// so the hand-off always reports level 1 even when the catalog entry says
/// otherwise. Kept for parity with the shipped app; see DESIGN.md before
/// changing this.
pub const DEFAULT_RESUME_LEVEL: u8 = 1;

/// The minimal parameter set handed to the player surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
  pub video_id: String,
  pub level: u8,
}

impl NavigationTarget {
  /// The wire format consumed by the player surface: `/player?videoId=<id>&level=<n>`.
  pub fn route(&self) -> String {
    format!("/player?videoId={}&level={}", self.video_id, self.level)
  }
}

/// A user selection on the video menu: a catalog entry, or the
/// "continue watching" card above the list.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
  Catalog(&'a VideoRecord),
  Resume(&'a LastPlayedRecord),
}

/// Translate a selection into the outbound navigation target.
/// Total: never fails for any well-formed selection.
pub fn resolve(selection: Selection<'_>) -> NavigationTarget {
  match selection {
    Selection::Catalog(record) => NavigationTarget { video_id: record.id.clone(), level: record.level },
    Selection::Resume(record) => {
      NavigationTarget { video_id: record.video_id.clone(), level: DEFAULT_RESUME_LEVEL }
    }
  }
}

//! Home screen cards and where they lead.

use std::fmt;

/// The four cards on the app home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCard {
  WatchVideo,
  Listen,
  PlayGame,
  AiInteraction,
}

/// Where a home card navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
  /// The filterable video menu.
  VideoMenu,
  /// Placeholder screen; feature not built yet.
  ComingSoon,
}

impl HomeCard {
  pub const ALL: [HomeCard; 4] = [HomeCard::WatchVideo, HomeCard::Listen, HomeCard::PlayGame, HomeCard::AiInteraction];

  /// Display label, matching the source app's cards.
  pub fn label(self) -> &'static str {
    match self {
      HomeCard::WatchVideo => "看视频",
      HomeCard::Listen => "听音频",
      HomeCard::PlayGame => "玩游戏",
      HomeCard::AiInteraction => "AI交互",
    }
  }

  /// Only Watch Video leads anywhere today; the rest land on the placeholder.
  pub fn destination(self) -> Destination {
    match self {
      HomeCard::WatchVideo => Destination::VideoMenu,
      _ => Destination::ComingSoon,
    }
  }
}

impl fmt::Display for HomeCard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

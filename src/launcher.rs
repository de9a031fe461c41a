//! Outbound navigation boundary: hand the route to the external player surface.
//!
//! The player is launched as a detached process with the route string as its
//! final argument. Exactly one launch per selection; there is no retry or
//! status tracking — once the route is handed over, the player owns playback.

use anyhow::{Context, Result, anyhow};
use std::process::{Command, Stdio};
use tracing::info;

use crate::navigator::NavigationTarget;

/// Spawn `command` (whitespace-split program + leading args) with the
/// resolved route appended. `command` comes from user prefs.
pub fn launch(command: &str, target: &NavigationTarget) -> Result<()> {
  let route = target.route();
  let mut parts = command.split_whitespace();
  let program = parts.next().context("player command is empty")?;

  info!(program = %program, route = %route, "launching player surface");

  let mut cmd = Command::new(program);
  cmd.args(parts).arg(&route);
  cmd.stdin(Stdio::null());
  cmd.stdout(Stdio::null());
  cmd.stderr(Stdio::null());

  cmd.spawn().map_err(|e| {
    if e.kind() == std::io::ErrorKind::NotFound {
      anyhow!("player command '{}' not found. Set player_command in prefs.toml to an installed program", program)
    } else {
      anyhow!(e).context(format!("failed to spawn player command '{}'", program))
    }
  })?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn target() -> NavigationTarget {
    NavigationTarget { video_id: "video1".to_string(), level: 1 }
  }

  #[test]
  fn empty_command_is_an_error() {
    assert!(launch("", &target()).is_err());
    assert!(launch("   ", &target()).is_err());
  }

  #[test]
  fn missing_program_reports_not_found() {
    let err = launch("kidvid-player-that-does-not-exist", &target()).unwrap_err();
    assert!(err.to_string().contains("not found"));
  }
}

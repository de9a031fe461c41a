mod catalog;
mod config;
mod error;
mod filter;
mod home;
mod launcher;
mod navigator;
mod resume;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog::{CatalogSource, Category, EmbeddedCatalog, JsonCatalog, TAG_OPTIONS, VideoRecord};
use config::Config;
use error::CatalogError;
use filter::FilterCriteria;
use home::{Destination, HomeCard};
use navigator::{NavigationTarget, Selection, resolve};
use resume::{FileResumeStore, LastPlayedRecord, ResumeSource, SampleResume};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// JSON catalog file overriding the embedded seed data.
  #[arg(long, global = true, value_name = "FILE")]
  catalog: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show the home screen cards.
  Home,
  /// List catalog entries, optionally narrowed by the menu filters.
  List {
    #[arg(short, long, help = level_help(), value_parser = level_parser())]
    level: Option<u8>,
    /// Category filter: song/story/english/math/science or the Chinese label.
    #[arg(short, long)]
    category: Option<Category>,
    #[arg(short, long, help = tag_help())]
    tag: Option<String>,
    /// Search text, matched case-insensitively against title and description.
    #[arg(short, long, default_value = "")]
    search: String,
  },
  /// Resolve a catalog entry and hand it to the player surface.
  Play {
    video_id: String,
    /// Print the route instead of launching the configured player.
    #[arg(long)]
    print_route: bool,
  },
  /// Resume the last played video.
  Resume {
    /// Print the route instead of launching the configured player.
    #[arg(long)]
    print_route: bool,
  },
  /// Show or update stored preferences.
  Config {
    /// Set the external player command handed the route string.
    #[arg(long, value_name = "CMD")]
    player_command: Option<String>,
    /// Set the default JSON catalog file.
    #[arg(long, value_name = "FILE")]
    catalog_path: Option<String>,
  },
  /// Generate shell completions.
  Completions { shell: Shell },
}

/// Keep the CLI's level domain tied to the catalog invariant.
fn level_parser() -> clap::builder::RangedI64ValueParser<u8> {
  clap::value_parser!(u8).range(catalog::LEVEL_MIN as i64..=catalog::LEVEL_MAX as i64)
}

fn level_help() -> String {
  format!("Level filter, {}-{} (unset = 全部等级)", catalog::LEVEL_MIN, catalog::LEVEL_MAX)
}

fn tag_help() -> String {
  format!("Tag filter, matched against a record's tag set (presets: {}; unset = 全部标签)", TAG_OPTIONS.join("、"))
}

// --- Main ---

fn main() -> Result<()> {
  let args = Args::parse();
  let _guard = init_tracing();
  let config = Config::load();

  match args.command {
    Command::Home => cmd_home(),
    Command::List { level, category, tag, search } => {
      let criteria = FilterCriteria { level, category, tag, search };
      cmd_list(catalog_source(&args.catalog, &config).as_ref(), &criteria)
    }
    Command::Play { video_id, print_route } => {
      cmd_play(catalog_source(&args.catalog, &config).as_ref(), &config, &video_id, print_route)
    }
    Command::Resume { print_route } => {
      cmd_resume(catalog_source(&args.catalog, &config).as_ref(), &config, print_route)
    }
    Command::Config { player_command, catalog_path } => cmd_config(config, player_command, catalog_path),
    Command::Completions { shell } => {
      clap_complete::generate(shell, &mut Args::command(), "kidvid", &mut std::io::stdout());
      Ok(())
    }
  }
}

/// Log to a file in the data dir so command output stays clean.
/// Returns the appender guard; dropping it flushes buffered log lines.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let proj_dirs = ProjectDirs::from("", "", "kidvid")?;
  let log_dir = proj_dirs.data_dir();
  std::fs::create_dir_all(log_dir).ok()?;
  let appender = tracing_appender::rolling::never(log_dir, "kidvid.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Some(guard)
}

/// Pick the catalog source: CLI flag, then prefs, then the embedded seed.
fn catalog_source(cli_path: &Option<PathBuf>, config: &Config) -> Box<dyn CatalogSource> {
  if let Some(path) = cli_path {
    Box::new(JsonCatalog::new(path))
  } else if let Some(path) = &config.catalog_path {
    Box::new(JsonCatalog::new(path))
  } else {
    Box::new(EmbeddedCatalog)
  }
}

/// Load the resume record (file store first, then the built-in sample) and
/// validate its video id against the catalog at this boundary, not at
/// navigation time.
fn load_resume(catalog: &[VideoRecord]) -> Result<Option<LastPlayedRecord>, CatalogError> {
  let record = FileResumeStore::open().and_then(|store| store.last_played()).or_else(|| SampleResume.last_played());
  match record {
    Some(record) => {
      record.validate_against(catalog)?;
      Ok(Some(record))
    }
    None => Ok(None),
  }
}

// --- Commands ---

fn cmd_home() -> Result<()> {
  println!("应用主页");
  for card in HomeCard::ALL {
    match card.destination() {
      Destination::VideoMenu => println!("  {}", card),
      Destination::ComingSoon => println!("  {}  (即将上线)", card),
    }
  }
  Ok(())
}

fn cmd_list(source: &dyn CatalogSource, criteria: &FilterCriteria) -> Result<()> {
  info!(?criteria, "listing videos");
  let catalog = source.load().context("cannot show the video menu")?;

  match load_resume(&catalog) {
    Ok(Some(record)) => {
      println!("继续观看  {}  ({:.0}%)", record.title, record.clamped_progress() * 100.0);
      println!();
    }
    Ok(None) => {}
    Err(e) => warn!(err = %e, "skipping continue-watching card"),
  }

  let visible = filter::apply(&catalog, criteria);
  println!("课程列表 ({})", visible.len());
  for record in &visible {
    let tag = record.tags.first().map(String::as_str).unwrap_or("-");
    println!("{:<8}  {}  [等级{} · {} · {}]", record.id, record.title, record.level, record.category, tag);
    if !record.description.is_empty() {
      println!("{:<8}  {}", "", record.description);
    }
  }
  if visible.is_empty() && !criteria.is_unrestricted() {
    println!("(无匹配结果，试试放宽筛选条件)");
  }
  Ok(())
}

fn cmd_config(mut config: Config, player_command: Option<String>, catalog_path: Option<String>) -> Result<()> {
  if player_command.is_none() && catalog_path.is_none() {
    println!("player_command = {}", config.player_command.as_deref().unwrap_or("(unset)"));
    println!("catalog_path = {}", config.catalog_path.as_deref().unwrap_or("(unset)"));
    return Ok(());
  }
  if let Some(command) = player_command {
    config.player_command = Some(command);
  }
  if let Some(path) = catalog_path {
    config.catalog_path = Some(path);
  }
  config.save();
  Ok(())
}

fn cmd_play(source: &dyn CatalogSource, config: &Config, video_id: &str, print_route: bool) -> Result<()> {
  let catalog = source.load().context("cannot resolve selection")?;
  let record = catalog
    .iter()
    .find(|r| r.id == video_id)
    .ok_or_else(|| CatalogError::ReferenceNotFound(video_id.to_string()))?;

  let target = resolve(Selection::Catalog(record));
  if let Some(store) = FileResumeStore::open() {
    store.record_played(record, 0.0);
  }
  hand_off(&target, config, print_route)
}

fn cmd_resume(source: &dyn CatalogSource, config: &Config, print_route: bool) -> Result<()> {
  let catalog = source.load().context("cannot resolve selection")?;
  let record = load_resume(&catalog)?.context("nothing to resume")?;
  let target = resolve(Selection::Resume(&record));
  hand_off(&target, config, print_route)
}

/// One navigation target per selection crosses this boundary. With no player
/// configured (or `--print-route`) the route is printed for inspection.
fn hand_off(target: &NavigationTarget, config: &Config, print_route: bool) -> Result<()> {
  match (&config.player_command, print_route) {
    (Some(command), false) => launcher::launch(command, target),
    _ => {
      println!("{}", target.route());
      Ok(())
    }
  }
}

//! Command-line interface for sportcast.
//!
//! Stands in for the browser UI: listing and filtering streams, playing
//! one, showing upcoming events, and the admin add/edit/delete forms.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::admin::{AdminSession, StreamForm};
use crate::config;
use crate::domain::{Category, StreamRecord};
use crate::player::{HttpProbe, PlayerSession, PlayerState};
use crate::resolver::{resolve, validate_share_url};
use crate::store::{format_viewers, CategoryFilter, FileSlot, StreamStore};

/// sportcast - Live sport stream catalog and player
#[derive(Parser, Debug)]
#[command(name = "sportcast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List streams
    List {
        /// Category key, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Show details of a stream
    Show {
        /// Stream ID
        id: u64,
    },

    /// Play a stream (prints the embed URL and bumps its viewers)
    Play {
        /// Stream ID (plays the first stream if omitted)
        id: Option<u64>,

        /// Fetch the embed URL to check that it loads
        #[arg(long)]
        probe: bool,

        /// Retries after a failed probe
        #[arg(long, default_value = "0", requires = "probe")]
        retries: u32,
    },

    /// Resolve a share URL into an embed URL
    Resolve {
        /// Share URL
        url: String,
    },

    /// Check a URL against the admin share-link rules
    Validate {
        /// Share URL
        url: String,
    },

    /// List upcoming events
    Events,

    /// List known categories
    Categories,

    /// Add a stream
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        category: Category,

        /// YouTube share link
        #[arg(long)]
        url: String,

        /// Thumbnail URL (default image if omitted)
        #[arg(long)]
        thumbnail: Option<String>,

        /// Starting viewer count
        #[arg(long)]
        viewers: Option<u64>,
    },

    /// Edit a stream (only the given fields change)
    Edit {
        /// Stream ID
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        thumbnail: Option<String>,

        #[arg(long)]
        viewers: Option<u64>,
    },

    /// Delete a stream
    Delete {
        /// Stream ID
        id: u64,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List { category } => list_streams(category),
            Commands::Show { id } => show_stream(id),
            Commands::Play { id, probe, retries } => play_stream(id, probe, retries).await,
            Commands::Resolve { url } => resolve_url(&url),
            Commands::Validate { url } => validate_url(&url),
            Commands::Events => list_events(),
            Commands::Categories => list_categories(),
            Commands::Add {
                title,
                category,
                url,
                thumbnail,
                viewers,
            } => add_stream(StreamForm {
                title,
                category,
                url,
                thumbnail,
                viewers,
            }),
            Commands::Edit {
                id,
                title,
                category,
                url,
                thumbnail,
                viewers,
            } => edit_stream(id, title, category, url, thumbnail, viewers),
            Commands::Delete { id } => delete_stream(id),
            Commands::Config => show_config(),
        }
    }
}

/// Open the catalog in the configured slot
fn open_store() -> Result<StreamStore<FileSlot>> {
    let slot = FileSlot::open_default()?;
    Ok(StreamStore::open_with_key(slot, config::storage_key()?))
}

fn admin_session() -> Result<AdminSession> {
    let cfg = config::config()?;
    Ok(AdminSession::with_default_thumbnail(cfg.default_thumbnail.clone()))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn print_stream_row(stream: &StreamRecord) {
    println!(
        "{:<5} {:<6} {:<20} {:<10} {:<45}",
        stream.id,
        if stream.is_live { "LIVE" } else { "" },
        stream.category.label(),
        format_viewers(stream.viewers),
        truncate(&stream.title, 45)
    );
}

fn print_stream(stream: &StreamRecord) {
    println!("  ID: {}", stream.id);
    println!("  Title: {}", stream.title);
    println!("  Category: {} ({})", stream.category.label(), stream.category);
    println!("  URL: {}", stream.url);
    println!("  Thumbnail: {}", stream.thumbnail);
    println!("  Viewers: {} ({})", format_viewers(stream.viewers), stream.viewers);
    println!("  Live: {}", if stream.is_live { "yes" } else { "no" });
}

/// List streams passing a category filter
fn list_streams(filter: CategoryFilter) -> Result<()> {
    let mut store = open_store()?;
    store.select_filter(filter);
    let streams = store.list_current();

    if streams.is_empty() {
        println!("No streams available for this category.");
        return Ok(());
    }

    println!("{:<5} {:<6} {:<20} {:<10} {:<45}", "ID", "", "CATEGORY", "VIEWERS", "TITLE");
    println!("{}", "-".repeat(90));

    for stream in &streams {
        print_stream_row(stream);
    }

    println!("\nShowing {} of {} streams", streams.len(), store.len());

    Ok(())
}

/// Show one stream and its resolved embed URL
fn show_stream(id: u64) -> Result<()> {
    let store = open_store()?;
    let stream = store
        .get_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Stream not found: {}", id))?;

    print_stream(stream);
    match resolve(&stream.url) {
        Some(embed) => println!("  Embed: {} [{}]", embed.url, embed.kind),
        None => println!("  Embed: (none)"),
    }

    Ok(())
}

/// Play a stream, optionally probing and retrying
async fn play_stream(id: Option<u64>, probe: bool, retries: u32) -> Result<()> {
    let mut store = open_store()?;
    let mut player = PlayerSession::new();

    match id {
        Some(id) => {
            player.play(&mut store, id)?;
        }
        None => {
            player
                .play_first(&mut store)?
                .context("No streams to play")?;
        }
    }

    let id = player.current_stream().context("No stream selected")?;
    let title = store
        .get_by_id(id)
        .map(|s| s.title.clone())
        .ok_or_else(|| anyhow::anyhow!("Stream not found: {}", id))?;

    if !probe {
        return report_state(&title, player.state());
    }

    let surface = HttpProbe::from_config(&config::config()?.player);
    let mut state = player.load_on(&surface).await.clone();

    let mut attempt = 0;
    while state.is_failed() && attempt < retries {
        attempt += 1;
        eprintln!("Retrying ({}/{})...", attempt, retries);
        state = player.play_on(&mut store, &surface, id).await?.clone();
    }

    report_state(&title, &state)
}

fn report_state(title: &str, state: &PlayerState) -> Result<()> {
    match state {
        PlayerState::Loading { embed, .. } => {
            println!("{}", embed.url);
            eprintln!("Now playing: {}", title);
            Ok(())
        }
        PlayerState::Playing { embed, .. } => {
            println!("{}", embed.url);
            eprintln!("Now playing: {} (loaded)", title);
            Ok(())
        }
        PlayerState::Failed { stream_id } => {
            eprintln!("Error loading stream {}: Stream not available.", stream_id);
            eprintln!("Make sure the stream uses a valid YouTube share link.");
            std::process::exit(1);
        }
        PlayerState::Idle => Ok(()),
    }
}

/// Resolve a URL without touching the catalog
fn resolve_url(url: &str) -> Result<()> {
    let embed = resolve(url).context("URL is empty")?;
    println!("{}", embed.url);
    if !embed.kind.is_embeddable() {
        eprintln!("Warning: no video id found ({}); URL passed through unchanged", embed.kind);
    }
    Ok(())
}

/// Check a URL against the strict share-link rules
fn validate_url(url: &str) -> Result<()> {
    let video_id = validate_share_url(url)?;
    println!("Valid share link (video id: {})", video_id);
    Ok(())
}

/// List upcoming events
fn list_events() -> Result<()> {
    let store = open_store()?;

    for event in store.events() {
        println!(
            "[{}] {} ({}) vs {} ({})  {}  {}",
            event.id,
            event.team1.name,
            event.team1.short_code,
            event.team2.name,
            event.team2.short_code,
            event.time,
            event.category.label()
        );
    }

    Ok(())
}

/// List known categories with their stream counts
fn list_categories() -> Result<()> {
    let store = open_store()?;

    println!("{:<20} {:<20} {:<8}", "KEY", "LABEL", "STREAMS");
    println!("{}", "-".repeat(50));
    println!("{:<20} {:<20} {:<8}", "all", "All", store.len());

    for category in Category::known() {
        let count = store.list(&CategoryFilter::Only(category.clone())).len();
        println!("{:<20} {:<20} {:<8}", category.as_str(), category.label(), count);
    }

    Ok(())
}

/// Add a stream through the admin path
fn add_stream(form: StreamForm) -> Result<()> {
    let mut store = open_store()?;
    let mut admin = admin_session()?;

    let record = admin.submit(&mut store, form)?;

    eprintln!("Stream added successfully!");
    print_stream(&record);
    Ok(())
}

/// Edit a stream through the admin path
fn edit_stream(
    id: u64,
    title: Option<String>,
    category: Option<Category>,
    url: Option<String>,
    thumbnail: Option<String>,
    viewers: Option<u64>,
) -> Result<()> {
    if title.is_none()
        && category.is_none()
        && url.is_none()
        && thumbnail.is_none()
        && viewers.is_none()
    {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --category, --url, --thumbnail, --viewers");
    }

    let mut store = open_store()?;
    let mut admin = admin_session()?;

    let mut form = admin
        .begin_edit(&store, id)
        .ok_or_else(|| anyhow::anyhow!("Stream not found: {}", id))?;

    if let Some(title) = title {
        form.title = title;
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(url) = url {
        form.url = url;
    }
    if let Some(thumbnail) = thumbnail {
        form.thumbnail = Some(thumbnail);
    }
    if let Some(viewers) = viewers {
        form.viewers = Some(viewers);
    }

    let record = admin.submit(&mut store, form)?;

    eprintln!("Stream updated successfully!");
    print_stream(&record);
    Ok(())
}

/// Delete a stream through the admin path
fn delete_stream(id: u64) -> Result<()> {
    let mut store = open_store()?;
    let mut admin = admin_session()?;

    let existed = store.get_by_id(id).is_some();
    admin.delete(&mut store, id)?;

    if existed {
        eprintln!("Stream {} deleted", id);
    } else {
        eprintln!("Stream {} was not in the catalog", id);
    }
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("sportcast configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Storage:");
    println!("  Home:      {}", cfg.home.display());
    println!("  Key:       {}", cfg.storage_key);
    println!("  Slot file: {}", cfg.slot_path().display());
    println!();
    println!("Player:");
    println!("  Probe timeout: {}s", cfg.player.probe_timeout_seconds);
    println!();
    println!("Admin:");
    println!("  Default thumbnail: {}", cfg.default_thumbnail);

    Ok(())
}

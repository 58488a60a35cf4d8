use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use reelview::app::{App, AppEvent};
use reelview::config::Config;
use reelview::media::MediaKind;
use reelview::preferences::{load_theme, SidebarPreferences};
use reelview::storage::{Database, DatabaseError};
use reelview::theme::ThemeVariant;
use reelview::ui;

/// Get the config directory path (~/.config/reelview/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("reelview"))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartView {
    Photos,
    Videos,
    Reels,
}

impl From<StartView> for MediaKind {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Photos => MediaKind::Photo,
            StartView::Videos => MediaKind::Video,
            StartView::Reels => MediaKind::Reel,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "reelview",
    version,
    about = "Terminal explorer for photo, video, and reel feeds"
)]
struct Args {
    /// Config file (default: ~/.config/reelview/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Photo feed URL or JSON file
    #[arg(long, value_name = "URL|FILE")]
    photos: Option<String>,

    /// Video feed URL or JSON file
    #[arg(long, value_name = "URL|FILE")]
    videos: Option<String>,

    /// Reel feed URL or JSON file
    #[arg(long, value_name = "URL|FILE")]
    reels: Option<String>,

    /// View to open on startup
    #[arg(long, value_enum, default_value_t = StartView::Photos)]
    view: StartView,

    /// Forget saved sidebar and theme preferences
    #[arg(long)]
    reset_prefs: bool,
}

/// Log to a file in the config directory; stderr belongs to the TUI.
fn init_tracing(config_dir: &std::path::Path) -> Result<()> {
    let log_path = config_dir.join("reelview.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access to preferences and logs
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(&config_dir, std::fs::Permissions::from_mode(0o700))
        {
            eprintln!(
                "Warning: could not restrict {}: {}",
                config_dir.display(),
                e
            );
        }
    }

    init_tracing(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    for (kind, location) in [
        (MediaKind::Photo, args.photos),
        (MediaKind::Video, args.videos),
        (MediaKind::Reel, args.reels),
    ] {
        if let Some(location) = location {
            config.set_source(kind, location);
        }
    }

    let db_path = config_dir.join("reelview.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of reelview appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
    };

    if args.reset_prefs {
        let removed = db
            .delete_preferences_by_prefix("")
            .await
            .context("Failed to reset preferences")?;
        tracing::info!(removed, "Preferences reset");
        println!("Preferences reset ({} removed).", removed);
    }

    let theme_name = load_theme(&db, &config.theme).await;
    let theme = ThemeVariant::from_str_name(&theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = %theme_name, "Unknown theme, using dark");
        ThemeVariant::Dark
    });

    let start: MediaKind = args.view.into();
    let mut app = App::new(db.clone(), config, theme).context("Failed to create application")?;
    app.sidebar = SidebarPreferences::load(&db).await;
    app.active = start;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::mount_view(&mut app, start, &event_tx);

    tracing::info!(view = start.name(), "Starting TUI");
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

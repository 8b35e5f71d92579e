mod chart;
mod serve;
mod tui;
mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use memento_cache::{CACHE_DB_FILE, CacheStorage, Config, OfflineWorker, Served, SourceOrigin};
use memento_core::{ChartLayout, Panel, Session, Tab, parse_date};

#[derive(Parser)]
#[command(name = "memento", about = "Life in numbers: space journey, dayversary, memento mori")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Pretend today is this date
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<String>,

    /// Config file (defaults to memento.toml in the data directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// How far you have travelled through space since birth
    Journey {
        /// Date of birth
        #[arg(long)]
        dob: Option<String>,

        /// Name to greet
        #[arg(long, default_value = "")]
        name: String,
    },

    /// The date you turn N days old
    Dayversary {
        /// Date of birth
        #[arg(long)]
        dob: Option<String>,

        /// Day count, may be negative
        #[arg(long, default_value_t = 10_000, allow_negative_numbers = true)]
        days: i64,
    },

    /// Weeks lived against an average lifespan
    Memento {
        /// Date of birth
        #[arg(long)]
        dob: Option<String>,

        /// No colours in the terminal grid
        #[arg(long)]
        plain: bool,

        /// Also write the grid as an SVG file
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,

        /// SVG container width in pixels
        #[arg(long, default_value_t = 600.0)]
        width: f64,

        /// SVG viewport height in pixels
        #[arg(long, default_value_t = 1000.0)]
        height: f64,
    },

    /// Interactive tabbed terminal UI
    Tui {
        /// Date of birth (otherwise asked for on screen)
        #[arg(long)]
        dob: Option<String>,

        /// Name to greet
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Manage the offline asset cache
    Assets {
        /// Directory or http(s) URL to fetch assets from
        #[arg(long, global = true, value_name = "URL_OR_DIR")]
        origin: Option<String>,

        #[command(subcommand)]
        action: AssetAction,
    },

    /// Serve assets cache-first over HTTP
    Serve {
        /// Port to listen on (127.0.0.1)
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Directory or http(s) URL to fetch assets from
        #[arg(long, value_name = "URL_OR_DIR")]
        origin: Option<String>,
    },
}

#[derive(Subcommand)]
enum AssetAction {
    /// Precache every asset in the manifest
    Install,
    /// Delete every cache except the current one
    Activate,
    /// Show caches and their entry counts
    List,
    /// Fetch one path cache-first
    Fetch {
        /// Request path, e.g. ./index.html
        path: String,
    },
}

fn data_dir() -> PathBuf {
    std::env::var("MEMENTO_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(memento_cache::default_base_dir)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(&data_dir()),
    };
    config.context("failed to load config")
}

fn resolve_today(cli: &Cli) -> Result<NaiveDate> {
    match &cli.today {
        Some(raw) => parse_date(raw).with_context(|| format!("invalid --today {raw:?}")),
        None => Ok(memento_core::today()),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Journey { dob, name } => cmd_journey(&cli, dob.as_deref(), name),
        Commands::Dayversary { dob, days } => cmd_dayversary(&cli, dob.as_deref(), *days),
        Commands::Memento {
            dob,
            plain,
            svg,
            width,
            height,
        } => cmd_memento(&cli, dob.as_deref(), *plain, svg.as_deref(), *width, *height),
        Commands::Tui { dob, name } => cmd_tui(&cli, dob.as_deref(), name),
        Commands::Assets { origin, action } => cmd_assets(&cli, origin.as_deref(), action).await,
        Commands::Serve { port, origin } => cmd_serve(&cli, *port, origin.as_deref()).await,
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// Submit the form and render one tab. `None` when no date was given.
fn render_tab(cli: &Cli, name: &str, dob: Option<&str>, tab: Tab) -> Result<Option<Panel>> {
    let config = load_config(cli)?;
    let today = resolve_today(cli)?;
    let mut session = Session::new(config.lifespan);
    if !session.submit(name, dob.unwrap_or_default(), today)? {
        tracing::debug!("no date of birth given, nothing to do");
        return Ok(None);
    }
    session.select(tab);
    Ok(session.render(today)?)
}

fn print_panel(panel: &Panel, color: bool) {
    for line in view::panel_lines(panel, color, None) {
        println!("{line}");
    }
}

fn stdout_color() -> bool {
    std::io::stdout().is_tty() && std::env::var_os("NO_COLOR").is_none()
}

fn cmd_journey(cli: &Cli, dob: Option<&str>, name: &str) -> Result<()> {
    if let Some(panel) = render_tab(cli, name, dob, Tab::SpaceJourney)? {
        print_panel(&panel, stdout_color());
    }
    Ok(())
}

fn cmd_dayversary(cli: &Cli, dob: Option<&str>, days: i64) -> Result<()> {
    let config = load_config(cli)?;
    let today = resolve_today(cli)?;
    let mut session = Session::new(config.lifespan);
    if !session.submit("", dob.unwrap_or_default(), today)? {
        return Ok(());
    }
    session.set_dayversary_days(days);
    session.select(Tab::Dayversary);
    if let Some(panel) = session.render(today)? {
        print_panel(&panel, stdout_color());
    }
    Ok(())
}

fn cmd_memento(
    cli: &Cli,
    dob: Option<&str>,
    plain: bool,
    svg: Option<&Path>,
    width: f64,
    height: f64,
) -> Result<()> {
    let Some(panel) = render_tab(cli, "", dob, Tab::MementoMori)? else {
        return Ok(());
    };
    print_panel(&panel, !plain && stdout_color());

    if let (Some(path), Panel::MementoMori { grid, .. }) = (svg, &panel) {
        let layout = ChartLayout::fit(width, height, grid.cols(), grid.rows());
        std::fs::write(path, chart::render_svg(grid, &layout))
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_tui(cli: &Cli, dob: Option<&str>, name: &str) -> Result<()> {
    let config = load_config(cli)?;
    let today = resolve_today(cli)?;
    let mut session = Session::new(config.lifespan);
    if let Some(raw) = dob {
        session.submit(name, raw, today)?;
    }
    tui::run(tui::App::new(session, today))
}

// ---------------------------------------------------------------------------
// Offline cache
// ---------------------------------------------------------------------------

fn open_storage() -> Result<CacheStorage> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    CacheStorage::open(&dir.join(CACHE_DB_FILE)).context("failed to open cache database")
}

/// Without an origin the worker runs cache-only.
fn build_worker(config: &Config, origin: Option<&str>) -> Result<OfflineWorker<SourceOrigin>> {
    let origin = origin
        .or(config.cache.origin.as_deref())
        .map(SourceOrigin::parse)
        .transpose()
        .context("invalid origin")?;
    Ok(OfflineWorker::new(
        open_storage()?,
        config.cache.name.clone(),
        config.cache.assets.clone(),
        origin,
    ))
}

async fn cmd_assets(cli: &Cli, origin: Option<&str>, action: &AssetAction) -> Result<()> {
    let config = load_config(cli)?;
    match action {
        AssetAction::Install => {
            let worker = build_worker(&config, origin)?;
            let count = worker.install().await.context("install failed")?;
            println!("installed {count} assets into {}", worker.cache_name());
        }
        AssetAction::Activate => {
            let worker = build_worker(&config, origin)?;
            let deleted = worker.activate().context("activate failed")?;
            if deleted.is_empty() {
                println!("no stale caches");
            }
            for name in deleted {
                println!("deleted {name}");
            }
        }
        AssetAction::List => {
            let storage = open_storage()?;
            let names = storage.cache_names()?;
            if names.is_empty() {
                println!("no caches");
            }
            for name in names {
                let marker = if name == config.cache.name { "*" } else { " " };
                println!("{marker} {name} ({} entries)", storage.entry_count(&name)?);
            }
        }
        AssetAction::Fetch { path } => {
            let worker = build_worker(&config, origin)?;
            let (asset, served) = worker.fetch(path).await.context("fetch failed")?;
            let source = match served {
                Served::Cache => "from cache",
                Served::Network => "from network",
            };
            println!(
                "{} {} ({} bytes, {source})",
                asset.status,
                asset.path,
                asset.body.len()
            );
        }
    }
    Ok(())
}

async fn cmd_serve(cli: &Cli, port: u16, origin: Option<&str>) -> Result<()> {
    let config = load_config(cli)?;
    let worker = Arc::new(build_worker(&config, origin)?);
    serve::run(worker, port).await
}

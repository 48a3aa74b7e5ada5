/// Lumen Player - headless video player shell
use clap::{Parser, Subcommand};
use lumen_player::{
    config::PlayerConfig, event_loop, ConsoleUi, OutputFormat, SimulatedBackend,
};
use lumen_playback::{MediaBackendAdapter, PlaybackSession, SurfaceHandle, TimeSyncPoller};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Window id handed to the engine when there is no real window
const HEADLESS_SURFACE: SurfaceHandle = SurfaceHandle(0);

#[derive(Parser)]
#[command(name = "lumen-player")]
#[command(about = "Lumen video player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./lumen.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive playback session
    Play {
        /// Directory to scan for videos (default: library root from config)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Start with an empty playlist
        #[arg(long)]
        no_scan: bool,
        /// Print UI updates as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Scan a directory for video files and print them
    Scan {
        /// Directory path to scan
        path: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lumen_player=info,lumen_playback=info,lumen_discovery=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Play {
            root,
            no_scan,
            json,
        } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            play(&config, root, no_scan, format).await?;
        }
        Commands::Scan { path } => {
            scan_directory(&config, &path)?;
        }
    }

    Ok(())
}

async fn play(
    config: &PlayerConfig,
    root: Option<PathBuf>,
    no_scan: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    tracing::info!("Starting {}", config.player.app_name);

    let backend = SimulatedBackend::new(config.simulated_length());
    let adapter = MediaBackendAdapter::new(backend, HEADLESS_SURFACE)?;
    let ui = ConsoleUi::new(std::io::stdout(), format);
    let mut session = PlaybackSession::new(adapter, ui, config.session_config())
        .with_poller(TimeSyncPoller::new(config.poll_period()));

    if config.library.scan_on_start && !no_scan {
        let root = root.unwrap_or_else(|| config.library.root.clone());
        tracing::info!("Scanning {} for videos", root.display());
        match config.scanner().scan_directory(&root) {
            Ok(files) => {
                session.add_discovered(files);
            }
            Err(e) => tracing::warn!("Library scan failed: {}", e),
        }
    } else {
        tracing::info!("Library scan skipped");
    }

    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || read_stdin(tx));

    let mut out = std::io::stdout();
    event_loop::run(session, rx, &mut out).await;

    Ok(())
}

/// Forward stdin lines until EOF or the session stops listening
///
/// Runs on a plain thread: a blocking stdin read would otherwise hold up
/// runtime shutdown after `quit`.
fn read_stdin(tx: mpsc::Sender<String>) {
    for line in std::io::stdin().lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

fn scan_directory(config: &PlayerConfig, path: &Path) -> anyhow::Result<()> {
    let files = config.scanner().scan_directory(path)?;

    for file in &files {
        println!("{}", file.display());
    }

    Ok(())
}

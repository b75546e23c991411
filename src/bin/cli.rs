use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use csv_playlist_online_import as lib;
use lib::api::tidal::TidalProvider;
use lib::api::Provider;
use lib::config::Config;
use lib::importer::{import_entries, ImportOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::subscriber as tracing_subscriber_global;
use tracing_appender::rolling::RollingFileAppender;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "csv-playlist-online-import", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV playlist export into a newly created remote playlist
    Import {
        /// CSV file to import; when omitted, pick interactively from csv_dir
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Name for the created playlist (defaults to the CSV file stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// Validate config file and exit
    ConfigValidate,
    /// Auth helpers
    Auth {
        #[command(subcommand)]
        sub: AuthCommands,
    },
    /// Auth test helpers
    AuthTest {
        #[command(subcommand)]
        sub: AuthTestCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Store a pasted Tidal token JSON + client credentials in the DB (interactive)
    Tidal,
}

#[derive(Subcommand)]
enum AuthTestCommands {
    /// Test that the stored Tidal token can be refreshed
    Tidal,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Resolve config path: explicit --config overrides; otherwise prefer
    // system-wide /etc/csv-playlist-import/config.toml and fall back to the
    // repository example config for local/dev usage.
    let resolved_config_path: PathBuf = match &cli.config {
        Some(p) => p.clone(),
        None => {
            let etc_path = Path::new("/etc/csv-playlist-import/config.toml");
            if etc_path.exists() {
                etc_path.to_path_buf()
            } else {
                PathBuf::from("config/example-config.toml")
            }
        }
    };

    let cfg = Config::from_path(&resolved_config_path)
        .with_context(|| format!("loading config from {}", resolved_config_path.display()))?;

    // Initialize log->tracing bridge and structured logging.
    // Logs go to both stdout and a daily-rotated file in cfg.log_dir.
    let _ = LogTracer::init();
    let file_appender: RollingFileAppender =
        tracing_appender::rolling::daily(&cfg.log_dir, "playlist-import.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer().with_writer(non_blocking);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer);

    tracing_subscriber_global::set_global_default(subscriber)
        .expect("failed to set global tracing subscriber");

    match cli.command {
        Commands::Import { csv, name } => {
            let provider = TidalProvider::new(String::new(), String::new(), cfg.db_path.clone());
            if !provider.is_authenticated() {
                eprintln!("Tidal provider is not authenticated. Run `auth tidal` first.");
                std::process::exit(1);
            }

            let csv_path = match csv {
                Some(p) => p,
                None => match pick_csv_interactively(&cfg.csv_dir)? {
                    Some(p) => p,
                    None => return Ok(()),
                },
            };

            println!("\nProcessing {}...", csv_path.display());
            let entries = lib::table::read_entries(&csv_path)?;
            if entries.is_empty() {
                eprintln!("No usable rows found in {}", csv_path.display());
                std::process::exit(1);
            }

            let default_name = csv_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Imported playlist")
                .to_string();
            let playlist_name = match name {
                Some(n) => n,
                None => prompt_playlist_name(&default_name)?,
            };

            println!(
                "\nCreating playlist '{}' ({} tracks)...",
                playlist_name,
                entries.len()
            );
            let opts = ImportOptions {
                search_pacing: Duration::from_millis(cfg.search_pacing_ms),
                entry_pacing: Duration::from_millis(cfg.entry_pacing_ms),
            };
            let report = import_entries(
                &provider,
                &playlist_name,
                &cfg.playlist_description,
                &entries,
                &opts,
            )
            .await?;

            println!("\nSummary:");
            println!(
                "Successfully added {} out of {} songs",
                report.successful_adds, report.total_songs
            );
            if !report.not_found_songs.is_empty() {
                println!("\nSongs that couldn't be found:");
                for song in &report.not_found_songs {
                    println!("- {}", song);
                }
            }
            println!("\nPlaylist '{}' has been created.", playlist_name);
        }
        Commands::ConfigValidate => {
            match Config::from_path(resolved_config_path.as_path()) {
                Ok(_) => println!("OK"),
                Err(e) => {
                    eprintln!("Config validation failed: {}", e);
                    std::process::exit(2);
                }
            }
        }
        Commands::Auth { sub } => match sub {
            AuthCommands::Tidal => {
                lib::api::tidal_auth::run_tidal_auth(&cfg).await?;
            }
        },
        Commands::AuthTest { sub } => match sub {
            AuthTestCommands::Tidal => {
                let tidal =
                    TidalProvider::new(String::new(), String::new(), cfg.db_path.clone());
                println!("Testing Tidal token refresh...");
                match tidal.test_refresh_token().await {
                    Ok(()) => println!("Tidal token refresh succeeded."),
                    Err(e) => {
                        eprintln!("Tidal token refresh FAILED: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    Ok(())
}

/// List the CSV files in `dir` and let the user pick one by number.
/// Returns None when the user enters 0 to exit.
fn pick_csv_interactively(dir: &Path) -> Result<Option<PathBuf>> {
    let files = lib::table::list_csv_files(dir)?;
    if files.is_empty() {
        eprintln!("No CSV files found in {}!", dir.display());
        std::process::exit(1);
    }

    println!("\nAvailable playlists:");
    for (i, f) in files.iter().enumerate() {
        let stem = f.file_stem().and_then(|s| s.to_str()).unwrap_or("?");
        println!("{}. {}", i + 1, stem);
    }

    loop {
        print!("\nSelect a playlist number to import (or 0 to exit): ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        match line.trim().parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= files.len() => return Ok(Some(files[n - 1].clone())),
            _ => println!("Invalid selection. Please try again."),
        }
    }
}

fn prompt_playlist_name(default_name: &str) -> Result<String> {
    print!(
        "\nEnter playlist name (press Enter to use '{}'): ",
        default_name
    );
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() {
        default_name.to_string()
    } else {
        name.to_string()
    })
}

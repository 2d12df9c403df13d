//! `harita` command-line companion.
//!
//! Manages maps on the backend (`maps ...`) and inspects PMTiles archives
//! locally or over HTTP (`tiles ...`). Results go to stdout as JSON; logs go
//! to stderr.

mod http;
mod tiles;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use harita::Color;
use harita::api::ApiError;
use harita::pmtiles::TileError;
use harita::workflow::{MapDraft, SourceUpload, WorkflowError, create_map};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::http::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing access token; pass --access-token or set HARITA_ACCESS_TOKEN")]
    MissingAccessToken,
    #[error("api request failed: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("tile archive: {0}")]
    Tile(#[from] TileError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid color `{0}`; expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("got {colors} colors for {files} files")]
    ColorCount { colors: usize, files: usize },
    #[error("no bounds: pass at least one source")]
    NoBounds,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "harita", about = "Harita map backend and PMTiles CLI")]
struct Cli {
    #[arg(long, env = "HARITA_API_URL", default_value = harita::api::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "HARITA_ACCESS_TOKEN")]
    access_token: Option<String>,

    #[arg(long, env = "HARITA_SUPABASE_URL", default_value = "http://localhost:54321")]
    supabase_url: String,

    #[arg(long, env = "HARITA_SUPABASE_ANON_KEY", default_value = "")]
    supabase_anon_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Maps(MapsCommand),
    Tiles(TilesCommand),
}

#[derive(Args, Debug)]
struct MapsCommand {
    #[command(subcommand)]
    command: MapsSubcommand,
}

#[derive(Subcommand, Debug)]
enum MapsSubcommand {
    /// List the signed-in user's maps.
    List,
    /// Show one map record.
    Show { id: String },
    Delete { id: String },
    /// Create a map from GeoJSON/PMTiles files and assemble it.
    Create(CreateArgs),
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value_t = false)]
    public: bool,

    /// One color per file, in order; files without one get #ffffff.
    #[arg(long = "color")]
    colors: Vec<String>,

    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct TilesCommand {
    #[command(subcommand)]
    command: TilesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TilesSubcommand {
    /// Print the decoded header and metadata.
    Inspect { source: String },
    /// Print the style layers derived for the archive.
    Style {
        source: String,
        #[arg(long, default_value = harita::color::DEFAULT_SOURCE_HEX)]
        color: String,
        #[arg(long)]
        source_id: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        opacity: f64,
    },
    /// Print the merged bounds of one or more archives.
    Bounds { sources: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let backend = HttpBackend::new(&cli.api_url, cli.access_token, &cli.supabase_url, &cli.supabase_anon_key);

    match cli.command {
        Command::Maps(maps) => run_maps(&backend, maps).await,
        Command::Tiles(tiles) => run_tiles(tiles).await,
    }
}

async fn run_maps(backend: &HttpBackend, maps: MapsCommand) -> Result<(), CliError> {
    match maps.command {
        MapsSubcommand::List => print_json(&backend.list_maps().await.map_err(signed_in)?),
        MapsSubcommand::Show { id } => print_json(&backend.get_map(&id).await?),
        MapsSubcommand::Delete { id } => {
            backend.delete_map(&id).await.map_err(signed_in)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        MapsSubcommand::Create(args) => {
            let draft = MapDraft { name: args.name, description: args.description, public: args.public };
            let uploads = uploads(args.files, &args.colors)?;
            let id = create_map(backend, &draft, &uploads, |step| eprintln!("{step}")).await.map_err(|e| {
                if matches!(e.source, ApiError::MissingSession) {
                    CliError::MissingAccessToken
                } else {
                    CliError::Workflow(e)
                }
            })?;
            print_json(&serde_json::json!({ "id": id }))
        }
    }
}

fn signed_in(error: ApiError) -> CliError {
    match error {
        ApiError::MissingSession => CliError::MissingAccessToken,
        other => CliError::Api(other),
    }
}

/// Pair files with their `--color` values, in order.
fn uploads(files: Vec<PathBuf>, colors: &[String]) -> Result<Vec<SourceUpload<PathBuf>>, CliError> {
    if colors.len() > files.len() {
        return Err(CliError::ColorCount { colors: colors.len(), files: files.len() });
    }
    files
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            let color = match colors.get(i) {
                Some(raw) => parse_color(raw)?,
                None => Color::default(),
            };
            let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            Ok(SourceUpload::new(name, color, path))
        })
        .collect()
}

fn parse_color(raw: &str) -> Result<Color, CliError> {
    Color::parse(raw).ok_or_else(|| CliError::InvalidColor(raw.to_owned()))
}

async fn run_tiles(command: TilesCommand) -> Result<(), CliError> {
    match command.command {
        TilesSubcommand::Inspect { source } => {
            let (header, metadata) = tiles::open(&source).await?;
            print_json(&tiles::summary(&header, &metadata))
        }
        TilesSubcommand::Style { source, color, source_id, opacity } => {
            let color = parse_color(&color)?;
            let (_, metadata) = tiles::open(&source).await?;
            print_json(&tiles::style_layers(&metadata, &color, source_id.as_deref(), opacity))
        }
        TilesSubcommand::Bounds { sources } => {
            let mut headers = Vec::with_capacity(sources.len());
            for source in &sources {
                let (header, _) = tiles::open(source).await?;
                tracing::info!(%source, ?header.bounds, "read bounds");
                headers.push(header);
            }
            let bounds = tiles::merged_bounds(&headers).ok_or(CliError::NoBounds)?;
            print_json(&bounds)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

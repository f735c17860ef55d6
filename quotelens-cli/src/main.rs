//! Quotelens CLI - cursor-aware string and entity search

use clap::{Parser, Subcommand};
use quotelens_client::{CodeIntel, SearchClient};
use quotelens_core::{EntitiesConfig, PatternKind, Position, QuotelensError, DEFAULT_CONFIG};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "quotelens.toml";

#[derive(Parser)]
#[command(name = "quotelens")]
#[command(about = "Find the string or entity under a cursor and search for it", long_about = None)]
struct Cli {
    /// Entities config file (default: ./quotelens.toml when present)
    #[arg(long, global = true)]
    entities: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Search backend URL
    #[arg(long, global = true, env = "QUOTELENS_BACKEND_URL", default_value = "http://127.0.0.1:7080")]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default quotelens.toml
    Init {
        /// Target path (default: ./quotelens.toml)
        path: Option<PathBuf>,
    },

    /// Load and validate the entities config
    Check,

    /// Print the string literal under a cursor (zero-based line/column)
    Locate {
        file: PathBuf,
        line: usize,
        character: usize,
    },

    /// Print hover content for the cursor position
    Hover {
        file: PathBuf,
        line: usize,
        character: usize,
    },

    /// Search definitions of the entity under the cursor
    Defs {
        file: PathBuf,
        line: usize,
        character: usize,
        /// Document URI (git://repo?rev#path) used to scope the search
        #[arg(long)]
        uri: Option<String>,
    },

    /// Search references to the entity or string under the cursor
    Refs {
        file: PathBuf,
        line: usize,
        character: usize,
        /// Document URI (git://repo?rev#path) used to scope the search
        #[arg(long)]
        uri: Option<String>,
    },

    /// Search implementations of the entity under the cursor
    Impls {
        file: PathBuf,
        line: usize,
        character: usize,
        /// Document URI (git://repo?rev#path) used to scope the search
        #[arg(long)]
        uri: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Init { path } => cmd_init(path.clone()),
        Commands::Check => cmd_check(&cli),
        Commands::Locate {
            file,
            line,
            character,
        } => cmd_locate(&cli, file, Position::new(*line, *character)),
        Commands::Hover {
            file,
            line,
            character,
        } => cmd_hover(&cli, file, Position::new(*line, *character)),
        Commands::Defs {
            file,
            line,
            character,
            uri,
        } => cmd_occurrences(
            &cli,
            PatternKind::Definition,
            file,
            Position::new(*line, *character),
            uri.as_deref(),
        ),
        Commands::Refs {
            file,
            line,
            character,
            uri,
        } => cmd_occurrences(
            &cli,
            PatternKind::Reference,
            file,
            Position::new(*line, *character),
            uri.as_deref(),
        ),
        Commands::Impls {
            file,
            line,
            character,
            uri,
        } => cmd_occurrences(
            &cli,
            PatternKind::Implementation,
            file,
            Position::new(*line, *character),
            uri.as_deref(),
        ),
    };

    if let Err(e) = result {
        if cli.json {
            let error_json = match &e {
                QuotelensError::BackendError {
                    code,
                    message,
                    hint,
                } => {
                    serde_json::json!({ "code": code, "message": message, "hint": hint })
                }
                _ => {
                    serde_json::json!({ "code": "error", "message": e.to_string(), "hint": "" })
                }
            };
            eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap());
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Load the entities config: explicit path, then ./quotelens.toml, then
/// the builtin defaults.
fn load_entities(cli: &Cli) -> Result<EntitiesConfig, QuotelensError> {
    if let Some(path) = &cli.entities {
        return EntitiesConfig::load(path);
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return EntitiesConfig::load(local);
    }
    Ok(EntitiesConfig::builtin())
}

fn make_intel(cli: &Cli) -> Result<CodeIntel, QuotelensError> {
    let entities = load_entities(cli)?;
    Ok(CodeIntel::new(entities, SearchClient::new(&cli.backend_url)))
}

fn read_document(file: &Path) -> Result<String, QuotelensError> {
    Ok(std::fs::read_to_string(file)?)
}

fn cmd_init(path: Option<PathBuf>) -> Result<(), QuotelensError> {
    use colored::Colorize;

    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if path.exists() {
        return Err(QuotelensError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    std::fs::write(&path, DEFAULT_CONFIG)?;

    println!("{} {}", "Created".green(), path.display());
    Ok(())
}

fn cmd_check(cli: &Cli) -> Result<(), QuotelensError> {
    use colored::Colorize;

    let entities = load_entities(cli)?;

    if cli.json {
        let summary: Vec<_> = entities
            .entities
            .iter()
            .map(|e| {
                serde_json::json!({
                    "name": e.name,
                    "definitions": e.definitions.len(),
                    "references": e.references.len(),
                    "implementations": e.implementations.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        return Ok(());
    }

    for entity in &entities.entities {
        println!(
            "{} {} ({} definitions, {} references, {} implementations)",
            "Entity".blue(),
            entity.name,
            entity.definitions.len(),
            entity.references.len(),
            entity.implementations.len()
        );
    }
    println!("{} {} entities", "OK".green(), entities.entities.len());
    Ok(())
}

fn cmd_locate(cli: &Cli, file: &Path, position: Position) -> Result<(), QuotelensError> {
    use colored::Colorize;

    let text = read_document(file)?;
    match quotelens_core::string_at(&text, position) {
        Some(found) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found).unwrap());
            } else {
                println!(
                    "{} {:?} (line {}, {}..{})",
                    "Literal".green(),
                    found.value,
                    found.span.line,
                    found.span.start,
                    found.span.end
                );
            }
        }
        None => {
            if cli.json {
                println!("null");
            } else {
                println!("{}", "No string literal at this position".yellow());
            }
        }
    }
    Ok(())
}

fn cmd_hover(cli: &Cli, file: &Path, position: Position) -> Result<(), QuotelensError> {
    use colored::Colorize;

    let intel = make_intel(cli)?;
    let text = read_document(file)?;
    match intel.hover(&text, position)? {
        Some(hover) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hover).unwrap());
            } else {
                println!("{}", hover.contents);
                println!(
                    "{} line {}, {}..{}",
                    "Span".blue(),
                    hover.span.line,
                    hover.span.start,
                    hover.span.end
                );
            }
        }
        None => {
            if cli.json {
                println!("null");
            } else {
                println!("{}", "Nothing to hover at this position".yellow());
            }
        }
    }
    Ok(())
}

fn cmd_occurrences(
    cli: &Cli,
    kind: PatternKind,
    file: &Path,
    position: Position,
    uri: Option<&str>,
) -> Result<(), QuotelensError> {
    use colored::Colorize;

    let intel = make_intel(cli)?;
    let text = read_document(file)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let locations = runtime.block_on(async {
        if kind == PatternKind::Reference {
            intel.references(uri, &text, position).await
        } else {
            intel.occurrences(kind, uri, &text, position).await
        }
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&locations).unwrap());
        return Ok(());
    }

    if locations.is_empty() {
        println!("{} no {}s found", "Done".yellow(), kind.as_str());
        return Ok(());
    }

    for location in &locations {
        println!(
            "{} {} line {} ({}..{})",
            kind.as_str().green(),
            location.uri,
            location.line,
            location.start,
            location.start + location.length
        );
    }
    println!("{} {} locations", "Done".green(), locations.len());
    Ok(())
}

//! # Ardoise CLI
//!
//! Renders one document to its layout description.
//!
//! ## Usage
//! ```bash
//! # Print the layout of a document
//! ardoise devis.json
//!
//! # Write it to a file, pretty-printed, with a specific profile
//! ardoise devis.json --out devis.layout.json --pretty --config ./appearance.toml
//!
//! # Read the document from stdin
//! cat facture.json | ardoise -
//!
//! # Seed an editable profile from the current settings
//! ARDOISE_PRIMARY_COLOR=#0f766e ardoise --init-config
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see synthesis decisions.

use std::env;
use std::io::{Read, Write};
use std::path::PathBuf;

use ardoise_core::types::Document;
use ardoise_layout::{render_document, JsonRenderer, RenderConfig, Renderer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
    init_config: bool,
}

fn print_help() {
    println!("Ardoise document preview");
    println!();
    println!("Usage: ardoise [OPTIONS] <DOCUMENT>");
    println!();
    println!("Arguments:");
    println!("  <DOCUMENT>            Document JSON file, or - for stdin");
    println!();
    println!("Options:");
    println!("  -o, --out <PATH>      Write the layout here instead of stdout");
    println!("  -c, --config <PATH>   Appearance profile (default: platform config dir)");
    println!("  -p, --pretty          Indent the output");
    println!("      --init-config     Write the effective profile to the config path and exit");
    println!("  -h, --help            Show this help message");
}

/// Returns `None` when help was requested.
fn parse_args() -> Option<Args> {
    let argv: Vec<String> = env::args().collect();
    let mut args = Args::default();

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < argv.len() {
                    args.out = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < argv.len() {
                    args.config = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            }
            "--pretty" | "-p" => args.pretty = true,
            "--init-config" => args.init_config = true,
            "--help" | "-h" => {
                print_help();
                return None;
            }
            other => args.input = Some(other.to_string()),
        }
        i += 1;
    }

    Some(args)
}

fn read_document(input: &str) -> Result<Document, Box<dyn std::error::Error>> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args() else {
        return Ok(());
    };

    if args.init_config {
        let mut config = RenderConfig::load(args.config.clone())?;
        config.output.pretty |= args.pretty;
        let path = config.save(args.config.clone())?;
        println!("Profile written to {}", path.display());
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        print_help();
        return Err("missing document argument".into());
    };

    let config = RenderConfig::load_or_default(args.config.clone());
    let renderer = JsonRenderer::new(args.pretty || config.output.pretty);

    let document = read_document(input)?;
    info!(input, content_type = renderer.content_type(), "Document loaded");

    let bytes = match render_document(document, &config.appearance, &renderer).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Render failed: {}", e);
            return Err(e.into());
        }
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            info!(?path, bytes = bytes.len(), "Layout written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

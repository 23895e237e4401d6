//! gddoc — generate Godot class reference files from documented GDExtension
//! declarations.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `gddoc < classes.json` writes every record to stdout
//! - **file mode**: `gddoc -o doc_classes manifests/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use gddoc::render::{self, Renderer};
use gddoc::{ClassDoc, Manifest};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "gddoc",
    about = "Generate Godot class reference XML from documented GDExtension declarations"
)]
struct Cli {
    /// Manifest files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: xml (default), json
    #[arg(short = 'f', long, default_value = "xml")]
    format: String,

    /// Print the records that would be written, one per line, without writing them
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one manifest from stdin, write every record to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let manifest = Manifest::parse(&input).context("invalid manifest on stdin")?;
    let renderer = render::create_renderer(&cli.format)?;

    for decl in &manifest.classes {
        if cli.list {
            println!("{}", record_name(&decl.name, renderer.as_ref()));
            continue;
        }
        let class = ClassDoc::from_decl(decl);
        print!("{}", renderer.render(&class)?);
    }
    Ok(())
}

/// file mode: process every manifest, one record file per class.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    let renderer = render::create_renderer(&cli.format)?;

    if !cli.list {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("failed to create output directory: {}", output_dir.display())
        })?;
    }

    let input_files = expand_globs(&cli.files)?;

    let mut written = 0;
    for path in &input_files {
        let manifest = match Manifest::from_path(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        tracing::debug!("{}: {} classes", path.display(), manifest.classes.len());

        for decl in &manifest.classes {
            let out_path = output_dir.join(record_name(&decl.name, renderer.as_ref()));
            if cli.list {
                println!("{}", out_path.display());
                continue;
            }

            let class = ClassDoc::from_decl(decl);
            let output = renderer.render(&class)?;
            fs::write(&out_path, output)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            tracing::debug!("wrote {}", out_path.display());
            written += 1;
        }
    }

    if !cli.list {
        tracing::info!("wrote {} records to {}", written, output_dir.display());
    }
    Ok(())
}

/// File name of the record for a class: `Player` → `Player.xml`.
fn record_name(class: &str, renderer: &dyn Renderer) -> String {
    format!("{}.{}", class, renderer.file_extension())
}

/// File extensions recognized as manifests when scanning a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for manifests.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

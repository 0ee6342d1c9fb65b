//! subdoc: generate reference documentation from annotated JavaScript.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `subdoc < library.js` prints every namespace to stdout
//! - **file mode**: `subdoc -o docs src/` writes one file per namespace

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Component, Path, PathBuf};
use subdoc::config::Config;
use subdoc::model::Namespace;
use subdoc::render::{self, Renderer};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SUBDOC_LOG";

const DEFAULT_FORMAT: &str = "markdown";

#[derive(Parser)]
#[command(
    name = "subdoc",
    version,
    about = "Generate reference documentation from annotated JavaScript source files"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted (and no config
    /// sets `indir`), reads from stdin.
    inputs: Vec<String>,

    /// Output directory (defaults to <indir>/docs)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Config file (defaults to subdoc.json in the input directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Path prefix to skip while walking directories. Repeatable.
    #[arg(short = 'x', long)]
    exclude: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let format = cli
        .format
        .as_deref()
        .or(config.format.as_deref())
        .unwrap_or(DEFAULT_FORMAT);
    let renderer = render::create_renderer(format)?;

    if cli.inputs.is_empty() && config.indir.is_none() {
        return stdin_mode(renderer.as_ref());
    }

    file_mode(&cli, &config, renderer.as_ref())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// `-c` when given, else `subdoc.json` in the input directory if present.
fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path).map_err(Into::into);
    }
    let dir = first_dir(&cli.inputs).unwrap_or_else(|| PathBuf::from("."));
    let config = Config::discover(&dir)?;
    if config.is_some() {
        debug!("using config from {}", dir.display());
    }
    Ok(config.unwrap_or_default())
}

fn first_dir(inputs: &[String]) -> Option<PathBuf> {
    inputs
        .first()
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
}

/// stdin mode: read from stdin, write every namespace to stdout.
fn stdin_mode(renderer: &dyn Renderer) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let scan = subdoc::scan(&input);
    for namespace in &scan.namespaces {
        print!("{}", renderer.render(namespace)?);
    }
    Ok(())
}

/// file mode: gather sources, scan them as one text, write one file per
/// namespace into the output directory.
fn file_mode(cli: &Cli, config: &Config, renderer: &dyn Renderer) -> Result<()> {
    let inputs: Vec<String> = if cli.inputs.is_empty() {
        config
            .indir
            .iter()
            .map(|dir| dir.to_string_lossy().into_owned())
            .collect()
    } else {
        cli.inputs.clone()
    };

    let indir = first_dir(&inputs)
        .or_else(|| config.indir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let output_dir = cli
        .output
        .clone()
        .or_else(|| config.outdir.clone())
        .unwrap_or_else(|| indir.join("docs"));

    let mut excludes = cli.exclude.clone();
    excludes.extend(config.exclude.iter().cloned());

    let files = expand_inputs(&inputs, &excludes)?;
    info!("scanning {} file(s)", files.len());
    let source = read_sources(&files);
    let scan = subdoc::scan(&source);

    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let ext = renderer.file_extension();
    for namespace in &scan.namespaces {
        let out_path = output_dir.join(format!("{}.{}", output_name(namespace), ext));
        let output = renderer.render(namespace)?;
        fs::write(&out_path, output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!("wrote {}", out_path.display());
    }

    if !scan.diagnostics.is_empty() {
        warn!(
            "{} reference(s) skipped because of malformed comments",
            scan.diagnostics.len()
        );
    }
    Ok(())
}

/// Source file extension.
const SOURCE_EXTENSION: &str = "js";

/// Expand inputs into a sorted list of source files.
///
/// Files are taken as they are, directories are walked recursively for
/// `.js` files, anything else is tried as a glob pattern.
fn expand_inputs(inputs: &[String], excludes: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let excludes: Vec<PathBuf> = excludes.iter().map(|p| normalize(p)).collect();
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        if path.is_dir() {
            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_excluded(entry.path(), &excludes));
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                if entry.file_type().is_file() && has_source_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            continue;
        }

        let matches: Vec<_> = glob::glob(input)
            .with_context(|| format!("invalid glob pattern: {}", input))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && !is_excluded(p, &excludes))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", input);
        }
        files.extend(matches);
    }

    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Drop `.` components so `./src/vendor` and `src/vendor` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    let path = normalize(path);
    excludes.iter().any(|exclude| path.starts_with(exclude))
}

/// Concatenate readable files, one newline between each.
fn read_sources(files: &[PathBuf]) -> String {
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        match fs::read_to_string(path) {
            Ok(text) => sources.push(text),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }
    sources.join("\n")
}

/// Output file name (without extension) for a namespace.
fn output_name(namespace: &Namespace) -> String {
    if namespace.is_global() {
        return "global".to_string();
    }
    namespace.doc.identifier.replace(['/', '\\'], "_")
}

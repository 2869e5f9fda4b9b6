//! `blueprint` -- render a level blueprint to an SVG map.
//!
//! Reads free-form text containing a fenced `level-json` block (or bare
//! layout JSON with `--raw-json`) from a file or stdin, and writes the map as
//! SVG or as the scene graph in JSON. The status line goes to stderr:
//!
//! ```text
//! $ blueprint crypt.md -o crypt.svg --no-enemies
//! Done. Rendered 3 rooms, 2 connections, 2 doors, 1 windows, 1 props, 2 enemies.
//! ```
//!
//! Set `RUST_LOG=debug` for per-render details; anomalies such as dangling
//! room references are logged at `warn` by default.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use blueprint_render::prelude::*;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Standalone SVG document.
    Svg,
    /// The composed scene graph as JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Blueprint text to read. Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Where to write the map. Writes stdout when omitted.
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// JSON render config, e.g. `{"showGrid": false}`. Flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat the input as bare layout JSON instead of text with a fenced block.
    #[arg(long)]
    raw_json: bool,

    #[arg(long)]
    no_grid: bool,
    #[arg(long)]
    no_doors: bool,
    #[arg(long)]
    no_windows: bool,
    #[arg(long)]
    no_props: bool,
    #[arg(long)]
    no_enemies: bool,
}

impl Args {
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        let hidden = [
            (self.no_grid, LayerKind::Grid),
            (self.no_doors, LayerKind::Doors),
            (self.no_windows, LayerKind::Windows),
            (self.no_props, LayerKind::Props),
            (self.no_enemies, LayerKind::Enemies),
        ];
        for (hide, kind) in hidden {
            if hide {
                config.set_visible(kind, false);
            }
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.render_config()?;
    let text = read_input(args.input.as_deref())?;
    tracing::debug!(bytes = text.len(), raw_json = args.raw_json, ?config, "input read");

    let mut session = Session::new(config);
    if args.raw_json {
        session.generate_json(&text);
    } else {
        session.generate(&text);
    }

    let Some(scene) = session.scene() else {
        eprintln!("{}", session.status());
        return Ok(ExitCode::FAILURE);
    };

    let rendered = match args.format {
        Format::Svg => scene.to_svg_string(),
        Format::Json => serde_json::to_string_pretty(scene).context("serializing scene")?,
    };
    write_output(args.output.as_deref(), &rendered)?;

    eprintln!("{}", session.status());
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush().context("writing stdout")
        }
    }
}

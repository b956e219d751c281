//! piecebuf - apply edits to a text file through a piece-table buffer.
//!
//! # Usage
//!
//! ```bash
//! piecebuf notes.txt --edit 'insert:0:# Title\n' --edit delete:10:4
//! piecebuf notes.txt --position 42 --stats
//! piecebuf notes.txt -e i:0:x -o edited.txt --line-index rebuild
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use piecebuf::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use piecebuf::editor::{Buffer, LineIndexMode};
use piecebuf::perf;
use piecebuf::script::{apply_script, parse_script};

/// Apply edits to a text file through a piece-table buffer
#[derive(Parser, Debug)]
#[command(name = "piecebuf", version, about, long_about = None)]
struct Cli {
    /// Text file to load
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Edit to apply: `insert:<POS>:<TEXT>` or `delete:<POS>:<LEN>` (repeatable)
    #[arg(short, long = "edit", value_name = "OP")]
    edits: Vec<String>,

    /// Write the edited text here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print `line:column` for a character offset (repeatable)
    #[arg(long = "position", value_name = "POS")]
    positions: Vec<usize>,

    /// Print length, line count and piece count to stderr
    #[arg(long)]
    stats: bool,

    /// How the line index follows edits
    #[arg(long, value_enum)]
    line_index: Option<LineIndexMode>,

    /// Print timing scopes to stderr
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        stats: cli.stats,
        perf: cli.perf,
        line_index: cli.line_index,
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    perf::set_enabled(effective.perf);

    let ops = parse_script(&cli.edits)?;
    let text = {
        let _scope = perf::scope("read file");
        std::fs::read_to_string(&cli.file)
            .with_context(|| format!("Failed to read {}", cli.file.display()))?
    };

    let mut buffer = {
        let _scope = perf::scope("build buffer");
        Buffer::with_options(&text, effective.buffer_options())
    };
    info!(
        file = %cli.file.display(),
        len = buffer.len(),
        lines = buffer.line_count(),
        "loaded buffer"
    );

    {
        let _scope = perf::scope("apply edits");
        apply_script(&mut buffer, &ops)
            .with_context(|| format!("Failed to edit {}", cli.file.display()))?;
    }

    for &pos in &cli.positions {
        let (line, column) = buffer
            .position(pos)
            .with_context(|| format!("Invalid --position {pos}"))?;
        eprintln!("{pos}: {line}:{column}");
    }

    if effective.stats {
        eprintln!(
            "chars: {}  lines: {}  pieces: {}",
            buffer.len(),
            buffer.line_count(),
            buffer.piece_count()
        );
    }

    let edited = buffer.as_text();
    match &cli.output {
        Some(path) => std::fs::write(path, edited)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(edited.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

//! Saved defaults for the command-line driver.
//!
//! Defaults live in rc files holding the same flags the command line accepts,
//! one or more per line. Blank lines and `#` comments are ignored. The global
//! file is merged with a local `.piecebufrc`, then with the actual command
//! line; later sources override options and switch on boolean flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::{BufferOptions, LineIndexMode};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub stats: bool,
    pub perf: bool,
    pub line_index: Option<LineIndexMode>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            stats: self.stats || other.stats,
            perf: self.perf || other.perf,
            line_index: other.line_index.or(self.line_index),
        }
    }

    /// Buffer options selected by these flags.
    pub fn buffer_options(&self) -> BufferOptions {
        BufferOptions {
            line_index: self.line_index.unwrap_or_default(),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("piecebuf").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("piecebuf")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("piecebuf").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("piecebuf")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".piecebufrc")
}

/// Read flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Fails if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Fails if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# piecebuf defaults (saved with --save)".to_string()];
    if flags.stats {
        lines.push("--stats".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(mode) = flags.line_index {
        lines.push(format!("--line-index {}", line_index_name(mode)));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the file at `path` if there is one.
///
/// # Errors
///
/// Fails if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens are skipped, so
/// this accepts raw `std::env::args()` as well as rc file contents.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--stats" {
            flags.stats = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--line-index" {
            if let Some(next) = tokens.get(i + 1) {
                flags.line_index = parse_line_index(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--line-index=") {
            flags.line_index = parse_line_index(value);
        }
        i += 1;
    }
    flags
}

fn parse_line_index(s: &str) -> Option<LineIndexMode> {
    match s {
        "rebuild" => Some(LineIndexMode::Rebuild),
        "incremental" => Some(LineIndexMode::Incremental),
        _ => None,
    }
}

const fn line_index_name(mode: LineIndexMode) -> &'static str {
    match mode {
        LineIndexMode::Rebuild => "rebuild",
        LineIndexMode::Incremental => "incremental",
    }
}

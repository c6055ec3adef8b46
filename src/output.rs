//! # Output Configuration
//!
//! Controls how enrichment results are shown on the terminal and renders the
//! run summary.
//!
//! Color and emoji use follow these inputs, strongest first:
//! - `--color=never|always|auto` CLI flag
//! - `NO_COLOR` disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` disables colors
//! - `CLICOLOR_FORCE=1` forces colors even in non-TTY
//! - `TERM=dumb` disables colors

use std::env;
use std::path::Path;

use crate::enrich::Outcome;
use crate::reconcile::Field;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always", "never", or "auto".
    /// Anything other than "always" or "never" is treated as "auto".
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Human-readable summary of a run against `path`.
///
/// The dry-run document itself is not part of the summary.
pub fn summarize(config: &OutputConfig, path: &Path, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Missing => format!(
            "{} No descriptor at {}, nothing to do",
            emoji(config, "⚠️ ", "[SKIP]"),
            path.display()
        ),
        Outcome::Unchanged => format!(
            "{} {} is up to date",
            emoji(config, "✅", "[OK]"),
            path.display()
        ),
        Outcome::Written { changed } => format!(
            "{} Updated {} ({} fields)\n{}",
            emoji(config, "✅", "[OK]"),
            path.display(),
            changed.len(),
            field_list(changed)
        ),
        Outcome::Preview { changed, .. } => {
            if changed.is_empty() {
                format!(
                    "{} DRY RUN: {} is up to date",
                    emoji(config, "🔎", "[DRY RUN]"),
                    path.display()
                )
            } else {
                format!(
                    "{} DRY RUN: would update {} ({} fields)\n{}",
                    emoji(config, "🔎", "[DRY RUN]"),
                    path.display(),
                    changed.len(),
                    field_list(changed)
                )
            }
        }
    }
}

fn field_list(changed: &[Field]) -> String {
    changed
        .iter()
        .map(|field| format!("   {}", field))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Color and styling helpers for CLI output.
//!
//! Semantic color theme:
//!   - Success:   green   (valid snapshots, acyclic edges)
//!   - Error:     red     (validation failures, cycles)
//!   - Info:      cyan    (unit names)
//!   - Muted:     dimmed  (positions, depths, arrows)

use std::env;

use colored::Colorize;

/// Whether output should be colorized, and which glyphs to print.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
}

impl OutputConfig {
    /// Resolve output settings from configuration and the environment.
    ///
    /// Reads:
    /// - `NO_COLOR`: any value disables colors and Unicode icons
    /// - `DATAUNITS_ASCII`: set to "1" or "true" for ASCII-only icons
    pub fn new(color_enabled: bool) -> Self {
        let no_color = env::var_os("NO_COLOR").is_some();
        let ascii_requested = match env::var("DATAUNITS_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "DATAUNITS_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        Self {
            use_colors: color_enabled && !no_color,
            use_ascii: no_color || ascii_requested,
        }
    }
}

/// Icon for a passing check.
pub fn check_icon(config: OutputConfig) -> &'static str {
    if config.use_ascii { "ok" } else { "✓" }
}

/// Icon for a failing check.
pub fn cross_icon(config: OutputConfig) -> &'static str {
    if config.use_ascii { "x" } else { "✗" }
}

/// Bullet for list entries.
pub fn bullet_icon(config: OutputConfig) -> &'static str {
    if config.use_ascii { "-" } else { "•" }
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red, bold) to text.
pub fn error(text: &str, config: OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().bold().to_string()
}

/// Colorize a unit name (cyan).
pub fn unit(name: &str, config: OutputConfig) -> String {
    if !config.use_colors {
        return name.to_string();
    }
    name.cyan().to_string()
}

/// Dim secondary text.
pub fn muted(text: &str, config: OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

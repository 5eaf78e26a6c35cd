use folio_core::typewriter::TypewriterTiming;
use serde::Deserialize;
use std::time::Duration;

/// Flattened runtime configuration. On disk it is split into tables.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default = "crate::config::defaults::default_expand_animation_ms")]
    pub expand_animation_ms: u64,
    #[serde(default = "crate::config::defaults::default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_typewriter")]
    pub typewriter: TypewriterTiming,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_theme")]
    pub key_toggle_theme: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_motion")]
    pub key_toggle_motion: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
    #[serde(default = "crate::config::defaults::default_key_previous_slide")]
    pub key_previous_slide: String,
    #[serde(default = "crate::config::defaults::default_key_next_slide")]
    pub key_next_slide: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            reduced_motion: false,
            expand_animation_ms: crate::config::defaults::default_expand_animation_ms(),
            frame_interval_ms: crate::config::defaults::default_frame_interval_ms(),
            typewriter: crate::config::defaults::default_typewriter(),
            log_level: LogLevel::default(),
            key_toggle_theme: crate::config::defaults::default_key_toggle_theme(),
            key_toggle_motion: crate::config::defaults::default_key_toggle_motion(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
            key_previous_slide: crate::config::defaults::default_key_previous_slide(),
            key_next_slide: crate::config::defaults::default_key_next_slide(),
        }
    }
}

impl AppConfig {
    pub fn expand_animation(&self) -> Duration {
        Duration::from_millis(self.expand_animation_ms)
    }

    /// Redraw cadence while something animates; never below one millisecond.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Day or night palette.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Night)
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

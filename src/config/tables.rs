use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use folio_core::typewriter::TypewriterTiming;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    motion: MotionConfig,
    #[serde(default)]
    typewriter: TypewriterTiming,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            reduced_motion: tables.motion.reduced_motion,
            expand_animation_ms: tables.motion.expand_animation_ms,
            frame_interval_ms: tables.motion.frame_interval_ms,
            typewriter: tables.typewriter,
            log_level: tables.logging.log_level,
            key_toggle_theme: tables.keys.toggle_theme,
            key_toggle_motion: tables.keys.toggle_motion,
            key_safe_quit: tables.keys.safe_quit,
            key_previous_slide: tables.keys.previous_slide,
            key_next_slide: tables.keys.next_slide,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                window_width: config.window_width,
                window_height: config.window_height,
            },
            motion: MotionConfig {
                reduced_motion: config.reduced_motion,
                expand_animation_ms: config.expand_animation_ms,
                frame_interval_ms: config.frame_interval_ms,
            },
            typewriter: config.typewriter,
            keys: KeysConfig {
                toggle_theme: config.key_toggle_theme.clone(),
                toggle_motion: config.key_toggle_motion.clone(),
                safe_quit: config.key_safe_quit.clone(),
                previous_slide: config.key_previous_slide.clone(),
                next_slide: config.key_next_slide.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct MotionConfig {
    #[serde(default)]
    reduced_motion: bool,
    #[serde(default = "defaults::default_expand_animation_ms")]
    expand_animation_ms: u64,
    #[serde(default = "defaults::default_frame_interval_ms")]
    frame_interval_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            expand_animation_ms: defaults::default_expand_animation_ms(),
            frame_interval_ms: defaults::default_frame_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_theme")]
    toggle_theme: String,
    #[serde(default = "defaults::default_key_toggle_motion")]
    toggle_motion: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
    #[serde(default = "defaults::default_key_previous_slide")]
    previous_slide: String,
    #[serde(default = "defaults::default_key_next_slide")]
    next_slide: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            toggle_theme: defaults::default_key_toggle_theme(),
            toggle_motion: defaults::default_key_toggle_motion(),
            safe_quit: defaults::default_key_safe_quit(),
            previous_slide: defaults::default_key_previous_slide(),
            next_slide: defaults::default_key_next_slide(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default)]
    log_level: LogLevel,
}

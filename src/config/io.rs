use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read `path`, falling back to defaults when it is missing or invalid.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<ConfigTables>(contents).map(AppConfig::from)
}

pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ConfigTables::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").expect("empty TOML parses");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn tables_map_onto_flat_fields() {
        let config = parse_config(
            r#"
            [appearance]
            theme = "night"

            [motion]
            reduced_motion = true
            expand_animation_ms = 200

            [typewriter]
            hold_ms = 900

            [keys]
            toggle_theme = "ctrl+t"

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("valid TOML");
        assert_eq!(config.theme, ThemeMode::Night);
        assert!(config.reduced_motion);
        assert_eq!(config.expand_animation_ms, 200);
        assert_eq!(config.typewriter.hold_ms, 900);
        assert_eq!(config.typewriter.type_base_ms, 55);
        assert_eq!(config.key_toggle_theme, "ctrl+t");
        assert_eq!(config.key_safe_quit, "q");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut config = AppConfig::default();
        config.theme = ThemeMode::Night;
        config.typewriter.erase_ms = 12;
        let text = serialize_config(&config).expect("serializes");
        assert!(text.contains("[typewriter]"));
        assert_eq!(parse_config(&text).expect("reparses"), config);
    }

    #[test]
    fn missing_file_falls_back() {
        let config = load_config(Path::new("/nonexistent/folio/config.toml"));
        assert_eq!(config, AppConfig::default());
    }
}

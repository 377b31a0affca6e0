//! Configuration loading.
//!
//! Two sources:
//! - the sync configuration (JSON) naming the video, the document and the
//!   timetable; it is required and any problem with it stops startup;
//! - application settings in `conf/config.toml`; missing or invalid entries
//!   fall back to defaults so the player can still launch.

mod defaults;
mod error;
mod models;
mod sync_config;
mod tables;

pub use models::AppConfig;
pub use sync_config::{SyncConfig, load_sync_config};

use std::fs;
use std::path::Path;
use tables::ConfigTables;
use tracing::{debug, info, warn};

/// Load settings from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded settings");
            data
        }
        Err(err) => {
            warn!(path = %path.display(), "Falling back to default settings: {err}");
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            debug!("Parsed settings from disk");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid settings TOML: {err}");
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
    use std::time::Duration;
    use syncdeck_core::SplitOrientation;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.session_settings().suppression_window,
            Duration::from_millis(500)
        );
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn reads_grouped_tables() {
        let config = parse_config(
            r#"
            [sync]
            suppression_window_ms = 750
            guard_stale_renders = false

            [layout]
            max_render_scale = 1.5

            [keys]
            key_next_page = "n"

            [logging]
            log_level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.suppression_window_ms, 750);
        assert!(!config.session_settings().guard_stale_renders);
        assert_eq!(config.max_render_scale, 1.5);
        assert_eq!(config.key_next_page, "n");
        assert_eq!(config.key_prev_page, "arrowleft");
        assert_eq!(config.log_level, models::LogLevel::Warn);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        assert!(parse_config("[sync]\nsuppression_window_ms = \"soon\"").is_err());
        assert_eq!(
            load_config(Path::new("/no/such/settings.toml")),
            AppConfig::default()
        );
    }

    #[test]
    fn serialized_settings_parse_back() {
        let mut config = AppConfig::default();
        config.key_toggle_play_pause = "k".to_string();
        config.resize_debounce_ms = 100;
        let text = serialize_config(&config).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn viewport_subtracts_padding() {
        let config = AppConfig::default();
        let viewport = config.viewport_for(840.0, 700.0);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 600.0);
    }

    #[test]
    fn layout_settings_drive_split_view() {
        let config = parse_config("[layout]\nstacked_breakpoint_px = 600\nmin_panel_px = 100").unwrap();
        assert_eq!(config.split_orientation(600.0), SplitOrientation::Vertical);
        assert_eq!(config.split_orientation(601.0), SplitOrientation::Horizontal);

        let sizes = config.panel_limits().constrain(5.0, 1000.0);
        assert_eq!(sizes.video, 10.0);
        assert_eq!(sizes.document, 90.0);
    }
}

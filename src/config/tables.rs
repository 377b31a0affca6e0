use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::{Deserialize, Serialize};

/// On-disk shape of `conf/config.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    sync: SyncBehaviorConfig,
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            suppression_window_ms: tables.sync.suppression_window_ms,
            guard_stale_renders: tables.sync.guard_stale_renders,
            resize_debounce_ms: tables.layout.resize_debounce_ms,
            max_render_scale: tables.layout.max_render_scale,
            padding_horizontal: tables.layout.padding_horizontal,
            padding_vertical: tables.layout.padding_vertical,
            stacked_breakpoint_px: tables.layout.stacked_breakpoint_px,
            min_panel_px: tables.layout.min_panel_px,
            min_panel_percent: tables.layout.min_panel_percent,
            container_width: tables.layout.container_width,
            container_height: tables.layout.container_height,
            key_prev_page: tables.keys.key_prev_page,
            key_next_page: tables.keys.key_next_page,
            key_toggle_play_pause: tables.keys.key_toggle_play_pause,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            sync: SyncBehaviorConfig {
                suppression_window_ms: config.suppression_window_ms,
                guard_stale_renders: config.guard_stale_renders,
            },
            layout: LayoutConfig {
                resize_debounce_ms: config.resize_debounce_ms,
                max_render_scale: config.max_render_scale,
                padding_horizontal: config.padding_horizontal,
                padding_vertical: config.padding_vertical,
                stacked_breakpoint_px: config.stacked_breakpoint_px,
                min_panel_px: config.min_panel_px,
                min_panel_percent: config.min_panel_percent,
                container_width: config.container_width,
                container_height: config.container_height,
            },
            keys: KeysConfig {
                key_prev_page: config.key_prev_page.clone(),
                key_next_page: config.key_next_page.clone(),
                key_toggle_play_pause: config.key_toggle_play_pause.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct SyncBehaviorConfig {
    #[serde(default = "defaults::default_suppression_window_ms")]
    suppression_window_ms: u64,
    #[serde(default = "defaults::default_guard_stale_renders")]
    guard_stale_renders: bool,
}

impl Default for SyncBehaviorConfig {
    fn default() -> Self {
        Self {
            suppression_window_ms: defaults::default_suppression_window_ms(),
            guard_stale_renders: defaults::default_guard_stale_renders(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LayoutConfig {
    #[serde(default = "defaults::default_resize_debounce_ms")]
    resize_debounce_ms: u64,
    #[serde(default = "defaults::default_max_render_scale")]
    max_render_scale: f32,
    #[serde(default = "defaults::default_padding_horizontal")]
    padding_horizontal: f32,
    #[serde(default = "defaults::default_padding_vertical")]
    padding_vertical: f32,
    #[serde(default = "defaults::default_stacked_breakpoint_px")]
    stacked_breakpoint_px: f32,
    #[serde(default = "defaults::default_min_panel_px")]
    min_panel_px: f32,
    #[serde(default = "defaults::default_min_panel_percent")]
    min_panel_percent: f32,
    #[serde(default = "defaults::default_container_width")]
    container_width: f32,
    #[serde(default = "defaults::default_container_height")]
    container_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: defaults::default_resize_debounce_ms(),
            max_render_scale: defaults::default_max_render_scale(),
            padding_horizontal: defaults::default_padding_horizontal(),
            padding_vertical: defaults::default_padding_vertical(),
            stacked_breakpoint_px: defaults::default_stacked_breakpoint_px(),
            min_panel_px: defaults::default_min_panel_px(),
            min_panel_percent: defaults::default_min_panel_percent(),
            container_width: defaults::default_container_width(),
            container_height: defaults::default_container_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_prev_page")]
    key_prev_page: String,
    #[serde(default = "defaults::default_key_next_page")]
    key_next_page: String,
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    key_toggle_play_pause: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            key_prev_page: defaults::default_key_prev_page(),
            key_next_page: defaults::default_key_next_page(),
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::default_log_level(),
        }
    }
}

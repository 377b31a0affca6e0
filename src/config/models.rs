use super::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use syncdeck_core::{PanelLimits, SessionSettings, SplitOrientation, Viewport};

/// Application settings, flattened out of the grouped TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub suppression_window_ms: u64,
    pub guard_stale_renders: bool,
    pub resize_debounce_ms: u64,
    pub max_render_scale: f32,
    pub padding_horizontal: f32,
    pub padding_vertical: f32,
    pub stacked_breakpoint_px: f32,
    pub min_panel_px: f32,
    pub min_panel_percent: f32,
    pub container_width: f32,
    pub container_height: f32,
    pub key_prev_page: String,
    pub key_next_page: String,
    pub key_toggle_play_pause: String,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            suppression_window_ms: defaults::default_suppression_window_ms(),
            guard_stale_renders: defaults::default_guard_stale_renders(),
            resize_debounce_ms: defaults::default_resize_debounce_ms(),
            max_render_scale: defaults::default_max_render_scale(),
            padding_horizontal: defaults::default_padding_horizontal(),
            padding_vertical: defaults::default_padding_vertical(),
            stacked_breakpoint_px: defaults::default_stacked_breakpoint_px(),
            min_panel_px: defaults::default_min_panel_px(),
            min_panel_percent: defaults::default_min_panel_percent(),
            container_width: defaults::default_container_width(),
            container_height: defaults::default_container_height(),
            key_prev_page: defaults::default_key_prev_page(),
            key_next_page: defaults::default_key_next_page(),
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
            log_level: defaults::default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            suppression_window: Duration::from_millis(self.suppression_window_ms),
            guard_stale_renders: self.guard_stale_renders,
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn panel_limits(&self) -> PanelLimits {
        PanelLimits {
            min_panel_px: self.min_panel_px,
            min_panel_percent: self.min_panel_percent,
        }
    }

    pub fn split_orientation(&self, window_width: f32) -> SplitOrientation {
        SplitOrientation::for_window_width(window_width, self.stacked_breakpoint_px)
    }

    /// Drawable area for a document container of the given outer size.
    pub fn viewport_for(&self, container_width: f32, container_height: f32) -> Viewport {
        Viewport::inside_container(
            container_width,
            container_height,
            self.padding_horizontal,
            self.padding_vertical,
        )
    }

    pub fn initial_viewport(&self) -> Viewport {
        self.viewport_for(self.container_width, self.container_height)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
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

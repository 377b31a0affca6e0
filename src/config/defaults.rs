pub(crate) fn default_suppression_window_ms() -> u64 {
    500
}

pub(crate) fn default_guard_stale_renders() -> bool {
    true
}

pub(crate) fn default_resize_debounce_ms() -> u64 {
    250
}

pub(crate) fn default_max_render_scale() -> f32 {
    2.0
}

pub(crate) fn default_padding_horizontal() -> f32 {
    40.0
}

pub(crate) fn default_padding_vertical() -> f32 {
    100.0
}

pub(crate) fn default_stacked_breakpoint_px() -> f32 {
    768.0
}

pub(crate) fn default_min_panel_px() -> f32 {
    200.0
}

pub(crate) fn default_min_panel_percent() -> f32 {
    20.0
}

pub(crate) fn default_container_width() -> f32 {
    960.0
}

pub(crate) fn default_container_height() -> f32 {
    1080.0
}

pub(crate) fn default_key_prev_page() -> String {
    "arrowleft".to_string()
}

pub(crate) fn default_key_next_page() -> String {
    "arrowright".to_string()
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_log_level() -> crate::config::models::LogLevel {
    crate::config::models::LogLevel::Debug
}

pub(crate) fn default_wrap_around() -> bool {
    false
}

pub(crate) fn default_page_flip_duration_ms() -> u64 {
    1000
}

pub(crate) fn default_page_buttons() -> bool {
    true
}

pub(crate) fn default_flick_speed_factor() -> f64 {
    0.5
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

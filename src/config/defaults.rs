use folio_core::typewriter::TypewriterTiming;

pub(crate) fn default_window_width() -> f32 {
    1100.0
}

pub(crate) fn default_window_height() -> f32 {
    820.0
}

pub(crate) fn default_expand_animation_ms() -> u64 {
    320
}

pub(crate) fn default_frame_interval_ms() -> u64 {
    16
}

pub(crate) fn default_typewriter() -> TypewriterTiming {
    TypewriterTiming::default()
}

pub(crate) fn default_key_toggle_theme() -> String {
    "t".to_string()
}

pub(crate) fn default_key_toggle_motion() -> String {
    "m".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}

pub(crate) fn default_key_previous_slide() -> String {
    "h".to_string()
}

pub(crate) fn default_key_next_slide() -> String {
    "l".to_string()
}

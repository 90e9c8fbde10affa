//! crates/logging/src/macros.rs
//! Level-gated logging macros.
//!
//! Both macros take the flag variant name, the minimum level at which the
//! message is recorded, and `format!` arguments. Formatting only happens when
//! the current thread's [`VerbosityConfig`](crate::VerbosityConfig) enables
//! the flag at that level.

/// Record a debug diagnostic when `DebugFlag::$flag` is at least `$level`.
///
/// # Example
/// ```
/// use logging::{debug_log, drain_events, init, VerbosityConfig};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.walk = 2;
/// init(config);
///
/// debug_log!(Walk, 2, "expanding {}", "top");
/// debug_log!(Walk, 3, "too detailed");
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, ::std::format!($($arg)+));
        }
    }};
}

/// Record an info diagnostic when `InfoFlag::$flag` is at least `$level`.
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, ::std::format!($($arg)+));
        }
    }};
}

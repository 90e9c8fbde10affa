//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flags.
//!
//! [`VisitLayer`] is a `tracing-subscriber` layer that maps events emitted
//! under `visit::*` targets onto [`InfoFlag`] and [`DebugFlag`] categories.
//! Events that pass the thread's [`VerbosityConfig`] are collected alongside
//! those recorded by [`debug_log!`](crate::debug_log), so callers drain a
//! single buffer regardless of which macro family produced the diagnostic.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(1));
//! tracing::info!(target: "visit::stats", "12 paths");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Prefix shared by every target the layer understands.
pub const TARGET_PREFIX: &str = "visit::";

/// A tracing layer that routes `visit::*` events into the diagnostic buffer.
///
/// The layer holds no configuration of its own: each event is gated against
/// the emitting thread's [`VerbosityConfig`] at the time it fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisitLayer;

impl VisitLayer {
    /// Create a new layer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn category(target: &str) -> Option<&str> {
        target.strip_prefix(TARGET_PREFIX)
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        let category = Self::category(target)?;
        InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == category)
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        let category = Self::category(target)?;
        DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == category)
    }

    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for VisitLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let verbosity_level = Self::level_to_verbosity_level(metadata.level());

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            if debug_gte(debug_flag, verbosity_level) {
                if let Some(message) = MessageVisitor::extract(event) {
                    emit_debug(debug_flag, verbosity_level, message);
                }
            }
            return;
        }

        if let Some(info_flag) = Self::target_to_info_flag(target) {
            if info_gte(info_flag, verbosity_level) {
                if let Some(message) = MessageVisitor::extract(event) {
                    emit_info(info_flag, verbosity_level, message);
                }
            }
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn extract(event: &tracing::Event<'_>) -> Option<String> {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor.message
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global subscriber that bridges tracing events onto the flags.
///
/// Also initialises the calling thread's verbosity configuration.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);

    let _ = tracing_subscriber::registry()
        .with(VisitLayer::new())
        .try_init();
}

/// Like [`init_tracing`], with an extra filter layer (typically an
/// `EnvFilter` built from `RUST_LOG`) applied ahead of the bridge.
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(VisitLayer::new())
        .try_init();
}
